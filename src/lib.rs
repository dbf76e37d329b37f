//! # xsdgen
//!
//! Parses XML Schema (XSD) documents into a language-agnostic prototype tree
//! that code generators can turn into Go, TypeScript, C, Java or Rust types.
//!
//! ## Features
//!
//! - Single-pass streaming walk over each schema file
//! - Builtin XSD types mapped to the target language
//! - Cross-file type resolution through `import` and `include`, with every
//!   dependency parsed at most once per session
//! - Hooks around every parse event and every emitted node
//! - Strict mode for unresolvable type references
//! - JSON dumps of the prototype tree
//!
//! ## Example
//!
//! ```rust,ignore
//! use xsdgen::{Language, ParserConfig, Session};
//!
//! let config = ParserConfig::new().with_lang(Language::Rust);
//! let mut session = Session::new(config);
//! let tree = session.parse_file("schemas/order.xsd")?;
//!
//! for node in &tree {
//!     println!("{:?} {}", node.kind(), node.name());
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Foundation
pub mod error;
pub mod limits;
pub mod stack;

// Names, namespaces and schema locations
pub mod names;
pub mod namespaces;
pub mod locations;

// Type system
pub mod builtins;
pub mod proto;

// Parsing
pub mod config;
pub mod loaders;
pub mod reader;
pub mod resolver;
pub mod session;
pub mod walker;

// Extension points and output
pub mod emit;
pub mod hooks;

pub use builtins::Language;
pub use config::{ParserConfig, Strictness};
pub use emit::{EmitUnit, Emitter, JsonEmitter, NullEmitter};
pub use error::{Error, ParseError, Result};
pub use hooks::{Flow, Hook, NoopHook, ParseContext};
pub use limits::Limits;
pub use proto::{NodeKind, ProtoTree, SchemaNode};
pub use session::{parse_file, Session};
pub use walker::ParseMode;

/// Version of the xsdgen library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
