//! Extension points around parsing and emission
//!
//! A [`Hook`] sees every parse event before the walker handles it and every
//! node before and after an emitter renders it. Each method can let default
//! processing continue, veto it, or fail the whole file with an error.
//! All methods default to doing nothing.

use crate::emit::EmitUnit;
use crate::error::Result;
use crate::proto::{ProtoTree, SchemaNode};
use crate::reader::{EndTag, StartTag};
use crate::walker::ParseMode;
use std::path::Path;

/// Whether default processing should go ahead
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flow {
    /// Carry on with default handling
    #[default]
    Continue,
    /// Skip default handling of this event
    Skip,
}

/// Read-only view of the walker at the point of a parse event
#[derive(Debug, Clone, Copy)]
pub struct ParseContext<'a> {
    /// File being walked
    pub file: &'a Path,
    /// Full parse or type extraction
    pub mode: ParseMode,
    /// Nesting depth of the element the event belongs to
    pub depth: usize,
    /// Nodes finalized so far
    pub tree: &'a ProtoTree,
}

/// Callbacks around parsing and emission.
///
/// Vetoing a start tag skips the default start and end handling of that
/// element. Its children are still walked, but anything that would attach
/// to the vetoed element (an inline type, facets) is dropped. Vetoing an end
/// tag drops the construct being built.
pub trait Hook {
    /// Before an XSD element's start tag is handled
    fn on_start_element(&mut self, _tag: &StartTag, _ctx: &ParseContext<'_>) -> Result<Flow> {
        Ok(Flow::Continue)
    }

    /// Before an end tag is handled
    fn on_end_element(&mut self, _tag: &EndTag, _ctx: &ParseContext<'_>) -> Result<Flow> {
        Ok(Flow::Continue)
    }

    /// Before character data is taken as documentation
    fn on_char_data(&mut self, _text: &str, _ctx: &ParseContext<'_>) -> Result<Flow> {
        Ok(Flow::Continue)
    }

    /// Before a node is rendered; `Skip` leaves it out of the output
    fn on_generate(&mut self, _node: &SchemaNode, _unit: &EmitUnit<'_>) -> Result<Flow> {
        Ok(Flow::Continue)
    }

    /// After a node is rendered; the text may be rewritten in place
    fn on_generated(&mut self, _node: &SchemaNode, _text: &mut String) -> Result<()> {
        Ok(())
    }
}

/// Hook that changes nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHook;

impl Hook for NoopHook {}
