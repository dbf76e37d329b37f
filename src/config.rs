//! Parser configuration
//!
//! A [`ParserConfig`] is shared by every file parsed in one session: the
//! target language drives builtin type mapping, the strictness decides what
//! happens to unresolvable references, and the directories decide where
//! emitted output lands.

use crate::builtins::Language;
use crate::limits::Limits;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// What to do with a type reference that cannot be resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Strictness {
    /// Fall back to the reference's unprefixed name and log a warning
    #[default]
    Lenient,
    /// Fail the file unless the name turns up later in a known prototype tree
    Strict,
}

/// Configuration of a parse session
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Target language for builtin type mapping
    pub lang: Language,
    /// Unresolved reference policy
    pub strictness: Strictness,
    /// Resource limits
    pub limits: Limits,
    /// Root the input paths are relative to, for output layout
    pub input_dir: Option<PathBuf>,
    /// Directory emitted files are written under
    pub output_dir: Option<PathBuf>,
    /// Package / module name handed to emitters
    pub package: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            lang: Language::default(),
            strictness: Strictness::default(),
            limits: Limits::default(),
            input_dir: None,
            output_dir: None,
            package: "schema".to_string(),
        }
    }
}

impl ParserConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target language
    pub fn with_lang(mut self, lang: Language) -> Self {
        self.lang = lang;
        self
    }

    /// Set the unresolved reference policy
    pub fn with_strictness(mut self, strictness: Strictness) -> Self {
        self.strictness = strictness;
        self
    }

    /// Set the limits
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Set the input root
    pub fn with_input_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.input_dir = Some(dir.into());
        self
    }

    /// Set the output directory
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Set the package name
    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = package.into();
        self
    }

    /// Whether unresolved type references are errors
    pub fn is_strict(&self) -> bool {
        self.strictness == Strictness::Strict
    }

    /// Output path for a schema file: the file's path relative to the input
    /// root, re-rooted under the output directory. `None` when no output
    /// directory is configured.
    pub fn output_path_for(&self, source: &Path) -> Option<PathBuf> {
        let output_dir = self.output_dir.as_ref()?;
        let relative = self
            .input_dir
            .as_deref()
            .and_then(|root| source.strip_prefix(root).ok())
            .filter(|rel| !rel.as_os_str().is_empty())
            .or_else(|| source.file_name().map(Path::new))?;
        Some(output_dir.join(relative))
    }
}
