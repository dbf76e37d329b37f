//! Hand-off to code emitters
//!
//! The session calls an [`Emitter`] once for every fully parsed file,
//! dependencies included. Language-specific generators live outside this
//! crate; [`JsonEmitter`] renders the prototype tree itself.

use crate::builtins::Language;
use crate::error::{Error, Result};
use crate::hooks::{Flow, Hook};
use crate::proto::ProtoTree;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Everything an emitter gets for one schema file
#[derive(Debug, Clone)]
pub struct EmitUnit<'a> {
    /// Schema file the tree came from
    pub source: &'a Path,
    /// Target language the type names were mapped to
    pub lang: Language,
    /// Package or namespace name for the generated code
    pub package: &'a str,
    /// Output path without extension, if an output directory is configured
    pub output: Option<PathBuf>,
    /// Finished prototype tree of `source`
    pub tree: &'a ProtoTree,
}

/// Consumer of finished prototype trees
pub trait Emitter {
    /// Consume the tree of one fully parsed file. Called once per file and
    /// session.
    fn emit(&mut self, unit: &EmitUnit<'_>, hook: &mut dyn Hook) -> Result<()>;
}

/// Emitter that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEmitter;

impl Emitter for NullEmitter {
    fn emit(&mut self, _unit: &EmitUnit<'_>, _hook: &mut dyn Hook) -> Result<()> {
        Ok(())
    }
}

/// Writes each prototype tree to `<output>.json`, one block per node.
///
/// The first node of each name wins. The file is written in one go once
/// every block is rendered, so a failing hook leaves nothing behind.
#[derive(Debug, Clone, Default)]
pub struct JsonEmitter;

impl JsonEmitter {
    /// Create a JSON emitter
    pub fn new() -> Self {
        Self
    }

    /// Render a unit to JSON text, running the generation hooks
    pub fn render(unit: &EmitUnit<'_>, hook: &mut dyn Hook) -> Result<String> {
        let mut seen = HashSet::new();
        let mut blocks = Vec::new();
        for node in unit.tree {
            if !seen.insert(node.name()) {
                continue;
            }
            if hook.on_generate(node, unit)? == Flow::Skip {
                continue;
            }
            let mut text = serde_json::to_string_pretty(node)?;
            hook.on_generated(node, &mut text)?;
            blocks.push(text);
        }
        if blocks.is_empty() {
            return Ok("[]\n".to_string());
        }
        Ok(format!("[\n{}\n]\n", blocks.join(",\n")))
    }
}

impl Emitter for JsonEmitter {
    fn emit(&mut self, unit: &EmitUnit<'_>, hook: &mut dyn Hook) -> Result<()> {
        let text = Self::render(unit, hook)?;
        let Some(output) = &unit.output else {
            tracing::debug!(source = %unit.source.display(), "no output directory, nothing written");
            return Ok(());
        };

        let mut path = output.clone().into_os_string();
        path.push(".json");
        let path = PathBuf::from(path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        fs::write(&path, text).map_err(|e| Error::io(&path, e))?;
        tracing::debug!(path = %path.display(), nodes = unit.tree.len(), "wrote JSON");
        Ok(())
    }
}
