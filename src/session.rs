//! Parse sessions
//!
//! A [`Session`] owns everything that outlives a single file: the
//! configuration, the parsed-file cache, the hook and the emitter. Each file
//! gets a fresh walker; only the cache is shared, which is what keeps a
//! schema imported from several places from being parsed and emitted twice.

use crate::config::ParserConfig;
use crate::emit::{EmitUnit, Emitter, NullEmitter};
use crate::error::Result;
use crate::hooks::{Hook, NoopHook};
use crate::loaders;
use crate::proto::ProtoTree;
use crate::walker::{ParseMode, Walker};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

enum CacheEntry {
    /// Being walked further up the call stack (import cycle)
    InProgress,
    Parsed(ProtoTree),
}

/// Parser entry point and cross-file cache
pub struct Session {
    config: ParserConfig,
    parsed: HashMap<PathBuf, CacheEntry>,
    /// Trees of extract-mode parses, kept apart from full parses
    extracted: HashMap<PathBuf, ProtoTree>,
    hook: Box<dyn Hook>,
    emitter: Box<dyn Emitter>,
}

impl Session {
    /// Create a session with no hook and no emitter
    pub fn new(config: ParserConfig) -> Self {
        Self {
            config,
            parsed: HashMap::new(),
            extracted: HashMap::new(),
            hook: Box::new(NoopHook),
            emitter: Box::new(NullEmitter),
        }
    }

    /// Set the hook
    pub fn with_hook(mut self, hook: impl Hook + 'static) -> Self {
        self.hook = Box::new(hook);
        self
    }

    /// Set the emitter
    pub fn with_emitter(mut self, emitter: impl Emitter + 'static) -> Self {
        self.emitter = Box::new(emitter);
        self
    }

    /// Configuration of this session
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub(crate) fn hook_mut(&mut self) -> &mut dyn Hook {
        self.hook.as_mut()
    }

    /// Parse a schema file, resolving references into the files it imports
    /// and emitting every fully parsed file. A file already parsed in this
    /// session is returned from the cache without being emitted again.
    pub fn parse_file(&mut self, path: impl AsRef<Path>) -> Result<ProtoTree> {
        let path = path.as_ref();
        loaders::ensure_schema_file(path)?;
        let key = loaders::canonical_path(path)?;
        if let Some(CacheEntry::Parsed(tree)) = self.parsed.get(&key) {
            debug!(file = %path.display(), "already parsed");
            return Ok(tree.clone());
        }
        let source = loaders::load_schema(path, &self.config.limits)?;
        self.parse_source(path, key, &source, 0)
    }

    /// Parse schema text as if it were the file at `path`. Relative
    /// `schemaLocation`s resolve against the directory of `path`.
    pub fn parse_str(&mut self, source: &str, path: impl AsRef<Path>) -> Result<ProtoTree> {
        let path = path.as_ref();
        self.config.limits.check_file_size(source.len())?;
        self.parse_source(path, path.to_path_buf(), source.as_bytes(), 0)
    }

    /// Harvest the type information of a schema file without touching any
    /// other file and without emitting
    pub fn extract_file(&mut self, path: impl AsRef<Path>) -> Result<ProtoTree> {
        let path = path.as_ref();
        let key = self.ensure_extracted(path)?;
        Ok(self.extracted.get(&key).cloned().unwrap_or_default())
    }

    /// Prototype tree of a fully parsed file, if it is in the cache
    pub fn cached(&self, path: impl AsRef<Path>) -> Option<&ProtoTree> {
        let path = path.as_ref();
        let key = loaders::canonical_path(path).unwrap_or_else(|_| path.to_path_buf());
        match self.parsed.get(&key) {
            Some(CacheEntry::Parsed(tree)) => Some(tree),
            _ => None,
        }
    }

    /// Paths of all fully parsed files
    pub fn parsed_files(&self) -> impl Iterator<Item = &Path> {
        self.parsed.iter().filter_map(|(path, entry)| match entry {
            CacheEntry::Parsed(_) => Some(path.as_path()),
            CacheEntry::InProgress => None,
        })
    }

    /// Whether a node of this name exists in any tree this session has built
    pub(crate) fn knows_name(&self, name: &str) -> bool {
        self.parsed.values().any(|entry| match entry {
            CacheEntry::Parsed(tree) => tree.contains_name(name),
            CacheEntry::InProgress => false,
        }) || self.extracted.values().any(|tree| tree.contains_name(name))
    }

    /// Fully parse a dependency (once per session) and look `name` up in it.
    /// A dependency still being walked, because of an import cycle, yields
    /// nothing here.
    pub(crate) fn dependency_lookup(
        &mut self,
        path: &Path,
        name: &str,
        import_depth: usize,
    ) -> Result<Option<String>> {
        let key = loaders::canonical_path(path)?;
        if !self.parsed.contains_key(&key) {
            let source = loaders::load_schema(path, &self.config.limits)?;
            self.parse_source(path, key.clone(), &source, import_depth)?;
        } else {
            debug!(file = %path.display(), "dependency cache hit");
        }
        Ok(match self.parsed.get(&key) {
            Some(CacheEntry::Parsed(tree)) => tree.resolve_name(name),
            _ => None,
        })
    }

    /// Extract-parse a file (once per session) and look `name` up in it
    pub(crate) fn extract_lookup(&mut self, path: &Path, name: &str) -> Result<Option<String>> {
        let key = self.ensure_extracted(path)?;
        Ok(self
            .extracted
            .get(&key)
            .and_then(|tree| tree.resolve_name(name)))
    }

    fn ensure_extracted(&mut self, path: &Path) -> Result<PathBuf> {
        let key = loaders::canonical_path(path)?;
        if self.extracted.contains_key(&key) {
            trace!(file = %path.display(), "extract cache hit");
            return Ok(key);
        }
        let source = loaders::load_schema(path, &self.config.limits)?;
        let tree = Walker::new(self, path, ParseMode::Extract, 0).run(&source)?;
        self.extracted.insert(key.clone(), tree);
        Ok(key)
    }

    fn parse_source(
        &mut self,
        path: &Path,
        key: PathBuf,
        source: &[u8],
        import_depth: usize,
    ) -> Result<ProtoTree> {
        self.config.limits.check_import_depth(import_depth)?;
        self.parsed.insert(key.clone(), CacheEntry::InProgress);

        let tree = match Walker::new(self, path, ParseMode::Full, import_depth).run(source) {
            Ok(tree) => tree,
            Err(e) => {
                self.parsed.remove(&key);
                return Err(e);
            }
        };
        self.parsed.insert(key, CacheEntry::Parsed(tree.clone()));
        self.emit(path, &tree)?;
        Ok(tree)
    }

    fn emit(&mut self, path: &Path, tree: &ProtoTree) -> Result<()> {
        let unit = EmitUnit {
            source: path,
            lang: self.config.lang,
            package: &self.config.package,
            output: self.config.output_path_for(path),
            tree,
        };
        self.emitter.emit(&unit, self.hook.as_mut())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(ParserConfig::default())
    }
}

/// Parse one schema file with a fresh session
pub fn parse_file(path: impl AsRef<Path>, config: ParserConfig) -> Result<ProtoTree> {
    Session::new(config).parse_file(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::fs;
    use tempfile::TempDir;

    const SCHEMA: &str = r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
  <xs:simpleType name="Code"><xs:restriction base="xs:string"/></xs:simpleType>
</xs:schema>"#;

    #[test]
    fn test_parse_file_caches() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.xsd");
        fs::write(&path, SCHEMA).unwrap();

        let mut session = Session::default();
        let first = session.parse_file(&path).unwrap();
        assert_eq!(first.len(), 1);
        assert!(session.cached(&path).is_some());
        assert_eq!(session.parsed_files().count(), 1);

        let second = session.parse_file(&path).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_directory_input_is_rejected() {
        let dir = TempDir::new().unwrap();
        let err = Session::default().parse_file(dir.path()).unwrap_err();
        assert!(matches!(err, Error::NotAFile(_)));
    }

    #[test]
    fn test_failed_parse_is_not_cached() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.xsd");
        fs::write(&path, "<xs:schema><xs:element></xs:schema>").unwrap();

        let mut session = Session::default();
        assert!(session.parse_file(&path).is_err());
        assert!(session.cached(&path).is_none());
        assert_eq!(session.parsed_files().count(), 0);
    }

    #[test]
    fn test_extract_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.xsd");
        fs::write(&path, SCHEMA).unwrap();

        let mut session = Session::default();
        let tree = session.extract_file(&path).unwrap();
        assert!(tree.contains_name("Code"));
        // extraction is not a full parse
        assert!(session.cached(&path).is_none());
        assert!(session.knows_name("Code"));
    }

    #[test]
    fn test_extraction_is_cached_by_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.xsd");
        fs::write(&path, SCHEMA).unwrap();

        let mut session = Session::default();
        assert_eq!(
            session.extract_lookup(&path, "Code").unwrap().as_deref(),
            Some("string")
        );

        // later lookups are served from the cache without touching the file
        fs::write(&path, "not xml at all <").unwrap();
        assert_eq!(
            session.extract_lookup(&path, "Code").unwrap().as_deref(),
            Some("string")
        );
        fs::remove_file(&path).unwrap();
        assert!(session.extract_lookup(&path, "Code").is_err());
    }

    #[test]
    fn test_missing_dependency_is_io_error() {
        let mut session = Session::default();
        let err = session
            .dependency_lookup(Path::new("/no/such/dir/x.xsd"), "X", 1)
            .unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_import_depth_limit() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.xsd");
        fs::write(&path, SCHEMA).unwrap();

        let config = ParserConfig::new().with_limits(crate::limits::Limits {
            max_import_depth: 0,
            ..Default::default()
        });
        let mut session = Session::new(config);
        let err = session.dependency_lookup(&path, "Code", 1).unwrap_err();
        assert!(matches!(err, Error::LimitExceeded(_)));
        assert!(session.cached(&path).is_none());
    }
}
