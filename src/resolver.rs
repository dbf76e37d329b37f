//! Type resolution
//!
//! Turns a raw type reference such as `xs:string` or `b:CommonId` into the
//! name emitters should use. First match wins:
//!
//! 1. an XSD builtin, mapped to the target language; builtins can never be
//!    shadowed by a schema-defined type of the same name
//! 2. a plain simple type, attribute or element already in the file's own
//!    prototype tree
//! 3. in extract mode, the unprefixed name (extract mode does no file I/O)
//! 4. if the reference's namespace maps to a directory (the usual case for
//!    unprefixed names), every `include`d file, extract-parsed
//! 5. otherwise the imported file: fully parsed once per session, then
//!    extract-parsed if the full parse does not expose the name
//!
//! A reference nothing resolves falls back to its own unprefixed name.
//! File-system errors on the way are fatal.

use crate::builtins::builtin_type;
use crate::error::{Error, Result};
use crate::locations::Location;
use crate::names;
use crate::namespaces::NamespaceResolver;
use crate::proto::ProtoTree;
use crate::session::Session;
use crate::walker::ParseMode;
use std::fs;
use std::path::Path;

/// Outcome of resolving one type reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Target-language builtin
    Builtin(&'static str),
    /// Found in the referencing file's own tree
    Local(String),
    /// Found in another schema file
    External(String),
    /// Not found anywhere; carries the unprefixed name
    Unresolved(String),
}

impl Resolution {
    /// Resolved type name
    pub fn name(&self) -> &str {
        match self {
            Resolution::Builtin(name) => name,
            Resolution::Local(name) | Resolution::External(name) | Resolution::Unresolved(name) => {
                name
            }
        }
    }

    /// Take the resolved type name
    pub fn into_name(self) -> String {
        match self {
            Resolution::Builtin(name) => name.to_string(),
            Resolution::Local(name) | Resolution::External(name) | Resolution::Unresolved(name) => {
                name
            }
        }
    }

    /// Whether the reference was found somewhere
    pub fn is_resolved(&self) -> bool {
        !matches!(self, Resolution::Unresolved(_))
    }
}

/// What the referencing file knows at the point of the reference
pub(crate) struct Scope<'a> {
    /// Directory of the referencing file
    pub dir: &'a Path,
    pub namespaces: &'a NamespaceResolver,
    /// Nodes finalized so far
    pub tree: &'a ProtoTree,
    pub mode: ParseMode,
    /// Cross-file recursion depth of the referencing file
    pub import_depth: usize,
}

pub(crate) fn resolve_type(session: &mut Session, scope: &Scope<'_>, raw: &str) -> Result<Resolution> {
    if let Some(builtin) = builtin_type(raw, session.config().lang) {
        return Ok(Resolution::Builtin(builtin));
    }

    let local = names::local_name(raw);
    if let Some(found) = scope.tree.resolve_name(local) {
        return Ok(Resolution::Local(found));
    }

    if scope.mode == ParseMode::Extract {
        return Ok(Resolution::Unresolved(local.to_string()));
    }

    let location = scope.namespaces.schema_location_for(raw);
    let Some(target) = Location::parse(location).resolve(scope.dir) else {
        // remote schemas are never fetched
        return Ok(Resolution::Unresolved(local.to_string()));
    };
    let metadata = fs::metadata(&target).map_err(|e| Error::io(&target, e))?;

    if metadata.is_dir() {
        search_includes(session, scope, local)
    } else {
        search_file(session, scope, &target, local)
    }
}

fn search_includes(session: &mut Session, scope: &Scope<'_>, local: &str) -> Result<Resolution> {
    for include in scope.namespaces.includes() {
        let path = scope.dir.join(include);
        if let Some(found) = session.extract_lookup(&path, local)? {
            return Ok(Resolution::External(found));
        }
    }
    Ok(Resolution::Unresolved(local.to_string()))
}

fn search_file(
    session: &mut Session,
    scope: &Scope<'_>,
    path: &Path,
    local: &str,
) -> Result<Resolution> {
    if let Some(found) = session.dependency_lookup(path, local, scope.import_depth + 1)? {
        return Ok(Resolution::External(found));
    }
    if let Some(found) = session.extract_lookup(path, local)? {
        return Ok(Resolution::External(found));
    }
    Ok(Resolution::Unresolved(local.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::Language;
    use crate::config::ParserConfig;
    use crate::proto::{SchemaNode, SimpleType};
    use std::fs;
    use tempfile::TempDir;

    fn session(lang: Language) -> Session {
        Session::new(ParserConfig::new().with_lang(lang))
    }

    fn scope<'a>(
        dir: &'a Path,
        namespaces: &'a NamespaceResolver,
        tree: &'a ProtoTree,
        mode: ParseMode,
    ) -> Scope<'a> {
        Scope {
            dir,
            namespaces,
            tree,
            mode,
            import_depth: 0,
        }
    }

    #[test]
    fn test_builtin_wins_over_local_definition() {
        let dir = TempDir::new().unwrap();
        let mut tree = ProtoTree::new();
        tree.push(SchemaNode::SimpleType(SimpleType {
            name: "string".into(),
            base: "MyString".into(),
            ..Default::default()
        }));
        let ns = NamespaceResolver::new();
        let mut session = session(Language::Rust);
        let scope = scope(dir.path(), &ns, &tree, ParseMode::Full);

        let resolution = resolve_type(&mut session, &scope, "xs:string").unwrap();
        assert_eq!(resolution, Resolution::Builtin("String"));
    }

    #[test]
    fn test_local_lookup() {
        let dir = TempDir::new().unwrap();
        let mut tree = ProtoTree::new();
        tree.push(SchemaNode::SimpleType(SimpleType {
            name: "Code".into(),
            base: "string".into(),
            ..Default::default()
        }));
        let ns = NamespaceResolver::new();
        let mut session = session(Language::Go);
        let scope = scope(dir.path(), &ns, &tree, ParseMode::Full);

        let resolution = resolve_type(&mut session, &scope, "tns:Code").unwrap();
        assert_eq!(resolution, Resolution::Local("string".into()));
    }

    #[test]
    fn test_extract_mode_never_touches_files() {
        let tree = ProtoTree::new();
        let mut ns = NamespaceResolver::new();
        ns.declare_prefix("b", "urn:b");
        ns.register_import(Some("urn:b"), "missing.xsd");
        let mut session = session(Language::Go);
        let scope = scope(Path::new("/nonexistent"), &ns, &tree, ParseMode::Extract);

        let resolution = resolve_type(&mut session, &scope, "b:Thing").unwrap();
        assert_eq!(resolution, Resolution::Unresolved("Thing".into()));
        assert!(!resolution.is_resolved());
    }

    #[test]
    fn test_missing_import_is_fatal() {
        let dir = TempDir::new().unwrap();
        let tree = ProtoTree::new();
        let mut ns = NamespaceResolver::new();
        ns.declare_prefix("b", "urn:b");
        ns.register_import(Some("urn:b"), "missing.xsd");
        let mut session = session(Language::Go);
        let scope = scope(dir.path(), &ns, &tree, ParseMode::Full);

        let err = resolve_type(&mut session, &scope, "b:Thing").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_unprefixed_reference_searches_includes() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("common.xsd"),
            r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
                 <xs:simpleType name="Code">
                   <xs:restriction base="xs:int"/>
                 </xs:simpleType>
               </xs:schema>"#,
        )
        .unwrap();
        let tree = ProtoTree::new();
        let mut ns = NamespaceResolver::new();
        ns.register_include("common.xsd");
        let mut session = session(Language::Java);
        let scope = scope(dir.path(), &ns, &tree, ParseMode::Full);

        let resolution = resolve_type(&mut session, &scope, "Code").unwrap();
        assert_eq!(resolution, Resolution::External("Integer".into()));

        let resolution = resolve_type(&mut session, &scope, "Other").unwrap();
        assert_eq!(resolution, Resolution::Unresolved("Other".into()));
    }

    #[test]
    fn test_remote_namespace_falls_back() {
        let dir = TempDir::new().unwrap();
        let tree = ProtoTree::new();
        let mut ns = NamespaceResolver::new();
        ns.declare_prefix("w", "urn:w");
        // remote imports are never registered, so the namespace has no
        // location and the lookup lands on the includes of `dir`
        ns.register_import(Some("urn:w"), "https://example.com/w.xsd");
        let mut session = session(Language::Go);
        let scope = scope(dir.path(), &ns, &tree, ParseMode::Full);

        let resolution = resolve_type(&mut session, &scope, "w:Remote").unwrap();
        assert_eq!(resolution.name(), "Remote");
    }
}
