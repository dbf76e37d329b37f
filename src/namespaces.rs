//! XML namespace handling
//!
//! Maps the prefixes declared on the `schema` root to namespace URIs, and
//! namespace URIs to the schema files registered by `import`/`include`, so
//! that a reference such as `b:CommonId` can be traced to the file that
//! defines it.

use crate::locations::Location;
use crate::names;
use indexmap::{IndexMap, IndexSet};
use std::collections::HashMap;

/// XML Namespace URI
pub type NamespaceUri = String;

/// Namespace prefix
pub type Prefix = String;

/// Per-file namespace and schema-location registry
#[derive(Debug, Clone, Default)]
pub struct NamespaceResolver {
    /// Mapping from prefix to namespace URI
    prefixes: HashMap<Prefix, NamespaceUri>,
    /// Mapping from namespace URI to schema location, in registration order
    locations: IndexMap<NamespaceUri, String>,
    /// Schema locations registered through `include`/`redefine`
    includes: IndexSet<String>,
}

impl NamespaceResolver {
    /// Create a new empty resolver
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a `xmlns:prefix="uri"` declaration. Later declarations of the
    /// same prefix replace earlier ones.
    pub fn declare_prefix(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) {
        self.prefixes.insert(prefix.into(), namespace.into());
    }

    /// Record the schema location of an `import`. The first registration of
    /// a namespace wins; remote locations are skipped.
    pub fn register_import(&mut self, namespace: Option<&str>, location: &str) {
        let namespace = namespace.unwrap_or("");
        if self.locations.contains_key(namespace) {
            return;
        }
        if Location::parse(location).is_remote() {
            tracing::warn!(namespace, location, "skipping remote schema location");
            return;
        }
        self.locations
            .insert(namespace.to_string(), location.to_string());
    }

    /// Record the schema location of an `include` (or `redefine`).
    /// Duplicates and remote locations are ignored.
    pub fn register_include(&mut self, location: &str) {
        if Location::parse(location).is_remote() {
            tracing::warn!(location, "skipping remote include");
            return;
        }
        self.includes.insert(location.to_string());
    }

    /// Get the namespace for a prefix
    pub fn namespace_for_prefix(&self, prefix: &str) -> Option<&str> {
        self.prefixes.get(prefix).map(|s| s.as_str())
    }

    /// Namespace URI of a qualified reference, by its prefix
    pub fn resolve_namespace_prefix(&self, qname: &str) -> Option<&str> {
        self.namespace_for_prefix(names::prefix(qname))
    }

    /// Schema location registered for a namespace URI
    pub fn resolve_schema_location(&self, namespace: &str) -> Option<&str> {
        self.locations.get(namespace).map(|s| s.as_str())
    }

    /// Schema location for the namespace a qualified reference lives in.
    /// Unknown prefixes and unregistered namespaces yield the empty location,
    /// which callers treat as the declaring file's own directory.
    pub fn schema_location_for(&self, qname: &str) -> &str {
        let namespace = self.resolve_namespace_prefix(qname).unwrap_or("");
        self.resolve_schema_location(namespace).unwrap_or("")
    }

    /// Included schema locations, in document order
    pub fn includes(&self) -> impl Iterator<Item = &str> {
        self.includes.iter().map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> NamespaceResolver {
        let mut ns = NamespaceResolver::new();
        ns.declare_prefix("xs", "http://www.w3.org/2001/XMLSchema");
        ns.declare_prefix("b", "urn:example:b");
        ns
    }

    #[test]
    fn test_resolve_namespace_prefix() {
        let ns = resolver();
        assert_eq!(ns.resolve_namespace_prefix("b:CommonId"), Some("urn:example:b"));
        assert_eq!(
            ns.resolve_namespace_prefix("xs:string"),
            Some("http://www.w3.org/2001/XMLSchema")
        );
        assert_eq!(ns.resolve_namespace_prefix("c:Other"), None);
    }

    #[test]
    fn test_first_import_wins() {
        let mut ns = resolver();
        ns.register_import(Some("urn:example:b"), "b.xsd");
        ns.register_import(Some("urn:example:b"), "other/b.xsd");
        assert_eq!(ns.resolve_schema_location("urn:example:b"), Some("b.xsd"));
        assert_eq!(ns.schema_location_for("b:CommonId"), "b.xsd");
    }

    #[test]
    fn test_remote_import_is_skipped() {
        let mut ns = resolver();
        ns.register_import(Some("urn:example:b"), "http://example.com/b.xsd");
        assert_eq!(ns.resolve_schema_location("urn:example:b"), None);
        ns.register_import(Some("urn:example:b"), "b.xsd");
        assert_eq!(ns.resolve_schema_location("urn:example:b"), Some("b.xsd"));
    }

    #[test]
    fn test_unknown_namespace_has_empty_location() {
        let ns = resolver();
        assert_eq!(ns.schema_location_for("Local"), "");
        assert_eq!(ns.schema_location_for("zz:Local"), "");
    }

    #[test]
    fn test_includes_keep_order_and_dedupe() {
        let mut ns = resolver();
        ns.register_include("b.xsd");
        ns.register_include("a.xsd");
        ns.register_include("b.xsd");
        ns.register_include("https://example.com/c.xsd");
        let includes: Vec<&str> = ns.includes().collect();
        assert_eq!(includes, vec!["b.xsd", "a.xsd"]);
    }
}
