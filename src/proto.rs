//! Prototype tree: the intermediate representation of a parsed schema
//!
//! Parsing one schema file yields a [`ProtoTree`], an ordered list of
//! [`SchemaNode`]s in discovery order. Code emitters consume it; they look
//! nodes up by name, but the order is kept so re-emission is stable.
//!
//! Node shapes follow the XSD components they come from:
//! <https://www.w3.org/TR/xmlschema-1/#Simple_Type_Definitions> and friends.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Facets of a simple type restriction.
///
/// Only `enum_values` materially affects emission today; the other facets
/// are carried for emitters that want them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restriction {
    /// Allowed literal values, in document order
    #[serde(rename = "enum")]
    pub enum_values: Vec<String>,
    /// `pattern` facet, as written
    pub pattern: Option<String>,
    /// `minLength` (or `length`)
    pub min_length: Option<usize>,
    /// `maxLength` (or `length`)
    pub max_length: Option<usize>,
    /// `minInclusive` / `minExclusive`
    pub min: Option<f64>,
    /// `maxInclusive` / `maxExclusive`
    pub max: Option<f64>,
    /// `fractionDigits`
    pub precision: Option<u32>,
    /// `totalDigits`
    pub total_digits: Option<u32>,
}

/// `xs:simpleType`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleType {
    /// Text of the first `xs:documentation`
    pub doc: String,
    /// Declared name, or the owner's name when inline
    pub name: String,
    /// Resolved restriction base or list item type; empty for unions
    pub base: String,
    /// Declared inline rather than by name
    pub anonymous: bool,
    /// This is an `xs:list`
    pub list: bool,
    /// This is an `xs:union`
    pub union: bool,
    /// Unprefixed member type name -> resolved type, used when `union`
    pub member_types: IndexMap<String, String>,
    /// Facets of the restriction
    pub restriction: Restriction,
}

/// `xs:element`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    /// Documentation text
    pub doc: String,
    /// Declared name, or the unprefixed `ref`
    pub name: String,
    /// Declared via `xs:any`
    pub wildcard: bool,
    /// Resolved type
    #[serde(rename = "type")]
    pub type_name: String,
    /// `abstract="true"`
    #[serde(rename = "abstract")]
    pub is_abstract: bool,
    /// Repeated: `maxOccurs` above one, or inside a plural sequence/choice
    pub plural: bool,
    /// `minOccurs="0"`
    pub optional: bool,
    /// `nillable="true"`
    pub nillable: bool,
    /// `default` or `fixed` value
    pub default: Option<String>,
}

/// `xs:attribute`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    /// Declared name, or the unprefixed `ref`
    pub name: String,
    /// Documentation text
    pub doc: String,
    /// Resolved type
    #[serde(rename = "type")]
    pub type_name: String,
    /// Typed by an inline `xs:list`
    pub plural: bool,
    /// `default` or `fixed` value
    pub default: Option<String>,
    /// False only for `use="required"`
    pub optional: bool,
}

/// `xs:complexType`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexType {
    /// Documentation text, or that of the owning element when inline
    pub doc: String,
    /// Declared name, or the owning element's name when inline
    pub name: String,
    /// Resolved parent type from `xs:extension` (or simple content base)
    pub base: Option<String>,
    /// Declared inline in an element
    pub anonymous: bool,
    /// Child elements in document order, merged by name and type
    pub elements: Vec<Element>,
    /// Attributes in document order
    pub attributes: Vec<Attribute>,
    /// Referenced model groups
    pub groups: Vec<Group>,
    /// Referenced attribute groups
    pub attribute_groups: Vec<AttributeGroup>,
    /// `mixed="true"`
    pub mixed: bool,
}

/// `xs:group`, either a definition or a reference
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    /// Documentation text
    pub doc: String,
    /// Declared name, or the unprefixed `ref`
    pub name: String,
    /// Elements of the group's content model
    pub elements: Vec<Element>,
    /// Nested group references
    pub groups: Vec<Group>,
    /// Repeated where referenced
    pub plural: bool,
    /// Resolved target when this is a `ref`
    #[serde(rename = "ref")]
    pub reference: Option<String>,
}

/// `xs:attributeGroup`, either a definition or a reference
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeGroup {
    /// Documentation text
    pub doc: String,
    /// Declared name, or the unprefixed `ref`
    pub name: String,
    /// Resolved target when this is a `ref`
    #[serde(rename = "ref")]
    pub reference: Option<String>,
    /// Attributes of the definition
    pub attributes: Vec<Attribute>,
    /// Attribute groups referenced from within this definition
    pub attribute_groups: Vec<AttributeGroup>,
}

/// Discriminant of a [`SchemaNode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// [`SimpleType`]
    SimpleType,
    /// [`ComplexType`]
    ComplexType,
    /// [`Element`]
    Element,
    /// [`Attribute`]
    Attribute,
    /// [`Group`]
    Group,
    /// [`AttributeGroup`]
    AttributeGroup,
}

/// One finalized schema construct
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum SchemaNode {
    /// Named or anonymous simple type
    SimpleType(SimpleType),
    /// Named complex type, or one inlined in a top-level element
    ComplexType(ComplexType),
    /// Top-level element
    Element(Element),
    /// Top-level attribute
    Attribute(Attribute),
    /// Model group definition
    Group(Group),
    /// Attribute group definition
    AttributeGroup(AttributeGroup),
}

impl SchemaNode {
    /// Name of the node
    pub fn name(&self) -> &str {
        match self {
            SchemaNode::SimpleType(v) => &v.name,
            SchemaNode::ComplexType(v) => &v.name,
            SchemaNode::Element(v) => &v.name,
            SchemaNode::Attribute(v) => &v.name,
            SchemaNode::Group(v) => &v.name,
            SchemaNode::AttributeGroup(v) => &v.name,
        }
    }

    /// Documentation text, empty when absent
    pub fn doc(&self) -> &str {
        match self {
            SchemaNode::SimpleType(v) => &v.doc,
            SchemaNode::ComplexType(v) => &v.doc,
            SchemaNode::Element(v) => &v.doc,
            SchemaNode::Attribute(v) => &v.doc,
            SchemaNode::Group(v) => &v.doc,
            SchemaNode::AttributeGroup(v) => &v.doc,
        }
    }

    /// Kind of construct
    pub fn kind(&self) -> NodeKind {
        match self {
            SchemaNode::SimpleType(_) => NodeKind::SimpleType,
            SchemaNode::ComplexType(_) => NodeKind::ComplexType,
            SchemaNode::Element(_) => NodeKind::Element,
            SchemaNode::Attribute(_) => NodeKind::Attribute,
            SchemaNode::Group(_) => NodeKind::Group,
            SchemaNode::AttributeGroup(_) => NodeKind::AttributeGroup,
        }
    }

    /// The type this node stands for when another construct references it
    /// by name: a plain simple type's base, or an element's or attribute's
    /// type. Lists, unions and container nodes have none.
    pub fn referenced_type(&self) -> Option<&str> {
        match self {
            SchemaNode::SimpleType(v) if !v.list && !v.union => Some(&v.base),
            SchemaNode::Attribute(v) => Some(&v.type_name),
            SchemaNode::Element(v) => Some(&v.type_name),
            _ => None,
        }
    }
}

/// Ordered sequence of finalized nodes from one schema file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProtoTree {
    nodes: Vec<SchemaNode>,
}

impl ProtoTree {
    /// Create an empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a finalized node
    pub fn push(&mut self, node: SchemaNode) {
        self.nodes.push(node);
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in document order
    pub fn iter(&self) -> std::slice::Iter<'_, SchemaNode> {
        self.nodes.iter()
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut SchemaNode> {
        self.nodes.get_mut(index)
    }

    /// First node with the given name
    pub fn find(&self, name: &str) -> Option<&SchemaNode> {
        self.nodes.iter().find(|node| node.name() == name)
    }

    /// Whether any node carries the given name
    pub fn contains_name(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Type a by-name reference to `name` stands for, from the first plain
    /// simple type, attribute or element with that name.
    pub fn referenced_type(&self, name: &str) -> Option<&str> {
        self.nodes
            .iter()
            .filter(|node| node.name() == name)
            .find_map(SchemaNode::referenced_type)
    }

    /// Like [`ProtoTree::referenced_type`], but only when the lookup
    /// actually leads somewhere other than the name itself.
    pub fn resolve_name(&self, name: &str) -> Option<String> {
        self.referenced_type(name)
            .filter(|resolved| !resolved.is_empty() && *resolved != name)
            .map(str::to_string)
    }

    /// Borrow the nodes as a slice
    pub fn nodes(&self) -> &[SchemaNode] {
        &self.nodes
    }
}

impl<'a> IntoIterator for &'a ProtoTree {
    type Item = &'a SchemaNode;
    type IntoIter = std::slice::Iter<'a, SchemaNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> ProtoTree {
        let mut tree = ProtoTree::new();
        tree.push(SchemaNode::SimpleType(SimpleType {
            name: "Flags".into(),
            base: "string".into(),
            list: true,
            ..Default::default()
        }));
        tree.push(SchemaNode::SimpleType(SimpleType {
            name: "CommonId".into(),
            base: "string".into(),
            ..Default::default()
        }));
        tree.push(SchemaNode::Element(Element {
            name: "Person".into(),
            type_name: "PersonType".into(),
            ..Default::default()
        }));
        tree.push(SchemaNode::ComplexType(ComplexType {
            name: "PersonType".into(),
            ..Default::default()
        }));
        tree
    }

    #[test]
    fn test_referenced_type_skips_lists() {
        let tree = tree();
        assert_eq!(tree.referenced_type("Flags"), None);
        assert_eq!(tree.referenced_type("CommonId"), Some("string"));
        assert_eq!(tree.referenced_type("Person"), Some("PersonType"));
        assert_eq!(tree.referenced_type("PersonType"), None);
    }

    #[test]
    fn test_resolve_name_ignores_self_reference() {
        let mut tree = tree();
        tree.push(SchemaNode::Element(Element {
            name: "Loop".into(),
            type_name: "Loop".into(),
            ..Default::default()
        }));
        assert_eq!(tree.resolve_name("Loop"), None);
        assert_eq!(tree.resolve_name("CommonId").as_deref(), Some("string"));
    }

    #[test]
    fn test_find_and_kind() {
        let tree = tree();
        let node = tree.find("PersonType").unwrap();
        assert_eq!(node.kind(), NodeKind::ComplexType);
        assert!(tree.contains_name("Flags"));
        assert!(!tree.contains_name("Missing"));
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn test_json_shape() {
        let node = SchemaNode::Element(Element {
            name: "Tag".into(),
            type_name: "string".into(),
            plural: true,
            ..Default::default()
        });
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["kind"], "Element");
        assert_eq!(json["type"], "string");
        assert_eq!(json["plural"], true);
    }
}
