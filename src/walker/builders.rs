//! Open frames and in-flight node builders
//!
//! A builder lives from a construct's start tag to its end tag. Fields that
//! only become known once a nested construct closes (an element's type from
//! an inline `simpleType`, a simple type's base from its `restriction`) are
//! held as `Option`s here and defaulted when the node is finished.

use super::kind::ElementKind;
use crate::builtins::{builtin_type, Language};
use crate::proto::{Attribute, Element, NodeKind, SimpleType};

/// One open XML element in the document being walked
#[derive(Debug, Clone)]
pub(crate) struct Frame {
    /// Local tag name
    pub name: String,
    pub kind: Option<ElementKind>,
    /// Nesting depth, the schema root being 1
    pub depth: usize,
    /// Builder stack this element pushed onto, if any
    pub opened: Option<NodeKind>,
    /// Compositor plurality (sequence/choice)
    pub plural: bool,
    /// Default handling was vetoed by a hook
    pub skipped: bool,
}

impl Frame {
    pub fn new(name: &str, kind: Option<ElementKind>, depth: usize) -> Self {
        Self {
            name: name.to_string(),
            kind,
            depth,
            opened: None,
            plural: false,
            skipped: false,
        }
    }

    pub fn skipped(name: &str, kind: Option<ElementKind>, depth: usize) -> Self {
        Self {
            skipped: true,
            ..Self::new(name, kind, depth)
        }
    }
}

fn any_type(lang: Language) -> String {
    builtin_type("anyType", lang).unwrap_or("anyType").to_string()
}

#[derive(Debug, Clone, Default)]
pub(crate) struct SimpleTypeBuilder {
    pub simple: SimpleType,
    pub base: Option<String>,
}

impl SimpleTypeBuilder {
    pub fn new(name: Option<&str>) -> Self {
        Self {
            simple: SimpleType {
                name: name.unwrap_or_default().to_string(),
                anonymous: name.is_none(),
                ..Default::default()
            },
            base: None,
        }
    }

    /// Type an owner of this (inline) simple type ends up with
    pub fn resolved_type(&self, lang: Language) -> String {
        if self.simple.union {
            return self
                .simple
                .member_types
                .values()
                .next()
                .cloned()
                .or_else(|| builtin_type("string", lang).map(str::to_string))
                .unwrap_or_default();
        }
        match &self.base {
            Some(base) if !base.is_empty() => base.clone(),
            _ => builtin_type("anySimpleType", lang)
                .unwrap_or("anySimpleType")
                .to_string(),
        }
    }

    /// Key under which an inline union member is recorded
    pub fn member_key(&self, lang: Language) -> String {
        if self.simple.name.is_empty() {
            self.resolved_type(lang)
        } else {
            self.simple.name.clone()
        }
    }

    pub fn finish(self) -> SimpleType {
        SimpleType {
            base: self.base.unwrap_or_default(),
            ..self.simple
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct ElementBuilder {
    pub element: Element,
    pub type_name: Option<String>,
    /// An anonymous complex type took this element's name
    pub inline_complex: bool,
}

impl ElementBuilder {
    pub fn new(element: Element, type_name: Option<String>) -> Self {
        Self {
            element,
            type_name,
            inline_complex: false,
        }
    }

    pub fn set_inline_type(&mut self, simple: &SimpleTypeBuilder, lang: Language) {
        self.type_name = Some(simple.resolved_type(lang));
        self.element.plural |= simple.simple.list;
    }

    pub fn finish(self, lang: Language) -> Element {
        Element {
            type_name: self.type_name.unwrap_or_else(|| any_type(lang)),
            ..self.element
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct AttributeBuilder {
    pub attribute: Attribute,
    pub type_name: Option<String>,
}

impl AttributeBuilder {
    pub fn new(attribute: Attribute, type_name: Option<String>) -> Self {
        Self {
            attribute,
            type_name,
        }
    }

    pub fn set_inline_type(&mut self, simple: &SimpleTypeBuilder, lang: Language) {
        self.type_name = Some(simple.resolved_type(lang));
        self.attribute.plural |= simple.simple.list;
    }

    pub fn finish(self, lang: Language) -> Attribute {
        Attribute {
            type_name: self.type_name.unwrap_or_else(|| any_type(lang)),
            ..self.attribute
        }
    }
}

/// Add an element to a content model. A same-named element of the same type
/// is widened instead of duplicated: plurality wins.
pub(crate) fn merge_element(elements: &mut Vec<Element>, element: Element) {
    match elements
        .iter_mut()
        .find(|e| e.name == element.name && e.type_name == element.type_name)
    {
        Some(existing) => existing.plural |= element.plural,
        None => elements.push(element),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_defaults_to_any_type() {
        let builder = ElementBuilder::new(
            Element {
                name: "Free".into(),
                ..Default::default()
            },
            None,
        );
        assert_eq!(builder.finish(Language::Go).type_name, "string");

        let builder = ElementBuilder::new(Element::default(), None);
        assert_eq!(builder.finish(Language::C).type_name, "char");
    }

    #[test]
    fn test_inline_list_makes_owner_plural() {
        let mut simple = SimpleTypeBuilder::new(None);
        simple.simple.list = true;
        simple.base = Some("int".into());

        let mut attribute = AttributeBuilder::new(Attribute::default(), None);
        attribute.set_inline_type(&simple, Language::Go);
        let attribute = attribute.finish(Language::Go);
        assert_eq!(attribute.type_name, "int");
        assert!(attribute.plural);
    }

    #[test]
    fn test_union_resolves_to_first_member() {
        let mut simple = SimpleTypeBuilder::new(Some("Size"));
        simple.simple.union = true;
        assert_eq!(simple.resolved_type(Language::Java), "String");
        simple.simple.member_types.insert("int".into(), "Integer".into());
        simple.simple.member_types.insert("string".into(), "String".into());
        assert_eq!(simple.resolved_type(Language::Java), "Integer");
        assert_eq!(simple.member_key(Language::Java), "Size");
    }

    #[test]
    fn test_merge_element_widens_plurality() {
        let mut elements = Vec::new();
        let scalar = Element {
            name: "Item".into(),
            type_name: "string".into(),
            ..Default::default()
        };
        let array = Element {
            plural: true,
            ..scalar.clone()
        };
        let other = Element {
            type_name: "int".into(),
            ..scalar.clone()
        };
        merge_element(&mut elements, scalar);
        merge_element(&mut elements, array);
        merge_element(&mut elements, other);
        assert_eq!(elements.len(), 2);
        assert!(elements[0].plural);
        assert!(!elements[1].plural);
    }

    #[test]
    fn test_simple_type_finish_fills_base() {
        let mut simple = SimpleTypeBuilder::new(Some("Code"));
        assert!(!simple.simple.anonymous);
        simple.base = Some("string".into());
        let node = simple.finish();
        assert_eq!(node.base, "string");
        assert_eq!(node.name, "Code");
    }
}
