//! Content models: `complexType`, `extension`, `element`, `attribute`,
//! `group`, `attributeGroup`, compositors and `any`

use super::builders::{merge_element, AttributeBuilder, ElementBuilder};
use super::kind::ElementKind;
use super::{Owner, Walker};
use crate::builtins::builtin_type;
use crate::error::Result;
use crate::names;
use crate::proto::{Attribute, AttributeGroup, ComplexType, Element, Group, NodeKind, SchemaNode};
use crate::reader::StartTag;

impl Walker<'_> {
    /// An anonymous complex type inside an element takes the element's name,
    /// and the element is typed by it.
    pub(super) fn on_complex_type(&mut self, tag: &StartTag) -> Result<()> {
        let mixed = tag.attr("mixed") == Some("true");
        let (name, anonymous) = match tag.attr("name") {
            Some(name) => (name.to_string(), false),
            None => {
                let owner = match self.enclosing_kind(0) {
                    Some(ElementKind::Element) => self.elements.peek_mut(),
                    _ => None,
                };
                let name = match owner {
                    Some(element) => {
                        element.inline_complex = true;
                        element.type_name = Some(element.element.name.clone());
                        element.element.name.clone()
                    }
                    None => String::new(),
                };
                (name, true)
            }
        };
        self.complex_types.push(ComplexType {
            name,
            anonymous,
            mixed,
            ..Default::default()
        });
        Ok(())
    }

    pub(super) fn end_complex_type(&mut self) {
        let Some(mut complex) = self.complex_types.pop() else {
            return;
        };
        // inline type of a vetoed element
        if complex.anonymous && self.parent_skipped() {
            return;
        }
        if complex.anonymous
            && complex.doc.is_empty()
            && self.enclosing_kind(0) == Some(ElementKind::Element)
        {
            // documentation of the element this type was named after
            if let Some(owner) = self.elements.peek() {
                complex.doc = owner.element.doc.clone();
            }
        }
        self.emit(SchemaNode::ComplexType(complex));
    }

    pub(super) fn on_extension(&mut self, tag: &StartTag) -> Result<()> {
        let Some(base) = tag.attr("base") else {
            return Ok(());
        };
        if !matches!(
            self.enclosing_kind(0),
            Some(ElementKind::SimpleContent | ElementKind::ComplexContent)
        ) || self.enclosing_kind(1) != Some(ElementKind::ComplexType)
        {
            return Ok(());
        }
        let resolved = self.resolve(base)?;
        if let Some(complex) = self.complex_types.peek_mut() {
            complex.base = Some(resolved);
            if complex.name.is_empty() {
                complex.name = names::local_name(base).to_string();
            }
        }
        Ok(())
    }

    pub(super) fn on_element(&mut self, tag: &StartTag) -> Result<()> {
        let reference = tag.attr("ref");
        let name = tag
            .attr("name")
            .or_else(|| reference.map(names::local_name))
            .unwrap_or_default()
            .to_string();
        let type_name = match (tag.attr("type"), reference) {
            (Some(type_ref), _) | (None, Some(type_ref)) => Some(self.resolve(type_ref)?),
            (None, None) => None,
        };

        let plural = self.max_occurs_plural(ElementKind::Element, tag)?
            || tag.attr("unbounded").map_or(false, |v| v != "0")
            || self.inherited_plural();
        let optional = self.min_occurs_zero(ElementKind::Element, tag)?;

        let element = Element {
            name,
            plural,
            optional,
            nillable: tag.attr("nillable") == Some("true"),
            is_abstract: tag.attr("abstract") == Some("true"),
            default: tag.attr("default").or(tag.attr("fixed")).map(str::to_string),
            ..Default::default()
        };
        self.elements.push(ElementBuilder::new(element, type_name));
        Ok(())
    }

    /// Elements attach to the content model they appear in; only top-level
    /// declarations become nodes of their own.
    pub(super) fn end_element(&mut self) {
        let Some(builder) = self.elements.pop() else {
            return;
        };
        let inline_complex = builder.inline_complex;
        let element = builder.finish(self.lang());
        match self.owner(&[NodeKind::ComplexType, NodeKind::Group]) {
            Owner::Open(NodeKind::ComplexType) => {
                if let Some(complex) = self.complex_types.peek_mut() {
                    merge_element(&mut complex.elements, element);
                }
            }
            Owner::Open(NodeKind::Group) => {
                if let Some(group) = self.groups.peek_mut() {
                    merge_element(&mut group.elements, element);
                }
            }
            // the inline complex type was emitted under this name already
            Owner::Schema if inline_complex => {}
            Owner::Schema => self.emit(SchemaNode::Element(element)),
            Owner::Open(_) | Owner::Vetoed => {}
        }
    }

    pub(super) fn on_attribute(&mut self, tag: &StartTag) -> Result<()> {
        let reference = tag.attr("ref");
        let name = tag
            .attr("name")
            .or_else(|| reference.map(names::local_name))
            .unwrap_or_default()
            .to_string();
        let type_name = match (tag.attr("type"), reference) {
            (Some(type_ref), _) | (None, Some(type_ref)) => Some(self.resolve(type_ref)?),
            (None, None) => None,
        };

        let attribute = Attribute {
            name,
            optional: tag.attr("use") != Some("required"),
            default: tag.attr("default").or(tag.attr("fixed")).map(str::to_string),
            ..Default::default()
        };
        self.attributes.push(AttributeBuilder::new(attribute, type_name));
        Ok(())
    }

    pub(super) fn end_attribute(&mut self) {
        let Some(builder) = self.attributes.pop() else {
            return;
        };
        let attribute = builder.finish(self.lang());
        match self.owner(&[NodeKind::ComplexType, NodeKind::AttributeGroup]) {
            Owner::Open(NodeKind::ComplexType) => {
                if let Some(complex) = self.complex_types.peek_mut() {
                    complex.attributes.push(attribute);
                }
            }
            Owner::Open(NodeKind::AttributeGroup) => {
                if let Some(group) = self.attribute_groups.peek_mut() {
                    group.attributes.push(attribute);
                }
            }
            Owner::Schema => self.emit(SchemaNode::Attribute(attribute)),
            Owner::Open(_) | Owner::Vetoed => {}
        }
    }

    /// A `ref` attaches to the enclosing content model right away; a
    /// definition opens a builder and becomes a node when it closes.
    pub(super) fn on_group(&mut self, tag: &StartTag) -> Result<Option<NodeKind>> {
        let plural = self.max_occurs_plural(ElementKind::Group, tag)? || self.inherited_plural();

        if let Some(reference) = tag.attr("ref") {
            let resolved = self.resolve(reference)?;
            let group = Group {
                name: names::local_name(reference).to_string(),
                reference: Some(resolved),
                plural,
                ..Default::default()
            };
            match self.owner(&[NodeKind::ComplexType, NodeKind::Group]) {
                Owner::Open(NodeKind::ComplexType) => {
                    if let Some(complex) = self.complex_types.peek_mut() {
                        if !complex.groups.iter().any(|g| g.name == group.name) {
                            complex.groups.push(group);
                        }
                    }
                }
                Owner::Open(NodeKind::Group) => {
                    if let Some(outer) = self.groups.peek_mut() {
                        outer.groups.push(group);
                    }
                }
                _ => {}
            }
            return Ok(None);
        }

        self.groups.push(Group {
            name: tag.attr("name").unwrap_or_default().to_string(),
            plural,
            ..Default::default()
        });
        Ok(Some(NodeKind::Group))
    }

    pub(super) fn end_group(&mut self) {
        if let Some(group) = self.groups.pop() {
            self.emit(SchemaNode::Group(group));
        }
    }

    pub(super) fn on_attribute_group(&mut self, tag: &StartTag) -> Result<Option<NodeKind>> {
        if let Some(reference) = tag.attr("ref") {
            let resolved = self.resolve(reference)?;
            let group = AttributeGroup {
                name: names::local_name(reference).to_string(),
                reference: Some(resolved),
                ..Default::default()
            };
            match self.owner(&[NodeKind::ComplexType, NodeKind::AttributeGroup]) {
                Owner::Open(NodeKind::ComplexType) => {
                    if let Some(complex) = self.complex_types.peek_mut() {
                        complex.attribute_groups.push(group);
                    }
                }
                Owner::Open(NodeKind::AttributeGroup) => {
                    if let Some(outer) = self.attribute_groups.peek_mut() {
                        outer.attribute_groups.push(group);
                    }
                }
                _ => {}
            }
            return Ok(None);
        }

        self.attribute_groups.push(AttributeGroup {
            name: tag.attr("name").unwrap_or_default().to_string(),
            ..Default::default()
        });
        Ok(Some(NodeKind::AttributeGroup))
    }

    pub(super) fn end_attribute_group(&mut self) {
        if let Some(group) = self.attribute_groups.pop() {
            self.emit(SchemaNode::AttributeGroup(group));
        }
    }

    /// Plurality of a `sequence`, `choice` or `all`. A choice inherits the
    /// plurality of an enclosing choice; `all` never repeats.
    pub(super) fn on_compositor(&mut self, kind: ElementKind, tag: &StartTag) -> Result<bool> {
        let own = self.max_occurs_plural(kind, tag)?;
        Ok(match kind {
            ElementKind::All => false,
            ElementKind::Choice => own || self.enclosing_choice_plural(),
            _ => own,
        })
    }

    fn enclosing_choice_plural(&self) -> bool {
        for frame in self.frames.iter_top_down() {
            match frame.kind {
                Some(ElementKind::Choice) => return frame.plural,
                Some(
                    ElementKind::ComplexType
                    | ElementKind::Group
                    | ElementKind::Element
                    | ElementKind::Schema,
                ) => return false,
                _ => {}
            }
        }
        false
    }

    /// `xs:any` becomes a wildcard element in the enclosing content model
    pub(super) fn on_any(&mut self, tag: &StartTag) -> Result<()> {
        let plural = self.max_occurs_plural(ElementKind::Any, tag)? || self.inherited_plural();
        let optional = self.min_occurs_zero(ElementKind::Any, tag)?;
        let element = Element {
            name: "any".to_string(),
            wildcard: true,
            type_name: builtin_type("anyType", self.lang())
                .unwrap_or("anyType")
                .to_string(),
            plural,
            optional,
            ..Default::default()
        };
        match self.owner(&[NodeKind::ComplexType, NodeKind::Group]) {
            Owner::Open(NodeKind::ComplexType) => {
                if let Some(complex) = self.complex_types.peek_mut() {
                    merge_element(&mut complex.elements, element);
                }
            }
            Owner::Open(NodeKind::Group) => {
                if let Some(group) = self.groups.peek_mut() {
                    merge_element(&mut group.elements, element);
                }
            }
            _ => {}
        }
        Ok(())
    }
}
