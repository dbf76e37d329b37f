//! Simple types: `simpleType`, `restriction`, `list`, `union`,
//! `enumeration` and the other facets

use super::builders::SimpleTypeBuilder;
use super::kind::ElementKind;
use super::{parse_value, Walker};
use crate::error::Result;
use crate::names;
use crate::proto::SchemaNode;
use crate::reader::StartTag;

impl Walker<'_> {
    pub(super) fn on_simple_type(&mut self, tag: &StartTag) -> Result<()> {
        self.simple_types
            .push(SimpleTypeBuilder::new(tag.attr("name")));
        Ok(())
    }

    /// A simple type's restriction base, or a complex type's when the
    /// restriction sits in `simpleContent`. Restrictions of complex content
    /// keep their own content model and contribute nothing here.
    pub(super) fn on_restriction(&mut self, tag: &StartTag) -> Result<()> {
        let Some(base) = tag.attr("base") else {
            return Ok(());
        };
        match self.enclosing_kind(0) {
            Some(ElementKind::SimpleType) => {
                let resolved = self.resolve(base)?;
                if let Some(simple) = self.simple_types.peek_mut() {
                    simple.base = Some(resolved);
                }
            }
            Some(ElementKind::SimpleContent)
                if self.enclosing_kind(1) == Some(ElementKind::ComplexType) =>
            {
                let resolved = self.resolve(base)?;
                if let Some(complex) = self.complex_types.peek_mut() {
                    complex.base = Some(resolved);
                }
            }
            _ => {}
        }
        Ok(())
    }

    pub(super) fn on_list(&mut self, tag: &StartTag) -> Result<()> {
        if self.enclosing_kind(0) != Some(ElementKind::SimpleType) {
            return Ok(());
        }
        let item = match tag.attr("itemType") {
            Some(item) => Some(self.resolve(item)?),
            None => None,
        };
        if let Some(simple) = self.simple_types.peek_mut() {
            simple.simple.list = true;
            if item.is_some() {
                simple.base = item;
            }
        }
        Ok(())
    }

    /// Member types are keyed by their unprefixed name so a member declared
    /// later in the file can be looked up again once the walk is done.
    pub(super) fn on_union(&mut self, tag: &StartTag) -> Result<()> {
        if self.enclosing_kind(0) != Some(ElementKind::SimpleType) {
            return Ok(());
        }
        let mut members = Vec::new();
        for member in tag.attr("memberTypes").unwrap_or_default().split_whitespace() {
            let resolved = self.resolve(member)?;
            members.push((names::local_name(member).to_string(), resolved));
        }
        if let Some(simple) = self.simple_types.peek_mut() {
            simple.simple.union = true;
            simple.simple.member_types.extend(members);
        }
        Ok(())
    }

    fn in_simple_restriction(&self) -> bool {
        self.enclosing_kind(0) == Some(ElementKind::Restriction)
            && self.enclosing_kind(1) == Some(ElementKind::SimpleType)
    }

    pub(super) fn on_enumeration(&mut self, tag: &StartTag) -> Result<()> {
        if !self.in_simple_restriction() {
            return Ok(());
        }
        if let (Some(value), Some(simple)) = (tag.attr("value"), self.simple_types.peek_mut()) {
            simple.simple.restriction.enum_values.push(value.to_string());
        }
        Ok(())
    }

    pub(super) fn on_facet(&mut self, kind: ElementKind, tag: &StartTag) -> Result<()> {
        if !self.in_simple_restriction() {
            return Ok(());
        }
        let Some(value) = tag.attr("value") else {
            return Ok(());
        };
        let location = self.location();
        let Some(simple) = self.simple_types.peek_mut() else {
            return Ok(());
        };
        let restriction = &mut simple.simple.restriction;
        match kind {
            ElementKind::Pattern => restriction.pattern = Some(value.to_string()),
            ElementKind::Length => {
                let length = parse_value(kind, "value", value, &location)?;
                restriction.min_length = Some(length);
                restriction.max_length = Some(length);
            }
            ElementKind::MinLength => {
                restriction.min_length = Some(parse_value(kind, "value", value, &location)?)
            }
            ElementKind::MaxLength => {
                restriction.max_length = Some(parse_value(kind, "value", value, &location)?)
            }
            ElementKind::MinInclusive | ElementKind::MinExclusive => {
                restriction.min = Some(parse_value(kind, "value", value, &location)?)
            }
            ElementKind::MaxInclusive | ElementKind::MaxExclusive => {
                restriction.max = Some(parse_value(kind, "value", value, &location)?)
            }
            ElementKind::TotalDigits => {
                restriction.total_digits = Some(parse_value(kind, "value", value, &location)?)
            }
            ElementKind::FractionDigits => {
                restriction.precision = Some(parse_value(kind, "value", value, &location)?)
            }
            _ => {}
        }
        Ok(())
    }

    /// Where a finished simple type goes depends on what encloses it
    pub(super) fn end_simple_type(&mut self) {
        let Some(builder) = self.simple_types.pop() else {
            return;
        };
        if self.parent_skipped() {
            return;
        }
        let lang = self.lang();
        match self.enclosing_kind(0) {
            Some(ElementKind::Attribute) => {
                if let Some(attribute) = self.attributes.peek_mut() {
                    attribute.set_inline_type(&builder, lang);
                }
            }
            Some(ElementKind::Element) => {
                if let Some(element) = self.elements.peek_mut() {
                    element.set_inline_type(&builder, lang);
                }
            }
            Some(ElementKind::Union) => {
                if let Some(outer) = self.simple_types.peek_mut() {
                    outer
                        .simple
                        .member_types
                        .insert(builder.member_key(lang), builder.resolved_type(lang));
                }
            }
            Some(ElementKind::List) => {
                if let Some(outer) = self.simple_types.peek_mut() {
                    outer.base = Some(builder.resolved_type(lang));
                }
            }
            Some(ElementKind::Restriction) => match self.enclosing_kind(1) {
                Some(ElementKind::SimpleType) => {
                    if let Some(outer) = self.simple_types.peek_mut() {
                        outer.base = Some(builder.resolved_type(lang));
                    }
                }
                Some(ElementKind::SimpleContent)
                    if self.enclosing_kind(2) == Some(ElementKind::ComplexType) =>
                {
                    if let Some(complex) = self.complex_types.peek_mut() {
                        complex.base = Some(builder.resolved_type(lang));
                    }
                }
                _ => {}
            },
            _ => self.emit(SchemaNode::SimpleType(builder.finish())),
        }
    }
}
