//! The closed set of XSD elements the walker reacts to

use std::fmt;

/// Known XSD element kinds, keyed by local tag name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Schema,
    SimpleType,
    ComplexType,
    Element,
    Attribute,
    Group,
    AttributeGroup,
    Union,
    List,
    Restriction,
    Extension,
    Enumeration,
    Sequence,
    Choice,
    All,
    Pattern,
    Length,
    MinLength,
    MaxLength,
    MinInclusive,
    MaxInclusive,
    MinExclusive,
    MaxExclusive,
    TotalDigits,
    FractionDigits,
    Include,
    Import,
    Redefine,
    Any,
    SimpleContent,
    ComplexContent,
    Annotation,
    Documentation,
}

impl ElementKind {
    /// Kind of an element by its local name; `None` for anything the walker
    /// does not handle
    pub fn from_local_name(name: &str) -> Option<Self> {
        use ElementKind::*;
        let kind = match name {
            "schema" => Schema,
            "simpleType" => SimpleType,
            "complexType" => ComplexType,
            "element" => Element,
            "attribute" => Attribute,
            "group" => Group,
            "attributeGroup" => AttributeGroup,
            "union" => Union,
            "list" => List,
            "restriction" => Restriction,
            "extension" => Extension,
            "enumeration" => Enumeration,
            "sequence" => Sequence,
            "choice" => Choice,
            "all" => All,
            "pattern" => Pattern,
            "length" => Length,
            "minLength" => MinLength,
            "maxLength" => MaxLength,
            "minInclusive" => MinInclusive,
            "maxInclusive" => MaxInclusive,
            "minExclusive" => MinExclusive,
            "maxExclusive" => MaxExclusive,
            "totalDigits" => TotalDigits,
            "fractionDigits" => FractionDigits,
            "include" => Include,
            "import" => Import,
            "redefine" => Redefine,
            "any" => Any,
            "simpleContent" => SimpleContent,
            "complexContent" => ComplexContent,
            "annotation" => Annotation,
            "documentation" => Documentation,
            _ => return None,
        };
        Some(kind)
    }

    /// Local tag name of this kind
    pub fn local_name(self) -> &'static str {
        use ElementKind::*;
        match self {
            Schema => "schema",
            SimpleType => "simpleType",
            ComplexType => "complexType",
            Element => "element",
            Attribute => "attribute",
            Group => "group",
            AttributeGroup => "attributeGroup",
            Union => "union",
            List => "list",
            Restriction => "restriction",
            Extension => "extension",
            Enumeration => "enumeration",
            Sequence => "sequence",
            Choice => "choice",
            All => "all",
            Pattern => "pattern",
            Length => "length",
            MinLength => "minLength",
            MaxLength => "maxLength",
            MinInclusive => "minInclusive",
            MaxInclusive => "maxInclusive",
            MinExclusive => "minExclusive",
            MaxExclusive => "maxExclusive",
            TotalDigits => "totalDigits",
            FractionDigits => "fractionDigits",
            Include => "include",
            Import => "import",
            Redefine => "redefine",
            Any => "any",
            SimpleContent => "simpleContent",
            ComplexContent => "complexContent",
            Annotation => "annotation",
            Documentation => "documentation",
        }
    }

    /// Restriction facets other than `enumeration`
    pub fn is_facet(self) -> bool {
        use ElementKind::*;
        matches!(
            self,
            Pattern
                | Length
                | MinLength
                | MaxLength
                | MinInclusive
                | MaxInclusive
                | MinExclusive
                | MaxExclusive
                | TotalDigits
                | FractionDigits
        )
    }

    /// Constructs other declarations attach to
    pub fn is_container(self) -> bool {
        matches!(
            self,
            ElementKind::ComplexType
                | ElementKind::Group
                | ElementKind::AttributeGroup
                | ElementKind::Element
        )
    }

    /// Model groups whose `maxOccurs` can make their children plural
    pub fn is_compositor(self) -> bool {
        matches!(
            self,
            ElementKind::Sequence | ElementKind::Choice | ElementKind::All
        )
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.local_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for name in ["schema", "simpleType", "attributeGroup", "fractionDigits", "any"] {
            let kind = ElementKind::from_local_name(name).unwrap();
            assert_eq!(kind.local_name(), name);
        }
    }

    #[test]
    fn test_unknown_kinds() {
        assert_eq!(ElementKind::from_local_name("anyAttribute"), None);
        assert_eq!(ElementKind::from_local_name("appinfo"), None);
        assert_eq!(ElementKind::from_local_name("SimpleType"), None);
    }

    #[test]
    fn test_classification() {
        assert!(ElementKind::Pattern.is_facet());
        assert!(!ElementKind::Enumeration.is_facet());
        assert!(ElementKind::All.is_compositor());
        assert!(!ElementKind::Group.is_compositor());
        assert!(ElementKind::Element.is_container());
        assert!(!ElementKind::Sequence.is_container());
    }
}
