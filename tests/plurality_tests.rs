//! Property tests for occurrence handling

use proptest::prelude::*;
use xsdgen::{Language, ParserConfig, SchemaNode, Session};

fn element_tree(attrs: &str) -> xsdgen::Result<xsdgen::ProtoTree> {
    let source = format!(
        r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
             <xs:element name="E" type="xs:string" {}/>
           </xs:schema>"#,
        attrs
    );
    Session::new(ParserConfig::new().with_lang(Language::Go)).parse_str(&source, "prop.xsd")
}

fn element_flags(attrs: &str) -> (bool, bool) {
    match element_tree(attrs).unwrap().find("E") {
        Some(SchemaNode::Element(e)) => (e.plural, e.optional),
        other => panic!("expected element E, got {:?}", other),
    }
}

proptest! {
    #[test]
    fn test_max_occurs_above_one_is_plural(n in 0u64..100_000) {
        let (plural, _) = element_flags(&format!(r#"maxOccurs="{}""#, n));
        prop_assert_eq!(plural, n > 1);
    }

    #[test]
    fn test_min_occurs_zero_is_optional(n in 0u64..1_000) {
        let (plural, optional) = element_flags(&format!(r#"minOccurs="{}""#, n));
        prop_assert!(!plural);
        prop_assert_eq!(optional, n == 0);
    }

    #[test]
    fn test_non_numeric_max_occurs_is_rejected(value in "[a-z]{1,8}") {
        prop_assume!(value != "unbounded");
        let result = element_tree(&format!(r#"maxOccurs="{}""#, value));
        prop_assert!(matches!(result, Err(xsdgen::Error::Parse(_))));
    }
}

#[test]
fn test_unbounded_and_absent() {
    assert_eq!(element_flags(r#"maxOccurs="unbounded""#), (true, false));
    assert_eq!(element_flags(""), (false, false));
    assert_eq!(element_flags(r#"maxOccurs="1""#), (false, false));
    assert_eq!(element_flags(r#"maxOccurs="5""#), (true, false));
}
