//! Qualified name helpers
//!
//! Type references in XSD attributes are written as `prefix:local` or bare
//! `local`. These helpers split them without consulting any namespace map.

/// Split a QName into prefix and local name
pub fn split_qname(qname: &str) -> (Option<&str>, &str) {
    match qname.split_once(':') {
        Some((prefix, local)) if !local.contains(':') => (Some(prefix), local),
        _ => (None, qname),
    }
}

/// Local part of a QName, with any namespace prefix removed
pub fn local_name(qname: &str) -> &str {
    split_qname(qname).1
}

/// Namespace prefix of a QName, or the empty string when unprefixed
pub fn prefix(qname: &str) -> &str {
    split_qname(qname).0.unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_qname() {
        assert_eq!(split_qname("element"), (None, "element"));
        assert_eq!(split_qname("xs:element"), (Some("xs"), "element"));
    }

    #[test]
    fn test_multiple_colons_are_left_alone() {
        assert_eq!(split_qname("a:b:c"), (None, "a:b:c"));
        assert_eq!(local_name("a:b:c"), "a:b:c");
    }

    #[test]
    fn test_local_name_and_prefix() {
        assert_eq!(local_name("tns:CommonId"), "CommonId");
        assert_eq!(local_name("CommonId"), "CommonId");
        assert_eq!(prefix("tns:CommonId"), "tns");
        assert_eq!(prefix("CommonId"), "");
    }
}
