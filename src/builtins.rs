//! XSD built-in datatypes and their target-language mappings
//!
//! This table is the single source of truth for mapping an XSD primitive
//! (`string`, `int`, `dateTime`, ...) to the primitive of each supported
//! target language. Type resolution consults it before anything else.
//!
//! <https://www.w3.org/TR/xmlschema-2/#datatype>

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Target language of code emission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    /// Go
    #[default]
    Go,
    /// TypeScript
    #[serde(rename = "TypeScript")]
    TypeScript,
    /// C
    C,
    /// Java
    Java,
    /// Rust
    Rust,
}

impl Language {
    /// All supported languages, in table column order
    pub const ALL: [Language; 5] = [
        Language::Go,
        Language::TypeScript,
        Language::C,
        Language::Java,
        Language::Rust,
    ];

    fn column(self) -> usize {
        match self {
            Language::Go => 0,
            Language::TypeScript => 1,
            Language::C => 2,
            Language::Java => 3,
            Language::Rust => 4,
        }
    }

    /// Display name of the language
    pub fn name(self) -> &'static str {
        match self {
            Language::Go => "Go",
            Language::TypeScript => "TypeScript",
            Language::C => "C",
            Language::Java => "Java",
            Language::Rust => "Rust",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|lang| lang.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unsupported language '{}'", s))
    }
}

/// XSD datatype -> [Go, TypeScript, C, Java, Rust]
static BUILTIN_TYPES: Lazy<HashMap<&'static str, [&'static str; 5]>> = Lazy::new(|| {
    HashMap::from([
        ("anyType", ["string", "string", "char", "String", "String"]),
        ("anySimpleType", ["string", "string", "char", "String", "String"]),
        ("ENTITIES", ["[]string", "Array<string>", "char[]", "List<String>", "Vec<String>"]),
        ("ENTITY", ["string", "string", "char", "String", "String"]),
        ("ID", ["string", "string", "char", "String", "String"]),
        ("IDREF", ["string", "string", "char", "String", "String"]),
        ("IDREFS", ["[]string", "Array<string>", "char[]", "List<String>", "Vec<String>"]),
        ("NCName", ["string", "string", "char", "String", "String"]),
        ("NMTOKEN", ["string", "string", "char", "String", "String"]),
        ("NMTOKENS", ["[]string", "Array<string>", "char[]", "List<String>", "Vec<String>"]),
        ("NOTATION", ["[]string", "Array<string>", "char[]", "List<String>", "Vec<String>"]),
        ("Name", ["string", "string", "char", "String", "String"]),
        ("QName", ["xml.Name", "any", "char", "String", "String"]),
        ("anyURI", ["string", "string", "char", "QName", "String"]),
        ("base64Binary", ["[]byte", "Uint8Array", "char[]", "List<Byte>", "String"]),
        ("boolean", ["bool", "boolean", "bool", "Boolean", "bool"]),
        ("byte", ["byte", "any", "char[]", "Byte", "u8"]),
        ("date", ["time.Time", "string", "char", "Byte", "u8"]),
        ("dateTime", ["time.Time", "string", "char", "Byte", "u8"]),
        ("decimal", ["float64", "number", "float", "Float", "f64"]),
        ("double", ["float64", "number", "float", "Float", "f64"]),
        ("duration", ["string", "string", "char", "String", "String"]),
        ("float", ["float", "number", "float", "Float", "f64"]),
        ("gDay", ["time.Time", "string", "char", "String", "String"]),
        ("gMonth", ["time.Time", "string", "char", "String", "String"]),
        ("gMonthDay", ["time.Time", "string", "char", "String", "String"]),
        ("gYear", ["time.Time", "string", "char", "String", "String"]),
        ("gYearMonth", ["time.Time", "string", "char", "String", "String"]),
        ("hexBinary", ["[]byte", "Uint8Array", "char[]", "List<Byte>", "String"]),
        ("int", ["int", "number", "int", "Integer", "i32"]),
        ("integer", ["int", "number", "int", "Integer", "i32"]),
        ("language", ["string", "string", "char", "String", "String"]),
        ("long", ["int64", "number", "int", "Long", "i64"]),
        ("negativeInteger", ["int", "number", "int", "Integer", "i32"]),
        ("nonNegativeInteger", ["int", "number", "int", "Integer", "u32"]),
        ("normalizedString", ["string", "string", "char", "String", "String"]),
        ("nonPositiveInteger", ["int", "number", "int", "Integer", "i32"]),
        ("positiveInteger", ["int", "number", "int", "Integer", "u32"]),
        ("short", ["int16", "number", "int", "Integer", "i16"]),
        ("string", ["string", "string", "char", "String", "String"]),
        ("time", ["time.Time", "string", "char", "String", "String"]),
        ("token", ["string", "string", "char", "String", "String"]),
        ("unsignedByte", ["byte", "any", "char", "Byte", "u8"]),
        ("unsignedInt", ["uint32", "number", "unsigned int", "Integer", "u32"]),
        ("unsignedLong", ["uint64", "number", "unsigned int", "Long", "u64"]),
        ("unsignedShort", ["uint16", "number", "unsigned int", "Short", "u16"]),
        ("xml:lang", ["string", "string", "char", "String", "String"]),
        ("xml:space", ["string", "string", "char", "String", "String"]),
        ("xml:base", ["string", "string", "char", "String", "String"]),
        ("xml:id", ["string", "string", "char", "String", "String"]),
    ])
});

/// Target-language builtin for an XSD datatype name.
///
/// `name` is looked up as given first (so `xml:lang` hits its own entry),
/// then with any namespace prefix removed.
pub fn builtin_type(name: &str, lang: Language) -> Option<&'static str> {
    BUILTIN_TYPES
        .get(name)
        .or_else(|| BUILTIN_TYPES.get(crate::names::local_name(name)))
        .map(|row| row[lang.column()])
}

/// Whether a name is an XSD builtin datatype
pub fn is_builtin(name: &str) -> bool {
    builtin_type(name, Language::Go).is_some()
}
