//! Error types for xsdgen
//!
//! Everything that can abort the parse of a schema file is a variant of
//! [`Error`]. Unresolvable type references are not errors unless the parser
//! runs in strict mode.

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias using xsdgen Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for xsdgen operations
#[derive(Error, Debug)]
pub enum Error {
    /// File system error, always tied to the path that caused it
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        /// Offending path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A directory was given where a schema file was expected
    #[error("'{}' is a directory, expected a schema file", .0.display())]
    NotAFile(PathBuf),

    /// XML tokenizer error
    #[error("XML error: {0}")]
    Xml(String),

    /// Malformed schema data
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Type reference that could not be resolved (strict mode only)
    #[error("unresolved type reference '{name}' in '{}'", file.display())]
    UnresolvedType {
        /// Reference as written, without its namespace prefix
        name: String,
        /// Schema file containing the reference
        file: PathBuf,
    },

    /// Error raised by a user-supplied hook
    #[error("hook error: {0}")]
    Hook(String),

    /// Limit exceeded error
    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Wrap an I/O error with the path it occurred on
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

/// Malformed schema data, with enough context to locate the fault
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    /// Error message
    pub message: String,
    /// Schema element (local name) carrying the bad data
    pub element: Option<String>,
    /// Attribute carrying the bad data
    pub attribute: Option<String>,
    /// Schema file and byte offset
    pub location: Option<String>,
}

impl ParseError {
    /// Create a new parse error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            element: None,
            attribute: None,
            location: None,
        }
    }

    /// Error for an attribute value that does not parse
    pub fn invalid_value(element: &str, attribute: &str, value: &str) -> Self {
        Self::new(format!("invalid value '{}'", value))
            .with_element(element)
            .with_attribute(attribute)
    }

    /// Set the element
    pub fn with_element(mut self, element: impl Into<String>) -> Self {
        self.element = Some(element.into());
        self
    }

    /// Set the attribute
    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }

    /// Set the location
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        match (&self.element, &self.attribute) {
            (Some(element), Some(attribute)) => {
                write!(f, " for attribute '{}' on <{}>", attribute, element)?
            }
            (Some(element), None) => write!(f, " on <{}>", element)?,
            (None, Some(attribute)) => write!(f, " for attribute '{}'", attribute)?,
            (None, None) => {}
        }

        if let Some(ref loc) = self.location {
            write!(f, " at {}", loc)?;
        }

        Ok(())
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::invalid_value("element", "maxOccurs", "lots")
            .with_location("person.xsd:120");

        let msg = format!("{}", err);
        assert!(msg.contains("invalid value 'lots'"));
        assert!(msg.contains("'maxOccurs' on <element>"));
        assert!(msg.contains("person.xsd:120"));
    }

    #[test]
    fn test_io_error_carries_path() {
        let err = Error::io(
            "missing.xsd",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(format!("{}", err).contains("missing.xsd"));
    }

    #[test]
    fn test_error_conversion() {
        let err: Error = ParseError::new("test").into();
        assert!(matches!(err, Error::Parse(_)));
    }
}
