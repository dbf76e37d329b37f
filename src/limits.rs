//! Limits and constraints for schema processing
//!
//! Guards against oversized inputs, pathological nesting, and runaway
//! cross-file recursion while resolving imported types.

use crate::error::{Error, Result};

/// Resource limits applied to every schema file in a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum schema file size in bytes
    pub max_file_size: usize,

    /// Maximum element nesting depth within one file
    pub max_depth: usize,

    /// Maximum depth of nested cross-file parses
    pub max_import_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_file_size: 100 * 1024 * 1024, // 100 MB
            max_depth: 1000,
            max_import_depth: 64,
        }
    }
}

impl Limits {
    /// Create a new Limits with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create strict limits (more restrictive)
    pub fn strict() -> Self {
        Self {
            max_file_size: 10 * 1024 * 1024, // 10 MB
            max_depth: 100,
            max_import_depth: 16,
        }
    }

    /// Check a file size against the limit
    pub fn check_file_size(&self, size: usize) -> Result<()> {
        if size > self.max_file_size {
            return Err(Error::LimitExceeded(format!(
                "schema file size {} exceeds maximum {}",
                size, self.max_file_size
            )));
        }
        Ok(())
    }

    /// Check element nesting depth
    pub fn check_depth(&self, depth: usize) -> Result<()> {
        if depth > self.max_depth {
            return Err(Error::LimitExceeded(format!(
                "element nesting depth {} exceeds maximum {}",
                depth, self.max_depth
            )));
        }
        Ok(())
    }

    /// Check cross-file recursion depth
    pub fn check_import_depth(&self, depth: usize) -> Result<()> {
        if depth > self.max_import_depth {
            return Err(Error::LimitExceeded(format!(
                "import/include depth {} exceeds maximum {}",
                depth, self.max_import_depth
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let limits = Limits::default();
        assert!(limits.check_file_size(1024).is_ok());
        assert!(limits.check_depth(500).is_ok());
        assert!(limits.check_import_depth(64).is_ok());
    }

    #[test]
    fn test_strict_limits() {
        let limits = Limits::strict();
        assert!(limits.check_file_size(11 * 1024 * 1024).is_err());
        assert!(limits.check_depth(101).is_err());
        assert!(limits.check_import_depth(17).is_err());
    }
}
