//! Schema file loading
//!
//! Reads schema files from disk under the configured [`Limits`], and
//! discovers the schema files of an input path.

use crate::error::{Error, Result};
use crate::limits::Limits;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Fail unless `path` is an existing regular file
pub fn ensure_schema_file(path: &Path) -> Result<fs::Metadata> {
    let metadata = fs::metadata(path).map_err(|e| Error::io(path, e))?;
    if metadata.is_dir() {
        return Err(Error::NotAFile(path.to_path_buf()));
    }
    Ok(metadata)
}

/// Read a schema file as raw bytes; encoding detection is left to the reader
pub fn load_schema(path: &Path, limits: &Limits) -> Result<Vec<u8>> {
    let metadata = ensure_schema_file(path)?;
    limits.check_file_size(usize::try_from(metadata.len()).unwrap_or(usize::MAX))?;
    fs::read(path).map_err(|e| Error::io(path, e))
}

/// Key identifying a schema file across relative spellings of its path
pub fn canonical_path(path: &Path) -> Result<PathBuf> {
    fs::canonicalize(path).map_err(|e| Error::io(path, e))
}

/// Schema files of an input path: the path itself for a file, or every
/// regular file beneath a directory, recursively, in sorted order
pub fn collect_schema_files(path: &Path) -> Result<Vec<PathBuf>> {
    let metadata = fs::metadata(path).map_err(|e| Error::io(path, e))?;
    if !metadata.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let failed = e.path().unwrap_or(path).to_path_buf();
            let source = e
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::new(std::io::ErrorKind::Other, "filesystem loop"));
            Error::io(failed, source)
        })?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "<xs:schema/>").unwrap();

        let content = load_schema(file.path(), &Limits::default()).unwrap();
        assert!(String::from_utf8(content).unwrap().contains("<xs:schema/>"));
    }

    #[test]
    fn test_directory_is_not_a_file() {
        let dir = TempDir::new().unwrap();
        let err = load_schema(dir.path(), &Limits::default()).unwrap_err();
        assert!(matches!(err, Error::NotAFile(_)));
    }

    #[test]
    fn test_missing_file_carries_path() {
        let err = load_schema(Path::new("/no/such/schema.xsd"), &Limits::default()).unwrap_err();
        match err {
            Error::Io { path, .. } => assert_eq!(path, PathBuf::from("/no/such/schema.xsd")),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_size_limit() {
        let mut file = NamedTempFile::new().unwrap();
        let large_content = "x".repeat(11 * 1024 * 1024); // 11 MB
        write!(file, "{}", large_content).unwrap();

        // Strict limits (10 MB max) should reject 11MB file
        let result = load_schema(file.path(), &Limits::strict());
        assert!(matches!(result, Err(Error::LimitExceeded(_))));
    }

    #[test]
    fn test_collect_schema_files_sorted_and_recursive() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("b.xsd"), "<a/>").unwrap();
        fs::write(dir.path().join("a.xsd"), "<a/>").unwrap();
        fs::write(dir.path().join("sub").join("c.xsd"), "<a/>").unwrap();

        let files = collect_schema_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            names,
            vec![
                PathBuf::from("a.xsd"),
                PathBuf::from("b.xsd"),
                PathBuf::from("sub/c.xsd")
            ]
        );
    }

    #[test]
    fn test_collect_single_file() {
        let file = NamedTempFile::new().unwrap();
        let files = collect_schema_files(file.path()).unwrap();
        assert_eq!(files, vec![file.path().to_path_buf()]);
    }
}
