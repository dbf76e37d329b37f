//! Schema location resolution
//!
//! `schemaLocation` values on `import`/`include` are either remote URLs,
//! which are never fetched, or paths relative to the declaring file.

use std::path::{Path, PathBuf};
use url::Url;

/// Schema location as written in an `import`, `include` or `redefine`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// Local path, relative to the declaring schema's directory
    Path(PathBuf),
    /// Well-formed absolute URL (http, https, ftp, ...)
    Url(Url),
}

impl Location {
    /// Classify a `schemaLocation` string
    pub fn parse(s: &str) -> Self {
        match Url::parse(s) {
            Ok(url) if is_remote(&url) => Location::Url(url),
            _ => Location::Path(PathBuf::from(s)),
        }
    }

    /// Check if this is a remote location (URL)
    pub fn is_remote(&self) -> bool {
        matches!(self, Location::Url(_))
    }

    /// Resolve a local location against the directory of the declaring file.
    /// Remote locations have no file-system counterpart.
    pub fn resolve(&self, base_dir: &Path) -> Option<PathBuf> {
        match self {
            Location::Path(p) => Some(base_dir.join(p)),
            Location::Url(_) => None,
        }
    }
}

fn is_remote(url: &Url) -> bool {
    url.scheme() != "file" && url.host_str().map_or(false, |h| !h.is_empty())
}
