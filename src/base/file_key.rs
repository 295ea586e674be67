//! Logical file identity.

use std::path::Path;
use std::sync::Arc;

/// Identity of one component file.
///
/// Keys are opaque strings, usually absolute paths. Virtual documents and
/// unsaved buffers use whatever identity the host assigns them; nothing in
/// this crate requires the key to name a real file.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileKey(Arc<str>);

impl FileKey {
    /// Create a new file key.
    pub fn new(key: impl Into<Arc<str>>) -> Self {
        Self(key.into())
    }

    /// Get the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// View the key as a filesystem path.
    pub fn as_path(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl std::fmt::Display for FileKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for FileKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for FileKey {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&Path> for FileKey {
    fn from(p: &Path) -> Self {
        Self::new(p.to_string_lossy().into_owned())
    }
}
