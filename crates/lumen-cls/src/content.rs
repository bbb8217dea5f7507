use std::io;
use std::path::Path;

/// Backing-content accessor for compiled files.
///
/// The trait is intentionally small so it can be implemented for different
/// backends (local FS, archives, in-memory fixtures).
pub trait ContentSource: Send + Sync {
    /// Reads the file contents as raw bytes.
    fn read_bytes(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// Local OS file system implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalContent;

impl ContentSource for LocalContent {
    fn read_bytes(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }
}
