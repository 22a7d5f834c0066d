//! FileSystem trait definition

use anyhow::Result;
use std::path::Path;

/// Abstraction over the project directory so rules can run without touching disk.
///
/// Paths are relative to the project root the implementation is anchored on.
pub trait FileSystem: Send + Sync {
    /// Check if path is a regular file
    fn is_file(&self, path: &Path) -> bool;

    /// Read file contents as string
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Write file contents, creating parent directories as needed
    fn write(&self, path: &Path, content: &str) -> Result<()>;

    /// Remove a file
    fn remove_file(&self, path: &Path) -> Result<()>;
}

impl<F: FileSystem + ?Sized> FileSystem for &F {
    fn is_file(&self, path: &Path) -> bool {
        (**self).is_file(path)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        (**self).read_to_string(path)
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        (**self).write(path, content)
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        (**self).remove_file(path)
    }
}
