//! Disk-backed file system anchored on a project root

use super::FileSystem;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct RealFileSystem {
    root: PathBuf,
}

impl RealFileSystem {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

impl FileSystem for RealFileSystem {
    fn is_file(&self, path: &Path) -> bool {
        self.resolve(path).is_file()
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        let full = self.resolve(path);
        fs::read_to_string(&full).with_context(|| format!("Failed to read {}", full.display()))
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        let full = self.resolve(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        fs::write(&full, content).with_context(|| format!("Failed to write {}", full.display()))
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        let full = self.resolve(path);
        fs::remove_file(&full).with_context(|| format!("Failed to remove {}", full.display()))
    }
}
