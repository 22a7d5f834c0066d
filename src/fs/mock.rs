//! In-memory file system for tests

use super::FileSystem;
use crate::tree::normalize_path;
use anyhow::{anyhow, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Keys are stored normalized, so `/package.json` and `package.json` are one file.
#[derive(Debug, Default)]
pub struct MockFileSystem {
    files: Mutex<BTreeMap<PathBuf, String>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: &str) {
        self.lock().insert(normalize_path(path), content.to_string());
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<String> {
        self.lock().get(&normalize_path(path)).cloned()
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        self.lock().keys().cloned().collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<PathBuf, String>> {
        self.files.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl FileSystem for MockFileSystem {
    fn is_file(&self, path: &Path) -> bool {
        self.lock().contains_key(&normalize_path(path))
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.get(path)
            .ok_or_else(|| anyhow!("File not found: {}", path.display()))
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        self.add_file(path, content);
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        self.lock()
            .remove(&normalize_path(path))
            .map(|_| ())
            .ok_or_else(|| anyhow!("File not found: {}", path.display()))
    }
}
