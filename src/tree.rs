//! Staged view of a project directory
//!
//! Rules never write to disk directly. Every mutation is recorded as an [`Action`]
//! on a [`Tree`], which shadows the backing [`FileSystem`] until [`Tree::commit`]
//! applies the staged actions in the order they were first made. Skipping the
//! commit gives a dry run for free.
//!
//! # Example
//!
//! ```
//! use tailwind_setup::fs::MockFileSystem;
//! use tailwind_setup::tree::Tree;
//!
//! let fs = MockFileSystem::new();
//! let mut tree = Tree::new(&fs);
//! tree.create("tailwind.config.js", "export default {}").unwrap();
//!
//! assert!(tree.exists("tailwind.config.js"));
//! assert!(fs.get("tailwind.config.js").is_none());
//!
//! tree.commit().unwrap();
//! assert!(fs.get("tailwind.config.js").is_some());
//! ```

use crate::error::SetupError;
use crate::fs::FileSystem;
use serde::Serialize;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};

/// Kind of staged mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Create,
    Overwrite,
    Delete,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ActionKind::Create => "CREATE",
            ActionKind::Overwrite => "UPDATE",
            ActionKind::Delete => "DELETE",
        };
        f.write_str(label)
    }
}

/// A single staged mutation of one path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Create { path: PathBuf, content: String },
    Overwrite { path: PathBuf, content: String },
    Delete { path: PathBuf },
}

impl Action {
    pub fn path(&self) -> &Path {
        match self {
            Action::Create { path, .. } | Action::Overwrite { path, .. } | Action::Delete { path } => {
                path
            }
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Create { .. } => ActionKind::Create,
            Action::Overwrite { .. } => ActionKind::Overwrite,
            Action::Delete { .. } => ActionKind::Delete,
        }
    }

    pub fn content(&self) -> Option<&str> {
        match self {
            Action::Create { content, .. } | Action::Overwrite { content, .. } => Some(content),
            Action::Delete { .. } => None,
        }
    }
}

/// Normalizes a tree path: `/package.json`, `./package.json` and `package.json`
/// all address the same entry.
///
/// `..` is resolved lexically and never climbs above the tree root.
pub fn normalize_path(path: impl AsRef<Path>) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.as_ref().components() {
        match component {
            Component::Normal(part) => normalized.push(part),
            Component::ParentDir => {
                normalized.pop();
            }
            Component::RootDir | Component::CurDir | Component::Prefix(_) => {}
        }
    }
    normalized
}

#[derive(Debug)]
pub struct Tree<F: FileSystem> {
    fs: F,
    staged: Vec<Action>,
}

impl<F: FileSystem> Tree<F> {
    pub fn new(fs: F) -> Self {
        Self {
            fs,
            staged: Vec::new(),
        }
    }

    pub fn file_system(&self) -> &F {
        &self.fs
    }

    fn staged_index(&self, path: &Path) -> Option<usize> {
        self.staged.iter().position(|a| a.path() == path)
    }

    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        let path = normalize_path(path);
        match self.staged_index(&path) {
            Some(i) => !matches!(self.staged[i], Action::Delete { .. }),
            None => self.fs.is_file(&path),
        }
    }

    /// Returns the current content of `path`, or `None` if the file does not exist.
    pub fn read(&self, path: impl AsRef<Path>) -> Result<Option<String>, SetupError> {
        let path = normalize_path(path);
        if let Some(i) = self.staged_index(&path) {
            return Ok(self.staged[i].content().map(str::to_string));
        }
        if !self.fs.is_file(&path) {
            return Ok(None);
        }
        self.fs
            .read_to_string(&path)
            .map(Some)
            .map_err(|e| SetupError::io(&path, e))
    }

    pub fn create(&mut self, path: impl AsRef<Path>, content: impl Into<String>) -> Result<(), SetupError> {
        let path = normalize_path(path);
        if self.exists(&path) {
            return Err(SetupError::FileAlreadyExists(path));
        }
        let content = content.into();
        match self.staged_index(&path) {
            // Re-creating a file deleted earlier in this run
            Some(i) => {
                self.staged[i] = if self.fs.is_file(&path) {
                    Action::Overwrite { path, content }
                } else {
                    Action::Create { path, content }
                };
            }
            None => self.staged.push(Action::Create { path, content }),
        }
        Ok(())
    }

    pub fn overwrite(&mut self, path: impl AsRef<Path>, content: impl Into<String>) -> Result<(), SetupError> {
        let path = normalize_path(path);
        if !self.exists(&path) {
            return Err(SetupError::FileDoesNotExist(path));
        }
        let content = content.into();
        match self.staged_index(&path) {
            Some(i) => {
                if let Action::Create { content: staged, .. } | Action::Overwrite { content: staged, .. } =
                    &mut self.staged[i]
                {
                    *staged = content;
                }
            }
            None => self.staged.push(Action::Overwrite { path, content }),
        }
        Ok(())
    }

    pub fn delete(&mut self, path: impl AsRef<Path>) -> Result<(), SetupError> {
        let path = normalize_path(path);
        if !self.exists(&path) {
            return Err(SetupError::FileDoesNotExist(path));
        }
        match self.staged_index(&path) {
            Some(i) => {
                if matches!(self.staged[i], Action::Create { .. }) && !self.fs.is_file(&path) {
                    self.staged.remove(i);
                } else {
                    self.staged[i] = Action::Delete { path };
                }
            }
            None => self.staged.push(Action::Delete { path }),
        }
        Ok(())
    }

    /// Staged actions in first-touch order
    pub fn actions(&self) -> &[Action] {
        &self.staged
    }

    pub fn touched_files(&self) -> Vec<&Path> {
        self.staged.iter().map(Action::path).collect()
    }

    pub fn has_changes(&self) -> bool {
        !self.staged.is_empty()
    }

    /// Applies every staged action to the backing file system and returns them.
    ///
    /// Actions applied before a failure stay applied.
    pub fn commit(&mut self) -> Result<Vec<Action>, SetupError> {
        let actions = std::mem::take(&mut self.staged);
        for action in &actions {
            match action {
                Action::Create { path, content } | Action::Overwrite { path, content } => {
                    self.fs
                        .write(path, content)
                        .map_err(|e| SetupError::io(path, e))?;
                }
                Action::Delete { path } => {
                    self.fs
                        .remove_file(path)
                        .map_err(|e| SetupError::io(path, e))?;
                }
            }
            info!("{} {}", action.kind(), action.path().display());
        }
        debug!("Committed {} action(s)", actions.len());
        Ok(actions)
    }
}
