//! Rules: synchronous transformations of a staged [`Tree`]

pub mod tailwind;

use crate::error::SetupError;
use crate::fs::FileSystem;
use crate::task::TaskScheduler;
use crate::tree::Tree;

pub use tailwind::TailwindSetup;

pub trait Rule {
    fn name(&self) -> &'static str;

    /// Mutates `tree` in place and may enqueue deferred work on `scheduler`.
    ///
    /// Nothing reaches the backing file system until the caller commits the tree.
    fn apply<F: FileSystem>(
        &self,
        tree: &mut Tree<F>,
        scheduler: &mut dyn TaskScheduler,
    ) -> Result<(), SetupError>;
}
