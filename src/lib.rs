//! tailwind-setup - wires Tailwind CSS into an existing web application project
//!
//! The work is done by a [`Rule`]: a synchronous transformation of a staged
//! [`Tree`] that may also enqueue deferred tasks. [`TailwindSetup`] adds the
//! `tailwindcss` and `postcss` dependencies to `package.json`, creates
//! `.postcssrc.json` and `tailwind.config.js` when they are missing, prepends the
//! Tailwind import to `src/styles.css` and schedules a package install.
//!
//! # Example
//!
//! ```
//! use tailwind_setup::fs::MockFileSystem;
//! use tailwind_setup::task::NODE_PACKAGE_TASK;
//! use tailwind_setup::{Rule, SetupContext, TailwindSetup, Tree};
//!
//! let fs = MockFileSystem::new();
//! fs.add_file("package.json", r#"{"name": "app"}"#);
//!
//! let mut tree = Tree::new(&fs);
//! let mut context = SetupContext::new();
//! TailwindSetup::new().apply(&mut tree, &mut context).unwrap();
//!
//! assert!(tree.exists("tailwind.config.js"));
//! assert!(context.find_task(NODE_PACKAGE_TASK).is_some());
//!
//! // Nothing is written until the host commits
//! assert!(fs.get("tailwind.config.js").is_none());
//! tree.commit().unwrap();
//! assert!(fs.get("tailwind.config.js").is_some());
//! ```
//!
//! # Project Structure
//!
//! - [`fs`]: file system abstraction with disk and in-memory implementations
//! - [`tree`]: staged mutations committed in one pass
//! - [`rule`]: the `Rule` trait and the Tailwind setup rule
//! - [`task`]: deferred tasks and the host-side executor
//! - [`cli`]: argument parsing, run handler and report formatting

pub mod cli;
pub mod config;
pub mod error;
pub mod fs;
pub mod manifest;
pub mod package_manager;
pub mod rule;
pub mod task;
pub mod tree;
pub mod util;

pub use config::{ConfigError, SetupConfig};
pub use error::SetupError;
pub use manifest::PackageManifest;
pub use package_manager::PackageManager;
pub use rule::{Rule, TailwindSetup};
pub use task::{SetupContext, Task, TaskExecutor, TaskScheduler};
pub use tree::{Action, Tree};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
