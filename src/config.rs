//! Configuration for a setup run
//!
//! Settings come from command-line flags, with environment variables as fallbacks
//! for the ones a user may want to pin across runs.
//!
//! # Environment Variables
//!
//! - `TAILWIND_SETUP_LOG_LEVEL`: Logging level - default: "info"
//! - `TAILWIND_SETUP_PACKAGE_MANAGER`: Force npm|yarn|pnpm|bun for the install task -
//!   default: detected from the project
//!
//! # Example
//!
//! ```no_run
//! use tailwind_setup::SetupConfig;
//!
//! let mut config = SetupConfig::default();
//! config.project_root = "/path/to/app".into();
//! config.validate().expect("Invalid configuration");
//! ```

use crate::package_manager::PackageManager;
use std::env;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

const DEFAULT_LOG_LEVEL: &str = "info";

pub const LOG_LEVEL_ENV: &str = "TAILWIND_SETUP_LOG_LEVEL";
pub const PACKAGE_MANAGER_ENV: &str = "TAILWIND_SETUP_PACKAGE_MANAGER";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Project root does not exist: {}", .0.display())]
    ProjectRootNotFound(PathBuf),

    #[error("Project root is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupConfig {
    /// Directory holding package.json
    pub project_root: PathBuf,

    /// Stage changes and report them without writing or installing
    pub dry_run: bool,

    /// Write files but leave the install task unexecuted
    pub skip_install: bool,

    /// Forced package manager; detected from the project when `None`
    pub package_manager: Option<PackageManager>,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for SetupConfig {
    /// Current directory as project root, everything else from the environment
    fn default() -> Self {
        let package_manager = env::var(PACKAGE_MANAGER_ENV).ok().and_then(|value| {
            value
                .parse::<PackageManager>()
                .map_err(|e| warn!("Ignoring {}: {}", PACKAGE_MANAGER_ENV, e))
                .ok()
        });

        let log_level = env::var(LOG_LEVEL_ENV)
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        Self {
            project_root: PathBuf::from("."),
            dry_run: false,
            skip_install: false,
            package_manager,
            log_level,
        }
    }
}

impl SetupConfig {
    /// Install tasks run only on a real, non-skipped run
    pub fn runs_install(&self) -> bool {
        !self.dry_run && !self.skip_install
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.project_root.exists() {
            return Err(ConfigError::ProjectRootNotFound(self.project_root.clone()));
        }
        if !self.project_root.is_dir() {
            return Err(ConfigError::NotADirectory(self.project_root.clone()));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }
}

impl fmt::Display for SetupConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Setup Configuration:")?;
        writeln!(f, "  Project Root: {}", self.project_root.display())?;
        writeln!(f, "  Dry Run: {}", self.dry_run)?;
        writeln!(f, "  Skip Install: {}", self.skip_install)?;
        match self.package_manager {
            Some(pm) => writeln!(f, "  Package Manager: {}", pm)?,
            None => writeln!(f, "  Package Manager: auto")?,
        }
        writeln!(f, "  Log Level: {}", self.log_level)?;
        Ok(())
    }
}
