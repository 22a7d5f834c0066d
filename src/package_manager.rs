//! Node package manager selection

use crate::fs::FileSystem;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    #[default]
    Npm,
    Yarn,
    Pnpm,
    Bun,
}

/// Lock files checked in priority order when the manifest does not pin a manager
const LOCK_FILES: &[(&str, PackageManager)] = &[
    ("pnpm-lock.yaml", PackageManager::Pnpm),
    ("yarn.lock", PackageManager::Yarn),
    ("bun.lockb", PackageManager::Bun),
    ("bun.lock", PackageManager::Bun),
    ("package-lock.json", PackageManager::Npm),
];

impl PackageManager {
    pub fn name(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Bun => "bun",
        }
    }

    /// Executable to spawn
    pub fn program(&self) -> &'static str {
        self.name()
    }

    pub fn install_args(&self, quiet: bool) -> Vec<&'static str> {
        let mut args = vec!["install"];
        // all four accept --silent for install
        if quiet {
            args.push("--silent");
        }
        args
    }

    /// Parses a `packageManager` manifest field such as `yarn@4.1.0`
    pub fn from_manifest_field(field: &str) -> Option<Self> {
        let name = field.split('@').next()?.trim();
        name.parse().ok()
    }

    /// Picks the manager for a project: the manifest's `packageManager` field wins,
    /// then the first lock file found, then npm.
    pub fn detect<F: FileSystem>(fs: &F, manifest_field: Option<&str>) -> Self {
        if let Some(pm) = manifest_field.and_then(Self::from_manifest_field) {
            return pm;
        }

        LOCK_FILES
            .iter()
            .find(|(file, _)| fs.is_file(Path::new(file)))
            .map(|(_, pm)| *pm)
            .unwrap_or_default()
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PackageManager {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "npm" => Ok(PackageManager::Npm),
            "yarn" => Ok(PackageManager::Yarn),
            "pnpm" => Ok(PackageManager::Pnpm),
            "bun" => Ok(PackageManager::Bun),
            other => Err(format!(
                "Invalid package manager: {}. Valid options: npm, yarn, pnpm, bun",
                other
            )),
        }
    }
}
