//! Wires Tailwind CSS v4 and PostCSS into a project

use super::Rule;
use crate::error::SetupError;
use crate::fs::FileSystem;
use crate::manifest::{PackageManifest, MANIFEST_PATH};
use crate::package_manager::PackageManager;
use crate::task::{NodePackageInstallOptions, Task, TaskScheduler};
use crate::tree::Tree;
use tracing::{debug, info};

pub const TAILWINDCSS_VERSION: &str = "^4.1.4";
pub const POSTCSS_VERSION: &str = "^8.5.3";

pub const POSTCSS_CONFIG_PATH: &str = ".postcssrc.json";
pub const TAILWIND_CONFIG_PATH: &str = "tailwind.config.js";
pub const STYLESHEET_PATH: &str = "src/styles.css";

pub const TAILWIND_IMPORT: &str = "@import \"tailwindcss\"";

const POSTCSS_CONFIG: &str = include_str!("templates/postcssrc.json");
const TAILWIND_CONFIG: &str = include_str!("templates/tailwind.config.js");

#[derive(Debug, Clone, Default)]
pub struct TailwindSetup {
    package_manager: Option<PackageManager>,
    quiet_install: bool,
}

impl TailwindSetup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forces the manager used by the scheduled install task
    pub fn with_package_manager(mut self, package_manager: PackageManager) -> Self {
        self.package_manager = Some(package_manager);
        self
    }

    pub fn with_quiet_install(mut self, quiet: bool) -> Self {
        self.quiet_install = quiet;
        self
    }

    fn add_dependencies<F: FileSystem>(&self, tree: &mut Tree<F>) -> Result<(), SetupError> {
        let content = tree
            .read(MANIFEST_PATH)?
            .filter(|c| !c.is_empty())
            .ok_or(SetupError::MissingManifest)?;

        let mut manifest = PackageManifest::parse(&content)?;
        manifest.add_dependency("tailwindcss", TAILWINDCSS_VERSION)?;
        manifest.add_dependency("postcss", POSTCSS_VERSION)?;
        tree.overwrite(MANIFEST_PATH, manifest.to_json_string()?)?;

        info!(
            "Added tailwindcss@{} and postcss@{} to {}",
            TAILWINDCSS_VERSION, POSTCSS_VERSION, MANIFEST_PATH
        );
        Ok(())
    }

    fn create_config<F: FileSystem>(
        &self,
        tree: &mut Tree<F>,
        path: &str,
        content: &str,
    ) -> Result<(), SetupError> {
        if tree.exists(path) {
            debug!("{} already exists, leaving it untouched", path);
            return Ok(());
        }
        tree.create(path, content)?;
        info!("Created {}", path);
        Ok(())
    }

    fn import_into_stylesheet<F: FileSystem>(&self, tree: &mut Tree<F>) -> Result<(), SetupError> {
        let Some(content) = tree.read(STYLESHEET_PATH)? else {
            debug!("{} not found, skipping stylesheet import", STYLESHEET_PATH);
            return Ok(());
        };
        tree.overwrite(STYLESHEET_PATH, format!("{}\n{}", TAILWIND_IMPORT, content))?;
        info!("Prepended Tailwind import to {}", STYLESHEET_PATH);
        Ok(())
    }
}

impl Rule for TailwindSetup {
    fn name(&self) -> &'static str {
        "tailwindcss-setup"
    }

    fn apply<F: FileSystem>(
        &self,
        tree: &mut Tree<F>,
        scheduler: &mut dyn TaskScheduler,
    ) -> Result<(), SetupError> {
        // Manifest first: a missing package.json must abort before anything is staged
        self.add_dependencies(tree)?;
        self.create_config(tree, POSTCSS_CONFIG_PATH, POSTCSS_CONFIG)?;
        self.create_config(tree, TAILWIND_CONFIG_PATH, TAILWIND_CONFIG)?;
        self.import_into_stylesheet(tree)?;

        scheduler.add_task(Task::NodePackage(NodePackageInstallOptions {
            package_manager: self.package_manager,
            working_directory: None,
            quiet: self.quiet_install,
        }));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;
    use crate::task::{SetupContext, NODE_PACKAGE_TASK};

    fn run(fs: &MockFileSystem) -> Result<(Tree<&MockFileSystem>, SetupContext), SetupError> {
        let mut tree = Tree::new(fs);
        let mut context = SetupContext::new();
        TailwindSetup::new().apply(&mut tree, &mut context)?;
        Ok((tree, context))
    }

    #[test]
    fn test_rule_name() {
        assert_eq!(TailwindSetup::new().name(), "tailwindcss-setup");
    }

    #[test]
    fn test_templates_carry_expected_markers() {
        assert!(POSTCSS_CONFIG.contains("\"@tailwindcss/postcss\""));
        assert!(TAILWIND_CONFIG.contains("'./src/**/*.{html,ts}'"));
    }

    #[test]
    fn test_empty_manifest_counts_as_missing() {
        let fs = MockFileSystem::new();
        fs.add_file("package.json", "");

        let err = run(&fs).unwrap_err();
        assert!(matches!(err, SetupError::MissingManifest));
    }

    #[test]
    fn test_invalid_manifest_stops_before_configs() {
        let fs = MockFileSystem::new();
        fs.add_file("package.json", "not json");

        let mut tree = Tree::new(&fs);
        let mut context = SetupContext::new();
        let err = TailwindSetup::new()
            .apply(&mut tree, &mut context)
            .unwrap_err();

        assert!(matches!(err, SetupError::InvalidManifest(_)));
        assert!(!tree.has_changes());
        assert!(context.tasks().is_empty());
    }

    #[test]
    fn test_stylesheet_import_is_separated_by_newline() {
        let fs = MockFileSystem::new();
        fs.add_file("package.json", "{}");
        fs.add_file("src/styles.css", "body : {margin : 0}");

        let (tree, _) = run(&fs).unwrap();
        assert_eq!(
            tree.read(STYLESHEET_PATH).unwrap().as_deref(),
            Some("@import \"tailwindcss\"\nbody : {margin : 0}")
        );
    }

    #[test]
    fn test_empty_stylesheet_still_gets_import() {
        let fs = MockFileSystem::new();
        fs.add_file("package.json", "{}");
        fs.add_file("src/styles.css", "");

        let (tree, _) = run(&fs).unwrap();
        assert_eq!(
            tree.read(STYLESHEET_PATH).unwrap().as_deref(),
            Some("@import \"tailwindcss\"\n")
        );
    }

    #[test]
    fn test_missing_stylesheet_is_skipped() {
        let fs = MockFileSystem::new();
        fs.add_file("package.json", "{}");

        let (tree, _) = run(&fs).unwrap();
        assert!(!tree.exists(STYLESHEET_PATH));
        assert_eq!(tree.actions().len(), 3);
    }

    #[test]
    fn test_install_task_carries_options() {
        let fs = MockFileSystem::new();
        fs.add_file("package.json", "{}");

        let mut tree = Tree::new(&fs);
        let mut context = SetupContext::new();
        TailwindSetup::new()
            .with_package_manager(PackageManager::Yarn)
            .with_quiet_install(true)
            .apply(&mut tree, &mut context)
            .unwrap();

        let scheduled = context.find_task(NODE_PACKAGE_TASK).unwrap();
        assert_eq!(
            scheduled.task,
            Task::NodePackage(NodePackageInstallOptions {
                package_manager: Some(PackageManager::Yarn),
                working_directory: None,
                quiet: true,
            })
        );
    }
}
