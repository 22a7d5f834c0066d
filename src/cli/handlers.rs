use anyhow::{Context, Result};
use tracing::{debug, error, info};

use super::commands::CliArgs;
use super::output::{OutputFormatter, SetupReport, TaskStatus};
use crate::config::SetupConfig;
use crate::fs::RealFileSystem;
use crate::manifest::{PackageManifest, MANIFEST_PATH};
use crate::package_manager::PackageManager;
use crate::rule::{Rule, TailwindSetup};
use crate::task::{SetupContext, TaskExecutor};
use crate::tree::Tree;

pub async fn handle_setup(args: &CliArgs) -> i32 {
    let config = build_config(args);
    debug!("{}", config);

    let report = match run_setup(&config, args.quiet).await {
        Ok(report) => report,
        Err(e) => {
            error!("Setup failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            return 1;
        }
    };

    let formatter = OutputFormatter::new(args.format.into());
    match formatter.format(&report) {
        Ok(output) => {
            print!("{}", output);
            0
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

/// Overlays command-line flags on the environment-derived defaults
pub fn build_config(args: &CliArgs) -> SetupConfig {
    let mut config = SetupConfig::default();

    if let Some(path) = &args.project_path {
        config.project_root = path.clone();
    }
    config.dry_run = args.dry_run;
    config.skip_install = args.skip_install;
    if let Some(pm) = args.package_manager {
        config.package_manager = Some(pm.into());
    }
    if let Some(level) = &args.log_level {
        config.log_level = level.to_lowercase();
    }

    config
}

/// Runs the Tailwind rule against the project, commits unless dry-running,
/// then executes or skips the scheduled install.
pub async fn run_setup(config: &SetupConfig, quiet: bool) -> Result<SetupReport> {
    config.validate()?;
    let root = &config.project_root;

    let mut rule = TailwindSetup::new().with_quiet_install(quiet);
    if let Some(pm) = config.package_manager {
        rule = rule.with_package_manager(pm);
    }
    info!("Applying {} in {}", rule.name(), root.display());

    let mut tree = Tree::new(RealFileSystem::new(root));
    let mut context = SetupContext::new();
    rule.apply(&mut tree, &mut context)
        .with_context(|| format!("Failed to set up Tailwind CSS in {}", root.display()))?;

    let package_manager = config
        .package_manager
        .unwrap_or_else(|| detect_package_manager(&tree));
    debug!("Using package manager: {}", package_manager);

    let actions = if config.dry_run {
        tree.actions().to_vec()
    } else {
        tree.commit()
            .with_context(|| format!("Failed to write changes to {}", root.display()))?
    };

    let mut report = SetupReport::new(root.clone(), config.dry_run, package_manager, &actions);

    if config.runs_install() {
        TaskExecutor::new(root, package_manager)
            .execute_all(context.tasks())
            .await?;
        report.record_tasks(context.tasks(), TaskStatus::Completed);
    } else {
        info!("Skipping {} scheduled task(s)", context.tasks().len());
        report.record_tasks(context.tasks(), TaskStatus::Skipped);
    }

    Ok(report)
}

fn detect_package_manager(tree: &Tree<RealFileSystem>) -> PackageManager {
    let manifest = tree
        .read(MANIFEST_PATH)
        .ok()
        .flatten()
        .and_then(|content| PackageManifest::parse(&content).ok());
    let field = manifest.as_ref().and_then(PackageManifest::package_manager);
    PackageManager::detect(tree.file_system(), field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SetupError;
    use clap::Parser;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    fn create_app(dir: &TempDir) {
        fs::write(
            dir.path().join("package.json"),
            r#"{"name": "TestApp", "version": "0.0.0", "dependencies": {}}"#,
        )
        .unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/styles.css"), "body : {margin : 0}").unwrap();
    }

    fn config_for(dir: &TempDir, dry_run: bool) -> SetupConfig {
        SetupConfig {
            project_root: dir.path().to_path_buf(),
            dry_run,
            skip_install: true,
            package_manager: None,
            log_level: "info".to_string(),
        }
    }

    #[test]
    #[serial]
    fn test_build_config_overlays_flags() {
        let args = CliArgs::parse_from([
            "tailwind-setup",
            "/tmp/app",
            "--dry-run",
            "--package-manager",
            "bun",
            "--log-level",
            "DEBUG",
        ]);
        let config = build_config(&args);

        assert_eq!(config.project_root, std::path::PathBuf::from("/tmp/app"));
        assert!(config.dry_run);
        assert_eq!(config.package_manager, Some(PackageManager::Bun));
        assert_eq!(config.log_level, "debug");
    }

    #[tokio::test]
    async fn test_run_setup_writes_files() {
        let dir = TempDir::new().unwrap();
        create_app(&dir);

        let report = run_setup(&config_for(&dir, false), true).await.unwrap();

        assert_eq!(report.changes.len(), 4);
        assert_eq!(report.tasks[0].status, TaskStatus::Skipped);
        assert!(dir.path().join(".postcssrc.json").is_file());
        assert!(dir.path().join("tailwind.config.js").is_file());
        let css = fs::read_to_string(dir.path().join("src/styles.css")).unwrap();
        assert!(css.starts_with("@import \"tailwindcss\""));
    }

    #[tokio::test]
    async fn test_dry_run_leaves_disk_untouched() {
        let dir = TempDir::new().unwrap();
        create_app(&dir);

        let report = run_setup(&config_for(&dir, true), true).await.unwrap();

        assert!(report.dry_run);
        assert_eq!(report.changes.len(), 4);
        assert!(!dir.path().join(".postcssrc.json").exists());
        assert_eq!(
            fs::read_to_string(dir.path().join("src/styles.css")).unwrap(),
            "body : {margin : 0}"
        );
    }

    #[tokio::test]
    async fn test_package_manager_detected_from_lock_file() {
        let dir = TempDir::new().unwrap();
        create_app(&dir);
        fs::write(dir.path().join("yarn.lock"), "").unwrap();

        let report = run_setup(&config_for(&dir, true), true).await.unwrap();
        assert_eq!(report.package_manager, PackageManager::Yarn);
    }

    #[tokio::test]
    async fn test_missing_manifest_surfaces_setup_error() {
        let dir = TempDir::new().unwrap();

        let err = run_setup(&config_for(&dir, false), true).await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<SetupError>(),
            Some(SetupError::MissingManifest)
        ));
        assert!(format!("{:#}", err).contains("No package.json"));
        assert!(!dir.path().join(".postcssrc.json").exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    #[serial]
    async fn test_install_task_runs_after_commit() {
        let dir = TempDir::new().unwrap();
        create_app(&dir);
        let _npm = crate::task::test_support::StubProgram::install("npm", 0);
        let config = SetupConfig {
            skip_install: false,
            package_manager: Some(PackageManager::Npm),
            ..config_for(&dir, false)
        };

        let report = run_setup(&config, true).await.unwrap();

        assert_eq!(report.package_manager, PackageManager::Npm);
        assert_eq!(report.tasks.len(), 1);
        assert_eq!(report.tasks[0].status, TaskStatus::Completed);
        assert!(dir.path().join("tailwind.config.js").is_file());
    }

    #[cfg(unix)]
    #[tokio::test]
    #[serial]
    async fn test_failed_install_fails_setup_after_commit() {
        let dir = TempDir::new().unwrap();
        create_app(&dir);
        let _npm = crate::task::test_support::StubProgram::install("npm", 1);
        let config = SetupConfig {
            skip_install: false,
            package_manager: Some(PackageManager::Npm),
            ..config_for(&dir, false)
        };

        let err = run_setup(&config, true).await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<SetupError>(),
            Some(SetupError::TaskFailed { .. })
        ));
        assert!(dir.path().join(".postcssrc.json").is_file());
    }
}
