//! Deferred tasks requested by rules and run by the host after commit

use crate::error::SetupError;
use crate::package_manager::PackageManager;
use serde::Serialize;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

pub const NODE_PACKAGE_TASK: &str = "node-package";

/// Options for installing the manifest's dependencies
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct NodePackageInstallOptions {
    /// Forces a manager; the host picks one when `None`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_manager: Option<PackageManager>,

    /// Relative to the project root
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_directory: Option<PathBuf>,

    pub quiet: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "name", rename_all = "kebab-case")]
pub enum Task {
    NodePackage(NodePackageInstallOptions),
}

impl Task {
    pub fn name(&self) -> &'static str {
        match self {
            Task::NodePackage(_) => NODE_PACKAGE_TASK,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TaskId(pub usize);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduledTask {
    pub id: TaskId,
    pub task: Task,
}

/// Where rules enqueue work that must wait until the tree is committed
pub trait TaskScheduler {
    fn add_task(&mut self, task: Task) -> TaskId;
}

/// Per-invocation context handed to rules
#[derive(Debug, Default)]
pub struct SetupContext {
    tasks: Vec<ScheduledTask>,
}

impl SetupContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &[ScheduledTask] {
        &self.tasks
    }

    pub fn find_task(&self, name: &str) -> Option<&ScheduledTask> {
        self.tasks.iter().find(|t| t.task.name() == name)
    }
}

impl TaskScheduler for SetupContext {
    fn add_task(&mut self, task: Task) -> TaskId {
        let id = TaskId(self.tasks.len());
        debug!("Scheduled task '{}' as #{}", task.name(), id.0);
        self.tasks.push(ScheduledTask { id, task });
        id
    }
}

/// Runs scheduled tasks against a project on disk
pub struct TaskExecutor {
    project_root: PathBuf,
    package_manager: PackageManager,
}

impl TaskExecutor {
    /// `package_manager` is used for install tasks that do not force one
    pub fn new(project_root: impl Into<PathBuf>, package_manager: PackageManager) -> Self {
        Self {
            project_root: project_root.into(),
            package_manager,
        }
    }

    pub async fn execute_all(&self, tasks: &[ScheduledTask]) -> Result<(), SetupError> {
        for scheduled in tasks {
            self.execute(scheduled).await?;
        }
        Ok(())
    }

    pub async fn execute(&self, scheduled: &ScheduledTask) -> Result<(), SetupError> {
        match &scheduled.task {
            Task::NodePackage(options) => self.install_packages(options).await,
        }
    }

    async fn install_packages(&self, options: &NodePackageInstallOptions) -> Result<(), SetupError> {
        let package_manager = options.package_manager.unwrap_or(self.package_manager);
        let working_dir = match &options.working_directory {
            Some(dir) => self.project_root.join(dir),
            None => self.project_root.clone(),
        };
        let args = package_manager.install_args(options.quiet);

        info!(
            "Installing packages with {} in {}",
            package_manager,
            working_dir.display()
        );

        let stdout = if options.quiet {
            Stdio::null()
        } else {
            Stdio::inherit()
        };

        let status = Command::new(package_manager.program())
            .args(&args)
            .current_dir(&working_dir)
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| SetupError::TaskFailed {
                name: NODE_PACKAGE_TASK.to_string(),
                reason: format!("could not spawn '{}': {}", package_manager.program(), e),
            })?;

        if !status.success() {
            return Err(SetupError::TaskFailed {
                name: NODE_PACKAGE_TASK.to_string(),
                reason: format!("'{} {}' exited with {}", package_manager, args.join(" "), status),
            });
        }

        info!("Packages installed successfully");
        Ok(())
    }
}
