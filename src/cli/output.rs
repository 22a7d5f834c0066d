//! Run report and its output formats

use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::PathBuf;

use crate::package_manager::PackageManager;
use crate::task::ScheduledTask;
use crate::tree::{Action, ActionKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
    Human,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileChange {
    pub action: ActionKind,
    pub path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<usize>,
}

impl From<&Action> for FileChange {
    fn from(action: &Action) -> Self {
        Self {
            action: action.kind(),
            path: action.path().to_path_buf(),
            bytes: action.content().map(str::len),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Completed,
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskReport {
    pub name: String,
    pub status: TaskStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetupReport {
    pub project_root: PathBuf,
    pub dry_run: bool,
    pub package_manager: PackageManager,
    pub changes: Vec<FileChange>,
    pub tasks: Vec<TaskReport>,
}

impl SetupReport {
    pub fn new(
        project_root: PathBuf,
        dry_run: bool,
        package_manager: PackageManager,
        actions: &[Action],
    ) -> Self {
        Self {
            project_root,
            dry_run,
            package_manager,
            changes: actions.iter().map(FileChange::from).collect(),
            tasks: Vec::new(),
        }
    }

    pub fn record_tasks(&mut self, tasks: &[ScheduledTask], status: TaskStatus) {
        self.tasks.extend(tasks.iter().map(|t| TaskReport {
            name: t.task.name().to_string(),
            status,
        }));
    }
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self, report: &SetupReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(report)
                .context("Failed to serialize setup report to JSON"),
            OutputFormat::Yaml => {
                serde_yaml::to_string(report).context("Failed to serialize setup report to YAML")
            }
            OutputFormat::Human => Ok(self.format_human(report)),
        }
    }

    fn format_human(&self, report: &SetupReport) -> String {
        let mut out = String::new();

        for change in &report.changes {
            let _ = write!(out, "{} {}", change.action, change.path.display());
            if let Some(bytes) = change.bytes {
                let _ = write!(out, " ({} bytes)", bytes);
            }
            out.push('\n');
        }
        if report.changes.is_empty() {
            out.push_str("Nothing to do.\n");
        }

        for task in &report.tasks {
            let line = match task.status {
                TaskStatus::Completed => {
                    format!("Ran '{}' with {}", task.name, report.package_manager)
                }
                TaskStatus::Skipped => format!(
                    "Skipped '{}'; run `{} install` to install the new packages",
                    task.name, report.package_manager
                ),
            };
            out.push_str(&line);
            out.push('\n');
        }

        if report.dry_run {
            out.push_str("\nNOTE: The \"--dry-run\" option means no changes were made.\n");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{Task, TaskId};

    fn sample_report(dry_run: bool) -> SetupReport {
        let actions = vec![
            Action::Overwrite {
                path: PathBuf::from("package.json"),
                content: "{}".to_string(),
            },
            Action::Create {
                path: PathBuf::from(".postcssrc.json"),
                content: "{ }".to_string(),
            },
        ];
        let mut report = SetupReport::new(PathBuf::from("/app"), dry_run, PackageManager::Pnpm, &actions);
        report.record_tasks(
            &[ScheduledTask {
                id: TaskId(0),
                task: Task::NodePackage(Default::default()),
            }],
            TaskStatus::Skipped,
        );
        report
    }

    #[test]
    fn test_human_output() {
        let output = OutputFormatter::new(OutputFormat::Human)
            .format(&sample_report(false))
            .unwrap();

        assert!(output.contains("UPDATE package.json (2 bytes)"));
        assert!(output.contains("CREATE .postcssrc.json (3 bytes)"));
        assert!(output.contains("Skipped 'node-package'; run `pnpm install`"));
        assert!(!output.contains("--dry-run"));
    }

    #[test]
    fn test_human_output_dry_run_note() {
        let output = OutputFormatter::new(OutputFormat::Human)
            .format(&sample_report(true))
            .unwrap();
        assert!(output.contains("no changes were made"));
    }

    #[test]
    fn test_human_output_without_changes() {
        let report = SetupReport::new(PathBuf::from("/app"), false, PackageManager::Npm, &[]);
        let output = OutputFormatter::new(OutputFormat::Human).format(&report).unwrap();
        assert!(output.starts_with("Nothing to do."));
    }

    #[test]
    fn test_json_output() {
        let output = OutputFormatter::new(OutputFormat::Json)
            .format(&sample_report(false))
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["package_manager"], "pnpm");
        assert_eq!(value["changes"][0]["action"], "overwrite");
        assert_eq!(value["changes"][1]["path"], ".postcssrc.json");
        assert_eq!(value["tasks"][0]["name"], "node-package");
        assert_eq!(value["tasks"][0]["status"], "skipped");
    }

    #[test]
    fn test_yaml_output() {
        let output = OutputFormatter::new(OutputFormat::Yaml)
            .format(&sample_report(false))
            .unwrap();
        assert!(output.contains("dry_run: false"));
        assert!(output.contains("name: node-package"));
    }
}
