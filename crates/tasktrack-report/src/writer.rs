use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tasktrack_core::{Task, TaskError, TaskResult, TrackerConfig, User};

use crate::document::{render_task_overview, render_user_overview};
use crate::stats::{TaskOverview, UserOverview};

/// Both overview documents computed at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct Reports {
    pub task_overview: TaskOverview,
    pub user_overview: UserOverview,
    pub task_document: String,
    pub user_document: String,
}

impl Reports {
    pub fn compute(users: &[User], tasks: &[Task], today: NaiveDate) -> Self {
        let task_overview = TaskOverview::compute(tasks, today);
        let user_overview = UserOverview::compute(users, tasks, today);

        tracing::debug!(
            today = %today,
            total_tasks = task_overview.total_tasks,
            completed = task_overview.completed,
            incomplete = task_overview.incomplete,
            overdue = task_overview.overdue,
            incomplete_percentage = task_overview.incomplete_percentage,
            overdue_percentage = task_overview.overdue_percentage,
            total_users = user_overview.total_users,
            "Computed task statistics"
        );

        Self {
            task_document: render_task_overview(&task_overview),
            user_document: render_user_overview(&user_overview),
            task_overview,
            user_overview,
        }
    }
}

/// Writes and reads the two overview documents.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    task_overview_path: PathBuf,
    user_overview_path: PathBuf,
}

impl ReportWriter {
    pub fn new(
        task_overview_path: impl Into<PathBuf>,
        user_overview_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            task_overview_path: task_overview_path.into(),
            user_overview_path: user_overview_path.into(),
        }
    }

    pub fn from_config(config: &TrackerConfig) -> Self {
        Self::new(config.task_overview_path(), config.user_overview_path())
    }

    /// Compute both reports at `today` and overwrite both documents.
    pub fn generate(
        &self,
        users: &[User],
        tasks: &[Task],
        today: NaiveDate,
    ) -> TaskResult<Reports> {
        let reports = Reports::compute(users, tasks, today);

        write_document(&self.task_overview_path, &reports.task_document)?;
        write_document(&self.user_overview_path, &reports.user_document)?;

        tracing::info!(
            task_overview = ?self.task_overview_path,
            user_overview = ?self.user_overview_path,
            "Generated reports"
        );
        Ok(reports)
    }

    /// Generate both documents unless both already exist.
    ///
    /// Returns whether the documents were regenerated.
    pub fn generate_if_missing(
        &self,
        users: &[User],
        tasks: &[Task],
        today: NaiveDate,
    ) -> TaskResult<bool> {
        if self.task_overview_path.exists() && self.user_overview_path.exists() {
            tracing::debug!("Reports already present");
            return Ok(false);
        }

        self.generate(users, tasks, today)?;
        Ok(true)
    }

    /// Raw contents of the task and user overview documents.
    pub fn read(&self) -> TaskResult<(String, String)> {
        Ok((
            read_document(&self.task_overview_path)?,
            read_document(&self.user_overview_path)?,
        ))
    }

    pub fn task_overview_path(&self) -> &Path {
        &self.task_overview_path
    }

    pub fn user_overview_path(&self) -> &Path {
        &self.user_overview_path
    }
}

fn write_document(path: &Path, contents: &str) -> TaskResult<()> {
    fs::write(path, contents).map_err(|e| {
        tracing::error!(path = ?path, error = %e, "Failed to write report");
        TaskError::io(path, e)
    })
}

fn read_document(path: &Path) -> TaskResult<String> {
    fs::read_to_string(path).map_err(|e| {
        tracing::warn!(path = ?path, error = %e, "Failed to read report");
        TaskError::io(path, e)
    })
}
