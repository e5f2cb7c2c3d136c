//! # tasktrack
//!
//! A single-session task tracker that keeps users and tasks in flat,
//! semicolon-delimited text files.
//!
//! ## Core Components
//!
//! - **[TaskManager]**: the session facade used by the CLI shell
//! - **[UserStore], [TaskStore]**: file-backed collections
//! - **[ReportWriter]**: task and user overview documents
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tasktrack_workspace::{TaskManager, TrackerConfig};
//!
//! let mut manager = TaskManager::open(TrackerConfig::in_dir("./data"))?;
//! assert!(manager.login("admin", "password"));
//!
//! let ordinal = manager.add_task("admin", "Title", "Desc", "2099-01-01")?;
//! manager.mark_complete(ordinal)?;
//!
//! manager.generate_reports()?;
//! let (task_overview, user_overview) = manager.display_reports()?;
//! println!("{task_overview}\n{user_overview}");
//! # Ok::<(), tasktrack_workspace::TaskError>(())
//! ```

mod manager;

pub use manager::{TaskManager, today};

pub use tasktrack_core::{
    ADMIN_USERNAME, EditField, LogFormat, LoginError, Ordinal, Task, TaskError, TaskId,
    TaskResult, TrackerConfig, User, codec, format_date, parse_date,
};
pub use tasktrack_report::{
    ReportWriter, Reports, TaskOverview, UserOverview, UserStats, render_task_overview,
    render_user_overview,
};
pub use tasktrack_store::{CompletionOutcome, TaskStore, UserStore};
