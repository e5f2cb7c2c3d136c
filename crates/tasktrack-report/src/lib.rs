//! # tasktrack Reports
//!
//! Statistics over the user and task stores, rendered as two plain-text
//! documents:
//!
//! - **Task Overview**: totals of completed, incomplete and overdue tasks
//! - **User Overview**: per-user share of tasks and completion rates
//!
//! Reports are snapshots. Each generation computes everything for a single
//! `today` and overwrites both documents.

pub mod document;
pub mod stats;
mod writer;

pub use document::{render_task_overview, render_user_overview};
pub use stats::{TaskOverview, UserOverview, UserStats, percentage};
pub use writer::{ReportWriter, Reports};
