//! # tasktrack Stores
//!
//! File-backed collections for the tasktrack task tracker.
//!
//! - **[UserStore]**: registered users, `username;password` per line
//! - **[TaskStore]**: ordered tasks, six `;`-separated fields per line
//!
//! Both stores keep their whole collection in memory and rewrite their
//! backing file from it after every mutation. A missing file is created on
//! open (with the default `admin` account for users, empty for tasks);
//! a corrupt file is an error.
//!
//! ## Example
//!
//! ```rust,no_run
//! use chrono::NaiveDate;
//! use tasktrack_store::{TaskStore, UserStore};
//!
//! let users = UserStore::open("user.txt", false)?;
//! let mut tasks = TaskStore::open("tasks.txt", false)?;
//!
//! let due = NaiveDate::from_ymd_opt(2099, 1, 1).unwrap();
//! let today = chrono::Local::now().date_naive();
//! let ordinal = tasks.add(&users, "admin", "Title", "Desc", due, today)?;
//! tasks.mark_complete(ordinal)?;
//! # Ok::<(), tasktrack_core::TaskError>(())
//! ```

mod persist;
mod task_store;
mod user_store;

pub use task_store::{CompletionOutcome, TaskStore};
pub use user_store::UserStore;
