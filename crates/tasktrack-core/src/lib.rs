//! # tasktrack Core
//!
//! Records, codec, errors and configuration shared by every tasktrack crate.
//!
//! ## Modules
//!
//! - **[model]**: [`User`], [`Task`], [`TaskId`] and [`EditField`]
//! - **[codec]**: the semicolon-delimited line format used by the backing files
//! - **[error]**: [`TaskError`] and [`LoginError`]
//! - **[config]**: [`TrackerConfig`] loaded from TOML and the environment
//!
//! ## Example
//!
//! ```rust
//! use tasktrack_core::codec::{decode_tasks, encode_tasks};
//!
//! let text = "admin;Title;Desc;2099-01-01;2024-03-07;No";
//! let tasks = decode_tasks(text).unwrap();
//! assert_eq!(encode_tasks(&tasks), text);
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod model;

pub use codec::{DATE_FORMAT, format_date, parse_date};
pub use config::{LogFormat, TrackerConfig};
pub use error::{LoginError, TaskError, TaskResult};
pub use model::{EditField, Ordinal, Task, TaskId, User};

/// Username that is created on first run and gates the statistics display.
pub const ADMIN_USERNAME: &str = "admin";

/// Password of the bootstrap admin account.
pub const ADMIN_DEFAULT_PASSWORD: &str = "password";
