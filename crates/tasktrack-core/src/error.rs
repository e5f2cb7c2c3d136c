//! Error types for tracker operations
//!
//! Every fallible operation in the workspace returns [`TaskError`]. Login
//! failures are reported separately through [`LoginError`] because the
//! shell reacts to them differently (it re-prompts instead of printing and
//! returning to the menu).

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type for tracker operations
pub type TaskResult<T> = Result<T, TaskError>;

/// Errors that can occur while loading, mutating or persisting tracker data
#[derive(Debug, Error)]
pub enum TaskError {
    /// Registration attempted with a username that is already taken
    #[error("Username already exists: {0}")]
    DuplicateUsername(String),

    /// A task was assigned to a username that is not registered
    #[error("User does not exist: {0}")]
    UnknownUser(String),

    /// Task ordinal outside `1..=len`
    #[error("Invalid task number {ordinal} (valid range: 1..={len})")]
    OutOfRange { ordinal: usize, len: usize },

    /// Completed tasks cannot be edited
    #[error("Cannot edit completed task {ordinal}")]
    TaskLocked { ordinal: usize },

    /// Date text does not match `YYYY-MM-DD`
    #[error("Invalid date '{value}', expected YYYY-MM-DD")]
    InvalidDate { value: String },

    /// A persisted line could not be decoded
    #[error("Malformed record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    /// A value cannot be stored in the line format
    #[error("Invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    /// Edit requested for a field that cannot be edited
    #[error("Unknown task field '{0}', expected 'username' or 'due_date'")]
    UnknownField(String),

    /// Password and confirmation differ during registration
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// Reading or writing a backing file failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration could not be read or parsed
    #[error("Invalid configuration: {message}")]
    Config { message: String },
}

impl TaskError {
    /// Wrap an I/O error together with the file it happened on.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        TaskError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a malformed record error for a 1-based line number.
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        TaskError::MalformedRecord {
            line,
            reason: reason.into(),
        }
    }

    /// Whether the error comes from corrupt or unreadable storage rather
    /// than from user input. Such errors abort startup.
    pub fn is_storage_error(&self) -> bool {
        matches!(
            self,
            TaskError::Io { .. } | TaskError::MalformedRecord { .. } | TaskError::InvalidDate { .. }
        )
    }
}

/// Reasons a login attempt is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
    #[error("User does not exist")]
    UnknownUser,
    #[error("Wrong password")]
    WrongPassword,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_message_mentions_bounds() {
        let error = TaskError::OutOfRange { ordinal: 7, len: 3 };
        assert_eq!(
            error.to_string(),
            "Invalid task number 7 (valid range: 1..=3)"
        );
    }

    #[test]
    fn test_io_error_keeps_path_and_source() {
        let source = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error = TaskError::io("data/tasks.txt", source);

        assert!(error.to_string().contains("data/tasks.txt"));
        assert!(std::error::Error::source(&error).is_some());
        assert!(error.is_storage_error());
    }

    #[test]
    fn test_user_errors_are_not_storage_errors() {
        assert!(!TaskError::DuplicateUsername("admin".into()).is_storage_error());
        assert!(!TaskError::TaskLocked { ordinal: 1 }.is_storage_error());
        assert!(TaskError::malformed(2, "expected 6 fields").is_storage_error());
    }

    #[test]
    fn test_login_error_messages() {
        assert_eq!(LoginError::UnknownUser.to_string(), "User does not exist");
        assert_eq!(LoginError::WrongPassword.to_string(), "Wrong password");
    }
}
