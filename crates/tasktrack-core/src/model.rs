//! User and task records

use std::fmt;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::codec::parse_date;
use crate::error::{TaskError, TaskResult};

/// 1-based position of a task in the ordered task list.
///
/// Ordinals are what users see and type. They are not stable: they refer
/// to whatever task currently sits at that position.
pub type Ordinal = usize;

/// A registered account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub username: String,
    pub password: String,
}

impl User {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Process-local handle for a task.
///
/// Assigned when a task is created or loaded and never written to disk,
/// so it stays valid for the lifetime of the store regardless of position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(Uuid);

impl TaskId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A task assigned to a user.
#[derive(Debug, Clone)]
pub struct Task {
    pub id: TaskId,
    pub username: String,
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub assigned_date: NaiveDate,
    pub completed: bool,
}

impl Task {
    /// Create an incomplete task with a fresh id.
    pub fn new(
        username: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        due_date: NaiveDate,
        assigned_date: NaiveDate,
    ) -> Self {
        Self {
            id: TaskId::new(),
            username: username.into(),
            title: title.into(),
            description: description.into(),
            due_date,
            assigned_date,
            completed: false,
        }
    }

    /// Incomplete and due strictly before `today`.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.completed && self.due_date < today
    }
}

// Equality compares the persisted record only; `id` is not part of it.
impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        self.username == other.username
            && self.title == other.title
            && self.description == other.description
            && self.due_date == other.due_date
            && self.assigned_date == other.assigned_date
            && self.completed == other.completed
    }
}

impl Eq for Task {}

/// A change to one editable field of an incomplete task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditField {
    Username(String),
    DueDate(NaiveDate),
}

impl EditField {
    pub const USERNAME: &'static str = "username";
    pub const DUE_DATE: &'static str = "due_date";

    /// Build an edit from a field name and raw value.
    ///
    /// ```rust
    /// use tasktrack_core::EditField;
    ///
    /// assert!(EditField::parse("due_date", "2099-01-01").is_ok());
    /// assert!(EditField::parse("due_date", "tomorrow").is_err());
    /// assert!(EditField::parse("title", "x").is_err());
    /// ```
    pub fn parse(field: &str, value: &str) -> TaskResult<Self> {
        match field {
            Self::USERNAME => Ok(EditField::Username(value.to_string())),
            Self::DUE_DATE => parse_date(value).map(EditField::DueDate),
            other => Err(TaskError::UnknownField(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EditField::Username(_) => Self::USERNAME,
            EditField::DueDate(_) => Self::DUE_DATE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_task_is_incomplete() {
        let task = Task::new("admin", "Title", "Desc", date(2099, 1, 1), date(2024, 5, 1));
        assert!(!task.completed);
        assert_eq!(task.assigned_date, date(2024, 5, 1));
    }

    #[test]
    fn test_overdue_requires_strictly_earlier_due_date() {
        let today = date(2024, 5, 10);
        let mut task = Task::new("admin", "t", "d", date(2024, 5, 9), today);
        assert!(task.is_overdue(today));

        task.due_date = today;
        assert!(!task.is_overdue(today));

        task.due_date = date(2020, 1, 1);
        task.completed = true;
        assert!(!task.is_overdue(today));
    }

    #[test]
    fn test_equality_ignores_id() {
        let a = Task::new("admin", "t", "d", date(2099, 1, 1), date(2024, 1, 1));
        let b = Task::new("admin", "t", "d", date(2099, 1, 1), date(2024, 1, 1));
        assert_ne!(a.id, b.id);
        assert_eq!(a, b);
    }

    #[test]
    fn test_edit_field_parse() {
        assert_eq!(
            EditField::parse("username", "bob").unwrap(),
            EditField::Username("bob".into())
        );
        assert_eq!(
            EditField::parse("due_date", "2030-02-03").unwrap(),
            EditField::DueDate(date(2030, 2, 3))
        );
        assert!(matches!(
            EditField::parse("due_date", "03/02/2030"),
            Err(TaskError::InvalidDate { .. })
        ));
        assert!(matches!(
            EditField::parse("description", "x"),
            Err(TaskError::UnknownField(field)) if field == "description"
        ));
    }
}
