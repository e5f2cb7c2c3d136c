//! Semicolon-delimited record codec
//!
//! Users are stored as `username;password` and tasks as
//! `username;title;description;due_date;assigned_date;Yes|No`, one record
//! per line. Collections are written as lines joined by `\n` without a
//! trailing newline. Readers accept an optional trailing newline and CRLF
//! line endings and skip blank lines.
//!
//! Field values are written verbatim; stores run [`check_field`] on user
//! input so that a `;` or line break never reaches a file.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::error::{TaskError, TaskResult};
use crate::model::{Task, TaskId, User};

/// Format used for every date in files, reports and prompts.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Separator between fields of a record.
pub const FIELD_SEPARATOR: char = ';';

const COMPLETED_YES: &str = "Yes";
const COMPLETED_NO: &str = "No";
const USER_FIELDS: usize = 2;
const TASK_FIELDS: usize = 6;

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> TaskResult<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| TaskError::InvalidDate {
        value: value.to_string(),
    })
}

/// Format a date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Reject values that would split a record when written.
pub fn check_field(field: &'static str, value: &str) -> TaskResult<()> {
    if value.contains(FIELD_SEPARATOR) {
        return Err(TaskError::InvalidField {
            field,
            reason: format!("must not contain '{}'", FIELD_SEPARATOR),
        });
    }
    if value.contains(['\n', '\r']) {
        return Err(TaskError::InvalidField {
            field,
            reason: "must not contain line breaks".to_string(),
        });
    }
    Ok(())
}

pub fn encode_user(user: &User) -> String {
    format!("{}{}{}", user.username, FIELD_SEPARATOR, user.password)
}

pub fn encode_users<'a>(users: impl IntoIterator<Item = &'a User>) -> String {
    users
        .into_iter()
        .map(encode_user)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Decode a user file into users in file order.
///
/// Fails with [`TaskError::MalformedRecord`] when a line does not have
/// exactly two fields, has an empty username, or repeats a username.
pub fn decode_users(text: &str) -> TaskResult<Vec<User>> {
    let mut seen = HashSet::new();
    let mut users = Vec::new();

    for (line_no, line) in records(text) {
        let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
        if fields.len() != USER_FIELDS {
            return Err(TaskError::malformed(
                line_no,
                format!("expected {} fields, found {}", USER_FIELDS, fields.len()),
            ));
        }

        let (username, password) = (fields[0], fields[1]);
        if username.is_empty() {
            return Err(TaskError::malformed(line_no, "empty username"));
        }
        if !seen.insert(username) {
            return Err(TaskError::malformed(
                line_no,
                format!("duplicate username '{}'", username),
            ));
        }

        users.push(User::new(username, password));
    }

    Ok(users)
}

pub fn encode_task(task: &Task) -> String {
    let completed = if task.completed {
        COMPLETED_YES
    } else {
        COMPLETED_NO
    };

    let due_date = format_date(task.due_date);
    let assigned_date = format_date(task.assigned_date);

    [
        task.username.as_str(),
        task.title.as_str(),
        task.description.as_str(),
        due_date.as_str(),
        assigned_date.as_str(),
        completed,
    ]
    .join(";")
}

pub fn encode_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> String {
    tasks
        .into_iter()
        .map(encode_task)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Decode a task file into tasks in file order, assigning fresh ids.
pub fn decode_tasks(text: &str) -> TaskResult<Vec<Task>> {
    records(text)
        .map(|(line_no, line)| decode_task(line_no, line))
        .collect()
}

fn decode_task(line_no: usize, line: &str) -> TaskResult<Task> {
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    if fields.len() != TASK_FIELDS {
        return Err(TaskError::malformed(
            line_no,
            format!("expected {} fields, found {}", TASK_FIELDS, fields.len()),
        ));
    }

    let completed = match fields[5] {
        COMPLETED_YES => true,
        COMPLETED_NO => false,
        other => {
            return Err(TaskError::malformed(
                line_no,
                format!("completion flag must be Yes or No, found '{}'", other),
            ));
        }
    };

    Ok(Task {
        id: TaskId::new(),
        username: fields[0].to_string(),
        title: fields[1].to_string(),
        description: fields[2].to_string(),
        due_date: parse_date(fields[3])?,
        assigned_date: parse_date(fields[4])?,
        completed,
    })
}

/// Non-blank lines with their 1-based line numbers.
fn records(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| (idx + 1, line))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_encode_user() {
        assert_eq!(encode_user(&User::new("admin", "password")), "admin;password");
    }

    #[test]
    fn test_encode_users_has_no_trailing_newline() {
        let users = vec![User::new("admin", "password"), User::new("bob", "pw")];
        assert_eq!(encode_users(&users), "admin;password\nbob;pw");
        assert_eq!(encode_users(&Vec::<User>::new()), "");
    }

    #[test]
    fn test_decode_users_tolerates_trailing_newline_and_crlf() {
        let users = decode_users("admin;password\r\nbob;pw\n").unwrap();
        assert_eq!(
            users,
            vec![User::new("admin", "password"), User::new("bob", "pw")]
        );
    }

    #[test]
    fn test_decode_users_empty_text() {
        assert!(decode_users("").unwrap().is_empty());
        assert!(decode_users("\n\n").unwrap().is_empty());
    }

    #[test]
    fn test_decode_users_rejects_wrong_field_count() {
        let err = decode_users("admin;password\nbob\n").unwrap_err();
        assert!(matches!(err, TaskError::MalformedRecord { line: 2, .. }));

        let err = decode_users("a;b;c").unwrap_err();
        assert!(matches!(err, TaskError::MalformedRecord { line: 1, .. }));
    }

    #[test]
    fn test_decode_users_rejects_duplicates() {
        let err = decode_users("admin;a\nadmin;b").unwrap_err();
        assert!(matches!(err, TaskError::MalformedRecord { line: 2, .. }));
    }

    #[test]
    fn test_encode_task() {
        let mut task = Task::new("admin", "Title", "Desc", date(2099, 1, 1), date(2024, 3, 7));
        assert_eq!(encode_task(&task), "admin;Title;Desc;2099-01-01;2024-03-07;No");

        task.completed = true;
        assert!(encode_task(&task).ends_with(";Yes"));
    }

    #[test]
    fn test_decode_tasks() {
        let text = "admin;Title;Desc;2099-01-01;2024-03-07;No\n\n\
                    bob;T2;D2;2020-01-01;2019-12-01;Yes\n";
        let tasks = decode_tasks(text).unwrap();

        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].username, "admin");
        assert_eq!(tasks[0].due_date, date(2099, 1, 1));
        assert!(!tasks[0].completed);
        assert_eq!(tasks[1].assigned_date, date(2019, 12, 1));
        assert!(tasks[1].completed);
        assert_ne!(tasks[0].id, tasks[1].id);
    }

    #[test]
    fn test_decode_tasks_rejects_wrong_field_count() {
        let err = decode_tasks("admin;Title;2099-01-01;2024-03-07;No").unwrap_err();
        assert!(matches!(err, TaskError::MalformedRecord { line: 1, .. }));
    }

    #[test]
    fn test_decode_tasks_rejects_bad_date() {
        let err = decode_tasks("admin;T;D;01/01/2099;2024-03-07;No").unwrap_err();
        assert!(matches!(err, TaskError::InvalidDate { value } if value == "01/01/2099"));
    }

    #[test]
    fn test_decode_tasks_rejects_unknown_completion_flag() {
        let err = decode_tasks("admin;T;D;2099-01-01;2024-03-07;maybe").unwrap_err();
        assert!(matches!(err, TaskError::MalformedRecord { line: 1, .. }));
    }

    #[test]
    fn test_check_field() {
        assert!(check_field("title", "Write report").is_ok());
        assert!(matches!(
            check_field("title", "a;b"),
            Err(TaskError::InvalidField { field: "title", .. })
        ));
        assert!(check_field("description", "line\nbreak").is_err());
    }

    #[test]
    fn test_parse_and_format_date() {
        assert_eq!(parse_date("2024-02-29").unwrap(), date(2024, 2, 29));
        assert!(parse_date("2023-02-29").is_err());
        assert!(parse_date("").is_err());
        assert_eq!(format_date(date(2024, 1, 5)), "2024-01-05");
    }
}
