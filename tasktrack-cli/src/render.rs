//! Console layout for tasks and reports.

use tasktrack_workspace::{Ordinal, Task, format_date};

fn completed_label(task: &Task) -> &'static str {
    if task.completed { "Yes" } else { "No" }
}

/// Full listing entry used by "view all".
pub fn task_entry(ordinal: Ordinal, task: &Task) -> String {
    format!(
        "{ordinal}. Task: \t\t {}\n   \
         Assigned to: \t {}\n   \
         Date Assigned: \t {}\n   \
         Due Date: \t {}\n   \
         Task Description: \n   {}\n   \
         Completed: \t {}\n",
        task.title,
        task.username,
        format_date(task.assigned_date),
        format_date(task.due_date),
        task.description,
        completed_label(task),
    )
}

/// Entry used by "view mine"; the number is the task's position in the
/// full list.
pub fn own_task_entry(ordinal: Ordinal, task: &Task) -> String {
    format!(
        "Task {ordinal}: \t {}\n\
         Assigned to: \t {}\n\
         Date Assigned: \t {}\n\
         Due Date: \t {}\n\
         Task Description: \n {}\n\
         Completed: \t {}\n",
        task.title,
        task.username,
        format_date(task.assigned_date),
        format_date(task.due_date),
        task.description,
        completed_label(task),
    )
}

pub fn reports(task_overview: &str, user_overview: &str) -> String {
    format!("Task Overview:\n{task_overview}\n\nUser Overview:\n{user_overview}")
}
