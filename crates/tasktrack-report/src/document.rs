//! Plain-text rendering of the overview documents.

use crate::stats::{TaskOverview, UserOverview};

/// Six labelled lines, no trailing newline.
pub fn render_task_overview(overview: &TaskOverview) -> String {
    format!(
        "Total tasks: {}\n\
         Completed tasks: {}\n\
         Incomplete tasks: {}\n\
         Overdue tasks: {}\n\
         Percentage of incomplete tasks: {:.2}%\n\
         Percentage of overdue tasks: {:.2}%",
        overview.total_tasks,
        overview.completed,
        overview.incomplete,
        overview.overdue,
        overview.incomplete_percentage,
        overview.overdue_percentage,
    )
}

/// Header with user and task totals, then one block per user.
pub fn render_user_overview(overview: &UserOverview) -> String {
    let mut out = format!(
        "Total users: {}\nTotal tasks: {}\n",
        overview.total_users, overview.total_tasks
    );

    for user in &overview.users {
        out.push_str(&format!(
            "\nUser: {}\n\
             Total tasks assigned: {}\n\
             Percentage of total tasks: {:.2}%\n\
             Percentage completed: {:.2}%\n\
             Percentage incomplete: {:.2}%\n\
             Percentage overdue: {:.2}%\n",
            user.username,
            user.total,
            user.percentage_of_total_tasks,
            user.percentage_completed,
            user.percentage_incomplete,
            user.percentage_overdue,
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::UserStats;

    #[test]
    fn test_task_overview_text() {
        let overview = TaskOverview {
            total_tasks: 3,
            completed: 1,
            incomplete: 2,
            overdue: 1,
            incomplete_percentage: 200.0 / 3.0,
            overdue_percentage: 50.0,
        };

        assert_eq!(
            render_task_overview(&overview),
            "Total tasks: 3\n\
             Completed tasks: 1\n\
             Incomplete tasks: 2\n\
             Overdue tasks: 1\n\
             Percentage of incomplete tasks: 66.67%\n\
             Percentage of overdue tasks: 50.00%"
        );
    }

    #[test]
    fn test_user_overview_text() {
        let overview = UserOverview {
            total_users: 1,
            total_tasks: 0,
            users: vec![UserStats {
                username: "admin".into(),
                total: 0,
                completed: 0,
                incomplete: 0,
                overdue: 0,
                percentage_of_total_tasks: 0.0,
                percentage_completed: 0.0,
                percentage_incomplete: 0.0,
                percentage_overdue: 0.0,
            }],
        };

        assert_eq!(
            render_user_overview(&overview),
            "Total users: 1\nTotal tasks: 0\n\
             \nUser: admin\n\
             Total tasks assigned: 0\n\
             Percentage of total tasks: 0.00%\n\
             Percentage completed: 0.00%\n\
             Percentage incomplete: 0.00%\n\
             Percentage overdue: 0.00%\n"
        );
    }
}
