//! Aggregate statistics over users and tasks.

use chrono::NaiveDate;
use tasktrack_core::{Task, User};

/// `100 * part / whole`, or 0 when `whole` is 0.
pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Task-level totals.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskOverview {
    pub total_tasks: usize,
    pub completed: usize,
    pub incomplete: usize,
    pub overdue: usize,
    pub incomplete_percentage: f64,
    /// Overdue tasks as a share of incomplete tasks.
    pub overdue_percentage: f64,
}

impl TaskOverview {
    pub fn compute(tasks: &[Task], today: NaiveDate) -> Self {
        let counts = Counts::of(tasks.iter(), today);

        Self {
            total_tasks: counts.total,
            completed: counts.completed,
            incomplete: counts.incomplete(),
            overdue: counts.overdue,
            incomplete_percentage: percentage(counts.incomplete(), counts.total),
            overdue_percentage: percentage(counts.overdue, counts.incomplete()),
        }
    }
}

/// Per-user totals.
#[derive(Debug, Clone, PartialEq)]
pub struct UserStats {
    pub username: String,
    pub total: usize,
    pub completed: usize,
    pub incomplete: usize,
    pub overdue: usize,
    pub percentage_of_total_tasks: f64,
    pub percentage_completed: f64,
    pub percentage_incomplete: f64,
    /// Overdue tasks as a share of the user's incomplete tasks.
    pub percentage_overdue: f64,
}

/// User-level totals in user store order.
#[derive(Debug, Clone, PartialEq)]
pub struct UserOverview {
    pub total_users: usize,
    pub total_tasks: usize,
    pub users: Vec<UserStats>,
}

impl UserOverview {
    pub fn compute(users: &[User], tasks: &[Task], today: NaiveDate) -> Self {
        let total_tasks = tasks.len();

        let users = users
            .iter()
            .map(|user| {
                let counts = Counts::of(
                    tasks.iter().filter(|task| task.username == user.username),
                    today,
                );

                UserStats {
                    username: user.username.clone(),
                    total: counts.total,
                    completed: counts.completed,
                    incomplete: counts.incomplete(),
                    overdue: counts.overdue,
                    percentage_of_total_tasks: percentage(counts.total, total_tasks),
                    percentage_completed: percentage(counts.completed, counts.total),
                    percentage_incomplete: percentage(counts.incomplete(), counts.total),
                    percentage_overdue: percentage(counts.overdue, counts.incomplete()),
                }
            })
            .collect::<Vec<_>>();

        Self {
            total_users: users.len(),
            total_tasks,
            users,
        }
    }
}

#[derive(Debug, Default)]
struct Counts {
    total: usize,
    completed: usize,
    overdue: usize,
}

impl Counts {
    fn of<'a>(tasks: impl Iterator<Item = &'a Task>, today: NaiveDate) -> Self {
        tasks.fold(Counts::default(), |mut counts, task| {
            counts.total += 1;
            if task.completed {
                counts.completed += 1;
            } else if task.is_overdue(today) {
                counts.overdue += 1;
            }
            counts
        })
    }

    fn incomplete(&self) -> usize {
        self.total - self.completed
    }
}
