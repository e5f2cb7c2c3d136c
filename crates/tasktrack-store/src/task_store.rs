use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tasktrack_core::codec::{check_field, decode_tasks, encode_tasks};
use tasktrack_core::{EditField, Ordinal, Task, TaskError, TaskId, TaskResult};

use crate::persist;
use crate::user_store::UserStore;

/// Result of [`TaskStore::mark_complete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// The task was open and is now completed.
    Completed,
    /// The task was already completed; nothing changed.
    AlreadyComplete,
}

/// Ordered tasks, synced to the task file on every change.
///
/// Position in the list is the task's ordinal: insertion order, file line
/// order and display order are the same. Every successful mutation
/// rewrites the whole file; a failed rewrite rolls the in-memory change
/// back.
#[derive(Debug)]
pub struct TaskStore {
    path: PathBuf,
    tasks: Vec<Task>,
    atomic_writes: bool,
}

impl TaskStore {
    /// Load tasks from `path`, creating an empty file if it does not exist.
    pub fn open(path: impl Into<PathBuf>, atomic_writes: bool) -> TaskResult<Self> {
        let path = path.into();

        let store = match persist::read_existing(&path)? {
            Some(contents) => {
                let tasks = decode_tasks(&contents)?;
                tracing::debug!(path = ?path, tasks = tasks.len(), "Loaded task store");
                Self {
                    path,
                    tasks,
                    atomic_writes,
                }
            }
            None => {
                let store = Self {
                    path,
                    tasks: Vec::new(),
                    atomic_writes,
                };
                store.persist()?;
                tracing::info!(path = ?store.path, "Created empty task store");
                store
            }
        };

        Ok(store)
    }

    /// Append a task for a registered user and return its ordinal.
    ///
    /// The task is assigned on `today` and starts incomplete.
    pub fn add(
        &mut self,
        users: &UserStore,
        username: &str,
        title: &str,
        description: &str,
        due_date: NaiveDate,
        today: NaiveDate,
    ) -> TaskResult<Ordinal> {
        if !users.contains(username) {
            tracing::warn!(username = %username, "Task rejected: unknown user");
            return Err(TaskError::UnknownUser(username.to_string()));
        }
        check_field("title", title)?;
        check_field("description", description)?;

        self.tasks
            .push(Task::new(username, title, description, due_date, today));
        if let Err(e) = self.persist() {
            self.tasks.pop();
            return Err(e);
        }

        let ordinal = self.tasks.len();
        tracing::info!(ordinal, username = %username, due_date = %due_date, "Added task");
        Ok(ordinal)
    }

    /// Mark the task at `ordinal` as completed.
    ///
    /// Completing an already completed task is reported through
    /// [`CompletionOutcome::AlreadyComplete`] and does not touch the file.
    pub fn mark_complete(&mut self, ordinal: Ordinal) -> TaskResult<CompletionOutcome> {
        let index = self.index_of(ordinal)?;

        if self.tasks[index].completed {
            tracing::debug!(ordinal, "Task already complete");
            return Ok(CompletionOutcome::AlreadyComplete);
        }

        self.tasks[index].completed = true;
        if let Err(e) = self.persist() {
            self.tasks[index].completed = false;
            return Err(e);
        }

        tracing::info!(ordinal, "Marked task complete");
        Ok(CompletionOutcome::Completed)
    }

    /// Change the assignee or due date of an open task.
    ///
    /// The new username is not checked against the user store.
    pub fn edit(&mut self, ordinal: Ordinal, change: EditField) -> TaskResult<()> {
        self.ensure_editable(ordinal)?;
        let index = ordinal - 1;

        let field = change.name();
        let previous = self.tasks[index].clone();
        match change {
            EditField::Username(username) => {
                check_field("username", &username)?;
                self.tasks[index].username = username;
            }
            EditField::DueDate(due_date) => self.tasks[index].due_date = due_date,
        }

        if let Err(e) = self.persist() {
            self.tasks[index] = previous;
            return Err(e);
        }

        tracing::info!(ordinal, field, "Edited task");
        Ok(())
    }

    /// The task at `ordinal` if it exists and is still open.
    pub fn ensure_editable(&self, ordinal: Ordinal) -> TaskResult<&Task> {
        let task = &self.tasks[self.index_of(ordinal)?];
        if task.completed {
            tracing::warn!(ordinal, "Edit rejected: task is complete");
            return Err(TaskError::TaskLocked { ordinal });
        }
        Ok(task)
    }

    /// Every task with its ordinal, in storage order.
    pub fn view_all(&self) -> impl Iterator<Item = (Ordinal, &Task)> {
        self.tasks
            .iter()
            .enumerate()
            .map(|(index, task)| (index + 1, task))
    }

    /// Tasks assigned to `username`.
    ///
    /// Ordinals are positions in the full list, not in the filtered
    /// sequence, so they can be passed straight to
    /// [`mark_complete`](Self::mark_complete) and [`edit`](Self::edit).
    pub fn view_for_user<'a>(
        &'a self,
        username: &'a str,
    ) -> impl Iterator<Item = (Ordinal, &'a Task)> {
        self.view_all()
            .filter(move |(_, task)| task.username == username)
    }

    pub fn task_at(&self, ordinal: Ordinal) -> Option<&Task> {
        ordinal.checked_sub(1).and_then(|index| self.tasks.get(index))
    }

    /// Current ordinal of the task with `id`.
    pub fn ordinal_of(&self, id: TaskId) -> Option<Ordinal> {
        self.tasks
            .iter()
            .position(|task| task.id == id)
            .map(|index| index + 1)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn index_of(&self, ordinal: Ordinal) -> TaskResult<usize> {
        if ordinal == 0 || ordinal > self.tasks.len() {
            return Err(TaskError::OutOfRange {
                ordinal,
                len: self.tasks.len(),
            });
        }
        Ok(ordinal - 1)
    }

    fn persist(&self) -> TaskResult<()> {
        persist::rewrite(&self.path, &encode_tasks(&self.tasks), self.atomic_writes)
    }
}
