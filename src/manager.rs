//! Session facade over the stores and reports.

use std::path::Path;

use chrono::{Local, NaiveDate};
use tasktrack_core::{
    ADMIN_USERNAME, EditField, LoginError, Ordinal, Task, TaskError, TaskId, TaskResult,
    TrackerConfig, parse_date,
};
use tasktrack_report::{ReportWriter, Reports};
use tasktrack_store::{CompletionOutcome, TaskStore, UserStore};

/// Current local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Owns the user store, task store and report documents for one session.
///
/// This is the only type the shell talks to. Operations that depend on the
/// date read the local date once per call; the `*_on` variants take it
/// explicitly.
#[derive(Debug)]
pub struct TaskManager {
    config: TrackerConfig,
    users: UserStore,
    tasks: TaskStore,
    reports: ReportWriter,
}

impl TaskManager {
    /// Load (or bootstrap) both stores under the configured data directory.
    ///
    /// Any error here means the session cannot start.
    pub fn open(config: TrackerConfig) -> TaskResult<Self> {
        std::fs::create_dir_all(&config.data_dir)
            .map_err(|e| TaskError::io(&config.data_dir, e))?;

        let users = UserStore::open(config.user_path(), config.atomic_writes)?;
        let tasks = TaskStore::open(config.task_path(), config.atomic_writes)?;
        let reports = ReportWriter::from_config(&config);

        tracing::info!(
            data_dir = ?config.data_dir,
            users = users.len(),
            tasks = tasks.len(),
            "Opened task tracker"
        );

        Ok(Self {
            config,
            users,
            tasks,
            reports,
        })
    }

    /// Open with default file names inside `data_dir`.
    pub fn open_in(data_dir: impl AsRef<Path>) -> TaskResult<Self> {
        Self::open(TrackerConfig::in_dir(data_dir.as_ref()))
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn login(&self, username: &str, password: &str) -> bool {
        self.users.authenticate(username, password)
    }

    pub fn check_login(&self, username: &str, password: &str) -> Result<(), LoginError> {
        let result = self.users.check_credentials(username, password);
        match &result {
            Ok(()) => tracing::info!(username = %username, "Login succeeded"),
            Err(e) => tracing::warn!(username = %username, reason = %e, "Login failed"),
        }
        result
    }

    /// Whether `username` may display statistics.
    pub fn is_admin(username: &str) -> bool {
        username == ADMIN_USERNAME
    }

    /// Register a user after checking the password confirmation.
    pub fn register(&mut self, username: &str, password: &str, confirm: &str) -> TaskResult<()> {
        if self.users.contains(username) {
            return Err(TaskError::DuplicateUsername(username.to_string()));
        }
        if password != confirm {
            return Err(TaskError::PasswordMismatch);
        }
        self.users.register(username, password)
    }

    /// Whether `username` is registered.
    pub fn user_exists(&self, username: &str) -> bool {
        self.users.contains(username)
    }

    /// Add a task due on `due_date` (`YYYY-MM-DD`), assigned today.
    pub fn add_task(
        &mut self,
        username: &str,
        title: &str,
        description: &str,
        due_date: &str,
    ) -> TaskResult<Ordinal> {
        let due_date = parse_date(due_date)?;
        self.add_task_on(username, title, description, due_date, today())
    }

    pub fn add_task_on(
        &mut self,
        username: &str,
        title: &str,
        description: &str,
        due_date: NaiveDate,
        today: NaiveDate,
    ) -> TaskResult<Ordinal> {
        self.tasks
            .add(&self.users, username, title, description, due_date, today)
    }

    pub fn mark_complete(&mut self, ordinal: Ordinal) -> TaskResult<CompletionOutcome> {
        self.tasks.mark_complete(ordinal)
    }

    /// Edit `field` (`username` or `due_date`) of the task at `ordinal`.
    ///
    /// The ordinal and lock state are checked before the value is parsed.
    pub fn edit_task(&mut self, ordinal: Ordinal, field: &str, value: &str) -> TaskResult<()> {
        self.tasks.ensure_editable(ordinal)?;
        let change = EditField::parse(field, value)?;
        self.tasks.edit(ordinal, change)
    }

    /// The task at `ordinal` if it can still be edited.
    pub fn editable_task(&self, ordinal: Ordinal) -> TaskResult<&Task> {
        self.tasks.ensure_editable(ordinal)
    }

    pub fn view_all(&self) -> impl Iterator<Item = (Ordinal, &Task)> {
        self.tasks.view_all()
    }

    /// Tasks of `username`, numbered by their position in the full list.
    pub fn view_mine<'a>(
        &'a self,
        username: &'a str,
    ) -> impl Iterator<Item = (Ordinal, &'a Task)> {
        self.tasks.view_for_user(username)
    }

    pub fn task_at(&self, ordinal: Ordinal) -> Option<&Task> {
        self.tasks.task_at(ordinal)
    }

    /// Current ordinal of the task with `id`, if it is still in the store.
    pub fn ordinal_of(&self, id: TaskId) -> Option<Ordinal> {
        self.tasks.ordinal_of(id)
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Regenerate both overview documents for today.
    pub fn generate_reports(&self) -> TaskResult<Reports> {
        self.generate_reports_on(today())
    }

    pub fn generate_reports_on(&self, today: NaiveDate) -> TaskResult<Reports> {
        self.reports
            .generate(self.users.users(), self.tasks.tasks(), today)
    }

    /// Generate both documents if either one is missing.
    pub fn ensure_reports(&self) -> TaskResult<bool> {
        self.ensure_reports_on(today())
    }

    pub fn ensure_reports_on(&self, today: NaiveDate) -> TaskResult<bool> {
        self.reports
            .generate_if_missing(self.users.users(), self.tasks.tasks(), today)
    }

    /// Raw task overview and user overview documents.
    pub fn display_reports(&self) -> TaskResult<(String, String)> {
        self.reports.read()
    }

    pub fn users(&self) -> &UserStore {
        &self.users
    }

    pub fn tasks(&self) -> &TaskStore {
        &self.tasks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_open_creates_data_dir_and_files() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("nested").join("data");

        let manager = TaskManager::open_in(&data_dir).unwrap();

        assert!(data_dir.join("user.txt").exists());
        assert!(data_dir.join("tasks.txt").exists());
        assert!(manager.login("admin", "password"));
        assert_eq!(manager.task_count(), 0);
    }

    #[test]
    fn test_register_checks_confirmation() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = TaskManager::open_in(dir.path()).unwrap();

        assert!(matches!(
            manager.register("bob", "a", "b"),
            Err(TaskError::PasswordMismatch)
        ));
        assert!(!manager.user_exists("bob"));

        manager.register("bob", "a", "a").unwrap();
        assert!(manager.login("bob", "a"));
    }

    #[test]
    fn test_edit_checks_lock_before_value() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = TaskManager::open_in(dir.path()).unwrap();
        manager
            .add_task_on("admin", "t", "d", date(2099, 1, 1), date(2024, 1, 1))
            .unwrap();
        manager.mark_complete(1).unwrap();

        assert!(matches!(
            manager.edit_task(1, "due_date", "not-a-date"),
            Err(TaskError::TaskLocked { ordinal: 1 })
        ));
        assert!(matches!(
            manager.edit_task(2, "due_date", "2099-01-01"),
            Err(TaskError::OutOfRange { ordinal: 2, len: 1 })
        ));
    }

    #[test]
    fn test_edit_rejects_unknown_field() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = TaskManager::open_in(dir.path()).unwrap();
        manager.add_task("admin", "t", "d", "2099-01-01").unwrap();

        assert!(matches!(
            manager.edit_task(1, "title", "new"),
            Err(TaskError::UnknownField(_))
        ));
        manager.edit_task(1, "due_date", "2100-12-31").unwrap();
        assert_eq!(manager.task_at(1).unwrap().due_date, date(2100, 12, 31));
    }

    #[test]
    fn test_task_id_resolves_to_current_ordinal() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = TaskManager::open_in(dir.path()).unwrap();
        manager.register("bob", "pw", "pw").unwrap();
        manager.add_task("admin", "a", "d", "2099-01-01").unwrap();
        manager.add_task("bob", "b", "d", "2099-01-01").unwrap();

        let (ordinal, task) = manager.view_mine("bob").next().unwrap();
        let id = task.id;
        assert_eq!(manager.ordinal_of(id), Some(ordinal));

        manager.mark_complete(ordinal).unwrap();
        assert_eq!(manager.ordinal_of(id), Some(2));
        assert!(manager.task_at(2).unwrap().completed);
        assert_eq!(manager.ordinal_of(TaskId::new()), None);
    }

    #[test]
    fn test_admin_gate() {
        assert!(TaskManager::is_admin("admin"));
        assert!(!TaskManager::is_admin("Admin"));
        assert!(!TaskManager::is_admin("bob"));
    }
}
