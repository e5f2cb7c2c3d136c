use std::path::{Path, PathBuf};

use tasktrack_core::codec::{check_field, decode_users, encode_users};
use tasktrack_core::{
    ADMIN_DEFAULT_PASSWORD, ADMIN_USERNAME, LoginError, TaskError, TaskResult, User,
};

use crate::persist;

/// Registered users, synced to a `username;password` file on every change.
///
/// Users keep registration order in memory and on disk. Passwords are
/// stored and compared as plain text.
///
/// # Concurrent File Access
///
/// The store assumes it is the only writer of its file. Two stores opened
/// on the same path will overwrite each other's changes.
#[derive(Debug)]
pub struct UserStore {
    path: PathBuf,
    users: Vec<User>,
    atomic_writes: bool,
}

impl UserStore {
    /// Load users from `path`, creating the file with the default admin
    /// account if it does not exist.
    ///
    /// A file that exists but holds no accounts is rejected as corrupt,
    /// since no login could succeed against it.
    pub fn open(path: impl Into<PathBuf>, atomic_writes: bool) -> TaskResult<Self> {
        let path = path.into();

        let store = match persist::read_existing(&path)? {
            Some(contents) => {
                let users = decode_users(&contents)?;
                if users.is_empty() {
                    tracing::error!(path = ?path, "User file contains no accounts");
                    return Err(TaskError::malformed(1, "user file contains no accounts"));
                }
                tracing::debug!(path = ?path, users = users.len(), "Loaded user store");
                Self {
                    path,
                    users,
                    atomic_writes,
                }
            }
            None => {
                let store = Self {
                    path,
                    users: vec![User::new(ADMIN_USERNAME, ADMIN_DEFAULT_PASSWORD)],
                    atomic_writes,
                };
                store.persist()?;
                tracing::info!(path = ?store.path, "Created user store with default admin account");
                store
            }
        };

        Ok(store)
    }

    /// Add a new user and rewrite the file.
    pub fn register(&mut self, username: &str, password: &str) -> TaskResult<()> {
        if username.is_empty() {
            return Err(TaskError::InvalidField {
                field: "username",
                reason: "must not be empty".to_string(),
            });
        }
        check_field("username", username)?;
        check_field("password", password)?;

        if self.contains(username) {
            tracing::warn!(username = %username, "Registration rejected: username taken");
            return Err(TaskError::DuplicateUsername(username.to_string()));
        }

        self.users.push(User::new(username, password));
        if let Err(e) = self.persist() {
            self.users.pop();
            return Err(e);
        }

        tracing::info!(username = %username, users = self.users.len(), "Registered user");
        Ok(())
    }

    /// Exact match of username and password.
    pub fn authenticate(&self, username: &str, password: &str) -> bool {
        self.check_credentials(username, password).is_ok()
    }

    /// Like [`authenticate`](Self::authenticate) but says why a login failed.
    pub fn check_credentials(&self, username: &str, password: &str) -> Result<(), LoginError> {
        match self.get(username) {
            None => Err(LoginError::UnknownUser),
            Some(user) if user.password != password => Err(LoginError::WrongPassword),
            Some(_) => Ok(()),
        }
    }

    pub fn contains(&self, username: &str) -> bool {
        self.get(username).is_some()
    }

    pub fn get(&self, username: &str) -> Option<&User> {
        self.users.iter().find(|user| user.username == username)
    }

    /// Users in registration order.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> TaskResult<()> {
        persist::rewrite(&self.path, &encode_users(&self.users), self.atomic_writes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn open_in(dir: &tempfile::TempDir) -> UserStore {
        UserStore::open(dir.path().join("user.txt"), false).unwrap()
    }

    #[test]
    fn test_bootstrap_creates_admin() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_in(&dir);

        assert_eq!(store.users(), &[User::new("admin", "password")]);
        assert_eq!(
            fs::read_to_string(dir.path().join("user.txt")).unwrap(),
            "admin;password"
        );
    }

    #[test]
    fn test_existing_file_is_not_rewritten_on_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user.txt");
        fs::write(&path, "bob;pw\nadmin;secret\n").unwrap();

        let store = UserStore::open(&path, false).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.users()[0].username, "bob");
        assert_eq!(fs::read_to_string(&path).unwrap(), "bob;pw\nadmin;secret\n");
    }

    #[test]
    fn test_empty_user_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user.txt");

        for contents in ["", "\n\n"] {
            fs::write(&path, contents).unwrap();
            let err = UserStore::open(&path, false).unwrap_err();
            assert!(matches!(err, TaskError::MalformedRecord { line: 1, .. }));
            assert!(err.is_storage_error());
            assert_eq!(fs::read_to_string(&path).unwrap(), contents);
        }
    }

    #[test]
    fn test_register_appends_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_in(&dir);

        store.register("bob", "hunter2").unwrap();
        assert!(store.contains("bob"));
        assert_eq!(
            fs::read_to_string(store.path()).unwrap(),
            "admin;password\nbob;hunter2"
        );

        let reopened = open_in(&dir);
        assert_eq!(reopened.users(), store.users());
    }

    #[test]
    fn test_register_duplicate_leaves_store_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_in(&dir);

        let err = store.register("admin", "x").unwrap_err();
        assert!(matches!(err, TaskError::DuplicateUsername(name) if name == "admin"));
        assert_eq!(store.users(), &[User::new("admin", "password")]);
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "admin;password");
    }

    #[test]
    fn test_register_rejects_unstorable_values() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_in(&dir);

        assert!(matches!(
            store.register("", "pw"),
            Err(TaskError::InvalidField { field: "username", .. })
        ));
        assert!(matches!(
            store.register("eve;admin", "pw"),
            Err(TaskError::InvalidField { field: "username", .. })
        ));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_authentication() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_in(&dir);

        assert!(store.authenticate("admin", "password"));
        assert!(!store.authenticate("admin", "Password"));
        assert_eq!(
            store.check_credentials("ghost", "password"),
            Err(LoginError::UnknownUser)
        );
        assert_eq!(
            store.check_credentials("admin", "nope"),
            Err(LoginError::WrongPassword)
        );
    }

    #[test]
    fn test_corrupt_file_fails_to_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user.txt");
        fs::write(&path, "admin;password\nbroken").unwrap();

        let err = UserStore::open(&path, false).unwrap_err();
        assert!(matches!(err, TaskError::MalformedRecord { line: 2, .. }));
    }
}
