//! Persistent user table and session id
//!
//! Two files live in the platform data directory: `users.json`, the full
//! serialized account table, and `session`, the raw id of the signed-in
//! user. Every create/update rewrites the whole table atomically.

use directories::ProjectDirs;
use std::error::Error as StdError;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

use crate::core::constants::{RESERVED_ID_FLOOR, SESSION_FILE, USERS_FILE};
use crate::core::user::User;

#[derive(Debug)]
pub enum StoreError {
    /// A required registration field was left empty.
    MissingField(&'static str),

    /// Failed to read or write a store file.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to serialize the user table.
    Serialize(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::MissingField(field) => {
                write!(f, "Missing required field: {field}")
            }
            StoreError::Io { path, source } => {
                write!(f, "Failed to access {}: {}", path.display(), source)
            }
            StoreError::Serialize(source) => {
                write!(f, "Failed to serialize user table: {source}")
            }
        }
    }
}

impl StdError for StoreError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            StoreError::MissingField(_) => None,
            StoreError::Io { source, .. } => Some(source),
            StoreError::Serialize(source) => Some(source),
        }
    }
}

pub struct UserStore {
    dir: PathBuf,
    users: Vec<User>,
}

impl UserStore {
    /// Open the store in the platform data directory.
    pub fn load() -> Result<Self, StoreError> {
        Self::open_in(Self::default_data_dir())
    }

    /// Open the store rooted at an explicit directory.
    ///
    /// A missing or unreadable table starts empty; the seeded builtin
    /// accounts are then merged in, only where their id is absent.
    pub fn open_in(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        let users_path = dir.join(USERS_FILE);

        let mut users: Vec<User> = fs::read_to_string(&users_path)
            .ok()
            .and_then(|contents| serde_json::from_str(&contents).ok())
            .unwrap_or_default();

        let mut seeded = false;
        for builtin in builtin_accounts() {
            if !users.iter().any(|u| u.id == builtin.id) {
                users.push(builtin);
                seeded = true;
            }
        }

        let store = UserStore { dir, users };
        if seeded {
            store.save()?;
        }
        Ok(store)
    }

    fn default_data_dir() -> PathBuf {
        let proj_dirs =
            ProjectDirs::from("org", "luckyai", "lucky").expect("Failed to determine data directory");
        proj_dirs.data_dir().to_path_buf()
    }

    pub fn list(&self) -> &[User] {
        &self.users
    }

    pub fn get(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Look up a user by id and password. Wrong id and wrong password are
    /// indistinguishable so a failed login leaks nothing about which ids
    /// exist.
    pub fn find_by_credentials(&self, id: &str, password: &str) -> Option<User> {
        self.users
            .iter()
            .find(|u| u.id == id && u.password == password)
            .cloned()
    }

    /// Register a new account. The id is the next free number above the
    /// reserved seeded range.
    pub fn create(&mut self, username: &str, password: &str) -> Result<User, StoreError> {
        if username.trim().is_empty() {
            return Err(StoreError::MissingField("username"));
        }
        if password.is_empty() {
            return Err(StoreError::MissingField("password"));
        }

        let next_id = self
            .users
            .iter()
            .filter_map(|u| u.id.parse::<u64>().ok())
            .filter(|id| *id >= RESERVED_ID_FLOOR)
            .max()
            .unwrap_or(RESERVED_ID_FLOOR - 1)
            + 1;

        let user = User::new(next_id.to_string(), username, password);
        self.users.push(user.clone());
        self.save()?;
        tracing::debug!(id = %user.id, "registered new account");
        Ok(user)
    }

    /// Replace the stored record matching the user's id (or insert it if
    /// somehow missing) and persist the table. Guests are never written.
    pub fn update(&mut self, user: &User) -> Result<(), StoreError> {
        if user.is_guest {
            return Ok(());
        }

        match self.users.iter_mut().find(|u| u.id == user.id) {
            Some(slot) => *slot = user.clone(),
            None => self.users.push(user.clone()),
        }
        self.save()
    }

    fn save(&self) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let contents = serde_json::to_string_pretty(&self.users).map_err(StoreError::Serialize)?;
        let users_path = self.users_path();
        let io_err = |source| StoreError::Io {
            path: users_path.clone(),
            source,
        };

        let mut temp_file = NamedTempFile::new_in(&self.dir).map_err(io_err)?;
        temp_file.write_all(contents.as_bytes()).map_err(io_err)?;
        temp_file.as_file_mut().sync_all().map_err(io_err)?;
        temp_file
            .persist(&users_path)
            .map_err(|err| io_err(err.error))?;
        Ok(())
    }

    fn users_path(&self) -> PathBuf {
        self.dir.join(USERS_FILE)
    }

    fn session_path(&self) -> PathBuf {
        self.dir.join(SESSION_FILE)
    }

    /// Persist the signed-in user's id so the next launch resumes it.
    pub fn remember_session(&self, id: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })?;
        fs::write(self.session_path(), id).map_err(|source| StoreError::Io {
            path: self.session_path(),
            source,
        })
    }

    /// Resolve the persisted session id, if any, against the table.
    pub fn resume_session(&self) -> Option<User> {
        let id = fs::read_to_string(self.session_path()).ok()?;
        self.get(id.trim()).cloned()
    }

    pub fn clear_session(&self) -> Result<(), StoreError> {
        match fs::remove_file(self.session_path()) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io {
                path: self.session_path(),
                source,
            }),
        }
    }
}

/// The three accounts every table starts with. Merged only if absent so a
/// seeded account edited on disk keeps its edits.
fn builtin_accounts() -> Vec<User> {
    let mut reddy = User::new("1", "рэдди", "89");
    reddy.xp = 99999;
    reddy.friends = vec!["7".to_string(), "89".to_string()];

    let mut david = User::new("7", "давид орунчик", "7");
    david.xp = 789;
    david.friends = vec!["1".to_string()];

    let mut misha = User::new("89", "мишаня", "89");
    misha.xp = 1589;
    misha.friends = vec!["1".to_string()];

    vec![reddy, david, misha]
}
