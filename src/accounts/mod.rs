//! User accounts stored in `users.json`.
//!
//! The file maps usernames to `{ "password": <record>, "created": <timestamp> }`
//! where `<record>` is the 96-character string produced by
//! [`crate::crypto::hash_password`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::crypto::{hash_password, verify_password};
use crate::errors::{Result, VaultError};
use crate::vault::format;
use crate::vault::item::now;

/// File name of the account table inside the data directory.
pub const USERS_FILE: &str = "users.json";

/// Shortest password `register` accepts.
pub const MIN_PASSWORD_LEN: usize = 8;

/// One stored account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserCredential {
    /// hex(salt) + hex(PBKDF2 digest).
    pub password: String,
    pub created: NaiveDateTime,
}

/// Register and authenticate users against `users.json`.
pub struct UserRegistry {
    path: Option<PathBuf>,
    users: RwLock<BTreeMap<String, UserCredential>>,
    min_password_len: usize,
}

impl UserRegistry {
    /// Load the registry from `data_dir`, empty if the file is missing.
    pub fn open(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(USERS_FILE);
        let users = format::read_json(&path)?;
        Ok(Self {
            path: Some(path),
            users: RwLock::new(users),
            min_password_len: MIN_PASSWORD_LEN,
        })
    }

    /// A registry that never touches disk.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            users: RwLock::new(BTreeMap::new()),
            min_password_len: MIN_PASSWORD_LEN,
        }
    }

    /// Override the minimum password length (from settings).
    pub fn with_min_password_len(mut self, len: usize) -> Self {
        self.min_password_len = len;
        self
    }

    /// Create an account.  Returns the trimmed username.
    pub fn register(&self, username: &str, password: &str) -> Result<String> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(VaultError::Validation(
                "username and password are required".into(),
            ));
        }
        if password.chars().count() < self.min_password_len {
            return Err(VaultError::Validation(format!(
                "password must be at least {} characters",
                self.min_password_len
            )));
        }

        let mut guard = self.users.write().map_err(|_| VaultError::StorePoisoned)?;
        if guard.contains_key(username) {
            return Err(VaultError::UserAlreadyExists(username.to_string()));
        }

        let mut next = guard.clone();
        next.insert(
            username.to_string(),
            UserCredential {
                password: hash_password(password)?,
                created: now(),
            },
        );
        if let Some(path) = &self.path {
            format::write_json_atomic(path, &next)?;
        }
        *guard = next;

        tracing::info!(username, "registered user");
        Ok(username.to_string())
    }

    /// Check a username/password pair.
    ///
    /// An unknown user and a wrong password produce the same error.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<()> {
        let username = username.trim();
        let record = {
            let guard = self.users.read().map_err(|_| VaultError::StorePoisoned)?;
            guard.get(username).map(|u| u.password.clone())
        };

        match record {
            Some(record) if verify_password(&record, password)? => {
                tracing::info!(username, "user authenticated");
                Ok(())
            }
            _ => {
                tracing::debug!("authentication rejected");
                Err(VaultError::InvalidCredentials)
            }
        }
    }

    /// Whether `username` is registered.
    pub fn contains(&self, username: &str) -> Result<bool> {
        let guard = self.users.read().map_err(|_| VaultError::StorePoisoned)?;
        Ok(guard.contains_key(username.trim()))
    }

    /// Number of registered users.
    pub fn len(&self) -> Result<usize> {
        let guard = self.users.read().map_err(|_| VaultError::StorePoisoned)?;
        Ok(guard.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn register_then_authenticate() {
        let registry = UserRegistry::in_memory();
        let name = registry.register("  alice ", "correct horse").unwrap();
        assert_eq!(name, "alice");

        registry.authenticate("alice", "correct horse").unwrap();
        assert!(matches!(
            registry.authenticate("alice", "wrong horse"),
            Err(VaultError::InvalidCredentials)
        ));
    }

    #[test]
    fn unknown_user_and_wrong_password_look_the_same() {
        let registry = UserRegistry::in_memory();
        registry.register("bob", "password123").unwrap();

        let unknown = registry.authenticate("carol", "password123").unwrap_err();
        let wrong = registry.authenticate("bob", "password124").unwrap_err();
        assert_eq!(unknown.to_string(), wrong.to_string());
    }

    #[test]
    fn register_validates_input() {
        let registry = UserRegistry::in_memory();
        assert!(matches!(
            registry.register("   ", "password123"),
            Err(VaultError::Validation(_))
        ));
        assert!(matches!(
            registry.register("dave", "short"),
            Err(VaultError::Validation(_))
        ));

        registry.register("dave", "long enough").unwrap();
        assert!(matches!(
            registry.register("dave", "another one"),
            Err(VaultError::UserAlreadyExists(_))
        ));
    }

    #[test]
    fn accounts_persist_across_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let registry = UserRegistry::open(dir.path()).unwrap();
            registry.register("erin", "s3cret-pass").unwrap();
        }

        let registry = UserRegistry::open(dir.path()).unwrap();
        assert!(registry.contains("erin").unwrap());
        registry.authenticate("erin", "s3cret-pass").unwrap();

        let raw = std::fs::read_to_string(dir.path().join(USERS_FILE)).unwrap();
        assert!(raw.contains("\"erin\""));
        assert!(!raw.contains("s3cret-pass"));
    }
}
