// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Credential store.
//!
//! Users are keyed by id; email is unique across all users and is the
//! subject carried in bearer tokens.

use std::collections::HashMap;
use std::fmt;
use std::sync::RwLock;

use chrono::{DateTime, Utc};

use super::super::{StorageError, StorageResult};

/// User record as kept by the credential store.
#[derive(Clone, PartialEq, Eq)]
pub struct StoredUser {
    /// Unique user identifier (UUID)
    pub id: String,
    /// Display name
    pub name: String,
    /// Normalized email, unique
    pub email: String,
    /// Argon2id PHC string
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl fmt::Debug for StoredUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredUser")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Read/write access to user credentials.
pub trait CredentialStore: Send + Sync {
    fn find_by_email(&self, email: &str) -> StorageResult<Option<StoredUser>>;

    fn find_by_id(&self, id: &str) -> StorageResult<Option<StoredUser>>;

    /// Insert a new user.
    ///
    /// # Errors
    /// `StorageError::AlreadyExists` if the id or the email is taken.
    fn insert(&self, user: StoredUser) -> StorageResult<()>;

    /// Delete a user by id.
    ///
    /// # Errors
    /// `StorageError::NotFound` if no such user exists.
    fn delete(&self, id: &str) -> StorageResult<()>;
}

#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<String, StoredUser>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for InMemoryUserStore {
    fn find_by_email(&self, email: &str) -> StorageResult<Option<StoredUser>> {
        let users = self.users.read()?;
        Ok(users.values().find(|user| user.email == email).cloned())
    }

    fn find_by_id(&self, id: &str) -> StorageResult<Option<StoredUser>> {
        Ok(self.users.read()?.get(id).cloned())
    }

    fn insert(&self, user: StoredUser) -> StorageResult<()> {
        let mut users = self.users.write()?;

        if users.contains_key(&user.id) {
            return Err(StorageError::AlreadyExists(format!("User {}", user.id)));
        }
        if users.values().any(|existing| existing.email == user.email) {
            return Err(StorageError::AlreadyExists(format!("Email {}", user.email)));
        }

        users.insert(user.id.clone(), user);
        Ok(())
    }

    fn delete(&self, id: &str) -> StorageResult<()> {
        match self.users.write()?.remove(id) {
            Some(_) => Ok(()),
            None => Err(StorageError::NotFound(format!("User {id}"))),
        }
    }
}
