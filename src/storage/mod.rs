// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Storage Module
//!
//! Credential and task records behind the [`CredentialStore`] and
//! [`TaskStore`] traits, with in-memory implementations used by the server.
//!
//! All calls are synchronous. Every read or mutation of a task on behalf of
//! a user goes through [`ownership::authorize_owned`].

pub mod ownership;
pub mod repository;

use thiserror::Error;

pub use ownership::{authorize_owned, authorize_self, OwnedResource, OwnershipEnforcer};
pub use repository::{
    CredentialStore, InMemoryTaskStore, InMemoryUserStore, StoredTask, StoredUser, TaskStore,
};

/// Error type for storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Entity not found
    #[error("not found: {0}")]
    NotFound(String),

    /// Entity already exists (duplicate id or unique key)
    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// A writer panicked while holding the store lock
    #[error("storage lock poisoned")]
    Poisoned,
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

impl<T> From<std::sync::PoisonError<T>> for StorageError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        StorageError::Poisoned
    }
}
