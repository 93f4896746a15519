// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Repository layer providing typed access to stored records.
//!
//! Each repository is a trait plus an in-memory implementation guarded by a
//! `RwLock`.

pub mod tasks;
pub mod users;

pub use tasks::{InMemoryTaskStore, StoredTask, TaskStore};
pub use users::{CredentialStore, InMemoryUserStore, StoredUser};
