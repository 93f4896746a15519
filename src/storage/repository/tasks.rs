// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Task repository.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};

use super::super::{ownership::OwnedResource, StorageError, StorageResult};
use crate::models::Priority;

/// Task record with its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredTask {
    pub id: String,
    /// Id of the user who created the task
    pub owner_id: String,
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub is_done: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OwnedResource for StoredTask {
    fn owner_id(&self) -> &str {
        &self.owner_id
    }
}

/// Task persistence. Callers are expected to have checked ownership.
pub trait TaskStore: Send + Sync {
    fn find_by_id(&self, id: &str) -> StorageResult<Option<StoredTask>>;

    /// All tasks owned by `owner_id`, in no particular order.
    fn list_by_owner(&self, owner_id: &str) -> StorageResult<Vec<StoredTask>>;

    fn insert(&self, task: StoredTask) -> StorageResult<()>;

    /// Replace an existing task.
    ///
    /// # Errors
    /// `StorageError::NotFound` if the task does not exist.
    fn update(&self, task: StoredTask) -> StorageResult<()>;

    fn delete(&self, id: &str) -> StorageResult<()>;

    /// Remove every task owned by `owner_id`, returning how many were removed.
    fn delete_by_owner(&self, owner_id: &str) -> StorageResult<usize>;
}

#[derive(Default)]
pub struct InMemoryTaskStore {
    tasks: RwLock<HashMap<String, StoredTask>>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TaskStore for InMemoryTaskStore {
    fn find_by_id(&self, id: &str) -> StorageResult<Option<StoredTask>> {
        Ok(self.tasks.read()?.get(id).cloned())
    }

    fn list_by_owner(&self, owner_id: &str) -> StorageResult<Vec<StoredTask>> {
        let tasks = self.tasks.read()?;
        Ok(tasks
            .values()
            .filter(|task| task.owner_id == owner_id)
            .cloned()
            .collect())
    }

    fn insert(&self, task: StoredTask) -> StorageResult<()> {
        let mut tasks = self.tasks.write()?;
        if tasks.contains_key(&task.id) {
            return Err(StorageError::AlreadyExists(format!("Task {}", task.id)));
        }
        tasks.insert(task.id.clone(), task);
        Ok(())
    }

    fn update(&self, task: StoredTask) -> StorageResult<()> {
        let mut tasks = self.tasks.write()?;
        match tasks.get_mut(&task.id) {
            Some(existing) => {
                *existing = task;
                Ok(())
            }
            None => Err(StorageError::NotFound(format!("Task {}", task.id))),
        }
    }

    fn delete(&self, id: &str) -> StorageResult<()> {
        match self.tasks.write()?.remove(id) {
            Some(_) => Ok(()),
            None => Err(StorageError::NotFound(format!("Task {id}"))),
        }
    }

    fn delete_by_owner(&self, owner_id: &str) -> StorageResult<usize> {
        let mut tasks = self.tasks.write()?;
        let before = tasks.len();
        tasks.retain(|_, task| task.owner_id != owner_id);
        Ok(before - tasks.len())
    }
}
