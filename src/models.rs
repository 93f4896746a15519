// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response structures used by the REST API. All types derive
//! `ToSchema` for the OpenAPI document.
//!
//! ## Model Categories
//!
//! - **Accounts**: registration, login and profile payloads
//! - **Tasks**: task payloads, priority and list ordering

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::ApiError,
    storage::{StoredTask, StoredUser},
};

pub const NAME_MAX_LEN: usize = 15;
pub const PASSWORD_MIN_LEN: usize = 6;
pub const TITLE_MAX_LEN: usize = 60;
pub const DESCRIPTION_MAX_LEN: usize = 100;

/// RFC 5321 limit.
const EMAIL_MAX_LEN: usize = 254;

// =============================================================================
// Account Models
// =============================================================================

/// Normalize an email for storage and lookup (NFKC, trimmed, lowercase).
pub fn normalize_email(raw: &str) -> String {
    raw.trim().nfkc().collect::<String>().to_lowercase()
}

fn is_valid_email(email: &str) -> bool {
    if email.len() > EMAIL_MAX_LEN {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace)
}

/// Request to create an account.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterRequest {
    /// Display name (1-15 characters).
    pub name: String,
    /// Email address, used to log in.
    pub email: String,
    /// Password (at least 6 characters).
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let name_len = self.name.trim().chars().count();
        if name_len == 0 || name_len > NAME_MAX_LEN {
            return Err(ApiError::unprocessable(format!(
                "name must be between 1 and {NAME_MAX_LEN} characters"
            )));
        }
        if !is_valid_email(&normalize_email(&self.email)) {
            return Err(ApiError::unprocessable("email must be a valid email address"));
        }
        if self.password.chars().count() < PASSWORD_MIN_LEN {
            return Err(ApiError::unprocessable(format!(
                "password must be at least {PASSWORD_MIN_LEN} characters"
            )));
        }
        Ok(())
    }
}

/// Login credentials.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Bearer token for the `Authorization` header.
    pub token: String,
    /// When the token stops being accepted.
    pub expires_at: DateTime<Utc>,
}

/// Public view of an account. Never includes the password hash.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<StoredUser> for UserResponse {
    fn from(user: StoredUser) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

// =============================================================================
// Task Models
// =============================================================================

/// Task priority. Ordered `low < medium < high`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// A task as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub priority: Priority,
    pub is_done: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<StoredTask> for Task {
    fn from(task: StoredTask) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            priority: task.priority,
            is_done: task.is_done,
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}

fn validate_title(title: &str) -> Result<(), ApiError> {
    let len = title.trim().chars().count();
    if len == 0 || len > TITLE_MAX_LEN {
        return Err(ApiError::unprocessable(format!(
            "title must be between 1 and {TITLE_MAX_LEN} characters"
        )));
    }
    Ok(())
}

fn validate_description(description: Option<&str>) -> Result<(), ApiError> {
    match description {
        Some(text) if text.chars().count() > DESCRIPTION_MAX_LEN => Err(ApiError::unprocessable(
            format!("description must be at most {DESCRIPTION_MAX_LEN} characters"),
        )),
        _ => Ok(()),
    }
}

/// Request to create a task.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateTaskRequest {
    /// Title (1-60 characters).
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub priority: Priority,
}

impl CreateTaskRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        validate_title(&self.title)?;
        validate_description(self.description.as_deref())
    }
}

/// Partial update of a task. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateTaskRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub is_done: Option<bool>,
}

impl UpdateTaskRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        validate_description(self.description.as_deref())
    }

    /// Apply the present fields to `task`, refreshing `updated_at`.
    /// Titles are stored trimmed, as on create.
    pub fn apply(self, task: &mut StoredTask, now: DateTime<Utc>) {
        if let Some(title) = self.title {
            task.title = title.trim().to_string();
        }
        if let Some(description) = self.description {
            task.description = Some(description);
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(is_done) = self.is_done {
            task.is_done = is_done;
        }
        task.updated_at = now;
    }
}

/// Field a task list is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Title,
    Priority,
    #[default]
    CreatedAt,
    UpdatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Ordering of `GET /api/task`.
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TaskListQuery {
    /// `title`, `priority`, `createdat` or `updatedat` (default `createdat`).
    #[serde(default)]
    pub field: SortField,
    /// `asc` or `desc` (default `asc`).
    #[serde(default)]
    pub order: SortOrder,
}

impl TaskListQuery {
    pub fn sort(&self, tasks: &mut [StoredTask]) {
        tasks.sort_by(|a, b| {
            let ordering = match self.field {
                SortField::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
                SortField::Priority => a.priority.cmp(&b.priority),
                SortField::CreatedAt => a.created_at.cmp(&b.created_at),
                SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
            };
            match self.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
    }
}

/// Filter of `GET /api/task/done`.
#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(default)]
pub struct DoneQuery {
    /// `true` for completed tasks, `false` for open ones (default `true`).
    pub status: bool,
}

impl Default for DoneQuery {
    fn default() -> Self {
        Self { status: true }
    }
}
