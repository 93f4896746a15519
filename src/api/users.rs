// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::{
    auth::AuthContext,
    error::ApiError,
    models::UserResponse,
    state::AppState,
    storage::authorize_self,
};

#[utoipa::path(
    get,
    path = "/api/profile/{id}",
    params(("id" = String, Path, description = "User id, must be the caller's own")),
    tag = "Profile",
    security(("bearer" = [])),
    responses(
        (status = 200, body = UserResponse),
        (status = 403, description = "Anonymous caller or another user's profile")
    )
)]
pub async fn get_profile(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let principal = authorize_self(&ctx, &id)?;
    let user = state
        .users
        .find_by_id(&principal.id)?
        .ok_or_else(|| ApiError::not_found("user not found"))?;
    Ok(Json(user.into()))
}

/// Delete the caller's account together with all of its tasks.
///
/// Tokens already issued for the account stop resolving immediately.
#[utoipa::path(
    delete,
    path = "/api/profile/{id}",
    params(("id" = String, Path, description = "User id, must be the caller's own")),
    tag = "Profile",
    security(("bearer" = [])),
    responses(
        (status = 204, description = "Account deleted"),
        (status = 403, description = "Anonymous caller or another user's profile")
    )
)]
pub async fn delete_profile(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let principal = authorize_self(&ctx, &id)?;

    // The account goes first so its tokens stop resolving before the
    // tasks are swept.
    state.users.delete(&principal.id)?;
    let removed = state.tasks.delete_by_owner(&principal.id)?;

    info!(user_id = %principal.id, tasks_removed = removed, "account deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    };

    use super::*;
    use crate::{
        auth::{AuthError, IdentityResolver, TokenService},
        state::test_support::{register_user, test_state, TEST_SECRET},
        storage::{
            CredentialStore, InMemoryTaskStore, InMemoryUserStore, StorageResult, StoredTask,
            TaskStore,
        },
    };

    /// Task store that records whether the owner was already gone when its
    /// tasks were swept.
    struct SweepObserver {
        users: Arc<InMemoryUserStore>,
        inner: InMemoryTaskStore,
        owner_gone_at_sweep: AtomicBool,
    }

    impl TaskStore for SweepObserver {
        fn find_by_id(&self, id: &str) -> StorageResult<Option<StoredTask>> {
            self.inner.find_by_id(id)
        }

        fn list_by_owner(&self, owner_id: &str) -> StorageResult<Vec<StoredTask>> {
            self.inner.list_by_owner(owner_id)
        }

        fn insert(&self, task: StoredTask) -> StorageResult<()> {
            self.inner.insert(task)
        }

        fn update(&self, task: StoredTask) -> StorageResult<()> {
            self.inner.update(task)
        }

        fn delete(&self, id: &str) -> StorageResult<()> {
            self.inner.delete(id)
        }

        fn delete_by_owner(&self, owner_id: &str) -> StorageResult<usize> {
            let gone = self.users.find_by_id(owner_id)?.is_none();
            self.owner_gone_at_sweep.store(gone, Ordering::SeqCst);
            self.inner.delete_by_owner(owner_id)
        }
    }

    fn ctx_for(state: &AppState, email: &str) -> AuthContext {
        let principal = IdentityResolver::new(state.users.clone())
            .resolve(email)
            .unwrap();
        AuthContext::authenticated(principal)
    }

    #[tokio::test]
    async fn own_profile_is_returned() {
        let state = test_state();
        let (user, _) = register_user(&state, "ana@example.com");

        let Json(profile) = get_profile(
            State(state.clone()),
            ctx_for(&state, "ana@example.com"),
            Path(user.id.clone()),
        )
        .await
        .unwrap();
        assert_eq!(profile, UserResponse::from(user));
    }

    #[tokio::test]
    async fn other_profile_is_denied() {
        let state = test_state();
        register_user(&state, "ana@example.com");
        let (bob, _) = register_user(&state, "bob@example.com");

        let err = get_profile(
            State(state.clone()),
            ctx_for(&state, "ana@example.com"),
            Path(bob.id),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn anonymous_profile_request_is_denied() {
        let state = test_state();
        let (user, _) = register_user(&state, "ana@example.com");

        let err = get_profile(State(state), AuthContext::anonymous(), Path(user.id))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn delete_removes_account_and_stale_token_stops_resolving() {
        let state = test_state();
        let (user, token) = register_user(&state, "ana@example.com");

        let status = delete_profile(
            State(state.clone()),
            ctx_for(&state, "ana@example.com"),
            Path(user.id.clone()),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);

        assert_eq!(state.users.find_by_id(&user.id).unwrap(), None);

        // The token itself is still cryptographically valid.
        let subject = state.tokens.verify(&token).unwrap();
        assert!(matches!(
            state.identities.resolve(&subject),
            Err(AuthError::IdentityNotFound)
        ));
    }

    #[tokio::test]
    async fn account_is_removed_before_its_tasks() {
        let users = Arc::new(InMemoryUserStore::new());
        let tasks = Arc::new(SweepObserver {
            users: users.clone(),
            inner: InMemoryTaskStore::new(),
            owner_gone_at_sweep: AtomicBool::new(false),
        });
        let state = AppState::new(
            users,
            tasks.clone(),
            TokenService::new(TEST_SECRET, std::time::Duration::from_secs(3600)),
        );
        let (user, _) = register_user(&state, "ana@example.com");

        delete_profile(
            State(state.clone()),
            ctx_for(&state, "ana@example.com"),
            Path(user.id.clone()),
        )
        .await
        .unwrap();

        assert!(tasks.owner_gone_at_sweep.load(Ordering::SeqCst));
        assert!(state.tasks.list_by_owner(&user.id).unwrap().is_empty());
    }
}
