// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Registration and login.
//!
//! Both routes are public. Login is the only place a token is issued.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    auth::{
        password::{hash_password, verify_credentials},
        AuthError, AuthResult, Principal,
    },
    error::ApiError,
    models::{normalize_email, LoginRequest, LoginResponse, RegisterRequest, UserResponse},
    state::AppState,
    storage::StoredUser,
};

#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    tag = "Auth",
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 409, description = "Email already registered"),
        (status = 422, description = "Invalid name, email or password")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let Json(request) = payload?;
    request.validate()?;

    let password = request.password;
    let password_hash = run_blocking(move || hash_password(&password)).await?;

    let user = StoredUser {
        id: Uuid::new_v4().to_string(),
        name: request.name.trim().to_string(),
        email: normalize_email(&request.email),
        password_hash,
        created_at: Utc::now(),
    };
    state.users.insert(user.clone())?;

    info!(user_id = %user.id, "account registered");
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    tag = "Auth",
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 401, description = "Invalid email or password")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(request) = payload?;
    let email = normalize_email(&request.email);
    let user = state.users.find_by_email(&email)?;

    let password = request.password;
    let stored_hash = user.as_ref().map(|user| user.password_hash.clone());
    let verified =
        run_blocking(move || verify_credentials(&password, stored_hash.as_deref())).await?;

    let user = match user {
        Some(user) if verified => user,
        Some(user) => {
            warn!(user_id = %user.id, "login with wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }
        None => {
            warn!(email = %email, "login for unknown account");
            return Err(AuthError::InvalidCredentials.into());
        }
    };

    let issued = state.tokens.issue(&Principal::from(user.clone()))?;
    info!(user_id = %user.id, expires_at = %issued.expires_at, "token issued");

    Ok(Json(LoginResponse {
        id: user.id,
        name: user.name,
        email: user.email,
        token: issued.token,
        expires_at: issued.expires_at,
    }))
}

/// Run Argon2 work off the async worker threads.
async fn run_blocking<T, F>(work: F) -> AuthResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> AuthResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AuthError::PasswordHash(e.to_string()))?
}
