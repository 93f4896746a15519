// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication and authorization errors.
//!
//! The auth core only raises these; turning them into HTTP responses is the
//! job of [`crate::error::ApiError`].

use axum::http::StatusCode;
use thiserror::Error;

use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Signing failed while issuing a token (server configuration fault)
    #[error("failed to issue token: {0}")]
    TokenCreation(String),

    /// Signature, issuer or expiry check failed. Reasons are not distinguished.
    #[error("invalid or expired token")]
    TokenInvalid,

    /// A verified subject no longer resolves to a user
    #[error("invalid or expired token")]
    IdentityNotFound,

    /// Anonymous request, or the principal does not own the resource
    #[error("access denied")]
    AccessDenied,

    /// The targeted resource does not exist
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Login with an unknown email or a wrong password
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Password hashing failed
    #[error("password hashing failed: {0}")]
    PasswordHash(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type AuthResult<T> = Result<T, AuthError>;

impl AuthError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::TokenCreation(_) => "token_creation_failed",
            AuthError::TokenInvalid => "invalid_token",
            // Same code as a bad token: a stale token for a deleted account
            // must look exactly like any other rejected token.
            AuthError::IdentityNotFound => "invalid_token",
            AuthError::AccessDenied => "access_denied",
            AuthError::NotFound(_) => "not_found",
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::PasswordHash(_) | AuthError::Storage(_) => "internal_error",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::TokenInvalid
            | AuthError::IdentityNotFound
            | AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::AccessDenied => StatusCode::FORBIDDEN,
            AuthError::NotFound(_) => StatusCode::NOT_FOUND,
            AuthError::TokenCreation(_) | AuthError::PasswordHash(_) | AuthError::Storage(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
