// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

use crate::{auth::AuthError, storage::StorageError};

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub error_code: &'static str,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    error_code: &'static str,
}

impl ApiError {
    pub fn new(status: StatusCode, error_code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            error_code,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "not_found", message)
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, "validation_failed", message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, "conflict", message)
    }

    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_error",
            "internal server error",
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message,
            error_code: self.error_code,
        });
        (self.status, body).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        let status = err.status_code();
        if status.is_server_error() {
            // Details stay in the log; clients get a generic body.
            error!(error = %err, "request failed");
            return Self::new(status, err.error_code(), "internal server error");
        }
        Self::new(status, err.error_code(), err.to_string())
    }
}

/// Malformed or mistyped JSON bodies keep axum's status (400, 415 or 422)
/// but use the common error body.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection.status() {
            StatusCode::UNPROCESSABLE_ENTITY => Self::unprocessable(rejection.body_text()),
            status => Self::new(status, "invalid_body", rejection.body_text()),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::unprocessable(rejection.body_text())
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(what) => Self::not_found(format!("{what} not found")),
            StorageError::AlreadyExists(what) => Self::conflict(format!("{what} already exists")),
            StorageError::Poisoned => {
                error!("storage lock poisoned");
                Self::internal()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn constructors_set_status_and_message() {
        let nf = ApiError::not_found("missing");
        assert_eq!(nf.status, StatusCode::NOT_FOUND);
        assert_eq!(nf.message, "missing");

        let internal = ApiError::internal();
        assert_eq!(internal.status, StatusCode::INTERNAL_SERVER_ERROR);

        let unp = ApiError::unprocessable("oops");
        assert_eq!(unp.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(unp.error_code, "validation_failed");

        let conflict = ApiError::conflict("taken");
        assert_eq!(conflict.status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn into_response_returns_json_body() {
        let response = ApiError::conflict("taken").into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body_bytes.to_vec()).unwrap();
        assert_eq!(body, r#"{"error":"taken","error_code":"conflict"}"#);
    }

    #[test]
    fn auth_errors_map_to_statuses() {
        let cases = [
            (AuthError::TokenInvalid, StatusCode::UNAUTHORIZED, "invalid_token"),
            (AuthError::IdentityNotFound, StatusCode::UNAUTHORIZED, "invalid_token"),
            (AuthError::AccessDenied, StatusCode::FORBIDDEN, "access_denied"),
            (AuthError::NotFound("task"), StatusCode::NOT_FOUND, "not_found"),
            (
                AuthError::InvalidCredentials,
                StatusCode::UNAUTHORIZED,
                "invalid_credentials",
            ),
        ];
        for (err, status, code) in cases {
            let api = ApiError::from(err);
            assert_eq!(api.status, status);
            assert_eq!(api.error_code, code);
        }
    }

    #[test]
    fn stale_identity_is_indistinguishable_from_bad_token() {
        let stale = ApiError::from(AuthError::IdentityNotFound);
        let forged = ApiError::from(AuthError::TokenInvalid);
        assert_eq!(stale.message, forged.message);
        assert_eq!(stale.error_code, forged.error_code);
    }

    #[test]
    fn server_errors_hide_details() {
        let api = ApiError::from(AuthError::TokenCreation("key rejected".to_string()));
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!api.message.contains("key rejected"));

        let api = ApiError::from(AuthError::Storage(StorageError::Poisoned));
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.error_code, "internal_error");
    }

    #[test]
    fn storage_errors_map_to_statuses() {
        let api = ApiError::from(StorageError::AlreadyExists("Email a@b.c".to_string()));
        assert_eq!(api.status, StatusCode::CONFLICT);

        let api = ApiError::from(StorageError::NotFound("Task t-1".to_string()));
        assert_eq!(api.status, StatusCode::NOT_FOUND);
    }
}
