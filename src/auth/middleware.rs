// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication middleware for Axum.
//!
//! Runs ahead of every route and publishes an [`AuthContext`] into the
//! request extensions:
//!
//! - no `Authorization` header: anonymous context, request continues
//! - token present and valid, subject resolves: authenticated context
//! - token invalid, or subject no longer exists: the failure goes to
//!   [`ApiError`] and the request stops here
//!
//! ```rust,ignore
//! let app = Router::new()
//!     .route("/api/task", get(list_tasks))
//!     .layer(axum::middleware::from_fn_with_state(state.clone(), authenticate));
//! ```

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use super::{AuthContext, AuthError, AuthResult, IdentityResolver, TokenService};
use crate::{error::ApiError, state::AppState};

/// Scheme prefix stripped from the `Authorization` header value.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Extract the bearer token from the request headers.
///
/// Returns `None` when the header is absent or not visible ASCII. The scheme
/// prefix is stripped when present; a value without it is returned as-is and
/// will simply fail verification.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    Some(value.strip_prefix(BEARER_PREFIX).unwrap_or(value).trim())
}

/// Build the authentication context for a request's headers.
///
/// Verification always happens before identity resolution, so the resolver
/// only ever sees a subject taken from a validated token.
pub fn resolve_context(
    headers: &HeaderMap,
    tokens: &TokenService,
    identities: &IdentityResolver,
) -> AuthResult<AuthContext> {
    let Some(token) = bearer_token(headers) else {
        return Ok(AuthContext::anonymous());
    };

    let subject = tokens.verify(token)?;

    let principal = identities.resolve(&subject).inspect_err(|e| {
        if matches!(e, AuthError::IdentityNotFound) {
            warn!(subject = %subject, "valid token for unknown account rejected");
        }
    })?;

    Ok(AuthContext::authenticated(principal))
}

/// Authentication middleware function.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    match resolve_context(request.headers(), &state.tokens, &state.identities) {
        Ok(ctx) => {
            request.extensions_mut().insert(ctx);
            next.run(request).await
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}
