// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractor for the request's [`AuthContext`].
//!
//! ```rust,ignore
//! async fn my_handler(ctx: AuthContext) -> impl IntoResponse {
//!     let principal = ctx.require()?;
//! }
//! ```

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};

use super::AuthContext;

/// Reads the context published by the authentication middleware.
///
/// Never rejects: a request the middleware did not authenticate (or a route
/// mounted without the middleware) yields an anonymous context, and the
/// authorization guard decides what an anonymous caller may do.
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .unwrap_or_default())
    }
}
