// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Request-scoped authentication context.

use super::{AuthError, AuthResult, Principal};

/// Holds the principal for the current request, or nothing for an
/// anonymous request.
///
/// Created by [`super::middleware::authenticate`] and stored in the request's
/// extensions, so it is dropped together with the request. An authenticated
/// context can only be built inside this crate, from a verified token.
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
    principal: Option<Principal>,
}

impl AuthContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub(crate) fn authenticated(principal: Principal) -> Self {
        Self {
            principal: Some(principal),
        }
    }

    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    /// The current principal, or [`AuthError::AccessDenied`] when anonymous.
    pub fn require(&self) -> AuthResult<&Principal> {
        self.principal.as_ref().ok_or(AuthError::AccessDenied)
    }
}
