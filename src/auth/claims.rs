// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token claims and the authenticated principal.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::storage::StoredUser;

/// Claims carried inside a bearer token.
///
/// The subject is the user's email. Issuer and expiry are validated on every
/// request; `iat` is informational.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Issuer, always [`super::token::TOKEN_ISSUER`]
    pub iss: String,
    /// Subject (user email)
    pub sub: String,
    /// Issued at (Unix seconds)
    pub iat: i64,
    /// Expiration (Unix seconds)
    pub exp: i64,
}

/// The identity resolved for a request.
///
/// Built from a credential record after the token naming it was verified.
/// Never serialized to clients.
#[derive(Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: String,
    pub email: String,
    pub password_hash: String,
}

impl fmt::Debug for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Principal")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

impl From<StoredUser> for Principal {
    fn from(user: StoredUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
            password_hash: user.password_hash,
        }
    }
}
