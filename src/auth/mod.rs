// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Stateless bearer-token authentication for the task API.
//!
//! ## Auth Flow
//!
//! 1. Client logs in with email/password and receives an HS256 token
//!    (`iss = todo-api`, `sub = email`, `exp = now + TTL`)
//! 2. Client sends `Authorization: Bearer <token>` on later requests
//! 3. The [`middleware::authenticate`] layer:
//!    - verifies signature, issuer and expiry ([`TokenService`])
//!    - loads the account named by the subject ([`IdentityResolver`])
//!    - stores the result as the request's [`AuthContext`]
//! 4. Handlers pass the context to the ownership guard in
//!    [`crate::storage::ownership`]
//!
//! ## Security
//!
//! - No server-side sessions; a token is valid until it expires
//! - Every verification failure is reported as the same error
//! - A token for a deleted account is rejected like a forged one

pub mod claims;
pub mod context;
pub mod error;
pub mod extractor;
pub mod middleware;
pub mod password;
pub mod resolver;
pub mod token;

pub use claims::{Principal, TokenClaims};
pub use context::AuthContext;
pub use error::{AuthError, AuthResult};
pub use resolver::IdentityResolver;
pub use token::{IssuedToken, TokenService, TOKEN_ISSUER};
