// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bearer token issuance and verification.
//!
//! Tokens are HS256 JWTs signed with the process-wide secret. There is no
//! server-side session record: a token is valid until its `exp` passes.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::debug;

use super::{AuthError, AuthResult, Principal, TokenClaims};

/// Issuer claim written into and required from every token.
pub const TOKEN_ISSUER: &str = "todo-api";

/// A freshly signed token and its expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Issues and verifies signed, time-limited bearer tokens.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("issuer", &TOKEN_ISSUER)
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl TokenService {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[TOKEN_ISSUER]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation.validate_aud = false;
        // Expiry is compared against the caller's clock in `verify_at`.
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    /// Issue a token for `principal`, valid for the configured TTL.
    pub fn issue(&self, principal: &Principal) -> AuthResult<IssuedToken> {
        self.issue_at(principal, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    pub fn issue_at(&self, principal: &Principal, now: DateTime<Utc>) -> AuthResult<IssuedToken> {
        let ttl = chrono::Duration::from_std(self.ttl)
            .map_err(|e| AuthError::TokenCreation(format!("token ttl out of range: {e}")))?;
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| AuthError::TokenCreation("token expiry overflows".to_string()))?;

        let claims = TokenClaims {
            iss: TOKEN_ISSUER.to_string(),
            sub: principal.email.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::TokenCreation(e.to_string()))?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Verify a token and return its subject.
    pub fn verify(&self, token: &str) -> AuthResult<String> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token as if the current time were `now`.
    ///
    /// Every failure (bad signature, wrong algorithm, wrong issuer, missing
    /// claims, expiry) is reported as [`AuthError::TokenInvalid`].
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> AuthResult<String> {
        let data = decode::<TokenClaims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            debug!(reason = ?e.kind(), "bearer token rejected");
            AuthError::TokenInvalid
        })?;

        let claims = data.claims;
        if claims.exp <= now.timestamp() {
            debug!(exp = claims.exp, "bearer token expired");
            return Err(AuthError::TokenInvalid);
        }

        Ok(claims.sub)
    }
}
