// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Password hashing and verification (Argon2id, PHC string format).

use std::sync::LazyLock;

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;

use super::{AuthError, AuthResult};

/// Hash checked when a login names no account, so the unknown-email path
/// pays the same Argon2 cost as a wrong password.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("no account has this password").ok());

#[cfg(test)]
thread_local! {
    static VERIFY_RUNS: std::cell::Cell<usize> = const { std::cell::Cell::new(0) };
}

/// Hash a password with a fresh random salt.
pub fn hash_password(password: &str) -> AuthResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::PasswordHash(e.to_string()))
}

/// Check a password against a stored PHC hash.
///
/// Returns `Ok(false)` for a wrong password and an error only when the
/// stored hash itself is unusable.
pub fn verify_password(password: &str, hash: &str) -> AuthResult<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| AuthError::PasswordHash(e.to_string()))?;

    #[cfg(test)]
    VERIFY_RUNS.with(|runs| runs.set(runs.get() + 1));

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::PasswordHash(e.to_string())),
    }
}

/// Check a login attempt against the stored hash of the named account.
///
/// `None` (no such account) still runs a full verification against a dummy
/// hash and always returns `Ok(false)`.
pub fn verify_credentials(password: &str, stored_hash: Option<&str>) -> AuthResult<bool> {
    match stored_hash {
        Some(hash) => verify_password(password, hash),
        None => {
            if let Some(dummy) = DUMMY_HASH.as_deref() {
                let _ = verify_password(password, dummy);
            }
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_salted_phc_string() {
        let first = hash_password("hunter22").unwrap();
        let second = hash_password("hunter22").unwrap();

        assert!(first.starts_with("$argon2id$"));
        assert_ne!(first, second);
    }

    #[test]
    fn verify_accepts_right_and_rejects_wrong_password() {
        let hash = hash_password("correct horse").unwrap();
        assert!(verify_password("correct horse", &hash).unwrap());
        assert!(!verify_password("battery staple", &hash).unwrap());
    }

    #[test]
    fn verify_with_corrupt_hash_is_an_error() {
        assert!(matches!(
            verify_password("whatever", "not-a-phc-string"),
            Err(AuthError::PasswordHash(_))
        ));
    }

    fn verify_runs() -> usize {
        VERIFY_RUNS.with(|runs| runs.get())
    }

    #[test]
    fn unknown_account_still_runs_argon2() {
        let before = verify_runs();
        assert!(!verify_credentials("correct horse", None).unwrap());
        assert_eq!(verify_runs(), before + 1);
    }

    #[test]
    fn known_account_is_checked_against_its_hash() {
        let hash = hash_password("correct horse").unwrap();
        let before = verify_runs();

        assert!(verify_credentials("correct horse", Some(&hash)).unwrap());
        assert!(!verify_credentials("battery staple", Some(&hash)).unwrap());
        assert_eq!(verify_runs(), before + 2);
    }

    #[test]
    fn dummy_hash_is_a_usable_phc_string() {
        let dummy = DUMMY_HASH.as_deref().unwrap();
        assert!(dummy.starts_with("$argon2id$"));
        assert!(PasswordHash::new(dummy).is_ok());
    }
}
