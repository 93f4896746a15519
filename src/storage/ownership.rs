// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Ownership enforcement for user-owned records.
//!
//! Every task access on behalf of a user goes through [`authorize_owned`],
//! which applies the checks in a fixed order:
//!
//! 1. the request must carry an authenticated principal (`AccessDenied`)
//! 2. the record must exist (`NotFound`)
//! 3. the principal must own it (`AccessDenied`)
//!
//! Anonymous callers are rejected before the store is touched, so they cannot
//! learn whether an id exists.

use crate::auth::{AuthContext, AuthError, AuthResult, Principal};

use super::StorageResult;

/// A record that belongs to exactly one user.
pub trait OwnedResource {
    /// Id of the owning user.
    fn owner_id(&self) -> &str;
}

/// Ownership check against an authenticated principal.
pub trait OwnershipEnforcer {
    /// # Errors
    /// Returns `AuthError::AccessDenied` if `principal` does not own `self`.
    fn verify_ownership(&self, principal: &Principal) -> AuthResult<()>;
}

impl<T: OwnedResource> OwnershipEnforcer for T {
    fn verify_ownership(&self, principal: &Principal) -> AuthResult<()> {
        if self.owner_id() == principal.id {
            Ok(())
        } else {
            Err(AuthError::AccessDenied)
        }
    }
}

/// Authenticate, locate, then authorize access to an owned record.
///
/// `locate` is only called once the context is known to be authenticated.
/// `kind` names the record in the `NotFound` error.
pub fn authorize_owned<T, F>(ctx: &AuthContext, kind: &'static str, locate: F) -> AuthResult<T>
where
    T: OwnedResource,
    F: FnOnce() -> StorageResult<Option<T>>,
{
    let principal = ctx.require()?;
    let resource = locate()?.ok_or(AuthError::NotFound(kind))?;
    resource.verify_ownership(principal)?;
    Ok(resource)
}

/// Allow access only when `provided_id` is the principal's own id.
pub fn authorize_self<'a>(ctx: &'a AuthContext, provided_id: &str) -> AuthResult<&'a Principal> {
    let principal = ctx.require()?;
    if principal.id == provided_id {
        Ok(principal)
    } else {
        Err(AuthError::AccessDenied)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::storage::StorageError;

    #[derive(Debug)]
    struct Note {
        owner: String,
    }

    impl OwnedResource for Note {
        fn owner_id(&self) -> &str {
            &self.owner
        }
    }

    fn principal(id: &str) -> Principal {
        Principal {
            id: id.to_string(),
            email: format!("{id}@example.com"),
            password_hash: String::new(),
        }
    }

    fn note(owner: &str) -> Note {
        Note {
            owner: owner.to_string(),
        }
    }

    #[test]
    fn owner_passes_verification() {
        assert!(note("alice").verify_ownership(&principal("alice")).is_ok());
        assert!(matches!(
            note("alice").verify_ownership(&principal("bob")),
            Err(AuthError::AccessDenied)
        ));
    }

    #[test]
    fn anonymous_is_denied_without_lookup() {
        let called = Cell::new(false);
        let result = authorize_owned(&AuthContext::anonymous(), "task", || {
            called.set(true);
            Ok(Some(note("alice")))
        });

        assert!(matches!(result, Err(AuthError::AccessDenied)));
        assert!(!called.get());
    }

    #[test]
    fn anonymous_is_denied_even_for_missing_records() {
        let result = authorize_owned::<Note, _>(&AuthContext::anonymous(), "task", || Ok(None));
        assert!(matches!(result, Err(AuthError::AccessDenied)));
    }

    #[test]
    fn missing_record_is_not_found() {
        let ctx = AuthContext::authenticated(principal("alice"));
        let result = authorize_owned::<Note, _>(&ctx, "task", || Ok(None));
        assert!(matches!(result, Err(AuthError::NotFound("task"))));
    }

    #[test]
    fn foreign_record_is_denied_after_lookup() {
        let called = Cell::new(false);
        let ctx = AuthContext::authenticated(principal("bob"));
        let result = authorize_owned(&ctx, "task", || {
            called.set(true);
            Ok(Some(note("alice")))
        });

        assert!(called.get());
        assert!(matches!(result, Err(AuthError::AccessDenied)));
    }

    #[test]
    fn owner_gets_the_record() {
        let ctx = AuthContext::authenticated(principal("alice"));
        let resource = authorize_owned(&ctx, "task", || Ok(Some(note("alice")))).unwrap();
        assert_eq!(resource.owner, "alice");
    }

    #[test]
    fn storage_failures_propagate() {
        let ctx = AuthContext::authenticated(principal("alice"));
        let result =
            authorize_owned::<Note, _>(&ctx, "task", || Err(StorageError::Poisoned));
        assert!(matches!(result, Err(AuthError::Storage(StorageError::Poisoned))));
    }

    #[test]
    fn self_guard() {
        let ctx = AuthContext::authenticated(principal("alice"));
        assert_eq!(authorize_self(&ctx, "alice").unwrap().id, "alice");
        assert!(matches!(
            authorize_self(&ctx, "bob"),
            Err(AuthError::AccessDenied)
        ));
        assert!(matches!(
            authorize_self(&AuthContext::anonymous(), "alice"),
            Err(AuthError::AccessDenied)
        ));
    }
}
