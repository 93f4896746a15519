// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Maps a verified token subject to a full [`Principal`].

use std::sync::Arc;

use super::{AuthError, AuthResult, Principal};
use crate::storage::CredentialStore;

/// Loads the principal named by a verified token subject.
///
/// Must only be called with a subject returned by
/// [`super::TokenService::verify`], never with raw client input.
#[derive(Clone)]
pub struct IdentityResolver {
    users: Arc<dyn CredentialStore>,
}

impl IdentityResolver {
    pub fn new(users: Arc<dyn CredentialStore>) -> Self {
        Self { users }
    }

    pub fn resolve(&self, email: &str) -> AuthResult<Principal> {
        self.users
            .find_by_email(email)?
            .map(Principal::from)
            .ok_or(AuthError::IdentityNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{InMemoryUserStore, StoredUser};
    use chrono::Utc;

    fn store_with(email: &str) -> Arc<InMemoryUserStore> {
        let store = Arc::new(InMemoryUserStore::new());
        store
            .insert(StoredUser {
                id: "user-1".to_string(),
                name: "Ana".to_string(),
                email: email.to_string(),
                password_hash: "hash".to_string(),
                created_at: Utc::now(),
            })
            .unwrap();
        store
    }

    #[test]
    fn resolves_existing_subject() {
        let resolver = IdentityResolver::new(store_with("ana@example.com"));
        let principal = resolver.resolve("ana@example.com").unwrap();
        assert_eq!(principal.id, "user-1");
        assert_eq!(principal.email, "ana@example.com");
    }

    #[test]
    fn unknown_subject_is_identity_not_found() {
        let resolver = IdentityResolver::new(store_with("ana@example.com"));
        assert!(matches!(
            resolver.resolve("ghost@example.com"),
            Err(AuthError::IdentityNotFound)
        ));
    }

    #[test]
    fn deleted_user_no_longer_resolves() {
        let store = store_with("ana@example.com");
        let resolver = IdentityResolver::new(store.clone());
        assert!(resolver.resolve("ana@example.com").is_ok());

        store.delete("user-1").unwrap();
        assert!(matches!(
            resolver.resolve("ana@example.com"),
            Err(AuthError::IdentityNotFound)
        ));
    }
}
