// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::{
    auth::{IdentityResolver, TokenService},
    storage::{CredentialStore, InMemoryTaskStore, InMemoryUserStore, TaskStore},
};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn CredentialStore>,
    pub tasks: Arc<dyn TaskStore>,
    pub tokens: Arc<TokenService>,
    pub identities: IdentityResolver,
}

impl AppState {
    pub fn new(
        users: Arc<dyn CredentialStore>,
        tasks: Arc<dyn TaskStore>,
        tokens: TokenService,
    ) -> Self {
        Self {
            identities: IdentityResolver::new(users.clone()),
            users,
            tasks,
            tokens: Arc::new(tokens),
        }
    }

    /// State backed by empty in-memory stores.
    pub fn in_memory(tokens: TokenService) -> Self {
        Self::new(
            Arc::new(InMemoryUserStore::new()),
            Arc::new(InMemoryTaskStore::new()),
            tokens,
        )
    }
}
