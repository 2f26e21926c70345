// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Signet Contributors

use std::sync::Arc;

use crate::directory::Directory;
use crate::link::SignedLinkAuthority;
use crate::token::TokenAuthority;

/// Shared authentication state for axum routers.
///
/// Everything inside is read-only after startup, so clones are cheap and no
/// locking is involved in signing or verification.
#[derive(Clone)]
pub struct AuthState {
    pub tokens: Arc<TokenAuthority>,
    pub links: Arc<SignedLinkAuthority>,
    pub directory: Arc<dyn Directory>,
}

impl AuthState {
    pub fn new(
        tokens: TokenAuthority,
        links: SignedLinkAuthority,
        directory: Arc<dyn Directory>,
    ) -> Self {
        Self {
            tokens: Arc::new(tokens),
            links: Arc::new(links),
            directory,
        }
    }
}
