// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Signet Contributors

//! Router-level authentication middleware.
//!
//! Layered over a router subtree with
//! `axum::middleware::from_fn_with_state(state, authenticate)`. Each inbound
//! request starts unauthenticated; if a bearer credential is present and
//! verifies, the rebuilt [`Principal`] is installed in request extensions
//! and the request proceeds authenticated for its lifetime. A present but
//! invalid credential is rejected before the wrapped handler runs. An
//! absent credential passes through untouched: some routes are
//! intentionally public, and their handlers (via the extractors) decide.
//!
//! [`Principal`]: crate::principal::Principal

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::extractor::{bearer_token, resolve_principal};
use crate::state::AuthState;

/// Authenticate an inbound request before it reaches its handler.
pub async fn authenticate(
    State(state): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = match bearer_token(request.headers()) {
        Ok(Some(token)) => token.to_string(),
        Ok(None) => return next.run(request).await,
        Err(rejection) => return rejection.into_response(),
    };

    match resolve_principal(&state, &token) {
        Ok(principal) => {
            request.extensions_mut().insert(principal);
            next.run(request).await
        }
        Err(rejection) => rejection.into_response(),
    }
}
