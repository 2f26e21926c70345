// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Signet Contributors

//! Axum extractors for authenticated principals.
//!
//! Handlers declare their access policy by the extractor they use:
//!
//! ```rust,ignore
//! // Protected route: rejects with a uniform 401 when unauthenticated.
//! async fn report(Auth(principal): Auth) -> impl IntoResponse { /* … */ }
//!
//! // Public route: principal is present when a valid credential was sent.
//! async fn listing(OptionalAuth(principal): OptionalAuth) -> impl IntoResponse { /* … */ }
//! ```
//!
//! The principal is rebuilt per request: token verification gives the
//! subject id, the directory is read fresh, and privileges are re-flattened.
//! Nothing from issuance time is trusted for authorization, so grants and
//! revocations take effect on the next request without re-login.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};

use crate::error::AuthRejection;
use crate::principal::Principal;
use crate::privileges;
use crate::state::AuthState;

/// Pull the bearer token out of the `Authorization` header.
///
/// `Ok(None)` when the header is absent (not an error; the route's policy
/// decides), `Err` when a header is present but not a well-formed bearer
/// credential.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Result<Option<&str>, AuthRejection> {
    let Some(value) = headers.get(AUTHORIZATION) else {
        return Ok(None);
    };
    let value = value.to_str().map_err(|_| AuthRejection::Unauthenticated)?;
    let token = value
        .strip_prefix("Bearer ")
        .ok_or(AuthRejection::Unauthenticated)?;
    Ok(Some(token.trim()))
}

/// Verify a token and rebuild the request principal from the directory.
pub(crate) fn resolve_principal(
    state: &AuthState,
    token: &str,
) -> Result<Principal, AuthRejection> {
    let subject_id = state.tokens.verify(token)?;
    let record = state.directory.find_subject(&subject_id)?;
    let effective = privileges::flatten(&record.groups);
    Ok(Principal::new(record.id, record.username, effective))
}

/// Extractor for protected routes. Rejects with the uniform 401 when no
/// valid credential is presented.
pub struct Auth(pub Principal);

impl FromRequestParts<AuthState> for Auth {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AuthState,
    ) -> Result<Self, Self::Rejection> {
        // Middleware may already have authenticated this request.
        if let Some(principal) = parts.extensions.get::<Principal>().cloned() {
            return Ok(Auth(principal));
        }

        let token = bearer_token(&parts.headers)?.ok_or(AuthRejection::MissingCredential)?;
        let principal = resolve_principal(state, token)?;
        Ok(Auth(principal))
    }
}

/// Extractor for public routes that can still personalize when a valid
/// credential happens to be present. Absence or failure yields `None`.
pub struct OptionalAuth(pub Option<Principal>);

impl FromRequestParts<AuthState> for OptionalAuth {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AuthState,
    ) -> Result<Self, Self::Rejection> {
        match Auth::from_request_parts(parts, state).await {
            Ok(Auth(principal)) => Ok(OptionalAuth(Some(principal))),
            Err(_) => Ok(OptionalAuth(None)),
        }
    }
}
