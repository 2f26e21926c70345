// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Signet Contributors

//! Login flow boundary.
//!
//! The caller supplies an identifier and password; the credential check is
//! delegated to the [`Directory`], privileges are flattened, and a fresh
//! identity token is issued. The returned token string is the bearer
//! credential for all subsequent calls. Every failure (unknown subject,
//! bad password, store error, issuance error) maps to the same uniform
//! rejection so the endpoint reveals nothing about which step failed.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::directory::Directory;
use crate::error::AuthRejection;
use crate::principal::Principal;
use crate::privileges;
use crate::state::AuthState;
use crate::token::TokenAuthority;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub identifier: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Check credentials against the directory and issue an identity token.
pub fn issue_for_credentials(
    directory: &dyn Directory,
    tokens: &TokenAuthority,
    identifier: &str,
    password: &str,
) -> Result<String, AuthRejection> {
    let record = directory.verify_credentials(identifier, password)?;
    let effective = privileges::flatten(&record.groups);
    let principal = Principal::new(record.id, record.username, effective);
    tokens.issue(&principal).map_err(|error| {
        tracing::error!(%error, "token issuance failed at login");
        AuthRejection::Unauthenticated
    })
}

/// Axum login handler: `POST` with `{identifier, password}`, responds with
/// `{"token": …}` on success and the uniform 401 otherwise.
pub async fn login(
    State(state): State<AuthState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthRejection> {
    let token = issue_for_credentials(
        state.directory.as_ref(),
        &state.tokens,
        &request.identifier,
        &request.password,
    )?;
    Ok(Json(LoginResponse { token }))
}
