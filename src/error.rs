// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Signet Contributors

//! Error taxonomy for the token and signed-link authorities.
//!
//! The internal types stay precise so failures can be traced, but everything
//! that crosses the HTTP boundary collapses into [`AuthRejection`], which
//! renders one fixed body for every cause. A caller probing the endpoint
//! learns only that it was not authenticated, never which check failed.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Identity-token issuance failure.
///
/// Raised when the claim set cannot be serialized or the signing key is
/// unusable. Surfaced to the caller of `issue`, never silently defaulted.
#[derive(Debug, Error)]
#[error("identity token could not be created")]
pub struct CreationError {
    #[source]
    pub(crate) source: jsonwebtoken::errors::Error,
}

/// Identity-token verification failure.
///
/// Variants exist for tracing only. Callers must treat every variant as
/// "unauthenticated"; the boundary response does not distinguish them.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum VerificationError {
    #[error("token structure is malformed")]
    Malformed,
    #[error("token signature mismatch")]
    InvalidSignature,
    #[error("token issuer mismatch")]
    IssuerMismatch,
    #[error("token subject label mismatch")]
    SubjectMismatch,
    #[error("token has expired")]
    Expired,
}

/// Uniform boundary rejection.
///
/// Every authentication failure (absent credential on a protected route,
/// malformed or tampered token, expiry, issuer mismatch, subject lookup
/// failure) maps here and renders the same `401` body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRejection {
    /// No bearer credential was presented on a route that requires one.
    MissingCredential,
    /// A credential was presented but could not be accepted.
    Unauthenticated,
}

#[derive(Serialize)]
struct RejectionBody {
    error: &'static str,
}

impl From<VerificationError> for AuthRejection {
    fn from(error: VerificationError) -> Self {
        tracing::debug!(%error, "token verification failed");
        AuthRejection::Unauthenticated
    }
}

impl From<crate::directory::DirectoryError> for AuthRejection {
    fn from(error: crate::directory::DirectoryError) -> Self {
        tracing::debug!(%error, "subject lookup failed");
        AuthRejection::Unauthenticated
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        // One body for every cause. The response must not reveal which
        // check failed.
        let body = Json(RejectionBody {
            error: "unauthenticated",
        });
        (StatusCode::UNAUTHORIZED, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn rejection_body_is_uniform() {
        for rejection in [AuthRejection::MissingCredential, AuthRejection::Unauthenticated] {
            let response = rejection.into_response();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

            let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let body = String::from_utf8(body_bytes.to_vec()).unwrap();
            assert_eq!(body, r#"{"error":"unauthenticated"}"#);
        }
    }

    #[test]
    fn verification_error_collapses_to_unauthenticated() {
        for error in [
            VerificationError::Malformed,
            VerificationError::InvalidSignature,
            VerificationError::IssuerMismatch,
            VerificationError::SubjectMismatch,
            VerificationError::Expired,
        ] {
            assert_eq!(AuthRejection::from(error), AuthRejection::Unauthenticated);
        }
    }
}
