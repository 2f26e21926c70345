// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Signet Contributors

//! Identity-token authority.
//!
//! Issues and verifies the self-contained HS256-signed token that carries a
//! subject's identity and flattened privilege claims. Verification is a pure
//! function of (token, secret, clock); there is no server-side session state
//! and no revocation list. A token simply stops being accepted once its
//! 24-hour window passes.

use std::sync::Arc;

use jsonwebtoken::{
    decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

use crate::clock::{Clock, SystemClock};
use crate::config::SecretConfig;
use crate::error::{CreationError, VerificationError};
use crate::principal::Principal;

/// Fixed issuer claim; checked on every verification.
pub const ISSUER: &str = "signet-auth";

/// Fixed subject label. The JWT `sub` claim carries this constant, not the
/// subject id; the id travels in the `uid` claim.
pub const SUBJECT_LABEL: &str = "user-details";

/// Tokens are valid for exactly 24 hours from issuance.
const TOKEN_TTL_SECONDS: i64 = 24 * 60 * 60;

/// Signed claim set. The signature covers every field; any mutation
/// invalidates verification.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iss: String,
    uid: String,
    username: String,
    privileges: Vec<String>,
    iat: i64,
    exp: i64,
}

/// Issues and verifies identity tokens with a process-wide symmetric secret.
///
/// Immutable after construction; safe to share across concurrent requests.
pub struct TokenAuthority {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl TokenAuthority {
    pub fn new(config: &SecretConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: &SecretConfig, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[ISSUER]);
        validation.validate_aud = false;
        // Expiry is checked against the injected clock below, not by the
        // decoder, so the 24h bound is testable without sleeping.
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(config.token_secret()),
            decoding_key: DecodingKey::from_secret(config.token_secret()),
            validation,
            clock,
        }
    }

    /// Issue a signed token for the given principal.
    ///
    /// Claims carry the subject id, username, and the flattened privilege
    /// set (sorted, so issuance is deterministic for a given clock reading).
    /// The privileges in the token are informational snapshots; the
    /// authenticator re-reads the directory on every request.
    pub fn issue(&self, principal: &Principal) -> Result<String, CreationError> {
        let now = self.clock.now().timestamp();
        let claims = Claims {
            sub: SUBJECT_LABEL.to_string(),
            iss: ISSUER.to_string(),
            uid: principal.id.clone(),
            username: principal.username.clone(),
            privileges: principal.privileges.iter().cloned().collect(),
            iat: now,
            exp: now + TOKEN_TTL_SECONDS,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|source| CreationError { source })
    }

    /// Verify a presented token and return its subject id.
    ///
    /// Checks structure, signature, issuer, subject label, and that the
    /// clock has not passed `exp`. Callers must treat every error variant
    /// uniformly as "unauthenticated".
    pub fn verify(&self, token: &str) -> Result<String, VerificationError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    VerificationError::InvalidSignature
                }
                jsonwebtoken::errors::ErrorKind::InvalidIssuer => VerificationError::IssuerMismatch,
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => VerificationError::Expired,
                _ => VerificationError::Malformed,
            }
        })?;

        if data.claims.sub != SUBJECT_LABEL {
            return Err(VerificationError::SubjectMismatch);
        }

        if self.clock.now().timestamp() > data.claims.exp {
            return Err(VerificationError::Expired);
        }

        Ok(data.claims.uid)
    }
}
