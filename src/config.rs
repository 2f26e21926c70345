// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Signet Contributors

//! # Secret Configuration
//!
//! Both signing secrets are supplied by the embedding process at startup and
//! are immutable afterwards. They are carried in an explicit [`SecretConfig`]
//! handed to the authority constructors, so a process can hold several
//! configurations side by side (useful in tests).
//!
//! ## Environment Variables
//!
//! | Variable | Description |
//! |----------|-------------|
//! | `JWT_SECRET` | Symmetric key for identity-token HMAC signatures |
//! | `URL_SIGN_SECRET` | Server-held secret mixed into signed-link digests |
//!
//! Neither value may be empty, and neither is ever included in `Debug`
//! output, log events, or error messages.

use std::env;
use std::fmt;

use thiserror::Error;

/// Environment variable holding the identity-token signing secret.
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";

/// Environment variable holding the signed-link secret.
pub const URL_SIGN_SECRET_ENV: &str = "URL_SIGN_SECRET";

/// Errors raised while loading or validating secret material.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The named secret was not set or was set to an empty string.
    #[error("secret {0} is missing or empty")]
    MissingSecret(&'static str),
}

/// Validated, immutable secret material for both authorities.
///
/// Construct with [`SecretConfig::new`] (explicit values) or
/// [`SecretConfig::from_env`] (process environment). Empty secrets are
/// rejected at construction so the authorities never have to re-check.
#[derive(Clone)]
pub struct SecretConfig {
    token_secret: String,
    link_secret: String,
}

impl SecretConfig {
    pub fn new(
        token_secret: impl Into<String>,
        link_secret: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let token_secret = token_secret.into();
        let link_secret = link_secret.into();
        if token_secret.is_empty() {
            return Err(ConfigError::MissingSecret(JWT_SECRET_ENV));
        }
        if link_secret.is_empty() {
            return Err(ConfigError::MissingSecret(URL_SIGN_SECRET_ENV));
        }
        Ok(Self {
            token_secret,
            link_secret,
        })
    }

    /// Load both secrets from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let token_secret =
            env::var(JWT_SECRET_ENV).map_err(|_| ConfigError::MissingSecret(JWT_SECRET_ENV))?;
        let link_secret = env::var(URL_SIGN_SECRET_ENV)
            .map_err(|_| ConfigError::MissingSecret(URL_SIGN_SECRET_ENV))?;
        Self::new(token_secret, link_secret)
    }

    /// Key bytes for the identity-token HMAC.
    pub(crate) fn token_secret(&self) -> &[u8] {
        self.token_secret.as_bytes()
    }

    /// Secret string mixed into signed-link digests.
    pub(crate) fn link_secret(&self) -> &str {
        &self.link_secret
    }
}

impl fmt::Debug for SecretConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretConfig")
            .field("token_secret", &"<redacted>")
            .field("link_secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_token_secret() {
        let err = SecretConfig::new("", "link").unwrap_err();
        assert_eq!(err, ConfigError::MissingSecret(JWT_SECRET_ENV));
    }

    #[test]
    fn rejects_empty_link_secret() {
        let err = SecretConfig::new("token", "").unwrap_err();
        assert_eq!(err, ConfigError::MissingSecret(URL_SIGN_SECRET_ENV));
    }

    #[test]
    fn accepts_non_empty_secrets() {
        let config = SecretConfig::new("token", "link").unwrap();
        assert_eq!(config.token_secret(), b"token");
        assert_eq!(config.link_secret(), "link");
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let config = SecretConfig::new("super-secret", "other-secret").unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(!rendered.contains("other-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
