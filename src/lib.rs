// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Signet Contributors

//! signet-auth - Stateless Token & Signed-Link Authority
//!
//! Authentication and authorization core for a multi-tenant web backend.
//! No server-side session state: an HS256-signed identity token is issued
//! once at login and re-verified on every request, and short-lived signed
//! links grant sessionless access to individually addressable resources.
//!
//! ## Modules
//!
//! - `config` - secret material (env-loaded, validated, Debug-redacted)
//! - `clock` - injectable time source
//! - `principal` / `privileges` - identity data and group-grant flattening
//! - `token` - identity-token issue/verify (`TokenAuthority`)
//! - `link` - signed resource links (`SignedLinkAuthority`)
//! - `directory` - entity-store read boundary
//! - `extractor` / `middleware` / `login` - axum integration

pub mod clock;
pub mod config;
pub mod directory;
pub mod error;
pub mod extractor;
pub mod link;
pub mod login;
pub mod middleware;
pub mod principal;
pub mod privileges;
pub mod state;
pub mod token;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ConfigError, SecretConfig};
pub use directory::{Directory, DirectoryError, InMemoryDirectory, SubjectRecord};
pub use error::{AuthRejection, CreationError, VerificationError};
pub use extractor::{Auth, OptionalAuth};
pub use link::{SignedLink, SignedLinkAuthority};
pub use login::{issue_for_credentials, login, LoginRequest, LoginResponse};
pub use middleware::authenticate;
pub use principal::{GroupGrant, Principal};
pub use state::AuthState;
pub use token::TokenAuthority;
