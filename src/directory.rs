// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Signet Contributors

//! Entity-store boundary.
//!
//! Users, groups, and privileges live in an external keyed-entity store.
//! This crate only reads that graph: once per authenticated request to
//! rebuild the principal, and once at login to check credentials. The
//! [`Directory`] trait is that read boundary; [`InMemoryDirectory`] is the
//! embedded implementation used by tests and small deployments.

use std::collections::HashMap;
use std::sync::RwLock;

use thiserror::Error;

use crate::principal::GroupGrant;

/// A subject as stored in the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectRecord {
    /// Opaque identifier; also the token subject claim value.
    pub id: String,
    /// Unique login name.
    pub username: String,
    /// Display name; input to signed-link derivation.
    pub full_name: String,
    /// Group memberships with their granted privileges.
    pub groups: Vec<GroupGrant>,
}

/// Failures from the directory read boundary.
///
/// All variants are recovered at the authenticator and rendered as the
/// uniform unauthenticated response; none is retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("subject not found")]
    NotFound,
    #[error("credentials rejected")]
    BadCredentials,
    #[error("directory unavailable: {0}")]
    Unavailable(String),
}

/// Read access to the user/group/privilege graph.
///
/// Calls are synchronous and must not retry internally; a store failure
/// propagates as an authentication failure. Implementations over a real
/// store compare password hashes in `verify_credentials`; the plaintext
/// password never leaves this boundary.
pub trait Directory: Send + Sync {
    /// Resolve a subject by its opaque identifier.
    fn find_subject(&self, id: &str) -> Result<SubjectRecord, DirectoryError>;

    /// Check a login credential pair and return the matching subject.
    fn verify_credentials(
        &self,
        identifier: &str,
        password: &str,
    ) -> Result<SubjectRecord, DirectoryError>;
}

struct StoredSubject {
    record: SubjectRecord,
    password: String,
}

/// In-memory [`Directory`] keyed by subject id, with a username index for
/// login. Interior locking so group grants can change while requests are in
/// flight; the next authentication observes the change.
#[derive(Default)]
pub struct InMemoryDirectory {
    subjects: RwLock<HashMap<String, StoredSubject>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a subject with its login password.
    pub fn insert_subject(&self, record: SubjectRecord, password: impl Into<String>) {
        let mut subjects = self
            .subjects
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        subjects.insert(
            record.id.clone(),
            StoredSubject {
                record,
                password: password.into(),
            },
        );
    }

    /// Replace a subject's group memberships.
    ///
    /// Takes effect on the next authentication; tokens already issued are
    /// unaffected because privileges are re-read per request.
    pub fn set_groups(&self, id: &str, groups: Vec<GroupGrant>) -> Result<(), DirectoryError> {
        let mut subjects = self
            .subjects
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let stored = subjects.get_mut(id).ok_or(DirectoryError::NotFound)?;
        stored.record.groups = groups;
        Ok(())
    }
}

impl Directory for InMemoryDirectory {
    fn find_subject(&self, id: &str) -> Result<SubjectRecord, DirectoryError> {
        let subjects = self
            .subjects
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        subjects
            .get(id)
            .map(|stored| stored.record.clone())
            .ok_or(DirectoryError::NotFound)
    }

    fn verify_credentials(
        &self,
        identifier: &str,
        password: &str,
    ) -> Result<SubjectRecord, DirectoryError> {
        let subjects = self
            .subjects
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let stored = subjects
            .values()
            .find(|stored| stored.record.username == identifier)
            .ok_or(DirectoryError::NotFound)?;
        if stored.password != password {
            return Err(DirectoryError::BadCredentials);
        }
        Ok(stored.record.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> SubjectRecord {
        SubjectRecord {
            id: "42".to_string(),
            username: "alice".to_string(),
            full_name: "Alice Jones".to_string(),
            groups: vec![GroupGrant::new("readers", ["READ"])],
        }
    }

    #[test]
    fn find_subject_returns_record() {
        let directory = InMemoryDirectory::new();
        directory.insert_subject(alice(), "pw");
        assert_eq!(directory.find_subject("42").unwrap().username, "alice");
    }

    #[test]
    fn find_subject_unknown_id_is_not_found() {
        let directory = InMemoryDirectory::new();
        assert_eq!(
            directory.find_subject("missing"),
            Err(DirectoryError::NotFound)
        );
    }

    #[test]
    fn verify_credentials_checks_password() {
        let directory = InMemoryDirectory::new();
        directory.insert_subject(alice(), "pw");

        assert!(directory.verify_credentials("alice", "pw").is_ok());
        assert_eq!(
            directory.verify_credentials("alice", "wrong"),
            Err(DirectoryError::BadCredentials)
        );
        assert_eq!(
            directory.verify_credentials("bob", "pw"),
            Err(DirectoryError::NotFound)
        );
    }

    #[test]
    fn set_groups_replaces_memberships() {
        let directory = InMemoryDirectory::new();
        directory.insert_subject(alice(), "pw");
        directory
            .set_groups("42", vec![GroupGrant::new("writers", ["WRITE"])])
            .unwrap();

        let record = directory.find_subject("42").unwrap();
        assert_eq!(record.groups.len(), 1);
        assert_eq!(record.groups[0].name, "writers");
    }
}
