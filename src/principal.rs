// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Signet Contributors

//! Principal and group-grant data types.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// The authenticated identity attached to a request.
///
/// Ephemeral by design: reconstructed from a verified token (plus a fresh
/// directory read) on every request, never persisted by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Opaque subject identifier, as issued by the entity store.
    pub id: String,
    /// Login name (unique within the deployment).
    pub username: String,
    /// Effective privilege names, flattened across group memberships.
    pub privileges: BTreeSet<String>,
}

impl Principal {
    pub fn new(
        id: impl Into<String>,
        username: impl Into<String>,
        privileges: BTreeSet<String>,
    ) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            privileges,
        }
    }

    /// Whether the effective set contains the named privilege.
    pub fn has_privilege(&self, name: &str) -> bool {
        self.privileges.contains(name)
    }
}

/// A group membership edge as read from the entity store: the group's name
/// and the privilege names it grants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupGrant {
    pub name: String,
    pub privileges: BTreeSet<String>,
}

impl GroupGrant {
    pub fn new<I, S>(name: impl Into<String>, privileges: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            privileges: privileges.into_iter().map(Into::into).collect(),
        }
    }
}
