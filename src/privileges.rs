// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Signet Contributors

//! Privilege flattening.
//!
//! A user belongs to zero or more groups; each group grants zero or more
//! named privileges. The effective authorization set is the union across all
//! of the user's groups. This is recomputed from the directory on every
//! authenticated request, so grant and revocation changes take effect
//! without re-login.

use std::collections::BTreeSet;

use crate::principal::GroupGrant;

/// Union of privilege names across the given groups, deduplicated.
///
/// Pure function; a user with no groups gets the empty set. The ordered set
/// keeps downstream claim encoding deterministic.
pub fn flatten(groups: &[GroupGrant]) -> BTreeSet<String> {
    groups
        .iter()
        .flat_map(|group| group.privileges.iter().cloned())
        .collect()
}
