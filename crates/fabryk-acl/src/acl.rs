//! Access-control list value attached to resources.
//!
//! An [`Acl`] maps entry names (user or group identifiers, or the
//! wildcard-all entry) to the permissions granted to them. The registry
//! attaches and returns ACLs; it never evaluates them.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::types::Permission;

/// Access-control list: entry name to granted permissions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acl {
    entries: BTreeMap<String, BTreeSet<Permission>>,
}

impl Acl {
    /// Creates an empty ACL.
    pub fn new() -> Self {
        Self::default()
    }

    /// Grants `permission` to `entry`.
    ///
    /// Returns `true` if the grant was not already present.
    pub fn grant(&mut self, entry: impl Into<String>, permission: impl Into<Permission>) -> bool {
        self.entries
            .entry(entry.into())
            .or_default()
            .insert(permission.into())
    }

    /// Revokes `permission` from `entry`.
    ///
    /// Returns `true` if the grant existed. An entry left with no
    /// permissions is dropped.
    pub fn revoke(&mut self, entry: &str, permission: &Permission) -> bool {
        let Some(perms) = self.entries.get_mut(entry) else {
            return false;
        };
        let removed = perms.remove(permission);
        if perms.is_empty() {
            self.entries.remove(entry);
        }
        removed
    }

    /// Permissions granted to `entry`, if it has any.
    pub fn permissions_for(&self, entry: &str) -> Option<&BTreeSet<Permission>> {
        self.entries.get(entry)
    }

    /// Iterates over `(entry, permissions)` pairs in entry order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &BTreeSet<Permission>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries with at least one grant.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been granted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
