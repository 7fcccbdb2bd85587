//! Typed properties attached to entities.
//!
//! Any user, group or resource may carry at most one property of each
//! [`PropertyKind`]. Resources receive their [`Acl`] at creation.

use serde::{Deserialize, Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::acl::Acl;
use crate::types::Permission;

/// The known property kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PropertyKind {
    /// Access-control list.
    #[serde(rename = "ACL")]
    Acl,
    /// A set of permission tokens held directly by the entity.
    Permissions,
}

impl PropertyKind {
    /// Stable property name.
    pub fn name(self) -> &'static str {
        match self {
            PropertyKind::Acl => "ACL",
            PropertyKind::Permissions => "Permissions",
        }
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A property value.
///
/// Serialized as the bare inner value; the kind is carried by the key it is
/// stored under in [`Properties`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Property {
    /// Access-control list.
    Acl(Acl),
    /// Directly held permission tokens.
    Permissions(BTreeSet<Permission>),
}

impl Property {
    /// Kind of this property.
    pub fn kind(&self) -> PropertyKind {
        match self {
            Property::Acl(_) => PropertyKind::Acl,
            Property::Permissions(_) => PropertyKind::Permissions,
        }
    }

    /// Returns the ACL if this is an ACL property.
    pub fn as_acl(&self) -> Option<&Acl> {
        match self {
            Property::Acl(acl) => Some(acl),
            _ => None,
        }
    }

    /// Returns the permission set if this is a permissions property.
    pub fn as_permissions(&self) -> Option<&BTreeSet<Permission>> {
        match self {
            Property::Permissions(perms) => Some(perms),
            _ => None,
        }
    }
}

impl From<Acl> for Property {
    fn from(acl: Acl) -> Self {
        Property::Acl(acl)
    }
}

/// Properties attached to a single entity, keyed by kind.
///
/// Serializes as `{"ACL": {"entries": {...}}, "Permissions": [...]}`.
/// Deserializing rejects a value whose shape does not match its key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "BTreeMap<PropertyKind, Property>")]
pub struct Properties(BTreeMap<PropertyKind, Property>);

impl Serialize for Properties {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl TryFrom<BTreeMap<PropertyKind, Property>> for Properties {
    type Error = String;

    fn try_from(map: BTreeMap<PropertyKind, Property>) -> std::result::Result<Self, String> {
        for (kind, property) in &map {
            if property.kind() != *kind {
                return Err(format!(
                    "property stored under {kind} holds a {} value",
                    property.kind()
                ));
            }
        }
        Ok(Self(map))
    }
}

impl Properties {
    /// Empty property map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Property of the given kind, if attached.
    pub fn get(&self, kind: PropertyKind) -> Option<&Property> {
        self.0.get(&kind)
    }

    /// Returns `true` if a property of `kind` is attached.
    pub fn contains(&self, kind: PropertyKind) -> bool {
        self.0.contains_key(&kind)
    }

    /// Iterates over attached properties in kind order.
    pub fn iter(&self) -> impl Iterator<Item = &Property> {
        self.0.values()
    }

    /// Number of attached properties.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no property is attached.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Attaches `property`; returns it back if its kind is already present.
    pub(crate) fn attach(&mut self, property: Property) -> std::result::Result<(), Property> {
        let kind = property.kind();
        if self.0.contains_key(&kind) {
            return Err(property);
        }
        self.0.insert(kind, property);
        Ok(())
    }

    pub(crate) fn detach(&mut self, kind: PropertyKind) -> Option<Property> {
        self.0.remove(&kind)
    }
}
