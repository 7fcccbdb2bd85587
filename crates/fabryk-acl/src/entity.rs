//! Entity records held by the registry.
//!
//! Records are returned by value from registry reads, so a caller always
//! holds a consistent copy that later mutations do not affect.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::acl::Acl;
use crate::property::{Properties, PropertyKind};

/// A user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: String,
    #[serde(default)]
    properties: Properties,
}

impl User {
    pub(crate) fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            properties: Properties::new(),
        }
    }

    /// User identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Attached properties.
    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    pub(crate) fn properties_mut(&mut self) -> &mut Properties {
        &mut self.properties
    }
}

/// A named set of users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    id: String,
    #[serde(default)]
    members: BTreeSet<String>,
    #[serde(default)]
    properties: Properties,
}

impl Group {
    pub(crate) fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            members: BTreeSet::new(),
            properties: Properties::new(),
        }
    }

    /// Group identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Member user identifiers, in identifier order.
    pub fn members(&self) -> &BTreeSet<String> {
        &self.members
    }

    /// Returns `true` if `user` is a member.
    pub fn has_member(&self, user: &str) -> bool {
        self.members.contains(user)
    }

    /// Number of members.
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Attached properties.
    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    pub(crate) fn members_mut(&mut self) -> &mut BTreeSet<String> {
        &mut self.members
    }

    pub(crate) fn properties_mut(&mut self) -> &mut Properties {
        &mut self.properties
    }
}

/// A protected resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    id: String,
    #[serde(default)]
    properties: Properties,
}

impl Resource {
    pub(crate) fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            properties: Properties::new(),
        }
    }

    /// Resource identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The resource's ACL.
    ///
    /// Always present for resources created through the registry.
    pub fn acl(&self) -> Option<&Acl> {
        self.properties
            .get(PropertyKind::Acl)
            .and_then(|p| p.as_acl())
    }

    /// Attached properties.
    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    pub(crate) fn properties_mut(&mut self) -> &mut Properties {
        &mut self.properties
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::property::Property;

    #[test]
    fn test_user_new() {
        let user = User::new("alice");
        assert_eq!(user.id(), "alice");
        assert!(user.properties().is_empty());
    }

    #[test]
    fn test_group_membership_accessors() {
        let mut group = Group::new("admins");
        group.members_mut().insert("alice".to_string());
        group.members_mut().insert("bob".to_string());

        assert!(group.has_member("alice"));
        assert!(!group.has_member("carol"));
        assert_eq!(group.member_count(), 2);
        let members: Vec<_> = group.members().iter().cloned().collect();
        assert_eq!(members, vec!["alice", "bob"]);
    }

    #[test]
    fn test_resource_acl_accessor() {
        let mut resource = Resource::new("reports");
        assert!(resource.acl().is_none());

        resource
            .properties_mut()
            .attach(Property::Acl(Acl::new()))
            .unwrap();
        assert!(resource.acl().unwrap().is_empty());
    }

    #[test]
    fn test_group_serialization_shape() {
        let mut group = Group::new("ops");
        group.members_mut().insert("dave".to_string());
        let json = serde_json::to_value(&group).unwrap();
        assert_eq!(json["id"], "ops");
        assert_eq!(json["members"][0], "dave");
        assert!(json["properties"].as_object().unwrap().is_empty());
    }
}
