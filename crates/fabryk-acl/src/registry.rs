//! The entity registry.
//!
//! [`EntityRegistry`] owns four independent namespaces (users, groups,
//! resources, permissions), the group membership relation, and the
//! properties attached to entities. It is the single point of truth for
//! uniqueness and existence checks.
//!
//! # Locking
//!
//! One `RwLock` guards all registry state. Every mutation takes the write
//! lock, validates completely, and only then applies its change, so a failed
//! operation leaves the registry untouched and readers never see a partial
//! update (for example a resource without its ACL). Reads take the read lock
//! and return owned copies.
//!
//! # Protected users
//!
//! The root user and the wildcard-all entry are created with the registry
//! and can never be removed, neither individually nor by
//! [`EntityRegistry::remove_all_users`].
//!
//! # Membership cleanup
//!
//! Removing a user also removes it from every group, so group member sets
//! never reference a user that does not exist.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::acl::Acl;
use crate::config::RegistryConfig;
use crate::entity::{Group, Resource, User};
use crate::error::{Error, Result};
use crate::property::{Properties, Property, PropertyKind};
use crate::types::{EntityKind, Namespace, Permission};

/// Default identifier of the root user.
pub const DEFAULT_ROOT_USER: &str = "root";

/// Default identifier of the wildcard entry matching every user.
pub const DEFAULT_ALL_ENTRY: &str = "All";

// ============================================================================
// RegistrySnapshot
// ============================================================================

/// A consistent copy of every namespace, taken under a single lock.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    /// Users by identifier.
    pub users: BTreeMap<String, User>,
    /// Groups by identifier.
    pub groups: BTreeMap<String, Group>,
    /// Resources by identifier.
    pub resources: BTreeMap<String, Resource>,
    /// Permission tokens.
    pub permissions: BTreeSet<Permission>,
}

#[derive(Debug, Default)]
struct State {
    users: BTreeMap<String, User>,
    groups: BTreeMap<String, Group>,
    resources: BTreeMap<String, Resource>,
    permissions: BTreeSet<Permission>,
}

impl State {
    fn properties(&self, kind: EntityKind, id: &str) -> Option<&Properties> {
        match kind {
            EntityKind::User => self.users.get(id).map(User::properties),
            EntityKind::Group => self.groups.get(id).map(Group::properties),
            EntityKind::Resource => self.resources.get(id).map(Resource::properties),
        }
    }

    fn properties_mut(&mut self, kind: EntityKind, id: &str) -> Option<&mut Properties> {
        match kind {
            EntityKind::User => self.users.get_mut(id).map(User::properties_mut),
            EntityKind::Group => self.groups.get_mut(id).map(Group::properties_mut),
            EntityKind::Resource => self.resources.get_mut(id).map(Resource::properties_mut),
        }
    }

    fn drop_memberships(&mut self, user: &str) {
        for group in self.groups.values_mut() {
            group.members_mut().remove(user);
        }
    }
}

// ============================================================================
// EntityRegistry
// ============================================================================

/// Thread-safe registry of users, groups, resources and permissions.
///
/// Share it between request handlers behind an `Arc`; all methods take
/// `&self`.
#[derive(Debug)]
pub struct EntityRegistry {
    root_user: String,
    all_entry: String,
    state: RwLock<State>,
}

impl EntityRegistry {
    /// Create a registry with the default protected users
    /// ([`DEFAULT_ROOT_USER`] and [`DEFAULT_ALL_ENTRY`]).
    pub fn new() -> Self {
        Self::with_protected(DEFAULT_ROOT_USER, DEFAULT_ALL_ENTRY)
    }

    /// Create a registry with custom protected user identifiers.
    pub fn with_protected(root_user: impl Into<String>, all_entry: impl Into<String>) -> Self {
        let root_user = root_user.into();
        let all_entry = all_entry.into();

        let mut state = State::default();
        for id in [&root_user, &all_entry] {
            state.users.insert(id.clone(), User::new(id.clone()));
        }

        Self {
            root_user,
            all_entry,
            state: RwLock::new(state),
        }
    }

    /// Create a registry from configuration and apply its seed section.
    ///
    /// Seeding goes through the public operations, so a seed that breaks a
    /// registry rule (duplicate resource, member that is not a user, ...)
    /// fails the whole construction. Protected users listed under
    /// `seed.users` are skipped since they already exist.
    pub fn from_config(config: &RegistryConfig) -> Result<Self> {
        config.validate()?;

        let registry = Self::with_protected(&config.root_user, &config.all_entry);
        let seed = &config.seed;

        for user in &seed.users {
            if registry.is_protected_user(user) {
                log::debug!("Seed lists protected user '{user}', skipping");
                continue;
            }
            registry.add_user(user)?;
        }
        for (group, members) in &seed.groups {
            registry.add_group(group)?;
            for member in members {
                registry.add_user_to_group(group, member)?;
            }
        }
        for resource in &seed.resources {
            registry.add_resource(resource)?;
        }
        for permission in &seed.permissions {
            registry.add_permission(permission)?;
        }

        log::info!(
            "Seeded registry: {} users, {} groups, {} resources, {} permissions",
            registry.user_count(),
            registry.group_count(),
            registry.resource_count(),
            registry.permission_count()
        );
        Ok(registry)
    }

    fn read(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    // ------------------------------------------------------------------------
    // Protected users
    // ------------------------------------------------------------------------

    /// Identifier of the root user.
    pub fn root_user(&self) -> &str {
        &self.root_user
    }

    /// Identifier of the wildcard-all entry.
    pub fn all_entry(&self) -> &str {
        &self.all_entry
    }

    /// Both protected user identifiers: root, then wildcard-all.
    pub fn protected_users(&self) -> [&str; 2] {
        [self.root_user.as_str(), self.all_entry.as_str()]
    }

    /// Returns `true` if `id` names a protected user.
    pub fn is_protected_user(&self, id: &str) -> bool {
        id == self.root_user || id == self.all_entry
    }

    // ------------------------------------------------------------------------
    // Users
    // ------------------------------------------------------------------------

    /// Add a user. Fails with [`Error::Conflict`] if `id` is already a user.
    pub fn add_user(&self, id: &str) -> Result<()> {
        let mut state = self.write();
        if state.users.contains_key(id) {
            return Err(Error::conflict(Namespace::Users, id));
        }
        state.users.insert(id.to_string(), User::new(id));
        log::debug!("Added user '{id}'");
        Ok(())
    }

    /// Look up a user.
    pub fn get_user(&self, id: &str) -> Result<User> {
        self.read()
            .users
            .get(id)
            .cloned()
            .ok_or_else(|| Error::not_found(Namespace::Users, id))
    }

    /// Copy of the whole user namespace.
    pub fn get_all_users(&self) -> BTreeMap<String, User> {
        self.read().users.clone()
    }

    /// Remove a user and its group memberships.
    ///
    /// Protected users are refused with [`Error::PreconditionFailed`].
    pub fn remove_user(&self, id: &str) -> Result<()> {
        if self.is_protected_user(id) {
            log::warn!("Refusing to remove protected user '{id}'");
            return Err(Error::precondition(format!(
                "user '{id}' is protected and cannot be removed"
            )));
        }

        let mut state = self.write();
        if state.users.remove(id).is_none() {
            return Err(Error::not_found(Namespace::Users, id));
        }
        state.drop_memberships(id);
        log::debug!("Removed user '{id}'");
        Ok(())
    }

    /// Remove every user except the protected ones.
    pub fn remove_all_users(&self) {
        let mut state = self.write();
        let doomed: Vec<String> = state
            .users
            .keys()
            .filter(|id| !self.is_protected_user(id))
            .cloned()
            .collect();

        for id in &doomed {
            state.users.remove(id);
            state.drop_memberships(id);
        }
        log::info!("Removed {} users (protected users kept)", doomed.len());
    }

    /// Number of users, protected ones included.
    pub fn user_count(&self) -> usize {
        self.read().users.len()
    }

    // ------------------------------------------------------------------------
    // Groups
    // ------------------------------------------------------------------------

    /// Add an empty group. Fails with [`Error::Conflict`] if it exists.
    pub fn add_group(&self, id: &str) -> Result<()> {
        let mut state = self.write();
        if state.groups.contains_key(id) {
            return Err(Error::conflict(Namespace::Groups, id));
        }
        state.groups.insert(id.to_string(), Group::new(id));
        log::debug!("Added group '{id}'");
        Ok(())
    }

    /// Look up a group.
    pub fn get_group(&self, id: &str) -> Result<Group> {
        self.read()
            .groups
            .get(id)
            .cloned()
            .ok_or_else(|| Error::not_found(Namespace::Groups, id))
    }

    /// Copy of the whole group namespace.
    pub fn get_all_groups(&self) -> BTreeMap<String, Group> {
        self.read().groups.clone()
    }

    /// Remove a group together with its member set.
    pub fn remove_group(&self, id: &str) -> Result<()> {
        let mut state = self.write();
        if state.groups.remove(id).is_none() {
            return Err(Error::not_found(Namespace::Groups, id));
        }
        log::debug!("Removed group '{id}'");
        Ok(())
    }

    /// Remove every group.
    pub fn remove_all_groups(&self) {
        let mut state = self.write();
        let count = state.groups.len();
        state.groups.clear();
        log::info!("Removed {count} groups");
    }

    /// Number of groups.
    pub fn group_count(&self) -> usize {
        self.read().groups.len()
    }

    // ------------------------------------------------------------------------
    // Membership
    // ------------------------------------------------------------------------

    /// Add `user` to `group`.
    ///
    /// Both must exist ([`Error::PreconditionFailed`] otherwise); adding an
    /// existing member fails with [`Error::Conflict`].
    pub fn add_user_to_group(&self, group: &str, user: &str) -> Result<()> {
        let mut guard = self.write();
        let state = &mut *guard;

        if !state.users.contains_key(user) {
            return Err(Error::precondition(format!(
                "cannot add user '{user}' to group '{group}': user does not exist"
            )));
        }
        let Some(entry) = state.groups.get_mut(group) else {
            return Err(Error::precondition(format!(
                "cannot add user '{user}' to group '{group}': group does not exist"
            )));
        };
        if !entry.members_mut().insert(user.to_string()) {
            return Err(Error::conflict(Namespace::Groups, format!("{group}/{user}")));
        }

        log::debug!("Added user '{user}' to group '{group}'");
        Ok(())
    }

    /// Remove `user` from `group`.
    ///
    /// Fails with [`Error::PreconditionFailed`] if the group does not exist
    /// or `user` is not a member.
    pub fn remove_user_from_group(&self, group: &str, user: &str) -> Result<()> {
        let mut state = self.write();
        let Some(entry) = state.groups.get_mut(group) else {
            return Err(Error::precondition(format!(
                "cannot remove user '{user}' from group '{group}': group does not exist"
            )));
        };
        if !entry.members_mut().remove(user) {
            return Err(Error::precondition(format!(
                "user '{user}' is not a member of group '{group}'"
            )));
        }

        log::debug!("Removed user '{user}' from group '{group}'");
        Ok(())
    }

    /// Returns `true` if `group` exists and contains `user`.
    pub fn is_user_in_group(&self, group: &str, user: &str) -> bool {
        self.read()
            .groups
            .get(group)
            .is_some_and(|g| g.has_member(user))
    }

    /// Groups `user` belongs to.
    pub fn groups_of_user(&self, user: &str) -> Result<BTreeSet<String>> {
        let state = self.read();
        if !state.users.contains_key(user) {
            return Err(Error::not_found(Namespace::Users, user));
        }
        Ok(state
            .groups
            .values()
            .filter(|g| g.has_member(user))
            .map(|g| g.id().to_string())
            .collect())
    }

    // ------------------------------------------------------------------------
    // Resources
    // ------------------------------------------------------------------------

    /// Add a resource with a fresh, empty ACL attached.
    ///
    /// The resource and its ACL are inserted under one write lock; no reader
    /// can observe the resource without its ACL.
    pub fn add_resource(&self, id: &str) -> Result<()> {
        let mut state = self.write();
        if state.resources.contains_key(id) {
            return Err(Error::conflict(Namespace::Resources, id));
        }

        let mut resource = Resource::new(id);
        if resource
            .properties_mut()
            .attach(Property::Acl(Acl::new()))
            .is_err()
        {
            return Err(Error::precondition(format!(
                "could not attach ACL to resource '{id}'"
            )));
        }
        state.resources.insert(id.to_string(), resource);
        log::debug!("Added resource '{id}' with empty ACL");
        Ok(())
    }

    /// Look up a resource.
    pub fn get_resource(&self, id: &str) -> Result<Resource> {
        self.read()
            .resources
            .get(id)
            .cloned()
            .ok_or_else(|| Error::not_found(Namespace::Resources, id))
    }

    /// Copy of the whole resource namespace.
    pub fn get_all_resources(&self) -> BTreeMap<String, Resource> {
        self.read().resources.clone()
    }

    /// Remove a resource and its ACL.
    pub fn remove_resource(&self, id: &str) -> Result<()> {
        let mut state = self.write();
        if state.resources.remove(id).is_none() {
            return Err(Error::not_found(Namespace::Resources, id));
        }
        log::debug!("Removed resource '{id}'");
        Ok(())
    }

    /// Remove every resource.
    pub fn remove_all_resources(&self) {
        let mut state = self.write();
        let count = state.resources.len();
        state.resources.clear();
        log::info!("Removed {count} resources");
    }

    /// Number of resources.
    pub fn resource_count(&self) -> usize {
        self.read().resources.len()
    }

    // ------------------------------------------------------------------------
    // Permissions
    // ------------------------------------------------------------------------

    /// Add a permission token. Fails with [`Error::Conflict`] if present.
    pub fn add_permission(&self, token: &str) -> Result<()> {
        let mut state = self.write();
        if !state.permissions.insert(Permission::new(token)) {
            return Err(Error::conflict(Namespace::Permissions, token));
        }
        log::debug!("Added permission '{token}'");
        Ok(())
    }

    /// Returns `true` if the token exists.
    pub fn has_permission(&self, token: &str) -> bool {
        self.read().permissions.contains(token)
    }

    /// Copy of the permission namespace.
    pub fn get_all_permissions(&self) -> BTreeSet<Permission> {
        self.read().permissions.clone()
    }

    /// Remove a permission token.
    pub fn remove_permission(&self, token: &str) -> Result<()> {
        let mut state = self.write();
        if !state.permissions.remove(token) {
            return Err(Error::not_found(Namespace::Permissions, token));
        }
        log::debug!("Removed permission '{token}'");
        Ok(())
    }

    /// Remove every permission token.
    pub fn remove_all_permissions(&self) {
        let mut state = self.write();
        let count = state.permissions.len();
        state.permissions.clear();
        log::info!("Removed {count} permissions");
    }

    /// Number of permission tokens.
    pub fn permission_count(&self) -> usize {
        self.read().permissions.len()
    }

    // ------------------------------------------------------------------------
    // Properties
    // ------------------------------------------------------------------------

    /// Attach `property` to an existing entity.
    ///
    /// Fails with [`Error::PreconditionFailed`] if the entity does not exist
    /// or already has a property of the same kind.
    pub fn add_property_to_entity(
        &self,
        kind: EntityKind,
        id: &str,
        property: Property,
    ) -> Result<()> {
        let mut state = self.write();
        let Some(properties) = state.properties_mut(kind, id) else {
            return Err(Error::precondition(format!("{kind} '{id}' does not exist")));
        };

        let property_kind = property.kind();
        if properties.attach(property).is_err() {
            return Err(Error::precondition(format!(
                "{kind} '{id}' already has a {property_kind} property"
            )));
        }

        log::debug!("Attached {property_kind} property to {kind} '{id}'");
        Ok(())
    }

    /// Copy of the property of `property_kind` attached to an entity.
    ///
    /// Fails with [`Error::NotFound`] if either the entity or the property
    /// is absent.
    pub fn get_property(
        &self,
        kind: EntityKind,
        id: &str,
        property_kind: PropertyKind,
    ) -> Result<Property> {
        let state = self.read();
        let properties = state
            .properties(kind, id)
            .ok_or_else(|| Error::not_found(kind.namespace(), id))?;
        properties
            .get(property_kind)
            .cloned()
            .ok_or_else(|| Error::not_found(kind.namespace(), format!("{id}/{property_kind}")))
    }

    /// Detach the property of `property_kind` from an entity.
    ///
    /// A resource's ACL lives as long as the resource and cannot be
    /// detached. Fails with [`Error::PreconditionFailed`] if the entity or
    /// the property is absent.
    pub fn remove_property_from_entity(
        &self,
        kind: EntityKind,
        id: &str,
        property_kind: PropertyKind,
    ) -> Result<()> {
        let mut state = self.write();
        let Some(properties) = state.properties_mut(kind, id) else {
            return Err(Error::precondition(format!("{kind} '{id}' does not exist")));
        };
        if kind == EntityKind::Resource && property_kind == PropertyKind::Acl {
            return Err(Error::precondition(format!(
                "the ACL of resource '{id}' cannot be removed without removing the resource"
            )));
        }
        if properties.detach(property_kind).is_none() {
            return Err(Error::precondition(format!(
                "{kind} '{id}' has no {property_kind} property"
            )));
        }

        log::debug!("Detached {property_kind} property from {kind} '{id}'");
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Whole-registry reads
    // ------------------------------------------------------------------------

    /// Copy of all four namespaces taken under a single read lock.
    pub fn snapshot(&self) -> RegistrySnapshot {
        let state = self.read();
        RegistrySnapshot {
            users: state.users.clone(),
            groups: state.groups.clone(),
            resources: state.resources.clone(),
            permissions: state.permissions.clone(),
        }
    }
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
