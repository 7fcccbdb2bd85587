//! End-to-end registry scenarios.

use fabryk_acl::{
    Acl, EntityKind, EntityRegistry, Namespace, Property, PropertyKind, ReferenceBuilder,
};
use http::StatusCode;

use crate::common::populated_registry;

#[test]
fn test_admins_group_scenario() {
    let registry = EntityRegistry::new();
    let refs = ReferenceBuilder::new("/svc");

    registry.add_group("admins").unwrap();
    assert_eq!(
        refs.entity(Namespace::Groups, "admins").url,
        "/svc/entity/groups/admins"
    );

    // alice does not exist yet
    let err = registry.add_user_to_group("admins", "alice").unwrap_err();
    assert!(err.is_precondition_failed());
    assert_eq!(err.status(), StatusCode::PRECONDITION_FAILED);

    registry.add_user("alice").unwrap();
    registry.add_user_to_group("admins", "alice").unwrap();
    assert!(registry.is_user_in_group("admins", "alice"));

    registry.remove_group("admins").unwrap();
    let err = registry.get_group("admins").unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.status(), StatusCode::NOT_FOUND);
}

#[test]
fn test_read_permission_scenario() {
    let registry = EntityRegistry::new();

    registry.add_permission("read").unwrap();
    let err = registry.add_permission("read").unwrap_err();
    assert!(err.is_conflict());
    assert_eq!(err.status(), StatusCode::PRECONDITION_FAILED);

    registry.remove_permission("read").unwrap();
    assert!(registry.remove_permission("read").unwrap_err().is_not_found());
}

#[test]
fn test_populated_registry_shape() {
    let registry = populated_registry();
    let snapshot = registry.snapshot();

    assert_eq!(snapshot.users.len(), 5);
    assert_eq!(snapshot.groups["staff"].member_count(), 2);
    assert!(snapshot.resources["reports"].acl().is_some());
    assert_eq!(snapshot.permissions.len(), 2);
}

#[test]
fn test_remove_all_per_namespace() {
    let registry = populated_registry();

    registry.remove_all_users();
    registry.remove_all_groups();
    registry.remove_all_resources();
    registry.remove_all_permissions();

    let snapshot = registry.snapshot();
    let users: Vec<_> = snapshot.users.keys().map(String::as_str).collect();
    assert_eq!(users, vec!["All", "root"]);
    assert!(snapshot.groups.is_empty());
    assert!(snapshot.resources.is_empty());
    assert!(snapshot.permissions.is_empty());
}

#[test]
fn test_removing_user_cleans_memberships() {
    let registry = populated_registry();
    assert_eq!(registry.groups_of_user("alice").unwrap().len(), 2);

    registry.remove_user("alice").unwrap();

    assert!(!registry.is_user_in_group("admins", "alice"));
    assert!(!registry.is_user_in_group("staff", "alice"));
    assert!(registry.is_user_in_group("staff", "bob"));
}

#[test]
fn test_removing_group_leaves_users() {
    let registry = populated_registry();
    registry.remove_group("staff").unwrap();

    assert!(registry.get_user("bob").is_ok());
    let groups: Vec<_> = registry
        .groups_of_user("alice")
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(groups, vec!["admins"]);
}

#[test]
fn test_acl_attached_to_user_is_independent_of_resource_acl() {
    let registry = populated_registry();
    let mut acl = Acl::new();
    acl.grant("staff", "read");

    registry
        .add_property_to_entity(EntityKind::User, "carol", Property::Acl(acl.clone()))
        .unwrap();

    let carol_acl = registry
        .get_property(EntityKind::User, "carol", PropertyKind::Acl)
        .unwrap();
    assert_eq!(carol_acl.as_acl(), Some(&acl));
    assert!(registry
        .get_resource("reports")
        .unwrap()
        .acl()
        .unwrap()
        .is_empty());
}

#[test]
fn test_snapshot_serializes_for_boundary() {
    let registry = populated_registry();
    let json = serde_json::to_value(registry.snapshot()).unwrap();

    assert_eq!(json["groups"]["admins"]["members"][0], "alice");
    assert_eq!(
        json["resources"]["reports"]["properties"],
        serde_json::json!({"ACL": {"entries": {}}})
    );
    assert_eq!(json["permissions"][0], "read");
}
