//! Building registries from configuration.

use fabryk_acl::{EntityRegistry, Error, RegistryConfig};

use crate::common::write_config;

#[test]
fn test_registry_from_config_file() {
    let (_dir, path) = write_config(
        r#"
            root_user = "admin"
            all_entry = "everyone"
            service_prefix = "/svc"

            [seed]
            users = ["alice", "bob", "admin"]
            resources = ["reports", "billing"]
            permissions = ["read", "write"]

            [seed.groups]
            admins = ["alice", "admin"]
            staff = ["alice", "bob"]
        "#,
    );

    let config = RegistryConfig::load(Some(path.to_str().unwrap())).unwrap();
    let registry = EntityRegistry::from_config(&config).unwrap();

    assert_eq!(registry.protected_users(), ["admin", "everyone"]);
    // admin is protected and already present, so only alice and bob are added
    assert_eq!(registry.user_count(), 4);
    assert!(registry.is_user_in_group("admins", "admin"));
    assert_eq!(registry.get_group("staff").unwrap().member_count(), 2);
    assert!(registry.get_resource("billing").unwrap().acl().is_some());
    assert!(registry.has_permission("write"));

    let refs = config.reference_builder();
    assert_eq!(
        refs.membership("staff", "bob").url,
        "/svc/entity/groups/staff/users/bob"
    );
}

#[test]
fn test_seed_with_unknown_member_fails() {
    let (_dir, path) = write_config(
        r#"
            [seed.groups]
            admins = ["ghost"]
        "#,
    );

    let config = RegistryConfig::load(Some(path.to_str().unwrap())).unwrap();
    let err = EntityRegistry::from_config(&config).unwrap_err();
    assert!(err.is_precondition_failed());
}

#[test]
fn test_seed_with_duplicate_resource_fails() {
    let mut config = RegistryConfig::default();
    config.seed.resources = vec!["reports".into(), "reports".into()];

    let err = EntityRegistry::from_config(&config).unwrap_err();
    assert!(err.is_conflict());
}

#[test]
fn test_invalid_protected_names_rejected() {
    let config = RegistryConfig {
        root_user: "same".into(),
        all_entry: "same".into(),
        ..Default::default()
    };
    let err = EntityRegistry::from_config(&config).unwrap_err();
    assert!(matches!(err, Error::Core(_)));
}

#[test]
fn test_default_config_matches_new() {
    let from_config = EntityRegistry::from_config(&RegistryConfig::default()).unwrap();
    assert_eq!(from_config.snapshot(), EntityRegistry::new().snapshot());
}
