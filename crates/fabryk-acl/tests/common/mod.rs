//! Common helpers for registry integration tests.

use fabryk_acl::EntityRegistry;
use std::sync::Arc;

/// A shared registry pre-populated with a small organisation:
/// users `alice`, `bob`, `carol`; groups `admins` (alice) and `staff`
/// (alice, bob); resource `reports`; permissions `read` and `write`.
pub fn populated_registry() -> Arc<EntityRegistry> {
    let registry = Arc::new(EntityRegistry::new());
    for user in ["alice", "bob", "carol"] {
        registry.add_user(user).expect("seed user");
    }
    registry.add_group("admins").expect("seed group");
    registry.add_group("staff").expect("seed group");
    registry.add_user_to_group("admins", "alice").expect("seed member");
    registry.add_user_to_group("staff", "alice").expect("seed member");
    registry.add_user_to_group("staff", "bob").expect("seed member");
    registry.add_resource("reports").expect("seed resource");
    registry.add_permission("read").expect("seed permission");
    registry.add_permission("write").expect("seed permission");
    registry
}

/// Write `contents` to `acl.toml` inside a fresh temp dir.
///
/// The returned `TempDir` must be kept alive while the file is in use.
pub fn write_config(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::TempDir::new().expect("temp dir");
    let path = dir.path().join("acl.toml");
    std::fs::write(&path, contents).expect("write config");
    (dir, path)
}
