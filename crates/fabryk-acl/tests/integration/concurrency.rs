//! Concurrent access to a shared registry.

use fabryk_acl::{EntityKind, EntityRegistry, PropertyKind};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::common::populated_registry;

const WRITERS: usize = 4;
const PER_WRITER: usize = 50;

#[test]
fn test_resources_never_visible_without_acl() {
    let registry = Arc::new(EntityRegistry::new());
    let done = AtomicBool::new(false);

    std::thread::scope(|s| {
        for w in 0..WRITERS {
            let registry = Arc::clone(&registry);
            s.spawn(move || {
                for i in 0..PER_WRITER {
                    registry.add_resource(&format!("r-{w}-{i}")).unwrap();
                }
            });
        }

        for _ in 0..2 {
            let registry = Arc::clone(&registry);
            let done = &done;
            s.spawn(move || {
                while !done.load(Ordering::Acquire) {
                    for resource in registry.snapshot().resources.values() {
                        assert!(resource.acl().is_some(), "{} has no ACL", resource.id());
                    }
                    for id in registry.get_all_resources().keys() {
                        registry
                            .get_property(EntityKind::Resource, id, PropertyKind::Acl)
                            .unwrap();
                    }
                }
            });
        }

        // Poll until every writer's resources are in, then stop the readers.
        while registry.resource_count() < WRITERS * PER_WRITER {
            std::thread::yield_now();
        }
        done.store(true, Ordering::Release);
    });

    assert_eq!(registry.resource_count(), WRITERS * PER_WRITER);
}

#[test]
fn test_concurrent_duplicate_adds_yield_one_winner() {
    let registry = Arc::new(EntityRegistry::new());

    let successes: usize = std::thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                s.spawn(move || registry.add_user("contended").is_ok())
            })
            .collect();
        handles
            .into_iter()
            .map(|h| usize::from(h.join().unwrap()))
            .sum()
    });

    assert_eq!(successes, 1);
    assert!(registry.get_user("contended").is_ok());
}

#[test]
fn test_concurrent_membership_changes() {
    let registry = populated_registry();
    for i in 0..40 {
        registry.add_user(&format!("u{i}")).unwrap();
    }

    std::thread::scope(|s| {
        for chunk in 0..4 {
            let registry = Arc::clone(&registry);
            s.spawn(move || {
                for i in (chunk * 10)..(chunk * 10 + 10) {
                    let user = format!("u{i}");
                    registry.add_user_to_group("staff", &user).unwrap();
                    if i % 2 == 0 {
                        registry.remove_user_from_group("staff", &user).unwrap();
                    }
                }
            });
        }
    });

    // alice and bob from the fixture plus the 20 odd-numbered users
    assert_eq!(registry.get_group("staff").unwrap().member_count(), 22);
}
