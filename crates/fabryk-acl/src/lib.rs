//! # fabryk-acl
//!
//! Entity access-control registry for Fabryk.
//!
//! This crate owns the identity model that ACL enforcement runs against:
//! - Users, groups, resources and permission tokens, each in its own namespace
//! - Group membership
//! - Typed properties attached to entities (ACLs, permission sets)
//! - Built-in protected users (root and the wildcard-all entry)
//!
//! The registry is a synchronous, in-memory structure with its own internal
//! locking. Construct one explicitly and share it behind an `Arc`:
//!
//! ```
//! use std::sync::Arc;
//! use fabryk_acl::{EntityRegistry, PropertyKind};
//!
//! let registry = Arc::new(EntityRegistry::new());
//! registry.add_group("admins").unwrap();
//! registry.add_user("alice").unwrap();
//! registry.add_user_to_group("admins", "alice").unwrap();
//! assert!(registry.is_user_in_group("admins", "alice"));
//!
//! registry.add_resource("reports").unwrap();
//! let resource = registry.get_resource("reports").unwrap();
//! assert!(resource.properties().contains(PropertyKind::Acl));
//! ```
//!
//! Deciding who may do what with an ACL is left to the caller; this crate
//! only attaches and returns them.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod acl;
pub mod config;
pub mod entity;
pub mod error;
pub mod property;
pub mod reference;
pub mod registry;
pub mod types;

mod proptests;

pub use acl::Acl;
pub use config::{RegistryConfig, SeedConfig};
pub use entity::{Group, Resource, User};
pub use error::{Error, Result};
pub use property::{Properties, Property, PropertyKind};
pub use reference::{EntityRef, ReferenceBuilder};
pub use registry::{EntityRegistry, RegistrySnapshot, DEFAULT_ALL_ENTRY, DEFAULT_ROOT_USER};
pub use types::{EntityKind, Namespace, Permission};
