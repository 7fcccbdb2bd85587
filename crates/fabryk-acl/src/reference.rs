//! Entity reference paths.
//!
//! HTTP-facing callers answer a successful create with a reference to the
//! new entity rather than the entity itself. [`ReferenceBuilder`] produces
//! those paths in one place:
//!
//! ```
//! use fabryk_acl::{Namespace, ReferenceBuilder};
//!
//! let refs = ReferenceBuilder::new("/api");
//! assert_eq!(refs.entity(Namespace::Groups, "admins").url, "/api/entity/groups/admins");
//! assert_eq!(
//!     refs.membership("admins", "alice").url,
//!     "/api/entity/groups/admins/users/alice"
//! );
//! ```

use serde::{Deserialize, Serialize};

use crate::types::Namespace;

const ENTITY_ROOT: &str = "entity";

/// A reference to an entity, serialized as `{"url": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    /// Path of the referenced entity.
    pub url: String,
}

/// Builds [`EntityRef`]s under a fixed service prefix.
#[derive(Debug, Clone, Default)]
pub struct ReferenceBuilder {
    prefix: String,
}

impl ReferenceBuilder {
    /// Create a builder. Trailing slashes on `prefix` are ignored.
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self {
            prefix: prefix.trim_end_matches('/').to_string(),
        }
    }

    /// Reference to entry `id` of `namespace`.
    pub fn entity(&self, namespace: Namespace, id: &str) -> EntityRef {
        EntityRef {
            url: format!(
                "{}/{ENTITY_ROOT}/{}/{id}",
                self.prefix,
                namespace.path_segment()
            ),
        }
    }

    /// Reference to `user`'s membership in `group`.
    pub fn membership(&self, group: &str, user: &str) -> EntityRef {
        let group_ref = self.entity(Namespace::Groups, group);
        EntityRef {
            url: format!(
                "{}/{}/{user}",
                group_ref.url,
                Namespace::Users.path_segment()
            ),
        }
    }
}
