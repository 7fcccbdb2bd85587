//! Namespace and identifier types.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

// ============================================================================
// Namespace
// ============================================================================

/// One of the four independent identifier spaces owned by the registry.
///
/// The same string may be used as an identifier in more than one namespace;
/// uniqueness is only enforced within a namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Namespace {
    /// User accounts.
    Users,
    /// Groups of users.
    Groups,
    /// Protected resources.
    Resources,
    /// Permission tokens.
    Permissions,
}

impl Namespace {
    /// All namespaces, in registry order.
    pub const ALL: [Namespace; 4] = [
        Namespace::Users,
        Namespace::Groups,
        Namespace::Resources,
        Namespace::Permissions,
    ];

    /// Collection segment used when building entity reference paths.
    ///
    /// # Examples
    ///
    /// ```
    /// use fabryk_acl::Namespace;
    ///
    /// assert_eq!(Namespace::Groups.path_segment(), "groups");
    /// ```
    pub fn path_segment(self) -> &'static str {
        match self {
            Namespace::Users => "users",
            Namespace::Groups => "groups",
            Namespace::Resources => "resources",
            Namespace::Permissions => "permissions",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Namespace::Users => "user",
            Namespace::Groups => "group",
            Namespace::Resources => "resource",
            Namespace::Permissions => "permission",
        };
        f.write_str(name)
    }
}

// ============================================================================
// EntityKind
// ============================================================================

/// The namespaces whose entries can carry properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// A user.
    User,
    /// A group.
    Group,
    /// A resource.
    Resource,
}

impl EntityKind {
    /// Namespace this kind of entity lives in.
    pub fn namespace(self) -> Namespace {
        match self {
            EntityKind::User => Namespace::Users,
            EntityKind::Group => Namespace::Groups,
            EntityKind::Resource => Namespace::Resources,
        }
    }
}

impl From<EntityKind> for Namespace {
    fn from(kind: EntityKind) -> Self {
        kind.namespace()
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.namespace().fmt(f)
    }
}

// ============================================================================
// Permission
// ============================================================================

/// A permission token such as `"read"` or `"can-deploy"`.
///
/// Tokens are opaque strings; the registry only tracks which ones exist.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(String);

impl Permission {
    /// Creates a permission token.
    ///
    /// # Examples
    ///
    /// ```
    /// use fabryk_acl::Permission;
    ///
    /// let p = Permission::new("read");
    /// assert_eq!(p.as_str(), "read");
    /// ```
    pub fn new<S: Into<String>>(token: S) -> Self {
        Self(token.into())
    }

    /// Returns the token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Permission {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Permission {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for Permission {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Lets permission sets be queried with a plain `&str`.
impl Borrow<str> for Permission {
    fn borrow(&self) -> &str {
        &self.0
    }
}
