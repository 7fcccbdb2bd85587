//! Registry configuration.
//!
//! Provides [`RegistryConfig`], loaded from TOML files, environment
//! variables, and defaults using the `confyg` crate.
//!
//! Environment overrides use the `FABRYK_ACL_` prefix and cover the scalar
//! top-level keys (`FABRYK_ACL_ROOT_USER`, `FABRYK_ACL_ALL_ENTRY`,
//! `FABRYK_ACL_SERVICE_PREFIX`). The `[seed]` section is read from the
//! config file only.
//!
//! # Loading Priority
//!
//! 1. Explicit `--config <path>` flag
//! 2. `FABRYK_ACL_CONFIG` environment variable
//! 3. XDG default: `~/.config/fabryk/acl.toml`
//! 4. Built-in defaults
//!
//! # Example
//!
//! ```toml
//! root_user = "root"
//! all_entry = "All"
//! service_prefix = "/api/v1"
//!
//! [seed]
//! users = ["alice", "bob"]
//! resources = ["reports"]
//! permissions = ["read", "write"]
//!
//! [seed.groups]
//! admins = ["alice"]
//! ```

use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::Result;
use crate::reference::ReferenceBuilder;
use crate::registry::{DEFAULT_ALL_ENTRY, DEFAULT_ROOT_USER};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "FABRYK_ACL_CONFIG";

/// Prefix for environment overrides (`FABRYK_ACL_ROOT_USER`, ...).
pub const ENV_PREFIX: &str = "FABRYK_ACL";

// ============================================================================
// Configuration structs
// ============================================================================

/// Configuration for an [`EntityRegistry`](crate::EntityRegistry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Identifier of the protected root user.
    pub root_user: String,

    /// Identifier of the protected wildcard-all entry.
    pub all_entry: String,

    /// Path prefix placed before `/entity/...` in entity references.
    pub service_prefix: String,

    /// Entities created when the registry is built.
    pub seed: SeedConfig,
}

/// Entities to create at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// User identifiers.
    pub users: Vec<String>,

    /// Group identifiers mapped to their members.
    pub groups: BTreeMap<String, Vec<String>>,

    /// Resource identifiers; each gets an empty ACL.
    pub resources: Vec<String>,

    /// Permission tokens.
    pub permissions: Vec<String>,
}

// ============================================================================
// Default implementations
// ============================================================================

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            root_user: DEFAULT_ROOT_USER.to_string(),
            all_entry: DEFAULT_ALL_ENTRY.to_string(),
            service_prefix: String::new(),
            seed: SeedConfig::default(),
        }
    }
}

// ============================================================================
// Config loading
// ============================================================================

impl RegistryConfig {
    /// Load configuration from file, environment, and defaults.
    ///
    /// A config path that does not exist is ignored and defaults apply.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder = Confygery::new().map_err(|e| config_err(format!("config init: {e}")))?;

        if let Some(path) = Self::resolve_config_path(config_path) {
            if path.exists() {
                log::debug!("Loading registry config from {}", path.display());
                builder
                    .add_file(&path.to_string_lossy())
                    .map_err(|e| config_err(format!("config file: {e}")))?;
            }
        }

        // Only scalar top-level keys are overridable; seeds come from the file.
        let env_opts = env::Options::with_top_level(ENV_PREFIX);
        builder
            .add_env(env_opts)
            .map_err(|e| config_err(format!("config env: {e}")))?;

        let config: Self = builder
            .build()
            .map_err(|e| config_err(format!("config build: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Resolve the config file path from explicit flag, env var, or XDG default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            return Some(PathBuf::from(path));
        }

        Self::default_config_path()
    }

    /// Return the XDG default config path.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("fabryk").join("acl.toml"))
    }

    /// Check the protected identifiers.
    ///
    /// Both must be non-blank and distinct from each other.
    pub fn validate(&self) -> Result<()> {
        if self.root_user.trim().is_empty() {
            return Err(config_err("root_user must not be empty"));
        }
        if self.all_entry.trim().is_empty() {
            return Err(config_err("all_entry must not be empty"));
        }
        if self.root_user == self.all_entry {
            return Err(config_err(format!(
                "root_user and all_entry must differ (both are '{}')",
                self.root_user
            )));
        }
        Ok(())
    }

    /// Reference builder using this config's service prefix.
    pub fn reference_builder(&self) -> ReferenceBuilder {
        ReferenceBuilder::new(&self.service_prefix)
    }

    /// Serialize this config to a pretty-printed TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| fabryk_core::Error::serialization(e.to_string()).into())
    }
}

fn config_err(msg: impl Into<String>) -> crate::Error {
    fabryk_core::Error::config(msg).into()
}

// ============================================================================
// Tests
// ============================================================================
