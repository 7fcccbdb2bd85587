//! Registry administration application.
//!
//! [`AclApp`] owns the loaded configuration and the registry seeded from
//! it. Each `render_*` method returns the text a subcommand prints, so the
//! output can be checked without capturing stdout.

use crate::cli::{AclAction, CliArgs, Command};
use crate::error::Result;
use fabryk_acl::{EntityRegistry, Namespace, RegistryConfig};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "info,fabryk=debug";

// ============================================================================
// AclApp
// ============================================================================

/// CLI application around a seeded [`EntityRegistry`].
pub struct AclApp {
    config: RegistryConfig,
    registry: EntityRegistry,
}

impl AclApp {
    /// Load config from file/env and seed a registry from it.
    pub fn from_args(args: &CliArgs) -> Result<Self> {
        let config = RegistryConfig::load(args.config.as_deref())?;
        Self::new(config)
    }

    /// Seed a registry from `config`.
    pub fn new(config: RegistryConfig) -> Result<Self> {
        let registry = EntityRegistry::from_config(&config)?;
        Ok(Self { config, registry })
    }

    /// The effective configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// The seeded registry.
    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    /// Initialise tracing-based logging.
    ///
    /// Uses `RUST_LOG` env var if set, otherwise defaults based on verbosity flags.
    pub fn init_logging(verbose: bool, quiet: bool) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if quiet {
            EnvFilter::new("warn")
        } else if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new(DEFAULT_LOG_FILTER)
        };

        // Ignore error if a subscriber is already set (e.g. in tests).
        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    }

    /// Run the CLI with the given arguments.
    pub fn run(args: CliArgs) -> Result<()> {
        Self::init_logging(args.verbose, args.quiet);

        match args.command {
            Some(Command::Version) => {
                println!("fabryk {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
            Some(Command::Acl(ref acl)) => {
                let app = Self::from_args(&args)?;
                println!("{}", app.render(acl.command)?);
                Ok(())
            }
            None => {
                let app = Self::from_args(&args)?;
                let registry = app.registry();
                tracing::info!(
                    "registry ready: {} users, {} groups, {} resources, {} permissions",
                    registry.user_count(),
                    registry.group_count(),
                    registry.resource_count(),
                    registry.permission_count()
                );
                Ok(())
            }
        }
    }

    /// Render the output of an ACL subcommand.
    pub fn render(&self, action: AclAction) -> Result<String> {
        match action {
            AclAction::Show { compact } => self.render_snapshot(compact),
            AclAction::Config => self.render_config(),
            AclAction::Paths => Ok(self.render_paths().join("\n")),
        }
    }

    /// The registry snapshot as JSON.
    pub fn render_snapshot(&self, compact: bool) -> Result<String> {
        let snapshot = self.registry.snapshot();
        let json = if compact {
            serde_json::to_string(&snapshot)?
        } else {
            serde_json::to_string_pretty(&snapshot)?
        };
        Ok(json)
    }

    /// The effective configuration as TOML.
    pub fn render_config(&self) -> Result<String> {
        Ok(self.config.to_toml_string()?)
    }

    /// Reference paths for every entity and membership, in namespace order.
    pub fn render_paths(&self) -> Vec<String> {
        let refs = self.config.reference_builder();
        let snapshot = self.registry.snapshot();
        let mut paths = Vec::new();

        for id in snapshot.users.keys() {
            paths.push(refs.entity(Namespace::Users, id).url);
        }
        for (id, group) in &snapshot.groups {
            paths.push(refs.entity(Namespace::Groups, id).url);
            for member in group.members() {
                paths.push(refs.membership(id, member).url);
            }
        }
        for id in snapshot.resources.keys() {
            paths.push(refs.entity(Namespace::Resources, id).url);
        }
        for permission in &snapshot.permissions {
            paths.push(refs.entity(Namespace::Permissions, permission.as_str()).url);
        }
        paths
    }
}

// ============================================================================
// Tests
// ============================================================================
