//! # fabryk-cli
//!
//! Admin CLI for the Fabryk access-control registry.
//!
//! The `fabryk` binary loads a [`RegistryConfig`](fabryk_acl::RegistryConfig),
//! seeds an [`EntityRegistry`](fabryk_acl::EntityRegistry) from it, and
//! reports on the result:
//! - `fabryk acl show` prints the registry snapshot as JSON
//! - `fabryk acl config` prints the effective configuration as TOML
//! - `fabryk acl paths` prints entity references for every entry

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod app;
pub mod cli;
pub mod error;

pub use app::AclApp;
pub use cli::{AclAction, AclCommand, CliArgs, Command};
pub use error::{Error, Result};
