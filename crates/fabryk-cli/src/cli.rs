//! CLI argument parsing and command definitions.

use clap::{Parser, Subcommand};

// ============================================================================
// CLI argument types
// ============================================================================

/// Fabryk access-control administration tool.
#[derive(Parser, Debug)]
#[command(name = "fabryk", author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to configuration file.
    #[arg(short, long, env = "FABRYK_ACL_CONFIG")]
    pub config: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-essential output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print version information.
    Version,

    /// Registry operations.
    Acl(AclCommand),
}

/// ACL-specific subcommands.
#[derive(Parser, Debug)]
pub struct AclCommand {
    /// ACL subcommand to execute.
    #[command(subcommand)]
    pub command: AclAction,
}

/// Available ACL subcommands.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AclAction {
    /// Print the seeded registry as JSON.
    Show {
        /// Emit compact single-line JSON.
        #[arg(long)]
        compact: bool,
    },

    /// Print the effective configuration as TOML.
    Config,

    /// Print the reference path of every entity.
    Paths,
}

// ============================================================================
// Tests
// ============================================================================
