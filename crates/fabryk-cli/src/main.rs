//! Fabryk CLI
//!
//! Command-line interface for Fabryk access-control administration.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use anyhow::Result;
use clap::Parser;
use fabryk_cli::{AclApp, CliArgs};

fn main() -> Result<()> {
    let args = CliArgs::parse();
    AclApp::run(args)?;
    Ok(())
}
