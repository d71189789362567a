//! # CLI Argument Definitions
//!
//! This module defines the command-line interface (CLI) structure using the `clap` crate.
//! Invoking the tool without a subcommand runs the full build procedure, which keeps
//! the original zero-argument contract of the deployment scripts intact.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI structure parsing command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "chronoflow-build")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Build and deployment toolkit for the ChronoFlow desktop application")]
pub struct Cli {
    /// Path to an alternate build manifest (defaults to ChronoBuild.toml in the working directory)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug-level diagnostics
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The subcommand to execute; the full build runs when omitted.
    #[command(subcommand)]
    pub command: Option<AppCommands>,
}

/// Enumeration of available application subcommands.
#[derive(Debug, Subcommand)]
pub enum AppCommands {
    /// Run the full build procedure (the default when no subcommand is given)
    Build {},
    /// Delete artifacts left over from a previous build
    Clean {},
    /// Remove the run-at-login entry for the packaged application
    Unregister {},
}
