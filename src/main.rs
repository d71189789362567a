#![warn(rust_2018_idioms, unused_lifetimes)]
#![allow(clippy::print_stderr, clippy::print_stdout)]

pub mod handlers;
pub mod models;
pub mod services;

use crate::models::args::{AppCommands, Cli};
use crate::models::config::BuildConfig;

use anyhow::Result;
use clap::Parser;

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        eprintln!("\n❌ {err:#}");
        pause_if_interactive();
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    services::logging::init(cli.verbose)?;

    let config = BuildConfig::load(cli.config.as_deref())?;

    match cli.command {
        None | Some(AppCommands::Build {}) => handlers::build::run(&config),
        Some(AppCommands::Clean {}) => handlers::clean::run(&config),
        Some(AppCommands::Unregister {}) => handlers::unregister::run(&config),
    }
}

/// Blocks for Enter so a double-clicked console window stays open long
/// enough to read the failure. Skipped when stdin is not a terminal.
fn pause_if_interactive() {
    if atty::is(atty::Stream::Stdin) {
        eprintln!("Press Enter to exit...");
        let mut ack = String::new();
        let _ = std::io::stdin().read_line(&mut ack);
    }
}
