//! cli
//!
//! Command-line interface for the fork action.
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap, sets up logging,
//! loads configuration and dispatches to a command handler. Forking itself
//! is done by [`crate::action::ForkAction`].

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use anyhow::{Context as _, Result};

use crate::config::Config;
use crate::logging;
use crate::ui::output::Verbosity;

/// State shared by all command handlers.
#[derive(Debug, Clone)]
pub struct Context {
    /// Enable debug output
    pub debug: bool,
    /// Minimal output
    pub quiet: bool,
    /// Loaded configuration
    pub config: Config,
}

impl Context {
    /// Output verbosity derived from the global flags.
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.debug)
    }
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    logging::init(Verbosity::from_flags(cli.quiet, cli.debug));

    let config = match &cli.config {
        Some(path) => Config::load_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load().context("loading config")?,
    };

    let ctx = Context {
        debug: cli.debug,
        quiet: cli.quiet,
        config,
    };

    commands::dispatch(cli.command, &ctx)
}
