//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Validates command-specific arguments
//! 2. Calls the action to execute the command
//! 3. Formats and displays output
//!
//! # Async Commands
//!
//! `fork` is async because it involves network I/O. Its handler builds a
//! tokio runtime and blocks on the action from the sync context.

mod completion;
mod fork;
mod schema;

// Re-export command functions for testing and direct invocation
pub use completion::completion;
pub use fork::{fork, TOKEN_ENV};
pub use schema::schema;

use crate::cli::args::Command;
use crate::cli::Context;
use anyhow::Result;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Fork(args) => fork::fork(ctx, args),
        Command::Schema { kind } => schema::schema(kind),
        Command::Completion { shell } => completion::completion(shell),
    }
}
