//! gitlab-fork - Fork GitLab projects and wait for the fork to finish
//!
//! Provides the `gitlab:project:fork` action: validate input, ask a GitLab
//! instance to fork a project, poll until the fork's import settles, and
//! report the new project's identifiers and URLs.
//!
//! # Architecture
//!
//! - [`action`] - The fork action: input, polling, error classification
//! - [`forge`] - GitLab API abstraction, REST client and mock
//! - [`config`] - Config file loading
//! - [`cli`] - Command-line interface layer (parses args, runs the action)
//! - [`logging`] - `tracing` subscriber setup for the binary
//! - [`ui`] - Terminal output
//!
//! # Guarantees
//!
//! 1. At most one destination namespace is sent per fork
//! 2. A created fork is never deleted, whatever happens afterwards
//! 3. Every failure reaches the caller as an `ActionError`

pub mod action;
pub mod cli;
pub mod config;
pub mod forge;
pub mod logging;
pub mod ui;
