//! logging
//!
//! Process-wide `tracing` subscriber for the binary.
//!
//! Library code only emits events; this module decides where they go.
//! Events are written to stderr so stdout stays clean for `--json` output.
//! If `RUST_LOG` is set it is used as-is; otherwise the level follows the
//! `--quiet` / `--debug` flags with noisy HTTP crates held at `warn`.

use tracing_subscriber::EnvFilter;

use crate::ui::output::Verbosity;

/// Default filter directives for a verbosity level.
pub fn default_directives(verbosity: Verbosity) -> String {
    let level = match verbosity {
        Verbosity::Quiet => "warn",
        Verbosity::Normal => "info",
        Verbosity::Debug => "debug",
    };
    format!(
        "warn,gitlab_fork={level},glfork={level},reqwest=warn,hyper=warn,hyper_util=warn",
        level = level
    )
}

/// Install the global subscriber.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init(verbosity: Verbosity) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(_) => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directives(verbosity))),
        Err(_) => EnvFilter::new(default_directives(verbosity)),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbosity == Verbosity::Debug)
        .try_init();
}
