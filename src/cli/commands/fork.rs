//! cli::commands::fork
//!
//! Fork a project and wait for its import.
//!
//! # Resolution
//!
//! - Token: `--token`, else `$GITLAB_TOKEN`
//! - Base URL: `--base-url`, else config `base_url`, else gitlab.com
//! - Polling: `--interval-ms` / `--max-attempts`, else config `[polling]`
//!
//! With `--json`, a failure is also printed on stdout as
//! `{"error": {"code": ..., "message": ...}}`.
//!
//! # Example
//!
//! ```bash
//! GITLAB_TOKEN=glpat-xxx glfork fork group/project --namespace team
//! ```

use anyhow::{bail, Result};
use serde_json::{json, Value};

use crate::action::{ActionConfig, ActionError, ForkAction, ForkRequest};
use crate::cli::args::ForkArgs;
use crate::cli::Context;
use crate::ui::output;

/// Environment variable read when `--token` is not given.
pub const TOKEN_ENV: &str = "GITLAB_TOKEN";

/// Run the fork command.
pub fn fork(ctx: &Context, args: ForkArgs) -> Result<()> {
    let token = match args.token.clone() {
        Some(token) => token,
        None => match std::env::var(TOKEN_ENV) {
            Ok(token) if !token.is_empty() => token,
            _ => bail!(
                "no GitLab token: pass --token or set {} to a token with api scope",
                TOKEN_ENV
            ),
        },
    };

    let request = build_request(ctx, &args, token);
    let action = ForkAction::new(action_config(ctx, &args));

    // Use tokio runtime to run async code
    let rt = tokio::runtime::Runtime::new()?;
    let outcome = match rt.block_on(action.execute(&request)) {
        Ok(outcome) => outcome,
        Err(err) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&error_json(&err))?);
            }
            return Err(err.into());
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else if ctx.quiet {
        println!("{}", outcome.project_url);
    } else {
        output::print(output::format_outcome(&outcome), ctx.verbosity());
    }

    Ok(())
}

fn error_json(err: &ActionError) -> Value {
    json!({
        "error": {
            "code": err.code(),
            "message": err.to_string(),
        }
    })
}

fn build_request(ctx: &Context, args: &ForkArgs, token: String) -> ForkRequest {
    let base_url = args
        .base_url
        .clone()
        .unwrap_or_else(|| ctx.config.base_url().to_string());

    ForkRequest {
        project: args.project.clone(),
        token,
        base_url,
        namespace: args.namespace.clone(),
        name: args.name.clone(),
        path: args.path.clone(),
        description: args.description.clone(),
        visibility: args.visibility,
        default_branch: args.default_branch.clone(),
    }
}

fn action_config(ctx: &Context, args: &ForkArgs) -> ActionConfig {
    let mut config = ctx.config.action_config();
    if let Some(ms) = args.interval_ms {
        config = config.with_polling_interval_ms(ms);
    }
    if let Some(attempts) = args.max_attempts {
        config = config.with_max_polling_attempts(attempts);
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::{Cli, Command};
    use crate::config::{Config, FileConfig, PollingConfig};
    use crate::forge::{Namespace, ProjectRef};
    use clap::Parser;
    use std::time::Duration;

    fn parse(argv: &[&str]) -> ForkArgs {
        match Cli::try_parse_from(argv).unwrap().command {
            Command::Fork(args) => args,
            other => panic!("unexpected command {:?}", other),
        }
    }

    fn context(file: FileConfig) -> Context {
        let mut config = Config::default();
        config.file = file;
        Context {
            debug: false,
            quiet: false,
            config,
        }
    }

    #[test]
    fn request_uses_config_base_url() {
        let ctx = context(FileConfig {
            base_url: Some("https://gitlab.example.com".into()),
            polling: None,
        });
        let args = parse(&["glfork", "fork", "group/project", "--namespace", "9"]);

        let request = build_request(&ctx, &args, "t".into());

        assert_eq!(request.base_url, "https://gitlab.example.com");
        assert_eq!(request.project, ProjectRef::Path("group/project".into()));
        assert_eq!(request.namespace, Some(Namespace::Id(9)));
    }

    #[test]
    fn flag_base_url_wins() {
        let ctx = context(FileConfig {
            base_url: Some("https://gitlab.example.com".into()),
            polling: None,
        });
        let args = parse(&["glfork", "fork", "1", "--base-url", "https://other.example"]);

        let request = build_request(&ctx, &args, "t".into());

        assert_eq!(request.base_url, "https://other.example");
    }

    #[test]
    fn error_json_carries_code_and_message() {
        let value = error_json(&ActionError::ForkFailed("size limit".into()));
        assert_eq!(
            value,
            json!({
                "error": {
                    "code": "fork_failed",
                    "message": "Fork failed: size limit",
                }
            })
        );
    }

    #[test]
    fn polling_flags_override_config() {
        let ctx = context(FileConfig {
            base_url: None,
            polling: Some(PollingConfig {
                interval_ms: Some(500),
                max_attempts: Some(10),
            }),
        });

        let args = parse(&["glfork", "fork", "1", "--max-attempts", "2"]);
        let config = action_config(&ctx, &args);

        assert_eq!(config.polling_interval, Duration::from_millis(500));
        assert_eq!(config.max_polling_attempts, 2);
    }
}
