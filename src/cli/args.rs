//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--config <path>`: Use this config file
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::forge::{Namespace, ProjectRef, Visibility};

/// glfork - Fork GitLab projects and wait for the import to finish
#[derive(Parser, Debug)]
#[command(name = "glfork")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Use this config file instead of the default locations
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true, conflicts_with = "quiet")]
    pub debug: bool,

    /// Minimal output; only warnings and errors are logged
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fork a project and wait for the fork to finish importing
    #[command(
        name = "fork",
        after_help = "\
EXAMPLES:
    # Fork into your personal namespace
    glfork fork group/project

    # Fork by id into a team namespace, as a private project
    glfork fork 1234 --namespace team --visibility private

    # Fork on a self-managed instance and print JSON
    glfork fork group/project --base-url https://gitlab.example.com --json"
    )]
    Fork(ForkArgs),

    /// Print the action's JSON Schemas
    Schema {
        /// Which schema to print
        #[arg(value_enum, default_value_t = SchemaKind::Input)]
        kind: SchemaKind,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        after_help = "\
INSTALLATION:
    # Bash
    glfork completion bash > ~/.local/share/bash-completion/completions/glfork

    # Zsh
    glfork completion zsh > ~/.zfunc/_glfork

    # Fish
    glfork completion fish > ~/.config/fish/completions/glfork.fish

    # PowerShell
    glfork completion powershell >> $PROFILE"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments of `glfork fork`.
#[derive(Args, Debug)]
pub struct ForkArgs {
    /// Project to fork: numeric id or full path (group/project)
    #[arg(value_name = "PROJECT")]
    pub project: ProjectRef,

    /// Personal access token with api scope [default: $GITLAB_TOKEN]
    #[arg(long)]
    pub token: Option<String>,

    /// GitLab instance URL [default: from config, else https://gitlab.com]
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Destination namespace: numeric id or path
    #[arg(long)]
    pub namespace: Option<Namespace>,

    /// Name of the forked project
    #[arg(long)]
    pub name: Option<String>,

    /// Path of the forked project
    #[arg(long)]
    pub path: Option<String>,

    /// Description of the forked project
    #[arg(long)]
    pub description: Option<String>,

    /// Visibility of the forked project
    #[arg(long, value_parser = parse_visibility)]
    pub visibility: Option<Visibility>,

    /// Default branch of the forked project
    #[arg(long, value_name = "BRANCH")]
    pub default_branch: Option<String>,

    /// Delay between status checks in milliseconds
    #[arg(long, value_name = "MS", value_parser = clap::value_parser!(u64).range(1..))]
    pub interval_ms: Option<u64>,

    /// Maximum number of status checks
    #[arg(long, value_name = "N")]
    pub max_attempts: Option<u32>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

fn parse_visibility(s: &str) -> Result<Visibility, String> {
    Visibility::parse(s).ok_or_else(|| {
        let levels: Vec<&str> = Visibility::ALL.iter().map(Visibility::as_str).collect();
        format!("must be one of: {}", levels.join(", "))
    })
}

/// Schema selector for `glfork schema`.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    Input,
    Output,
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
