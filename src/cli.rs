use clap::{Parser, Subcommand};
use clap_complete::Shell;

use nvoskit::DEFAULT_CLI_PATH;

#[derive(Parser)]
#[command(name = "nvctl")]
#[command(version)]
#[command(about = "Declarative configuration for Netvisor switches", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Intent file (defaults to ~/.config/nvctl/intent.toml)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Target switch by name (overrides the intent file's `switch`)
    #[arg(long, global = true)]
    pub switch: Option<String>,

    /// Path to the management CLI binary
    #[arg(long, global = true, default_value = DEFAULT_CLI_PATH)]
    pub cli_path: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Reconcile the intent file against the switch
    Apply(ApplyArgs),

    /// Preview what apply would do; runs existence checks but mutates nothing
    Plan,

    /// List supported resource types
    Types,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser)]
pub struct ApplyArgs {
    /// Show what would change without executing mutating commands
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Number of resources to reconcile in parallel
    #[arg(short, long, default_value = "1")]
    pub jobs: usize,

    /// Emit outcomes as JSON on stdout
    #[arg(long)]
    pub json: bool,
}
