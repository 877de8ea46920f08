mod cli;
mod commands;
mod config;
mod progress;
mod ui;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use std::io;

use cli::{Cli, Command};
use commands::apply::ApplyOptions;

/// Global context for the application
pub struct Context {
    pub verbose: u8,
    pub quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(if cli.quiet {
            log::LevelFilter::Error
        } else {
            log_level
        })
        .format_timestamp(None)
        .init();

    let ctx = Context {
        verbose: cli.verbose,
        quiet: cli.quiet,
    };

    match cli.command {
        Command::Apply(args) => commands::apply::apply(
            &ctx,
            cli.config.as_deref(),
            cli.switch,
            &cli.cli_path,
            &ApplyOptions {
                dry_run: args.dry_run,
                yes: args.yes,
                jobs: args.jobs,
                json: args.json,
            },
        ),
        Command::Plan => commands::apply::apply(
            &ctx,
            cli.config.as_deref(),
            cli.switch,
            &cli.cli_path,
            &ApplyOptions {
                dry_run: true,
                yes: true,
                jobs: 1,
                json: false,
            },
        ),
        Command::Types => commands::catalog::run(),
        Command::Completions { shell } => {
            generate(shell, &mut Cli::command(), "nvctl", &mut io::stdout());
            Ok(())
        }
    }
}
