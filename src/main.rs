use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use datefixer::cli::args::{Cli, Commands, FixArgs};
use datefixer::cli::commands::{self, RunOptions};
use datefixer::config::Config;

fn main() {
    let cli = Cli::parse();
    init_tracing(matches!(cli.command, Some(Commands::Tui(_))));

    if let Err(e) = run(cli) {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default `warn`).
///
/// The full-screen UI owns the terminal, so its logs are discarded.
fn init_tracing(quiet: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    if quiet {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::sink)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load().context("loading configuration")?;
    config.general.color.apply();
    let options = RunOptions::resolve(&cli, &config)?;
    tracing::debug!(?options, "resolved options");

    let output = match cli.command.unwrap_or_else(|| Commands::Fix(FixArgs::default())) {
        Commands::Fix(args) => commands::fix(&options, args)?,
        Commands::Tui(args) => {
            datefixer::tui::run(&options, &args)?;
            String::new()
        }
        Commands::Inspect { path } => commands::inspect(&options, &path)?,
        Commands::Shift(args) => commands::shift(&options, args)?,
        Commands::Config(args) => commands::config(&config, &args.command)?,
        Commands::Completions { shell, install } => commands::completions(shell, install)?,
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
