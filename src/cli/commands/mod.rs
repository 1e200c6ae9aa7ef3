//! Command implementations for datefixer.
//!
//! Each command returns the text to print; `main` prints it.

mod completions;
mod session;

pub use completions::{completion_install_instructions, completions, generate_completions};
pub use session::fix;

use std::path::{Path, PathBuf};

use serde_json::json;

use crate::cli::args::{Cli, ConfigCommands, OutputFormat, ShiftArgs};
use crate::config::{Config, Paths};
use crate::error::DateFixerError;
use crate::interactive::{PresetInteraction, TerminalInteraction};
use crate::output::{format_report, format_summary, format_summary_pretty, to_json};
use crate::shifter::{DateShifter, OpenOutcome, UpdateOutcome};
use crate::store::{MessageSchema, ShiftScope};

/// Settings resolved from the configuration file and global flags.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Where the timestamps live.
    pub schema: MessageSchema,
    /// Rows an update applies to.
    pub scope: ShiftScope,
    /// Output format for results.
    pub format: OutputFormat,
    /// Directory the file picker starts in.
    pub start_dir: PathBuf,
}

impl RunOptions {
    /// Merge global flags over the loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns `DateFixerError::Schema` if the table or column name is not a
    /// plain identifier.
    pub fn resolve(cli: &Cli, config: &Config) -> Result<Self, DateFixerError> {
        let table = cli.table.as_deref().unwrap_or(&config.store.table);
        let column = cli
            .column
            .as_deref()
            .unwrap_or(&config.store.timestamp_column);
        let scope = if cli.future_only {
            ShiftScope::Future
        } else {
            config.shift.scope
        };

        Ok(Self {
            schema: MessageSchema::new(table, column)?,
            scope,
            format: cli.output.unwrap_or(config.general.default_output),
            start_dir: config.start_dir(),
        })
    }

    /// A fresh shifter using these settings.
    #[must_use]
    pub fn shifter(&self) -> DateShifter {
        DateShifter::new(self.schema.clone(), self.scope)
    }
}

/// Execute inspect command
///
/// Opens the database read-only in effect: nothing is written, and the file
/// is closed before returning.
///
/// # Errors
///
/// Returns `DateFixerError::Open` if the file is not a valid message store.
pub fn inspect(options: &RunOptions, path: &Path) -> Result<String, DateFixerError> {
    let mut shifter = options.shifter();
    let outcome = shifter.open_store(path);
    shifter.exit();

    match outcome? {
        OpenOutcome::NothingToDo(summary) | OpenOutcome::ShiftAvailable(summary) => {
            format_summary(&summary, options.format)
        }
        OpenOutcome::Cancelled => Ok(String::new()),
    }
}

/// Execute shift command
///
/// Prompts for whatever `--days` and `--yes` do not answer.
///
/// # Errors
///
/// Returns `DateFixerError::Open` if the file cannot be inspected and
/// `DateFixerError::Database` if the update fails.
pub fn shift(options: &RunOptions, args: ShiftArgs) -> Result<String, DateFixerError> {
    let mut shifter = options.shifter();
    let prompts = TerminalInteraction::new(options.start_dir.clone()).without_picker();
    let mut ui = PresetInteraction::new(prompts)
        .with_path(Some(args.path.clone()))
        .with_days(args.days)
        .assume_yes(args.yes);

    let summary = match shifter.open_with(&mut ui)? {
        OpenOutcome::ShiftAvailable(summary) => summary,
        OpenOutcome::NothingToDo(summary) => {
            shifter.exit();
            return format_summary(&summary, options.format);
        }
        OpenOutcome::Cancelled => return Ok(String::new()),
    };

    if options.format == OutputFormat::Pretty {
        println!("{}", format_summary_pretty(&summary));
    }

    let outcome = shifter.update(&mut ui);
    shifter.exit();

    match outcome? {
        UpdateOutcome::Applied(report) => format_report(&report, options.format),
        UpdateOutcome::Aborted => match options.format {
            OutputFormat::Pretty => Ok("Not proceeding, no messages were changed.".to_string()),
            OutputFormat::Json => to_json(&json!({
                "path": args.path,
                "aborted": true,
            })),
        },
    }
}

/// Execute config subcommands.
///
/// # Errors
///
/// Returns an error if the home directory is unknown or the file cannot be
/// written.
pub fn config(config: &Config, cmd: &ConfigCommands) -> Result<String, DateFixerError> {
    let paths = Paths::new()?;
    config_at(config, cmd, &paths)
}

fn config_at(config: &Config, cmd: &ConfigCommands, paths: &Paths) -> Result<String, DateFixerError> {
    match cmd {
        ConfigCommands::Show => config.to_yaml(),
        ConfigCommands::Path => Ok(paths.config_file.display().to_string()),
        ConfigCommands::Init { force } => {
            if paths.config_file.exists() && !force {
                return Err(DateFixerError::Config(format!(
                    "{} already exists (use --force to overwrite)",
                    paths.config_file.display()
                )));
            }
            paths.ensure_dirs()?;
            Config::default().save_to_path(&paths.config_file)?;
            Ok(format!("Wrote {}", paths.config_file.display()))
        }
    }
}
