use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "datefixer")]
#[command(about = "Shift future-dated messages in a chat history database back into the past")]
#[command(long_about = "datefixer - fix future timestamps in chat history

Chat clients stamp messages with the computer clock when they arrive and
sort history by that stamp. If the clock was once set into the future, new
messages end up sorted before the wrongly stamped ones. datefixer finds the
latest message in a chat database and moves timestamps back by a number of
days you choose, in a single transaction.

Close the chat client before running datefixer on its database.

QUICK START:
  datefixer                          Interactive session (open, update, exit)
  datefixer tui                      Full-screen session with a log panel
  datefixer inspect main.db          Show how far in the future messages are
  datefixer shift main.db --days 40  Shift messages 40 days into the past

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  datefixer <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Defaults to the `general.default_output` setting, or 'pretty'.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Table holding the messages (default: Messages)
    #[arg(long, global = true, env = "DATEFIXER_TABLE")]
    pub table: Option<String>,

    /// Integer epoch timestamp column (default: timestamp)
    #[arg(long, global = true, env = "DATEFIXER_COLUMN")]
    pub column: Option<String>,

    /// Only shift messages newer than the current time
    ///
    /// By default every message in the table is shifted, including those
    /// already in the past, so their relative order is preserved.
    #[arg(long, global = true)]
    pub future_only: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive terminal session (default)
    ///
    /// Shows the operation log and a menu:
    ///
    ///   [o] Open chat database
    ///   [u] Update database (only when future messages were found)
    ///   [q] Exit
    ///
    /// # Examples
    ///
    ///   datefixer
    ///   datefixer fix ~/Skype/me/main.db
    ///   datefixer fix --no-picker
    Fix(FixArgs),

    /// Full-screen session with a log panel
    ///
    /// Same workflow as 'fix' in a terminal UI. Keys: o (open),
    /// u (update), q (exit).
    Tui(TuiArgs),

    /// Show how far in the future the latest message is
    ///
    /// Opens the database, reports the latest message time, the current
    /// time, the difference in days and the number of messages newer than
    /// now, then closes it. Nothing is changed.
    ///
    /// # Examples
    ///
    ///   datefixer inspect main.db
    ///   datefixer inspect main.db -o json
    Inspect {
        /// Chat history database file
        path: PathBuf,
    },

    /// Shift timestamps of a database without the menu
    ///
    /// Asks for anything not given as a flag. With both --days and --yes the
    /// command runs without prompts.
    ///
    /// # Examples
    ///
    ///   datefixer shift main.db
    ///   datefixer shift main.db --days 40
    ///   datefixer shift main.db --days 40 --yes -o json
    Shift(ShiftArgs),

    /// Show or create the configuration file
    Config(ConfigArgs),

    /// Generate shell completion scripts
    ///
    /// Redirect to a file or source directly.
    ///
    /// Example: datefixer completions bash > ~/.bash_completion.d/datefixer
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,

        /// Show installation instructions
        #[arg(long, short = 'i')]
        install: bool,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct FixArgs {
    /// Database to open right away
    pub path: Option<PathBuf>,

    /// Type file paths instead of using the fuzzy picker
    #[arg(long)]
    pub no_picker: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct TuiArgs {
    /// Database to open right away
    pub path: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ShiftArgs {
    /// Chat history database file
    pub path: PathBuf,

    /// Number of days to move timestamps into the past
    #[arg(short, long, value_parser = clap::value_parser!(i64).range(1..))]
    pub days: Option<i64>,

    /// Do not ask for confirmation
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Print the effective configuration as YAML
    Show,
    /// Print the configuration file location
    Path,
    /// Write a configuration file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
