//! The interactive terminal session behind `datefixer fix`.

use colored::Colorize;

use crate::cli::args::FixArgs;
use crate::error::DateFixerError;
use crate::interactive::{read_key, KeyInput, TerminalInteraction};
use crate::output::format_log_entry;
use crate::shifter::{DateShifter, UPDATE_ACTION};

use super::RunOptions;

/// Menu choices of the interactive session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    Open,
    Update,
    Redraw,
    Exit,
}

impl MenuAction {
    fn from_key(key: KeyInput) -> Option<Self> {
        match key {
            KeyInput::Key(c) => match c.to_ascii_lowercase() {
                'o' => Some(Self::Open),
                'u' => Some(Self::Update),
                'q' | 'x' => Some(Self::Exit),
                _ => None,
            },
            KeyInput::Empty => Some(Self::Redraw),
            KeyInput::Closed => Some(Self::Exit),
        }
    }
}

/// Run the open / update / exit loop until the user exits.
///
/// Failures to open or update are shown in the log and the loop carries on.
///
/// # Errors
///
/// Currently infallible; the signature matches the other commands.
pub fn fix(options: &RunOptions, args: FixArgs) -> Result<String, DateFixerError> {
    let mut shifter = options.shifter();
    let mut ui = TerminalInteraction::new(options.start_dir.clone());
    if args.no_picker {
        ui = ui.without_picker();
    }

    shifter.welcome();
    if let Some(path) = args.path {
        if let Err(e) = shifter.open_store(&path) {
            tracing::debug!(error = %e, "initial open failed");
        }
    }

    let mut printed = 0;
    loop {
        printed = flush_log(&shifter, printed);
        print_menu(shifter.can_update());

        match MenuAction::from_key(read_key()) {
            Some(MenuAction::Open) => {
                if let Err(e) = shifter.open_with(&mut ui) {
                    tracing::debug!(error = %e, "open failed");
                }
            }
            Some(MenuAction::Update) if shifter.can_update() => {
                if let Err(e) = shifter.update(&mut ui) {
                    tracing::debug!(error = %e, "update failed");
                }
            }
            Some(MenuAction::Update) => {
                println!(
                    "  {}",
                    "Open a database with messages newer than now first.".yellow()
                );
            }
            Some(MenuAction::Redraw) => {}
            Some(MenuAction::Exit) => break,
            None => println!("  {}", "Invalid option".red()),
        }
    }

    shifter.exit();
    Ok(String::new())
}

/// Print transcript lines added since `printed`, returning the new cursor.
fn flush_log(shifter: &DateShifter, printed: usize) -> usize {
    let fresh = shifter.log().since(printed);
    if !fresh.is_empty() {
        println!();
        for entry in fresh {
            println!("  {}", format_log_entry(entry));
        }
    }
    printed + fresh.len()
}

fn print_menu(can_update: bool) {
    let update = format!("[u] {UPDATE_ACTION}");
    let update = if can_update {
        update.normal()
    } else {
        update.dimmed().strikethrough()
    };

    println!();
    println!(
        "  {}  {}  {}",
        "[o] Open chat database".normal(),
        update,
        "[q] Exit".normal()
    );
}
