//! Line-based prompts on the controlling terminal.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use colored::Colorize;

use crate::core::{FileFilter, Interaction};

use super::picker::{pick_file, FilePick};

/// Prompts the user on stdin/stdout.
#[derive(Debug, Clone)]
pub struct TerminalInteraction {
    start_dir: PathBuf,
    use_picker: bool,
}

impl TerminalInteraction {
    /// Create prompts whose file picker starts in `start_dir`.
    #[must_use]
    pub const fn new(start_dir: PathBuf) -> Self {
        Self {
            start_dir,
            use_picker: true,
        }
    }

    /// Ask for typed paths only, without the fuzzy picker.
    #[must_use]
    pub fn without_picker(mut self) -> Self {
        self.use_picker = false;
        self
    }

    fn title(title: &str) {
        println!();
        println!("  {} {}", "→".cyan(), title.bold());
    }
}

impl Interaction for TerminalInteraction {
    fn choose_file(&mut self, filter: &FileFilter) -> Option<PathBuf> {
        Self::title("Open chat database");

        if self.use_picker {
            match pick_file(&self.start_dir, filter) {
                FilePick::Chosen(path) => return Some(path),
                FilePick::Aborted => return None,
                FilePick::TypePath => {}
            }
        }

        println!("    {} {}", "Expected:".dimmed(), filter.to_string().dimmed());
        read_line("Path to database file (empty to cancel)").map(|p| expand_home(&p))
    }

    fn ask_integer(&mut self, title: &str, prompt: &str, default: Option<i64>) -> Option<i64> {
        Self::title(title);
        println!("    {prompt}");
        if let Some(suggested) = default {
            println!("    {} {}", "Suggested:".dimmed(), suggested.to_string().bold());
        }

        loop {
            let input = read_line("Days (empty to cancel)")?;
            match input.parse::<i64>() {
                Ok(value) => return Some(value),
                Err(_) => println!(
                    "  {}",
                    "Please enter a whole number, or leave empty to cancel.".yellow()
                ),
            }
        }
    }

    fn confirm(&mut self, title: &str, message: &str) -> bool {
        Self::title(title);
        println!("    {}", message.yellow());
        print!("  [y/n] ");
        io::stdout().flush().ok();

        matches!(read_key(), KeyInput::Key(c) if c.eq_ignore_ascii_case(&'y'))
    }
}

/// Read a line of input, `None` if empty or stdin is closed.
fn read_line(prompt: &str) -> Option<String> {
    print!("  {} {}: ", ">".green(), prompt);
    io::stdout().flush().ok()?;

    let mut input = String::new();
    let read = io::stdin().lock().read_line(&mut input).ok()?;
    if read == 0 {
        return None;
    }

    let trimmed = input.trim().to_string();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// A single-key answer read from a line of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// First non-blank character of the line.
    Key(char),
    /// The line was blank.
    Empty,
    /// Stdin is closed or unreadable.
    Closed,
}

/// Read a single character answer from stdin.
pub fn read_key() -> KeyInput {
    print!("  {} ", ">".green());
    io::stdout().flush().ok();

    read_key_from(&mut io::stdin().lock())
}

fn read_key_from(reader: &mut impl BufRead) -> KeyInput {
    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(0) | Err(_) => KeyInput::Closed,
        Ok(_) => input.trim().chars().next().map_or(KeyInput::Empty, KeyInput::Key),
    }
}

/// Expand a leading `~/` to the home directory.
fn expand_home(input: &str) -> PathBuf {
    match (input.strip_prefix("~/"), std::env::var_os("HOME")) {
        (Some(rest), Some(home)) => PathBuf::from(home).join(rest),
        _ => PathBuf::from(input),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_key_tells_blank_line_from_eof() {
        assert_eq!(read_key_from(&mut "  o \n".as_bytes()), KeyInput::Key('o'));
        assert_eq!(read_key_from(&mut "\n".as_bytes()), KeyInput::Empty);
        assert_eq!(read_key_from(&mut "   \r\n".as_bytes()), KeyInput::Empty);
        assert_eq!(read_key_from(&mut "".as_bytes()), KeyInput::Closed);
    }

    #[test]
    fn test_read_key_consumes_one_line() {
        let mut input = "\nq\n".as_bytes();
        assert_eq!(read_key_from(&mut input), KeyInput::Empty);
        assert_eq!(read_key_from(&mut input), KeyInput::Key('q'));
        assert_eq!(read_key_from(&mut input), KeyInput::Closed);
    }

    #[test]
    fn test_expand_home() {
        let home = std::env::var_os("HOME").map(PathBuf::from);
        if let Some(home) = home {
            assert_eq!(expand_home("~/Skype/main.db"), home.join("Skype/main.db"));
        }
        assert_eq!(expand_home("/tmp/main.db"), PathBuf::from("/tmp/main.db"));
        assert_eq!(expand_home("main.db"), PathBuf::from("main.db"));
    }

    #[test]
    fn test_without_picker() {
        let ui = TerminalInteraction::new(PathBuf::from("/tmp")).without_picker();
        assert!(!ui.use_picker);
        assert_eq!(ui.start_dir, PathBuf::from("/tmp"));
    }
}
