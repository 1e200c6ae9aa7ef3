//! Answers supplied up front on the command line.

use std::path::PathBuf;

use crate::core::{FileFilter, Interaction};

/// Answers questions from preset values, asking `fallback` for the rest.
///
/// Used by `datefixer shift` so `--days` and `--yes` skip the matching
/// prompts while anything not given on the command line is still asked.
#[derive(Debug)]
pub struct PresetInteraction<I> {
    path: Option<PathBuf>,
    days: Option<i64>,
    assume_yes: bool,
    fallback: I,
}

impl<I: Interaction> PresetInteraction<I> {
    /// Create preset answers on top of `fallback`.
    #[must_use]
    pub const fn new(fallback: I) -> Self {
        Self {
            path: None,
            days: None,
            assume_yes: false,
            fallback,
        }
    }

    /// Answer the file chooser with `path`.
    #[must_use]
    pub fn with_path(mut self, path: Option<PathBuf>) -> Self {
        self.path = path;
        self
    }

    /// Answer the day prompt with `days`.
    #[must_use]
    pub fn with_days(mut self, days: Option<i64>) -> Self {
        self.days = days;
        self
    }

    /// Answer every confirmation with yes.
    #[must_use]
    pub fn assume_yes(mut self, yes: bool) -> Self {
        self.assume_yes = yes;
        self
    }
}

impl<I: Interaction> Interaction for PresetInteraction<I> {
    fn choose_file(&mut self, filter: &FileFilter) -> Option<PathBuf> {
        match self.path.take() {
            Some(path) => Some(path),
            None => self.fallback.choose_file(filter),
        }
    }

    fn ask_integer(&mut self, title: &str, prompt: &str, default: Option<i64>) -> Option<i64> {
        match self.days {
            Some(days) => {
                tracing::debug!(days, "using preset day count");
                Some(days)
            }
            None => self.fallback.ask_integer(title, prompt, default),
        }
    }

    fn confirm(&mut self, title: &str, message: &str) -> bool {
        if self.assume_yes {
            tracing::info!(title, message, "confirmed by --yes");
            true
        } else {
            self.fallback.confirm(title, message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MockInteraction;

    #[test]
    fn test_preset_days_skip_prompt() {
        let mut fallback = MockInteraction::new();
        fallback.expect_ask_integer().never();
        let mut ui = PresetInteraction::new(fallback).with_days(Some(12));

        assert_eq!(ui.ask_integer("Days", "How many?", Some(3)), Some(12));
    }

    #[test]
    fn test_missing_days_falls_back() {
        let mut fallback = MockInteraction::new();
        fallback
            .expect_ask_integer()
            .withf(|_, _, default| *default == Some(3))
            .times(1)
            .returning(|_, _, _| Some(7));
        let mut ui = PresetInteraction::new(fallback);

        assert_eq!(ui.ask_integer("Days", "How many?", Some(3)), Some(7));
    }

    #[test]
    fn test_assume_yes_skips_confirmation() {
        let mut fallback = MockInteraction::new();
        fallback.expect_confirm().never();
        let mut ui = PresetInteraction::new(fallback).assume_yes(true);

        assert!(ui.confirm("Proceed?", "Shift 3 messages 40 days into the past?"));
    }

    #[test]
    fn test_confirmation_falls_back() {
        let mut fallback = MockInteraction::new();
        fallback.expect_confirm().times(1).returning(|_, _| false);
        let mut ui = PresetInteraction::new(fallback);

        assert!(!ui.confirm("Proceed?", "Shift?"));
    }

    #[test]
    fn test_preset_path_used_once() {
        let mut fallback = MockInteraction::new();
        fallback.expect_choose_file().times(1).returning(|_| None);
        let mut ui =
            PresetInteraction::new(fallback).with_path(Some(PathBuf::from("/tmp/main.db")));

        let filter = FileFilter::default();
        assert_eq!(ui.choose_file(&filter), Some(PathBuf::from("/tmp/main.db")));
        assert_eq!(ui.choose_file(&filter), None);
    }
}
