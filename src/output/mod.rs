//! Output formatting for datefixer.
//!
//! This module renders inspection summaries, shift reports and transcript
//! lines as colored text or JSON.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::error::DateFixerError;
use crate::shifter::{ShiftReport, StoreSummary};

pub use json::*;
pub use pretty::*;

/// Format an inspection summary based on output format
///
/// # Errors
///
/// Returns `DateFixerError::Parse` if JSON serialization fails.
pub fn format_summary(summary: &StoreSummary, format: OutputFormat) -> Result<String, DateFixerError> {
    match format {
        OutputFormat::Pretty => Ok(format_summary_pretty(summary)),
        OutputFormat::Json => format_summary_json(summary),
    }
}

/// Format a shift report based on output format
///
/// # Errors
///
/// Returns `DateFixerError::Parse` if JSON serialization fails.
pub fn format_report(report: &ShiftReport, format: OutputFormat) -> Result<String, DateFixerError> {
    match format {
        OutputFormat::Pretty => Ok(format_report_pretty(report)),
        OutputFormat::Json => format_report_json(report),
    }
}
