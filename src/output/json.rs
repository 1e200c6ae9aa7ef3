//! JSON output formatting for datefixer.

use serde::Serialize;
use serde_json::json;

use crate::core::format_optional_timestamp;
use crate::core::format_timestamp;
use crate::error::DateFixerError;
use crate::shifter::{ShiftReport, StoreSummary};

/// Format an inspection summary as JSON
///
/// Adds human-readable local times next to the raw epoch values.
///
/// # Errors
///
/// Returns `DateFixerError::Parse` if JSON serialization fails.
pub fn format_summary_json(summary: &StoreSummary) -> Result<String, DateFixerError> {
    let output = json!({
        "summary": summary,
        "latest": format_optional_timestamp(summary.max_timestamp),
        "now": format_timestamp(summary.now_timestamp),
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format a shift report as JSON
///
/// # Errors
///
/// Returns `DateFixerError::Parse` if JSON serialization fails.
pub fn format_report_json(report: &ShiftReport) -> Result<String, DateFixerError> {
    to_json(report)
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `DateFixerError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, DateFixerError> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ShiftScope;

    const NOW: i64 = 1_700_000_000;

    #[test]
    fn test_format_summary_json() {
        let summary = StoreSummary::new("/tmp/main.db", Some(NOW + 3 * 86_400), NOW, 4);
        let result = format_summary_json(&summary).unwrap();
        let value: serde_json::Value = serde_json::from_str(&result).unwrap();

        assert_eq!(value["summary"]["count_messages"], 4);
        assert_eq!(value["summary"]["day_delta"], 3);
        assert_eq!(value["summary"]["needs_fix"], true);
        assert_eq!(value["summary"]["path"], "/tmp/main.db");
        assert_eq!(value["now"], format_timestamp(NOW));
    }

    #[test]
    fn test_format_summary_json_empty_table() {
        let summary = StoreSummary::new("/tmp/main.db", None, NOW, 0);
        let result = format_summary_json(&summary).unwrap();

        assert!(result.contains("\"max_timestamp\": null"));
        assert!(result.contains("\"latest\": \"none\""));
    }

    #[test]
    fn test_format_report_json() {
        let report = ShiftReport {
            path: "/tmp/main.db".into(),
            days: 40,
            count_messages: 3,
            rows_updated: 5,
            scope: ShiftScope::All,
        };
        let result = format_report_json(&report).unwrap();

        assert!(result.contains("\"days\": 40"));
        assert!(result.contains("\"rows_updated\": 5"));
        assert!(result.contains("\"scope\": \"all\""));
    }
}
