use colored::Colorize;

use crate::core::{format_optional_timestamp, format_timestamp};
use crate::shifter::{LogEntry, LogLevel, ShiftReport, StoreSummary};
use crate::store::ShiftScope;

/// Format an inspection summary as pretty output
pub fn format_summary_pretty(summary: &StoreSummary) -> String {
    let mut output = format!("{}\n", summary.path.display().to_string().bold());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    output.push_str(&format!(
        "  {}: {}\n",
        "Latest message".dimmed(),
        format_optional_timestamp(summary.max_timestamp)
    ));
    output.push_str(&format!(
        "  {}: {}\n",
        "Current time".dimmed(),
        format_timestamp(summary.now_timestamp)
    ));

    if let Some(delta) = summary.day_delta {
        let delta_str = format!("{delta} days");
        let delta_str = if summary.needs_fix {
            delta_str.yellow().bold()
        } else {
            delta_str.normal()
        };
        output.push_str(&format!("  {}: {}\n", "Difference".dimmed(), delta_str));
    }

    output.push_str(&format!(
        "  {}: {}\n",
        "Newer than now".dimmed(),
        summary.count_messages
    ));

    let verdict = if summary.needs_fix {
        format!(
            "{} {} messages are in the future",
            "!".yellow().bold(),
            summary.count_messages
        )
    } else {
        format!("{} Nothing needs doing in this database", "✓".green())
    };
    output.push_str(&verdict);

    output
}

/// Format a shift report as pretty output
pub fn format_report_pretty(report: &ShiftReport) -> String {
    let mut output = format!(
        "{} Shifted {} messages {} days into the past.",
        "✓".green(),
        report.count_messages.to_string().bold(),
        report.days.to_string().bold()
    );

    output.push_str(&format!(
        "\n  {}: {}",
        "File".dimmed(),
        report.path.display()
    ));
    output.push_str(&format!(
        "\n  {}: {} ({})",
        "Rows updated".dimmed(),
        report.rows_updated,
        report.scope
    ));

    if report.scope == ShiftScope::All
        && u64::try_from(report.rows_updated).ok() != Some(report.count_messages)
    {
        output.push_str(&format!(
            "\n  {}",
            "Messages already in the past were moved as well.".dimmed()
        ));
    }

    output
}

/// Format a transcript entry as one terminal line
pub fn format_log_entry(entry: &LogEntry) -> String {
    match entry.level {
        LogLevel::Info => format!("{} {}", "·".dimmed(), entry.message),
        LogLevel::Warn => format!("{} {}", "!".yellow().bold(), entry.message.yellow()),
        LogLevel::Error => format!("{} {}", "✗".red().bold(), entry.message.red()),
    }
}
