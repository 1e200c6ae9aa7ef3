//! Epoch timestamp arithmetic and formatting.
//!
//! Message stores record UNIX epoch seconds. Shifts are whole days of
//! exactly 86 400 seconds, regardless of daylight saving transitions.

use chrono::{Local, TimeZone};

/// Number of seconds in one shift day.
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Format used when showing timestamps to the user.
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Convert a number of days to seconds.
///
/// Returns `None` on overflow.
#[must_use]
pub const fn days_to_seconds(days: i64) -> Option<i64> {
    days.checked_mul(SECONDS_PER_DAY)
}

/// Whole days from `earlier` to `later`, rounded towards negative infinity.
///
/// A latest message 39.5 days ahead reports 39; one 0.5 days behind reports -1.
#[must_use]
pub const fn day_delta(later: i64, earlier: i64) -> i64 {
    later.saturating_sub(earlier).div_euclid(SECONDS_PER_DAY)
}

/// Render an epoch timestamp in local time.
///
/// Falls back to the raw number when the value is outside chrono's range.
#[must_use]
pub fn format_timestamp(timestamp: i64) -> String {
    Local
        .timestamp_opt(timestamp, 0)
        .earliest()
        .map_or_else(
            || timestamp.to_string(),
            |dt| dt.format(DISPLAY_FORMAT).to_string(),
        )
}

/// Render an optional timestamp, using `none` for a missing value.
#[must_use]
pub fn format_optional_timestamp(timestamp: Option<i64>) -> String {
    timestamp.map_or_else(|| "none".to_string(), format_timestamp)
}
