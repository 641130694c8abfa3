// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Human-readable durations and timestamps for run history.

use chrono::{DateTime, Local, TimeZone};

/// Format a millisecond duration as `"1 hr 1 min 40 sec"`.
///
/// Zero-valued hours and minutes are omitted. Seconds are omitted when zero
/// unless no larger unit is shown, so `0` formats as `"0 sec"`.
pub fn format_duration_ms(ms: u64) -> String {
    let total_secs = ms / 1000;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    let mut parts = Vec::with_capacity(3);
    if hours > 0 {
        parts.push(format!("{hours} hr"));
    }
    if minutes > 0 {
        parts.push(format!("{minutes} min"));
    }
    if seconds > 0 || parts.is_empty() {
        parts.push(format!("{seconds} sec"));
    }
    parts.join(" ")
}

/// Format a date-time as `"01/01/23, 12:00 AM"`, independent of the process locale.
pub fn format_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    dt.format("%m/%d/%y, %I:%M %p").to_string()
}

/// Format epoch milliseconds in local time, see [`format_datetime`].
pub fn format_timestamp(epoch_ms: u64) -> String {
    match Local.timestamp_millis_opt(epoch_ms as i64).single() {
        Some(dt) => format_datetime(&dt),
        None => "-".to_string(),
    }
}

#[cfg(test)]
#[path = "time_fmt_tests.rs"]
mod tests;
