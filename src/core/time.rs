//! # Relative Time
//!
//! Human-relative rendering of timestamps ("3 hours ago", "in a day").
//!
//! Uses the same thresholds and rounding as day.js `fromNow()`, so post ages
//! read identically to the web client:
//!
//! ```text
//! 0-44 s      a few seconds ago
//! 45-89 s     a minute ago
//! 90 s-44 min N minutes ago
//! 45-89 min   an hour ago
//! 90 min-21 h N hours ago
//! 22-35 h     a day ago
//! 36 h-25 d   N days ago
//! 26-45 d     a month ago
//! 46 d-10 mo  N months ago
//! 11-17 mo    a year ago
//! 18 mo+      N years ago
//! ```

use chrono::{DateTime, Utc};

const MS_PER_SECOND: f64 = 1_000.0;
const MS_PER_MINUTE: f64 = 60.0 * MS_PER_SECOND;
const MS_PER_HOUR: f64 = 60.0 * MS_PER_MINUTE;
const MS_PER_DAY: f64 = 24.0 * MS_PER_HOUR;
const MS_PER_YEAR: f64 = 365.25 * MS_PER_DAY;
const MS_PER_MONTH: f64 = MS_PER_YEAR / 12.0;

/// Formats `then` relative to `now`.
pub fn from_now(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff_ms = (then - now).num_milliseconds();
    let phrase = relative_phrase(diff_ms.unsigned_abs() as f64);

    if diff_ms > 0 {
        format!("in {phrase}")
    } else {
        format!("{phrase} ago")
    }
}

/// Picks the phrase for an absolute distance in milliseconds.
fn relative_phrase(abs_ms: f64) -> String {
    let seconds = (abs_ms / MS_PER_SECOND).round() as u64;
    if seconds <= 44 {
        return "a few seconds".to_string();
    }
    if seconds <= 89 {
        return "a minute".to_string();
    }

    let minutes = (abs_ms / MS_PER_MINUTE).round() as u64;
    if minutes <= 44 {
        return format!("{minutes} minutes");
    }
    if minutes <= 89 {
        return "an hour".to_string();
    }

    let hours = (abs_ms / MS_PER_HOUR).round() as u64;
    if hours <= 21 {
        return format!("{hours} hours");
    }
    if hours <= 35 {
        return "a day".to_string();
    }

    let days = (abs_ms / MS_PER_DAY).round() as u64;
    if days <= 25 {
        return format!("{days} days");
    }
    if days <= 45 {
        return "a month".to_string();
    }

    let months = (abs_ms / MS_PER_MONTH).round() as u64;
    if months <= 10 {
        return format!("{months} months");
    }
    if months <= 17 {
        return "a year".to_string();
    }

    let years = (abs_ms / MS_PER_YEAR).round() as u64;
    format!("{years} years")
}
