//! Display helpers for timestamps and due times.
//!
//! The output follows the en-US shapes (`Oct 19, 2026`, `02:30 PM`); there is no
//! locale negotiation.

use std::fmt::Display;

use chrono::{DateTime, Local, NaiveTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

static DUE_TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{2}):([0-9]{2})$").expect("valid regex"));

/// Normalize a raw due-time field into `"HH:MM"`, or `""` when it is not a
/// strict two-digit `HH:MM` value. Out-of-range parts are clamped.
pub fn sanitize_due_time(raw: &str) -> String {
    let value = raw.trim();
    if value.is_empty() {
        return String::new();
    }
    let Some(caps) = DUE_TIME_RE.captures(value) else {
        return String::new();
    };
    let hour: u32 = caps[1].parse().unwrap_or(0);
    let minute: u32 = caps[2].parse().unwrap_or(0);
    format!("{:02}:{:02}", hour.min(23), minute.min(59))
}

/// `Added Oct 19, 2026 at 02:30 PM`, in the local time zone.
pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    format_timestamp_in(instant, &Local)
}

pub fn format_timestamp_in<Tz>(instant: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let local = instant.with_timezone(tz);
    format!(
        "Added {} at {}",
        local.format("%b %d, %Y"),
        local.format("%I:%M %p")
    )
}

/// Render a sanitized `HH:MM` as a 12-hour time of day; `""` when malformed.
pub fn format_due_time(hhmm: &str) -> String {
    let Some((hour, minute)) = hhmm.split_once(':') else {
        return String::new();
    };
    if minute.contains(':') {
        return String::new();
    }
    let (Ok(hour), Ok(minute)) = (hour.trim().parse::<u32>(), minute.trim().parse::<u32>()) else {
        return String::new();
    };
    NaiveTime::from_hms_opt(hour, minute, 0)
        .map(|time| time.format("%I:%M %p").to_string())
        .unwrap_or_default()
}

/// Header clock text, e.g. `Mon, Oct 19, 2026 · 2:30:05 PM`.
pub fn format_clock<Tz>(now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!(
        "{} · {}",
        now.format("%a, %b %d, %Y"),
        now.format("%-I:%M:%S %p")
    )
}
