//! Recovery of free-form time-of-day strings
//!
//! Field staff typed hours by hand: "7:30 am", "7:30AM", "12:00 md" (mediodía),
//! "15:00". Anything that cannot be read resolves to midnight so the record is
//! still created.

use crate::constants::formats::{MIDDAY_FORMATS, MIDDAY_MARKER, TIME_FORMATS};
use chrono::NaiveTime;

/// Recover a time of day, falling back to midnight
pub fn recover(raw: Option<&str>) -> NaiveTime {
    raw.and_then(recover_strict).unwrap_or(NaiveTime::MIN)
}

/// Recover a time of day, or None when the fallback would apply
///
/// Digit-only input such as "93" is treated as unreadable.
pub fn recover_strict(raw: &str) -> Option<NaiveTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let lowered = trimmed.to_lowercase();
    if lowered.contains(MIDDAY_MARKER) {
        let rewritten = lowered.replace(MIDDAY_MARKER, "pm");
        if let Some(time) = parse_with(&rewritten, MIDDAY_FORMATS) {
            return Some(time);
        }
    }

    parse_with(&trimmed.to_uppercase(), TIME_FORMATS)
}

fn parse_with(text: &str, formats: &[&str]) -> Option<NaiveTime> {
    formats
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(text, format).ok())
}
