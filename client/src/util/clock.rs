//! Wall clock and local-time conversions.
//!
//! Records hold UTC instants. Forms use `<input type="datetime-local">`,
//! whose value is a zone-less `YYYY-MM-DDTHH:MM` string in the viewer's
//! local time, so every form field passes through [`to_input_value`] and
//! [`from_input_value`] with the browser's current offset.

#[cfg(test)]
#[path = "clock_test.rs"]
mod clock_test;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};

const INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// The viewer's UTC offset. UTC on the server.
pub fn local_offset() -> FixedOffset {
    #[cfg(feature = "hydrate")]
    {
        offset_from_js_minutes(js_sys::Date::new_0().get_timezone_offset())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        utc()
    }
}

fn utc() -> FixedOffset {
    Utc.fix()
}

/// Convert `Date.getTimezoneOffset()` (minutes *behind* UTC) to an offset.
#[allow(clippy::cast_possible_truncation)]
pub fn offset_from_js_minutes(minutes: f64) -> FixedOffset {
    if !minutes.is_finite() {
        return utc();
    }
    FixedOffset::west_opt((minutes * 60.0).round() as i32).unwrap_or_else(utc)
}

pub fn today(offset: FixedOffset) -> NaiveDate {
    now().with_timezone(&offset).date_naive()
}

/// Format an instant for a `datetime-local` input.
pub fn to_input_value(at: DateTime<Utc>, offset: FixedOffset) -> String {
    at.with_timezone(&offset).format(INPUT_FORMAT).to_string()
}

/// Parse a `datetime-local` value. Blank or malformed input yields `None`.
/// Browsers may append seconds, which are accepted.
pub fn from_input_value(raw: &str, offset: FixedOffset) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let naive = NaiveDateTime::parse_from_str(raw, INPUT_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .ok()?;
    offset
        .from_local_datetime(&naive)
        .single()
        .map(|local| local.with_timezone(&Utc))
}

/// Compact label such as `Mar 14, 09:30`.
pub fn short_label(at: DateTime<Utc>, offset: FixedOffset) -> String {
    at.with_timezone(&offset).format("%b %-d, %H:%M").to_string()
}

pub fn time_label(at: DateTime<Utc>, offset: FixedOffset) -> String {
    at.with_timezone(&offset).format("%H:%M").to_string()
}
