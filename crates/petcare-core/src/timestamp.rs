//! ISO-8601 timestamp handling.
//!
//! Records carry their timestamps as strings (`dateISO`, `dueISO`, ...), the
//! same shape they are persisted in. Anything that orders, compares or does
//! arithmetic on them parses to an instant first, so results never depend on
//! how a particular string was laid out.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};

/// Accepted layouts for timestamps without an explicit offset (read as UTC).
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parse a timestamp, keeping the offset it was written with.
///
/// Accepts RFC 3339 (`2024-01-01T10:00:00Z`, `2024-01-01T10:00:00.000+02:00`),
/// offset-less date-times and bare dates. The last two are read as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed);
    }

    let utc = FixedOffset::east_opt(0)?;
    parse_naive(value).map(|naive| utc.from_utc_datetime(&naive))
}

/// Parse a timestamp entered by a user whose wall clock is `tz`.
///
/// Explicit offsets are honoured; offset-less date-times and bare dates are
/// local times in `tz` (the earlier instant when a DST fold repeats them).
pub fn parse_in_zone<Tz: TimeZone>(value: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    let naive = parse_naive(value)?;
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
}

fn parse_naive(value: &str) -> Option<NaiveDateTime> {
    if value.is_empty() {
        return None;
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Parse a timestamp to an absolute instant.
pub fn instant_of(value: &str) -> Option<DateTime<Utc>> {
    parse_timestamp(value).map(|parsed| parsed.with_timezone(&Utc))
}

/// Calendar day of a timestamp as seen from `tz`.
pub fn calendar_day<Tz: TimeZone>(value: &str, tz: &Tz) -> Option<NaiveDate> {
    instant_of(value).map(|instant| instant.with_timezone(tz).date_naive())
}

/// Canonical RFC 3339 form: `Z` for UTC, sub-second digits only when present.
pub fn format_timestamp(value: &DateTime<FixedOffset>) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Canonical UTC form of any zoned instant.
pub fn format_utc<Tz: TimeZone>(value: &DateTime<Tz>) -> String {
    value
        .with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::AutoSi, true)
}
