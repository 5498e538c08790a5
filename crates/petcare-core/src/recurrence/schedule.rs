//! Next-occurrence arithmetic.

use chrono::{DateTime, Datelike, Days, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use tracing::warn;

use crate::models::Repeat;
use crate::timestamp::{format_timestamp, parse_timestamp};

/// Next due date for a repeat rule, or `None` when no successor should exist.
///
/// Arithmetic is on the wall clock of the offset the timestamp was written
/// in. Monthly keeps the day-of-month; when the target month is too short
/// the surplus days roll forward (Jan 31 -> Mar 2 in a leap year, Mar 3
/// otherwise).
///
/// Stored due dates are UTC (`...Z`), so their calendar steps happen on the
/// UTC date, not the user's local date. For a user at UTC+10, a monthly
/// reminder due `2024-01-31T20:00:00Z` (Feb 1, 06:00 local) advances to
/// `2024-03-02T20:00:00Z`, not to Feb 29. Daily and weekly steps are fixed
/// 24h multiples in UTC, so local wall-clock time shifts across DST changes.
pub fn advance_due_date(current_iso: &str, repeat: Repeat) -> Option<String> {
    if !repeat.is_recurring() {
        return None;
    }

    let Some(current) = parse_timestamp(current_iso) else {
        warn!(due = current_iso, "unparseable due date, no next occurrence");
        return None;
    };

    advance(&current, repeat).map(|next| format_timestamp(&next))
}

/// Typed form of [`advance_due_date`].
pub fn advance(current: &DateTime<FixedOffset>, repeat: Repeat) -> Option<DateTime<FixedOffset>> {
    let wall_clock = current.naive_local();
    let next = match repeat {
        Repeat::None => return None,
        Repeat::Daily => wall_clock.checked_add_days(Days::new(1))?,
        Repeat::Weekly => wall_clock.checked_add_days(Days::new(7))?,
        Repeat::Monthly => add_month_with_overflow(wall_clock)?,
    };
    current.offset().from_local_datetime(&next).single()
}

fn add_month_with_overflow(wall_clock: NaiveDateTime) -> Option<NaiveDateTime> {
    let date = wall_clock.date();
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };

    let first_of_month = NaiveDate::from_ymd_opt(year, month, 1)?;
    let target = first_of_month.checked_add_days(Days::new(u64::from(date.day() - 1)))?;
    Some(target.and_time(wall_clock.time()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daily_and_weekly() {
        assert_eq!(
            advance_due_date("2024-01-01T10:00:00Z", Repeat::Daily).as_deref(),
            Some("2024-01-02T10:00:00Z")
        );
        assert_eq!(
            advance_due_date("2024-12-28T23:30:00Z", Repeat::Weekly).as_deref(),
            Some("2025-01-04T23:30:00Z")
        );
    }

    #[test]
    fn test_monthly_same_day() {
        assert_eq!(
            advance_due_date("2024-01-01T10:00:00Z", Repeat::Monthly).as_deref(),
            Some("2024-02-01T10:00:00Z")
        );
        assert_eq!(
            advance_due_date("2024-12-15T08:00:00Z", Repeat::Monthly).as_deref(),
            Some("2025-01-15T08:00:00Z")
        );
    }

    #[test]
    fn test_monthly_overflow_rolls_forward() {
        // Feb 2024 has 29 days: Feb 31 overflows by two.
        assert_eq!(
            advance_due_date("2024-01-31T10:00:00Z", Repeat::Monthly).as_deref(),
            Some("2024-03-02T10:00:00Z")
        );
        assert_eq!(
            advance_due_date("2023-01-31T10:00:00Z", Repeat::Monthly).as_deref(),
            Some("2023-03-03T10:00:00Z")
        );
        assert_eq!(
            advance_due_date("2024-03-31T10:00:00Z", Repeat::Monthly).as_deref(),
            Some("2024-05-01T10:00:00Z")
        );
    }

    #[test]
    fn test_keeps_written_offset() {
        assert_eq!(
            advance_due_date("2024-01-31T23:00:00-05:00", Repeat::Monthly).as_deref(),
            Some("2024-03-02T23:00:00-05:00")
        );
    }

    #[test]
    fn test_none_and_invalid() {
        assert_eq!(advance_due_date("2024-01-01T10:00:00Z", Repeat::None), None);
        assert_eq!(advance_due_date("garbage", Repeat::Daily), None);
        assert_eq!(advance_due_date("", Repeat::Monthly), None);
    }

    #[test]
    fn test_monthly_steps_on_the_written_offset() {
        assert_eq!(
            advance_due_date("2024-01-31T20:00:00Z", Repeat::Monthly).as_deref(),
            Some("2024-03-02T20:00:00Z")
        );
        assert_eq!(
            advance_due_date("2024-02-01T06:00:00+10:00", Repeat::Monthly).as_deref(),
            Some("2024-03-01T06:00:00+10:00")
        );
    }
}
