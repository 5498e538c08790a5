//! Calendar-day activity histogram.

use chrono::{DateTime, Days, NaiveDate, TimeZone};
use serde::Serialize;

use crate::models::Dated;
use crate::timestamp::calendar_day;

/// Number of records on one calendar day.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: usize,
}

/// One bucket per calendar day for the `days` days ending today, oldest first.
///
/// Days without records are present with a count of 0, so the series always
/// has exactly `days` points. Calendar days are read in `now`'s timezone.
pub fn activity_series<'a, T: Dated + 'a, Tz: TimeZone>(
    items: impl IntoIterator<Item = &'a T>,
    now: &DateTime<Tz>,
    days: u32,
) -> Vec<DailyCount> {
    let tz = now.timezone();
    let today = now.date_naive();

    let mut series: Vec<DailyCount> = (0..days)
        .rev()
        .filter_map(|back| today.checked_sub_days(Days::new(u64::from(back))))
        .map(|date| DailyCount { date, count: 0 })
        .collect();

    let Some(first) = series.first().map(|bucket| bucket.date) else {
        return series;
    };

    for item in items {
        let Some(day) = calendar_day(item.date_iso(), &tz) else {
            continue;
        };
        if day < first || day > today {
            continue;
        }
        let offset = day.signed_duration_since(first).num_days();
        if let Some(bucket) = usize::try_from(offset).ok().and_then(|i| series.get_mut(i)) {
            bucket.count += 1;
        }
    }

    series
}
