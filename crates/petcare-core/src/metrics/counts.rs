//! Counts, sums and rollups.

use std::collections::HashMap;

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::Serialize;

use crate::models::{Reminder, TrackingEntry, TrackingType};
use crate::recurrence::{classify, ReminderStatus};
use crate::timestamp::{calendar_day, instant_of};

/// Minutes walked in the rolling window ending at `now`.
///
/// The window is `[now - (window_days - 1) * 24h, now]`, compared on
/// instants rather than calendar days. Walks without a duration count as 0.
pub fn walk_minutes<'a, Tz: TimeZone>(
    entries: impl IntoIterator<Item = &'a TrackingEntry>,
    now: &DateTime<Tz>,
    window_days: u32,
) -> f64 {
    let now = now.with_timezone(&Utc);
    let start = now
        .checked_sub_signed(Duration::days(i64::from(window_days.saturating_sub(1))))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);

    entries
        .into_iter()
        .filter(|entry| entry.tracking_type() == TrackingType::Walk)
        .filter(|entry| instant_of(&entry.date_iso).is_some_and(|at| at >= start && at <= now))
        .map(|entry| entry.duration_min().unwrap_or(0.0))
        .fold(0.0, |total, minutes| total + minutes)
}

/// Open reminders due on the same calendar day as `now`.
pub fn due_today_count<'a, Tz: TimeZone>(
    reminders: impl IntoIterator<Item = &'a Reminder>,
    now: &DateTime<Tz>,
) -> usize {
    let tz = now.timezone();
    let today = now.date_naive();

    reminders
        .into_iter()
        .filter(|r| r.is_open())
        .filter(|r| calendar_day(&r.due_iso, &tz) == Some(today))
        .count()
}

pub fn overdue_count<'a, Tz: TimeZone>(
    reminders: impl IntoIterator<Item = &'a Reminder>,
    now: &DateTime<Tz>,
) -> usize {
    reminders
        .into_iter()
        .filter(|r| classify(r, now) == ReminderStatus::Overdue)
        .count()
}

/// Open reminders due within `[now, now + days * 24h]`.
pub fn upcoming_count<'a, Tz: TimeZone>(
    reminders: impl IntoIterator<Item = &'a Reminder>,
    now: &DateTime<Tz>,
    days: u32,
) -> usize {
    let now = now.with_timezone(&Utc);
    let end = now
        .checked_add_signed(Duration::days(i64::from(days)))
        .unwrap_or(DateTime::<Utc>::MAX_UTC);

    reminders
        .into_iter()
        .filter(|r| r.is_open())
        .filter(|r| instant_of(&r.due_iso).is_some_and(|due| due >= now && due <= end))
        .count()
}

/// Number of entries per tracking type. Types with no entries are absent.
pub fn counts_by_type<'a>(
    entries: impl IntoIterator<Item = &'a TrackingEntry>,
) -> HashMap<TrackingType, usize> {
    let mut counts = HashMap::new();
    for entry in entries {
        *counts.entry(entry.tracking_type()).or_insert(0) += 1;
    }
    counts
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct TypeCount {
    pub kind: TrackingType,
    pub count: usize,
}

/// [`counts_by_type`] ordered for display: most frequent first.
pub fn ranked_type_counts<'a>(entries: impl IntoIterator<Item = &'a TrackingEntry>) -> Vec<TypeCount> {
    let mut ranked: Vec<TypeCount> = counts_by_type(entries)
        .into_iter()
        .map(|(kind, count)| TypeCount { kind, count })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.kind.cmp(&b.kind)));
    ranked
}
