//! Ranked selections: most recent, next due, latest vet visit.
//!
//! Ordering is always on parsed instants with ties broken by `id`
//! ascending. Records whose timestamp does not parse sort last.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::models::{Dated, HealthEventType, HealthRecord, Reminder};
use crate::timestamp::instant_of;

/// Up to `k` records, newest first.
pub fn most_recent<'a, T: Dated + 'a>(items: impl IntoIterator<Item = &'a T>, k: usize) -> Vec<&'a T> {
    let mut ranked: Vec<(Option<DateTime<Utc>>, &T)> = items
        .into_iter()
        .map(|item| (instant_of(item.date_iso()), item))
        .collect();

    // `None < Some`, so descending order leaves unparseable dates at the end.
    ranked.sort_by(|(a_at, a), (b_at, b)| b_at.cmp(a_at).then_with(|| a.id().cmp(b.id())));
    ranked.into_iter().take(k).map(|(_, item)| item).collect()
}

/// Up to `k` open reminders, soonest due first.
pub fn next_due<'a>(reminders: impl IntoIterator<Item = &'a Reminder>, k: usize) -> Vec<&'a Reminder> {
    let open = reminders.into_iter().filter(|r| r.is_open());
    let mut sorted = sort_by_due(open);
    sorted.truncate(k);
    sorted
}

/// Reminders ordered by due instant ascending.
pub(crate) fn sort_by_due<'a>(reminders: impl IntoIterator<Item = &'a Reminder>) -> Vec<&'a Reminder> {
    let mut keyed: Vec<(Option<DateTime<Utc>>, &Reminder)> = reminders
        .into_iter()
        .map(|r| (instant_of(&r.due_iso), r))
        .collect();
    keyed.sort_by(|(a_at, a), (b_at, b)| due_order(a_at, b_at).then_with(|| a.id.cmp(&b.id)));
    keyed.into_iter().map(|(_, r)| r).collect()
}

fn due_order(a: &Option<DateTime<Utc>>, b: &Option<DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// The vet visit with the latest date, or `None` when there is none.
///
/// On equal dates the record with the smaller id wins.
pub fn last_vet_visit<'a>(records: impl IntoIterator<Item = &'a HealthRecord>) -> Option<&'a HealthRecord> {
    records
        .into_iter()
        .filter(|record| record.event_type() == HealthEventType::VetVisit)
        .filter_map(|record| instant_of(&record.date_iso).map(|at| (at, record)))
        .max_by(|(a_at, a), (b_at, b)| a_at.cmp(b_at).then_with(|| b.id.cmp(&a.id)))
        .map(|(_, record)| record)
}
