//! List queries: type/status filters and free-text search.
//!
//! Text matching is a case-insensitive substring test over a per-record
//! haystack. A blank query matches everything.

use chrono::{DateTime, TimeZone};

use super::ranking::{most_recent, sort_by_due};
use crate::models::{HealthEventType, HealthRecord, Reminder, ReminderType, TrackingEntry, TrackingType};
use crate::recurrence::{classify, ReminderStatus};

fn matches_text(needle: Option<&str>, haystack: &[Option<&str>]) -> bool {
    let needle = match needle.map(str::trim) {
        Some(n) if !n.is_empty() => n.to_lowercase(),
        _ => return true,
    };

    haystack
        .iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Filter for the tracking history list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryQuery {
    pub kind: Option<TrackingType>,
    pub text: Option<String>,
}

impl EntryQuery {
    /// Matching entries, newest first.
    pub fn apply<'a>(&self, entries: impl IntoIterator<Item = &'a TrackingEntry>) -> Vec<&'a TrackingEntry> {
        let matching = entries.into_iter().filter(|entry| self.matches(entry));
        most_recent(matching, usize::MAX)
    }

    pub fn matches(&self, entry: &TrackingEntry) -> bool {
        if self.kind.is_some_and(|kind| kind != entry.tracking_type()) {
            return false;
        }
        matches_text(
            self.text.as_deref(),
            &[
                Some(entry.tracking_type().as_str()),
                entry.notes.as_deref(),
                entry.amount(),
                entry.location_label.as_deref(),
            ],
        )
    }
}

/// Filter for the health records list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HealthQuery {
    pub kind: Option<HealthEventType>,
    pub text: Option<String>,
}

impl HealthQuery {
    /// Matching records, newest first.
    pub fn apply<'a>(&self, records: impl IntoIterator<Item = &'a HealthRecord>) -> Vec<&'a HealthRecord> {
        let matching = records.into_iter().filter(|record| self.matches(record));
        most_recent(matching, usize::MAX)
    }

    pub fn matches(&self, record: &HealthRecord) -> bool {
        if self.kind.is_some_and(|kind| kind != record.event_type()) {
            return false;
        }
        matches_text(
            self.text.as_deref(),
            &[
                Some(record.title.as_str()),
                Some(record.event_type().as_str()),
                record.vet_name.as_deref(),
                record.clinic.as_deref(),
                record.diagnosis(),
                record.result(),
                record.notes.as_deref(),
            ],
        )
    }
}

/// Filter for the reminders list. `status: None` shows every reminder.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReminderQuery {
    pub kind: Option<ReminderType>,
    pub status: Option<ReminderStatus>,
    pub text: Option<String>,
}

impl ReminderQuery {
    /// Matching reminders, earliest due first.
    pub fn apply<'a, Tz: TimeZone>(
        &self,
        reminders: impl IntoIterator<Item = &'a Reminder>,
        now: &DateTime<Tz>,
    ) -> Vec<&'a Reminder> {
        sort_by_due(reminders.into_iter().filter(|r| self.matches(r, now)))
    }

    pub fn matches<Tz: TimeZone>(&self, reminder: &Reminder, now: &DateTime<Tz>) -> bool {
        if self.kind.is_some_and(|kind| kind != reminder.reminder_type) {
            return false;
        }
        if self.status.is_some_and(|status| status != classify(reminder, now)) {
            return false;
        }
        matches_text(
            self.text.as_deref(),
            &[
                Some(reminder.title.as_str()),
                Some(reminder.reminder_type.as_str()),
                reminder.notes.as_deref(),
            ],
        )
    }
}
