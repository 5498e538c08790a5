//! Reminder transitions: complete/uncomplete, snooze, classify.

use std::fmt;

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::advance_due_date;
use crate::collections;
use crate::models::{new_id, Reminder, ValidationResult};
use crate::timestamp::{format_timestamp, format_utc, instant_of, parse_timestamp};

/// Derived state of a reminder at a given instant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ReminderStatus {
    Completed,
    Overdue,
    Upcoming,
}

impl ReminderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReminderStatus::Completed => "Completed",
            ReminderStatus::Overdue => "Overdue",
            ReminderStatus::Upcoming => "Upcoming",
        }
    }
}

impl fmt::Display for ReminderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a reminder. Exactly one status holds for any reminder and `now`.
///
/// An open reminder whose due date cannot be parsed is never before `now`,
/// so it counts as upcoming.
pub fn classify<Tz: TimeZone>(reminder: &Reminder, now: &DateTime<Tz>) -> ReminderStatus {
    if reminder.is_completed() {
        return ReminderStatus::Completed;
    }

    match instant_of(&reminder.due_iso) {
        Some(due) if due < now.with_timezone(&Utc) => ReminderStatus::Overdue,
        _ => ReminderStatus::Upcoming,
    }
}

/// Outcome of toggling a reminder's completion.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub updated: Reminder,
    /// Next occurrence, only when an open repeating reminder was completed
    pub successor: Option<Reminder>,
}

/// Toggle completion of a single reminder.
///
/// Open → completed at `now`, plus a successor when the reminder repeats and
/// its due date advances. Completed → open again, with no successor.
pub fn complete_reminder<Tz: TimeZone>(reminder: &Reminder, now: &DateTime<Tz>) -> Completion {
    let mut updated = reminder.clone();

    if reminder.is_completed() {
        updated.completed_at_iso = None;
        debug!(id = %reminder.id, "reminder reopened");
        return Completion {
            updated,
            successor: None,
        };
    }

    let completed_at = format_utc(now);
    updated.completed_at_iso = Some(completed_at.clone());

    let successor = advance_due_date(&reminder.due_iso, reminder.repeat).map(|due_iso| Reminder {
        id: new_id(),
        due_iso,
        created_at_iso: completed_at,
        completed_at_iso: None,
        ..reminder.clone()
    });

    match &successor {
        Some(next) => debug!(id = %reminder.id, successor = %next.id, due = %next.due_iso, "reminder completed"),
        None => debug!(id = %reminder.id, "reminder completed"),
    }

    Completion { updated, successor }
}

/// Shift a reminder's due date by `minutes` (negative moves it earlier).
///
/// A due date that does not parse is left as it is.
pub fn snooze_reminder(reminder: &Reminder, minutes: i64) -> Reminder {
    let mut snoozed = reminder.clone();

    let shifted = parse_timestamp(&reminder.due_iso).and_then(|due| {
        Duration::try_minutes(minutes).and_then(|delta| due.checked_add_signed(delta))
    });

    match shifted {
        Some(due) => snoozed.due_iso = format_timestamp(&due),
        None => warn!(id = %reminder.id, due = %reminder.due_iso, minutes, "cannot snooze reminder"),
    }

    snoozed
}

/// Toggle completion of the reminder with `id` inside a collection.
///
/// A spawned successor goes to the front, matching newest-first storage.
/// Unknown ids leave the collection unchanged.
pub fn toggle_complete<Tz: TimeZone>(
    reminders: &[Reminder],
    id: &str,
    now: &DateTime<Tz>,
) -> Vec<Reminder> {
    let Some(found) = reminders.iter().find(|r| r.id == id) else {
        debug!(id, "toggle on unknown reminder");
        return reminders.to_vec();
    };

    let Completion { updated, successor } = complete_reminder(found, now);

    let mut next = Vec::with_capacity(reminders.len() + 1);
    next.extend(successor);
    next.extend(
        reminders
            .iter()
            .map(|r| if r.id == id { updated.clone() } else { r.clone() }),
    );
    next
}

/// Snooze the reminder with `id` inside a collection.
pub fn snooze(reminders: &[Reminder], id: &str, minutes: i64) -> Vec<Reminder> {
    reminders
        .iter()
        .map(|r| if r.id == id { snooze_reminder(r, minutes) } else { r.clone() })
        .collect()
}

/// Add a new reminder to the front of a collection.
pub fn add_reminder(reminders: &[Reminder], reminder: Reminder) -> ValidationResult<Vec<Reminder>> {
    collections::prepend(reminders, reminder)
}

/// Remove the reminder with `id`. Successors and predecessors are unaffected.
pub fn delete_reminder(reminders: &[Reminder], id: &str) -> Vec<Reminder> {
    collections::remove(reminders, id)
}
