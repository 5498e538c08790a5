//! View models for the dashboard and statistics screens.

use chrono::{DateTime, NaiveDate, TimeZone};
use serde::Serialize;

use super::{
    activity_series, due_today_count, for_pet, last_vet_visit, most_recent, next_due,
    overdue_count, ranked_type_counts, upcoming_count, walk_minutes, DailyCount, TypeCount,
};
use crate::config::DashboardConfig;
use crate::models::{HealthRecord, Reminder, TrackingEntry};
use crate::recurrence::{classify, ReminderStatus};
use crate::timestamp::calendar_day;

/// An open reminder as listed on the dashboard.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UpcomingReminder {
    pub reminder: Reminder,
    pub overdue: bool,
}

/// Everything the dashboard shows for one pet.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardSummary {
    pub walk_minutes: f64,
    pub due_today: usize,
    pub overdue: usize,
    pub upcoming: usize,
    /// `None` when the pet has no vet visits
    pub last_vet_visit: Option<HealthRecord>,
    /// Calendar day of `last_vet_visit` in `now`'s timezone
    pub last_vet_visit_on: Option<NaiveDate>,
    pub sparkline: Vec<DailyCount>,
    pub recent_entries: Vec<TrackingEntry>,
    pub recent_health: Vec<HealthRecord>,
    pub upcoming_reminders: Vec<UpcomingReminder>,
}

impl DashboardSummary {
    pub fn compute<Tz: TimeZone>(
        now: &DateTime<Tz>,
        pet_id: &str,
        entries: &[TrackingEntry],
        health: &[HealthRecord],
        reminders: &[Reminder],
        config: &DashboardConfig,
    ) -> Self {
        let entries = for_pet(entries, pet_id);
        let health = for_pet(health, pet_id);
        let reminders = for_pet(reminders, pet_id);

        let last_visit = last_vet_visit(health.iter().copied()).cloned();
        let last_vet_visit_on = last_visit
            .as_ref()
            .and_then(|visit| calendar_day(&visit.date_iso, &now.timezone()));

        let upcoming_reminders = next_due(reminders.iter().copied(), config.upcoming_limit)
            .into_iter()
            .map(|r| UpcomingReminder {
                reminder: r.clone(),
                overdue: classify(r, now) == ReminderStatus::Overdue,
            })
            .collect();

        Self {
            walk_minutes: walk_minutes(entries.iter().copied(), now, config.walk_window_days),
            due_today: due_today_count(reminders.iter().copied(), now),
            overdue: overdue_count(reminders.iter().copied(), now),
            upcoming: upcoming_count(reminders.iter().copied(), now, config.upcoming_window_days),
            last_vet_visit: last_visit,
            last_vet_visit_on,
            sparkline: activity_series(entries.iter().copied(), now, config.sparkline_days),
            recent_entries: most_recent(entries.iter().copied(), config.recent_limit)
                .into_iter()
                .cloned()
                .collect(),
            recent_health: most_recent(health.iter().copied(), config.recent_limit)
                .into_iter()
                .cloned()
                .collect(),
            upcoming_reminders,
        }
    }
}

/// Data behind the statistics screen for one pet.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StatisticsView {
    pub activity: Vec<DailyCount>,
    /// Most frequent type first
    pub type_counts: Vec<TypeCount>,
}

impl StatisticsView {
    pub fn compute<Tz: TimeZone>(
        now: &DateTime<Tz>,
        pet_id: &str,
        entries: &[TrackingEntry],
        config: &DashboardConfig,
    ) -> Self {
        let entries = for_pet(entries, pet_id);
        Self {
            activity: activity_series(entries.iter().copied(), now, config.statistics_days),
            type_counts: ranked_type_counts(entries.iter().copied()),
        }
    }
}
