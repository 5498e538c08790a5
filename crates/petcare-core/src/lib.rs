//! PetCare Core Library
//!
//! Local-first pet-care records: care events, health history and recurring
//! reminders, plus the metrics behind the dashboard and statistics screens.
//!
//! # Architecture
//!
//! ```text
//!          Host UI (forms, lists, charts)
//!                     │
//!        load ────────┼──────── save
//!          │          │           ▲
//!          ▼          ▼           │
//!   ┌────────────┐  ┌──────────────────────┐
//!   │  Database  │  │  Recurrence engine   │  complete / uncomplete
//!   │ (kv_store) │  │  collections         │  snooze / add / delete
//!   └────────────┘  └──────────────────────┘
//!          │
//!          ▼
//!   ┌──────────────────────┐
//!   │  Metrics             │  counts, windows, histograms,
//!   │                      │  dashboard + statistics views
//!   └──────────────────────┘
//! ```
//!
//! # Core Principle
//!
//! **The engines are pure.** Every operation takes a collection and returns
//! a new one (or a read-only view). The caller owns the load → transform →
//! save cycle; [`PetCareCore`] does exactly that under a lock.
//!
//! # Modules
//!
//! - [`models`]: Domain types (TrackingEntry, HealthRecord, Reminder, Pet)
//! - [`recurrence`]: Reminder state machine and next-occurrence arithmetic
//! - [`metrics`]: Aggregations, list queries and view models
//! - [`collections`]: Copy-on-write add/delete of records
//! - [`db`]: SQLite key-value persistence
//! - [`config`]: Dashboard settings
//! - [`timestamp`]: ISO-8601 parsing and formatting

pub mod collections;
pub mod config;
pub mod db;
pub mod metrics;
pub mod models;
pub mod recurrence;
pub mod timestamp;

// Re-export commonly used types
pub use config::DashboardConfig;
pub use db::Database;
pub use metrics::{DailyCount, DashboardSummary, StatisticsView, TypeCount};
pub use models::{
    HealthEventType, HealthKind, HealthRecord, Pet, Priority, Reminder, ReminderType, Repeat,
    TrackingEntry, TrackingKind, TrackingType, ValidationError,
};
pub use recurrence::{advance_due_date, classify, complete_reminder, snooze_reminder, Completion, ReminderStatus};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

use chrono::Local;
use tracing::debug;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum PetCareError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<db::DbError> for PetCareError {
    fn from(e: db::DbError) -> Self {
        PetCareError::DatabaseError(e.to_string())
    }
}

impl From<serde_json::Error> for PetCareError {
    fn from(e: serde_json::Error) -> Self {
        PetCareError::SerializationError(e.to_string())
    }
}

impl From<ValidationError> for PetCareError {
    fn from(e: ValidationError) -> Self {
        PetCareError::InvalidInput(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for PetCareError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        PetCareError::DatabaseError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open or create a database at the given path.
#[uniffi::export]
pub fn open_database(path: String) -> Result<Arc<PetCareCore>, PetCareError> {
    let db = Database::open(&path)?;
    Ok(PetCareCore::new(db, DashboardConfig::default()))
}

/// Open a database with dashboard settings given as JSON.
#[uniffi::export]
pub fn open_database_with_config(
    path: String,
    config_json: String,
) -> Result<Arc<PetCareCore>, PetCareError> {
    let config = DashboardConfig::from_json(&config_json)?;
    config.validate()?;
    let db = Database::open(&path)?;
    Ok(PetCareCore::new(db, config))
}

/// Create an in-memory database (for testing).
#[uniffi::export]
pub fn open_database_in_memory() -> Result<Arc<PetCareCore>, PetCareError> {
    let db = Database::open_in_memory()?;
    Ok(PetCareCore::new(db, DashboardConfig::default()))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe database wrapper for FFI.
///
/// Each mutating call is one load → transform → save cycle under the lock.
#[derive(uniffi::Object)]
pub struct PetCareCore {
    db: Arc<Mutex<Database>>,
    config: DashboardConfig,
}

impl PetCareCore {
    fn new(db: Database, config: DashboardConfig) -> Arc<Self> {
        Arc::new(Self {
            db: Arc::new(Mutex::new(db)),
            config,
        })
    }
}

#[uniffi::export]
impl PetCareCore {
    // =========================================================================
    // Reminder Operations
    // =========================================================================

    /// Reminders for a pet, earliest due first.
    pub fn list_reminders(&self, pet_id: String) -> Result<Vec<FfiReminder>, PetCareError> {
        let db = self.db.lock()?;
        let reminders = db.load_reminders();
        let query = metrics::ReminderQuery::default();
        let pet_reminders = metrics::for_pet(&reminders, &pet_id);
        Ok(query
            .apply(pet_reminders, &Local::now())
            .into_iter()
            .map(|r| r.clone().into())
            .collect())
    }

    /// Create a new open reminder.
    ///
    /// `due_iso` without an offset is read as local time; the stored value is UTC.
    pub fn add_reminder(
        &self,
        pet_id: String,
        reminder_type: String,
        title: String,
        due_iso: String,
        repeat: String,
        priority: String,
        notes: Option<String>,
    ) -> Result<FfiReminder, PetCareError> {
        let mut reminder = Reminder::new(
            pet_id,
            reminder_type.parse::<ReminderType>()?,
            title,
            normalize_input(&due_iso, "dueISO")?,
            repeat.parse::<Repeat>()?,
            priority.parse::<Priority>()?,
            timestamp::format_utc(&Local::now()),
        );
        reminder.notes = notes.filter(|n| !n.trim().is_empty());

        let db = self.db.lock()?;
        let reminders = recurrence::add_reminder(&db.load_reminders(), reminder.clone())?;
        db.save_reminders(&reminders)?;
        debug!(id = %reminder.id, "reminder added");
        Ok(reminder.into())
    }

    /// Complete an open reminder (spawning its successor) or reopen a completed one.
    pub fn toggle_reminder(&self, id: String) -> Result<(), PetCareError> {
        let db = self.db.lock()?;
        let reminders = db.load_reminders();
        if !reminders.iter().any(|r| r.id == id) {
            return Err(PetCareError::NotFound(id));
        }
        db.save_reminders(&recurrence::toggle_complete(&reminders, &id, &Local::now()))?;
        Ok(())
    }

    /// Move a reminder's due date by `minutes`.
    pub fn snooze_reminder(&self, id: String, minutes: i64) -> Result<(), PetCareError> {
        if minutes <= 0 {
            return Err(PetCareError::InvalidInput(format!(
                "Snooze minutes must be positive: {}",
                minutes
            )));
        }
        let db = self.db.lock()?;
        let reminders = db.load_reminders();
        if !reminders.iter().any(|r| r.id == id) {
            return Err(PetCareError::NotFound(id));
        }
        db.save_reminders(&recurrence::snooze(&reminders, &id, minutes))?;
        Ok(())
    }

    /// Delete a reminder. Returns false if it did not exist.
    pub fn delete_reminder(&self, id: String) -> Result<bool, PetCareError> {
        let db = self.db.lock()?;
        let reminders = db.load_reminders();
        let remaining = recurrence::delete_reminder(&reminders, &id);
        let removed = remaining.len() != reminders.len();
        if removed {
            db.save_reminders(&remaining)?;
        }
        Ok(removed)
    }

    // =========================================================================
    // Tracking Operations
    // =========================================================================

    /// Tracking entries for a pet, newest first.
    pub fn list_entries(&self, pet_id: String) -> Result<Vec<FfiTrackingEntry>, PetCareError> {
        let db = self.db.lock()?;
        let entries = db.load_entries();
        let pet_entries = metrics::for_pet(&entries, &pet_id);
        Ok(metrics::most_recent(pet_entries, usize::MAX)
            .into_iter()
            .map(|e| e.clone().into())
            .collect())
    }

    /// Add a tracking entry. An empty id is replaced with a fresh one.
    ///
    /// `date_iso` must parse; offset-less values are local time.
    pub fn add_entry(&self, mut entry: FfiTrackingEntry) -> Result<FfiTrackingEntry, PetCareError> {
        entry.date_iso = normalize_input(&entry.date_iso, "dateISO")?;
        let entry = TrackingEntry::try_from(entry)?;
        let db = self.db.lock()?;
        let entries = collections::add_entry(&db.load_entries(), entry.clone())?;
        db.save_entries(&entries)?;
        Ok(entry.into())
    }

    /// Delete a tracking entry. Returns false if it did not exist.
    pub fn delete_entry(&self, id: String) -> Result<bool, PetCareError> {
        let db = self.db.lock()?;
        let entries = db.load_entries();
        let remaining = collections::delete_entry(&entries, &id);
        let removed = remaining.len() != entries.len();
        if removed {
            db.save_entries(&remaining)?;
        }
        Ok(removed)
    }

    // =========================================================================
    // Health Operations
    // =========================================================================

    /// Health records for a pet, newest first.
    pub fn list_health_records(&self, pet_id: String) -> Result<Vec<FfiHealthRecord>, PetCareError> {
        let db = self.db.lock()?;
        let records = db.load_health();
        let pet_records = metrics::for_pet(&records, &pet_id);
        Ok(metrics::most_recent(pet_records, usize::MAX)
            .into_iter()
            .map(|r| r.clone().into())
            .collect())
    }

    /// Add a health record. An empty id is replaced with a fresh one.
    ///
    /// Dates are normalized like [`PetCareCore::add_entry`]; a blank follow-up is dropped.
    pub fn add_health_record(&self, mut record: FfiHealthRecord) -> Result<FfiHealthRecord, PetCareError> {
        record.date_iso = normalize_input(&record.date_iso, "dateISO")?;
        record.follow_up_iso = match record.follow_up_iso.take().filter(|f| !f.trim().is_empty()) {
            Some(follow_up) => Some(normalize_input(&follow_up, "followUpISO")?),
            None => None,
        };
        let record = HealthRecord::try_from(record)?;
        let db = self.db.lock()?;
        let records = collections::add_health_record(&db.load_health(), record.clone())?;
        db.save_health(&records)?;
        Ok(record.into())
    }

    /// Delete a health record. Returns false if it did not exist.
    pub fn delete_health_record(&self, id: String) -> Result<bool, PetCareError> {
        let db = self.db.lock()?;
        let records = db.load_health();
        let remaining = collections::delete_health_record(&records, &id);
        let removed = remaining.len() != records.len();
        if removed {
            db.save_health(&remaining)?;
        }
        Ok(removed)
    }

    // =========================================================================
    // Metrics
    // =========================================================================

    /// Dashboard summary for a pet, as of now in local time.
    pub fn dashboard(&self, pet_id: String) -> Result<FfiDashboardSummary, PetCareError> {
        let db = self.db.lock()?;
        let summary = DashboardSummary::compute(
            &Local::now(),
            &pet_id,
            &db.load_entries(),
            &db.load_health(),
            &db.load_reminders(),
            &self.config,
        );
        Ok(summary.into())
    }

    /// Daily entry counts for the last `days` days, oldest first.
    pub fn activity_series(&self, pet_id: String, days: u32) -> Result<Vec<FfiDailyCount>, PetCareError> {
        config::check_series_days(days, "days")?;
        let db = self.db.lock()?;
        let entries = db.load_entries();
        let pet_entries = metrics::for_pet(&entries, &pet_id);
        Ok(metrics::activity_series(pet_entries, &Local::now(), days)
            .into_iter()
            .map(Into::into)
            .collect())
    }

    /// Entry counts per type, most frequent first.
    pub fn type_counts(&self, pet_id: String) -> Result<Vec<FfiTypeCount>, PetCareError> {
        let db = self.db.lock()?;
        let entries = db.load_entries();
        let view = StatisticsView::compute(&Local::now(), &pet_id, &entries, &self.config);
        Ok(view.type_counts.into_iter().map(Into::into).collect())
    }
}

/// Canonical UTC form of a user-entered timestamp.
fn normalize_input(value: &str, field: &str) -> Result<String, PetCareError> {
    timestamp::parse_in_zone(value, &Local)
        .map(|instant| timestamp::format_utc(&instant))
        .ok_or_else(|| PetCareError::InvalidInput(format!("Invalid {}: {:?}", field, value)))
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe reminder.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiReminder {
    pub id: String,
    pub pet_id: String,
    pub reminder_type: String,
    pub title: String,
    pub due_iso: String,
    pub repeat: String,
    pub priority: String,
    pub notes: Option<String>,
    pub created_at_iso: String,
    pub completed_at_iso: Option<String>,
}

impl From<Reminder> for FfiReminder {
    fn from(r: Reminder) -> Self {
        Self {
            id: r.id,
            pet_id: r.pet_id,
            reminder_type: r.reminder_type.to_string(),
            title: r.title,
            due_iso: r.due_iso,
            repeat: r.repeat.to_string(),
            priority: r.priority.to_string(),
            notes: r.notes,
            created_at_iso: r.created_at_iso,
            completed_at_iso: r.completed_at_iso,
        }
    }
}

/// FFI-safe tracking entry (flat, as persisted).
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiTrackingEntry {
    pub id: String,
    pub pet_id: String,
    pub entry_type: String,
    pub date_iso: String,
    pub duration_min: Option<f64>,
    pub amount: Option<String>,
    pub weight_kg: Option<f64>,
    pub notes: Option<String>,
    pub location_label: Option<String>,
}

impl From<TrackingEntry> for FfiTrackingEntry {
    fn from(entry: TrackingEntry) -> Self {
        Self {
            entry_type: entry.tracking_type().to_string(),
            duration_min: entry.duration_min(),
            amount: entry.amount().map(str::to_string),
            weight_kg: entry.weight_kg(),
            id: entry.id,
            pet_id: entry.pet_id,
            date_iso: entry.date_iso,
            notes: entry.notes,
            location_label: entry.location_label,
        }
    }
}

impl TryFrom<FfiTrackingEntry> for TrackingEntry {
    type Error = ValidationError;

    fn try_from(entry: FfiTrackingEntry) -> Result<Self, Self::Error> {
        let kind = TrackingKind::from_parts(
            entry.entry_type.parse()?,
            entry.duration_min,
            entry.amount,
            entry.weight_kg,
        );
        let mut converted = TrackingEntry::new(entry.pet_id, entry.date_iso, kind);
        if !entry.id.trim().is_empty() {
            converted.id = entry.id;
        }
        converted.notes = entry.notes;
        converted.location_label = entry.location_label;
        Ok(converted)
    }
}

/// FFI-safe health record (flat, as persisted).
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiHealthRecord {
    pub id: String,
    pub pet_id: String,
    pub record_type: String,
    pub date_iso: String,
    pub title: String,
    pub vet_name: Option<String>,
    pub clinic: Option<String>,
    pub dosage: Option<String>,
    pub diagnosis: Option<String>,
    pub result: Option<String>,
    pub follow_up_iso: Option<String>,
    pub notes: Option<String>,
    pub attachment_url: Option<String>,
}

impl From<HealthRecord> for FfiHealthRecord {
    fn from(record: HealthRecord) -> Self {
        Self {
            record_type: record.event_type().to_string(),
            dosage: record.dosage().map(str::to_string),
            diagnosis: record.diagnosis().map(str::to_string),
            result: record.result().map(str::to_string),
            id: record.id,
            pet_id: record.pet_id,
            date_iso: record.date_iso,
            title: record.title,
            vet_name: record.vet_name,
            clinic: record.clinic,
            follow_up_iso: record.follow_up_iso,
            notes: record.notes,
            attachment_url: record.attachment_url,
        }
    }
}

impl TryFrom<FfiHealthRecord> for HealthRecord {
    type Error = ValidationError;

    fn try_from(record: FfiHealthRecord) -> Result<Self, Self::Error> {
        let kind = HealthKind::from_parts(
            record.record_type.parse()?,
            record.dosage,
            record.diagnosis,
            record.result,
        );
        let mut converted = HealthRecord::new(record.pet_id, record.date_iso, record.title, kind);
        if !record.id.trim().is_empty() {
            converted.id = record.id;
        }
        converted.vet_name = record.vet_name;
        converted.clinic = record.clinic;
        converted.follow_up_iso = record.follow_up_iso;
        converted.notes = record.notes;
        converted.attachment_url = record.attachment_url;
        Ok(converted)
    }
}

/// FFI-safe histogram point.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDailyCount {
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,
    pub count: u32,
}

impl From<DailyCount> for FfiDailyCount {
    fn from(point: DailyCount) -> Self {
        Self {
            date: point.date.format("%Y-%m-%d").to_string(),
            count: u32::try_from(point.count).unwrap_or(u32::MAX),
        }
    }
}

/// FFI-safe type rollup row.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiTypeCount {
    pub entry_type: String,
    pub count: u32,
}

impl From<TypeCount> for FfiTypeCount {
    fn from(row: TypeCount) -> Self {
        Self {
            entry_type: row.kind.to_string(),
            count: u32::try_from(row.count).unwrap_or(u32::MAX),
        }
    }
}

/// FFI-safe dashboard reminder row.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiUpcomingReminder {
    pub reminder: FfiReminder,
    pub overdue: bool,
}

/// FFI-safe dashboard summary.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDashboardSummary {
    pub walk_minutes: f64,
    pub due_today: u32,
    pub overdue: u32,
    pub upcoming: u32,
    /// Calendar date of the latest vet visit, `YYYY-MM-DD`
    pub last_vet_visit: Option<String>,
    pub sparkline: Vec<FfiDailyCount>,
    pub recent_entries: Vec<FfiTrackingEntry>,
    pub recent_health: Vec<FfiHealthRecord>,
    pub upcoming_reminders: Vec<FfiUpcomingReminder>,
}

impl From<DashboardSummary> for FfiDashboardSummary {
    fn from(summary: DashboardSummary) -> Self {
        let count = |n: usize| u32::try_from(n).unwrap_or(u32::MAX);
        Self {
            walk_minutes: summary.walk_minutes,
            due_today: count(summary.due_today),
            overdue: count(summary.overdue),
            upcoming: count(summary.upcoming),
            last_vet_visit: summary
                .last_vet_visit_on
                .map(|date| date.format("%Y-%m-%d").to_string()),
            sparkline: summary.sparkline.into_iter().map(Into::into).collect(),
            recent_entries: summary.recent_entries.into_iter().map(Into::into).collect(),
            recent_health: summary.recent_health.into_iter().map(Into::into).collect(),
            upcoming_reminders: summary
                .upcoming_reminders
                .into_iter()
                .map(|row| FfiUpcomingReminder {
                    reminder: row.reminder.into(),
                    overdue: row.overdue,
                })
                .collect(),
        }
    }
}
