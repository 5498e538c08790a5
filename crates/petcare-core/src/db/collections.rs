//! Collection load/save.
//!
//! Each entity kind lives under one key as a JSON array. Loading never
//! fails: a missing key, an unreadable row or content that is not a JSON
//! array come back as an empty collection. Single records that do not match
//! the model are skipped so the rest of the collection survives.

use rusqlite::{params, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::{Database, DbResult};
use crate::models::{HealthRecord, Reminder, TrackingEntry};

pub const TRACKING_KEY: &str = "petcare.tracking.v1";
pub const HEALTH_KEY: &str = "petcare.health.v1";
pub const REMINDERS_KEY: &str = "petcare.reminders.v1";

impl Database {
    /// Raw stored value for a key.
    pub fn get_value(&self, key: &str) -> DbResult<Option<String>> {
        self.conn
            .query_row("SELECT value FROM kv_store WHERE key = ?", [key], |row| row.get(0))
            .optional()
            .map_err(Into::into)
    }

    /// Replace the stored value for a key.
    pub fn put_value(&self, key: &str, value: &str) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?1, ?2, datetime('now'))
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
            params![key, value],
        )?;
        Ok(())
    }

    fn load_collection<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let raw = match self.get_value(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(key, error = %e, "failed to read stored collection");
                return Vec::new();
            }
        };

        let values = match serde_json::from_str::<Vec<Value>>(&raw) {
            Ok(values) => values,
            Err(e) => {
                warn!(key, error = %e, "stored collection is corrupt, starting empty");
                return Vec::new();
            }
        };

        let total = values.len();
        let items: Vec<T> = values
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| match serde_json::from_value(value) {
                Ok(item) => Some(item),
                Err(e) => {
                    warn!(key, index, error = %e, "skipping unreadable record");
                    None
                }
            })
            .collect();

        debug!(key, count = items.len(), skipped = total - items.len(), "loaded collection");
        items
    }

    fn save_collection<T: Serialize>(&self, key: &str, items: &[T]) -> DbResult<()> {
        let json = serde_json::to_string(items)?;
        self.put_value(key, &json)?;
        debug!(key, count = items.len(), "saved collection");
        Ok(())
    }

    pub fn load_entries(&self) -> Vec<TrackingEntry> {
        self.load_collection(TRACKING_KEY)
    }

    pub fn save_entries(&self, entries: &[TrackingEntry]) -> DbResult<()> {
        self.save_collection(TRACKING_KEY, entries)
    }

    pub fn load_health(&self) -> Vec<HealthRecord> {
        self.load_collection(HEALTH_KEY)
    }

    pub fn save_health(&self, records: &[HealthRecord]) -> DbResult<()> {
        self.save_collection(HEALTH_KEY, records)
    }

    pub fn load_reminders(&self) -> Vec<Reminder> {
        self.load_collection(REMINDERS_KEY)
    }

    pub fn save_reminders(&self, reminders: &[Reminder]) -> DbResult<()> {
        self.save_collection(REMINDERS_KEY, reminders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HealthKind, Priority, ReminderType, Repeat, TrackingKind};

    #[test]
    fn test_empty_store_loads_empty() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.load_entries().is_empty());
        assert!(db.load_health().is_empty());
        assert!(db.load_reminders().is_empty());
    }

    #[test]
    fn test_save_and_load_entries() {
        let db = Database::open_in_memory().unwrap();
        let entries = vec![
            TrackingEntry::new("pet-1", "2024-01-02T08:00:00Z", TrackingKind::Walk { duration_min: Some(30.0) }),
            TrackingEntry::new("pet-1", "2024-01-01T08:00:00Z", TrackingKind::Weight { weight_kg: Some(11.2) }),
        ];

        db.save_entries(&entries).unwrap();
        assert_eq!(db.load_entries(), entries);
    }

    #[test]
    fn test_save_replaces_whole_collection() {
        let db = Database::open_in_memory().unwrap();
        let first = HealthRecord::new("p", "2024-01-01", "Rabies", HealthKind::Vaccination { dosage: None });
        let second = HealthRecord::new("p", "2024-02-01", "Checkup", HealthKind::VetVisit { diagnosis: None });

        db.save_health(&[first.clone(), second.clone()]).unwrap();
        db.save_health(&[second.clone()]).unwrap();
        assert_eq!(db.load_health(), vec![second]);
    }

    #[test]
    fn test_corrupt_collection_loads_empty() {
        let db = Database::open_in_memory().unwrap();
        db.put_value(REMINDERS_KEY, "{not json").unwrap();
        assert!(db.load_reminders().is_empty());

        db.put_value(TRACKING_KEY, r#"[{"id":"a","type":"Walk"}]"#).unwrap();
        assert!(db.load_entries().is_empty());
    }

    #[test]
    fn test_bad_record_does_not_drop_the_rest() {
        let db = Database::open_in_memory().unwrap();
        let raw = r#"[
            {"id":"r1","petId":"p","type":"Grooming","title":"Brush","dueISO":"2024-01-01T09:00:00Z","createdAtISO":"2024-01-01T00:00:00Z"},
            {"id":"r2","petId":"p","type":"Grooming","title":"Bath","dueISO":"2024-01-02T09:00:00Z","repeat":null,"createdAtISO":"2024-01-01T00:00:00Z"},
            {"id":"r3","petId":"p","type":"Swimming","title":"Pool","dueISO":"2024-01-03T09:00:00Z","createdAtISO":"2024-01-01T00:00:00Z"},
            {"id":"r4","petId":"p","type":"Walk","title":"Park","dueISO":"2024-01-04T09:00:00Z","repeat":"Weekly","createdAtISO":"2024-01-01T00:00:00Z"}
        ]"#;
        db.put_value(REMINDERS_KEY, raw).unwrap();

        let ids: Vec<String> = db.load_reminders().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["r1", "r4"]);
    }

    #[test]
    fn test_stored_json_uses_record_field_names() {
        let db = Database::open_in_memory().unwrap();
        let reminder = Reminder::new(
            "pet-1",
            ReminderType::VetVisit,
            "Annual",
            "2024-05-01T09:00:00Z",
            Repeat::None,
            Priority::Normal,
            "2024-01-01T00:00:00Z",
        );
        db.save_reminders(&[reminder]).unwrap();

        let raw = db.get_value(REMINDERS_KEY).unwrap().unwrap();
        assert!(raw.contains("\"petId\":\"pet-1\""));
        assert!(raw.contains("\"dueISO\":\"2024-05-01T09:00:00Z\""));
        assert!(raw.contains("\"createdAtISO\""));
    }

    #[test]
    fn test_keys_are_independent() {
        let db = Database::open_in_memory().unwrap();
        db.save_entries(&[TrackingEntry::new("p", "2024-01-01", TrackingKind::Note)]).unwrap();
        assert_eq!(db.load_entries().len(), 1);
        assert!(db.load_health().is_empty());
    }
}
