//! Copy-on-write edits of record collections.
//!
//! Collections are stored newest first. Every edit returns a new `Vec`, so a
//! caller can keep the previous snapshot around.

use crate::models::{HealthRecord, Record, TrackingEntry, ValidationResult};

/// Validate `item` and return a new collection with it at the front.
pub fn prepend<T: Record + Clone>(items: &[T], item: T) -> ValidationResult<Vec<T>> {
    item.validate()?;

    let mut next = Vec::with_capacity(items.len() + 1);
    next.push(item);
    next.extend_from_slice(items);
    Ok(next)
}

/// Return a new collection without the record whose id is `id`.
pub fn remove<T: Record + Clone>(items: &[T], id: &str) -> Vec<T> {
    items.iter().filter(|item| item.id() != id).cloned().collect()
}

pub fn add_entry(entries: &[TrackingEntry], entry: TrackingEntry) -> ValidationResult<Vec<TrackingEntry>> {
    prepend(entries, entry)
}

pub fn delete_entry(entries: &[TrackingEntry], id: &str) -> Vec<TrackingEntry> {
    remove(entries, id)
}

pub fn add_health_record(
    records: &[HealthRecord],
    record: HealthRecord,
) -> ValidationResult<Vec<HealthRecord>> {
    prepend(records, record)
}

pub fn delete_health_record(records: &[HealthRecord], id: &str) -> Vec<HealthRecord> {
    remove(records, id)
}
