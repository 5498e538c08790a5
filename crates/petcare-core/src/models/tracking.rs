//! Tracking entry models (walks, feedings, weigh-ins, ...).

use serde::{Deserialize, Serialize};

use super::{non_negative, require, Dated, Record, ValidationResult};

/// Kind of logged care event.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TrackingType {
    Walk,
    Feeding,
    Medication,
    Weight,
    Grooming,
    Note,
}

impl TrackingType {
    pub const ALL: [TrackingType; 6] = [
        TrackingType::Walk,
        TrackingType::Feeding,
        TrackingType::Medication,
        TrackingType::Weight,
        TrackingType::Grooming,
        TrackingType::Note,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TrackingType::Walk => "Walk",
            TrackingType::Feeding => "Feeding",
            TrackingType::Medication => "Medication",
            TrackingType::Weight => "Weight",
            TrackingType::Grooming => "Grooming",
            TrackingType::Note => "Note",
        }
    }
}

impl_str_conversions!(TrackingType, "tracking type");

/// Type-specific payload of a tracking entry.
///
/// Serialized inline with the entry under the `type` tag, so the persisted
/// shape stays `{"type":"Walk","durationMin":20,...}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum TrackingKind {
    Walk {
        #[serde(rename = "durationMin", default, skip_serializing_if = "Option::is_none")]
        duration_min: Option<f64>,
    },
    Feeding {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        amount: Option<String>,
    },
    Medication {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        amount: Option<String>,
    },
    Weight {
        #[serde(rename = "weightKg", default, skip_serializing_if = "Option::is_none")]
        weight_kg: Option<f64>,
    },
    Grooming {
        #[serde(rename = "durationMin", default, skip_serializing_if = "Option::is_none")]
        duration_min: Option<f64>,
    },
    Note,
}

impl TrackingKind {
    /// Build a payload from loose fields, keeping only those the type uses.
    pub fn from_parts(
        kind: TrackingType,
        duration_min: Option<f64>,
        amount: Option<String>,
        weight_kg: Option<f64>,
    ) -> Self {
        match kind {
            TrackingType::Walk => TrackingKind::Walk { duration_min },
            TrackingType::Feeding => TrackingKind::Feeding { amount },
            TrackingType::Medication => TrackingKind::Medication { amount },
            TrackingType::Weight => TrackingKind::Weight { weight_kg },
            TrackingType::Grooming => TrackingKind::Grooming { duration_min },
            TrackingType::Note => TrackingKind::Note,
        }
    }

    pub fn tracking_type(&self) -> TrackingType {
        match self {
            TrackingKind::Walk { .. } => TrackingType::Walk,
            TrackingKind::Feeding { .. } => TrackingType::Feeding,
            TrackingKind::Medication { .. } => TrackingType::Medication,
            TrackingKind::Weight { .. } => TrackingType::Weight,
            TrackingKind::Grooming { .. } => TrackingType::Grooming,
            TrackingKind::Note => TrackingType::Note,
        }
    }
}

/// A logged care event for one pet. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrackingEntry {
    pub id: String,
    pub pet_id: String,
    /// When the event happened
    #[serde(rename = "dateISO")]
    pub date_iso: String,
    #[serde(flatten)]
    pub kind: TrackingKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Free-text place, e.g. "Riverside park"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_label: Option<String>,
}

impl TrackingEntry {
    /// Create a new entry with a fresh id.
    pub fn new(pet_id: impl Into<String>, date_iso: impl Into<String>, kind: TrackingKind) -> Self {
        Self {
            id: super::new_id(),
            pet_id: pet_id.into(),
            date_iso: date_iso.into(),
            kind,
            notes: None,
            location_label: None,
        }
    }

    pub fn tracking_type(&self) -> TrackingType {
        self.kind.tracking_type()
    }

    /// Minutes spent, for walks and grooming.
    pub fn duration_min(&self) -> Option<f64> {
        match self.kind {
            TrackingKind::Walk { duration_min } | TrackingKind::Grooming { duration_min } => {
                duration_min
            }
            _ => None,
        }
    }

    /// Free-text quantity, for feedings and medication.
    pub fn amount(&self) -> Option<&str> {
        match &self.kind {
            TrackingKind::Feeding { amount } | TrackingKind::Medication { amount } => {
                amount.as_deref()
            }
            _ => None,
        }
    }

    pub fn weight_kg(&self) -> Option<f64> {
        match self.kind {
            TrackingKind::Weight { weight_kg } => weight_kg,
            _ => None,
        }
    }
}

impl Record for TrackingEntry {
    fn id(&self) -> &str {
        &self.id
    }

    fn pet_id(&self) -> &str {
        &self.pet_id
    }

    fn validate(&self) -> ValidationResult {
        require(&self.id, "id")?;
        require(&self.pet_id, "petId")?;
        non_negative(self.duration_min(), "durationMin")?;
        non_negative(self.weight_kg(), "weightKg")
    }
}

impl Dated for TrackingEntry {
    fn date_iso(&self) -> &str {
        &self.date_iso
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ValidationError;

    #[test]
    fn test_wire_shape_is_flat() {
        let mut entry = TrackingEntry::new(
            "pet-1",
            "2024-01-01T10:00:00Z",
            TrackingKind::Walk {
                duration_min: Some(20.0),
            },
        );
        entry.location_label = Some("Park".into());

        let json: serde_json::Value = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "Walk");
        assert_eq!(json["durationMin"], 20.0);
        assert_eq!(json["petId"], "pet-1");
        assert_eq!(json["dateISO"], "2024-01-01T10:00:00Z");
        assert_eq!(json["locationLabel"], "Park");
        assert!(json.get("notes").is_none());
    }

    #[test]
    fn test_parse_stored_entries() {
        let raw = r#"[
            {"id":"a","petId":"p","type":"Walk","dateISO":"2024-01-01T10:00:00.000Z","durationMin":30},
            {"id":"b","petId":"p","type":"Walk","dateISO":"2024-01-01T11:00:00.000Z","durationMin":null},
            {"id":"c","petId":"p","type":"Feeding","dateISO":"2024-01-01T12:00:00.000Z","amount":"2 cups"},
            {"id":"d","petId":"p","type":"Weight","dateISO":"2024-01-02","weightKg":12.4,"notes":"after bath"},
            {"id":"e","petId":"p","type":"Note","dateISO":"2024-01-03T09:00:00Z"}
        ]"#;
        let entries: Vec<TrackingEntry> = serde_json::from_str(raw).unwrap();

        assert_eq!(entries.len(), 5);
        assert_eq!(entries[0].duration_min(), Some(30.0));
        assert_eq!(entries[1].duration_min(), None);
        assert_eq!(entries[2].amount(), Some("2 cups"));
        assert_eq!(entries[3].weight_kg(), Some(12.4));
        assert_eq!(entries[3].notes.as_deref(), Some("after bath"));
        assert_eq!(entries[4].tracking_type(), TrackingType::Note);
    }

    #[test]
    fn test_from_parts_drops_unrelated_fields() {
        let kind = TrackingKind::from_parts(TrackingType::Weight, Some(10.0), Some("x".into()), Some(8.2));
        assert_eq!(kind, TrackingKind::Weight { weight_kg: Some(8.2) });
    }

    #[test]
    fn test_validate() {
        let entry = TrackingEntry::new("pet-1", "2024-01-01", TrackingKind::Note);
        assert!(entry.validate().is_ok());

        let mut missing_pet = entry.clone();
        missing_pet.pet_id = String::new();
        assert_eq!(missing_pet.validate(), Err(ValidationError::MissingField("petId")));

        let negative = TrackingEntry::new(
            "pet-1",
            "2024-01-01",
            TrackingKind::Grooming {
                duration_min: Some(-5.0),
            },
        );
        assert!(matches!(negative.validate(), Err(ValidationError::Negative { .. })));
    }

    #[test]
    fn test_type_from_str() {
        assert_eq!("Grooming".parse::<TrackingType>().unwrap(), TrackingType::Grooming);
        assert!("Swim".parse::<TrackingType>().is_err());
    }
}
