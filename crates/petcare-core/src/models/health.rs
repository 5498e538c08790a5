//! Health record models (vaccinations, vet visits, lab results, ...).

use serde::{Deserialize, Serialize};

use super::{require, Dated, Record, ValidationResult};

/// Kind of clinical event.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HealthEventType {
    Vaccination,
    VetVisit,
    Medication,
    Allergy,
    Condition,
    Surgery,
    LabResult,
}

impl HealthEventType {
    pub const ALL: [HealthEventType; 7] = [
        HealthEventType::Vaccination,
        HealthEventType::VetVisit,
        HealthEventType::Medication,
        HealthEventType::Allergy,
        HealthEventType::Condition,
        HealthEventType::Surgery,
        HealthEventType::LabResult,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HealthEventType::Vaccination => "Vaccination",
            HealthEventType::VetVisit => "VetVisit",
            HealthEventType::Medication => "Medication",
            HealthEventType::Allergy => "Allergy",
            HealthEventType::Condition => "Condition",
            HealthEventType::Surgery => "Surgery",
            HealthEventType::LabResult => "LabResult",
        }
    }
}

impl_str_conversions!(HealthEventType, "health event type");

/// Type-specific payload of a health record.
///
/// Dosage belongs to vaccinations and medication, diagnosis to visits and
/// conditions, result to lab work.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum HealthKind {
    Vaccination {
        /// Dose or vaccine lot
        #[serde(default, skip_serializing_if = "Option::is_none")]
        dosage: Option<String>,
    },
    VetVisit {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        diagnosis: Option<String>,
    },
    Medication {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        dosage: Option<String>,
    },
    Allergy,
    Condition {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        diagnosis: Option<String>,
    },
    Surgery,
    LabResult {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        result: Option<String>,
    },
}

impl HealthKind {
    /// Build a payload from loose fields, keeping only those the type uses.
    pub fn from_parts(
        kind: HealthEventType,
        dosage: Option<String>,
        diagnosis: Option<String>,
        result: Option<String>,
    ) -> Self {
        match kind {
            HealthEventType::Vaccination => HealthKind::Vaccination { dosage },
            HealthEventType::VetVisit => HealthKind::VetVisit { diagnosis },
            HealthEventType::Medication => HealthKind::Medication { dosage },
            HealthEventType::Allergy => HealthKind::Allergy,
            HealthEventType::Condition => HealthKind::Condition { diagnosis },
            HealthEventType::Surgery => HealthKind::Surgery,
            HealthEventType::LabResult => HealthKind::LabResult { result },
        }
    }

    pub fn event_type(&self) -> HealthEventType {
        match self {
            HealthKind::Vaccination { .. } => HealthEventType::Vaccination,
            HealthKind::VetVisit { .. } => HealthEventType::VetVisit,
            HealthKind::Medication { .. } => HealthEventType::Medication,
            HealthKind::Allergy => HealthEventType::Allergy,
            HealthKind::Condition { .. } => HealthEventType::Condition,
            HealthKind::Surgery => HealthEventType::Surgery,
            HealthKind::LabResult { .. } => HealthEventType::LabResult,
        }
    }
}

/// A clinical event for one pet. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HealthRecord {
    pub id: String,
    pub pet_id: String,
    /// When it happened
    #[serde(rename = "dateISO")]
    pub date_iso: String,
    /// e.g. "Rabies booster", "Annual checkup"
    pub title: String,
    #[serde(flatten)]
    pub kind: HealthKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vet_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clinic: Option<String>,
    /// Next appointment or recheck
    #[serde(rename = "followUpISO", default, skip_serializing_if = "Option::is_none")]
    pub follow_up_iso: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_url: Option<String>,
}

impl HealthRecord {
    /// Create a new record with a fresh id.
    pub fn new(
        pet_id: impl Into<String>,
        date_iso: impl Into<String>,
        title: impl Into<String>,
        kind: HealthKind,
    ) -> Self {
        Self {
            id: super::new_id(),
            pet_id: pet_id.into(),
            date_iso: date_iso.into(),
            title: title.into().trim().to_string(),
            kind,
            vet_name: None,
            clinic: None,
            follow_up_iso: None,
            notes: None,
            attachment_url: None,
        }
    }

    pub fn event_type(&self) -> HealthEventType {
        self.kind.event_type()
    }

    pub fn dosage(&self) -> Option<&str> {
        match &self.kind {
            HealthKind::Vaccination { dosage } | HealthKind::Medication { dosage } => {
                dosage.as_deref()
            }
            _ => None,
        }
    }

    pub fn diagnosis(&self) -> Option<&str> {
        match &self.kind {
            HealthKind::VetVisit { diagnosis } | HealthKind::Condition { diagnosis } => {
                diagnosis.as_deref()
            }
            _ => None,
        }
    }

    pub fn result(&self) -> Option<&str> {
        match &self.kind {
            HealthKind::LabResult { result } => result.as_deref(),
            _ => None,
        }
    }
}

impl Record for HealthRecord {
    fn id(&self) -> &str {
        &self.id
    }

    fn pet_id(&self) -> &str {
        &self.pet_id
    }

    fn validate(&self) -> ValidationResult {
        require(&self.id, "id")?;
        require(&self.pet_id, "petId")?;
        require(&self.title, "title")
    }
}

impl Dated for HealthRecord {
    fn date_iso(&self) -> &str {
        &self.date_iso
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ValidationError;

    #[test]
    fn test_round_trip_keeps_field_names() {
        let mut record = HealthRecord::new(
            "pet-1",
            "2024-05-01T09:00:00Z",
            "  Annual checkup ",
            HealthKind::VetVisit {
                diagnosis: Some("Healthy".into()),
            },
        );
        record.follow_up_iso = Some("2025-05-01".into());
        record.vet_name = Some("Dr. Ortiz".into());

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "VetVisit");
        assert_eq!(json["title"], "Annual checkup");
        assert_eq!(json["diagnosis"], "Healthy");
        assert_eq!(json["followUpISO"], "2025-05-01");
        assert_eq!(json["vetName"], "Dr. Ortiz");

        let back: HealthRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_accessors_follow_type() {
        let vaccine = HealthRecord::new(
            "p",
            "2024-01-01",
            "Rabies",
            HealthKind::from_parts(HealthEventType::Vaccination, Some("1 mL".into()), Some("x".into()), None),
        );
        assert_eq!(vaccine.dosage(), Some("1 mL"));
        assert_eq!(vaccine.diagnosis(), None);

        let lab = HealthRecord::new(
            "p",
            "2024-01-01",
            "Bloodwork",
            HealthKind::LabResult {
                result: Some("Normal".into()),
            },
        );
        assert_eq!(lab.result(), Some("Normal"));
        assert_eq!(lab.event_type(), HealthEventType::LabResult);
    }

    #[test]
    fn test_validate_requires_title() {
        let record = HealthRecord::new("p", "2024-01-01", "   ", HealthKind::Surgery);
        assert_eq!(record.validate(), Err(ValidationError::MissingField("title")));
    }

    #[test]
    fn test_event_type_string_names() {
        for kind in HealthEventType::ALL {
            assert_eq!(kind.to_string().parse::<HealthEventType>().unwrap(), kind);
        }
        assert_eq!(
            "Dental".parse::<HealthEventType>(),
            Err(ValidationError::UnknownValue {
                field: "health event type",
                value: "Dental".into(),
            })
        );
    }
}
