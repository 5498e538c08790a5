//! Reminder models.

use serde::{Deserialize, Serialize};

use super::{require, Record, ValidationResult};

/// What a reminder is about.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReminderType {
    Medication,
    VetVisit,
    Feeding,
    Grooming,
    Walk,
    Training,
    Custom,
}

impl ReminderType {
    pub const ALL: [ReminderType; 7] = [
        ReminderType::Medication,
        ReminderType::VetVisit,
        ReminderType::Feeding,
        ReminderType::Grooming,
        ReminderType::Walk,
        ReminderType::Training,
        ReminderType::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReminderType::Medication => "Medication",
            ReminderType::VetVisit => "VetVisit",
            ReminderType::Feeding => "Feeding",
            ReminderType::Grooming => "Grooming",
            ReminderType::Walk => "Walk",
            ReminderType::Training => "Training",
            ReminderType::Custom => "Custom",
        }
    }
}

/// Repeat rule. `None` means a one-off reminder.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Repeat {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
}

impl Repeat {
    pub const ALL: [Repeat; 4] = [Repeat::None, Repeat::Daily, Repeat::Weekly, Repeat::Monthly];

    pub fn as_str(&self) -> &'static str {
        match self {
            Repeat::None => "None",
            Repeat::Daily => "Daily",
            Repeat::Weekly => "Weekly",
            Repeat::Monthly => "Monthly",
        }
    }

    pub fn is_recurring(&self) -> bool {
        !matches!(self, Repeat::None)
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Normal, Priority::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Normal => "Normal",
            Priority::High => "High",
        }
    }
}

impl_str_conversions!(ReminderType, "reminder type");
impl_str_conversions!(Repeat, "repeat rule");
impl_str_conversions!(Priority, "priority");

/// A reminder for one pet.
///
/// Open while `completed_at_iso` is `None`, completed otherwise.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: String,
    pub pet_id: String,
    #[serde(rename = "type")]
    pub reminder_type: ReminderType,
    pub title: String,
    #[serde(rename = "dueISO")]
    pub due_iso: String,
    #[serde(default)]
    pub repeat: Repeat,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Set once at creation
    #[serde(rename = "createdAtISO")]
    pub created_at_iso: String,
    #[serde(rename = "completedAtISO", default, skip_serializing_if = "Option::is_none")]
    pub completed_at_iso: Option<String>,
}

impl Reminder {
    /// Create a new open reminder with a fresh id.
    pub fn new(
        pet_id: impl Into<String>,
        reminder_type: ReminderType,
        title: impl Into<String>,
        due_iso: impl Into<String>,
        repeat: Repeat,
        priority: Priority,
        created_at_iso: impl Into<String>,
    ) -> Self {
        Self {
            id: super::new_id(),
            pet_id: pet_id.into(),
            reminder_type,
            title: title.into().trim().to_string(),
            due_iso: due_iso.into(),
            repeat,
            priority,
            notes: None,
            created_at_iso: created_at_iso.into(),
            completed_at_iso: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.completed_at_iso.is_some()
    }

    pub fn is_open(&self) -> bool {
        self.completed_at_iso.is_none()
    }
}

impl Record for Reminder {
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
