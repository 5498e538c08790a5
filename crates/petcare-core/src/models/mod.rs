//! Domain models for the pet-care core.

/// `Display` and `FromStr` for string-named enums with `ALL` and `as_str`.
macro_rules! impl_str_conversions {
    ($ty:ty, $field:literal) => {
        impl ::std::fmt::Display for $ty {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $ty {
            type Err = $crate::models::ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty>::ALL
                    .into_iter()
                    .find(|value| value.as_str() == s)
                    .ok_or_else(|| $crate::models::unknown($field, s))
            }
        }
    };
}

mod health;
mod pet;
mod reminder;
mod tracking;

pub use health::*;
pub use pet::*;
pub use reminder::*;
pub use tracking::*;

use thiserror::Error;

/// Record validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Negative value for {field}: {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("Unknown {field}: {value}")]
    UnknownValue { field: &'static str, value: String },

    #[error("{field} must be at most {max}, got {value}")]
    OutOfRange { field: &'static str, value: u64, max: u64 },
}

pub type ValidationResult<T = ()> = Result<T, ValidationError>;

/// A persisted record that belongs to one pet.
///
/// `id` and `pet_id` are the join keys every aggregation depends on.
pub trait Record {
    fn id(&self) -> &str;
    fn pet_id(&self) -> &str;
    fn validate(&self) -> ValidationResult;
}

/// A record that happened at a point in time.
pub trait Dated: Record {
    fn date_iso(&self) -> &str;
}

pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

pub(crate) fn require(value: &str, field: &'static str) -> ValidationResult {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(())
    }
}

pub(crate) fn non_negative(value: Option<f64>, field: &'static str) -> ValidationResult {
    match value {
        Some(v) if v < 0.0 => Err(ValidationError::Negative { field, value: v }),
        _ => Ok(()),
    }
}

fn unknown(field: &'static str, value: &str) -> ValidationError {
    ValidationError::UnknownValue {
        field,
        value: value.to_string(),
    }
}
