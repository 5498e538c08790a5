//! Pet identity.

use serde::{Deserialize, Serialize};

/// A pet. Owned by the caller; records reference it through `petId`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Pet {
    pub id: String,
    pub name: String,
}

impl Pet {
    /// Create a pet with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: super::new_id(),
            name: name.into(),
        }
    }

    /// Look up a pet by id.
    pub fn find<'a>(pets: &'a [Pet], id: &str) -> Option<&'a Pet> {
        pets.iter().find(|pet| pet.id == id)
    }
}
