//! Identifier types for the elevator simulator
//!
//! People carry a UUID-based identifier so that a passenger can be followed as
//! they move from a floor queue into an elevator and finally into the completed
//! list. Elevators are identified by their position in the fleet.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

/// Floor number. Floors are numbered from 1 up to the building's top floor.
pub type Floor = usize;

/// Unique identifier for a person
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PersonId(pub Uuid);

impl PersonId {
    /// Create a new random person ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PersonId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PERSON_{}", self.0.simple())
    }
}

impl Serialize for PersonId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for PersonId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let raw = s.strip_prefix("PERSON_").unwrap_or(&s);
        let uuid = Uuid::parse_str(raw).map_err(serde::de::Error::custom)?;
        Ok(PersonId(uuid))
    }
}

/// Identifier for an elevator: its zero-based index in the fleet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElevatorId(pub usize);

impl ElevatorId {
    /// Position of this elevator in the fleet
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ElevatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ELEVATOR_{}", self.0)
    }
}
