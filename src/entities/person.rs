//! Passenger entity

use serde::{Deserialize, Serialize};

use crate::types::{AngerLevel, Floor, PersonId};

/// A person travelling from `start` to `target`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Unique identifier for the person
    pub id: PersonId,
    /// Floor the person arrived on
    pub start: Floor,
    /// Floor the person wants to reach
    pub target: Floor,
    /// Rounds spent waiting or riding so far
    pub wait_time: u32,
}

impl Person {
    /// Create a new person with no accumulated wait time
    pub fn new(start: Floor, target: Floor) -> Self {
        Self { id: PersonId::new(), start, target, wait_time: 0 }
    }

    /// Add one round to this person's wait time
    pub fn wait(&mut self) {
        self.wait_time += 1;
    }

    /// Current anger level based on wait time
    pub fn anger_level(&self) -> AngerLevel {
        AngerLevel::from_wait_time(self.wait_time)
    }

    /// Whether a person on `floor` has reached their destination
    pub fn has_arrived_at(&self, floor: Floor) -> bool {
        self.target == floor
    }
}
