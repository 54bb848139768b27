//! Simulation entities
//!
//! People and elevators are plain data records. They carry no rendering or
//! scheduling logic; the engine mutates them through the per-round stages and
//! policies only ever see them through shared references.

pub mod elevator;
pub mod person;

pub use elevator::*;
pub use person::*;

use std::collections::BTreeMap;

use crate::types::Floor;

/// People grouped by floor, in arrival order within each floor
pub type FloorQueues = BTreeMap<Floor, Vec<Person>>;

/// People waiting for an elevator, keyed by floor
pub type WaitingMap = FloorQueues;

/// Build a map with an empty queue for every floor in `1..=max_floor`
pub fn empty_floor_queues(max_floor: Floor) -> FloorQueues {
    (1..=max_floor).map(|floor| (floor, Vec::new())).collect()
}
