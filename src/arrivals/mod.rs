//! Arrival generation policies
//!
//! An [`ArrivalGenerator`] is asked once per round for the people who show up
//! on each floor. Two policies are provided:
//!
//! - [`RandomArrivals`]: a fixed number of random people every round
//! - [`ScriptedArrivals`]: arrivals pre-loaded from a CSV source
//!
//! # Usage Example
//!
//! ```rust
//! use elevator_simulator::arrivals::*;
//!
//! let mut generator = RandomArrivals::with_seed(5, Some(3), 42).unwrap();
//! let arrivals = generator.generate(0);
//! assert_eq!(arrivals.values().map(Vec::len).sum::<usize>(), 3);
//! assert_eq!(arrivals.len(), 5);
//! ```

pub mod random;
pub mod scripted;

pub use random::*;
pub use scripted::*;

use crate::entities::{empty_floor_queues, FloorQueues, Person};
use crate::simulation::{SimulationError, SimulationResult};
use crate::types::Floor;

/// Newly arrived people, keyed by their start floor
pub type Arrivals = FloorQueues;

/// A policy producing the new arrivals of each round
///
/// Implementations may return every floor as a key or only the floors where
/// somebody arrived; the engine accepts both.
pub trait ArrivalGenerator: Send {
    /// Return the people arriving at the given round
    fn generate(&mut self, round: usize) -> Arrivals;

    /// Highest floor this generator may place people on
    fn max_floor(&self) -> Floor;

    /// Short policy name used in logs and errors
    fn name(&self) -> &'static str;
}

/// Check the building has at least two floors
pub(crate) fn validate_max_floor(max_floor: Floor) -> SimulationResult<()> {
    if max_floor < 2 {
        return Err(SimulationError::configuration_error(format!(
            "arrival generator needs at least 2 floors, got {}",
            max_floor
        )));
    }
    Ok(())
}

/// Group people by start floor, keeping every floor in `1..=max_floor` as a key
pub(crate) fn group_by_start(max_floor: Floor, people: impl IntoIterator<Item = Person>) -> Arrivals {
    let mut arrivals = empty_floor_queues(max_floor);
    for person in people {
        arrivals.entry(person.start).or_default().push(person);
    }
    arrivals
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_by_start_keeps_every_floor() {
        let arrivals = group_by_start(4, vec![Person::new(2, 1), Person::new(2, 4), Person::new(4, 1)]);
        assert_eq!(arrivals.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
        assert_eq!(arrivals[&2].len(), 2);
        assert_eq!(arrivals[&2][0].target, 1);
        assert_eq!(arrivals[&2][1].target, 4);
        assert!(arrivals[&3].is_empty());
    }

    #[test]
    fn test_validate_max_floor() {
        assert!(validate_max_floor(2).is_ok());
        assert!(matches!(validate_max_floor(1), Err(SimulationError::ConfigurationError(_))));
    }
}
