//! Elevator moving policies
//!
//! A [`MovingAlgorithm`] decides, once per round, which [`Direction`] each
//! elevator takes. Policies see the fleet and the waiting map through shared
//! references and never mutate them; the engine applies the returned
//! directions itself.
//!
//! Every returned direction must keep its elevator inside the building: no
//! `Up` from the top floor and no `Down` from floor 1. The engine rejects a
//! decision list that breaks this rule or has the wrong length.
//!
//! - [`RandomMoving`]: uniformly random valid direction
//! - [`PushyPassenger`]: serves the first passenger who boarded
//! - [`ShortSighted`]: serves the closest floor

pub mod pushy;
pub mod random;
pub mod short_sighted;

pub use pushy::*;
pub use random::*;
pub use short_sighted::*;

use crate::entities::{Elevator, WaitingMap};
use crate::types::{Direction, Floor};

/// A policy choosing a direction for every elevator
pub trait MovingAlgorithm: Send {
    /// Return one direction per elevator, in the same order as `elevators`
    fn move_elevators(
        &mut self,
        elevators: &[Elevator],
        waiting: &WaitingMap,
        max_floor: Floor,
    ) -> Vec<Direction>;

    /// Short policy name used in logs and errors
    fn name(&self) -> &'static str;
}

/// Start floor of every waiting person, one entry per person
pub fn waiting_start_floors(waiting: &WaitingMap) -> Vec<Floor> {
    waiting.values().flatten().map(|person| person.start).collect()
}

/// Lowest floor with at least one person waiting
pub fn lowest_waiting_floor(waiting: &WaitingMap) -> Option<Floor> {
    waiting.iter().filter(|(_, people)| !people.is_empty()).map(|(floor, _)| *floor).min()
}

/// Direction toward `target`: `Up` when strictly below it, otherwise `Down`
pub(crate) fn toward(current: Floor, target: Floor) -> Direction {
    if current < target {
        Direction::Up
    } else {
        Direction::Down
    }
}
