//! First-boarder priority
//!
//! An empty elevator heads for the lowest floor where somebody is waiting, and
//! stays put when nobody is. A loaded elevator heads for the target floor of
//! whoever boarded first, ignoring everyone else on board.

use crate::entities::{Elevator, WaitingMap};
use crate::moving::{lowest_waiting_floor, toward, MovingAlgorithm};
use crate::types::{Direction, Floor};

/// Moves toward the first passenger's target, or the lowest waiting floor
#[derive(Debug, Clone, Copy, Default)]
pub struct PushyPassenger;

impl PushyPassenger {
    /// Create the policy
    pub fn new() -> Self {
        Self
    }

    fn direction_for(elevator: &Elevator, lowest_waiting: Option<Floor>) -> Direction {
        let current = elevator.current_floor;
        match elevator.passengers.first() {
            Some(first) => toward(current, first.target),
            // Being on the lowest waiting floor counts as "not below" it.
            None => lowest_waiting.map_or(Direction::Stay, |lowest| toward(current, lowest)),
        }
    }
}

impl MovingAlgorithm for PushyPassenger {
    fn move_elevators(
        &mut self,
        elevators: &[Elevator],
        waiting: &WaitingMap,
        _max_floor: Floor,
    ) -> Vec<Direction> {
        let lowest_waiting = lowest_waiting_floor(waiting);
        elevators.iter().map(|elevator| Self::direction_for(elevator, lowest_waiting)).collect()
    }

    fn name(&self) -> &'static str {
        "pushy"
    }
}
