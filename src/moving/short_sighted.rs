//! Nearest-floor priority
//!
//! An empty elevator heads for the closest floor where somebody is waiting. A
//! loaded elevator heads for the closest target among everyone on board; the
//! boarding order does not matter.

use crate::entities::{Elevator, WaitingMap};
use crate::moving::{waiting_start_floors, MovingAlgorithm};
use crate::types::{Direction, Floor};

/// Moves toward the closest waiting floor or passenger target
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortSighted;

impl ShortSighted {
    /// Create the policy
    pub fn new() -> Self {
        Self
    }
}

/// Direction of the candidate floor nearest to `current`.
///
/// `current` is placed among the sorted candidates at its first position. If
/// nothing lies below it the answer is `Up`, if nothing lies above it `Down`.
/// Otherwise the nearer neighbour wins and a tie goes `Down`.
pub fn closest_floor_direction(candidates: &[Floor], current: Floor) -> Direction {
    let mut floors = candidates.to_vec();
    floors.sort_unstable();

    let position = floors.partition_point(|&floor| floor < current);
    // Length of the list with `current` inserted is floors.len() + 1.
    if position == 0 {
        return Direction::Up;
    }
    if position == floors.len() {
        return Direction::Down;
    }

    let lower = floors[position - 1];
    let higher = floors[position];
    if current - lower > higher - current {
        Direction::Up
    } else {
        Direction::Down
    }
}

impl MovingAlgorithm for ShortSighted {
    fn move_elevators(
        &mut self,
        elevators: &[Elevator],
        waiting: &WaitingMap,
        _max_floor: Floor,
    ) -> Vec<Direction> {
        let waiting_floors = waiting_start_floors(waiting);
        elevators
            .iter()
            .map(|elevator| {
                if elevator.is_empty() {
                    if waiting_floors.is_empty() {
                        Direction::Stay
                    } else {
                        closest_floor_direction(&waiting_floors, elevator.current_floor)
                    }
                } else {
                    closest_floor_direction(&elevator.passenger_targets(), elevator.current_floor)
                }
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "short-sighted"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{empty_floor_queues, Person};
    use crate::types::ElevatorId;

    fn elevator_at(floor: Floor, targets: &[Floor]) -> Elevator {
        let mut elevator = Elevator::new(ElevatorId(0), 4);
        elevator.current_floor = floor;
        for &target in targets {
            elevator.board(Person::new(floor, target)).unwrap();
        }
        elevator
    }

    fn waiting_on(floors: &[Floor]) -> WaitingMap {
        let mut waiting = empty_floor_queues(8);
        for &floor in floors {
            let target = if floor == 8 { 1 } else { 8 };
            waiting.get_mut(&floor).unwrap().push(Person::new(floor, target));
        }
        waiting
    }

    #[test]
    fn test_closest_floor_direction_edges() {
        assert_eq!(closest_floor_direction(&[4, 6], 2), Direction::Up);
        assert_eq!(closest_floor_direction(&[1, 2], 5), Direction::Down);
    }

    #[test]
    fn test_closest_floor_direction_picks_nearer_side() {
        assert_eq!(closest_floor_direction(&[1, 4], 3), Direction::Up);
        assert_eq!(closest_floor_direction(&[2, 6], 3), Direction::Down);
        assert_eq!(closest_floor_direction(&[7, 1, 5], 4), Direction::Up);
    }

    #[test]
    fn test_closest_floor_direction_tie_goes_down() {
        assert_eq!(closest_floor_direction(&[2, 4], 3), Direction::Down);
        assert_eq!(closest_floor_direction(&[1, 5], 3), Direction::Down);
    }

    #[test]
    fn test_current_floor_among_candidates_uses_first_position() {
        // With current inserted before an equal candidate, nothing is below it.
        assert_eq!(closest_floor_direction(&[3, 5], 3), Direction::Up);
        // The equal candidate becomes the higher neighbour at distance zero.
        assert_eq!(closest_floor_direction(&[1, 3], 3), Direction::Up);
    }

    #[test]
    fn test_empty_elevator_without_waiting_stays() {
        let mut policy = ShortSighted::new();
        let directions = policy.move_elevators(&[elevator_at(4, &[])], &waiting_on(&[]), 8);
        assert_eq!(directions, vec![Direction::Stay]);
    }

    #[test]
    fn test_empty_elevator_equidistant_waiting_goes_down() {
        let mut policy = ShortSighted::new();
        let directions = policy.move_elevators(&[elevator_at(3, &[])], &waiting_on(&[2, 4]), 8);
        assert_eq!(directions, vec![Direction::Down]);
    }

    #[test]
    fn test_empty_elevator_goes_to_nearer_waiting_floor() {
        let mut policy = ShortSighted::new();
        let directions = policy.move_elevators(&[elevator_at(3, &[])], &waiting_on(&[1, 4]), 8);
        assert_eq!(directions, vec![Direction::Up]);
    }

    #[test]
    fn test_loaded_elevator_ignores_boarding_order() {
        let mut policy = ShortSighted::new();
        let elevators = [elevator_at(4, &[8, 3]), elevator_at(4, &[1, 6])];
        let directions = policy.move_elevators(&elevators, &waiting_on(&[5]), 8);
        assert_eq!(directions, vec![Direction::Down, Direction::Up]);
    }
}
