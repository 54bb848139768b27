//! Random moving policy

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::fmt;

use crate::entities::{Elevator, WaitingMap};
use crate::moving::MovingAlgorithm;
use crate::types::{Direction, Floor};

const FROM_BOTTOM: [Direction; 2] = [Direction::Up, Direction::Stay];
const FROM_TOP: [Direction; 2] = [Direction::Down, Direction::Stay];
const ANYWHERE: [Direction; 3] = [Direction::Up, Direction::Down, Direction::Stay];

/// Picks a uniformly random valid direction for every elevator
pub struct RandomMoving {
    rng: StdRng,
}

impl fmt::Debug for RandomMoving {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomMoving").finish()
    }
}

impl Default for RandomMoving {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomMoving {
    /// Create a policy seeded from system entropy
    pub fn new() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    /// Create a policy with a specific seed for reproducible results
    pub fn with_seed(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }
}

impl MovingAlgorithm for RandomMoving {
    fn move_elevators(
        &mut self,
        elevators: &[Elevator],
        _waiting: &WaitingMap,
        max_floor: Floor,
    ) -> Vec<Direction> {
        elevators
            .iter()
            .map(|elevator| {
                let choices: &[Direction] = if elevator.current_floor <= 1 {
                    &FROM_BOTTOM
                } else if elevator.current_floor >= max_floor {
                    &FROM_TOP
                } else {
                    &ANYWHERE
                };
                choices.choose(&mut self.rng).copied().unwrap_or(Direction::Stay)
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::empty_floor_queues;
    use crate::types::ElevatorId;

    fn fleet(floors: &[Floor]) -> Vec<Elevator> {
        floors
            .iter()
            .enumerate()
            .map(|(i, &floor)| {
                let mut elevator = Elevator::new(ElevatorId(i), 2);
                elevator.current_floor = floor;
                elevator
            })
            .collect()
    }

    #[test]
    fn test_never_leaves_building() {
        let mut policy = RandomMoving::with_seed(11);
        let elevators = fleet(&[1, 3, 5]);
        let waiting = empty_floor_queues(5);

        for _ in 0..500 {
            let directions = policy.move_elevators(&elevators, &waiting, 5);
            assert_eq!(directions.len(), 3);
            assert_ne!(directions[0], Direction::Down);
            assert_ne!(directions[2], Direction::Up);
        }
    }

    #[test]
    fn test_middle_floor_uses_all_three_directions() {
        let mut policy = RandomMoving::with_seed(5);
        let elevators = fleet(&[3]);
        let waiting = empty_floor_queues(5);

        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(policy.move_elevators(&elevators, &waiting, 5)[0]);
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_same_seed_same_choices() {
        let elevators = fleet(&[1, 2, 3, 4]);
        let waiting = empty_floor_queues(4);
        let mut a = RandomMoving::with_seed(77);
        let mut b = RandomMoving::with_seed(77);
        for _ in 0..10 {
            assert_eq!(
                a.move_elevators(&elevators, &waiting, 4),
                b.move_elevators(&elevators, &waiting, 4)
            );
        }
    }

    #[test]
    fn test_empty_fleet() {
        let mut policy = RandomMoving::new();
        assert!(policy.move_elevators(&[], &empty_floor_queues(3), 3).is_empty());
    }
}
