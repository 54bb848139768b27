//! Random arrivals

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;

use crate::arrivals::{group_by_start, validate_max_floor, ArrivalGenerator, Arrivals};
use crate::entities::Person;
use crate::simulation::SimulationResult;
use crate::types::Floor;

/// Generates `num_people` random people every round.
///
/// Start and target floors are drawn uniformly from `1..=max_floor`; the
/// target is redrawn until it differs from the start. With `num_people` unset
/// or zero nobody ever arrives.
pub struct RandomArrivals {
    max_floor: Floor,
    num_people: Option<usize>,
    rng: StdRng,
}

impl fmt::Debug for RandomArrivals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomArrivals")
            .field("max_floor", &self.max_floor)
            .field("num_people", &self.num_people)
            .finish()
    }
}

impl RandomArrivals {
    /// Create a generator seeded from system entropy
    pub fn new(max_floor: Floor, num_people: Option<usize>) -> SimulationResult<Self> {
        validate_max_floor(max_floor)?;
        Ok(Self { max_floor, num_people, rng: StdRng::from_entropy() })
    }

    /// Create a generator with a specific seed for reproducible results
    pub fn with_seed(max_floor: Floor, num_people: Option<usize>, seed: u64) -> SimulationResult<Self> {
        validate_max_floor(max_floor)?;
        Ok(Self { max_floor, num_people, rng: StdRng::seed_from_u64(seed) })
    }

    /// Number of people generated per round, if any
    pub fn num_people(&self) -> Option<usize> {
        self.num_people
    }

    fn random_person(&mut self) -> Person {
        let start = self.rng.gen_range(1..=self.max_floor);
        let mut target = self.rng.gen_range(1..=self.max_floor);
        while target == start {
            target = self.rng.gen_range(1..=self.max_floor);
        }
        Person::new(start, target)
    }
}

impl ArrivalGenerator for RandomArrivals {
    fn generate(&mut self, _round: usize) -> Arrivals {
        let count = self.num_people.unwrap_or(0);
        let people: Vec<Person> = (0..count).map(|_| self.random_person()).collect();
        group_by_start(self.max_floor, people)
    }

    fn max_floor(&self) -> Floor {
        self.max_floor
    }

    fn name(&self) -> &'static str {
        "random"
    }
}
