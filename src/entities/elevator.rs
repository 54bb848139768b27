//! Elevator entity

use serde::{Deserialize, Serialize};

use crate::entities::Person;
use crate::types::{Direction, ElevatorId, Floor};

/// An elevator carrying up to `max_capacity` passengers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Elevator {
    /// Position of the elevator in the fleet
    pub id: ElevatorId,
    /// Maximum number of passengers on board at once
    pub max_capacity: usize,
    /// Floor the elevator is currently on
    pub current_floor: Floor,
    /// Passengers in boarding order
    pub passengers: Vec<Person>,
}

impl Elevator {
    /// Create an empty elevator parked on floor 1
    pub fn new(id: ElevatorId, max_capacity: usize) -> Self {
        Self { id, max_capacity, current_floor: 1, passengers: Vec::with_capacity(max_capacity) }
    }

    /// Fraction of capacity in use, between 0.0 and 1.0
    pub fn fullness(&self) -> f64 {
        if self.max_capacity == 0 {
            return 1.0;
        }
        self.passengers.len() as f64 / self.max_capacity as f64
    }

    /// Whether no further passenger can board
    pub fn is_full(&self) -> bool {
        self.passengers.len() >= self.max_capacity
    }

    /// Whether nobody is on board
    pub fn is_empty(&self) -> bool {
        self.passengers.is_empty()
    }

    /// Remaining free places
    pub fn free_capacity(&self) -> usize {
        self.max_capacity.saturating_sub(self.passengers.len())
    }

    /// Remove every passenger whose target is the current floor.
    ///
    /// Remaining passengers keep their boarding order; the removed ones are
    /// returned in boarding order as well.
    pub fn disembark(&mut self) -> Vec<Person> {
        let floor = self.current_floor;
        let (leaving, staying): (Vec<Person>, Vec<Person>) =
            std::mem::take(&mut self.passengers).into_iter().partition(|p| p.has_arrived_at(floor));
        self.passengers = staying;
        leaving
    }

    /// Put a person on board. Returns the person back if the elevator is full.
    pub fn board(&mut self, person: Person) -> Result<(), Person> {
        if self.is_full() {
            return Err(person);
        }
        self.passengers.push(person);
        Ok(())
    }

    /// Target floors of everyone on board, in boarding order
    pub fn passenger_targets(&self) -> Vec<Floor> {
        self.passengers.iter().map(|p| p.target).collect()
    }

    /// Floor this elevator would reach by moving in `direction`, if it is a real floor
    pub fn floor_after(&self, direction: Direction) -> Option<Floor> {
        self.current_floor.checked_add_signed(direction.delta()).filter(|floor| *floor >= 1)
    }

    /// Increment the wait time of every passenger
    pub(crate) fn tick_passengers(&mut self) {
        self.passengers.iter_mut().for_each(Person::wait);
    }
}
