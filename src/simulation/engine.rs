//! The `Simulation` struct and its round loop.

use std::fmt;
use tracing::{debug, error, info, instrument, trace};

use crate::arrivals::{ArrivalGenerator, Arrivals};
use crate::entities::{empty_floor_queues, Elevator, Person, WaitingMap};
use crate::moving::MovingAlgorithm;
use crate::simulation::{
    SimulationBuilder, SimulationError, SimulationObserver, SimulationResult, SimulationStatistics,
};
use crate::types::{Floor, SimulationConfig};

/// The elevator simulation engine.
///
/// A `Simulation` owns the building state and drives the five-stage round:
///
/// 1. **Arrivals**: the arrival generator is asked for the people of this
///    round, who join the back of their start floor's queue.
/// 2. **Disembark**: every elevator lets out the passengers whose target is
///    its current floor.
/// 3. **Board**: every elevator, in fleet order, takes people from the front
///    of its floor's queue until it is full. The round counter then advances.
/// 4. **Wait**: everyone still waiting or riding waits one more round.
/// 5. **Move**: the moving algorithm picks one direction per elevator. All
///    directions are checked before any elevator moves.
///
/// Create via [`SimulationBuilder`] or [`Simulation::from_config`].
pub struct Simulation {
    pub(crate) num_floors: Floor,
    pub(crate) elevators: Vec<Elevator>,
    pub(crate) waiting: WaitingMap,
    pub(crate) completed: Vec<Person>,
    pub(crate) num_round: usize,
    pub(crate) total_people: usize,
    pub(crate) arrival_generator: Box<dyn ArrivalGenerator>,
    pub(crate) moving_algorithm: Box<dyn MovingAlgorithm>,
    pub(crate) observers: Vec<Box<dyn SimulationObserver>>,
}

impl fmt::Debug for Simulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulation")
            .field("num_floors", &self.num_floors)
            .field("elevators", &self.elevators.len())
            .field("num_round", &self.num_round)
            .field("total_people", &self.total_people)
            .field("completed", &self.completed.len())
            .field("arrival_generator", &self.arrival_generator.name())
            .field("moving_algorithm", &self.moving_algorithm.name())
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Simulation {
    pub(crate) fn from_parts(
        num_floors: Floor,
        elevators: Vec<Elevator>,
        arrival_generator: Box<dyn ArrivalGenerator>,
        moving_algorithm: Box<dyn MovingAlgorithm>,
        observers: Vec<Box<dyn SimulationObserver>>,
    ) -> Self {
        Self {
            num_floors,
            elevators,
            waiting: empty_floor_queues(num_floors),
            completed: Vec::new(),
            num_round: 0,
            total_people: 0,
            arrival_generator,
            moving_algorithm,
            observers,
        }
    }

    /// Build a simulation with the policies selected by `config`
    pub fn from_config(config: &SimulationConfig) -> SimulationResult<Self> {
        SimulationBuilder::from_config(config)?.build()
    }

    /// Attach another observer
    pub fn add_observer(&mut self, observer: impl SimulationObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Number of floors, numbered `1..=num_floors`
    pub fn num_floors(&self) -> Floor {
        self.num_floors
    }

    /// The fleet, in id order
    pub fn elevators(&self) -> &[Elevator] {
        &self.elevators
    }

    /// Waiting queues, one per floor
    pub fn waiting(&self) -> &WaitingMap {
        &self.waiting
    }

    /// People who reached their target, in completion order
    pub fn completed(&self) -> &[Person] {
        &self.completed
    }

    /// Number of rounds completed so far
    pub fn round(&self) -> usize {
        self.num_round
    }

    /// Number of people who have arrived so far
    pub fn total_people(&self) -> usize {
        self.total_people
    }

    /// Number of people currently waiting on a floor
    pub fn people_waiting(&self) -> usize {
        self.waiting.values().map(Vec::len).sum()
    }

    /// Number of people currently inside an elevator
    pub fn people_riding(&self) -> usize {
        self.elevators.iter().map(|e| e.passengers.len()).sum()
    }

    /// Name of the arrival generator in use
    pub fn arrival_generator_name(&self) -> &'static str {
        self.arrival_generator.name()
    }

    /// Name of the moving algorithm in use
    pub fn moving_algorithm_name(&self) -> &'static str {
        self.moving_algorithm.name()
    }

    /// Statistics of the run so far
    pub fn statistics(&self) -> SimulationStatistics {
        SimulationStatistics::from_completed(self.num_round, self.total_people, &self.completed)
    }

    /// Run `num_rounds` more rounds and return the statistics of the whole run
    #[instrument(skip(self), fields(
        arrivals = self.arrival_generator.name(),
        moving = self.moving_algorithm.name(),
    ))]
    pub fn run(&mut self, num_rounds: usize) -> SimulationResult<SimulationStatistics> {
        if num_rounds == 0 {
            return Err(SimulationError::configuration_error("number of rounds must be at least 1"));
        }

        info!(
            num_rounds,
            floors = self.num_floors,
            elevators = self.elevators.len(),
            "Starting simulation"
        );

        for _ in 0..num_rounds {
            self.run_round()?;
        }

        let statistics = self.statistics();
        for observer in &mut self.observers {
            observer.on_run_end(&statistics);
        }
        info!("{}", statistics.generate_compact_summary());
        Ok(statistics)
    }

    /// Run exactly one round.
    ///
    /// On error the round stops where it failed: a rejected arrival set leaves
    /// the state untouched, a rejected move leaves the elevators where they
    /// were after boarding and waiting.
    #[instrument(level = "debug", skip(self), fields(round = self.num_round))]
    pub fn run_round(&mut self) -> SimulationResult<()> {
        let round = self.num_round;
        for observer in &mut self.observers {
            observer.on_round_start(round);
        }

        self.generate_arrivals(round)?;
        self.handle_leaving();
        self.handle_boarding();
        self.increase_wait_time();
        self.move_elevators()?;

        debug!(
            waiting = self.people_waiting(),
            riding = self.people_riding(),
            completed = self.completed.len(),
            "Round finished"
        );
        Ok(())
    }

    fn generate_arrivals(&mut self, round: usize) -> SimulationResult<()> {
        let arrivals = self.arrival_generator.generate(round);
        self.check_arrivals(&arrivals)?;

        for observer in &mut self.observers {
            observer.on_arrivals(&arrivals);
        }

        for (floor, people) in arrivals {
            if people.is_empty() {
                continue;
            }
            trace!(floor, count = people.len(), "People arrived");
            self.total_people += people.len();
            if let Some(queue) = self.waiting.get_mut(&floor) {
                queue.extend(people);
            }
        }
        Ok(())
    }

    fn check_arrivals(&self, arrivals: &Arrivals) -> SimulationResult<()> {
        let policy = self.arrival_generator.name();
        for (&floor, people) in arrivals {
            if !self.waiting.contains_key(&floor) {
                return Err(self.reject(
                    policy,
                    format!("arrival floor {} is outside 1..={}", floor, self.num_floors),
                ));
            }
            for person in people {
                if person.start != floor {
                    return Err(self.reject(
                        policy,
                        format!("person starting on floor {} was listed under floor {}", person.start, floor),
                    ));
                }
                if person.target < 1 || person.target > self.num_floors || person.target == person.start {
                    return Err(self.reject(
                        policy,
                        format!("person on floor {} has invalid target {}", person.start, person.target),
                    ));
                }
            }
        }
        Ok(())
    }

    fn handle_leaving(&mut self) {
        for elevator in &mut self.elevators {
            for person in elevator.disembark() {
                for observer in &mut self.observers {
                    observer.on_disembark(&person, elevator);
                }
                self.completed.push(person);
            }
        }
    }

    fn handle_boarding(&mut self) {
        for elevator in &mut self.elevators {
            let Some(queue) = self.waiting.get_mut(&elevator.current_floor) else {
                continue;
            };
            let mut queued = std::mem::take(queue).into_iter();
            for person in queued.by_ref() {
                if let Err(person) = elevator.board(person) {
                    queue.push(person);
                    break;
                }
                if let Some(boarded) = elevator.passengers.last() {
                    for observer in &mut self.observers {
                        observer.on_board(boarded, elevator);
                    }
                }
            }
            queue.extend(queued);
        }
        self.num_round += 1;
    }

    fn increase_wait_time(&mut self) {
        self.waiting.values_mut().flatten().for_each(Person::wait);
        self.elevators.iter_mut().for_each(Elevator::tick_passengers);
    }

    fn move_elevators(&mut self) -> SimulationResult<()> {
        let directions =
            self.moving_algorithm.move_elevators(&self.elevators, &self.waiting, self.num_floors);
        let policy = self.moving_algorithm.name();

        if directions.len() != self.elevators.len() {
            return Err(self.reject(
                policy,
                format!("returned {} directions for {} elevators", directions.len(), self.elevators.len()),
            ));
        }

        let mut next_floors = Vec::with_capacity(directions.len());
        for (elevator, &direction) in self.elevators.iter().zip(&directions) {
            match elevator.floor_after(direction) {
                Some(floor) if direction.is_valid_from(elevator.current_floor, self.num_floors) => {
                    next_floors.push(floor)
                }
                _ => {
                    return Err(self.reject(
                        policy,
                        format!(
                            "{} cannot move {} from floor {} of {}",
                            elevator.id, direction, elevator.current_floor, self.num_floors
                        ),
                    ));
                }
            }
        }

        for (elevator, floor) in self.elevators.iter_mut().zip(next_floors) {
            elevator.current_floor = floor;
        }
        for observer in &mut self.observers {
            observer.on_moves(&self.elevators, &directions);
        }
        Ok(())
    }

    fn reject(&self, policy: &'static str, message: String) -> SimulationError {
        error!(policy, round = self.num_round, %message, "Policy contract violation");
        SimulationError::policy_violation(policy, message)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::arrivals::ScriptedArrivals;
    use crate::moving::PushyPassenger;
    use crate::simulation::EventRecorder;
    use crate::types::{Direction, ElevatorId};

    struct AlwaysUp;

    impl MovingAlgorithm for AlwaysUp {
        fn move_elevators(&mut self, elevators: &[Elevator], _: &WaitingMap, _: Floor) -> Vec<Direction> {
            vec![Direction::Up; elevators.len()]
        }

        fn name(&self) -> &'static str {
            "always-up"
        }
    }

    fn simulation(
        num_floors: Floor,
        capacity: usize,
        trips: Vec<(Floor, Floor)>,
        moving: Box<dyn MovingAlgorithm>,
    ) -> Simulation {
        let arrivals = ScriptedArrivals::from_rows(num_floors, vec![(0, trips)]).unwrap();
        Simulation::from_parts(
            num_floors,
            vec![Elevator::new(ElevatorId(0), capacity)],
            Box::new(arrivals),
            moving,
            Vec::new(),
        )
    }

    #[test]
    fn test_boarding_stops_at_capacity_and_keeps_queue_order() {
        let trips = vec![(1, 5), (1, 4), (1, 3), (1, 2)];
        let mut simulation = simulation(5, 2, trips, Box::new(PushyPassenger::new()));
        let recorder = EventRecorder::new();
        simulation.add_observer(recorder.clone());

        simulation.generate_arrivals(0).unwrap();
        simulation.handle_boarding();

        assert_eq!(simulation.round(), 1);
        assert_eq!(simulation.elevators[0].passenger_targets(), vec![5, 4]);
        let left: Vec<Floor> = simulation.waiting[&1].iter().map(|p| p.target).collect();
        assert_eq!(left, vec![3, 2]);

        let boarded = recorder
            .events()
            .into_iter()
            .filter(|event| matches!(event, crate::simulation::RoundEvent::Boarded { .. }))
            .count();
        assert_eq!(boarded, 2);
    }

    #[test]
    fn test_full_elevator_boards_nobody() {
        let mut simulation = simulation(4, 1, vec![(1, 3), (1, 2)], Box::new(PushyPassenger::new()));
        simulation.elevators[0].board(Person::new(1, 4)).unwrap();

        simulation.generate_arrivals(0).unwrap();
        simulation.handle_boarding();

        assert_eq!(simulation.elevators[0].passenger_targets(), vec![4]);
        assert_eq!(simulation.waiting[&1].len(), 2);
    }

    #[test]
    fn test_move_respects_top_floor() {
        let mut simulation = simulation(3, 4, Vec::new(), Box::new(AlwaysUp));

        simulation.move_elevators().unwrap();
        simulation.move_elevators().unwrap();
        assert_eq!(simulation.elevators[0].current_floor, 3);

        let error = simulation.move_elevators().unwrap_err();
        assert!(matches!(error, SimulationError::PolicyContractViolation { policy: "always-up", .. }));
        assert_eq!(simulation.elevators[0].current_floor, 3);
    }
}
