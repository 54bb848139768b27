//! Fluent builder for constructing a [`Simulation`].

use tracing::info;

use crate::arrivals::ArrivalGenerator;
use crate::entities::Elevator;
use crate::moving::MovingAlgorithm;
use crate::simulation::{
    Simulation, SimulationError, SimulationObserver, SimulationResult, TracingObserver,
};
use crate::types::{ConfigValidationError, ElevatorId, Floor, SimulationConfig};

/// Fluent builder for [`Simulation`].
///
/// # Required inputs
///
/// - the number of floors
/// - an [`ArrivalGenerator`]
/// - a [`MovingAlgorithm`]
///
/// # Optional inputs
///
/// | Method               | Default              |
/// |----------------------|----------------------|
/// | `.elevators(n, cap)` | 1 elevator, capacity 4 |
/// | `.observer(o)`       | no observers         |
///
/// # Example
///
/// ```rust
/// use elevator_simulator::arrivals::RandomArrivals;
/// use elevator_simulator::moving::PushyPassenger;
/// use elevator_simulator::simulation::SimulationBuilder;
///
/// let mut simulation = SimulationBuilder::new(5)
///     .elevators(2, 4)
///     .arrival_generator(RandomArrivals::with_seed(5, Some(2), 7).unwrap())
///     .moving_algorithm(PushyPassenger::new())
///     .build()
///     .unwrap();
/// let statistics = simulation.run(10).unwrap();
/// assert_eq!(statistics.num_iterations, 10);
/// assert_eq!(statistics.total_people, 20);
/// ```
pub struct SimulationBuilder {
    num_floors: Floor,
    num_elevators: usize,
    elevator_capacity: usize,
    arrival_generator: Option<Box<dyn ArrivalGenerator>>,
    moving_algorithm: Option<Box<dyn MovingAlgorithm>>,
    observers: Vec<Box<dyn SimulationObserver>>,
}

impl std::fmt::Debug for SimulationBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulationBuilder")
            .field("num_floors", &self.num_floors)
            .field("num_elevators", &self.num_elevators)
            .field("elevator_capacity", &self.elevator_capacity)
            .field("arrival_generator", &self.arrival_generator.as_ref().map(|g| g.name()))
            .field("moving_algorithm", &self.moving_algorithm.as_ref().map(|m| m.name()))
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl SimulationBuilder {
    /// Start a builder for a building with floors `1..=num_floors`
    pub fn new(num_floors: Floor) -> Self {
        Self {
            num_floors,
            num_elevators: 1,
            elevator_capacity: 4,
            arrival_generator: None,
            moving_algorithm: None,
            observers: Vec::new(),
        }
    }

    /// Builder with the building and policies described by `config`.
    ///
    /// With `visualize` set a [`TracingObserver`] narrates every round.
    pub fn from_config(config: &SimulationConfig) -> SimulationResult<Self> {
        config.validate()?;
        let builder = Self::new(config.num_floors)
            .elevators(config.num_elevators, config.elevator_capacity)
            .boxed_arrival_generator(config.build_arrival_generator()?)
            .boxed_moving_algorithm(config.build_moving_algorithm());
        if config.visualize {
            Ok(builder.observer(TracingObserver::new()))
        } else {
            Ok(builder)
        }
    }

    /// Set the fleet size and the capacity of every elevator
    pub fn elevators(mut self, count: usize, capacity: usize) -> Self {
        self.num_elevators = count;
        self.elevator_capacity = capacity;
        self
    }

    /// Set the arrival generator
    pub fn arrival_generator(self, generator: impl ArrivalGenerator + 'static) -> Self {
        self.boxed_arrival_generator(Box::new(generator))
    }

    /// Set an already boxed arrival generator
    pub fn boxed_arrival_generator(mut self, generator: Box<dyn ArrivalGenerator>) -> Self {
        self.arrival_generator = Some(generator);
        self
    }

    /// Set the moving algorithm
    pub fn moving_algorithm(self, algorithm: impl MovingAlgorithm + 'static) -> Self {
        self.boxed_moving_algorithm(Box::new(algorithm))
    }

    /// Set an already boxed moving algorithm
    pub fn boxed_moving_algorithm(mut self, algorithm: Box<dyn MovingAlgorithm>) -> Self {
        self.moving_algorithm = Some(algorithm);
        self
    }

    /// Attach an observer
    pub fn observer(mut self, observer: impl SimulationObserver + 'static) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    /// Validate the inputs and build the simulation
    pub fn build(self) -> SimulationResult<Simulation> {
        if self.num_floors < 2 {
            return Err(ConfigValidationError::InvalidFloorCount(self.num_floors).into());
        }
        if self.num_elevators == 0 {
            return Err(ConfigValidationError::InvalidElevatorCount(self.num_elevators).into());
        }
        if self.elevator_capacity == 0 {
            return Err(ConfigValidationError::InvalidCapacity(self.elevator_capacity).into());
        }

        let arrival_generator = self
            .arrival_generator
            .ok_or_else(|| SimulationError::configuration_error("an arrival generator is required"))?;
        let moving_algorithm = self
            .moving_algorithm
            .ok_or_else(|| SimulationError::configuration_error("a moving algorithm is required"))?;

        if arrival_generator.max_floor() > self.num_floors {
            return Err(SimulationError::configuration_error(format!(
                "arrival generator '{}' covers {} floors but the building has {}",
                arrival_generator.name(),
                arrival_generator.max_floor(),
                self.num_floors
            )));
        }

        let elevators = (0..self.num_elevators)
            .map(|i| Elevator::new(ElevatorId(i), self.elevator_capacity))
            .collect();

        info!(
            floors = self.num_floors,
            elevators = self.num_elevators,
            capacity = self.elevator_capacity,
            arrivals = arrival_generator.name(),
            moving = moving_algorithm.name(),
            "Simulation built"
        );

        Ok(Simulation::from_parts(
            self.num_floors,
            elevators,
            arrival_generator,
            moving_algorithm,
            self.observers,
        ))
    }
}
