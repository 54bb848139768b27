//! Simulation engine and control
//!
//! This module contains the round-stepped engine, its builder, observers,
//! statistics, batch execution, logging setup and error handling.
//!
//! # Overview
//!
//! - **Simulation**: owns the building state and runs rounds
//! - **SimulationBuilder**: assembles a simulation from policies or a config
//! - **SimulationObserver**: callbacks for visualization and event recording
//! - **SimulationStatistics**: end-of-run wait time statistics
//! - **run_replicas**: parallel independent runs of one configuration
//! - **SimulationError**: error taxonomy for construction and runs
//!
//! # Usage Example
//!
//! ```rust
//! use elevator_simulator::simulation::*;
//! use elevator_simulator::types::*;
//!
//! let config = SimulationConfig {
//!     num_floors: 6,
//!     num_elevators: 2,
//!     moving_algorithm: MovingAlgorithmKind::ShortSighted,
//!     seed: Some(42),
//!     ..Default::default()
//! };
//!
//! let mut simulation = Simulation::from_config(&config).unwrap();
//! let statistics = simulation.run(config.num_rounds).unwrap();
//! assert_eq!(statistics.num_iterations, config.num_rounds);
//! ```

pub mod batch;
pub mod builder;
pub mod engine;
pub mod error;
pub mod logging;
pub mod observer;
pub mod statistics;

// Re-export all public types for convenience
pub use batch::*;
pub use builder::*;
pub use engine::*;
pub use error::*;
pub use logging::*;
pub use observer::*;
pub use statistics::*;
