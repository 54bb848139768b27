//! Elevator Simulator
//!
//! A round-stepped simulation of a building served by a fleet of elevators,
//! with pluggable policies deciding who arrives and where the elevators go.
//!
//! # Overview
//!
//! Every round the engine runs five stages in a fixed order: arrivals,
//! disembarking, boarding, wait time update and movement. At the end of a run
//! it reports how long the people who reached their floor had to wait.
//!
//! ## Key Features
//!
//! - **Arrival Policies**: random arrivals or arrivals replayed from a CSV script
//! - **Moving Policies**: random, first-passenger-first and nearest-floor-first
//! - **Contract Checking**: policy decisions are validated before they are applied
//! - **Observers**: tracing narration and a JSONL event recorder
//! - **Batch Replicas**: independent seeded runs in parallel
//! - **Configurable Simulation**: defaults, JSON config files and CLI overrides
//!
//! ## Quick Start
//!
//! ```rust
//! use elevator_simulator::*;
//!
//! let config = SimulationConfig {
//!     num_floors: 8,
//!     num_elevators: 2,
//!     seed: Some(1),
//!     ..Default::default()
//! };
//!
//! let mut simulation = Simulation::from_config(&config)?;
//! let stats = simulation.run(20)?;
//! println!("{} of {} people arrived", stats.people_completed, stats.total_people);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: Core types, identifiers, and configuration
//! - [`entities`]: People, elevators and floor queues
//! - [`arrivals`]: Arrival generation policies
//! - [`moving`]: Elevator moving policies
//! - [`simulation`]: Engine, observers, statistics and batch runs
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │   Types     │    │  Entities   │    │  Arrivals   │
//! │             │    │             │    │             │
//! │ Identifiers │◄───┤ Person      │◄───┤ Random      │
//! │ Enums       │    │ Elevator    │    │ Scripted    │
//! │ Config      │    │ Queues      │    │             │
//! └─────────────┘    └─────────────┘    └─────────────┘
//!        ▲                   ▲                   ▲
//!        │                   │                   │
//! ┌─────────────┐    ┌─────────────────────────────────┐
//! │   Moving    │◄───┤           Simulation            │
//! │             │    │                                 │
//! │ Random      │    │ Engine  Builder  Observers      │
//! │ Pushy       │    │ Statistics  Batch  Logging      │
//! │ ShortSighted│    │                                 │
//! └─────────────┘    └─────────────────────────────────┘
//! ```
#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

// Module declarations
pub mod arrivals;
pub mod entities;
pub mod moving;
pub mod simulation;
pub mod types;

// Core types and identifiers
pub use types::{
    AngerLevel,
    ArrivalGeneratorKind,
    // Configuration
    CliArgs,
    ConfigError,
    ConfigValidationError,
    // Enums
    Direction,
    ElevatorId,
    // Identifiers
    Floor,
    MovingAlgorithmKind,
    OutputFormat,
    PersonId,
    SimulationConfig,
};

// Entities
pub use entities::{Elevator, FloorQueues, Person, WaitingMap};

// Policies
pub use arrivals::{ArrivalGenerator, Arrivals, RandomArrivals, ScriptedArrivals};
pub use moving::{MovingAlgorithm, PushyPassenger, RandomMoving, ShortSighted};

// Simulation types and functionality
pub use simulation::{
    run_replicas, BatchSummary, EventRecorder, NoopObserver, RoundEvent, Simulation,
    SimulationBuilder, SimulationError, SimulationObserver, SimulationResult,
    SimulationStatistics, TracingObserver,
};
