//! Core types and identifiers for the elevator simulator
//!
//! This module contains fundamental types, identifiers, and configuration structures
//! used throughout the simulation system.
//!
//! # Overview
//!
//! - **Identifiers**: floors, UUID-based person ids and positional elevator ids
//! - **Enums**: directions, policy kinds, anger levels and output formats
//! - **Configuration**: simulation configuration with validation and CLI support
//!
//! # Usage Example
//!
//! ```rust
//! use elevator_simulator::types::*;
//!
//! let person_id = PersonId::new();
//! assert!(person_id.to_string().starts_with("PERSON_"));
//!
//! assert!(!Direction::Down.is_valid_from(1, 5));
//! assert_eq!(AngerLevel::from_wait_time(4), AngerLevel::Restless);
//!
//! let config = SimulationConfig {
//!     num_floors: 10,
//!     moving_algorithm: "short-sighted".parse().unwrap(),
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

pub mod config;
pub mod enums;
pub mod identifiers;

// Re-export all public types for convenience
pub use config::*;
pub use enums::*;
pub use identifiers::*;
