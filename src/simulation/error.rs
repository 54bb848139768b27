//! Error types and handling
//!
//! This module contains the error taxonomy for the simulation. None of the
//! simulation errors are recoverable inside a run: configuration and format
//! errors stop construction, and a policy that breaks its contract stops the
//! run before any elevator is moved.

use thiserror::Error;

use crate::types::ConfigValidationError;

/// Errors that can occur while building or running a simulation
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ConfigurationError(String),

    /// A scripted arrivals source is malformed
    #[error("Malformed arrivals source: {0}")]
    FormatError(String),

    /// A policy returned something the engine cannot apply
    #[error("Policy contract violation by '{policy}': {message}")]
    PolicyContractViolation {
        /// Name of the offending policy
        policy: &'static str,
        /// What the policy did wrong
        message: String,
    },

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl From<ConfigValidationError> for SimulationError {
    fn from(error: ConfigValidationError) -> Self {
        SimulationError::ConfigurationError(error.to_string())
    }
}

impl SimulationError {
    /// Create a configuration error
    pub fn configuration_error(msg: impl Into<String>) -> Self {
        Self::ConfigurationError(msg.into())
    }

    /// Create a format error
    pub fn format_error(msg: impl Into<String>) -> Self {
        Self::FormatError(msg.into())
    }

    /// Create a policy contract violation
    pub fn policy_violation(policy: &'static str, msg: impl Into<String>) -> Self {
        Self::PolicyContractViolation { policy, message: msg.into() }
    }

    /// Check if this is a recoverable error
    pub fn is_recoverable(&self) -> bool {
        match self {
            SimulationError::ConfigurationError(_) => false,
            SimulationError::FormatError(_) => false,
            SimulationError::PolicyContractViolation { .. } => false,
            SimulationError::IoError(_) => true,
            SimulationError::SerializationError(_) => true,
        }
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            SimulationError::ConfigurationError(_) => "Configuration",
            SimulationError::FormatError(_) => "Format",
            SimulationError::PolicyContractViolation { .. } => "Policy Contract",
            SimulationError::IoError(_) => "IO",
            SimulationError::SerializationError(_) => "Serialization",
        }
    }
}

/// Result type for simulation operations
pub type SimulationResult<T> = Result<T, SimulationError>;
