//! Enumeration types for the elevator simulator
//!
//! This module contains the enumerations shared across the simulation: movement
//! directions, the selectable policy kinds, anger levels and output formats.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction an elevator moves during the move stage of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Move one floor up
    Up,
    /// Remain on the current floor
    Stay,
    /// Move one floor down
    Down,
}

impl Direction {
    /// Signed floor delta applied to an elevator's current floor
    pub fn delta(self) -> isize {
        match self {
            Direction::Up => 1,
            Direction::Stay => 0,
            Direction::Down => -1,
        }
    }

    /// Whether this direction keeps an elevator at `floor` inside `[1, max_floor]`
    pub fn is_valid_from(self, floor: usize, max_floor: usize) -> bool {
        match self {
            Direction::Up => floor < max_floor,
            Direction::Down => floor > 1,
            Direction::Stay => true,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "UP"),
            Direction::Stay => write!(f, "STAY"),
            Direction::Down => write!(f, "DOWN"),
        }
    }
}

/// Selectable arrival generation policies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArrivalGeneratorKind {
    /// A fixed number of random people every round
    Random,
    /// Arrivals read from a CSV file
    File,
}

impl fmt::Display for ArrivalGeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrivalGeneratorKind::Random => write!(f, "random"),
            ArrivalGeneratorKind::File => write!(f, "file"),
        }
    }
}

impl FromStr for ArrivalGeneratorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "random" => Ok(ArrivalGeneratorKind::Random),
            "file" | "scripted" | "csv" => Ok(ArrivalGeneratorKind::File),
            _ => Err(format!("Unknown arrival generator: {}", s)),
        }
    }
}

/// Selectable elevator moving policies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MovingAlgorithmKind {
    /// Uniformly random valid direction
    Random,
    /// Serve the first passenger who boarded
    Pushy,
    /// Serve the closest floor
    ShortSighted,
}

impl fmt::Display for MovingAlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MovingAlgorithmKind::Random => write!(f, "random"),
            MovingAlgorithmKind::Pushy => write!(f, "pushy"),
            MovingAlgorithmKind::ShortSighted => write!(f, "short-sighted"),
        }
    }
}

impl FromStr for MovingAlgorithmKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "random" => Ok(MovingAlgorithmKind::Random),
            "pushy" | "pushy-passenger" | "pushypassenger" => Ok(MovingAlgorithmKind::Pushy),
            "short-sighted" | "shortsighted" | "short_sighted" => {
                Ok(MovingAlgorithmKind::ShortSighted)
            }
            _ => Err(format!("Unknown moving algorithm: {}", s)),
        }
    }
}

/// How unhappy a person is, derived from their wait time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AngerLevel {
    /// Waiting 0-2 rounds
    Calm,
    /// Waiting 3-4 rounds
    Restless,
    /// Waiting 5-6 rounds
    Annoyed,
    /// Waiting 7-8 rounds
    Angry,
    /// Waiting 9 or more rounds
    Furious,
}

impl AngerLevel {
    /// All levels in ascending order
    pub const ALL: [AngerLevel; 5] = [
        AngerLevel::Calm,
        AngerLevel::Restless,
        AngerLevel::Annoyed,
        AngerLevel::Angry,
        AngerLevel::Furious,
    ];

    /// Map a wait time in rounds to an anger level
    pub fn from_wait_time(wait_time: u32) -> Self {
        match wait_time {
            0..=2 => AngerLevel::Calm,
            3..=4 => AngerLevel::Restless,
            5..=6 => AngerLevel::Annoyed,
            7..=8 => AngerLevel::Angry,
            _ => AngerLevel::Furious,
        }
    }

    /// Numeric level, 0 (calm) to 4 (furious)
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for AngerLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AngerLevel::Calm => write!(f, "Calm"),
            AngerLevel::Restless => write!(f, "Restless"),
            AngerLevel::Annoyed => write!(f, "Annoyed"),
            AngerLevel::Angry => write!(f, "Angry"),
            AngerLevel::Furious => write!(f, "Furious"),
        }
    }
}

/// Output format for the final statistics report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text report
    Text,
    /// JSON document
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}
