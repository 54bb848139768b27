//! Configuration structures for the elevator simulator
//!
//! This module contains the simulation configuration, its command line and
//! JSON file sources, validation logic and the factories that turn the
//! selected policy kinds into policy instances.

use super::{ArrivalGeneratorKind, MovingAlgorithmKind, OutputFormat};
use crate::arrivals::{ArrivalGenerator, RandomArrivals, ScriptedArrivals};
use crate::moving::{MovingAlgorithm, PushyPassenger, RandomMoving, ShortSighted};
use crate::simulation::SimulationResult;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Mixed into the configured seed so the moving policy does not share a
/// random stream with the arrival generator.
const MOVING_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Command line arguments structure
#[derive(Debug, Clone, Parser)]
#[command(
    name = "elevator-simulator",
    version,
    about = "Elevator Simulator - Round-based simulation of elevators serving a building",
    long_about = "Simulates a building with a fleet of elevators. Every round people arrive on floors, passengers leave and board, and a moving algorithm decides where each elevator goes next. Wait time statistics are reported at the end of the run.

EXAMPLES:
    # Run with default settings
    elevator-simulator

    # Use a configuration file
    elevator-simulator --config config.json

    # Override specific settings
    elevator-simulator --num-floors 10 --num-elevators 3 --moving-algorithm short-sighted

    # Replay scripted arrivals
    elevator-simulator --arrival-generator file --arrivals-file arrivals.csv

    # Generate configuration template
    elevator-simulator --print-config > my-config.json

    # Validate configuration without running
    elevator-simulator --config my-config.json --dry-run

    # Run 20 seeded replicas in parallel
    elevator-simulator --seed 7 --replicas 20

CONFIGURATION:
    Configuration can be provided via:
    1. Command line arguments (highest priority)
    2. Configuration file (--config flag)
    3. Default values (lowest priority)

    Supported configuration file formats: JSON (.json)

    Use --print-config to generate a template configuration file."
)]
pub struct CliArgs {
    /// Configuration file path (JSON format)
    #[arg(
        short,
        long,
        help = "Configuration file path (JSON format)",
        long_help = "Path to a JSON configuration file. CLI arguments will override file settings."
    )]
    pub config: Option<String>,

    /// Number of floors in the building
    #[arg(
        long,
        help = "Number of floors",
        long_help = "Number of floors, numbered from 1. Must be at least 2. Default: 5"
    )]
    pub num_floors: Option<usize>,

    /// Number of elevators
    #[arg(long, help = "Number of elevators (at least 1)")]
    pub num_elevators: Option<usize>,

    /// Capacity of every elevator
    #[arg(long, help = "Passengers per elevator (at least 1)")]
    pub elevator_capacity: Option<usize>,

    /// Number of rounds to run
    #[arg(long, help = "Number of rounds to run (at least 1)")]
    pub num_rounds: Option<usize>,

    /// Arrival generator
    #[arg(
        long,
        help = "Arrival generator (random or file)",
        long_help = "How people arrive. 'random' generates --num-people-per-round random people every round; 'file' replays --arrivals-file. Default: random"
    )]
    pub arrival_generator: Option<ArrivalGeneratorKind>,

    /// People generated per round by the random arrival generator
    #[arg(long, help = "People per round for random arrivals")]
    pub num_people_per_round: Option<usize>,

    /// Scripted arrivals file
    #[arg(
        long,
        help = "Scripted arrivals CSV file",
        long_help = "CSV file with rows of 'round,start,target,start,target,...'. Each round may appear at most once. Required when --arrival-generator is 'file'."
    )]
    pub arrivals_file: Option<String>,

    /// Moving algorithm
    #[arg(
        long,
        help = "Moving algorithm (random, pushy or short-sighted)",
        long_help = "How elevators choose their direction. 'random' picks any valid direction, 'pushy' serves the first passenger to board, 'short-sighted' serves the closest floor. Default: pushy"
    )]
    pub moving_algorithm: Option<MovingAlgorithmKind>,

    /// Random seed for reproducible results
    #[arg(long, help = "Random seed for reproducible results")]
    pub seed: Option<u64>,

    /// Narrate every round on the log
    #[arg(long, help = "Log every arrival, boarding, exit and move")]
    pub visualize: bool,

    /// Output format for the statistics report
    #[arg(long, help = "Report format (text or json)")]
    pub output_format: Option<OutputFormat>,

    /// Output path for the recorded event stream
    #[arg(long, help = "Write every simulation event to this JSONL file")]
    pub events_output: Option<String>,

    /// Number of independent replicas
    #[arg(
        long,
        help = "Number of independent replicas",
        long_help = "Run this many independent simulations in parallel. Replica i uses seed + i. Default: 1"
    )]
    pub replicas: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, help = "Enable debug logging")]
    pub debug: bool,

    /// Dry run mode - validate configuration without running simulation
    #[arg(long, help = "Validate configuration without running simulation")]
    pub dry_run: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print the resolved configuration in JSON format and exit")]
    pub print_config: bool,
}

/// Configuration file structure (allows partial configuration)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Number of floors
    pub num_floors: Option<usize>,

    /// Number of elevators
    pub num_elevators: Option<usize>,

    /// Capacity of every elevator
    pub elevator_capacity: Option<usize>,

    /// Number of rounds to run
    pub num_rounds: Option<usize>,

    /// Arrival generator
    pub arrival_generator: Option<ArrivalGeneratorKind>,

    /// People per round for random arrivals
    pub num_people_per_round: Option<usize>,

    /// Scripted arrivals file
    pub arrivals_file: Option<String>,

    /// Moving algorithm
    pub moving_algorithm: Option<MovingAlgorithmKind>,

    /// Random seed
    pub seed: Option<u64>,

    /// Narrate every round on the log
    pub visualize: Option<bool>,

    /// Report format
    pub output_format: Option<OutputFormat>,

    /// Output path for the recorded event stream
    pub events_output: Option<String>,

    /// Number of independent replicas
    pub replicas: Option<usize>,
}

/// Configuration for the elevator simulation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of floors, numbered `1..=num_floors`
    pub num_floors: usize,

    /// Number of elevators
    pub num_elevators: usize,

    /// Capacity of every elevator
    pub elevator_capacity: usize,

    /// Number of rounds to run
    pub num_rounds: usize,

    /// Arrival generator
    pub arrival_generator: ArrivalGeneratorKind,

    /// People per round for random arrivals; `None` means nobody arrives
    pub num_people_per_round: Option<usize>,

    /// Scripted arrivals file, required by the `file` generator
    pub arrivals_file: Option<String>,

    /// Moving algorithm
    pub moving_algorithm: MovingAlgorithmKind,

    /// Random seed for reproducible results
    pub seed: Option<u64>,

    /// Narrate every round on the log
    pub visualize: bool,

    /// Report format
    pub output_format: OutputFormat,

    /// Output path for the recorded event stream
    pub events_output: Option<String>,

    /// Number of independent replicas
    pub replicas: usize,
}

/// Configuration loading and validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Configuration file read error
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unsupported configuration file format
    #[error("Unsupported configuration file format: {0} (supported: .json)")]
    UnsupportedFormat(String),
}

/// Validation errors for simulation configuration
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    /// Floor count is invalid
    #[error("Number of floors must be at least 2, got {0}")]
    InvalidFloorCount(usize),

    /// Elevator count is invalid
    #[error("Number of elevators must be at least 1, got {0}")]
    InvalidElevatorCount(usize),

    /// Elevator capacity is invalid
    #[error("Elevator capacity must be at least 1, got {0}")]
    InvalidCapacity(usize),

    /// Round count is invalid
    #[error("Number of rounds must be at least 1, got {0}")]
    InvalidRoundCount(usize),

    /// The file arrival generator was chosen without a file
    #[error("The 'file' arrival generator requires arrivals_file")]
    MissingArrivalsFile,

    /// Replica count is invalid
    #[error("Number of replicas must be at least 1, got {0}")]
    InvalidReplicaCount(usize),
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_floors: 5,
            num_elevators: 1,
            elevator_capacity: 4,
            num_rounds: 15,
            arrival_generator: ArrivalGeneratorKind::Random,
            num_people_per_round: Some(2),
            arrivals_file: None,
            moving_algorithm: MovingAlgorithmKind::Pushy,
            seed: None,
            visualize: false,
            output_format: OutputFormat::Text,
            events_output: None,
            replicas: 1,
        }
    }
}

impl SimulationConfig {
    /// Create a new configuration from command line arguments and optional config file
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::from_cli_args(args)
    }

    /// Create configuration from parsed CLI arguments
    pub fn from_cli_args(args: CliArgs) -> Result<Self, ConfigError> {
        let mut config = match &args.config {
            Some(config_path) => Self::from_file(config_path)?,
            None => Self::default(),
        };

        // CLI takes precedence over the file
        config.apply_cli_overrides(args);

        Ok(config)
    }

    /// Load configuration from a JSON file, merging with defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                let content = fs::read_to_string(path)?;
                let config_file: ConfigFile = serde_json::from_str(&content)?;
                Ok(Self::from_config_file(config_file))
            }
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::UnsupportedFormat("no extension".to_string())),
        }
    }

    /// Create configuration from a config file, merging with defaults
    pub fn from_config_file(file: ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            num_floors: file.num_floors.unwrap_or(defaults.num_floors),
            num_elevators: file.num_elevators.unwrap_or(defaults.num_elevators),
            elevator_capacity: file.elevator_capacity.unwrap_or(defaults.elevator_capacity),
            num_rounds: file.num_rounds.unwrap_or(defaults.num_rounds),
            arrival_generator: file.arrival_generator.unwrap_or(defaults.arrival_generator),
            num_people_per_round: file.num_people_per_round.or(defaults.num_people_per_round),
            arrivals_file: file.arrivals_file.or(defaults.arrivals_file),
            moving_algorithm: file.moving_algorithm.unwrap_or(defaults.moving_algorithm),
            seed: file.seed.or(defaults.seed),
            visualize: file.visualize.unwrap_or(defaults.visualize),
            output_format: file.output_format.unwrap_or(defaults.output_format),
            events_output: file.events_output.or(defaults.events_output),
            replicas: file.replicas.unwrap_or(defaults.replicas),
        }
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(&mut self, args: CliArgs) {
        if let Some(value) = args.num_floors {
            self.num_floors = value;
        }
        if let Some(value) = args.num_elevators {
            self.num_elevators = value;
        }
        if let Some(value) = args.elevator_capacity {
            self.elevator_capacity = value;
        }
        if let Some(value) = args.num_rounds {
            self.num_rounds = value;
        }
        if let Some(value) = args.arrival_generator {
            self.arrival_generator = value;
        }
        if let Some(value) = args.num_people_per_round {
            self.num_people_per_round = Some(value);
        }
        if let Some(value) = args.arrivals_file {
            self.arrivals_file = Some(value);
        }
        if let Some(value) = args.moving_algorithm {
            self.moving_algorithm = value;
        }
        if let Some(value) = args.seed {
            self.seed = Some(value);
        }
        // A flag can only switch visualization on
        if args.visualize {
            self.visualize = true;
        }
        if let Some(value) = args.output_format {
            self.output_format = value;
        }
        if let Some(value) = args.events_output {
            self.events_output = Some(value);
        }
        if let Some(value) = args.replicas {
            self.replicas = value;
        }
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Print configuration as JSON
    pub fn print_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.num_floors < 2 {
            return Err(ConfigValidationError::InvalidFloorCount(self.num_floors));
        }
        if self.num_elevators == 0 {
            return Err(ConfigValidationError::InvalidElevatorCount(self.num_elevators));
        }
        if self.elevator_capacity == 0 {
            return Err(ConfigValidationError::InvalidCapacity(self.elevator_capacity));
        }
        if self.num_rounds == 0 {
            return Err(ConfigValidationError::InvalidRoundCount(self.num_rounds));
        }
        if self.arrival_generator == ArrivalGeneratorKind::File && self.arrivals_file.is_none() {
            return Err(ConfigValidationError::MissingArrivalsFile);
        }
        if self.replicas == 0 {
            return Err(ConfigValidationError::InvalidReplicaCount(self.replicas));
        }

        Ok(())
    }

    /// Build the selected arrival generator.
    ///
    /// The random generator is seeded with `seed` when present. The scripted
    /// generator reads and checks `arrivals_file` here.
    pub fn build_arrival_generator(&self) -> SimulationResult<Box<dyn ArrivalGenerator>> {
        Ok(match self.arrival_generator {
            ArrivalGeneratorKind::Random => match self.seed {
                Some(seed) => Box::new(RandomArrivals::with_seed(
                    self.num_floors,
                    self.num_people_per_round,
                    seed,
                )?),
                None => Box::new(RandomArrivals::new(self.num_floors, self.num_people_per_round)?),
            },
            ArrivalGeneratorKind::File => {
                let path = self.arrivals_file.as_ref().ok_or(ConfigValidationError::MissingArrivalsFile)?;
                Box::new(ScriptedArrivals::from_file(self.num_floors, path)?)
            }
        })
    }

    /// Build the selected moving algorithm
    pub fn build_moving_algorithm(&self) -> Box<dyn MovingAlgorithm> {
        match self.moving_algorithm {
            MovingAlgorithmKind::Random => match self.seed {
                Some(seed) => Box::new(RandomMoving::with_seed(seed ^ MOVING_SEED_SALT)),
                None => Box::new(RandomMoving::new()),
            },
            MovingAlgorithmKind::Pushy => Box::new(PushyPassenger::new()),
            MovingAlgorithmKind::ShortSighted => Box::new(ShortSighted::new()),
        }
    }
}
