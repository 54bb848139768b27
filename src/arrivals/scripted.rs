//! Scripted arrivals loaded from CSV
//!
//! # CSV format
//!
//! One row per round, no header. The first field is the round number, followed
//! by any number of `start,target` floor pairs:
//!
//! ```csv
//! 0,1,4,2,3
//! 2,5,1
//! 7
//! ```
//!
//! Round 0 brings a person from floor 1 to 4 and one from 2 to 3; round 2 one
//! person from 5 to 1; round 7 is listed but empty. Rounds not listed produce
//! no arrivals. Empty lines are skipped and fields may be padded with spaces,
//! but a line holding only whitespace is malformed.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use crate::arrivals::{group_by_start, validate_max_floor, ArrivalGenerator, Arrivals};
use crate::entities::Person;
use crate::simulation::{SimulationError, SimulationResult};
use crate::types::Floor;

/// A `(start, target)` floor pair
pub type Trip = (Floor, Floor);

/// Replays a fixed table of arrivals, round by round
#[derive(Debug, Clone)]
pub struct ScriptedArrivals {
    max_floor: Floor,
    rounds: BTreeMap<usize, Vec<Trip>>,
}

impl ScriptedArrivals {
    /// Load arrivals from a CSV file
    pub fn from_file(max_floor: Floor, path: impl AsRef<Path>) -> SimulationResult<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        info!("Loading scripted arrivals from {}", path.display());
        Self::from_reader(max_floor, file)
    }

    /// Like [`ScriptedArrivals::from_file`] but accepts any `Read` source.
    pub fn from_reader<R: Read>(max_floor: Floor, reader: R) -> SimulationResult<Self> {
        validate_max_floor(max_floor)?;

        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut rows = Vec::new();
        for result in csv_reader.records() {
            let record = result.map_err(|e| SimulationError::format_error(e.to_string()))?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            let values = record
                .iter()
                .map(|field| {
                    field.parse::<usize>().map_err(|_| {
                        SimulationError::format_error(format!(
                            "line {}: '{}' is not a non-negative integer",
                            line, field
                        ))
                    })
                })
                .collect::<SimulationResult<Vec<usize>>>()?;

            let Some((&round, floors)) = values.split_first() else {
                continue;
            };
            if floors.len() % 2 != 0 {
                return Err(SimulationError::format_error(format!(
                    "line {}: round {} has {} floor values, expected start/target pairs",
                    line,
                    round,
                    floors.len()
                )));
            }

            let trips = floors.chunks_exact(2).map(|pair| (pair[0], pair[1])).collect();
            rows.push((round, trips));
        }

        Self::from_rows(max_floor, rows)
    }

    /// Build from already parsed rows of `(round, trips)`
    pub fn from_rows(
        max_floor: Floor,
        rows: impl IntoIterator<Item = (usize, Vec<Trip>)>,
    ) -> SimulationResult<Self> {
        validate_max_floor(max_floor)?;

        let mut rounds = BTreeMap::new();
        for (round, trips) in rows {
            for &(start, target) in &trips {
                validate_trip(max_floor, round, start, target)?;
            }
            if rounds.insert(round, trips).is_some() {
                return Err(SimulationError::format_error(format!(
                    "round {} is listed more than once",
                    round
                )));
            }
        }

        debug!(
            "Loaded {} scripted rounds with {} trips",
            rounds.len(),
            rounds.values().map(Vec::len).sum::<usize>()
        );

        Ok(Self { max_floor, rounds })
    }

    /// Trips scheduled for a round
    pub fn trips_for(&self, round: usize) -> &[Trip] {
        self.rounds.get(&round).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of people the script will ever produce
    pub fn total_trips(&self) -> usize {
        self.rounds.values().map(Vec::len).sum()
    }

    /// Highest round number in the script
    pub fn last_round(&self) -> Option<usize> {
        self.rounds.keys().next_back().copied()
    }
}

fn validate_trip(max_floor: Floor, round: usize, start: Floor, target: Floor) -> SimulationResult<()> {
    for floor in [start, target] {
        if floor < 1 || floor > max_floor {
            return Err(SimulationError::format_error(format!(
                "round {}: floor {} is outside 1..={}",
                round, floor, max_floor
            )));
        }
    }
    if start == target {
        return Err(SimulationError::format_error(format!(
            "round {}: trip starts and ends on floor {}",
            round, start
        )));
    }
    Ok(())
}

impl ArrivalGenerator for ScriptedArrivals {
    fn generate(&mut self, round: usize) -> Arrivals {
        let people = self.trips_for(round).iter().map(|&(start, target)| Person::new(start, target));
        group_by_start(self.max_floor, people)
    }

    fn max_floor(&self) -> Floor {
        self.max_floor
    }

    fn name(&self) -> &'static str {
        "file"
    }
}
