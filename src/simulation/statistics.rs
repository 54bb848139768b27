//! Statistics collection and reporting
//!
//! This module contains the end-of-run statistics record and the summary of a
//! batch of replicas.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entities::Person;
use crate::types::AngerLevel;

/// Reported for every wait-time statistic when nobody has completed a trip
pub const NO_DATA: i64 = -1;

/// Statistics for one simulation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationStatistics {
    /// Number of rounds the engine has completed
    pub num_iterations: usize,
    /// Number of people who ever arrived
    pub total_people: usize,
    /// Number of people who reached their target floor
    pub people_completed: usize,
    /// Longest wait among completed people, or -1
    pub max_time: i64,
    /// Shortest wait among completed people, or -1
    pub min_time: i64,
    /// Mean wait among completed people rounded half to even, or -1
    pub avg_time: i64,
    /// Completed people per anger level, calm first
    pub anger_counts: [usize; 5],
}

impl SimulationStatistics {
    /// Compute statistics from the completed people of a run
    pub fn from_completed(num_iterations: usize, total_people: usize, completed: &[Person]) -> Self {
        let mut anger_counts = [0usize; 5];
        for person in completed {
            anger_counts[person.anger_level().as_u8() as usize] += 1;
        }

        let waits: Vec<i64> = completed.iter().map(|p| i64::from(p.wait_time)).collect();
        let (max_time, min_time, avg_time) = match (waits.iter().max(), waits.iter().min()) {
            (Some(&max), Some(&min)) => {
                let sum: i64 = waits.iter().sum();
                (max, min, round_half_even(sum, waits.len() as i64))
            }
            _ => (NO_DATA, NO_DATA, NO_DATA),
        };

        Self {
            num_iterations,
            total_people,
            people_completed: completed.len(),
            max_time,
            min_time,
            avg_time,
            anger_counts,
        }
    }

    /// Whether at least one person completed a trip
    pub fn has_wait_data(&self) -> bool {
        self.people_completed > 0
    }

    /// Percentage of arrived people who reached their target
    pub fn completion_percentage(&self) -> f64 {
        if self.total_people == 0 {
            0.0
        } else {
            (self.people_completed as f64 / self.total_people as f64) * 100.0
        }
    }

    /// Completed people at the given anger level
    pub fn completed_at(&self, level: AngerLevel) -> usize {
        self.anger_counts[level.as_u8() as usize]
    }

    /// Generate a multi-line summary report
    pub fn generate_summary_report(&self) -> String {
        let mut report = String::new();

        report.push_str("=== Elevator Simulation Report ===\n\n");
        report.push_str(&format!("Rounds Run: {}\n", self.num_iterations));
        report.push_str(&format!("Total People: {}\n", self.total_people));
        report.push_str(&format!(
            "People Completed: {} ({:.1}%)\n\n",
            self.people_completed,
            self.completion_percentage()
        ));

        report.push_str("Wait Times (rounds):\n");
        if self.has_wait_data() {
            report.push_str(&format!("  Max: {}\n", self.max_time));
            report.push_str(&format!("  Min: {}\n", self.min_time));
            report.push_str(&format!("  Avg: {}\n\n", self.avg_time));

            report.push_str("Anger at Arrival:\n");
            for level in AngerLevel::ALL {
                report.push_str(&format!("  {}: {}\n", level, self.completed_at(level)));
            }
        } else {
            report.push_str("  No completed trips\n");
        }

        report
    }

    /// Generate a compact one-line summary suitable for logging
    pub fn generate_compact_summary(&self) -> String {
        format!(
            "Simulation: {} rounds, {} people ({} completed), wait max/min/avg {}/{}/{}",
            self.num_iterations,
            self.total_people,
            self.people_completed,
            self.max_time,
            self.min_time,
            self.avg_time
        )
    }
}

impl fmt::Display for SimulationStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.generate_summary_report())
    }
}

/// Aggregate over several independent runs of the same configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Number of runs aggregated
    pub replicas: usize,
    /// People who arrived, summed over runs
    pub total_people: usize,
    /// People who completed, summed over runs
    pub people_completed: usize,
    /// Largest `max_time` of any run, or -1
    pub worst_max_time: i64,
    /// Mean of `avg_time` over runs that have wait data, or `None`
    pub mean_avg_time: Option<f64>,
    /// Per-run statistics in replica order
    pub runs: Vec<SimulationStatistics>,
}

impl BatchSummary {
    /// Aggregate per-run statistics
    pub fn from_runs(runs: Vec<SimulationStatistics>) -> Self {
        let with_data: Vec<&SimulationStatistics> = runs.iter().filter(|r| r.has_wait_data()).collect();
        let mean_avg_time = if with_data.is_empty() {
            None
        } else {
            Some(with_data.iter().map(|r| r.avg_time as f64).sum::<f64>() / with_data.len() as f64)
        };

        Self {
            replicas: runs.len(),
            total_people: runs.iter().map(|r| r.total_people).sum(),
            people_completed: runs.iter().map(|r| r.people_completed).sum(),
            worst_max_time: runs.iter().map(|r| r.max_time).max().unwrap_or(NO_DATA),
            mean_avg_time,
            runs,
        }
    }

    /// Generate a multi-line summary report
    pub fn generate_summary_report(&self) -> String {
        let mut report = String::new();
        report.push_str(&format!("=== Batch of {} Replicas ===\n\n", self.replicas));
        report.push_str(&format!("Total People: {}\n", self.total_people));
        report.push_str(&format!("People Completed: {}\n", self.people_completed));
        report.push_str(&format!("Worst Max Wait: {}\n", self.worst_max_time));
        match self.mean_avg_time {
            Some(mean) => report.push_str(&format!("Mean Avg Wait: {:.2}\n\n", mean)),
            None => report.push_str("Mean Avg Wait: n/a\n\n"),
        }
        for (i, run) in self.runs.iter().enumerate() {
            report.push_str(&format!("  #{}: {}\n", i, run.generate_compact_summary()));
        }
        report
    }
}

/// Integer mean of `sum / count` rounded to nearest, ties to even.
///
/// Both arguments must be non-negative and `count` non-zero.
fn round_half_even(sum: i64, count: i64) -> i64 {
    let quotient = sum / count;
    let twice_remainder = 2 * (sum % count);
    if twice_remainder > count || (twice_remainder == count && quotient % 2 == 1) {
        quotient + 1
    } else {
        quotient
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completed_with_waits(waits: &[u32]) -> Vec<Person> {
        waits
            .iter()
            .map(|&wait| {
                let mut person = Person::new(1, 2);
                person.wait_time = wait;
                person
            })
            .collect()
    }

    #[test]
    fn test_no_completed_people_reports_sentinel() {
        let stats = SimulationStatistics::from_completed(10, 3, &[]);
        assert_eq!(stats.num_iterations, 10);
        assert_eq!(stats.total_people, 3);
        assert_eq!(stats.people_completed, 0);
        assert_eq!(stats.max_time, NO_DATA);
        assert_eq!(stats.min_time, NO_DATA);
        assert_eq!(stats.avg_time, NO_DATA);
        assert!(!stats.has_wait_data());
        assert!(stats.generate_summary_report().contains("No completed trips"));
    }

    #[test]
    fn test_wait_time_aggregates() {
        let stats = SimulationStatistics::from_completed(5, 4, &completed_with_waits(&[1, 4, 2]));
        assert_eq!(stats.people_completed, 3);
        assert_eq!(stats.max_time, 4);
        assert_eq!(stats.min_time, 1);
        assert_eq!(stats.avg_time, 2);
        assert_eq!(stats.completion_percentage(), 75.0);
    }

    #[test]
    fn test_average_rounds_half_to_even() {
        assert_eq!(round_half_even(3, 2), 2); // 1.5
        assert_eq!(round_half_even(5, 2), 2); // 2.5
        assert_eq!(round_half_even(7, 2), 4); // 3.5
        assert_eq!(round_half_even(5, 3), 2); // 1.67
        assert_eq!(round_half_even(4, 3), 1); // 1.33
        assert_eq!(round_half_even(0, 4), 0);
    }

    #[test]
    fn test_anger_counts() {
        let stats = SimulationStatistics::from_completed(1, 4, &completed_with_waits(&[0, 3, 4, 12]));
        assert_eq!(stats.completed_at(AngerLevel::Calm), 1);
        assert_eq!(stats.completed_at(AngerLevel::Restless), 2);
        assert_eq!(stats.completed_at(AngerLevel::Furious), 1);
        assert_eq!(stats.anger_counts.iter().sum::<usize>(), 4);
    }

    #[test]
    fn test_compact_summary() {
        let stats = SimulationStatistics::from_completed(10, 2, &completed_with_waits(&[1, 2]));
        assert_eq!(
            stats.generate_compact_summary(),
            "Simulation: 10 rounds, 2 people (2 completed), wait max/min/avg 2/1/2"
        );
    }

    #[test]
    fn test_serialization_field_names() {
        let stats = SimulationStatistics::from_completed(3, 1, &completed_with_waits(&[2]));
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["num_iterations"], 3);
        assert_eq!(json["people_completed"], 1);
        assert_eq!(json["avg_time"], 2);

        let back: SimulationStatistics = serde_json::from_value(json).unwrap();
        assert_eq!(back, stats);
    }

    #[test]
    fn test_batch_summary() {
        let runs = vec![
            SimulationStatistics::from_completed(5, 2, &completed_with_waits(&[1, 3])),
            SimulationStatistics::from_completed(5, 1, &[]),
            SimulationStatistics::from_completed(5, 3, &completed_with_waits(&[4])),
        ];
        let summary = BatchSummary::from_runs(runs);
        assert_eq!(summary.replicas, 3);
        assert_eq!(summary.total_people, 6);
        assert_eq!(summary.people_completed, 3);
        assert_eq!(summary.worst_max_time, 4);
        assert_eq!(summary.mean_avg_time, Some(3.0));
        assert!(summary.generate_summary_report().contains("#1:"));
    }

    #[test]
    fn test_batch_summary_without_data() {
        let summary = BatchSummary::from_runs(vec![SimulationStatistics::from_completed(2, 0, &[])]);
        assert_eq!(summary.worst_max_time, NO_DATA);
        assert_eq!(summary.mean_avg_time, None);
    }
}
