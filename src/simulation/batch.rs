//! Independent replicas of one configuration, run in parallel.

use rayon::prelude::*;
use tracing::info;

use crate::simulation::{BatchSummary, Simulation, SimulationResult, SimulationStatistics};
use crate::types::SimulationConfig;

/// Seed used by replica `index` of a batch seeded with `base`
pub fn replica_seed(base: Option<u64>, index: usize) -> Option<u64> {
    base.map(|seed| seed.wrapping_add(index as u64))
}

/// Run `replicas` independent simulations of `config` on the rayon pool.
///
/// Replica `i` uses seed `config.seed + i`, so a seeded batch is reproducible
/// and replica 0 matches a single run. Results are returned in replica order.
/// The first failing replica's error is returned.
pub fn run_replicas(
    config: &SimulationConfig,
    replicas: usize,
) -> SimulationResult<Vec<SimulationStatistics>> {
    config.validate()?;
    info!(replicas, rounds = config.num_rounds, "Running replicas");

    (0..replicas)
        .into_par_iter()
        .map(|index| {
            // Replicas run interleaved, so they are never narrated
            let replica_config = SimulationConfig {
                seed: replica_seed(config.seed, index),
                visualize: false,
                ..config.clone()
            };
            Simulation::from_config(&replica_config)?.run(replica_config.num_rounds)
        })
        .collect()
}

/// Run `replicas` replicas and aggregate them
pub fn run_batch(config: &SimulationConfig, replicas: usize) -> SimulationResult<BatchSummary> {
    Ok(BatchSummary::from_runs(run_replicas(config, replicas)?))
}
