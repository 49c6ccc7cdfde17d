//! Side-by-side comparison of configurations over repeated runs.

use crate::world::World;
use lgp_core::{compare_fitness, Error, Fitness, Result, WorldConfig};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// How long each run evolves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Budget {
    Steps(u64),
    Duration(Duration),
}

/// Averages over all runs of one configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrialOutcome {
    /// Position of the configuration in the input slice
    pub config_index: usize,
    pub runs: usize,
    pub mean_best_fitness: Fitness,
    pub mean_avg_fitness: Fitness,
    pub mean_steps: f64,
    /// Best fitness seen in any run
    pub best_fitness: Fitness,
}

/// Build and evolve `runs` worlds for every configuration, one after another.
///
/// `build` turns a configuration into an initialized world; it is where the
/// caller attaches operations, the evaluator and the constant source. Errors
/// from `build` abort the comparison.
#[instrument(skip(configs, build), fields(configs = configs.len()))]
pub fn compare_configurations<F>(
    configs: &[WorldConfig],
    budget: Budget,
    runs: usize,
    build: F,
) -> Result<Vec<TrialOutcome>>
where
    F: Fn(&WorldConfig) -> Result<World>,
{
    if runs == 0 {
        return Err(Error::Validation("runs must be at least 1".to_string()));
    }

    let mut outcomes = Vec::with_capacity(configs.len());
    for (config_index, config) in configs.iter().enumerate() {
        let mut best: Option<Fitness> = None;
        let mut total_best = 0.0;
        let mut total_avg = 0.0;
        let mut total_steps = 0u64;

        for run in 0..runs {
            let mut world = build(config)?;
            match budget {
                Budget::Steps(steps) => world.evolve(steps),
                Budget::Duration(duration) => {
                    world.evolve_for_duration(duration);
                }
            }

            let stats = world.stats();
            debug!(
                config_index,
                run,
                best_fitness = stats.best_fitness,
                avg_fitness = stats.avg_fitness,
                steps = stats.total_steps,
                "Trial run finished"
            );

            total_best += stats.best_fitness;
            total_avg += stats.avg_fitness;
            total_steps += stats.total_steps;
            best = Some(match best {
                Some(current)
                    if compare_fitness(current, stats.best_fitness, config.minimize_fitness)
                        .is_le() =>
                {
                    current
                }
                _ => stats.best_fitness,
            });
        }

        let n = runs as f64;
        let outcome = TrialOutcome {
            config_index,
            runs,
            mean_best_fitness: total_best / n,
            mean_avg_fitness: total_avg / n,
            mean_steps: total_steps as f64 / n,
            best_fitness: best.unwrap_or_default(),
        };
        info!(
            config_index,
            mean_best_fitness = outcome.mean_best_fitness,
            mean_avg_fitness = outcome.mean_avg_fitness,
            best_fitness = outcome.best_fitness,
            "Configuration trial complete"
        );
        outcomes.push(outcome);
    }

    Ok(outcomes)
}
