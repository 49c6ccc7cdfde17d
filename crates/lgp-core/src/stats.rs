//! Population statistics and fitness ordering.

use crate::types::Fitness;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Summary of a population, recomputed after each batch of evolve steps.
/// Values are only trustworthy right after a recompute.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    /// Arithmetic mean fitness over the population
    pub avg_fitness: Fitness,
    /// Fitness of the best program
    pub best_fitness: Fitness,
    /// Evolve steps run since initialization
    pub total_steps: u64,
    /// `total_steps * 2 / population_size`
    pub total_generations: u64,
    /// Mean number of statements per program
    pub avg_program_length: f64,
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Each step replaces two programs, so a generation is `population_size / 2` steps.
    pub fn generations(total_steps: u64, population_size: usize) -> u64 {
        if population_size == 0 {
            return 0;
        }
        total_steps * 2 / population_size as u64
    }
}

/// Orders two fitness values best-first.
///
/// `Ordering::Less` means `a` is better than `b`. NaN of either sign is worse
/// than every number in both directions and equal to any other NaN.
pub fn compare_fitness(a: Fitness, b: Fitness, minimize: bool) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) if minimize => a.total_cmp(&b),
        (false, false) => b.total_cmp(&a),
    }
}
