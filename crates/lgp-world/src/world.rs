//! The world: population, configuration, statistics and the evolve loop.

use crate::selection::{rank_tournament, sample_tournament};
use lgp_core::{compare_fitness, Error, Fitness, Num, Result, Statistics, WorldConfig};
use lgp_ir::{
    cross_homologous, remove_introns, validate_program, ConstantSource, Interpreter, Mutator,
    Operation, OperationSet, Program, ProgramGenerator, RunState,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, trace};

/// Scores a program. Direction of "better" follows `WorldConfig::minimize_fitness`.
///
/// The world is borrowed immutably so the evaluator can run programs through
/// [`World::run`] but never change the population.
pub trait Evaluator {
    fn evaluate(&self, world: &World, program: &Program) -> Fitness;
}

impl<F> Evaluator for F
where
    F: Fn(&World, &Program) -> Fitness,
{
    fn evaluate(&self, world: &World, program: &Program) -> Fitness {
        self(world, program)
    }
}

/// Collects configuration, operations and callbacks before a world exists
pub struct WorldBuilder {
    config: WorldConfig,
    ops: OperationSet,
    evaluator: Option<Box<dyn Evaluator>>,
    constants: Option<Box<dyn ConstantSource>>,
}

impl WorldBuilder {
    pub fn new() -> Self {
        Self {
            config: WorldConfig::default(),
            ops: OperationSet::new(),
            evaluator: None,
            constants: None,
        }
    }

    pub fn config(mut self, config: WorldConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config_mut(&mut self) -> &mut WorldConfig {
        &mut self.config
    }

    pub fn operation(mut self, op: Operation) -> Self {
        self.ops.add(op);
        self
    }

    pub fn operations(mut self, ops: impl IntoIterator<Item = Operation>) -> Self {
        for op in ops {
            self.ops.add(op);
        }
        self
    }

    pub fn evaluator(mut self, evaluator: impl Evaluator + 'static) -> Self {
        self.evaluator = Some(Box::new(evaluator));
        self
    }

    pub fn constants(mut self, constants: impl ConstantSource + 'static) -> Self {
        self.constants = Some(Box::new(constants));
        self
    }

    /// Validate everything, fill the population with random programs, strip
    /// their introns when `auto_optimize` is set, and evaluate them all.
    ///
    /// Any contract violation is returned as an error and no world is built.
    pub fn initialize(self) -> Result<World> {
        self.config.validate()?;
        self.ops.validate()?;
        let evaluator = self
            .evaluator
            .ok_or_else(|| Error::MissingComponent("evaluator not defined".to_string()))?;
        let constants = self
            .constants
            .ok_or_else(|| Error::MissingComponent("constant source not defined".to_string()))?;

        let config = self.config;
        let ops = self.ops;
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let programs = {
            let generator = ProgramGenerator::new(&ops, &config, constants.as_ref());
            (0..config.population_size)
                .map(|_| generator.random_program(&mut rng))
                .collect()
        };

        let mut world = World {
            programs,
            ops,
            config,
            stats: Statistics::new(),
            rng,
            evaluator,
            constants,
        };

        let introns = if world.config.auto_optimize {
            world.optimize()
        } else {
            0
        };
        world.evaluate_population();
        world.recompute_statistics();

        info!(
            population_size = world.config.population_size,
            num_registers = world.config.num_registers,
            num_inputs = world.config.num_inputs,
            min_program_length = world.config.min_program_length,
            max_program_length = world.config.max_program_length,
            num_operations = world.ops.len(),
            introns_removed = introns,
            best_fitness = world.stats.best_fitness,
            avg_fitness = world.stats.avg_fitness,
            "World initialized"
        );

        Ok(world)
    }
}

impl Default for WorldBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A population of programs evolving under one configuration.
///
/// The world is the only owner of its programs; every step runs to completion
/// before returning.
pub struct World {
    programs: Vec<Program>,
    ops: OperationSet,
    config: WorldConfig,
    stats: Statistics,
    rng: ChaCha8Rng,
    evaluator: Box<dyn Evaluator>,
    constants: Box<dyn ConstantSource>,
}

impl World {
    pub fn builder() -> WorldBuilder {
        WorldBuilder::new()
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn operations(&self) -> &OperationSet {
        &self.ops
    }

    pub fn programs(&self) -> &[Program] {
        &self.programs
    }

    /// Statistics as of the last recompute
    pub fn stats(&self) -> &Statistics {
        &self.stats
    }

    /// Best program as of the last recompute, which leaves the population sorted best-first
    pub fn best(&self) -> &Program {
        &self.programs[0]
    }

    pub fn interpreter(&self) -> Interpreter<'_> {
        Interpreter::from_config(&self.ops, &self.config)
    }

    /// Execute `program` with this world's registers and operations.
    /// The result is conventionally read from register 0.
    pub fn run(&self, program: &Program, inputs: &[Num]) -> RunState {
        self.interpreter().run(program, inputs)
    }

    /// Run `steps` evolve steps, then recompute statistics
    #[instrument(skip(self))]
    pub fn evolve(&mut self, steps: u64) {
        for _ in 0..steps {
            self.evolve_step();
        }
        self.recompute_statistics();
        self.log_batch(steps);
    }

    /// Run evolve steps until `duration` has elapsed, then recompute statistics.
    /// The clock is only checked between steps. Returns the number of steps run.
    #[instrument(skip(self))]
    pub fn evolve_for_duration(&mut self, duration: Duration) -> u64 {
        let start = Instant::now();
        let mut steps = 0;
        while start.elapsed() < duration {
            self.evolve_step();
            steps += 1;
        }
        self.recompute_statistics();
        self.log_batch(steps);
        steps
    }

    /// One steady-state step: sample four programs, breed the best two and
    /// overwrite the worst two with the offspring.
    pub fn evolve_step(&mut self) {
        let picks = sample_tournament(&mut self.rng, self.programs.len());
        let programs = &self.programs;
        let [mom, dad, worst_a, worst_b] = rank_tournament(
            picks,
            |slot| programs[slot].fitness,
            self.config.minimize_fitness,
        );

        if worst_a == worst_b {
            trace!(slot = worst_a, "Same slot drawn twice among the worst, skipping breeding");
        } else {
            let (mut first, mut second) = self.breed(mom, dad);
            debug_assert!(validate_program(&first, &self.ops, &self.config).is_ok());
            debug_assert!(validate_program(&second, &self.ops, &self.config).is_ok());

            let fitness = self.evaluator.evaluate(self, &first);
            first.set_fitness(fitness);
            let fitness = self.evaluator.evaluate(self, &second);
            second.set_fitness(fitness);

            self.programs[worst_a] = first;
            self.programs[worst_b] = second;
        }

        self.stats.total_steps += 1;
        if self.config.auto_optimize
            && self.stats.total_steps % self.config.optimize_interval == 0
        {
            debug!(step = self.stats.total_steps, "Periodic intron removal");
            self.optimize();
        }
    }

    /// Produce two unevaluated offspring from the programs in slots `mom` and `dad`
    fn breed(&mut self, mom: usize, dad: usize) -> (Program, Program) {
        let generator = ProgramGenerator::new(&self.ops, &self.config, self.constants.as_ref());
        let mutator = Mutator::new(generator);
        let rng = &mut self.rng;
        let mom = &self.programs[mom];
        let dad = &self.programs[dad];

        let (mut first, mut second) = if rng.gen::<f32>() < self.config.crossover_rate {
            if rng.gen::<f32>() < self.config.homologous_rate {
                cross_homologous(mom, dad, rng)
            } else {
                (
                    mutator.cross_twopoint(mom, dad, rng),
                    mutator.cross_twopoint(dad, mom, rng),
                )
            }
        } else {
            (mom.clone(), dad.clone())
        };

        if rng.gen::<f32>() < self.config.mutate_rate {
            mutator.mutate(&mut first, rng);
        }
        if rng.gen::<f32>() < self.config.mutate_rate {
            mutator.mutate(&mut second, rng);
        }

        (first, second)
    }

    /// Remove introns from every program. Returns the number of statements removed.
    pub fn optimize(&mut self) -> usize {
        let min_len = self.config.min_program_length;
        let removed: usize = self
            .programs
            .iter_mut()
            .map(|program| remove_introns(program, min_len))
            .sum();
        debug!(introns_removed = removed, "Optimized population");
        removed
    }

    /// Sort the population best-first and recompute every statistic from scratch
    pub fn recompute_statistics(&mut self) {
        let minimize = self.config.minimize_fitness;
        self.programs
            .sort_by(|a, b| compare_fitness(a.fitness, b.fitness, minimize));

        let count = self.programs.len() as f64;
        let total_fitness: Fitness = self.programs.iter().map(|p| p.fitness).sum();
        let total_length: usize = self.programs.iter().map(Program::len).sum();

        self.stats.avg_fitness = total_fitness / count;
        self.stats.best_fitness = self.programs.first().map_or(0.0, |p| p.fitness);
        self.stats.avg_program_length = total_length as f64 / count;
        self.stats.total_generations =
            Statistics::generations(self.stats.total_steps, self.programs.len());
    }

    fn evaluate_population(&mut self) {
        let scores: Vec<Fitness> = self
            .programs
            .iter()
            .map(|program| self.evaluator.evaluate(self, program))
            .collect();
        for (program, fitness) in self.programs.iter_mut().zip(scores) {
            program.set_fitness(fitness);
        }
    }

    fn log_batch(&self, steps: u64) {
        info!(
            steps,
            total_steps = self.stats.total_steps,
            generations = self.stats.total_generations,
            best_fitness = self.stats.best_fitness,
            avg_fitness = self.stats.avg_fitness,
            avg_program_length = self.stats.avg_program_length,
            "Evolve batch complete"
        );
        debug!("Best program:\n{}", self.best().listing(&self.ops));
    }
}

impl fmt::Debug for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("World")
            .field("config", &self.config)
            .field("operations", &self.ops)
            .field("stats", &self.stats)
            .field("population", &self.programs.len())
            .finish_non_exhaustive()
    }
}
