//! Random statement and program construction.

use crate::operation::OperationSet;
use crate::program::Program;
use crate::statement::{Argument, Statement};
use lgp_core::{Num, WorldConfig, MAX_ARITY};
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

/// Supplies the value of each freshly drawn constant argument.
///
/// The world's random source is passed in so seeded runs stay reproducible.
pub trait ConstantSource {
    fn constant(&self, rng: &mut dyn RngCore) -> Num;
}

impl<F> ConstantSource for F
where
    F: Fn(&mut dyn RngCore) -> Num,
{
    fn constant(&self, rng: &mut dyn RngCore) -> Num {
        self(rng)
    }
}

/// Constants drawn uniformly from `[low, high)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformConstants {
    pub low: Num,
    pub high: Num,
}

impl UniformConstants {
    pub fn new(low: Num, high: Num) -> Self {
        Self { low, high }
    }
}

impl ConstantSource for UniformConstants {
    fn constant(&self, rng: &mut dyn RngCore) -> Num {
        self.low + rng.gen::<Num>() * (self.high - self.low)
    }
}

/// Constants picked uniformly from a fixed list. An empty pool yields 0.0.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantPool(pub Vec<Num>);

impl ConstantSource for ConstantPool {
    fn constant(&self, rng: &mut dyn RngCore) -> Num {
        self.0.choose(rng).copied().unwrap_or(0.0)
    }
}

/// Draws random statements and programs for one world configuration
#[derive(Clone, Copy)]
pub struct ProgramGenerator<'a> {
    ops: &'a OperationSet,
    config: &'a WorldConfig,
    constants: &'a dyn ConstantSource,
}

impl<'a> ProgramGenerator<'a> {
    pub fn new(
        ops: &'a OperationSet,
        config: &'a WorldConfig,
        constants: &'a dyn ConstantSource,
    ) -> Self {
        Self {
            ops,
            config,
            constants,
        }
    }

    pub fn config(&self) -> &'a WorldConfig {
        self.config
    }

    pub fn operations(&self) -> &'a OperationSet {
        self.ops
    }

    /// Uniform output register, uniform operation, and for each argument a
    /// uniform choice among register, constant and input. Inputs are left
    /// out of the choice when the world has none.
    pub fn random_statement<R: Rng>(&self, rng: &mut R) -> Statement {
        let output = rng.gen_range(0..self.config.num_registers);
        let op = self.ops.random(rng);
        let arity = self.ops[op].arity();
        let kinds = if self.config.num_inputs == 0 { 2 } else { 3 };

        let mut args = [Argument::Register(0); MAX_ARITY];
        for arg in args.iter_mut().take(arity) {
            *arg = match rng.gen_range(0..kinds) {
                0 => Argument::Register(rng.gen_range(0..self.config.num_registers)),
                1 => Argument::Constant(self.constants.constant(rng)),
                _ => Argument::Input(rng.gen_range(0..self.config.num_inputs)),
            };
        }

        Statement::new(output, op, &args[..arity])
    }

    /// A program with a length uniform in `[min_program_length, max_program_length]`
    pub fn random_program<R: Rng>(&self, rng: &mut R) -> Program {
        let len = rng.gen_range(self.config.min_program_length..=self.config.max_program_length);
        let statements = (0..len).map(|_| self.random_statement(rng)).collect();
        Program::with_statements(statements)
    }
}
