//! Register-machine interpreter.

use crate::operation::OperationSet;
use crate::program::Program;
use crate::statement::Argument;
use lgp_core::{Num, WorldConfig, MAX_ARITY, MAX_REGISTERS, OUTPUT_REGISTER};

/// Register file and instruction pointer after a run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunState {
    pub registers: [Num; MAX_REGISTERS],
    /// Number of statements executed
    pub ip: usize,
}

impl RunState {
    fn new() -> Self {
        Self {
            registers: [0.0; MAX_REGISTERS],
            ip: 0,
        }
    }

    /// Value of the output register
    pub fn output(&self) -> Num {
        self.registers[OUTPUT_REGISTER]
    }
}

/// Executes programs against an operation registry.
///
/// Execution is linear: exactly one operation call per statement, no jumps,
/// and the same program and inputs always give the same register state.
#[derive(Debug, Clone, Copy)]
pub struct Interpreter<'a> {
    ops: &'a OperationSet,
    num_registers: usize,
    num_inputs: usize,
}

impl<'a> Interpreter<'a> {
    pub fn new(ops: &'a OperationSet, num_registers: usize, num_inputs: usize) -> Self {
        debug_assert!(num_registers <= MAX_REGISTERS);
        Self {
            ops,
            num_registers,
            num_inputs,
        }
    }

    pub fn from_config(ops: &'a OperationSet, config: &WorldConfig) -> Self {
        Self::new(ops, config.num_registers, config.num_inputs)
    }

    /// Run `program` from zeroed registers.
    ///
    /// # Panics
    /// If `inputs` is shorter than the configured number of inputs.
    pub fn run(&self, program: &Program, inputs: &[Num]) -> RunState {
        assert!(
            inputs.len() >= self.num_inputs,
            "program expects {} inputs, got {}",
            self.num_inputs,
            inputs.len()
        );

        let mut state = RunState::new();
        let mut values = [0.0; MAX_ARITY];

        for stmt in &program.statements {
            let op = &self.ops[stmt.op];
            let args = stmt.args();
            for (value, arg) in values.iter_mut().zip(args) {
                *value = match *arg {
                    Argument::Register(reg) => state.registers[reg],
                    Argument::Constant(num) => num,
                    Argument::Input(idx) => inputs[idx],
                };
            }
            let out = op.eval(&state.registers[..self.num_registers], &values[..args.len()]);
            state.registers[stmt.output] = out;
            state.ip += 1;
        }

        state
    }

    /// Run `program` and read the output register
    pub fn output(&self, program: &Program, inputs: &[Num]) -> Num {
        self.run(program, inputs).output()
    }
}
