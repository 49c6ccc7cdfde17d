//! Structural validation for programs.

use crate::operation::OperationSet;
use crate::program::Program;
use crate::statement::{Argument, Statement};
use lgp_core::{Error, Result, WorldConfig};

/// Check that a program can run in a world: length within bounds, every
/// operation registered with a matching argument count, and every register
/// and input index in range.
pub fn validate_program(program: &Program, ops: &OperationSet, config: &WorldConfig) -> Result<()> {
    if program.len() < config.min_program_length || program.len() > config.max_program_length {
        return Err(Error::InvalidProgram(format!(
            "length {} outside [{}, {}]",
            program.len(),
            config.min_program_length,
            config.max_program_length
        )));
    }

    for (idx, stmt) in program.statements.iter().enumerate() {
        validate_statement(stmt, idx, ops, config)?;
    }

    Ok(())
}

fn validate_statement(
    stmt: &Statement,
    idx: usize,
    ops: &OperationSet,
    config: &WorldConfig,
) -> Result<()> {
    let op = ops.get(stmt.op).ok_or_else(|| {
        Error::InvalidProgram(format!("statement {} uses unknown operation {}", idx, stmt.op.0))
    })?;

    if stmt.arity() != op.arity() {
        return Err(Error::InvalidProgram(format!(
            "statement {} passes {} arguments to '{}' which takes {}",
            idx,
            stmt.arity(),
            op.name(),
            op.arity()
        )));
    }

    if stmt.output >= config.num_registers {
        return Err(Error::InvalidProgram(format!(
            "statement {} writes register {} of {}",
            idx, stmt.output, config.num_registers
        )));
    }

    for arg in stmt.args() {
        match *arg {
            Argument::Register(reg) if reg >= config.num_registers => {
                return Err(Error::InvalidProgram(format!(
                    "statement {} reads register {} of {}",
                    idx, reg, config.num_registers
                )));
            }
            Argument::Input(input) if input >= config.num_inputs => {
                return Err(Error::InvalidProgram(format!(
                    "statement {} reads input {} of {}",
                    idx, input, config.num_inputs
                )));
            }
            _ => {}
        }
    }

    Ok(())
}
