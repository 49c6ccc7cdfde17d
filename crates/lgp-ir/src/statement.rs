//! Statements: one register assignment each.

use crate::operation::OpId;
use lgp_core::{Error, Num, MAX_ARITY};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Source of an operation argument
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Argument {
    /// Current value of a register
    Register(usize),
    /// Value fixed when the statement was created
    Constant(Num),
    /// Element of the caller-supplied input vector
    Input(usize),
}

impl Argument {
    /// Register index when this argument reads a register
    pub fn register(&self) -> Option<usize> {
        match self {
            Argument::Register(reg) => Some(*reg),
            _ => None,
        }
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Register(reg) => write!(f, "r{}", reg),
            Argument::Constant(value) => write!(f, "{}", value),
            Argument::Input(idx) => write!(f, "i{}", idx),
        }
    }
}

/// `registers[output] = op(args...)`
///
/// Arguments live inline in an array sized for the widest operation; only the
/// first `arity` entries are meaningful. Serialized with only those entries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StatementRepr", into = "StatementRepr")]
pub struct Statement {
    pub output: usize,
    pub op: OpId,
    args: [Argument; MAX_ARITY],
    arity: u8,
}

impl Statement {
    /// # Panics
    /// If more than `MAX_ARITY` arguments are given.
    pub fn new(output: usize, op: OpId, args: &[Argument]) -> Self {
        assert!(
            args.len() <= MAX_ARITY,
            "statement takes at most {} arguments, got {}",
            MAX_ARITY,
            args.len()
        );
        let mut slots = [Argument::Register(0); MAX_ARITY];
        slots[..args.len()].copy_from_slice(args);
        Self {
            output,
            op,
            args: slots,
            arity: args.len() as u8,
        }
    }

    pub fn unary(output: usize, op: OpId, a: Argument) -> Self {
        Self::new(output, op, &[a])
    }

    pub fn binary(output: usize, op: OpId, a: Argument, b: Argument) -> Self {
        Self::new(output, op, &[a, b])
    }

    pub fn args(&self) -> &[Argument] {
        &self.args[..self.arity as usize]
    }

    pub fn arity(&self) -> usize {
        self.arity as usize
    }

    /// Registers read by this statement
    pub fn register_reads(&self) -> impl Iterator<Item = usize> + '_ {
        self.args().iter().filter_map(Argument::register)
    }
}

#[derive(Serialize, Deserialize)]
struct StatementRepr {
    output: usize,
    op: OpId,
    args: Vec<Argument>,
}

impl TryFrom<StatementRepr> for Statement {
    type Error = Error;

    fn try_from(repr: StatementRepr) -> Result<Self, Self::Error> {
        if repr.args.len() > MAX_ARITY {
            return Err(Error::InvalidProgram(format!(
                "statement takes at most {} arguments, got {}",
                MAX_ARITY,
                repr.args.len()
            )));
        }
        Ok(Statement::new(repr.output, repr.op, &repr.args))
    }
}

impl From<Statement> for StatementRepr {
    fn from(stmt: Statement) -> Self {
        Self {
            output: stmt.output,
            op: stmt.op,
            args: stmt.args().to_vec(),
        }
    }
}
