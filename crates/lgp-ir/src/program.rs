//! Program structure.

use crate::operation::OperationSet;
use crate::statement::Statement;
use lgp_core::Fitness;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A straight-line program together with its cached fitness
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub statements: Vec<Statement>,
    pub fitness: Fitness,
    pub evaluated: bool,
}

impl Program {
    pub fn new() -> Self {
        Self::with_statements(Vec::new())
    }

    pub fn with_statements(statements: Vec<Statement>) -> Self {
        Self {
            statements,
            fitness: 0.0,
            evaluated: false,
        }
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Record the evaluator's verdict
    pub fn set_fitness(&mut self, fitness: Fitness) {
        self.fitness = fitness;
        self.evaluated = true;
    }

    /// Mark the cached fitness stale after the statements changed
    pub fn invalidate(&mut self) {
        self.evaluated = false;
    }

    /// Loose equality: same length, and the same operation and output register
    /// at every position. Arguments are not compared.
    pub fn same_shape(&self, other: &Program) -> bool {
        self.len() == other.len()
            && self
                .statements
                .iter()
                .zip(&other.statements)
                .all(|(a, b)| a.op == b.op && a.output == b.output)
    }

    /// Printable form, one statement per line
    pub fn listing<'a>(&'a self, ops: &'a OperationSet) -> Listing<'a> {
        Listing { program: self, ops }
    }
}

impl Default for Program {
    fn default() -> Self {
        Self::new()
    }
}

/// `Display` adapter returned by [`Program::listing`]
pub struct Listing<'a> {
    program: &'a Program,
    ops: &'a OperationSet,
}

impl fmt::Display for Listing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.program.statements {
            write!(f, "r{} = ", stmt.output)?;
            let Some(op) = self.ops.get(stmt.op) else {
                writeln!(f, "<unknown op {}>", stmt.op.0)?;
                continue;
            };
            match (op.infix(), stmt.args()) {
                (Some(symbol), [a, b]) => writeln!(f, "{} {} {}", a, symbol, b)?,
                _ => {
                    write!(f, "{}(", op.name())?;
                    for (i, arg) in stmt.args().iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{}", arg)?;
                    }
                    writeln!(f, ")")?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::OpId;
    use crate::ops;
    use crate::statement::Argument;

    fn sample_ops() -> OperationSet {
        OperationSet::with_operations(vec![ops::add(), ops::neg()])
    }

    #[test]
    fn test_program_basics() {
        let mut program = Program::new();
        assert!(program.is_empty());
        assert!(!program.evaluated);

        program
            .statements
            .push(Statement::unary(0, OpId(1), Argument::Input(0)));
        assert_eq!(program.len(), 1);

        program.set_fitness(2.5);
        assert!(program.evaluated);
        assert_eq!(program.fitness, 2.5);

        program.invalidate();
        assert!(!program.evaluated);
    }

    #[test]
    fn test_same_shape_ignores_arguments() {
        let a = Program::with_statements(vec![Statement::binary(
            0,
            OpId(0),
            Argument::Register(0),
            Argument::Constant(1.0),
        )]);
        let b = Program::with_statements(vec![Statement::binary(
            0,
            OpId(0),
            Argument::Input(0),
            Argument::Register(1),
        )]);
        let c = Program::with_statements(vec![Statement::unary(
            0,
            OpId(1),
            Argument::Register(0),
        )]);

        assert!(a.same_shape(&b));
        assert!(!a.same_shape(&c));
        assert!(!a.same_shape(&Program::new()));
    }

    #[test]
    fn test_listing() {
        let program = Program::with_statements(vec![
            Statement::binary(1, OpId(0), Argument::Register(0), Argument::Constant(2.0)),
            Statement::unary(0, OpId(1), Argument::Input(0)),
        ]);
        let text = program.listing(&sample_ops()).to_string();
        assert_eq!(text, "r1 = r0 + 2\nr0 = neg(i0)\n");
    }
}
