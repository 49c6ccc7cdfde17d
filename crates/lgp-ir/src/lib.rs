//! Program representation and the machinery that acts on it.
//!
//! Programs are straight-line sequences of register assignments. This crate holds:
//! - The operation registry and a library of built-in operations
//! - Statements, programs and the register-machine interpreter
//! - Random program construction and the genetic operators
//! - Intron removal and structural validation

pub mod operation;
pub mod ops;
pub mod statement;
pub mod program;
pub mod interpreter;
pub mod generator;
pub mod mutation;
pub mod optimize;
pub mod validation;

pub use operation::{OpId, Operation, OperationSet};
pub use statement::{Argument, Statement};
pub use program::{Listing, Program};
pub use interpreter::{Interpreter, RunState};
pub use generator::{ConstantPool, ConstantSource, ProgramGenerator, UniformConstants};
pub use mutation::{cross_homologous, Mutator};
pub use optimize::remove_introns;
pub use validation::validate_program;
