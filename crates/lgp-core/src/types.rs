//! Scalar types and hard limits shared by every layer.

/// Value held in registers, inputs and constants
pub type Num = f64;

/// Scalar produced by an evaluator
pub type Fitness = f64;

/// Size of the register file every run state carries.
/// `WorldConfig::num_registers` may use any prefix of it.
pub const MAX_REGISTERS: usize = 16;

/// Widest operation the registry accepts. Statement argument arrays are sized to this.
pub const MAX_ARITY: usize = 2;

/// Shortest program length a world may be configured with.
/// Crossover cut points need at least three statements to stay non-degenerate.
pub const MIN_PROGRAM_LENGTH_FLOOR: usize = 3;

/// Register read as the program result after a run
pub const OUTPUT_REGISTER: usize = 0;
