//! Intron removal.
//!
//! A single backward liveness pass over the statements. Register 0 is the only
//! register observed after a run, so it starts live; a statement survives when
//! it writes a live register, and then its own register reads become live.

use crate::program::Program;
use lgp_core::{MAX_REGISTERS, OUTPUT_REGISTER};

/// Drop statements that cannot affect the output register, keeping at least
/// `min_program_length` statements. Returns how many statements were removed.
///
/// When the floor forces extra statements to stay, the latest introns are the
/// ones kept. An intron only writes a register that is dead at that point, so
/// keeping it never changes the output.
pub fn remove_introns(program: &mut Program, min_program_length: usize) -> usize {
    let len = program.len();
    let mut live = [false; MAX_REGISTERS];
    let mut marked = vec![false; len];
    live[OUTPUT_REGISTER] = true;

    for (idx, stmt) in program.statements.iter().enumerate().rev() {
        if !live[stmt.output] {
            continue;
        }
        marked[idx] = true;
        live[stmt.output] = false;
        for reg in stmt.register_reads() {
            live[reg] = true;
        }
    }

    let mut kept = 0;
    for idx in 0..len {
        // remaining statements, this one included, just cover the missing floor
        let forced = len - idx + kept <= min_program_length;
        if marked[idx] || forced {
            program.statements[kept] = program.statements[idx];
            kept += 1;
        }
    }
    program.statements.truncate(kept);

    len - kept
}
