//! Genetic operators: mutation, two-point crossover and homologous crossover.

use crate::generator::ProgramGenerator;
use crate::program::Program;
use rand::Rng;

/// Applies the length-changing operators of one world.
///
/// Every program it returns has a length within the configured
/// `[min_program_length, max_program_length]`, given parents that do.
#[derive(Clone, Copy)]
pub struct Mutator<'a> {
    generator: ProgramGenerator<'a>,
}

impl<'a> Mutator<'a> {
    pub fn new(generator: ProgramGenerator<'a>) -> Self {
        Self { generator }
    }

    /// Replace one uniformly chosen statement with a fresh random one.
    /// The length never changes.
    pub fn mutate<R: Rng>(&self, program: &mut Program, rng: &mut R) {
        if program.is_empty() {
            return;
        }
        let idx = rng.gen_range(0..program.len());
        program.statements[idx] = self.generator.random_statement(rng);
        program.invalidate();
    }

    /// Two-point crossover producing one child:
    /// `mom[..mom_cp1] ++ dad[dad_cp1..dad_cp2] ++ mom[mom_cp2..]`.
    ///
    /// A child that would be too long is shrunk one statement at a time by
    /// narrowing the dad segment from its end, then moving the mom tail boundary
    /// right, then moving the mom head boundary left. A child that would be too
    /// short widens the dad segment, end first.
    pub fn cross_twopoint<R: Rng>(&self, mom: &Program, dad: &Program, rng: &mut R) -> Program {
        let config = self.generator.config();
        let max_len = config.max_program_length;
        let min_len = config.min_program_length;

        let (mut mom_cp1, mut mom_cp2) = cut_points(mom.len(), rng);
        let (mut dad_cp1, mut dad_cp2) = cut_points(dad.len(), rng);

        let mut len = mom_cp1 + (dad_cp2 - dad_cp1) + (mom.len() - mom_cp2);

        while len > max_len && dad_cp2 > dad_cp1 + 1 {
            dad_cp2 -= 1;
            len -= 1;
        }
        while len > max_len && mom_cp2 + 1 < mom.len() {
            mom_cp2 += 1;
            len -= 1;
        }
        while len > max_len && mom_cp1 > 1 {
            mom_cp1 -= 1;
            len -= 1;
        }

        while len < min_len && dad_cp2 < dad.len() {
            dad_cp2 += 1;
            len += 1;
        }
        while len < min_len && dad_cp1 > 0 {
            dad_cp1 -= 1;
            len += 1;
        }

        let mut statements = Vec::with_capacity(len);
        statements.extend_from_slice(&mom.statements[..mom_cp1]);
        statements.extend_from_slice(&dad.statements[dad_cp1..dad_cp2]);
        statements.extend_from_slice(&mom.statements[mom_cp2..]);
        debug_assert_eq!(statements.len(), len);

        Program::with_statements(statements)
    }
}

/// Two sorted cut points, each uniform in `[1, len - 1]`
fn cut_points<R: Rng>(len: usize, rng: &mut R) -> (usize, usize) {
    if len < 2 {
        return (len, len);
    }
    let a = rng.gen_range(1..len);
    let b = rng.gen_range(1..len);
    (a.min(b), a.max(b))
}

/// Homologous crossover: swap an aligned middle segment between the parents.
///
/// With `max_cut = min(len(mom), len(dad))`, draws `cp1` in `[1, max_cut - 1]`
/// and `cp2` in `[cp1, max_cut]`. The first child has mom's length and the
/// second dad's. Parents shorter than two statements are returned unchanged.
pub fn cross_homologous<R: Rng>(
    mom: &Program,
    dad: &Program,
    rng: &mut R,
) -> (Program, Program) {
    let max_cut = mom.len().min(dad.len());
    if max_cut < 2 {
        return (
            Program::with_statements(mom.statements.clone()),
            Program::with_statements(dad.statements.clone()),
        );
    }

    let cp1 = rng.gen_range(1..max_cut);
    let cp2 = rng.gen_range(cp1..=max_cut);

    let mut first = mom.statements.clone();
    let mut second = dad.statements.clone();
    first[cp1..cp2].copy_from_slice(&dad.statements[cp1..cp2]);
    second[cp1..cp2].copy_from_slice(&mom.statements[cp1..cp2]);

    (
        Program::with_statements(first),
        Program::with_statements(second),
    )
}
