//! Tournament selection over four sampled slots.

use lgp_core::{compare_fitness, Fitness};
use rand::Rng;

/// Number of slots sampled per step: the best two breed, the worst two are replaced
pub const TOURNAMENT_SIZE: usize = 4;

/// Sample population slots uniformly, with replacement
pub fn sample_tournament<R: Rng + ?Sized>(
    rng: &mut R,
    population_size: usize,
) -> [usize; TOURNAMENT_SIZE] {
    let mut picks = [0; TOURNAMENT_SIZE];
    for pick in picks.iter_mut() {
        *pick = rng.gen_range(0..population_size);
    }
    picks
}

/// Order sampled slots best-first.
///
/// The sort is stable, so slots with equal fitness keep their sample order.
pub fn rank_tournament<F>(
    picks: [usize; TOURNAMENT_SIZE],
    fitness: F,
    minimize: bool,
) -> [usize; TOURNAMENT_SIZE]
where
    F: Fn(usize) -> Fitness,
{
    let mut ranked = picks;
    ranked.sort_by(|&a, &b| compare_fitness(fitness(a), fitness(b), minimize));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const FITNESS: [f64; 6] = [5.0, 1.0, 3.0, 3.0, 9.0, 0.5];

    #[test]
    fn test_rank_maximizing() {
        let ranked = rank_tournament([0, 1, 4, 5], |i| FITNESS[i], false);
        assert_eq!(ranked, [4, 0, 1, 5]);
    }

    #[test]
    fn test_rank_minimizing() {
        let ranked = rank_tournament([0, 1, 4, 5], |i| FITNESS[i], true);
        assert_eq!(ranked, [5, 1, 0, 4]);
    }

    #[test]
    fn test_ties_keep_sample_order() {
        let ranked = rank_tournament([3, 2, 0, 3], |i| FITNESS[i], false);
        assert_eq!(ranked, [0, 3, 2, 3]);

        let ranked = rank_tournament([2, 3, 2, 1], |i| FITNESS[i], true);
        assert_eq!(ranked, [1, 2, 3, 2]);
    }

    #[test]
    fn test_nan_ranked_last() {
        let fitness = [f64::NAN, 2.0, -f64::NAN, 7.0];
        for minimize in [true, false] {
            let ranked = rank_tournament([0, 1, 2, 3], |i| fitness[i], minimize);
            assert!(fitness[ranked[0]].is_finite());
            assert!(fitness[ranked[1]].is_finite());
            assert_eq!(&ranked[2..], &[0, 2]);
        }
    }

    #[test]
    fn test_sample_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        for _ in 0..1000 {
            let picks = sample_tournament(&mut rng, 6);
            assert!(picks.iter().all(|&p| p < 6));
        }
    }
}
