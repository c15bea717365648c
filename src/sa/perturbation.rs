//! Swap candidate generation.

use rand::Rng;

/// Exchange of two interior cells: `(day1, stop1) <-> (day2, stop2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapMove {
    pub day1: usize,
    pub stop1: usize,
    pub day2: usize,
    pub stop2: usize,
}

/// Draws uniform swap candidates over the interior of an
/// `n_days x max_stops_per_day` grid. Anchors are never proposed.
#[derive(Debug, Clone, Copy)]
pub struct SwapProposer {
    n_days: usize,
    max_stops_per_day: usize,
}

impl SwapProposer {
    pub fn new(n_days: usize, max_stops_per_day: usize) -> Self {
        Self {
            n_days,
            max_stops_per_day,
        }
    }

    /// Draws one candidate.
    #[inline]
    pub fn propose<R: Rng + ?Sized>(&self, rng: &mut R) -> SwapMove {
        SwapMove {
            day1: rng.random_range(0..self.n_days),
            stop1: rng.random_range(1..=self.max_stops_per_day),
            day2: rng.random_range(0..self.n_days),
            stop2: rng.random_range(1..=self.max_stops_per_day),
        }
    }

    /// Candidates attempted per temperature step.
    pub fn batch_size(&self) -> usize {
        self.n_days * self.max_stops_per_day
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_candidates_stay_interior() {
        let proposer = SwapProposer::new(3, 4);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..10_000 {
            let mv = proposer.propose(&mut rng);
            assert!(mv.day1 < 3 && mv.day2 < 3);
            assert!((1..=4).contains(&mv.stop1));
            assert!((1..=4).contains(&mv.stop2));
        }
    }

    #[test]
    fn test_every_interior_cell_reachable() {
        let proposer = SwapProposer::new(2, 3);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut hit = [[false; 4]; 2];
        for _ in 0..2_000 {
            let mv = proposer.propose(&mut rng);
            hit[mv.day1][mv.stop1] = true;
            hit[mv.day2][mv.stop2] = true;
        }
        for day in hit {
            assert!(!day[0]);
            assert!(day[1..].iter().all(|&h| h));
        }
    }

    #[test]
    fn test_batch_size() {
        assert_eq!(SwapProposer::new(4, 5).batch_size(), 20);
    }
}
