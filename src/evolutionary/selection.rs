//! Parent selection.
//!
//! All strategies assume **minimisation** (lower fitness = better) and read
//! fitness straight from the population, which is kept sorted best first.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Baker (1985), "Adaptive Selection Methods for Genetic Algorithms"

use crate::fitness::Penalty;
use crate::management::{Population, PopulationError};
use rand::{Rng, RngCore};

/// Selection strategy for choosing parents.
///
/// # Examples
///
/// ```
/// use u_popopt::evolutionary::Selection;
///
/// // Tournament with size 3 (moderate selection pressure)
/// let sel = Selection::Tournament(3);
///
/// // Roulette wheel (fitness-proportionate)
/// let sel = Selection::Roulette;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Pick `k` members at random (with replacement), keep the best.
    ///
    /// - k=2: light pressure
    /// - k=3-5: moderate pressure (typical default)
    /// - k>5: strong pressure
    Tournament(usize),

    /// Fitness-proportionate selection on inverted fitness.
    ///
    /// **Warning**: a single very good member can dominate when the
    /// fitness spread is large.
    Roulette,

    /// Linear ranking: the member at rank `i` (0 = best) has weight `n - i`.
    Rank,

    /// Every member equally likely.
    Uniform,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament(3)
    }
}

impl Selection {
    /// Index of the selected member.
    ///
    /// # Errors
    /// [`PopulationError::Empty`] if there is nothing to select from.
    pub fn select(
        &self,
        population: &Population,
        rng: &mut dyn RngCore,
    ) -> Result<usize, PopulationError> {
        if population.is_empty() {
            return Err(PopulationError::Empty);
        }
        let fitnesses = population.fitnesses();
        Ok(match self {
            Selection::Tournament(k) => tournament(&fitnesses, *k, rng),
            Selection::Roulette => roulette(&fitnesses, rng),
            Selection::Rank => rank(fitnesses.len(), rng),
            Selection::Uniform => rng.random_range(0..fitnesses.len()),
        })
    }
}

fn tournament(fitnesses: &[f64], k: usize, rng: &mut dyn RngCore) -> usize {
    let k = k.max(1);
    let n = fitnesses.len();

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        if fitnesses[idx] < fitnesses[best_idx] {
            best_idx = idx;
        }
    }
    best_idx
}

/// weight_i = max_fitness - fitness_i + epsilon, with penalised members
/// left out of `max_fitness`.
fn roulette(fitnesses: &[f64], rng: &mut dyn RngCore) -> usize {
    let n = fitnesses.len();
    if n == 1 {
        return 0;
    }

    let max_fitness = fitnesses
        .iter()
        .copied()
        .filter(|&f| f < Penalty::DEATH)
        .fold(f64::NEG_INFINITY, f64::max);
    let epsilon = 1e-10;

    let weights: Vec<f64> = fitnesses
        .iter()
        .map(|&f| {
            let w = max_fitness - f + epsilon;
            if w.is_finite() && w > 0.0 {
                w
            } else {
                epsilon
            }
        })
        .collect();

    let total: f64 = weights.iter().sum();
    if !(total.is_finite() && total > 0.0) {
        return rng.random_range(0..n);
    }

    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w;
        if cumulative > threshold {
            return i;
        }
    }

    n - 1 // floating-point fallback
}

/// The population is sorted, so position is rank.
fn rank(n: usize, rng: &mut dyn RngCore) -> usize {
    if n == 1 {
        return 0;
    }

    let total = (n * (n + 1)) as f64 / 2.0;
    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for i in 0..n {
        cumulative += (n - i) as f64;
        if cumulative > threshold {
            return i;
        }
    }
    n - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::management::Individual;
    use crate::variables::{DecisionSpace, DecisionVector};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Population sorted by fitness; index 0 is the best.
    fn make_population(fitnesses: &[f64]) -> Population {
        let space = DecisionSpace::uniform_continuous(1, -1000.0, 1000.0).unwrap();
        let mut pop = Population::new(fitnesses.len(), true);
        for (i, &f) in fitnesses.iter().enumerate() {
            let dv = DecisionVector::from_continuous(&space, &[i as f64]).unwrap();
            let mut ind = Individual::new(dv);
            ind.send_for_evaluation().unwrap();
            ind.set_fitness_penalty(f).unwrap();
            pop.add_individual(ind).unwrap();
        }
        pop
    }

    fn counts(sel: Selection, pop: &Population) -> Vec<u32> {
        let mut rng = StdRng::seed_from_u64(42);
        let mut counts = vec![0u32; pop.len()];
        for _ in 0..10_000 {
            counts[sel.select(pop, &mut rng).unwrap()] += 1;
        }
        counts
    }

    #[test]
    fn test_tournament_favors_best() {
        let pop = make_population(&[10.0, 5.0, 1.0, 8.0]);
        let c = counts(Selection::Tournament(4), &pop);
        assert!(c[0] > 6000, "expected best >60% of the time, got {c:?}");
    }

    #[test]
    fn test_tournament_size_1_is_random() {
        let pop = make_population(&[10.0, 5.0, 1.0, 8.0]);
        for &c in &counts(Selection::Tournament(1), &pop) {
            assert!(c > 1500, "expected uniform, got {c}");
        }
    }

    #[test]
    fn test_roulette_favors_best() {
        let pop = make_population(&[100.0, 50.0, 1.0, 80.0]);
        let c = counts(Selection::Roulette, &pop);
        assert!(c[0] > c[3], "best should beat worst: {c:?}");
    }

    #[test]
    fn test_rank_favors_best() {
        let pop = make_population(&[100.0, 50.0, 1.0, 80.0]);
        let c = counts(Selection::Rank, &pop);
        assert!(c[0] > c[1] && c[1] > c[3], "expected descending counts: {c:?}");
    }

    #[test]
    fn test_roulette_ignores_penalised_members() {
        let pop = make_population(&[1.0, 2.0, f64::MAX]);
        let c = counts(Selection::Roulette, &pop);
        assert!(c[2] < 10, "penalised member picked {} times", c[2]);
    }

    #[test]
    fn test_single_individual() {
        let pop = make_population(&[5.0]);
        let mut rng = StdRng::seed_from_u64(42);
        for sel in [
            Selection::Tournament(3),
            Selection::Roulette,
            Selection::Rank,
            Selection::Uniform,
        ] {
            assert_eq!(sel.select(&pop, &mut rng).unwrap(), 0);
        }
    }

    #[test]
    fn test_empty_population_is_error() {
        let pop = Population::new(4, true);
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(
            Selection::Tournament(3).select(&pop, &mut rng),
            Err(PopulationError::Empty)
        );
    }
}
