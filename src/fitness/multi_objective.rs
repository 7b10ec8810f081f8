//! Multi-objective fitness.
//!
//! Pareto dominance utilities plus [`MultiObjectiveFitness`], which reduces
//! an objective vector to a scalar: the number of individuals that dominate
//! it. Non-dominated individuals therefore get fitness 0.
//!
//! # Algorithms
//!
//! - [`dominates`]: Pareto dominance with per-objective direction
//! - [`non_dominated_sort`]: Fast non-dominated sorting (Deb et al., 2002)
//! - [`crowding_distance`]: Crowding distance assignment for diversity preservation
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II"
//! - IEEE Transactions on Evolutionary Computation, 6(2), 182-197

use super::{apply_penalty, FitnessCalculator, Penalty};
use crate::management::{Individual, IndividualError, Population};

/// Extension property holding an individual's crowding distance within its
/// Pareto rank.
pub const CROWDING_DISTANCE: &str = "crowding_distance";

/// Extension property holding an individual's domination count.
pub const DOMINATED_BY: &str = "dominated_by";

/// Result of non-dominated sorting.
///
/// Each element of `ranks` corresponds to the Pareto rank of the solution
/// at the same index. Rank 0 is the Pareto front (non-dominated solutions).
#[derive(Debug, Clone, Default)]
pub struct NondominatedSortResult {
    /// Pareto rank for each solution (0 = front).
    pub ranks: Vec<usize>,

    /// Indices grouped by front: `fronts[0]` contains rank-0 indices, etc.
    pub fronts: Vec<Vec<usize>>,
}

/// Whether `a` Pareto-dominates `b`.
///
/// `a` dominates `b` when it is no worse in every objective and strictly
/// better in at least one. `minimise[i]` gives the direction of objective
/// `i`; objectives beyond its length are minimised.
///
/// ```
/// use u_popopt::fitness::multi_objective::dominates;
///
/// assert!(dominates(&[1.0, 1.0], &[2.0, 1.0], &[true, true]));
/// assert!(!dominates(&[1.0, 3.0], &[2.0, 1.0], &[true, true]));
/// assert!(dominates(&[1.0, 3.0], &[2.0, 1.0], &[true, false]));
/// ```
pub fn dominates(a: &[f64], b: &[f64], minimise: &[bool]) -> bool {
    let mut better_in_some = false;
    for (i, (&va, &vb)) in a.iter().zip(b).enumerate() {
        let (va, vb) = if minimise.get(i).copied().unwrap_or(true) {
            (va, vb)
        } else {
            (-va, -vb)
        };
        if va > vb {
            return false;
        }
        if va < vb {
            better_in_some = true;
        }
    }
    better_in_some
}

/// Fast non-dominated sorting.
///
/// Assigns a Pareto rank to each solution based on dominance relationships.
/// All objectives are **minimized**: lower values are better.
///
/// # Algorithm (Deb et al., 2002)
///
/// 1. For each pair of solutions, determine dominance
/// 2. Solutions dominated by no other belong to front 0 (rank 0)
/// 3. Remove front 0, repeat to find subsequent fronts
///
/// # Complexity
///
/// O(m * n²) where m = number of objectives, n = number of solutions
///
/// # Example
///
/// ```
/// use u_popopt::fitness::multi_objective::non_dominated_sort;
///
/// let objectives = vec![
///     vec![1.0, 5.0],  // Solution A
///     vec![3.0, 3.0],  // Solution B
///     vec![5.0, 1.0],  // Solution C
///     vec![4.0, 4.0],  // Solution D, dominated by B
/// ];
///
/// let result = non_dominated_sort(&objectives);
///
/// assert_eq!(result.ranks, vec![0, 0, 0, 1]);
/// ```
pub fn non_dominated_sort(objectives: &[Vec<f64>]) -> NondominatedSortResult {
    let n = objectives.len();
    if n == 0 {
        return NondominatedSortResult::default();
    }

    let mut domination_count = vec![0usize; n];
    let mut dominated_by: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut ranks = vec![0usize; n];

    for i in 0..n {
        for j in (i + 1)..n {
            if dominates(&objectives[i], &objectives[j], &[]) {
                dominated_by[i].push(j);
                domination_count[j] += 1;
            } else if dominates(&objectives[j], &objectives[i], &[]) {
                dominated_by[j].push(i);
                domination_count[i] += 1;
            }
        }
    }

    let mut current: Vec<usize> = (0..n).filter(|&i| domination_count[i] == 0).collect();
    let mut fronts = Vec::new();
    while !current.is_empty() {
        let mut next_front = Vec::new();
        for &i in &current {
            for &j in &dominated_by[i] {
                domination_count[j] -= 1;
                if domination_count[j] == 0 {
                    ranks[j] = fronts.len() + 1;
                    next_front.push(j);
                }
            }
        }
        fronts.push(current);
        current = next_front;
    }

    NondominatedSortResult { ranks, fronts }
}

/// Crowding distance assignment for diversity preservation.
///
/// Computes the crowding distance for each solution, measuring how
/// spread out the solutions are in objective space. Higher distance
/// means the solution is more isolated (more diverse).
///
/// Boundary solutions (min/max for any objective) receive `f64::INFINITY`.
///
/// # Complexity
///
/// O(m * n * log n) where m = number of objectives, n = number of solutions
///
/// ```
/// use u_popopt::fitness::multi_objective::crowding_distance;
///
/// let distances = crowding_distance(&[vec![1.0, 5.0], vec![3.0, 3.0], vec![5.0, 1.0]]);
/// assert!(distances[0].is_infinite());
/// assert!(distances[1].is_finite());
/// ```
pub fn crowding_distance(objectives: &[Vec<f64>]) -> Vec<f64> {
    let n = objectives.len();
    if n <= 2 {
        return vec![f64::INFINITY; n];
    }

    let m = objectives[0].len();
    let mut distances = vec![0.0f64; n];

    #[allow(clippy::needless_range_loop)] // obj_idx is a column index into 2D data
    for obj_idx in 0..m {
        let mut indices: Vec<usize> = (0..n).collect();
        indices.sort_by(|&a, &b| objectives[a][obj_idx].total_cmp(&objectives[b][obj_idx]));

        distances[indices[0]] = f64::INFINITY;
        distances[indices[n - 1]] = f64::INFINITY;

        let min_val = objectives[indices[0]][obj_idx];
        let max_val = objectives[indices[n - 1]][obj_idx];
        let range = max_val - min_val;

        if range > 0.0 {
            for i in 1..(n - 1) {
                let prev = objectives[indices[i - 1]][obj_idx];
                let next = objectives[indices[i + 1]][obj_idx];
                distances[indices[i]] += (next - prev) / range;
            }
        }
    }

    distances
}

/// Pareto-count fitness over the solution vector.
///
/// Each legal individual's fitness is the number of individuals (the new
/// batch plus the current population) whose solutions dominate its own. Its
/// crowding distance among the batch members of the same rank is stored
/// under [`CROWDING_DISTANCE`]. Illegal individuals get [`Penalty::DEATH`].
#[derive(Debug, Clone, Default)]
pub struct MultiObjectiveFitness {
    minimise: Vec<bool>,
}

impl MultiObjectiveFitness {
    /// `minimise[i]` is `true` when objective `i` is minimised.
    pub fn new(minimise: Vec<bool>) -> Self {
        Self { minimise }
    }

    /// Minimise every one of `n` objectives.
    pub fn minimising(n: usize) -> Self {
        Self::new(vec![true; n])
    }

    pub fn minimise(&self) -> &[bool] {
        &self.minimise
    }

    /// Flips maximised objectives so everything can be minimised.
    fn oriented(&self, solution: &[f64]) -> Vec<f64> {
        solution
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                if self.minimise.get(i).copied().unwrap_or(true) {
                    v
                } else {
                    -v
                }
            })
            .collect()
    }
}

impl FitnessCalculator for MultiObjectiveFitness {
    fn calculate_and_assign_fitness(
        &self,
        individuals: &mut [Individual],
        population: &Population,
    ) -> Result<(), IndividualError> {
        let death = Penalty::death_fn();

        let mut legal = Vec::new();
        let mut objectives = Vec::new();
        for (idx, ind) in individuals.iter_mut().enumerate() {
            if !ind.is_legal() {
                apply_penalty(ind, &death)?;
                continue;
            }
            ind.set_score(|sol| self.oriented(sol))?;
            objectives.push(ind.score()?.to_vec());
            legal.push(idx);
        }

        let others: Vec<Vec<f64>> = population
            .iter()
            .filter(|m| m.is_legal())
            .filter_map(|m| m.score().ok().map(<[f64]>::to_vec))
            .collect();

        let ranks = non_dominated_sort(&objectives);
        for front in &ranks.fronts {
            let front_objs: Vec<Vec<f64>> = front.iter().map(|&k| objectives[k].clone()).collect();
            let distances = crowding_distance(&front_objs);
            for (&k, d) in front.iter().zip(distances) {
                individuals[legal[k]].set_property(CROWDING_DISTANCE, d);
            }
        }

        for (k, &idx) in legal.iter().enumerate() {
            let mine = &objectives[k];
            let count = objectives
                .iter()
                .chain(&others)
                .filter(|other| dominates(other, mine, &[]))
                .count();
            let ind = &mut individuals[idx];
            ind.set_property(DOMINATED_BY, count as i64);
            ind.set_fitness(|_| count as f64)?;
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variables::{DecisionSpace, DecisionVector};

    // ---- Dominance ----

    #[test]
    fn test_dominates_requires_strict_improvement() {
        assert!(!dominates(&[1.0, 1.0], &[1.0, 1.0], &[true, true]));
        assert!(dominates(&[1.0, 0.5], &[1.0, 1.0], &[true, true]));
    }

    #[test]
    fn test_dominates_maximised_objective() {
        assert!(dominates(&[2.0], &[1.0], &[false]));
        assert!(!dominates(&[1.0], &[2.0], &[false]));
    }

    // ---- Non-dominated sort ----

    #[test]
    fn test_single_solution() {
        let result = non_dominated_sort(&[vec![1.0, 2.0]]);
        assert_eq!(result.ranks, vec![0]);
        assert_eq!(result.fronts, vec![vec![0]]);
    }

    #[test]
    fn test_empty_input() {
        let result = non_dominated_sort(&[]);
        assert!(result.ranks.is_empty());
        assert!(result.fronts.is_empty());
    }

    #[test]
    fn test_clear_dominance() {
        let objs = vec![vec![1.0, 1.0], vec![2.0, 2.0], vec![3.0, 3.0]];
        let result = non_dominated_sort(&objs);
        assert_eq!(result.ranks, vec![0, 1, 2]);
        assert_eq!(result.fronts.len(), 3);
    }

    #[test]
    fn test_mixed_fronts() {
        let objs = vec![
            vec![1.0, 5.0],
            vec![3.0, 3.0],
            vec![5.0, 1.0],
            vec![4.0, 4.0], // dominated by (3,3)
            vec![6.0, 6.0], // dominated by (4,4) too
        ];
        let result = non_dominated_sort(&objs);
        assert_eq!(result.ranks, vec![0, 0, 0, 1, 2]);
    }

    #[test]
    fn test_all_equal() {
        let objs = vec![vec![2.0, 2.0]; 3];
        let result = non_dominated_sort(&objs);
        assert!(result.ranks.iter().all(|&r| r == 0));
    }

    // ---- Crowding distance ----

    #[test]
    fn test_crowding_two() {
        let dist = crowding_distance(&[vec![1.0, 3.0], vec![3.0, 1.0]]);
        assert!(dist.iter().all(|d| d.is_infinite()));
    }

    #[test]
    fn test_crowding_evenly_spaced() {
        let objs = vec![
            vec![0.0, 4.0],
            vec![1.0, 3.0],
            vec![2.0, 2.0],
            vec![3.0, 1.0],
            vec![4.0, 0.0],
        ];
        let dist = crowding_distance(&objs);
        assert!(dist[0].is_infinite());
        assert!(dist[4].is_infinite());
        assert!((dist[1] - dist[2]).abs() < 1e-10);
        assert!((dist[2] - dist[3]).abs() < 1e-10);
    }

    #[test]
    fn test_crowding_zero_range_objective() {
        let dist = crowding_distance(&[vec![1.0, 5.0], vec![2.0, 5.0], vec![3.0, 5.0]]);
        assert!(dist[1].is_finite());
    }

    // ---- Calculator ----

    fn with_solution(x: f64, solution: Vec<f64>) -> Individual {
        let space = DecisionSpace::uniform_continuous(1, -10.0, 10.0).unwrap();
        let mut ind = Individual::new(DecisionVector::from_continuous(&space, &[x]).unwrap());
        ind.send_for_evaluation().unwrap();
        ind.set_property("sol", solution);
        ind.set_solution("sol").unwrap();
        ind
    }

    #[test]
    fn test_fitness_is_domination_count() {
        let mut inds = vec![
            with_solution(0.0, vec![1.0, 5.0]),
            with_solution(1.0, vec![3.0, 3.0]),
            with_solution(2.0, vec![4.0, 4.0]),
            with_solution(3.0, vec![6.0, 6.0]),
        ];
        MultiObjectiveFitness::minimising(2)
            .calculate_and_assign_fitness(&mut inds, &Population::default())
            .unwrap();
        let fitness: Vec<f64> = inds.iter().map(|i| i.fitness().unwrap()).collect();
        assert_eq!(fitness, vec![0.0, 0.0, 1.0, 3.0]);
        assert!(inds[0].get_property::<f64>(CROWDING_DISTANCE).is_ok());
        assert_eq!(inds[3].get_property::<i64>(DOMINATED_BY).unwrap(), 3);
    }

    #[test]
    fn test_population_members_count_as_dominators() {
        let mut seed = vec![with_solution(0.0, vec![1.0, 1.0])];
        let calc = MultiObjectiveFitness::minimising(2);
        calc.calculate_and_assign_fitness(&mut seed, &Population::default())
            .unwrap();
        let mut pop = Population::new(4, true);
        pop.add_individual(seed.remove(0)).unwrap();

        let mut inds = vec![with_solution(1.0, vec![2.0, 2.0])];
        calc.calculate_and_assign_fitness(&mut inds, &pop).unwrap();
        assert_eq!(inds[0].fitness().unwrap(), 1.0);
    }

    #[test]
    fn test_maximised_objective_orientation() {
        let mut inds = vec![
            with_solution(0.0, vec![1.0, 5.0]),
            with_solution(1.0, vec![1.0, 3.0]),
        ];
        MultiObjectiveFitness::new(vec![true, false])
            .calculate_and_assign_fitness(&mut inds, &Population::default())
            .unwrap();
        assert_eq!(inds[0].fitness().unwrap(), 0.0);
        assert_eq!(inds[1].fitness().unwrap(), 1.0);
    }

    #[test]
    fn test_illegal_gets_death_penalty() {
        let space = DecisionSpace::uniform_continuous(1, -10.0, 10.0).unwrap();
        let mut ind = Individual::new(DecisionVector::from_continuous(&space, &[0.0]).unwrap());
        ind.send_for_evaluation().unwrap();
        ind.set_illegal().unwrap();
        let mut inds = vec![ind];
        MultiObjectiveFitness::minimising(2)
            .calculate_and_assign_fitness(&mut inds, &Population::default())
            .unwrap();
        assert_eq!(inds[0].fitness().unwrap(), Penalty::DEATH);
    }
}
