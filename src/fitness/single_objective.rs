use super::{apply_penalty, FitnessCalculator, Penalty, PenaltyFn};
use crate::management::{Individual, IndividualError, Population};
use std::fmt;
use std::sync::Arc;

/// Maps a raw solution vector to a score vector.
pub type SolutionToScore = Arc<dyn Fn(&[f64]) -> Vec<f64> + Send + Sync>;

/// Reduces a score vector to a scalar fitness.
pub type ScoreToFitness = Arc<dyn Fn(&[f64]) -> f64 + Send + Sync>;

/// Fitness from a pair of per-individual transforms.
///
/// Legal individuals get `score_to_fitness(solution_to_score(solution))`;
/// illegal ones get `penalty(solution)`. Defaults: identity score, first
/// element as fitness, death penalty.
///
/// # Examples
///
/// ```
/// use u_popopt::fitness::SingleObjectiveFitness;
///
/// // Maximise the first objective.
/// let calc = SingleObjectiveFitness::default().with_score_to_fitness(|s| -s[0]);
/// ```
#[derive(Clone)]
pub struct SingleObjectiveFitness {
    solution_to_score: SolutionToScore,
    score_to_fitness: ScoreToFitness,
    penalty: PenaltyFn,
}

impl Default for SingleObjectiveFitness {
    fn default() -> Self {
        Self {
            solution_to_score: Arc::new(<[f64]>::to_vec),
            score_to_fitness: Arc::new(|score: &[f64]| score.first().copied().unwrap_or(f64::NAN)),
            penalty: Penalty::death_fn(),
        }
    }
}

impl SingleObjectiveFitness {
    /// Sets the solution → score transform.
    pub fn with_solution_to_score<F>(mut self, f: F) -> Self
    where
        F: Fn(&[f64]) -> Vec<f64> + Send + Sync + 'static,
    {
        self.solution_to_score = Arc::new(f);
        self
    }

    /// Sets the score → fitness transform.
    pub fn with_score_to_fitness<F>(mut self, f: F) -> Self
    where
        F: Fn(&[f64]) -> f64 + Send + Sync + 'static,
    {
        self.score_to_fitness = Arc::new(f);
        self
    }

    /// Sets the penalty for illegal individuals.
    pub fn with_penalty<F>(mut self, f: F) -> Self
    where
        F: Fn(&[f64]) -> f64 + Send + Sync + 'static,
    {
        self.penalty = Arc::new(f);
        self
    }
}

impl FitnessCalculator for SingleObjectiveFitness {
    fn calculate_and_assign_fitness(
        &self,
        individuals: &mut [Individual],
        _population: &Population,
    ) -> Result<(), IndividualError> {
        for ind in individuals.iter_mut() {
            if !ind.is_legal() {
                apply_penalty(ind, &self.penalty)?;
                continue;
            }
            ind.set_score(|sol| (self.solution_to_score)(sol))?;
            ind.set_fitness(|score| (self.score_to_fitness)(score))?;
        }
        Ok(())
    }
}

impl fmt::Debug for SingleObjectiveFitness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SingleObjectiveFitness").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variables::{DecisionSpace, DecisionVector};

    fn awaiting(values: &[f64]) -> Individual {
        let space = DecisionSpace::uniform_continuous(values.len(), -10.0, 10.0).unwrap();
        let mut ind = Individual::new(DecisionVector::from_continuous(&space, values).unwrap());
        ind.send_for_evaluation().unwrap();
        ind
    }

    fn with_solution(solution: Vec<f64>) -> Individual {
        let mut ind = awaiting(&[0.0]);
        ind.set_property("sol", solution);
        ind.set_solution("sol").unwrap();
        ind
    }

    #[test]
    fn test_default_uses_first_element() {
        let mut inds = vec![with_solution(vec![3.0, 9.0])];
        SingleObjectiveFitness::default()
            .calculate_and_assign_fitness(&mut inds, &Population::default())
            .unwrap();
        assert_eq!(inds[0].score().unwrap(), &[3.0, 9.0]);
        assert_eq!(inds[0].fitness().unwrap(), 3.0);
    }

    #[test]
    fn test_custom_transforms() {
        let calc = SingleObjectiveFitness::default()
            .with_solution_to_score(|s| vec![s.iter().sum()])
            .with_score_to_fitness(|s| -s[0]);
        let mut inds = vec![with_solution(vec![1.0, 2.0])];
        calc.calculate_and_assign_fitness(&mut inds, &Population::default())
            .unwrap();
        assert_eq!(inds[0].fitness().unwrap(), -3.0);
    }

    #[test]
    fn test_illegal_gets_penalty() {
        let mut ind = awaiting(&[0.0]);
        ind.set_illegal().unwrap();
        let mut inds = vec![ind];

        SingleObjectiveFitness::default()
            .calculate_and_assign_fitness(&mut inds, &Population::default())
            .unwrap();
        assert_eq!(inds[0].fitness().unwrap(), Penalty::DEATH);

        let calc = SingleObjectiveFitness::default().with_penalty(|_| 1e6);
        calc.calculate_and_assign_fitness(&mut inds, &Population::default())
            .unwrap();
        assert_eq!(inds[0].fitness().unwrap(), 1e6);
    }
}
