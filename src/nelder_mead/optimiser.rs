//! Ask/tell Nelder–Mead.
//!
//! [`NelderMead`] keeps its simplex as its population (`dimension + 1`
//! members) and walks the decision tree of [`NelderMeadSteps`] one proposal
//! at a time:
//!
//! 1. Propose the initial simplex: the start point plus one vertex offset by
//!    `step_size` along each axis.
//! 2. Propose the reflected point. Depending on its fitness, propose an
//!    expansion or a contraction, or accept it.
//! 3. When a contraction fails, propose the shrunk vertices as one batch and
//!    replace every vertex but the best once all have come back.
//!
//! A proposal requested while earlier ones are still out for evaluation is
//! refused (the loop retries); [`Optimiser::proposal_capacity`] tells a
//! driver how many it may ask for. A proposed point rejected as a duplicate
//! counts as a failed move.

use super::config::NelderMeadConfig;
use super::operators::{
    ContractInside, ContractOutside, Expand, Reflect, Shrink, SimplexOperator,
};
use super::simplex::Simplex;
use super::steps::NelderMeadSteps;
use crate::fitness::{FitnessCalculator, SingleObjectiveFitness};
use crate::management::{
    Individual, Optimiser, OptimiserCore, OptimiserError, Population,
};
use crate::variables::{DecisionSpace, DecisionVector, Value};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::VecDeque;
use tracing::debug;

/// What the outstanding proposals are for.
#[derive(Debug)]
enum Phase {
    /// Initial vertices, or random vertices replacing lost ones.
    Filling,
    /// Nothing outstanding; the next proposal is a reflection.
    Ready,
    Reflecting,
    Expanding { reflected: Individual },
    ContractingOutside { reflected: Individual },
    ContractingInside,
    Shrinking { step: NelderMeadSteps },
}

/// Nelder–Mead simplex search over a continuous decision space.
///
/// # Examples
///
/// ```
/// use u_popopt::management::Optimiser;
/// use u_popopt::nelder_mead::{NelderMead, NelderMeadConfig};
/// use u_popopt::variables::{DecisionSpace, DecisionVector};
///
/// let space = DecisionSpace::uniform_continuous(2, -5.0, 5.0).unwrap();
/// let start = DecisionVector::from_continuous(&space, &[-1.2, 1.0]).unwrap();
/// let mut nm = NelderMead::new(start, &NelderMeadConfig::default()).unwrap();
///
/// // The first batch is the initial simplex.
/// let batch = nm.get_next_to_evaluate(3).unwrap();
/// assert_eq!(batch.len(), 3);
/// ```
#[derive(Debug)]
pub struct NelderMead {
    core: OptimiserCore,
    space: DecisionSpace,
    reflect: Reflect,
    expand: Expand,
    contract_outside: ContractOutside,
    contract_inside: ContractInside,
    shrink: Shrink,
    tolerance: Option<f64>,
    rng: StdRng,
    queue: VecDeque<DecisionVector>,
    awaiting: usize,
    phase: Phase,
    returned: Vec<Individual>,
    last_step: Option<NelderMeadSteps>,
    iterations: usize,
    converged: bool,
}

impl NelderMead {
    /// Creates a search starting from `start`, using single-objective
    /// fitness.
    pub fn new(start: DecisionVector, config: &NelderMeadConfig) -> Result<Self, OptimiserError> {
        config.validate().map_err(OptimiserError::Config)?;

        let space = start.space().clone();
        if start.is_empty() || !space.is_continuous() {
            return Err(OptimiserError::Config(
                "Nelder-Mead needs a non-empty, fully continuous decision vector".into(),
            ));
        }

        let reflect = Reflect::new(config.reflection)?;
        let expand = Expand::new(config.expansion, reflect)?;
        let contract_outside = ContractOutside::new(config.contraction_outside, reflect)?;
        let contract_inside = ContractInside::new(config.contraction_inside)?;
        let shrink = Shrink::new(config.shrink)?;

        let queue = initial_simplex(&start, config.step_size)?;
        let seed = config.seed.unwrap_or_else(rand::random);

        Ok(Self {
            core: Self::fresh_core(&space, Box::new(SingleObjectiveFitness::default())),
            space,
            reflect,
            expand,
            contract_outside,
            contract_inside,
            shrink,
            tolerance: config.convergence_tolerance,
            rng: StdRng::seed_from_u64(seed),
            queue,
            awaiting: 0,
            phase: Phase::Filling,
            returned: Vec::new(),
            last_step: None,
            iterations: 0,
            converged: false,
        })
    }

    /// Replaces the fitness calculator. Call before the first proposal.
    pub fn with_fitness_calculator(mut self, calculator: impl FitnessCalculator + 'static) -> Self {
        self.core = Self::fresh_core(&self.space, Box::new(calculator));
        self
    }

    fn fresh_core(space: &DecisionSpace, calculator: Box<dyn FitnessCalculator>) -> OptimiserCore {
        OptimiserCore::new(Population::new(space.dimension() + 1, true), calculator)
    }

    /// The most recent completed iteration.
    pub fn last_step(&self) -> Option<NelderMeadSteps> {
        self.last_step
    }

    /// Completed iterations (initial simplex excluded).
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Whether the fitness spread has fallen within the tolerance.
    pub fn is_converged(&self) -> bool {
        self.converged
    }

    /// The current simplex.
    pub fn simplex(&self) -> Result<Simplex, OptimiserError> {
        Ok(Simplex::from_population(self.population())?)
    }

    /// Queues the next proposals when nothing is outstanding.
    fn plan_next(&mut self) -> Result<(), OptimiserError> {
        let target = self.space.dimension() + 1;
        let short = target.saturating_sub(self.population().len());
        if short > 0 {
            debug!(short, "refilling simplex with random vertices");
            for _ in 0..short {
                let dv = self.space.random_vector(&mut self.rng);
                self.queue.push_back(dv);
            }
            self.phase = Phase::Filling;
        } else {
            let simplex = Simplex::from_population(self.population())?;
            self.queue.push_back(self.reflect.operate(&simplex)?);
            self.phase = Phase::Reflecting;
        }
        Ok(())
    }

    fn after_reflect(&mut self, reflected: Option<Individual>) -> Result<usize, OptimiserError> {
        let simplex = Simplex::from_population(self.population())?;
        let best = fitness(simplex.best());
        let second_worst = fitness(simplex.second_worst());
        let worst = fitness(simplex.worst());

        match reflected {
            Some(r) if fitness(&r) < best => {
                self.queue.push_back(self.expand.operate(&simplex)?);
                self.phase = Phase::Expanding { reflected: r };
                Ok(0)
            }
            Some(r) if fitness(&r) < second_worst => self.accept(r, NelderMeadSteps::RR),
            Some(r) if fitness(&r) < worst => {
                self.queue.push_back(self.contract_outside.operate(&simplex)?);
                self.phase = Phase::ContractingOutside { reflected: r };
                Ok(0)
            }
            _ => {
                self.queue.push_back(self.contract_inside.operate(&simplex)?);
                self.phase = Phase::ContractingInside;
                Ok(0)
            }
        }
    }

    fn after_expand(
        &mut self,
        reflected: Individual,
        expanded: Option<Individual>,
    ) -> Result<usize, OptimiserError> {
        match expanded {
            Some(e) if fitness(&e) < fitness(&reflected) => self.accept(e, NelderMeadSteps::ReE),
            _ => self.accept(reflected, NelderMeadSteps::ReR),
        }
    }

    fn after_contract_outside(
        &mut self,
        reflected: Individual,
        contracted: Option<Individual>,
    ) -> Result<usize, OptimiserError> {
        match contracted {
            Some(c) if fitness(&c) < fitness(&reflected) => self.accept(c, NelderMeadSteps::RcC),
            _ => self.start_shrink(NelderMeadSteps::RcsS),
        }
    }

    fn after_contract_inside(
        &mut self,
        contracted: Option<Individual>,
    ) -> Result<usize, OptimiserError> {
        let worst = fitness(self.population().worst().map_err(OptimiserError::Reinsertion)?);
        match contracted {
            Some(k) if fitness(&k) < worst => self.accept(k, NelderMeadSteps::RkK),
            _ => self.start_shrink(NelderMeadSteps::RksS),
        }
    }

    fn start_shrink(&mut self, step: NelderMeadSteps) -> Result<usize, OptimiserError> {
        let simplex = Simplex::from_population(self.population())?;
        self.queue.extend(self.shrink.shrink_all(&simplex)?);
        self.phase = Phase::Shrinking { step };
        Ok(0)
    }

    /// Keeps the best vertex and replaces the others with the shrunk ones.
    fn finish_shrink(
        &mut self,
        step: NelderMeadSteps,
        shrunk: Vec<Individual>,
    ) -> Result<usize, OptimiserError> {
        let population = self.population_mut();
        while population.len() > 1 {
            population.remove_worst().map_err(OptimiserError::Reinsertion)?;
        }
        let count = shrunk.len();
        for ind in shrunk {
            population.add_individual(ind).map_err(OptimiserError::Reinsertion)?;
        }
        self.complete(step);
        Ok(count)
    }

    /// Replaces the worst vertex with `vertex`.
    fn accept(&mut self, vertex: Individual, step: NelderMeadSteps) -> Result<usize, OptimiserError> {
        let population = self.population_mut();
        population.remove_worst().map_err(OptimiserError::Reinsertion)?;
        population
            .add_individual(vertex)
            .map_err(OptimiserError::Reinsertion)?;
        self.complete(step);
        Ok(1)
    }

    fn complete(&mut self, step: NelderMeadSteps) {
        self.last_step = Some(step);
        self.iterations += 1;

        let population = self.core.population();
        let (Ok(best), Ok(worst)) = (population.best(), population.worst()) else {
            return;
        };
        let spread = fitness(worst) - fitness(best);
        debug!(
            iteration = self.iterations,
            step = %step,
            best = fitness(best),
            spread,
            "nelder-mead step"
        );

        if let Some(tol) = self.tolerance {
            if population.len() == self.space.dimension() + 1 && spread <= tol {
                debug!(iteration = self.iterations, spread, "simplex converged");
                self.converged = true;
            }
        }
    }
}

impl Optimiser for NelderMead {
    fn core(&self) -> &OptimiserCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut OptimiserCore {
        &mut self.core
    }

    fn get_new_decision_vector(&mut self) -> Result<DecisionVector, OptimiserError> {
        if self.queue.is_empty() {
            if self.awaiting > 0 {
                return Err(OptimiserError::Proposal(format!(
                    "{} simplex vertices still awaiting evaluation",
                    self.awaiting
                )));
            }
            if self.converged {
                return Ok(DecisionVector::empty());
            }
            self.plan_next()?;
        }

        match self.queue.pop_front() {
            Some(dv) => {
                self.awaiting += 1;
                Ok(dv)
            }
            None => Ok(DecisionVector::empty()),
        }
    }

    fn on_reinsertion_rejected(&mut self, _individual: &Individual) {
        self.awaiting = self.awaiting.saturating_sub(1);
    }

    /// The queued vertices, or one move once the queue is drained. Zero
    /// while a move is out for evaluation.
    fn proposal_capacity(&self) -> Option<usize> {
        if self.queue.is_empty() && self.awaiting > 0 {
            Some(0)
        } else {
            Some(self.queue.len().max(1))
        }
    }

    fn assess_fitness_and_decide_fate(
        &mut self,
        mut individuals: Vec<Individual>,
    ) -> Result<usize, OptimiserError> {
        self.core.assign_fitness(&mut individuals)?;
        self.awaiting = self.awaiting.saturating_sub(individuals.len());

        if matches!(self.phase, Phase::Filling) {
            let count = individuals.len();
            for ind in individuals {
                self.core
                    .population_mut()
                    .add_individual(ind)
                    .map_err(OptimiserError::Reinsertion)?;
            }
            if self.awaiting == 0 && self.queue.is_empty() {
                self.phase = Phase::Ready;
            }
            return Ok(count);
        }

        self.returned.extend(individuals);
        if self.awaiting > 0 || !self.queue.is_empty() {
            return Ok(0);
        }

        let mut returned = std::mem::take(&mut self.returned);
        match std::mem::replace(&mut self.phase, Phase::Ready) {
            Phase::Filling | Phase::Ready => {
                // Nothing was outstanding; admit as-is.
                let count = returned.len();
                for ind in returned {
                    self.core
                        .population_mut()
                        .add_individual(ind)
                        .map_err(OptimiserError::Reinsertion)?;
                }
                Ok(count)
            }
            Phase::Reflecting => self.after_reflect(returned.pop()),
            Phase::Expanding { reflected } => self.after_expand(reflected, returned.pop()),
            Phase::ContractingOutside { reflected } => {
                self.after_contract_outside(reflected, returned.pop())
            }
            Phase::ContractingInside => self.after_contract_inside(returned.pop()),
            Phase::Shrinking { step } => self.finish_shrink(step, returned),
        }
    }
}

/// The start point plus one vertex per axis, offset by `step`. An offset
/// that leaves the variable's bounds is taken in the other direction.
fn initial_simplex(
    start: &DecisionVector,
    step: f64,
) -> Result<VecDeque<DecisionVector>, OptimiserError> {
    let origin = start.to_continuous()?;
    let mut vertices = VecDeque::with_capacity(origin.len() + 1);
    vertices.push_back(start.clone());

    for (i, variable) in start.space().variables().iter().enumerate() {
        let mut x = origin.clone();
        x[i] = origin[i] + step;
        if !variable.is_in_bounds(&Value::Continuous(x[i]))? {
            x[i] = origin[i] - step;
        }
        vertices.push_back(DecisionVector::from_continuous(start.space(), &x)?);
    }
    Ok(vertices)
}

fn fitness(ind: &Individual) -> f64 {
    ind.fitness().unwrap_or(f64::INFINITY)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversion::{EvaluationError, Evaluator};
    use crate::problems::Rosenbrock;

    struct Sphere;

    impl Evaluator for Sphere {
        fn evaluate(&self, dv: &DecisionVector) -> Result<Vec<f64>, EvaluationError> {
            let x = dv
                .to_continuous()
                .map_err(|e| EvaluationError::with_source("not continuous", e))?;
            Ok(vec![x.iter().map(|v| v * v).sum()])
        }
    }

    fn start(values: &[f64]) -> DecisionVector {
        let space = DecisionSpace::uniform_continuous(values.len(), -5.0, 5.0).unwrap();
        DecisionVector::from_continuous(&space, values).unwrap()
    }

    fn tell(nm: &mut NelderMead, eval: &impl Evaluator, mut batch: Vec<Individual>) -> usize {
        for ind in &mut batch {
            eval.evaluate_individual(ind).unwrap();
        }
        nm.re_insert(batch).unwrap().inserted
    }

    fn drive(nm: &mut NelderMead, eval: &impl Evaluator, rounds: usize) {
        for _ in 0..rounds {
            let batch = nm.get_next_to_evaluate(1).unwrap();
            if batch.is_empty() {
                break;
            }
            tell(nm, eval, batch);
        }
    }

    fn coords(dv: &DecisionVector) -> Vec<f64> {
        dv.to_continuous().unwrap()
    }

    /// Fitness looked up by exact coordinates.
    struct Table(Vec<(Vec<f64>, f64)>);

    impl Evaluator for Table {
        fn evaluate(&self, dv: &DecisionVector) -> Result<Vec<f64>, EvaluationError> {
            let x = coords(dv);
            self.0
                .iter()
                .find(|(point, _)| *point == x)
                .map(|(_, f)| vec![*f])
                .ok_or_else(|| EvaluationError::new(format!("no value for {x:?}")))
        }
    }

    /// Simplex (0,0)=1, (1,0)=2, (0,1)=3, so the centroid is (0.5,0) and the
    /// reflection (1,-1). Expansion is (1.5,-2), outside contraction
    /// (0.75,-0.5), inside contraction (0.25,0.5) and the shrunk vertices
    /// (0.5,0) and (0,0.5).
    fn scripted(extra: &[([f64; 2], f64)]) -> (NelderMead, Table) {
        let mut table = vec![
            (vec![0.0, 0.0], 1.0),
            (vec![1.0, 0.0], 2.0),
            (vec![0.0, 1.0], 3.0),
        ];
        table.extend(extra.iter().map(|(x, f)| (x.to_vec(), *f)));
        let table = Table(table);

        let mut nm = NelderMead::new(start(&[0.0, 0.0]), &NelderMeadConfig::default()).unwrap();
        let initial = nm.get_next_to_evaluate(3).unwrap();
        assert_eq!(tell(&mut nm, &table, initial), 3);
        (nm, table)
    }

    /// Asks for one move and checks where it lands.
    fn step(nm: &mut NelderMead, table: &Table, expected: &[f64]) -> usize {
        let batch = nm.get_next_to_evaluate(1).unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(coords(batch[0].decision_vector()), expected);
        tell(nm, table, batch)
    }

    fn simplex(nm: &NelderMead) -> Vec<Vec<f64>> {
        nm.population()
            .iter()
            .map(|i| coords(i.decision_vector()))
            .collect()
    }

    // ---- Construction ----

    #[test]
    fn test_rejects_discrete_space() {
        let space = DecisionSpace::uniform_discrete(2, 0, 5).unwrap();
        let dv = DecisionVector::from_discrete(&space, &[1, 2]).unwrap();
        assert!(matches!(
            NelderMead::new(dv, &NelderMeadConfig::default()),
            Err(OptimiserError::Config(_))
        ));
    }

    #[test]
    fn test_rejects_invalid_coefficients() {
        let config = NelderMeadConfig::default().with_shrink(1.0);
        assert!(NelderMead::new(start(&[0.0, 0.0]), &config).is_err());
    }

    // ---- Initial simplex ----

    #[test]
    fn test_initial_simplex_along_axes() {
        let mut nm = NelderMead::new(start(&[1.0, 2.0]), &NelderMeadConfig::default()).unwrap();
        let batch = nm.get_next_to_evaluate(3).unwrap();
        let points: Vec<_> = batch.iter().map(|i| coords(i.decision_vector())).collect();
        assert_eq!(points, vec![vec![1.0, 2.0], vec![2.0, 2.0], vec![1.0, 3.0]]);
    }

    #[test]
    fn test_initial_step_stays_in_bounds() {
        let mut nm = NelderMead::new(start(&[4.5, 0.0]), &NelderMeadConfig::default()).unwrap();
        let batch = nm.get_next_to_evaluate(3).unwrap();
        assert_eq!(coords(batch[1].decision_vector()), vec![3.5, 0.0]);
    }

    #[test]
    fn test_refuses_new_proposal_while_awaiting() {
        let mut nm = NelderMead::new(start(&[1.0, 2.0]), &NelderMeadConfig::default()).unwrap();
        let _outstanding = nm.get_next_to_evaluate(3).unwrap();
        assert!(matches!(
            nm.get_next_to_evaluate(1),
            Err(OptimiserError::Exhausted { created: 0, .. })
        ));
    }

    // ---- Capacity ----

    #[test]
    fn test_capacity_follows_simplex_moves() {
        let mut nm = NelderMead::new(start(&[1.0, 2.0]), &NelderMeadConfig::default()).unwrap();
        assert_eq!(nm.proposal_capacity(), Some(3));

        let initial = nm.get_next_to_evaluate(3).unwrap();
        assert_eq!(nm.proposal_capacity(), Some(0));
        tell(&mut nm, &Sphere, initial);
        assert_eq!(nm.proposal_capacity(), Some(1));

        let reflect = nm.get_next_to_evaluate(1).unwrap();
        assert_eq!(nm.proposal_capacity(), Some(0));
        tell(&mut nm, &Sphere, reflect);
        assert_eq!(nm.proposal_capacity(), Some(1));
    }

    // ---- Decision tree ----

    #[test]
    fn test_reflect_accepted() {
        // Vertices (2,2)=8, (3,2)=13, (2,3)=13; reflection (3,1)=10.
        let mut nm = NelderMead::new(start(&[2.0, 2.0]), &NelderMeadConfig::default()).unwrap();
        let initial = nm.get_next_to_evaluate(3).unwrap();
        assert_eq!(tell(&mut nm, &Sphere, initial), 3);

        let reflect = nm.get_next_to_evaluate(1).unwrap();
        assert_eq!(coords(reflect[0].decision_vector()), vec![3.0, 1.0]);
        assert_eq!(tell(&mut nm, &Sphere, reflect), 1);
        assert_eq!(nm.last_step(), Some(NelderMeadSteps::RR));
        assert_eq!(nm.population().fitnesses(), vec![8.0, 10.0, 13.0]);
    }

    #[test]
    fn test_expand_accepted() {
        // Vertices (-2,-3)=13, (-3,-2)=13, (-3,-3)=18; reflection (-2,-2)=8,
        // expansion (-1.5,-1.5)=4.5.
        let mut nm = NelderMead::new(start(&[-3.0, -3.0]), &NelderMeadConfig::default()).unwrap();
        let initial = nm.get_next_to_evaluate(3).unwrap();
        tell(&mut nm, &Sphere, initial);

        let reflect = nm.get_next_to_evaluate(1).unwrap();
        assert_eq!(tell(&mut nm, &Sphere, reflect), 0);

        let expand = nm.get_next_to_evaluate(1).unwrap();
        assert_eq!(coords(expand[0].decision_vector()), vec![-1.5, -1.5]);
        tell(&mut nm, &Sphere, expand);
        assert_eq!(nm.last_step(), Some(NelderMeadSteps::ReE));
        assert_eq!(nm.population().best().unwrap().fitness().unwrap(), 4.5);
    }

    #[test]
    fn test_expansion_worse_than_reflection_keeps_reflection() {
        let (mut nm, table) = scripted(&[([1.0, -1.0], 0.5), ([1.5, -2.0], 0.7)]);
        assert_eq!(step(&mut nm, &table, &[1.0, -1.0]), 0);
        assert_eq!(step(&mut nm, &table, &[1.5, -2.0]), 1);

        assert_eq!(nm.last_step(), Some(NelderMeadSteps::ReR));
        assert_eq!(nm.population().fitnesses(), vec![0.5, 1.0, 2.0]);
        assert_eq!(
            simplex(&nm),
            vec![vec![1.0, -1.0], vec![0.0, 0.0], vec![1.0, 0.0]]
        );
    }

    #[test]
    fn test_outside_contraction_accepted() {
        let (mut nm, table) = scripted(&[([1.0, -1.0], 2.5), ([0.75, -0.5], 2.2)]);
        assert_eq!(step(&mut nm, &table, &[1.0, -1.0]), 0);
        assert_eq!(step(&mut nm, &table, &[0.75, -0.5]), 1);

        assert_eq!(nm.last_step(), Some(NelderMeadSteps::RcC));
        assert_eq!(nm.population().fitnesses(), vec![1.0, 2.0, 2.2]);
        assert_eq!(
            simplex(&nm),
            vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![0.75, -0.5]]
        );
    }

    #[test]
    fn test_inside_contraction_accepted() {
        let (mut nm, table) = scripted(&[([1.0, -1.0], 4.0), ([0.25, 0.5], 2.5)]);
        assert_eq!(step(&mut nm, &table, &[1.0, -1.0]), 0);
        assert_eq!(step(&mut nm, &table, &[0.25, 0.5]), 1);

        assert_eq!(nm.last_step(), Some(NelderMeadSteps::RkK));
        assert_eq!(nm.population().fitnesses(), vec![1.0, 2.0, 2.5]);
        assert_eq!(
            simplex(&nm),
            vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![0.25, 0.5]]
        );
    }

    #[test]
    fn test_failed_outside_contraction_shrinks() {
        let (mut nm, table) = scripted(&[
            ([1.0, -1.0], 2.5),
            ([0.75, -0.5], 2.8),
            ([0.5, 0.0], 1.5),
            ([0.0, 0.5], 1.8),
        ]);
        assert_eq!(step(&mut nm, &table, &[1.0, -1.0]), 0);
        assert_eq!(step(&mut nm, &table, &[0.75, -0.5]), 0);

        // Both shrunk vertices go out together.
        assert_eq!(nm.proposal_capacity(), Some(2));
        let shrunk = nm.get_next_to_evaluate(2).unwrap();
        let points: Vec<_> = shrunk.iter().map(|i| coords(i.decision_vector())).collect();
        assert_eq!(points, vec![vec![0.5, 0.0], vec![0.0, 0.5]]);
        assert_eq!(tell(&mut nm, &table, shrunk), 2);

        assert_eq!(nm.last_step(), Some(NelderMeadSteps::RcsS));
        assert_eq!(nm.iterations(), 1);
        assert_eq!(nm.population().fitnesses(), vec![1.0, 1.5, 1.8]);
        assert_eq!(
            simplex(&nm),
            vec![vec![0.0, 0.0], vec![0.5, 0.0], vec![0.0, 0.5]]
        );
    }

    #[test]
    fn test_failed_inside_contraction_shrinks() {
        let (mut nm, table) = scripted(&[
            ([1.0, -1.0], 4.0),
            ([0.25, 0.5], 3.5),
            ([0.5, 0.0], 2.5),
            ([0.0, 0.5], 0.5),
        ]);
        assert_eq!(step(&mut nm, &table, &[1.0, -1.0]), 0);
        assert_eq!(step(&mut nm, &table, &[0.25, 0.5]), 0);

        // Returned one at a time, the shrink completes on the second.
        assert_eq!(step(&mut nm, &table, &[0.5, 0.0]), 0);
        assert_eq!(nm.population().len(), 3);
        assert_eq!(step(&mut nm, &table, &[0.0, 0.5]), 2);

        assert_eq!(nm.last_step(), Some(NelderMeadSteps::RksS));
        assert_eq!(nm.population().fitnesses(), vec![0.5, 1.0, 2.5]);
        assert_eq!(
            simplex(&nm),
            vec![vec![0.0, 0.5], vec![0.0, 0.0], vec![0.5, 0.0]]
        );
    }

    #[test]
    fn test_rejected_reflection_contracts_inside() {
        let mut nm = NelderMead::new(start(&[-3.0, -3.0]), &NelderMeadConfig::default()).unwrap();
        let initial = nm.get_next_to_evaluate(3).unwrap();
        tell(&mut nm, &Sphere, initial);

        // Answer the reflection with a duplicate of an existing vertex.
        let _reflect = nm.get_next_to_evaluate(1).unwrap();
        let mut dup = Individual::new(start(&[-3.0, -3.0]));
        Sphere.evaluate_individual(&mut dup).unwrap();
        let outcome = nm.re_insert(vec![dup]).unwrap();
        assert_eq!(outcome.inserted, 0);
        assert_eq!(outcome.rejected.len(), 1);

        let contract = nm.get_next_to_evaluate(1).unwrap();
        assert_eq!(coords(contract[0].decision_vector()), vec![-2.75, -2.75]);
    }

    #[test]
    fn test_population_stays_simplex_sized() {
        let mut nm = NelderMead::new(start(&[-1.2, 1.0]), &NelderMeadConfig::default()).unwrap();
        let problem = Rosenbrock::new(2).unwrap();
        drive(&mut nm, &problem, 200);
        assert_eq!(nm.population().len(), 3);
        assert!(nm.iterations() > 0);
    }

    // ---- Convergence ----

    #[test]
    fn test_converges_on_rosenbrock() {
        let config = NelderMeadConfig::default()
            .with_convergence_tolerance(1e-10)
            .with_seed(7);
        let mut nm = NelderMead::new(start(&[-1.2, 1.0]), &config).unwrap();
        let problem = Rosenbrock::new(2).unwrap();

        drive(&mut nm, &problem, 5_000);

        assert!(nm.is_converged(), "expected convergence");
        let best = nm.population().best().unwrap();
        assert!(
            best.fitness().unwrap() < 1e-4,
            "expected near-optimal fitness, got {}",
            best.fitness().unwrap()
        );
        let x = coords(best.decision_vector());
        assert!((x[0] - 1.0).abs() < 0.05 && (x[1] - 1.0).abs() < 0.05);

        // Converged: no further proposals.
        assert!(nm.get_next_to_evaluate(1).unwrap().is_empty());
    }
}
