//! Recombination (crossover) operators.
//!
//! # References
//!
//! - Sivanandam & Deepa (2007), "Introduction to Genetic Algorithms"
//! - Magalhães-Mendes (2013), "A Comparative Study of Crossover Operators
//!   for Genetic Algorithms to Solve the Job Shop Scheduling Problem"

use crate::management::OperatorError;
use crate::variables::DecisionVector;
use rand::{Rng, RngCore};
use std::fmt;

/// Builds one child from several parents.
pub trait RecombinationOperator: Send + Sync + fmt::Debug {
    /// Number of parents the operator expects to be given.
    fn parent_count(&self) -> usize {
        2
    }

    fn operate(
        &self,
        parents: &[DecisionVector],
        rng: &mut dyn RngCore,
    ) -> Result<DecisionVector, OperatorError>;
}

fn check_parents(parents: &[DecisionVector]) -> Result<(), OperatorError> {
    if parents.len() < 2 {
        return Err(OperatorError::TooFewParents {
            required: 2,
            found: parents.len(),
        });
    }
    Ok(())
}

// ============================================================================
// Arithmetic mean
// ============================================================================

/// Element-wise mean of two or more continuous parents ("flat" crossover).
///
/// Deterministic: the random source is not used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrossoverArithmeticMultiParent {
    parents: usize,
}

impl CrossoverArithmeticMultiParent {
    /// Averages `parents` parents (at least 2).
    pub fn new(parents: usize) -> Result<Self, OperatorError> {
        if parents < 2 {
            return Err(OperatorError::TooFewParents {
                required: 2,
                found: parents,
            });
        }
        Ok(Self { parents })
    }
}

impl Default for CrossoverArithmeticMultiParent {
    fn default() -> Self {
        Self { parents: 2 }
    }
}

impl RecombinationOperator for CrossoverArithmeticMultiParent {
    fn parent_count(&self) -> usize {
        self.parents
    }

    fn operate(
        &self,
        parents: &[DecisionVector],
        _rng: &mut dyn RngCore,
    ) -> Result<DecisionVector, OperatorError> {
        check_parents(parents)?;

        let first = &parents[0];
        if first.is_empty() {
            return Err(OperatorError::TooFewElements {
                required: 1,
                found: 0,
            });
        }
        let mut sum = vec![0.0; first.len()];
        for p in parents {
            if p.len() != first.len() {
                return Err(OperatorError::ParentLengthMismatch {
                    first: first.len(),
                    other: p.len(),
                });
            }
            if p.continuous_elements().len() != p.len() {
                return Err(OperatorError::NotContinuous);
            }
            let x = p.to_continuous()?;
            for (s, xi) in sum.iter_mut().zip(&x) {
                *s += xi;
            }
        }

        let n = parents.len() as f64;
        let mean: Vec<f64> = sum.into_iter().map(|s| s / n).collect();
        Ok(DecisionVector::from_continuous(first.space(), &mean)?)
    }
}

// ============================================================================
// Multi-point
// ============================================================================

/// `k`-point crossover of two parents.
///
/// Cut points are drawn without replacement from the positions the parents
/// share, and segments alternate between the parents starting with a
/// randomly chosen one. When lengths differ, the child ends with the tail of
/// whichever parent supplies the last segment, so its length matches one of
/// the parents. Works on any variable type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrossoverMultiPoint {
    points: usize,
}

impl CrossoverMultiPoint {
    pub fn new(points: usize) -> Result<Self, OperatorError> {
        if points == 0 {
            return Err(OperatorError::InvalidArgument {
                name: "number of crossover points",
                reason: "must be at least 1",
            });
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> usize {
        self.points
    }
}

impl Default for CrossoverMultiPoint {
    fn default() -> Self {
        Self { points: 1 }
    }
}

impl RecombinationOperator for CrossoverMultiPoint {
    fn operate(
        &self,
        parents: &[DecisionVector],
        rng: &mut dyn RngCore,
    ) -> Result<DecisionVector, OperatorError> {
        check_parents(parents)?;

        let pair = if rng.random_bool(0.5) {
            [&parents[0], &parents[1]]
        } else {
            [&parents[1], &parents[0]]
        };
        let shared = pair[0].len().min(pair[1].len());
        if shared < self.points + 1 {
            return Err(OperatorError::TooFewElements {
                required: self.points + 1,
                found: shared,
            });
        }

        let mut cuts: Vec<usize> =
            rand::seq::index::sample(rng, shared - 1, self.points).into_vec();
        cuts.iter_mut().for_each(|c| *c += 1);
        cuts.sort_unstable();

        let mut values = Vec::with_capacity(shared);
        let mut source = 0;
        let mut start = 0;
        for &cut in &cuts {
            values.extend_from_slice(&pair[source].values()[start..cut]);
            source = 1 - source;
            start = cut;
        }
        let last = pair[source];
        values.extend_from_slice(&last.values()[start..]);

        Ok(DecisionVector::from_values(last.space(), values)?)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variables::{DecisionSpace, Value, Variable, VariableContinuous, VariableDiscrete};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn continuous(values: &[f64]) -> DecisionVector {
        let space = DecisionSpace::uniform_continuous(values.len(), -10.0, 10.0).unwrap();
        DecisionVector::from_continuous(&space, values).unwrap()
    }

    /// Parents [0,1,2,3] and [3,2,0,1] over {0..3}^4, plus a longer
    /// parent with two extra variables over {-4..-1}.
    fn discrete_parents() -> (DecisionVector, DecisionVector, DecisionVector) {
        let uniform = DecisionSpace::uniform_discrete(4, 0, 3).unwrap();
        let p1 = DecisionVector::from_discrete(&uniform, &[0, 1, 2, 3]).unwrap();
        let p2 = DecisionVector::from_discrete(&uniform, &[3, 2, 0, 1]).unwrap();

        let mut hetero: Vec<Variable> = uniform.variables().to_vec();
        hetero.push(VariableDiscrete::new(-4, -1).unwrap().into());
        hetero.push(VariableDiscrete::new(-4, -1).unwrap().into());
        let hetero = DecisionSpace::new(hetero);
        let p3 = DecisionVector::from_discrete(&hetero, &[1, 2, 3, 0, -1, -2]).unwrap();
        (p1, p2, p3)
    }

    fn assert_positions_from_parents(child: &DecisionVector, a: &DecisionVector, b: &DecisionVector) {
        let shared = a.len().min(b.len());
        for d in 0..shared {
            let v = child.get(d);
            assert!(v == a.get(d) || v == b.get(d), "position {d} came from neither parent");
        }
    }

    // ---- Arithmetic ----

    #[test]
    fn test_arithmetic_two_parents() {
        let child = CrossoverArithmeticMultiParent::default()
            .operate(&[continuous(&[0.0, 2.0]), continuous(&[1.0, 4.0])], &mut rng())
            .unwrap();
        assert_eq!(child.to_continuous().unwrap(), vec![0.5, 3.0]);
    }

    #[test]
    fn test_arithmetic_three_parents() {
        let op = CrossoverArithmeticMultiParent::new(3).unwrap();
        assert_eq!(op.parent_count(), 3);
        let child = op
            .operate(
                &[continuous(&[0.0]), continuous(&[3.0]), continuous(&[6.0])],
                &mut rng(),
            )
            .unwrap();
        assert_eq!(child.to_continuous().unwrap(), vec![3.0]);
    }

    #[test]
    fn test_arithmetic_rejects_bad_parents() {
        let op = CrossoverArithmeticMultiParent::default();
        assert_eq!(
            op.operate(&[continuous(&[1.0])], &mut rng()).unwrap_err(),
            OperatorError::TooFewParents {
                required: 2,
                found: 1
            }
        );
        assert_eq!(
            op.operate(&[continuous(&[1.0]), continuous(&[1.0, 2.0])], &mut rng())
                .unwrap_err(),
            OperatorError::ParentLengthMismatch { first: 1, other: 2 }
        );
        let (p1, p2, _) = discrete_parents();
        assert_eq!(
            op.operate(&[p1, p2], &mut rng()).unwrap_err(),
            OperatorError::NotContinuous
        );
        assert!(CrossoverArithmeticMultiParent::new(1).is_err());
    }

    #[test]
    fn test_arithmetic_rejects_partly_discrete_parent() {
        let mixed_space = DecisionSpace::new([
            Variable::from(VariableContinuous::new(-10.0, 10.0).unwrap()),
            Variable::from(VariableDiscrete::new(-10, 10).unwrap()),
        ]);
        let mixed = DecisionVector::from_values(
            &mixed_space,
            vec![Value::Continuous(1.0), Value::Discrete(2)],
        )
        .unwrap();
        let op = CrossoverArithmeticMultiParent::default();
        assert_eq!(
            op.operate(&[continuous(&[0.0, 0.0]), mixed.clone()], &mut rng())
                .unwrap_err(),
            OperatorError::NotContinuous
        );
        assert_eq!(
            op.operate(&[mixed, continuous(&[0.0, 0.0])], &mut rng())
                .unwrap_err(),
            OperatorError::NotContinuous
        );
    }

    // ---- Multi-point ----

    #[test]
    fn test_multi_point_equal_length() {
        let (p1, p2, _) = discrete_parents();
        let mut r = rng();
        for points in 1..=3 {
            let cx = CrossoverMultiPoint::new(points).unwrap();
            for _ in 0..10 {
                let child = cx.operate(&[p1.clone(), p2.clone()], &mut r).unwrap();
                assert_eq!(child.len(), 4);
                assert_positions_from_parents(&child, &p1, &p2);
            }
        }
    }

    #[test]
    fn test_multi_point_unequal_length() {
        let (p1, _, p3) = discrete_parents();
        let mut r = rng();
        let mut lengths = std::collections::HashSet::new();
        for points in 1..=2 {
            let cx = CrossoverMultiPoint::new(points).unwrap();
            for _ in 0..20 {
                let child = cx.operate(&[p1.clone(), p3.clone()], &mut r).unwrap();
                assert!(child.len() == 4 || child.len() == 6);
                assert_positions_from_parents(&child, &p1, &p3);
                lengths.insert(child.len());
            }
        }
        assert_eq!(lengths.len(), 2, "both child lengths should occur");
    }

    #[test]
    fn test_multi_point_too_many_points() {
        let (p1, p2, _) = discrete_parents();
        assert_eq!(
            CrossoverMultiPoint::new(4)
                .unwrap()
                .operate(&[p1, p2], &mut rng())
                .unwrap_err(),
            OperatorError::TooFewElements {
                required: 5,
                found: 4
            }
        );
        assert!(CrossoverMultiPoint::new(0).is_err());
    }

    #[test]
    fn test_three_point_alternates_every_position() {
        let (p1, p2, _) = discrete_parents();
        let child = CrossoverMultiPoint::new(3)
            .unwrap()
            .operate(&[p1.clone(), p2.clone()], &mut rng())
            .unwrap();
        let values: Vec<i64> = child.discrete_elements().into_iter().map(|(_, v)| v).collect();
        assert!(
            values == vec![0, 2, 2, 1] || values == vec![3, 1, 0, 3],
            "unexpected child {values:?}"
        );
    }
}
