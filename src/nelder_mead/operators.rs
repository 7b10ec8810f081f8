//! Simplex operators.
//!
//! Each operator is a pure function of a [`Simplex`]: it reads the ordered
//! vertices and returns a new decision vector. With centroid `c` of all
//! vertices but the worst `w`, best vertex `b` and reflected point `r`:
//!
//! | Operator | New vertex | Coefficient |
//! |---|---|---|
//! | [`Reflect`] | `c + α (c − w)` | α > 0 |
//! | [`Expand`] | `c + γ (r − c)` | γ > 1 |
//! | [`ContractOutside`] | `c + β (r − c)` | β in (0, 1) |
//! | [`ContractInside`] | `c − β (c − w)` | β in (0, 1) |
//! | [`Shrink`] | `(1 − σ) b + σ w` | σ in (0, 1) |

use super::simplex::Simplex;
use crate::management::OperatorError;
use crate::variables::DecisionVector;

/// A simplex move.
pub trait SimplexOperator {
    fn coefficient(&self) -> f64;

    /// Computes the new vertex.
    fn operate(&self, simplex: &Simplex) -> Result<DecisionVector, OperatorError>;
}

/// Centroid of every vertex except the worst.
pub fn mean(simplex: &Simplex) -> Result<DecisionVector, OperatorError> {
    let coords = simplex.coordinates()?;
    build(simplex, centroid(&coords))
}

fn centroid(coords: &[Vec<f64>]) -> Vec<f64> {
    let kept = &coords[..coords.len() - 1];
    let n = kept.len() as f64;
    let mut c = vec![0.0; kept[0].len()];
    for vertex in kept {
        for (ci, xi) in c.iter_mut().zip(vertex) {
            *ci += xi;
        }
    }
    c.iter_mut().for_each(|ci| *ci /= n);
    c
}

fn build(simplex: &Simplex, values: Vec<f64>) -> Result<DecisionVector, OperatorError> {
    let space = simplex.best().decision_vector().space();
    Ok(DecisionVector::from_continuous(space, &values)?)
}

/// `a + k (a − b)` element-wise.
fn away(a: &[f64], b: &[f64], k: f64) -> Vec<f64> {
    a.iter().zip(b).map(|(ai, bi)| ai + k * (ai - bi)).collect()
}

/// `a + k (b − a)` element-wise.
fn toward(a: &[f64], b: &[f64], k: f64) -> Vec<f64> {
    a.iter().zip(b).map(|(ai, bi)| ai + k * (bi - ai)).collect()
}

fn check(
    operator: &'static str,
    value: f64,
    range: &'static str,
    ok: bool,
) -> Result<f64, OperatorError> {
    if ok && value.is_finite() {
        Ok(value)
    } else {
        Err(OperatorError::CoefficientOutOfRange {
            operator,
            value,
            range,
        })
    }
}

// ============================================================================
// Reflect
// ============================================================================

/// Reflects the worst vertex through the centroid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reflect {
    coefficient: f64,
}

impl Reflect {
    pub fn new(coefficient: f64) -> Result<Self, OperatorError> {
        let coefficient = check("reflect", coefficient, "(0, inf)", coefficient > 0.0)?;
        Ok(Self { coefficient })
    }

    fn point(&self, coords: &[Vec<f64>]) -> Vec<f64> {
        let c = centroid(coords);
        away(&c, &coords[coords.len() - 1], self.coefficient)
    }
}

impl SimplexOperator for Reflect {
    fn coefficient(&self) -> f64 {
        self.coefficient
    }

    fn operate(&self, simplex: &Simplex) -> Result<DecisionVector, OperatorError> {
        let coords = simplex.coordinates()?;
        build(simplex, self.point(&coords))
    }
}

// ============================================================================
// Expand
// ============================================================================

/// Extends the reflected point further from the centroid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Expand {
    coefficient: f64,
    reflect: Reflect,
}

impl Expand {
    pub fn new(coefficient: f64, reflect: Reflect) -> Result<Self, OperatorError> {
        let coefficient = check("expand", coefficient, "(1, inf)", coefficient > 1.0)?;
        Ok(Self {
            coefficient,
            reflect,
        })
    }
}

impl SimplexOperator for Expand {
    fn coefficient(&self) -> f64 {
        self.coefficient
    }

    fn operate(&self, simplex: &Simplex) -> Result<DecisionVector, OperatorError> {
        let coords = simplex.coordinates()?;
        let c = centroid(&coords);
        let r = self.reflect.point(&coords);
        build(simplex, toward(&c, &r, self.coefficient))
    }
}

// ============================================================================
// Contractions
// ============================================================================

/// Moves part-way from the centroid towards the reflected point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContractOutside {
    coefficient: f64,
    reflect: Reflect,
}

impl ContractOutside {
    pub fn new(coefficient: f64, reflect: Reflect) -> Result<Self, OperatorError> {
        let coefficient = check(
            "contract outside",
            coefficient,
            "(0, 1)",
            coefficient > 0.0 && coefficient < 1.0,
        )?;
        Ok(Self {
            coefficient,
            reflect,
        })
    }
}

impl SimplexOperator for ContractOutside {
    fn coefficient(&self) -> f64 {
        self.coefficient
    }

    fn operate(&self, simplex: &Simplex) -> Result<DecisionVector, OperatorError> {
        let coords = simplex.coordinates()?;
        let c = centroid(&coords);
        let r = self.reflect.point(&coords);
        build(simplex, toward(&c, &r, self.coefficient))
    }
}

/// Moves part-way from the centroid towards the worst vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContractInside {
    coefficient: f64,
}

impl ContractInside {
    pub fn new(coefficient: f64) -> Result<Self, OperatorError> {
        let coefficient = check(
            "contract inside",
            coefficient,
            "(0, 1)",
            coefficient > 0.0 && coefficient < 1.0,
        )?;
        Ok(Self { coefficient })
    }
}

impl SimplexOperator for ContractInside {
    fn coefficient(&self) -> f64 {
        self.coefficient
    }

    fn operate(&self, simplex: &Simplex) -> Result<DecisionVector, OperatorError> {
        let coords = simplex.coordinates()?;
        let c = centroid(&coords);
        build(simplex, toward(&c, &coords[coords.len() - 1], self.coefficient))
    }
}

// ============================================================================
// Shrink
// ============================================================================

/// Pulls a vertex towards the best vertex.
///
/// [`operate`](SimplexOperator::operate) moves the worst vertex; a full
/// shrink step applies [`shrink_vertex`](Self::shrink_vertex) to every
/// vertex but the best.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shrink {
    coefficient: f64,
}

impl Shrink {
    pub fn new(coefficient: f64) -> Result<Self, OperatorError> {
        let coefficient = check(
            "shrink",
            coefficient,
            "(0, 1)",
            coefficient > 0.0 && coefficient < 1.0,
        )?;
        Ok(Self { coefficient })
    }

    /// `(1 − σ) best + σ vertex`.
    pub fn shrink_vertex(&self, best: &[f64], vertex: &[f64]) -> Vec<f64> {
        best.iter()
            .zip(vertex)
            .map(|(b, v)| (1.0 - self.coefficient) * b + self.coefficient * v)
            .collect()
    }

    /// Shrinks every vertex but the best, in simplex order.
    pub fn shrink_all(&self, simplex: &Simplex) -> Result<Vec<DecisionVector>, OperatorError> {
        let coords = simplex.coordinates()?;
        coords[1..]
            .iter()
            .map(|v| build(simplex, self.shrink_vertex(&coords[0], v)))
            .collect()
    }
}

impl SimplexOperator for Shrink {
    fn coefficient(&self) -> f64 {
        self.coefficient
    }

    fn operate(&self, simplex: &Simplex) -> Result<DecisionVector, OperatorError> {
        let coords = simplex.coordinates()?;
        build(
            simplex,
            self.shrink_vertex(&coords[0], &coords[coords.len() - 1]),
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
