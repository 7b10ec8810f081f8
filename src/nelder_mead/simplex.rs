//! The simplex: `dimension + 1` evaluated vertices, best first.

use crate::management::{Individual, OperatorError, Population};

/// An ordered set of evaluated vertices.
///
/// Vertices are held in ascending fitness order (ties keep their given
/// order), so index 0 is the best vertex and the last is the worst.
/// Operators only read a simplex.
#[derive(Debug, Clone)]
pub struct Simplex {
    vertices: Vec<Individual>,
}

impl Simplex {
    /// Builds a simplex from evaluated, continuous vertices.
    ///
    /// Fails unless there are exactly `n + 1` vertices of length `n`, each
    /// with a fitness.
    pub fn new(mut vertices: Vec<Individual>) -> Result<Self, OperatorError> {
        let dimension = vertices
            .first()
            .map(|v| v.decision_vector().len())
            .unwrap_or(0);
        if dimension == 0 || vertices.len() != dimension + 1 {
            return Err(OperatorError::SimplexSize {
                expected: dimension + 1,
                found: vertices.len(),
            });
        }
        for (index, v) in vertices.iter().enumerate() {
            if v.fitness().is_err() {
                return Err(OperatorError::VertexFitnessMissing { index });
            }
            if v.decision_vector().len() != dimension || !v.decision_vector().space().is_continuous() {
                return Err(OperatorError::NotContinuous);
            }
        }
        vertices.sort_by(|a, b| fitness_of(a).total_cmp(&fitness_of(b)));
        Ok(Self { vertices })
    }

    /// A simplex over the members of a population.
    pub fn from_population(population: &Population) -> Result<Self, OperatorError> {
        Self::new(population.iter().cloned().collect())
    }

    /// Number of coordinates per vertex.
    pub fn dimension(&self) -> usize {
        self.vertices.len() - 1
    }

    /// Vertices, best first.
    pub fn vertices(&self) -> &[Individual] {
        &self.vertices
    }

    pub fn best(&self) -> &Individual {
        &self.vertices[0]
    }

    pub fn worst(&self) -> &Individual {
        &self.vertices[self.vertices.len() - 1]
    }

    pub fn second_worst(&self) -> &Individual {
        &self.vertices[self.vertices.len() - 2]
    }

    /// Fitness of each vertex, best first.
    pub fn fitnesses(&self) -> Vec<f64> {
        self.vertices.iter().map(fitness_of).collect()
    }

    /// Coordinates of each vertex.
    pub(crate) fn coordinates(&self) -> Result<Vec<Vec<f64>>, OperatorError> {
        self.vertices
            .iter()
            .map(|v| v.decision_vector().to_continuous().map_err(OperatorError::from))
            .collect()
    }
}

fn fitness_of(ind: &Individual) -> f64 {
    ind.fitness().unwrap_or(f64::INFINITY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nelder_mead::test_support::evaluated_vertices;

    #[test]
    fn test_vertices_sorted_best_first() {
        let inds = evaluated_vertices(&[&[0.0, 1.0], &[1.0, 0.0], &[0.0, 0.0]], &[3.0, 1.0, 2.0]);
        let simplex = Simplex::new(inds).unwrap();
        assert_eq!(simplex.fitnesses(), vec![1.0, 2.0, 3.0]);
        assert_eq!(
            simplex.best().decision_vector().to_continuous().unwrap(),
            vec![1.0, 0.0]
        );
        assert_eq!(simplex.second_worst().fitness().unwrap(), 2.0);
    }

    #[test]
    fn test_wrong_vertex_count_fails() {
        let inds = evaluated_vertices(&[&[0.0, 1.0], &[1.0, 0.0]], &[1.0, 2.0]);
        assert_eq!(
            Simplex::new(inds).unwrap_err(),
            OperatorError::SimplexSize {
                expected: 3,
                found: 2
            }
        );
        assert!(Simplex::new(Vec::new()).is_err());
    }
}
