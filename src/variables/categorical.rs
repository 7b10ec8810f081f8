//! Categorical decision variable.

use super::error::VariableError;
use rand::Rng;

/// A variable choosing one of a fixed list of labels.
///
/// Values are label indices. Arithmetic wraps around the label list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VariableCategorical {
    name: String,
    labels: Vec<String>,
}

impl VariableCategorical {
    /// Creates a categorical variable. At least one label is required.
    pub fn new<I, S>(name: impl Into<String>, labels: I) -> Result<Self, VariableError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(VariableError::InvalidBounds {
                name,
                reason: "at least one category is required",
            });
        }
        Ok(Self { name, labels })
    }

    /// Variable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Category labels, indexed by value.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Whether `index` names a category.
    pub fn contains(&self, index: usize) -> bool {
        index < self.labels.len()
    }

    /// Label for `index`, if any.
    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// Steps `delta` categories from `index`, wrapping around.
    pub fn wrap_add(&self, index: usize, delta: i64) -> usize {
        let n = self.labels.len() as i128;
        // below the label count
        (index as i128 + i128::from(delta)).rem_euclid(n) as usize
    }

    /// Picks a category uniformly.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        rng.random_range(0..self.labels.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_labels_fail() {
        assert!(VariableCategorical::new("colour", Vec::<String>::new()).is_err());
    }

    #[test]
    fn test_wrap_add() {
        let v = VariableCategorical::new("colour", ["red", "green", "blue"]).unwrap();
        assert_eq!(v.wrap_add(0, 1), 1);
        assert_eq!(v.wrap_add(2, 1), 0);
        assert_eq!(v.wrap_add(0, -1), 2);
        assert_eq!(v.label(2), Some("blue"));
        assert!(!v.contains(3));
    }

    #[test]
    fn test_wrap_add_extreme_inputs() {
        let v = VariableCategorical::new("colour", ["red", "green", "blue"]).unwrap();
        assert!(v.contains(v.wrap_add(usize::MAX, i64::MAX)));
        assert!(v.contains(v.wrap_add(0, i64::MIN)));
        // usize::MAX = 2^64 - 1 = 0 (mod 3)
        assert_eq!(v.wrap_add(usize::MAX, 1), 1);
    }
}
