//! Classifier capability consumed by the predictor
//!
//! A classifier is any pre-trained model that, given an [`AssembledTable`],
//! returns one [`ClassProbabilities`] per row (same order) containing at least
//! the [`POSITIVE_CLASS`] label. The predictor never looks inside the model.
//!
//! # Examples
//!
//! ```
//! use m6apred::classifier::{ClassProbabilities, Classifier};
//! use m6apred::operations::AssembledTable;
//! use m6apred::Result;
//!
//! /// Scores every site with the same probability
//! struct Constant(f64);
//!
//! impl Classifier for Constant {
//!     fn classify(&self, table: &AssembledTable) -> Result<Vec<ClassProbabilities>> {
//!         Ok(vec![ClassProbabilities::from_positive(self.0); table.n_rows()])
//!     }
//! }
//! ```

use crate::error::Result;
use crate::operations::AssembledTable;
use std::collections::BTreeMap;

/// Label of the m6A-present class
pub const POSITIVE_CLASS: &str = "Positive";
/// Label of the m6A-absent class
pub const NEGATIVE_CLASS: &str = "Negative";

/// Per-class probabilities of one row
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassProbabilities {
    classes: BTreeMap<String, f64>,
}

impl ClassProbabilities {
    /// Empty probability map
    pub fn new() -> Self {
        Self::default()
    }

    /// Binary map `{Positive: p, Negative: 1 - p}`
    ///
    /// ```
    /// use m6apred::classifier::ClassProbabilities;
    ///
    /// let probs = ClassProbabilities::from_positive(0.7);
    /// assert_eq!(probs.positive(), Some(0.7));
    /// assert!((probs.get("Negative").unwrap() - 0.3).abs() < 1e-12);
    /// ```
    pub fn from_positive(probability: f64) -> Self {
        let mut probs = Self::new();
        probs.insert(POSITIVE_CLASS, probability);
        probs.insert(NEGATIVE_CLASS, 1.0 - probability);
        probs
    }

    /// Set the probability of `class`
    pub fn insert<S: Into<String>>(&mut self, class: S, probability: f64) {
        self.classes.insert(class.into(), probability);
    }

    /// Probability of `class`
    pub fn get(&self, class: &str) -> Option<f64> {
        self.classes.get(class).copied()
    }

    /// Probability of [`POSITIVE_CLASS`]
    pub fn positive(&self) -> Option<f64> {
        self.get(POSITIVE_CLASS)
    }

    /// Class labels present, sorted
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for ClassProbabilities {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        ClassProbabilities {
            classes: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Pre-trained model returning per-row class probabilities
///
/// Implementations receive the whole table in one call and must return one
/// entry per row in input order. Backend failures should be wrapped with
/// [`PredictError::classifier`](crate::PredictError::classifier).
pub trait Classifier {
    /// Score every row of `table`
    fn classify(&self, table: &AssembledTable) -> Result<Vec<ClassProbabilities>>;
}

impl<C: Classifier + ?Sized> Classifier for &C {
    fn classify(&self, table: &AssembledTable) -> Result<Vec<ClassProbabilities>> {
        (**self).classify(table)
    }
}

impl<C: Classifier + ?Sized> Classifier for Box<C> {
    fn classify(&self, table: &AssembledTable) -> Result<Vec<ClassProbabilities>> {
        (**self).classify(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_positive() {
        let probs = ClassProbabilities::from_positive(0.25);
        assert_eq!(probs.positive(), Some(0.25));
        assert_eq!(probs.get(NEGATIVE_CLASS), Some(0.75));
        assert_eq!(probs.classes().collect::<Vec<_>>(), vec!["Negative", "Positive"]);
    }

    #[test]
    fn test_from_iter() {
        let probs: ClassProbabilities = [("Positive", 0.9), ("Negative", 0.1)].into_iter().collect();
        assert_eq!(probs.positive(), Some(0.9));
        assert_eq!(probs.get("Unknown"), None);
    }

    #[test]
    fn test_missing_positive() {
        let mut probs = ClassProbabilities::new();
        probs.insert("Negative", 1.0);
        assert_eq!(probs.positive(), None);
    }
}
