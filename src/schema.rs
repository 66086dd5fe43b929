//! Explicit feature layout shared by model artifacts and inference
//!
//! The schema fixes the order and names of every feature a classifier sees:
//! numeric features first, then categorical features, then one column per
//! sequence position. Model backends store the schema they were trained with
//! and compare it with the schema of the data before scoring.
//!
//! # Examples
//!
//! ```
//! use m6apred::FeatureSchema;
//!
//! let schema = FeatureSchema::new(5);
//! let names = schema.feature_names();
//! assert_eq!(names.first().map(String::as_str), Some("gc_content"));
//! assert_eq!(names.last().map(String::as_str), Some("position_5"));
//! assert_eq!(names.len(), 4 + 2 + 5);
//! ```

use crate::error::{PredictError, Result};
use crate::operations::position_column;
use crate::types::{DNA_5MER, RNA_REGION, RNA_TYPE};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Column name of the GC-content feature
pub const GC_CONTENT: &str = "gc_content";
/// Column name of the exon-length feature
pub const EXON_LENGTH: &str = "exon_length";
/// Column name of the distance-to-junction feature
pub const DISTANCE_TO_JUNCTION: &str = "distance_to_junction";
/// Column name of the conservation-score feature
pub const EVOLUTIONARY_CONSERVATION: &str = "evolutionary_conservation";

/// Columns a sample table must provide, in declaration order
pub const REQUIRED_COLUMNS: [&str; 7] = [
    GC_CONTENT,
    RNA_TYPE,
    RNA_REGION,
    EXON_LENGTH,
    DISTANCE_TO_JUNCTION,
    EVOLUTIONARY_CONSERVATION,
    DNA_5MER,
];

/// Numeric features, in model order
pub const NUMERIC_FEATURES: [&str; 4] = [
    GC_CONTENT,
    EXON_LENGTH,
    DISTANCE_TO_JUNCTION,
    EVOLUTIONARY_CONSERVATION,
];

/// Categorical (non-sequence) features, in model order
pub const CATEGORICAL_FEATURES: [&str; 2] = [RNA_TYPE, RNA_REGION];

/// Feature layout consumed by a classifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSchema {
    /// Number of encoded sequence positions
    pub sequence_length: usize,
    /// Numeric feature names, in order
    pub numeric_features: Vec<String>,
    /// Categorical feature names, in order
    pub categorical_features: Vec<String>,
}

impl FeatureSchema {
    /// Canonical schema for sequences of `sequence_length` nucleotides
    pub fn new(sequence_length: usize) -> Self {
        FeatureSchema {
            sequence_length,
            numeric_features: NUMERIC_FEATURES.iter().map(|s| s.to_string()).collect(),
            categorical_features: CATEGORICAL_FEATURES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Names of the positional columns `position_1 … position_n`
    pub fn position_features(&self) -> Vec<String> {
        (1..=self.sequence_length).map(position_column).collect()
    }

    /// All feature names in model order
    pub fn feature_names(&self) -> Vec<String> {
        let mut names = Vec::with_capacity(
            self.numeric_features.len() + self.categorical_features.len() + self.sequence_length,
        );
        names.extend(self.numeric_features.iter().cloned());
        names.extend(self.categorical_features.iter().cloned());
        names.extend(self.position_features());
        names
    }

    /// Fail unless `actual` has exactly this layout
    ///
    /// # Errors
    ///
    /// Returns [`PredictError::SchemaMismatch`] naming both layouts.
    pub fn check_compatible(&self, actual: &FeatureSchema) -> Result<()> {
        if self == actual {
            return Ok(());
        }
        tracing::warn!(expected = %self, actual = %actual, "feature schema mismatch");
        Err(PredictError::SchemaMismatch {
            expected: self.to_string(),
            actual: actual.to_string(),
        })
    }
}

impl fmt::Display for FeatureSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}; {}; position_1..position_{}]",
            self.numeric_features.join(","),
            self.categorical_features.join(","),
            self.sequence_length
        )
    }
}
