//! Logistic-regression model backend
//!
//! A [`LogisticModel`] is a serialized, pre-trained linear model over the
//! features of a [`FeatureSchema`]. Categorical fields use treatment coding:
//! a level absent from its weight map contributes zero (the reference level).
//!
//! The artifact format is JSON:
//!
//! ```json
//! {
//!   "schema": {
//!     "sequence_length": 5,
//!     "numeric_features": ["gc_content", "exon_length", "distance_to_junction", "evolutionary_conservation"],
//!     "categorical_features": ["RNA_type", "RNA_region"]
//!   },
//!   "intercept": -1.2,
//!   "numeric_weights": { "gc_content": 2.0, "evolutionary_conservation": 0.8 },
//!   "rna_type_weights": { "lncRNA": -0.4 },
//!   "rna_region_weights": { "3'UTR": 0.6 },
//!   "position_weights": [{}, {}, { "A": 1.1 }, { "C": 0.9 }, {}]
//! }
//! ```
//!
//! # Examples
//!
//! ```
//! use m6apred::{FeatureSchema, LogisticModel};
//!
//! let model = LogisticModel::new(FeatureSchema::new(5), 0.0);
//! let json = model.to_json_string()?;
//! let loaded = LogisticModel::from_json_str(&json)?;
//! assert_eq!(loaded.schema.sequence_length, 5);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::classifier::{ClassProbabilities, Classifier};
use crate::error::{PredictError, Result};
use crate::io::open_reader;
use crate::operations::AssembledTable;
use crate::schema::FeatureSchema;
use crate::types::{Nucleotide, RnaRegion, RnaType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

/// Pre-trained logistic-regression classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogisticModel {
    /// Feature layout the model was trained on
    pub schema: FeatureSchema,
    /// Bias term
    pub intercept: f64,
    /// Weight per numeric feature; absent features weigh zero
    #[serde(default)]
    pub numeric_weights: BTreeMap<String, f64>,
    /// Weight per `RNA_type` level
    #[serde(default)]
    pub rna_type_weights: BTreeMap<RnaType, f64>,
    /// Weight per `RNA_region` level
    #[serde(default)]
    pub rna_region_weights: BTreeMap<RnaRegion, f64>,
    /// Per-position nucleotide weights, one map per sequence position
    #[serde(default)]
    pub position_weights: Vec<BTreeMap<Nucleotide, f64>>,
}

impl LogisticModel {
    /// Model with only an intercept, for the given schema
    pub fn new(schema: FeatureSchema, intercept: f64) -> Self {
        let position_weights = vec![BTreeMap::new(); schema.sequence_length];
        LogisticModel {
            schema,
            intercept,
            numeric_weights: BTreeMap::new(),
            rna_type_weights: BTreeMap::new(),
            rna_region_weights: BTreeMap::new(),
            position_weights,
        }
    }

    /// Parse and validate a JSON model artifact
    pub fn from_json_str(json: &str) -> Result<Self> {
        let model: LogisticModel = serde_json::from_str(json)?;
        model.validate()?;
        Ok(model)
    }

    /// Parse and validate a JSON model artifact from a reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let model: LogisticModel = serde_json::from_reader(reader)?;
        model.validate()?;
        Ok(model)
    }

    /// Load a JSON model artifact from disk (`.gz` is decompressed)
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let model = Self::from_reader(open_reader(path)?)?;
        tracing::debug!(path = %path.display(), schema = %model.schema, "loaded logistic model");
        Ok(model)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check internal consistency of the artifact
    ///
    /// # Errors
    ///
    /// Returns [`PredictError::InvalidModel`] if a numeric weight names a
    /// feature outside the schema, if the number of position weight maps
    /// differs from the schema sequence length, or if any weight is not finite.
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = self
            .numeric_weights
            .keys()
            .find(|name| !self.schema.numeric_features.contains(name))
        {
            return Err(PredictError::InvalidModel(format!(
                "weight for unknown numeric feature '{name}'"
            )));
        }

        if self.position_weights.len() != self.schema.sequence_length {
            return Err(PredictError::InvalidModel(format!(
                "{} position weight maps for sequence length {}",
                self.position_weights.len(),
                self.schema.sequence_length
            )));
        }

        let weights = std::iter::once(self.intercept)
            .chain(self.numeric_weights.values().copied())
            .chain(self.rna_type_weights.values().copied())
            .chain(self.rna_region_weights.values().copied())
            .chain(self.position_weights.iter().flat_map(|m| m.values().copied()));
        for weight in weights {
            if !weight.is_finite() {
                return Err(PredictError::InvalidModel(format!(
                    "non-finite weight {weight}"
                )));
            }
        }
        Ok(())
    }

    fn linear_predictor(&self, table: &AssembledTable, row: usize) -> f64 {
        let record = &table.records()[row];
        let mut z = self.intercept;

        for (name, weight) in &self.numeric_weights {
            z += weight * record.numeric(name).unwrap_or(0.0);
        }
        z += self.rna_type_weights.get(&record.rna_type).copied().unwrap_or(0.0);
        z += self.rna_region_weights.get(&record.rna_region).copied().unwrap_or(0.0);

        for (weights, nucleotide) in self.position_weights.iter().zip(table.encoded().row(row)) {
            z += weights.get(nucleotide).copied().unwrap_or(0.0);
        }
        z
    }
}

#[inline]
fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

impl Classifier for LogisticModel {
    fn classify(&self, table: &AssembledTable) -> Result<Vec<ClassProbabilities>> {
        self.schema.check_compatible(table.schema())?;

        Ok((0..table.n_rows())
            .map(|row| ClassProbabilities::from_positive(sigmoid(self.linear_predictor(table, row))))
            .collect())
    }
}
