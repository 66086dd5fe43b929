//! Batch and single-site m6A prediction
//!
//! [`predict_batch`] validates and assembles a feature table, hands the whole
//! table to a [`Classifier`] in one call, and appends two columns to the
//! caller's table:
//!
//! - `predicted_m6A_prob`: the classifier's `Positive` probability
//! - `predicted_m6A_status`: `Positive` iff the probability is strictly above
//!   the threshold, `Negative` otherwise
//!
//! Row count and order are preserved. Any failure aborts the whole batch.
//!
//! # Examples
//!
//! ```
//! use m6apred::classifier::{ClassProbabilities, Classifier};
//! use m6apred::operations::AssembledTable;
//! use m6apred::predict::{predict_single, SampleFeatures};
//! use m6apred::types::M6aStatus;
//!
//! struct Constant(f64);
//!
//! impl Classifier for Constant {
//!     fn classify(&self, table: &AssembledTable) -> m6apred::Result<Vec<ClassProbabilities>> {
//!         Ok(vec![ClassProbabilities::from_positive(self.0); table.n_rows()])
//!     }
//! }
//!
//! let sample = SampleFeatures {
//!     gc_content: 0.55,
//!     rna_type: "mRNA",
//!     rna_region: "CDS",
//!     exon_length: 1200.0,
//!     distance_to_junction: 18.0,
//!     evolutionary_conservation: 0.72,
//!     dna_5mer: "GGACT",
//! };
//!
//! let prediction = predict_single(&Constant(0.8), &sample, 0.5)?;
//! assert_eq!(prediction.predicted_m6a_prob, 0.8);
//! assert_eq!(prediction.predicted_m6a_status, M6aStatus::Positive);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::classifier::{Classifier, POSITIVE_CLASS};
use crate::config::{validate_threshold, PredictorConfig};
use crate::error::{PredictError, Result};
use crate::operations::assemble;
use crate::schema::{
    DISTANCE_TO_JUNCTION, EVOLUTIONARY_CONSERVATION, EXON_LENGTH, GC_CONTENT, REQUIRED_COLUMNS,
};
use crate::table::FeatureTable;
use crate::types::{M6aStatus, DNA_5MER, RNA_REGION, RNA_TYPE};

/// Column name of the appended probability
pub const PROB_COLUMN: &str = "predicted_m6A_prob";
/// Column name of the appended status
pub const STATUS_COLUMN: &str = "predicted_m6A_status";

/// Probability and thresholded call for one site
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// Classifier `Positive` probability, in [0, 1]
    pub predicted_m6a_prob: f64,
    /// `Positive` iff `predicted_m6a_prob > threshold`
    pub predicted_m6a_status: M6aStatus,
}

/// Caller's feature table with one [`Prediction`] per row
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionTable {
    features: FeatureTable,
    predictions: Vec<Prediction>,
}

impl PredictionTable {
    /// Original feature table, unchanged
    pub fn features(&self) -> &FeatureTable {
        &self.features
    }

    /// Predictions, row-aligned with [`features`](Self::features)
    pub fn predictions(&self) -> &[Prediction] {
        &self.predictions
    }

    /// Number of rows
    #[inline]
    pub fn n_rows(&self) -> usize {
        self.predictions.len()
    }

    /// Whether the table has no rows
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.predictions.is_empty()
    }

    /// Original column names, with the two prediction columns appended
    ///
    /// A table that already carries `predicted_m6A_prob` or
    /// `predicted_m6A_status` (a rescored prediction file) keeps those columns
    /// in place; their cells are overwritten by [`row`](Self::row).
    pub fn columns(&self) -> Vec<String> {
        let mut columns = self.features.columns().to_vec();
        for name in [PROB_COLUMN, STATUS_COLUMN] {
            if !self.features.has_column(name) {
                columns.push(name.to_string());
            }
        }
        columns
    }

    /// Cells of row `index`, aligned with [`columns`](Self::columns)
    pub fn row(&self, index: usize) -> Option<Vec<String>> {
        let features = self.features.row(index)?;
        let prediction = self.predictions.get(index)?;
        let mut row = features.to_vec();
        let cells = [
            (PROB_COLUMN, prediction.predicted_m6a_prob.to_string()),
            (STATUS_COLUMN, prediction.predicted_m6a_status.to_string()),
        ];
        for (name, value) in cells {
            match self.features.column_index(name) {
                Some(column) => row[column] = value,
                None => row.push(value),
            }
        }
        Some(row)
    }

    /// Flatten into a plain table holding the two prediction columns
    ///
    /// # Errors
    ///
    /// Returns [`PredictError::FieldCount`] if the prediction count differs
    /// from the feature row count.
    pub fn into_feature_table(self) -> Result<FeatureTable> {
        let PredictionTable {
            mut features,
            predictions,
        } = self;
        let (probs, statuses): (Vec<String>, Vec<String>) = predictions
            .iter()
            .map(|p| (p.predicted_m6a_prob.to_string(), p.predicted_m6a_status.to_string()))
            .unzip();
        features.set_column(PROB_COLUMN, probs)?;
        features.set_column(STATUS_COLUMN, statuses)?;
        Ok(features)
    }
}

/// Score every row of `table`
///
/// A row is `Positive` only when its probability is strictly greater than
/// `positive_threshold`; a probability equal to the threshold is `Negative`.
/// The threshold itself must be a finite value in [0, 1]; values outside that
/// range are rejected before any row is assembled.
///
/// # Errors
///
/// - [`PredictError::InvalidThreshold`] if `positive_threshold` is NaN,
///   infinite, below 0 or above 1
/// - any assembly error (see [`assemble`]), raised before the classifier runs
/// - classifier errors, unchanged
/// - [`PredictError::ClassifierOutput`] if the classifier returns the wrong
///   number of rows or a row without a `Positive` probability
/// - [`PredictError::InvalidProbability`] for values outside [0, 1]
pub fn predict_batch<C: Classifier + ?Sized>(
    classifier: &C,
    table: &FeatureTable,
    positive_threshold: f64,
) -> Result<PredictionTable> {
    validate_threshold(positive_threshold)?;
    let assembled = assemble(table)?;

    if assembled.is_empty() {
        tracing::debug!("empty feature table, classifier not called");
        return Ok(PredictionTable {
            features: table.clone(),
            predictions: Vec::new(),
        });
    }

    let probabilities = classifier.classify(&assembled)?;
    if probabilities.len() != assembled.n_rows() {
        return Err(PredictError::ClassifierOutput(format!(
            "expected {} rows, got {}",
            assembled.n_rows(),
            probabilities.len()
        )));
    }

    let mut predictions = Vec::with_capacity(probabilities.len());
    for (row, probs) in probabilities.iter().enumerate() {
        let prob = probs.positive().ok_or_else(|| {
            PredictError::ClassifierOutput(format!("row {row} has no '{POSITIVE_CLASS}' probability"))
        })?;
        if !(0.0..=1.0).contains(&prob) {
            return Err(PredictError::InvalidProbability { row, value: prob });
        }

        predictions.push(Prediction {
            predicted_m6a_prob: prob,
            predicted_m6a_status: M6aStatus::from_probability(prob, positive_threshold),
        });
    }

    tracing::debug!(
        rows = predictions.len(),
        positive = predictions
            .iter()
            .filter(|p| p.predicted_m6a_status == M6aStatus::Positive)
            .count(),
        threshold = positive_threshold,
        "scored feature table"
    );

    Ok(PredictionTable {
        features: table.clone(),
        predictions,
    })
}

/// Scalar features of one site
///
/// Categorical fields are raw labels; they are leveled exactly as table cells
/// are.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleFeatures<'a> {
    /// GC fraction (0-1)
    pub gc_content: f64,
    /// `mRNA`, `lincRNA`, `lncRNA` or `pseudogene`
    pub rna_type: &'a str,
    /// `CDS`, `intron`, `3'UTR` or `5'UTR`
    pub rna_region: &'a str,
    /// Length of the containing exon
    pub exon_length: f64,
    /// Distance to the nearest splice junction
    pub distance_to_junction: f64,
    /// Conservation score
    pub evolutionary_conservation: f64,
    /// Sequence centred on the site
    pub dna_5mer: &'a str,
}

impl SampleFeatures<'_> {
    /// One-row feature table holding these values
    pub fn to_feature_table(&self) -> Result<FeatureTable> {
        let mut table = FeatureTable::new(REQUIRED_COLUMNS);
        let row = REQUIRED_COLUMNS.map(|column| match column {
            GC_CONTENT => self.gc_content.to_string(),
            RNA_TYPE => self.rna_type.to_string(),
            RNA_REGION => self.rna_region.to_string(),
            EXON_LENGTH => self.exon_length.to_string(),
            DISTANCE_TO_JUNCTION => self.distance_to_junction.to_string(),
            EVOLUTIONARY_CONSERVATION => self.evolutionary_conservation.to_string(),
            DNA_5MER => self.dna_5mer.to_string(),
            _ => String::new(),
        });
        table.push_row(row)?;
        Ok(table)
    }
}

/// Score a single site
///
/// Builds a one-row table from `sample` and delegates to [`predict_batch`].
pub fn predict_single<C: Classifier + ?Sized>(
    classifier: &C,
    sample: &SampleFeatures<'_>,
    positive_threshold: f64,
) -> Result<Prediction> {
    let result = predict_batch(classifier, &sample.to_feature_table()?, positive_threshold)?;
    result.predictions().first().copied().ok_or_else(|| {
        PredictError::ClassifierOutput("no prediction for single sample".to_string())
    })
}

/// Classifier bound to a configuration
///
/// ```
/// use m6apred::{FeatureSchema, LogisticModel, Predictor, PredictorConfig};
///
/// let model = LogisticModel::new(FeatureSchema::new(5), 0.0);
/// let predictor = Predictor::new(model, PredictorConfig::default());
/// assert_eq!(predictor.config().positive_threshold, 0.5);
/// ```
#[derive(Debug, Clone)]
pub struct Predictor<C> {
    classifier: C,
    config: PredictorConfig,
}

impl<C: Classifier> Predictor<C> {
    /// Bind `classifier` to `config`
    pub fn new(classifier: C, config: PredictorConfig) -> Self {
        Predictor { classifier, config }
    }

    /// Bound configuration
    pub fn config(&self) -> &PredictorConfig {
        &self.config
    }

    /// Bound classifier
    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// [`predict_batch`] with the configured threshold
    pub fn predict_batch(&self, table: &FeatureTable) -> Result<PredictionTable> {
        predict_batch(&self.classifier, table, self.config.positive_threshold)
    }

    /// [`predict_single`] with the configured threshold
    pub fn predict_single(&self, sample: &SampleFeatures<'_>) -> Result<Prediction> {
        predict_single(&self.classifier, sample, self.config.positive_threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::ClassProbabilities;
    use crate::operations::AssembledTable;
    use std::cell::Cell;

    /// Returns a fixed probability per row and counts invocations
    struct Stub {
        probs: Vec<f64>,
        calls: Cell<usize>,
    }

    impl Stub {
        fn constant(p: f64, rows: usize) -> Self {
            Stub {
                probs: vec![p; rows],
                calls: Cell::new(0),
            }
        }

        fn per_row(probs: &[f64]) -> Self {
            Stub {
                probs: probs.to_vec(),
                calls: Cell::new(0),
            }
        }
    }

    impl Classifier for Stub {
        fn classify(&self, table: &AssembledTable) -> Result<Vec<ClassProbabilities>> {
            self.calls.set(self.calls.get() + 1);
            Ok(self
                .probs
                .iter()
                .take(table.n_rows())
                .map(|&p| ClassProbabilities::from_positive(p))
                .collect())
        }
    }

    struct Failing;

    impl Classifier for Failing {
        fn classify(&self, _table: &AssembledTable) -> Result<Vec<ClassProbabilities>> {
            Err(PredictError::classifier("model unavailable"))
        }
    }

    fn sample_table(rows: usize) -> FeatureTable {
        let mut columns = vec!["site_id"];
        columns.extend(REQUIRED_COLUMNS);
        let mut table = FeatureTable::new(columns);
        let kmers = ["GGACT", "AGACA", "TGACC", "GAACT"];
        for i in 0..rows {
            let id = format!("site{i}");
            table
                .push_row([
                    id.as_str(),
                    "0.5",
                    "mRNA",
                    "3'UTR",
                    "900",
                    "12",
                    "0.6",
                    kmers[i % kmers.len()],
                ])
                .unwrap();
        }
        table
    }

    #[test]
    fn test_constant_classifier_three_rows() {
        let stub = Stub::constant(0.7, 3);
        let result = predict_batch(&stub, &sample_table(3), 0.6).unwrap();

        assert_eq!(result.n_rows(), 3);
        for p in result.predictions() {
            assert_eq!(p.predicted_m6a_prob, 0.7);
            assert_eq!(p.predicted_m6a_status, M6aStatus::Positive);
        }
        assert_eq!(stub.calls.get(), 1);
    }

    #[test]
    fn test_threshold_boundary() {
        let stub = Stub::per_row(&[0.5, 0.500001, 0.499999]);
        let result = predict_batch(&stub, &sample_table(3), 0.5).unwrap();
        let statuses: Vec<_> = result
            .predictions()
            .iter()
            .map(|p| p.predicted_m6a_status)
            .collect();
        assert_eq!(
            statuses,
            vec![M6aStatus::Negative, M6aStatus::Positive, M6aStatus::Negative]
        );
    }

    #[test]
    fn test_columns_and_row_order_preserved() {
        let table = sample_table(4);
        let stub = Stub::per_row(&[0.1, 0.9, 0.2, 0.8]);
        let result = predict_batch(&stub, &table, 0.5).unwrap();

        let mut expected = table.columns().to_vec();
        expected.push(PROB_COLUMN.to_string());
        expected.push(STATUS_COLUMN.to_string());
        assert_eq!(result.columns(), expected);
        assert_eq!(result.features(), &table);

        for i in 0..4 {
            let row = result.row(i).unwrap();
            assert_eq!(row[0], format!("site{i}"));
        }
        assert_eq!(result.row(1).unwrap()[9], "Positive");
        assert_eq!(result.row(2).unwrap()[8], "0.2");
        assert!(result.row(4).is_none());
    }

    #[test]
    fn test_missing_column_skips_classifier() {
        let mut table = FeatureTable::new(["gc_content", "DNA_5mer"]);
        table.push_row(["0.5", "GGACT"]).unwrap();
        let stub = Stub::constant(0.9, 1);

        assert!(matches!(
            predict_batch(&stub, &table, 0.5),
            Err(PredictError::MissingColumn { .. })
        ));
        assert_eq!(stub.calls.get(), 0);
    }

    #[test]
    fn test_each_required_column_checked() {
        for missing in REQUIRED_COLUMNS {
            let full = sample_table(2);
            let kept: Vec<usize> = (0..full.columns().len())
                .filter(|&i| full.columns()[i] != missing)
                .collect();
            let mut table = FeatureTable::new(kept.iter().map(|&i| full.columns()[i].as_str()));
            for row in full.rows() {
                table.push_row(kept.iter().map(|&i| row[i].as_str())).unwrap();
            }

            let stub = Stub::constant(0.9, 2);
            match predict_batch(&stub, &table, 0.5) {
                Err(PredictError::MissingColumn { columns }) => assert_eq!(columns, vec![missing]),
                other => panic!("expected MissingColumn for {missing}, got {other:?}"),
            }
            assert_eq!(stub.calls.get(), 0);
        }
    }

    #[test]
    fn test_invalid_threshold() {
        let stub = Stub::constant(0.9, 1);
        assert!(matches!(
            predict_batch(&stub, &sample_table(1), 1.5),
            Err(PredictError::InvalidThreshold(_))
        ));
        assert_eq!(stub.calls.get(), 0);
    }

    #[test]
    fn test_classifier_failure_propagates() {
        let err = predict_batch(&Failing, &sample_table(2), 0.5).unwrap_err();
        assert!(matches!(err, PredictError::Classifier(_)));
        assert!(err.to_string().contains("model unavailable"));
    }

    #[test]
    fn test_short_classifier_output() {
        let stub = Stub::constant(0.9, 2);
        assert!(matches!(
            predict_batch(&stub, &sample_table(3), 0.5),
            Err(PredictError::ClassifierOutput(_))
        ));
    }

    #[test]
    fn test_out_of_range_probability() {
        let stub = Stub::per_row(&[0.3, 1.2]);
        assert!(matches!(
            predict_batch(&stub, &sample_table(2), 0.5),
            Err(PredictError::InvalidProbability { row: 1, .. })
        ));
    }

    #[test]
    fn test_missing_positive_class() {
        struct NegativeOnly;
        impl Classifier for NegativeOnly {
            fn classify(&self, table: &AssembledTable) -> Result<Vec<ClassProbabilities>> {
                Ok((0..table.n_rows())
                    .map(|_| [("Negative", 1.0)].into_iter().collect())
                    .collect())
            }
        }
        assert!(matches!(
            predict_batch(&NegativeOnly, &sample_table(1), 0.5),
            Err(PredictError::ClassifierOutput(_))
        ));
    }

    #[test]
    fn test_empty_table() {
        let stub = Stub::constant(0.9, 0);
        let result = predict_batch(&stub, &sample_table(0), 0.5).unwrap();
        assert!(result.is_empty());
        assert_eq!(stub.calls.get(), 0);
    }

    #[test]
    fn test_into_feature_table() {
        let stub = Stub::per_row(&[0.25, 0.75]);
        let flat = predict_batch(&stub, &sample_table(2), 0.5)
            .unwrap()
            .into_feature_table()
            .unwrap();
        assert_eq!(flat.column(PROB_COLUMN), Some(vec!["0.25", "0.75"]));
        assert_eq!(flat.column(STATUS_COLUMN), Some(vec!["Negative", "Positive"]));
    }

    #[test]
    fn test_rescoring_overwrites_prediction_columns() {
        let first = predict_batch(&Stub::constant(0.2, 2), &sample_table(2), 0.5)
            .unwrap()
            .into_feature_table()
            .unwrap();
        let width = first.columns().len();

        let second = predict_batch(&Stub::constant(0.9, 2), &first, 0.5).unwrap();
        let columns = second.columns();
        assert_eq!(columns.len(), width);
        assert_eq!(columns.iter().filter(|c| *c == PROB_COLUMN).count(), 1);

        let prob = columns.iter().position(|c| c == PROB_COLUMN).unwrap();
        let status = columns.iter().position(|c| c == STATUS_COLUMN).unwrap();
        let row = second.row(1).unwrap();
        assert_eq!(row.len(), width);
        assert_eq!(row[prob], "0.9");
        assert_eq!(row[status], "Positive");

        let flat = second.into_feature_table().unwrap();
        assert_eq!(flat.columns().len(), width);
        assert_eq!(flat.column(PROB_COLUMN), Some(vec!["0.9", "0.9"]));
    }

    #[test]
    fn test_single_matches_batch() {
        let sample = SampleFeatures {
            gc_content: 0.4375,
            rna_type: "lincRNA",
            rna_region: "5'UTR",
            exon_length: 321.0,
            distance_to_junction: 7.5,
            evolutionary_conservation: 0.125,
            dna_5mer: "AGACT",
        };
        let stub = Stub::constant(0.65, 1);

        let single = predict_single(&stub, &sample, 0.6).unwrap();
        let batch = predict_batch(&stub, &sample.to_feature_table().unwrap(), 0.6).unwrap();
        assert_eq!(single, batch.predictions()[0]);
        assert_eq!(single.predicted_m6a_status, M6aStatus::Positive);
    }

    #[test]
    fn test_single_rejects_unknown_level() {
        let sample = SampleFeatures {
            gc_content: 0.5,
            rna_type: "tRNA",
            rna_region: "CDS",
            exon_length: 100.0,
            distance_to_junction: 1.0,
            evolutionary_conservation: 0.5,
            dna_5mer: "GGACT",
        };
        assert!(matches!(
            predict_single(&Stub::constant(0.5, 1), &sample, 0.5),
            Err(PredictError::UnrecognizedCategory { .. })
        ));
    }

    #[test]
    fn test_predictor_uses_config() {
        let predictor = Predictor::new(
            Stub::constant(0.55, 2),
            PredictorConfig::with_threshold(0.6).unwrap(),
        );
        let result = predictor.predict_batch(&sample_table(2)).unwrap();
        assert!(result
            .predictions()
            .iter()
            .all(|p| p.predicted_m6a_status == M6aStatus::Negative));
    }
}
