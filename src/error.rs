//! Error types for m6apred

use thiserror::Error;

/// Result type alias for m6apred operations
pub type Result<T> = std::result::Result<T, PredictError>;

/// Error types that can occur while encoding, assembling or predicting
#[derive(Debug, Error)]
pub enum PredictError {
    /// One or more required feature columns are absent from the input table
    #[error("Missing required column(s): {}", .columns.join(", "))]
    MissingColumn {
        /// Names of every absent column, in declaration order
        columns: Vec<String>,
    },

    /// A DNA sequence does not have the batch sequence length
    #[error("Sequence length mismatch at row {row}: expected {expected}, got {actual}")]
    LengthMismatch {
        /// Row index (0-based) of the offending sequence
        row: usize,
        /// Length taken from the first sequence of the batch
        expected: usize,
        /// Length of the offending sequence
        actual: usize,
    },

    /// A categorical value lies outside the declared levels of its field
    #[error("Unrecognized value '{value}' for {field}")]
    UnrecognizedCategory {
        /// Field (column) name
        field: String,
        /// Offending value
        value: String,
    },

    /// A cell could not be converted to its column type
    #[error("Invalid value in column '{column}' at row {row}: {reason}")]
    InvalidField {
        /// Column name
        column: String,
        /// Row index (0-based)
        row: usize,
        /// Reason for invalidity
        reason: String,
    },

    /// Positive threshold outside [0, 1] or not finite
    #[error("Invalid positive threshold: {0} (expected a finite value in [0, 1])")]
    InvalidThreshold(f64),

    /// Classifier returned a probability outside [0, 1]
    #[error("Classifier returned invalid probability {value} at row {row}")]
    InvalidProbability {
        /// Row index (0-based)
        row: usize,
        /// Returned value
        value: f64,
    },

    /// Classifier output does not have the expected shape
    #[error("Malformed classifier output: {0}")]
    ClassifierOutput(String),

    /// Failure raised by the classifier itself, propagated unchanged
    #[error("Classifier failed: {0}")]
    Classifier(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Feature layout of the data differs from the layout the model expects
    #[error("Feature schema mismatch: model expects {expected}, data provides {actual}")]
    SchemaMismatch {
        /// Schema the model was trained with
        expected: String,
        /// Schema derived from the data
        actual: String,
    },

    /// Model artifact is structurally invalid
    #[error("Invalid model: {0}")]
    InvalidModel(String),

    /// Model artifact is not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration is not valid TOML
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// Delimited row with the wrong number of fields
    #[error("Invalid number of fields: expected {expected}, got {actual} at line {line}")]
    FieldCount {
        /// Number of header fields
        expected: usize,
        /// Number of fields found
        actual: usize,
        /// Line number (1-based)
        line: usize,
    },

    /// Delimited text could not be read or written
    #[error("Delimited text error: {0}")]
    Csv(#[source] csv::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PredictError {
    /// Wrap an arbitrary classifier backend error
    ///
    /// ```
    /// use m6apred::PredictError;
    ///
    /// let err = PredictError::classifier(std::io::Error::other("model offline"));
    /// assert!(err.to_string().contains("model offline"));
    /// ```
    pub fn classifier<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        PredictError::Classifier(err.into())
    }
}

impl From<csv::Error> for PredictError {
    fn from(err: csv::Error) -> Self {
        if let csv::ErrorKind::UnequalLengths {
            pos,
            expected_len,
            len,
        } = err.kind()
        {
            return PredictError::FieldCount {
                expected: *expected_len as usize,
                actual: *len as usize,
                line: pos.as_ref().map_or(0, |p| p.line() as usize),
            };
        }
        PredictError::Csv(err)
    }
}
