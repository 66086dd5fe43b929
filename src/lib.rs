//! m6apred: m6A modification prediction from short sequence features
//!
//! # Overview
//!
//! m6apred scores candidate N6-methyladenosine (m6A) sites with a pre-trained
//! classifier. Each site is described by a handful of transcript features and a
//! short DNA sequence centred on it (typically a 5-mer). The pipeline is:
//!
//! 1. **Encode**: split each sequence into per-position nucleotide columns
//! 2. **Assemble**: check required columns, level categorical fields, attach
//!    the encoded columns
//! 3. **Classify**: hand the whole table to a [`Classifier`] in one call
//! 4. **Threshold**: `Positive` iff the probability is strictly above the cutoff
//!
//! ## Quick Start
//!
//! ```no_run
//! use m6apred::io::{read_sample_table, PredictionWriter};
//! use m6apred::{predict_batch, LogisticModel};
//!
//! # fn main() -> m6apred::Result<()> {
//! let model = LogisticModel::from_path("m6a_model.json")?;
//! let samples = read_sample_table("samples.csv")?;
//!
//! let result = predict_batch(&model, &samples, 0.5)?;
//!
//! let mut writer = PredictionWriter::create("predictions.csv")?;
//! writer.write_table(&result)?;
//! writer.finish()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: closed categorical levels (nucleotide, RNA type/region, status)
//! - [`operations`]: sequence encoding and feature assembly
//! - [`schema`]: explicit feature layout shared by models and inference
//! - [`classifier`]: the classifier capability trait
//! - [`model`]: logistic-regression backend loaded from JSON
//! - [`predict`]: batch and single-site prediction
//! - [`config`]: predictor settings
//! - [`io`]: delimited sample tables and result writing

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod classifier;
pub mod config;
pub mod error;
pub mod io;
pub mod model;
pub mod operations;
pub mod predict;
pub mod schema;
pub mod table;
pub mod types;

// Re-export commonly used types
pub use classifier::{ClassProbabilities, Classifier};
pub use config::{PredictorConfig, DEFAULT_POSITIVE_THRESHOLD};
pub use error::{PredictError, Result};
pub use model::LogisticModel;
pub use operations::{assemble, encode, AssembledTable, EncodedTable, FeatureRecord};
pub use predict::{predict_batch, predict_single, Prediction, PredictionTable, Predictor, SampleFeatures};
pub use schema::FeatureSchema;
pub use table::FeatureTable;
pub use types::{M6aStatus, Nucleotide, RnaRegion, RnaType};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
