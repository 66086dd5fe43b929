//! Output destinations for result tables
//!
//! # Example
//!
//! ```no_run
//! use m6apred::io::DataSink;
//!
//! // Gzip-compressed file (detected from extension)
//! let sink = DataSink::from_path("predictions.tsv.gz");
//!
//! // Standard output
//! let sink = DataSink::stdout();
//! ```

use std::path::{Path, PathBuf};

/// Output destination for written tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSink {
    /// Write to a local file path
    ///
    /// `.gz` / `.gzip` extensions select gzip compression.
    Local(PathBuf),

    /// Write to standard output, uncompressed
    Stdout,
}

impl DataSink {
    /// Create a sink from a file path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        Self::Local(path.as_ref().to_path_buf())
    }

    /// Create a sink for standard output
    pub fn stdout() -> Self {
        Self::Stdout
    }

    /// File extension of a local sink
    pub(crate) fn extension(&self) -> Option<&str> {
        match self {
            Self::Local(path) => path.extension().and_then(|s| s.to_str()),
            Self::Stdout => None,
        }
    }

    /// Whether output will be gzip-compressed
    pub fn is_compressed(&self) -> bool {
        matches!(self.extension(), Some("gz") | Some("gzip"))
    }

    /// Field delimiter implied by the path: comma for `.csv[.gz]`, tab otherwise
    pub fn delimiter(&self) -> u8 {
        match self {
            Self::Local(path) => super::delimiter_for_path(path),
            Self::Stdout => b'\t',
        }
    }
}
