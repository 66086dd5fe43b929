//! I/O module: sample tables in, prediction tables out
//!
//! Nothing in the prediction pipeline itself touches the filesystem; these
//! helpers sit around it for callers that start from files.

pub mod compression;
pub mod sink;
pub mod table;

pub use compression::{open_reader, CompressedWriter};
pub use sink::DataSink;
pub use table::{read_sample_table, PredictionWriter, SampleTableReader};

use std::path::Path;

/// Comma for `.csv` and `.csv.gz` paths, tab otherwise
pub(crate) fn delimiter_for_path(path: &Path) -> u8 {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let name = name
        .strip_suffix(".gz")
        .or_else(|| name.strip_suffix(".gzip"))
        .unwrap_or(&name);

    if name.ends_with(".csv") {
        b','
    } else {
        b'\t'
    }
}
