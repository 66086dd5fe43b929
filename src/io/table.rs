//! Delimited sample-table reading and prediction-table writing
//!
//! Sample tables are header-first delimited text: comma-separated for `.csv`
//! (optionally `.csv.gz`), tab-separated otherwise. Empty lines and lines
//! starting with `#` are skipped. Fields may be double-quoted, with `""`
//! standing for a literal quote, so free-text columns can hold the delimiter
//! or line breaks. The same quoting is applied when writing, and anything
//! [`PredictionWriter`] produces reads back unchanged.
//!
//! # Example
//!
//! ```
//! use m6apred::io::SampleTableReader;
//!
//! let data = "\
//! site\tgc_content\tRNA_type\n\
//! \n\
//! s1\t0.5\tmRNA\n";
//!
//! let table = SampleTableReader::new(data.as_bytes(), b'\t').read_table()?;
//! assert_eq!(table.columns(), ["site", "gc_content", "RNA_type"]);
//! assert_eq!(table.get(0, "RNA_type"), Some("mRNA"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::error::Result;
use crate::io::compression::{open_reader, CompressedWriter};
use crate::io::{delimiter_for_path, DataSink};
use crate::predict::PredictionTable;
use crate::table::FeatureTable;
use std::io::BufRead;
use std::path::Path;

/// Reader producing a [`FeatureTable`] from delimited text
pub struct SampleTableReader<R: BufRead> {
    reader: R,
    delimiter: u8,
}

impl<R: BufRead> SampleTableReader<R> {
    /// Reader over `reader` with the given field delimiter
    pub fn new(reader: R, delimiter: u8) -> Self {
        SampleTableReader { reader, delimiter }
    }

    /// Read the header and every row
    ///
    /// # Errors
    ///
    /// - [`FieldCount`](crate::PredictError::FieldCount) if a row's width
    ///   differs from the header
    /// - [`Csv`](crate::PredictError::Csv) on unreadable input (I/O failure,
    ///   invalid UTF-8)
    ///
    /// Input without a header line yields an empty table with no columns.
    pub fn read_table(self) -> Result<FeatureTable> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .comment(Some(b'#'))
            .flexible(false)
            .has_headers(true)
            .from_reader(self.reader);

        let mut table = FeatureTable::new(reader.headers()?.iter());
        for record in reader.records() {
            table.push_row(record?.iter())?;
        }

        tracing::debug!(rows = table.n_rows(), columns = table.columns().len(), "read sample table");
        Ok(table)
    }
}

impl SampleTableReader<Box<dyn BufRead>> {
    /// Open a sample table on disk
    ///
    /// The delimiter is comma for `.csv` / `.csv.gz`, tab otherwise. Gzip
    /// content is decompressed transparently.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        Ok(Self::new(open_reader(path)?, delimiter_for_path(path)))
    }
}

/// Read a sample table from disk in one call
pub fn read_sample_table(path: impl AsRef<Path>) -> Result<FeatureTable> {
    SampleTableReader::from_path(path)?.read_table()
}

/// Writer for [`PredictionTable`]s
///
/// # Example
///
/// ```no_run
/// use m6apred::io::PredictionWriter;
/// # use m6apred::predict::PredictionTable;
///
/// # fn write(result: &PredictionTable) -> m6apred::Result<()> {
/// let mut writer = PredictionWriter::create("predictions.csv.gz")?;
/// writer.write_table(result)?;
/// writer.finish()?;
/// # Ok(())
/// # }
/// ```
pub struct PredictionWriter {
    writer: csv::Writer<CompressedWriter>,
    rows_written: usize,
}

impl PredictionWriter {
    /// Writer for `sink`; delimiter and compression follow its extension
    pub fn new(sink: DataSink) -> Result<Self> {
        let delimiter = sink.delimiter();
        let writer = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_writer(CompressedWriter::new(sink)?);
        Ok(PredictionWriter {
            writer,
            rows_written: 0,
        })
    }

    /// Writer for a file path
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(DataSink::from_path(path))
    }

    /// Writer for standard output (tab-separated)
    pub fn stdout() -> Result<Self> {
        Self::new(DataSink::stdout())
    }

    /// Write header and all rows of `table`
    pub fn write_table(&mut self, table: &PredictionTable) -> Result<()> {
        self.writer.write_record(table.columns())?;
        for index in 0..table.n_rows() {
            if let Some(row) = table.row(index) {
                self.writer.write_record(&row)?;
                self.rows_written += 1;
            }
        }
        Ok(())
    }

    /// Number of data rows written so far
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Flush and finalise compression
    pub fn finish(self) -> Result<()> {
        tracing::debug!(rows = self.rows_written, "finished prediction table");
        let inner = self.writer.into_inner().map_err(|e| e.into_error())?;
        inner.finish()?;
        Ok(())
    }
}
