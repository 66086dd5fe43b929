//! Transparent gzip handling for sample tables, model artifacts and results
//!
//! Reading detects gzip from the magic bytes rather than the file name, so a
//! compressed table without a `.gz` suffix still opens. Writing picks gzip from
//! the sink's file extension.

use crate::error::Result;
use crate::io::DataSink;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Gzip magic bytes
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Open `path` for buffered reading, decompressing gzip content
///
/// Multi-member gzip (including bgzip) is decoded in full.
///
/// # Example
///
/// ```no_run
/// use m6apred::io::open_reader;
/// use std::io::BufRead;
///
/// # fn main() -> m6apred::Result<()> {
/// let reader = open_reader("samples.tsv.gz")?;
/// for line in reader.lines() {
///     let _line = line?;
/// }
/// # Ok(())
/// # }
/// ```
pub fn open_reader(path: impl AsRef<Path>) -> Result<Box<dyn BufRead>> {
    let mut reader = BufReader::new(File::open(path.as_ref())?);

    let is_gzipped = reader.fill_buf()?.starts_with(&GZIP_MAGIC);
    if is_gzipped {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(reader))))
    } else {
        Ok(Box::new(reader))
    }
}

/// Writer that compresses according to its [`DataSink`]
///
/// Call [`finish`](Self::finish) to flush and, for gzip, write the trailer.
///
/// # Example
///
/// ```no_run
/// use m6apred::io::{CompressedWriter, DataSink};
/// use std::io::Write;
///
/// # fn main() -> std::io::Result<()> {
/// let mut writer = CompressedWriter::new(DataSink::from_path("predictions.tsv.gz"))?;
/// writer.write_all(b"site\tpredicted_m6A_prob\n")?;
/// writer.finish()?;
/// # Ok(())
/// # }
/// ```
pub enum CompressedWriter {
    /// Uncompressed writer with buffering
    Plain(Option<BufWriter<Box<dyn Write>>>),

    /// Gzip compressed writer, default compression level
    Gzip(Option<GzEncoder<BufWriter<Box<dyn Write>>>>),
}

impl CompressedWriter {
    /// Create a writer for `sink`
    ///
    /// - `.gz`, `.gzip` → gzip
    /// - other paths and stdout → uncompressed
    pub fn new(sink: DataSink) -> io::Result<Self> {
        let compressed = sink.is_compressed();
        let writer: Box<dyn Write> = match sink {
            DataSink::Local(path) => Box::new(File::create(path)?),
            DataSink::Stdout => Box::new(io::stdout()),
        };

        if compressed {
            Ok(Self::new_gzip(writer))
        } else {
            Ok(Self::new_plain(writer))
        }
    }

    /// Uncompressed writer over `writer`
    pub fn new_plain(writer: Box<dyn Write>) -> Self {
        Self::Plain(Some(BufWriter::new(writer)))
    }

    /// Gzip writer over `writer`
    pub fn new_gzip(writer: Box<dyn Write>) -> Self {
        Self::Gzip(Some(GzEncoder::new(
            BufWriter::new(writer),
            Compression::default(),
        )))
    }

    /// Finish writing and consume the writer
    ///
    /// Errors from the final flush are returned here rather than lost in
    /// `Drop`.
    pub fn finish(mut self) -> io::Result<()> {
        match &mut self {
            Self::Plain(w) => match w.take() {
                Some(mut writer) => writer.flush(),
                None => Ok(()),
            },
            Self::Gzip(w) => match w.take() {
                Some(encoder) => encoder.finish()?.flush(),
                None => Ok(()),
            },
        }
    }
}

impl Write for CompressedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Plain(Some(w)) => w.write(buf),
            Self::Gzip(Some(w)) => w.write(buf),
            _ => Err(io::Error::new(
                io::ErrorKind::Other,
                "Cannot write to finished writer",
            )),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Plain(Some(w)) => w.flush(),
            Self::Gzip(Some(w)) => w.flush(),
            _ => Ok(()),
        }
    }
}

impl Drop for CompressedWriter {
    fn drop(&mut self) {
        // Best effort; finish() reports errors
        let _ = self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn test_plain_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.tsv");

        let mut writer = CompressedWriter::new(DataSink::from_path(&path)).unwrap();
        writer.write_all(b"a\tb\n1\t2\n").unwrap();
        writer.finish().unwrap();

        let mut text = String::new();
        open_reader(&path).unwrap().read_to_string(&mut text).unwrap();
        assert_eq!(text, "a\tb\n1\t2\n");
    }

    #[test]
    fn test_gzip_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.tsv.gz");

        let mut writer = CompressedWriter::new(DataSink::from_path(&path)).unwrap();
        writer.write_all(b"a\tb\n1\t2\n").unwrap();
        writer.finish().unwrap();

        let raw = std::fs::read(&path).unwrap();
        assert!(raw.starts_with(&GZIP_MAGIC));

        let mut text = String::new();
        open_reader(&path).unwrap().read_to_string(&mut text).unwrap();
        assert_eq!(text, "a\tb\n1\t2\n");
    }

    #[test]
    fn test_gzip_detected_without_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.tsv");

        let file = File::create(&path).unwrap();
        let mut writer = CompressedWriter::new_gzip(Box::new(file));
        writer.write_all(b"x\n").unwrap();
        writer.finish().unwrap();

        let mut text = String::new();
        open_reader(&path).unwrap().read_to_string(&mut text).unwrap();
        assert_eq!(text, "x\n");
    }

    #[test]
    fn test_open_missing_file() {
        assert!(open_reader("/nonexistent/m6apred/table.tsv").is_err());
    }
}
