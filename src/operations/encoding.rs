//! Per-position categorical encoding of fixed-length DNA sequences
//!
//! Each sequence of a batch becomes one row; each nucleotide position becomes
//! one categorical column named `position_1 … position_n`. The batch sequence
//! length is taken from the first sequence and every other sequence must match
//! it exactly.
//!
//! # Examples
//!
//! ```
//! use m6apred::operations::encode;
//! use m6apred::types::Nucleotide::{A, C, G, T};
//!
//! let table = encode(&["ATCGA", "GGGTT"])?;
//!
//! assert_eq!(table.n_rows(), 2);
//! assert_eq!(table.n_columns(), 5);
//! assert_eq!(table.row(0), &[A, T, C, G, A]);
//! assert_eq!(table.row(1), &[G, G, G, T, T]);
//! assert_eq!(table.column_names()[0], "position_1");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::error::{PredictError, Result};
use crate::types::Nucleotide;

/// Column name of the encoded nucleotide at 1-based `position`
///
/// ```
/// assert_eq!(m6apred::operations::position_column(3), "position_3");
/// ```
pub fn position_column(position: usize) -> String {
    format!("position_{position}")
}

/// Encoded sequences: one row per sequence, one column per position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedTable {
    sequence_length: usize,
    rows: Vec<Vec<Nucleotide>>,
}

impl EncodedTable {
    /// Number of encoded sequences
    #[inline]
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of positional columns (the batch sequence length)
    #[inline]
    pub fn n_columns(&self) -> usize {
        self.sequence_length
    }

    /// Whether the table has no rows
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column names `position_1 … position_n`
    pub fn column_names(&self) -> Vec<String> {
        (1..=self.sequence_length).map(position_column).collect()
    }

    /// Encoded nucleotides of row `index`
    ///
    /// # Panics
    ///
    /// Panics if `index >= n_rows()`.
    pub fn row(&self, index: usize) -> &[Nucleotide] {
        &self.rows[index]
    }

    /// Nucleotide at `row`, 0-based `column`
    pub fn get(&self, row: usize, column: usize) -> Option<Nucleotide> {
        self.rows.get(row).and_then(|r| r.get(column)).copied()
    }

    /// All values of 0-based `column`, in row order
    pub fn column(&self, column: usize) -> Option<Vec<Nucleotide>> {
        if column >= self.sequence_length {
            return None;
        }
        Some(self.rows.iter().map(|r| r[column]).collect())
    }

    /// Iterate over rows
    pub fn rows(&self) -> impl Iterator<Item = &[Nucleotide]> {
        self.rows.iter().map(Vec::as_slice)
    }
}

/// Encode a batch of equal-length DNA sequences
///
/// # Errors
///
/// - [`PredictError::LengthMismatch`] if any sequence differs in length from
///   the first one.
/// - [`PredictError::UnrecognizedCategory`] if a character is not one of
///   `A`, `T`, `C`, `G` (case-sensitive).
///
/// An empty batch yields an empty table with zero columns.
pub fn encode<S: AsRef<str>>(sequences: &[S]) -> Result<EncodedTable> {
    let sequence_length = sequences
        .first()
        .map(|s| s.as_ref().chars().count())
        .unwrap_or(0);

    let mut rows = Vec::with_capacity(sequences.len());
    for (row, sequence) in sequences.iter().enumerate() {
        let sequence = sequence.as_ref();
        let encoded = sequence
            .chars()
            .map(Nucleotide::try_from)
            .collect::<Result<Vec<_>>>()?;

        if encoded.len() != sequence_length {
            tracing::warn!(row, expected = sequence_length, actual = encoded.len(), "sequence length mismatch");
            return Err(PredictError::LengthMismatch {
                row,
                expected: sequence_length,
                actual: encoded.len(),
            });
        }
        rows.push(encoded);
    }

    tracing::debug!(rows = rows.len(), columns = sequence_length, "encoded sequences");
    Ok(EncodedTable {
        sequence_length,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Nucleotide::{A, C, G, T};

    #[test]
    fn test_encode_two_sequences() {
        let table = encode(&["ATCGA", "GGGTT"]).unwrap();
        assert_eq!(table.n_rows(), 2);
        assert_eq!(table.n_columns(), 5);
        assert_eq!(table.row(0), &[A, T, C, G, A]);
        assert_eq!(table.row(1), &[G, G, G, T, T]);
    }

    #[test]
    fn test_column_names() {
        let table = encode(&["ACG"]).unwrap();
        assert_eq!(
            table.column_names(),
            vec!["position_1", "position_2", "position_3"]
        );
    }

    #[test]
    fn test_column_access() {
        let table = encode(&["ATCGA", "GGGTT"]).unwrap();
        assert_eq!(table.column(0), Some(vec![A, G]));
        assert_eq!(table.column(4), Some(vec![A, T]));
        assert_eq!(table.column(5), None);
        assert_eq!(table.get(1, 3), Some(T));
        assert_eq!(table.get(2, 0), None);
    }

    #[test]
    fn test_encode_empty_batch() {
        let empty: [&str; 0] = [];
        let table = encode(&empty).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.n_columns(), 0);
        assert!(table.column_names().is_empty());
    }

    #[test]
    fn test_encode_length_mismatch() {
        let err = encode(&["ATCGA", "GGGT", "AAAAA"]).unwrap_err();
        match err {
            PredictError::LengthMismatch {
                row,
                expected,
                actual,
            } => {
                assert_eq!(row, 1);
                assert_eq!(expected, 5);
                assert_eq!(actual, 4);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_encode_rejects_unknown_base() {
        let err = encode(&["ATCNA"]).unwrap_err();
        assert!(matches!(
            err,
            PredictError::UnrecognizedCategory { ref value, .. } if value == "N"
        ));

        // Lowercase is not a declared level
        assert!(encode(&["atcga"]).is_err());
    }

    #[test]
    fn test_encode_owned_strings() {
        let seqs = vec![String::from("GGACT"), String::from("AGACA")];
        let table = encode(&seqs).unwrap();
        assert_eq!(table.n_rows(), 2);
        assert_eq!(table.get(0, 2), Some(A));
    }
}
