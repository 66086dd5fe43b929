//! Feature validation, leveling and assembly
//!
//! [`assemble`] turns an untyped [`FeatureTable`] into the typed
//! [`AssembledTable`] a classifier consumes:
//!
//! 1. every required column must be present (all missing names are reported
//!    together),
//! 2. `RNA_type` and `RNA_region` are leveled into their closed enumerations,
//! 3. numeric columns are parsed,
//! 4. `DNA_5mer` is encoded per position and attached column-wise.
//!
//! Columns other than the required ones are ignored here.

use crate::error::{PredictError, Result};
use crate::operations::encoding::{encode, EncodedTable};
use crate::schema::{
    FeatureSchema, DISTANCE_TO_JUNCTION, EVOLUTIONARY_CONSERVATION, EXON_LENGTH, GC_CONTENT,
    REQUIRED_COLUMNS,
};
use crate::table::FeatureTable;
use crate::types::{RnaRegion, RnaType, DNA_5MER, RNA_REGION, RNA_TYPE};

/// Typed, leveled feature record of one site
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRecord {
    /// GC fraction of the flanking window (0-1)
    pub gc_content: f64,
    /// Transcript biotype
    pub rna_type: RnaType,
    /// Transcript region
    pub rna_region: RnaRegion,
    /// Length of the containing exon
    pub exon_length: f64,
    /// Distance to the nearest splice junction
    pub distance_to_junction: f64,
    /// Conservation score
    pub evolutionary_conservation: f64,
    /// Sequence centred on the site
    pub dna_5mer: String,
}

impl FeatureRecord {
    /// Value of numeric feature `name`, if it is one
    pub fn numeric(&self, name: &str) -> Option<f64> {
        match name {
            GC_CONTENT => Some(self.gc_content),
            EXON_LENGTH => Some(self.exon_length),
            DISTANCE_TO_JUNCTION => Some(self.distance_to_junction),
            EVOLUTIONARY_CONSERVATION => Some(self.evolutionary_conservation),
            _ => None,
        }
    }
}

/// Typed feature records joined with their encoded sequences
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledTable {
    records: Vec<FeatureRecord>,
    encoded: EncodedTable,
    schema: FeatureSchema,
}

impl AssembledTable {
    /// Typed records, in input order
    pub fn records(&self) -> &[FeatureRecord] {
        &self.records
    }

    /// Per-position encoding of `DNA_5mer`, row-aligned with [`records`](Self::records)
    pub fn encoded(&self) -> &EncodedTable {
        &self.encoded
    }

    /// Feature layout of this table
    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Number of rows
    #[inline]
    pub fn n_rows(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no rows
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Check that every required column is present
///
/// # Errors
///
/// Returns [`PredictError::MissingColumn`] listing all absent columns.
///
/// # Examples
///
/// ```
/// use m6apred::operations::validate_columns;
/// use m6apred::{FeatureTable, PredictError};
///
/// let table = FeatureTable::new(["gc_content", "RNA_type"]);
/// match validate_columns(&table) {
///     Err(PredictError::MissingColumn { columns }) => assert_eq!(columns.len(), 5),
///     other => panic!("unexpected: {other:?}"),
/// }
/// ```
pub fn validate_columns(table: &FeatureTable) -> Result<()> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|name| !table.has_column(name))
        .map(|name| name.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        tracing::warn!(missing = ?missing, "feature table is missing required columns");
        Err(PredictError::MissingColumn { columns: missing })
    }
}

fn parse_numeric(table: &FeatureTable, row: usize, column: &str) -> Result<f64> {
    let cell = table.get(row, column).unwrap_or_default();
    cell.trim()
        .parse::<f64>()
        .map_err(|e| PredictError::InvalidField {
            column: column.to_string(),
            row,
            reason: format!("'{cell}': {e}"),
        })
}

fn cell<'a>(table: &'a FeatureTable, row: usize, column: &str) -> &'a str {
    table.get(row, column).unwrap_or_default()
}

/// Validate, level and encode a feature table
///
/// # Errors
///
/// - [`PredictError::MissingColumn`] if required columns are absent
/// - [`PredictError::UnrecognizedCategory`] for undeclared `RNA_type`,
///   `RNA_region` or nucleotide values
/// - [`PredictError::InvalidField`] for unparsable numeric cells
/// - [`PredictError::LengthMismatch`] for ragged `DNA_5mer` values
///
/// # Examples
///
/// ```
/// use m6apred::operations::assemble;
/// use m6apred::types::RnaRegion;
/// use m6apred::FeatureTable;
///
/// let mut table = FeatureTable::new([
///     "gc_content", "RNA_type", "RNA_region", "exon_length",
///     "distance_to_junction", "evolutionary_conservation", "DNA_5mer",
/// ]);
/// table.push_row(["0.52", "mRNA", "3'UTR", "1200", "35", "0.8", "GGACT"])?;
///
/// let assembled = assemble(&table)?;
/// assert_eq!(assembled.n_rows(), 1);
/// assert_eq!(assembled.records()[0].rna_region, RnaRegion::ThreePrimeUtr);
/// assert_eq!(assembled.encoded().n_columns(), 5);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn assemble(table: &FeatureTable) -> Result<AssembledTable> {
    validate_columns(table)?;

    let mut records = Vec::with_capacity(table.n_rows());
    for row in 0..table.n_rows() {
        records.push(FeatureRecord {
            gc_content: parse_numeric(table, row, GC_CONTENT)?,
            rna_type: cell(table, row, RNA_TYPE).parse()?,
            rna_region: cell(table, row, RNA_REGION).parse()?,
            exon_length: parse_numeric(table, row, EXON_LENGTH)?,
            distance_to_junction: parse_numeric(table, row, DISTANCE_TO_JUNCTION)?,
            evolutionary_conservation: parse_numeric(table, row, EVOLUTIONARY_CONSERVATION)?,
            dna_5mer: cell(table, row, DNA_5MER).to_string(),
        });
    }

    let sequences: Vec<&str> = records.iter().map(|r| r.dna_5mer.as_str()).collect();
    let encoded = encode(&sequences)?;
    let schema = FeatureSchema::new(encoded.n_columns());

    tracing::debug!(rows = records.len(), %schema, "assembled feature table");
    Ok(AssembledTable {
        records,
        encoded,
        schema,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Nucleotide;

    fn table_with(rows: &[[&str; 7]]) -> FeatureTable {
        let mut table = FeatureTable::new(REQUIRED_COLUMNS);
        for row in rows {
            table.push_row(*row).unwrap();
        }
        table
    }

    const ROW: [&str; 7] = ["0.5", "mRNA", "CDS", "1500", "40", "0.9", "GGACT"];

    #[test]
    fn test_assemble_basic() {
        let table = table_with(&[ROW, ["0.3", "lncRNA", "intron", "200", "5", "0.1", "AGACA"]]);
        let assembled = assemble(&table).unwrap();

        assert_eq!(assembled.n_rows(), 2);
        let first = &assembled.records()[0];
        assert_eq!(first.gc_content, 0.5);
        assert_eq!(first.rna_type, RnaType::MRna);
        assert_eq!(first.rna_region, RnaRegion::Cds);
        assert_eq!(first.exon_length, 1500.0);
        assert_eq!(first.distance_to_junction, 40.0);
        assert_eq!(first.evolutionary_conservation, 0.9);
        assert_eq!(assembled.records()[1].rna_type, RnaType::LncRna);

        assert_eq!(assembled.encoded().n_rows(), 2);
        assert_eq!(assembled.encoded().get(1, 0), Some(Nucleotide::A));
        assert_eq!(assembled.schema(), &FeatureSchema::new(5));
    }

    #[test]
    fn test_missing_columns_reported_together() {
        let mut table = FeatureTable::new(["gc_content", "RNA_type", "exon_length", "extra"]);
        table.push_row(["0.5", "mRNA", "10", "x"]).unwrap();

        match assemble(&table).unwrap_err() {
            PredictError::MissingColumn { columns } => assert_eq!(
                columns,
                vec![
                    "RNA_region",
                    "distance_to_junction",
                    "evolutionary_conservation",
                    "DNA_5mer"
                ]
            ),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_extra_columns_ignored() {
        let mut columns: Vec<&str> = vec!["site_id"];
        columns.extend(REQUIRED_COLUMNS);
        let mut table = FeatureTable::new(columns);
        let mut row = vec!["chr1:100"];
        row.extend(ROW);
        table.push_row(row).unwrap();

        let assembled = assemble(&table).unwrap();
        assert_eq!(assembled.n_rows(), 1);
        assert_eq!(assembled.records()[0].dna_5mer, "GGACT");
    }

    #[test]
    fn test_unrecognized_rna_type() {
        let table = table_with(&[["0.5", "snoRNA", "CDS", "1500", "40", "0.9", "GGACT"]]);
        assert!(matches!(
            assemble(&table),
            Err(PredictError::UnrecognizedCategory { ref field, .. }) if field == "RNA_type"
        ));
    }

    #[test]
    fn test_unrecognized_rna_region() {
        let table = table_with(&[["0.5", "mRNA", "UTR", "1500", "40", "0.9", "GGACT"]]);
        assert!(matches!(
            assemble(&table),
            Err(PredictError::UnrecognizedCategory { ref field, .. }) if field == "RNA_region"
        ));
    }

    #[test]
    fn test_invalid_numeric() {
        let table = table_with(&[ROW, ["high", "mRNA", "CDS", "1500", "40", "0.9", "GGACT"]]);
        match assemble(&table).unwrap_err() {
            PredictError::InvalidField { column, row, .. } => {
                assert_eq!(column, "gc_content");
                assert_eq!(row, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_ragged_sequences() {
        let table = table_with(&[ROW, ["0.5", "mRNA", "CDS", "1500", "40", "0.9", "GGAC"]]);
        assert!(matches!(
            assemble(&table),
            Err(PredictError::LengthMismatch { row: 1, .. })
        ));
    }

    #[test]
    fn test_empty_table() {
        let table = table_with(&[]);
        let assembled = assemble(&table).unwrap();
        assert!(assembled.is_empty());
        assert_eq!(assembled.schema().sequence_length, 0);
    }

    #[test]
    fn test_numeric_lookup() {
        let assembled = assemble(&table_with(&[ROW])).unwrap();
        let record = &assembled.records()[0];
        assert_eq!(record.numeric("exon_length"), Some(1500.0));
        assert_eq!(record.numeric("RNA_type"), None);
    }
}
