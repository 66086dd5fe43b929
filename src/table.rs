//! Column-named feature tables
//!
//! A [`FeatureTable`] is the untyped shape in which sample tables arrive: an
//! ordered list of column names and rows of string cells. Typing happens later
//! in [`crate::operations::assemble`], which only looks at the required
//! columns; every other column passes through untouched.

use crate::error::{PredictError, Result};

/// Ordered, column-named table of string cells
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl FeatureTable {
    /// Create an empty table with the given columns
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FeatureTable {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row
    ///
    /// # Errors
    ///
    /// Returns [`PredictError::FieldCount`] if the row width differs from the
    /// number of columns.
    ///
    /// # Examples
    ///
    /// ```
    /// use m6apred::FeatureTable;
    ///
    /// let mut table = FeatureTable::new(["id", "DNA_5mer"]);
    /// table.push_row(["site1", "GGACT"])?;
    /// assert_eq!(table.n_rows(), 1);
    /// assert!(table.push_row(["site2"]).is_err());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn push_row<I, S>(&mut self, row: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let row: Vec<String> = row.into_iter().map(Into::into).collect();
        if row.len() != self.columns.len() {
            return Err(PredictError::FieldCount {
                expected: self.columns.len(),
                actual: row.len(),
                line: self.rows.len() + 1,
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Column names in order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows
    #[inline]
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of column `name`, if present
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Whether column `name` is present
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Cells of column `name`, in row order
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let index = self.column_index(name)?;
        Some(self.rows.iter().map(|r| r[index].as_str()).collect())
    }

    /// Cells of row `index`
    pub fn row(&self, index: usize) -> Option<&[String]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Cell at row `index`, column `name`
    pub fn get(&self, index: usize, name: &str) -> Option<&str> {
        let column = self.column_index(name)?;
        self.rows.get(index).map(|r| r[column].as_str())
    }

    /// Iterate over rows
    pub fn rows(&self) -> impl Iterator<Item = &[String]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Set column `name` to one value per row
    ///
    /// An existing column of that name is overwritten in place; otherwise the
    /// column is appended.
    ///
    /// # Errors
    ///
    /// Returns [`PredictError::FieldCount`] if `values` does not have one entry
    /// per row.
    pub fn set_column<S: Into<String>>(&mut self, name: S, values: Vec<String>) -> Result<()> {
        if values.len() != self.rows.len() {
            return Err(PredictError::FieldCount {
                expected: self.rows.len(),
                actual: values.len(),
                line: 0,
            });
        }
        let name = name.into();
        match self.column_index(&name) {
            Some(index) => {
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row[index] = value;
                }
            }
            None => {
                self.columns.push(name);
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row.push(value);
                }
            }
        }
        Ok(())
    }
}
