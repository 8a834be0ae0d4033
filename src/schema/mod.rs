//! Dataset schema: column names, field coercion and normalization.

use arrow::datatypes::Schema;

pub mod conversions;
pub mod normalizer;

pub use normalizer::{
    MalformedRowError, NormalizeReport, RowField, normalize, normalize_record,
    normalize_with_report,
};

use crate::error::{MortalityError, Result};

/// Report on how a columnar file lines up with the dataset columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnReport {
    /// Index of each dataset column in the file, `None` when absent
    pub positions: Vec<(RowField, Option<usize>)>,
}

impl ColumnReport {
    /// Build the report for an Arrow schema
    #[must_use]
    pub fn for_schema(schema: &Schema) -> Self {
        let positions = RowField::ALL
            .iter()
            .map(|field| (*field, schema.index_of(field.column()).ok()))
            .collect();
        Self { positions }
    }

    /// Columns the file does not provide
    #[must_use]
    pub fn missing(&self) -> Vec<RowField> {
        self.positions
            .iter()
            .filter(|(_, idx)| idx.is_none())
            .map(|(field, _)| *field)
            .collect()
    }

    /// Column index of a field
    #[must_use]
    pub fn index_of(&self, field: RowField) -> Option<usize> {
        self.positions
            .iter()
            .find(|(f, _)| *f == field)
            .and_then(|(_, idx)| *idx)
    }

    /// Fail on the first missing column
    pub fn require_all(&self) -> Result<()> {
        match self.missing().first() {
            Some(field) => Err(MortalityError::MissingColumn(field.column().to_string())),
            None => Ok(()),
        }
    }
}
