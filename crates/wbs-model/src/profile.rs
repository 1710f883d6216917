//! Column statistics and sheet profiles.

use serde::{Deserialize, Serialize};

use crate::cell::CellValue;
use crate::storage::StorageType;

/// Maximum number of sample values kept per column.
pub const SAMPLE_VALUE_LIMIT: usize = 5;

/// Summary statistics for one column of a sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnStats {
    /// Column header as it appears in the sheet (after normalization).
    pub name: String,
    /// Inferred storage type.
    pub storage: StorageType,
    pub non_null_count: usize,
    pub null_count: usize,
    /// Number of distinct non-missing values.
    pub unique_count: usize,
    /// First non-missing values in row order, at most [`SAMPLE_VALUE_LIMIT`].
    pub sample_values: Vec<CellValue>,
    /// All values present and all distinct within the sheet.
    pub potential_primary_key: bool,
}

impl ColumnStats {
    pub fn row_count(&self) -> usize {
        self.non_null_count + self.null_count
    }

    /// Fraction of rows with a missing value, in `[0, 1]`.
    pub fn null_ratio(&self) -> f64 {
        let total = self.row_count();
        if total == 0 {
            0.0
        } else {
            self.null_count as f64 / total as f64
        }
    }
}

/// Profile of one sheet: dimensions plus per-column statistics in sheet order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetProfile {
    pub name: String,
    pub row_count: usize,
    pub column_count: usize,
    pub columns: Vec<ColumnStats>,
}

impl SheetProfile {
    pub fn column(&self, name: &str) -> Option<&ColumnStats> {
        self.columns.iter().find(|column| column.name == name)
    }

    /// Columns flagged as potential primary keys.
    pub fn key_candidates(&self) -> impl Iterator<Item = &ColumnStats> {
        self.columns
            .iter()
            .filter(|column| column.potential_primary_key)
    }

    pub fn is_key_candidate(&self, column: &str) -> bool {
        self.column(column)
            .map(|stats| stats.potential_primary_key)
            .unwrap_or(false)
    }
}
