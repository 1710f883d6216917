//! Sheet frame wrapper.

use polars::prelude::DataFrame;

/// One workbook sheet loaded as a DataFrame.
///
/// Columns keep the sheet's header order; the frame height is the number of
/// data rows below the header.
#[derive(Debug, Clone)]
pub struct SheetFrame {
    /// Sheet name as it appears in the workbook.
    pub name: String,
    /// The sheet's data.
    pub data: DataFrame,
}

impl SheetFrame {
    pub fn new(name: impl Into<String>, data: DataFrame) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Number of data rows.
    pub fn record_count(&self) -> usize {
        self.data.height()
    }

    /// Column names in sheet order.
    pub fn column_names(&self) -> Vec<String> {
        self.data
            .get_column_names()
            .into_iter()
            .map(ToString::to_string)
            .collect()
    }
}
