//! Cross-sheet relationship candidates.

use serde::{Deserialize, Serialize};

/// A directed foreign-key guess: most distinct values of the source column
/// also appear in the target column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipCandidate {
    pub from_sheet: String,
    pub from_column: String,
    pub to_sheet: String,
    pub to_column: String,
    /// Share of the source column's distinct values found in the target, `[0, 100]`.
    pub match_percentage: f64,
    /// Sample of shared values, sorted.
    pub common_values: Vec<String>,
}

impl RelationshipCandidate {
    /// Every distinct source value is present in the target.
    pub fn is_full_match(&self) -> bool {
        (self.match_percentage - 100.0).abs() < f64::EPSILON
    }

    /// `Sheet.column -> Sheet.column` label.
    pub fn describe(&self) -> String {
        format!(
            "{}.{} -> {}.{}",
            self.from_sheet, self.from_column, self.to_sheet, self.to_column
        )
    }
}
