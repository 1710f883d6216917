//! Cross-sheet relationship inference.
//!
//! Every column of every sheet is compared with every column of every other
//! sheet. The comparison is directed: the match percentage is the share of the
//! source column's distinct values that also occur in the target column, so
//! `A -> B` and `B -> A` usually differ.

use std::collections::BTreeSet;

use tracing::debug;

use wbs_common::column_cells;
use wbs_ingest::SheetFrame;
use wbs_model::{RelationshipCandidate, SAMPLE_VALUE_LIMIT};

/// Candidates must match strictly more than this percentage.
pub const MATCH_THRESHOLD: f64 = 50.0;

/// Distinct canonical strings of one column's non-missing values.
#[derive(Debug, Clone)]
pub struct ColumnValues {
    pub column: String,
    pub distinct: BTreeSet<String>,
}

impl ColumnValues {
    pub fn new(column: impl Into<String>, distinct: BTreeSet<String>) -> Self {
        Self {
            column: column.into(),
            distinct,
        }
    }
}

/// Column value sets of one sheet, in column order.
#[derive(Debug, Clone)]
pub struct SheetValues {
    pub sheet: String,
    pub columns: Vec<ColumnValues>,
}

impl SheetValues {
    pub fn from_frame(frame: &SheetFrame) -> Self {
        let columns = frame
            .data
            .get_columns()
            .iter()
            .map(|column| {
                let distinct = column_cells(column)
                    .into_iter()
                    .filter(|cell| !cell.is_missing())
                    .map(|cell| cell.to_string())
                    .collect();
                ColumnValues::new(column.name().as_str(), distinct)
            })
            .collect();
        Self {
            sheet: frame.name.clone(),
            columns,
        }
    }
}

/// Result of comparing a source column with a target column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMatch {
    /// `|source ∩ target| / |source| * 100`, or 0 when either side is empty.
    pub percentage: f64,
    /// The smallest shared values, at most [`SAMPLE_VALUE_LIMIT`].
    pub common_values: Vec<String>,
}

/// Directed match of `source` against `target`.
pub fn match_percentage(source: &BTreeSet<String>, target: &BTreeSet<String>) -> ColumnMatch {
    if source.is_empty() || target.is_empty() {
        return ColumnMatch {
            percentage: 0.0,
            common_values: Vec::new(),
        };
    }

    let mut shared = 0usize;
    let mut common_values = Vec::with_capacity(SAMPLE_VALUE_LIMIT);
    // BTreeSet iteration is sorted, so the sample is the smallest values.
    for value in source.intersection(target) {
        shared += 1;
        if common_values.len() < SAMPLE_VALUE_LIMIT {
            common_values.push(value.clone());
        }
    }

    ColumnMatch {
        percentage: shared as f64 / source.len() as f64 * 100.0,
        common_values,
    }
}

/// Finds relationship candidates across all ordered pairs of distinct sheets.
///
/// Same-named columns are compared too. Candidates are sorted by descending
/// match percentage; ties keep generation order (sheet order, then column
/// order).
pub fn infer_relationships(sheets: &[SheetValues]) -> Vec<RelationshipCandidate> {
    let mut candidates = Vec::new();

    for (i, source) in sheets.iter().enumerate() {
        for (j, target) in sheets.iter().enumerate() {
            if i == j {
                continue;
            }
            for from in &source.columns {
                for to in &target.columns {
                    let matched = match_percentage(&from.distinct, &to.distinct);
                    if matched.percentage > MATCH_THRESHOLD {
                        candidates.push(RelationshipCandidate {
                            from_sheet: source.sheet.clone(),
                            from_column: from.column.clone(),
                            to_sheet: target.sheet.clone(),
                            to_column: to.column.clone(),
                            match_percentage: matched.percentage,
                            common_values: matched.common_values,
                        });
                    }
                }
            }
        }
    }

    candidates.sort_by(|a, b| b.match_percentage.total_cmp(&a.match_percentage));
    debug!(candidates = candidates.len(), "inferred relationships");
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(ToString::to_string).collect()
    }

    fn sheet(name: &str, columns: &[(&str, &[&str])]) -> SheetValues {
        SheetValues {
            sheet: name.to_string(),
            columns: columns
                .iter()
                .map(|(column, values)| ColumnValues::new(*column, set(values)))
                .collect(),
        }
    }

    #[test]
    fn test_subset_and_superset() {
        let x = set(&["1", "2", "3", "4", "5"]);
        let y = set(&["1", "2", "3", "4", "5", "6", "7", "8"]);
        assert_eq!(match_percentage(&x, &y).percentage, 100.0);
        assert_eq!(match_percentage(&y, &x).percentage, 62.5);
    }

    #[test]
    fn test_empty_side_is_zero() {
        let x = set(&["1"]);
        assert_eq!(match_percentage(&x, &BTreeSet::new()).percentage, 0.0);
        assert_eq!(match_percentage(&BTreeSet::new(), &x).percentage, 0.0);
    }

    #[test]
    fn test_common_values_are_smallest_five() {
        let x = set(&["g", "f", "e", "d", "c", "b", "a"]);
        let matched = match_percentage(&x, &x);
        assert_eq!(matched.common_values, vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_threshold_is_strict() {
        let sheets = vec![
            sheet("A", &[("Code", &["1", "2"])]),
            sheet("B", &[("Ref", &["1", "9"])]),
        ];
        // 1 of 2 shared in both directions: exactly 50%, not emitted.
        assert!(infer_relationships(&sheets).is_empty());
    }

    #[test]
    fn test_both_directions_sorted() {
        let sheets = vec![
            sheet("Staff", &[("Project", &["1", "2", "3"])]),
            sheet("Projects", &[("Code", &["1", "2", "3", "4"])]),
        ];
        let found = infer_relationships(&sheets);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].describe(), "Staff.Project -> Projects.Code");
        assert_eq!(found[0].match_percentage, 100.0);
        assert_eq!(found[1].describe(), "Projects.Code -> Staff.Project");
        assert_eq!(found[1].match_percentage, 75.0);
    }

    #[test]
    fn test_same_named_columns_are_compared() {
        let sheets = vec![
            sheet("A", &[("Code", &["1", "2"])]),
            sheet("B", &[("Code", &["1", "2"])]),
        ];
        assert_eq!(infer_relationships(&sheets).len(), 2);
    }

    #[test]
    fn test_ties_keep_generation_order() {
        let sheets = vec![
            sheet("A", &[("x", &["1"]), ("y", &["2"])]),
            sheet("B", &[("z", &["1", "2"])]),
        ];
        let found = infer_relationships(&sheets);
        let labels: Vec<String> = found.iter().map(RelationshipCandidate::describe).collect();
        assert_eq!(labels, vec!["A.x -> B.z", "A.y -> B.z"]);
    }
}
