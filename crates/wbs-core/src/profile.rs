//! Column profiling.

use std::collections::HashSet;

use polars::prelude::Column;
use tracing::{debug, trace};

use wbs_common::{column_cells, storage_type};
use wbs_ingest::SheetFrame;
use wbs_model::{CellValue, ColumnStats, SAMPLE_VALUE_LIMIT, SheetProfile, StorageType};

/// Computes the statistics of one column from its cells.
///
/// Distinct values are counted on the canonical string form, so `1` and `1.0`
/// are the same value. A column is a key candidate when it has at least one
/// row, no missing values, and as many distinct values as rows.
pub fn profile_values(name: &str, storage: StorageType, values: &[CellValue]) -> ColumnStats {
    let mut distinct: HashSet<String> = HashSet::new();
    let mut sample_values = Vec::with_capacity(SAMPLE_VALUE_LIMIT);
    let mut null_count = 0;

    for value in values {
        if value.is_missing() {
            null_count += 1;
            continue;
        }
        distinct.insert(value.to_string());
        if sample_values.len() < SAMPLE_VALUE_LIMIT {
            sample_values.push(value.clone());
        }
    }

    let row_count = values.len();
    let unique_count = distinct.len();
    let potential_primary_key = row_count > 0 && null_count == 0 && unique_count == row_count;

    ColumnStats {
        name: name.to_string(),
        storage,
        non_null_count: row_count - null_count,
        null_count,
        unique_count,
        sample_values,
        potential_primary_key,
    }
}

/// Profiles a Polars column, taking the storage type from its dtype.
pub fn profile_column(column: &Column) -> ColumnStats {
    let cells = column_cells(column);
    profile_values(column.name().as_str(), storage_type(column.dtype()), &cells)
}

/// Profiles every column of a sheet, in sheet order.
pub fn profile_sheet(frame: &SheetFrame) -> SheetProfile {
    let columns: Vec<ColumnStats> = frame
        .data
        .get_columns()
        .iter()
        .map(profile_column)
        .collect();

    for stats in &columns {
        trace!(
            sheet = %frame.name,
            column = %stats.name,
            storage = %stats.storage,
            non_null = stats.non_null_count,
            unique = stats.unique_count,
            key = stats.potential_primary_key,
            "profiled column"
        );
    }
    debug!(
        sheet = %frame.name,
        rows = frame.record_count(),
        columns = columns.len(),
        keys = columns.iter().filter(|c| c.potential_primary_key).count(),
        "profiled sheet"
    );

    SheetProfile {
        name: frame.name.clone(),
        row_count: frame.record_count(),
        column_count: columns.len(),
        columns,
    }
}

#[cfg(test)]
mod tests {
    use polars::prelude::*;

    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn test_unique_complete_column_is_key() {
        let values = vec![CellValue::Int(1), CellValue::Int(2), CellValue::Int(3)];
        let stats = profile_values("Project_Code", StorageType::Integer, &values);
        assert!(stats.potential_primary_key);
        assert_eq!(stats.unique_count, 3);
        assert_eq!(stats.null_count, 0);
    }

    #[test]
    fn test_duplicates_or_nulls_are_not_keys() {
        let values = vec![text("A"), text("A"), text("B")];
        let stats = profile_values("Region", StorageType::Text, &values);
        assert!(!stats.potential_primary_key);
        assert_eq!(stats.unique_count, 2);

        let values = vec![CellValue::Int(1), CellValue::Missing];
        let stats = profile_values("Code", StorageType::Float, &values);
        assert!(!stats.potential_primary_key);
        assert_eq!(stats.non_null_count, 1);
        assert_eq!(stats.null_count, 1);
    }

    #[test]
    fn test_canonical_strings_merge_int_and_float() {
        let values = vec![CellValue::Int(1), CellValue::Float(1.0), text("1")];
        let stats = profile_values("Mixed", StorageType::Text, &values);
        assert_eq!(stats.unique_count, 1);
    }

    #[test]
    fn test_empty_and_all_missing_columns() {
        let stats = profile_values("Notes", StorageType::Float, &[]);
        assert_eq!(stats.unique_count, 0);
        assert!(!stats.potential_primary_key);

        let stats = profile_values("Notes", StorageType::Float, &vec![CellValue::Missing; 3]);
        assert_eq!(stats.unique_count, 0);
        assert_eq!(stats.null_count, 3);
        assert!(stats.sample_values.is_empty());
        assert!(!stats.potential_primary_key);
    }

    #[test]
    fn test_samples_are_first_present_values() {
        let values: Vec<CellValue> = [None, Some(5), Some(5), Some(6), None, Some(7), Some(8), Some(9)]
            .into_iter()
            .map(|v| v.map_or(CellValue::Missing, CellValue::Int))
            .collect();
        let stats = profile_values("Hours", StorageType::Float, &values);
        assert_eq!(
            stats.sample_values,
            vec![
                CellValue::Int(5),
                CellValue::Int(5),
                CellValue::Int(6),
                CellValue::Int(7),
                CellValue::Int(8)
            ]
        );
    }

    #[test]
    fn test_profile_sheet() {
        let df = DataFrame::new(vec![
            Series::new("Code".into(), vec![1i64, 2, 3]).into_column(),
            Series::new("Name".into(), vec![Some("a"), None, Some("a")]).into_column(),
        ])
        .unwrap();
        let profile = profile_sheet(&SheetFrame::new("Projects", df));

        assert_eq!(profile.row_count, 3);
        assert_eq!(profile.column_count, 2);
        assert_eq!(profile.columns[0].storage, StorageType::Integer);
        assert!(profile.is_key_candidate("Code"));
        assert_eq!(profile.columns[1].storage, StorageType::Text);
        assert_eq!(profile.columns[1].null_count, 1);
        assert!(!profile.is_key_candidate("Name"));
    }
}
