//! Polars AnyValue utility functions.
//!
//! This module provides helper functions for working with Polars `AnyValue` types,
//! including conversion into model cells, string conversions and numeric parsing.

use chrono::{DateTime, Days, NaiveDate};
use polars::prelude::*;

use wbs_model::{CellValue, StorageType};

/// Converts a Polars `AnyValue` into a model [`CellValue`].
///
/// Empty strings are treated as missing, matching how the CSV reader and the
/// workbook reader represent blank cells.
pub fn any_to_cell(value: AnyValue<'_>) -> CellValue {
    match value {
        AnyValue::Null => CellValue::Missing,
        AnyValue::Boolean(b) => CellValue::Bool(b),
        AnyValue::Int8(v) => CellValue::Int(i64::from(v)),
        AnyValue::Int16(v) => CellValue::Int(i64::from(v)),
        AnyValue::Int32(v) => CellValue::Int(i64::from(v)),
        AnyValue::Int64(v) => CellValue::Int(v),
        AnyValue::UInt8(v) => CellValue::Int(i64::from(v)),
        AnyValue::UInt16(v) => CellValue::Int(i64::from(v)),
        AnyValue::UInt32(v) => CellValue::Int(i64::from(v)),
        AnyValue::UInt64(v) => match i64::try_from(v) {
            Ok(v) => CellValue::Int(v),
            Err(_) => CellValue::Float(v as f64),
        },
        AnyValue::Float32(v) => CellValue::Float(f64::from(v)),
        AnyValue::Float64(v) => CellValue::Float(v),
        AnyValue::String(s) => CellValue::text(s),
        AnyValue::StringOwned(s) => CellValue::text(s.as_str()),
        AnyValue::Date(days) => date_from_epoch_days(days)
            .map(CellValue::Date)
            .unwrap_or(CellValue::Missing),
        AnyValue::Datetime(v, unit, _) => datetime_from_epoch(v, unit)
            .map(CellValue::DateTime)
            .unwrap_or(CellValue::Missing),
        other => CellValue::text(other.to_string()),
    }
}

/// Converts a Polars `AnyValue` to its canonical string representation.
///
/// Returns an empty string for `Null`, formats floats without trailing zeros.
pub fn any_to_string(value: AnyValue<'_>) -> String {
    any_to_cell(value).to_string()
}

/// Converts an `AnyValue` to `f64`, returning `None` for non-numeric or null values.
pub fn any_to_f64(value: AnyValue<'_>) -> Option<f64> {
    match any_to_cell(value) {
        CellValue::Int(v) => Some(v as f64),
        CellValue::Float(v) => Some(v),
        CellValue::Text(s) => parse_f64(&s),
        _ => None,
    }
}

/// Parses a string as `f64`, returning `None` for invalid or empty strings.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Reads every cell of a column in row order.
pub fn column_cells(column: &Column) -> Vec<CellValue> {
    (0..column.len())
        .map(|idx| {
            column
                .get(idx)
                .map(any_to_cell)
                .unwrap_or(CellValue::Missing)
        })
        .collect()
}

/// Maps a Polars dtype onto the model storage type.
pub fn storage_type(dtype: &DataType) -> StorageType {
    match dtype {
        DataType::Boolean => StorageType::Boolean,
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64 => StorageType::Integer,
        DataType::Float32 | DataType::Float64 => StorageType::Float,
        DataType::Date => StorageType::Date,
        DataType::Datetime(_, _) => StorageType::DateTime,
        // Columns with no values at all come back as Null; a dataframe reader
        // would report those as float.
        DataType::Null => StorageType::Float,
        _ => StorageType::Text,
    }
}

fn date_from_epoch_days(days: i32) -> Option<NaiveDate> {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1)?;
    if days >= 0 {
        epoch.checked_add_days(Days::new(u64::from(days.unsigned_abs())))
    } else {
        epoch.checked_sub_days(Days::new(u64::from(days.unsigned_abs())))
    }
}

fn datetime_from_epoch(value: i64, unit: TimeUnit) -> Option<chrono::NaiveDateTime> {
    let parsed = match unit {
        TimeUnit::Milliseconds => DateTime::from_timestamp_millis(value),
        TimeUnit::Microseconds => DateTime::from_timestamp_micros(value),
        TimeUnit::Nanoseconds => Some(DateTime::from_timestamp_nanos(value)),
    };
    parsed.map(|dt| dt.naive_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_to_string_null() {
        assert_eq!(any_to_string(AnyValue::Null), "");
    }

    #[test]
    fn test_any_to_string_integers() {
        assert_eq!(any_to_string(AnyValue::Int32(42)), "42");
        assert_eq!(any_to_string(AnyValue::Int64(-100)), "-100");
        assert_eq!(any_to_string(AnyValue::UInt32(0)), "0");
    }

    #[test]
    fn test_any_to_string_floats() {
        assert_eq!(any_to_string(AnyValue::Float64(1.5)), "1.5");
        assert_eq!(any_to_string(AnyValue::Float64(1.0)), "1");
        assert_eq!(any_to_string(AnyValue::Float64(250.0)), "250");
    }

    #[test]
    fn test_any_to_cell_empty_string_is_missing() {
        assert_eq!(any_to_cell(AnyValue::String("")), CellValue::Missing);
        assert_eq!(
            any_to_cell(AnyValue::String("Athens")),
            CellValue::Text("Athens".to_string())
        );
    }

    #[test]
    fn test_any_to_cell_temporal() {
        assert_eq!(
            any_to_cell(AnyValue::Date(19_358)),
            CellValue::Date(NaiveDate::from_ymd_opt(2023, 1, 1).unwrap())
        );
        let millis = 1_672_531_200_000; // 2023-01-01 00:00:00
        assert_eq!(
            any_to_string(AnyValue::Datetime(millis, TimeUnit::Milliseconds, None)),
            "2023-01-01 00:00:00"
        );
    }

    #[test]
    fn test_any_to_f64() {
        assert_eq!(any_to_f64(AnyValue::Null), None);
        assert_eq!(any_to_f64(AnyValue::Int32(42)), Some(42.0));
        assert_eq!(any_to_f64(AnyValue::String("2.5")), Some(2.5));
        assert_eq!(any_to_f64(AnyValue::String("invalid")), None);
    }

    #[test]
    fn test_parse_f64() {
        assert_eq!(parse_f64(""), None);
        assert_eq!(parse_f64("  3.25  "), Some(3.25));
        assert_eq!(parse_f64("abc"), None);
    }

    #[test]
    fn test_storage_type_mapping() {
        assert_eq!(storage_type(&DataType::Int64), StorageType::Integer);
        assert_eq!(storage_type(&DataType::Float64), StorageType::Float);
        assert_eq!(storage_type(&DataType::String), StorageType::Text);
        assert_eq!(storage_type(&DataType::Date), StorageType::Date);
        assert_eq!(
            storage_type(&DataType::Datetime(TimeUnit::Microseconds, None)),
            StorageType::DateTime
        );
    }

    #[test]
    fn test_column_cells() {
        let column = Series::new("Code".into(), &[Some(1i64), None, Some(3)]).into_column();
        assert_eq!(
            column_cells(&column),
            vec![CellValue::Int(1), CellValue::Missing, CellValue::Int(3)]
        );
    }
}
