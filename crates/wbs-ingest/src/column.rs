//! Typed Polars columns from workbook cells.

use chrono::{DateTime, NaiveDate};
use polars::prelude::*;

use wbs_model::{CellValue, StorageType};

use crate::error::Result;

/// Builds a Polars column from one sheet column's cells.
///
/// The dtype follows [`StorageType::infer`]: integers without gaps become
/// `Int64`, other numeric columns `Float64`, dates and datetimes their
/// temporal dtypes, and anything mixed a `String` column holding each cell's
/// canonical text.
pub fn build_column(name: &str, cells: &[CellValue]) -> Result<Column> {
    let series = match StorageType::infer(cells) {
        StorageType::Integer => {
            let values: Vec<Option<i64>> = cells.iter().map(CellValue::as_i64).collect();
            Series::new(name.into(), values)
        }
        StorageType::Float => {
            let values: Vec<Option<f64>> = cells.iter().map(CellValue::as_f64).collect();
            Series::new(name.into(), values)
        }
        StorageType::Boolean => {
            let values: Vec<Option<bool>> = cells
                .iter()
                .map(|cell| match cell {
                    CellValue::Bool(b) => Some(*b),
                    _ => None,
                })
                .collect();
            Series::new(name.into(), values)
        }
        StorageType::Date => {
            let values: Vec<Option<i32>> = cells.iter().map(epoch_days).collect();
            Series::new(name.into(), values).cast(&DataType::Date)?
        }
        StorageType::DateTime => {
            let values: Vec<Option<i64>> = cells.iter().map(epoch_millis).collect();
            Series::new(name.into(), values)
                .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?
        }
        StorageType::Text => {
            let values: Vec<Option<String>> = cells
                .iter()
                .map(|cell| (!cell.is_missing()).then(|| cell.to_string()))
                .collect();
            Series::new(name.into(), values)
        }
    };
    Ok(series.into_column())
}

fn epoch() -> NaiveDate {
    DateTime::UNIX_EPOCH.date_naive()
}

fn epoch_days(cell: &CellValue) -> Option<i32> {
    match cell {
        CellValue::Date(date) => i32::try_from(date.signed_duration_since(epoch()).num_days()).ok(),
        _ => None,
    }
}

fn epoch_millis(cell: &CellValue) -> Option<i64> {
    match cell {
        CellValue::DateTime(dt) => Some(dt.and_utc().timestamp_millis()),
        CellValue::Date(date) => date
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp_millis()),
        _ => None,
    }
}
