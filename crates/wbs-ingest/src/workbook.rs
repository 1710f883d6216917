//! Workbook reading with calamine.

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use polars::prelude::*;
use tracing::{debug, info, warn};

use wbs_model::CellValue;
use wbs_model::cell::TIME_FORMAT;

use crate::column::build_column;
use crate::error::{IngestError, Result};
use crate::frame::SheetFrame;
use crate::header::normalize_headers;

/// Converts a calamine cell into a model cell.
///
/// Error cells are treated as missing. ISO date and duration strings (as
/// stored by `.ods` files) are kept as text. A date serial below one day is
/// a time of day and becomes `HH:MM:SS` text.
pub fn cell_from_data(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Missing,
        Data::String(s) => CellValue::text(s.as_str()),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) if dt.is_duration() => CellValue::Float(dt.as_f64()),
        Data::DateTime(dt) if (0.0..1.0).contains(&dt.as_f64()) => dt
            .as_datetime()
            .map(|value| CellValue::text(value.time().format(TIME_FORMAT).to_string()))
            .unwrap_or(CellValue::Missing),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(CellValue::DateTime)
            .unwrap_or(CellValue::Missing),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::text(s.as_str()),
    }
}

/// Reads every sheet of a workbook, in workbook order.
///
/// The first row of each sheet is the header; every following row is a
/// record. A sheet with no cells yields an empty frame.
pub fn read_workbook(path: &Path) -> Result<Vec<SheetFrame>> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut workbook = open_workbook_auto(path).map_err(|e| IngestError::Workbook {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let sheet_names = workbook.sheet_names();
    info!(
        path = %path.display(),
        sheets = sheet_names.len(),
        "opened workbook"
    );

    let mut frames = Vec::with_capacity(sheet_names.len());
    for sheet_name in sheet_names {
        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| IngestError::SheetRead {
                sheet: sheet_name.clone(),
                message: e.to_string(),
            })?;

        let rows: Vec<Vec<CellValue>> = range
            .rows()
            .map(|row| row.iter().map(cell_from_data).collect())
            .collect();
        let data = build_frame(&rows)?;

        if data.height() == 0 {
            warn!(sheet = %sheet_name, "sheet has no data rows");
        }
        debug!(
            sheet = %sheet_name,
            rows = data.height(),
            columns = data.width(),
            "read sheet"
        );
        frames.push(SheetFrame::new(sheet_name, data));
    }

    Ok(frames)
}

fn build_frame(rows: &[Vec<CellValue>]) -> Result<DataFrame> {
    let Some((header, records)) = rows.split_first() else {
        return Ok(DataFrame::empty());
    };

    let names = normalize_headers(header);
    let mut columns = Vec::with_capacity(names.len());
    for (idx, name) in names.iter().enumerate() {
        let cells: Vec<CellValue> = records
            .iter()
            .map(|row| row.get(idx).cloned().unwrap_or(CellValue::Missing))
            .collect();
        columns.push(build_column(name, &cells)?);
    }

    Ok(DataFrame::new(columns)?)
}
