//! Flat-file export of sheet frames and reloading of exported files.

use std::fs::File;
use std::path::{Path, PathBuf};

use polars::prelude::*;
use tracing::debug;

use wbs_model::cell::DATETIME_FORMAT;

use crate::error::{IngestError, Result};
use crate::frame::SheetFrame;

/// File name of a sheet's CSV export: spaces and slashes become underscores.
///
/// # Examples
///
/// ```
/// use wbs_ingest::csv_file_name;
///
/// assert_eq!(csv_file_name("Work Orders"), "Work_Orders_data.csv");
/// assert_eq!(csv_file_name("Q1/Q2 Plan"), "Q1_Q2_Plan_data.csv");
/// ```
pub fn csv_file_name(sheet_name: &str) -> String {
    let stem: String = sheet_name
        .chars()
        .map(|c| if c == ' ' || c == '/' { '_' } else { c })
        .collect();
    format!("{stem}_data.csv")
}

/// Writes a sheet as CSV into `dir`, returning the written path.
///
/// The header row is always written; missing cells are empty fields and
/// datetimes use `YYYY-MM-DD HH:MM:SS`. An existing file is overwritten.
pub fn write_sheet_csv(frame: &SheetFrame, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|e| IngestError::DirectoryCreate {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let path = dir.join(csv_file_name(&frame.name));
    let mut file = File::create(&path).map_err(|e| IngestError::FileWrite {
        path: path.clone(),
        source: e,
    })?;

    let mut data = frame.data.clone();
    if data.width() == 0 {
        // A sheet without a header row exports as an empty file.
        debug!(sheet = %frame.name, path = %path.display(), "wrote empty sheet CSV");
        return Ok(path);
    }
    CsvWriter::new(&mut file)
        .include_header(true)
        .with_datetime_format(Some(DATETIME_FORMAT.to_string()))
        .finish(&mut data)
        .map_err(|e| IngestError::CsvWrite {
            path: path.clone(),
            message: e.to_string(),
        })?;

    debug!(
        sheet = %frame.name,
        path = %path.display(),
        rows = data.height(),
        "wrote sheet CSV"
    );
    Ok(path)
}

/// Reads an exported CSV back into a DataFrame, inferring column types from
/// every row and parsing date/datetime text.
pub fn read_sheet_csv(path: &Path) -> Result<DataFrame> {
    let contents = std::fs::read(path).map_err(|e| IngestError::read(path, e))?;
    if contents.iter().all(u8::is_ascii_whitespace) {
        return Ok(DataFrame::empty());
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .map_parse_options(|opts| opts.with_try_parse_dates(true))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    Ok(df)
}

/// Loads the exported CSV of each named sheet from `dir`, preserving the
/// given order.
pub fn load_sheet_frames<S: AsRef<str>>(dir: &Path, sheet_names: &[S]) -> Result<Vec<SheetFrame>> {
    sheet_names
        .iter()
        .map(|name| {
            let name = name.as_ref();
            let path = dir.join(csv_file_name(name));
            let data = read_sheet_csv(&path)?;
            debug!(sheet = %name, rows = data.height(), "loaded sheet CSV");
            Ok(SheetFrame::new(name, data))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_file_name() {
        assert_eq!(csv_file_name("Projects"), "Projects_data.csv");
        assert_eq!(csv_file_name("Staff List"), "Staff_List_data.csv");
        assert_eq!(csv_file_name("A/B C"), "A_B_C_data.csv");
    }

    #[test]
    fn test_read_missing_csv() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_sheet_csv(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, IngestError::FileNotFound { .. }));
    }

    #[test]
    fn test_read_empty_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Empty_data.csv");
        std::fs::write(&path, "").unwrap();
        let df = read_sheet_csv(&path).unwrap();
        assert_eq!(df.width(), 0);
    }
}
