//! Workbook ingestion utilities.
//!
//! This crate reads spreadsheet workbooks into Polars DataFrames (one per
//! sheet), exports those frames as flat CSV files and loads them back.
//!
//! # Features
//!
//! - **Workbook Reading**: every sheet of an `.xlsx`/`.xls`/`.ods` file, first row as header
//! - **Header Normalization**: blank and duplicate headers get stable names
//! - **CSV Export**: one `<sheet>_data.csv` per sheet
//! - **CSV Reload**: re-read exported files with type inference
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use wbs_ingest::{read_workbook, write_sheet_csv};
//!
//! let sheets = read_workbook(Path::new("data/workbook.xlsx"))?;
//! for sheet in &sheets {
//!     write_sheet_csv(sheet, Path::new("output"))?;
//! }
//! ```

mod column;
mod error;
mod export;
mod frame;
mod header;
mod workbook;

// === Error Types ===
pub use error::{IngestError, Result};

// === Sheet Frames ===
pub use column::build_column;
pub use frame::SheetFrame;
pub use header::normalize_headers;

// === Workbook Reading ===
pub use workbook::{cell_from_data, read_workbook};

// === CSV Export ===
pub use export::{csv_file_name, load_sheet_frames, read_sheet_csv, write_sheet_csv};
