//! Shared utilities for the workbook schema crates.
//!
//! This crate provides the Polars glue used across the workspace: converting
//! `AnyValue`s into model [`CellValue`](wbs_model::CellValue)s and strings,
//! numeric parsing, and mapping Polars dtypes onto storage types.

pub mod values;

// Re-export commonly used functions at crate root for convenience
pub use values::{any_to_cell, any_to_f64, any_to_string, column_cells, parse_f64, storage_type};
pub use wbs_model::format_numeric;
