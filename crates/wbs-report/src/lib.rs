//! Output generation for an analyzed workbook.
//!
//! This crate turns a [`WorkbookAnalysis`](wbs_model::WorkbookAnalysis) plus
//! the exported sheet data into text outputs:
//!
//! - **SQL script**: table DDL, data inserts, derived foreign keys and sample queries
//! - **Markdown report**: per-sheet profiles, relationships, data quality and
//!   business commentary

mod error;
mod markdown;
mod narrative;
pub mod sql;

pub use error::{ReportError, Result};
pub use markdown::{REPORT_FILE_NAME, generate_report, key_insights, sample_data_block};
pub use narrative::{InsightSection, Narrative};
pub use sql::{
    ForeignKey, SQL_FILE_NAME, SqlType, derive_foreign_keys, generate_sql_script, infer_sql_type,
    table_order,
};

/// Writes generated text to `path`, replacing any existing file.
pub fn write_output(path: &std::path::Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).map_err(|source| ReportError::FileWrite {
        path: path.to_path_buf(),
        source,
    })
}
