use std::path::PathBuf;

use wbs_model::WorkbookAnalysis;

/// Outcome of the extract stage.
#[derive(Debug)]
pub struct ExtractResult {
    pub analysis: WorkbookAnalysis,
    pub output_dir: PathBuf,
    /// One CSV per sheet, in workbook order.
    pub csv_files: Vec<PathBuf>,
    pub summary_file: PathBuf,
}

#[derive(Debug)]
pub struct SqlResult {
    pub path: PathBuf,
    pub tables: usize,
    pub foreign_keys: usize,
    pub rows: usize,
}

#[derive(Debug)]
pub struct ReportResult {
    pub path: PathBuf,
    pub sheets: usize,
    pub relationships: usize,
}

/// All three stages of a `run`.
#[derive(Debug)]
pub struct RunResult {
    pub extract: ExtractResult,
    pub sql: SqlResult,
    pub report: ReportResult,
}
