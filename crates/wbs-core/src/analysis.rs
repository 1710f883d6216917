//! Workbook analysis assembly and the JSON summary file.

use std::path::Path;

use tracing::info;

use wbs_ingest::SheetFrame;
use wbs_model::WorkbookAnalysis;

use crate::error::{CoreError, Result};
use crate::profile::profile_sheet;
use crate::relationships::{SheetValues, infer_relationships};

/// File name of the JSON summary inside the output directory.
pub const ANALYSIS_FILE_NAME: &str = "workbook_analysis.json";

/// Profiles every sheet and infers cross-sheet relationships.
pub fn analyze_workbook(source_file: &Path, sheets: &[SheetFrame]) -> WorkbookAnalysis {
    let profiles = sheets.iter().map(profile_sheet).collect();
    let values: Vec<SheetValues> = sheets.iter().map(SheetValues::from_frame).collect();
    let relationships = infer_relationships(&values);

    let analysis = WorkbookAnalysis::new(source_file, profiles, relationships);
    info!(
        sheets = analysis.total_sheets,
        rows = analysis.total_rows(),
        relationships = analysis.relationships.len(),
        "analyzed workbook"
    );
    analysis
}

/// Writes the summary as pretty-printed JSON, replacing any previous file.
pub fn write_analysis_json(analysis: &WorkbookAnalysis, path: &Path) -> Result<()> {
    let mut json = serde_json::to_string_pretty(analysis).map_err(|source| CoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    json.push('\n');
    std::fs::write(path, json).map_err(|source| CoreError::FileWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads a summary written by [`write_analysis_json`].
pub fn read_analysis_json(path: &Path) -> Result<WorkbookAnalysis> {
    let text = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            CoreError::SummaryNotFound {
                path: path.to_path_buf(),
            }
        } else {
            CoreError::FileRead {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    serde_json::from_str(&text).map_err(|source| CoreError::Json {
        path: path.to_path_buf(),
        source,
    })
}
