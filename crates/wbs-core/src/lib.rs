//! Schema inference over workbook sheets.
//!
//! - [`profile`]: per-column statistics and key-candidate detection
//! - [`relationships`]: directed value-overlap matching between sheets
//! - [`analysis`]: assembling and persisting the [`WorkbookAnalysis`] summary
//!
//! [`WorkbookAnalysis`]: wbs_model::WorkbookAnalysis

pub mod analysis;
pub mod error;
pub mod profile;
pub mod relationships;

pub use analysis::{ANALYSIS_FILE_NAME, analyze_workbook, read_analysis_json, write_analysis_json};
pub use error::{CoreError, Result};
pub use profile::{profile_column, profile_sheet, profile_values};
pub use relationships::{
    ColumnMatch, ColumnValues, MATCH_THRESHOLD, SheetValues, infer_relationships, match_percentage,
};
