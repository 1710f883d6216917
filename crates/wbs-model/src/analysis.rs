//! The JSON summary produced by the extractor.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::profile::SheetProfile;
use crate::relationship::RelationshipCandidate;

/// Complete result of analyzing one workbook.
///
/// Sheets and relationships are stored as ordered lists so the serialized
/// form is byte-stable across runs on the same input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkbookAnalysis {
    pub source_file: PathBuf,
    pub total_sheets: usize,
    /// Sheet names in workbook order.
    pub sheet_names: Vec<String>,
    /// Sheet profiles in workbook order.
    pub sheets: Vec<SheetProfile>,
    /// Relationship candidates, highest match first.
    pub relationships: Vec<RelationshipCandidate>,
}

impl WorkbookAnalysis {
    pub fn new(
        source_file: impl Into<PathBuf>,
        sheets: Vec<SheetProfile>,
        relationships: Vec<RelationshipCandidate>,
    ) -> Self {
        let sheet_names = sheets.iter().map(|sheet| sheet.name.clone()).collect();
        Self {
            source_file: source_file.into(),
            total_sheets: sheets.len(),
            sheet_names,
            sheets,
            relationships,
        }
    }

    pub fn sheet(&self, name: &str) -> Option<&SheetProfile> {
        self.sheets.iter().find(|sheet| sheet.name == name)
    }

    /// Position of a sheet in workbook order.
    pub fn sheet_index(&self, name: &str) -> Option<usize> {
        self.sheet_names.iter().position(|sheet| sheet == name)
    }

    pub fn total_rows(&self) -> usize {
        self.sheets.iter().map(|sheet| sheet.row_count).sum()
    }

    pub fn total_columns(&self) -> usize {
        self.sheets.iter().map(|sheet| sheet.column_count).sum()
    }

    /// Relationships where every source value appears in the target.
    pub fn full_matches(&self) -> impl Iterator<Item = &RelationshipCandidate> {
        self.relationships
            .iter()
            .filter(|relationship| relationship.is_full_match())
    }
}
