//! Workbook analysis data model.
//!
//! Everything the extractor computes and the downstream generators read back
//! lives here: cell values as read from the workbook, per-column statistics,
//! per-sheet profiles, and the cross-sheet relationship candidates. All types
//! are serde-serializable; the JSON summary is a [`WorkbookAnalysis`].

pub mod analysis;
pub mod cell;
pub mod profile;
pub mod relationship;
pub mod storage;

pub use analysis::WorkbookAnalysis;
pub use cell::{CellValue, format_numeric};
pub use profile::{ColumnStats, SAMPLE_VALUE_LIMIT, SheetProfile};
pub use relationship::RelationshipCandidate;
pub use storage::StorageType;
