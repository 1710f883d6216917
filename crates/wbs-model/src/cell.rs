//! Spreadsheet cell values.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Display format for date cells.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Display format for datetime cells.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Text format for time-of-day cells.
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// A single spreadsheet cell after conversion from the workbook reader.
///
/// Serialized untagged so sample values read naturally in the JSON summary
/// (`12`, `3.5`, `"Athens"`, `null`). Text that happens to look like an ISO
/// date deserializes back as [`CellValue::Date`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Missing,
    Int(i64),
    Float(f64),
    Bool(bool),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Text(String),
}

impl CellValue {
    /// Builds a text cell, treating empty strings as missing.
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            Self::Missing
        } else {
            Self::Text(value)
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Numeric view of the cell (integers and floats only).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            Self::Float(v) => whole_float(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

/// The integer value of a whole float that fits in `i64`.
///
/// Whole floats beyond the `i64` range stay floats instead of saturating.
pub(crate) fn whole_float(v: f64) -> Option<i64> {
    // i64::MIN is exactly representable; i64::MAX rounds up to 2^63.
    const LOWER: f64 = i64::MIN as f64;
    const UPPER: f64 = i64::MAX as f64;
    (v.fract() == 0.0 && (LOWER..UPPER).contains(&v)).then_some(v as i64)
}

/// The canonical string representation used for distinct counting and value
/// matching. Missing cells render as the empty string.
impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => Ok(()),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => f.write_str(&format_numeric(*v)),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Date(d) => write!(f, "{}", d.format(DATE_FORMAT)),
            Self::DateTime(dt) => write!(f, "{}", dt.format(DATETIME_FORMAT)),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Formats a floating-point number without trailing zeros (`1.0` -> `1`).
///
/// # Examples
///
/// ```
/// use wbs_model::format_numeric;
///
/// assert_eq!(format_numeric(1.0), "1");
/// assert_eq!(format_numeric(1.50), "1.5");
/// assert_eq!(format_numeric(100.0), "100");
/// ```
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if !s.contains('.') {
        return s;
    }
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
