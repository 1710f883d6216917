//! Column storage types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cell::{CellValue, whole_float};

/// The storage type of a column, inferred from its cell values.
///
/// Follows dataframe-reader conventions: whole numbers with gaps widen to
/// `Float`, an all-missing column is `Float`, and any mix of kinds is `Text`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StorageType {
    #[serde(rename = "integer")]
    Integer,
    #[serde(rename = "float")]
    Float,
    #[serde(rename = "boolean")]
    Boolean,
    #[serde(rename = "date")]
    Date,
    #[serde(rename = "datetime")]
    DateTime,
    #[serde(rename = "text")]
    Text,
}

#[derive(Debug, Default)]
struct KindCounts {
    missing: usize,
    whole: usize,
    fractional: usize,
    boolean: usize,
    date: usize,
    datetime: usize,
    text: usize,
}

impl KindCounts {
    fn from_values(values: &[CellValue]) -> Self {
        let mut counts = Self::default();
        for value in values {
            match value {
                CellValue::Missing => counts.missing += 1,
                CellValue::Int(_) => counts.whole += 1,
                CellValue::Float(v) if whole_float(*v).is_some() => counts.whole += 1,
                CellValue::Float(_) => counts.fractional += 1,
                CellValue::Bool(_) => counts.boolean += 1,
                CellValue::Date(_) => counts.date += 1,
                CellValue::DateTime(_) => counts.datetime += 1,
                CellValue::Text(_) => counts.text += 1,
            }
        }
        counts
    }

    fn kinds_present(&self) -> usize {
        [
            self.whole + self.fractional,
            self.boolean,
            self.date + self.datetime,
            self.text,
        ]
        .iter()
        .filter(|count| **count > 0)
        .count()
    }
}

impl StorageType {
    /// Infers the storage type of a column of cells.
    pub fn infer(values: &[CellValue]) -> Self {
        let counts = KindCounts::from_values(values);
        if counts.missing == values.len() {
            return Self::Float;
        }
        if counts.kinds_present() > 1 || counts.text > 0 {
            return Self::Text;
        }
        if counts.whole + counts.fractional > 0 {
            if counts.fractional == 0 && counts.missing == 0 {
                Self::Integer
            } else {
                Self::Float
            }
        } else if counts.boolean > 0 {
            // Booleans with gaps cannot stay boolean in a dataframe column.
            if counts.missing == 0 {
                Self::Boolean
            } else {
                Self::Text
            }
        } else if counts.datetime > 0 {
            Self::DateTime
        } else {
            Self::Date
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::Text => "text",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer | Self::Float)
    }

    pub fn is_temporal(&self) -> bool {
        matches!(self, Self::Date | Self::DateTime)
    }
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
