//! SQL column type inference.

use std::fmt;

use wbs_model::{ColumnStats, StorageType};

/// Extra characters added to the longest sampled text value.
const VARCHAR_PADDING: usize = 20;
/// Upper bound for inferred VARCHAR lengths.
const VARCHAR_CAP: usize = 500;
/// Length used when a text column has no samples.
const VARCHAR_DEFAULT: usize = 50;
/// Longest VARCHAR emitted before switching to TEXT.
const VARCHAR_MAX: usize = 255;

/// A generated column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlType {
    Int,
    BigInt,
    TinyIntFlag,
    Decimal { precision: u8, scale: u8 },
    Date,
    DateTime,
    Time,
    Varchar(usize),
    Text,
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int => f.write_str("INT"),
            Self::BigInt => f.write_str("BIGINT"),
            Self::TinyIntFlag => f.write_str("TINYINT(1)"),
            Self::Decimal { precision, scale } => write!(f, "DECIMAL({precision},{scale})"),
            Self::Date => f.write_str("DATE"),
            Self::DateTime => f.write_str("DATETIME"),
            Self::Time => f.write_str("TIME"),
            Self::Varchar(len) => write!(f, "VARCHAR({len})"),
            Self::Text => f.write_str("TEXT"),
        }
    }
}

/// Inferred type of one column and whether it joins the primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnType {
    pub sql_type: SqlType,
    pub primary_key: bool,
}

impl ColumnType {
    fn plain(sql_type: SqlType) -> Self {
        Self {
            sql_type,
            primary_key: false,
        }
    }

    fn key(sql_type: SqlType) -> Self {
        Self {
            sql_type,
            primary_key: true,
        }
    }
}

const DECIMAL_NAME_HINTS: [&str; 5] = ["Hours", "Duration", "Value", "Revenue", "Price"];

/// Applies the type rules in priority order: key-like names, date and time
/// names, amount names, two-valued integers, then the storage type.
///
/// Only sampled values are considered for text lengths, so a long value
/// outside the sample can overflow the inferred VARCHAR.
pub fn infer_sql_type(
    name: &str,
    storage: StorageType,
    sample_values: &[String],
    unique_count: usize,
    row_count: usize,
) -> ColumnType {
    let lower = name.to_lowercase();

    if name.contains("Code") || name.ends_with("_id") {
        return if storage == StorageType::Integer {
            ColumnType::key(SqlType::Int)
        } else {
            ColumnType::key(SqlType::Varchar(20))
        };
    }

    if lower.contains("date") {
        return if storage == StorageType::DateTime {
            ColumnType::plain(SqlType::DateTime)
        } else {
            ColumnType::plain(SqlType::Date)
        };
    }

    if lower.contains("time") {
        return ColumnType::plain(SqlType::Time);
    }

    if DECIMAL_NAME_HINTS.iter().any(|hint| name.contains(hint)) {
        return ColumnType::plain(SqlType::Decimal {
            precision: 10,
            scale: 2,
        });
    }

    if unique_count <= 2 && storage == StorageType::Integer {
        return ColumnType::plain(SqlType::TinyIntFlag);
    }

    match storage {
        StorageType::Integer if unique_count == row_count => ColumnType::key(SqlType::BigInt),
        StorageType::Integer => ColumnType::plain(SqlType::BigInt),
        StorageType::Float => ColumnType::plain(SqlType::Decimal {
            precision: 15,
            scale: 4,
        }),
        StorageType::DateTime => ColumnType::plain(SqlType::DateTime),
        StorageType::Date => ColumnType::plain(SqlType::Date),
        StorageType::Text => ColumnType::plain(varchar_for(sample_values)),
        StorageType::Boolean => ColumnType::plain(SqlType::Varchar(VARCHAR_MAX)),
    }
}

/// [`infer_sql_type`] over a profiled column.
pub fn column_sql_type(stats: &ColumnStats) -> ColumnType {
    let samples: Vec<String> = stats.sample_values.iter().map(ToString::to_string).collect();
    infer_sql_type(
        &stats.name,
        stats.storage,
        &samples,
        stats.unique_count,
        stats.row_count(),
    )
}

fn varchar_for(sample_values: &[String]) -> SqlType {
    let len = sample_values
        .iter()
        .map(|value| value.chars().count())
        .max()
        .map_or(VARCHAR_DEFAULT, |longest| {
            (longest + VARCHAR_PADDING).min(VARCHAR_CAP)
        });
    if len > VARCHAR_MAX {
        SqlType::Text
    } else {
        SqlType::Varchar(len)
    }
}
