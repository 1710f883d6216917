//! SQL script generation.
//!
//! The script has five sections: a header, table DDL in dependency order,
//! data inserts, foreign-key constraints and sample queries.

mod constraints;
mod ddl;
mod insert;
mod naming;
mod queries;
mod types;

use std::path::Path;

use chrono::NaiveDateTime;
use tracing::debug;

use wbs_ingest::SheetFrame;
use wbs_model::WorkbookAnalysis;

use crate::error::{ReportError, Result};

pub use constraints::{ForeignKey, derive_foreign_keys, table_order};
pub use ddl::create_table_sql;
pub use insert::{insert_sql, sql_literal};
pub use naming::{column_name, table_name};
pub use queries::{join_query, row_count_query, sample_queries};
pub use types::{ColumnType, SqlType, column_sql_type, infer_sql_type};

/// File name of the generated script inside the output directory.
pub const SQL_FILE_NAME: &str = "schema.sql";

const BANNER: &str = "-- =====================================================";

fn section(title: &str) -> String {
    format!("\n{BANNER}\n-- {title}\n{BANNER}\n\n")
}

fn header(source_file: &Path, generated_at: NaiveDateTime) -> String {
    let file_name = source_file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| source_file.display().to_string());
    let stem = source_file
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "workbook".to_string());
    let database = table_name(&stem);

    format!(
        "{BANNER}\n\
         -- {title} DATABASE - COMPREHENSIVE SQL SCRIPT\n\
         -- Generated on: {timestamp}\n\
         -- Source: {file_name}\n\
         {BANNER}\n\n\
         -- Create database (uncomment if needed)\n\
         -- CREATE DATABASE {database};\n\
         -- USE {database};\n\n\
         -- Enable foreign key checks\n\
         SET FOREIGN_KEY_CHECKS = 1;\n\n",
        title = stem.to_uppercase(),
        timestamp = generated_at.format("%Y-%m-%d %H:%M:%S"),
    )
}

fn find_frame<'a>(frames: &'a [SheetFrame], sheet: &str) -> Result<&'a SheetFrame> {
    frames
        .iter()
        .find(|frame| frame.name == sheet)
        .ok_or_else(|| ReportError::MissingSheetData {
            sheet: sheet.to_string(),
        })
}

/// Builds the complete SQL script.
///
/// Column types come from the profiled summary; row data comes from the
/// exported sheet frames, which must cover every sheet in `analysis`.
pub fn generate_sql_script(
    analysis: &WorkbookAnalysis,
    frames: &[SheetFrame],
    generated_at: NaiveDateTime,
) -> Result<String> {
    let keys = derive_foreign_keys(analysis);
    let tables = table_order(analysis, &keys);
    debug!(
        tables = tables.len(),
        foreign_keys = keys.len(),
        "generating SQL script"
    );

    let mut sql = header(&analysis.source_file, generated_at);

    sql.push_str(&section("TABLE CREATION STATEMENTS"));
    for sheet in &tables {
        sql.push_str(&create_table_sql(sheet));
    }

    sql.push_str(&section("DATA INSERTION STATEMENTS"));
    for sheet in &tables {
        if sheet.columns.is_empty() {
            continue;
        }
        let frame = find_frame(frames, &sheet.name)?;
        if let Some(insert) = insert_sql(frame) {
            sql.push_str(&insert);
        }
    }

    sql.push_str(&section("FOREIGN KEY CONSTRAINTS"));
    if keys.is_empty() {
        sql.push_str("-- No foreign keys derived from the relationship analysis\n\n");
    }
    for key in &keys {
        sql.push_str(&key.to_sql());
        sql.push('\n');
    }

    sql.push_str(&section("SAMPLE QUERIES FOR TESTING"));
    sql.push_str(&sample_queries(analysis, &keys, &tables));

    Ok(sql)
}
