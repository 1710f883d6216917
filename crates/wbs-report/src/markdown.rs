//! Markdown analysis report.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDateTime;
use comfy_table::presets::ASCII_FULL_CONDENSED;
use comfy_table::Table;
use tracing::debug;

use wbs_common::column_cells;
use wbs_core::ANALYSIS_FILE_NAME;
use wbs_ingest::{SheetFrame, csv_file_name};
use wbs_model::{CellValue, SheetProfile, StorageType, WorkbookAnalysis, format_numeric};

use crate::error::{ReportError, Result};
use crate::narrative::Narrative;
use crate::sql::{ForeignKey, SQL_FILE_NAME, column_name, derive_foreign_keys, table_name, table_order};

/// File name of the report inside the output directory.
pub const REPORT_FILE_NAME: &str = "analysis_report.md";

/// Rows shown in each sheet's sample block.
const SAMPLE_ROWS: usize = 3;
/// Relationships listed in the relationship section.
const TOP_RELATIONSHIPS: usize = 10;
/// Columns missing more than this share of values are reported.
const NULL_RATIO_THRESHOLD: f64 = 0.10;

const MONEY_HINTS: [&str; 3] = ["Value", "Revenue", "Price"];
const DURATION_HINTS: [&str; 2] = ["Duration", "Hours"];

/// Renders the first rows of a sheet as a fixed-width text table.
pub fn sample_data_block(frame: &SheetFrame) -> String {
    if frame.data.width() == 0 {
        return "(no columns)".to_string();
    }

    let mut table = Table::new();
    table.load_preset(ASCII_FULL_CONDENSED);
    table.set_header(frame.column_names());

    let columns: Vec<Vec<CellValue>> = frame
        .data
        .head(Some(SAMPLE_ROWS))
        .get_columns()
        .iter()
        .map(column_cells)
        .collect();
    let rows = frame.record_count().min(SAMPLE_ROWS);
    for row in 0..rows {
        table.add_row(
            columns
                .iter()
                .map(|cells| cells.get(row).map(ToString::to_string).unwrap_or_default())
                .collect::<Vec<_>>(),
        );
    }
    table.to_string()
}

/// Generic per-sheet observations followed by the configured notes.
pub fn key_insights(profile: &SheetProfile, frame: &SheetFrame, narrative: &Narrative) -> Vec<String> {
    let rows = frame.record_count();
    let mut insights = vec![format!("{rows} records")];

    let keys: Vec<&str> = profile.key_candidates().map(|c| c.name.as_str()).collect();
    if !keys.is_empty() {
        insights.push(format!("Key candidates: {}", keys.join(", ")));
    }

    let mut first_text_done = false;
    for stats in &profile.columns {
        let Ok(column) = frame.data.column(&stats.name) else {
            continue;
        };
        let cells = column_cells(column);

        if is_flag_column(stats.storage, &cells) {
            let set = cells.iter().filter(|cell| is_set(cell)).count();
            insights.push(format!("{set} of {rows} rows have {} set", stats.name));
        } else if stats.storage.is_numeric() && has_hint(&stats.name, &MONEY_HINTS) {
            let total: f64 = cells.iter().filter_map(CellValue::as_f64).sum();
            insights.push(format!(
                "Total {}: {}{}",
                stats.name,
                narrative.currency_symbol,
                format_amount(total)
            ));
        } else if stats.storage.is_numeric() && has_hint(&stats.name, &DURATION_HINTS) {
            let values: Vec<f64> = cells.iter().filter_map(CellValue::as_f64).collect();
            if !values.is_empty() {
                let mean = values.iter().sum::<f64>() / values.len() as f64;
                insights.push(format!("Average {}: {mean:.1}", stats.name));
            }
        } else if stats.storage == StorageType::Text && !first_text_done {
            first_text_done = true;
            if let Some((value, count)) = most_frequent(&cells) {
                insights.push(format!(
                    "Most frequent {}: {value} ({count} rows)",
                    stats.name
                ));
            }
        }
    }

    insights.extend(narrative.notes(&profile.name).iter().cloned());
    insights
}

fn has_hint(name: &str, hints: &[&str]) -> bool {
    hints.iter().any(|hint| name.contains(hint))
}

fn is_set(cell: &CellValue) -> bool {
    matches!(cell, CellValue::Bool(true)) || cell.as_i64() == Some(1)
}

/// Integer or boolean column holding only 0/1 (or false/true).
fn is_flag_column(storage: StorageType, cells: &[CellValue]) -> bool {
    match storage {
        StorageType::Boolean => true,
        StorageType::Integer => {
            !cells.is_empty()
                && cells
                    .iter()
                    .all(|cell| matches!(cell.as_i64(), Some(0 | 1)))
        }
        _ => false,
    }
}

/// Most common non-missing value; ties go to the smallest value.
fn most_frequent(cells: &[CellValue]) -> Option<(String, usize)> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for cell in cells.iter().filter(|cell| !cell.is_missing()) {
        *counts.entry(cell.to_string()).or_default() += 1;
    }
    let mut best: Option<(String, usize)> = None;
    for (value, count) in counts {
        if best.as_ref().is_none_or(|(_, top)| count > *top) {
            best = Some((value, count));
        }
    }
    best
}

/// Two decimals with `,` thousands separators.
fn format_amount(value: f64) -> String {
    let text = format!("{:.2}", value.abs());
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, digit) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{grouped}.{fraction}")
}

fn find_frame<'a>(frames: &'a [SheetFrame], sheet: &str) -> Result<&'a SheetFrame> {
    frames
        .iter()
        .find(|frame| frame.name == sheet)
        .ok_or_else(|| ReportError::MissingSheetData {
            sheet: sheet.to_string(),
        })
}

fn write_sheet_section(
    out: &mut String,
    profile: &SheetProfile,
    frame: &SheetFrame,
    narrative: &Narrative,
) {
    out.push_str(&format!("\n### {}\n", profile.name));
    out.push_str(&format!(
        "**Dimensions**: {} rows × {} columns\n\n",
        profile.row_count, profile.column_count
    ));
    out.push_str(&format!("**Purpose**: {}\n\n", narrative.purpose(&profile.name)));
    out.push_str("**Columns**:\n");
    for stats in &profile.columns {
        let marker = if stats.potential_primary_key { " 🔑" } else { "" };
        out.push_str(&format!(
            "- **{}**{marker}: {} ({} non-null, {} unique)\n",
            stats.name, stats.storage, stats.non_null_count, stats.unique_count
        ));
    }
    out.push_str(&format!("\n**Sample Data**:\n```\n{}\n```\n\n", sample_data_block(frame)));
    out.push_str("**Key Insights**:\n");
    for insight in key_insights(profile, frame, narrative) {
        out.push_str(&format!("- {insight}\n"));
    }
    out.push_str("\n---\n");
}

fn write_relationships(out: &mut String, analysis: &WorkbookAnalysis, keys: &[ForeignKey]) {
    out.push_str("\n## RELATIONSHIP ANALYSIS\n\n");
    out.push_str(
        "The following relationships were identified between sheets based on data analysis:\n\n",
    );
    out.push_str("### Primary Relationships (100% match):\n");
    let mut any = false;
    for rel in analysis.full_matches().take(TOP_RELATIONSHIPS) {
        any = true;
        out.push_str(&format!(
            "- **{}.{}** → **{}.{}** ({:.1}% match)\n",
            rel.from_sheet, rel.from_column, rel.to_sheet, rel.to_column, rel.match_percentage
        ));
    }
    if !any {
        out.push_str("- None found\n");
    }

    out.push_str("\n### Entity Relationship Diagram (Conceptual):\n```\n");
    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    for key in keys {
        if !seen.insert((key.parent_sheet.as_str(), key.child_sheet.as_str())) {
            continue;
        }
        let one_to_one = analysis
            .sheet(&key.child_sheet)
            .is_some_and(|sheet| sheet.is_key_candidate(&key.child_column));
        let many = if one_to_one { "1" } else { "M" };
        out.push_str(&format!("{} (1) ←→ ({many}) {}\n", key.parent_sheet, key.child_sheet));
    }
    if keys.is_empty() {
        out.push_str("No foreign-key relationships were derived.\n");
    }
    out.push_str("```\n\n---\n");
}

fn write_data_quality(out: &mut String, analysis: &WorkbookAnalysis) {
    out.push_str("\n## DATA QUALITY ASSESSMENT\n");
    let mut any = false;
    for sheet in analysis.sheets.iter().filter(|sheet| sheet.row_count > 0) {
        let flagged: Vec<_> = sheet
            .columns
            .iter()
            .filter(|column| column.null_ratio() > NULL_RATIO_THRESHOLD)
            .collect();
        if flagged.is_empty() {
            continue;
        }
        any = true;
        out.push_str(&format!("\n### {} - Data Quality Issues:\n", sheet.name));
        for column in flagged {
            let pct = (column.null_ratio() * 10_000.0).round() / 100.0;
            out.push_str(&format!(
                "- **{}**: {}% missing values\n",
                column.name,
                format_numeric(pct)
            ));
        }
    }
    if !any {
        out.push_str("\nNo columns with more than 10% missing values.\n");
    }
}

fn write_business_insights(out: &mut String, narrative: &Narrative) {
    out.push_str("\n---\n\n## BUSINESS INSIGHTS\n");
    for section in &narrative.business_insights {
        out.push_str(&format!("\n### {}:\n", section.heading));
        for point in &section.points {
            out.push_str(&format!("- {point}\n"));
        }
    }
}

fn write_structure(
    out: &mut String,
    tables: &[&SheetProfile],
    keys: &[ForeignKey],
    narrative: &Narrative,
) {
    out.push_str("\n---\n\n## RECOMMENDED DATABASE STRUCTURE\n\n");
    out.push_str(
        "Based on the analysis, the following normalized database structure is recommended:\n\n",
    );
    out.push_str("### Core Tables:\n");
    for (idx, sheet) in tables.iter().enumerate() {
        out.push_str(&format!(
            "{}. **{}** - {}\n",
            idx + 1,
            table_name(&sheet.name),
            narrative.purpose(&sheet.name)
        ));
    }
    out.push_str("\n### Key Foreign Key Relationships:\n");
    if keys.is_empty() {
        out.push_str("- None derived\n");
    }
    for key in keys {
        out.push_str(&format!(
            "- {}.{} → {}.{}\n",
            table_name(&key.child_sheet),
            column_name(&key.child_column),
            table_name(&key.parent_sheet),
            column_name(&key.parent_column)
        ));
    }
}

fn write_files(out: &mut String, analysis: &WorkbookAnalysis) {
    out.push_str("\n---\n\n## FILES GENERATED\n\n");
    out.push_str(&format!("1. **Workbook Analysis JSON**: `{ANALYSIS_FILE_NAME}`\n"));
    out.push_str(&format!(
        "2. **Individual CSV Files**: {} files for each sheet\n",
        analysis.sheet_names.len()
    ));
    for name in &analysis.sheet_names {
        out.push_str(&format!("   - `{}`\n", csv_file_name(name)));
    }
    out.push_str(&format!("3. **Complete SQL Script**: `{SQL_FILE_NAME}`\n"));
    out.push_str(&format!("4. **Analysis Report**: `{REPORT_FILE_NAME}`\n"));
}

const NEXT_STEPS: &str = "
---

## NEXT STEPS

1. **Database Implementation**: Use the generated SQL script to create the database
2. **Data Validation**: Verify all foreign key relationships after database creation
3. **Business Logic**: Implement application logic based on identified relationships
4. **Data Migration**: Use the CSV files for any ETL processes
5. **Reporting**: Leverage the sample queries provided in the SQL script

---

*Report generated by automated workbook analysis*
";

/// Builds the markdown report.
///
/// Profiles and relationships come from `analysis`; sample rows and key
/// insights are computed from `frames`, which must cover every sheet.
pub fn generate_report(
    analysis: &WorkbookAnalysis,
    frames: &[SheetFrame],
    narrative: &Narrative,
    generated_at: NaiveDateTime,
) -> Result<String> {
    let keys = derive_foreign_keys(analysis);
    let tables = table_order(analysis, &keys);
    debug!(sheets = analysis.sheets.len(), "generating report");

    let mut out = String::new();
    out.push_str(&format!("# {}\n", narrative.title));
    out.push_str(&format!(
        "## Generated on: {}\n",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    ));
    out.push_str(&format!("## Source File: {}\n", analysis.source_file.display()));
    out.push_str("\n---\n\n## EXECUTIVE SUMMARY\n\n");
    out.push_str(&format!(
        "This report provides a comprehensive analysis of the workbook containing **{} sheets** with detailed business data for {}.\n\n",
        analysis.total_sheets, narrative.system_description
    ));
    out.push_str("### Key Statistics:\n");
    out.push_str(&format!("- **Total Sheets**: {}\n", analysis.total_sheets));
    out.push_str(&format!("- **Total Records**: {}\n", analysis.total_rows()));
    out.push_str(&format!("- **Total Columns**: {}\n", analysis.total_columns()));
    out.push_str(&format!(
        "- **Identified Relationships**: {}\n",
        analysis.relationships.len()
    ));
    out.push_str("\n---\n\n## SHEET-BY-SHEET ANALYSIS\n");

    for profile in &analysis.sheets {
        let frame = find_frame(frames, &profile.name)?;
        write_sheet_section(&mut out, profile, frame, narrative);
    }

    write_relationships(&mut out, analysis, &keys);
    write_data_quality(&mut out, analysis);
    write_business_insights(&mut out, narrative);
    write_structure(&mut out, &tables, &keys, narrative);
    write_files(&mut out, analysis);
    out.push_str(NEXT_STEPS);

    Ok(out)
}
