use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use wbs_cli::types::{ExtractResult, ReportResult, RunResult, SqlResult};
use wbs_model::WorkbookAnalysis;

pub fn print_extract_summary(result: &ExtractResult) {
    let analysis = &result.analysis;
    println!("Workbook: {}", analysis.source_file.display());
    println!("Output: {}", result.output_dir.display());
    print_sheet_table(analysis);
    print_relationship_table(analysis);
    println!("Summary: {}", result.summary_file.display());
}

pub fn print_sql_summary(result: &SqlResult) {
    println!(
        "SQL script: {} ({} tables, {} rows, {} foreign keys)",
        result.path.display(),
        result.tables,
        result.rows,
        result.foreign_keys
    );
}

pub fn print_report_summary(result: &ReportResult) {
    println!(
        "Report: {} ({} sheets, {} relationships)",
        result.path.display(),
        result.sheets,
        result.relationships
    );
}

pub fn print_run_summary(result: &RunResult) {
    print_extract_summary(&result.extract);
    print_sql_summary(&result.sql);
    print_report_summary(&result.report);
}

fn print_sheet_table(analysis: &WorkbookAnalysis) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Sheet"),
        header_cell("Rows"),
        header_cell("Columns"),
        header_cell("Key candidates"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for sheet in &analysis.sheets {
        let keys: Vec<&str> = sheet
            .key_candidates()
            .map(|column| column.name.as_str())
            .collect();
        table.add_row(vec![
            Cell::new(&sheet.name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(sheet.row_count),
            Cell::new(sheet.column_count),
            if keys.is_empty() {
                dim_cell("-")
            } else {
                Cell::new(keys.join(", "))
            },
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(analysis.total_rows()).add_attribute(Attribute::Bold),
        Cell::new(analysis.total_columns()).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    println!("{table}");
}

fn print_relationship_table(analysis: &WorkbookAnalysis) {
    if analysis.relationships.is_empty() {
        println!("No relationships found.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("From"),
        header_cell("To"),
        header_cell("Match"),
        header_cell("Common values"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for candidate in &analysis.relationships {
        let percentage = format!("{:.1}%", candidate.match_percentage);
        let match_cell = if candidate.is_full_match() {
            Cell::new(percentage).fg(Color::Green)
        } else {
            Cell::new(percentage).fg(Color::Yellow)
        };
        table.add_row(vec![
            Cell::new(format!("{}.{}", candidate.from_sheet, candidate.from_column)),
            Cell::new(format!("{}.{}", candidate.to_sheet, candidate.to_column)),
            match_cell,
            if candidate.common_values.is_empty() {
                dim_cell("-")
            } else {
                Cell::new(candidate.common_values.join(", "))
            },
        ]);
    }
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
