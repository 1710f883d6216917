//! INSERT statements and SQL literals.

use wbs_common::column_cells;
use wbs_ingest::SheetFrame;
use wbs_model::CellValue;

use super::naming::{column_name, table_name};

/// Renders a cell as a SQL literal.
///
/// ```
/// use wbs_model::CellValue;
/// use wbs_report::sql::sql_literal;
///
/// assert_eq!(sql_literal(&CellValue::Text("O'Neil".into())), "'O''Neil'");
/// assert_eq!(sql_literal(&CellValue::Missing), "NULL");
/// ```
pub fn sql_literal(cell: &CellValue) -> String {
    match cell {
        CellValue::Missing => "NULL".to_string(),
        CellValue::Bool(true) => "1".to_string(),
        CellValue::Bool(false) => "0".to_string(),
        CellValue::Int(_) | CellValue::Float(_) => cell.to_string(),
        CellValue::Text(s) => format!("'{}'", s.replace('\'', "''")),
        CellValue::Date(_) | CellValue::DateTime(_) => format!("'{cell}'"),
    }
}

/// One multi-row INSERT for the sheet, or `None` when it has no rows.
pub fn insert_sql(frame: &SheetFrame) -> Option<String> {
    if frame.record_count() == 0 || frame.data.width() == 0 {
        return None;
    }

    let columns: Vec<Vec<CellValue>> = frame.data.get_columns().iter().map(column_cells).collect();
    let names: Vec<String> = frame
        .column_names()
        .iter()
        .map(|name| column_name(name))
        .collect();

    let rows: Vec<String> = (0..frame.record_count())
        .map(|row| {
            let values: Vec<String> = columns
                .iter()
                .map(|cells| cells.get(row).map_or_else(|| "NULL".to_string(), sql_literal))
                .collect();
            format!("    ({})", values.join(", "))
        })
        .collect();

    Some(format!(
        "-- Insert data into {}\nINSERT INTO {} ({}) VALUES\n{};\n\n",
        frame.name,
        table_name(&frame.name),
        names.join(", "),
        rows.join(",\n")
    ))
}
