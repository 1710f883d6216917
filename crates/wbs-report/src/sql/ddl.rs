//! CREATE TABLE statements.

use wbs_model::SheetProfile;

use super::naming::{column_name, table_name};
use super::types::column_sql_type;

/// `DROP TABLE` + `CREATE TABLE` for one profiled sheet.
///
/// Columns without missing values are `NOT NULL`; key-typed columns form the
/// primary key. Sheets without columns produce only a comment.
pub fn create_table_sql(sheet: &SheetProfile) -> String {
    let table = table_name(&sheet.name);
    let mut sql = format!("-- Create {} table\n", sheet.name);

    if sheet.columns.is_empty() {
        sql.push_str("-- Sheet has no columns; no table created\n\n");
        return sql;
    }

    let mut lines = Vec::with_capacity(sheet.columns.len() + 1);
    let mut primary_keys = Vec::new();
    for stats in &sheet.columns {
        let name = column_name(&stats.name);
        let column_type = column_sql_type(stats);
        if column_type.primary_key {
            primary_keys.push(name.clone());
        }
        let not_null = if stats.null_count == 0 { " NOT NULL" } else { "" };
        lines.push(format!("    {name} {}{not_null}", column_type.sql_type));
    }
    if !primary_keys.is_empty() {
        lines.push(format!("    PRIMARY KEY ({})", primary_keys.join(", ")));
    }

    sql.push_str(&format!("DROP TABLE IF EXISTS {table};\n"));
    sql.push_str(&format!("CREATE TABLE {table} (\n"));
    sql.push_str(&lines.join(",\n"));
    sql.push_str("\n);\n\n");
    sql
}

#[cfg(test)]
mod tests {
    use wbs_model::{CellValue, ColumnStats, StorageType};

    use super::*;

    #[test]
    fn test_create_table() {
        let sheet = SheetProfile {
            name: "Contract Service (Project)".to_string(),
            row_count: 2,
            column_count: 3,
            columns: vec![
                ColumnStats {
                    name: "Service_Code".to_string(),
                    storage: StorageType::Integer,
                    non_null_count: 2,
                    null_count: 0,
                    unique_count: 2,
                    sample_values: vec![CellValue::Int(1), CellValue::Int(2)],
                    potential_primary_key: true,
                },
                ColumnStats {
                    name: "Service Name".to_string(),
                    storage: StorageType::Text,
                    non_null_count: 1,
                    null_count: 1,
                    unique_count: 1,
                    sample_values: vec![CellValue::Text("Audit".to_string())],
                    potential_primary_key: false,
                },
                ColumnStats {
                    name: "Contract Service Revenue".to_string(),
                    storage: StorageType::Float,
                    non_null_count: 2,
                    null_count: 0,
                    unique_count: 2,
                    sample_values: vec![CellValue::Float(670.0), CellValue::Float(2589.4)],
                    potential_primary_key: false,
                },
            ],
        };

        insta::assert_snapshot!(create_table_sql(&sheet), @r"
        -- Create Contract Service (Project) table
        DROP TABLE IF EXISTS contract_service_project;
        CREATE TABLE contract_service_project (
            service_code INT NOT NULL,
            service_name VARCHAR(25),
            contract_service_revenue DECIMAL(10,2) NOT NULL,
            PRIMARY KEY (service_code)
        );
        ");
    }
}
