//! Sample queries over the generated schema.

use wbs_model::{SheetProfile, WorkbookAnalysis};

use super::constraints::ForeignKey;
use super::naming::{column_name, table_name};

const CHILD_SELECT_COLUMNS: usize = 4;
const PARENT_SELECT_COLUMNS: usize = 3;

/// A join query for one foreign key.
pub fn join_query(child: &SheetProfile, parent: &SheetProfile, key: &ForeignKey) -> String {
    let mut select: Vec<String> = child
        .columns
        .iter()
        .take(CHILD_SELECT_COLUMNS)
        .map(|column| format!("c.{}", column_name(&column.name)))
        .collect();
    select.extend(
        parent
            .columns
            .iter()
            .filter(|column| column.name != key.parent_column)
            .take(PARENT_SELECT_COLUMNS)
            .map(|column| format!("p.{}", column_name(&column.name))),
    );

    format!(
        "-- {child} rows with their {parent} ({child_column} -> {parent_column})\nSELECT\n    {select}\nFROM {child_table} c\nJOIN {parent_table} p ON c.{child_key} = p.{parent_key};\n\n",
        child = child.name,
        parent = parent.name,
        child_column = key.child_column,
        parent_column = key.parent_column,
        select = select.join(",\n    "),
        child_table = table_name(&child.name),
        parent_table = table_name(&parent.name),
        child_key = column_name(&key.child_column),
        parent_key = column_name(&key.parent_column),
    )
}

/// One `COUNT(*)` per table, combined with `UNION ALL`.
pub fn row_count_query(tables: &[&SheetProfile]) -> String {
    let selects: Vec<String> = tables
        .iter()
        .filter(|sheet| !sheet.columns.is_empty())
        .map(|sheet| {
            let table = table_name(&sheet.name);
            format!("SELECT '{table}' AS table_name, COUNT(*) AS row_count FROM {table}")
        })
        .collect();
    if selects.is_empty() {
        return String::new();
    }
    format!(
        "-- Row counts per table\n{};\n\n",
        selects.join("\nUNION ALL\n")
    )
}

/// All sample queries: joins in foreign-key order, then row counts.
pub fn sample_queries(analysis: &WorkbookAnalysis, keys: &[ForeignKey], tables: &[&SheetProfile]) -> String {
    let mut sql = String::new();
    for key in keys {
        if let (Some(child), Some(parent)) = (
            analysis.sheet(&key.child_sheet),
            analysis.sheet(&key.parent_sheet),
        ) {
            sql.push_str(&join_query(child, parent, key));
        }
    }
    sql.push_str(&row_count_query(tables));
    sql
}

#[cfg(test)]
mod tests {
    use wbs_model::{ColumnStats, StorageType};

    use super::*;

    fn sheet(name: &str, columns: &[&str]) -> SheetProfile {
        SheetProfile {
            name: name.to_string(),
            row_count: 1,
            column_count: columns.len(),
            columns: columns
                .iter()
                .map(|column| ColumnStats {
                    name: column.to_string(),
                    storage: StorageType::Text,
                    non_null_count: 1,
                    null_count: 0,
                    unique_count: 1,
                    sample_values: Vec::new(),
                    potential_primary_key: true,
                })
                .collect(),
        }
    }

    #[test]
    fn test_join_query() {
        let child = sheet("Visits", &["Visit Code", "Resource Code"]);
        let parent = sheet("Resources", &["Resource Code", "Resource Name", "City"]);
        let key = ForeignKey {
            child_sheet: "Visits".to_string(),
            child_column: "Resource Code".to_string(),
            parent_sheet: "Resources".to_string(),
            parent_column: "Resource Code".to_string(),
        };
        assert_eq!(
            join_query(&child, &parent, &key),
            "-- Visits rows with their Resources (Resource Code -> Resource Code)\n\
             SELECT\n    c.visit_code,\n    c.resource_code,\n    p.resource_name,\n    p.city\n\
             FROM visits c\n\
             JOIN resources p ON c.resource_code = p.resource_code;\n\n"
        );
    }

    #[test]
    fn test_row_count_query() {
        let a = sheet("Client", &["Code"]);
        let b = sheet("Contract", &["Code"]);
        let empty = sheet("Blank", &[]);
        assert_eq!(
            row_count_query(&[&a, &empty, &b]),
            "-- Row counts per table\n\
             SELECT 'client' AS table_name, COUNT(*) AS row_count FROM client\n\
             UNION ALL\n\
             SELECT 'contract' AS table_name, COUNT(*) AS row_count FROM contract;\n\n"
        );
        assert_eq!(row_count_query(&[&empty]), "");
    }
}
