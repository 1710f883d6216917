//! SQL identifier sanitization.

/// Table identifier for a sheet: spaces to `_`, parentheses dropped, lowercase.
///
/// ```
/// use wbs_report::sql::table_name;
///
/// assert_eq!(table_name("Contract Service (Project)"), "contract_service_project");
/// ```
pub fn table_name(sheet: &str) -> String {
    sheet
        .chars()
        .filter(|c| *c != '(' && *c != ')')
        .map(|c| if c == ' ' { '_' } else { c })
        .collect::<String>()
        .to_lowercase()
}

/// Column identifier: like [`table_name`], with `/` also mapped to `_`.
pub fn column_name(column: &str) -> String {
    table_name(&column.replace('/', "_"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_name() {
        assert_eq!(table_name("Client"), "client");
        assert_eq!(table_name("Installation Services (Sub Pro)"), "installation_services_sub_pro");
    }

    #[test]
    fn test_column_name() {
        assert_eq!(column_name("(1) Duration"), "1_duration");
        assert_eq!(column_name("Assigned Hours / Quantity"), "assigned_hours___quantity");
        assert_eq!(column_name("Company_Code"), "company_code");
    }
}
