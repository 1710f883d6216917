//! Header row normalization.

use std::collections::HashSet;

use wbs_model::CellValue;

/// Turns a raw header row into unique, non-empty column names.
///
/// Blank headers become `Unnamed: <index>`; repeated names get a `.1`, `.2`,
/// ... suffix in order of appearance. Numeric headers use their canonical
/// string form.
pub fn normalize_headers(row: &[CellValue]) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut names = Vec::with_capacity(row.len());

    for (idx, cell) in row.iter().enumerate() {
        let raw = cell.to_string();
        let base = match raw.trim() {
            "" => format!("Unnamed: {idx}"),
            trimmed => trimmed.to_string(),
        };

        let mut name = base.clone();
        let mut suffix = 1;
        while seen.contains(&name) {
            name = format!("{base}.{suffix}");
            suffix += 1;
        }
        seen.insert(name.clone());
        names.push(name);
    }

    names
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn test_plain_headers_are_trimmed() {
        let names = normalize_headers(&[text(" Project Code "), text("Name")]);
        assert_eq!(names, vec!["Project Code", "Name"]);
    }

    #[test]
    fn test_blank_headers_are_named_by_position() {
        let names = normalize_headers(&[text("A"), CellValue::Missing, text("  ")]);
        assert_eq!(names, vec!["A", "Unnamed: 1", "Unnamed: 2"]);
    }

    #[test]
    fn test_duplicates_get_suffix() {
        let names = normalize_headers(&[text("Code"), text("Code"), text("Code.1"), text("Code")]);
        assert_eq!(names, vec!["Code", "Code.1", "Code.1.1", "Code.2"]);
    }

    #[test]
    fn test_numeric_headers() {
        let names = normalize_headers(&[CellValue::Float(2023.0), CellValue::Int(7)]);
        assert_eq!(names, vec!["2023", "7"]);
    }
}
