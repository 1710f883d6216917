//! Foreign keys derived from relationship candidates, and table ordering.

use std::collections::HashSet;

use wbs_model::{RelationshipCandidate, SheetProfile, WorkbookAnalysis};

use super::naming::{column_name, table_name};

/// A child column referencing a key column of a parent sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    pub child_sheet: String,
    pub child_column: String,
    pub parent_sheet: String,
    pub parent_column: String,
}

impl ForeignKey {
    pub fn constraint_name(&self) -> String {
        format!(
            "fk_{}_{}",
            table_name(&self.child_sheet),
            column_name(&self.child_column)
        )
    }

    /// `ALTER TABLE ... ADD CONSTRAINT ... FOREIGN KEY ... REFERENCES ...;`
    pub fn to_sql(&self) -> String {
        format!(
            "ALTER TABLE {child}\nADD CONSTRAINT {name}\nFOREIGN KEY ({column}) REFERENCES {parent}({parent_column});\n",
            child = table_name(&self.child_sheet),
            name = self.constraint_name(),
            column = column_name(&self.child_column),
            parent = table_name(&self.parent_sheet),
            parent_column = column_name(&self.parent_column),
        )
    }
}

/// Derives foreign keys from the relationship candidates.
///
/// A candidate qualifies when every source value occurs in the target and the
/// target column is a key candidate of its sheet. Each child column gets at
/// most one parent, the first qualifying candidate in candidate order. When
/// the source column is itself a key candidate the match only describes a
/// one-to-one pairing: it is kept when the reverse candidate also qualifies
/// and the parent comes first in the workbook, and dropped otherwise.
pub fn derive_foreign_keys(analysis: &WorkbookAnalysis) -> Vec<ForeignKey> {
    let mut linked: HashSet<(&str, &str)> = HashSet::new();
    let mut keys = Vec::new();

    for candidate in &analysis.relationships {
        if !qualifies(analysis, candidate) {
            continue;
        }
        if is_source_key(analysis, candidate) {
            let mutual = analysis.relationships.iter().any(|other| {
                other.from_sheet == candidate.to_sheet
                    && other.from_column == candidate.to_column
                    && other.to_sheet == candidate.from_sheet
                    && other.to_column == candidate.from_column
                    && qualifies(analysis, other)
            });
            let parent_first = analysis.sheet_index(&candidate.to_sheet)
                < analysis.sheet_index(&candidate.from_sheet);
            if !(mutual && parent_first) {
                continue;
            }
        }
        if !linked.insert((candidate.from_sheet.as_str(), candidate.from_column.as_str())) {
            continue;
        }
        keys.push(ForeignKey {
            child_sheet: candidate.from_sheet.clone(),
            child_column: candidate.from_column.clone(),
            parent_sheet: candidate.to_sheet.clone(),
            parent_column: candidate.to_column.clone(),
        });
    }

    keys
}

fn qualifies(analysis: &WorkbookAnalysis, candidate: &RelationshipCandidate) -> bool {
    candidate.is_full_match()
        && analysis
            .sheet(&candidate.to_sheet)
            .is_some_and(|sheet| sheet.is_key_candidate(&candidate.to_column))
}

fn is_source_key(analysis: &WorkbookAnalysis, candidate: &RelationshipCandidate) -> bool {
    analysis
        .sheet(&candidate.from_sheet)
        .is_some_and(|sheet| sheet.is_key_candidate(&candidate.from_column))
}

/// Orders sheets so parents precede their children.
///
/// Among sheets that are ready at the same time, workbook order wins. Sheets
/// caught in a reference cycle are appended in workbook order.
pub fn table_order<'a>(analysis: &'a WorkbookAnalysis, keys: &[ForeignKey]) -> Vec<&'a SheetProfile> {
    let mut placed: Vec<bool> = vec![false; analysis.sheets.len()];
    let mut ordered = Vec::with_capacity(analysis.sheets.len());

    loop {
        let ready = analysis.sheets.iter().enumerate().position(|(idx, sheet)| {
            !placed[idx]
                && keys
                    .iter()
                    .filter(|key| key.child_sheet == sheet.name && key.parent_sheet != sheet.name)
                    .all(|key| {
                        analysis
                            .sheet_index(&key.parent_sheet)
                            .is_none_or(|parent| placed[parent])
                    })
        });
        match ready {
            Some(idx) => {
                placed[idx] = true;
                ordered.push(&analysis.sheets[idx]);
            }
            None => break,
        }
    }

    for (idx, sheet) in analysis.sheets.iter().enumerate() {
        if !placed[idx] {
            ordered.push(sheet);
        }
    }
    ordered
}

#[cfg(test)]
mod tests {
    use wbs_model::{ColumnStats, StorageType};

    use super::*;

    fn column(name: &str, key: bool) -> ColumnStats {
        ColumnStats {
            name: name.to_string(),
            storage: StorageType::Integer,
            non_null_count: 3,
            null_count: 0,
            unique_count: if key { 3 } else { 2 },
            sample_values: Vec::new(),
            potential_primary_key: key,
        }
    }

    fn sheet(name: &str, columns: Vec<ColumnStats>) -> SheetProfile {
        SheetProfile {
            name: name.to_string(),
            row_count: 3,
            column_count: columns.len(),
            columns,
        }
    }

    fn rel(from: (&str, &str), to: (&str, &str), pct: f64) -> RelationshipCandidate {
        RelationshipCandidate {
            from_sheet: from.0.to_string(),
            from_column: from.1.to_string(),
            to_sheet: to.0.to_string(),
            to_column: to.1.to_string(),
            match_percentage: pct,
            common_values: Vec::new(),
        }
    }

    fn analysis(relationships: Vec<RelationshipCandidate>) -> WorkbookAnalysis {
        WorkbookAnalysis::new(
            "book.xlsx",
            vec![
                sheet("Visits", vec![column("Visit_Code", true), column("Resource_Code", false)]),
                sheet("Resources", vec![column("Resource_Code", true)]),
                sheet("Mirror", vec![column("Resource_Code", true)]),
            ],
            relationships,
        )
    }

    #[test]
    fn test_full_match_to_key_becomes_foreign_key() {
        let analysis = analysis(vec![
            rel(("Visits", "Resource_Code"), ("Resources", "Resource_Code"), 100.0),
            rel(("Resources", "Resource_Code"), ("Visits", "Resource_Code"), 100.0),
            rel(("Visits", "Resource_Code"), ("Mirror", "Resource_Code"), 100.0),
        ]);
        let keys = derive_foreign_keys(&analysis);
        // Target not a key for the second; child already linked for the third.
        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].parent_sheet, "Resources");
        assert_eq!(keys[0].constraint_name(), "fk_visits_resource_code");
        assert_eq!(
            keys[0].to_sql(),
            "ALTER TABLE visits\nADD CONSTRAINT fk_visits_resource_code\nFOREIGN KEY (resource_code) REFERENCES resources(resource_code);\n"
        );
    }

    #[test]
    fn test_partial_match_is_ignored() {
        let analysis = analysis(vec![rel(
            ("Visits", "Resource_Code"),
            ("Resources", "Resource_Code"),
            80.0,
        )]);
        assert!(derive_foreign_keys(&analysis).is_empty());
    }

    #[test]
    fn test_mutual_keys_keep_earlier_parent() {
        let analysis = analysis(vec![
            rel(("Resources", "Resource_Code"), ("Mirror", "Resource_Code"), 100.0),
            rel(("Mirror", "Resource_Code"), ("Resources", "Resource_Code"), 100.0),
        ]);
        let keys = derive_foreign_keys(&analysis);
        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].child_sheet, "Mirror");
        assert_eq!(keys[0].parent_sheet, "Resources");
    }

    #[test]
    fn test_one_way_key_to_key_is_dropped() {
        let analysis = analysis(vec![rel(
            ("Resources", "Resource_Code"),
            ("Visits", "Visit_Code"),
            100.0,
        )]);
        assert!(derive_foreign_keys(&analysis).is_empty());
    }

    #[test]
    fn test_parents_come_first() {
        let analysis = analysis(Vec::new());
        let keys = vec![ForeignKey {
            child_sheet: "Visits".to_string(),
            child_column: "Resource_Code".to_string(),
            parent_sheet: "Resources".to_string(),
            parent_column: "Resource_Code".to_string(),
        }];
        let names: Vec<&str> = table_order(&analysis, &keys)
            .iter()
            .map(|sheet| sheet.name.as_str())
            .collect();
        assert_eq!(names, vec!["Resources", "Visits", "Mirror"]);
    }

    #[test]
    fn test_cycles_are_appended() {
        let analysis = analysis(Vec::new());
        let key = |child: &str, parent: &str| ForeignKey {
            child_sheet: child.to_string(),
            child_column: "Resource_Code".to_string(),
            parent_sheet: parent.to_string(),
            parent_column: "Resource_Code".to_string(),
        };
        let keys = vec![key("Visits", "Mirror"), key("Mirror", "Visits")];
        let names: Vec<&str> = table_order(&analysis, &keys)
            .iter()
            .map(|sheet| sheet.name.as_str())
            .collect();
        assert_eq!(names, vec!["Resources", "Visits", "Mirror"]);
    }
}
