//! SQL script and report generation over a small two-level workbook.

use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};

use wbs_core::analyze_workbook;
use wbs_ingest::SheetFrame;
use wbs_model::WorkbookAnalysis;
use wbs_report::{Narrative, ReportError, generate_report, generate_sql_script, write_output};

fn timestamp() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 2)
        .unwrap()
        .and_hms_opt(3, 4, 5)
        .unwrap()
}

fn frame(name: &str, columns: Vec<Column>) -> SheetFrame {
    SheetFrame::new(name, DataFrame::new(columns).unwrap())
}

/// Visits come first in the workbook but reference Resources.
fn fixture() -> (WorkbookAnalysis, Vec<SheetFrame>) {
    let frames = vec![
        frame(
            "Visits",
            vec![
                Series::new("Visit_Code".into(), vec![10i64, 11, 12, 13]).into_column(),
                Series::new("Resource_Code".into(), vec![1i64, 2, 1, 2]).into_column(),
                Series::new("Visit Status".into(), vec![Some("Done"), Some("Planned"), None, Some("Done")])
                    .into_column(),
                Series::new("(1) Duration".into(), vec![2.0, 1.5, 2.0, 2.5]).into_column(),
            ],
        ),
        frame(
            "Resources",
            vec![
                Series::new("Resource_Code".into(), vec![1i64, 2, 3]).into_column(),
                Series::new("Resource Name".into(), vec!["Maria O'Brien", "Nikos", "Eleni"])
                    .into_column(),
            ],
        ),
    ];
    let analysis = analyze_workbook("data/Demo Book.xlsx".as_ref(), &frames);
    (analysis, frames)
}

#[test]
fn sql_script_sections_and_order() {
    let (analysis, frames) = fixture();
    let sql = generate_sql_script(&analysis, &frames, timestamp()).unwrap();

    assert!(sql.starts_with("-- =====================================================\n-- DEMO BOOK DATABASE - COMPREHENSIVE SQL SCRIPT\n"));
    assert!(sql.contains("-- Generated on: 2025-01-02 03:04:05\n-- Source: Demo Book.xlsx\n"));
    assert!(sql.contains("-- CREATE DATABASE demo_book;"));
    assert!(sql.contains("SET FOREIGN_KEY_CHECKS = 1;"));

    // Parent table is created before the child.
    let resources = sql.find("CREATE TABLE resources (").unwrap();
    let visits = sql.find("CREATE TABLE visits (").unwrap();
    assert!(resources < visits);

    assert!(sql.contains("    visit_code INT NOT NULL,\n"));
    assert!(sql.contains("    visit_status VARCHAR(27),\n"));
    assert!(sql.contains("    1_duration DECIMAL(10,2) NOT NULL,\n"));
    assert!(sql.contains("    PRIMARY KEY (visit_code, resource_code)\n);"));

    assert!(sql.contains("INSERT INTO resources (resource_code, resource_name) VALUES\n    (1, 'Maria O''Brien'),\n"));
    assert!(sql.contains("    (12, 1, NULL, 2),\n"));

    assert!(sql.contains(
        "ALTER TABLE visits\nADD CONSTRAINT fk_visits_resource_code\nFOREIGN KEY (resource_code) REFERENCES resources(resource_code);\n"
    ));
    assert!(sql.contains("JOIN resources p ON c.resource_code = p.resource_code;"));
    assert!(sql.contains("SELECT 'resources' AS table_name, COUNT(*) AS row_count FROM resources\nUNION ALL\nSELECT 'visits'"));

    let sections = [
        "-- TABLE CREATION STATEMENTS",
        "-- DATA INSERTION STATEMENTS",
        "-- FOREIGN KEY CONSTRAINTS",
        "-- SAMPLE QUERIES FOR TESTING",
    ];
    let positions: Vec<usize> = sections.iter().map(|s| sql.find(s).unwrap()).collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn report_sections() {
    let (analysis, frames) = fixture();
    let report = generate_report(&analysis, &frames, &Narrative::default(), timestamp()).unwrap();

    assert!(report.starts_with("# COMPREHENSIVE EXCEL DATA ANALYSIS REPORT\n## Generated on: 2025-01-02 03:04:05\n"));
    assert!(report.contains("- **Total Sheets**: 2\n- **Total Records**: 7\n- **Total Columns**: 6\n"));
    assert!(report.contains("### Visits\n**Dimensions**: 4 rows × 4 columns"));
    assert!(report.contains("**Purpose**: Individual service visits and appointments"));
    assert!(report.contains("- **Visit_Code** 🔑: integer (4 non-null, 4 unique)"));
    assert!(report.contains("- Average (1) Duration: 2.0\n"));
    assert!(report.contains("- Most frequent Visit Status: Done (2 rows)\n"));
    assert!(report.contains("- **Visits.Resource_Code** → **Resources.Resource_Code** (100.0% match)"));
    assert!(report.contains("Resources (1) ←→ (M) Visits\n"));
    assert!(report.contains("### Visits - Data Quality Issues:\n- **Visit Status**: 25% missing values\n"));
    assert!(report.contains("1. **resources** - Personnel and service providers"));
    assert!(report.contains("- visits.resource_code → resources.resource_code\n"));
    assert!(report.contains("   - `Visits_data.csv`\n"));
    assert!(report.contains("## NEXT STEPS"));
}

#[test]
fn custom_narrative_replaces_commentary() {
    let (analysis, frames) = fixture();
    let narrative = Narrative {
        title: "FIELD SERVICE REVIEW".to_string(),
        business_insights: Vec::new(),
        ..Narrative::default()
    };
    let report = generate_report(&analysis, &frames, &narrative, timestamp()).unwrap();
    assert!(report.starts_with("# FIELD SERVICE REVIEW\n"));
    assert!(!report.contains("### Client Management:"));
}

#[test]
fn missing_frame_is_an_error() {
    let (analysis, frames) = fixture();
    let err = generate_sql_script(&analysis, &frames[..1], timestamp()).unwrap_err();
    assert!(matches!(err, ReportError::MissingSheetData { ref sheet } if sheet == "Resources"));
}

#[test]
fn write_output_replaces_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("schema.sql");
    std::fs::write(&path, "stale").unwrap();

    write_output(&path, "fresh\n").unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "fresh\n");

    let missing_dir = dir.path().join("absent").join("schema.sql");
    let error = write_output(&missing_dir, "x").unwrap_err();
    assert!(matches!(error, ReportError::FileWrite { .. }));
}
