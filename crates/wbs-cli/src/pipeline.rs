//! Workbook processing pipeline with explicit stages.
//!
//! 1. **Extract**: read the workbook, profile sheets, infer relationships,
//!    write one CSV per sheet and the JSON summary
//! 2. **SQL**: rebuild the schema script from the summary and the CSVs
//! 3. **Report**: render the markdown analysis from the summary and the CSVs
//!
//! Stages 2 and 3 only depend on files in the output directory, so they can
//! run on their own after a single extract.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use tracing::{debug, info, info_span, trace};

use wbs_core::{ANALYSIS_FILE_NAME, analyze_workbook, read_analysis_json, write_analysis_json};
use wbs_ingest::{SheetFrame, load_sheet_frames, read_workbook, write_sheet_csv};
use wbs_model::WorkbookAnalysis;
use wbs_report::{
    Narrative, REPORT_FILE_NAME, SQL_FILE_NAME, derive_foreign_keys, generate_report,
    generate_sql_script, write_output,
};

use crate::logging::redact_value;
use crate::types::{ExtractResult, ReportResult, SqlResult};

// ============================================================================
// Stage 1: Extract
// ============================================================================

/// Reads `workbook`, profiles it and writes CSVs plus the JSON summary to `output_dir`.
pub fn extract(workbook: &Path, output_dir: &Path) -> Result<ExtractResult> {
    let span = info_span!("extract", workbook = %workbook.display());
    let _guard = span.enter();
    let start = Instant::now();

    let frames = read_workbook(workbook)
        .with_context(|| format!("read workbook {}", workbook.display()))?;

    let mut csv_files = Vec::with_capacity(frames.len());
    for frame in &frames {
        let path = write_sheet_csv(frame, output_dir)
            .with_context(|| format!("export sheet {}", frame.name))?;
        debug!(sheet = %frame.name, path = %path.display(), "sheet exported");
        csv_files.push(path);
    }

    let analysis = analyze_workbook(workbook, &frames);
    log_samples(&analysis);
    let summary_file = output_dir.join(ANALYSIS_FILE_NAME);
    write_analysis_json(&analysis, &summary_file).context("write analysis summary")?;

    info!(
        sheets = analysis.total_sheets,
        records = analysis.total_rows(),
        relationships = analysis.relationships.len(),
        duration_ms = start.elapsed().as_millis(),
        "extract complete"
    );
    Ok(ExtractResult {
        analysis,
        output_dir: output_dir.to_path_buf(),
        csv_files,
        summary_file,
    })
}

fn log_samples(analysis: &WorkbookAnalysis) {
    for sheet in &analysis.sheets {
        for column in &sheet.columns {
            let samples = column
                .sample_values
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            trace!(
                sheet = %sheet.name,
                column = %column.name,
                samples = redact_value(&samples),
                "column samples"
            );
        }
    }
}

/// Loads the JSON summary and the exported sheets from `output_dir`.
pub fn load_extracted(output_dir: &Path) -> Result<(WorkbookAnalysis, Vec<SheetFrame>)> {
    let summary_file = output_dir.join(ANALYSIS_FILE_NAME);
    let analysis = read_analysis_json(&summary_file).context("load analysis summary")?;
    let frames = load_sheet_frames(output_dir, &analysis.sheet_names)
        .context("load exported sheet data")?;
    debug!(
        sheets = frames.len(),
        dir = %output_dir.display(),
        "loaded extract outputs"
    );
    Ok((analysis, frames))
}

// ============================================================================
// Stage 2: SQL
// ============================================================================

/// Writes `schema.sql` next to the extract outputs.
pub fn sql(output_dir: &Path, generated_at: NaiveDateTime) -> Result<SqlResult> {
    let span = info_span!("sql", dir = %output_dir.display());
    let _guard = span.enter();
    let start = Instant::now();

    let (analysis, frames) = load_extracted(output_dir)?;
    let script = generate_sql_script(&analysis, &frames, generated_at)
        .context("generate SQL script")?;
    let path = output_dir.join(SQL_FILE_NAME);
    write_output(&path, &script).context("write SQL script")?;

    let result = SqlResult {
        path,
        tables: analysis.sheets.iter().filter(|s| !s.columns.is_empty()).count(),
        foreign_keys: derive_foreign_keys(&analysis).len(),
        rows: frames.iter().map(SheetFrame::record_count).sum(),
    };
    info!(
        tables = result.tables,
        foreign_keys = result.foreign_keys,
        rows = result.rows,
        duration_ms = start.elapsed().as_millis(),
        "SQL script written"
    );
    Ok(result)
}

// ============================================================================
// Stage 3: Report
// ============================================================================

/// Writes `analysis_report.md` next to the extract outputs.
pub fn report(
    output_dir: &Path,
    narrative: &Narrative,
    generated_at: NaiveDateTime,
) -> Result<ReportResult> {
    let span = info_span!("report", dir = %output_dir.display());
    let _guard = span.enter();
    let start = Instant::now();

    let (analysis, frames) = load_extracted(output_dir)?;
    let markdown = generate_report(&analysis, &frames, narrative, generated_at)
        .context("generate report")?;
    let path = output_dir.join(REPORT_FILE_NAME);
    write_output(&path, &markdown).context("write report")?;

    info!(
        sheets = analysis.total_sheets,
        duration_ms = start.elapsed().as_millis(),
        "report written"
    );
    Ok(ReportResult {
        path,
        sheets: analysis.total_sheets,
        relationships: analysis.relationships.len(),
    })
}
