use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use tracing::info_span;

use wbs_cli::config::AppConfig;
use wbs_cli::pipeline;
use wbs_cli::types::{ExtractResult, ReportResult, RunResult, SqlResult};

use crate::cli::{OutputArgs, WorkbookArgs};

pub fn run_extract(args: &WorkbookArgs, config: &AppConfig) -> Result<ExtractResult> {
    let workbook = config.workbook(args.workbook.as_deref());
    let output_dir = config.output_dir(args.output_dir.as_deref());
    pipeline::extract(&workbook, &output_dir)
}

pub fn run_sql(args: &OutputArgs, config: &AppConfig) -> Result<SqlResult> {
    let output_dir = config.output_dir(args.output_dir.as_deref());
    pipeline::sql(&output_dir, now())
}

pub fn run_report(args: &OutputArgs, config: &AppConfig) -> Result<ReportResult> {
    let output_dir = config.output_dir(args.output_dir.as_deref());
    pipeline::report(&output_dir, &config.narrative, now())
}

pub fn run_all(args: &WorkbookArgs, config: &AppConfig) -> Result<RunResult> {
    let span = info_span!("run");
    let _guard = span.enter();
    let extract = run_extract(args, config)?;
    let generated_at = now();
    let sql = pipeline::sql(&extract.output_dir, generated_at)?;
    let report = pipeline::report(&extract.output_dir, &config.narrative, generated_at)?;
    Ok(RunResult {
        extract,
        sql,
        report,
    })
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}
