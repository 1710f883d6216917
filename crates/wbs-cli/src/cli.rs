//! CLI argument definitions for `wbs`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "wbs",
    version,
    about = "Workbook schema inference - profile a spreadsheet and derive a relational schema",
    long_about = "Profile every sheet of a spreadsheet workbook, guess foreign keys from\n\
                  value overlap between columns, and generate a SQL script and a\n\
                  markdown analysis report.\n\n\
                  Stages share state only through files in the output directory:\n\
                  `extract` writes per-sheet CSVs and workbook_analysis.json, which\n\
                  `sql` and `report` read back."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -vvv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow cell values in trace logs (redacted by default).
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Configuration file (default: ./wbs.toml when present).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Read the workbook, profile sheets, infer relationships, export CSVs and the JSON summary.
    Extract(WorkbookArgs),

    /// Generate the SQL script from the JSON summary and exported CSVs.
    Sql(OutputArgs),

    /// Generate the markdown report from the JSON summary and exported CSVs.
    Report(OutputArgs),

    /// Run extract, sql and report in sequence.
    Run(WorkbookArgs),
}

#[derive(Parser)]
pub struct WorkbookArgs {
    /// Workbook to analyze (.xlsx, .xlsm, .xls, .ods).
    #[arg(long = "workbook", value_name = "PATH")]
    pub workbook: Option<PathBuf>,

    /// Directory for generated files.
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

#[derive(Parser)]
pub struct OutputArgs {
    /// Directory holding the extract outputs; generated files are written here too.
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let cli = Cli::try_parse_from([
            "wbs",
            "run",
            "--workbook",
            "book.xlsx",
            "--log-format",
            "json",
            "--log-data",
        ])
        .unwrap();
        assert!(cli.log_data);
        assert!(matches!(cli.log_format, LogFormatArg::Json));
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.workbook, Some(PathBuf::from("book.xlsx")));
        assert_eq!(args.output_dir, None);
    }

    #[test]
    fn sql_has_no_workbook_flag() {
        assert!(Cli::try_parse_from(["wbs", "sql", "--workbook", "x.xlsx"]).is_err());
    }
}
