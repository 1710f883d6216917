//! Optional TOML configuration (`wbs.toml`).
//!
//! ```toml
//! [paths]
//! workbook = "data/workbook.xlsx"
//! output_dir = "output"
//!
//! [narrative]
//! title = "ACME WORKBOOK ANALYSIS"
//! currency_symbol = "€"
//!
//! [narrative.sheet_purposes]
//! Customers = "Customer master data"
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;
use wbs_report::Narrative;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "wbs.toml";
pub const DEFAULT_WORKBOOK: &str = "data/workbook.xlsx";
pub const DEFAULT_OUTPUT_DIR: &str = "output";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub paths: PathsConfig,
    pub narrative: Narrative,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    pub workbook: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Loads configuration.
    ///
    /// An explicit path must exist. Without one, `wbs.toml` in the working
    /// directory is used when present and built-in defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                match fs::read_to_string(path) {
                    Ok(text) => Self::parse(&text, path),
                    Err(error) if error.kind() == ErrorKind::NotFound => {
                        debug!("no configuration file, using defaults");
                        Ok(Self::default())
                    }
                    Err(error) => Err(error)
                        .with_context(|| format!("read config {}", path.display())),
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text =
            fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
        Self::parse(&text, path)
    }

    fn parse(text: &str, path: &Path) -> Result<Self> {
        let config: Self =
            toml::from_str(text).with_context(|| format!("parse config {}", path.display()))?;
        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Workbook path: CLI flag, then config file, then the built-in default.
    pub fn workbook(&self, cli: Option<&Path>) -> PathBuf {
        cli.map(Path::to_path_buf)
            .or_else(|| self.paths.workbook.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_WORKBOOK))
    }

    /// Output directory: CLI flag, then config file, then the built-in default.
    pub fn output_dir(&self, cli: Option<&Path>) -> PathBuf {
        cli.map(Path::to_path_buf)
            .or_else(|| self.paths.output_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = AppConfig::parse("", Path::new("wbs.toml")).unwrap();
        assert_eq!(config.workbook(None), PathBuf::from(DEFAULT_WORKBOOK));
        assert_eq!(config.output_dir(None), PathBuf::from(DEFAULT_OUTPUT_DIR));
        assert_eq!(config.narrative, Narrative::default());
    }

    #[test]
    fn cli_overrides_file_overrides_default() {
        let config = AppConfig::parse(
            "[paths]\nworkbook = \"in/book.xlsx\"\noutput_dir = \"out\"\n",
            Path::new("wbs.toml"),
        )
        .unwrap();
        assert_eq!(config.workbook(None), PathBuf::from("in/book.xlsx"));
        assert_eq!(
            config.workbook(Some(Path::new("cli.xlsx"))),
            PathBuf::from("cli.xlsx")
        );
        assert_eq!(config.output_dir(None), PathBuf::from("out"));
    }

    #[test]
    fn narrative_overrides_keep_other_defaults() {
        let config = AppConfig::parse(
            "[narrative]\ntitle = \"ACME\"\n\n[narrative.sheet_purposes]\nCustomers = \"Who buys\"\n",
            Path::new("wbs.toml"),
        )
        .unwrap();
        assert_eq!(config.narrative.title, "ACME");
        assert_eq!(config.narrative.purpose("Customers"), "Who buys");
        assert_eq!(
            config.narrative.currency_symbol,
            Narrative::default().currency_symbol
        );
    }

    #[test]
    fn invalid_file_is_an_error() {
        let error = AppConfig::parse("[paths]\nworkbook = 3\n", Path::new("bad.toml")).unwrap_err();
        assert!(format!("{error:#}").contains("bad.toml"));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(AppConfig::load(Some(&missing)).is_err());
    }
}
