//! Configuration file handling

use miette::{IntoDiagnostic, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::args::OutputFormat;

pub const CONFIG_FILE_NAME: &str = "sqlprobe.toml";

/// Configuration for sqlprobe
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Assignment schema file (JSON)
    #[serde(default)]
    pub schema: Option<String>,

    /// Query file patterns to check
    #[serde(default)]
    pub files: Vec<String>,

    /// Output format (human, json, sarif)
    #[serde(default)]
    pub format: Option<String>,

    /// Rules to disable (e.g., ["S0001", "missing-table-name"])
    #[serde(default)]
    pub disable: Vec<String>,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).into_diagnostic()?;
        let config: Config = toml::from_str(&contents).into_diagnostic()?;
        Ok(config)
    }

    /// Load from `path` if given, otherwise from the nearest sqlprobe.toml
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let current_dir = std::env::current_dir().into_diagnostic()?;
                Ok(Self::find_from(&current_dir)?.unwrap_or_default())
            }
        }
    }

    /// Try to find and load sqlprobe.toml in `start` or its parent directories
    pub fn find_from(start: &Path) -> Result<Option<Self>> {
        let mut current_dir = start.to_path_buf();

        loop {
            let config_path = current_dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                tracing::debug!(path = %config_path.display(), "using configuration file");
                return Ok(Some(Self::from_file(&config_path)?));
            }

            // Try parent directory
            if !current_dir.pop() {
                break;
            }
        }

        Ok(None)
    }

    /// Merge CLI arguments into configuration
    /// CLI arguments take precedence over config file values
    pub fn merge_with_args(
        mut self,
        schema: Option<&PathBuf>,
        files: &[PathBuf],
        format: Option<OutputFormat>,
        disable: &[String],
    ) -> Self {
        if let Some(schema) = schema {
            self.schema = Some(schema.display().to_string());
        }

        if !files.is_empty() {
            self.files = files.iter().map(|p| p.display().to_string()).collect();
        }

        if let Some(fmt) = format {
            self.format = Some(format!("{:?}", fmt).to_lowercase());
        }

        if !disable.is_empty() {
            self.disable = disable.to_vec();
        }

        self
    }

    /// Configured output format, falling back to human output
    pub fn output_format(&self) -> Result<OutputFormat> {
        match &self.format {
            Some(fmt) => fmt.parse().map_err(|e: String| miette::miette!(e)),
            None => Ok(OutputFormat::Human),
        }
    }
}
