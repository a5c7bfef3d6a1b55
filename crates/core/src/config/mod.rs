//! Configuration module for the evaluation runner
//!
//! This module provides configuration structures and loading mechanisms for
//! evaluation runs. Configuration can be loaded from TOML files and/or environment
//! variables.

mod defaults;
mod loading;


use crate::error::{Error, Result};
use crate::query_result::FMeasureWeight;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use strum_macros::{Display, EnumString};

use defaults::*;

/// Returns the path to the global configuration file
///
/// The global config is stored at `~/.ireval/config.toml` and contains
/// user preferences that apply to every evaluation run.
pub fn global_config_path() -> Result<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| Error::config("Unable to determine home directory".to_string()))?;
    Ok(home_dir.join(".ireval").join("config.toml"))
}

/// Format of the gold-standard input file
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum InputFormat {
    /// Nested YAML: queries, documents, judgements
    #[default]
    Yaml,
    /// Tab-separated lines: query, document, relevant[, user]
    Plain,
}

/// Format of the written evaluation reports
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

impl OutputFormat {
    /// File extension used for reports in this format
    pub fn extension(self) -> &'static str {
        match self {
            Self::Yaml => "yml",
            Self::Json => "json",
        }
    }
}

/// Input file configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Gold standard format: "yaml" (default) or "plain"
    #[serde(default = "default_input_format")]
    pub format: InputFormat,

    /// Gold standard file
    #[serde(default)]
    pub gold_standard_file: Option<PathBuf>,

    /// Query result file (always YAML)
    #[serde(default)]
    pub query_result_file: Option<PathBuf>,
}

/// Report output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Prefix of every report file name
    #[serde(default = "default_output_prefix")]
    pub prefix: String,

    /// Directory the reports are written into
    #[serde(default = "default_output_directory")]
    pub directory: String,

    /// Report format: "yaml" (default) or "json"
    #[serde(default = "default_output_format")]
    pub format: OutputFormat,
}

/// Scoring configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Drop unjudged documents from every result before scoring
    #[serde(default = "default_cleanup")]
    pub cleanup: bool,

    /// F-measure beta, used unless `f_measure_alpha` is set
    #[serde(default = "default_f_measure_beta")]
    pub f_measure_beta: f64,

    /// F-measure alpha in (0, 1]
    #[serde(default)]
    pub f_measure_alpha: Option<f64>,

    /// Number of ranks reported per ranked result, 0 for all
    #[serde(default = "default_max_rank")]
    pub max_rank: usize,
}

impl EvaluationConfig {
    /// The configured F-measure weighting; alpha wins over beta
    pub fn f_measure_weight(&self) -> FMeasureWeight {
        match self.f_measure_alpha {
            Some(alpha) => FMeasureWeight::Alpha(alpha),
            None => FMeasureWeight::Beta(self.f_measure_beta),
        }
    }
}

/// Console report configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Print contingency, ranked and 11-point tables to stdout
    #[serde(default = "default_verbose")]
    pub verbose: bool,
}

/// Main configuration structure for evaluation runs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub input: InputConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub evaluation: EvaluationConfig,

    #[serde(default)]
    pub report: ReportConfig,
}

// Default implementations

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            format: default_input_format(),
            gold_standard_file: None,
            query_result_file: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            prefix: default_output_prefix(),
            directory: default_output_directory(),
            format: default_output_format(),
        }
    }
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            cleanup: default_cleanup(),
            f_measure_beta: default_f_measure_beta(),
            f_measure_alpha: None,
            max_rank: default_max_rank(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            verbose: default_verbose(),
        }
    }
}

impl Config {
    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.output.prefix.trim().is_empty() {
            return Err(Error::config(
                "output.prefix must not be empty".to_string(),
            ));
        }

        let beta = self.evaluation.f_measure_beta;
        if !beta.is_finite() || beta < 0.0 {
            return Err(Error::config(format!(
                "evaluation.f_measure_beta must be a finite, non-negative number (got {beta})"
            )));
        }

        if let Some(alpha) = self.evaluation.f_measure_alpha {
            if !(alpha > 0.0 && alpha <= 1.0) {
                return Err(Error::config(format!(
                    "evaluation.f_measure_alpha must be in (0, 1] (got {alpha})"
                )));
            }
        }

        Ok(())
    }

    /// Saves the configuration to a TOML file
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| Error::config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, toml_string)
            .map_err(|e| Error::config(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Path of a report file: `<directory>/<prefix>_<name>.<ext>`
    pub fn report_path(&self, name: &str) -> PathBuf {
        PathBuf::from(&self.output.directory).join(format!(
            "{}_{name}.{}",
            self.output.prefix,
            self.output.format.extension()
        ))
    }
}
