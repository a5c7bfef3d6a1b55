//! Report records and their serialization to YAML or JSON files

use anyhow::{Context, Result};
use ireval_core::config::OutputFormat;
use ireval_core::{ElevenPointPrecision, Statistics};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Statistics reported for one query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatisticsReport {
    /// Unranked results: one record over every retrieved document
    Overall(Statistics),
    /// Ranked results: one record per rank
    PerRank(Vec<Statistics>),
}

/// Run-level figures
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub results: usize,
    pub ranked_results: usize,
    /// Results whose metrics could not be computed
    pub failed_results: usize,
    pub documents_removed: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean_average_precision: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kappa: Option<f64>,
    /// F-measure per query, for queries where it is defined
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub f_measure: BTreeMap<String, f64>,
}

/// Every report of one evaluation run, keyed by query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Evaluation {
    pub statistics: BTreeMap<String, StatisticsReport>,
    pub average_precision: BTreeMap<String, f64>,
    pub eleven_point: BTreeMap<String, ElevenPointPrecision>,
    pub summary: Summary,
}

/// Serializes `data` in the given format
pub fn render<T: Serialize>(data: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => serde_yaml::to_string(data).context("Failed to serialize YAML report"),
        OutputFormat::Json => {
            serde_json::to_string_pretty(data).context("Failed to serialize JSON report")
        }
    }
}

/// Writes `data` to `path`, creating the parent directory when needed
pub fn write_report<T: Serialize>(path: &Path, data: &T, format: OutputFormat) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory {}", parent.display()))?;
    }
    let content = render(data, format)?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write report {}", path.display()))?;
    debug!(path = %path.display(), "Wrote report");
    Ok(())
}
