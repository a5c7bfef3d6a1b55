//! Configuration loading from files and environment variables

use crate::error::{Error, Result};
use config::{Config as ConfigLib, ConfigBuilder as LibConfigBuilder, Environment, File};
use std::path::Path;

use super::defaults::*;
use super::{global_config_path, Config};

/// Helper to set a config default with consistent error mapping
fn set_config_default<T: Into<config::Value>>(
    builder: LibConfigBuilder<config::builder::DefaultState>,
    key: &str,
    value: T,
) -> Result<LibConfigBuilder<config::builder::DefaultState>> {
    builder
        .set_default(key, value)
        .map_err(|e| Error::config(format!("Failed to set {key} default: {e}")))
}

impl Config {
    /// Loads configuration from a TOML file with environment variable overrides
    ///
    /// Environment variables are prefixed with `IREVAL_` and use double underscores
    /// for nested values. For example:
    /// - `IREVAL_OUTPUT__PREFIX=run1`
    /// - `IREVAL_EVALUATION__MAX_RANK=20`
    pub fn from_file(path: &Path) -> Result<Self> {
        let builder = ConfigLib::builder();

        // config crate doesn't apply serde defaults for sections missing from every source
        let builder = set_config_default(builder, "input.format", DEFAULT_INPUT_FORMAT)?;
        let builder = set_config_default(builder, "output.prefix", default_output_prefix())?;
        let builder =
            set_config_default(builder, "output.directory", default_output_directory())?;
        let builder = set_config_default(builder, "output.format", DEFAULT_OUTPUT_FORMAT)?;
        let builder = set_config_default(builder, "evaluation.cleanup", default_cleanup())?;
        let builder = set_config_default(
            builder,
            "evaluation.f_measure_beta",
            default_f_measure_beta(),
        )?;
        let builder = set_config_default(
            builder,
            "evaluation.max_rank",
            default_max_rank() as i64,
        )?;
        let mut builder = set_config_default(builder, "report.verbose", default_verbose())?;

        // Add the config file if it exists
        if path.exists() {
            builder = builder.add_source(File::from(path));
        }

        // Add environment variables with IREVAL_ prefix
        builder = builder.add_source(
            Environment::with_prefix("IREVAL")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| Error::config(format!("Failed to deserialize config: {e}")))
    }

    /// Creates a config from a TOML string (useful for testing)
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(format!("Failed to parse TOML: {e}")))
    }

    /// Load configuration from a single file
    ///
    /// Precedence (lowest to highest):
    /// 1. Hardcoded defaults
    /// 2. Config file (~/.ireval/config.toml or custom --config path)
    /// 3. Environment variables (IREVAL_*)
    ///
    /// Command-line flags are applied on top by the binary.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let path = match config_path {
            Some(p) => p.to_path_buf(),
            None => global_config_path()?,
        };
        Self::from_file(&path)
    }
}
