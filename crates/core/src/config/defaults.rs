//! Default values and functions for configuration

use super::{InputFormat, OutputFormat};

// Default constants
pub(crate) const DEFAULT_OUTPUT_PREFIX: &str = "output";
pub(crate) const DEFAULT_OUTPUT_DIRECTORY: &str = ".";
pub(crate) const DEFAULT_INPUT_FORMAT: &str = "yaml";
pub(crate) const DEFAULT_OUTPUT_FORMAT: &str = "yaml";

pub(crate) fn default_input_format() -> InputFormat {
    InputFormat::Yaml
}

pub(crate) fn default_output_format() -> OutputFormat {
    OutputFormat::Yaml
}

pub(crate) fn default_output_prefix() -> String {
    DEFAULT_OUTPUT_PREFIX.to_string()
}

pub(crate) fn default_output_directory() -> String {
    DEFAULT_OUTPUT_DIRECTORY.to_string()
}

pub(crate) fn default_cleanup() -> bool {
    true
}

pub(crate) fn default_f_measure_beta() -> f64 {
    1.0
}

/// 0 reports every rank
pub(crate) fn default_max_rank() -> usize {
    0
}

pub(crate) fn default_verbose() -> bool {
    false
}
