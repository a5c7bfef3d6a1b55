//! File loaders for gold standards and query results
//!
//! Gold standards are read from nested YAML or tab-separated plain text.
//! Query results are always YAML. Every loader has a pure `*_str` form that
//! takes a source label for error messages, and a file form that reads the
//! file first.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod gold_standard;
pub mod result_set;

mod scalar;

use ireval_core::config::InputFormat;
use ireval_core::{GoldStandard, Result};
use std::path::Path;

/// Loads a gold standard file in the given format
pub fn load_gold_standard(path: &Path, format: InputFormat) -> Result<GoldStandard> {
    match format {
        InputFormat::Yaml => gold_standard::load_yaml_file(path),
        InputFormat::Plain => gold_standard::load_plaintext_file(path),
    }
}
