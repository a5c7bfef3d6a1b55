//! Library interface for the ireval CLI
//!
//! This module exposes the evaluation workflow for integration testing while
//! keeping argument parsing in main.rs.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod output;
pub mod report;
pub mod runner;

// Re-export commonly needed types for tests
pub use anyhow::Result;
pub use ireval_core::config::Config;
pub use output::{Evaluation, StatisticsReport, Summary};
pub use runner::{evaluate, run_evaluation, run_kappa};
