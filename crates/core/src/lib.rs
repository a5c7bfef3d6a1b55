//! Core types for evaluating information retrieval results
//!
//! This crate scores retrieved documents against human relevance judgements:
//!
//! - **Gold standard**: documents, queries, annotators and their judgements,
//!   majority-vote relevance and inter-annotator agreement (Cohen's kappa)
//! - **Query results**: ranked and unranked retrieved documents with
//!   contingency statistics, precision, recall and F-measure; ranked results
//!   add per-rank statistics, average precision and 11-point interpolated precision
//! - **Result sets**: results over one gold standard and their mean average precision
//! - **Configuration**: evaluation run settings
//! - **Error handling**: Unified error types
//!

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod config;
pub mod error;
pub mod gold_standard;
pub mod identity;
pub mod judgement;
pub mod query_result;
pub mod result_set;

// Re-export main types for convenience
pub use config::{Config, EvaluationConfig, InputConfig, OutputConfig, ReportConfig};
pub use error::{Error, Result, ResultExt};
pub use gold_standard::GoldStandard;
pub use identity::{Document, Query, ResultDocument};
pub use judgement::{Judgement, JudgementKey, JudgementTriple, Relevance, User};
pub use query_result::{
    ElevenPointPrecision, FMeasureWeight, InterpolatedPoint, QueryResult, ResultDocumentRecord,
    ResultKind, Statistics,
};
pub use result_set::QueryResultSet;

/// Version of the core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{Result, ResultExt};
    pub use crate::gold_standard::GoldStandard;
    pub use crate::judgement::JudgementTriple;
    pub use crate::query_result::{FMeasureWeight, QueryResult};
    pub use crate::result_set::QueryResultSet;
}
