//! Retrieved documents for one query, scored against a gold standard
//!
//! A [`QueryResult`] is either ranked or unranked. Both share the contingency
//! statistics, precision/recall and F-measure. Ranked results additionally
//! offer per-rank statistics, average precision and 11-point interpolated
//! precision; calling those on an unranked result fails with
//! `UnsupportedOperation`.

mod ranked;
mod statistics;

#[cfg(test)]
mod tests;

use crate::error::{Error, Result};
use crate::gold_standard::GoldStandard;
use crate::identity::{Query, ResultDocument};
use serde::{Deserialize, Serialize};
use std::cell::OnceCell;
use strum_macros::{Display, EnumString};
use tracing::debug;

pub use ranked::{ElevenPointPrecision, InterpolatedPoint};
pub use statistics::Statistics;

use statistics::Contingency;

/// Whether the order of retrieved documents carries rank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ResultKind {
    Ranked,
    Unranked,
}

/// Weighting between precision and recall for the F-measure
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FMeasureWeight {
    /// Weight of precision, usually in (0, 1]; beta² = (1 - alpha) / alpha
    Alpha(f64),
    /// Relative importance of recall; beta = 1 is the balanced F1
    Beta(f64),
}

impl Default for FMeasureWeight {
    fn default() -> Self {
        Self::Beta(1.0)
    }
}

impl FMeasureWeight {
    /// beta² for the weighting; fails only where the formula has no finite weight
    fn beta_squared(self) -> Result<f64> {
        match self {
            Self::Alpha(alpha) if alpha.is_finite() && alpha != 0.0 => Ok((1.0 - alpha) / alpha),
            Self::Alpha(alpha) => Err(Error::invalid_input(format!(
                "F-measure alpha must be a finite, non-zero number, got {alpha}"
            ))),
            Self::Beta(beta) if beta.is_finite() => Ok(beta * beta),
            Self::Beta(beta) => Err(Error::invalid_input(format!(
                "F-measure beta must be a finite number, got {beta}"
            ))),
        }
    }
}

/// Plain-data result document as produced by loaders
///
/// Either `document` or `id` names the document; `document` wins if both are set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultDocumentRecord {
    #[serde(default)]
    pub document: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
}

/// Retrieved documents for a single query
#[derive(Debug)]
pub struct QueryResult<'a> {
    query: Query,
    kind: ResultKind,
    documents: Vec<ResultDocument>,
    gold_standard: &'a GoldStandard,
    /// Per-rank rows for ranked results, a single row for unranked ones
    statistics: OnceCell<Vec<Statistics>>,
}

impl<'a> QueryResult<'a> {
    pub fn new(query: impl Into<String>, kind: ResultKind, gold_standard: &'a GoldStandard) -> Self {
        Self {
            query: Query::new(query),
            kind,
            documents: Vec::new(),
            gold_standard,
            statistics: OnceCell::new(),
        }
    }

    pub fn ranked(query: impl Into<String>, gold_standard: &'a GoldStandard) -> Self {
        Self::new(query, ResultKind::Ranked, gold_standard)
    }

    pub fn unranked(query: impl Into<String>, gold_standard: &'a GoldStandard) -> Self {
        Self::new(query, ResultKind::Unranked, gold_standard)
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn kind(&self) -> ResultKind {
        self.kind
    }

    pub fn is_ranked(&self) -> bool {
        self.kind == ResultKind::Ranked
    }

    /// Retrieved documents; for ranked results the position is the rank
    pub fn documents(&self) -> &[ResultDocument] {
        &self.documents
    }

    pub fn gold_standard(&self) -> &'a GoldStandard {
        self.gold_standard
    }

    /// Appends a retrieved document behind the ones already added
    pub fn add_document(&mut self, id: impl Into<String>, score: Option<f64>) {
        self.documents.push(ResultDocument::new(id, score));
        self.statistics.take();
    }

    /// Appends a document from a loader record
    pub fn add_document_record(&mut self, record: ResultDocumentRecord) -> Result<()> {
        let ResultDocumentRecord {
            document,
            id,
            score,
        } = record;
        let id = document.or(id).ok_or_else(|| {
            Error::invalid_input(format!(
                "Can not add a document to the result for '{}' without a document identifier",
                self.query
            ))
        })?;
        self.add_document(id, score);
        Ok(())
    }

    /// Drops every retrieved document the gold standard has no judgement for
    ///
    /// Unjudged documents are excluded from scoring instead of being counted
    /// as nonrelevant. Returns the number of documents removed.
    pub fn cleanup(&mut self) -> usize {
        let before = self.documents.len();
        let gold_standard = self.gold_standard;
        let query = self.query.as_str();
        self.documents
            .retain(|doc| gold_standard.contains_judgement(doc.id(), query));

        let removed = before - self.documents.len();
        if removed > 0 {
            self.statistics.take();
            debug!(
                query = %self.query,
                removed,
                kept = self.documents.len(),
                "Removed unjudged documents"
            );
        }
        removed
    }

    /// Statistics over the complete retrieved sequence, for either kind
    pub fn overall_statistics(&self) -> Result<Statistics> {
        Contingency::new(self.gold_standard, self.query.as_str()).score(&self.documents, false)
    }

    /// Memoized statistics
    ///
    /// Ranked results yield one row per prefix length (rank 1 to the number
    /// of retrieved documents). Unranked results yield a single row over all
    /// retrieved documents and fail with `UndefinedMetric` when nothing was
    /// retrieved.
    pub fn statistics(&self) -> Result<&[Statistics]> {
        if let Some(rows) = self.statistics.get() {
            return Ok(rows.as_slice());
        }
        let rows = match self.kind {
            ResultKind::Ranked => self.per_rank_statistics()?,
            ResultKind::Unranked => vec![self.overall_statistics()?],
        };
        Ok(self.statistics.get_or_init(|| rows).as_slice())
    }

    fn per_rank_statistics(&self) -> Result<Vec<Statistics>> {
        let contingency = Contingency::new(self.gold_standard, self.query.as_str());
        (1..=self.documents.len())
            .map(|rank| contingency.score(&self.documents[..rank], true))
            .collect()
    }

    /// Weighted harmonic mean of precision and recall over all retrieved documents
    pub fn f_measure(&self, weight: FMeasureWeight) -> Result<f64> {
        let beta_squared = weight.beta_squared()?;
        let stats = self.overall_statistics()?;
        let (precision, recall) = (stats.precision, stats.recall);

        let denominator = beta_squared * precision + recall;
        if denominator == 0.0 {
            return Err(Error::undefined_metric(format!(
                "F-measure for query '{}' is undefined when precision and recall are both zero",
                self.query
            )));
        }
        Ok((beta_squared + 1.0) * precision * recall / denominator)
    }

    fn require_ranked(&self, operation: &str) -> Result<()> {
        if self.is_ranked() {
            Ok(())
        } else {
            Err(Error::unsupported(format!(
                "{operation} requires a ranked result, but the result for '{}' is unranked",
                self.query
            )))
        }
    }
}
