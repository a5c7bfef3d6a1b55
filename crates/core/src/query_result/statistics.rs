//! Contingency-table statistics for a retrieved document sequence

use crate::error::{Error, Result};
use crate::gold_standard::GoldStandard;
use crate::identity::ResultDocument;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Precision, recall and contingency counts for one retrieved sequence
///
/// For ranked prefixes, `document` and `relevant` describe the last document
/// of the prefix, i.e. the one added at this rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub precision: f64,
    pub recall: f64,
    /// Retrieved and relevant
    pub true_positives: usize,
    /// Retrieved and nonrelevant
    pub false_positives: usize,
    /// Not retrieved and nonrelevant
    pub true_negatives: usize,
    /// Not retrieved and relevant
    pub false_negatives: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevant: Option<bool>,
}

impl Statistics {
    pub fn retrieved(&self) -> usize {
        self.true_positives + self.false_positives
    }

    pub fn not_retrieved(&self) -> usize {
        self.false_negatives + self.true_negatives
    }

    pub fn relevant_items(&self) -> usize {
        self.true_positives + self.false_negatives
    }

    pub fn nonrelevant_items(&self) -> usize {
        self.false_positives + self.true_negatives
    }

    pub fn total(&self) -> usize {
        self.retrieved() + self.not_retrieved()
    }
}

/// Scores retrieved sequences for one query against a gold standard
pub(crate) struct Contingency<'a> {
    gold_standard: &'a GoldStandard,
    query: &'a str,
    /// Gold-standard documents whose consensus is relevant for the query
    relevant_ids: HashSet<&'a str>,
}

impl<'a> Contingency<'a> {
    pub(crate) fn new(gold_standard: &'a GoldStandard, query: &'a str) -> Self {
        let relevant_ids = gold_standard
            .documents()
            .iter()
            .filter(|doc| gold_standard.relevant(doc.id(), query))
            .map(|doc| doc.id())
            .collect();
        Self {
            gold_standard,
            query,
            relevant_ids,
        }
    }

    /// Computes the statistics for a retrieved sequence
    ///
    /// `all_items` is every document the gold standard knows about, so the
    /// not-retrieved side is derived as `all_items - retrieved_items`. With
    /// `track_last`, the last document of the sequence is reported as well.
    pub(crate) fn score(&self, retrieved: &[ResultDocument], track_last: bool) -> Result<Statistics> {
        let retrieved_items = retrieved.len();
        if retrieved_items == 0 {
            return Err(Error::undefined_metric(format!(
                "precision for query '{}' is undefined without retrieved documents",
                self.query
            )));
        }
        let all_items = self.gold_standard.documents().len();
        // Retrieved documents unknown to the gold standard can push this below zero
        let not_retrieved_items = all_items.saturating_sub(retrieved_items);

        let retrieved_ids: HashSet<&str> = retrieved.iter().map(ResultDocument::id).collect();

        let retrieved_relevant = retrieved
            .iter()
            .filter(|doc| self.relevant_ids.contains(doc.id()))
            .count();
        let retrieved_nonrelevant = retrieved_items - retrieved_relevant;

        let not_retrieved_relevant = self
            .relevant_ids
            .iter()
            .filter(|id| !retrieved_ids.contains(*id))
            .count();
        let not_retrieved_nonrelevant = not_retrieved_items.saturating_sub(not_retrieved_relevant);

        let relevant_items = retrieved_relevant + not_retrieved_relevant;

        let precision = retrieved_relevant as f64 / retrieved_items as f64;
        let recall = if relevant_items != 0 {
            retrieved_relevant as f64 / relevant_items as f64
        } else {
            0.0
        };

        let (document, relevant) = match retrieved.last() {
            Some(last) if track_last => (
                Some(last.id().to_string()),
                Some(self.relevant_ids.contains(last.id())),
            ),
            _ => (None, None),
        };

        Ok(Statistics {
            precision,
            recall,
            true_positives: retrieved_relevant,
            false_positives: retrieved_nonrelevant,
            true_negatives: not_retrieved_nonrelevant,
            false_negatives: not_retrieved_relevant,
            document,
            relevant,
        })
    }
}
