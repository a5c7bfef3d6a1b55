//! Operations that only make sense when retrieved documents are ranked

use super::{QueryResult, Statistics};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Number of fixed recall levels, 0.0 through 1.0 in steps of 0.1
const RECALL_LEVELS: usize = 11;

/// Interpolated precision at one fixed recall level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterpolatedPoint {
    pub recall: f64,
    pub precision: f64,
}

/// 11-point interpolated precision and its average
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElevenPointPrecision {
    pub points: Vec<InterpolatedPoint>,
    pub average: f64,
}

impl ElevenPointPrecision {
    /// Builds the interpolation from per-rank statistics
    ///
    /// Each observed recall keeps the precision of the last rank that reached
    /// it. A level takes the precision of the first observed recall, in rank
    /// order, that is at least as high; levels nothing reaches get 0.
    fn from_rows(rows: &[Statistics]) -> Self {
        let mut observed: Vec<(f64, f64)> = Vec::new();
        for row in rows {
            match observed.iter_mut().find(|(recall, _)| *recall == row.recall) {
                Some(entry) => entry.1 = row.precision,
                None => observed.push((row.recall, row.precision)),
            }
        }

        let points: Vec<InterpolatedPoint> = (0..RECALL_LEVELS)
            .map(|step| {
                let level = step as f64 / 10.0;
                let precision = observed
                    .iter()
                    .find(|(recall, _)| *recall >= level)
                    .map_or(0.0, |&(_, precision)| precision);
                InterpolatedPoint {
                    recall: level,
                    precision,
                }
            })
            .collect();

        let average = points.iter().map(|p| p.precision).sum::<f64>() / RECALL_LEVELS as f64;
        Self { points, average }
    }

    /// Interpolated precision values in ascending recall order
    pub fn precisions(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.precision)
    }
}

impl QueryResult<'_> {
    /// The first `max` per-rank rows
    ///
    /// `max == 0`, or a `max` beyond the number of retrieved documents, yields
    /// every rank.
    pub fn statistics_up_to(&self, max: usize) -> Result<&[Statistics]> {
        self.require_ranked("per-rank statistics")?;
        let rows = self.statistics()?;
        let len = if max == 0 || max > rows.len() {
            rows.len()
        } else {
            max
        };
        Ok(&rows[..len])
    }

    /// Sum of the precision at every relevant retrieved rank, divided by the
    /// number of documents relevant to the query in the gold standard
    ///
    /// Relevant documents that were never retrieved therefore lower the score.
    /// Returns 0 when the gold standard has no relevant document for the query.
    pub fn average_precision(&self) -> Result<f64> {
        self.require_ranked("average precision")?;
        let rows = self.statistics()?;

        let total_relevant = self
            .gold_standard
            .relevant_document_count(self.query.as_str());
        if total_relevant == 0 {
            return Ok(0.0);
        }

        let precision_sum: f64 = rows
            .iter()
            .filter(|row| row.relevant == Some(true))
            .map(|row| row.precision)
            .sum();
        Ok(precision_sum / total_relevant as f64)
    }

    /// 11-point interpolated precision over the per-rank statistics
    pub fn eleven_point_precision(&self) -> Result<ElevenPointPrecision> {
        self.require_ranked("11-point interpolated precision")?;
        Ok(ElevenPointPrecision::from_rows(self.statistics()?))
    }
}
