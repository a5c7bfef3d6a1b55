//! A collection of query results evaluated against one gold standard

use crate::error::{Error, Result};
use crate::gold_standard::GoldStandard;
use crate::query_result::QueryResult;
use std::ptr;
use tracing::info;

/// Query results that all refer to the same gold standard
#[derive(Debug)]
pub struct QueryResultSet<'a> {
    gold_standard: &'a GoldStandard,
    results: Vec<QueryResult<'a>>,
}

impl<'a> QueryResultSet<'a> {
    pub fn new(gold_standard: &'a GoldStandard) -> Self {
        Self {
            gold_standard,
            results: Vec::new(),
        }
    }

    pub fn gold_standard(&self) -> &'a GoldStandard {
        self.gold_standard
    }

    /// Adds a result, which must have been built against this set's gold standard
    pub fn add_result(&mut self, result: QueryResult<'a>) -> Result<()> {
        if !ptr::eq(result.gold_standard(), self.gold_standard) {
            return Err(Error::invalid_input(format!(
                "The result for '{}' refers to a different gold standard than its result set",
                result.query()
            )));
        }
        self.results.push(result);
        Ok(())
    }

    pub fn results(&self) -> &[QueryResult<'a>] {
        &self.results
    }

    pub fn results_mut(&mut self) -> &mut [QueryResult<'a>] {
        &mut self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Runs [`QueryResult::cleanup`] on every result, returning the total removed
    pub fn cleanup_all(&mut self) -> usize {
        self.results.iter_mut().map(QueryResult::cleanup).sum()
    }

    /// Mean of the average precision over the ranked results
    ///
    /// Unranked results do not take part. Fails with `UndefinedMetric` when
    /// the set holds no ranked result.
    pub fn mean_average_precision(&self) -> Result<f64> {
        let mut sum = 0.0;
        let mut ranked = 0usize;
        for result in self.results.iter().filter(|r| r.is_ranked()) {
            sum += result.average_precision()?;
            ranked += 1;
        }

        if ranked == 0 {
            return Err(Error::undefined_metric(
                "Mean average precision is undefined without ranked results",
            ));
        }

        let map = sum / ranked as f64;
        info!(
            ranked_results = ranked,
            total_results = self.results.len(),
            map,
            "Computed mean average precision"
        );
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::judgement::JudgementTriple;

    fn gold_standard() -> GoldStandard {
        GoldStandard::from_triples([
            JudgementTriple::new("doc1", "query1", true),
            JudgementTriple::new("doc2", "query1", false),
            JudgementTriple::new("doc3", "query1", true),
            JudgementTriple::new("doc1", "query2", false),
            JudgementTriple::new("doc2", "query2", true),
        ])
        .unwrap()
    }

    fn result<'a>(
        gold: &'a GoldStandard,
        query: &str,
        ranked: bool,
        docs: &[&str],
    ) -> QueryResult<'a> {
        let mut result = if ranked {
            QueryResult::ranked(query, gold)
        } else {
            QueryResult::unranked(query, gold)
        };
        for doc in docs {
            result.add_document(*doc, None);
        }
        result
    }

    #[test]
    fn test_add_result_requires_same_gold_standard() {
        let gold = gold_standard();
        let other = gold_standard();
        let mut set = QueryResultSet::new(&gold);

        set.add_result(result(&gold, "query1", true, &["doc1"]))
            .unwrap();
        let err = set
            .add_result(result(&other, "query1", true, &["doc1"]))
            .unwrap_err();

        assert!(matches!(err, Error::InvalidInput(_)));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_mean_average_precision_ignores_unranked() {
        let gold = gold_standard();
        let mut set = QueryResultSet::new(&gold);

        // AP = (1 + 2/3) / 2
        set.add_result(result(&gold, "query1", true, &["doc1", "doc2", "doc3"]))
            .unwrap();
        // AP = 1/2
        set.add_result(result(&gold, "query2", true, &["doc1", "doc2"]))
            .unwrap();
        set.add_result(result(&gold, "query1", false, &["doc2"]))
            .unwrap();

        let expected = ((1.0 + 2.0 / 3.0) / 2.0 + 0.5) / 2.0;
        let map = set.mean_average_precision().unwrap();
        assert!((map - expected).abs() < 1e-9, "got {map}");
    }

    #[test]
    fn test_mean_average_precision_undefined_without_ranked_results() {
        let gold = gold_standard();
        let mut set = QueryResultSet::new(&gold);
        assert!(set.mean_average_precision().unwrap_err().is_undefined_metric());

        set.add_result(result(&gold, "query1", false, &["doc1"]))
            .unwrap();
        assert!(set.mean_average_precision().unwrap_err().is_undefined_metric());
    }

    #[test]
    fn test_cleanup_all() {
        let gold = gold_standard();
        let mut set = QueryResultSet::new(&gold);
        set.add_result(result(&gold, "query1", true, &["doc1", "doc9"]))
            .unwrap();
        set.add_result(result(&gold, "query2", false, &["doc3", "doc2"]))
            .unwrap();

        assert_eq!(set.cleanup_all(), 2);
        assert_eq!(set.cleanup_all(), 0);
        assert_eq!(set.results()[0].documents().len(), 1);
        assert_eq!(set.results()[1].documents()[0].id(), "doc2");
    }

    #[test]
    fn test_results_mut_allows_adding_documents() {
        let gold = gold_standard();
        let mut set = QueryResultSet::new(&gold);
        set.add_result(result(&gold, "query1", true, &[])).unwrap();

        set.results_mut()[0].add_document("doc1", Some(1.0));
        assert_eq!(set.results()[0].documents().len(), 1);
        assert!(!set.is_empty());
    }
}
