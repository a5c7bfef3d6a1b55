//! Tests for query result scoring
//!
//! The ranked fixture is evaluated against this table (doc1–doc4 relevant):
//!
//! ```text
//! Index  Relevant  Precision  Recall  Document
//! 1      [X]       1.000      0.250   doc1
//! 2      [X]       1.000      0.500   doc2
//! 3      [ ]       0.667      0.500   doc5
//! 4      [X]       0.750      0.750   doc3
//! 5      [ ]       0.600      0.750   doc6
//! 6      [X]       0.667      1.000   doc4
//! 7      [ ]       0.571      1.000   doc7
//! 8      [ ]       0.500      1.000   doc8
//! 9      [ ]       0.444      1.000   doc9
//! 10     [ ]       0.400      1.000   doc10
//! ```

use super::*;
use crate::judgement::JudgementTriple;
use pretty_assertions::assert_eq;

const RANKING: [&str; 10] = [
    "doc1", "doc2", "doc5", "doc3", "doc6", "doc4", "doc7", "doc8", "doc9", "doc10",
];

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

fn assert_all_close(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len(), "length mismatch");
    for (a, e) in actual.iter().zip(expected) {
        assert_close(*a, *e);
    }
}

/// doc1–doc4 are relevant for query1, doc5–doc10 are not
fn gold_standard() -> GoldStandard {
    let triples = (1..=10).map(|i| JudgementTriple::new(format!("doc{i}"), "query1", i <= 4));
    GoldStandard::from_triples(triples).unwrap()
}

fn unranked(gold: &GoldStandard) -> QueryResult<'_> {
    let mut result = QueryResult::unranked("query1", gold);
    for i in 1..=10 {
        result.add_document(format!("doc{i}"), None);
    }
    result
}

fn ranked(gold: &GoldStandard) -> QueryResult<'_> {
    let mut result = QueryResult::ranked("query1", gold);
    for id in RANKING {
        result.add_document(id, None);
    }
    result
}

#[test]
fn test_unranked_precision_and_recall() {
    let gold = gold_standard();
    let result = unranked(&gold);
    let stats = result.statistics().unwrap();

    assert_eq!(stats.len(), 1);
    assert_close(stats[0].precision, 0.4);
    assert_close(stats[0].recall, 1.0);
    assert_eq!(stats[0].document, None);
}

#[test]
fn test_unranked_contingency_counts() {
    let gold = gold_standard();
    let mut result = QueryResult::unranked("query1", &gold);
    for id in ["doc1", "doc2", "doc5"] {
        result.add_document(id, Some(1.0));
    }
    let stats = result.overall_statistics().unwrap();

    assert_eq!(stats.true_positives, 2);
    assert_eq!(stats.false_positives, 1);
    assert_eq!(stats.false_negatives, 2);
    assert_eq!(stats.true_negatives, 5);
    assert_eq!(stats.total(), 10);
    assert_close(stats.precision, 2.0 / 3.0);
    assert_close(stats.recall, 0.5);
}

#[test]
fn test_ranked_precision() {
    let gold = gold_standard();
    let result = ranked(&gold);
    let precisions: Vec<f64> = result.statistics().unwrap().iter().map(|s| s.precision).collect();

    assert_all_close(
        &precisions,
        &[
            1.0,
            1.0,
            0.6666666666666666,
            0.75,
            0.6,
            0.6666666666666666,
            0.5714285714285714,
            0.5,
            0.4444444444444444,
            0.4,
        ],
    );
}

#[test]
fn test_ranked_recall() {
    let gold = gold_standard();
    let result = ranked(&gold);
    let recalls: Vec<f64> = result.statistics().unwrap().iter().map(|s| s.recall).collect();

    assert_all_close(
        &recalls,
        &[0.25, 0.5, 0.5, 0.75, 0.75, 1.0, 1.0, 1.0, 1.0, 1.0],
    );
}

#[test]
fn test_ranked_rows_report_newly_added_document() {
    let gold = gold_standard();
    let result = ranked(&gold);
    let rows = result.statistics().unwrap();

    let documents: Vec<&str> = rows.iter().filter_map(|s| s.document.as_deref()).collect();
    assert_eq!(documents, RANKING.to_vec());

    let relevant: Vec<bool> = rows.iter().filter_map(|s| s.relevant).collect();
    assert_eq!(
        relevant,
        vec![true, true, false, true, false, true, false, false, false, false]
    );
}

#[test]
fn test_statistics_up_to_clamps() {
    let gold = gold_standard();
    let result = ranked(&gold);

    assert_eq!(result.statistics_up_to(3).unwrap().len(), 3);
    assert_eq!(result.statistics_up_to(0).unwrap().len(), 10);
    assert_eq!(result.statistics_up_to(50).unwrap().len(), 10);
}

#[test]
fn test_eleven_point_precision() {
    let gold = gold_standard();
    let result = ranked(&gold);
    let eleven = result.eleven_point_precision().unwrap();

    let levels: Vec<f64> = eleven.points.iter().map(|p| p.recall).collect();
    assert_all_close(
        &levels,
        &[0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0],
    );

    let precisions: Vec<f64> = eleven.precisions().collect();
    let expected = [
        1.0,
        1.0,
        1.0,
        0.6666666666666666,
        0.6666666666666666,
        0.6666666666666666,
        0.6,
        0.6,
        0.4,
        0.4,
        0.4,
    ];
    assert_all_close(&precisions, &expected);
    assert_close(eleven.average, expected.iter().sum::<f64>() / 11.0);
}

#[test]
fn test_eleven_point_precision_unreached_levels_are_zero() {
    let gold = gold_standard();
    let mut result = QueryResult::ranked("query1", &gold);
    result.add_document("doc1", None);
    result.add_document("doc5", None);

    let eleven = result.eleven_point_precision().unwrap();
    let precisions: Vec<f64> = eleven.precisions().collect();
    // Recall tops out at 0.25, and the later rank overwrites its precision
    assert_all_close(
        &precisions,
        &[0.5, 0.5, 0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    );
}

#[test]
fn test_average_precision() {
    let gold = gold_standard();
    let result = ranked(&gold);
    let expected = (1.0 + 1.0 + 0.75 + 4.0 / 6.0) / 4.0;
    assert_close(result.average_precision().unwrap(), expected);
}

#[test]
fn test_average_precision_divides_by_all_relevant_documents() {
    let gold = gold_standard();
    let mut result = QueryResult::ranked("query1", &gold);
    result.add_document("doc1", None);
    result.add_document("doc5", None);

    // Only one of four relevant documents retrieved, at rank 1
    assert_close(result.average_precision().unwrap(), 0.25);
}

#[test]
fn test_average_precision_without_relevant_documents() {
    let gold = gold_standard();
    let mut result = QueryResult::ranked("query2", &gold);
    result.add_document("doc1", None);
    assert_close(result.average_precision().unwrap(), 0.0);
}

#[test]
fn test_rank_only_operations_fail_on_unranked() {
    let gold = gold_standard();
    let result = unranked(&gold);

    assert!(matches!(
        result.average_precision(),
        Err(Error::UnsupportedOperation(_))
    ));
    assert!(matches!(
        result.eleven_point_precision(),
        Err(Error::UnsupportedOperation(_))
    ));
    assert!(matches!(
        result.statistics_up_to(3),
        Err(Error::UnsupportedOperation(_))
    ));
}

#[test]
fn test_empty_unranked_precision_is_undefined() {
    let gold = gold_standard();
    let result = QueryResult::unranked("query1", &gold);
    assert!(matches!(result.statistics(), Err(Error::UndefinedMetric(_))));
}

#[test]
fn test_empty_ranked_result_has_no_rows() {
    let gold = gold_standard();
    let result = QueryResult::ranked("query1", &gold);

    assert!(result.statistics().unwrap().is_empty());
    assert_close(result.average_precision().unwrap(), 0.0);
    assert_close(result.eleven_point_precision().unwrap().average, 0.0);
}

#[test]
fn test_f_measure() {
    let gold = gold_standard();
    let result = unranked(&gold);

    // precision 0.4, recall 1.0
    assert_close(result.f_measure(FMeasureWeight::default()).unwrap(), 0.8 / 1.4);
    assert_close(result.f_measure(FMeasureWeight::Beta(0.0)).unwrap(), 0.4);
    // alpha = 0.5 is the balanced measure
    assert_close(
        result.f_measure(FMeasureWeight::Alpha(0.5)).unwrap(),
        result.f_measure(FMeasureWeight::Beta(1.0)).unwrap(),
    );
    // alpha = 1 weighs precision only
    assert_close(result.f_measure(FMeasureWeight::Alpha(1.0)).unwrap(), 0.4);
}

#[test]
fn test_f_measure_zero_denominator_is_undefined() {
    let gold = gold_standard();
    let mut result = QueryResult::unranked("query1", &gold);
    result.add_document("doc5", None);

    assert!(matches!(
        result.f_measure(FMeasureWeight::default()),
        Err(Error::UndefinedMetric(_))
    ));
}

#[test]
fn test_f_measure_rejects_invalid_weights() {
    let gold = gold_standard();
    let result = unranked(&gold);

    assert!(matches!(
        result.f_measure(FMeasureWeight::Alpha(0.0)),
        Err(Error::InvalidInput(_))
    ));
    assert!(matches!(
        result.f_measure(FMeasureWeight::Beta(f64::NAN)),
        Err(Error::InvalidInput(_))
    ));
    assert!(matches!(
        result.f_measure(FMeasureWeight::Alpha(f64::INFINITY)),
        Err(Error::InvalidInput(_))
    ));
}

#[test]
fn test_f_measure_negative_beta_matches_its_square() {
    let gold = gold_standard();
    let result = unranked(&gold);

    assert_close(
        result.f_measure(FMeasureWeight::Beta(-1.0)).unwrap(),
        result.f_measure(FMeasureWeight::Beta(1.0)).unwrap(),
    );
    assert_close(
        result.f_measure(FMeasureWeight::Beta(-2.0)).unwrap(),
        result.f_measure(FMeasureWeight::Beta(2.0)).unwrap(),
    );
}

#[test]
fn test_cleanup_removes_unjudged_documents() {
    let mut gold = GoldStandard::new();
    gold.add_judgement(JudgementTriple::new("doc1", "query1", true))
        .unwrap();
    gold.add_judgement(JudgementTriple::new("doc2", "query1", None))
        .unwrap();
    gold.add_judgement(JudgementTriple::new("doc3", "query2", false))
        .unwrap();

    let mut result = QueryResult::ranked("query1", &gold);
    for id in ["doc1", "doc2", "doc3", "unknown"] {
        result.add_document(id, None);
    }

    assert_eq!(result.cleanup(), 3);
    let kept: Vec<String> = result.documents().iter().map(|d| d.id().to_string()).collect();
    assert_eq!(kept, vec!["doc1".to_string()]);

    // Idempotent
    assert_eq!(result.cleanup(), 0);
    let kept_again: Vec<String> = result.documents().iter().map(|d| d.id().to_string()).collect();
    assert_eq!(kept_again, kept);
}

#[test]
fn test_mutation_invalidates_cached_statistics() {
    let gold = gold_standard();
    let mut result = QueryResult::ranked("query1", &gold);
    result.add_document("doc1", None);
    assert_eq!(result.statistics().unwrap().len(), 1);

    result.add_document("unknown", None);
    assert_eq!(result.statistics().unwrap().len(), 2);

    result.cleanup();
    assert_eq!(result.statistics().unwrap().len(), 1);
}

#[test]
fn test_add_document_record() {
    let gold = gold_standard();
    let mut result = QueryResult::ranked("query1", &gold);

    result
        .add_document_record(ResultDocumentRecord {
            id: Some("doc1".to_string()),
            score: Some(95.0),
            ..Default::default()
        })
        .unwrap();
    result
        .add_document_record(ResultDocumentRecord {
            document: Some("doc2".to_string()),
            id: Some("ignored".to_string()),
            score: None,
        })
        .unwrap();
    let missing = result.add_document_record(ResultDocumentRecord {
        score: Some(3.0),
        ..Default::default()
    });

    assert!(matches!(missing, Err(Error::InvalidInput(_))));
    let ids: Vec<&str> = result.documents().iter().map(|d| d.id()).collect();
    assert_eq!(ids, vec!["doc1", "doc2"]);
    assert_eq!(result.documents()[0].score, Some(95.0));
}

#[test]
fn test_result_kind_strings() {
    assert_eq!(ResultKind::Ranked.to_string(), "ranked");
    assert_eq!("unranked".parse::<ResultKind>().ok(), Some(ResultKind::Unranked));
}
