//! Plain-text tables for the console report

use ireval_core::{ElevenPointPrecision, QueryResult, Result, Statistics};

const RULE_WIDTH: usize = 57;

fn rule() -> String {
    "-".repeat(RULE_WIDTH)
}

/// Retrieved/not-retrieved against relevant/nonrelevant, with totals
pub fn contingency_table(stats: &Statistics) -> String {
    let row = |label: &str, a: usize, b: usize, total: usize| {
        format!("{label:<15}| {a:<12}| {b:<12}| {total}")
    };

    [
        format!("{:<15}| {:<12}| {:<12}| Total", "", "Relevant", "Nonrelevant"),
        rule(),
        row(
            "Retrieved",
            stats.true_positives,
            stats.false_positives,
            stats.retrieved(),
        ),
        row(
            "Not Retrieved",
            stats.false_negatives,
            stats.true_negatives,
            stats.not_retrieved(),
        ),
        rule(),
        row(
            "",
            stats.relevant_items(),
            stats.nonrelevant_items(),
            stats.total(),
        ),
    ]
    .join("\n")
        + "\n"
}

/// One line per rank: relevance marker, precision, recall, score and document
///
/// Fails for unranked results.
pub fn ranked_table(result: &QueryResult<'_>) -> Result<String> {
    let rows = result.statistics_up_to(0)?;

    let mut lines = vec![
        format!("Query: {}", result.query()),
        format!(
            "{:<7}{:<10}{:<11}{:<8}{:<10}Document ID",
            "Index", "Relevant", "Precision", "Recall", "Score"
        ),
    ];
    for (idx, (row, doc)) in rows.iter().zip(result.documents()).enumerate() {
        let marker = if row.relevant == Some(true) {
            "[X]"
        } else {
            "[ ]"
        };
        let score = doc
            .score
            .map_or_else(|| "-".to_string(), |score| score.to_string());
        lines.push(format!(
            "{:<7}{marker:<10}{:<11.3}{:<8.3}{score:<10}{}",
            idx + 1,
            row.precision,
            row.recall,
            doc.id()
        ));
    }
    Ok(lines.join("\n") + "\n")
}

/// Interpolated precision per recall level and the average
pub fn eleven_point_table(eleven: &ElevenPointPrecision) -> String {
    let mut lines = vec!["Recall  Interpolated Precision".to_string()];
    lines.extend(
        eleven
            .points
            .iter()
            .map(|point| format!("{:<8.1}{:.3}", point.recall, point.precision)),
    );
    lines.push("-".repeat(38));
    lines.push(format!("{:<8}{:.3}", "Avg.", eleven.average));
    lines.join("\n") + "\n"
}
