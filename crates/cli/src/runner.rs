//! The evaluation workflow behind the `evaluate` and `kappa` commands

use crate::output::{write_report, Evaluation, StatisticsReport};
use crate::report::{contingency_table, eleven_point_table, ranked_table};
use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use ireval_core::{Config, GoldStandard, QueryResult, QueryResultSet};
use ireval_loaders::{load_gold_standard, result_set};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Report names, written as `<prefix>_<name>.<ext>`
pub const STATISTICS_REPORT: &str = "statistics";
pub const AVERAGE_PRECISION_REPORT: &str = "avg_precision";
pub const ELEVEN_POINT_REPORT: &str = "eleven_point";
pub const SUMMARY_REPORT: &str = "summary";

/// Loads the configured gold standard
pub fn load_configured_gold_standard(config: &Config) -> Result<GoldStandard> {
    let path = config
        .input
        .gold_standard_file
        .as_deref()
        .ok_or_else(|| anyhow!("No gold standard file given (use --load or input.gold_standard_file)"))?;

    info!(path = %path.display(), format = %config.input.format, "Loading gold standard");
    let gold_standard = load_gold_standard(path, config.input.format)
        .with_context(|| format!("Failed to load gold standard from {}", path.display()))?;

    info!(
        queries = gold_standard.queries().len(),
        documents = gold_standard.documents().len(),
        judgements = gold_standard.judgements().len(),
        users = gold_standard.users().len(),
        "Gold standard loaded"
    );
    Ok(gold_standard)
}

/// Scores every result of the set
///
/// A result whose metrics fail is logged and left out of the reports; the
/// remaining results are still evaluated.
pub fn evaluate(set: &mut QueryResultSet<'_>, config: &Config) -> Evaluation {
    let mut evaluation = Evaluation::default();
    let verbose = config.report.verbose;

    if config.evaluation.cleanup {
        let removed = set.cleanup_all();
        info!(removed, "Removed documents without judgements");
        evaluation.summary.documents_removed = removed;
    }

    let total = set.len();
    let pb = (!verbose).then(|| create_progress_bar(total));

    for (idx, result) in set.results().iter().enumerate() {
        let query = result.query().to_string();
        if let Some(pb) = &pb {
            pb.set_message(query.clone());
        }
        debug!(query = %query, index = idx + 1, total, "Evaluating result");

        match score_result(result, config, &mut evaluation) {
            Ok(()) => {
                if verbose {
                    print_tables(result);
                }
            }
            Err(e) => {
                warn!(query = %query, error = %e, "Skipping result");
                evaluation.summary.failed_results += 1;
            }
        }

        if let Some(pb) = &pb {
            pb.inc(1);
        }
    }

    if let Some(pb) = pb {
        pb.finish_with_message("Evaluation complete");
    }

    evaluation.summary.results = total;
    evaluation.summary.ranked_results = set.results().iter().filter(|r| r.is_ranked()).count();
    evaluation.summary.mean_average_precision = match set.mean_average_precision() {
        Ok(map) => Some(map),
        Err(e) => {
            info!(reason = %e, "No mean average precision for this run");
            None
        }
    };
    evaluation.summary.kappa = match set.gold_standard().kappa() {
        Ok(kappa) => Some(kappa),
        Err(e) => {
            debug!(reason = %e, "No kappa for this gold standard");
            None
        }
    };

    evaluation
}

fn score_result(
    result: &QueryResult<'_>,
    config: &Config,
    evaluation: &mut Evaluation,
) -> ireval_core::Result<()> {
    let query = result.query().to_string();

    // Compute everything first so a failure leaves no partial entry behind
    let (statistics, ranked) = if result.is_ranked() {
        let rows = result
            .statistics_up_to(config.evaluation.max_rank)?
            .to_vec();
        let ranked = (
            result.average_precision()?,
            result.eleven_point_precision()?,
        );
        (StatisticsReport::PerRank(rows), Some(ranked))
    } else {
        (StatisticsReport::Overall(result.overall_statistics()?), None)
    };

    if let Some((average_precision, eleven_point)) = ranked {
        evaluation
            .average_precision
            .insert(query.clone(), average_precision);
        evaluation.eleven_point.insert(query.clone(), eleven_point);
    }
    if evaluation.statistics.insert(query.clone(), statistics).is_some() {
        warn!(query = %query, "Several results share this query, keeping the last one");
    }

    match result.f_measure(config.evaluation.f_measure_weight()) {
        Ok(f) => {
            evaluation.summary.f_measure.insert(query, f);
        }
        Err(e) => debug!(query = %query, reason = %e, "No F-measure"),
    }
    Ok(())
}

fn print_tables(result: &QueryResult<'_>) {
    println!("Query: {} ({})", result.query(), result.kind());
    if let Ok(stats) = result.overall_statistics() {
        println!("{}", contingency_table(&stats));
    }
    if result.is_ranked() {
        match ranked_table(result) {
            Ok(table) => println!("{table}"),
            Err(e) => error!(error = %e, "Failed to render ranked table"),
        }
        match result.eleven_point_precision() {
            Ok(eleven) => println!("{}", eleven_point_table(&eleven)),
            Err(e) => error!(error = %e, "Failed to render 11-point table"),
        }
    }
}

/// Create a progress bar for result evaluation
fn create_progress_bar(total: usize) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            .map_err(|e| error!("Failed to set progress bar style: {}", e))
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-"),
    );
    pb
}

/// Writes every report of the run and returns the written paths
pub fn write_reports(evaluation: &Evaluation, config: &Config) -> Result<Vec<PathBuf>> {
    let format = config.output.format;
    let reports = [
        STATISTICS_REPORT,
        AVERAGE_PRECISION_REPORT,
        ELEVEN_POINT_REPORT,
        SUMMARY_REPORT,
    ];

    let mut written = Vec::with_capacity(reports.len());
    for name in reports {
        let path = config.report_path(name);
        match name {
            STATISTICS_REPORT => write_report(&path, &evaluation.statistics, format)?,
            AVERAGE_PRECISION_REPORT => write_report(&path, &evaluation.average_precision, format)?,
            ELEVEN_POINT_REPORT => write_report(&path, &evaluation.eleven_point, format)?,
            _ => write_report(&path, &evaluation.summary, format)?,
        }
        written.push(path);
    }
    Ok(written)
}

/// Loads the gold standard and result set, evaluates and writes the reports
pub fn run_evaluation(config: &Config, query_result_file: Option<&Path>) -> Result<Evaluation> {
    config.validate()?;

    let results_path = query_result_file
        .or(config.input.query_result_file.as_deref())
        .ok_or_else(|| {
            anyhow!("No query result file given (use --queries or input.query_result_file)")
        })?;

    let gold_standard = load_configured_gold_standard(config)?;

    info!(path = %results_path.display(), "Loading query results");
    let mut set = result_set::load_yaml_file(results_path, &gold_standard).with_context(|| {
        format!("Failed to load query results from {}", results_path.display())
    })?;
    info!(results = set.len(), "Query results loaded");

    let evaluation = evaluate(&mut set, config);
    let written = write_reports(&evaluation, config)?;
    for path in &written {
        info!(path = %path.display(), "Report written");
    }

    match evaluation.summary.mean_average_precision {
        Some(map) => info!(map, "Finished evaluating all results"),
        None => info!("Finished evaluating all results"),
    }
    Ok(evaluation)
}

/// Loads the gold standard and computes its average pairwise kappa
pub fn run_kappa(config: &Config) -> Result<f64> {
    let gold_standard = load_configured_gold_standard(config)?;
    gold_standard
        .kappa()
        .context("Failed to compute inter-annotator agreement")
}
