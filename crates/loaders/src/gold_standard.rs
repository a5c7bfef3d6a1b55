//! Gold standard loaders
//!
//! YAML layout:
//!
//! ```yaml
//! - query: my query
//!   documents:
//!   - id: doc1
//!     judgements:
//!     - relevant: true
//!       user: 1
//!     - relevant: false
//!       user: 2
//!   - id: doc2
//!     judgements: []
//! ```
//!
//! Plain text layout, one tab-separated judgement per line:
//!
//! ```text
//! my query	doc1	true	alice
//! my query	doc2	false
//! ```

use crate::scalar::{identifier, Scalar};
use ireval_core::{Error, GoldStandard, JudgementTriple, Result, ResultExt};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Deserialize)]
struct QueryEntry {
    #[serde(default)]
    query: Option<Scalar>,
    #[serde(default)]
    documents: Vec<DocumentEntry>,
}

#[derive(Debug, Deserialize)]
struct DocumentEntry {
    #[serde(default)]
    id: Option<Scalar>,
    #[serde(default)]
    judgements: Vec<JudgementEntry>,
}

#[derive(Debug, Deserialize)]
struct JudgementEntry {
    #[serde(default)]
    relevant: Option<bool>,
    #[serde(default)]
    user: Option<Scalar>,
}

/// Parses a YAML gold standard
///
/// A document without judgements registers its pair with unspecified relevance.
pub fn from_yaml_str(source: &str, label: &str) -> Result<GoldStandard> {
    let entries: Vec<QueryEntry> = serde_yaml::from_str(source)
        .map_err(|e| Error::parse(label, format!("Invalid gold standard YAML: {e}")))?;

    let mut gold_standard = GoldStandard::new();
    for entry in entries {
        let query = identifier(entry.query);
        for doc in entry.documents {
            let document = identifier(doc.id);
            if doc.judgements.is_empty() {
                gold_standard.add_judgement(JudgementTriple {
                    document,
                    query: query.clone(),
                    relevant: None,
                    user: None,
                })?;
                continue;
            }
            for judgement in doc.judgements {
                gold_standard.add_judgement(JudgementTriple {
                    document: document.clone(),
                    query: query.clone(),
                    relevant: judgement.relevant,
                    user: identifier(judgement.user),
                })?;
            }
        }
    }

    log_loaded(&gold_standard, label);
    Ok(gold_standard)
}

/// Parses a tab-separated gold standard
///
/// Columns are query, document, relevant and an optional user. Trailing
/// empty columns are dropped before counting, and lines with fewer than
/// three or more than four columns are skipped. Identifiers are kept
/// verbatim.
pub fn from_plaintext_str(source: &str, label: &str) -> Result<GoldStandard> {
    let mut gold_standard = GoldStandard::new();

    for (idx, line) in source.lines().enumerate() {
        let line_number = idx + 1;
        let mut columns: Vec<&str> = line.trim_end_matches('\r').split('\t').collect();
        while columns.last() == Some(&"") {
            columns.pop();
        }
        if !(3..=4).contains(&columns.len()) {
            if !line.trim().is_empty() {
                debug!(
                    source = label,
                    line = line_number,
                    columns = columns.len(),
                    "Skipping line without 3 or 4 columns"
                );
            }
            continue;
        }

        let relevant = parse_relevance(columns[2]).ok_or_else(|| {
            Error::parse(
                label,
                format!(
                    "line {line_number}: '{}' is not a relevance value",
                    columns[2].trim()
                ),
            )
        })?;

        let triple = JudgementTriple {
            document: non_empty(columns[1]),
            query: non_empty(columns[0]),
            relevant,
            user: columns.get(3).and_then(|user| non_empty(user)),
        };
        gold_standard
            .add_judgement(triple)
            .map_err(|e| Error::parse(label, format!("line {line_number}: {e}")))?;
    }

    log_loaded(&gold_standard, label);
    Ok(gold_standard)
}

/// Reads and parses a YAML gold standard file
pub fn load_yaml_file(path: &Path) -> Result<GoldStandard> {
    let source = read_source(path)?;
    from_yaml_str(&source, &path.display().to_string())
}

/// Reads and parses a tab-separated gold standard file
pub fn load_plaintext_file(path: &Path) -> Result<GoldStandard> {
    let source = read_source(path)?;
    from_plaintext_str(&source, &path.display().to_string())
}

fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).context(format!(
        "Failed to read gold standard file {}",
        path.display()
    ))
}

/// `Some(None)` for an empty field, `None` for an unrecognized value
fn parse_relevance(field: &str) -> Option<Option<bool>> {
    match field.trim().to_ascii_lowercase().as_str() {
        "" => Some(None),
        "true" | "1" | "yes" => Some(Some(true)),
        "false" | "0" | "no" => Some(Some(false)),
        _ => None,
    }
}

fn non_empty(field: &str) -> Option<String> {
    (!field.is_empty()).then(|| field.to_string())
}

fn log_loaded(gold_standard: &GoldStandard, label: &str) {
    info!(
        source = label,
        queries = gold_standard.queries().len(),
        documents = gold_standard.documents().len(),
        judgements = gold_standard.judgements().len(),
        users = gold_standard.users().len(),
        "Loaded gold standard"
    );
}
