//! Query result loaders
//!
//! A result set file lists one entry per query:
//!
//! ```yaml
//! - query: my query
//!   ranked: true
//!   documents:
//!   - id: doc1
//!     score: 0.9
//!   - id: doc2
//! ```
//!
//! A document list file holds the documents of a single result:
//!
//! ```yaml
//! - document: doc1
//!   score: 0.9
//! ```

use crate::scalar::{identifier, Scalar};
use ireval_core::{
    Error, GoldStandard, QueryResult, QueryResultSet, ResultDocumentRecord, ResultExt, ResultKind,
    Result,
};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

#[derive(Debug, Deserialize)]
struct ResultEntry {
    #[serde(default)]
    query: Option<Scalar>,
    #[serde(default)]
    ranked: bool,
    #[serde(default)]
    documents: Vec<DocumentEntry>,
}

#[derive(Debug, Deserialize)]
struct DocumentEntry {
    #[serde(default)]
    document: Option<Scalar>,
    #[serde(default)]
    id: Option<Scalar>,
    #[serde(default)]
    score: Option<f64>,
}

impl From<DocumentEntry> for ResultDocumentRecord {
    fn from(entry: DocumentEntry) -> Self {
        Self {
            document: identifier(entry.document),
            id: identifier(entry.id),
            score: entry.score,
        }
    }
}

/// Parses a YAML result set against a gold standard
///
/// Entries without `ranked` are unranked.
pub fn from_yaml_str<'a>(
    source: &str,
    label: &str,
    gold_standard: &'a GoldStandard,
) -> Result<QueryResultSet<'a>> {
    let entries: Vec<ResultEntry> = serde_yaml::from_str(source)
        .map_err(|e| Error::parse(label, format!("Invalid result set YAML: {e}")))?;

    let mut set = QueryResultSet::new(gold_standard);
    for (idx, entry) in entries.into_iter().enumerate() {
        let query = identifier(entry.query).ok_or_else(|| {
            Error::invalid_input(format!(
                "Result entry {} in {label} has no query",
                idx + 1
            ))
        })?;
        let kind = if entry.ranked {
            ResultKind::Ranked
        } else {
            ResultKind::Unranked
        };

        let mut result = QueryResult::new(query, kind, gold_standard);
        for doc in entry.documents {
            result.add_document_record(doc.into())?;
        }
        set.add_result(result)?;
    }

    info!(
        source = label,
        results = set.len(),
        ranked = set.results().iter().filter(|r| r.is_ranked()).count(),
        "Loaded query results"
    );
    Ok(set)
}

/// Parses a YAML document list and appends it to `result`
///
/// Returns the number of documents added.
pub fn documents_from_yaml_str(
    source: &str,
    label: &str,
    result: &mut QueryResult<'_>,
) -> Result<usize> {
    let entries: Vec<DocumentEntry> = serde_yaml::from_str(source)
        .map_err(|e| Error::parse(label, format!("Invalid document list YAML: {e}")))?;

    let count = entries.len();
    for entry in entries {
        result.add_document_record(entry.into())?;
    }
    Ok(count)
}

/// Reads and parses a YAML result set file
pub fn load_yaml_file<'a>(path: &Path, gold_standard: &'a GoldStandard) -> Result<QueryResultSet<'a>> {
    let source = std::fs::read_to_string(path).context(format!(
        "Failed to read query result file {}",
        path.display()
    ))?;
    from_yaml_str(&source, &path.display().to_string(), gold_standard)
}

/// Reads a YAML document list file into `result`
pub fn load_documents_file(path: &Path, result: &mut QueryResult<'_>) -> Result<usize> {
    let source = std::fs::read_to_string(path).context(format!(
        "Failed to read document list file {}",
        path.display()
    ))?;
    documents_from_yaml_str(&source, &path.display().to_string(), result)
}
