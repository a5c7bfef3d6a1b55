//! Relevance judgements and the annotators who make them

use crate::identity::{Document, Query};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Tri-state relevance flag carried by an incoming judgement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relevance {
    Relevant,
    Nonrelevant,
    #[default]
    Unspecified,
}

impl Relevance {
    /// Returns the relevance as a vote, or `None` when unspecified
    pub fn as_vote(self) -> Option<bool> {
        match self {
            Self::Relevant => Some(true),
            Self::Nonrelevant => Some(false),
            Self::Unspecified => None,
        }
    }
}

impl From<Option<bool>> for Relevance {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => Self::Relevant,
            Some(false) => Self::Nonrelevant,
            None => Self::Unspecified,
        }
    }
}

impl From<bool> for Relevance {
    fn from(value: bool) -> Self {
        Some(value).into()
    }
}

/// Composite key identifying the (document, query) pair a judgement is about
///
/// Two judgements with the same key are duplicates regardless of relevance or user.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JudgementKey {
    pub document: Document,
    pub query: Query,
}

impl JudgementKey {
    pub fn new(document_id: &str, query: &str) -> Self {
        Self {
            document: Document::new(document_id),
            query: Query::new(query),
        }
    }
}

/// One relevance assertion for a document/query pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Judgement {
    pub document: Document,
    pub query: Query,
    pub relevance: Relevance,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl Judgement {
    pub fn key(&self) -> JudgementKey {
        JudgementKey {
            document: self.document.clone(),
            query: self.query.clone(),
        }
    }

    /// True when both judgements are about the same document/query pair
    pub fn same_pair(&self, other: &Judgement) -> bool {
        self.document == other.document && self.query == other.query
    }

    pub fn is_relevant(&self) -> bool {
        self.relevance == Relevance::Relevant
    }
}

/// Plain-data judgement record as produced by loaders
///
/// `document` and `query` are optional so that incomplete records can be
/// rejected with a proper error instead of at deserialization time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JudgementTriple {
    #[serde(default)]
    pub document: Option<String>,
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub relevant: Option<bool>,
    #[serde(default)]
    pub user: Option<String>,
}

impl JudgementTriple {
    pub fn new(
        document: impl Into<String>,
        query: impl Into<String>,
        relevant: impl Into<Option<bool>>,
    ) -> Self {
        Self {
            document: Some(document.into()),
            query: Some(query.into()),
            relevant: relevant.into(),
            user: None,
        }
    }

    /// Attribute the judgement to an annotator
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }
}

/// An annotator and the judgements they authored, one per document/query pair
#[derive(Debug, Clone)]
pub struct User {
    id: String,
    judgements: Vec<Judgement>,
    by_pair: HashMap<JudgementKey, usize>,
}

impl User {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            judgements: Vec::new(),
            by_pair: HashMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Judgements in the order they were first recorded
    pub fn judgements(&self) -> &[Judgement] {
        &self.judgements
    }

    /// Records a judgement unless one already exists for the same pair
    ///
    /// Returns whether the judgement was added.
    pub fn add_judgement(&mut self, judgement: Judgement) -> bool {
        let key = judgement.key();
        if self.by_pair.contains_key(&key) {
            return false;
        }
        self.by_pair.insert(key, self.judgements.len());
        self.judgements.push(judgement);
        true
    }

    /// Looks up this user's judgement for a document/query pair
    pub fn judgement_for(&self, key: &JudgementKey) -> Option<&Judgement> {
        self.by_pair.get(key).map(|&idx| &self.judgements[idx])
    }
}
