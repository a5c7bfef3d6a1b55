//! The gold standard: human relevance judgements and their consensus
//!
//! Judgements are indexed by their (document, query) pair. Every pair keeps a
//! running tally of relevant/nonrelevant votes, so consensus lookups are
//! constant time instead of a scan over all judgements.
//!
//! Query results borrow the gold standard immutably, which means the borrow
//! checker rules out adding judgements once evaluation has started.

use crate::error::{Error, Result};
use crate::identity::{Document, Query};
use crate::judgement::{Judgement, JudgementKey, JudgementTriple, Relevance, User};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

/// Relevant/nonrelevant vote counts for one document/query pair
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Votes {
    relevant: usize,
    nonrelevant: usize,
}

impl Votes {
    fn record(&mut self, relevant: bool) {
        if relevant {
            self.relevant += 1;
        } else {
            self.nonrelevant += 1;
        }
    }

    /// Majority vote, ties resolve to relevant
    fn consensus(&self) -> bool {
        self.relevant >= self.nonrelevant
    }
}

/// Agreement counts between two annotators over the pairs both of them judged
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Agreement {
    both_relevant: usize,
    both_nonrelevant: usize,
    /// First annotator relevant, second nonrelevant
    first_only_relevant: usize,
    /// First annotator nonrelevant, second relevant
    second_only_relevant: usize,
}

impl Agreement {
    fn total(&self) -> usize {
        self.both_relevant + self.both_nonrelevant + self.first_only_relevant + self.second_only_relevant
    }

    /// Cohen's kappa with pooled marginals, or `None` if nothing overlaps
    fn kappa(&self) -> Option<f64> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        let total = total as f64;

        let p_agreed = (self.both_relevant + self.both_nonrelevant) as f64 / total;
        let p_nonrelevant = (self.second_only_relevant
            + self.both_nonrelevant * 2
            + self.first_only_relevant) as f64
            / (total * 2.0);
        let p_relevant = 1.0 - p_nonrelevant;
        let p_chance = p_nonrelevant.powi(2) + p_relevant.powi(2);

        if p_agreed == p_chance {
            return Some(0.0);
        }
        Some((p_agreed - p_chance) / (1.0 - p_chance))
    }
}

/// Reference set of relevance judgements for a collection of queries
#[derive(Debug, Default)]
pub struct GoldStandard {
    documents: Vec<Document>,
    document_index: HashSet<Document>,
    queries: Vec<Query>,
    query_index: HashSet<Query>,
    judgements: Vec<Judgement>,
    votes: HashMap<JudgementKey, Votes>,
    users: Vec<User>,
    user_index: HashMap<String, usize>,
}

impl GoldStandard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a gold standard from judgement triples, stopping at the first invalid one
    pub fn from_triples<I>(triples: I) -> Result<Self>
    where
        I: IntoIterator<Item = JudgementTriple>,
    {
        let mut standard = Self::new();
        for triple in triples {
            standard.add_judgement(triple)?;
        }
        Ok(standard)
    }

    /// Adds one judgement
    ///
    /// A triple without relevance only registers its document and query as
    /// known. Otherwise the judgement is recorded globally (one record per
    /// call, even for repeated pairs) and in the user's list, where only the
    /// first judgement per document/query pair is kept.
    pub fn add_judgement(&mut self, triple: JudgementTriple) -> Result<()> {
        let JudgementTriple {
            document,
            query,
            relevant,
            user,
        } = triple;

        let (Some(document_id), Some(query_string)) = (document, query) else {
            return Err(Error::invalid_input(
                "A judgement needs at least a document and a query",
            ));
        };

        let document = Document::new(document_id);
        let query = Query::new(query_string);

        let relevance = Relevance::from(relevant);
        let Some(vote) = relevance.as_vote() else {
            self.register_document(document);
            self.register_query(query);
            return Ok(());
        };

        let judgement = Judgement {
            document: document.clone(),
            query: query.clone(),
            relevance,
            user,
        };

        if let Some(user_id) = judgement.user.as_deref() {
            let idx = self.user_slot(user_id);
            if !self.users[idx].add_judgement(judgement.clone()) {
                debug!(
                    user = user_id,
                    document = %judgement.document,
                    query = %judgement.query,
                    "User already judged this pair, keeping the first judgement"
                );
            }
        }

        self.votes.entry(judgement.key()).or_default().record(vote);
        self.register_document(document);
        self.register_query(query);
        self.judgements.push(judgement);
        Ok(())
    }

    fn register_document(&mut self, document: Document) {
        if self.document_index.insert(document.clone()) {
            self.documents.push(document);
        }
    }

    fn register_query(&mut self, query: Query) {
        if self.query_index.insert(query.clone()) {
            self.queries.push(query);
        }
    }

    fn user_slot(&mut self, user_id: &str) -> usize {
        if let Some(&idx) = self.user_index.get(user_id) {
            return idx;
        }
        let idx = self.users.len();
        self.users.push(User::new(user_id));
        self.user_index.insert(user_id.to_string(), idx);
        idx
    }

    /// Consensus relevance of a document for a query
    ///
    /// Majority vote over every judgement recorded for the pair. Ties count as
    /// relevant, and a pair nobody voted on is not relevant.
    pub fn relevant(&self, document_id: &str, query: &str) -> bool {
        self.votes
            .get(&JudgementKey::new(document_id, query))
            .is_some_and(Votes::consensus)
    }

    /// True if at least one relevance vote exists for the pair
    pub fn contains_judgement(&self, document_id: &str, query: &str) -> bool {
        self.votes.contains_key(&JudgementKey::new(document_id, query))
    }

    pub fn contains_document(&self, document_id: &str) -> bool {
        self.document_index.contains(&Document::new(document_id))
    }

    pub fn contains_query(&self, query: &str) -> bool {
        self.query_index.contains(&Query::new(query))
    }

    pub fn contains_user(&self, user_id: &str) -> bool {
        self.user_index.contains_key(user_id)
    }

    pub fn user(&self, user_id: &str) -> Option<&User> {
        self.user_index.get(user_id).map(|&idx| &self.users[idx])
    }

    /// Known documents, in first-seen order
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Known queries, in first-seen order
    pub fn queries(&self) -> &[Query] {
        &self.queries
    }

    /// Every recorded judgement, including repeated pairs
    pub fn judgements(&self) -> &[Judgement] {
        &self.judgements
    }

    /// Annotators, in first-seen order
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Number of known documents whose consensus is relevant for the query
    pub fn relevant_document_count(&self, query: &str) -> usize {
        self.documents
            .iter()
            .filter(|doc| self.relevant(doc.id(), query))
            .count()
    }

    /// Average pairwise Cohen's kappa across all pairs of distinct annotators
    ///
    /// Pairs of annotators without a single commonly judged document/query
    /// pair are skipped. Fails with `UndefinedMetric` when no pair contributes.
    pub fn kappa(&self) -> Result<f64> {
        let mut sum = 0.0;
        let mut count = 0usize;

        for (i, first) in self.users.iter().enumerate() {
            for second in &self.users[i + 1..] {
                if let Some(kappa) = Self::pairwise_agreement(first, second).kappa() {
                    debug!(
                        first = first.id(),
                        second = second.id(),
                        kappa,
                        "Pairwise kappa"
                    );
                    sum += kappa;
                    count += 1;
                }
            }
        }

        if count == 0 {
            return Err(Error::undefined_metric(
                "kappa needs at least two users with a commonly judged document/query pair",
            ));
        }

        let kappa = sum / count as f64;
        info!(pairs = count, kappa, "Average pairwise kappa");
        Ok(kappa)
    }

    /// Tallies agreement over the pairs judged by both users
    ///
    /// The second user's judgement is looked up by document/query identity,
    /// so the two users' insertion orders never need to line up.
    fn pairwise_agreement(first: &User, second: &User) -> Agreement {
        let mut agreement = Agreement::default();
        for judgement in first.judgements() {
            let Some(other) = second.judgement_for(&judgement.key()) else {
                continue;
            };
            match (judgement.is_relevant(), other.is_relevant()) {
                (true, true) => agreement.both_relevant += 1,
                (false, false) => agreement.both_nonrelevant += 1,
                (true, false) => agreement.first_only_relevant += 1,
                (false, true) => agreement.second_only_relevant += 1,
            }
        }
        agreement
    }
}
