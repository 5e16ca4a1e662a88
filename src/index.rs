use crate::document::Document;
use std::collections::{HashMap, HashSet};

/// Term-weighting tables derived from the current collection.
///
/// All three tables are keyed per term; `tf` and `tfidf` hold one entry per
/// (term, document) pair, zeros included, so the matrix shape is always
/// |vocabulary| x |documents|.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightMatrix {
    pub tf: HashMap<String, HashMap<String, f64>>,
    pub idf: HashMap<String, f64>,
    pub tfidf: HashMap<String, HashMap<String, f64>>,
}

/// Immutable derived view of one collection state: vocabulary, inverted
/// index and weight matrix, all produced by the same rebuild.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexSnapshot {
    /// Distinct terms, sorted lexicographically to fix row ordering.
    pub vocabulary: Vec<String>,
    /// Term -> ids of documents containing it at least once.
    pub postings: HashMap<String, HashSet<String>>,
    pub weights: WeightMatrix,
}

impl IndexSnapshot {
    /// The explicit empty state used while the collection holds no documents.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Full recomputation from the collection. Never incremental: every call
    /// derives vocabulary, postings and weights from scratch, so the three
    /// structures always describe the same collection state.
    pub fn rebuild(docs: &HashMap<String, Document>) -> Self {
        if docs.is_empty() {
            return Self::empty();
        }

        // Raw counts per term, per document.
        let mut counts: HashMap<&str, HashMap<&str, usize>> = HashMap::new();
        for doc in docs.values() {
            for token in &doc.tokens {
                *counts
                    .entry(token)
                    .or_default()
                    .entry(doc.id.as_str())
                    .or_insert(0) += 1;
            }
        }

        let mut vocabulary: Vec<String> = counts.keys().map(|t| t.to_string()).collect();
        vocabulary.sort();

        let total_docs = docs.len() as f64;
        let mut postings = HashMap::new();
        let mut weights = WeightMatrix::default();

        for term in &vocabulary {
            let term_counts = &counts[term.as_str()];

            // Every vocabulary term occurs in at least one document, so the
            // quotient is always defined.
            let idf = (total_docs / term_counts.len() as f64).log2();
            weights.idf.insert(term.clone(), idf);

            let mut tf_row = HashMap::new();
            let mut tfidf_row = HashMap::new();
            for doc_id in docs.keys() {
                let count = term_counts.get(doc_id.as_str()).copied().unwrap_or(0);
                let tf = if count > 0 {
                    1.0 + (count as f64).log2()
                } else {
                    0.0
                };
                tf_row.insert(doc_id.clone(), tf);
                tfidf_row.insert(doc_id.clone(), tf * idf);
            }
            weights.tf.insert(term.clone(), tf_row);
            weights.tfidf.insert(term.clone(), tfidf_row);

            let docs_with_term: HashSet<String> =
                term_counts.keys().map(|id| id.to_string()).collect();
            postings.insert(term.clone(), docs_with_term);
        }

        Self {
            vocabulary,
            postings,
            weights,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }

    /// Postings for a term; empty set if the term is not indexed.
    pub fn postings_for(&self, term: &str) -> HashSet<String> {
        self.postings.get(term).cloned().unwrap_or_default()
    }

    /// Number of documents containing the term.
    pub fn doc_frequency(&self, term: &str) -> usize {
        self.postings.get(term).map(|docs| docs.len()).unwrap_or(0)
    }

    /// Document ids covered by this snapshot, sorted for display. Every TF
    /// row spans the same documents, so any row gives the column set.
    pub fn doc_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .weights
            .tf
            .values()
            .next()
            .map(|row| row.keys().cloned().collect())
            .unwrap_or_default();
        ids.sort();
        ids
    }
}
