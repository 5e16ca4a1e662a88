use crate::document::Document;
use crate::error::EngineError;
use crate::index::IndexSnapshot;
use crate::query;
use crate::source::SourceRecord;
use crate::tokenizer::LexicalFilter;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Owns the document collection and the derived retrieval structures.
///
/// Every mutation ends with a full rebuild that swaps in a fresh
/// `IndexSnapshot`, so vocabulary, inverted index and weight matrix always
/// describe the current collection, never a partially updated one. Rebuilding
/// everything per mutation is the documented tradeoff for small collections.
pub struct RetrievalEngine {
    docs: HashMap<String, Document>,
    filter: LexicalFilter,
    source: Vec<SourceRecord>,
    cursor: usize,
    snapshot: Arc<IndexSnapshot>,
    rebuilds: u64,
}

impl RetrievalEngine {
    pub fn new(filter: LexicalFilter) -> Self {
        Self {
            docs: HashMap::new(),
            filter,
            source: Vec::new(),
            cursor: 0,
            snapshot: Arc::new(IndexSnapshot::empty()),
            rebuilds: 0,
        }
    }

    /// Install the ordered document source consumed by the ingestion cursor.
    /// Resets the cursor to the start.
    pub fn set_source(&mut self, records: Vec<SourceRecord>) {
        self.source = records;
        self.cursor = 0;
    }

    /// Add (or replace) one document and rebuild.
    pub fn add_document(&mut self, id: &str, content: &str) -> Result<(), EngineError> {
        self.store_document(id, content)?;
        self.rebuild_now();
        Ok(())
    }

    /// Consume exactly one record from the source, advancing the cursor.
    ///
    /// Returns the added document's id, or `Ok(None)` once the source is
    /// exhausted. Each successful call triggers its own rebuild, so N calls
    /// cost N rebuilds; `add_all_from_source` is the batch alternative.
    pub fn add_next_from_source(&mut self) -> Result<Option<String>, EngineError> {
        let Some(record) = self.source.get(self.cursor).cloned() else {
            tracing::warn!("document source exhausted; nothing left to add");
            return Ok(None);
        };
        // The cursor advances even when the record turns out invalid: one
        // record is consumed per call.
        self.cursor += 1;

        self.store_document(&record.name, &record.content)?;
        self.rebuild_now();
        Ok(Some(record.name))
    }

    /// Add every well-formed record from the list, then rebuild exactly once
    /// for the whole batch. Returns the number of documents added.
    pub fn add_all_from_source(&mut self, records: &[SourceRecord]) -> usize {
        let mut added = 0;
        for record in records {
            match self.store_document(&record.name, &record.content) {
                Ok(()) => added += 1,
                Err(e) => tracing::warn!(id = %record.name, "skipping source record: {e}"),
            }
        }
        self.rebuild_now();
        added
    }

    /// Remove a document by id and rebuild.
    pub fn remove_document(&mut self, id: &str) -> Result<(), EngineError> {
        if self.docs.remove(id).is_none() {
            return Err(EngineError::DocumentNotFound(id.to_string()));
        }
        self.rebuild_now();
        Ok(())
    }

    pub fn get_content(&self, id: &str) -> Option<&str> {
        self.docs.get(id).map(|doc| doc.content.as_str())
    }

    /// Document ids, sorted lexicographically.
    pub fn list_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.docs.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// The latest derived structures. The returned snapshot is immutable;
    /// mutations swap in a new one rather than patching it.
    pub fn snapshot(&self) -> Arc<IndexSnapshot> {
        Arc::clone(&self.snapshot)
    }

    /// Number of full rebuilds performed so far.
    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds
    }

    /// Evaluate a boolean query against the current snapshot.
    pub fn boolean_query(&self, raw: &str) -> Result<HashSet<String>, EngineError> {
        if self.docs.is_empty() {
            return Err(EngineError::EmptyCollection);
        }
        query::evaluate(raw, &self.snapshot, &self.filter)
    }

    fn store_document(&mut self, id: &str, content: &str) -> Result<(), EngineError> {
        if id.is_empty() || content.is_empty() {
            return Err(EngineError::InvalidDocument);
        }

        let mut doc = Document::new(id.to_string(), content.to_string());
        doc.tokens = self.filter.analyze(&doc.content);
        self.docs.insert(doc.id.clone(), doc);
        Ok(())
    }

    /// Recompute every document's token sequence and swap in a freshly
    /// derived snapshot.
    fn rebuild_now(&mut self) {
        for doc in self.docs.values_mut() {
            doc.tokens = self.filter.analyze(&doc.content);
        }
        self.snapshot = Arc::new(IndexSnapshot::rebuild(&self.docs));
        self.rebuilds += 1;
        tracing::debug!(
            documents = self.docs.len(),
            terms = self.snapshot.vocabulary.len(),
            "rebuilt derived structures"
        );
    }
}

impl Default for RetrievalEngine {
    fn default() -> Self {
        Self::new(LexicalFilter::portuguese())
    }
}
