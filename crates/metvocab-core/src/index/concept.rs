//! Membership index over the concepts of a single vocabulary document.

use crate::cache::DiskCache;
use crate::document::VocabDocument;
use crate::error::{Result, VocabError};
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

/// Set of valid `prefLabel` values for one vocabulary, e.g. every allowed
/// `Access_Constraint`.
///
/// Empty until [`init_vocab`](Self::init_vocab) succeeds. An empty index is
/// "uninitialised" and answers `false` to every query.
pub struct ConceptIndex {
    cache: Arc<DiskCache>,
    voc_id: String,
    uri: String,
    concept_values: HashSet<String>,
}

impl ConceptIndex {
    pub fn new(cache: Arc<DiskCache>, voc_id: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            cache,
            voc_id: voc_id.into(),
            uri: uri.into(),
            concept_values: HashSet::new(),
        }
    }

    pub fn voc_id(&self) -> &str {
        &self.voc_id
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Load the vocabulary document through the cache and rebuild the index.
    ///
    /// A document that cannot be retrieved leaves the index empty.
    pub async fn init_vocab(&mut self) -> Result<()> {
        match self.cache.get(&self.voc_id, &self.uri).await? {
            Some(document) => self.load_document(&document),
            None => {
                warn!("Vocabulary {} is unavailable", self.uri);
                self.concept_values.clear();
            }
        }
        Ok(())
    }

    /// Replace the index contents with the concepts in `document`.
    pub fn load_document(&mut self, document: &VocabDocument) {
        self.concept_values = Self::build_index(document);
        debug!(
            "Indexed {} concept values from {}",
            self.concept_values.len(),
            self.uri
        );
    }

    /// Collect the non-empty `prefLabel` of every `skos:Concept` node.
    pub fn build_index(document: &VocabDocument) -> HashSet<String> {
        document
            .nodes()
            .filter(|node| node.is_concept())
            .filter_map(|node| node.pref_label())
            .filter(|label| !label.is_empty())
            .collect()
    }

    pub fn is_initialised(&self) -> bool {
        !self.concept_values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.concept_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concept_values.is_empty()
    }

    pub fn concept_values(&self) -> impl Iterator<Item = &str> {
        self.concept_values.iter().map(String::as_str)
    }

    /// Exact, case-sensitive membership check.
    pub fn check_concept_value(&self, value: &str) -> bool {
        self.concept_values.contains(value)
    }

    /// Membership check for dynamically typed input, e.g. a field read from
    /// a metadata document. Fails with `InvalidValue` unless `value` is a
    /// JSON string.
    pub fn check_concept_json(&self, value: &Value) -> Result<bool> {
        match value {
            Value::String(s) => Ok(self.check_concept_value(s)),
            other => Err(VocabError::InvalidValue {
                expected: "string".to_string(),
                actual: json_type_name(other).to_string(),
            }),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
