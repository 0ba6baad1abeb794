//! Vocabulary documents as returned by the registry.

use crate::labels::{Field, Labels};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The `type` value that marks a graph node as a concept.
pub const SKOS_CONCEPT: &str = "skos:Concept";

/// Raw JSON-LD object for one registry URI.
///
/// Stored on disk verbatim; only the top-level `graph` array is interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VocabDocument(Value);

impl VocabDocument {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// A document with no graph.
    pub fn empty() -> Self {
        Self(Value::Object(Map::new()))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// The graph nodes, or an empty slice when `graph` is missing or not a list.
    pub fn graph(&self) -> &[Value] {
        self.0
            .get("graph")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn nodes(&self) -> impl Iterator<Item = ConceptNode<'_>> {
        self.graph().iter().map(ConceptNode::new)
    }

    /// The graph node whose `uri` equals `uri`.
    pub fn find_node(&self, uri: &str) -> Option<ConceptNode<'_>> {
        self.nodes().find(|node| node.uri() == Some(uri))
    }
}

impl From<Value> for VocabDocument {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Borrowed view of one graph node.
#[derive(Debug, Clone, Copy)]
pub struct ConceptNode<'a> {
    value: &'a Value,
}

impl<'a> ConceptNode<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self { value }
    }

    pub fn as_value(&self) -> &'a Value {
        self.value
    }

    pub fn uri(&self) -> Option<&'a str> {
        self.value.get("uri").and_then(Value::as_str)
    }

    /// True when `type` is `skos:Concept` or a list containing it.
    pub fn is_concept(&self) -> bool {
        is_concept_type(self.value.get("type"))
    }

    pub fn labels(&self, field: Field) -> Labels {
        Labels::of(self.value, field)
    }

    /// Preferred label, using the first entry of a list.
    pub fn pref_label(&self) -> Option<String> {
        self.labels(Field::PrefLabel).first_value().map(str::to_string)
    }

    /// Alternate label, using the last entry of a list.
    pub fn alt_label(&self) -> Option<String> {
        self.labels(Field::AltLabel).last_value().map(str::to_string)
    }
}

fn is_concept_type(value: Option<&Value>) -> bool {
    match value {
        Some(Value::String(s)) => s == SKOS_CONCEPT,
        Some(Value::Array(items)) => items.iter().any(|t| t.as_str() == Some(SKOS_CONCEPT)),
        _ => false,
    }
}
