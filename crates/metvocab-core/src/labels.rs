//! Decoding of JSON-LD label and link fields.
//!
//! The registry encodes `prefLabel`, `altLabel`, `exactMatch`, `skos:member`
//! and friends in three shapes: a bare string, a single object with `value`
//! and/or `uri`, or a list of such objects. [`FieldShape`] names the shape and
//! [`Labels`] is the uniform decoded form that index and search code works on.

use serde_json::{Map, Value};

/// Node fields that carry labels or links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    PrefLabel,
    AltLabel,
    ExactMatch,
    SeeAlso,
    Member,
}

impl Field {
    /// Keys to try, in order. The registry emits either form depending on
    /// the JSON-LD context in use.
    pub fn keys(&self) -> &'static [&'static str] {
        match self {
            Field::PrefLabel => &["prefLabel", "skos:prefLabel"],
            Field::AltLabel => &["altLabel", "skos:altLabel"],
            Field::ExactMatch => &["exactMatch", "skos:exactMatch"],
            Field::SeeAlso => &["rdfs:seeAlso", "seeAlso"],
            Field::Member => &["skos:member", "member"],
        }
    }

    /// Look the field up on a node. Non-object nodes have no fields.
    pub fn lookup<'a>(&self, node: &'a Value) -> Option<&'a Value> {
        let map = node.as_object()?;
        self.keys().iter().find_map(|key| map.get(*key))
    }
}

/// The raw shape of a field value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldShape<'a> {
    Text(&'a str),
    Object(&'a Map<String, Value>),
    /// A list whose elements are all objects. May be empty.
    List(&'a [Value]),
    /// Missing, null, numeric, or a list holding non-objects.
    Absent,
}

impl<'a> FieldShape<'a> {
    pub fn of(value: Option<&'a Value>) -> Self {
        match value {
            Some(Value::String(s)) => FieldShape::Text(s),
            Some(Value::Object(map)) => FieldShape::Object(map),
            Some(Value::Array(items)) if items.iter().all(Value::is_object) => {
                FieldShape::List(items)
            }
            _ => FieldShape::Absent,
        }
    }

    pub fn decode(self) -> Labels {
        let entries = match self {
            FieldShape::Text(s) => vec![LabelEntry {
                value: Some(s.to_string()),
                uri: Some(s.to_string()),
            }],
            FieldShape::Object(map) => vec![LabelEntry::from_object(map)],
            FieldShape::List(items) => items
                .iter()
                .filter_map(Value::as_object)
                .map(LabelEntry::from_object)
                .collect(),
            FieldShape::Absent => Vec::new(),
        };
        Labels { entries }
    }
}

/// One decoded `(value, uri)` pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelEntry {
    pub value: Option<String>,
    pub uri: Option<String>,
}

impl LabelEntry {
    fn from_object(map: &Map<String, Value>) -> Self {
        let text = |key: &str| map.get(key).and_then(Value::as_str).map(str::to_string);
        Self {
            value: text("value"),
            uri: text("uri"),
        }
    }
}

/// Decoded field value, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Labels {
    entries: Vec<LabelEntry>,
}

impl Labels {
    /// Decode `field` on `node`.
    pub fn of(node: &Value, field: Field) -> Self {
        FieldShape::of(field.lookup(node)).decode()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[LabelEntry] {
        &self.entries
    }

    /// Value of the first entry. This is the `prefLabel` rule.
    pub fn first_value(&self) -> Option<&str> {
        self.entries.first().and_then(|e| e.value.as_deref())
    }

    /// Value of the last entry. This is the `altLabel` rule.
    // NOTE: asymmetric with first_value on multi-valued fields and likely a
    // latent defect. Stored records already carry the last altLabel.
    pub fn last_value(&self) -> Option<&str> {
        self.entries.last().and_then(|e| e.value.as_deref())
    }

    /// URI of the first entry, or an empty string.
    pub fn first_uri(&self) -> &str {
        self.entries
            .first()
            .and_then(|e| e.uri.as_deref())
            .unwrap_or("")
    }

    /// Every URI present, in order.
    pub fn uris(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter_map(|e| e.uri.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_shape_detection() {
        let text = json!("value");
        let object = json!({"value": "inner"});
        let list = json!([{"value": "a"}]);
        let mixed = json!(["hello"]);
        let number = json!(123);

        assert_eq!(FieldShape::of(Some(&text)), FieldShape::Text("value"));
        assert!(matches!(FieldShape::of(Some(&object)), FieldShape::Object(_)));
        assert!(matches!(FieldShape::of(Some(&list)), FieldShape::List(_)));
        assert_eq!(FieldShape::of(Some(&mixed)), FieldShape::Absent);
        assert_eq!(FieldShape::of(Some(&number)), FieldShape::Absent);
        assert_eq!(FieldShape::of(None), FieldShape::Absent);
    }

    #[test]
    fn test_plain_string() {
        let node = json!({"prefLabel": "value"});
        let labels = Labels::of(&node, Field::PrefLabel);
        assert_eq!(labels.first_value(), Some("value"));
        assert_eq!(labels.last_value(), Some("value"));
        assert_eq!(labels.first_uri(), "value");
    }

    #[test]
    fn test_single_object() {
        let node = json!({"altLabel": {"lang": "en", "value": "inner_value"}});
        let labels = Labels::of(&node, Field::AltLabel);
        assert_eq!(labels.first_value(), Some("inner_value"));
        assert_eq!(labels.first_uri(), "");

        let node = json!({"exactMatch": {"uri": "https://vocab.met.no"}});
        assert_eq!(Labels::of(&node, Field::ExactMatch).first_uri(), "https://vocab.met.no");
    }

    #[test]
    fn test_list_first_and_last() {
        let node = json!({
            "prefLabel": [{"value": "A"}, {"value": "B"}],
            "altLabel": [{"value": "A"}, {"value": "B"}],
        });
        assert_eq!(Labels::of(&node, Field::PrefLabel).first_value(), Some("A"));
        assert_eq!(Labels::of(&node, Field::AltLabel).last_value(), Some("B"));
    }

    #[test]
    fn test_list_resource_uses_first_uri() {
        let node = json!({"exactMatch": [{"uri": "https://vocab.met.no"}, {"uri": "wmo.com"}]});
        let labels = Labels::of(&node, Field::ExactMatch);
        assert_eq!(labels.first_uri(), "https://vocab.met.no");
        assert_eq!(labels.uris().collect::<Vec<_>>(), vec!["https://vocab.met.no", "wmo.com"]);
    }

    #[test]
    fn test_absent_shapes() {
        for node in [
            json!({"prefLabel": []}),
            json!({"prefLabel": 123}),
            json!({"prefLabel": ["hello"]}),
            json!({"other": "x"}),
            json!("NotADict"),
        ] {
            let labels = Labels::of(&node, Field::PrefLabel);
            assert!(labels.is_empty(), "expected no labels for {node}");
            assert_eq!(labels.first_value(), None);
            assert_eq!(labels.first_uri(), "");
        }
    }

    #[test]
    fn test_prefixed_keys() {
        let node = json!({"skos:prefLabel": {"value": "MODIS"}, "seeAlso": "https://example.org"});
        assert_eq!(Labels::of(&node, Field::PrefLabel).first_value(), Some("MODIS"));
        assert_eq!(Labels::of(&node, Field::SeeAlso).first_uri(), "https://example.org");
    }
}
