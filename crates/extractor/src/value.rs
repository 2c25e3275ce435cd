// crates/extractor/src/value.rs
//! Extracted value and record types

use crate::attributes::AttributeItem;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;

/// A single extracted field value
///
/// Serialized untagged, so the JSON form is the natural shape of the
/// value (`true`, `3723`, `"text"`, `{"url": ...}`, ...).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Explicitly empty (as opposed to absent)
    Null,
    Bool(bool),
    Integer(u64),
    Number(f64),
    Text(String),
    List(Vec<String>),
    Enclosure(Enclosure),
    Owner(Owner),
    Items(Vec<AttributeItem>),
    ValueBlocks(Vec<ValueBlock>),
    /// An untouched fragment of the document tree
    Raw(Value),
}

impl FieldValue {
    /// Converts a document fragment, mapping scalars onto typed variants
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(b),
            Value::String(s) => FieldValue::Text(s),
            Value::Number(n) => match n.as_u64() {
                Some(int) => FieldValue::Integer(int),
                None => n.as_f64().map_or(FieldValue::Null, FieldValue::Number),
            },
            other => FieldValue::Raw(other),
        }
    }

    /// Returns the text of this value, looking through single-element
    /// sequences and `_` text nodes left behind by the XML conversion
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s.as_str()),
            FieldValue::Raw(value) => node_text(value),
            _ => None,
        }
    }

    /// Returns the value as a number, parsing text when needed
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(int) => Some(*int as f64),
            FieldValue::Number(n) => Some(*n),
            _ => self.as_text().and_then(|s| s.trim().parse::<f64>().ok()),
        }
        .filter(|n| n.is_finite())
    }

    /// Returns true for [`FieldValue::Null`]
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

/// Text content of a tree node: a string, the `_` of an element, or the
/// same for the first element of a sequence
pub(crate) fn node_text(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) => Some(s.as_str()),
        Value::Array(items) => items.first().and_then(node_text),
        Value::Object(map) => map.get("_").and_then(Value::as_str),
        _ => None,
    }
}

/// Media enclosure attached to an episode
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Enclosure {
    /// Size of the media file in bytes, as given by the feed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<String>,
    /// MIME type (e.g., "audio/mpeg")
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// URL to the media file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Enclosure {
    /// Returns true if this is an audio enclosure
    pub fn is_audio(&self) -> bool {
        self.mime_type
            .as_ref()
            .is_some_and(|mime| mime.starts_with("audio/"))
    }

    /// Returns true if this is a video enclosure
    pub fn is_video(&self) -> bool {
        self.mime_type
            .as_ref()
            .is_some_and(|mime| mime.starts_with("video/"))
    }

    /// Length parsed as a byte count
    pub fn length_bytes(&self) -> Option<u64> {
        self.length.as_deref().and_then(|l| l.trim().parse().ok())
    }
}

/// Podcast owner contact
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Owner {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// A `podcast:value` block: its own attributes plus the attribute maps of
/// every recipient inside it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValueBlock {
    #[serde(flatten)]
    pub attributes: BTreeMap<String, String>,
    pub recipients: Vec<BTreeMap<String, String>>,
}

/// An extracted record (the podcast meta or one episode)
///
/// Entries keep the order of the field list that produced them. A field
/// can be present with no value, which is distinct from not being present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    entries: Vec<(String, Option<FieldValue>)>,
}

impl Record {
    /// Creates an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field, replacing an earlier entry of the same name in place
    pub fn insert(&mut self, field: impl Into<String>, value: Option<FieldValue>) {
        let field = field.into();
        match self.entries.iter_mut().find(|(name, _)| *name == field) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((field, value)),
        }
    }

    /// Returns the value of a field, if the field is present and has one
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .and_then(|(_, value)| value.as_ref())
    }

    /// Shorthand for the text of a field
    pub fn text(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(FieldValue::as_text)
    }

    /// Returns true if the field is present, with or without a value
    pub fn contains_field(&self, field: &str) -> bool {
        self.entries.iter().any(|(name, _)| name == field)
    }

    /// Field names in insertion order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Iterates over all entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&FieldValue>)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_ref()))
    }

    /// Number of present fields
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no field is present
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let present: Vec<_> = self
            .entries
            .iter()
            .filter_map(|(name, value)| value.as_ref().map(|v| (name, v)))
            .collect();
        let mut map = serializer.serialize_map(Some(present.len()))?;
        for (name, value) in present {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_scalars() {
        assert_eq!(FieldValue::from_json(json!("a")), FieldValue::Text("a".into()));
        assert_eq!(FieldValue::from_json(json!(7)), FieldValue::Integer(7));
        assert_eq!(FieldValue::from_json(json!(1.5)), FieldValue::Number(1.5));
        assert_eq!(FieldValue::from_json(json!(null)), FieldValue::Null);
        assert!(matches!(FieldValue::from_json(json!({"a": 1})), FieldValue::Raw(_)));
    }

    #[test]
    fn test_as_text_looks_through_sequences() {
        let raw = FieldValue::Raw(json!([{"_": "inner", "$": {"a": "b"}}]));
        assert_eq!(raw.as_text(), Some("inner"));
        assert_eq!(FieldValue::Raw(json!(["plain"])).as_text(), Some("plain"));
        assert_eq!(FieldValue::Bool(true).as_text(), None);
    }

    #[test]
    fn test_as_f64() {
        assert_eq!(FieldValue::Text(" 4 ".into()).as_f64(), Some(4.0));
        assert_eq!(FieldValue::Integer(2).as_f64(), Some(2.0));
        assert_eq!(FieldValue::Text("four".into()).as_f64(), None);
        assert_eq!(FieldValue::Number(f64::NAN).as_f64(), None);
    }

    #[test]
    fn test_enclosure_media_kind() {
        let audio = Enclosure {
            mime_type: Some("audio/mpeg".into()),
            length: Some("1000".into()),
            ..Default::default()
        };
        assert!(audio.is_audio());
        assert!(!audio.is_video());
        assert_eq!(audio.length_bytes(), Some(1000));

        let video = Enclosure {
            mime_type: Some("video/mp4".into()),
            ..Default::default()
        };
        assert!(video.is_video());
        assert_eq!(video.length_bytes(), None);
    }

    #[test]
    fn test_record_insert_replaces_in_place() {
        let mut record = Record::new();
        record.insert("title", Some(FieldValue::Text("a".into())));
        record.insert("link", None);
        record.insert("title", Some(FieldValue::Text("b".into())));

        assert_eq!(record.len(), 2);
        assert_eq!(record.fields().collect::<Vec<_>>(), vec!["title", "link"]);
        assert_eq!(record.text("title"), Some("b"));
        assert!(record.contains_field("link"));
        assert!(record.get("link").is_none());
    }

    #[test]
    fn test_record_serialization_skips_absent_values() {
        let mut record = Record::new();
        record.insert("title", Some(FieldValue::Text("Show".into())));
        record.insert("summary", None);
        record.insert("value", Some(FieldValue::Null));
        record.insert(
            "enclosure",
            Some(FieldValue::Enclosure(Enclosure {
                url: Some("http://example.com/a.mp3".into()),
                mime_type: Some("audio/mpeg".into()),
                length: None,
            })),
        );

        let json = serde_json::to_value(&record).expect("serializes");
        assert_eq!(
            json,
            json!({
                "title": "Show",
                "value": null,
                "enclosure": {"type": "audio/mpeg", "url": "http://example.com/a.mp3"}
            })
        );
    }

    #[test]
    fn test_value_block_flattens_attributes() {
        let block = ValueBlock {
            attributes: BTreeMap::from([("type".to_string(), "lightning".to_string())]),
            recipients: vec![BTreeMap::from([("name".to_string(), "host".to_string())])],
        };
        let json = serde_json::to_value(&block).expect("serializes");
        assert_eq!(json, json!({"type": "lightning", "recipients": [{"name": "host"}]}));
    }
}
