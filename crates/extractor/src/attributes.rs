// crates/extractor/src/attributes.rs
//! Normalization of repeatable, attribute-bearing elements
//!
//! Elements such as `podcast:funding` or `podcast:transcript` can appear
//! many times, carry attributes, and sometimes contain nested elements of
//! their own. [`extract_items`] turns any of them into a uniform list of
//! [`AttributeItem`]s.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Key under which the XML conversion stores attributes
pub const ATTRIBUTES_KEY: &str = "$";

/// Key under which the XML conversion stores the text of mixed elements
pub const TEXT_KEY: &str = "_";

/// One occurrence of a repeatable element
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeItem {
    /// Text content, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Attributes by name
    pub attributes: BTreeMap<String, String>,
    /// Requested nested elements; `None` when none were requested or found
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nested_elements: Option<BTreeMap<String, Vec<AttributeItem>>>,
}

impl AttributeItem {
    /// Creates an item holding only text
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            value: Some(text.into()),
            ..Default::default()
        }
    }

    /// Returns an attribute value
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Returns the items extracted for a nested tag (empty if none)
    pub fn nested(&self, tag: &str) -> &[AttributeItem] {
        self.nested_elements
            .as_ref()
            .and_then(|nested| nested.get(tag))
            .map_or(&[], Vec::as_slice)
    }
}

/// Extracts every occurrence held in `node`
///
/// Anything that is not a sequence yields an empty list. Strings become
/// text-only items, objects contribute their `_` text and `$` attributes,
/// and null entries are skipped.
pub fn extract_items(node: Option<&Value>, nested_tags: &[&str]) -> Vec<AttributeItem> {
    let Some(Value::Array(elements)) = node else {
        return Vec::new();
    };

    elements
        .iter()
        .filter_map(|element| match element {
            Value::String(text) => Some(AttributeItem::from_text(text.clone())),
            Value::Object(map) => {
                let value = map.get(TEXT_KEY).and_then(Value::as_str).map(str::to_string);
                let attributes = attribute_map(map.get(ATTRIBUTES_KEY));

                let nested: BTreeMap<String, Vec<AttributeItem>> = nested_tags
                    .iter()
                    .filter_map(|tag| {
                        let items = extract_items(map.get(*tag), &[]);
                        (!items.is_empty()).then(|| (tag.to_string(), items))
                    })
                    .collect();

                Some(AttributeItem {
                    value,
                    attributes,
                    nested_elements: (!nested.is_empty()).then_some(nested),
                })
            }
            _ => None,
        })
        .collect()
}

/// Reads a `$` attribute object into a string map
pub(crate) fn attribute_map(node: Option<&Value>) -> BTreeMap<String, String> {
    let Some(Value::Object(attrs)) = node else {
        return BTreeMap::new();
    };

    attrs
        .iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(name, value)| {
            let text = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (name.clone(), text)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_non_sequence_yields_nothing() {
        assert!(extract_items(None, &[]).is_empty());
        assert!(extract_items(Some(&json!("not-an-array")), &[]).is_empty());
        assert!(extract_items(Some(&json!({"a": 1})), &[]).is_empty());
    }

    #[test]
    fn test_strings_and_objects() {
        let node = json!([
            "plain",
            {"_": "Support us", "$": {"url": "https://example.com/donate"}},
            null,
            {"$": {"owner": "me@example.com"}}
        ]);

        let items = extract_items(Some(&node), &[]);
        assert_eq!(items.len(), 3);
        assert_eq!(items[0], AttributeItem::from_text("plain"));
        assert_eq!(items[1].value.as_deref(), Some("Support us"));
        assert_eq!(items[1].attribute("url"), Some("https://example.com/donate"));
        assert!(items[2].value.is_none());
        assert_eq!(items[2].attribute("owner"), Some("me@example.com"));
        assert!(items.iter().all(|item| item.nested_elements.is_none()));
    }

    #[test]
    fn test_nested_tags() {
        let node = json!([{
            "$": {"type": "lightning"},
            "podcast:valueRecipient": [
                {"$": {"name": "host", "split": "90"}},
                {"$": {"name": "app", "split": "10"}}
            ]
        }]);

        let items = extract_items(Some(&node), &["podcast:valueRecipient", "missing"]);
        assert_eq!(items.len(), 1);
        let recipients = items[0].nested("podcast:valueRecipient");
        assert_eq!(recipients.len(), 2);
        assert_eq!(recipients[1].attribute("split"), Some("10"));
        assert!(items[0].nested("missing").is_empty());

        let nested = items[0].nested_elements.as_ref().expect("nested present");
        assert_eq!(nested.len(), 1);
    }

    #[test]
    fn test_nested_omitted_when_nothing_found() {
        let node = json!([{"$": {"type": "lightning"}}]);
        let items = extract_items(Some(&node), &["podcast:valueRecipient"]);
        assert!(items[0].nested_elements.is_none());
    }

    #[test]
    fn test_non_string_attributes_are_stringified() {
        let attrs = attribute_map(Some(&json!({"n": 3, "ok": true, "gone": null})));
        assert_eq!(attrs.get("n").map(String::as_str), Some("3"));
        assert_eq!(attrs.get("ok").map(String::as_str), Some("true"));
        assert!(!attrs.contains_key("gone"));
    }
}
