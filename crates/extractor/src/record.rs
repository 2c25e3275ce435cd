// crates/extractor/src/record.rs
//! Assembles a record from a channel or item node

use crate::error::{ExtractError, ExtractResult, RecordScope};
use crate::fields::{clean_field, get_field};
use crate::value::Record;
use serde_json::Value;
use std::collections::BTreeSet;

/// Builds a record holding every field of `fields`, in order
///
/// Each field's raw value is looked up with the registry getter and then
/// cleaned, unless the field is listed in `uncleaned`. Absent values are
/// stored as present-but-empty entries. Fails if a name in `required` is
/// not a field of the finished record.
pub fn build_record(
    node: &Value,
    fields: &[String],
    required: &BTreeSet<String>,
    uncleaned: &BTreeSet<String>,
    scope: RecordScope,
) -> ExtractResult<Record> {
    let mut record = Record::new();

    for field in fields {
        let raw = get_field(node, field);
        let value = if uncleaned.contains(field) {
            raw
        } else {
            raw.and_then(|raw| clean_field(field, raw))
        };
        record.insert(field.as_str(), value);
    }

    let missing: Vec<String> = required
        .iter()
        .filter(|name| !record.contains_field(name))
        .cloned()
        .collect();
    if !missing.is_empty() {
        return Err(ExtractError::RequiredFieldMissing {
            scope,
            fields: missing,
        });
    }

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::FieldValue;
    use serde_json::json;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn set(list: &[&str]) -> BTreeSet<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn item() -> Value {
        json!({
            "title": ["Episode 1"],
            "itunes:duration": ["01:00"],
            "itunes:explicit": ["maybe"]
        })
    }

    #[test]
    fn test_fields_in_given_order() {
        let record = build_record(
            &item(),
            &names(&["duration", "title", "link"]),
            &BTreeSet::new(),
            &BTreeSet::new(),
            RecordScope::Meta,
        )
        .expect("no required fields");

        assert_eq!(record.fields().collect::<Vec<_>>(), vec!["duration", "title", "link"]);
        assert_eq!(record.get("duration"), Some(&FieldValue::Integer(60)));
        assert_eq!(record.text("title"), Some("Episode 1"));
        assert!(record.contains_field("link"));
        assert!(record.get("link").is_none());
    }

    #[test]
    fn test_uncleaned_keeps_raw_value() {
        let record = build_record(
            &item(),
            &names(&["duration"]),
            &BTreeSet::new(),
            &set(&["duration"]),
            RecordScope::Meta,
        )
        .expect("valid");

        assert_eq!(record.get("duration"), Some(&FieldValue::Raw(json!(["01:00"]))));
    }

    #[test]
    fn test_cleaner_may_drop_value() {
        let record = build_record(
            &item(),
            &names(&["explicit"]),
            &BTreeSet::new(),
            &BTreeSet::new(),
            RecordScope::Meta,
        )
        .expect("valid");
        assert!(record.contains_field("explicit"));
        assert!(record.get("explicit").is_none());
    }

    #[test]
    fn test_required_checks_presence_not_value() {
        let record = build_record(
            &item(),
            &names(&["title", "link"]),
            &set(&["link"]),
            &BTreeSet::new(),
            RecordScope::Episode(0),
        );
        assert!(record.is_ok());
    }

    #[test]
    fn test_required_outside_field_list_fails() {
        let err = build_record(
            &item(),
            &names(&["title"]),
            &set(&["title", "guid", "enclosure"]),
            &BTreeSet::new(),
            RecordScope::Episode(4),
        )
        .expect_err("guid and enclosure are not extracted");

        assert_eq!(
            err,
            ExtractError::RequiredFieldMissing {
                scope: RecordScope::Episode(4),
                fields: names(&["enclosure", "guid"]),
            }
        );
    }

    #[test]
    fn test_node_is_not_mutated() {
        let node = item();
        let before = node.clone();
        build_record(
            &node,
            &names(&["title", "duration", "explicit"]),
            &BTreeSet::new(),
            &BTreeSet::new(),
            RecordScope::Meta,
        )
        .expect("valid");
        assert_eq!(node, before);
    }
}
