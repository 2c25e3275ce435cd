// crates/extractor/src/fields.rs
//! Field registry: which getter and cleaner each field uses
//!
//! Every known field is a [`Field`] variant. A field may have a custom
//! getter (how its raw value is found in a channel or item node) and a
//! custom cleaner (how the raw value is normalized). Fields without one
//! fall back to [`default_getter`] / [`default_cleaner`]. Names that are
//! not known fields are served entirely by the defaults.

use crate::attributes::{attribute_map, extract_items, ATTRIBUTES_KEY};
use crate::value::{node_text, Enclosure, FieldValue, Owner, ValueBlock};
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;

/// Reads a raw value from a channel or item node
pub type Getter = fn(&Value) -> Option<FieldValue>;

/// Normalizes a raw value; may decide the value is unusable
pub type Cleaner = fn(FieldValue) -> Option<FieldValue>;

/// Static description of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub has_custom_getter: bool,
    pub has_custom_cleaner: bool,
    pub is_uncleaned_by_default: bool,
}

/// Every field with registry knowledge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Author,
    Blocked,
    Categories,
    Chapters,
    Complete,
    Description,
    Docs,
    Duration,
    Editor,
    Enclosure,
    Explicit,
    Funding,
    Generator,
    Guid,
    ImageUrl,
    Keywords,
    Language,
    LastBuildDate,
    Link,
    Locked,
    Order,
    Owner,
    PubDate,
    Soundbite,
    Subtitle,
    Summary,
    Title,
    Transcript,
    Type,
    Value,
    WebMaster,
}

impl Field {
    pub const ALL: [Field; 31] = [
        Field::Author,
        Field::Blocked,
        Field::Categories,
        Field::Chapters,
        Field::Complete,
        Field::Description,
        Field::Docs,
        Field::Duration,
        Field::Editor,
        Field::Enclosure,
        Field::Explicit,
        Field::Funding,
        Field::Generator,
        Field::Guid,
        Field::ImageUrl,
        Field::Keywords,
        Field::Language,
        Field::LastBuildDate,
        Field::Link,
        Field::Locked,
        Field::Order,
        Field::Owner,
        Field::PubDate,
        Field::Soundbite,
        Field::Subtitle,
        Field::Summary,
        Field::Title,
        Field::Transcript,
        Field::Type,
        Field::Value,
        Field::WebMaster,
    ];

    /// The field's name as used in options and records
    pub fn name(self) -> &'static str {
        match self {
            Field::Author => "author",
            Field::Blocked => "blocked",
            Field::Categories => "categories",
            Field::Chapters => "chapters",
            Field::Complete => "complete",
            Field::Description => "description",
            Field::Docs => "docs",
            Field::Duration => "duration",
            Field::Editor => "editor",
            Field::Enclosure => "enclosure",
            Field::Explicit => "explicit",
            Field::Funding => "funding",
            Field::Generator => "generator",
            Field::Guid => "guid",
            Field::ImageUrl => "imageURL",
            Field::Keywords => "keywords",
            Field::Language => "language",
            Field::LastBuildDate => "lastBuildDate",
            Field::Link => "link",
            Field::Locked => "locked",
            Field::Order => "order",
            Field::Owner => "owner",
            Field::PubDate => "pubDate",
            Field::Soundbite => "soundbite",
            Field::Subtitle => "subtitle",
            Field::Summary => "summary",
            Field::Title => "title",
            Field::Transcript => "transcript",
            Field::Type => "type",
            Field::Value => "value",
            Field::WebMaster => "webMaster",
        }
    }

    /// Looks a field up by name
    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|field| field.name() == name)
    }

    /// Custom getter, if the field has one
    pub fn getter(self) -> Option<Getter> {
        let getter: Getter = match self {
            Field::Author => |node: &Value| lookup(node, "itunes:author"),
            Field::Blocked => |node: &Value| lookup(node, "itunes:block"),
            Field::Complete => |node: &Value| lookup(node, "itunes:complete"),
            Field::Duration => |node: &Value| lookup(node, "itunes:duration"),
            Field::Explicit => |node: &Value| lookup(node, "itunes:explicit"),
            Field::Keywords => |node: &Value| lookup(node, "itunes:keywords"),
            Field::Order => |node: &Value| lookup(node, "itunes:order"),
            Field::Owner => |node: &Value| lookup(node, "itunes:owner"),
            Field::Subtitle => |node: &Value| lookup(node, "itunes:subtitle"),
            Field::Summary => |node: &Value| lookup(node, "itunes:summary"),
            Field::Type => |node: &Value| lookup(node, "itunes:type"),
            Field::Categories => get_categories,
            Field::Guid => get_guid,
            Field::ImageUrl => get_image_url,
            Field::Funding => |node: &Value| items_of(node, "podcast:funding"),
            Field::Locked => |node: &Value| items_of(node, "podcast:locked"),
            Field::Transcript => |node: &Value| items_of(node, "podcast:transcript"),
            Field::Chapters => |node: &Value| items_of(node, "podcast:chapters"),
            Field::Soundbite => get_soundbites,
            Field::Value => get_value_blocks,
            _ => return None,
        };
        Some(getter)
    }

    /// Custom cleaner, if the field has one
    pub fn cleaner(self) -> Option<Cleaner> {
        let cleaner: Cleaner = match self {
            Field::Blocked | Field::Complete => clean_yes_flag,
            Field::Duration => clean_duration,
            Field::Explicit => clean_explicit,
            Field::Enclosure => clean_enclosure,
            Field::Owner => clean_owner,
            Field::Keywords => clean_keywords,
            Field::Order => clean_order,
            Field::PubDate | Field::LastBuildDate => clean_date,
            Field::Categories
            | Field::Funding
            | Field::Locked
            | Field::Transcript
            | Field::Chapters
            | Field::Soundbite
            | Field::Value
            | Field::Guid
            | Field::ImageUrl => Some,
            _ => return None,
        };
        Some(cleaner)
    }

    /// Static description of this field
    pub fn descriptor(self) -> FieldDescriptor {
        FieldDescriptor {
            name: self.name(),
            has_custom_getter: self.getter().is_some(),
            has_custom_cleaner: self.cleaner().is_some(),
            is_uncleaned_by_default: false,
        }
    }
}

/// Raw value of `field` in `node`, using the field's getter when it has one
pub fn get_field(node: &Value, field: &str) -> Option<FieldValue> {
    match Field::from_name(field).and_then(Field::getter) {
        Some(getter) => getter(node),
        None => default_getter(node, field),
    }
}

/// Cleans a raw value of `field`, using the field's cleaner when it has one
pub fn clean_field(field: &str, raw: FieldValue) -> Option<FieldValue> {
    match Field::from_name(field).and_then(Field::cleaner) {
        Some(cleaner) => cleaner(raw),
        None => default_cleaner(raw),
    }
}

/// Direct property lookup; `null` counts as absent
pub fn default_getter(node: &Value, field: &str) -> Option<FieldValue> {
    lookup(node, field)
}

/// Unwraps the single-element sequences produced by the XML conversion
pub fn default_cleaner(value: FieldValue) -> Option<FieldValue> {
    match value {
        FieldValue::Raw(Value::Array(mut items)) if !items.is_empty() => {
            Some(FieldValue::from_json(items.swap_remove(0)))
        }
        other => Some(other),
    }
}

fn lookup(node: &Value, key: &str) -> Option<FieldValue> {
    node.get(key)
        .filter(|value| !value.is_null())
        .cloned()
        .map(FieldValue::Raw)
}

fn items_of(node: &Value, key: &str) -> Option<FieldValue> {
    Some(FieldValue::Items(extract_items(node.get(key), &[])))
}

fn attribute_text<'a>(element: &'a Value, name: &str) -> Option<&'a str> {
    element
        .get(ATTRIBUTES_KEY)
        .and_then(|attrs| attrs.get(name))
        .and_then(Value::as_str)
}

fn get_categories(node: &Value) -> Option<FieldValue> {
    let categories = node
        .get("itunes:category")
        .and_then(Value::as_array)
        .map(|elements| {
            elements
                .iter()
                .map(|element| {
                    // One entry per element, even when it carries no text
                    let mut category = attribute_text(element, "text")
                        .unwrap_or_default()
                        .to_string();
                    let sub = element
                        .get("itunes:category")
                        .and_then(|subs| subs.get(0))
                        .and_then(|sub| attribute_text(sub, "text"));
                    if let Some(sub) = sub {
                        category.push('>');
                        category.push_str(sub);
                    }
                    category
                })
                .collect()
        })
        .unwrap_or_default();

    Some(FieldValue::List(categories))
}

fn get_guid(node: &Value) -> Option<FieldValue> {
    let text = match node.get("guid")? {
        Value::String(s) => s.as_str(),
        Value::Array(items) => items.first()?.get("_")?.as_str()?,
        _ => return None,
    };
    Some(FieldValue::Text(text.to_string()))
}

fn get_image_url(node: &Value) -> Option<FieldValue> {
    let itunes_image = node.get("itunes:image").and_then(|images| images.get(0));
    let url = itunes_image
        .and_then(|image| attribute_text(image, "href"))
        .or_else(|| itunes_image.and_then(Value::as_str))
        .or_else(|| {
            node.get("image")
                .and_then(|images| images.get(0))
                .and_then(|image| image.get("url"))
                .and_then(|urls| urls.get(0))
                .and_then(Value::as_str)
        })?;
    Some(FieldValue::Text(url.to_string()))
}

fn get_soundbites(node: &Value) -> Option<FieldValue> {
    let items = extract_items(node.get("podcast:soundbite"), &[]);
    let total = items.len();
    let valid: Vec<_> = items
        .into_iter()
        .filter(|item| {
            let duration = item.attribute("duration").and_then(parse_leading_number);
            let start = item.attribute("startTime").and_then(parse_leading_number);
            matches!(duration, Some(d) if d > 0.0) && matches!(start, Some(s) if s >= 0.0)
        })
        .collect();

    if valid.len() < total {
        log::warn!("Discarded {} invalid soundbite(s)", total - valid.len());
    }
    Some(FieldValue::Items(valid))
}

fn get_value_blocks(node: &Value) -> Option<FieldValue> {
    let blocks = extract_items(node.get("podcast:value"), &["podcast:valueRecipient"]);
    if blocks.is_empty() {
        return Some(FieldValue::Null);
    }

    let blocks = blocks
        .into_iter()
        .map(|block| ValueBlock {
            recipients: block
                .nested("podcast:valueRecipient")
                .iter()
                .map(|recipient| recipient.attributes.clone())
                .collect(),
            attributes: block.attributes,
        })
        .collect();
    Some(FieldValue::ValueBlocks(blocks))
}

/// Leading decimal number of `text` (`"30s"` reads as 30), ignoring leading whitespace
fn parse_leading_number(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let digits_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - digits_start;
    if bytes.get(end) == Some(&b'.') {
        let fraction_start = end + 1;
        let mut fraction_end = fraction_start;
        while bytes.get(fraction_end).is_some_and(u8::is_ascii_digit) {
            fraction_end += 1;
        }
        if fraction_end > fraction_start || digits > 0 {
            digits += fraction_end - fraction_start;
            end = fraction_end;
        }
    }
    if digits == 0 {
        return None;
    }
    text[..end].parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Leading decimal digits of `text`, ignoring surrounding whitespace
fn parse_leading_int(text: &str) -> Option<u64> {
    let text = text.trim();
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    text[..end].parse().ok()
}

/// `"H:M:S"`, `"M:S"` or plain seconds into a number of seconds
pub fn clean_duration(value: FieldValue) -> Option<FieldValue> {
    let text = value.as_text()?;
    let seconds = text
        .split(':')
        .try_fold(0u64, |total, segment| {
            Some(total.checked_mul(60)?.checked_add(parse_leading_int(segment)?)?)
        })?;
    Some(FieldValue::Integer(seconds))
}

pub fn clean_explicit(value: FieldValue) -> Option<FieldValue> {
    match value.as_text()?.trim().to_ascii_lowercase().as_str() {
        "yes" | "explicit" | "true" => Some(FieldValue::Bool(true)),
        "clean" | "no" | "false" => Some(FieldValue::Bool(false)),
        _ => None,
    }
}

fn clean_yes_flag(value: FieldValue) -> Option<FieldValue> {
    let yes = value
        .as_text()
        .is_some_and(|text| text.trim().eq_ignore_ascii_case("yes"));
    Some(FieldValue::Bool(yes))
}

fn clean_enclosure(value: FieldValue) -> Option<FieldValue> {
    let FieldValue::Raw(raw) = value else {
        return None;
    };
    let element = match &raw {
        Value::Array(items) => items.first()?,
        other => other,
    };
    let mut attrs = attribute_map(element.get(ATTRIBUTES_KEY));

    Some(FieldValue::Enclosure(Enclosure {
        length: attrs.remove("length"),
        mime_type: attrs.remove("type"),
        url: attrs.remove("url"),
    }))
}

fn clean_owner(value: FieldValue) -> Option<FieldValue> {
    let FieldValue::Raw(raw) = value else {
        return None;
    };
    let element = match &raw {
        Value::Array(items) => items.first()?,
        other => other,
    };
    let sub = |key: &str| element.get(key).and_then(node_text).map(str::to_string);

    Some(FieldValue::Owner(Owner {
        name: sub("itunes:name"),
        email: sub("itunes:email"),
    }))
}

fn clean_keywords(value: FieldValue) -> Option<FieldValue> {
    let keywords = value
        .as_text()?
        .split(',')
        .map(str::trim)
        .filter(|keyword| !keyword.is_empty())
        .map(str::to_string)
        .collect();
    Some(FieldValue::List(keywords))
}

fn clean_order(value: FieldValue) -> Option<FieldValue> {
    value.as_f64().map(FieldValue::Number)
}

fn clean_date(value: FieldValue) -> Option<FieldValue> {
    let text = value.as_text()?.trim();
    let normalized = match parse_date(text) {
        Some(date) => date.to_rfc3339(),
        None => text.to_string(),
    };
    Some(FieldValue::Text(normalized))
}

/// Parses an RFC 2822, RFC 3339 or plain `YYYY-MM-DD` date
pub fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    DateTime::parse_from_rfc2822(text)
        .or_else(|_| DateTime::parse_from_rfc3339(text))
        .map(|date| date.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|date| date.and_utc())
        })
}
