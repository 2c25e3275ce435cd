// crates/extractor/src/lib.rs
//! Podcast metadata and episode extraction
//!
//! Works on a feed that has already been converted from XML into a
//! `serde_json::Value` tree:
//! - element `foo` becomes key `"foo"` holding a sequence of children
//! - text-only elements collapse to strings
//! - attributes live under `"$"`, the text of mixed elements under `"_"`
//! - namespaced elements keep their literal `"prefix:local"` key
//!
//! The crate performs no I/O.
//!
//! # Example
//!
//! ```rust
//! use podfeed_extractor::{extract_podcast, PartialOptions};
//! use serde_json::json;
//!
//! let document = json!({
//!     "rss": {
//!         "channel": [{
//!             "title": ["My Podcast"],
//!             "item": [
//!                 {"title": ["Episode 1"], "itunes:duration": ["12:30"]}
//!             ]
//!         }]
//!     }
//! });
//!
//! let options = PartialOptions::new().episode_fields(["title", "duration"]);
//! let podcast = extract_podcast(&document, Some(&options)).expect("Failed to extract");
//! assert_eq!(podcast.meta.text("title"), Some("My Podcast"));
//! assert_eq!(podcast.episode_count(), 1);
//! ```

mod attributes;
mod error;
mod fields;
mod options;
mod podcast;
mod record;
mod sort;
mod value;

pub use attributes::{extract_items, AttributeItem, ATTRIBUTES_KEY, TEXT_KEY};
pub use error::{ExtractError, ExtractResult, RecordScope};
pub use fields::{
    clean_duration, clean_explicit, clean_field, default_cleaner, default_getter, get_field,
    parse_date, Cleaner, Field, FieldDescriptor, Getter,
};
pub use options::{
    build_options, expand_default_token, Options, PartialOptions, PartialScoped, Scoped,
    DEFAULT_EPISODE_FIELDS, DEFAULT_META_FIELDS, DEFAULT_TOKEN,
};
pub use podcast::{channel_node, extract_episodes, extract_meta, extract_podcast, Podcast};
pub use record::build_record;
pub use sort::{compare_episodes, sort_episodes};
pub use value::{Enclosure, FieldValue, Owner, Record, ValueBlock};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_module_exports() {
        let _: Options = Options::default();
        let _: Record = Record::new();
        let _: Podcast = Podcast::default();
        let _: Field = Field::Title;
    }

    #[test]
    fn test_complete_workflow() {
        let document = json!({"rss": {"channel": [{
            "title": ["Test Audiobook Feed"],
            "description": ["Audiobooks for testing"],
            "item": [{
                "title": ["Book 1 - Chapter 1"],
                "enclosure": [{"$": {
                    "url": "http://example.com/book1_ch1.mp3",
                    "type": "audio/mpeg",
                    "length": "5000000"
                }}],
                "pubDate": ["Mon, 01 Jan 2024 12:00:00 GMT"]
            }]
        }]}});

        let podcast = extract_podcast(&document, None).expect("Should extract");
        assert_eq!(podcast.meta.text("title"), Some("Test Audiobook Feed"));
        assert_eq!(podcast.episode_count(), 1);

        let episode = &podcast.episodes[0];
        assert_eq!(episode.text("title"), Some("Book 1 - Chapter 1"));
        assert!(matches!(
            episode.get("enclosure"),
            Some(FieldValue::Enclosure(enclosure)) if enclosure.is_audio()
        ));
        assert_eq!(episode.text("pubDate"), Some("2024-01-01T12:00:00+00:00"));
    }
}
