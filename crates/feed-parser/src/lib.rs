// crates/feed-parser/src/lib.rs
//! Feed XML parser producing the document tree used by podcast extraction
//!
//! This module converts RSS (and any other XML) into a `serde_json::Value`
//! tree where:
//! - every element is a key holding the sequence of its occurrences
//! - elements with only text collapse to a string
//! - attributes live under `$`, mixed text under `_`
//! - namespaced elements keep their literal `prefix:local` names
//!
//! # Example
//!
//! ```rust
//! use podfeed_feed_parser::FeedParser;
//!
//! let rss = r#"<?xml version="1.0"?>
//! <rss version="2.0">
//!   <channel>
//!     <title>My Podcast</title>
//!     <item>
//!       <title>Episode 1</title>
//!       <enclosure url="http://example.com/ep1.mp3" type="audio/mpeg"/>
//!     </item>
//!   </channel>
//! </rss>"#;
//!
//! let podcast = FeedParser::parse_podcast(rss, None).expect("Failed to parse feed");
//! println!(
//!     "Feed: {} with {} episodes",
//!     podcast.meta.text("title").unwrap_or_default(),
//!     podcast.episode_count()
//! );
//! ```

mod error;
mod parser;

pub use error::{FeedError, FeedResult};
pub use parser::FeedParser;

/// Parses feed XML and extracts the podcast it describes
pub fn get_podcast_from_feed(
    content: &str,
    options: Option<&podfeed_extractor::PartialOptions>,
) -> FeedResult<podfeed_extractor::Podcast> {
    FeedParser::parse_podcast(content, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use podfeed_extractor::FieldValue;

    #[test]
    fn test_complete_workflow() {
        let rss = r#"<?xml version="1.0"?>
<rss version="2.0">
  <channel>
    <title>Test Audiobook Feed</title>
    <description>Audiobooks for testing</description>
    <item>
      <title>Book 1 - Chapter 1</title>
      <description>First chapter</description>
      <enclosure url="http://example.com/book1_ch1.mp3" type="audio/mpeg" length="5000000"/>
      <pubDate>Mon, 01 Jan 2024 12:00:00 GMT</pubDate>
    </item>
  </channel>
</rss>"#;

        let podcast = get_podcast_from_feed(rss, None).expect("Should parse");
        assert_eq!(podcast.meta.text("title"), Some("Test Audiobook Feed"));
        assert_eq!(podcast.episode_count(), 1);

        let episode = &podcast.episodes[0];
        assert_eq!(episode.text("title"), Some("Book 1 - Chapter 1"));
        assert!(matches!(
            episode.get("enclosure"),
            Some(FieldValue::Enclosure(enclosure)) if enclosure.length_bytes() == Some(5000000)
        ));
        assert!(episode.get("pubDate").is_some());
    }
}
