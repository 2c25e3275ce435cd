// crates/feed-parser/examples/parse_feed.rs
//! Example of parsing a podcast feed and extracting its episodes

use podfeed_extractor::{FieldValue, PartialOptions};
use podfeed_feed_parser::{get_podcast_from_feed, FeedParser};

const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:itunes="http://www.itunes.com/dtds/podcast-1.0.dtd"
     xmlns:podcast="https://podcastindex.org/namespace/1.0">
  <channel>
    <title>Classic Audiobooks</title>
    <description>Public domain audiobooks read by volunteers</description>
    <link>https://example.com/audiobooks</link>
    <language>en</language>
    <itunes:image href="https://example.com/cover.jpg"/>
    <itunes:category text="Arts"><itunes:category text="Books"/></itunes:category>
    <podcast:funding url="https://example.com/donate">Keep us reading</podcast:funding>

    <item>
      <title>Pride and Prejudice - Chapter 1</title>
      <guid isPermaLink="false">pride-ch1</guid>
      <pubDate>Mon, 01 Jan 2024 12:00:00 GMT</pubDate>
      <itunes:duration>24:10</itunes:duration>
      <enclosure url="https://example.com/audio/pride-ch1.mp3"
                 type="audio/mpeg"
                 length="15000000"/>
    </item>

    <item>
      <title>Pride and Prejudice - Chapter 2</title>
      <guid isPermaLink="false">pride-ch2</guid>
      <pubDate>Tue, 02 Jan 2024 12:00:00 GMT</pubDate>
      <itunes:duration>1:02:45</itunes:duration>
      <enclosure url="https://example.com/audio/pride-ch2.mp3"
                 type="audio/mpeg"
                 length="14500000"/>
    </item>
  </channel>
</rss>"#;

fn main() {
    println!("=== podfeed Feed Parser Demo ===\n");

    println!("Example 1: Document tree");
    println!("{}", "=".repeat(60));
    document_tree_example();

    println!("\n");

    println!("Example 2: Podcast extraction");
    println!("{}", "=".repeat(60));
    extraction_example();

    println!("\n");

    println!("Example 3: Selected fields as JSON");
    println!("{}", "=".repeat(60));
    selected_fields_example();
}

fn document_tree_example() {
    match FeedParser::parse(FEED) {
        Ok(document) => {
            let channel = &document["rss"]["channel"][0];
            println!("Channel keys:");
            if let Some(keys) = channel.as_object().map(|map| map.keys()) {
                for key in keys {
                    println!("  - {}", key);
                }
            }
        }
        Err(e) => eprintln!("Error parsing RSS: {}", e),
    }
}

fn extraction_example() {
    match get_podcast_from_feed(FEED, None) {
        Ok(podcast) => {
            println!("Podcast: {}", podcast.meta.text("title").unwrap_or("(untitled)"));

            if let Some(image) = podcast.meta.text("imageURL") {
                println!("Artwork: {}", image);
            }

            if let Some(FieldValue::List(categories)) = podcast.meta.get("categories") {
                println!("Categories: {}", categories.join(", "));
            }

            println!("\nEpisodes: {}", podcast.episode_count());
            println!("{}", "-".repeat(60));

            for (i, episode) in podcast.episodes.iter().enumerate() {
                println!("\n{}. {}", i + 1, episode.text("title").unwrap_or("(untitled)"));

                if let Some(published) = episode.text("pubDate") {
                    println!("   Published: {}", published);
                }

                if let Some(FieldValue::Integer(seconds)) = episode.get("duration") {
                    println!("   Duration: {}m {}s", seconds / 60, seconds % 60);
                }

                if let Some(FieldValue::Enclosure(enclosure)) = episode.get("enclosure") {
                    if let Some(url) = &enclosure.url {
                        println!("   Audio: {}", url);
                    }
                    if let Some(size) = enclosure.length_bytes() {
                        println!("   Size: {:.1} MB", size as f64 / 1_000_000.0);
                    }
                }
            }
        }
        Err(e) => eprintln!("Error extracting podcast: {}", e),
    }
}

fn selected_fields_example() {
    let options = PartialOptions::new()
        .meta_fields(["title", "funding"])
        .episode_fields(["title", "duration"]);

    match get_podcast_from_feed(FEED, Some(&options)) {
        Ok(podcast) => match serde_json::to_string_pretty(&podcast) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Error serializing podcast: {}", e),
        },
        Err(e) => eprintln!("Error extracting podcast: {}", e),
    }
}
