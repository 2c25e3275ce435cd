// crates/network/examples/fetch_feed.rs
//! Fetches a podcast feed and lists its newest episodes
//!
//! Usage: cargo run --example fetch_feed -- <FEED_URL>

use podfeed_extractor::PartialOptions;
use podfeed_network::{Client, ClientConfig, NetworkError};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "https://feeds.podcastindex.org/pc20.xml".to_string());

    let config = ClientConfig::default().with_timeout(Duration::from_secs(15));
    let client = Client::with_config(config)?;
    let options = PartialOptions::new()
        .meta_fields(["title", "author", "imageURL"])
        .episode_fields(["title", "pubDate", "duration", "order"]);

    println!("Fetching {}...\n", url);

    match client.fetch_podcast(&url, Some(&options)).await {
        Ok(podcast) => {
            println!("{}", podcast.meta.text("title").unwrap_or("(untitled)"));
            if let Some(author) = podcast.meta.text("author") {
                println!("by {}", author);
            }
            println!("\n{} episodes, newest first:", podcast.episode_count());
            for episode in podcast.episodes.iter().take(10) {
                println!(
                    "  {}  {}",
                    episode.text("pubDate").unwrap_or("          "),
                    episode.text("title").unwrap_or("(untitled)")
                );
            }
        }
        Err(NetworkError::Unauthorized { url }) => {
            eprintln!("Feed requires credentials: {}", url);
        }
        Err(e) => eprintln!("Failed to fetch podcast: {}", e),
    }

    Ok(())
}
