// crates/extractor/src/podcast.rs
//! Feed orchestration: channel lookup, meta and episode records

use crate::error::{ExtractError, ExtractResult, RecordScope};
use crate::options::{build_options, Options, PartialOptions};
use crate::record::build_record;
use crate::sort::sort_episodes;
use crate::value::Record;
use serde::Serialize;
use serde_json::Value;

/// A podcast extracted from a feed document
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Podcast {
    /// Channel-level metadata
    pub meta: Record,
    /// Episodes in display order
    pub episodes: Vec<Record>,
}

impl Podcast {
    /// Returns the number of episodes
    pub fn episode_count(&self) -> usize {
        self.episodes.len()
    }

    /// Returns true if the feed has no episodes
    pub fn is_empty(&self) -> bool {
        self.episodes.is_empty()
    }
}

/// Extracts meta and episodes from a parsed feed document
pub fn extract_podcast(
    document: &Value,
    overrides: Option<&PartialOptions>,
) -> ExtractResult<Podcast> {
    let options = build_options(overrides)?;
    let channel = channel_node(document)?;

    let meta = extract_meta(channel, &options)?;
    let episodes = extract_episodes(channel, &options)?;
    log::debug!("Extracted podcast with {} episode(s)", episodes.len());

    Ok(Podcast { meta, episodes })
}

/// Locates `rss.channel[0]`
pub fn channel_node(document: &Value) -> ExtractResult<&Value> {
    let rss = document
        .get("rss")
        .ok_or_else(|| ExtractError::InvalidDocument("missing <rss> root".to_string()))?;
    rss.get("channel")
        .and_then(|channels| channels.get(0))
        .filter(|channel| channel.is_object())
        .ok_or_else(|| ExtractError::InvalidDocument("missing <channel> element".to_string()))
}

/// Builds the meta record from a channel node
pub fn extract_meta(channel: &Value, options: &Options) -> ExtractResult<Record> {
    build_record(
        channel,
        &options.fields.meta,
        &options.required.meta,
        &options.uncleaned.meta,
        RecordScope::Meta,
    )
}

/// Builds and sorts the episode records of a channel node
///
/// A channel without `item` elements has no episodes.
pub fn extract_episodes(channel: &Value, options: &Options) -> ExtractResult<Vec<Record>> {
    let items = match channel.get("item") {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(ExtractError::InvalidDocument(
                "<item> is not a sequence".to_string(),
            ))
        }
    };

    let mut episodes = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            build_record(
                item,
                &options.fields.episodes,
                &options.required.episodes,
                &options.uncleaned.episodes,
                RecordScope::Episode(index),
            )
        })
        .collect::<ExtractResult<Vec<_>>>()?;

    sort_episodes(&mut episodes);
    Ok(episodes)
}
