// FILE: crates/cli/src/commands.rs

use anyhow::{bail, Context, Result};
use clap::ArgMatches;
use console::style;
use podfeed_extractor::{
    extract_podcast, parse_date, Field, FieldValue, PartialOptions, Podcast,
    DEFAULT_EPISODE_FIELDS, DEFAULT_META_FIELDS,
};
use podfeed_feed_parser::FeedParser;
use podfeed_network::{Client, ClientConfig};
use std::path::Path;
use std::time::Duration;

/// Print the extracted podcast as JSON
pub async fn extract(matches: &ArgMatches) -> Result<()> {
    let podcast = load_podcast(matches).await?;

    let output = if matches.get_flag("meta-only") {
        serde_json::to_value(&podcast.meta)?
    } else if matches.get_flag("episodes-only") {
        serde_json::to_value(&podcast.episodes)?
    } else {
        serde_json::to_value(&podcast)?
    };

    let json = if matches.get_flag("pretty") {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{}", json);
    Ok(())
}

/// List episodes in display order
pub async fn list_episodes(matches: &ArgMatches) -> Result<()> {
    let podcast = load_podcast(matches).await?;
    let limit = matches
        .get_one::<usize>("limit")
        .copied()
        .unwrap_or(usize::MAX);

    let title = podcast.meta.text("title").unwrap_or("(untitled podcast)");
    println!("\n{}", style(title).bold().cyan());
    println!("{}", "=".repeat(80));

    if podcast.is_empty() {
        println!("No episodes in feed.");
        return Ok(());
    }

    for (index, episode) in podcast.episodes.iter().take(limit).enumerate() {
        let date = episode
            .text("pubDate")
            .and_then(parse_date)
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "----------".to_string());
        let duration = match episode.get("duration") {
            Some(FieldValue::Integer(seconds)) => format_duration(*seconds),
            _ => String::new(),
        };

        println!(
            "{:>4}. {}  {}  {}",
            index + 1,
            style(date).dim(),
            episode.text("title").unwrap_or("(untitled)"),
            style(duration).yellow()
        );
    }

    if podcast.episode_count() > limit {
        println!("... and {} more", podcast.episode_count() - limit);
    }
    Ok(())
}

/// List the known fields and their defaults
pub fn list_fields() -> Result<()> {
    println!(
        "{:<16} {:<8} {:<8} {:<8} {:<8}",
        style("FIELD").bold(),
        style("GETTER").bold(),
        style("CLEANER").bold(),
        style("META").bold(),
        style("EPISODE").bold()
    );

    let mark = |flag: bool| if flag { "yes" } else { "-" };
    for field in Field::ALL {
        let descriptor = field.descriptor();
        println!(
            "{:<16} {:<8} {:<8} {:<8} {:<8}",
            descriptor.name,
            mark(descriptor.has_custom_getter),
            mark(descriptor.has_custom_cleaner),
            mark(DEFAULT_META_FIELDS.contains(&descriptor.name)),
            mark(DEFAULT_EPISODE_FIELDS.contains(&descriptor.name)),
        );
    }
    Ok(())
}

/// Reads the feed named by the `source` argument and extracts it
async fn load_podcast(matches: &ArgMatches) -> Result<Podcast> {
    let source = matches
        .get_one::<String>("source")
        .context("Feed source is required")?;
    let overrides = build_overrides(matches)?;

    if is_url(source) {
        log::debug!("Fetching feed from {}", source);
        let client = Client::with_config(client_config(matches)?)
            .context("Failed to create HTTP client")?;
        client
            .fetch_podcast(source, Some(&overrides))
            .await
            .with_context(|| format!("Failed to load podcast from {}", source))
    } else {
        log::debug!("Reading feed file {}", source);
        let document = FeedParser::parse_file(source)
            .with_context(|| format!("Failed to parse feed file {}", source))?;
        extract_podcast(&document, Some(&overrides))
            .with_context(|| format!("Failed to extract podcast from {}", source))
    }
}

fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Options file overlaid with the command-line field flags
pub fn build_overrides(matches: &ArgMatches) -> Result<PartialOptions> {
    let mut overrides = match matches.get_one::<String>("options") {
        Some(path) => load_options_file(Path::new(path))?,
        None => PartialOptions::new(),
    };

    let list = |name: &str| matches.get_one::<String>(name).map(|value| split_list(value));
    let mut flags = PartialOptions::new();
    if let Some(fields) = list("meta-fields") {
        flags = flags.meta_fields(fields);
    }
    if let Some(fields) = list("episode-fields") {
        flags = flags.episode_fields(fields);
    }
    if let Some(fields) = list("required-meta") {
        flags = flags.required_meta(fields);
    }
    if let Some(fields) = list("required-episodes") {
        flags = flags.required_episodes(fields);
    }
    overrides.merge(flags);

    Ok(overrides)
}

/// Loads options from a `.toml` or `.json` file
pub fn load_options_file(path: &Path) -> Result<PartialOptions> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read options file {}", path.display()))?;

    let options = match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => PartialOptions::from_toml_str(&content),
        Some("json") => PartialOptions::from_json_str(&content),
        _ => bail!(
            "Unsupported options file {} (expected .toml or .json)",
            path.display()
        ),
    };
    options.with_context(|| format!("Invalid options file {}", path.display()))
}

fn client_config(matches: &ArgMatches) -> Result<ClientConfig> {
    let mut config = ClientConfig::default();
    if let Some(seconds) = matches.get_one::<u64>("timeout") {
        config = config.with_timeout(Duration::from_secs(*seconds));
    }
    if let Some(headers) = matches.get_many::<String>("header") {
        for header in headers {
            let (name, value) = parse_header(header)?;
            config = config.with_header(name, value);
        }
    }
    Ok(config)
}

/// Splits `NAME:VALUE`
pub fn parse_header(header: &str) -> Result<(String, String)> {
    match header.split_once(':') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.trim().to_string()))
        }
        _ => bail!("Invalid header '{}', expected NAME:VALUE", header),
    }
}

/// Splits a comma-separated list, dropping blanks
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Formats seconds as `H:MM:SS` or `M:SS`
pub fn format_duration(seconds: u64) -> String {
    let (hours, minutes, secs) = (seconds / 3600, (seconds % 3600) / 60, seconds % 60);
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}
