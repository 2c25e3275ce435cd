// crates/extractor/src/options.rs
//! Extraction options: which fields to extract, which are required, and
//! which are returned without cleaning
//!
//! Callers pass a [`PartialOptions`] that is merged over the defaults by
//! [`build_options`]. Each sub-key (`fields.meta`, `required.episodes`, ...)
//! replaces its default wholesale, except that a field list containing the
//! token `"default"` is expanded to the defaults plus the caller's extras.

use crate::error::{ExtractError, ExtractResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Field-list token that expands to the default field list
pub const DEFAULT_TOKEN: &str = "default";

/// Default channel-level fields
pub const DEFAULT_META_FIELDS: &[&str] = &[
    "author",
    "blocked",
    "categories",
    "complete",
    "description",
    "docs",
    "editor",
    "explicit",
    "funding",
    "generator",
    "guid",
    "imageURL",
    "keywords",
    "language",
    "lastBuildDate",
    "link",
    "locked",
    "owner",
    "pubDate",
    "subtitle",
    "summary",
    "title",
    "type",
    "value",
    "webMaster",
];

/// Default per-episode fields
pub const DEFAULT_EPISODE_FIELDS: &[&str] = &[
    "author",
    "blocked",
    "chapters",
    "description",
    "duration",
    "enclosure",
    "explicit",
    "funding",
    "guid",
    "imageURL",
    "keywords",
    "language",
    "link",
    "order",
    "pubDate",
    "soundbite",
    "subtitle",
    "summary",
    "title",
    "transcript",
    "value",
];

/// A pair of settings, one for the podcast meta and one for its episodes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoped<T> {
    pub meta: T,
    pub episodes: T,
}

/// Fully resolved options for one extraction call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Options {
    /// Fields to extract, in output order
    pub fields: Scoped<Vec<String>>,
    /// Fields that must be present in every record
    pub required: Scoped<BTreeSet<String>>,
    /// Fields returned exactly as found in the document
    pub uncleaned: Scoped<BTreeSet<String>>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            fields: Scoped {
                meta: to_owned_list(DEFAULT_META_FIELDS),
                episodes: to_owned_list(DEFAULT_EPISODE_FIELDS),
            },
            required: Scoped::default(),
            uncleaned: Scoped::default(),
        }
    }
}

fn to_owned_list(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

/// Caller overrides; every part is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialOptions {
    pub fields: Option<PartialScoped>,
    pub required: Option<PartialScoped>,
    pub uncleaned: Option<PartialScoped>,
}

/// Overrides for one of the option groups
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialScoped {
    pub meta: Option<Vec<String>>,
    pub episodes: Option<Vec<String>>,
}

impl PartialOptions {
    /// Creates empty overrides (resolves to the defaults)
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads overrides from TOML
    pub fn from_toml_str(content: &str) -> ExtractResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Reads overrides from JSON
    pub fn from_json_str(content: &str) -> ExtractResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Sets the meta field list
    pub fn meta_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields.get_or_insert_with(Default::default).meta = Some(collect(fields));
        self
    }

    /// Sets the episode field list
    pub fn episode_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields.get_or_insert_with(Default::default).episodes = Some(collect(fields));
        self
    }

    /// Sets the required meta fields
    pub fn required_meta<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required.get_or_insert_with(Default::default).meta = Some(collect(fields));
        self
    }

    /// Sets the required episode fields
    pub fn required_episodes<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required.get_or_insert_with(Default::default).episodes = Some(collect(fields));
        self
    }

    /// Sets the uncleaned meta fields
    pub fn uncleaned_meta<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.uncleaned.get_or_insert_with(Default::default).meta = Some(collect(fields));
        self
    }

    /// Sets the uncleaned episode fields
    pub fn uncleaned_episodes<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.uncleaned.get_or_insert_with(Default::default).episodes = Some(collect(fields));
        self
    }

    /// Overlays `other` on top of these overrides, sub-key by sub-key
    pub fn merge(&mut self, other: PartialOptions) {
        merge_group(&mut self.fields, other.fields);
        merge_group(&mut self.required, other.required);
        merge_group(&mut self.uncleaned, other.uncleaned);
    }
}

fn collect<I, S>(fields: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    fields.into_iter().map(Into::into).collect()
}

fn merge_group(target: &mut Option<PartialScoped>, other: Option<PartialScoped>) {
    let Some(other) = other else { return };
    let target = target.get_or_insert_with(Default::default);
    if other.meta.is_some() {
        target.meta = other.meta;
    }
    if other.episodes.is_some() {
        target.episodes = other.episodes;
    }
}

/// Resolves caller overrides against the defaults
pub fn build_options(overrides: Option<&PartialOptions>) -> ExtractResult<Options> {
    let mut options = Options::default();
    let Some(overrides) = overrides else {
        return Ok(options);
    };

    if let Some(fields) = &overrides.fields {
        validate_names("fields.meta", fields.meta.as_deref(), true)?;
        validate_names("fields.episodes", fields.episodes.as_deref(), true)?;
        if let Some(meta) = &fields.meta {
            options.fields.meta = expand_default_token(DEFAULT_META_FIELDS, meta);
        }
        if let Some(episodes) = &fields.episodes {
            options.fields.episodes = expand_default_token(DEFAULT_EPISODE_FIELDS, episodes);
        }
    }

    for (group, source, target) in [
        ("required", &overrides.required, &mut options.required),
        ("uncleaned", &overrides.uncleaned, &mut options.uncleaned),
    ] {
        let Some(source) = source else { continue };
        validate_names(&format!("{}.meta", group), source.meta.as_deref(), false)?;
        validate_names(&format!("{}.episodes", group), source.episodes.as_deref(), false)?;
        if let Some(meta) = &source.meta {
            target.meta = meta.iter().cloned().collect();
        }
        if let Some(episodes) = &source.episodes {
            target.episodes = episodes.iter().cloned().collect();
        }
    }

    warn_outside_fields(&options);
    Ok(options)
}

fn validate_names(key: &str, names: Option<&[String]>, allow_token: bool) -> ExtractResult<()> {
    for name in names.unwrap_or_default() {
        if name.trim().is_empty() {
            return Err(ExtractError::InvalidOptions(format!(
                "{} contains an empty field name",
                key
            )));
        }
        if !allow_token && name == DEFAULT_TOKEN {
            return Err(ExtractError::InvalidOptions(format!(
                "{} cannot contain \"{}\"",
                key, DEFAULT_TOKEN
            )));
        }
    }
    Ok(())
}

/// Replaces a list containing the `"default"` token with the defaults
/// followed by the caller's extras, deduplicated in first-seen order
pub fn expand_default_token(defaults: &[&str], requested: &[String]) -> Vec<String> {
    if !requested.iter().any(|name| name == DEFAULT_TOKEN) {
        return requested.to_vec();
    }

    let mut seen = BTreeSet::new();
    defaults
        .iter()
        .copied()
        .chain(requested.iter().map(String::as_str))
        .filter(|name| *name != DEFAULT_TOKEN && seen.insert(*name))
        .map(str::to_string)
        .collect()
}

fn warn_outside_fields(options: &Options) {
    let scopes = [
        ("meta", &options.fields.meta, &options.required.meta, &options.uncleaned.meta),
        (
            "episodes",
            &options.fields.episodes,
            &options.required.episodes,
            &options.uncleaned.episodes,
        ),
    ];
    for (scope, fields, required, uncleaned) in scopes {
        for name in required.iter().chain(uncleaned.iter()) {
            if !fields.contains(name) {
                log::warn!("Field '{}' is configured for {} but not extracted", name, scope);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_overrides_gives_defaults() {
        let options = build_options(None).expect("defaults are valid");
        assert_eq!(options, Options::default());
        assert_eq!(options.fields.meta.len(), DEFAULT_META_FIELDS.len());
        assert!(options.required.meta.is_empty());
        assert!(options.uncleaned.episodes.is_empty());

        let empty = build_options(Some(&PartialOptions::new())).expect("valid");
        assert_eq!(empty, Options::default());
    }

    #[test]
    fn test_sub_keys_replace_independently() {
        let overrides = PartialOptions::new().meta_fields(["title", "link"]);
        let options = build_options(Some(&overrides)).expect("valid");

        assert_eq!(options.fields.meta, vec!["title", "link"]);
        assert_eq!(options.fields.episodes, to_owned_list(DEFAULT_EPISODE_FIELDS));
    }

    #[test]
    fn test_default_token_expands() {
        let overrides = PartialOptions::new().meta_fields(["title", "default", "myExtra"]);
        let options = build_options(Some(&overrides)).expect("valid");

        let mut expected = to_owned_list(DEFAULT_META_FIELDS);
        expected.push("myExtra".to_string());
        assert_eq!(options.fields.meta, expected);
        assert!(!options.fields.meta.iter().any(|f| f == DEFAULT_TOKEN));
    }

    #[test]
    fn test_default_token_dedupes() {
        let requested: Vec<String> = ["default", "a", "title", "a", "default"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let expanded = expand_default_token(&["title", "link"], &requested);
        assert_eq!(expanded, vec!["title", "link", "a"]);
    }

    #[test]
    fn test_without_token_list_is_kept_verbatim() {
        let requested = vec!["b".to_string(), "a".to_string(), "b".to_string()];
        assert_eq!(expand_default_token(&["a"], &requested), requested);
    }

    #[test]
    fn test_required_and_uncleaned() {
        let overrides = PartialOptions::new()
            .required_episodes(["title", "enclosure"])
            .uncleaned_meta(["categories"]);
        let options = build_options(Some(&overrides)).expect("valid");

        assert!(options.required.episodes.contains("enclosure"));
        assert!(options.required.meta.is_empty());
        assert!(options.uncleaned.meta.contains("categories"));
    }

    #[test]
    fn test_overrides_do_not_touch_defaults() {
        let overrides = PartialOptions::new().meta_fields(["default", "extra"]);
        build_options(Some(&overrides)).expect("valid");
        assert_eq!(Options::default().fields.meta, to_owned_list(DEFAULT_META_FIELDS));
    }

    #[test]
    fn test_invalid_names_fail_fast() {
        let empty_name = PartialOptions::new().episode_fields(["title", " "]);
        assert!(matches!(
            build_options(Some(&empty_name)),
            Err(ExtractError::InvalidOptions(_))
        ));

        let token_in_required = PartialOptions::new().required_meta(["default"]);
        assert!(matches!(
            build_options(Some(&token_in_required)),
            Err(ExtractError::InvalidOptions(_))
        ));
    }

    #[test]
    fn test_from_toml() {
        let overrides = PartialOptions::from_toml_str(
            r#"
            [fields]
            meta = ["default", "podcast:guid"]

            [required]
            episodes = ["title"]
            "#,
        )
        .expect("valid toml");

        let options = build_options(Some(&overrides)).expect("valid");
        assert_eq!(options.fields.meta.last().map(String::as_str), Some("podcast:guid"));
        assert!(options.required.episodes.contains("title"));
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        assert!(PartialOptions::from_json_str(r#"{"fields": {"meta": "title"}}"#).is_err());
        assert!(PartialOptions::from_json_str(r#"{"unknown": {}}"#).is_err());

        let ok = PartialOptions::from_json_str(r#"{"uncleaned": {"episodes": ["duration"]}}"#)
            .expect("valid json");
        assert_eq!(
            ok.uncleaned.and_then(|u| u.episodes),
            Some(vec!["duration".to_string()])
        );
    }

    #[test]
    fn test_merge_overlays_sub_keys() {
        let mut base = PartialOptions::new()
            .meta_fields(["title"])
            .episode_fields(["title", "duration"]);
        base.merge(PartialOptions::new().episode_fields(["guid"]));

        let fields = base.fields.expect("fields set");
        assert_eq!(fields.meta, Some(vec!["title".to_string()]));
        assert_eq!(fields.episodes, Some(vec!["guid".to_string()]));
    }
}
