// crates/feed-parser/tests/parser_tests.rs
//! Document tree conversion tests

use podfeed_feed_parser::{FeedError, FeedParser};
use serde_json::json;
use std::io::Write;

#[test]
fn test_namespaced_elements_keep_prefix() {
    let rss = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:itunes="http://www.itunes.com/dtds/podcast-1.0.dtd" xmlns:podcast="https://podcastindex.org/namespace/1.0">
  <channel>
    <itunes:image href="https://example.com/cover.jpg"/>
    <itunes:category text="Arts">
      <itunes:category text="Books"/>
    </itunes:category>
    <podcast:funding url="https://example.com/donate">Support us</podcast:funding>
  </channel>
</rss>"#;

    let document = FeedParser::parse(rss).expect("Should parse");
    let rss = &document["rss"];
    assert_eq!(
        rss["$"]["xmlns:itunes"],
        json!("http://www.itunes.com/dtds/podcast-1.0.dtd")
    );

    let channel = &rss["channel"][0];
    assert_eq!(
        channel["itunes:image"],
        json!([{"$": {"href": "https://example.com/cover.jpg"}}])
    );
    assert_eq!(
        channel["itunes:category"],
        json!([{
            "$": {"text": "Arts"},
            "itunes:category": [{"$": {"text": "Books"}}]
        }])
    );
    assert_eq!(
        channel["podcast:funding"],
        json!([{"_": "Support us", "$": {"url": "https://example.com/donate"}}])
    );
}

#[test]
fn test_nested_owner() {
    let rss = r#"<rss><channel>
    <itunes:owner>
      <itunes:name>Jane Doe</itunes:name>
      <itunes:email>jane@example.com</itunes:email>
    </itunes:owner>
</channel></rss>"#;

    let document = FeedParser::parse(rss).expect("Should parse");
    assert_eq!(
        document["rss"]["channel"][0]["itunes:owner"],
        json!([{"itunes:name": ["Jane Doe"], "itunes:email": ["jane@example.com"]}])
    );
}

#[test]
fn test_comments_and_doctype_are_ignored() {
    let rss = r#"<?xml version="1.0"?>
<!DOCTYPE rss>
<!-- generated -->
<rss><channel><!-- note --><title>T</title></channel></rss>"#;

    let document = FeedParser::parse(rss).expect("Should parse");
    assert_eq!(document, json!({"rss": {"channel": [{"title": ["T"]}]}}));
}

#[test]
fn test_malformed_xml() {
    let bad_xml = "<rss><channel><title>Unclosed";
    let result = FeedParser::parse(bad_xml);
    assert!(matches!(
        result,
        Err(FeedError::InvalidXml(_)) | Err(FeedError::XmlParse(_))
    ));
}

#[test]
fn test_mismatched_tags() {
    let result = FeedParser::parse("<rss><channel><title>x</channel></title></rss>");
    assert!(result.is_err());
}

#[test]
fn test_parse_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(file, "<rss><channel><title>From disk</title></channel></rss>").expect("write");

    let document = FeedParser::parse_file(file.path()).expect("Should parse file");
    assert_eq!(document["rss"]["channel"][0]["title"], json!(["From disk"]));
}

#[test]
fn test_parse_missing_file() {
    let result = FeedParser::parse_file("/definitely/not/here.xml");
    assert!(matches!(result, Err(FeedError::Io(_))));
}
