// crates/feed-parser/src/parser.rs
//! Conversion of feed XML into a document tree

use crate::error::{FeedError, FeedResult};
use podfeed_extractor::{extract_podcast, PartialOptions, Podcast, ATTRIBUTES_KEY, TEXT_KEY};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::{Map, Value};
use std::path::Path;

/// Feed parser
pub struct FeedParser;

impl FeedParser {
    /// Parses feed XML into a document tree
    ///
    /// Every element becomes a key holding the sequence of its occurrences.
    /// Elements with neither attributes nor children collapse to their
    /// text. Attributes are stored under `$`, and the text of elements that
    /// also have attributes or children under `_`.
    pub fn parse(content: &str) -> FeedResult<Value> {
        let mut reader = Reader::from_str(content);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<Frame> = Vec::new();
        let mut root: Option<Value> = None;

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    Self::ensure_single_root(&root)?;
                    stack.push(Frame::open(&e)?);
                }
                Event::Empty(e) => {
                    Self::ensure_single_root(&root)?;
                    let frame = Frame::open(&e)?;
                    Self::close(frame, &mut stack, &mut root);
                }
                Event::Text(e) => {
                    let text = e
                        .unescape()
                        .map_err(|err| FeedError::XmlParse(err.to_string()))?;
                    match stack.last_mut() {
                        Some(frame) => frame.text.push_str(&text),
                        None if text.trim().is_empty() => {}
                        None => {
                            return Err(FeedError::InvalidXml(
                                "text outside of the root element".to_string(),
                            ))
                        }
                    }
                }
                Event::CData(e) => {
                    let data = e.into_inner();
                    if let Some(frame) = stack.last_mut() {
                        frame.text.push_str(&String::from_utf8_lossy(&data));
                    }
                }
                Event::End(_) => {
                    let frame = stack.pop().ok_or_else(|| {
                        FeedError::InvalidXml("closing tag without opening tag".to_string())
                    })?;
                    Self::close(frame, &mut stack, &mut root);
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(FeedError::InvalidXml(format!(
                "unclosed element <{}>",
                open.name
            )));
        }

        let root = root.ok_or_else(|| FeedError::InvalidXml("no root element".to_string()))?;
        if let Some(name) = root.as_object().and_then(|document| document.keys().next()) {
            log::debug!("Parsed feed document with root <{}>", name);
        }
        Ok(root)
    }

    /// Reads and parses a feed file
    pub fn parse_file(path: impl AsRef<Path>) -> FeedResult<Value> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parses feed XML and extracts the podcast from it
    pub fn parse_podcast(content: &str, options: Option<&PartialOptions>) -> FeedResult<Podcast> {
        let document = Self::parse(content)?;
        Ok(extract_podcast(&document, options)?)
    }

    fn ensure_single_root(root: &Option<Value>) -> FeedResult<()> {
        if root.is_some() {
            return Err(FeedError::InvalidXml("multiple root elements".to_string()));
        }
        Ok(())
    }

    fn close(frame: Frame, stack: &mut [Frame], root: &mut Option<Value>) {
        let name = frame.name.clone();
        let value = frame.into_value();

        match stack.last_mut() {
            Some(parent) => match parent.children.get_mut(&name) {
                Some(Value::Array(siblings)) => siblings.push(value),
                _ => {
                    parent.children.insert(name, Value::Array(vec![value]));
                }
            },
            None => {
                let mut document = Map::new();
                document.insert(name, value);
                *root = Some(Value::Object(document));
            }
        }
    }
}

/// An element whose end tag has not been seen yet
struct Frame {
    name: String,
    attributes: Map<String, Value>,
    children: Map<String, Value>,
    text: String,
}

impl Frame {
    fn open(start: &BytesStart<'_>) -> FeedResult<Self> {
        let name = String::from_utf8_lossy(start.name().as_ref()).to_string();

        let mut attributes = Map::new();
        for attr in start.attributes() {
            let attr = attr?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
            let value = attr
                .unescape_value()
                .map_err(|err| FeedError::XmlParse(err.to_string()))?
                .to_string();
            attributes.insert(key, Value::String(value));
        }

        Ok(Self {
            name,
            attributes,
            children: Map::new(),
            text: String::new(),
        })
    }

    fn into_value(self) -> Value {
        if self.attributes.is_empty() && self.children.is_empty() {
            return Value::String(self.text);
        }

        let mut object = self.children;
        if !self.attributes.is_empty() {
            object.insert(ATTRIBUTES_KEY.to_string(), Value::Object(self.attributes));
        }
        if !self.text.trim().is_empty() {
            object.insert(TEXT_KEY.to_string(), Value::String(self.text));
        }
        Value::Object(object)
    }
}
