//! YAML parsing with position and style tracking.
//!
//! This module drives the `yaml-rust2` event parser and builds `YamlNode`
//! trees from the event stream. Unlike loading through serde, the event
//! markers give every node its line and column, and the source text is
//! consulted to tell flow collections (`[..]`, `{..}`) from block ones.
//!
//! # Example
//!
//! ```
//! use yptr::document::parser::parse_yaml;
//! use yptr::document::node::NodeKind;
//!
//! let doc = parse_yaml("name: Alice\nage: 30\n").unwrap();
//! assert_eq!(doc.kind(), NodeKind::Document);
//! assert_eq!(doc.unwrapped().kind(), NodeKind::Mapping);
//! ```

use std::collections::HashMap;

use anyhow::{anyhow, Context, Result};
use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser, Tag};
use yaml_rust2::scanner::{Marker, TScalarStyle};

use super::node::{parse_float, parse_int, NodeStyle, Position, YamlNode, YamlValue};

/// Builds node trees from parser events.
struct TreeBuilder {
    source: Vec<char>,
    documents: Vec<YamlNode>,
    /// Open collections with their anchor ids
    stack: Vec<(YamlNode, usize)>,
    anchors: HashMap<usize, YamlNode>,
}

impl TreeBuilder {
    fn new(source: &str) -> Self {
        Self {
            source: source.chars().collect(),
            documents: Vec::new(),
            stack: Vec::new(),
            anchors: HashMap::new(),
        }
    }

    /// Attaches a completed node to the open collection, or finishes a
    /// document when nothing is open.
    fn push_node(&mut self, node: YamlNode, anchor: usize) {
        if anchor > 0 {
            self.anchors.insert(anchor, node.clone());
        }
        match self.stack.last_mut() {
            Some((parent, _)) => match parent.value_mut() {
                YamlValue::Mapping(content) | YamlValue::Sequence(content) => content.push(node),
                _ => {}
            },
            None => self.documents.push(YamlNode::document(node)),
        }
    }

    /// Returns true if the collection starting at `index` opens with `open`.
    ///
    /// Event markers point at a node's properties when it has any, so anchors
    /// and tags are skipped first.
    fn is_flow_start(&self, index: usize, open: char) -> bool {
        let mut i = index;
        loop {
            match self.source.get(i) {
                Some(c) if c.is_whitespace() => i += 1,
                Some('&') | Some('!') => {
                    while self.source.get(i).is_some_and(|c| !c.is_whitespace()) {
                        i += 1;
                    }
                }
                Some(c) => return *c == open,
                None => return false,
            }
        }
    }
}

impl MarkedEventReceiver for TreeBuilder {
    fn on_event(&mut self, ev: Event, mark: Marker) {
        let position = Some(Position::new(mark.line(), mark.col() + 1));
        match ev {
            Event::Scalar(value, style, anchor, tag) => {
                let tag = match tag {
                    Some(tag) => tag_name(&tag),
                    None => resolve_scalar_tag(&value, style).to_string(),
                };
                let node = YamlNode::new(YamlValue::Scalar(value))
                    .with_tag(tag)
                    .with_style(scalar_style(style))
                    .with_position(position);
                self.push_node(node, anchor);
            }
            Event::SequenceStart(anchor, tag) => {
                let style = if self.is_flow_start(mark.index(), '[') {
                    NodeStyle::Flow
                } else {
                    NodeStyle::Plain
                };
                let mut node = YamlNode::sequence(Vec::new())
                    .with_style(style)
                    .with_position(position);
                if let Some(tag) = tag {
                    node = node.with_tag(tag_name(&tag));
                }
                self.stack.push((node, anchor));
            }
            Event::MappingStart(anchor, tag) => {
                let style = if self.is_flow_start(mark.index(), '{') {
                    NodeStyle::Flow
                } else {
                    NodeStyle::Plain
                };
                let mut node = YamlNode::mapping(Vec::new())
                    .with_style(style)
                    .with_position(position);
                if let Some(tag) = tag {
                    node = node.with_tag(tag_name(&tag));
                }
                self.stack.push((node, anchor));
            }
            Event::SequenceEnd | Event::MappingEnd => {
                if let Some((node, anchor)) = self.stack.pop() {
                    self.push_node(node, anchor);
                }
            }
            Event::Alias(id) => {
                // Aliases are expanded into a copy of the anchored node.
                let node = self
                    .anchors
                    .get(&id)
                    .cloned()
                    .unwrap_or_else(|| YamlNode::scalar("").with_tag("!!null"));
                self.push_node(node, 0);
            }
            _ => {}
        }
    }
}

fn scalar_style(style: TScalarStyle) -> NodeStyle {
    match style {
        TScalarStyle::SingleQuoted => NodeStyle::SingleQuoted,
        TScalarStyle::DoubleQuoted => NodeStyle::DoubleQuoted,
        TScalarStyle::Literal => NodeStyle::Literal,
        TScalarStyle::Folded => NodeStyle::Folded,
        _ => NodeStyle::Plain,
    }
}

/// Renders an explicit tag in its short `!!name` form where possible.
fn tag_name(tag: &Tag) -> String {
    if tag.handle == "!!" || tag.handle == "tag:yaml.org,2002:" {
        format!("!!{}", tag.suffix)
    } else {
        format!("{}{}", tag.handle, tag.suffix)
    }
}

/// Resolves the implicit tag of an untagged scalar (YAML 1.2 core schema).
pub(crate) fn resolve_scalar_tag(value: &str, style: TScalarStyle) -> &'static str {
    if style != TScalarStyle::Plain {
        return "!!str";
    }
    resolve_plain_tag(value)
}

/// Resolves the tag a plain scalar with this text would get.
pub(crate) fn resolve_plain_tag(value: &str) -> &'static str {
    match value {
        "" | "~" | "null" | "Null" | "NULL" => "!!null",
        "true" | "True" | "TRUE" | "false" | "False" | "FALSE" => "!!bool",
        _ if parse_int(value).is_some() => "!!int",
        _ if parse_float(value).is_some() => "!!float",
        _ => "!!str",
    }
}

/// Parses every document in a YAML stream.
///
/// Each returned node is a `Document` wrapping that document's root.
pub fn parse_yaml_documents(yaml_str: &str) -> Result<Vec<YamlNode>> {
    let mut builder = TreeBuilder::new(yaml_str);
    let mut parser = Parser::new_from_str(yaml_str);
    parser
        .load(&mut builder, true)
        .context("Failed to parse YAML")?;
    Ok(builder.documents)
}

/// Parses a YAML string into a `Document` node.
///
/// Only the first document of a multi-document stream is returned.
///
/// # Errors
///
/// Returns an error if the input is not valid YAML or contains no document.
///
/// # Example
///
/// ```
/// use yptr::document::parser::parse_yaml;
///
/// let doc = parse_yaml("[1, 2, 3]").unwrap();
/// assert_eq!(doc.unwrapped().children().len(), 3);
///
/// assert!(parse_yaml("key: [unclosed").is_err());
/// ```
pub fn parse_yaml(yaml_str: &str) -> Result<YamlNode> {
    let documents = parse_yaml_documents(yaml_str)?;
    let count = documents.len();
    let first = documents
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("No YAML document found"))?;
    if count > 1 {
        log::debug!("ignoring {} trailing YAML documents", count - 1);
    }
    Ok(first)
}
