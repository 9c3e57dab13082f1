//! YAML node representation with position and style tracking.
//!
//! This module provides the tree that pointers are resolved against. Each
//! `YamlNode` wraps a `YamlValue` (one variant per node kind) together with its
//! type tag and metadata recording where the node came from and how it was
//! written, so that inserted structure can be emitted next to untouched source.
//!
//! # Example
//!
//! ```
//! use yptr::document::node::{YamlNode, YamlValue, NodeKind};
//!
//! // A mapping is stored as interleaved keys and values
//! let node = YamlNode::mapping(vec![
//!     YamlNode::scalar("name"),
//!     YamlNode::scalar("yptr"),
//! ]);
//! assert_eq!(node.kind(), NodeKind::Mapping);
//! assert_eq!(node.tag(), "!!map");
//!
//! if let YamlValue::Mapping(content) = node.value() {
//!     assert_eq!(content.len(), 2);
//! }
//! ```

use std::fmt;

/// Line and column of a node in the source text, both 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// How a node was written in the source.
///
/// Collections are either block (`Plain`) or `Flow`; scalars keep their quoting
/// or block scalar style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeStyle {
    #[default]
    Plain,
    Flow,
    SingleQuoted,
    DoubleQuoted,
    Literal,
    Folded,
}

/// The kind of a node, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Mapping,
    Sequence,
    Scalar,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Document => "document",
            NodeKind::Mapping => "mapping",
            NodeKind::Sequence => "sequence",
            NodeKind::Scalar => "scalar",
        };
        f.write_str(name)
    }
}

/// A YAML value without metadata.
#[derive(Debug, Clone, PartialEq)]
pub enum YamlValue {
    /// Transparent wrapper around the root of a parsed document
    Document(Box<YamlNode>),
    /// Interleaved keys and values: `[key0, value0, key1, value1, ...]`
    Mapping(Vec<YamlNode>),
    /// Ordered elements
    Sequence(Vec<YamlNode>),
    /// Scalar text, uninterpreted
    Scalar(String),
}

/// Metadata associated with a YAML node.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NodeMetadata {
    /// Where the node started in the source, if it was parsed
    pub position: Option<Position>,
    /// Presentation style used by the emitter
    pub style: NodeStyle,
}

/// A YAML value wrapped with its tag and metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct YamlNode {
    pub(crate) value: YamlValue,
    pub(crate) tag: String,
    pub(crate) metadata: NodeMetadata,
}

impl YamlNode {
    /// Creates a new node with the default tag for its kind and no position.
    ///
    /// # Example
    ///
    /// ```
    /// use yptr::document::node::{YamlNode, YamlValue};
    ///
    /// let node = YamlNode::new(YamlValue::Sequence(vec![]));
    /// assert_eq!(node.tag(), "!!seq");
    /// assert!(node.position().is_none());
    /// ```
    pub fn new(value: YamlValue) -> Self {
        let tag = match &value {
            YamlValue::Document(_) => "",
            YamlValue::Mapping(_) => "!!map",
            YamlValue::Sequence(_) => "!!seq",
            YamlValue::Scalar(_) => "!!str",
        };
        Self {
            value,
            tag: tag.to_string(),
            metadata: NodeMetadata::default(),
        }
    }

    /// Creates a `!!str` scalar node.
    pub fn scalar(value: impl Into<String>) -> Self {
        Self::new(YamlValue::Scalar(value.into()))
    }

    /// Creates a block mapping from interleaved keys and values.
    pub fn mapping(content: Vec<YamlNode>) -> Self {
        Self::new(YamlValue::Mapping(content))
    }

    /// Creates a block sequence.
    pub fn sequence(items: Vec<YamlNode>) -> Self {
        Self::new(YamlValue::Sequence(items))
    }

    /// Wraps `root` in a document node.
    pub fn document(root: YamlNode) -> Self {
        let position = root.metadata.position;
        Self::new(YamlValue::Document(Box::new(root))).with_position(position)
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_style(mut self, style: NodeStyle) -> Self {
        self.metadata.style = style;
        self
    }

    pub fn with_position(mut self, position: Option<Position>) -> Self {
        self.metadata.position = position;
        self
    }

    pub fn value(&self) -> &YamlValue {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut YamlValue {
        &mut self.value
    }

    pub fn kind(&self) -> NodeKind {
        match self.value {
            YamlValue::Document(_) => NodeKind::Document,
            YamlValue::Mapping(_) => NodeKind::Mapping,
            YamlValue::Sequence(_) => NodeKind::Sequence,
            YamlValue::Scalar(_) => NodeKind::Scalar,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn style(&self) -> NodeStyle {
        self.metadata.style
    }

    pub fn position(&self) -> Option<Position> {
        self.metadata.position
    }

    /// Returns the scalar text, or `None` for any other kind.
    pub fn as_scalar(&self) -> Option<&str> {
        match &self.value {
            YamlValue::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self.value, YamlValue::Mapping(_))
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self.value, YamlValue::Sequence(_))
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self.value, YamlValue::Scalar(_))
    }

    /// Returns the child nodes: the flat key/value list of a mapping, the
    /// elements of a sequence, or the single root of a document.
    pub fn children(&self) -> &[YamlNode] {
        match &self.value {
            YamlValue::Document(root) => std::slice::from_ref(root.as_ref()),
            YamlValue::Mapping(content) | YamlValue::Sequence(content) => content,
            YamlValue::Scalar(_) => &[],
        }
    }

    /// Iterates the key/value pairs of a mapping. A trailing unpaired key is
    /// skipped.
    pub fn pairs(&self) -> impl Iterator<Item = (&YamlNode, &YamlNode)> {
        let content: &[YamlNode] = match &self.value {
            YamlValue::Mapping(content) => content,
            _ => &[],
        };
        content.chunks_exact(2).map(|pair| (&pair[0], &pair[1]))
    }

    /// Strips any document wrappers.
    pub fn unwrapped(&self) -> &YamlNode {
        match &self.value {
            YamlValue::Document(root) => root.unwrapped(),
            _ => self,
        }
    }

    pub fn unwrapped_mut(&mut self) -> &mut YamlNode {
        match self.value {
            YamlValue::Document(ref mut root) => root.unwrapped_mut(),
            _ => self,
        }
    }

    pub fn into_unwrapped(self) -> YamlNode {
        match self.value {
            YamlValue::Document(root) => root.into_unwrapped(),
            _ => self,
        }
    }

    /// Compares kind, tag and content recursively, ignoring positions and
    /// styles.
    ///
    /// # Example
    ///
    /// ```
    /// use yptr::document::node::{NodeStyle, Position, YamlNode};
    ///
    /// let a = YamlNode::scalar("x").with_position(Some(Position::new(3, 4)));
    /// let b = YamlNode::scalar("x").with_style(NodeStyle::DoubleQuoted);
    /// assert!(a.same_content(&b));
    /// assert_ne!(a, b);
    /// ```
    pub fn same_content(&self, other: &YamlNode) -> bool {
        if self.tag != other.tag {
            return false;
        }
        match (&self.value, &other.value) {
            (YamlValue::Scalar(a), YamlValue::Scalar(b)) => a == b,
            (YamlValue::Document(a), YamlValue::Document(b)) => a.same_content(b),
            (YamlValue::Mapping(a), YamlValue::Mapping(b))
            | (YamlValue::Sequence(a), YamlValue::Sequence(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.same_content(y))
            }
            _ => false,
        }
    }
}

/// Interprets a scalar according to its tag. Unknown tags and unparseable
/// numbers fall back to strings.
impl From<&YamlNode> for serde_yaml::Value {
    fn from(node: &YamlNode) -> Self {
        match node.value() {
            YamlValue::Document(root) => serde_yaml::Value::from(root.as_ref()),
            YamlValue::Mapping(_) => {
                let mut map = serde_yaml::Mapping::new();
                for (key, value) in node.pairs() {
                    map.insert(serde_yaml::Value::from(key), serde_yaml::Value::from(value));
                }
                serde_yaml::Value::Mapping(map)
            }
            YamlValue::Sequence(items) => {
                serde_yaml::Value::Sequence(items.iter().map(serde_yaml::Value::from).collect())
            }
            YamlValue::Scalar(s) => scalar_to_value(node.tag(), s),
        }
    }
}

fn scalar_to_value(tag: &str, s: &str) -> serde_yaml::Value {
    match tag {
        "!!null" => serde_yaml::Value::Null,
        "!!bool" => match s.to_ascii_lowercase().as_str() {
            "true" => serde_yaml::Value::Bool(true),
            "false" => serde_yaml::Value::Bool(false),
            _ => serde_yaml::Value::String(s.to_string()),
        },
        "!!int" => match parse_int(s) {
            Some(i) => serde_yaml::Value::Number(serde_yaml::Number::from(i)),
            None => serde_yaml::Value::String(s.to_string()),
        },
        "!!float" => match parse_float(s) {
            Some(f) => serde_yaml::Value::Number(serde_yaml::Number::from(f)),
            None => serde_yaml::Value::String(s.to_string()),
        },
        _ => serde_yaml::Value::String(s.to_string()),
    }
}

/// Parses a YAML 1.2 core schema integer (decimal, `0x` or `0o`).
pub(crate) fn parse_int(s: &str) -> Option<i64> {
    if let Some(hex) = s.strip_prefix("0x") {
        return i64::from_str_radix(hex, 16).ok();
    }
    if let Some(oct) = s.strip_prefix("0o") {
        return i64::from_str_radix(oct, 8).ok();
    }
    s.parse::<i64>().ok()
}

/// Parses a YAML 1.2 core schema float, including `.inf` and `.nan`.
pub(crate) fn parse_float(s: &str) -> Option<f64> {
    match s {
        ".inf" | ".Inf" | ".INF" | "+.inf" | "+.Inf" | "+.INF" => Some(f64::INFINITY),
        "-.inf" | "-.Inf" | "-.INF" => Some(f64::NEG_INFINITY),
        ".nan" | ".NaN" | ".NAN" => Some(f64::NAN),
        _ => {
            let numeric = s.chars().any(|c| c.is_ascii_digit())
                && s
                    .chars()
                    .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
            if numeric {
                s.parse::<f64>().ok()
            } else {
                None
            }
        }
    }
}
