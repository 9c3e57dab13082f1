//! YAML emission for node trees.
//!
//! Writes a `YamlNode` back to YAML text. Block collections are laid out with
//! a configurable indent, flow collections stay on one line, and scalars are
//! quoted only when their plain form would read back differently.
//!
//! # Example
//!
//! ```
//! use yptr::document::emitter::to_yaml_string;
//! use yptr::document::node::YamlNode;
//!
//! let node = YamlNode::mapping(vec![
//!     YamlNode::scalar("items"),
//!     YamlNode::sequence(vec![YamlNode::scalar("a"), YamlNode::scalar("b")]),
//! ]);
//! assert_eq!(to_yaml_string(&node, 4), "items:\n    - a\n    - b\n");
//! ```

use super::node::{NodeStyle, YamlNode, YamlValue};
use super::parser::resolve_plain_tag;

/// Serializes a node (or document) to YAML text ending with a newline.
pub fn to_yaml_string(node: &YamlNode, indent_size: usize) -> String {
    let mut emitter = Emitter {
        out: String::new(),
        indent_size: indent_size.max(1),
    };
    emitter.emit_root(node.unwrapped());
    emitter.out
}

/// Serializes several documents as one stream, separated by `---` lines.
///
/// ```
/// use yptr::document::emitter::to_yaml_stream_string;
/// use yptr::document::node::YamlNode;
///
/// let docs = [YamlNode::scalar("a"), YamlNode::scalar("b")];
/// assert_eq!(to_yaml_stream_string(&docs, 2), "a\n---\nb\n");
/// ```
pub fn to_yaml_stream_string(documents: &[YamlNode], indent_size: usize) -> String {
    let mut out = String::new();
    for (i, document) in documents.iter().enumerate() {
        if i > 0 {
            out.push_str("---\n");
        }
        out.push_str(&to_yaml_string(document, indent_size));
    }
    out
}

struct Emitter {
    out: String,
    indent_size: usize,
}

impl Emitter {
    fn emit_root(&mut self, node: &YamlNode) {
        if !is_block(node) {
            let text = inline(node, false);
            self.out.push_str(&text);
            self.out.push('\n');
            return;
        }
        if let Some(tag) = explicit_tag(node) {
            self.out.push_str(&tag);
            self.out.push('\n');
        }
        match node.value() {
            YamlValue::Mapping(_) => self.emit_mapping(node, 0, false, self.indent_size),
            _ => self.emit_sequence(node, 0, false),
        }
    }

    fn pad(&mut self, column: usize) {
        self.out.extend(std::iter::repeat(' ').take(column));
    }

    /// Writes a block mapping with keys at `key_col`. When `first_inline` is
    /// set the cursor already sits where the first key goes.
    fn emit_mapping(&mut self, node: &YamlNode, key_col: usize, first_inline: bool, child_col: usize) {
        for (i, (key, value)) in node.pairs().enumerate() {
            if i > 0 || !first_inline {
                self.pad(key_col);
            }
            let key_text = inline(key, false);
            self.out.push_str(&key_text);
            self.out.push(':');
            self.emit_value(value, child_col);
        }
    }

    /// Writes the value after a `key:`.
    fn emit_value(&mut self, value: &YamlNode, child_col: usize) {
        if !is_block(value) {
            self.out.push(' ');
            let text = inline(value, false);
            self.out.push_str(&text);
            self.out.push('\n');
            return;
        }
        if let Some(tag) = explicit_tag(value) {
            self.out.push(' ');
            self.out.push_str(&tag);
        }
        self.out.push('\n');
        match value.value() {
            YamlValue::Mapping(_) => {
                let nested = child_col + self.indent_size;
                self.emit_mapping(value, child_col, false, nested);
            }
            _ => self.emit_sequence(value, child_col, false),
        }
    }

    /// Writes a block sequence with dashes at `dash_col`.
    fn emit_sequence(&mut self, node: &YamlNode, dash_col: usize, first_inline: bool) {
        for (i, item) in node.children().iter().enumerate() {
            if i > 0 || !first_inline {
                self.pad(dash_col);
            }
            self.out.push_str("- ");
            if !is_block(item) {
                let text = inline(item, false);
                self.out.push_str(&text);
                self.out.push('\n');
                continue;
            }
            // A tagged block starts on the line after its tag.
            let inline_start = match explicit_tag(item) {
                Some(tag) => {
                    self.out.push_str(&tag);
                    self.out.push('\n');
                    false
                }
                None => true,
            };
            match item.value() {
                YamlValue::Mapping(_) => {
                    let nested = (dash_col + self.indent_size).max(dash_col + 4);
                    self.emit_mapping(item, dash_col + 2, inline_start, nested);
                }
                _ => self.emit_sequence(item, dash_col + 2, inline_start),
            }
        }
    }
}

/// Non-empty collections not written in flow style.
fn is_block(node: &YamlNode) -> bool {
    match node.value() {
        YamlValue::Mapping(content) | YamlValue::Sequence(content) => {
            !content.is_empty() && node.style() != NodeStyle::Flow
        }
        YamlValue::Document(root) => is_block(root),
        YamlValue::Scalar(_) => false,
    }
}

/// Tags the core schema resolves without help; they are never written.
const CORE_TAGS: [&str; 7] = ["!!str", "!!int", "!!float", "!!bool", "!!null", "!!map", "!!seq"];

/// The tag to write in front of a node, if it carries a non-core one.
fn explicit_tag(node: &YamlNode) -> Option<String> {
    let tag = node.tag();
    if tag.is_empty() || CORE_TAGS.contains(&tag) {
        None
    } else if tag.starts_with('!') {
        Some(tag.to_string())
    } else {
        Some(format!("!<{}>", tag))
    }
}

/// Renders a node on a single line, tag first.
fn inline(node: &YamlNode, in_flow: bool) -> String {
    let body = inline_body(node, in_flow);
    match explicit_tag(node) {
        Some(tag) => format!("{} {}", tag, body),
        None => body,
    }
}

fn inline_body(node: &YamlNode, in_flow: bool) -> String {
    match node.value() {
        YamlValue::Document(root) => inline(root, in_flow),
        YamlValue::Mapping(_) => {
            let parts: Vec<String> = node
                .pairs()
                .map(|(k, v)| format!("{}: {}", inline(k, true), inline(v, true)))
                .collect();
            format!("{{{}}}", parts.join(", "))
        }
        YamlValue::Sequence(items) => {
            let parts: Vec<String> = items.iter().map(|item| inline(item, true)).collect();
            format!("[{}]", parts.join(", "))
        }
        YamlValue::Scalar(s) => scalar_text(s, node.tag(), node.style(), in_flow),
    }
}

fn scalar_text(s: &str, tag: &str, style: NodeStyle, in_flow: bool) -> String {
    match style {
        _ if s.is_empty() && tag == "!!null" => "~".to_string(),
        NodeStyle::DoubleQuoted => double_quoted(s),
        NodeStyle::SingleQuoted if !s.contains('\n') => format!("'{}'", s.replace('\'', "''")),
        _ if is_plain_safe(s, tag, in_flow) => s.to_string(),
        _ => double_quoted(s),
    }
}

/// Whether `s` can be written unquoted and still read back as the same
/// scalar with the same tag.
fn is_plain_safe(s: &str, tag: &str, in_flow: bool) -> bool {
    let Some(first) = s.chars().next() else {
        return false;
    };
    if s.starts_with(char::is_whitespace) || s.ends_with(char::is_whitespace) {
        return false;
    }
    if s.chars().any(|c| c.is_control()) {
        return false;
    }
    let second = s.chars().nth(1);
    match first {
        '-' | '?' | ':' => {
            if second.map_or(true, char::is_whitespace) {
                return false;
            }
        }
        ',' | '[' | ']' | '{' | '}' | '#' | '&' | '*' | '!' | '|' | '>' | '\'' | '"' | '%'
        | '@' | '`' => return false,
        _ => {}
    }
    // Would read as a document marker at the start of a line.
    if s.starts_with("---") || s.starts_with("...") {
        return false;
    }
    if s.contains(": ") || s.contains(" #") || s.ends_with(':') {
        return false;
    }
    if in_flow && s.contains([',', '[', ']', '{', '}']) {
        return false;
    }
    // A plain scalar that would resolve to a different tag must be quoted.
    tag != "!!str" || resolve_plain_tag(s) == "!!str"
}

fn double_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parser::parse_yaml;

    fn roundtrip(src: &str, indent: usize) -> String {
        to_yaml_string(&parse_yaml(src).unwrap(), indent)
    }

    #[test]
    fn test_emit_scalar_root() {
        assert_eq!(to_yaml_string(&YamlNode::scalar("x"), 2), "x\n");
    }

    #[test]
    fn test_emit_nested_mapping() {
        assert_eq!(roundtrip("a:\n  b: c\n", 2), "a:\n  b: c\n");
        assert_eq!(roundtrip("a:\n  b: c\n", 4), "a:\n    b: c\n");
    }

    #[test]
    fn test_emit_mapping_in_sequence() {
        let src = "- f:\n    g: x\n  h: y\n- - i\n  - j\n";
        assert_eq!(roundtrip(src, 4), "- f:\n    g: x\n  h: y\n- - i\n  - j\n");
        assert_eq!(roundtrip(src, 2), "- f:\n    g: x\n  h: y\n- - i\n  - j\n");
    }

    #[test]
    fn test_emit_keeps_flow_style() {
        assert_eq!(roundtrip("a: [1, 2, 3]\nb: {c: d}\n", 2), "a: [1, 2, 3]\nb: {c: d}\n");
    }

    #[test]
    fn test_emit_empty_collections() {
        let node = YamlNode::mapping(vec![
            YamlNode::scalar("m"),
            YamlNode::mapping(vec![]),
            YamlNode::scalar("s"),
            YamlNode::sequence(vec![]),
        ]);
        assert_eq!(to_yaml_string(&node, 2), "m: {}\ns: []\n");
    }

    #[test]
    fn test_emit_quotes_when_needed() {
        let node = YamlNode::mapping(vec![
            YamlNode::scalar("{\"b\":\"c\"}"),
            YamlNode::scalar("d"),
            YamlNode::scalar("n"),
            YamlNode::scalar("42"),
            YamlNode::scalar("colon"),
            YamlNode::scalar("a: b"),
            YamlNode::scalar("empty"),
            YamlNode::scalar(""),
        ]);
        assert_eq!(
            to_yaml_string(&node, 2),
            "\"{\\\"b\\\":\\\"c\\\"}\": d\nn: \"42\"\ncolon: \"a: b\"\nempty: \"\"\n"
        );
    }

    #[test]
    fn test_emit_keeps_quote_style() {
        assert_eq!(roundtrip("a: 'x'\nb: \"y\"\n", 2), "a: 'x'\nb: \"y\"\n");
    }

    #[test]
    fn test_emit_typed_scalars_plain() {
        assert_eq!(roundtrip("n: 42\nb: true\nz: ~\n", 2), "n: 42\nb: true\nz: ~\n");
    }

    #[test]
    fn test_emit_multiline_scalar_is_escaped() {
        let node = YamlNode::scalar("line one\nline two");
        assert_eq!(to_yaml_string(&node, 2), "\"line one\\nline two\"\n");
    }

    #[test]
    fn test_emit_quotes_document_markers() {
        assert_eq!(to_yaml_string(&YamlNode::scalar("--- x"), 2), "\"--- x\"\n");
        assert_eq!(to_yaml_string(&YamlNode::scalar("... y"), 2), "\"... y\"\n");
        let reparsed = parse_yaml(&to_yaml_string(&YamlNode::scalar("--- x"), 2)).unwrap();
        assert_eq!(reparsed.unwrapped().as_scalar(), Some("--- x"));
    }

    #[test]
    fn test_emit_keeps_custom_tags() {
        let src = "a: !Ref foo\nb: !env\n  k: v\nc:\n- !item\n  n: 1\n- !Sub [x]\n";
        let text = roundtrip(src, 2);
        assert_eq!(text, "a: !Ref foo\nb: !env\n  k: v\nc:\n  - !item\n    n: 1\n  - !Sub [x]\n");
        let reparsed = parse_yaml(&text).unwrap();
        assert!(parse_yaml(src).unwrap().same_content(&reparsed));
    }

    #[test]
    fn test_emit_core_tags_are_implicit() {
        assert_eq!(roundtrip("a: !!str 42\n", 2), "a: \"42\"\n");
    }

    #[test]
    fn test_emit_stream_separates_documents() {
        let docs = crate::document::parser::parse_yaml_documents("a: 1\n---\n- b\n").unwrap();
        assert_eq!(to_yaml_stream_string(&docs, 2), "a: 1\n---\n- b\n");
    }

    #[test]
    fn test_emitted_text_parses_back() {
        let src = "kind: Deployment\nspec:\n  containers:\n  - name: app\n    ports: [80, 443]\n  - name: \"sidecar: x\"\n";
        let doc = parse_yaml(src).unwrap();
        let text = to_yaml_string(&doc, 2);
        let reparsed = parse_yaml(&text).unwrap();
        assert!(doc.unwrapped().same_content(reparsed.unwrapped()));
    }
}
