//! Matches a single pointer token against a node.

use super::error::PointerError;
use super::subset::is_subset;
use crate::document::node::{YamlNode, YamlValue};
use crate::document::parser::parse_yaml;

const APPEND_TOKEN: &str = "-";
const PREDICATE_PREFIX: &str = "~{";

/// The outcome of matching one token.
#[derive(Debug, Clone, PartialEq)]
pub enum Match<'a> {
    /// Existing nodes selected by the token, in document order.
    Nodes(Vec<&'a YamlNode>),
    /// The `-` token: the position after the last element of a sequence.
    AppendPosition,
}

/// Sequence match expressed as element indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SequenceMatch {
    Elements(Vec<usize>),
    Append,
}

/// Matches `token` against `node`.
///
/// Documents are looked through. Against a mapping the token is a key name;
/// against a sequence it is an index, `-`, or a `~{...}` predicate selecting
/// every element the pattern is a subset of.
///
/// # Example
///
/// ```
/// use yptr::document::parser::parse_yaml;
/// use yptr::pointer::{match_token, Match};
///
/// let doc = parse_yaml("[a, b, c]").unwrap();
/// match match_token(&doc, "1").unwrap() {
///     Match::Nodes(nodes) => assert_eq!(nodes[0].as_scalar(), Some("b")),
///     Match::AppendPosition => unreachable!(),
/// }
/// assert_eq!(match_token(&doc, "-").unwrap(), Match::AppendPosition);
/// ```
pub fn match_token<'a>(node: &'a YamlNode, token: &str) -> Result<Match<'a>, PointerError> {
    match node.value() {
        YamlValue::Document(root) => match_token(root, token),
        YamlValue::Mapping(content) => {
            let index = match_mapping(content, token)?;
            Ok(Match::Nodes(vec![&content[index]]))
        }
        YamlValue::Sequence(items) => match match_sequence(items, token)? {
            SequenceMatch::Elements(indices) => {
                Ok(Match::Nodes(indices.into_iter().map(|i| &items[i]).collect()))
            }
            SequenceMatch::Append => Ok(Match::AppendPosition),
        },
        YamlValue::Scalar(_) => Err(PointerError::unhandled(node)),
    }
}

/// Finds the value paired with the key named `token`; returns its index in
/// the flat mapping content.
pub(crate) fn match_mapping(content: &[YamlNode], token: &str) -> Result<usize, PointerError> {
    if content.len() % 2 != 0 {
        return Err(PointerError::MalformedTree { len: content.len() });
    }
    content
        .chunks_exact(2)
        .position(|pair| pair[0].as_scalar() == Some(token))
        .map(|pair| pair * 2 + 1)
        .ok_or_else(|| PointerError::NotFound {
            token: token.to_string(),
        })
}

pub(crate) fn match_sequence(items: &[YamlNode], token: &str) -> Result<SequenceMatch, PointerError> {
    if token.starts_with(PREDICATE_PREFIX) {
        let pattern = parse_predicate(token)?;
        let indices: Vec<usize> = items
            .iter()
            .enumerate()
            .filter(|(_, item)| is_subset(&pattern, item))
            .map(|(i, _)| i)
            .collect();
        log::trace!("predicate {} selected {} of {} elements", token, indices.len(), items.len());
        return Ok(SequenceMatch::Elements(indices));
    }
    if token == APPEND_TOKEN {
        return Ok(SequenceMatch::Append);
    }
    let index = parse_index(token, items.len())?;
    Ok(SequenceMatch::Elements(vec![index]))
}

/// Parses a sequence index and checks it against `len`.
pub(crate) fn parse_index(token: &str, len: usize) -> Result<usize, PointerError> {
    let index: i64 = token.parse().map_err(|_| PointerError::NotAnIndex {
        token: token.to_string(),
    })?;
    match usize::try_from(index) {
        Ok(i) if i < len => Ok(i),
        _ => Err(PointerError::OutOfBounds { index, len }),
    }
}

/// Parses the text after `~` as an inline document.
fn parse_predicate(token: &str) -> Result<YamlNode, PointerError> {
    parse_yaml(&token[1..])
        .map(YamlNode::into_unwrapped)
        .map_err(|e| PointerError::InvalidPredicate {
            token: token.to_string(),
            message: format!("{:#}", e),
        })
}
