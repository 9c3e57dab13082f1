//! Pointer-directed insertion.
//!
//! Insertion never replaces existing content: a value lands either in a newly
//! created location, merged into an existing mapping, or in front of an
//! existing sequence element. Missing mapping keys along the path are created
//! with empty mappings as placeholders.
//!
//! Every check that can fail runs before the first write, so a failed insert
//! leaves the tree as it was.

use super::error::{ErrorKind, PointerError};
use super::matcher::{match_mapping, match_sequence, parse_index, SequenceMatch};
use super::tokenizer::Pointer;
use crate::document::node::{YamlNode, YamlValue};

const APPEND_TOKEN: &str = "-";

/// Inserts `value` at `pointer` inside `root`.
///
/// Document wrappers around `root` and `value` are ignored. The empty pointer
/// addresses the root itself, so a mapping value is merged into a root
/// mapping.
///
/// `-` is only special against an existing sequence; it appends to it but
/// never creates a new sequence.
///
/// # Example
///
/// ```
/// use yptr::document::parser::parse_yaml;
/// use yptr::document::to_yaml_string;
/// use yptr::pointer::insert;
///
/// let mut doc = parse_yaml("a: [x]\n").unwrap();
/// insert(&mut doc, "/a/-", parse_yaml("y").unwrap()).unwrap();
/// insert(&mut doc, "/b/c", parse_yaml("z").unwrap()).unwrap();
/// assert_eq!(to_yaml_string(&doc, 2), "a: [x, y]\nb:\n  c: z\n");
/// ```
pub fn insert(root: &mut YamlNode, pointer: &str, value: YamlNode) -> Result<(), PointerError> {
    let parsed = Pointer::parse(pointer)?;
    log::debug!("inserting {} at {:?}", value.kind(), pointer);
    insert_at(root.unwrapped_mut(), parsed.tokens(), value.into_unwrapped())
        .map_err(|e| e.with_pointer(pointer))
}

fn insert_at(target: &mut YamlNode, tokens: &[String], value: YamlNode) -> Result<(), PointerError> {
    let Some((token, rest)) = tokens.split_first() else {
        return insert_terminal(target, value);
    };
    match target.value {
        YamlValue::Document(ref mut root) => insert_at(root, tokens, value),
        YamlValue::Mapping(ref mut content) => insert_into_mapping(content, token, rest, value),
        YamlValue::Sequence(ref mut items) => insert_into_sequence(items, token, rest, value),
        YamlValue::Scalar(_) => Err(PointerError::unhandled(target)),
    }
}

/// Writes `value` at an existing location: merged into a mapping, or
/// replacing an empty placeholder mapping.
fn insert_terminal(target: &mut YamlNode, value: YamlNode) -> Result<(), PointerError> {
    let YamlValue::Mapping(content) = &mut target.value else {
        return Err(PointerError::cannot_insert(&value, target));
    };
    match value.value {
        // Plain append: keys already present are not replaced.
        YamlValue::Mapping(pairs) => {
            content.extend(pairs);
            Ok(())
        }
        _ if content.is_empty() => {
            *target = value;
            Ok(())
        }
        _ => Err(PointerError::cannot_insert(&value, target)),
    }
}

fn insert_into_mapping(
    content: &mut Vec<YamlNode>,
    token: &str,
    rest: &[String],
    value: YamlNode,
) -> Result<(), PointerError> {
    match match_mapping(content, token) {
        Ok(index) => insert_at(&mut content[index], rest, value),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            content.push(YamlNode::scalar(token));
            if rest.is_empty() {
                content.push(value);
                return Ok(());
            }
            log::debug!("creating mapping for missing key {:?}", token);
            content.push(YamlNode::mapping(Vec::new()));
            let last = content.len() - 1;
            insert_at(&mut content[last], rest, value)
        }
        Err(e) => Err(e),
    }
}

fn insert_into_sequence(
    items: &mut Vec<YamlNode>,
    token: &str,
    rest: &[String],
    value: YamlNode,
) -> Result<(), PointerError> {
    let matched = match_sequence(items, token)?;
    let Some(next) = rest.first() else {
        return insert_element(items, token, value);
    };
    let slot = match matched {
        SequenceMatch::Elements(indices) => {
            let index = first_element(&indices, token)?;
            if !items[index].is_scalar() {
                return insert_at(&mut items[index], rest, value);
            }
            Some(index)
        }
        SequenceMatch::Append => None,
    };

    // No structured element to descend into: add a mapping for the next key
    // at the matched position and continue inside it.
    log::debug!("creating sequence element for key {:?}", next);
    let element = YamlNode::mapping(vec![YamlNode::scalar(next.as_str()), YamlNode::mapping(Vec::new())]);
    let index = match slot {
        Some(index) => {
            items.insert(index, element);
            index
        }
        None => {
            items.push(element);
            items.len() - 1
        }
    };
    insert_at(&mut items[index], rest, value)
}

/// Adds `value` to a sequence: appended for `-`, otherwise placed in front
/// of the element currently at the index.
fn insert_element(items: &mut Vec<YamlNode>, token: &str, value: YamlNode) -> Result<(), PointerError> {
    if token == APPEND_TOKEN {
        items.push(value);
    } else {
        let index = parse_index(token, items.len())?;
        items.insert(index, value);
    }
    Ok(())
}

/// Picks the element to descend into: the first match when a predicate
/// selects several.
fn first_element(indices: &[usize], token: &str) -> Result<usize, PointerError> {
    match indices {
        [] => Err(PointerError::NotFound {
            token: token.to_string(),
        }),
        [index, rest @ ..] => {
            if !rest.is_empty() {
                log::debug!("{} matched {} elements, using the first", token, rest.len() + 1);
            }
            Ok(*index)
        }
    }
}
