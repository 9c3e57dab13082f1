//! Pointer lookup.

use super::error::PointerError;
use super::matcher::{match_token, Match};
use super::tokenizer::Pointer;
use crate::document::node::YamlNode;

/// Finds every node in `root` matched by `pointer`.
///
/// A predicate token that selects several sequence elements fans out, so the
/// result can hold more than one node. The empty pointer is rejected here,
/// unlike in `insert` where it denotes the whole document.
///
/// # Example
///
/// ```
/// use yptr::document::parser::parse_yaml;
/// use yptr::pointer::find_all;
///
/// let doc = parse_yaml("- {tier: web, name: a}\n- {tier: db, name: b}\n- {tier: web, name: c}\n").unwrap();
/// let names: Vec<_> = find_all(&doc, "/~{tier: web}/name")
///     .unwrap()
///     .into_iter()
///     .filter_map(|n| n.as_scalar())
///     .collect();
/// assert_eq!(names, vec!["a", "c"]);
/// ```
pub fn find_all<'a>(root: &'a YamlNode, pointer: &str) -> Result<Vec<&'a YamlNode>, PointerError> {
    if pointer.is_empty() {
        return Err(PointerError::EmptyPointer);
    }
    let parsed = Pointer::parse(pointer)?;
    log::debug!("resolving {:?} ({} tokens)", pointer, parsed.tokens().len());
    resolve(root, parsed.tokens()).map_err(|e| e.with_pointer(pointer))
}

/// Finds the single node matched by `pointer`.
///
/// # Errors
///
/// Fails like `find_all`, and with `TooManyResults` when the pointer matches
/// more than one node.
///
/// # Example
///
/// ```
/// use yptr::document::parser::parse_yaml;
/// use yptr::pointer::{find, ErrorKind};
///
/// let doc = parse_yaml("a:\n  b:\n    c: 42\n").unwrap();
/// let node = find(&doc, "/a/b/c").unwrap();
/// assert_eq!(node.as_scalar(), Some("42"));
///
/// let err = find(&doc, "/a/x").unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::NotFound);
/// ```
pub fn find<'a>(root: &'a YamlNode, pointer: &str) -> Result<&'a YamlNode, PointerError> {
    let mut results = find_all(root, pointer)?;
    match results.len() {
        1 => Ok(results.remove(0)),
        0 => Err(PointerError::Internal {
            pointer: pointer.to_string(),
            message: "no results and no error".to_string(),
        }),
        count => Err(PointerError::TooManyResults { count }.with_pointer(pointer)),
    }
}

/// Applies `tokens` to `node`, expanding every match.
pub(crate) fn resolve<'a>(node: &'a YamlNode, tokens: &[String]) -> Result<Vec<&'a YamlNode>, PointerError> {
    let Some((token, rest)) = tokens.split_first() else {
        return Ok(vec![node]);
    };
    let candidates = match match_token(node, token)? {
        Match::Nodes(nodes) => nodes,
        Match::AppendPosition => {
            return Err(PointerError::NotFound {
                token: token.clone(),
            })
        }
    };
    let mut results = Vec::new();
    for candidate in candidates {
        results.extend(resolve(candidate, rest)?);
    }
    Ok(results)
}
