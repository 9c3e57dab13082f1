//! Error types for pointer parsing, lookup and insertion.

use thiserror::Error;

use crate::document::node::{NodeKind, YamlNode};

/// The kind of a `PointerError`, independent of any attached context.
///
/// Callers compare kinds instead of matching on the error itself, so a
/// `NotFound` stays a `NotFound` after the pointer has been attached to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Syntax,
    EmptyPointer,
    NotFound,
    TooManyResults,
    OutOfBounds,
    NotAnIndex,
    MalformedTree,
    UnhandledNodeType,
    CannotInsert,
    InvalidPredicate,
    Internal,
}

/// Errors that can occur while resolving or inserting through a pointer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PointerError {
    /// Non-empty pointer without a leading `/`.
    #[error("JSON pointer must be empty or start with a \"/\": {pointer:?}")]
    Syntax { pointer: String },

    /// Empty pointer passed to a lookup.
    #[error("invalid empty pointer")]
    EmptyPointer,

    #[error("{token:?}: not found")]
    NotFound { token: String },

    #[error("got {count} matches: too many results")]
    TooManyResults { count: usize },

    #[error("index {index} out of bounds for sequence of length {len}")]
    OutOfBounds { index: i64, len: usize },

    #[error("{token:?} is not a sequence index")]
    NotAnIndex { token: String },

    /// A mapping whose content is not made of key/value pairs.
    #[error("malformed mapping: found {len} content nodes")]
    MalformedTree { len: usize },

    #[error("unhandled node type: {kind} ({tag})")]
    UnhandledNodeType { kind: NodeKind, tag: String },

    #[error("cannot insert node type {value_kind} ({value_tag}) in node type {target_kind} ({target_tag})")]
    CannotInsert {
        value_kind: NodeKind,
        value_tag: String,
        target_kind: NodeKind,
        target_tag: String,
    },

    #[error("invalid predicate {token:?}: {message}")]
    InvalidPredicate { token: String, message: String },

    #[error("bad state while resolving {pointer:?}: {message}")]
    Internal { pointer: String, message: String },

    /// An error raised while resolving `pointer`.
    #[error("{pointer:?}: {source}")]
    Context {
        pointer: String,
        #[source]
        source: Box<PointerError>,
    },
}

impl PointerError {
    /// Returns the kind of the underlying error, looking through context.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PointerError::Syntax { .. } => ErrorKind::Syntax,
            PointerError::EmptyPointer => ErrorKind::EmptyPointer,
            PointerError::NotFound { .. } => ErrorKind::NotFound,
            PointerError::TooManyResults { .. } => ErrorKind::TooManyResults,
            PointerError::OutOfBounds { .. } => ErrorKind::OutOfBounds,
            PointerError::NotAnIndex { .. } => ErrorKind::NotAnIndex,
            PointerError::MalformedTree { .. } => ErrorKind::MalformedTree,
            PointerError::UnhandledNodeType { .. } => ErrorKind::UnhandledNodeType,
            PointerError::CannotInsert { .. } => ErrorKind::CannotInsert,
            PointerError::InvalidPredicate { .. } => ErrorKind::InvalidPredicate,
            PointerError::Internal { .. } => ErrorKind::Internal,
            PointerError::Context { source, .. } => source.kind(),
        }
    }

    /// Returns the innermost error.
    pub fn root_cause(&self) -> &PointerError {
        match self {
            PointerError::Context { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Attaches the pointer being resolved.
    pub fn with_pointer(self, pointer: &str) -> PointerError {
        PointerError::Context {
            pointer: pointer.to_string(),
            source: Box::new(self),
        }
    }

    pub(crate) fn unhandled(node: &YamlNode) -> PointerError {
        PointerError::UnhandledNodeType {
            kind: node.kind(),
            tag: node.tag().to_string(),
        }
    }

    pub(crate) fn cannot_insert(value: &YamlNode, target: &YamlNode) -> PointerError {
        PointerError::CannotInsert {
            value_kind: value.kind(),
            value_tag: value.tag().to_string(),
            target_kind: target.kind(),
            target_tag: target.tag().to_string(),
        }
    }
}
