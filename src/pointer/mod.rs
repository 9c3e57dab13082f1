//! Extended JSON Pointer lookup and insertion for YAML trees.
//!
//! Pointers follow RFC 6901 syntax without its `~0`/`~1` escaping, and add two
//! tokens that only apply to sequences.
//!
//! # Supported Syntax
//!
//! - `""` - The whole document
//! - `/name` - Mapping key (exact match, taken verbatim)
//! - `/0` - Sequence index
//! - `/-` - Position after the last sequence element (insertion only)
//! - `/~{"name":"app"}` - Sequence elements the inline document is a subset of
//!
//! # Examples
//!
//! ```
//! // /spec/template/spec/containers/1/image
//! // /spec/template/spec/containers/~{"name":"app"}/image
//! // /spec/template/spec/containers/-/name
//! ```

pub mod error;
pub mod inserter;
pub mod matcher;
pub mod resolver;
pub mod subset;
pub mod tokenizer;

pub use error::{ErrorKind, PointerError};
pub use inserter::insert;
pub use matcher::{match_token, Match};
pub use resolver::{find, find_all};
pub use subset::is_subset;
pub use tokenizer::{tokenize, validate_json_pointer, Pointer};
