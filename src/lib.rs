//! yptr - extended JSON Pointer for YAML documents.
//!
//! Pointers address nodes in a YAML tree by mapping key, sequence index,
//! append position (`-`) or sequence-element predicate (`~{...}`). The crate
//! can look nodes up, insert new content without overwriting existing values,
//! and reports the source position of every parsed node.
//!
//! # Example
//!
//! ```
//! use yptr::document::{parse_yaml, to_yaml_string};
//! use yptr::pointer::{find, insert};
//!
//! let mut doc = parse_yaml("spec:\n  containers:\n  - name: app\n").unwrap();
//! insert(&mut doc, "/spec/containers/~{name: app}/image", parse_yaml("nginx").unwrap()).unwrap();
//!
//! let image = find(&doc, "/spec/containers/0/image").unwrap();
//! assert_eq!(image.as_scalar(), Some("nginx"));
//! assert_eq!(
//!     to_yaml_string(&doc, 2),
//!     "spec:\n  containers:\n    - name: app\n      image: nginx\n"
//! );
//! ```

pub mod config;
pub mod document;
pub mod file;
pub mod pointer;
