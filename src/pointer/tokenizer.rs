//! Pointer string tokenizer.

use std::fmt;

use super::error::PointerError;

const SEPARATOR: char = '/';

/// A parsed pointer: the ordered reference tokens, taken verbatim.
///
/// # Example
///
/// ```
/// use yptr::pointer::Pointer;
///
/// let ptr = Pointer::parse("/spec/containers/~{\"name\":\"app\"}/image").unwrap();
/// assert_eq!(ptr.tokens(), &["spec", "containers", "~{\"name\":\"app\"}", "image"]);
///
/// assert!(Pointer::parse("").unwrap().is_root());
/// assert!(Pointer::parse("spec").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pointer {
    tokens: Vec<String>,
}

impl Pointer {
    /// Parses a pointer string.
    ///
    /// The empty string denotes the root. Anything else must start with `/`;
    /// the remainder is split on `/` without any unescaping.
    pub fn parse(pointer: &str) -> Result<Pointer, PointerError> {
        validate_json_pointer(pointer)?;
        let tokens = match pointer.strip_prefix(SEPARATOR) {
            Some(rest) => rest.split(SEPARATOR).map(str::to_string).collect(),
            None => Vec::new(),
        };
        Ok(Pointer { tokens })
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn is_root(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl fmt::Display for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            write!(f, "{}{}", SEPARATOR, token)?;
        }
        Ok(())
    }
}

/// Splits a pointer into its tokens.
pub fn tokenize(pointer: &str) -> Result<Vec<String>, PointerError> {
    Pointer::parse(pointer).map(|p| p.tokens)
}

/// Checks pointer syntax: empty, or starting with `/`.
pub fn validate_json_pointer(pointer: &str) -> Result<(), PointerError> {
    if pointer.is_empty() || pointer.starts_with(SEPARATOR) {
        Ok(())
    } else {
        Err(PointerError::Syntax {
            pointer: pointer.to_string(),
        })
    }
}
