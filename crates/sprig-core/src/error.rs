//! Error types for sprig tree construction.

use thiserror::Error;

/// Errors that can occur while building a tree from untrusted keys or JSON.
///
/// Parsing, serialization, diff, and patch are total over well-formed input
/// and never construct these; only construction-time structural violations do.
#[derive(Error, Debug)]
pub enum SprigError {
    /// A property name that the grammar cannot represent (empty, or containing
    /// the field separator or a line break).
    #[error("invalid key {key:?}: {reason}")]
    InvalidKey { key: String, reason: &'static str },

    /// The JSON bridge was handed a bare scalar at the root; a sprig document
    /// is always a tree of entries.
    #[error("cannot build a tree from a bare JSON scalar")]
    ScalarRoot,

    /// The input string was not valid JSON (bridge path).
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

/// Convenience alias used throughout sprig-core.
pub type Result<T> = std::result::Result<T, SprigError>;
