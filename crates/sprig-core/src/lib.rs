//! # sprig-core
//!
//! **sprig** is a minimalist, indentation-delimited hierarchical text format:
//! an ordered, duplicate-key-tolerant alternative to JSON/YAML. One space of
//! indentation per depth level, one space between a key and its value,
//! nothing else. This crate is the tree engine — the in-memory [`Node`],
//! round-trip parsing and serialization, structural diff/patch, the shape
//! indexer for homogeneous collections, and a character-level tokenizer.
//!
//! ## Quick start
//!
//! ```rust
//! use sprig_core::{diff, parse, patch, serialize};
//!
//! let a = parse("first John\nlast Doe\n");
//! let b = parse("first Frank\nlast Grimes\n");
//!
//! let changes = diff(&a, &b);
//! let mut merged = a.clone();
//! patch(&mut merged, &changes);
//! assert_eq!(serialize(&merged), "first Frank\nlast Grimes\n");
//! ```
//!
//! ## Modules
//!
//! - [`node`] — the tree data model (`Node`, `Value`)
//! - [`parser`] / [`serializer`] — text ↔ tree, exact inverses over
//!   canonical text
//! - [`diff`] — content and order diff/patch
//! - [`shape`] — structural signatures and shape sharing
//! - [`tokenizer`] — per-character role tagging for diagnostics
//! - [`watch`] — mutation journaling (`Watched`, `Change`)
//! - [`json`] — bridge to/from `serde_json::Value`
//! - [`error`] — construction-time error types

pub mod diff;
pub mod error;
pub mod json;
pub mod node;
pub mod parser;
pub mod serializer;
pub mod shape;
pub mod tokenizer;
pub mod watch;

pub use diff::{diff, diff_order, patch, patch_order, OrderOutcome};
pub use error::{Result, SprigError};
pub use json::{from_json, from_json_str, to_json};
pub use node::{Node, Value, SEPARATOR};
pub use parser::parse;
pub use serializer::serialize;
pub use shape::{shape_index, union_shape, Shape};
pub use tokenizer::{tokenize, Role};
pub use watch::{Change, ChangeKind, Watched};
