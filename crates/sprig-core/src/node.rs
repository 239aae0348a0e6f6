//! The sprig tree data model.
//!
//! A [`Node`] is an ordered sequence of `(key, value)` entries where each value
//! is either a string leaf or a nested `Node`. Duplicate keys are legal and
//! preserved in order; direct name lookup resolves to the **first** occurrence,
//! while later occurrences stay reachable positionally or through
//! [`Node::values_named`].
//!
//! Children are owned: assigning a `Node` as a child moves (or clones) it into
//! the parent, so mutating one parent's subtree is never visible through
//! another. Callers that want the old shared-subtree behavior clone explicitly.

use std::rc::Rc;

use crate::error::{Result, SprigError};
use crate::shape::Shape;

/// The field separator: one space between a key and its inline value, and the
/// joining character of dotted paths. Keys can therefore never contain it.
pub const SEPARATOR: char = ' ';

/// A child value: either a string scalar or a nested subtree.
///
/// Numeric-looking strings stay strings; nothing in the tree ever holds a bare
/// number or boolean.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Leaf(String),
    Tree(Node),
}

impl Value {
    /// Build a leaf value from anything string-like.
    pub fn leaf(text: impl Into<String>) -> Self {
        Value::Leaf(text.into())
    }

    /// Build a subtree value.
    pub fn tree(node: Node) -> Self {
        Value::Tree(node)
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Value::Leaf(_))
    }

    pub fn is_tree(&self) -> bool {
        matches!(self, Value::Tree(_))
    }

    /// The leaf text, if this is a leaf.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Leaf(s) => Some(s),
            Value::Tree(_) => None,
        }
    }

    /// The subtree, if this is one.
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Value::Leaf(_) => None,
            Value::Tree(n) => Some(n),
        }
    }

    pub fn as_node_mut(&mut self) -> Option<&mut Node> {
        match self {
            Value::Leaf(_) => None,
            Value::Tree(n) => Some(n),
        }
    }
}

/// An interior node: an ordered, duplicate-tolerant entry list plus a lazily
/// computed shape cache. The cache is derived data — every mutation drops it.
#[derive(Debug, Clone, Default)]
pub struct Node {
    pub(crate) entries: Vec<(String, Value)>,
    pub(crate) shape: Option<Rc<Shape>>,
}

impl PartialEq for Node {
    /// Structural equality over entries only; the shape cache never
    /// participates.
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Node {
    /// An empty node.
    pub fn new() -> Self {
        Node::default()
    }

    /// Number of entries, duplicates included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ordered iteration over `(key, value)` pairs. Early stop is just
    /// dropping the iterator.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Ordered iteration over keys, duplicates included.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Every value stored under `key`, in order. This is the duplicate-aware
    /// counterpart of [`Node::get`].
    pub fn values_named<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.entries
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Positional access: the `(key, value)` pair at `index`.
    pub fn at(&self, index: usize) -> Option<(&str, &Value)> {
        self.entries.get(index).map(|(k, v)| (k.as_str(), v))
    }

    pub fn key_at(&self, index: usize) -> Option<&str> {
        self.at(index).map(|(k, _)| k)
    }

    pub fn value_at(&self, index: usize) -> Option<&Value> {
        self.at(index).map(|(_, v)| v)
    }

    /// Position of the first entry named `key`.
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    /// Look up a value by space-joined path, resolving duplicate names to
    /// their first occurrence at each level.
    ///
    /// A path that traverses *through* a leaf is an ordinary miss, never an
    /// error: `get("a b")` on `a hello` returns `None`.
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut node = self;
        let mut segments = path.split(SEPARATOR).peekable();
        while let Some(segment) = segments.next() {
            let value = node.value_of(segment)?;
            if segments.peek().is_none() {
                return Some(value);
            }
            node = value.as_node()?;
        }
        None
    }

    /// Leaf text at `path`, if the path resolves to a leaf.
    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(Value::as_str)
    }

    /// Subtree at `path`, if the path resolves to one.
    pub fn get_node(&self, path: &str) -> Option<&Node> {
        self.get(path).and_then(Value::as_node)
    }

    /// Mutable subtree at `path`. Mutations through the returned reference
    /// invalidate that node's own shape cache via its methods.
    pub fn get_node_mut(&mut self, path: &str) -> Option<&mut Node> {
        let mut node = self;
        for segment in path.split(SEPARATOR) {
            node = node.entry_mut(segment)?.as_node_mut()?;
        }
        Some(node)
    }

    /// Append an entry under the node addressed by the path's parent, even if
    /// the final key already exists there. A bare key appends at this node.
    /// Returns `Ok(false)` when the parent path does not resolve to a subtree.
    pub fn append(&mut self, path: &str, value: Value) -> Result<bool> {
        let (parent, key) = split_path(path);
        check_key(key)?;
        let Some(node) = self.descend_mut(parent) else {
            return Ok(false);
        };
        node.entries.push((key.to_string(), value));
        node.touch();
        Ok(true)
    }

    /// Insert an entry at `index` (clamped to the entry count) under the node
    /// addressed by the path's parent. Returns `Ok(false)` on an unresolvable
    /// parent, like [`Node::append`].
    pub fn insert(&mut self, index: usize, path: &str, value: Value) -> Result<bool> {
        let (parent, key) = split_path(path);
        check_key(key)?;
        let Some(node) = self.descend_mut(parent) else {
            return Ok(false);
        };
        let at = index.min(node.entries.len());
        node.entries.insert(at, (key.to_string(), value));
        node.touch();
        Ok(true)
    }

    /// Set the value at a space-joined path, creating missing intermediate
    /// nodes. An intermediate that exists as a leaf is replaced by an empty
    /// subtree before descent. Setting an existing key rewrites its first
    /// occurrence in place; a new key is appended.
    pub fn set(&mut self, path: &str, value: Value) -> Result<()> {
        let segments: Vec<&str> = path.split(SEPARATOR).collect();
        for segment in &segments {
            check_key(segment)?;
        }
        self.set_segments(&segments, value);
        Ok(())
    }

    fn set_segments(&mut self, segments: &[&str], value: Value) {
        let Some((head, rest)) = segments.split_first() else {
            return;
        };
        if rest.is_empty() {
            self.set_entry(head, value);
            return;
        }
        let index = match self.index_of(head) {
            Some(i) => {
                if !self.entries[i].1.is_tree() {
                    self.entries[i].1 = Value::Tree(Node::new());
                }
                i
            }
            None => {
                self.entries
                    .push(((*head).to_string(), Value::Tree(Node::new())));
                self.entries.len() - 1
            }
        };
        self.touch();
        if let Value::Tree(child) = &mut self.entries[index].1 {
            child.set_segments(rest, value);
        }
    }

    /// Delete the first entry matching the last path segment under the path's
    /// parent. Returns whether anything was removed.
    pub fn delete(&mut self, path: &str) -> bool {
        let (parent, last) = split_path(path);
        match self.descend_mut(parent) {
            Some(node) => node.remove_entry(last),
            None => false,
        }
    }

    /// Rename the entry addressed by `path`, keeping its position and value.
    /// Returns `Ok(false)` when the path does not resolve.
    pub fn rename(&mut self, path: &str, new_key: &str) -> Result<bool> {
        check_key(new_key)?;
        let (parent, last) = split_path(path);
        let Some(target) = self.descend_mut(parent) else {
            return Ok(false);
        };
        match target.index_of(last) {
            Some(i) => {
                target.entries[i].0 = new_key.to_string();
                target.touch();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.touch();
    }

    // ------------------------------------------------------------------
    // Crate-internal raw accessors. These bypass key validation and are only
    // fed keys that already live in a Node (diff/patch, shape indexing).
    // ------------------------------------------------------------------

    /// First value stored directly under `key` (no path splitting).
    pub(crate) fn value_of(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub(crate) fn entry_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Replace the first occurrence of `key`, or append when absent.
    pub(crate) fn set_entry(&mut self, key: &str, value: Value) {
        match self.index_of(key) {
            Some(i) => self.entries[i].1 = value,
            None => self.entries.push((key.to_string(), value)),
        }
        self.touch();
    }

    /// Remove the first occurrence of `key`.
    pub(crate) fn remove_entry(&mut self, key: &str) -> bool {
        match self.index_of(key) {
            Some(i) => {
                self.entries.remove(i);
                self.touch();
                true
            }
            None => false,
        }
    }

    /// Unvalidated append, for values whose keys are already known good.
    pub(crate) fn push_entry(&mut self, key: &str, value: Value) {
        self.entries.push((key.to_string(), value));
        self.touch();
    }

    /// Keys with duplicates removed, first-occurrence order preserved.
    pub(crate) fn distinct_keys(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::with_capacity(self.entries.len());
        for (key, _) in &self.entries {
            if !seen.iter().any(|k| *k == key) {
                seen.push(key);
            }
        }
        seen
    }

    /// Drop the cached shape. Every mutation funnels through here.
    pub(crate) fn touch(&mut self) {
        self.shape = None;
    }

    /// The node a split path's parent half addresses; `None` parent means
    /// this node itself.
    fn descend_mut(&mut self, parent: Option<&str>) -> Option<&mut Node> {
        match parent {
            Some(path) => self.get_node_mut(path),
            None => Some(self),
        }
    }
}

/// Split a path into its parent half and final segment. A bare key has no
/// parent half.
fn split_path(path: &str) -> (Option<&str>, &str) {
    match path.rsplit_once(SEPARATOR) {
        Some((parent, last)) => (Some(parent), last),
        None => (None, path),
    }
}

/// Reject keys the grammar cannot carry: the separator would merge a key with
/// its value, a line break would split it, and an empty key would serialize
/// into bare indentation.
pub(crate) fn check_key(key: &str) -> Result<()> {
    let reason = if key.is_empty() {
        "empty keys cannot be represented"
    } else if key.contains(SEPARATOR) {
        "contains the field separator"
    } else if key.contains('\n') || key.contains('\r') {
        "contains a line break"
    } else {
        return Ok(());
    };
    Err(SprigError::InvalidKey {
        key: key.to_string(),
        reason,
    })
}
