//! Change observation as an explicit log instead of callbacks.
//!
//! [`Watched`] wraps a [`Node`] and appends one structured [`Change`] record
//! per mutating operation, strictly after the mutation has taken visible
//! effect and in operation order. Observers poll [`Watched::changes`] or
//! take ownership with [`Watched::drain`]; there is no dynamic dispatch and
//! no reentrancy, because nothing runs during the mutation itself.

use crate::diff::{patch, patch_order, OrderOutcome};
use crate::error::Result;
use crate::node::{Node, Value, SEPARATOR};
use crate::parser::parse;

/// What kind of mutation a [`Change`] records. Every record is also a
/// generic "change" — filtering on the kind replaces per-event registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Append,
    Create,
    Delete,
    Set,
    Patch,
    PatchOrder,
    Rename,
    Clear,
    Reload,
}

impl ChangeKind {
    /// The event name as collaborators know it.
    pub fn label(self) -> &'static str {
        match self {
            ChangeKind::Append => "append",
            ChangeKind::Create => "create",
            ChangeKind::Delete => "delete",
            ChangeKind::Set => "set",
            ChangeKind::Patch => "patch",
            ChangeKind::PatchOrder => "patchOrder",
            ChangeKind::Rename => "rename",
            ChangeKind::Clear => "clear",
            ChangeKind::Reload => "reload",
        }
    }
}

/// One mutation record. `path` is the space-joined path the operation
/// addressed; whole-document operations (patch, clear, reload) leave it
/// empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub kind: ChangeKind,
    pub path: String,
}

impl Change {
    fn new(kind: ChangeKind, path: impl Into<String>) -> Self {
        Change {
            kind,
            path: path.into(),
        }
    }
}

/// A document whose mutations are journaled.
#[derive(Debug, Default)]
pub struct Watched {
    node: Node,
    log: Vec<Change>,
}

impl Watched {
    pub fn new() -> Self {
        Watched::default()
    }

    pub fn from_node(node: Node) -> Self {
        Watched {
            node,
            log: Vec::new(),
        }
    }

    /// Parse a document and watch it. Parsing itself is construction, not a
    /// mutation, so the log starts empty.
    pub fn parse(text: &str) -> Self {
        Watched::from_node(parse(text))
    }

    pub fn node(&self) -> &Node {
        &self.node
    }

    pub fn into_node(self) -> Node {
        self.node
    }

    pub fn to_text(&self) -> String {
        self.node.to_text()
    }

    /// All records since the last drain, oldest first.
    pub fn changes(&self) -> &[Change] {
        &self.log
    }

    /// Take every pending record, leaving the log empty.
    pub fn drain(&mut self) -> Vec<Change> {
        std::mem::take(&mut self.log)
    }

    /// Append by path. A miss (unresolvable parent) leaves no record.
    pub fn append(&mut self, path: &str, value: Value) -> Result<bool> {
        let appended = self.node.append(path, value)?;
        if appended {
            self.log.push(Change::new(ChangeKind::Append, path));
        }
        Ok(appended)
    }

    /// Positional insertion journals as an append — the entry list grew.
    pub fn insert(&mut self, index: usize, path: &str, value: Value) -> Result<bool> {
        let inserted = self.node.insert(index, path, value)?;
        if inserted {
            self.log.push(Change::new(ChangeKind::Append, path));
        }
        Ok(inserted)
    }

    /// Set a value by path. Intermediate nodes the path had to create are
    /// journaled as `create` records (shallowest first) before the `set`.
    pub fn set(&mut self, path: &str, value: Value) -> Result<()> {
        let created = self.missing_prefixes(path);
        self.node.set(path, value)?;
        for prefix in created {
            self.log.push(Change::new(ChangeKind::Create, prefix));
        }
        self.log.push(Change::new(ChangeKind::Set, path));
        Ok(())
    }

    pub fn delete(&mut self, path: &str) -> bool {
        let removed = self.node.delete(path);
        if removed {
            self.log.push(Change::new(ChangeKind::Delete, path));
        }
        removed
    }

    pub fn rename(&mut self, path: &str, new_key: &str) -> Result<bool> {
        let renamed = self.node.rename(path, new_key)?;
        if renamed {
            self.log.push(Change::new(ChangeKind::Rename, path));
        }
        Ok(renamed)
    }

    pub fn clear(&mut self) {
        self.node.clear();
        self.log.push(Change::new(ChangeKind::Clear, ""));
    }

    pub fn patch(&mut self, changes: &Node) {
        patch(&mut self.node, changes);
        self.log.push(Change::new(ChangeKind::Patch, ""));
    }

    pub fn patch_order(&mut self, order: &Node) -> OrderOutcome {
        let outcome = patch_order(&mut self.node, order);
        self.log.push(Change::new(ChangeKind::PatchOrder, ""));
        outcome
    }

    /// Replace the whole document from source text.
    pub fn reload(&mut self, text: &str) {
        self.node = parse(text);
        self.log.push(Change::new(ChangeKind::Reload, ""));
    }

    /// Path prefixes a `set` would have to create: every prefix that does
    /// not yet resolve (the final segment may resolve to a leaf, every
    /// earlier one needs a subtree).
    fn missing_prefixes(&self, path: &str) -> Vec<String> {
        let segments: Vec<&str> = path.split(SEPARATOR).collect();
        let mut missing = Vec::new();
        let mut prefix = String::new();
        for (i, segment) in segments.iter().enumerate() {
            if !prefix.is_empty() {
                prefix.push(SEPARATOR);
            }
            prefix.push_str(segment);
            let terminal = i + 1 == segments.len();
            let satisfied = match self.node.get(&prefix) {
                Some(Value::Tree(_)) => true,
                Some(Value::Leaf(_)) => terminal,
                None => false,
            };
            if !satisfied {
                missing.push(prefix.clone());
            }
        }
        missing
    }
}
