//! Structural diff and patch over sprig trees.
//!
//! [`diff`] produces a third tree `D` such that applying `D` to a clone of
//! `A` with [`patch`] reproduces `B`. The diff grammar reuses the tree
//! itself: an empty-string leaf marks a deletion, an empty subtree in a diff
//! also means "remove", and a non-empty subtree merges recursively.
//!
//! [`diff_order`] / [`patch_order`] handle ordering separately: an order diff
//! embeds the target's whole key sequence at every level whose order differs
//! (not a minimal permutation), and applying it rewrites a level only when
//! the target holds exactly the same keys — a mismatched level is reported
//! in the returned [`OrderOutcome`] and left untouched rather than having
//! entries silently dropped.
//!
//! Both `patch` and `patch_order` are total: no well-formed input makes them
//! fail, and `patch_order` surfaces partial application explicitly instead
//! of aborting half-way.

use crate::node::{Node, Value, SEPARATOR};

/// Compute the content diff from `a` to `b`.
///
/// Per key of `a` (first occurrence, in order): a key absent from `b` emits
/// the empty-string deletion marker; two leaves emit `b`'s text when they
/// differ (plain string comparison; numeric-looking text is still text); a
/// leaf/subtree type flip emits `b`'s value wholesale; two subtrees recurse
/// and emit only a non-empty sub-diff. Keys present only in `b` are appended
/// as deep copies.
pub fn diff(a: &Node, b: &Node) -> Node {
    let mut out = Node::new();
    for key in a.distinct_keys() {
        let Some(ours) = a.value_of(key) else {
            continue;
        };
        match b.value_of(key) {
            None => out.push_entry(key, Value::leaf("")),
            Some(theirs) => match (ours, theirs) {
                (Value::Leaf(x), Value::Leaf(y)) => {
                    if x != y {
                        out.push_entry(key, Value::Leaf(y.clone()));
                    }
                }
                (Value::Leaf(_), Value::Tree(subtree)) => {
                    out.push_entry(key, Value::Tree(subtree.clone()));
                }
                (Value::Tree(_), Value::Leaf(text)) => {
                    out.push_entry(key, Value::Leaf(text.clone()));
                }
                (Value::Tree(ours), Value::Tree(theirs)) => {
                    let sub = diff(ours, theirs);
                    if !sub.is_empty() {
                        out.push_entry(key, Value::Tree(sub));
                    }
                }
            },
        }
    }
    for key in b.distinct_keys() {
        if a.value_of(key).is_none() {
            if let Some(added) = b.value_of(key) {
                out.push_entry(key, added.clone());
            }
        }
    }
    out
}

/// Apply a content diff to `target`, mutating it in place.
///
/// An empty-string leaf or an empty subtree deletes the key; any other leaf
/// overwrites whatever was there; a non-empty subtree merges recursively
/// when the target already holds a subtree under that key and replaces the
/// value otherwise.
pub fn patch(target: &mut Node, changes: &Node) {
    for (key, change) in changes.entries() {
        match change {
            Value::Leaf(text) if text.is_empty() => {
                target.remove_entry(key);
            }
            Value::Leaf(text) => target.set_entry(key, Value::Leaf(text.clone())),
            Value::Tree(sub) if sub.is_empty() => {
                target.remove_entry(key);
            }
            Value::Tree(sub) => {
                let merged = match target.entry_mut(key) {
                    Some(Value::Tree(existing)) => {
                        patch(existing, sub);
                        true
                    }
                    _ => false,
                };
                if !merged {
                    target.set_entry(key, Value::Tree(sub.clone()));
                }
            }
        }
    }
}

/// Compute the order diff from `a` to `b`.
///
/// A level whose key sequences differ embeds `b`'s full sequence: one entry
/// per key of `b`, holding either the sub-order-diff for that key (attached
/// to its first occurrence) or an empty-string placeholder. A level whose
/// sequences already agree carries only the non-empty sub-diffs of common
/// subtree keys.
pub fn diff_order(a: &Node, b: &Node) -> Node {
    let mut subs: Vec<(&str, Node)> = Vec::new();
    for key in b.distinct_keys() {
        if let (Some(Value::Tree(ours)), Some(Value::Tree(theirs))) =
            (a.value_of(key), b.value_of(key))
        {
            let sub = diff_order(ours, theirs);
            if !sub.is_empty() {
                subs.push((key, sub));
            }
        }
    }

    let mut out = Node::new();
    if a.keys().eq(b.keys()) {
        for (key, sub) in subs {
            out.push_entry(key, Value::Tree(sub));
        }
    } else {
        let mut pending = subs;
        for (key, _) in b.entries() {
            if let Some(pos) = pending.iter().position(|(k, _)| *k == key) {
                let (_, sub) = pending.remove(pos);
                out.push_entry(key, Value::Tree(sub));
            } else {
                out.push_entry(key, Value::leaf(""));
            }
        }
    }
    out
}

/// What [`patch_order`] actually did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderOutcome {
    /// Number of levels whose entry sequence was rewritten.
    pub applied: usize,
    /// Space-joined paths of levels that demanded a full ordering the target
    /// could not satisfy. Those levels kept their original order.
    pub skipped: Vec<String>,
}

impl OrderOutcome {
    /// True when every full-ordering level in the diff was applied.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Reorder `target`'s entries to match an order diff.
///
/// A level is rewritten only when it holds exactly the keys the diff names
/// (same multiset) — reordering anything else would drop or invent entries —
/// and its sequence actually differs from the diff's, so a carrier-only
/// level whose keys happen to coincide is not counted as applied. Levels
/// that claim a full ordering (they contain at least one placeholder leaf)
/// but do not match are recorded in the outcome; mismatched carrier-only
/// levels are recursed into without comment.
pub fn patch_order(target: &mut Node, order: &Node) -> OrderOutcome {
    let mut outcome = OrderOutcome::default();
    apply_order(target, order, "", &mut outcome);
    outcome
}

fn apply_order(target: &mut Node, order: &Node, path: &str, outcome: &mut OrderOutcome) {
    if !order.is_empty() {
        if multiset_match(target, order) {
            if !target.keys().eq(order.keys()) {
                reorder_entries(target, order);
                outcome.applied += 1;
            }
        } else if order.entries().any(|(_, value)| value.is_leaf()) {
            outcome.skipped.push(if path.is_empty() {
                String::from("(root)")
            } else {
                path.to_string()
            });
        }
    }
    for (key, value) in order.entries() {
        let Value::Tree(sub) = value else {
            continue;
        };
        if sub.is_empty() {
            continue;
        }
        let child_path = if path.is_empty() {
            key.to_string()
        } else {
            format!("{path}{SEPARATOR}{key}")
        };
        if let Some(Value::Tree(existing)) = target.entry_mut(key) {
            apply_order(existing, sub, &child_path, outcome);
        }
    }
}

/// Do `target` and `order` hold exactly the same keys, duplicates counted?
fn multiset_match(target: &Node, order: &Node) -> bool {
    if target.len() != order.len() {
        return false;
    }
    let mut ours: Vec<&str> = target.keys().collect();
    let mut theirs: Vec<&str> = order.keys().collect();
    ours.sort_unstable();
    theirs.sort_unstable();
    ours == theirs
}

/// Rewrite `target`'s sequence to `order`'s. Repeated names take the
/// target's occurrences in their original relative order.
fn reorder_entries(target: &mut Node, order: &Node) {
    let mut remaining: Vec<(String, Value)> = std::mem::take(&mut target.entries);
    let mut reordered = Vec::with_capacity(remaining.len());
    for key in order.keys() {
        if let Some(pos) = remaining.iter().position(|(k, _)| k == key) {
            reordered.push(remaining.remove(pos));
        }
    }
    // multiset_match leaves nothing behind here; entries are still never
    // dropped if that guarantee is ever violated
    reordered.extend(remaining);
    target.entries = reordered;
    target.touch();
}

impl Node {
    /// Convenience alias for [`diff`].
    pub fn diff(&self, other: &Node) -> Node {
        diff(self, other)
    }

    /// Convenience alias for [`patch`].
    pub fn patch(&mut self, changes: &Node) {
        patch(self, changes)
    }

    /// Convenience alias for [`diff_order`].
    pub fn diff_order(&self, other: &Node) -> Node {
        diff_order(self, other)
    }

    /// Convenience alias for [`patch_order`].
    pub fn patch_order(&mut self, order: &Node) -> OrderOutcome {
        patch_order(self, order)
    }
}
