//! Serializer: [`Node`] → sprig text, the exact inverse of the parser for
//! canonical input.
//!
//! Each entry emits `<indent><key>` followed by one of:
//!
//! - ` <value>\n` for a leaf, with every internal newline of the value
//!   re-indented to the current depth plus one escape space
//! - `\n` plus the child's entries one level deeper for a subtree
//! - ` \n` for the empty-string leaf — the trailing separator is what keeps it
//!   distinguishable from the empty subtree, which is just `<key>\n`

use std::fmt;

use crate::node::{Node, Value, SEPARATOR};

/// Serialize a tree to canonical sprig text.
pub fn serialize(node: &Node) -> String {
    let mut out = String::new();
    write_node(node, 0, &mut out);
    out
}

impl Node {
    /// Convenience alias for [`serialize`].
    pub fn to_text(&self) -> String {
        serialize(self)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&serialize(self))
    }
}

fn write_node(node: &Node, depth: usize, out: &mut String) {
    for (key, value) in node.entries() {
        push_indent(out, depth);
        out.push_str(key);
        match value {
            Value::Leaf(text) => {
                out.push(SEPARATOR);
                let mut lines = text.split('\n');
                if let Some(first) = lines.next() {
                    out.push_str(first);
                }
                for continuation in lines {
                    out.push('\n');
                    push_indent(out, depth + 1);
                    out.push_str(continuation);
                }
                out.push('\n');
            }
            Value::Tree(child) => {
                out.push('\n');
                write_node(child, depth + 1, out);
            }
        }
    }
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push(SEPARATOR);
    }
}
