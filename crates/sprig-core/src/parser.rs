//! Recursive-descent parser: sprig text → [`Node`].
//!
//! The grammar is line-oriented with exactly one space of indentation per
//! depth level. A line's text up to the first space is its key; a space after
//! the key starts an inline leaf value, a bare newline starts a nested block.
//! Leaf values may continue onto lines indented one level deeper than the key;
//! the single leading indentation space is the escape that keeps such a line
//! inside the value instead of opening a sibling key.
//!
//! Parsing is total: any input produces a tree. Every recursive call works on
//! strictly local slices — no state is shared between sibling or nested
//! parses.

use crate::node::{Node, Value, SEPARATOR};

/// Parse sprig text into a tree.
///
/// Duplicate keys at the same depth are preserved in full; direct lookup on
/// the result resolves to the first occurrence (see [`Node::get`]).
pub fn parse(text: &str) -> Node {
    let normalized = normalize(text);
    if normalized.is_empty() {
        return Node::new();
    }
    let lines: Vec<&str> = normalized.split('\n').collect();
    parse_lines(&lines)
}

impl Node {
    /// Convenience alias for [`parse`].
    pub fn parse(text: &str) -> Node {
        parse(text)
    }
}

/// Canonicalize raw input before block splitting:
///
/// - `\r\n` and `\n\r` (and stray `\r`) become `\n`
/// - leading blank or space-only lines are stripped
/// - trailing blank lines are dropped
/// - runs of consecutive blank lines collapse to one
///
/// Space-only lines *inside* the document survive — they are empty
/// continuation lines of multiline leaf values.
fn normalize(text: &str) -> String {
    let unified = text
        .replace("\r\n", "\n")
        .replace("\n\r", "\n")
        .replace('\r', "\n");
    let mut lines: Vec<&str> = unified.split('\n').collect();

    let lead = lines
        .iter()
        .position(|line| !line.chars().all(|c| c == SEPARATOR))
        .unwrap_or(lines.len());
    lines.drain(..lead);

    while lines.last() == Some(&"") {
        lines.pop();
    }

    let mut kept: Vec<&str> = Vec::with_capacity(lines.len());
    let mut previous_blank = false;
    for line in lines {
        let blank = line.is_empty();
        if !(blank && previous_blank) {
            kept.push(line);
        }
        previous_blank = blank;
    }
    kept.join("\n")
}

/// Split sibling blocks at every un-indented line and parse each one.
///
/// A blank line ends a block only when the line after it is un-indented;
/// a blank followed by more indentation stays inside the current tail, so
/// the indented run keeps its anchor instead of being orphaned.
fn parse_lines(lines: &[&str]) -> Node {
    let mut node = Node::new();
    let mut i = 0;
    while i < lines.len() {
        let head = lines[i];
        let anchored = !head.is_empty() && !head.starts_with(SEPARATOR);
        let mut end = i + 1;
        while end < lines.len() {
            let line = lines[end];
            let continues = line.starts_with(SEPARATOR)
                || (anchored
                    && line.is_empty()
                    && lines
                        .get(end + 1)
                        .is_some_and(|next| next.starts_with(SEPARATOR)));
            if !continues {
                break;
            }
            end += 1;
        }
        // A block must be anchored by an un-indented, non-empty line; stray
        // indentation with no anchor has no key to attach to and is dropped.
        if anchored {
            let (key, value) = parse_block(head, &lines[i + 1..end]);
            node.push_entry(key, value);
        }
        i = end;
    }
    node
}

/// Parse one block: the anchor line plus its indented tail.
///
/// A separator on the anchor line means the block is a leaf; the tail lines
/// are value continuations and lose exactly one indentation space each (a
/// blank tail line contributes an empty value line as is). No
/// separator means the tail, de-indented by one space per line, is a nested
/// sibling list parsed recursively — an empty tail is the empty subtree,
/// which is distinct from the leaf holding the empty string (`key ` vs
/// `key`).
fn parse_block<'a>(head: &'a str, tail: &[&'a str]) -> (&'a str, Value) {
    match head.find(SEPARATOR) {
        Some(split) => {
            let key = &head[..split];
            let mut text = String::from(&head[split + 1..]);
            for line in tail {
                text.push('\n');
                text.push_str(line.strip_prefix(SEPARATOR).unwrap_or(line));
            }
            (key, Value::Leaf(text))
        }
        None => {
            let child_lines: Vec<&str> = tail
                .iter()
                .map(|line| line.strip_prefix(SEPARATOR).unwrap_or(line))
                .collect();
            (head, Value::Tree(parse_lines(&child_lines)))
        }
    }
}
