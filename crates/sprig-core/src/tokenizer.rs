//! Character-level tokenizer — tags every character of serialized text with
//! its grammatical role.
//!
//! This is a diagnostic and validation utility layered over the grammar; the
//! parser never consults it. The state machine runs over the flat text with
//! one piece of context: the *escape width* — the indentation (current key's
//! indent plus one) at which a following line continues the current value
//! instead of opening a new key. A newline followed by exactly that many
//! spaces is tagged [`Role::Escaped`] together with those spaces, and value
//! tagging resumes; any other newline is a plain [`Role::Newline`] and the
//! next line starts in key mode. Structural indentation is tagged
//! [`Role::Escaped`] as well — a leading space per depth level is the same
//! escape mechanism, applied to whole blocks.

/// The grammatical role of one character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Part of a property name.
    Key,
    /// The single space separating a key from its inline value.
    Separator,
    /// Part of a leaf value, continuation lines included.
    Value,
    /// A line break that ends the current entry.
    Newline,
    /// A line break or indentation space that subordinates the following
    /// text instead of ending the entry.
    Escaped,
}

/// Tag every character of `text` with its role. The result has exactly one
/// role per `char` of the input.
///
/// The input is expected to use `\n` terminators (see the parser's
/// normalization); other control characters are tagged like ordinary key or
/// value text.
pub fn tokenize(text: &str) -> Vec<Role> {
    let mut roles = Vec::with_capacity(text.len());
    let mut escape_width: Option<usize> = None;
    let mut first_line = true;

    for line in text.split('\n') {
        let indent = line.chars().take_while(|c| *c == ' ').count();

        if !first_line {
            if escape_width == Some(indent) {
                // Continuation: the newline and the exact-width indentation
                // are the escape, the rest of the line is still the value.
                roles.push(Role::Escaped);
                for _ in 0..indent {
                    roles.push(Role::Escaped);
                }
                for _ in line[indent..].chars() {
                    roles.push(Role::Value);
                }
                continue;
            }
            roles.push(Role::Newline);
        }
        first_line = false;

        for _ in 0..indent {
            roles.push(Role::Escaped);
        }
        let rest = &line[indent..];
        match rest.find(' ') {
            Some(split) => {
                for _ in rest[..split].chars() {
                    roles.push(Role::Key);
                }
                roles.push(Role::Separator);
                for _ in rest[split + 1..].chars() {
                    roles.push(Role::Value);
                }
            }
            None => {
                for _ in rest.chars() {
                    roles.push(Role::Key);
                }
            }
        }
        escape_width = Some(indent + 1);
    }

    roles
}
