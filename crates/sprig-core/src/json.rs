//! Bridge to and from generic JSON values.
//!
//! `from_json` is the construct-from-generic-object entry point: objects
//! become subtrees, arrays become subtrees keyed by decimal index, and every
//! scalar becomes a leaf holding its canonical text (`null` becomes the
//! empty leaf). A JSON key the grammar cannot carry — one containing the
//! field separator or a line break — is a structural error, never a silent
//! merge.
//!
//! `to_json` goes the other way with plain-mapping semantics: duplicate keys
//! collapse to their last occurrence, and leaf text stays a JSON string even
//! when it looks numeric — reinterpreting scalars is a caller's explicit
//! conversion step, not this bridge's.

use serde_json::{Map, Value as Json};

use crate::error::{Result, SprigError};
use crate::node::{check_key, Node, Value};

/// Build a tree from a parsed JSON value. The root must be an object or an
/// array; a bare scalar has no entry to hang itself on.
pub fn from_json(json: &Json) -> Result<Node> {
    match json {
        Json::Object(map) => node_from_object(map),
        Json::Array(items) => node_from_array(items),
        _ => Err(SprigError::ScalarRoot),
    }
}

/// Parse a JSON string and build a tree from it.
pub fn from_json_str(text: &str) -> Result<Node> {
    let json: Json = serde_json::from_str(text)?;
    from_json(&json)
}

fn node_from_object(map: &Map<String, Json>) -> Result<Node> {
    let mut node = Node::new();
    for (key, value) in map {
        check_key(key)?;
        node.push_entry(key, value_from_json(value)?);
    }
    Ok(node)
}

fn node_from_array(items: &[Json]) -> Result<Node> {
    let mut node = Node::new();
    for (i, item) in items.iter().enumerate() {
        node.push_entry(&i.to_string(), value_from_json(item)?);
    }
    Ok(node)
}

fn value_from_json(json: &Json) -> Result<Value> {
    Ok(match json {
        Json::Null => Value::leaf(""),
        Json::Bool(b) => Value::leaf(if *b { "true" } else { "false" }),
        Json::Number(n) => Value::leaf(n.to_string()),
        Json::String(s) => Value::leaf(s.clone()),
        Json::Object(map) => Value::Tree(node_from_object(map)?),
        Json::Array(items) => Value::Tree(node_from_array(items)?),
    })
}

/// Project a tree onto a JSON object. Insertion order is preserved
/// (`serde_json` with `preserve_order`); repeated keys keep only their last
/// value.
pub fn to_json(node: &Node) -> Json {
    let mut map = Map::new();
    for (key, value) in node.entries() {
        let json = match value {
            Value::Leaf(text) => Json::String(text.clone()),
            Value::Tree(child) => to_json(child),
        };
        map.insert(key.to_string(), json);
    }
    Json::Object(map)
}
