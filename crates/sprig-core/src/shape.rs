//! Shape indexing — structural signatures for homogeneous collections.
//!
//! A node's *shape* is its ordered list of distinct property names plus a
//! name → position index. Large collections of sibling records usually repeat
//! one shape thousands of times; [`shape_index`] canonicalizes every node
//! sharing a signature onto a single reference-counted [`Shape`], so the
//! per-node copies can be dropped.
//!
//! Shapes are derived data. [`Node::shape`] caches lazily, and any mutation
//! of the node invalidates the cache.

use std::collections::HashMap;
use std::rc::Rc;

use crate::node::{Node, Value};

/// The ordered-distinct-property signature of an interior node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    /// Distinct property names in first-occurrence order.
    pub properties: Vec<String>,
    /// Name → position within `properties`.
    pub index: HashMap<String, usize>,
}

impl Shape {
    /// Compute the shape of a node from its current key sequence.
    pub fn of(node: &Node) -> Shape {
        let mut properties: Vec<String> = Vec::new();
        let mut index = HashMap::new();
        for key in node.distinct_keys() {
            index.insert(key.to_string(), properties.len());
            properties.push(key.to_string());
        }
        Shape { properties, index }
    }

    /// The order-significant, space-joined signature string used as the
    /// sharing key by [`shape_index`].
    pub fn signature(&self) -> String {
        self.properties.join(" ")
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Position of `name` among the distinct properties.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }
}

impl Node {
    /// The cached shape of this node, computed on first use.
    ///
    /// The returned handle stays valid after mutations, but describes the key
    /// sequence at the time it was computed; the node itself recomputes on
    /// the next call.
    pub fn shape(&mut self) -> Rc<Shape> {
        if let Some(shape) = &self.shape {
            return Rc::clone(shape);
        }
        let shape = Rc::new(Shape::of(self));
        self.shape = Some(Rc::clone(&shape));
        shape
    }
}

/// Scan the whole tree and re-point every interior node (the root included)
/// at one canonical [`Shape`] per signature.
///
/// Returns the signature → shape map. After the scan, ten structurally
/// identical siblings hold ten clones of one `Rc`, not ten separate shapes;
/// previously cached per-node shapes are released.
pub fn shape_index(root: &mut Node) -> HashMap<String, Rc<Shape>> {
    let mut map = HashMap::new();
    index_node(root, &mut map);
    map
}

fn index_node(node: &mut Node, map: &mut HashMap<String, Rc<Shape>>) {
    let signature = node.distinct_keys().join(" ");
    match map.get(&signature) {
        Some(canonical) => node.shape = Some(Rc::clone(canonical)),
        None => {
            let shape = node.shape();
            map.insert(signature, shape);
        }
    }
    // Installing caches must not count as a mutation, so this walks the
    // entry vector directly instead of going through the public API.
    for (_, value) in node.entries.iter_mut() {
        if let Value::Tree(child) = value {
            index_node(child, map);
        }
    }
}

/// The set union of properties across all child subtrees of `node`.
///
/// Order is first-appearance and not significant; each property appears once.
/// Leaf children contribute nothing.
pub fn union_shape(node: &Node) -> Shape {
    let mut properties: Vec<String> = Vec::new();
    let mut index = HashMap::new();
    for (_, value) in node.entries() {
        if let Value::Tree(child) = value {
            for key in child.distinct_keys() {
                if !index.contains_key(key) {
                    index.insert(key.to_string(), properties.len());
                    properties.push(key.to_string());
                }
            }
        }
    }
    Shape { properties, index }
}
