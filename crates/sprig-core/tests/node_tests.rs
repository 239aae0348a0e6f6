use sprig_core::{parse, serialize, Node, Value};

// ============================================================================
// Path-addressed append
// ============================================================================

#[test]
fn append_at_the_root() {
    let mut node = parse("a 1\n");
    assert!(node.append("b", Value::leaf("2")).unwrap());
    assert_eq!(serialize(&node), "a 1\nb 2\n");
}

#[test]
fn append_at_a_nested_path() {
    let mut node = parse("user\n name John\n");
    assert!(node.append("user age", Value::leaf("30")).unwrap());
    assert_eq!(serialize(&node), "user\n name John\n age 30\n");
}

#[test]
fn append_duplicate_key_is_allowed() {
    let mut node = parse("user\n tag a\n");
    assert!(node.append("user tag", Value::leaf("b")).unwrap());
    assert_eq!(node.get_node("user").unwrap().len(), 2);
}

#[test]
fn append_to_a_missing_parent_is_a_miss() {
    let mut node = parse("a 1\n");
    assert!(!node.append("ghost key", Value::leaf("x")).unwrap());
    assert_eq!(serialize(&node), "a 1\n");
}

#[test]
fn append_through_a_leaf_is_a_miss() {
    let mut node = parse("a scalar\n");
    assert!(!node.append("a key", Value::leaf("x")).unwrap());
}

#[test]
fn append_rejects_an_invalid_key() {
    let mut node = Node::new();
    assert!(node.append("bad\nkey", Value::leaf("x")).is_err());
    assert!(node.is_empty());
}

// ============================================================================
// Path-addressed insert
// ============================================================================

#[test]
fn insert_at_a_nested_path_position() {
    let mut node = parse("user\n name John\n age 30\n");
    assert!(node.insert(1, "user city", Value::leaf("x")).unwrap());
    assert_eq!(serialize(&node), "user\n name John\n city x\n age 30\n");
}

#[test]
fn insert_index_is_clamped_to_the_level() {
    let mut node = parse("a 1\n");
    assert!(node.insert(9, "b", Value::leaf("2")).unwrap());
    assert_eq!(node.key_at(1), Some("b"));
}

#[test]
fn insert_to_a_missing_parent_is_a_miss() {
    let mut node = parse("a 1\n");
    assert!(!node.insert(0, "ghost key", Value::leaf("x")).unwrap());
    assert_eq!(serialize(&node), "a 1\n");
}
