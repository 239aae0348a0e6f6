use sprig_core::{parse, Value};

// ============================================================================
// Flat documents
// ============================================================================

#[test]
fn parse_flat_document() {
    let node = parse("name Alice\nage 30\n");
    assert_eq!(node.len(), 2);
    assert_eq!(node.get_str("name"), Some("Alice"));
    assert_eq!(node.get_str("age"), Some("30"));
}

#[test]
fn parse_empty_input() {
    assert!(parse("").is_empty());
}

#[test]
fn parse_whitespace_only_input() {
    assert!(parse("   \n \n\n").is_empty());
}

#[test]
fn parse_missing_final_newline() {
    let node = parse("name Alice");
    assert_eq!(node.get_str("name"), Some("Alice"));
}

#[test]
fn numeric_looking_values_stay_strings() {
    let node = parse("age 30\n");
    assert_eq!(node.get("age"), Some(&Value::leaf("30")));
}

// ============================================================================
// Nesting
// ============================================================================

#[test]
fn parse_nested_document() {
    let node = parse("user\n name Alice\n age 30\nactive yes\n");
    assert_eq!(node.len(), 2);
    assert_eq!(node.get_str("user name"), Some("Alice"));
    assert_eq!(node.get_str("user age"), Some("30"));
    assert_eq!(node.get_str("active"), Some("yes"));
}

#[test]
fn parse_deep_nesting() {
    let node = parse("a\n b\n  c deep\n");
    assert_eq!(node.get_str("a b c"), Some("deep"));
}

#[test]
fn nested_node_is_a_tree() {
    let node = parse("user\n name Alice\n");
    assert!(node.get("user").unwrap().is_tree());
    assert_eq!(node.get_node("user").unwrap().len(), 1);
}

// ============================================================================
// Empty leaf vs empty subtree
// ============================================================================

#[test]
fn trailing_separator_is_an_empty_leaf() {
    let node = parse("hi \n");
    assert_eq!(node.get("hi"), Some(&Value::leaf("")));
}

#[test]
fn bare_key_is_an_empty_subtree() {
    let node = parse("hi\n");
    let value = node.get("hi").unwrap();
    assert!(value.is_tree());
    assert!(value.as_node().unwrap().is_empty());
}

// ============================================================================
// Duplicate keys
// ============================================================================

#[test]
fn duplicates_are_preserved_in_order() {
    let node = parse("height 45px\nheight 50px\nwidth 56px\n");
    assert_eq!(node.len(), 3);
    assert_eq!(node.get_str("height"), Some("45px"));
    assert_eq!(node.value_at(1), Some(&Value::leaf("50px")));
    assert_eq!(node.values_named("height").count(), 2);
}

#[test]
fn index_of_finds_first_occurrence() {
    let node = parse("a 1\nb 2\na 3\n");
    assert_eq!(node.index_of("a"), Some(0));
    assert_eq!(node.key_at(2), Some("a"));
}

// ============================================================================
// Multiline values
// ============================================================================

#[test]
fn parse_multiline_value() {
    let node = parse("note line1\n line2\n line3\n");
    assert_eq!(node.get_str("note"), Some("line1\nline2\nline3"));
}

#[test]
fn multiline_value_with_empty_line() {
    // An empty continuation line serializes as a single indentation space.
    let node = parse("note first\n \n last\n");
    assert_eq!(node.get_str("note"), Some("first\n\nlast"));
}

#[test]
fn continuation_keeps_extra_indentation() {
    // Only one escape space is stripped per continuation line.
    let node = parse("note a\n  indented\n");
    assert_eq!(node.get_str("note"), Some("a\n indented"));
}

#[test]
fn value_with_leading_space_is_preserved() {
    let node = parse("k  x\n");
    assert_eq!(node.get_str("k"), Some(" x"));
}

#[test]
fn multiline_value_inside_nested_node() {
    let node = parse("wrap\n note a\n  b\n");
    assert_eq!(node.get_str("wrap note"), Some("a\nb"));
}

// ============================================================================
// Normalization
// ============================================================================

#[test]
fn crlf_terminators_are_normalized() {
    let node = parse("name Alice\r\nage 30\r\n");
    assert_eq!(node.get_str("name"), Some("Alice"));
    assert_eq!(node.get_str("age"), Some("30"));
}

#[test]
fn leading_blank_lines_are_stripped() {
    let node = parse("\n  \nname Alice\n");
    assert_eq!(node.len(), 1);
    assert_eq!(node.get_str("name"), Some("Alice"));
}

#[test]
fn blank_lines_between_siblings_are_tolerated() {
    let node = parse("a 1\n\n\nb 2\n");
    assert_eq!(node.len(), 2);
    assert_eq!(node.get_str("b"), Some("2"));
}

#[test]
fn trailing_blank_lines_are_dropped() {
    let node = parse("a 1\n\n\n");
    assert_eq!(node.len(), 1);
}

#[test]
fn blank_line_before_an_indented_run_keeps_the_run() {
    // Not a block boundary: the line after the blank is still indented, so
    // the run stays attached to its anchor as value continuation.
    let node = parse("a 1\n\n x 9\n");
    assert_eq!(node.len(), 1);
    assert_eq!(node.get_str("a"), Some("1\n\nx 9"));
}

#[test]
fn blank_line_inside_a_nested_block_is_tolerated() {
    let node = parse("a\n b 1\n\n c 2\n");
    assert_eq!(node.get_str("a b"), Some("1"));
    assert_eq!(node.get_str("a c"), Some("2"));
}

// ============================================================================
// Lookup misses
// ============================================================================

#[test]
fn get_through_a_leaf_is_a_miss() {
    let node = parse("a hello\n");
    assert_eq!(node.get("a b"), None);
    assert_eq!(node.get_str("a b c"), None);
}

#[test]
fn get_absent_path_is_a_miss() {
    let node = parse("a\n b 1\n");
    assert_eq!(node.get("a c"), None);
    assert_eq!(node.get("z"), None);
}

#[test]
fn positional_access_out_of_range() {
    let node = parse("a 1\n");
    assert_eq!(node.at(1), None);
}
