//! Placeholder recognition through the public parse API.

use crate::common::parse_str;
use qtext_babel::{parse, Node};
use std::collections::BTreeSet;
use std::path::Path;

fn labels(source: &str) -> BTreeSet<String> {
    parse_str(source).document.collect_placeholders()
}

#[test]
fn test_inline_placeholders_are_collected() {
    let found = labels("Name: <placeholder>first</placeholder> <placeholder>last</placeholder>");
    let expected: BTreeSet<String> = ["first", "last"].iter().map(|s| s.to_string()).collect();
    assert_eq!(found, expected);
}

#[test]
fn test_placeholder_on_its_own_line_stays_inline() {
    let parsed = parse_str("<placeholder>answer</placeholder>");
    assert_eq!(
        parsed.document.blocks()[0],
        Node::paragraph(vec![Node::Placeholder {
            label: "answer".to_string()
        }])
    );
}

#[test]
fn test_block_placeholder_is_a_block() {
    let parsed = parse_str("Intro\n\n<placeholder>\nessay\n  answer\n</placeholder>\n\nOutro");
    let blocks = parsed.document.blocks();
    assert_eq!(blocks.len(), 3);
    assert_eq!(
        blocks[1],
        Node::Placeholder {
            label: "essay answer".to_string()
        }
    );
}

#[test]
fn test_placeholders_inside_containers_and_lists() {
    let found = labels("::: q\n- <placeholder>a</placeholder>\n- <placeholder>b</placeholder>\n:::\n");
    assert_eq!(found.len(), 2);
    assert!(found.contains("a") && found.contains("b"));
}

#[test]
fn test_missing_close_is_a_parse_error() {
    let err = parse("Name: <placeholder>first", Path::new(".")).unwrap_err();
    assert!(err.is_parse_error());
}

#[test]
fn test_stray_close_is_a_parse_error() {
    let err = parse("Name: first</placeholder>", Path::new(".")).unwrap_err();
    assert!(err.is_parse_error());
}

#[test]
fn test_formatted_interior_is_a_parse_error() {
    let err = parse("<placeholder>*first*</placeholder> x", Path::new(".")).unwrap_err();
    assert!(err.is_parse_error());
}

#[test]
fn test_blank_label_is_a_parse_error() {
    let err = parse("x <placeholder> </placeholder>", Path::new(".")).unwrap_err();
    assert!(err.is_parse_error());
}

#[test]
fn test_error_context_carries_surrounding_markup() {
    match parse("Name: <placeholder>first", Path::new(".")) {
        Err(qtext_babel::FormatError::ParseError { context, .. }) => {
            assert!(context.contains("<placeholder>"));
        }
        other => panic!("expected a parse error, got {other:?}"),
    }
}
