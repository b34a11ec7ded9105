//! Named container blocks and document structure.

use crate::common::parse_str;
use qtext_babel::ast::Container;
use qtext_babel::Node;

fn containers(nodes: &[Node]) -> Vec<&Container> {
    nodes
        .iter()
        .filter_map(|node| match node {
            Node::Container(container) => Some(container),
            _ => None,
        })
        .collect()
}

#[test]
fn test_root_wraps_everything() {
    let parsed = parse_str("# Title\n\ntext");
    let root = parsed.document.root.as_ref().expect("root");
    assert!(root.root);
    assert_eq!(root.name, None);
    assert_eq!(root.children.len(), 2);
}

#[test]
fn test_empty_source_has_no_root() {
    let parsed = parse_str("  \r\n \n");
    assert!(parsed.document.root.is_none());
    assert!(parsed.document.is_empty());
}

#[test]
fn test_nested_containers() {
    let parsed = parse_str("::::: outer\nA\n\n::: inner\nB\n:::\n\nC\n:::::\n");
    let outer = containers(parsed.document.blocks());
    assert_eq!(outer.len(), 1);
    assert_eq!(outer[0].name.as_deref(), Some("outer"));
    assert!(!outer[0].root);
    assert_eq!(outer[0].children.len(), 3);

    let inner = containers(&outer[0].children);
    assert_eq!(inner[0].name.as_deref(), Some("inner"));
    assert_eq!(
        inner[0].children,
        vec![Node::paragraph(vec![Node::text("B")])]
    );
}

#[test]
fn test_unclosed_container_closes_at_end() {
    let parsed = parse_str("::: note\nstill inside");
    let found = containers(parsed.document.blocks());
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].children.len(), 1);
}

#[test]
fn test_fences_inside_code_are_text() {
    let parsed = parse_str("```\n::: not-a-container\n```");
    assert!(containers(parsed.document.blocks()).is_empty());
    assert_eq!(
        parsed.document.blocks()[0],
        Node::CodeBlock {
            info: None,
            text: "::: not-a-container\n".to_string()
        }
    );
}

#[test]
fn test_raw_markup_is_dropped_but_line_breaks_stay() {
    let parsed = parse_str("one<br/>two <span>three</span>");
    assert_eq!(
        parsed.document.blocks()[0],
        Node::paragraph(vec![
            Node::text("one"),
            Node::HardBreak,
            Node::text("two three"),
        ])
    );
}

#[test]
fn test_empty_nodes_are_pruned() {
    let parsed = parse_str("<div></div>\n\n**<span></span>**\n\ntext");
    assert_eq!(
        parsed.document.blocks(),
        &[Node::paragraph(vec![Node::text("text")])]
    );
}

#[test]
fn test_collect_file_paths_skips_remote_images() {
    let parsed = parse_str(
        "![a](img/a.png) ![b](https://example.com/b.png) ![c](data:image/png;base64,AA==)",
    );
    let paths = parsed.document.collect_file_paths(std::path::Path::new("/course"));
    let expected: Vec<_> = vec![std::path::PathBuf::from("/course/img/a.png")];
    assert_eq!(paths.into_iter().collect::<Vec<_>>(), expected);
}

#[test]
fn test_table_cells_keep_alignment() {
    let parsed = parse_str("| a | b |\n|:-:|--:|\n| 1 | 2 |");
    match &parsed.document.blocks()[0] {
        Node::Table(table) => {
            assert_eq!(table.head.len(), 1);
            assert_eq!(table.body.len(), 1);
            assert!(table.head[0].cells[0].header);
            assert_eq!(table.body[0].cells[1].style.as_deref(), Some("text-align:right"));
        }
        other => panic!("expected table, got {other:?}"),
    }
}
