//! Style declarations and the cascade as seen through parse and render.

use crate::common::{parse_str, render};
use qtext_babel::{parse, Node, OutputFormat};
use std::path::Path;

const CASCADE: &str = "<style>{\"font-size\": 12}</style>\n\n\
                       ::: inner\n<style>{\"text-align\": \"center\"}</style>\n\nBody\n:::\n";

#[test]
fn test_block_style_attaches_to_enclosing_container() {
    let parsed = parse_str(CASCADE);
    let root = parsed.document.root.as_ref().expect("root");
    assert_eq!(root.style.to_json(), r#"{"font-size":12}"#);

    match &root.children[0] {
        Node::Container(inner) => {
            assert_eq!(inner.name.as_deref(), Some("inner"));
            assert_eq!(inner.style.to_json(), r#"{"text-align":"center"}"#);
        }
        other => panic!("expected container, got {other:?}"),
    }
}

#[test]
fn test_html_applies_incremental_style_below_root() {
    let html = render(CASCADE, OutputFormat::Html).unwrap();
    assert_eq!(
        html,
        "<div class=\"qtext\" style=\"font-size: 12pt\">\
         <div class=\"qtext-inner\" style=\"text-align: center\"><p>Body</p></div></div>"
    );
}

#[test]
fn test_latex_applies_full_style_at_every_level() {
    let latex = render(CASCADE, OutputFormat::Latex).unwrap();
    let nested = "{\\fontsize{12}{14.4}\\selectfont\n\\begin{center}\nBody\n\\end{center}\n}";
    assert!(latex.contains(nested));
    // root group wraps the nested one
    assert!(latex.starts_with("{\\fontsize{12}{14.4}\\selectfont\n{\\fontsize"));
}

#[test]
fn test_inline_style_is_removed_from_text() {
    let parsed = parse_str("Hello <style>\"text-align\": \"right\"</style>world");
    let root = parsed.document.root.as_ref().expect("root");
    assert_eq!(root.style.to_json(), r#"{"text-align":"right"}"#);
    assert_eq!(
        root.children,
        vec![Node::paragraph(vec![Node::text("Hello world")])]
    );
}

#[test]
fn test_later_declarations_win() {
    let parsed = parse_str(
        "<style>{\"font-size\": 10, \"text-align\": \"left\"}</style>\n\n\
         <style>{\"font-size\": 14}</style>\n\nx",
    );
    let style = &parsed.document.root.as_ref().expect("root").style;
    assert_eq!(style.to_json(), r#"{"font-size":14,"text-align":"left"}"#);
}

#[test]
fn test_unknown_keys_are_ignored_by_renderers() {
    let html = render("<style>{\"colour\": \"red\"}</style>\n\nx", OutputFormat::Html).unwrap();
    assert_eq!(html, "<div class=\"qtext\"><p>x</p></div>");
}

#[test]
fn test_unclosed_inline_style_is_a_parse_error() {
    let err = parse("a <style>{\"font-size\": 3}", Path::new(".")).unwrap_err();
    assert!(err.is_parse_error());
}

#[test]
fn test_non_object_payload_is_a_parse_error() {
    let err = parse("<style>[1, 2]</style>\n\nx", Path::new(".")).unwrap_err();
    assert!(err.is_parse_error());
}

#[test]
fn test_empty_style_is_allowed() {
    let parsed = parse_str("<style></style>\n\nx");
    assert!(parsed.document.root.expect("root").style.is_empty());
}
