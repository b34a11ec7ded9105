//! Export tests for canonical markdown (qtext → markdown)

use crate::common::render;
use qtext_babel::OutputFormat;

fn markdown(source: &str) -> String {
    render(source, OutputFormat::Markdown).unwrap()
}

#[test]
fn test_bullets_are_normalized() {
    assert_eq!(markdown("* a\n* b"), "- a\n- b\n");
    assert_eq!(markdown("+ a\n\n+ b"), "- a\n\n- b\n");
}

#[test]
fn test_special_characters_are_escaped() {
    assert_eq!(markdown("a \\*b\\* \\$5"), "a \\*b\\* \\$5\n");
}

#[test]
fn test_image_source_is_left_as_written() {
    assert_eq!(
        markdown("![alt *x*](img/a.png \"T\")"),
        "![alt x](img/a.png \"T\")\n"
    );
}

#[test]
fn test_placeholder_and_math() {
    assert_eq!(
        markdown("Fill <placeholder>  the   blank </placeholder>: $a+b$\n\n$$c$$"),
        "Fill <placeholder>the blank</placeholder>: $a+b$\n\n$$c$$\n"
    );
}

#[test]
fn test_container_style_is_reemitted() {
    assert_eq!(
        markdown("::: note\n<style>\"text-align\": \"right\"</style>\n\nhi\n:::"),
        "::: note\n<style>{\"text-align\":\"right\"}</style>\n\nhi\n:::\n"
    );
}

#[test]
fn test_empty_document() {
    assert_eq!(markdown(""), "");
}
