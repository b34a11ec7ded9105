//! Canonical markdown parses back to the same document.

use crate::common::{parse_str, render};
use qtext_babel::OutputFormat;

fn assert_round_trip(source: &str) {
    let first = parse_str(source);
    let markdown = render(source, OutputFormat::Markdown).unwrap();
    let second = parse_str(&markdown);
    assert_eq!(
        first.document.root, second.document.root,
        "round trip changed the document:\n{markdown}"
    );
    // canonical form is a fixed point
    assert_eq!(render(&markdown, OutputFormat::Markdown).unwrap(), markdown);
}

#[test]
fn test_inline_markup_round_trips() {
    assert_round_trip("Plain *em* **strong** ~~gone~~ ``co`de`` and [l](https://x.org \"t\").");
}

#[test]
fn test_escapes_round_trip() {
    assert_round_trip("1\\. not a list? \\# no heading, a_b, <tag>, 2 * 3, [x], cost $5 and ~ish~");
}

#[test]
fn test_lists_round_trip() {
    assert_round_trip("1. one\n   continued\n2. two\n   - nested\n   - again\n\n7. seven");
    assert_round_trip("- loose\n\n- items\n\n  with two paragraphs");
    assert_round_trip("- a\n  - b\n  - c\n- d\n  1. e\n- f");
}

#[test]
fn test_blocks_round_trip() {
    assert_round_trip(
        "# H1\n\nSetext\n------\n\n> quote\n> > nested\n\n```py\nprint('```')\n```\n\n---\n\n$$x$$",
    );
}

#[test]
fn test_tables_round_trip() {
    assert_round_trip("| a | b | c |\n|:--|:-:|--:|\n| 1 | **2** | `3` |\n| 4 |");
}

#[test]
fn test_containers_round_trip() {
    assert_round_trip(
        "<style>{\"font-size\": 12}</style>\n\n\
         ::: outer\n<style>{\"text-align\": \"center\", \"table-border\": true}</style>\n\n\
         A\n\n::: inner\nB <placeholder>c</placeholder>\n:::\n\nD\n:::\n\n\
         <placeholder>\nblock\n</placeholder>",
    );
}

#[test]
fn test_hard_breaks_round_trip() {
    assert_round_trip("one<br>two\\\nthree  \nfour");
    assert_round_trip("a\n\n<br>\n\nb");
    assert_round_trip("| h |\n| --- |\n| x<br>y |");
}

#[test]
fn test_setext_lookalikes_round_trip() {
    assert_round_trip("a\n\\===\n\nb\n\\---");
}

#[test]
fn test_pipes_in_table_cells_round_trip() {
    assert_round_trip("| `a\\|b` | $x \\| y$ | c \\| d |\n| --- | --- | --- |\n| 1 | 2 | 3 |");
}
