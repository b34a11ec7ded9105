//! Export tests for plain text (qtext → text)

use crate::common::{render, render_with};
use qtext_babel::{FormatError, OutputFormat, RenderOptions};

fn permissive() -> RenderOptions<'static> {
    RenderOptions::default().allow_all_characters(true)
}

#[test]
fn test_restrictive_text_is_one_filtered_line() {
    let text = render("# Unit 2:\n\nFirst *para*.\n\nSecond, [linked](https://x.org)!", OutputFormat::Text)
        .unwrap();
    assert_eq!(text, "Unit 2 First para Second linked");
}

#[test]
fn test_restrictive_filter_runs_after_whitespace_collapse() {
    let text = render("Café – naïve", OutputFormat::Text).unwrap();
    assert_eq!(text, "Café  naïve");
}

#[test]
fn test_structures_are_not_supported_by_default() {
    for source in [
        "| a |\n|---|\n| b |",
        "- one\n- two",
        "![dot](img/dot.png)",
        "> quoted",
        "a\n\n---\n\nb",
    ] {
        let err = render(source, OutputFormat::Text).unwrap_err();
        assert!(
            matches!(err, FormatError::NotSupported(_)),
            "expected NotSupported for {source:?}, got {err:?}"
        );
    }
}

#[test]
fn test_raw_passthrough_for_code_and_math() {
    let source = "Area $\\pi r^2$ via `area()`";
    assert!(matches!(
        render(source, OutputFormat::Text),
        Err(FormatError::NotSupported(_))
    ));

    let raw = RenderOptions::default().allow_raw(true);
    assert_eq!(
        render_with(source, OutputFormat::Text, raw).unwrap(),
        "Area pi r2 via area"
    );
    assert_eq!(
        render_with(source, OutputFormat::Text, permissive()).unwrap(),
        "Area $\\pi r^2$ via area()"
    );
}

#[test]
fn test_permissive_mode_drops_unsupported_nodes() {
    let text = render_with(
        "Intro:\n\n> quoted\n\n| a |\n|---|\n| b |\n\n![dot](img/dot.png)\n\nDone.",
        OutputFormat::Text,
        permissive(),
    )
    .unwrap();
    assert_eq!(text, "Intro:\n\nDone.");
}

#[test]
fn test_permissive_mode_keeps_breaks_and_code_blocks() {
    let text = render_with(
        "one\\\ntwo\nthree\n\n```\nfn main() {}\n```",
        OutputFormat::Text,
        permissive(),
    )
    .unwrap();
    assert_eq!(text, "one\ntwo three\n\nfn main() {}");
}

#[test]
fn test_containers_contribute_only_their_content() {
    let text = render_with(
        "::: box\n<style>{\"font-size\": 20}</style>\n\nInside <placeholder>blank</placeholder>\n:::",
        OutputFormat::Text,
        permissive(),
    )
    .unwrap();
    assert_eq!(text, "Inside [blank]");
}
