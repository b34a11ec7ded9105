//! Export tests for HTML (qtext → HTML)

use crate::common::render;
use insta::assert_snapshot;
use qtext_babel::OutputFormat;

fn html(source: &str) -> String {
    render(source, OutputFormat::Html).unwrap()
}

#[test]
fn test_paragraph_simple() {
    assert_snapshot!(html("This is a simple paragraph."), @r#"<div class="qtext"><p>This is a simple paragraph.</p></div>"#);
}

#[test]
fn test_text_is_escaped() {
    let out = html("a < b & \"c\"");
    assert!(out.contains("<p>a &lt; b &amp; \"c\"</p>"));
}

#[test]
fn test_inline_elements() {
    let out = html("*em* **strong** ~~del~~ `code` [link](https://example.com \"T\")");
    assert!(out.contains("<em>em</em>"));
    assert!(out.contains("<strong>strong</strong>"));
    assert!(out.contains("<del>del</del>"));
    assert!(out.contains("<code>code</code>"));
    assert!(out.contains("<a href=\"https://example.com\" title=\"T\">link</a>"));
}

#[test]
fn test_breaks() {
    let out = html("one\ntwo  \nthree");
    assert!(out.contains("<p>one\ntwo<br>three</p>"));
}

#[test]
fn test_six_heading_levels() {
    let out = html("# 1\n\n## 2\n\n### 3\n\n#### 4\n\n##### 5\n\n###### 6");
    for level in 1..=6 {
        assert!(out.contains(&format!("<h{level}>{level}</h{level}>")));
    }
}

#[test]
fn test_blockquote_code_block_and_rule() {
    let out = html("> quoted\n\n```rust\nfn main() {}\n```\n\n---");
    assert!(out.contains("<blockquote><p>quoted</p></blockquote>"));
    assert!(out.contains("<pre><code class=\"language-rust\">fn main() {}\n</code></pre>"));
    assert!(out.contains("<hr>"));
}

#[test]
fn test_nested_list() {
    let out = html("- a\n  - b\n- c");
    assert!(out.contains("<ul><li>a\n<ul><li>b</li></ul></li>\n<li>c</li></ul>"));
}

#[test]
fn test_placeholders_are_decorated() {
    let out = html("Name: <placeholder>first</placeholder> <placeholder>last</placeholder>");
    assert_eq!(out.matches("class=\"qtext-placeholder\"").count(), 2);
    assert!(out.contains(">[first]</span> <span"));
    assert!(out.contains(">[last]</span>"));
}

#[test]
fn test_container_class_uses_name() {
    let out = html("::: hint\nLook closer.\n:::");
    assert_snapshot!(out, @r#"<div class="qtext"><div class="qtext-hint"><p>Look closer.</p></div></div>"#);
}

#[test]
fn test_lms_flavor_without_instance_matches_html() {
    let source = "Text $x$ and ![r](https://example.com/r.png)";
    let lms = render(source, OutputFormat::LmsHtml).unwrap();
    assert_eq!(lms, html(source));
}
