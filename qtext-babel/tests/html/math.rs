//! Math in the HTML formats

use crate::common::{parse_str, render, FailingMath, TaggingMath};
use qtext_babel::{LmsInstance, OutputFormat, RenderOptions};

#[test]
fn test_fallback_without_math_tool() {
    let html = render("Solve $x^2$.\n\n$$a < b$$", OutputFormat::Html).unwrap();
    assert!(html.contains("<code class=\"math\">x^2</code>"));
    assert!(html.contains("<pre class=\"math\"><code>a &lt; b</code></pre>"));
}

#[test]
fn test_tool_output_is_embedded_unescaped() {
    let parsed = parse_str("Solve $x^2$.\n\n$$y$$");
    let options = RenderOptions::default().with_math(&TaggingMath);
    let html = parsed.render(OutputFormat::Html, &options).unwrap();
    assert!(html.contains("<span class=\"math\"><math data-mode=\"inline\">x^2</math></span>"));
    assert!(html.contains("<div class=\"math\"><math data-mode=\"display\">y</math></div>"));
}

#[test]
fn test_tool_failure_is_a_resource_error() {
    let parsed = parse_str("$x$");
    let options = RenderOptions::default().with_math(&FailingMath);
    let err = parsed.render(OutputFormat::Html, &options).unwrap_err();
    assert!(err.is_resource_error());
}

#[test]
fn test_lms_equation_images() {
    let lms = LmsInstance::parse("https://canvas.example.edu", "1").unwrap();
    let parsed = parse_str("Area $\\pi r^2$");
    let options = RenderOptions::default().with_lms(&lms).with_math(&TaggingMath);
    let html = parsed.render(OutputFormat::LmsHtml, &options).unwrap();
    assert!(html.contains("class=\"equation_image\""));
    assert!(html.contains("src=\"https://canvas.example.edu/equation_images/"));
    assert!(html.contains("pi%20r"));
    assert!(html.contains("data-equation-content=\"\\pi r^2\""));
    assert!(!html.contains("<math"));
}
