//! Same input, same output, for every format.

use crate::common::{parse_str, render};
use qtext_babel::OutputFormat;

const KITCHENSINK: &str = "<style>{\"font-size\": 11, \"table-border\": true}</style>\n\n\
# Kitchen sink\n\n\
Text with *em*, **strong**, ~~strike~~, `code`, $x^2$ and a [link](https://example.com \"t\").\n\
Second line<br>after a break.\n\n\
::: question\n\
<style>{\"text-align\": \"center\"}</style>\n\n\
What is <placeholder>answer</placeholder>?\n\n\
1. one\n\
2. two\n\n\
> quoted\n\n\
| h1 | h2 |\n\
|:---|---:|\n\
| a  |\n\n\
$$\\int_0^1 f$$\n\n\
---\n\
:::\n";

#[test]
fn test_every_format_is_deterministic() {
    for format in OutputFormat::ALL {
        if format == OutputFormat::Text {
            continue;
        }
        let first = render(KITCHENSINK, format).unwrap();
        let second = render(KITCHENSINK, format).unwrap();
        assert_eq!(first, second, "{format} output differs between runs");
        assert!(!first.is_empty(), "{format} output is empty");
    }
}

#[test]
fn test_parse_is_deterministic() {
    assert_eq!(parse_str(KITCHENSINK), parse_str(KITCHENSINK));
}

#[test]
fn test_one_document_renders_many_times() {
    let parsed = parse_str(KITCHENSINK);
    let options = qtext_babel::RenderOptions::default()
        .with_math(&qtext_babel::resources::NoMathRenderer);
    let html = parsed.render(OutputFormat::Html, &options).unwrap();
    let _ = parsed.render(OutputFormat::Markdown, &options).unwrap();
    assert_eq!(parsed.render(OutputFormat::Html, &options).unwrap(), html);
}
