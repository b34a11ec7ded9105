//! Export tests for LaTeX (qtext → LaTeX)

use crate::common::render;
use qtext_babel::OutputFormat;

fn latex(source: &str) -> String {
    render(source, OutputFormat::Latex).unwrap()
}

#[test]
fn test_special_characters_are_escaped() {
    assert_eq!(
        latex("100% of #1 & {x}_2 ~ a^b \\ c"),
        "100\\% of \\#1 \\& \\{x\\}\\_2 \\textasciitilde{} a\\textasciicircum{}b \\textbackslash{} c\n"
    );
}

#[test]
fn test_heading_levels() {
    let out = latex("# a\n\n## b\n\n### c\n\n#### d\n\n##### e\n\n###### f");
    for expected in [
        "\\section*{a}",
        "\\subsection*{b}",
        "\\subsubsection*{c}",
        "\\paragraph*{d}",
        "\\subparagraph*{e}",
        "\\textbf{f}",
    ] {
        assert!(out.contains(expected), "missing {expected} in {out}");
    }
}

#[test]
fn test_math_is_delimited() {
    let out = latex("Inline $x^2$ here.\n\n$$\\sum_i i$$");
    assert!(out.contains("Inline $x^2$ here."));
    assert!(out.contains("$$\\sum_i i$$"));
}

#[test]
fn test_verbatim_delimiter_exhaustion_is_a_resource_error() {
    let source = "`|!+=/:;@#-_,.~\"'`";
    let err = render(source, OutputFormat::Latex).unwrap_err();
    assert!(err.is_resource_error());
}

#[test]
fn test_bordered_table() {
    let out = latex(
        "<style>{\"table-border\": true, \"table-cell-height\": 2}</style>\n\n\
         | a | b |\n|:-:|---|\n| 1 | 2 |\n| 3 | 4 |",
    );
    assert!(out.contains("\\renewcommand{\\arraystretch}{2}"));
    assert!(out.contains("\\begin{tabular}{|c|l|}\n\\hline\n\\textbf{a} & \\textbf{b} \\\\\n\\hline\n1 & 2 \\\\\n\\hline\n3 & 4 \\\\\n\\hline\n\\end{tabular}"));
}

#[test]
fn test_lists_quotes_links_and_rules() {
    let out = latex("- a\n- b\n\n> q\n\n[site](https://example.com/#x)\n\n***");
    assert!(out.contains("\\begin{itemize}\n\\item a\n\\item b\n\\end{itemize}"));
    assert!(out.contains("\\begin{quote}\nq\n\\end{quote}"));
    assert!(out.contains("\\href{https://example.com/\\#x}{site}"));
    assert!(out.contains("\\noindent\\rule{\\linewidth}{0.4pt}"));
}

#[test]
fn test_code_block_is_verbatim() {
    let out = latex("```\nif a { b }\n```");
    assert_eq!(out, "\\begin{verbatim}\nif a { b }\n\\end{verbatim}\n");
}

#[test]
fn test_content_align_centers_tables() {
    let out = latex("<style>{\"content-align\": \"center\"}</style>\n\n| a |\n|---|\n| 1 |");
    assert!(out.starts_with("\\begin{center}\n{\\renewcommand"));
}
