//! Markdown escaping and fence sizing

/// Escape text so it re-parses as the same literal characters.
///
/// Besides the usual inline markers this covers the dialect's own syntax:
/// `$` (math), `~` (strikethrough) and `<` (raw markup such as `<style>`).
/// Block markers (`#`, `-`, `+`, `:`, `=`, `N.`) are escaped when `text`
/// starts a line.
pub fn escape_markdown(text: &str, mut at_line_start: bool) -> String {
    let mut result = String::with_capacity(text.len() + text.len() / 10);
    let mut chars = text.chars().peekable();
    let mut digits_at_start = false;

    while let Some(c) = chars.next() {
        match c {
            '\\' | '*' | '_' | '[' | ']' | '`' | '|' | '<' | '>' | '$' | '~' | '&' => {
                result.push('\\');
                result.push(c);
            }
            '#' | '-' | '+' | ':' | '=' if at_line_start => {
                result.push('\\');
                result.push(c);
            }
            '.' | ')' if digits_at_start => {
                result.push('\\');
                result.push(c);
            }
            '!' if chars.peek() == Some(&'[') => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
        digits_at_start = c.is_ascii_digit() && (at_line_start || digits_at_start);
        at_line_start = c == '\n';
    }

    result
}

fn longest_run(content: &str, marker: char) -> usize {
    let mut max_run = 0;
    let mut current_run = 0;
    for c in content.chars() {
        if c == marker {
            current_run += 1;
            max_run = max_run.max(current_run);
        } else {
            current_run = 0;
        }
    }
    max_run
}

/// Backticks for a code fence: at least three, longer than any run inside.
pub fn fence_length(content: &str) -> usize {
    longest_run(content, '`').max(2) + 1
}

/// Backticks for a code span: one more than the longest run inside.
pub fn code_ticks(content: &str) -> usize {
    longest_run(content, '`') + 1
}

/// A code span that reads back as `content`.
pub fn code_span(content: &str) -> String {
    let ticks = "`".repeat(code_ticks(content));
    let padded = content.starts_with('`')
        || content.ends_with('`')
        || (content.starts_with(' ') && content.ends_with(' ') && !content.trim().is_empty());
    if padded {
        format!("{ticks} {content} {ticks}")
    } else {
        format!("{ticks}{content}{ticks}")
    }
}

/// Link or image destination, bracketed when it would not parse bare.
pub fn destination(url: &str) -> String {
    if url.is_empty() || url.contains([' ', '(', ')', '<', '>']) {
        format!("<{}>", url.replace('<', "%3C").replace('>', "%3E"))
    } else {
        url.to_string()
    }
}

pub fn title(title: &str) -> String {
    format!("\"{}\"", title.replace('\\', "\\\\").replace('"', "\\\""))
}
