//! TeX escaping
//!
//! The table is applied in order. Backslash and braces are first swapped for
//! private-use sentinels so the replacements of later rows, which introduce
//! backslashes and braces of their own, are not escaped a second time.

use crate::error::FormatError;

const BACKSLASH: char = '\u{E000}';
const OPEN_BRACE: char = '\u{E001}';
const CLOSE_BRACE: char = '\u{E002}';

const SPECIALS: [(&str, &str); 7] = [
    ("&", r"\&"),
    ("%", r"\%"),
    ("$", r"\$"),
    ("#", r"\#"),
    ("_", r"\_"),
    ("~", r"\textasciitilde{}"),
    ("^", r"\textasciicircum{}"),
];

const SENTINELS: [(char, &str); 3] = [
    (BACKSLASH, r"\textbackslash{}"),
    (OPEN_BRACE, r"\{"),
    (CLOSE_BRACE, r"\}"),
];

pub fn escape_tex(text: &str) -> String {
    let mut escaped: String = text
        .chars()
        .map(|c| match c {
            '\\' => BACKSLASH,
            '{' => OPEN_BRACE,
            '}' => CLOSE_BRACE,
            other => other,
        })
        .collect();

    for (raw, replacement) in SPECIALS {
        escaped = escaped.replace(raw, replacement);
    }
    for (sentinel, replacement) in SENTINELS {
        escaped = escaped.replace(sentinel, replacement);
    }
    escaped
}

/// Inverse of [`escape_tex`].
pub fn unescape_tex(tex: &str) -> String {
    let mut text = tex.to_string();
    for (sentinel, replacement) in SENTINELS {
        text = text.replace(replacement, &sentinel.to_string());
    }
    for (raw, replacement) in SPECIALS.iter().rev() {
        text = text.replace(replacement, raw);
    }
    text.chars()
        .map(|c| match c {
            BACKSLASH => '\\',
            OPEN_BRACE => '{',
            CLOSE_BRACE => '}',
            other => other,
        })
        .collect()
}

/// Escape the characters `\href` treats specially in its URL argument.
pub fn escape_url(url: &str) -> String {
    url.replace('\\', "/").replace('%', r"\%").replace('#', r"\#")
}

/// A file path as `\includegraphics` reads it.
///
/// Backslashes become forward slashes. `%`, `#` and braces have no escape
/// that survives graphicx's file lookup, so such paths are refused.
pub fn graphics_path(path: &str) -> Result<String, FormatError> {
    if let Some(bad) = path.chars().find(|c| matches!(c, '%' | '#' | '{' | '}')) {
        return Err(FormatError::ResourceError(format!(
            "image path cannot be referenced from LaTeX ('{bad}'): {path}"
        )));
    }
    Ok(path.replace('\\', "/"))
}
