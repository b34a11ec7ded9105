//! Named container fences
//!
//! Splits source text into markdown runs and `:::` container blocks before the
//! markdown tokenizer sees it:
//!
//! ```text
//! ::: note
//! Body, tokenized recursively.
//! :::
//! ```
//!
//! A fence line is up to three spaces of indentation, three or more colons and,
//! for an opening fence, a name. A bare colon line closes the innermost open
//! container when it has at least as many colons as that container's opener.
//! Fence lines inside fenced code are plain text, containers left open at the
//! end of input are closed there, and a closing fence with nothing to close is
//! plain text.

/// A run of source text or a container with its own segments.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Markdown(String),
    Container { name: String, body: Vec<Segment> },
}

#[derive(Debug, PartialEq)]
enum FenceLine<'a> {
    Open { colons: usize, name: &'a str },
    Close { colons: usize },
}

struct Frame {
    name: String,
    colons: usize,
    segments: Vec<Segment>,
    text: String,
}

impl Frame {
    fn new(name: String, colons: usize) -> Self {
        Frame {
            name,
            colons,
            segments: Vec::new(),
            text: String::new(),
        }
    }

    fn flush(&mut self) {
        let text = std::mem::take(&mut self.text);
        if !text.trim().is_empty() {
            self.segments.push(Segment::Markdown(text));
        }
    }

    fn finish(mut self) -> Segment {
        self.flush();
        Segment::Container {
            name: self.name,
            body: self.segments,
        }
    }
}

/// Split `source` into top-level segments.
pub fn split_containers(source: &str) -> Vec<Segment> {
    let mut stack = vec![Frame::new(String::new(), 0)];
    let mut code_fence: Option<(char, usize)> = None;

    for line in source.split_inclusive('\n') {
        let bare = line.trim_end_matches(['\n', '\r']);

        if let Some((marker, length)) = code_fence {
            if closes_code_fence(bare, marker, length) {
                code_fence = None;
            }
            push_line(&mut stack, line);
            continue;
        }

        if let Some(opened) = opens_code_fence(bare) {
            code_fence = Some(opened);
            push_line(&mut stack, line);
            continue;
        }

        match fence_line(bare) {
            Some(FenceLine::Open { colons, name }) => {
                if let Some(top) = stack.last_mut() {
                    top.flush();
                }
                stack.push(Frame::new(name.to_string(), colons));
            }
            Some(FenceLine::Close { colons })
                if stack.len() > 1 && stack.last().is_some_and(|top| colons >= top.colons) =>
            {
                close_innermost(&mut stack);
            }
            _ => push_line(&mut stack, line),
        }
    }

    while stack.len() > 1 {
        log::debug!("closing unterminated container at end of input");
        close_innermost(&mut stack);
    }

    match stack.pop() {
        Some(mut root) => {
            root.flush();
            root.segments
        }
        None => Vec::new(),
    }
}

fn push_line(stack: &mut [Frame], line: &str) {
    if let Some(top) = stack.last_mut() {
        top.text.push_str(line);
    }
}

fn close_innermost(stack: &mut Vec<Frame>) {
    if let Some(frame) = stack.pop() {
        let segment = frame.finish();
        if let Some(parent) = stack.last_mut() {
            parent.flush();
            parent.segments.push(segment);
        }
    }
}

/// Strip up to three spaces of indentation.
fn unindent(line: &str) -> Option<&str> {
    let indent = line.len() - line.trim_start_matches(' ').len();
    (indent <= 3).then(|| &line[indent..])
}

fn fence_line(line: &str) -> Option<FenceLine<'_>> {
    let rest = unindent(line)?;
    let colons = rest.len() - rest.trim_start_matches(':').len();
    if colons < 3 {
        return None;
    }

    let tail = rest[colons..].trim();
    if tail.is_empty() {
        return Some(FenceLine::Close { colons });
    }

    let name = tail.split_whitespace().next()?;
    let valid = name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_');
    valid.then_some(FenceLine::Open { colons, name })
}

fn opens_code_fence(line: &str) -> Option<(char, usize)> {
    let rest = unindent(line)?;
    let marker = rest.chars().next().filter(|c| *c == '`' || *c == '~')?;
    let length = rest.len() - rest.trim_start_matches(marker).len();
    if length < 3 {
        return None;
    }
    // Backtick fences may not carry backticks in their info string.
    if marker == '`' && rest[length..].contains('`') {
        return None;
    }
    Some((marker, length))
}

fn closes_code_fence(line: &str, marker: char, length: usize) -> bool {
    let Some(rest) = unindent(line) else {
        return false;
    };
    let run = rest.len() - rest.trim_start_matches(marker).len();
    run >= length && rest[run..].trim().is_empty()
}
