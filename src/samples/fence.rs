//! Fenced code block scanning

use regex::Regex;
use std::sync::LazyLock;

static FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]*(`{3,}|~{3,})[ \t]*([^\s`]*)").expect("valid regex"));

/// A line that opens (or closes) a fenced code block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fence<'a> {
    pub marker: &'a str,
    /// Info-string tag; empty for a bare fence
    pub tag: &'a str,
}

impl<'a> Fence<'a> {
    pub fn parse(line: &'a str) -> Option<Self> {
        let caps = FENCE_RE.captures(line)?;
        Some(Self {
            marker: caps.get(1)?.as_str(),
            tag: caps.get(2).map_or("", |m| m.as_str()),
        })
    }

    pub fn is_tagged(&self, syntax: &str) -> bool {
        !self.tag.is_empty() && self.tag == syntax
    }
}

/// Returns the de-indented body of the first block tagged `syntax`
///
/// Capture starts after the first fence tagged `syntax` and ends at the next
/// fence line of any kind. Later blocks with the same tag are not merged in.
/// Line terminators are kept as they appear in `content`.
pub fn extract_block(content: &str, syntax: &str) -> String {
    let mut captured: Vec<&str> = Vec::new();
    let mut inside = false;

    for line in content.split_inclusive('\n') {
        let fence = Fence::parse(line);
        if inside {
            if fence.is_some() {
                break;
            }
            captured.push(line);
        } else if fence.is_some_and(|f| f.is_tagged(syntax)) {
            inside = true;
        }
    }

    dedent(&captured)
}

/// Strips the first line's indentation width from every line
///
/// Lines indented less than the first line are kept as they are.
pub fn dedent(lines: &[&str]) -> String {
    let Some(first) = lines.first() else {
        return String::new();
    };
    let width = indent_width(first);

    let mut text = String::with_capacity(lines.iter().map(|l| l.len()).sum());
    for line in lines {
        if indent_width(line) >= width {
            text.push_str(strip_chars(line, width));
        } else {
            text.push_str(line);
        }
    }
    text
}

fn indent_width(line: &str) -> usize {
    line.chars()
        .take_while(|c| c.is_whitespace() && *c != '\n' && *c != '\r')
        .count()
}

fn strip_chars(line: &str, count: usize) -> &str {
    match line.char_indices().nth(count) {
        Some((offset, _)) => &line[offset..],
        None => "",
    }
}
