//! Paragraph normalization.
//!
//! Turns the flat list of extracted blocks into logical paragraphs. The
//! passes run in a fixed order, each a pure `Vec<String> -> Vec<String>`
//! function:
//!
//! 1. Collapse embedded newlines and whitespace runs
//! 2. Truncate at the administrative heading that ends the useful text
//! 3. Merge sentences broken across layout blocks
//! 4. Split before outline numbers (`1.`, `1.2.`, `1.2.3`)
//! 5. Split on top-level semicolons and colon-introduced bullet lists

use log::{debug, trace};
use once_cell::sync::Lazy;
use regex::Regex;

static RE_WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{2,}").unwrap());
static RE_DOT_LEADER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.{4,}").unwrap());
static RE_TRAILING_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{1,3}$").unwrap());
static RE_TERMINAL_PUNCT: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[.!?…»";:]$"#).unwrap());
static RE_OUTLINE_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+(\.\d+)*\.").unwrap());
static RE_LEVEL3_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d+\.\d+\.\d\b").unwrap());

/// Run all normalization passes over blocks in reading order.
///
/// `dead_heading` is the administrative-heading pattern; `None` disables
/// truncation.
pub(crate) fn normalize<'a, I>(blocks: I, dead_heading: Option<&Regex>) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let paragraphs: Vec<String> = blocks.into_iter().map(collapse_whitespace).collect();
    let block_count = paragraphs.len();

    let paragraphs = match dead_heading {
        Some(pattern) => truncate_dead_section(paragraphs, pattern),
        None => paragraphs,
    };
    let paragraphs = merge_broken_lines(&paragraphs);
    let paragraphs: Vec<String> = paragraphs.iter().flat_map(|p| split_outline(p)).collect();
    let paragraphs: Vec<String> = paragraphs.iter().flat_map(|p| split_lists(p)).collect();

    let result: Vec<String> = paragraphs
        .into_iter()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect();

    debug!(
        "normalized {} blocks into {} paragraphs",
        block_count,
        result.len()
    );
    result
}

/// Replace newlines with spaces and squeeze whitespace runs to one space.
pub(crate) fn collapse_whitespace(block: &str) -> String {
    RE_WHITESPACE_RUN
        .replace_all(&block.replace('\n', " "), " ")
        .into_owned()
}

/// Cut the list at the first real administrative heading.
///
/// Headings that carry a dot leader or end in a page number are table of
/// contents entries and do not cut.
pub(crate) fn truncate_dead_section(mut paragraphs: Vec<String>, pattern: &Regex) -> Vec<String> {
    let cut = paragraphs.iter().position(|para| {
        let line = para.trim();
        pattern.is_match(line)
            && !RE_DOT_LEADER.is_match(line)
            && !RE_TRAILING_NUMBER.is_match(line)
    });

    if let Some(index) = cut {
        debug!(
            "truncating {} paragraphs from {:?}",
            paragraphs.len() - index,
            paragraphs[index]
        );
        paragraphs.truncate(index);
    }
    paragraphs
}

fn ends_sentence(text: &str) -> bool {
    RE_TERMINAL_PUNCT.is_match(text.trim())
}

fn starts_outline_item(text: &str) -> bool {
    RE_OUTLINE_START.is_match(text.trim())
}

/// Join paragraphs until a sentence ends or a numbered item begins.
pub(crate) fn merge_broken_lines(paragraphs: &[String]) -> Vec<String> {
    let mut merged = Vec::new();
    let mut buffer = String::new();

    for (i, para) in paragraphs.iter().enumerate() {
        let current = para.trim();
        if !buffer.is_empty() {
            buffer.push(' ');
        }
        buffer.push_str(current);

        let next = paragraphs.get(i + 1).map(|p| p.trim()).unwrap_or("");
        if !next.is_empty() && !ends_sentence(current) && !starts_outline_item(next) {
            continue;
        }

        merged.push(buffer.trim().to_string());
        buffer.clear();
    }

    if !buffer.is_empty() {
        merged.push(buffer.trim().to_string());
    }
    merged
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn opens_outline_body(c: Option<&char>) -> bool {
    matches!(c, Some(&c) if c.is_whitespace() || ('А'..='Я').contains(&c) || c == '(')
}

fn digit_run_end(chars: &[char], start: usize) -> usize {
    let mut end = start;
    while end < chars.len() && chars[end].is_ascii_digit() {
        end += 1;
    }
    end
}

/// Match a one- or two-level marker (`3.` / `3.1.`) starting at `start`,
/// returning the index just past its final dot.
fn match_short_marker(chars: &[char], start: usize) -> Option<usize> {
    let first = digit_run_end(chars, start);
    if first == start || chars.get(first) != Some(&'.') {
        return None;
    }

    if chars.get(first + 1).is_some_and(|c| c.is_ascii_digit()) {
        let second = digit_run_end(chars, first + 1);
        if chars.get(second) == Some(&'.') && opens_outline_body(chars.get(second + 1)) {
            return Some(second + 1);
        }
    }

    opens_outline_body(chars.get(first + 1)).then_some(first + 1)
}

/// Char indices where a one- or two-level marker begins.
///
/// A marker must start at a word boundary and must not continue a dotted
/// number (`1.2.3.` is not re-split at `3.`).
fn short_marker_starts(chars: &[char]) -> Vec<usize> {
    let mut starts = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let at_boundary = i == 0 || !is_word_char(chars[i - 1]);
        let continues_number = i >= 2 && chars[i - 1] == '.' && chars[i - 2].is_ascii_digit();

        if chars[i].is_ascii_digit() && at_boundary && !continues_number {
            if let Some(end) = match_short_marker(chars, i) {
                starts.push(i);
                i = end;
                continue;
            }
        }
        i += 1;
    }
    starts
}

/// Split a paragraph before every outline marker.
pub(crate) fn split_outline(paragraph: &str) -> Vec<String> {
    let marked = RE_LEVEL3_MARKER.replace_all(paragraph, "\n$0");
    let chars: Vec<char> = marked.chars().collect();

    let mut text = String::with_capacity(marked.len() + 8);
    let mut starts = short_marker_starts(&chars).into_iter().peekable();
    for (i, &c) in chars.iter().enumerate() {
        if starts.next_if_eq(&i).is_some() {
            text.push('\n');
        }
        text.push(c);
    }

    text.split('\n')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split a paragraph on top-level semicolons and `": - "` bullet openers.
///
/// Semicolons inside parentheses and a semicolon ending the paragraph do not
/// split; a splitting semicolon stays on the piece it terminates.
pub(crate) fn split_lists(paragraph: &str) -> Vec<String> {
    let chars: Vec<char> = paragraph.chars().collect();
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ => {}
        }

        if c == ';' && i + 1 < chars.len() && depth == 0 {
            current.push(';');
            pieces.push(std::mem::take(&mut current));
        } else if chars[i..].starts_with(&[':', ' ', '-', ' ']) {
            trace!("splitting bullet list in {:?}", paragraph);
            current.push_str(": ");
            pieces.push(std::mem::take(&mut current));
            current.push('-');
            i += 3;
            continue;
        } else {
            current.push(c);
        }
        i += 1;
    }
    pieces.push(current);

    pieces
        .into_iter()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}
