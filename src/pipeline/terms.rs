//! Term/definition extraction from glossary lines.

use log::{debug, trace};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::GlossaryEntry;

static RE_OUTLINE_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+(?:\.\d+)*\s+").unwrap());
static RE_SENTENCE_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.\s+|\.$").unwrap());

const DASHES: [char; 3] = ['-', '–', '—'];

/// Split a sentence at its first spaced dash into `(term, definition)`.
///
/// The dash must sit outside parentheses, have whitespace on at least one
/// side and leave a non-empty term. A sentence that opens with a dash has no
/// term at all.
///
/// ```
/// use glossex::pipeline::first_spaced_dash;
///
/// assert_eq!(
///     first_spaced_dash("Сервер - устройство"),
///     Some(("Сервер".to_string(), "устройство".to_string()))
/// );
/// assert_eq!(
///     first_spaced_dash("A(B-C) - D"),
///     Some(("A(B-C)".to_string(), "D".to_string()))
/// );
/// assert_eq!(first_spaced_dash("- без термина"), None);
/// ```
pub fn first_spaced_dash(sentence: &str) -> Option<(String, String)> {
    let chars: Vec<char> = sentence.chars().collect();
    let mut depth = 0usize;

    for (i, &c) in chars.iter().enumerate() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if DASHES.contains(&c) && depth == 0 => {
                if i == 0 {
                    return None;
                }
                let spaced = chars[i - 1].is_whitespace()
                    || chars.get(i + 1).is_some_and(|n| n.is_whitespace());
                if !spaced {
                    continue;
                }
                let term: String = chars[..i].iter().collect();
                let term = term.trim();
                if !term.is_empty() {
                    let definition: String = chars[i + 1..].iter().collect();
                    return Some((term.to_string(), definition.trim().to_string()));
                }
            }
            _ => {}
        }
    }
    None
}

/// Extract every pair a single line yields.
///
/// Sentences without a dash continue the previous pair's definition; leading
/// sentences without one are dropped.
pub fn extract_pairs_from_line(line: &str) -> Vec<GlossaryEntry> {
    let mut pairs: Vec<GlossaryEntry> = Vec::new();

    for sentence in RE_SENTENCE_END.split(line) {
        let sentence = sentence.trim();
        if sentence.is_empty() {
            continue;
        }
        match first_spaced_dash(sentence) {
            Some((term, definition)) => pairs.push(GlossaryEntry::new(term, definition)),
            None => match pairs.last_mut() {
                Some(last) => last.extend_definition(sentence),
                None => trace!("dropping sentence without term {:?}", sentence),
            },
        }
    }
    pairs
}

/// Convert glossary section paragraphs into entries.
///
/// `keyword` recognizes the section heading; only the text after its first
/// colon is used. A line without any pair continues the previous entry.
/// Entries still lacking a definition at the end are dropped.
pub(crate) fn format_glossary(paragraphs: &[String], keyword: &Regex) -> Vec<GlossaryEntry> {
    let mut entries: Vec<GlossaryEntry> = Vec::new();

    for raw in paragraphs {
        let line = raw.trim();
        let line = line.strip_suffix(';').unwrap_or(line);
        if line.is_empty() {
            continue;
        }

        let mut line = RE_OUTLINE_PREFIX.replace(line, "").into_owned();

        if keyword.is_match(&line) {
            match line.split_once(':') {
                Some((_, rest)) if !rest.trim().is_empty() => line = rest.trim_start().to_string(),
                _ => continue,
            }
        }

        let pairs = extract_pairs_from_line(&line);
        if pairs.is_empty() {
            match entries.last_mut() {
                Some(last) => last.extend_definition(&line),
                None => trace!("no entry to continue with {:?}", line),
            }
        } else {
            entries.extend(pairs);
        }
    }

    let total = entries.len();
    entries.retain(GlossaryEntry::is_complete);
    debug!(
        "extracted {} glossary entries ({} without definition dropped)",
        entries.len(),
        total - entries.len()
    );
    entries
}
