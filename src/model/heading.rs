//! Outline heading prefixes such as `1.4.2`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static RE_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+(?:\.\d+)*)\.?\s").unwrap());

/// Dotted numeric outline key parsed from the start of a paragraph.
///
/// Prefixes form a tree by textual containment: `1.4` is an ancestor of
/// `1.4.2`. The comparison is purely textual, so `1.4` also contains `1.40`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HeadingPrefix(String);

impl HeadingPrefix {
    /// Parse the heading prefix of a line (`"1.4 Термины"` -> `1.4`).
    ///
    /// The numeral sequence must be followed by an optional dot and then
    /// whitespace; `"1.4Термины"` and `"12,5 %"` have no prefix.
    pub fn parse(line: &str) -> Option<Self> {
        RE_HEADING
            .captures(line.trim_start())
            .map(|caps| Self(caps[1].to_string()))
    }

    /// Get the prefix as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of outline levels (`1.4.2` -> 3).
    pub fn depth(&self) -> usize {
        self.0.split('.').count()
    }

    /// Whether this prefix lies under `base` (or equals it).
    pub fn is_within(&self, base: &HeadingPrefix) -> bool {
        self.0.starts_with(base.as_str())
    }
}

impl fmt::Display for HeadingPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let prefix = HeadingPrefix::parse("1.4 Термины и определения").unwrap();
        assert_eq!(prefix.as_str(), "1.4");
        assert_eq!(prefix.depth(), 2);

        let prefix = HeadingPrefix::parse("2. Общие положения").unwrap();
        assert_eq!(prefix.as_str(), "2");
        assert_eq!(prefix.depth(), 1);
    }

    #[test]
    fn test_parse_rejects_non_headings() {
        assert!(HeadingPrefix::parse("Сервер - устройство").is_none());
        assert!(HeadingPrefix::parse("1.4Термины").is_none());
        assert!(HeadingPrefix::parse("12,5 %").is_none());
    }

    #[test]
    fn test_is_within() {
        let base = HeadingPrefix::parse("1.4 Термины").unwrap();
        let child = HeadingPrefix::parse("1.4.2 Сервер - устройство").unwrap();
        let sibling = HeadingPrefix::parse("1.5 Обозначения").unwrap();

        assert!(child.is_within(&base));
        assert!(base.is_within(&base));
        assert!(!sibling.is_within(&base));
        assert!(!base.is_within(&child));
    }
}
