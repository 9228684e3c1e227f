//! Glossary section isolation.

use std::ops::Range;

use log::{debug, trace};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::HeadingPrefix;

static RE_DOT_LEADER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.{4,}").unwrap());
static RE_PAGE_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s\d{1,3}$").unwrap());
static RE_NUMBERED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+(\.\d+)*").unwrap());
static RE_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-—:–]").unwrap());

/// Whether a line belongs to a table of contents.
///
/// Dot leaders, a trailing page number, or a numbered line without any
/// dash/colon separator all mark a contents entry.
pub fn is_toc_line(line: &str) -> bool {
    let line = line.trim();
    RE_DOT_LEADER.is_match(line)
        || RE_PAGE_NUMBER.is_match(line)
        || (RE_NUMBERED.is_match(line) && !RE_SEPARATOR.is_match(line))
}

/// Isolator state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SectionState {
    /// Looking for the glossary heading
    #[default]
    Idle,
    /// Inside the section opened by the heading with prefix `base`
    Capturing {
        /// Prefix of the opening heading
        base: HeadingPrefix,
    },
}

/// What the isolator does with one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Line is outside the section or is a contents entry
    Skip,
    /// Line belongs to the section
    Take,
    /// A sibling or higher-level heading closed the section
    Stop,
}

impl SectionState {
    /// Advance the state machine over one line.
    ///
    /// `is_keyword_line` decides whether a heading names the glossary section.
    pub fn step(&mut self, line: &str, is_keyword_line: impl Fn(&str) -> bool) -> Step {
        if is_toc_line(line) {
            return Step::Skip;
        }
        let heading = HeadingPrefix::parse(line);

        match self {
            SectionState::Idle => match heading {
                Some(base) if is_keyword_line(line) => {
                    debug!("glossary section opens at {:?} (prefix {})", line, base);
                    *self = SectionState::Capturing { base };
                    Step::Take
                }
                _ => Step::Skip,
            },
            SectionState::Capturing { base } => match heading {
                Some(prefix) if !prefix.is_within(base) => {
                    debug!("glossary section closed by {:?}", line);
                    Step::Stop
                }
                _ => Step::Take,
            },
        }
    }
}

/// Locate the glossary section as a half-open range of paragraph indices.
///
/// The range starts at the opening heading and ends before the heading that
/// closes the section (or at the end of the list).
pub(crate) fn section_span(paragraphs: &[String], keyword: &Regex) -> Option<Range<usize>> {
    let mut state = SectionState::Idle;
    let mut start = None;

    for (i, para) in paragraphs.iter().enumerate() {
        let line = para.trim();
        match state.step(line, |l| keyword.is_match(l)) {
            Step::Take if start.is_none() => start = Some(i),
            Step::Take => {}
            Step::Skip => trace!("skipping {:?}", line),
            Step::Stop => return start.map(|s| s..i),
        }
    }
    start.map(|s| s..paragraphs.len())
}

/// Return the paragraphs of the glossary section.
///
/// Contents entries inside the section span are left out. An empty result
/// means no section heading was found.
pub(crate) fn isolate_section(paragraphs: &[String], keyword: &Regex) -> Vec<String> {
    let section: Vec<String> = match section_span(paragraphs, keyword) {
        Some(span) => paragraphs[span]
            .iter()
            .map(|p| p.trim())
            .filter(|line| !is_toc_line(line))
            .map(str::to_string)
            .collect(),
        None => Vec::new(),
    };

    debug!("glossary section holds {} paragraphs", section.len());
    section
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyword() -> Regex {
        Regex::new("(?i)(?:термины|определения|сокращения)").unwrap()
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_toc_lines() {
        assert!(is_toc_line("1.4 Термины и определения ........ 3"));
        assert!(is_toc_line("Термины и определения 3"));
        assert!(is_toc_line("2. Общие положения"));
        assert!(!is_toc_line("1.4 Термины и определения:"));
        assert!(!is_toc_line("Сервер - вычислительное устройство"));
        assert!(!is_toc_line("ГОСТ 34 - стандарт"));
        assert!(!is_toc_line("Версия 1234"));
    }

    #[test]
    fn test_isolate_basic_section() {
        let paragraphs = strings(&[
            "Содержание",
            "1.4 Термины и определения ........ 3",
            "1. Общие положения",
            "1.4 Термины и определения:",
            "Сервер - вычислительное устройство;",
            "Клиент - потребитель услуг.",
            "1.5 Обозначения - см. приложение",
            "Прочее - текст.",
        ]);
        assert_eq!(
            isolate_section(&paragraphs, &keyword()),
            strings(&[
                "1.4 Термины и определения:",
                "Сервер - вычислительное устройство;",
                "Клиент - потребитель услуг.",
            ])
        );
    }

    #[test]
    fn test_subheadings_stay_in_section() {
        let paragraphs = strings(&[
            "2. Термины и сокращения:",
            "2.1 ИС - информационная система",
            "2.2 АС - автоматизированная система",
            "3. Требования - общие",
            "4.1 ИС - снова",
        ]);
        assert_eq!(
            isolate_section(&paragraphs, &keyword()),
            strings(&[
                "2. Термины и сокращения:",
                "2.1 ИС - информационная система",
                "2.2 АС - автоматизированная система",
            ])
        );
    }

    #[test]
    fn test_numbered_heading_without_separator_does_not_close() {
        // Treated as a contents entry and skipped, not as a sibling heading
        let paragraphs = strings(&[
            "1.4 Определения:",
            "Сервер - устройство.",
            "2. Общие положения",
            "Клиент - потребитель.",
        ]);
        assert_eq!(
            isolate_section(&paragraphs, &keyword()),
            strings(&["1.4 Определения:", "Сервер - устройство.", "Клиент - потребитель."])
        );
    }

    #[test]
    fn test_keyword_without_heading_does_not_open() {
        let paragraphs = strings(&["Термины - см. ниже", "Сервер - устройство."]);
        assert!(isolate_section(&paragraphs, &keyword()).is_empty());
    }

    #[test]
    fn test_no_section() {
        let paragraphs = strings(&["1. Общие положения:", "Текст - без глоссария."]);
        assert!(isolate_section(&paragraphs, &keyword()).is_empty());
        assert!(isolate_section(&[], &keyword()).is_empty());
    }

    #[test]
    fn test_state_machine_steps() {
        let kw = keyword();
        let mut state = SectionState::default();

        assert_eq!(state.step("Вступление - текст", |l| kw.is_match(l)), Step::Skip);
        assert_eq!(state.step("3 Сокращения:", |l| kw.is_match(l)), Step::Take);
        assert_eq!(
            state,
            SectionState::Capturing {
                base: HeadingPrefix::parse("3 x").unwrap()
            }
        );
        assert_eq!(state.step("3.1 ИС - система", |l| kw.is_match(l)), Step::Take);
        assert_eq!(state.step("4 Раздел - другой", |l| kw.is_match(l)), Step::Stop);
    }

    #[test]
    fn test_section_span() {
        let paragraphs = strings(&[
            "1.4 Термины ........ 2",
            "1.4 Термины:",
            "А - б.",
            "2. Общие положения",
            "В - г.",
            "1.5 Прочее - конец",
            "Д - е.",
        ]);
        let span = section_span(&paragraphs, &keyword()).unwrap();
        assert_eq!(span, 1..5);

        // Contents entries inside the span are dropped, nothing else is
        let section = isolate_section(&paragraphs, &keyword());
        assert_eq!(section, strings(&["1.4 Термины:", "А - б.", "В - г."]));
    }

    #[test]
    fn test_section_is_contiguous_slice() {
        let paragraphs = strings(&[
            "Вступление.",
            "1.4 Термины:",
            "А - б.",
            "В - г.",
            "1.5 Прочее - конец",
        ]);
        let section = isolate_section(&paragraphs, &keyword());
        let start = paragraphs.iter().position(|p| *p == section[0]).unwrap();
        assert_eq!(&paragraphs[start..start + section.len()], section.as_slice());
    }
}
