//! Glossary entry type.

use serde::{Deserialize, Serialize};

/// One (term, definition) pair recovered from a glossary section.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GlossaryEntry {
    /// The defined term
    pub term: String,

    /// Its definition, possibly joined from several source paragraphs
    pub definition: String,
}

impl GlossaryEntry {
    /// Create an entry, trimming both sides.
    pub fn new(term: impl AsRef<str>, definition: impl AsRef<str>) -> Self {
        Self {
            term: term.as_ref().trim().to_string(),
            definition: definition.as_ref().trim().to_string(),
        }
    }

    /// Append continuation text to the definition, space-joined.
    pub fn extend_definition(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        if self.definition.is_empty() {
            self.definition = text.to_string();
        } else {
            self.definition.push(' ');
            self.definition.push_str(text);
        }
    }

    /// Both term and definition carry text.
    pub fn is_complete(&self) -> bool {
        !self.term.is_empty() && !self.definition.is_empty()
    }
}

impl From<(String, String)> for GlossaryEntry {
    fn from((term, definition): (String, String)) -> Self {
        Self::new(term, definition)
    }
}
