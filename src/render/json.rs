//! JSON rendering for glossary entries.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::GlossaryEntry;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Output record: one `{term, definition}` object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GlossaryRecord<'a> {
    /// The defined term
    pub term: &'a str,
    /// Its definition
    pub definition: &'a str,
}

impl<'a> From<&'a GlossaryEntry> for GlossaryRecord<'a> {
    fn from(entry: &'a GlossaryEntry) -> Self {
        Self {
            term: &entry.term,
            definition: &entry.definition,
        }
    }
}

/// Map entries 1:1 to output records, preserving order.
pub fn to_records(entries: &[GlossaryEntry]) -> Vec<GlossaryRecord<'_>> {
    entries.iter().map(GlossaryRecord::from).collect()
}

/// Convert entries to a JSON array string.
pub fn to_json(entries: &[GlossaryEntry], format: JsonFormat) -> Result<String> {
    let records = to_records(entries);
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(&records),
        JsonFormat::Compact => serde_json::to_string(&records),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Write entries as JSON to any sink.
pub fn write_json<W: Write>(entries: &[GlossaryEntry], format: JsonFormat, mut sink: W) -> Result<()> {
    let json = to_json(entries, format)?;
    sink.write_all(json.as_bytes())?;
    sink.flush()?;
    Ok(())
}

/// Write entries as JSON to a file, replacing it.
pub fn save_json<P: AsRef<Path>>(entries: &[GlossaryEntry], format: JsonFormat, path: P) -> Result<()> {
    let file = File::create(path)?;
    write_json(entries, format, BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries() -> Vec<GlossaryEntry> {
        vec![
            GlossaryEntry::new("Сервер", "вычислительное устройство"),
            GlossaryEntry::new("Клиент", "потребитель \"услуг\""),
        ]
    }

    #[test]
    fn test_to_records_preserves_order() {
        let entries = entries();
        let records = to_records(&entries);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].term, "Сервер");
        assert_eq!(records[1].definition, "потребитель \"услуг\"");
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&entries(), JsonFormat::Pretty).unwrap();
        assert!(json.contains('\n')); // Pretty has newlines
        assert!(json.contains("\"term\": \"Сервер\""));
        // Non-ASCII text is written as UTF-8, not escaped
        assert!(!json.contains("\\u"));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&entries()[..1], JsonFormat::Compact).unwrap();
        assert_eq!(
            json,
            r#"[{"term":"Сервер","definition":"вычислительное устройство"}]"#
        );
    }

    #[test]
    fn test_to_json_empty() {
        assert_eq!(to_json(&[], JsonFormat::Compact).unwrap(), "[]");
    }

    #[test]
    fn test_write_json_to_sink() {
        let mut buffer = Vec::new();
        write_json(&entries(), JsonFormat::Compact, &mut buffer).unwrap();

        let parsed: Vec<GlossaryEntry> = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(parsed, entries());
    }

    #[test]
    fn test_save_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("glossary.json");

        save_json(&entries(), JsonFormat::Pretty, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with('['));
        assert!(text.contains("Клиент"));
    }
}
