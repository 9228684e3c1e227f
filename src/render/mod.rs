//! Rendering module for glossary output.

mod json;

pub use json::{save_json, to_json, to_records, write_json, GlossaryRecord, JsonFormat};
