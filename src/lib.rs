//! # glossex
//!
//! Glossary extraction from numbered regulatory documents.
//!
//! Text extracted from a PDF arrives as loosely ordered blocks per page. This
//! library recovers enough document structure from them to find the
//! "terms and definitions" section and split it into (term, definition)
//! pairs.
//!
//! ## Quick Start
//!
//! ```no_run
//! use glossex::{extract_glossary_from_file, render, JsonFormat};
//!
//! fn main() -> glossex::Result<()> {
//!     let entries = extract_glossary_from_file("regulation.pdf")?;
//!     for entry in &entries {
//!         println!("{} - {}", entry.term, entry.definition);
//!     }
//!
//!     let json = render::to_json(&entries, JsonFormat::Pretty)?;
//!     println!("{}", json);
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - **Cover trimming**: the institutional title page is dropped
//! - **Stamp scrubbing**: document-control footers are removed
//! - **Normalization**: blocks become logical paragraphs
//! - **Section isolation**: the glossary section is bounded by its outline number
//! - **Term extraction**: lines split at the first spaced dash
//!
//! Every stage is a pure function; see [`pipeline::GlossaryPipeline`] for
//! running them individually or with custom [`MarkerSet`]s.

pub mod error;
pub mod extract;
pub mod model;
pub mod pipeline;
pub mod render;

// Re-export commonly used types
pub use error::{Error, Result};
pub use extract::{load_document, load_pages_json, load_pdf, load_pdf_bytes};
pub use model::{Document, GlossaryEntry, HeadingPrefix, Page};
pub use pipeline::{GlossaryPipeline, MarkerSet, PipelineOptions, PipelineOutput, PipelineReport};
pub use render::{GlossaryRecord, JsonFormat};

use std::path::Path;

use once_cell::sync::Lazy;

static DEFAULT_PIPELINE: Lazy<GlossaryPipeline> = Lazy::new(|| {
    GlossaryPipeline::with_defaults().expect("default marker set compiles")
});

/// Extract the glossary of an already loaded document with default markers.
///
/// # Example
///
/// ```
/// use glossex::{extract_glossary, Document, GlossaryEntry};
///
/// let doc = Document::from_blocks(vec![
///     vec!["1.4 Термины и определения:"],
///     vec!["Сервер - вычислительное устройство; Клиент - потребитель услуг."],
/// ]);
///
/// assert_eq!(
///     extract_glossary(&doc),
///     vec![
///         GlossaryEntry::new("Сервер", "вычислительное устройство"),
///         GlossaryEntry::new("Клиент", "потребитель услуг"),
///     ]
/// );
/// ```
pub fn extract_glossary(doc: &Document) -> Vec<GlossaryEntry> {
    DEFAULT_PIPELINE.extract(doc)
}

/// Load a document (PDF or pages JSON) and extract its glossary.
pub fn extract_glossary_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<GlossaryEntry>> {
    let doc = load_document(path)?;
    Ok(extract_glossary(&doc))
}

/// Load a document and return its normalized paragraphs.
pub fn document_paragraphs<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let doc = load_document(path)?;
    Ok(DEFAULT_PIPELINE.paragraphs(&doc))
}

/// Extract a document's glossary as JSON, optionally saving it to `output`.
///
/// # Example
///
/// ```no_run
/// use glossex::{glossary_json, JsonFormat};
///
/// let json = glossary_json("regulation.pdf", JsonFormat::Pretty, Some("terms.json"))?;
/// # Ok::<(), glossex::Error>(())
/// ```
pub fn glossary_json<P, Q>(path: P, format: JsonFormat, output: Option<Q>) -> Result<String>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let entries = extract_glossary_from_file(path)?;
    let json = render::to_json(&entries, format)?;

    if let Some(output) = output {
        std::fs::write(output, &json)?;
    }
    Ok(json)
}
