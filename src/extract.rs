//! Loading documents into the page/block shape the pipeline consumes.
//!
//! This is the boundary with text extraction: PDFs are read with `lopdf`,
//! pre-extracted pages come in as JSON. Every block is NFKC-normalized here
//! so the pipeline only ever sees canonical text.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::{debug, warn};
use lopdf::Document as LopdfDocument;
use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, Result};
use crate::model::{Document, Page};

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";

/// Check if bytes start with the PDF signature.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    data.starts_with(PDF_MAGIC)
}

/// NFKC-normalize a block and trim it.
pub fn normalize_block(block: &str) -> String {
    block.nfkc().collect::<String>().trim().to_string()
}

/// Split extracted page text into blocks, one per non-blank line.
fn page_from_text(text: &str) -> Page {
    Page::from_blocks(
        text.lines()
            .map(normalize_block)
            .filter(|block| !block.is_empty()),
    )
}

/// Load a PDF file.
///
/// # Example
///
/// ```no_run
/// use glossex::extract::load_pdf;
///
/// let doc = load_pdf("regulation.pdf")?;
/// println!("{} pages", doc.page_count());
/// # Ok::<(), glossex::Error>(())
/// ```
pub fn load_pdf<P: AsRef<Path>>(path: P) -> Result<Document> {
    let path = path.as_ref();
    let data = std::fs::read(path)
        .map_err(|e| Error::ExtractionFailed(format!("{}: {}", path.display(), e)))?;
    load_pdf_bytes(&data)
}

/// Load a PDF from memory.
///
/// A page whose text cannot be extracted becomes an empty page; the rest of
/// the document is still returned.
pub fn load_pdf_bytes(data: &[u8]) -> Result<Document> {
    if !is_pdf_bytes(data) {
        return Err(Error::UnknownFormat);
    }

    let pdf = LopdfDocument::load_mem(data)?;
    if pdf.is_encrypted() {
        return Err(Error::ExtractionFailed("document is encrypted".to_string()));
    }

    let mut doc = Document::new();
    for page_num in pdf.get_pages().keys() {
        let page = match pdf.extract_text(&[*page_num]) {
            Ok(text) => page_from_text(&text),
            Err(e) => {
                warn!("page {}: text extraction failed: {}", page_num, e);
                Page::new()
            }
        };
        doc.add_page(page);
    }

    debug!(
        "loaded PDF: {} pages, {} blocks",
        doc.page_count(),
        doc.block_count()
    );
    Ok(doc)
}

/// Load pre-extracted pages from JSON (`[["block", ...], ...]`).
pub fn load_pages_json<R: Read>(reader: R) -> Result<Document> {
    let raw: Document = serde_json::from_reader(reader)
        .map_err(|e| Error::InvalidInput(format!("expected an array of pages of text blocks: {}", e)))?;

    let pages = raw
        .pages
        .iter()
        .map(|page| {
            Page::from_blocks(
                page.blocks()
                    .map(normalize_block)
                    .filter(|block| !block.is_empty()),
            )
        })
        .collect::<Vec<_>>();

    Ok(Document::from(pages))
}

/// Load a document from a file, choosing the reader by extension.
///
/// `.json` files are read as pre-extracted pages, everything else as PDF.
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<Document> {
    let path = path.as_ref();
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        let file = File::open(path)?;
        load_pages_json(BufReader::new(file))
    } else {
        load_pdf(path)
    }
}
