//! Document-control stamp removal.
//!
//! Regulatory documents carry a footer such as `ПЛ-ДВФУ-12/3-2022 4 из 5`
//! on every page. Text extraction delivers it either as a block of its own
//! or glued to the end of the preceding sentence, so both forms are handled:
//! whole-block stamps are dropped, embedded ones are cut out in place.

use log::{debug, trace};

use super::options::{compress, CompiledMarkers};
use crate::model::{Document, Page};

/// Whether the whole block is nothing but a stamp or a page marker.
pub(crate) fn is_stamp_block(block: &str, markers: &CompiledMarkers) -> bool {
    let compressed = compress(block);
    markers
        .stamp_exact
        .iter()
        .any(|pattern| pattern.is_match(&compressed))
}

/// Cut embedded stamps out of a block, keeping the character before each.
pub(crate) fn strip_stamps(block: &str, markers: &CompiledMarkers) -> String {
    markers
        .stamp_embedded
        .replace_all(block, "${1}")
        .trim()
        .to_string()
}

/// Scrub every page, dropping blocks that end up empty.
pub(crate) fn scrub_pages(doc: &Document, markers: &CompiledMarkers) -> Document {
    let mut removed = 0usize;

    let pages = doc
        .pages
        .iter()
        .map(|page| {
            let blocks: Vec<String> = page
                .blocks()
                .filter_map(|block| {
                    if is_stamp_block(block, markers) {
                        trace!("dropping stamp block {:?}", block);
                        removed += 1;
                        return None;
                    }
                    let cleaned = strip_stamps(block, markers);
                    if cleaned.is_empty() {
                        removed += 1;
                        None
                    } else {
                        Some(cleaned)
                    }
                })
                .collect();
            Page { blocks }
        })
        .collect::<Vec<_>>();

    debug!("stamp scrubber removed {} blocks", removed);
    Document::from(pages)
}
