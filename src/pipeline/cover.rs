//! Front-matter trimming: drops the institutional cover page.

use log::debug;

use super::options::{compress, CompiledMarkers};
use crate::model::{Document, Page};

/// Whether a page is the institutional title page.
///
/// All blocks are joined with whitespace removed; the page qualifies when
/// every cover marker occurs and the city is followed by a year 2010-2099.
pub(crate) fn is_cover_page(page: &Page, markers: &CompiledMarkers) -> bool {
    let text = compress(&page.blocks.concat());

    markers
        .cover_markers
        .iter()
        .all(|marker| text.contains(marker.as_str()))
        && markers.cover_year.is_match(&text)
}

/// Return the document without its cover page, if it has one.
pub(crate) fn trim_cover(doc: &Document, markers: &CompiledMarkers) -> Document {
    match doc.pages.split_first() {
        Some((first, rest)) if is_cover_page(first, markers) => {
            debug!("dropping cover page ({} blocks)", first.len());
            Document::from(rest.to_vec())
        }
        _ => doc.clone(),
    }
}
