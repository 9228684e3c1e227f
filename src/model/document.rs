//! Document-level types.

use super::Page;
use serde::{Deserialize, Serialize};

/// A document as delivered by text extraction: pages of raw text blocks.
///
/// Serializes as a bare JSON array of pages, each page an array of block
/// strings, which is also the pre-extracted input format accepted by
/// [`crate::extract::load_pages_json`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    /// Pages in reading order
    pub pages: Vec<Page>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from nested block lists.
    ///
    /// # Example
    ///
    /// ```
    /// use glossex::Document;
    ///
    /// let doc = Document::from_blocks(vec![vec!["Title"], vec!["1. Text", "more"]]);
    /// assert_eq!(doc.page_count(), 2);
    /// assert_eq!(doc.block_count(), 3);
    /// ```
    pub fn from_blocks<P, B>(pages: P) -> Self
    where
        P: IntoIterator,
        P::Item: IntoIterator<Item = B>,
        B: Into<String>,
    {
        Self {
            pages: pages.into_iter().map(Page::from_blocks).collect(),
        }
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Get the total number of blocks across all pages.
    pub fn block_count(&self) -> usize {
        self.pages.iter().map(Page::len).sum()
    }

    /// Get a page by index (0-based).
    pub fn get_page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    /// Add a page to the document.
    pub fn add_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Iterate over every block in (page, block) order.
    pub fn blocks(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().flat_map(|page| page.blocks())
    }
}

impl From<Vec<Page>> for Document {
    fn from(pages: Vec<Page>) -> Self {
        Self { pages }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_new() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.page_count(), 0);
        assert_eq!(doc.block_count(), 0);
    }

    #[test]
    fn test_blocks_in_reading_order() {
        let doc = Document::from_blocks(vec![vec!["a", "b"], vec![], vec!["c"]]);
        let blocks: Vec<_> = doc.blocks().collect();
        assert_eq!(blocks, vec!["a", "b", "c"]);
        assert!(doc.get_page(1).unwrap().is_empty());
        assert!(doc.get_page(3).is_none());
    }

    #[test]
    fn test_serde_shape() {
        let doc = Document::from_blocks(vec![vec!["один", "два"], vec!["три"]]);
        let json = serde_json::to_string(&doc).unwrap();
        assert_eq!(json, r#"[["один","два"],["три"]]"#);

        let back: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
    }
}
