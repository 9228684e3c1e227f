//! Page-level types.

use serde::{Deserialize, Serialize};

/// A single page: raw text blocks in reading order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Page {
    /// Raw text blocks, roughly one per visually contiguous text run
    pub blocks: Vec<String>,
}

impl Page {
    /// Create a new empty page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a page from block strings.
    pub fn from_blocks<I, B>(blocks: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<String>,
    {
        Self {
            blocks: blocks.into_iter().map(Into::into).collect(),
        }
    }

    /// Add a block to the page.
    pub fn add_block(&mut self, block: impl Into<String>) {
        self.blocks.push(block.into());
    }

    /// Iterate over the page's blocks.
    pub fn blocks(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().map(String::as_str)
    }

    /// Get plain text content of the page.
    pub fn plain_text(&self) -> String {
        self.blocks.join("\n")
    }

    /// Check if the page is empty (no blocks).
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Get the number of blocks on the page.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_blocks() {
        let mut page = Page::new();
        assert!(page.is_empty());

        page.add_block("first");
        page.add_block(String::from("second"));

        assert_eq!(page.len(), 2);
        assert_eq!(page.plain_text(), "first\nsecond");
    }
}
