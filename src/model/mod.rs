//! Document model types.

mod document;
mod entry;
mod heading;
mod page;

pub use document::Document;
pub use entry::GlossaryEntry;
pub use heading::HeadingPrefix;
pub use page::Page;
