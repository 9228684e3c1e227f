//! Error types for glossex library.

use std::io;
use thiserror::Error;

/// Result type alias for glossex operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading documents or rendering glossaries.
///
/// The pipeline stages themselves never fail: an empty glossary is a valid
/// outcome. Errors come from the adapters around the pipeline.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The source document could not be opened or its text extracted.
    #[error("Text extraction failed: {0}")]
    ExtractionFailed(String),

    /// The supplied document does not have the page/block shape.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A configured marker produced an invalid regular expression.
    #[error("Invalid marker pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Error during rendering.
    #[error("Rendering error: {0}")]
    Render(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            _ => Error::ExtractionFailed(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnknownFormat;
        assert_eq!(err.to_string(), "Unknown file format: not a valid PDF");

        let err = Error::ExtractionFailed("broken xref".to_string());
        assert_eq!(err.to_string(), "Text extraction failed: broken xref");

        let err = Error::InvalidInput("expected an array of pages".to_string());
        assert_eq!(err.to_string(), "Invalid input: expected an array of pages");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_regex_error_conversion() {
        let regex_err = regex::Regex::new("(unclosed").unwrap_err();
        let err: Error = regex_err.into();
        assert!(matches!(err, Error::InvalidPattern(_)));
    }
}
