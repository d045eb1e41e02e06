//! Error types for slide deck conversion.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading a deck or writing the document.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to open, read or write a file.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// ZIP archive error (the OOXML package container).
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML parsing error inside a package part.
    #[error("XML parsing error: {0}")]
    XmlError(String),

    /// The package is a valid archive but not a usable presentation.
    #[error("PPTX parsing error: {0}")]
    PptxParseError(String),

    /// Copying a picture payload to the image directory failed.
    #[error("Failed to export image {path}: {source}")]
    ImageExport {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
