//! PPTX (Office Open XML) slide deck reader.
//!
//! Parses .pptx files, which are ZIP archives containing XML documents, into
//! the deck model used by the AsciiDoc converter.

pub mod package;
pub mod parser;
pub mod slide;
pub mod theme;
mod xml;

pub use parser::PptxParser;
pub use theme::Theme;
