//! Core domain types, rich-text formatting, image export and document
//! writing for converting slide decks to AsciiDoc.

pub mod codeblock;
pub mod config;
pub mod document;
pub mod error;
pub mod extract;
pub mod image;
pub mod markup;
pub mod types;

pub use config::Configuration;
pub use document::{Slide, Slides};
pub use error::{Error, Result};
pub use extract::SlideExtractor;
pub use image::ImageExporter;
pub use types::{Deck, DeckSlide, Paragraph, PictureShape, Placeholder, Rgb, Shape, TextRun, TextShape};
