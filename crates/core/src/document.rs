//! Converted slides and the AsciiDoc document they make up.

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;

/// One converted slide: a section heading and its body markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    title: String,
    body: String,
}

impl Slide {
    /// Create a slide from its heading text and body markup.
    pub fn new(heading: &str, body: impl Into<String>) -> Self {
        Self {
            title: format!("\n== {}\n", heading),
            body: body.into(),
        }
    }

    /// Heading line, including the blank line in front of it.
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

impl fmt::Display for Slide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)?;
        if !self.body.is_empty() {
            f.write_str("\n")?;
            f.write_str(&self.body)?;
        }
        Ok(())
    }
}

/// Converted slides in presentation order.
#[derive(Debug, Clone, Default)]
pub struct Slides {
    slides: Vec<Slide>,
}

impl Slides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_slide(&mut self, slide: Slide) {
        self.slides.push(slide);
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Write all slides, in order, to `writer`.
    pub fn write_to<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        for slide in self {
            write!(writer, "{}", slide)?;
        }
        writer.flush()
    }

    /// Write the document to `path`, replacing any existing file.
    pub fn write_document(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        self.write_to(BufWriter::new(file))?;
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Slides {
    type Item = &'a Slide;
    type IntoIter = std::slice::Iter<'a, Slide>;

    fn into_iter(self) -> Self::IntoIter {
        self.slides.iter()
    }
}

impl fmt::Display for Slides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for slide in self {
            write!(f, "{}", slide)?;
        }
        Ok(())
    }
}
