//! Domain types for a slide deck as handed over by a reader backend.
//!
//! The model only carries what the AsciiDoc conversion looks at: placeholder
//! roles, paragraphs with indent levels, styled runs, and picture payloads.

/// An entire slide deck in presentation order.
#[derive(Debug, Clone, Default)]
pub struct Deck {
    /// Slides in presentation order.
    pub slides: Vec<DeckSlide>,
}

impl Deck {
    /// Create an empty deck.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a slide.
    pub fn add_slide(&mut self, slide: DeckSlide) {
        self.slides.push(slide);
    }
}

/// One slide with its shapes in document (z-) order.
#[derive(Debug, Clone)]
pub struct DeckSlide {
    /// 1-based slide number.
    pub number: usize,

    /// Top-level shapes in document order.
    pub shapes: Vec<Shape>,
}

impl DeckSlide {
    /// Create a new slide with the given number.
    pub fn new(number: usize) -> Self {
        Self {
            number,
            shapes: Vec::new(),
        }
    }

    /// Find the first text shape carrying the title placeholder role.
    ///
    /// Returns the shape's index together with the shape.
    pub fn title_shape(&self) -> Option<(usize, &TextShape)> {
        self.shapes.iter().enumerate().find_map(|(idx, shape)| match shape {
            Shape::Text(text) if text.is_title() => Some((idx, text)),
            _ => None,
        })
    }
}

/// A positioned element on a slide.
#[derive(Debug, Clone)]
pub enum Shape {
    Text(TextShape),
    Picture(PictureShape),
}

/// Placeholder role of a shape, taken from `p:ph/@type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    Title,
    CenteredTitle,
    Subtitle,
    Body,
    /// `p:ph` without a type attribute.
    Object,
    Other,
}

impl Placeholder {
    /// Map an OOXML `ST_PlaceholderType` value.
    pub fn from_ooxml(value: &str) -> Self {
        match value {
            "title" => Self::Title,
            "ctrTitle" => Self::CenteredTitle,
            "subTitle" => Self::Subtitle,
            "body" => Self::Body,
            "obj" => Self::Object,
            _ => Self::Other,
        }
    }

    /// Whether this placeholder marks the slide heading.
    pub fn is_title(&self) -> bool {
        matches!(self, Self::Title | Self::CenteredTitle)
    }
}

/// A shape with a text body.
#[derive(Debug, Clone, Default)]
pub struct TextShape {
    /// Placeholder role, if the shape is a placeholder.
    pub placeholder: Option<Placeholder>,

    /// Paragraphs in reading order.
    pub paragraphs: Vec<Paragraph>,
}

impl TextShape {
    /// Whether this shape is the slide's title placeholder.
    pub fn is_title(&self) -> bool {
        self.placeholder.map(|p| p.is_title()).unwrap_or(false)
    }

    /// Plain text of all paragraphs, one line per paragraph.
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// One paragraph of a text body.
#[derive(Debug, Clone, Default)]
pub struct Paragraph {
    /// Outline level (`a:pPr/@lvl`), 0 for top level.
    pub indent_level: u32,

    /// Runs in reading order.
    pub runs: Vec<TextRun>,
}

impl Paragraph {
    /// Create a paragraph at the given indent level.
    pub fn new(indent_level: u32) -> Self {
        Self {
            indent_level,
            runs: Vec::new(),
        }
    }

    /// Add a run.
    pub fn with_run(mut self, run: TextRun) -> Self {
        self.runs.push(run);
        self
    }

    /// Concatenated raw text of all runs.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

/// A contiguous span of uniformly styled text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextRun {
    /// Raw run text; a line break run holds `"\n"`.
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub subscript: bool,
    pub superscript: bool,

    /// Latin typeface, if one is set on the run.
    pub font_family: Option<String>,

    /// Solid fill color of the run text, if one is set.
    pub color: Option<Rgb>,
}

impl TextRun {
    /// Create an unstyled run.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn subscript(mut self) -> Self {
        self.subscript = true;
        self
    }

    pub fn superscript(mut self) -> Self {
        self.superscript = true;
        self
    }

    pub fn with_font(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = Some(color);
        self
    }
}

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `RRGGBB` hex string as used by `a:srgbClr/@val`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim();
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Perceived gray level: the average of the three channels.
    ///
    /// 0 is black, 255 is white.
    pub fn gray(&self) -> u8 {
        ((self.r as u16 + self.g as u16 + self.b as u16) / 3) as u8
    }
}

/// A picture shape with its binary payload.
#[derive(Debug, Clone)]
pub struct PictureShape {
    /// File name of the media part, e.g. `image1.png`.
    pub file_name: String,

    /// Raw image bytes.
    pub data: Vec<u8>,
}

impl PictureShape {
    pub fn new(file_name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            data,
        }
    }

    /// Checksum of the payload: CRC-32, widened to 64 bits, little-endian.
    pub fn checksum(&self) -> [u8; 8] {
        (crc32fast::hash(&self.data) as u64).to_le_bytes()
    }
}
