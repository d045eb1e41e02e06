//! Slide part parsing: top-level shapes with their paragraphs and runs.

use adoc_core::{Error, Paragraph, Placeholder, Result, Rgb, TextRun, TextShape};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;

use crate::theme::Theme;
use crate::xml::{attr_value, is_true, local_name, prefixed_attr_value};

/// A shape as found in slide XML, before picture payloads are loaded.
#[derive(Debug, Clone)]
pub enum SlideShape {
    Text(TextShape),
    /// A picture referencing its media part through a relationship id.
    Picture { rel_id: Option<String> },
}

/// Shape currently being collected, with the stack depth it was opened at.
#[derive(Debug)]
enum OpenShape {
    Text { depth: usize, shape: TextShape },
    Picture { depth: usize, rel_id: Option<String> },
}

impl OpenShape {
    fn depth(&self) -> usize {
        match self {
            OpenShape::Text { depth, .. } | OpenShape::Picture { depth, .. } => *depth,
        }
    }
}

/// Character properties written on one `a:rPr` or `a:defRPr`. Unset fields
/// fall back to the paragraph defaults, then to the shape's list style.
#[derive(Debug, Clone, Default)]
struct RunProperties {
    bold: Option<bool>,
    italic: Option<bool>,
    baseline: Option<i32>,
    font_family: Option<String>,
    color: Option<Rgb>,
}

impl RunProperties {
    fn from_attributes(e: &BytesStart) -> Self {
        let mut props = RunProperties::default();
        for attr in e.attributes().flatten() {
            let value = String::from_utf8_lossy(&attr.value);
            match attr.key.as_ref() {
                b"b" => props.bold = Some(is_true(&value)),
                b"i" => props.italic = Some(is_true(&value)),
                b"baseline" => props.baseline = value.parse::<i32>().ok(),
                _ => {}
            }
        }
        props
    }

    fn or(self, fallback: Option<&RunProperties>) -> Self {
        let Some(fallback) = fallback else {
            return self;
        };
        RunProperties {
            bold: self.bold.or(fallback.bold),
            italic: self.italic.or(fallback.italic),
            baseline: self.baseline.or(fallback.baseline),
            font_family: self.font_family.or_else(|| fallback.font_family.clone()),
            color: self.color.or(fallback.color),
        }
    }

    fn apply(self, run: &mut TextRun) {
        let baseline = self.baseline.unwrap_or(0);
        run.bold = self.bold.unwrap_or(false);
        run.italic = self.italic.unwrap_or(false);
        run.superscript = baseline > 0;
        run.subscript = baseline < 0;
        run.font_family = self.font_family;
        run.color = self.color;
    }
}

/// Which properties a `latin` or fill element inside a property element
/// belongs to.
#[derive(Debug, Clone, Copy)]
enum PropertyTarget {
    Run,
    Paragraph,
    ListLevel(u32),
}

/// Indent level of a list style entry: `lvl1pPr` is level 0.
fn list_level(name: &[u8]) -> Option<u32> {
    let digits = name.strip_prefix(b"lvl")?.strip_suffix(b"pPr")?;
    let level = std::str::from_utf8(digits).ok()?.parse::<u32>().ok()?;
    level.checked_sub(1)
}

/// Event-driven collector for the shapes of one slide.
struct ShapeCollector<'t> {
    theme: &'t Theme,
    /// Local names of the currently open elements.
    stack: Vec<Vec<u8>>,
    shapes: Vec<SlideShape>,
    shape: Option<OpenShape>,
    paragraph: Option<Paragraph>,
    run: Option<TextRun>,
    run_props: RunProperties,
    paragraph_props: RunProperties,
    /// `a:lstStyle` of the open shape, by indent level.
    list_style: HashMap<u32, RunProperties>,
    target: Option<PropertyTarget>,
}

impl<'t> ShapeCollector<'t> {
    fn new(theme: &'t Theme) -> Self {
        Self {
            theme,
            stack: Vec::new(),
            shapes: Vec::new(),
            shape: None,
            paragraph: None,
            run: None,
            run_props: RunProperties::default(),
            paragraph_props: RunProperties::default(),
            list_style: HashMap::new(),
            target: None,
        }
    }

    /// `n = 0` is the parent of the element being handled.
    fn ancestor(&self, n: usize) -> Option<&[u8]> {
        self.stack.iter().rev().nth(n).map(Vec::as_slice)
    }

    fn parent_is(&self, names: &[&str]) -> bool {
        self.ancestor(0)
            .is_some_and(|p| names.iter().any(|name| name.as_bytes() == p))
    }

    /// Directly in the slide's shape tree: not inside a group, another shape
    /// or the fallback branch of alternate content.
    fn at_top_level(&self) -> bool {
        if self.shape.is_some() || self.stack.iter().any(|n| n.as_slice() == b"Fallback") {
            return false;
        }
        self.stack
            .iter()
            .rev()
            .find(|n| n.as_slice() == b"spTree" || n.as_slice() == b"grpSp")
            .is_some_and(|n| n.as_slice() == b"spTree")
    }

    fn in_text_shape(&self) -> bool {
        matches!(self.shape, Some(OpenShape::Text { .. }))
    }

    fn text_shape_mut(&mut self) -> Option<&mut TextShape> {
        match &mut self.shape {
            Some(OpenShape::Text { shape, .. }) => Some(shape),
            _ => None,
        }
    }

    fn target_props_mut(&mut self) -> Option<&mut RunProperties> {
        match self.target? {
            PropertyTarget::Run => Some(&mut self.run_props),
            PropertyTarget::Paragraph => Some(&mut self.paragraph_props),
            PropertyTarget::ListLevel(level) => self.list_style.get_mut(&level),
        }
    }

    fn in_text_element(&self) -> bool {
        self.run.is_some() && self.ancestor(0) == Some(b"t".as_slice())
    }

    fn open(&mut self, e: &BytesStart) {
        let qname = e.name();
        let name = local_name(qname.as_ref());
        let depth = self.stack.len();

        match name {
            b"sp" if self.at_top_level() => {
                self.shape = Some(OpenShape::Text {
                    depth,
                    shape: TextShape::default(),
                });
                self.list_style.clear();
            }
            b"pic" if self.at_top_level() => {
                self.shape = Some(OpenShape::Picture { depth, rel_id: None });
            }
            b"ph" => {
                let placeholder = attr_value(e, b"type")
                    .map(|t| Placeholder::from_ooxml(&t))
                    .unwrap_or(Placeholder::Object);
                if let Some(shape) = self.text_shape_mut() {
                    shape.placeholder = Some(placeholder);
                }
            }
            b"p" if self.parent_is(&["txBody"]) && self.in_text_shape() => {
                self.paragraph = Some(Paragraph::new(0));
                self.paragraph_props = RunProperties::default();
            }
            b"pPr" if self.parent_is(&["p"]) => {
                let level = attr_value(e, b"lvl").and_then(|v| v.parse::<u32>().ok());
                if let (Some(paragraph), Some(level)) = (self.paragraph.as_mut(), level) {
                    paragraph.indent_level = level;
                }
            }
            b"r" | b"fld" | b"br" if self.parent_is(&["p"]) && self.paragraph.is_some() => {
                let mut run = TextRun::default();
                if name == b"br" {
                    run.text.push('\n');
                }
                self.run = Some(run);
                self.run_props = RunProperties::default();
            }
            b"rPr" if self.parent_is(&["r", "fld", "br"]) && self.run.is_some() => {
                self.run_props = RunProperties::from_attributes(e);
                self.target = Some(PropertyTarget::Run);
            }
            b"defRPr"
                if self.parent_is(&["pPr"])
                    && self.ancestor(1) == Some(b"p".as_slice())
                    && self.paragraph.is_some() =>
            {
                self.paragraph_props = RunProperties::from_attributes(e);
                self.target = Some(PropertyTarget::Paragraph);
            }
            b"defRPr"
                if self.ancestor(1) == Some(b"lstStyle".as_slice())
                    && self.ancestor(2) == Some(b"txBody".as_slice())
                    && self.in_text_shape() =>
            {
                if let Some(level) = self.ancestor(0).and_then(list_level) {
                    self.list_style.insert(level, RunProperties::from_attributes(e));
                    self.target = Some(PropertyTarget::ListLevel(level));
                }
            }
            b"latin" if self.parent_is(&["rPr", "defRPr"]) => {
                let typeface = attr_value(e, b"typeface").and_then(|t| self.theme.resolve_typeface(&t));
                if let (Some(props), Some(typeface)) = (self.target_props_mut(), typeface) {
                    props.font_family = Some(typeface);
                }
            }
            b"srgbClr" | b"sysClr" | b"schemeClr"
                if self.parent_is(&["solidFill"])
                    && matches!(self.ancestor(1), Some(b"rPr" | b"defRPr")) =>
            {
                let color = match name {
                    b"srgbClr" => attr_value(e, b"val").and_then(|v| Rgb::from_hex(&v)),
                    b"sysClr" => attr_value(e, b"lastClr").and_then(|v| Rgb::from_hex(&v)),
                    _ => attr_value(e, b"val").and_then(|v| self.theme.scheme_color(&v)),
                };
                if let (Some(props), Some(color)) = (self.target_props_mut(), color) {
                    props.color = Some(color);
                }
            }
            b"blip" => {
                if let Some(OpenShape::Picture { rel_id, .. }) = &mut self.shape {
                    if rel_id.is_none() {
                        *rel_id = prefixed_attr_value(e, b"embed");
                    }
                }
            }
            _ => {}
        }
    }

    /// Handle the end of an element. The element is no longer on the stack.
    fn close(&mut self, name: &[u8]) {
        match name {
            b"rPr" | b"defRPr" => self.target = None,
            b"r" | b"fld" | b"br" if self.parent_is(&["p"]) => {
                if let (Some(mut run), Some(paragraph)) = (self.run.take(), self.paragraph.as_mut()) {
                    std::mem::take(&mut self.run_props)
                        .or(Some(&self.paragraph_props))
                        .or(self.list_style.get(&paragraph.indent_level))
                        .apply(&mut run);
                    paragraph.runs.push(run);
                }
            }
            b"p" if self.parent_is(&["txBody"]) => {
                if let Some(paragraph) = self.paragraph.take() {
                    if let Some(shape) = self.text_shape_mut() {
                        shape.paragraphs.push(paragraph);
                    }
                }
            }
            b"sp" | b"pic" => {
                if self.shape.as_ref().is_some_and(|s| s.depth() == self.stack.len()) {
                    match self.shape.take() {
                        Some(OpenShape::Text { shape, .. }) => self.shapes.push(SlideShape::Text(shape)),
                        Some(OpenShape::Picture { rel_id, .. }) => {
                            self.shapes.push(SlideShape::Picture { rel_id })
                        }
                        None => {}
                    }
                }
            }
            _ => {}
        }
    }

    fn push_text(&mut self, text: &str) {
        if let Some(run) = self.run.as_mut() {
            run.text.push_str(text);
        }
    }
}

/// Extract the top-level shapes of a slide part in document order.
pub fn parse_slide_xml(xml: &str, theme: &Theme) -> Result<Vec<SlideShape>> {
    let mut reader = Reader::from_str(xml);
    // Whitespace inside a:t is significant.
    reader.trim_text(false);

    let mut collector = ShapeCollector::new(theme);

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                collector.open(e);
                collector.stack.push(local_name(e.name().as_ref()).to_vec());
            }
            Ok(Event::Empty(ref e)) => {
                collector.open(e);
                let name = e.name();
                collector.close(local_name(name.as_ref()));
            }
            Ok(Event::End(ref e)) => {
                collector.stack.pop();
                let name = e.name();
                collector.close(local_name(name.as_ref()));
            }
            Ok(Event::Text(ref e)) => {
                if collector.in_text_element() {
                    let text = e
                        .unescape()
                        .map_err(|err| Error::XmlError(format!("Invalid text in slide: {}", err)))?;
                    collector.push_text(&text);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!("Error parsing slide: {}", e)));
            }
            _ => {}
        }
    }

    Ok(collector.shapes)
}
