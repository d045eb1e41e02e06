//! PPTX deck reader.

use adoc_core::{Deck, DeckSlide, Error, PictureShape, Result, Shape};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use crate::package::{part_file_name, resolve_target, Package, Relationship};
use crate::slide::{parse_slide_xml, SlideShape};
use crate::theme::Theme;
use crate::xml::{local_name, prefixed_attr_value};

/// Parser for PPTX (Office Open XML) files.
pub struct PptxParser;

impl PptxParser {
    /// Create a new PPTX parser.
    pub fn new() -> Self {
        Self
    }

    /// Open and parse a PPTX file.
    pub fn open(&self, path: &Path) -> Result<Deck> {
        let file = File::open(path)?;
        self.parse(BufReader::new(file))
    }

    /// Parse a PPTX file from a reader.
    pub fn parse<R: Read + Seek>(&self, reader: R) -> Result<Deck> {
        let mut package = Package::new(reader)?;

        let main_part = package.main_part()?;
        let rels = package.relationships(&main_part)?;
        let theme = self.load_theme(&mut package, &main_part, &rels);

        let slide_order = self.get_slide_order(&mut package, &main_part, &rels)?;
        log::debug!("Found {} slides in {}", slide_order.len(), main_part);

        let mut deck = Deck::new();
        for (idx, slide_path) in slide_order.iter().enumerate() {
            let slide = self.parse_slide(&mut package, slide_path, idx + 1, &theme)?;
            deck.add_slide(slide);
        }

        Ok(deck)
    }

    /// Theme of the presentation; an unreadable theme only loses color and
    /// font resolution.
    fn load_theme<R: Read + Seek>(
        &self,
        package: &mut Package<R>,
        main_part: &str,
        rels: &[Relationship],
    ) -> Theme {
        let Some(rel) = rels.iter().find(|r| r.is_kind("/theme") && !r.external) else {
            log::debug!("Presentation has no theme");
            return Theme::default();
        };

        let path = resolve_target(main_part, &rel.target);
        match package.read_string(&path).and_then(|xml| Theme::parse(&xml)) {
            Ok(theme) => theme,
            Err(e) => {
                log::warn!("Ignoring theme '{}': {}", path, e);
                Theme::default()
            }
        }
    }

    /// Ordered slide part paths.
    ///
    /// Follows `p:sldIdLst` in the presentation part; without one, slide
    /// relationships are ordered by the number in their id or target.
    fn get_slide_order<R: Read + Seek>(
        &self,
        package: &mut Package<R>,
        main_part: &str,
        rels: &[Relationship],
    ) -> Result<Vec<String>> {
        let slide_rels: HashMap<&str, &Relationship> = rels
            .iter()
            .filter(|r| r.is_kind("/slide") && !r.external)
            .map(|r| (r.id.as_str(), r))
            .collect();

        let content = package.read_string(main_part)?;
        let listed = parse_slide_id_list(&content)?;

        if !listed.is_empty() {
            let mut slides = Vec::with_capacity(listed.len());
            for rel_id in &listed {
                match slide_rels.get(rel_id.as_str()) {
                    Some(rel) => slides.push(resolve_target(main_part, &rel.target)),
                    None => log::warn!("Slide relationship '{}' not found", rel_id),
                }
            }
            return Ok(slides);
        }

        let mut slides: Vec<(String, Option<usize>)> = slide_rels
            .values()
            .map(|rel| {
                let order_num = extract_slide_number(&rel.id).or_else(|| extract_slide_number(&rel.target));
                (resolve_target(main_part, &rel.target), order_num)
            })
            .collect();

        slides.sort_by(|a, b| match (a.1, b.1) {
            (Some(na), Some(nb)) => na.cmp(&nb),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.0.cmp(&b.0),
        });

        Ok(slides.into_iter().map(|(path, _)| path).collect())
    }

    /// Parse a single slide from the package.
    fn parse_slide<R: Read + Seek>(
        &self,
        package: &mut Package<R>,
        slide_path: &str,
        slide_number: usize,
        theme: &Theme,
    ) -> Result<DeckSlide> {
        let content = package.read_string(slide_path)?;
        let raw_shapes = parse_slide_xml(&content, theme)
            .map_err(|e| Error::PptxParseError(format!("{}: {}", slide_path, e)))?;

        let has_pictures = raw_shapes.iter().any(|s| matches!(s, SlideShape::Picture { .. }));
        let rels = if has_pictures {
            package.relationships(slide_path)?
        } else {
            Vec::new()
        };

        let mut slide = DeckSlide::new(slide_number);

        for shape in raw_shapes {
            match shape {
                SlideShape::Text(text) => slide.shapes.push(Shape::Text(text)),
                SlideShape::Picture { rel_id } => {
                    match self.load_picture(package, slide_path, &rels, rel_id.as_deref()) {
                        Some(picture) => slide.shapes.push(Shape::Picture(picture)),
                        None => log::warn!(
                            "Skipping picture without embedded image on slide {}",
                            slide_number
                        ),
                    }
                }
            }
        }

        log::debug!("Slide {}: {} shapes", slide_number, slide.shapes.len());

        Ok(slide)
    }

    /// Load the media part a picture's relationship points at.
    fn load_picture<R: Read + Seek>(
        &self,
        package: &mut Package<R>,
        slide_path: &str,
        rels: &[Relationship],
        rel_id: Option<&str>,
    ) -> Option<PictureShape> {
        let rel_id = rel_id?;
        let rel = rels.iter().find(|r| r.id == rel_id && !r.external)?;
        let path = resolve_target(slide_path, &rel.target);

        match package.read_bytes(&path) {
            Ok(data) => Some(PictureShape::new(part_file_name(&path), data)),
            Err(e) => {
                log::warn!("Cannot read image '{}': {}", path, e);
                None
            }
        }
    }
}

impl Default for PptxParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Relationship ids of `p:sldIdLst/p:sldId` in presentation order.
fn parse_slide_id_list(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut ids = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if local_name(e.name().as_ref()) == b"sldId" =>
            {
                if let Some(id) = prefixed_attr_value(e, b"id") {
                    ids.push(id);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!(
                    "Error parsing presentation: {}",
                    e
                )));
            }
            _ => {}
        }
    }

    Ok(ids)
}

/// Extract a slide number from a string like "rId2" or "slide3.xml".
fn extract_slide_number(s: &str) -> Option<usize> {
    // Remove common extensions first
    let s = s.trim_end_matches(".xml").trim_end_matches(".rels");

    // Try to find digits at the end
    let digits: String = s.chars().rev().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let digits: String = digits.chars().rev().collect();
    digits.parse().ok()
}
