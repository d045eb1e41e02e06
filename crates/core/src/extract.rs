//! Slide extraction: one deck slide in, one converted slide out.

use crate::config::Configuration;
use crate::document::{Slide, Slides};
use crate::image::ImageExporter;
use crate::markup;
use crate::types::{Deck, DeckSlide, Shape, TextShape};

/// Converts deck slides into AsciiDoc sections.
#[derive(Debug, Clone)]
pub struct SlideExtractor {
    /// Heading for slides without a title placeholder.
    untitled_heading: String,

    /// Present when pictures are exported.
    images: Option<ImageExporter>,
}

impl SlideExtractor {
    /// Create an extractor from the run configuration.
    pub fn new(config: &Configuration) -> Self {
        let images = config
            .write_images
            .then(|| ImageExporter::new(config.image_dir(), config.image_folder.clone()));

        Self {
            untitled_heading: config.untitled_heading.clone(),
            images,
        }
    }

    /// Create an extractor that ignores pictures.
    pub fn without_images(untitled_heading: impl Into<String>) -> Self {
        Self {
            untitled_heading: untitled_heading.into(),
            images: None,
        }
    }

    /// Convert every slide of a deck, in order.
    pub fn extract_all(&self, deck: &Deck) -> Slides {
        let mut slides = Slides::new();
        for deck_slide in &deck.slides {
            slides.add_slide(self.extract(deck_slide));
        }
        slides
    }

    /// Convert one slide.
    ///
    /// Picture export failures are logged and the picture is left out.
    pub fn extract(&self, deck_slide: &DeckSlide) -> Slide {
        let title = deck_slide.title_shape();
        let title_index = title.map(|(idx, _)| idx);

        let heading = title
            .map(|(_, shape)| heading_text(shape))
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| {
                log::debug!("Slide {} has no title", deck_slide.number);
                self.untitled_heading.clone()
            });

        let mut body = String::new();

        for (idx, shape) in deck_slide.shapes.iter().enumerate() {
            if Some(idx) == title_index {
                continue;
            }

            match shape {
                Shape::Text(text_shape) => {
                    let text = markup::format_text_shape(text_shape);
                    if !text.trim().is_empty() {
                        body.push_str(&text);
                    }
                }
                Shape::Picture(picture) => {
                    let Some(exporter) = &self.images else {
                        continue;
                    };
                    match exporter.export(picture) {
                        Ok(directive) => body.push_str(&directive),
                        Err(e) => log::warn!(
                            "Skipping image {} on slide {}: {}",
                            picture.file_name,
                            deck_slide.number,
                            e
                        ),
                    }
                }
            }
        }

        Slide::new(&heading, body)
    }
}

/// Single-line heading text of a title shape.
fn heading_text(shape: &TextShape) -> String {
    shape.text().split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_UNTITLED_HEADING;
    use crate::types::{Paragraph, PictureShape, Placeholder, TextRun};

    fn text_shape(placeholder: Option<Placeholder>, lines: &[&str]) -> Shape {
        Shape::Text(TextShape {
            placeholder,
            paragraphs: lines
                .iter()
                .map(|l| Paragraph::new(0).with_run(TextRun::new(*l)))
                .collect(),
        })
    }

    fn picture(name: &str, data: &[u8]) -> Shape {
        Shape::Picture(PictureShape::new(name, data.to_vec()))
    }

    #[test]
    fn test_single_slide_example() {
        let mut slide = DeckSlide::new(1);
        slide.shapes.push(text_shape(Some(Placeholder::Title), &["Intro"]));
        slide.shapes.push(text_shape(None, &["Hello"]));

        let extractor = SlideExtractor::without_images(DEFAULT_UNTITLED_HEADING);
        assert_eq!(extractor.extract(&slide).to_string(), "\n== Intro\n\nHello\n\n");
    }

    #[test]
    fn test_missing_title_uses_placeholder_heading() {
        let mut slide = DeckSlide::new(3);
        slide.shapes.push(text_shape(Some(Placeholder::Body), &["Body"]));

        let extractor = SlideExtractor::without_images("Untitled");
        let converted = extractor.extract(&slide);
        assert_eq!(converted.title(), "\n== Untitled\n");
        assert_eq!(converted.body(), "Body\n\n");
    }

    #[test]
    fn test_blank_title_uses_placeholder_heading_and_is_skipped() {
        let mut slide = DeckSlide::new(1);
        slide.shapes.push(text_shape(Some(Placeholder::Title), &["  "]));

        let extractor = SlideExtractor::without_images("Untitled");
        let converted = extractor.extract(&slide);
        assert_eq!(converted.title(), "\n== Untitled\n");
        assert_eq!(converted.body(), "");
    }

    #[test]
    fn test_multi_line_title_is_one_heading() {
        let mut slide = DeckSlide::new(1);
        slide
            .shapes
            .push(text_shape(Some(Placeholder::CenteredTitle), &["Part one", "of two"]));

        let extractor = SlideExtractor::without_images("Untitled");
        assert_eq!(extractor.extract(&slide).title(), "\n== Part one of two\n");
    }

    #[test]
    fn test_title_shape_skipped_in_body_and_order_kept() {
        let mut slide = DeckSlide::new(1);
        slide.shapes.push(text_shape(None, &["before"]));
        slide.shapes.push(text_shape(Some(Placeholder::Title), &["Heading"]));
        slide.shapes.push(text_shape(None, &["after"]));

        let extractor = SlideExtractor::without_images("Untitled");
        let converted = extractor.extract(&slide);
        assert_eq!(converted.body(), "before\n\nafter\n\n");
    }

    #[test]
    fn test_blank_text_shapes_are_dropped() {
        let mut slide = DeckSlide::new(1);
        slide.shapes.push(text_shape(None, &["", "   "]));

        let extractor = SlideExtractor::without_images("Untitled");
        assert_eq!(extractor.extract(&slide).body(), "");
    }

    #[test]
    fn test_pictures_exported_when_enabled() {
        let dir = tempfile::tempdir().unwrap();
        let config = Configuration::new(dir.path().join("deck.pptx"));
        let extractor = SlideExtractor::new(&config);

        let mut slide = DeckSlide::new(1);
        slide.shapes.push(text_shape(Some(Placeholder::Title), &["Pics"]));
        slide.shapes.push(text_shape(None, &["Look:"]));
        slide.shapes.push(picture("image1.png", b"png bytes"));

        let converted = extractor.extract(&slide);
        let checksum = PictureShape::new("image1.png", b"png bytes".to_vec()).checksum();
        let file_name = crate::image::image_file_name(&checksum, "image1.png");

        assert_eq!(
            converted.body(),
            format!("Look:\n\nimage::Images/{}[]\n", file_name)
        );
        assert!(dir.path().join("Images").join(file_name).exists());
    }

    #[test]
    fn test_noimages_body_is_text_only() {
        let dir = tempfile::tempdir().unwrap();
        let config = Configuration::new(dir.path().join("deck.pptx")).with_write_images(false);
        let extractor = SlideExtractor::new(&config);

        let mut slide = DeckSlide::new(1);
        slide.shapes.push(text_shape(None, &["Look:"]));
        slide.shapes.push(picture("image1.png", b"png bytes"));

        assert_eq!(extractor.extract(&slide).body(), "Look:\n\n");
        assert!(!dir.path().join("Images").exists());
    }

    #[test]
    fn test_failed_image_export_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Images"), b"a file, not a directory").unwrap();
        let config = Configuration::new(dir.path().join("deck.pptx"));
        let extractor = SlideExtractor::new(&config);

        let mut slide = DeckSlide::new(1);
        slide.shapes.push(picture("image1.png", b"png bytes"));
        slide.shapes.push(text_shape(None, &["still here"]));

        assert_eq!(extractor.extract(&slide).body(), "still here\n\n");
    }

    #[test]
    fn test_extract_all_one_heading_per_slide() {
        let mut deck = Deck::new();
        for n in 1..=3 {
            let title = format!("Slide {}", n);
            let mut slide = DeckSlide::new(n);
            slide
                .shapes
                .push(text_shape(Some(Placeholder::Title), &[title.as_str()]));
            deck.add_slide(slide);
        }

        let extractor = SlideExtractor::without_images("Untitled");
        let document = extractor.extract_all(&deck).to_string();

        assert_eq!(document.matches("\n== ").count(), 3);
        assert_eq!(document, "\n== Slide 1\n\n== Slide 2\n\n== Slide 3\n");
    }
}
