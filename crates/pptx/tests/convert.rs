//! End-to-end conversion: PPTX package → deck → AsciiDoc document.

use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;

use adoc_core::{Configuration, SlideExtractor};
use adoc_pptx::PptxParser;
use zip::write::FileOptions;
use zip::ZipWriter;

const REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

const IMAGE_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nnot really a png";

fn rels(entries: &[(&str, &str, &str)]) -> String {
    let body: String = entries
        .iter()
        .map(|(id, kind, target)| {
            format!(r#"<Relationship Id="{}" Type="{}/{}" Target="{}"/>"#, id, REL_NS, kind, target)
        })
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{}</Relationships>"#,
        body
    )
}

fn slide(shapes: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:spTree>{}</p:spTree></p:cSld></p:sld>"#,
        shapes
    )
}

const TITLE_INTRO: &str = r#"<p:sp><p:nvSpPr><p:cNvPr id="2" name="Title"/><p:cNvSpPr/><p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr><p:txBody><a:bodyPr/><a:p><a:r><a:rPr lang="en-US"/><a:t>Intro</a:t></a:r></a:p></p:txBody></p:sp>"#;

const BODY_HELLO: &str = r#"<p:sp><p:nvSpPr><p:cNvPr id="3" name="Body"/><p:cNvSpPr/><p:nvPr><p:ph idx="1"/></p:nvPr></p:nvSpPr><p:txBody><a:bodyPr/><a:p><a:r><a:rPr lang="en-US"/><a:t>Hello</a:t></a:r></a:p></p:txBody></p:sp>"#;

const BODY_CODE: &str = r#"<p:sp><p:txBody><a:bodyPr/>
<a:p><a:r><a:rPr b="1"/><a:t>Example</a:t></a:r><a:r><a:t>:</a:t></a:r></a:p>
<a:p><a:pPr lvl="1"/><a:r><a:t>uses </a:t></a:r><a:r><a:rPr><a:latin typeface="Consolas"/></a:rPr><a:t>main</a:t></a:r></a:p>
<a:p><a:r><a:rPr><a:solidFill><a:srgbClr val="2F5597"/></a:solidFill></a:rPr><a:t>fn main() {</a:t></a:r></a:p>
<a:p><a:r><a:rPr><a:solidFill><a:srgbClr val="2F5597"/></a:solidFill></a:rPr><a:t>}</a:t></a:r></a:p>
</p:txBody></p:sp>"#;

const PICTURE: &str = r#"<p:pic><p:nvPicPr><p:cNvPr id="4" name="Picture"/><p:cNvPicPr/><p:nvPr/></p:nvPicPr><p:blipFill><a:blip r:embed="rId2"/></p:blipFill></p:pic>"#;

fn write_pptx(path: &Path) {
    let presentation = r#"<p:presentation xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><p:sldIdLst><p:sldId id="256" r:id="rId2"/><p:sldId id="257" r:id="rId3"/><p:sldId id="258" r:id="rId4"/></p:sldIdLst></p:presentation>"#;

    let parts: Vec<(&str, Vec<u8>)> = vec![
        ("_rels/.rels", rels(&[("rId1", "officeDocument", "ppt/presentation.xml")]).into_bytes()),
        ("ppt/presentation.xml", presentation.as_bytes().to_vec()),
        (
            "ppt/_rels/presentation.xml.rels",
            rels(&[
                ("rId2", "slide", "slides/slide1.xml"),
                ("rId3", "slide", "slides/slide2.xml"),
                ("rId4", "slide", "slides/slide3.xml"),
            ])
            .into_bytes(),
        ),
        ("ppt/slides/slide1.xml", slide(&format!("{}{}", TITLE_INTRO, BODY_HELLO)).into_bytes()),
        ("ppt/slides/slide2.xml", slide(&format!("{}{}", BODY_CODE, PICTURE)).into_bytes()),
        (
            "ppt/slides/_rels/slide2.xml.rels",
            rels(&[("rId2", "image", "../media/image1.png")]).into_bytes(),
        ),
        ("ppt/slides/slide3.xml", slide("").into_bytes()),
        ("ppt/media/image1.png", IMAGE_BYTES.to_vec()),
    ];

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(zip::CompressionMethod::Stored);
    for (name, data) in &parts {
        zip.start_file(*name, options).unwrap();
        zip.write_all(data).unwrap();
    }
    let cursor = zip.finish().unwrap();
    fs::write(path, cursor.into_inner()).unwrap();
}

fn convert(config: &Configuration) -> String {
    let deck = PptxParser::new().open(&config.input).unwrap();
    let slides = SlideExtractor::new(config).extract_all(&deck);
    slides.write_document(&config.output).unwrap();
    fs::read_to_string(&config.output).unwrap()
}

fn image_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

#[test]
fn test_full_conversion() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("talk.pptx");
    write_pptx(&input);

    let config = Configuration::new(&input);
    assert_eq!(config.output, dir.path().join("talk.adoc"));

    let document = convert(&config);

    let images = image_files(&dir.path().join("Images"));
    assert_eq!(images.len(), 1);
    assert!(images[0].ends_with("-image1.png"));

    let expected = format!(
        "\n== Intro\n\nHello\n\n\
         \n== KEINE ÜBERSCHRIFT\n\n\
         **Example**:\n\n\
         * uses `main`\n\
         ....\nfn main() {{\n}}\n....\n\n\
         image::Images/{}[]\n\
         \n== KEINE ÜBERSCHRIFT\n",
        images[0]
    );
    assert_eq!(document, expected);
    assert_eq!(document.matches("\n== ").count(), 3);
}

#[test]
fn test_rerun_overwrites_same_image() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("talk.pptx");
    write_pptx(&input);
    let config = Configuration::new(&input).with_image_folder("pics");

    let first = convert(&config);
    let second = convert(&config);

    assert_eq!(first, second);
    let images = image_files(&dir.path().join("pics"));
    assert_eq!(images.len(), 1);
    assert_eq!(fs::read(dir.path().join("pics").join(&images[0])).unwrap(), IMAGE_BYTES);
}

#[test]
fn test_noimages_drops_only_directives() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("talk.pptx");
    write_pptx(&input);

    let with_images = convert(&Configuration::new(&input).with_output(dir.path().join("a.adoc")));
    let without_images = convert(
        &Configuration::new(&input)
            .with_output(dir.path().join("b.adoc"))
            .with_write_images(false),
    );

    let stripped: String = with_images
        .split_inclusive('\n')
        .filter(|line| !line.starts_with("image::"))
        .collect();
    assert_eq!(stripped, without_images);
}

#[test]
fn test_missing_input_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = PptxParser::new().open(&dir.path().join("missing.pptx"));
    assert!(matches!(result, Err(adoc_core::Error::IoError(_))));
}
