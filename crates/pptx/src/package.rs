//! OOXML package access: parts inside the ZIP container and their
//! relationships.

use adoc_core::{Error, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Read, Seek};
use zip::ZipArchive;

use crate::xml::{attr_value, local_name};

/// Package-level relationships part.
const ROOT_RELS_PATH: &str = "_rels/.rels";

/// Main presentation part when the package relationships don't name one.
const DEFAULT_MAIN_PART: &str = "ppt/presentation.xml";

/// A relationship entry from a `.rels` part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub id: String,
    pub rel_type: String,
    pub target: String,
    pub external: bool,
}

impl Relationship {
    /// Whether the relationship type ends with the given kind, e.g. `/slide`.
    ///
    /// Comparing the suffix accepts both the transitional and strict
    /// namespaces.
    pub fn is_kind(&self, kind: &str) -> bool {
        self.rel_type.ends_with(kind)
    }
}

/// An opened OOXML package.
pub struct Package<R> {
    archive: ZipArchive<R>,
}

impl<R: Read + Seek> Package<R> {
    /// Open the ZIP container.
    pub fn new(reader: R) -> Result<Self> {
        let archive = ZipArchive::new(reader)
            .map_err(|e| Error::ZipError(format!("Failed to open ZIP: {}", e)))?;
        Ok(Self { archive })
    }

    /// Whether a part exists.
    pub fn has_part(&self, path: &str) -> bool {
        self.archive.file_names().any(|name| name == path)
    }

    /// Read a part as UTF-8 text.
    pub fn read_string(&mut self, path: &str) -> Result<String> {
        let mut file = self
            .archive
            .by_name(path)
            .map_err(|e| Error::ZipError(format!("File not found in archive '{}': {}", path, e)))?;

        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", path, e)))?;

        Ok(content)
    }

    /// Read a part as raw bytes.
    pub fn read_bytes(&mut self, path: &str) -> Result<Vec<u8>> {
        let mut file = self
            .archive
            .by_name(path)
            .map_err(|e| Error::ZipError(format!("File not found in archive '{}': {}", path, e)))?;

        let mut content = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut content)
            .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", path, e)))?;

        Ok(content)
    }

    /// Relationships of a part. A part without a relationships part has none.
    pub fn relationships(&mut self, part: &str) -> Result<Vec<Relationship>> {
        let rels_path = rels_path_for(part);
        if !self.has_part(&rels_path) {
            log::debug!("No relationships part for '{}'", part);
            return Ok(Vec::new());
        }
        let content = self.read_string(&rels_path)?;
        parse_relationships(&content)
    }

    /// Path of the main presentation part.
    pub fn main_part(&mut self) -> Result<String> {
        let rels = if self.has_part(ROOT_RELS_PATH) {
            let content = self.read_string(ROOT_RELS_PATH)?;
            parse_relationships(&content)?
        } else {
            Vec::new()
        };

        let part = rels
            .iter()
            .find(|r| r.is_kind("/officeDocument") && !r.external)
            .map(|r| resolve_target("", &r.target))
            .unwrap_or_else(|| DEFAULT_MAIN_PART.to_string());

        if !self.has_part(&part) {
            return Err(Error::PptxParseError(format!(
                "Main presentation part '{}' is missing",
                part
            )));
        }

        Ok(part)
    }
}

/// Parse the XML of a `.rels` part.
pub fn parse_relationships(xml: &str) -> Result<Vec<Relationship>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut rels = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if local_name(e.name().as_ref()) == b"Relationship" =>
            {
                let id = attr_value(e, b"Id").unwrap_or_default();
                let rel_type = attr_value(e, b"Type").unwrap_or_default();
                let target = attr_value(e, b"Target").unwrap_or_default();
                let external = attr_value(e, b"TargetMode").as_deref() == Some("External");

                rels.push(Relationship {
                    id,
                    rel_type,
                    target,
                    external,
                });
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!(
                    "Error parsing relationships: {}",
                    e
                )));
            }
            _ => {}
        }
    }

    Ok(rels)
}

/// Path of the relationships part belonging to `part`.
///
/// `ppt/slides/slide1.xml` → `ppt/slides/_rels/slide1.xml.rels`
pub fn rels_path_for(part: &str) -> String {
    match part.rsplit_once('/') {
        Some((dir, name)) => format!("{}/_rels/{}.rels", dir, name),
        None => format!("_rels/{}.rels", part),
    }
}

/// Resolve a relationship target against the part that owns it.
pub fn resolve_target(base_part: &str, target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.to_string();
    }

    let mut segments: Vec<&str> = match base_part.rsplit_once('/') {
        Some((dir, _)) => dir.split('/').filter(|s| !s.is_empty()).collect(),
        None => Vec::new(),
    };

    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    segments.join("/")
}

/// Last path segment of a part name.
pub fn part_file_name(part: &str) -> &str {
    part.rsplit('/').next().unwrap_or(part)
}
