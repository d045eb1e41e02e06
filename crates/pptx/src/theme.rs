//! Theme color scheme and font scheme.
//!
//! Runs may reference theme colors (`a:schemeClr`) and theme fonts
//! (`+mj-lt`, `+mn-lt`); these are resolved here so the converter only ever
//! sees concrete colors and typefaces.

use adoc_core::{Error, Result, Rgb};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;

use crate::xml::{attr_value, local_name};

/// Resolved theme values.
#[derive(Debug, Clone, Default)]
pub struct Theme {
    colors: HashMap<String, Rgb>,
    major_latin: Option<String>,
    minor_latin: Option<String>,
}

impl Theme {
    /// Parse a theme part (`ppt/theme/themeN.xml`).
    pub fn parse(xml: &str) -> Result<Self> {
        let mut theme = Theme::default();
        let mut reader = Reader::from_str(xml);
        reader.trim_text(true);

        let mut in_color_scheme = false;
        let mut current_color: Option<String> = None;
        let mut current_font: Option<&'static str> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => {
                    let name = e.name();
                    match local_name(name.as_ref()) {
                        b"clrScheme" => in_color_scheme = true,
                        b"majorFont" => current_font = Some("major"),
                        b"minorFont" => current_font = Some("minor"),
                        b"srgbClr" | b"sysClr" => theme.capture_color(current_color.as_deref(), e),
                        other if in_color_scheme && current_color.is_none() => {
                            current_color = Some(String::from_utf8_lossy(other).to_string());
                        }
                        _ => {}
                    }
                }
                Ok(Event::Empty(ref e)) => {
                    let name = e.name();
                    match local_name(name.as_ref()) {
                        b"srgbClr" | b"sysClr" => theme.capture_color(current_color.as_deref(), e),
                        b"latin" => {
                            let typeface = attr_value(e, b"typeface").filter(|t| !t.is_empty());
                            match current_font {
                                Some("major") if theme.major_latin.is_none() => theme.major_latin = typeface,
                                Some("minor") if theme.minor_latin.is_none() => theme.minor_latin = typeface,
                                _ => {}
                            }
                        }
                        _ => {}
                    }
                }
                Ok(Event::End(ref e)) => {
                    let name = e.name();
                    let local = local_name(name.as_ref());
                    match local {
                        b"clrScheme" => in_color_scheme = false,
                        b"majorFont" | b"minorFont" => current_font = None,
                        other => {
                            if current_color.as_deref().map(str::as_bytes) == Some(other) {
                                current_color = None;
                            }
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::XmlError(format!("Error parsing theme: {}", e)));
                }
                _ => {}
            }
        }

        Ok(theme)
    }

    /// Store the color of a scheme slot. Color modifiers such as `a:lumMod`
    /// are not applied.
    fn capture_color(&mut self, slot: Option<&str>, e: &BytesStart) {
        let Some(slot) = slot else {
            return;
        };
        let hex = match local_name(e.name().as_ref()) {
            b"sysClr" => attr_value(e, b"lastClr"),
            _ => attr_value(e, b"val"),
        };
        if let Some(rgb) = hex.and_then(|v| Rgb::from_hex(&v)) {
            self.colors.entry(slot.to_string()).or_insert(rgb);
        }
    }

    /// Resolve a `a:schemeClr/@val` value.
    pub fn scheme_color(&self, name: &str) -> Option<Rgb> {
        let slot = match name {
            "tx1" => "dk1",
            "tx2" => "dk2",
            "bg1" => "lt1",
            "bg2" => "lt2",
            other => other,
        };
        self.colors.get(slot).copied()
    }

    /// Resolve a typeface, following theme font references.
    pub fn resolve_typeface(&self, typeface: &str) -> Option<String> {
        match typeface {
            "+mj-lt" => self.major_latin.clone(),
            "+mn-lt" => self.minor_latin.clone(),
            other if other.starts_with('+') => None,
            other => Some(other.to_string()),
        }
    }
}
