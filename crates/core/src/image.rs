//! Copying picture payloads next to the output document.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{Error, Result};
use crate::types::PictureShape;

/// Writes pictures into the image directory and produces `image::` directives.
#[derive(Debug, Clone)]
pub struct ImageExporter {
    /// Directory the files are written to.
    image_dir: PathBuf,

    /// Folder name used inside the directives, relative to the document.
    folder: String,
}

impl ImageExporter {
    /// Create an exporter writing into `image_dir`, referenced from the
    /// document as `folder`.
    pub fn new(image_dir: impl Into<PathBuf>, folder: impl Into<String>) -> Self {
        Self {
            image_dir: image_dir.into(),
            folder: folder.into(),
        }
    }

    /// Copy a picture and return the directive that embeds it.
    ///
    /// The target name is derived from the payload checksum, so exporting the
    /// same picture again overwrites the same file.
    pub fn export(&self, picture: &PictureShape) -> Result<String> {
        self.export_bytes(&picture.data, &picture.checksum(), &picture.file_name)
    }

    /// Copy raw image bytes under `<id>-<file_name>` and return the directive.
    pub fn export_bytes(&self, data: &[u8], checksum: &[u8], file_name: &str) -> Result<String> {
        let image_file = image_file_name(checksum, file_name);
        let image_path = self.image_dir.join(&image_file);

        write_atomically(&self.image_dir, &image_path, data).map_err(|source| {
            Error::ImageExport {
                path: image_path.clone(),
                source,
            }
        })?;

        log::debug!("Exported image {}", image_path.display());

        Ok(format!("image::{}/{}[]\n", self.folder, image_file))
    }
}

/// Short stable identifier for a checksum.
///
/// The bytes are read as big-endian 32-bit words and folded with the
/// multiplier 31 in wrapping signed arithmetic; the identifier is the
/// absolute value of the result.
pub fn image_id(checksum: &[u8]) -> u32 {
    checksum
        .chunks(4)
        .map(|chunk| {
            let mut word = [0u8; 4];
            word[4 - chunk.len()..].copy_from_slice(chunk);
            i32::from_be_bytes(word)
        })
        .fold(0i32, |hash, word| hash.wrapping_mul(31).wrapping_add(word))
        .unsigned_abs()
}

/// File name of an exported picture: `<id>-<original name>`.
pub fn image_file_name(checksum: &[u8], file_name: &str) -> String {
    format!("{}-{}", image_id(checksum), file_name)
}

/// Write `data` to `path` through a temporary file in `dir`, replacing any
/// existing file.
fn write_atomically(dir: &Path, path: &Path, data: &[u8]) -> std::io::Result<()> {
    fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;

    Ok(())
}
