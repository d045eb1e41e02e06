//! Conversion settings, fixed once the command line has been parsed.

use std::path::{Path, PathBuf};

/// Default name of the image subfolder next to the output document.
pub const DEFAULT_IMAGE_FOLDER: &str = "Images";

/// Heading used for slides without a title placeholder.
pub const DEFAULT_UNTITLED_HEADING: &str = "KEINE ÜBERSCHRIFT";

/// Extension of the generated document.
pub const OUTPUT_EXTENSION: &str = "adoc";

/// Settings for one conversion run.
#[derive(Debug, Clone)]
pub struct Configuration {
    /// Source presentation.
    pub input: PathBuf,

    /// Destination AsciiDoc document.
    pub output: PathBuf,

    /// Whether pictures are copied and referenced.
    pub write_images: bool,

    /// Image subfolder, relative to the output's directory.
    pub image_folder: String,

    /// Heading text for slides without a title.
    pub untitled_heading: String,
}

impl Configuration {
    /// Create a configuration with default settings; the output path is
    /// derived from the input.
    pub fn new(input: impl Into<PathBuf>) -> Self {
        let input = input.into();
        let output = default_output_path(&input);
        Self {
            input,
            output,
            write_images: true,
            image_folder: DEFAULT_IMAGE_FOLDER.to_string(),
            untitled_heading: DEFAULT_UNTITLED_HEADING.to_string(),
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_write_images(mut self, write_images: bool) -> Self {
        self.write_images = write_images;
        self
    }

    pub fn with_image_folder(mut self, folder: impl Into<String>) -> Self {
        self.image_folder = folder.into();
        self
    }

    pub fn with_untitled_heading(mut self, heading: impl Into<String>) -> Self {
        self.untitled_heading = heading.into();
        self
    }

    /// Directory the images are copied into.
    pub fn image_dir(&self) -> PathBuf {
        self.output
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(&self.image_folder)
    }
}

/// Replace the input's extension with the AsciiDoc one.
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension(OUTPUT_EXTENSION)
}
