//! CLI tool for converting PowerPoint slide decks to AsciiDoc.

use adoc_core::config::{DEFAULT_IMAGE_FOLDER, DEFAULT_UNTITLED_HEADING};
use adoc_core::{Configuration, SlideExtractor};
use adoc_pptx::PptxParser;
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

/// Convert a PowerPoint presentation into an AsciiDoc document.
#[derive(Parser, Debug)]
#[command(name = "pptx2adoc")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input PowerPoint file (.pptx)
    input: PathBuf,

    /// Output AsciiDoc file (default: input with .adoc extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Do not export images
    #[arg(long = "noimages")]
    no_images: bool,

    /// Image folder, relative to the output file's directory
    #[arg(long = "imagefolder", default_value = DEFAULT_IMAGE_FOLDER)]
    image_folder: String,

    /// Heading for slides without a title
    #[arg(long, default_value = DEFAULT_UNTITLED_HEADING)]
    untitled: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn configuration(&self) -> Configuration {
        let mut config = Configuration::new(&self.input)
            .with_write_images(!self.no_images)
            .with_image_folder(&self.image_folder)
            .with_untitled_heading(&self.untitled);
        if let Some(output) = &self.output {
            config = config.with_output(output);
        }
        config
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let config = args.configuration();
    convert(&config, args.verbose)
}

/// Read the deck, convert all slides and write the document.
fn convert(config: &Configuration, verbose: bool) -> Result<()> {
    if verbose {
        eprintln!("Processing: {}", config.input.display());
    }
    log::debug!("{:?}", config);

    let deck = PptxParser::new()
        .open(&config.input)
        .with_context(|| format!("Failed to read {}", config.input.display()))?;

    let slides = SlideExtractor::new(config).extract_all(&deck);

    if verbose {
        eprintln!("  Converted {} slides", slides.len());
    }

    slides
        .write_document(&config.output)
        .with_context(|| format!("Failed to write {}", config.output.display()))?;

    if verbose {
        eprintln!("Written to: {}", config.output.display());
    }

    Ok(())
}
