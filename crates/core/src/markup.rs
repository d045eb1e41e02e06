//! Rich text to AsciiDoc inline markup.
//!
//! Each paragraph gets a list prefix from its indent level; each run is either
//! a monospace span (by font name or by a non-black color) or wrapped in the
//! inline delimiters for its character styles.

use crate::codeblock;
use crate::types::{Paragraph, TextRun, TextShape};

/// Delimiter for monospace spans.
pub const MONOSPACE_MARKER: &str = "`";

/// Font family that always marks code, compared case-insensitively.
pub const MONOSPACE_FONT: &str = "Consolas";

/// Runs lighter than this gray level are treated as code.
pub const CODE_GRAY_THRESHOLD: u8 = 20;

/// Deepest list nesting AsciiDoc supports with `*` markers.
const MAX_LIST_DEPTH: u32 = 5;

/// Character styles in the order their delimiters are opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Style {
    Bold,
    Italic,
    Subscript,
    Superscript,
}

const STYLE_MARKERS: &[(Style, &str, &str)] = &[
    (Style::Bold, "**", "**"),
    (Style::Italic, "__", "__"),
    (Style::Subscript, "~", "~"),
    (Style::Superscript, "^", "^"),
];

impl Style {
    fn is_set(self, run: &TextRun) -> bool {
        match self {
            Style::Bold => run.bold,
            Style::Italic => run.italic,
            Style::Subscript => run.subscript,
            Style::Superscript => run.superscript,
        }
    }
}

/// List prefix for a paragraph indent level.
///
/// Level 0 has none; level `n` gets `n` bullet markers, capped at the deepest
/// nesting AsciiDoc understands.
pub fn indent_prefix(level: u32) -> String {
    if level == 0 {
        return String::new();
    }
    let depth = level.min(MAX_LIST_DEPTH) as usize;
    format!("{} ", "*".repeat(depth))
}

/// Whether a run is rendered as monospace.
pub fn is_code_run(run: &TextRun) -> bool {
    let monospace_font = run
        .font_family
        .as_deref()
        .is_some_and(|f| f.eq_ignore_ascii_case(MONOSPACE_FONT));
    let gray = run.color.map(|c| c.gray()).unwrap_or(0);

    monospace_font || gray > CODE_GRAY_THRESHOLD
}

/// Render one run as inline markup.
pub fn format_run(run: &TextRun) -> String {
    if is_code_run(run) {
        return format!("{MONOSPACE_MARKER}{}{MONOSPACE_MARKER}", run.text);
    }

    let mut out = String::with_capacity(run.text.len() + 8);
    let mut open: Vec<&str> = Vec::new();

    for (style, start, end) in STYLE_MARKERS {
        if style.is_set(run) {
            out.push_str(start);
            open.push(end);
        }
    }

    out.push_str(&run.text);

    while let Some(end) = open.pop() {
        out.push_str(end);
    }

    out
}

/// Render paragraphs into markup, each followed by a blank line.
///
/// Adjacent code spans inside a paragraph are merged into one.
pub fn format_paragraphs(paragraphs: &[Paragraph]) -> String {
    let mut out = String::new();

    for paragraph in paragraphs {
        out.push_str(&indent_prefix(paragraph.indent_level));

        for run in &paragraph.runs {
            out.push_str(&format_run(run));
        }

        let joined = out.replace("``", "");
        out = joined.trim().to_string();
        out.push_str("\n\n");
    }

    out
}

/// Render a text shape to AsciiDoc, including literal block cleanup.
pub fn format_text_shape(shape: &TextShape) -> String {
    codeblock::normalize(&format_paragraphs(&shape.paragraphs))
}
