//! Cleanup pipeline for formatted text shapes.
//!
//! Monospace runs come out of the run formatter as backtick-wrapped spans.
//! Lines that consist of a single such span are turned into AsciiDoc literal
//! blocks, neighbouring blocks are merged, and a few whitespace artifacts are
//! removed. Every step is a pure text-to-text function; [`normalize`] runs them
//! in order.

use regex::Regex;
use std::sync::LazyLock;

use crate::markup::MONOSPACE_MARKER;

/// Delimiter line of an AsciiDoc literal block.
pub const FENCE: &str = "....";

/// Blank lines between a line ending in a marker and one starting with it.
static CODE_LINE_GAP_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`(\r?\n)+`").unwrap());

/// Spaces in front of a marker at the start of a line.
static INDENTED_CODE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^ +`").unwrap());

/// A comma followed by blanks and then a marker.
static COMMA_BEFORE_CODE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r",[ \t]+`").unwrap());

/// A comma directly followed by a code span whose text starts with a blank.
static COMMA_INTO_CODE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r",`[ \t]+").unwrap());

/// A named cleanup step.
pub struct Step {
    pub name: &'static str,
    pub apply: fn(&str) -> String,
}

/// Cleanup steps in the order they are applied.
pub const STEPS: &[Step] = &[
    Step { name: "join_code_lines", apply: join_code_lines },
    Step { name: "strip_indent_before_code", apply: strip_indent_before_code },
    Step { name: "fence_code_lines", apply: fence_code_lines },
    Step { name: "merge_adjacent_fences", apply: merge_adjacent_fences },
    Step { name: "strip_tabs", apply: strip_tabs },
    Step { name: "collapse_blank_before_fence_close", apply: collapse_blank_before_fence_close },
    Step { name: "normalize_comma_before_code", apply: normalize_comma_before_code },
];

/// Run all cleanup steps over a formatted text shape.
pub fn normalize(text: &str) -> String {
    STEPS.iter().fold(text.to_string(), |acc, step| {
        let next = (step.apply)(&acc);
        if next != acc {
            log::trace!("cleanup step {} rewrote text", step.name);
        }
        next
    })
}

/// Remove the blank lines between two consecutive code lines so they end up
/// in the same literal block.
pub fn join_code_lines(text: &str) -> String {
    CODE_LINE_GAP_REGEX.replace_all(text, "`\n`").into_owned()
}

/// Drop leading spaces in front of a line that starts with a code span.
pub fn strip_indent_before_code(text: &str) -> String {
    INDENTED_CODE_REGEX.replace_all(text, "`").into_owned()
}

/// Turn every line that is wrapped in markers into a literal block holding
/// the unwrapped text. All other lines are trimmed.
pub fn fence_code_lines(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);

    for line in text.lines() {
        if is_code_line(line) {
            out.push_str(FENCE);
            out.push('\n');
            out.push_str(&line[MONOSPACE_MARKER.len()..line.len() - MONOSPACE_MARKER.len()]);
            out.push('\n');
            out.push_str(FENCE);
            out.push('\n');
        } else {
            out.push_str(line.trim());
            out.push('\n');
        }
    }

    out
}

fn is_code_line(line: &str) -> bool {
    line.len() > MONOSPACE_MARKER.len()
        && line.starts_with(MONOSPACE_MARKER)
        && line.ends_with(MONOSPACE_MARKER)
}

/// Join a block that is closed and immediately reopened.
pub fn merge_adjacent_fences(text: &str) -> String {
    text.replace(&format!("{FENCE}\n{FENCE}\n"), "")
}

pub fn strip_tabs(text: &str) -> String {
    text.replace('\t', "")
}

/// Remove blank lines directly in front of a closing fence.
pub fn collapse_blank_before_fence_close(text: &str) -> String {
    let mut out: Vec<&str> = Vec::new();
    let mut inside = false;

    for line in text.split('\n') {
        if line == FENCE {
            if inside {
                while out.last().is_some_and(|l| l.trim().is_empty()) {
                    out.pop();
                }
            }
            inside = !inside;
        }
        out.push(line);
    }

    out.join("\n")
}

/// `,   `x`` and `,` x`` both become `, `x``.
///
/// The second form appears when the blank after a comma ended up in the
/// following code run.
pub fn normalize_comma_before_code(text: &str) -> String {
    let text = COMMA_BEFORE_CODE_REGEX.replace_all(text, ", `");
    COMMA_INTO_CODE_REGEX.replace_all(&text, ", `").into_owned()
}
