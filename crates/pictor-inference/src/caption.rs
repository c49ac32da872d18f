//! Captioning prompt and model-output parsing.
//!
//! The model is asked for a fixed three-line reply; the parser turns that
//! free-text reply back into a structured [`ImageAnalysis`]. Parsing is
//! best-effort and never fails: garbage input yields a (possibly empty)
//! result, never an error.

use pictor_core::defaults::{REQUESTED_COLOR_COUNT, REQUESTED_TAG_COUNT};
use pictor_core::ImageAnalysis;

/// Generates the fixed instruction prompt sent with every image.
pub fn caption_prompt() -> String {
    format!(
        "Describe this image in one sentence.\n\
         Tags: comma-separated list of {} tags.\n\
         Colors: comma-separated list of {} hex colors.",
        REQUESTED_TAG_COUNT, REQUESTED_COLOR_COUNT
    )
}

/// Parses one blob of model output into `{description, tags, colors}`.
///
/// Grammar, in precedence order:
/// - The first non-empty line is the description, unconditionally, even
///   when it carries a `tags`/`colors` prefix.
/// - Among subsequent lines, a line whose case-insensitive content starts
///   with `tags` and carries a colon is split on the first colon; the
///   remainder splits on commas into entries, trimmed, empties dropped.
/// - Analogous handling for a line starting with `colors`.
/// - A later recognized line replaces an earlier one of the same kind.
/// - Everything else is ignored.
///
/// No validation that colors are well-formed hex codes, no deduplication,
/// no cardinality enforcement.
pub fn parse_caption(text: &str) -> ImageAnalysis {
    let mut analysis = ImageAnalysis::default();
    let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());

    let Some(first) = lines.next() else {
        return analysis;
    };
    analysis.description = first.to_string();

    for line in lines {
        let lower = line.to_lowercase();
        if lower.starts_with("tags") {
            if let Some((_, rest)) = line.split_once(':') {
                analysis.tags = split_entries(rest);
            }
        } else if lower.starts_with("colors") {
            if let Some((_, rest)) = line.split_once(':') {
                analysis.colors = split_entries(rest);
            }
        }
    }

    analysis
}

fn split_entries(rest: &str) -> Vec<String> {
    rest.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(String::from)
        .collect()
}
