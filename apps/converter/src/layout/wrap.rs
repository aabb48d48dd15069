//! Paragraph splitting and greedy word wrap.
//!
//! # Whitespace rule
//! A word is a maximal run of non-whitespace characters. Words placed on the
//! same line are joined by exactly one space, and only those inter-word spaces
//! count toward the line width; leading, trailing and repeated whitespace is
//! dropped. A line breaks only between words, and only when appending the next
//! word (plus its separating space) would push the width strictly past
//! `max_width`. A single word wider than `max_width` is placed alone on its
//! line, unsplit.

use crate::layout::font_metrics::{units_to_pt, FontMetricTable, PageConfig};

/// One entry of the flat line sequence produced from the input text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutLine {
    /// A wrapped run of words.
    Text(String),
    /// An empty paragraph, kept as a one-line gap.
    Blank,
}

impl LayoutLine {
    /// The characters drawn for this line (empty for a blank marker).
    pub fn as_str(&self) -> &str {
        match self {
            LayoutLine::Text(text) => text,
            LayoutLine::Blank => "",
        }
    }
}

/// Splits `text` into newline-terminated paragraphs.
///
/// `"\n\n"` yields two empty paragraphs, `""` yields none and a final newline
/// closes the last paragraph instead of opening a new one.
pub fn split_paragraphs(text: &str) -> impl Iterator<Item = &str> {
    text.split_terminator('\n')
}

/// Greedy word wrap of a single paragraph. Returns an empty vector when the
/// paragraph holds no words.
pub fn wrap_paragraph(
    paragraph: &str,
    metrics: &FontMetricTable,
    config: &PageConfig,
) -> Vec<String> {
    let max_width = config.max_width();
    let size = config.font_size_pt;
    // Widths are accumulated in integer AFM units so the break decision matches
    // `measure_str` on the finished line exactly.
    let space_units = metrics.measure_units(" ");

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_units = 0u64;

    for word in paragraph.split_whitespace() {
        let word_units = metrics.measure_units(word);

        if current.is_empty() {
            current.push_str(word);
            current_units = word_units;
        } else if units_to_pt(current_units + space_units + word_units, size) > max_width {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_units = word_units;
        } else {
            current.push(' ');
            current.push_str(word);
            current_units += space_units + word_units;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Turns the whole input into the flat line sequence, paragraph by paragraph.
pub fn wrap_text(text: &str, metrics: &FontMetricTable, config: &PageConfig) -> Vec<LayoutLine> {
    let mut lines = Vec::new();
    for paragraph in split_paragraphs(text) {
        let wrapped = wrap_paragraph(paragraph, metrics, config);
        if wrapped.is_empty() {
            lines.push(LayoutLine::Blank);
        } else {
            lines.extend(wrapped.into_iter().map(LayoutLine::Text));
        }
    }
    lines
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
