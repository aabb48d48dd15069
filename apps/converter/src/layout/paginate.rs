//! Vertical placement of the flat line sequence onto fixed-size pages.

use serde::Serialize;

use crate::layout::font_metrics::PageConfig;
use crate::layout::wrap::LayoutLine;

/// A line with its baseline position on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub line: LayoutLine,
    /// Baseline y coordinate in points, measured from the bottom edge.
    pub y: f32,
}

/// One output page. The last page of a document may be partially filled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub lines: Vec<PlacedLine>,
}

impl Page {
    /// Drawn text of every line on the page, blank markers as empty strings.
    pub fn texts(&self) -> Vec<&str> {
        self.lines.iter().map(|placed| placed.line.as_str()).collect()
    }
}

/// Summary of a pagination run, logged by the transfer wrapper.
#[derive(Debug, Clone, Serialize)]
pub struct PaginationStats {
    pub pages: usize,
    pub lines: usize,
    pub blank_lines: usize,
}

/// Places lines top to bottom starting at `page_height - margin`.
///
/// A line whose baseline would fall below `margin` closes the current page and
/// becomes the first line of a fresh one. Always returns at least one page.
pub fn paginate(lines: Vec<LayoutLine>, config: &PageConfig) -> Vec<Page> {
    let top = config.top_baseline();
    let mut pages = Vec::new();
    let mut current = Page::default();
    let mut y = top;

    for line in lines {
        if y < config.margin_pt {
            pages.push(std::mem::take(&mut current));
            y = top;
        }
        current.lines.push(PlacedLine { line, y });
        y -= config.line_height_pt;
    }
    pages.push(current);
    pages
}

/// Counts pages, lines and blank markers.
pub fn pagination_stats(pages: &[Page]) -> PaginationStats {
    let lines = pages.iter().map(|p| p.lines.len()).sum();
    let blank_lines = pages
        .iter()
        .flat_map(|p| &p.lines)
        .filter(|placed| placed.line == LayoutLine::Blank)
        .count();
    PaginationStats {
        pages: pages.len(),
        lines,
        blank_lines,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(count: usize) -> Vec<LayoutLine> {
        (0..count).map(|i| LayoutLine::Text(format!("line {i}"))).collect()
    }

    #[test]
    fn test_no_lines_yields_one_empty_page() {
        let pages = paginate(Vec::new(), &PageConfig::letter());
        assert_eq!(pages.len(), 1);
        assert!(pages[0].lines.is_empty());
    }

    #[test]
    fn test_letter_page_holds_fifty_lines() {
        // Baselines 742, 728, ..., 56: 50 lines before the cursor drops below 50.
        let pages = paginate(numbered(50), &PageConfig::letter());
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].lines.first().map(|l| l.y), Some(742.0));
        assert_eq!(pages[0].lines.last().map(|l| l.y), Some(56.0));
    }

    #[test]
    fn test_overflow_line_opens_next_page() {
        let pages = paginate(numbered(120), &PageConfig::letter());
        let counts: Vec<usize> = pages.iter().map(|p| p.lines.len()).collect();
        assert_eq!(counts, vec![50, 50, 20]);
        assert_eq!(pages[1].lines[0].line, LayoutLine::Text("line 50".into()));
        assert_eq!(pages[1].lines[0].y, 742.0);
    }

    #[test]
    fn test_order_is_preserved_across_pages() {
        let input = numbered(75);
        let pages = paginate(input.clone(), &PageConfig::letter());
        let flattened: Vec<LayoutLine> = pages
            .into_iter()
            .flat_map(|p| p.lines.into_iter().map(|placed| placed.line))
            .collect();
        assert_eq!(flattened, input);
    }

    #[test]
    fn test_every_baseline_stays_inside_margins() {
        let config = PageConfig::letter();
        for page in paginate(numbered(333), &config) {
            for placed in &page.lines {
                assert!(placed.y >= config.margin_pt);
                assert!(placed.y <= config.top_baseline());
            }
        }
    }

    #[test]
    fn test_stats_count_blank_markers() {
        let mut lines = numbered(3);
        lines.insert(1, LayoutLine::Blank);
        let stats = pagination_stats(&paginate(lines, &PageConfig::letter()));
        assert_eq!(stats.pages, 1);
        assert_eq!(stats.lines, 4);
        assert_eq!(stats.blank_lines, 1);
    }
}
