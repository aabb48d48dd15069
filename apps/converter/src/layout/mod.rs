// Text-to-PDF layout: paragraph split, greedy word wrap, pagination, rendering.
// Pure and CPU-bound; async callers run it inside tokio::task::spawn_blocking.

pub mod font_metrics;
pub mod paginate;
pub mod render;
pub mod wrap;

pub use font_metrics::{helvetica, PageConfig};
pub use paginate::{pagination_stats, Page, PaginationStats, PlacedLine};
pub use render::RenderError;
pub use wrap::LayoutLine;

/// Lays `text` out onto pages. Always returns at least one page; every
/// paragraph contributes at least one line or blank marker.
pub fn layout(text: &str, config: &PageConfig) -> Vec<Page> {
    let lines = wrap::wrap_text(text, helvetica(), config);
    paginate::paginate(lines, config)
}

/// Lays out `text` and serializes the pages as a PDF document.
pub fn text_to_pdf(
    text: &str,
    config: &PageConfig,
) -> Result<(Vec<u8>, PaginationStats), RenderError> {
    let pages = layout(text, config);
    let stats = pagination_stats(&pages);
    let bytes = render::render(&pages, helvetica(), config)?;
    Ok((bytes, stats))
}
