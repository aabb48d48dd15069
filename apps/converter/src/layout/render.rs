//! PDF serialization of laid-out pages via `lopdf`.
//!
//! The document uses the standard Type1 `Helvetica` face (no embedding) with
//! WinAnsiEncoding. No creation timestamps are written, so the same pages
//! always serialize to the same bytes.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use thiserror::Error;

use crate::layout::font_metrics::{win_ansi_byte, FontMetricTable, PageConfig};
use crate::layout::paginate::Page;

const FONT_RESOURCE: &str = "F1";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to encode content stream: {0}")]
    Content(String),

    #[error("failed to serialize document: {0}")]
    Serialize(String),
}

/// Serializes `pages` into a complete PDF byte stream.
pub fn render(
    pages: &[Page],
    metrics: &FontMetricTable,
    config: &PageConfig,
) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::with_version("1.4");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => metrics.base_font,
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            FONT_RESOURCE => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in pages {
        let page_id = add_page(&mut doc, page, pages_id, resources_id, config)?;
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
        }),
    );

    let info_id = doc.add_object(dictionary! {
        "Producer" => Object::string_literal(concat!("pdf-converter ", env!("CARGO_PKG_VERSION"))),
    });
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    let mut output = Vec::new();
    doc.save_to(&mut output)
        .map_err(|e| RenderError::Serialize(e.to_string()))?;
    Ok(output)
}

fn add_page(
    doc: &mut Document,
    page: &Page,
    pages_id: ObjectId,
    resources_id: ObjectId,
    config: &PageConfig,
) -> Result<ObjectId, RenderError> {
    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new(
            "Tf",
            vec![FONT_RESOURCE.into(), Object::Real(config.font_size_pt)],
        ),
    ];
    for placed in &page.lines {
        operations.push(Operation::new(
            "Tm",
            vec![
                1.into(),
                0.into(),
                0.into(),
                1.into(),
                Object::Real(config.margin_pt),
                Object::Real(placed.y),
            ],
        ));
        operations.push(Operation::new(
            "Tj",
            vec![Object::String(
                encode_win_ansi(placed.line.as_str()),
                StringFormat::Literal,
            )],
        ));
    }
    operations.push(Operation::new("ET", vec![]));

    let content = Content { operations }
        .encode()
        .map_err(|e| RenderError::Content(e.to_string()))?;
    let content_id = doc.add_object(Stream::new(Dictionary::new(), content));

    Ok(doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
        "MediaBox" => vec![
            0.into(),
            0.into(),
            Object::Real(config.page_width_pt),
            Object::Real(config.page_height_pt),
        ],
    }))
}

/// Maps text onto WinAnsiEncoding bytes; unmappable characters become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
