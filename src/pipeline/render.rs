//! Page rasterisation and document metadata via pdfium.
//!
//! Thumbnails are sized by width only: the scale factor is
//! `target_width / page_native_width` and the height follows from the page's
//! aspect ratio, so portrait and landscape pages sit side by side in a grid
//! of equal-width cells.

use crate::engine;
use crate::error::ReorderError;
use crate::output::{DocumentMetadata, PageSize, Thumbnail};
use crate::pipeline::encode;
use pdfium_render::prelude::*;
use tracing::debug;

/// Render page `index` of `document` at `target_width` pixels as PNG.
pub fn render_page(
    document: &PdfDocument<'_>,
    index: usize,
    target_width: u32,
) -> Result<Thumbnail, ReorderError> {
    let width_px = pixel_width(target_width)?;
    let page_index = engine::page_index(index, engine::page_count(document))?;

    let page = document
        .pages()
        .get(page_index)
        .map_err(|e| ReorderError::RenderFailed {
            page: index + 1,
            detail: format!("{:?}", e),
        })?;

    let native_width = page.width().value;
    if !(native_width > 0.0) {
        return Err(ReorderError::RenderFailed {
            page: index + 1,
            detail: format!("page has no usable width ({native_width}pt)"),
        });
    }
    let scale = target_width as f32 / native_width;

    let render_config = PdfRenderConfig::new().set_target_width(width_px);
    let bitmap = page
        .render_with_config(&render_config)
        .map_err(|e| ReorderError::RenderFailed {
            page: index + 1,
            detail: format!("{:?}", e),
        })?;

    let image = bitmap.as_image();
    let png = encode::encode_png(&image).map_err(|e| ReorderError::RenderFailed {
        page: index + 1,
        detail: format!("PNG encoding failed: {e}"),
    })?;

    debug!(
        "Rendered page {} at scale {:.3} → {}x{} px",
        index + 1,
        scale,
        image.width(),
        image.height()
    );

    Ok(Thumbnail {
        page_index: index,
        width: image.width(),
        height: image.height(),
        scale,
        png,
    })
}

/// `target_width` as pdfium's signed pixel width; zero and widths past
/// `i32::MAX` are rejected.
fn pixel_width(target_width: u32) -> Result<i32, ReorderError> {
    if target_width == 0 {
        return Err(ReorderError::InvalidConfig(
            "thumbnail width must be ≥ 1 px".into(),
        ));
    }
    i32::try_from(target_width).map_err(|_| {
        ReorderError::InvalidConfig(format!("thumbnail width {target_width} px is too large"))
    })
}

/// Render several pages of one document. Fails on the first bad index.
pub fn render_pages(
    document: &PdfDocument<'_>,
    indices: &[usize],
    target_width: u32,
) -> Result<Vec<Thumbnail>, ReorderError> {
    indices
        .iter()
        .map(|&i| render_page(document, i, target_width))
        .collect()
}

/// Read document metadata and page sizes.
pub fn extract_metadata(document: &PdfDocument<'_>) -> DocumentMetadata {
    let metadata = document.metadata();
    let pages = document.pages();

    let get_meta = |tag: PdfDocumentMetadataTagType| -> Option<String> {
        metadata
            .get(tag)
            .map(|t| t.value().to_string())
            .filter(|v| !v.is_empty())
    };

    let page_sizes = pages
        .iter()
        .map(|p| PageSize {
            width: p.width().value,
            height: p.height().value,
        })
        .collect();

    DocumentMetadata {
        title: get_meta(PdfDocumentMetadataTagType::Title),
        author: get_meta(PdfDocumentMetadataTagType::Author),
        subject: get_meta(PdfDocumentMetadataTagType::Subject),
        creator: get_meta(PdfDocumentMetadataTagType::Creator),
        producer: get_meta(PdfDocumentMetadataTagType::Producer),
        creation_date: get_meta(PdfDocumentMetadataTagType::CreationDate),
        modification_date: get_meta(PdfDocumentMetadataTagType::ModificationDate),
        page_count: pages.len() as usize,
        pdf_version: format!("{:?}", document.version()),
        page_sizes,
    }
}
