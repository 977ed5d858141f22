//! Public operations.
//!
//! Every function here takes the PDF as a byte slice, opens it through
//! [`engine::with_document`] for the duration of the call, and returns owned
//! results. Calls are independent: two calls never share a pdfium handle,
//! and the input bytes are never modified.
//!
//! The four building blocks are [`find_marker_page`],
//! [`crate::validate_permutation`], [`reorder`] and [`render_thumbnail`].
//! [`summary_first`] and [`apply_order`] combine them into the two
//! user-facing flows and return a [`ReorderOutput`].

use crate::config::ReorderConfig;
use crate::engine;
use crate::error::ReorderError;
use crate::order::{self, Permutation};
use crate::output::{DocumentMetadata, ReorderOutput, Thumbnail};
use crate::pipeline::{reassemble, render, scan};
use std::time::Instant;
use tracing::{info, warn};

/// Number of pages in `pdf`.
pub fn page_count(pdf: &[u8], config: &ReorderConfig) -> Result<usize, ReorderError> {
    engine::with_document(pdf, config, |_, doc| Ok(engine::page_count(doc)))
}

/// Document metadata and page sizes.
pub fn inspect(pdf: &[u8], config: &ReorderConfig) -> Result<DocumentMetadata, ReorderError> {
    engine::with_document(pdf, config, |_, doc| Ok(render::extract_metadata(doc)))
}

/// Plain text of every page, in page order.
pub fn page_texts(pdf: &[u8], config: &ReorderConfig) -> Result<Vec<String>, ReorderError> {
    engine::with_document(pdf, config, |_, doc| Ok(scan::document_text(doc)))
}

/// Index of the first page whose text contains any of `markers`,
/// case-insensitively, or `None`.
///
/// Blank markers are ignored; with no usable marker nothing matches.
pub fn find_marker_page<S: AsRef<str>>(
    pdf: &[u8],
    markers: &[S],
    config: &ReorderConfig,
) -> Result<Option<usize>, ReorderError> {
    let markers = scan::normalize_markers(markers);
    engine::with_document(pdf, config, |_, doc| {
        Ok(scan::find_in_document(doc, &markers))
    })
}

/// Build a new PDF whose page `k` is source page `order[k]` (0-based).
///
/// `order` is re-validated against the document: an entry past the last page
/// is [`ReorderError::PageIndexOutOfRange`], any other non-bijection is
/// [`ReorderError::InvalidPermutation`].
pub fn reorder(pdf: &[u8], order: &[usize], config: &ReorderConfig) -> Result<Vec<u8>, ReorderError> {
    engine::with_document(pdf, config, |pdfium, doc| {
        let permutation = Permutation::from_indices(order.to_vec(), engine::page_count(doc))?;
        reassemble::reassemble(pdfium, doc, &permutation, config.progress_callback.as_ref())
    })
}

/// Move page `index` (0-based) to the front, keeping the others in order.
pub fn move_to_front(pdf: &[u8], index: usize, config: &ReorderConfig) -> Result<Vec<u8>, ReorderError> {
    engine::with_document(pdf, config, |pdfium, doc| {
        let permutation = Permutation::move_to_front(engine::page_count(doc), index)?;
        reassemble::reassemble(pdfium, doc, &permutation, config.progress_callback.as_ref())
    })
}

/// Render page `index` at `target_width` pixels; returns PNG bytes.
pub fn render_thumbnail(
    pdf: &[u8],
    index: usize,
    target_width: u32,
    config: &ReorderConfig,
) -> Result<Vec<u8>, ReorderError> {
    engine::with_document(pdf, config, |_, doc| {
        render::render_page(doc, index, target_width).map(|t| t.png)
    })
}

/// Render several pages from one decoded document.
pub fn render_thumbnails(
    pdf: &[u8],
    indices: &[usize],
    target_width: u32,
    config: &ReorderConfig,
) -> Result<Vec<Thumbnail>, ReorderError> {
    engine::with_document(pdf, config, |_, doc| {
        render::render_pages(doc, indices, target_width)
    })
}

/// Find the summary page with `config.markers` and move it to the front.
///
/// # Errors
/// [`ReorderError::MarkerNotFound`] when no page matches; the caller should
/// fall back to a manual order.
pub fn summary_first(pdf: &[u8], config: &ReorderConfig) -> Result<ReorderOutput, ReorderError> {
    let start = Instant::now();
    let markers = scan::normalize_markers(&config.markers);

    let (permutation, found, bytes) = engine::with_document(pdf, config, |pdfium, doc| {
        let total = engine::page_count(doc);
        info!("Scanning {} pages for {:?}", total, markers);

        let found = scan::find_in_document(doc, &markers).ok_or_else(|| {
            warn!("No summary page found");
            ReorderError::MarkerNotFound {
                markers: markers.clone(),
            }
        })?;
        info!("Found summary on page {}", found + 1);

        let permutation = Permutation::move_to_front(total, found)?;
        let bytes =
            reassemble::reassemble(pdfium, doc, &permutation, config.progress_callback.as_ref())?;
        Ok((permutation, found, bytes))
    })?;

    Ok(ReorderOutput {
        page_count: permutation.len(),
        order: permutation.into_inner(),
        pdf: bytes,
        marker_page: Some(found),
        source_bytes: pdf.len(),
        duration_ms: start.elapsed().as_millis() as u64,
    })
}

/// Move a page chosen by the caller to the front.
pub fn page_to_front(
    pdf: &[u8],
    index: usize,
    config: &ReorderConfig,
) -> Result<ReorderOutput, ReorderError> {
    let start = Instant::now();

    let (permutation, bytes) = engine::with_document(pdf, config, |pdfium, doc| {
        let permutation = Permutation::move_to_front(engine::page_count(doc), index)?;
        let bytes =
            reassemble::reassemble(pdfium, doc, &permutation, config.progress_callback.as_ref())?;
        Ok((permutation, bytes))
    })?;

    Ok(ReorderOutput {
        page_count: permutation.len(),
        order: permutation.into_inner(),
        pdf: bytes,
        marker_page: None,
        source_bytes: pdf.len(),
        duration_ms: start.elapsed().as_millis() as u64,
    })
}

/// Reorder by a manual order typed by the user, e.g. `"3,1,2,4"`.
pub fn apply_order(
    pdf: &[u8],
    order_text: &str,
    config: &ReorderConfig,
) -> Result<ReorderOutput, ReorderError> {
    let start = Instant::now();

    let (permutation, bytes) = engine::with_document(pdf, config, |pdfium, doc| {
        let permutation = order::parse_order(order_text, engine::page_count(doc))?;
        let bytes =
            reassemble::reassemble(pdfium, doc, &permutation, config.progress_callback.as_ref())?;
        Ok((permutation, bytes))
    })?;
    info!("Pages reordered: {:?}", permutation.to_one_based());

    Ok(ReorderOutput {
        page_count: permutation.len(),
        order: permutation.into_inner(),
        pdf: bytes,
        marker_page: None,
        source_bytes: pdf.len(),
        duration_ms: start.elapsed().as_millis() as u64,
    })
}

/// Thumbnails of the first `config.preview_pages` pages of a reordered output.
pub fn preview(output: &ReorderOutput, config: &ReorderConfig) -> Result<Vec<Thumbnail>, ReorderError> {
    let n = config.preview_pages.min(output.page_count);
    let indices: Vec<usize> = (0..n).collect();
    render_thumbnails(&output.pdf, &indices, config.preview_width, config)
}

/// [`summary_first`] on tokio's blocking pool.
pub async fn summary_first_async(
    pdf: Vec<u8>,
    config: ReorderConfig,
) -> Result<ReorderOutput, ReorderError> {
    tokio::task::spawn_blocking(move || summary_first(&pdf, &config))
        .await
        .map_err(|e| ReorderError::Internal(format!("Reorder task panicked: {}", e)))?
}

/// [`apply_order`] on tokio's blocking pool.
pub async fn apply_order_async(
    pdf: Vec<u8>,
    order_text: String,
    config: ReorderConfig,
) -> Result<ReorderOutput, ReorderError> {
    tokio::task::spawn_blocking(move || apply_order(&pdf, &order_text, &config))
        .await
        .map_err(|e| ReorderError::Internal(format!("Reorder task panicked: {}", e)))?
}
