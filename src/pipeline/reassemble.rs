//! Page reassembly: build a new document from an ordering of source pages.
//!
//! pdfium's page import copies a page together with everything it
//! references (content streams, fonts, images, XObjects) into the
//! destination document, so the output page renders identically to the
//! source page. The source document is only read.

use crate::engine;
use crate::error::ReorderError;
use crate::order::Permutation;
use crate::progress::ProgressCallback;
use pdfium_render::prelude::*;
use tracing::{debug, info};

/// Copy `source` pages into a fresh document in `order` and serialise it.
///
/// `order` must have been validated against `source`'s page count; a
/// permutation built for a different document is rejected.
pub fn reassemble(
    pdfium: &Pdfium,
    source: &PdfDocument<'_>,
    order: &Permutation,
    progress: Option<&ProgressCallback>,
) -> Result<Vec<u8>, ReorderError> {
    let total = engine::page_count(source);
    if order.len() != total {
        return Err(ReorderError::InvalidPermutation {
            detail: format!(
                "order has {} entries but the document has {} pages",
                order.len(),
                total
            ),
        });
    }

    if let Some(cb) = progress {
        cb.on_reorder_start(total);
    }

    let mut output = pdfium
        .create_new_pdf()
        .map_err(|e| ReorderError::SaveFailed {
            detail: format!("could not create output document: {:?}", e),
        })?;

    for (position, &source_index) in order.as_slice().iter().enumerate() {
        let from = engine::page_index(source_index, total)?;
        let to = engine::page_index(position, total)?;

        output
            .pages_mut()
            .copy_page_from_document(source, from, to)
            .map_err(|e| ReorderError::SaveFailed {
                detail: format!(
                    "copying page {} to position {} failed: {:?}",
                    source_index + 1,
                    position + 1,
                    e
                ),
            })?;
        debug!("Copied page {} → position {}", source_index + 1, position + 1);

        if let Some(cb) = progress {
            cb.on_page_copied(position, source_index, total);
        }
    }

    let bytes = output.save_to_bytes().map_err(|e| ReorderError::SaveFailed {
        detail: format!("{:?}", e),
    })?;
    info!("Reassembled {} pages → {} bytes", total, bytes.len());

    if let Some(cb) = progress {
        cb.on_reorder_complete(total, bytes.len());
    }

    Ok(bytes)
}
