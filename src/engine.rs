//! pdfium binding and scoped document access.
//!
//! Every library operation goes through [`with_document`]: bind a fresh
//! [`Pdfium`] instance, decode the caller's bytes into a [`PdfDocument`], run
//! the operation, and let both drop when the closure returns. pdfium closes
//! the document and unloads its state in `Drop`, so the handle is released
//! on the error path exactly as on the success path, and no handle ever
//! outlives the operation that opened it.

use crate::config::ReorderConfig;
use crate::error::ReorderError;
use pdfium_render::prelude::*;
use std::path::Path;
use tracing::debug;

/// Bind pdfium from an explicit path, `PDFIUM_LIB_PATH`, the download cache,
/// or the system library. Never downloads.
pub fn bind(library: Option<&Path>) -> Result<Pdfium, ReorderError> {
    pdfium_auto::bind_pdfium(library).map_err(|e| ReorderError::PdfiumBindingFailed(e.to_string()))
}

/// `true` when a pdfium library can be bound with the given override.
pub fn is_available(library: Option<&Path>) -> bool {
    bind(library).is_ok()
}

/// Decode `bytes` into a document borrowed from `pdfium`.
pub fn open_document<'a>(
    pdfium: &'a Pdfium,
    bytes: &'a [u8],
    password: Option<&'a str>,
) -> Result<PdfDocument<'a>, ReorderError> {
    pdfium
        .load_pdf_from_byte_slice(bytes, password)
        .map_err(|e| map_load_error(e, password))
}

/// Classify a document load failure. pdfium reports a missing and a wrong
/// password the same way; whether one was supplied tells them apart.
pub fn map_load_error(error: PdfiumError, password: Option<&str>) -> ReorderError {
    match error {
        PdfiumError::PdfiumLibraryInternalError(PdfiumInternalError::PasswordError) => {
            if password.is_some() {
                ReorderError::WrongPassword
            } else {
                ReorderError::PasswordRequired
            }
        }
        other => ReorderError::DocumentDecode {
            detail: format!("{:?}", other),
        },
    }
}

/// Run `f` against a freshly decoded document.
///
/// The binding and the document are local to this call; nothing is cached
/// between calls.
pub fn with_document<R, F>(pdf: &[u8], config: &ReorderConfig, f: F) -> Result<R, ReorderError>
where
    F: FnOnce(&Pdfium, &PdfDocument<'_>) -> Result<R, ReorderError>,
{
    let pdfium = bind(config.pdfium_library.as_deref())?;
    let document = open_document(&pdfium, pdf, config.password.as_deref())?;
    debug!("Opened PDF: {} bytes, {} pages", pdf.len(), page_count(&document));
    f(&pdfium, &document)
}

/// Number of pages in an open document.
pub fn page_count(document: &PdfDocument<'_>) -> usize {
    document.pages().len() as usize
}

/// Check `index` against `page_count` and convert it to pdfium's index type.
pub fn page_index(index: usize, page_count: usize) -> Result<PdfPageIndex, ReorderError> {
    if index >= page_count {
        return Err(ReorderError::PageIndexOutOfRange { index, page_count });
    }
    PdfPageIndex::try_from(index).map_err(|_| ReorderError::PageIndexOutOfRange { index, page_count })
}
