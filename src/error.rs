//! Error type for the pdf-reorder library.
//!
//! Every operation fails fast with one specific [`ReorderError`] variant.
//! Nothing is retried internally: the inputs are user documents and user
//! text, and retrying a malformed input can only fail the same way again.
//!
//! Variants split into two groups:
//!
//! * **Recoverable** — the user typed something wrong (an order list with a
//!   duplicate, a page number past the end) or the document has no summary
//!   page. A caller should re-prompt. See [`ReorderError::is_recoverable`].
//! * **Fatal** — the bytes are not a PDF, the engine is missing, the output
//!   cannot be written.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the pdf-reorder library.
#[derive(Debug, Error)]
pub enum ReorderError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// Any other I/O failure while reading the input (a directory, a device error).
    #[error("Failed to read '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists and was read, but does not start with `%PDF`.
    #[error("File is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    // ── Document errors ───────────────────────────────────────────────────
    /// The byte buffer could not be parsed as a PDF document.
    #[error("Could not decode PDF document: {detail}")]
    DocumentDecode { detail: String },

    /// PDF requires a password but none was provided.
    #[error("PDF is encrypted and requires a password.\nProvide it with --password <PASSWORD>.")]
    PasswordRequired,

    /// A password was provided but it is wrong.
    #[error("Wrong password for encrypted PDF")]
    WrongPassword,

    /// A page index falls outside `[0, page_count)`.
    #[error("Page index {index} is out of range (document has {page_count} pages)")]
    PageIndexOutOfRange { index: usize, page_count: usize },

    // ── Order errors ──────────────────────────────────────────────────────
    /// A token of a manual page order is not an integer.
    #[error("Invalid page number '{token}': use comma-separated numbers (e.g. 3,1,2,4)")]
    Parse { token: String },

    /// The order lists a different number of pages than the document has.
    #[error("Must specify exactly {expected} page numbers (got {actual})")]
    WrongLength { expected: usize, actual: usize },

    /// The order is not a bijection over the document's pages.
    #[error("Invalid page order: {detail}")]
    InvalidPermutation { detail: String },

    /// No page contains any of the marker phrases.
    #[error("No page mentions any of {markers:?}\nSpecify the page order by hand with --order.")]
    MarkerNotFound { markers: Vec<String> },

    // ── Engine errors ─────────────────────────────────────────────────────
    /// pdfium returned an error while rasterising a page.
    #[error("Rendering failed for page {page}: {detail}")]
    RenderFailed { page: usize, detail: String },

    /// pdfium could not build or serialise the output document.
    #[error("Failed to write reordered PDF: {detail}")]
    SaveFailed { detail: String },

    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\n\
PDFium is normally downloaded automatically on first run of the CLI.\n\
If that failed, you can:\n\
  • Check your internet connection and try again.\n\
  • Set PDFIUM_LIB_PATH=/path/to/libpdfium to use an existing copy.\n"
    )]
    PdfiumBindingFailed(String),

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write an output file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder or argument validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ReorderError {
    /// `true` for errors caused by user input that a caller should answer by
    /// asking again rather than aborting.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ReorderError::Parse { .. }
                | ReorderError::WrongLength { .. }
                | ReorderError::InvalidPermutation { .. }
                | ReorderError::PageIndexOutOfRange { .. }
                | ReorderError::MarkerNotFound { .. }
        )
    }
}
