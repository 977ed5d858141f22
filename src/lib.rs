//! # pdf-reorder
//!
//! Find the summary page of a PDF by its text and move it to the front, or
//! put the pages in any order you type.
//!
//! ## Why this crate?
//!
//! Billing reports and similar generated documents often put the one page a
//! reader actually wants ("Unit Summary") somewhere in the middle. This crate
//! locates that page by a case-insensitive phrase search over each page's
//! text layer and rebuilds the document with the page first. Pages are
//! copied with pdfium's page import, so fonts, images and vector content
//! come across untouched.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF bytes
//!  │
//!  ├─ 1. Scan      first page whose text contains a marker phrase
//!  ├─ 2. Order     validate a permutation (or build "move to front")
//!  ├─ 3. Rebuild   copy pages into a new document in that order
//!  └─ 4. Preview   optional PNG thumbnails at a target width
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf_reorder::{summary_first, ReorderConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ReorderConfig::default();
//!     let bytes = std::fs::read("billing.pdf")?;
//!     let output = summary_first(&bytes, &config)?;
//!     eprintln!("new order: {:?}", output.order_one_based());
//!     output.write_to("billing_reordered.pdf")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdf-reorder` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! ## PDFium
//!
//! All document work goes through [pdfium-render](https://docs.rs/pdfium-render).
//! The library never downloads anything; it binds `PDFIUM_LIB_PATH`, the
//! pdfium-auto cache, or the system library. The CLI downloads the library
//! into the cache on first run.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod engine;
pub mod error;
pub mod order;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod reorder;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ReorderConfig, ReorderConfigBuilder, DEFAULT_MARKERS};
pub use error::ReorderError;
pub use order::{default_order_text, parse_order, validate_permutation, Permutation};
pub use output::{download_filename, DocumentMetadata, PageSize, ReorderOutput, Thumbnail};
pub use progress::{NoopProgressCallback, ProgressCallback, ReorderProgressCallback};
pub use reorder::{
    apply_order, apply_order_async, find_marker_page, inspect, move_to_front, page_count,
    page_texts, page_to_front, preview, render_thumbnail, render_thumbnails, reorder,
    summary_first, summary_first_async,
};
