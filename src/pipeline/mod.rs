//! Pipeline stages behind the public operations.
//!
//! Each submodule does one thing against an already-open pdfium document
//! (or, for `input` and `encode`, no document at all). Opening and closing
//! documents is [`crate::engine`]'s job, so every stage here can assume a
//! valid handle and never owns one.
//!
//! ```text
//! input ──▶ scan ──▶ (order) ──▶ reassemble ──▶ render ──▶ encode
//! (file)   (text)   (validate)   (page import)  (bitmap)   (PNG)
//! ```
//!
//! 1. [`input`]      — read a PDF from disk, checking the magic bytes
//! 2. [`scan`]       — per-page text extraction and marker search
//! 3. [`reassemble`] — copy pages into a new document in a given order
//! 4. [`render`]     — rasterise a page at a target width; document metadata
//! 5. [`encode`]     — PNG-encode rendered bitmaps

pub mod encode;
pub mod input;
pub mod reassemble;
pub mod render;
pub mod scan;
