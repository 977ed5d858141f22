//! Progress-callback trait for page reassembly.
//!
//! Inject an [`Arc<dyn ReorderProgressCallback>`] via
//! [`crate::config::ReorderConfigBuilder::progress_callback`] to receive an
//! event each time a page is copied into the output document. Large
//! documents take a noticeable moment to reassemble; the CLI uses these
//! events to drive its progress bar.
//!
//! # Example
//!
//! ```rust
//! use pdf_reorder::{ReorderConfig, ReorderProgressCallback};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct Counter(AtomicUsize);
//!
//! impl ReorderProgressCallback for Counter {
//!     fn on_page_copied(&self, _position: usize, _source_index: usize, _total: usize) {
//!         self.0.fetch_add(1, Ordering::SeqCst);
//!     }
//! }
//!
//! let config = ReorderConfig::builder()
//!     .progress_callback(Arc::new(Counter(AtomicUsize::new(0))))
//!     .build()
//!     .unwrap();
//! ```

use std::sync::Arc;

/// Receives reassembly events. All methods default to no-ops.
///
/// Implementations must be `Send + Sync` because the async wrappers run the
/// reassembly on tokio's blocking pool.
pub trait ReorderProgressCallback: Send + Sync {
    /// Called once before the first page is copied.
    fn on_reorder_start(&self, total_pages: usize) {
        let _ = total_pages;
    }

    /// Called after output page `position` (0-based) was copied from
    /// `source_index` (0-based).
    fn on_page_copied(&self, position: usize, source_index: usize, total_pages: usize) {
        let _ = (position, source_index, total_pages);
    }

    /// Called once after the output document was serialised.
    fn on_reorder_complete(&self, total_pages: usize, output_bytes: usize) {
        let _ = (total_pages, output_bytes);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ReorderProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ReorderConfig`].
pub type ProgressCallback = Arc<dyn ReorderProgressCallback>;
