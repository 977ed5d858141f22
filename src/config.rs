//! Configuration for reordering, scanning and thumbnail rendering.
//!
//! Every knob lives in [`ReorderConfig`], built via its
//! [`ReorderConfigBuilder`]. The config carries no document state: the same
//! value can be reused for any number of independent operations.

use crate::error::ReorderError;
use crate::progress::ProgressCallback;
use std::fmt;
use std::path::PathBuf;

/// Marker phrases used when the caller does not supply any.
pub const DEFAULT_MARKERS: &[&str] = &["unit summary", "summary"];

/// Configuration shared by all library operations.
///
/// # Example
/// ```rust
/// use pdf_reorder::ReorderConfig;
///
/// let config = ReorderConfig::builder()
///     .markers(["executive summary"])
///     .thumbnail_width(120)
///     .build()
///     .unwrap();
/// assert_eq!(config.markers, vec!["executive summary".to_string()]);
/// ```
#[derive(Clone)]
pub struct ReorderConfig {
    /// Case-insensitive phrases that identify the summary page.
    /// Default: `["unit summary", "summary"]`.
    pub markers: Vec<String>,

    /// Width in pixels of source-page thumbnails. Default: 150.
    pub thumbnail_width: u32,

    /// Width in pixels of the preview thumbnails of a reordered output. Default: 200.
    pub preview_width: u32,

    /// How many leading pages of a reordered output [`crate::preview`] renders. Default: 3.
    pub preview_pages: usize,

    /// PDF user password for encrypted documents.
    pub password: Option<String>,

    /// Explicit path to libpdfium. If None, `PDFIUM_LIB_PATH`, the
    /// pdfium-auto cache and the system library are tried in that order.
    pub pdfium_library: Option<PathBuf>,

    /// Receives per-page events while a document is reassembled.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ReorderConfig {
    fn default() -> Self {
        Self {
            markers: DEFAULT_MARKERS.iter().map(|m| m.to_string()).collect(),
            thumbnail_width: 150,
            preview_width: 200,
            preview_pages: 3,
            password: None,
            pdfium_library: None,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ReorderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReorderConfig")
            .field("markers", &self.markers)
            .field("thumbnail_width", &self.thumbnail_width)
            .field("preview_width", &self.preview_width)
            .field("preview_pages", &self.preview_pages)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("pdfium_library", &self.pdfium_library)
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn ReorderProgressCallback>"),
            )
            .finish()
    }
}

impl ReorderConfig {
    /// Create a new builder for `ReorderConfig`.
    pub fn builder() -> ReorderConfigBuilder {
        ReorderConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ReorderConfig`].
#[derive(Debug)]
pub struct ReorderConfigBuilder {
    config: ReorderConfig,
}

impl ReorderConfigBuilder {
    /// Replace the marker phrases. Phrases are stored lowercased and trimmed.
    pub fn markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.config.markers = markers
            .into_iter()
            .map(|m| m.as_ref().trim().to_lowercase())
            .collect();
        self
    }

    pub fn thumbnail_width(mut self, px: u32) -> Self {
        self.config.thumbnail_width = px;
        self
    }

    pub fn preview_width(mut self, px: u32) -> Self {
        self.config.preview_width = px;
        self
    }

    pub fn preview_pages(mut self, n: usize) -> Self {
        self.config.preview_pages = n;
        self
    }

    pub fn password(mut self, pwd: impl Into<String>) -> Self {
        self.config.password = Some(pwd.into());
        self
    }

    pub fn pdfium_library(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.pdfium_library = Some(path.into());
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ReorderConfig, ReorderError> {
        let c = &self.config;
        if c.markers.iter().all(|m| m.is_empty()) {
            return Err(ReorderError::InvalidConfig(
                "at least one non-empty marker phrase is required".into(),
            ));
        }
        if c.thumbnail_width == 0 || c.preview_width == 0 {
            return Err(ReorderError::InvalidConfig(
                "thumbnail widths must be ≥ 1 px".into(),
            ));
        }
        Ok(self.config)
    }
}
