//! Result types returned by the library.
//!
//! [`ReorderOutput`] is the response object of a reorder: the caller holds
//! it for as long as it needs the new document (to save it, preview it,
//! offer it for download) and drops it afterwards. The library keeps no
//! copy.

use crate::error::ReorderError;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

/// A reordered document and how it was produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderOutput {
    /// The new PDF. Not serialised; write it with [`ReorderOutput::write_to`].
    #[serde(skip)]
    pub pdf: Vec<u8>,
    /// Applied order, 0-based: output page `k` is source page `order[k]`.
    pub order: Vec<usize>,
    /// Page count of both the source and the output.
    pub page_count: usize,
    /// Page the marker phrases were found on, when the order came from a scan.
    pub marker_page: Option<usize>,
    /// Byte size of the source document.
    pub source_bytes: usize,
    /// Wall-clock time of the whole operation.
    pub duration_ms: u64,
}

impl ReorderOutput {
    /// The applied order as 1-based page numbers.
    pub fn order_one_based(&self) -> Vec<usize> {
        self.order.iter().map(|i| i + 1).collect()
    }

    /// `true` when no page moved.
    pub fn is_unchanged(&self) -> bool {
        self.order.iter().enumerate().all(|(k, &i)| k == i)
    }

    /// Write the PDF to `path` atomically (temp file in the same directory,
    /// then rename), so a crash never leaves a truncated PDF behind.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), ReorderError> {
        let path = path.as_ref();
        let write_err = |source: std::io::Error| ReorderError::OutputWriteFailed {
            path: path.to_path_buf(),
            source,
        };

        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).map_err(write_err)?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
        tmp.write_all(&self.pdf).map_err(write_err)?;
        tmp.persist(path).map_err(|e| write_err(e.error))?;
        Ok(())
    }
}

/// A rendered page preview.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thumbnail {
    /// 0-based page index within the rendered document.
    pub page_index: usize,
    pub width: u32,
    pub height: u32,
    /// `target_width / page_native_width`.
    pub scale: f32,
    #[serde(skip)]
    pub png: Vec<u8>,
}

/// Page dimensions in PDF points (1/72 inch).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

/// Document information read without modifying anything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    pub creation_date: Option<String>,
    pub modification_date: Option<String>,
    pub page_count: usize,
    pub pdf_version: String,
    pub page_sizes: Vec<PageSize>,
}

/// Name for a reordered download: `{base}_reordered_{YYYYMMDD_HHMMSS}.pdf`.
///
/// `base` is `source_name` without a trailing `.pdf` (any case).
pub fn download_filename(source_name: &str, timestamp: NaiveDateTime) -> String {
    let base = source_name
        .len()
        .checked_sub(4)
        .filter(|&cut| {
            source_name.is_char_boundary(cut) && source_name[cut..].eq_ignore_ascii_case(".pdf")
        })
        .map(|cut| &source_name[..cut])
        .unwrap_or(source_name);
    format!("{base}_reordered_{}.pdf", timestamp.format("%Y%m%d_%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 9)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn sample() -> ReorderOutput {
        ReorderOutput {
            pdf: b"%PDF-1.7 fake".to_vec(),
            order: vec![2, 0, 1, 3],
            page_count: 4,
            marker_page: Some(2),
            source_bytes: 1000,
            duration_ms: 12,
        }
    }

    #[test]
    fn filename_strips_pdf_suffix() {
        assert_eq!(
            download_filename("billing.pdf", at(14, 5, 9)),
            "billing_reordered_20260309_140509.pdf"
        );
        assert_eq!(
            download_filename("SCAN.PDF", at(0, 0, 0)),
            "SCAN_reordered_20260309_000000.pdf"
        );
    }

    #[test]
    fn filename_without_suffix() {
        assert_eq!(
            download_filename("report", at(1, 2, 3)),
            "report_reordered_20260309_010203.pdf"
        );
    }

    #[test]
    fn one_based_order() {
        let out = sample();
        assert_eq!(out.order_one_based(), vec![3, 1, 2, 4]);
        assert!(!out.is_unchanged());
    }

    #[test]
    fn json_omits_pdf_bytes() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("pdf").is_none());
        assert_eq!(json["marker_page"], 2);
        assert_eq!(json["order"], serde_json::json!([2, 0, 1, 3]));
    }

    #[test]
    fn write_to_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out.pdf");
        sample().write_to(&path).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.7 fake");
    }
}
