//! Input: read a PDF from disk into memory.
//!
//! The library operates on byte buffers. This stage is what a caller with a
//! path uses to get one: it distinguishes a missing file from an unreadable
//! one and checks the `%PDF` magic bytes, so a user who picked the wrong file
//! gets a specific error instead of a generic decode failure.

use crate::error::ReorderError;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A PDF read fully into memory, plus where it came from.
#[derive(Debug, Clone)]
pub struct SourcePdf {
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

impl SourcePdf {
    /// File name component of the path, e.g. `report.pdf`.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document.pdf".to_string())
    }
}

/// Read a local PDF, validating existence, permissions and magic bytes.
pub fn read_source(path: impl AsRef<Path>) -> Result<SourcePdf, ReorderError> {
    let path = path.as_ref().to_path_buf();

    let bytes = match std::fs::read(&path) {
        Ok(b) => b,
        Err(e) => {
            return Err(match e.kind() {
                ErrorKind::NotFound => ReorderError::FileNotFound { path },
                ErrorKind::PermissionDenied => ReorderError::PermissionDenied { path },
                _ => ReorderError::ReadFailed { path, source: e },
            })
        }
    };

    if bytes.len() >= 4 && &bytes[..4] != b"%PDF" {
        let mut magic = [0u8; 4];
        magic.copy_from_slice(&bytes[..4]);
        return Err(ReorderError::NotAPdf { path, magic });
    }

    debug!("Read {} ({} bytes)", path.display(), bytes.len());
    Ok(SourcePdf { path, bytes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file() {
        let err = read_source("/definitely/not/here.pdf").unwrap_err();
        assert!(matches!(err, ReorderError::FileNotFound { .. }));
    }

    #[test]
    fn directory_is_a_read_failure() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_source(dir.path()).unwrap_err();
        match err {
            ReorderError::ReadFailed { path, .. } => assert_eq!(path, dir.path()),
            other => panic!("expected ReadFailed, got {other:?}"),
        }
    }

    #[test]
    fn wrong_magic() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"PK\x03\x04zipfile").unwrap();
        let err = read_source(tmp.path()).unwrap_err();
        match err {
            ReorderError::NotAPdf { magic, .. } => assert_eq!(&magic, b"PK\x03\x04"),
            other => panic!("expected NotAPdf, got {other:?}"),
        }
    }

    #[test]
    fn reads_pdf_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.pdf");
        std::fs::write(&path, b"%PDF-1.4\n%%EOF\n").unwrap();

        let src = read_source(&path).unwrap();
        assert_eq!(src.file_name(), "report.pdf");
        assert!(src.bytes.starts_with(b"%PDF"));
    }
}
