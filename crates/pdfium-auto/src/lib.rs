//! # pdfium-auto
//!
//! Locate, download and cache the [PDFium](https://pdfium.googlesource.com/pdfium/)
//! shared library so that `pdfium-render` users never have to install
//! libpdfium or export `LD_LIBRARY_PATH` / `DYLD_LIBRARY_PATH` themselves.
//!
//! ## Lookup order
//!
//! [`bind_pdfium`] tries, in order:
//!
//! 1. an explicit path handed in by the caller,
//! 2. `PDFIUM_LIB_PATH`, when it points to an existing file,
//! 3. the per-version cache directory (see [`pdfium_cache_dir`]),
//! 4. the system library search path.
//!
//! Binding never touches the network. Only [`ensure_pdfium_library`]
//! downloads, and it is meant to be called once by a CLI before any work
//! starts:
//!
//! ```rust,no_run
//! use pdfium_auto::{bind_pdfium, ensure_pdfium_library};
//!
//! let path = ensure_pdfium_library(Some(&|done: u64, total: Option<u64>| {
//!     if let Some(t) = total {
//!         eprint!("\rPDFium: {done}/{t} bytes");
//!     }
//! }))
//! .expect("download failed");
//! let pdfium = bind_pdfium(Some(&path)).expect("bind failed");
//! ```
//!
//! ## Environment variables
//!
//! - `PDFIUM_LIB_PATH` — use an existing library; skips the cache.
//! - `PDFIUM_AUTO_CACHE_DIR` — override the cache root.

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use pdfium_render::prelude::Pdfium;
use thiserror::Error;

/// The bblanchon/pdfium-binaries release tag used for downloads.
pub const PDFIUM_VERSION: &str = "7690";

const RELEASE_URL: &str = "https://github.com/bblanchon/pdfium-binaries/releases/download";

/// Directory name under the platform cache root.
const CACHE_NAMESPACE: &str = "pdf-reorder";

/// Errors returned by pdfium-auto.
#[derive(Error, Debug)]
pub enum PdfiumAutoError {
    /// No prebuilt library is published for this OS/architecture.
    #[error("Unsupported platform: {os}/{arch}")]
    UnsupportedPlatform { os: String, arch: String },

    /// The cache directory could not be created or written.
    #[error("Cache directory error: {0}")]
    CacheDir(#[source] io::Error),

    /// HTTP request failed or returned a non-success status.
    #[error("Download failed: {0}")]
    Download(String),

    /// The archive was not a gzipped tar or did not contain the library.
    #[error("Archive extraction failed: {0}")]
    Extract(String),

    /// The library exists but could not be loaded.
    #[error("Failed to bind PDFium from '{path}': {reason}")]
    Bind { path: PathBuf, reason: String },

    /// Neither a located library nor the system library could be loaded.
    #[error("No PDFium library found (cache: '{cache}', system: {reason})")]
    NotFound { cache: PathBuf, reason: String },
}

// ── Platform table ───────────────────────────────────────────────────────────

/// Where to find the library for one OS/architecture pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Platform {
    /// Release asset, e.g. `pdfium-linux-x64.tgz`.
    archive: &'static str,
    /// Path of the library inside the archive.
    member: &'static str,
    /// File name written to the cache directory.
    file_name: &'static str,
}

const DYLIB: (&str, &str) = ("lib/libpdfium.dylib", "libpdfium.dylib");
const SO: (&str, &str) = ("lib/libpdfium.so", "libpdfium.so");
const DLL: (&str, &str) = ("bin/pdfium.dll", "pdfium.dll");

const PLATFORMS: &[(&str, &str, &str, (&str, &str))] = &[
    ("macos", "aarch64", "pdfium-mac-arm64.tgz", DYLIB),
    ("macos", "x86_64", "pdfium-mac-x64.tgz", DYLIB),
    ("linux", "x86_64", "pdfium-linux-x64.tgz", SO),
    ("linux", "aarch64", "pdfium-linux-arm64.tgz", SO),
    ("windows", "x86_64", "pdfium-win-x64.tgz", DLL),
    ("windows", "aarch64", "pdfium-win-arm64.tgz", DLL),
    ("windows", "x86", "pdfium-win-x86.tgz", DLL),
];

impl Platform {
    fn lookup(os: &str, arch: &str) -> Result<Self, PdfiumAutoError> {
        PLATFORMS
            .iter()
            .find(|(o, a, _, _)| *o == os && *a == arch)
            .map(|&(_, _, archive, (member, file_name))| Platform {
                archive,
                member,
                file_name,
            })
            .ok_or_else(|| PdfiumAutoError::UnsupportedPlatform {
                os: os.to_string(),
                arch: arch.to_string(),
            })
    }

    fn current() -> Result<Self, PdfiumAutoError> {
        Self::lookup(std::env::consts::OS, std::env::consts::ARCH)
    }

    fn download_url(&self) -> String {
        format!("{RELEASE_URL}/chromium%2F{PDFIUM_VERSION}/{}", self.archive)
    }
}

// ── Cache location ───────────────────────────────────────────────────────────

/// Per-version directory holding the downloaded library.
///
/// `~/.cache/pdf-reorder/pdfium-7690/` on Linux, the platform cache root
/// elsewhere, or `$PDFIUM_AUTO_CACHE_DIR/pdfium-7690/` when set.
pub fn pdfium_cache_dir() -> PathBuf {
    let versioned = format!("pdfium-{PDFIUM_VERSION}");
    if let Some(root) = std::env::var_os("PDFIUM_AUTO_CACHE_DIR") {
        return PathBuf::from(root).join(versioned);
    }

    dirs::cache_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join(".cache")))
        .unwrap_or_else(std::env::temp_dir)
        .join(CACHE_NAMESPACE)
        .join(versioned)
}

fn env_override() -> Option<PathBuf> {
    std::env::var_os("PDFIUM_LIB_PATH")
        .map(PathBuf::from)
        .filter(|p| p.exists())
}

/// Path to a usable library from `PDFIUM_LIB_PATH` or the cache, if any.
pub fn cached_pdfium_path() -> Option<PathBuf> {
    env_override().or_else(|| {
        let platform = Platform::current().ok()?;
        let path = pdfium_cache_dir().join(platform.file_name);
        path.exists().then_some(path)
    })
}

/// `true` when [`ensure_pdfium_library`] would not need the network.
pub fn is_pdfium_cached() -> bool {
    cached_pdfium_path().is_some()
}

// ── Binding ──────────────────────────────────────────────────────────────────

/// Load PDFium from an explicit library file.
pub fn bind_pdfium_from_path(path: &Path) -> Result<Pdfium, PdfiumAutoError> {
    let bindings = Pdfium::bind_to_library(path).map_err(|e| PdfiumAutoError::Bind {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(Pdfium::new(bindings))
}

/// Load PDFium without downloading: explicit path, then env/cache, then the
/// system library.
pub fn bind_pdfium(explicit: Option<&Path>) -> Result<Pdfium, PdfiumAutoError> {
    if let Some(path) = explicit {
        return bind_pdfium_from_path(path);
    }
    if let Some(path) = cached_pdfium_path() {
        return bind_pdfium_from_path(&path);
    }
    Pdfium::bind_to_system_library()
        .map(Pdfium::new)
        .map_err(|e| PdfiumAutoError::NotFound {
            cache: pdfium_cache_dir(),
            reason: e.to_string(),
        })
}

// ── Download ─────────────────────────────────────────────────────────────────

static ENSURED: OnceLock<PathBuf> = OnceLock::new();

/// Make sure the library exists locally, downloading it on first use.
///
/// `on_progress` receives `(bytes_downloaded, content_length)`.
pub fn ensure_pdfium_library(
    on_progress: Option<&dyn Fn(u64, Option<u64>)>,
) -> Result<PathBuf, PdfiumAutoError> {
    if let Some(path) = ENSURED.get() {
        return Ok(path.clone());
    }

    let path = match cached_pdfium_path() {
        Some(path) => path,
        None => {
            let platform = Platform::current()?;
            let dir = pdfium_cache_dir();
            std::fs::create_dir_all(&dir).map_err(PdfiumAutoError::CacheDir)?;
            download_into(&platform, &dir, on_progress)?
        }
    };

    let _ = ENSURED.set(path.clone());
    Ok(path)
}

fn download_into(
    platform: &Platform,
    dir: &Path,
    on_progress: Option<&dyn Fn(u64, Option<u64>)>,
) -> Result<PathBuf, PdfiumAutoError> {
    let url = platform.download_url();
    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!("pdfium-auto/", env!("CARGO_PKG_VERSION")))
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()
        .map_err(|e| PdfiumAutoError::Download(e.to_string()))?;

    let response = client
        .get(&url)
        .send()
        .map_err(|e| PdfiumAutoError::Download(format!("GET {url}: {e}")))?;
    if !response.status().is_success() {
        return Err(PdfiumAutoError::Download(format!(
            "HTTP {} for {url}",
            response.status()
        )));
    }

    let total = response.content_length();
    let reader = ProgressReader::new(response, total, on_progress);
    let dest = dir.join(platform.file_name);
    extract_member(reader, platform.member, &dest)?;
    Ok(dest)
}

/// Counts bytes as they stream through and reports them.
struct ProgressReader<'a, R> {
    inner: R,
    read: u64,
    total: Option<u64>,
    on_progress: Option<&'a dyn Fn(u64, Option<u64>)>,
}

impl<'a, R> ProgressReader<'a, R> {
    fn new(inner: R, total: Option<u64>, on_progress: Option<&'a dyn Fn(u64, Option<u64>)>) -> Self {
        Self {
            inner,
            read: 0,
            total,
            on_progress,
        }
    }
}

impl<R: Read> Read for ProgressReader<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.read += n as u64;
        if let Some(cb) = self.on_progress {
            cb(self.read, self.total);
        }
        Ok(n)
    }
}

/// Stream a `.tgz` and unpack the single `member` to `dest`.
///
/// The file is unpacked next to `dest` first and renamed into place, so a
/// half-written library is never visible under the final name.
fn extract_member<R: Read>(archive: R, member: &str, dest: &Path) -> Result<(), PdfiumAutoError> {
    use flate2::read::GzDecoder;
    use tar::Archive;

    let mut archive = Archive::new(GzDecoder::new(archive));
    let entries = archive
        .entries()
        .map_err(|e| PdfiumAutoError::Extract(e.to_string()))?;

    for entry in entries {
        let mut entry = entry.map_err(|e| PdfiumAutoError::Extract(e.to_string()))?;
        let is_member = entry
            .path()
            .map(|p| p.to_string_lossy() == member)
            .unwrap_or(false);
        if !is_member {
            continue;
        }

        let partial = dest.with_extension("partial");
        entry
            .unpack(&partial)
            .map_err(|e| PdfiumAutoError::Extract(format!("unpack {member}: {e}")))?;
        std::fs::rename(&partial, dest).map_err(PdfiumAutoError::CacheDir)?;
        return Ok(());
    }

    Err(PdfiumAutoError::Extract(format!(
        "'{member}' not found in archive"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::cell::Cell;

    fn tgz_with(name: &str, body: &[u8]) -> Vec<u8> {
        let mut builder = tar::Builder::new(GzEncoder::new(Vec::new(), Compression::fast()));
        let mut header = tar::Header::new_gnu();
        header.set_size(body.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append_data(&mut header, name, body).unwrap();
        builder.into_inner().unwrap().finish().unwrap()
    }

    #[test]
    fn current_platform_is_known() {
        Platform::current().expect("current platform should be supported");
    }

    #[test]
    fn lookup_rejects_unknown_platform() {
        let err = Platform::lookup("plan9", "mips").unwrap_err();
        assert!(err.to_string().contains("plan9/mips"));
    }

    #[test]
    fn linux_download_url() {
        let p = Platform::lookup("linux", "x86_64").unwrap();
        assert_eq!(p.file_name, "libpdfium.so");
        assert!(p.download_url().ends_with("chromium%2F7690/pdfium-linux-x64.tgz"));
    }

    #[test]
    fn cache_dir_is_versioned() {
        let dir = pdfium_cache_dir();
        assert!(dir.to_string_lossy().contains(PDFIUM_VERSION));
    }

    #[test]
    fn extract_member_writes_library() {
        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("libpdfium.so");
        let archive = tgz_with("lib/libpdfium.so", b"ELF-ish");

        extract_member(archive.as_slice(), "lib/libpdfium.so", &dest).unwrap();

        assert_eq!(std::fs::read(&dest).unwrap(), b"ELF-ish");
        assert!(!dest.with_extension("partial").exists());
    }

    #[test]
    fn extract_member_reports_missing_entry() {
        let tmp = tempfile::tempdir().unwrap();
        let archive = tgz_with("lib/other.so", b"x");
        let err = extract_member(archive.as_slice(), "lib/libpdfium.so", &tmp.path().join("out"))
            .unwrap_err();
        assert!(matches!(err, PdfiumAutoError::Extract(_)));
    }

    #[test]
    fn progress_reader_counts_bytes() {
        let seen = Cell::new(0u64);
        let cb = |done: u64, total: Option<u64>| {
            assert_eq!(total, Some(11));
            seen.set(done);
        };
        let mut reader = ProgressReader::new(&b"hello world"[..], Some(11), Some(&cb));
        let mut out = Vec::new();
        reader.read_to_end(&mut out).unwrap();
        assert_eq!(out, b"hello world");
        assert_eq!(seen.get(), 11);
    }
}
