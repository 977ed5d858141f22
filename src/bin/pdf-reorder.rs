//! CLI binary for pdf-reorder.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ReorderConfig`, picks the reorder flow, and writes the results.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pdf_reorder::pipeline::input::{read_source, SourcePdf};
use pdf_reorder::{
    apply_order, download_filename, find_marker_page, inspect, page_to_front, preview,
    render_thumbnails, summary_first, ProgressCallback, ReorderConfig, ReorderOutput,
    ReorderProgressCallback, Thumbnail, DEFAULT_MARKERS,
};
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn yellow(s: &str) -> String {
    format!("\x1b[33m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const TICKS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"];

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Progress bar over the pages being copied into the output document.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::hidden();
        Arc::new(Self { bar })
    }
}

impl ReorderProgressCallback for CliProgressCallback {
    fn on_reorder_start(&self, total_pages: usize) {
        let style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  [{bar:42.green/238}] {pos:>3}/{len} pages  {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(TICKS);

        self.bar.set_draw_target(indicatif::ProgressDrawTarget::stderr());
        self.bar.set_style(style);
        self.bar.set_length(total_pages as u64);
        self.bar.set_prefix("Reordering");
        self.bar.enable_steady_tick(Duration::from_millis(80));
    }

    fn on_page_copied(&self, position: usize, source_index: usize, _total: usize) {
        self.bar
            .set_message(format!("page {} → {}", source_index + 1, position + 1));
        self.bar.inc(1);
    }

    fn on_reorder_complete(&self, _total_pages: usize, _output_bytes: usize) {
        self.bar.finish_and_clear();
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Move the "Unit Summary" page to the front (auto-detected)
  pdf-reorder billing.pdf

  # Choose the output file
  pdf-reorder billing.pdf -o billing_fixed.pdf

  # Only report which page holds the summary
  pdf-reorder --find-only billing.pdf

  # Manual order (1-based, every page exactly once)
  pdf-reorder --order 3,1,2,4 billing.pdf

  # Move page 5 to the front
  pdf-reorder --page 5 billing.pdf

  # Look for a different phrase
  pdf-reorder --marker "executive summary" report.pdf

  # Write a thumbnail per page, and a preview of the result
  pdf-reorder --thumbnails thumbs/ --preview preview/ billing.pdf

  # Inspect metadata as JSON
  pdf-reorder --inspect-only --json billing.pdf

OUTPUT:
  Without -o the result is written next to the input as
  {name}_reordered_{YYYYMMDD_HHMMSS}.pdf

ENVIRONMENT VARIABLES:
  PDFIUM_LIB_PATH         Path to an existing libpdfium — skips auto-download
  PDFIUM_AUTO_CACHE_DIR   Override the default pdfium cache directory
  RUST_LOG                Override log filtering (e.g. pdf_reorder=debug)

SETUP:
  PDFium (~30 MB) is downloaded automatically on first run and cached in
  ~/.cache/pdf-reorder/pdfium-7690/. No manual library setup is required.
"#;

/// Move a PDF's summary page to the front, or reorder its pages by hand.
#[derive(Parser, Debug)]
#[command(
    name = "pdf-reorder",
    version,
    about = "Move a PDF's summary page to the front, or reorder its pages by hand",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Local PDF file.
    input: PathBuf,

    /// Write the reordered PDF here instead of a timestamped name next to the input.
    #[arg(short, long, env = "PDF_REORDER_OUTPUT")]
    output: Option<PathBuf>,

    /// Manual page order: comma-separated 1-based page numbers, e.g. 3,1,2,4.
    #[arg(long, env = "PDF_REORDER_ORDER", conflicts_with = "page")]
    order: Option<String>,

    /// Move this 1-based page to the front.
    #[arg(long, env = "PDF_REORDER_PAGE")]
    page: Option<usize>,

    /// Marker phrase identifying the summary page (repeatable; case-insensitive).
    #[arg(long = "marker", env = "PDF_REORDER_MARKERS", value_delimiter = ';')]
    markers: Vec<String>,

    /// Print the detected summary page and exit.
    #[arg(long, conflicts_with_all = ["order", "page"])]
    find_only: bool,

    /// Print PDF metadata only, no reordering.
    #[arg(long)]
    inspect_only: bool,

    /// Write a PNG thumbnail of every source page into this directory.
    #[arg(long, env = "PDF_REORDER_THUMBNAILS")]
    thumbnails: Option<PathBuf>,

    /// Thumbnail width in pixels.
    #[arg(long, env = "PDF_REORDER_THUMBNAIL_WIDTH", default_value_t = 150,
          value_parser = clap::value_parser!(u32).range(1..=4000))]
    thumbnail_width: u32,

    /// Write thumbnails of the first pages of the result into this directory.
    #[arg(long, env = "PDF_REORDER_PREVIEW")]
    preview: Option<PathBuf>,

    /// Number of result pages to preview.
    #[arg(long, env = "PDF_REORDER_PREVIEW_PAGES", default_value_t = 3)]
    preview_pages: usize,

    /// PDF user password for encrypted documents.
    #[arg(long, env = "PDF_REORDER_PASSWORD")]
    password: Option<String>,

    /// Path to libpdfium; skips discovery and download.
    #[arg(long, env = "PDF_REORDER_PDFIUM_LIB")]
    pdfium_lib: Option<PathBuf>,

    /// Output structured JSON instead of human-readable text.
    #[arg(long, env = "PDF_REORDER_JSON")]
    json: bool,

    /// Disable progress bars.
    #[arg(long, env = "PDF_REORDER_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDF_REORDER_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PDF_REORDER_QUIET")]
    quiet: bool,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    input: &'a Path,
    output: &'a Path,
    order_one_based: Vec<usize>,
    #[serde(flatten)]
    result: &'a ReorderOutput,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Ensure PDFium engine is available ───────────────────────────────
    if cli.pdfium_lib.is_none() && !pdfium_auto::is_pdfium_cached() {
        if let Err(e) = download_pdfium(show_progress) {
            // A system-wide pdfium may still bind; the engine reports if not.
            warn!("PDFium download failed: {e}");
        }
    }

    let source = read_source(&cli.input)
        .with_context(|| format!("Failed to read {}", cli.input.display()))?;

    let progress_cb: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new() as Arc<dyn ReorderProgressCallback>)
    } else {
        None
    };
    let config = build_config(&cli, progress_cb)?;

    // ── Inspect-only mode ────────────────────────────────────────────────
    if cli.inspect_only {
        return print_metadata(&cli, &source, &config);
    }

    // ── Source thumbnails ────────────────────────────────────────────────
    if let Some(ref dir) = cli.thumbnails {
        let total = pdf_reorder::page_count(&source.bytes, &config)
            .context("Failed to open PDF")?;
        let indices: Vec<usize> = (0..total).collect();
        let thumbs = render_thumbnails(&source.bytes, &indices, config.thumbnail_width, &config)
            .context("Failed to render thumbnails")?;
        write_thumbnails(dir, "page", &thumbs)?;
        if !cli.quiet && !cli.json {
            eprintln!("{} {} thumbnails → {}", green("✓"), thumbs.len(), dir.display());
        }
    }

    // ── Find-only mode ───────────────────────────────────────────────────
    if cli.find_only {
        let found = find_marker_page(&source.bytes, &config.markers, &config)
            .context("Failed to scan PDF")?;
        if cli.json {
            println!("{}", find_only_json(found));
        } else if let Some(i) = found {
            println!("{}", i + 1);
        } else if !cli.quiet {
            eprintln!("{} No page mentions {:?}", yellow("⚠"), config.markers);
        }
        std::process::exit(find_only_exit_code(found));
    }

    // ── Reorder ──────────────────────────────────────────────────────────
    let output = if let Some(ref order) = cli.order {
        apply_order(&source.bytes, order, &config).context("Invalid page order")?
    } else if let Some(page) = cli.page {
        if page == 0 {
            anyhow::bail!("Pages are 1-indexed, minimum is 1 (got 0)");
        }
        page_to_front(&source.bytes, page - 1, &config).context("Reorder failed")?
    } else {
        summary_first(&source.bytes, &config).context("Could not move summary to front")?
    };

    let output_path = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&source));
    output
        .write_to(&output_path)
        .context("Failed to save reordered PDF")?;

    // ── Preview ──────────────────────────────────────────────────────────
    if let Some(ref dir) = cli.preview {
        let thumbs = preview(&output, &config).context("Failed to render preview")?;
        write_thumbnails(dir, "preview", &thumbs)?;
    }

    // ── Report ───────────────────────────────────────────────────────────
    if cli.json {
        let report = JsonReport {
            input: &cli.input,
            output: &output_path,
            order_one_based: output.order_one_based(),
            result: &output,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialise report")?
        );
    } else if !cli.quiet {
        if let Some(found) = output.marker_page {
            eprintln!("{} Found summary on page {}", green("✓"), found + 1);
        }
        let order = output
            .order_one_based()
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(",");
        eprintln!(
            "{}  {} pages  {}ms  →  {}",
            if output.is_unchanged() {
                yellow("=")
            } else {
                green("✔")
            },
            output.page_count,
            output.duration_ms,
            bold(&output_path.display().to_string()),
        );
        eprintln!("   order {}", dim(&order));
    }

    Ok(())
}

/// Exit status of `--find-only`: 0 when a page matched, 2 when none did,
/// in both text and JSON mode.
fn find_only_exit_code(found: Option<usize>) -> i32 {
    if found.is_some() {
        0
    } else {
        2
    }
}

fn find_only_json(found: Option<usize>) -> serde_json::Value {
    serde_json::json!({ "marker_page": found.map(|i| i + 1) })
}

/// Map CLI args to `ReorderConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<ReorderConfig> {
    let markers: Vec<String> = if cli.markers.is_empty() {
        DEFAULT_MARKERS.iter().map(|m| m.to_string()).collect()
    } else {
        cli.markers.clone()
    };

    let mut builder = ReorderConfig::builder()
        .markers(markers)
        .thumbnail_width(cli.thumbnail_width)
        .preview_pages(cli.preview_pages);

    if let Some(ref pwd) = cli.password {
        builder = builder.password(pwd);
    }
    if let Some(ref lib) = cli.pdfium_lib {
        builder = builder.pdfium_library(lib);
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}

fn default_output_path(source: &SourcePdf) -> PathBuf {
    let name = download_filename(&source.file_name(), chrono::Local::now().naive_local());
    source
        .path
        .parent()
        .map(|dir| dir.join(&name))
        .unwrap_or_else(|| PathBuf::from(name))
}

fn print_metadata(cli: &Cli, source: &SourcePdf, config: &ReorderConfig) -> Result<()> {
    let meta = inspect(&source.bytes, config).context("Failed to inspect PDF")?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&meta).context("Failed to serialise metadata")?
        );
        return Ok(());
    }

    println!("File:         {}", cli.input.display());
    if let Some(ref t) = meta.title {
        println!("Title:        {}", t);
    }
    if let Some(ref a) = meta.author {
        println!("Author:       {}", a);
    }
    println!("Pages:        {}", meta.page_count);
    println!("PDF Version:  {}", meta.pdf_version);
    if let Some(ref p) = meta.producer {
        println!("Producer:     {}", p);
    }
    for (i, size) in meta.page_sizes.iter().enumerate() {
        println!(
            "  page {:>3}    {:.0} × {:.0} pt",
            i + 1,
            size.width,
            size.height
        );
    }
    Ok(())
}

fn write_thumbnails(dir: &Path, prefix: &str, thumbs: &[Thumbnail]) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    for t in thumbs {
        let path = dir.join(format!("{prefix}-{:03}.png", t.page_index + 1));
        std::fs::write(&path, &t.png)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }
    Ok(())
}

/// First-run download of libpdfium into the cache, with a byte progress bar.
fn download_pdfium(show_progress: bool) -> Result<PathBuf> {
    if !show_progress {
        return pdfium_auto::ensure_pdfium_library(None).context("Failed to download PDFium engine");
    }

    let bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  [{bar:42.green/238}] {bytes}/{total_bytes}  ETA {eta_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(TICKS),
    );
    bar.set_prefix("PDF engine");
    bar.enable_steady_tick(Duration::from_millis(80));

    let path = pdfium_auto::ensure_pdfium_library(Some(&|downloaded: u64, total: Option<u64>| {
        if let Some(t) = total {
            if bar.length() != Some(t) {
                bar.set_length(t);
            }
        }
        bar.set_position(downloaded);
    }))
    .context("Failed to download PDFium engine")?;

    bar.finish_with_message("ready ✓");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_manual_order() {
        let cli = Cli::try_parse_from(["pdf-reorder", "--order", "3,1,2", "in.pdf"]).unwrap();
        assert_eq!(cli.order.as_deref(), Some("3,1,2"));
        assert_eq!(cli.thumbnail_width, 150);
    }

    #[test]
    fn order_and_page_conflict() {
        let err = Cli::try_parse_from(["pdf-reorder", "--order", "1,2", "--page", "2", "in.pdf"]);
        assert!(err.is_err());
    }

    #[test]
    fn markers_override_defaults() {
        let cli = Cli::try_parse_from([
            "pdf-reorder",
            "--marker",
            "Executive Summary",
            "--marker",
            "totals",
            "in.pdf",
        ])
        .unwrap();
        let config = build_config(&cli, None).unwrap();
        assert_eq!(config.markers, vec!["executive summary", "totals"]);
    }

    #[test]
    fn default_markers_when_none_given() {
        let cli = Cli::try_parse_from(["pdf-reorder", "in.pdf"]).unwrap();
        let config = build_config(&cli, None).unwrap();
        assert_eq!(config.markers, vec!["unit summary", "summary"]);
    }

    #[test]
    fn find_only_exit_code_ignores_output_mode() {
        assert_eq!(find_only_exit_code(Some(2)), 0);
        assert_eq!(find_only_exit_code(None), 2);
        assert_eq!(find_only_json(None), serde_json::json!({ "marker_page": null }));
        assert_eq!(find_only_json(Some(2)), serde_json::json!({ "marker_page": 3 }));
    }

    #[test]
    fn default_output_sits_next_to_input() {
        let source = SourcePdf {
            path: PathBuf::from("/reports/billing.pdf"),
            bytes: Vec::new(),
        };
        let out = default_output_path(&source);
        assert_eq!(out.parent(), Some(Path::new("/reports")));
        let name = out.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("billing_reordered_"), "got {name}");
        assert!(name.ends_with(".pdf"));
    }
}
