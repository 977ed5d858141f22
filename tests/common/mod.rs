//! Shared fixtures for integration tests.
//!
//! PDFs are written by hand rather than read from disk: one Helvetica text
//! line per page, with a correct xref table so pdfium opens them without
//! repair.

#![allow(dead_code)]

use pdf_reorder::ReorderConfig;

/// Skip this test if no pdfium library can be bound.
macro_rules! skip_unless_pdfium {
    () => {{
        if !pdf_reorder::engine::is_available(None) {
            println!("SKIP — pdfium not available (set PDFIUM_LIB_PATH)");
            return;
        }
    }};
}

/// A minimal PDF with one page per entry of `texts`, each page showing its
/// text in 24pt Helvetica. Pages are US Letter (612 × 792 pt).
pub fn pdf_with_pages(texts: &[&str]) -> Vec<u8> {
    let n = texts.len();
    let mut objects: Vec<String> = Vec::with_capacity(3 + 2 * n);

    objects.push("<< /Type /Catalog /Pages 2 0 R >>".to_string());
    let kids = (0..n)
        .map(|i| format!("{} 0 R", 4 + 2 * i))
        .collect::<Vec<_>>()
        .join(" ");
    objects.push(format!("<< /Type /Pages /Kids [{kids}] /Count {n} >>"));
    objects.push("<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string());

    for (i, text) in texts.iter().enumerate() {
        let content_id = 5 + 2 * i;
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 3 0 R >> >> /Contents {content_id} 0 R >>"
        ));
        let stream = format!("BT /F1 24 Tf 72 700 Td ({}) Tj ET", escape(text));
        objects.push(format!(
            "<< /Length {} >>\nstream\n{}\nendstream",
            stream.len(),
            stream
        ));
    }

    let mut out = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
    }

    let xref_at = out.len();
    let size = objects.len() + 1;
    out.extend_from_slice(format!("xref\n0 {size}\n0000000000 65535 f \n").as_bytes());
    for offset in offsets {
        out.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
    }
    out.extend_from_slice(
        format!("trailer\n<< /Size {size} /Root 1 0 R >>\nstartxref\n{xref_at}\n%%EOF\n").as_bytes(),
    );
    out
}

/// The four-page billing report used across tests; the summary is page 3.
pub fn billing_report() -> Vec<u8> {
    pdf_with_pages(&[
        "Invoice Details",
        "Line Items",
        "Unit Summary Totals",
        "Terms and Conditions",
    ])
}

/// Pages numbered "Page 1" … "Page n".
pub fn numbered(n: usize) -> Vec<u8> {
    let texts: Vec<String> = (1..=n).map(|i| format!("Page {i}")).collect();
    let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
    pdf_with_pages(&refs)
}

/// Route library logs to the test output; `RUST_LOG=pdf_reorder=debug` to see them.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn config() -> ReorderConfig {
    ReorderConfig::default()
}

/// Page texts of `pdf`, trimmed.
pub fn texts_of(pdf: &[u8]) -> Vec<String> {
    pdf_reorder::page_texts(pdf, &config())
        .expect("page texts")
        .into_iter()
        .map(|t| t.trim().to_string())
        .collect()
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('(', "\\(")
        .replace(')', "\\)")
}
