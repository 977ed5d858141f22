//! Text scanning: find the first page that mentions a marker phrase.
//!
//! Matching is a plain case-insensitive substring test. "summary" therefore
//! also matches a table of contents that lists a "summary section"; the
//! scan makes no attempt to guess intent beyond the literal phrase.

use pdfium_render::prelude::*;
use tracing::{debug, warn};

/// Lowercase and trim marker phrases, dropping blank ones.
pub fn normalize_markers<S: AsRef<str>>(markers: &[S]) -> Vec<String> {
    markers
        .iter()
        .map(|m| m.as_ref().trim().to_lowercase())
        .filter(|m| !m.is_empty())
        .collect()
}

/// `true` when `text` contains any of the (already normalised) markers.
pub fn text_matches(text: &str, markers: &[String]) -> bool {
    if markers.is_empty() {
        return false;
    }
    let text = text.to_lowercase();
    markers.iter().any(|m| text.contains(m.as_str()))
}

/// Index of the first text that matches. Stops consuming `texts` at the
/// first hit.
pub fn first_match<I>(texts: I, markers: &[String]) -> Option<usize>
where
    I: IntoIterator<Item = String>,
{
    texts.into_iter().position(|t| text_matches(&t, markers))
}

/// Plain text of one page; a page without a loadable text layer reads as
/// empty.
pub fn page_text(page: &PdfPage<'_>, index: usize) -> String {
    match page.text() {
        Ok(text) => text.all(),
        Err(e) => {
            warn!("Page {}: no text layer ({:?}); treating as empty", index + 1, e);
            String::new()
        }
    }
}

/// Plain text of every page, in page order.
pub fn document_text(document: &PdfDocument<'_>) -> Vec<String> {
    document
        .pages()
        .iter()
        .enumerate()
        .map(|(i, page)| page_text(&page, i))
        .collect()
}

/// Scan `document` in page order for the first page mentioning a marker.
pub fn find_in_document(document: &PdfDocument<'_>, markers: &[String]) -> Option<usize> {
    let texts = document
        .pages()
        .iter()
        .enumerate()
        .map(|(i, page)| page_text(&page, i));
    let found = first_match(texts, markers);
    match found {
        Some(i) => debug!("Marker found on page {}", i + 1),
        None => debug!("No page matched {:?}", markers),
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn markers() -> Vec<String> {
        normalize_markers(&["unit summary", "summary"])
    }

    fn pages(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn matches_case_insensitively() {
        assert!(text_matches("UNIT SUMMARY for March", &markers()));
        assert!(text_matches("Monthly Summary", &markers()));
        assert!(!text_matches("Invoice line items", &markers()));
    }

    #[test]
    fn first_page_wins() {
        let texts = pages(&["Cover", "Details", "Unit Summary", "Summary again"]);
        assert_eq!(first_match(texts, &markers()), Some(2));
    }

    #[test]
    fn incidental_mention_still_matches() {
        let texts = pages(&["Table of Contents\n3. summary section", "Unit Summary"]);
        assert_eq!(first_match(texts, &markers()), Some(0));
    }

    #[test]
    fn no_match_is_none() {
        let texts = pages(&["a", "b", "c"]);
        assert_eq!(first_match(texts, &markers()), None);
    }

    #[test]
    fn blank_markers_never_match() {
        let none = normalize_markers(&["", "   "]);
        assert!(none.is_empty());
        assert_eq!(first_match(pages(&["anything"]), &none), None);
    }

    #[test]
    fn markers_are_normalised() {
        let m = normalize_markers(&[" Unit Summary "]);
        assert_eq!(m, vec!["unit summary"]);
        assert!(text_matches("unit summary", &m));
    }

    #[test]
    fn stops_at_first_hit() {
        let mut consumed = 0;
        let texts = ["x", "summary", "y", "z"].iter().map(|t| {
            consumed += 1;
            t.to_string()
        });
        assert_eq!(first_match(texts, &markers()), Some(1));
        assert_eq!(consumed, 2);
    }
}
