//! PDF text extraction
//!
//! Extracts plain text page by page with lopdf, concatenating in page order.
//! Pages that yield no text are skipped; a document that yields no text at
//! all is an extraction failure.

use crate::errors::PipelineError;
use tracing::{debug, warn};

/// Extraction result: concatenated page text plus the page count
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    pub text: String,
    pub page_count: usize,
}

/// Extract text from in-memory PDF bytes
pub fn extract_document(bytes: &[u8]) -> Result<ExtractedDocument, PipelineError> {
    let doc = lopdf::Document::load_mem(bytes).map_err(|e| PipelineError::Extraction {
        message: format!("Failed to load PDF: {}", e),
    })?;

    let pages = doc.get_pages();
    let page_count = pages.len();

    debug!(page_count, "Extracting text from PDF");

    let mut page_texts = Vec::new();
    for page_num in pages.keys() {
        match doc.extract_text(&[*page_num]) {
            Ok(text) => {
                let text = normalize_page_text(&text);
                if !text.is_empty() {
                    page_texts.push(text);
                }
            }
            Err(e) => {
                warn!(page = page_num, error = %e, "Failed to extract text from page, skipping");
            }
        }
    }

    if page_texts.is_empty() {
        return Err(PipelineError::Extraction {
            message: "No text content extracted from PDF".to_string(),
        });
    }

    let text = page_texts.join("\n");

    debug!(text_len = text.len(), "Text extraction complete");

    Ok(ExtractedDocument { text, page_count })
}

/// Collapse whitespace runs and strip PDF artifacts from one page of text
fn normalize_page_text(text: &str) -> String {
    text.replace('\u{FEFF}', "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Truncate to at most `limit` characters on a char boundary
pub fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_bytes_are_extraction_error() {
        let err = extract_document(b"definitely not a pdf").unwrap_err();
        assert!(matches!(err, PipelineError::Extraction { .. }));
    }

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize_page_text("Hello   World\n\nTest"), "Hello World Test");
        assert_eq!(normalize_page_text("\u{FEFF}bom"), "bom");
        assert_eq!(normalize_page_text("   "), "");
    }

    #[test]
    fn test_truncate_chars_respects_boundaries() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello", 3), "hel");
        // Multibyte: 3 chars, not 3 bytes
        assert_eq!(truncate_chars("研究最前線", 3), "研究最");
    }
}
