pub mod classify;
pub mod config;
pub mod error;
pub mod extraction;
pub mod model;
pub mod parsing;
pub mod pricing;
pub mod report;
pub mod tools;

use std::path::Path;

use extraction::snippets::{candidate_lines, pricing_excerpt};
use extraction::PdfExtractor;
use model::ExtractionResult;

/// Main extraction entry point: read a tender document and screen it for pricing content.
///
/// Never fails. An unreadable document is screened as empty text, which
/// classifies as a generic procurement document with no candidate lines.
pub fn detect_requirements(path: &Path, pdf: &dyn PdfExtractor, currency: &str) -> ExtractionResult {
    let raw = extraction::read_document_text(path, pdf);
    let mut result = screen_text(&raw, currency);
    result.file_path = Some(path.display().to_string());
    result
}

/// Screen already-extracted document text.
///
/// Normalizes the text, classifies it, cuts the pricing excerpt and picks
/// candidate pricing lines out of it.
pub fn screen_text(raw: &str, currency: &str) -> ExtractionResult {
    let cleaned = parsing::normalize_text(raw);
    let document_type = classify::classify_document(&cleaned);
    let excerpt = pricing_excerpt(&cleaned);
    let pricing_items = candidate_lines(&excerpt);

    tracing::debug!(
        %document_type,
        chars = cleaned.chars().count(),
        candidates = pricing_items.len(),
        "screened document text"
    );

    ExtractionResult {
        summary: format!(
            "Document appears to be a {} with {} possible pricing-related lines detected.",
            document_type,
            pricing_items.len()
        ),
        currency: currency.to_string(),
        pricing_items,
        raw_text: excerpt,
        file_path: None,
        document_type,
    }
}
