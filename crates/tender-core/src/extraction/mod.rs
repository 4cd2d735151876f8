pub mod docx;
pub mod pdftotext;
pub mod snippets;
pub mod spreadsheet;

use std::path::Path;

use crate::error::TenderError;

/// Trait for PDF text extraction backends.
pub trait PdfExtractor: Send + Sync {
    /// Extract text from PDF bytes, one string per page.
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<String>, TenderError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Document formats the reader dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Word,
    Spreadsheet,
    PlainText,
}

impl DocumentFormat {
    /// Pick a format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> DocumentFormat {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("pdf") => DocumentFormat::Pdf,
            Some("doc") | Some("docx") => DocumentFormat::Word,
            Some("xls") | Some("xlsx") => DocumentFormat::Spreadsheet,
            _ => DocumentFormat::PlainText,
        }
    }
}

/// Read the text of any supported document.
///
/// Unreadable, missing, corrupt or unsupported files yield an empty string;
/// the failure is only logged.
pub fn read_document_text(path: &Path, pdf: &dyn PdfExtractor) -> String {
    let format = DocumentFormat::from_path(path);
    tracing::debug!(path = %path.display(), ?format, "reading document");

    match try_read_document_text(path, format, pdf) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "could not read document, continuing with empty text");
            String::new()
        }
    }
}

fn try_read_document_text(
    path: &Path,
    format: DocumentFormat,
    pdf: &dyn PdfExtractor,
) -> Result<String, TenderError> {
    let bytes = std::fs::read(path)?;
    match format {
        DocumentFormat::Pdf => {
            tracing::debug!(backend = pdf.backend_name(), "extracting pdf text");
            Ok(pdf.extract_pages(&bytes)?.join("\n"))
        }
        DocumentFormat::Word => docx::read_docx_text(&bytes),
        DocumentFormat::Spreadsheet => spreadsheet::read_spreadsheet_text(&bytes),
        DocumentFormat::PlainText => Ok(decode_text_lossy(&bytes)),
    }
}

/// Decode bytes as UTF-8, dropping invalid sequences.
pub fn decode_text_lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .chars()
        .filter(|&c| c != char::REPLACEMENT_CHARACTER)
        .collect()
}
