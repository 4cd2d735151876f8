use std::path::Path;

use tender_core::error::TenderError;
use tender_core::extraction::pdftotext::PdftotextExtractor;
use tender_core::extraction::DocumentFormat;
use tender_core::tools::ToolKit;

use crate::output;

pub fn run(kit: &ToolKit, file: &Path, output_format: &str) -> Result<(), TenderError> {
    if DocumentFormat::from_path(file) == DocumentFormat::Pdf && !PdftotextExtractor::is_available() {
        tracing::warn!(
            path = %file.display(),
            "pdftotext is not installed, the PDF will screen as empty text (install poppler-utils)"
        );
    }

    let response = kit.detect_pricing_requirements(file);

    match output_format {
        "json" => output::json::print(&response)?,
        _ => output::table::print_extraction(&response.payload),
    }

    Ok(())
}
