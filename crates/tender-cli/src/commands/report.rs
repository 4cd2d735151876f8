use std::path::{Path, PathBuf};

use tender_core::error::TenderError;
use tender_core::tools::ToolKit;

use super::{read_input, read_json};
use crate::output;

pub fn render(kit: &ToolKit, pricing_file: &Path, output_file: Option<PathBuf>) -> Result<(), TenderError> {
    let pricing_data = read_json(pricing_file)?;
    let response = kit.render_report(&pricing_data);

    match output_file {
        Some(path) => {
            std::fs::write(&path, &response.payload.html)?;
            eprintln!("Report written to {}", path.display());
        }
        None => output::json::print(&response)?,
    }

    Ok(())
}

pub fn finalize(kit: &ToolKit, html_file: &Path) -> Result<(), TenderError> {
    let html = read_input(html_file)?;
    output::json::print(&kit.final_output(&html))
}
