use std::path::{Path, PathBuf};

use tender_core::error::TenderError;
use tender_core::tools::ToolKit;

use super::{read_input, read_json};
use crate::output;

pub fn build(
    kit: &ToolKit,
    description: &str,
    rules_file: Option<&Path>,
    rates_file: &Path,
    output_file: Option<PathBuf>,
) -> Result<(), TenderError> {
    let tender_rules = rules_file.map(read_input).transpose()?.unwrap_or_default();
    let company_rates = read_input(rates_file)?;
    let response = kit.build_model(description, &tender_rules, &company_rates);

    match output_file {
        Some(path) => {
            std::fs::write(&path, serde_json::to_string_pretty(&response)?)?;
            eprintln!(
                "Built model with {} item(s), written to {}",
                response.payload.model.items.len(),
                path.display()
            );
        }
        None => output::json::print(&response)?,
    }

    Ok(())
}

pub fn calculate(kit: &ToolKit, model_file: &Path, output_format: &str) -> Result<(), TenderError> {
    let model = read_json(model_file)?;
    let response = kit.calculate(&model)?;

    match output_format {
        "json" => output::json::print(&response)?,
        _ => output::table::print_calculation(&response.payload),
    }

    Ok(())
}
