use tender_core::error::TenderError;
use tender_core::tools::ToolKit;

use crate::output;

pub fn run(kit: &ToolKit, item: &str, output_format: &str) -> Result<(), TenderError> {
    let response = kit.market_prices(item);

    match output_format {
        "json" => output::json::print(&response)?,
        _ => output::table::print_market(&response.payload),
    }

    Ok(())
}
