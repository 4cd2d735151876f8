use std::path::Path;

use serde_json::Value;
use tender_core::error::TenderError;
use tender_core::tools::{ToolKit, TOOL_NAMES};

use super::read_json;
use crate::output;

/// Run one tool call. Arguments come from `args_file`, or stdin when omitted.
pub fn run(kit: &ToolKit, tool: &str, args_file: Option<&Path>) -> Result<(), TenderError> {
    let args: Value = read_json(args_file.unwrap_or(Path::new("-")))?;
    let response = kit.dispatch(tool, &args)?;
    output::json::print(&response)
}

pub fn list() -> Result<(), TenderError> {
    for name in TOOL_NAMES {
        println!("{name}");
    }
    Ok(())
}
