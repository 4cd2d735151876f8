pub mod call;
pub mod config;
pub mod detect;
pub mod market;
pub mod model;
pub mod report;

use std::io::Read;
use std::path::Path;

use serde_json::Value;
use tender_core::error::TenderError;

/// Read a text input; `-` reads stdin.
pub fn read_input(path: &Path) -> Result<String, TenderError> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

/// Read and parse a JSON input; `-` reads stdin.
pub fn read_json(path: &Path) -> Result<Value, TenderError> {
    Ok(serde_json::from_str(&read_input(path)?)?)
}
