use serde::Serialize;
use tender_core::error::TenderError;

pub fn print<T: Serialize>(value: &T) -> Result<(), TenderError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
