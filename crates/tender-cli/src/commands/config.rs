use std::path::Path;

use tender_core::config::{to_toml, TenderConfig};
use tender_core::error::TenderError;

pub fn show(config: &TenderConfig) -> Result<(), TenderError> {
    print!("{}", to_toml(config)?);
    Ok(())
}

pub fn init(path: &Path, force: bool) -> Result<(), TenderError> {
    if path.exists() && !force {
        return Err(TenderError::ConfigLoad {
            path: path.to_path_buf(),
            reason: "file already exists (use --force to overwrite)".into(),
        });
    }
    std::fs::write(path, to_toml(&TenderConfig::default())?)?;
    eprintln!("Wrote default config to {}", path.display());
    Ok(())
}
