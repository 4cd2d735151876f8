//! Toolkit configuration.
//!
//! Loaded from a TOML file (`tender.toml` by convention). Every field has a
//! default, so a missing file or a partial file is always valid.

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::TenderError;

/// Top-level config, deserialized from TOML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TenderConfig {
    #[serde(default)]
    pub pricing: PricingDefaults,

    #[serde(default)]
    pub report: ReportConfig,

    #[serde(default)]
    pub market: MarketConfig,
}

/// `[pricing]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingDefaults {
    /// Currency code stamped on models and used when a model omits one.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// VAT applied when a model's metadata has no `vat_percent`.
    #[serde(default = "default_vat_percent")]
    pub vat_percent: Decimal,

    /// Markup given to every item parsed from a rate sheet.
    #[serde(default = "default_markup_percent")]
    pub default_markup_percent: Decimal,
}

impl Default for PricingDefaults {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            vat_percent: default_vat_percent(),
            default_markup_percent: default_markup_percent(),
        }
    }
}

fn default_currency() -> String {
    "ZAR".into()
}
fn default_vat_percent() -> Decimal {
    Decimal::from(15)
}
fn default_markup_percent() -> Decimal {
    Decimal::from(25)
}

/// `[report]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_report_title")]
    pub title: String,

    /// External HTML template. The built-in template is used when unset or unreadable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_path: Option<PathBuf>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: default_report_title(),
            template_path: None,
        }
    }
}

fn default_report_title() -> String {
    "Tender Pricing Schedule".into()
}

/// `[market]` section for the simulated price band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketConfig {
    #[serde(default = "default_base_price")]
    pub base_price: Decimal,

    #[serde(default = "default_low_factor")]
    pub low_factor: Decimal,

    #[serde(default = "default_high_factor")]
    pub high_factor: Decimal,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            base_price: default_base_price(),
            low_factor: default_low_factor(),
            high_factor: default_high_factor(),
        }
    }
}

fn default_base_price() -> Decimal {
    Decimal::from(1000)
}
fn default_low_factor() -> Decimal {
    Decimal::new(7, 1)
}
fn default_high_factor() -> Decimal {
    Decimal::new(13, 1)
}

/// Load config from `path`, or defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<TenderConfig, TenderError> {
    match path {
        Some(path) => load_config_from(path),
        None => {
            tracing::debug!("no config file given, using defaults");
            Ok(TenderConfig::default())
        }
    }
}

/// Load config from a specific TOML file.
pub fn load_config_from(path: &Path) -> Result<TenderConfig, TenderError> {
    let content = std::fs::read_to_string(path).map_err(|e| TenderError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_config(&content, path)
}

/// Parse config from a TOML string; `source` is only used in errors.
pub fn parse_config(content: &str, source: &Path) -> Result<TenderConfig, TenderError> {
    toml::from_str(content).map_err(|e| TenderError::ConfigLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Render config as pretty TOML.
pub fn to_toml(config: &TenderConfig) -> Result<String, TenderError> {
    toml::to_string_pretty(config).map_err(|e| TenderError::ConfigLoad {
        path: PathBuf::from("<memory>"),
        reason: e.to_string(),
    })
}
