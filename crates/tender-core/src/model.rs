use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::config::PricingDefaults;
use crate::error::TenderError;

/// Document categories recognised by the keyword classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentType {
    #[serde(rename = "RFQ (Request for Quotation)")]
    Rfq,
    #[serde(rename = "RFP (Request for Proposal)")]
    Rfp,
    #[serde(rename = "Tender / RFB")]
    TenderRfb,
    #[serde(rename = "Bill of Quantities / Pricing Schedule")]
    BillOfQuantities,
    #[serde(rename = "Pricing Schedule")]
    PricingSchedule,
    #[serde(rename = "Terms & Conditions")]
    TermsAndConditions,
    #[serde(rename = "Procurement-related document")]
    Procurement,
}

impl DocumentType {
    pub fn label(&self) -> &'static str {
        match self {
            DocumentType::Rfq => "RFQ (Request for Quotation)",
            DocumentType::Rfp => "RFP (Request for Proposal)",
            DocumentType::TenderRfb => "Tender / RFB",
            DocumentType::BillOfQuantities => "Bill of Quantities / Pricing Schedule",
            DocumentType::PricingSchedule => "Pricing Schedule",
            DocumentType::TermsAndConditions => "Terms & Conditions",
            DocumentType::Procurement => "Procurement-related document",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A line of the excerpt that looks like it might carry a price.
///
/// The guesses are advisory only; quantity and unit are never inferred.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateLine {
    pub raw_line: String,
    pub description_guess: String,
    pub quantity_guess: Option<Decimal>,
    pub unit_guess: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub summary: String,
    pub currency: String,
    pub pricing_items: Vec<CandidateLine>,
    /// The pricing excerpt the candidates were taken from.
    pub raw_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    pub document_type: DocumentType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingItem {
    pub description: String,
    pub unit: String,
    pub quantity: Decimal,
    pub base_rate: Decimal,
    pub markup_percent: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMeta {
    pub description: String,
    pub tender_rules: String,
    pub currency: String,
    pub vat_percent: Decimal,
    pub default_markup_percent: Decimal,
    pub notes: String,
}

/// Editable pricing model handed between the build and calculate steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingModel {
    pub meta: ModelMeta,
    pub items: Vec<PricingItem>,
}

impl PricingModel {
    /// Run the calculator over this model.
    pub fn calculate(&self, defaults: &PricingDefaults) -> Result<CalculationResult, TenderError> {
        let value = serde_json::to_value(self)?;
        crate::pricing::calculate(&value, defaults)
    }
}

/// One priced line. Keys the caller attached to the input item that are not
/// pricing fields are kept in `extra` and serialized alongside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatedLineItem {
    pub description: String,
    pub unit: String,
    pub quantity: Decimal,
    pub base_rate: Decimal,
    pub markup_percent: Decimal,
    pub rate_with_markup: Decimal,
    pub line_total_ex_vat: Decimal,
    pub line_vat_amount: Decimal,
    pub line_total_inc_vat: Decimal,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub total_ex_vat: Decimal,
    pub total_vat: Decimal,
    pub total_inc_vat: Decimal,
    pub currency: String,
    pub vat_percent: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Model metadata exactly as supplied.
    pub meta: Value,
    pub items: Vec<CalculatedLineItem>,
    pub totals: Totals,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceEstimate {
    pub min_estimate: Decimal,
    pub max_estimate: Decimal,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketPriceResult {
    pub item: String,
    pub estimates: PriceEstimate,
}

pub const HTML_MIME_TYPE: &str = "text/html";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HtmlDocument {
    pub mime_type: String,
    pub html: String,
}

impl HtmlDocument {
    pub fn new(html: impl Into<String>) -> Self {
        HtmlDocument {
            mime_type: HTML_MIME_TYPE.to_string(),
            html: html.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_type_serializes_as_label() {
        let json = serde_json::to_string(&DocumentType::BillOfQuantities).unwrap();
        assert_eq!(json, "\"Bill of Quantities / Pricing Schedule\"");
        assert_eq!(DocumentType::Rfq.to_string(), "RFQ (Request for Quotation)");
    }

    #[test]
    fn test_calculated_line_flattens_extra_keys() {
        let mut extra = Map::new();
        extra.insert("section".into(), Value::from("A"));
        let line = CalculatedLineItem {
            description: "Guard".into(),
            unit: "hour".into(),
            quantity: Decimal::ONE,
            base_rate: Decimal::ONE,
            markup_percent: Decimal::ZERO,
            rate_with_markup: Decimal::ONE,
            line_total_ex_vat: Decimal::ONE,
            line_vat_amount: Decimal::ZERO,
            line_total_inc_vat: Decimal::ONE,
            extra,
        };
        let value = serde_json::to_value(&line).unwrap();
        assert_eq!(value["section"], "A");
        assert_eq!(value["description"], "Guard");
    }
}
