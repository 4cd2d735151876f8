use crate::config::PricingDefaults;
use crate::model::{ModelMeta, PricingModel};
use crate::parsing::rates::parse_rate_sheet;

/// Description used when the caller gives none.
pub const DEFAULT_DESCRIPTION: &str = "Tender pricing model";

pub const MODEL_NOTES: &str = "This is a base pricing model. Confirm all quantities, units, \
mark-ups and any statutory or sector-specific requirements before use.";

/// Build an editable pricing model from free text and a company rate sheet.
///
/// Deterministic: the rate sheet is the only source of items. Callers are
/// expected to adjust items before calculating.
pub fn build_pricing_model(
    description: &str,
    tender_rules: &str,
    company_rates: &str,
    defaults: &PricingDefaults,
) -> PricingModel {
    let items = parse_rate_sheet(company_rates, defaults.default_markup_percent);
    tracing::debug!(items = items.len(), "parsed company rate sheet");

    let description = match description.trim() {
        "" => DEFAULT_DESCRIPTION.to_string(),
        d => d.to_string(),
    };

    PricingModel {
        meta: ModelMeta {
            description,
            tender_rules: tender_rules.trim().to_string(),
            currency: defaults.currency.clone(),
            vat_percent: defaults.vat_percent,
            default_markup_percent: defaults.default_markup_percent,
            notes: MODEL_NOTES.to_string(),
        },
        items,
    }
}
