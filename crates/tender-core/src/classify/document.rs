use crate::model::DocumentType;

/// Ordered keyword rules; the first rule with any matching keyword wins.
const RULES: &[(&[&str], DocumentType)] = &[
    (&["request for quotation", "rfq"], DocumentType::Rfq),
    (&["request for proposal", "rfp"], DocumentType::Rfp),
    (
        &["invitation to bid", "tender no", "bid number"],
        DocumentType::TenderRfb,
    ),
    (
        &["bill of quantities", "boq"],
        DocumentType::BillOfQuantities,
    ),
    (
        &["pricing schedule", "price schedule"],
        DocumentType::PricingSchedule,
    ),
    (&["terms and conditions"], DocumentType::TermsAndConditions),
];

/// Classify normalized document text by keyword.
///
/// Case-insensitive substring search over a fixed rule order. Text that
/// matches no rule is a generic procurement document.
pub fn classify_document(text: &str) -> DocumentType {
    let lower = text.to_lowercase();
    RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|kw| lower.contains(kw)))
        .map(|(_, doc_type)| *doc_type)
        .unwrap_or(DocumentType::Procurement)
}
