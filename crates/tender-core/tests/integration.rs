//! Integration tests for the document screening and pricing pipelines.
//!
//! Uses a MockExtractor that returns pre-built page text without invoking
//! pdftotext, so these tests run without poppler-utils.

use std::io::Write;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;
use tender_core::config::{PricingDefaults, TenderConfig};
use tender_core::error::TenderError;
use tender_core::extraction::PdfExtractor;
use tender_core::model::DocumentType;
use tender_core::pricing::{build_pricing_model, calculate};
use tender_core::report::render_calculation;
use tender_core::tools::ToolKit;
use tender_core::{detect_requirements, screen_text};

struct MockExtractor {
    pages: Vec<String>,
}

impl PdfExtractor for MockExtractor {
    fn extract_pages(&self, _pdf_bytes: &[u8]) -> Result<Vec<String>, TenderError> {
        Ok(self.pages.clone())
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}

fn pdf_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
    file.write_all(b"%PDF-1.4 placeholder").unwrap();
    file
}

// ---------------------------------------------------------------------------
// Test 1: BOQ section in a PDF tender is found and screened
// ---------------------------------------------------------------------------
#[test]
fn pdf_tender_with_boq_section() {
    let extractor = MockExtractor {
        pages: vec![
            "INVITATION TO BID\r\nTender No: SEC-2025-014\r\n\r\n\r\n\r\nScope: guarding of three sites".into(),
            "SECTION 4   BILL OF QUANTITIES\nItem   Description                 Unit    Qty\n1      Security Guard Grade C      hour    720\n2      Armed response vehicle      month   12\nTotal".into(),
        ],
    };
    let file = pdf_file();

    let result = detect_requirements(file.path(), &extractor, "ZAR");

    // "tender no" (rule 3) precedes "bill of quantities" (rule 4)
    assert_eq!(result.document_type, DocumentType::TenderRfb);
    assert_eq!(result.currency, "ZAR");
    assert_eq!(result.file_path.as_deref(), Some(file.path().to_str().unwrap()));

    let raw: Vec<&str> = result.pricing_items.iter().map(|c| c.raw_line.as_str()).collect();
    assert_eq!(
        raw,
        vec![
            "Tender No: SEC-2025-014",
            "SECTION 4 BILL OF QUANTITIES",
            "1 Security Guard Grade C hour 720",
            "2 Armed response vehicle month 12",
        ]
    );
    assert!(result.summary.contains("Tender / RFB"));
    assert!(result.summary.contains("4 possible pricing-related lines"));
    assert!(result.raw_text.starts_with("INVITATION TO BID"));
}

// ---------------------------------------------------------------------------
// Test 2: Unreadable document degrades to empty screening
// ---------------------------------------------------------------------------
#[test]
fn unreadable_document_degrades_gracefully() {
    let extractor = MockExtractor { pages: vec![] };
    let result = detect_requirements(std::path::Path::new("/missing/tender.docx"), &extractor, "ZAR");

    assert_eq!(result.document_type, DocumentType::Procurement);
    assert!(result.pricing_items.is_empty());
    assert_eq!(result.raw_text, "");
}

// ---------------------------------------------------------------------------
// Test 3: No keyword falls back to the leading text
// ---------------------------------------------------------------------------
#[test]
fn text_without_pricing_keywords_uses_leading_excerpt() {
    let text = "Request for Quotation\nSupply of 40 office chairs by 30 June 2025\nContact: procurement office";
    let result = screen_text(text, "ZAR");
    assert_eq!(result.document_type, DocumentType::Rfq);
    assert_eq!(result.raw_text, text);
    assert_eq!(result.pricing_items.len(), 1);
    assert_eq!(
        result.pricing_items[0].description_guess,
        "Supply of 40 office chairs by 30 June 2025"
    );
}

// ---------------------------------------------------------------------------
// Test 4: Rate sheet -> model -> edit -> calculate -> report
// ---------------------------------------------------------------------------
#[test]
fn rate_sheet_to_report() {
    let defaults = PricingDefaults::default();
    let mut model = build_pricing_model(
        "Guarding services",
        "All prices VAT inclusive",
        "# rates\nSecurity Guard Grade C, 22.50, hour, 720\nBad Line\nSupervisor, 35, hour",
        &defaults,
    );
    assert_eq!(model.items.len(), 2);

    // The caller edits the model between build and calculate.
    model.items[1].quantity = dec!(180);
    model.items[1].markup_percent = dec!(20);

    let result = model.calculate(&defaults).unwrap();
    // Supervisor: 35 * 1.2 = 42.00; 180 * 42 = 7560.00; VAT 1134.00
    assert_eq!(result.items[1].line_total_ex_vat, dec!(7560.00));
    assert_eq!(result.items[1].line_vat_amount, dec!(1134.00));
    assert_eq!(result.totals.total_ex_vat, dec!(27810.00));
    assert_eq!(result.totals.total_vat, dec!(4171.50));
    assert_eq!(result.totals.total_inc_vat, dec!(31981.50));
    assert_eq!(
        result.totals.total_inc_vat,
        result.totals.total_ex_vat + result.totals.total_vat
    );

    let doc = render_calculation(&result, &TenderConfig::default().report).unwrap();
    assert!(doc.html.contains("<td>31,981.50</td>"));
    assert!(doc.html.contains("Guarding services"));
}

// ---------------------------------------------------------------------------
// Test 5: Empty rate sheet end to end
// ---------------------------------------------------------------------------
#[test]
fn empty_rate_sheet_end_to_end() {
    let kit = ToolKit::new(TenderConfig::default());
    let built = kit.build_model("", "", "");
    assert!(built.payload.model.items.is_empty());

    let value = serde_json::to_value(&built).unwrap();
    let calculated = kit.calculate(&value).unwrap();
    assert!(calculated.payload.items.is_empty());
    assert_eq!(calculated.payload.totals.total_ex_vat, Decimal::ZERO);
    assert_eq!(calculated.payload.totals.total_vat, Decimal::ZERO);
    assert_eq!(calculated.payload.totals.total_inc_vat, Decimal::ZERO);

    let report = kit.render_report(&serde_json::to_value(&calculated).unwrap());
    assert_eq!(report.payload.html.matches("<td>0.00</td>").count(), 3);
}

// ---------------------------------------------------------------------------
// Test 6: Permuting items keeps totals
// ---------------------------------------------------------------------------
#[test]
fn totals_survive_any_item_order() {
    let items = vec![
        json!({"description": "a", "quantity": 3, "base_rate": 10.005, "markup_percent": 0}),
        json!({"description": "b", "quantity": 7, "base_rate": 0.125, "markup_percent": 10}),
        json!({"description": "c", "quantity": 1, "base_rate": 99.995, "markup_percent": 33.3}),
    ];
    let defaults = PricingDefaults::default();
    let baseline = calculate(&json!({"items": items}), &defaults).unwrap().totals;

    for order in [[0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]] {
        let permuted: Vec<_> = order.iter().map(|&i| items[i].clone()).collect();
        let totals = calculate(&json!({"items": permuted}), &defaults).unwrap().totals;
        assert_eq!(totals, baseline);
    }
}

// ---------------------------------------------------------------------------
// Test 7: Only structural problems are errors
// ---------------------------------------------------------------------------
#[test]
fn only_structural_problems_fail() {
    let defaults = PricingDefaults::default();
    let tolerated = json!({
        "meta": "not even an object",
        "items": [{"quantity": "lots", "base_rate": [], "markup_percent": {}}]
    });
    let result = calculate(&tolerated, &defaults).unwrap();
    assert_eq!(result.totals.total_inc_vat, Decimal::ZERO);
    assert_eq!(result.totals.vat_percent, dec!(15));

    assert!(matches!(
        calculate(&json!({"items": "1,2,3"}), &defaults),
        Err(TenderError::InputShape(_))
    ));
    assert!(matches!(
        calculate(&json!(["items"]), &defaults),
        Err(TenderError::InputShape(_))
    ));
}
