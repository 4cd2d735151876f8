use tender_core::model::{CalculationResult, ExtractionResult, MarketPriceResult};
use tender_core::report::format::format_amount;

pub fn print_extraction(result: &ExtractionResult) {
    if let Some(ref path) = result.file_path {
        println!("=== {} ===\n", path);
    }
    println!("  Type:     {}", result.document_type);
    println!("  Currency: {}", result.currency);
    println!("\n  {}\n", result.summary);

    if result.pricing_items.is_empty() {
        println!("  No candidate pricing lines found.");
        return;
    }

    println!("  Candidate lines:");
    for (i, candidate) in result.pricing_items.iter().enumerate() {
        println!("  {:>3}. {}", i + 1, candidate.description_guess);
    }
}

pub fn print_calculation(result: &CalculationResult) {
    let totals = &result.totals;
    println!(
        "=== Pricing ({}, VAT {}%) ===\n",
        totals.currency,
        totals.vat_percent.normalize()
    );

    let desc_width = result
        .items
        .iter()
        .map(|l| l.description.chars().count())
        .max()
        .unwrap_or(0)
        .clamp(11, 48);

    println!(
        "  {:<dw$}  {:<8}  {:>10}  {:>12}  {:>14}  {:>14}",
        "Description",
        "Unit",
        "Qty",
        "Rate",
        "Total ex VAT",
        "Total inc VAT",
        dw = desc_width
    );
    println!("  {}", "-".repeat(desc_width + 70));

    for line in &result.items {
        let description: String = line.description.chars().take(desc_width).collect();
        println!(
            "  {:<dw$}  {:<8}  {:>10}  {:>12}  {:>14}  {:>14}",
            description,
            line.unit,
            line.quantity.normalize(),
            format_amount(line.rate_with_markup),
            format_amount(line.line_total_ex_vat),
            format_amount(line.line_total_inc_vat),
            dw = desc_width
        );
    }

    println!();
    println!("  Total ex VAT:  {:>14}", format_amount(totals.total_ex_vat));
    println!("  VAT:           {:>14}", format_amount(totals.total_vat));
    println!("  Total inc VAT: {:>14}", format_amount(totals.total_inc_vat));
}

pub fn print_market(result: &MarketPriceResult) {
    let est = &result.estimates;
    println!(
        "  {}: {} {} - {}",
        result.item,
        est.currency,
        format_amount(est.min_estimate),
        format_amount(est.max_estimate)
    );
    println!("  (simulated estimate, verify against real quotations)");
}
