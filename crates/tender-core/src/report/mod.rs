pub mod format;
pub mod template;

use rust_decimal::Decimal;
use serde_json::{Map, Value};

use crate::config::ReportConfig;
use crate::error::TenderError;
use crate::model::{CalculationResult, HtmlDocument};
use crate::parsing::values::decimal_from_value;
use format::{escape_html, format_amount};
use template::{fill_placeholders, load_template};

/// Table columns, in order: (header, item key, numeric).
const COLUMNS: &[(&str, &str, bool)] = &[
    ("Description", "description", false),
    ("Unit", "unit", false),
    ("Qty", "quantity", true),
    ("Base Rate", "base_rate", true),
    ("Markup %", "markup_percent", true),
    ("Rate w/ Markup", "rate_with_markup", true),
    ("Line Total ex VAT", "line_total_ex_vat", true),
    ("VAT", "line_vat_amount", true),
    ("Line Total inc VAT", "line_total_inc_vat", true),
];

/// Columns spanned by the footer label.
const FOOTER_LABEL_SPAN: usize = 6;

const DEFAULT_SUMMARY: &str = "Tender pricing schedule.";
const FALLBACK_CURRENCY: &str = "ZAR";
const FALLBACK_VAT_PERCENT: &str = "15";

/// Render pricing data (normally a calculation result, possibly hand-edited)
/// as an HTML document.
///
/// Never fails: missing sections render empty, missing totals render as zero.
pub fn render_report(pricing_data: &Value, config: &ReportConfig) -> HtmlDocument {
    let empty = Map::new();
    let meta = pricing_data
        .get("meta")
        .and_then(Value::as_object)
        .unwrap_or(&empty);
    let totals = pricing_data
        .get("totals")
        .and_then(Value::as_object)
        .unwrap_or(&empty);
    let items: &[Value] = pricing_data
        .get("items")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[]);

    let template = load_template(config.template_path.as_deref());
    let table = render_table(items, totals);

    let currency = totals
        .get("currency")
        .map(text_cell)
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| FALLBACK_CURRENCY.to_string());
    let vat_percent = totals
        .get("vat_percent")
        .or_else(|| meta.get("vat_percent"))
        .and_then(decimal_from_value)
        .map(|v| v.normalize().to_string())
        .unwrap_or_else(|| FALLBACK_VAT_PERCENT.to_string());
    let summary = ["summary", "instructions"]
        .iter()
        .find_map(|key| pricing_data.get(key).and_then(Value::as_str))
        .unwrap_or(DEFAULT_SUMMARY);

    let html = fill_placeholders(
        &template,
        &[
            (template::REPORT_TITLE, escape_html(&config.title)),
            (template::CURRENCY, escape_html(&currency)),
            (template::VAT_PERCENT, vat_percent),
            (template::SUMMARY, escape_html(summary)),
            (template::DESCRIPTION, meta.get("description").map(text_cell).unwrap_or_default()),
            (template::NOTES, meta.get("notes").map(text_cell).unwrap_or_default()),
            (template::PRICING_TABLE, table),
        ],
    );

    tracing::debug!(items = items.len(), bytes = html.len(), "rendered pricing report");
    HtmlDocument::new(html)
}

/// Typed convenience over [`render_report`].
pub fn render_calculation(
    result: &CalculationResult,
    config: &ReportConfig,
) -> Result<HtmlDocument, TenderError> {
    let value = serde_json::to_value(result)?;
    Ok(render_report(&value, config))
}

fn render_table(items: &[Value], totals: &Map<String, Value>) -> String {
    let header: String = COLUMNS
        .iter()
        .map(|(title, _, _)| format!("<th>{}</th>", escape_html(title)))
        .collect();

    let rows: String = items
        .iter()
        .map(|item| {
            let cells: String = COLUMNS
                .iter()
                .map(|(_, key, numeric)| {
                    let value = item.get(*key);
                    let cell = if *numeric {
                        value.map(number_cell).unwrap_or_default()
                    } else {
                        value.map(text_cell).unwrap_or_default()
                    };
                    format!("<td>{cell}</td>")
                })
                .collect();
            format!("\n        <tr>{cells}</tr>")
        })
        .collect();

    let total = |key: &str| {
        let amount = totals
            .get(key)
            .and_then(decimal_from_value)
            .unwrap_or(Decimal::ZERO);
        format_amount(amount)
    };

    format!(
        r#"
    <table>
      <thead>
        <tr>{header}</tr>
      </thead>
      <tbody>{rows}
      </tbody>
      <tfoot>
        <tr>
          <td colspan="{span}" style="text-align:right; font-weight:600;">Total ex VAT</td>
          <td>{ex}</td>
          <td>{vat}</td>
          <td>{inc}</td>
        </tr>
      </tfoot>
    </table>
    "#,
        span = FOOTER_LABEL_SPAN,
        ex = total("total_ex_vat"),
        vat = total("total_vat"),
        inc = total("total_inc_vat"),
    )
}

/// Numeric column: formatted amount, or empty when the value is not a number.
fn number_cell(value: &Value) -> String {
    decimal_from_value(value).map(format_amount).unwrap_or_default()
}

/// Text column: escaped string; numbers are formatted like amounts.
fn text_cell(value: &Value) -> String {
    match value {
        Value::String(s) => escape_html(s),
        Value::Number(_) => number_cell(value),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config() -> ReportConfig {
        ReportConfig::default()
    }

    fn calculated() -> Value {
        json!({
            "instructions": "Present these totals.",
            "meta": {"description": "Guarding <site A>", "notes": "Check PSIRA rates", "vat_percent": 15.0},
            "items": [{
                "description": "Security Guard Grade C",
                "unit": "hour",
                "quantity": 720,
                "base_rate": 22.5,
                "markup_percent": 25,
                "rate_with_markup": 28.13,
                "line_total_ex_vat": 20250,
                "line_vat_amount": 3037.5,
                "line_total_inc_vat": 23287.5
            }],
            "totals": {"total_ex_vat": 20250, "total_vat": 3037.5, "total_inc_vat": 23287.5, "currency": "ZAR", "vat_percent": 15.0}
        })
    }

    #[test]
    fn test_full_report() {
        let doc = render_report(&calculated(), &config());
        assert_eq!(doc.mime_type, "text/html");
        let html = &doc.html;
        assert!(html.contains("<h1>Tender Pricing Schedule</h1>"));
        assert!(html.contains("Currency: ZAR"));
        assert!(html.contains("VAT: 15%"));
        assert!(html.contains("Present these totals."));
        assert!(html.contains("Guarding &lt;site A&gt;"));
        assert!(html.contains("Check PSIRA rates"));
        assert!(html.contains(
            "<td>Security Guard Grade C</td><td>hour</td><td>720.00</td><td>22.50</td><td>25.00</td>\
             <td>28.13</td><td>20,250.00</td><td>3,037.50</td><td>23,287.50</td>"
        ));
        assert!(html.contains("<td>23,287.50</td>\n        </tr>\n      </tfoot>"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn test_header_has_nine_columns() {
        let doc = render_report(&calculated(), &config());
        assert_eq!(doc.html.matches("<th>").count(), 9);
        assert!(doc.html.contains("<th>Rate w/ Markup</th>"));
        assert!(doc.html.contains(r#"<td colspan="6" style="text-align:right; font-weight:600;">Total ex VAT</td>"#));
    }

    #[test]
    fn test_empty_items_renders_header_and_footer() {
        let doc = render_report(&json!({"items": [], "totals": {}}), &config());
        assert!(doc.html.contains("<thead>"));
        assert!(doc.html.contains("<tfoot>"));
        assert_eq!(doc.html.matches("<td>0.00</td>").count(), 3);
        assert!(doc.html.contains(DEFAULT_SUMMARY));
    }

    #[test]
    fn test_garbage_input_never_fails() {
        for data in [json!(null), json!([1, 2]), json!("x"), json!({"items": "nope", "totals": 3})] {
            let doc = render_report(&data, &config());
            assert!(doc.html.contains("Total ex VAT"));
        }
    }

    #[test]
    fn test_missing_and_non_numeric_cells_are_empty() {
        let data = json!({"items": [{"description": "Radio", "quantity": "TBC", "base_rate": null}]});
        let doc = render_report(&data, &config());
        assert!(doc.html.contains("<tr><td>Radio</td><td></td><td></td><td></td><td></td>"));
    }

    #[test]
    fn test_missing_template_file_uses_builtin_with_totals() {
        let config = ReportConfig {
            template_path: Some("/no/such/dir/base_template.html".into()),
            ..ReportConfig::default()
        };
        let doc = render_report(&calculated(), &config);
        assert!(doc.html.starts_with("<!DOCTYPE html>"));
        assert!(doc.html.contains("<td>20,250.00</td>"));
    }

    #[test]
    fn test_external_template() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.html");
        std::fs::write(&path, "[{{CURRENCY}}|{{VAT_PERCENT}}|{{UNKNOWN}}]{{PRICING_TABLE}}").unwrap();
        let config = ReportConfig {
            template_path: Some(path),
            ..ReportConfig::default()
        };
        let doc = render_report(&calculated(), &config);
        assert!(doc.html.starts_with("[ZAR|15|{{UNKNOWN}}]"));
        assert!(doc.html.contains("<table>"));
    }

    #[test]
    fn test_render_calculation_typed() {
        let defaults = crate::config::PricingDefaults::default();
        let result = crate::pricing::calculate(
            &json!({"items": [{"description": "Guard", "quantity": 2, "base_rate": 100, "markup_percent": 25}]}),
            &defaults,
        )
        .unwrap();
        let doc = render_calculation(&result, &config()).unwrap();
        assert!(doc.html.contains("<td>287.50</td>"));
    }
}
