use rust_decimal::Decimal;
use serde_json::{Map, Value};

use crate::config::PricingDefaults;
use crate::error::TenderError;
use crate::model::{CalculatedLineItem, CalculationResult, Totals};
use crate::parsing::values::{coerce_decimal, decimal_from_value};
use crate::pricing::round_money;

/// Item keys the calculator reads or writes; everything else is passed through.
const PRICING_KEYS: &[&str] = &[
    "description",
    "unit",
    "quantity",
    "base_rate",
    "markup_percent",
    "rate_with_markup",
    "line_total_ex_vat",
    "line_vat_amount",
    "line_total_inc_vat",
];

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Price every item of a pricing model and total the result.
///
/// Accepts the model itself or the `{"model": {...}}` wrapper produced by the
/// build step. Non-numeric quantities, rates and markups count as zero. The
/// only failure is a structurally wrong model: not an object, or an `items`
/// field that is not an array.
pub fn calculate(input: &Value, defaults: &PricingDefaults) -> Result<CalculationResult, TenderError> {
    let model = unwrap_model(input)?;

    let meta = model
        .get("meta")
        .cloned()
        .unwrap_or_else(|| Value::Object(Map::new()));

    let items: &[Value] = match model.get("items") {
        None => &[],
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(TenderError::InputShape(format!(
                "'items' must be an array, got {}",
                json_kind(other)
            )))
        }
    };

    let vat_percent = match meta.get("vat_percent") {
        None => defaults.vat_percent,
        Some(v) => coerce_decimal(Some(v)),
    };
    let currency = meta
        .get("currency")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| defaults.currency.clone());

    let lines: Vec<CalculatedLineItem> = items
        .iter()
        .map(|item| calculate_line(item, vat_percent))
        .collect();

    let totals = Totals {
        total_ex_vat: sum_rounded(lines.iter().map(|l| l.line_total_ex_vat)),
        total_vat: sum_rounded(lines.iter().map(|l| l.line_vat_amount)),
        total_inc_vat: sum_rounded(lines.iter().map(|l| l.line_total_inc_vat)),
        currency,
        vat_percent,
    };

    tracing::debug!(
        items = lines.len(),
        %vat_percent,
        total_inc_vat = %totals.total_inc_vat,
        "calculated pricing model"
    );

    Ok(CalculationResult {
        meta,
        items: lines,
        totals,
    })
}

fn unwrap_model(input: &Value) -> Result<&Map<String, Value>, TenderError> {
    let outer = input.as_object().ok_or_else(|| {
        TenderError::InputShape(format!("model must be an object, got {}", json_kind(input)))
    })?;
    match outer.get("model") {
        None => Ok(outer),
        Some(Value::Object(inner)) => Ok(inner),
        Some(other) => Err(TenderError::InputShape(format!(
            "'model' must be an object, got {}",
            json_kind(other)
        ))),
    }
}

/// Price one item. Derived amounts are each rounded from the unrounded value.
fn calculate_line(item: &Value, vat_percent: Decimal) -> CalculatedLineItem {
    let empty = Map::new();
    let fields = match item.as_object() {
        Some(map) => map,
        None => {
            tracing::warn!(kind = json_kind(item), "pricing item is not an object, pricing it as zero");
            &empty
        }
    };

    let quantity = coerce_decimal(fields.get("quantity"));
    let base_rate = coerce_decimal(fields.get("base_rate"));
    let markup_percent = coerce_decimal(fields.get("markup_percent"));

    let amounts = line_amounts(quantity, base_rate, markup_percent, vat_percent).unwrap_or_else(|| {
        tracing::warn!(%quantity, %base_rate, %markup_percent, "line amount overflows, pricing it as zero");
        LineAmounts::default()
    });

    let extra: Map<String, Value> = fields
        .iter()
        .filter(|(k, _)| !PRICING_KEYS.contains(&k.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    CalculatedLineItem {
        description: text_field(fields.get("description")),
        unit: text_field(fields.get("unit")),
        quantity,
        base_rate,
        markup_percent,
        rate_with_markup: round_money(amounts.rate_with_markup),
        line_total_ex_vat: round_money(amounts.ex_vat),
        line_vat_amount: round_money(amounts.vat),
        line_total_inc_vat: round_money(amounts.inc_vat),
        extra,
    }
}

#[derive(Debug, Default)]
struct LineAmounts {
    rate_with_markup: Decimal,
    ex_vat: Decimal,
    vat: Decimal,
    inc_vat: Decimal,
}

fn line_amounts(
    quantity: Decimal,
    base_rate: Decimal,
    markup_percent: Decimal,
    vat_percent: Decimal,
) -> Option<LineAmounts> {
    let markup_factor = Decimal::ONE.checked_add(markup_percent.checked_div(HUNDRED)?)?;
    let rate_with_markup = base_rate.checked_mul(markup_factor)?;
    let ex_vat = quantity.checked_mul(rate_with_markup)?;
    let vat = ex_vat.checked_mul(vat_percent.checked_div(HUNDRED)?)?;
    let inc_vat = ex_vat.checked_add(vat)?;
    Some(LineAmounts {
        rate_with_markup,
        ex_vat,
        vat,
        inc_vat,
    })
}

/// Sum already-rounded line values and round the sum again.
fn sum_rounded(values: impl Iterator<Item = Decimal>) -> Decimal {
    round_money(values.fold(Decimal::ZERO, |acc, v| acc.saturating_add(v)))
}

fn text_field(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(v @ Value::Number(_)) => decimal_from_value(v)
            .map(|d| d.normalize().to_string())
            .unwrap_or_default(),
        _ => String::new(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
