use rust_decimal::Decimal;

use crate::model::PricingItem;
use crate::parsing::values::parse_decimal;

/// Unit used when a rate-sheet line gives none.
pub const DEFAULT_UNIT: &str = "unit";

/// Parse a company rate sheet into pricing items.
///
/// One record per line: `description, unit_cost[, unit[, default_quantity]]`.
/// Blank lines and `#` comments are ignored. A line with fewer than two
/// fields or a non-numeric cost is skipped; a bad quantity falls back to 1.
pub fn parse_rate_sheet(text: &str, markup_percent: Decimal) -> Vec<PricingItem> {
    text.lines()
        .filter_map(|line| parse_rate_line(line, markup_percent))
        .collect()
}

/// Try to parse a single rate-sheet line. Returns None if it is not a record.
fn parse_rate_line(line: &str, markup_percent: Decimal) -> Option<PricingItem> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() < 2 {
        return None;
    }

    let base_rate = parse_decimal(fields[1])?;

    let unit = match fields.get(2) {
        Some(u) if !u.is_empty() => u.to_string(),
        _ => DEFAULT_UNIT.to_string(),
    };

    let quantity = fields
        .get(3)
        .and_then(|q| parse_decimal(q))
        .unwrap_or(Decimal::ONE);

    Some(PricingItem {
        description: fields[0].to_string(),
        unit,
        quantity,
        base_rate,
        markup_percent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn parse(text: &str) -> Vec<PricingItem> {
        parse_rate_sheet(text, dec!(25))
    }

    #[test]
    fn test_full_record() {
        let items = parse("Security Guard Grade C, 22.50, hour, 720");
        assert_eq!(items.len(), 1);
        let item = &items[0];
        assert_eq!(item.description, "Security Guard Grade C");
        assert_eq!(item.base_rate, dec!(22.50));
        assert_eq!(item.unit, "hour");
        assert_eq!(item.quantity, dec!(720));
        assert_eq!(item.markup_percent, dec!(25));
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let items = parse("Site supervisor, 450");
        assert_eq!(items[0].unit, "unit");
        assert_eq!(items[0].quantity, dec!(1));

        let items = parse("Radio, 35.00, , ");
        assert_eq!(items[0].unit, "unit");
        assert_eq!(items[0].quantity, dec!(1));
    }

    #[test]
    fn test_bad_quantity_falls_back_to_one() {
        let items = parse("Vehicle patrol, 1200, month, twelve");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, dec!(1));
    }

    #[test]
    fn test_malformed_lines_skipped() {
        assert!(parse("Bad Line").is_empty());
        assert!(parse("Bad, abc").is_empty());
        assert!(parse("").is_empty());
        assert!(parse("   \n\n").is_empty());
        assert!(parse("# description, cost, unit, qty").is_empty());
    }

    #[test]
    fn test_mixed_sheet_keeps_good_lines_in_order() {
        let sheet = "\
# guarding rates
Security Guard Grade C, 22.50, hour, 720
Bad Line

Security Guard Grade B, 27.00, hour, 360
Armed response, n/a, call
Control room operator, 25, shift, 60";
        let items = parse(sheet);
        let names: Vec<&str> = items.iter().map(|i| i.description.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Security Guard Grade C",
                "Security Guard Grade B",
                "Control room operator"
            ]
        );
    }

    #[test]
    fn test_extra_fields_ignored() {
        let items = parse("Cleaner, 18, hour, 100, weekdays only");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, dec!(100));
    }

    #[test]
    fn test_markup_is_configurable() {
        let items = parse_rate_sheet("Guard, 10", dec!(30));
        assert_eq!(items[0].markup_percent, dec!(30));
    }
}
