use rust_decimal::Decimal;

use crate::pricing::round_money;

/// Format an amount with thousands separators and two decimals: `1234567.8` -> `1,234,567.80`.
pub fn format_amount(value: Decimal) -> String {
    let fixed = format!("{:.2}", round_money(value));
    let (sign, digits) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    // "-0.00" reads oddly in a table
    if grouped.chars().all(|c| c == '0' || c == ',') && frac_part.chars().all(|c| c == '0') {
        return format!("{grouped}.{frac_part}");
    }
    format!("{sign}{grouped}.{frac_part}")
}

/// Escape text for HTML element content and attribute values.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(dec!(0)), "0.00");
        assert_eq!(format_amount(dec!(5)), "5.00");
        assert_eq!(format_amount(dec!(999.999)), "1,000.00");
        assert_eq!(format_amount(dec!(1234567.8)), "1,234,567.80");
        assert_eq!(format_amount(dec!(123456)), "123,456.00");
        assert_eq!(format_amount(dec!(-20250.5)), "-20,250.50");
        assert_eq!(format_amount(dec!(-0.001)), "0.00");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"Fees & "rates" <b>'x'</b>"#),
            "Fees &amp; &quot;rates&quot; &lt;b&gt;&#39;x&#39;&lt;/b&gt;"
        );
    }
}
