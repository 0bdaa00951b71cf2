use crate::error::{CalcError, Result};

/// Parse a display-formatted catalog cost such as `"$1,099.20"` into a number.
///
/// Everything except digits, `.` and `-` is stripped before parsing. The
/// product name is only used to label the error.
pub fn parse_currency(product: &str, raw: &str) -> Result<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(CalcError::MalformedCost {
            product: product.to_string(),
            value: raw.to_string(),
        }),
    }
}

/// Format a dollar amount with two decimals and thousands separators.
pub fn format_currency(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let cents = (amount.abs() * 100.0).round() as u64;
    let dollars = (cents / 100).to_string();

    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, ch) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}${}.{:02}", sign, grouped, cents % 100)
}
