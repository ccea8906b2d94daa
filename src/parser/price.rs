use regex::Regex;
use std::sync::LazyLock;

use crate::core::types::positive_price;

static NUMERIC_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d[\d,]*(?:\.\d+)?").expect("valid numeric pattern"));

/// Converts free-text currency such as `"£1,299.99"` into an amount.
///
/// Commas are thousands separators unless the token is `digits,dd` with no
/// dot, in which case the comma is read as a decimal point. Returns `None`
/// when the text carries no digits. The result is rounded to 2 decimal places.
pub fn normalize_price(text: &str) -> Option<f64> {
    let token = NUMERIC_TOKEN.find(text)?.as_str().trim_end_matches(',');

    let numeric = match token.rsplit_once(',') {
        Some((head, tail))
            if !token.contains('.')
                && tail.len() == 2
                && !head.contains(',') =>
        {
            format!("{}.{}", head, tail)
        }
        _ => token.replace(',', ""),
    };

    let amount: f64 = numeric.parse().ok()?;
    Some((amount * 100.0).round() / 100.0)
}

/// Normalized price, kept only when positive.
pub fn normalize_positive_price(text: Option<&str>) -> Option<f64> {
    text.and_then(normalize_price).and_then(positive_price)
}
