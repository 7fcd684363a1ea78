//! Formatting Utilities
//!
//! Currency display/parsing for prices held in minor units, and identifier
//! generation for new documents.

use rand::Rng;

const CURRENCY_PREFIX: &str = "R$ ";

/// Render a minor-unit amount as Brazilian currency, e.g. `1050` -> `R$ 10,50`.
pub fn format_price(minor_units: i64) -> String {
    let sign = if minor_units < 0 { "-" } else { "" };
    let abs = minor_units.unsigned_abs();
    let whole = (abs / 100).to_string();
    let cents = abs % 100;

    // Group the integer part in thousands with '.'
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    format!("{}{}{},{:02}", sign, CURRENCY_PREFIX, grouped, cents)
}

/// Parse whatever is in a price field back into minor units.
///
/// Only ASCII digits are kept, so both raw keystrokes (`"1050"`) and the
/// formatted display (`"R$ 10,50"`) map to `1050`. Input with no digits maps
/// to zero; input too large to represent keeps `last_valid`.
pub fn parse_price_input(input: &str, last_valid: i64) -> i64 {
    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return 0;
    }
    digits.parse::<i64>().unwrap_or(last_valid)
}

/// Generate a random GUID-shaped identifier (`8-4-4-4-12` lowercase hex).
pub fn new_id() -> String {
    let bytes: [u8; 16] = rand::thread_rng().gen();
    let hex: String = bytes.iter().map(|b| format!("{:02x}", b)).collect();
    format!(
        "{}-{}-{}-{}-{}",
        &hex[0..8],
        &hex[8..12],
        &hex[12..16],
        &hex[16..20],
        &hex[20..32]
    )
}
