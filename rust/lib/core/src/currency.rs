//! Currency symbols for the selected company.

use crate::model::Company;

/// Currency used when no company is selected.
pub const DEFAULT_CURRENCY: &str = "INR";

const SYMBOLS: &[(&str, &str)] = &[
    ("INR", "₹"),
    ("USD", "$"),
    ("EUR", "€"),
    ("GBP", "£"),
    ("JPY", "¥"),
    ("CNY", "¥"),
    ("AUD", "A$"),
    ("CAD", "C$"),
    ("SGD", "S$"),
    ("AED", "د.إ"),
    ("NPR", "रू"),
    ("BDT", "৳"),
    ("LKR", "Rs"),
    ("PKR", "₨"),
];

/// Symbol for an ISO currency code. Unknown codes render as the code.
pub fn symbol_for(code: &str) -> String {
    let code = code.trim();
    if code.is_empty() {
        return symbol_for(DEFAULT_CURRENCY);
    }
    SYMBOLS
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code))
        .map(|(_, s)| s.to_string())
        .unwrap_or_else(|| code.to_ascii_uppercase())
}

/// Symbol for the selected company, falling back to the default currency.
pub fn company_symbol(company: Option<&Company>) -> String {
    match company {
        Some(c) => symbol_for(&c.currency),
        None => symbol_for(DEFAULT_CURRENCY),
    }
}

pub fn format_amount(symbol: &str, value: f64) -> String {
    format!("{}{:.2}", symbol, value)
}
