//! Key normalization and placeholder kind heuristics.

use crate::models::PlaceholderKind;

/// Tokens suggesting a money placeholder.
pub const MONEY_TOKENS: [&str; 8] = [
    "purchase amount",
    "purchase price",
    "price",
    "amount",
    "consideration",
    "principal",
    "valuation cap",
    "cap",
];

/// Tokens suggesting a date placeholder.
pub const DATE_TOKENS: [&str; 4] = ["date", "effective date", "closing date", "date of safe"];

/// Tokens suggesting a company-name placeholder.
pub const COMPANY_TOKENS: [&str; 6] = ["company", "issuer", "corporation", "startup", "llc", "inc"];

/// Tokens suggesting an investor/party-name placeholder.
pub const INVESTOR_TOKENS: [&str; 5] = ["investor", "purchaser", "buyer", "lender", "holder"];

/// Minimal key normalization: strip brackets and trim whitespace.
///
/// Keeps words separated and does not remove symbols like `$` or
/// underscores.
#[must_use]
pub fn normalize_key(key: &str) -> String {
    key.trim()
        .trim_matches(|c| c == '[' || c == ']')
        .trim()
        .to_owned()
}

/// Guess a placeholder's kind from tokens in its key.
///
/// Used only for input-hinting and prompt context, never for validation.
#[must_use]
pub fn guess_kind(key: &str) -> PlaceholderKind {
    let k = normalize_key(key).to_lowercase();
    if k.contains("date") {
        return PlaceholderKind::Date;
    }
    if [
        "amount",
        "price",
        "cap",
        "valuation",
        "purchase",
        "principal",
        "dollar",
    ]
    .iter()
    .any(|t| k.contains(t))
    {
        return PlaceholderKind::Money;
    }
    if ["company", "corporation", "inc", "llc"]
        .iter()
        .any(|t| k.contains(t))
    {
        return PlaceholderKind::Company;
    }
    if ["investor", "name", "title"].iter().any(|t| k.contains(t)) {
        return PlaceholderKind::Person;
    }
    PlaceholderKind::Text
}
