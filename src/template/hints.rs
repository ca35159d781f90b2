//! Deterministic semantic hints fed to the assistant prompt.

use super::keys::normalize_key;

/// Heuristic hint giving the model semantic context for a placeholder key.
///
/// Deterministic and conservative; keys that match nothing get a generic
/// hint.
#[must_use]
pub fn generate_hint(key: &str) -> String {
    let k = normalize_key(key).to_lowercase();

    // Money
    if [
        "purchase amount",
        "purchase price",
        "price",
        "amount",
        "consideration",
        "principal",
        "valuation cap",
        "cap",
    ]
    .iter()
    .any(|w| k.contains(w))
    {
        if k.contains("valuation") || k.contains("cap") {
            return "Maximum valuation used to compute conversion; a dollar amount".into();
        }
        if k.contains("principal") {
            return "Principal money amount agreed in the instrument".into();
        }
        if k.contains("purchase price") || k.contains("purchase amount") || k.contains("price") {
            return "Amount of money to be paid by the buyer or investor".into();
        }
        return "Dollar amount relevant to the agreement".into();
    }

    // Company / party names
    if ["company", "corporation", "issuer", "startup", "entity name"]
        .iter()
        .any(|w| k.contains(w))
    {
        return "Legal name of the issuing company".into();
    }
    if ["investor", "purchaser", "buyer", "lender", "holder"]
        .iter()
        .any(|w| k.contains(w))
    {
        return "Legal name of the investor or purchaser".into();
    }
    if k.contains("name") && !k.contains("company") && !k.contains("investor") {
        return "Personal full name".into();
    }
    if k.contains("title") {
        return "Person's title or role (e.g., CEO, CFO)".into();
    }

    // Jurisdiction / location
    if ["state", "jurisdiction", "governing law", "governing", "country"]
        .iter()
        .any(|w| k.contains(w))
    {
        return "Governing law or state/country of incorporation".into();
    }

    // Date
    if k.contains("date") {
        return "Calendar date of the event in Month D, YYYY format".into();
    }

    "Relevant value for this placeholder as it appears in the document".into()
}
