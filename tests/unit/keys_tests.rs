//! Unit tests for key normalization, kind guessing, and hints.

use docfill::models::PlaceholderKind;
use docfill::template::hints::generate_hint;
use docfill::template::keys::{guess_kind, normalize_key};

#[test]
fn normalize_strips_brackets_and_whitespace() {
    assert_eq!(normalize_key("[Company Name]"), "Company Name");
    assert_eq!(normalize_key("  [ Date of Safe ] "), "Date of Safe");
}

#[test]
fn normalize_keeps_symbols() {
    assert_eq!(normalize_key("[$ Amount_1]"), "$ Amount_1");
}

#[test]
fn kind_guessing_matches_key_tokens() {
    assert_eq!(guess_kind("[Date of Safe]"), PlaceholderKind::Date);
    assert_eq!(guess_kind("[Purchase Amount]"), PlaceholderKind::Money);
    assert_eq!(guess_kind("[Valuation Cap]"), PlaceholderKind::Money);
    assert_eq!(guess_kind("[Company Name]"), PlaceholderKind::Company);
    assert_eq!(guess_kind("[Investor Name]"), PlaceholderKind::Person);
    assert_eq!(guess_kind("[Title]"), PlaceholderKind::Person);
    assert_eq!(guess_kind("[State of Incorporation]"), PlaceholderKind::Company);
    assert_eq!(guess_kind("[Governing Law]"), PlaceholderKind::Text);
    assert_eq!(guess_kind("[Blank]"), PlaceholderKind::Text);
}

#[test]
fn date_wins_over_other_tokens() {
    // "Date of Safe" contains no money token, but "Closing Date Amount"
    // style keys resolve to date first.
    assert_eq!(guess_kind("[Closing Date Amount]"), PlaceholderKind::Date);
}

#[test]
fn hints_are_deterministic_and_token_driven() {
    assert_eq!(
        generate_hint("[Valuation Cap]"),
        "Maximum valuation used to compute conversion; a dollar amount"
    );
    assert_eq!(
        generate_hint("[Purchase Amount]"),
        "Amount of money to be paid by the buyer or investor"
    );
    assert_eq!(
        generate_hint("[Company Name]"),
        "Legal name of the issuing company"
    );
    assert_eq!(
        generate_hint("[Investor Name]"),
        "Legal name of the investor or purchaser"
    );
    assert_eq!(generate_hint("[Founder Name]"), "Personal full name");
    assert_eq!(
        generate_hint("[Governing Law]"),
        "Governing law or state/country of incorporation"
    );
    assert_eq!(
        generate_hint("[Date of Safe]"),
        "Calendar date of the event in Month D, YYYY format"
    );
    assert_eq!(
        generate_hint("[Misc]"),
        "Relevant value for this placeholder as it appears in the document"
    );
}
