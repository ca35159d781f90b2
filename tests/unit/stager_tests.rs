//! Unit tests for the suggestion stager contract.

use docfill::models::{PlaceholderKind, Suggestion};
use docfill::session::{PlaceholderStore, SuggestionStager};
use docfill::AppError;

fn store() -> PlaceholderStore {
    PlaceholderStore::seed([
        ("[Company Name]".to_owned(), PlaceholderKind::Company),
        ("[Effective Date]".to_owned(), PlaceholderKind::Date),
    ])
}

#[test]
fn stage_unknown_key_fails() {
    let store = store();
    let mut stager = SuggestionStager::default();
    let err = stager
        .stage(&store, Suggestion::new("[Missing]".into(), "v".into(), 0))
        .unwrap_err();
    assert!(matches!(err, AppError::UnknownKey(_)));
    assert!(stager.pending().is_empty());
}

#[test]
fn staging_twice_keeps_only_the_second_proposal() {
    let store = store();
    let mut stager = SuggestionStager::default();
    stager
        .stage(&store, Suggestion::new("[Company Name]".into(), "ACME".into(), 1))
        .unwrap();
    stager
        .stage(
            &store,
            Suggestion::new("[Company Name]".into(), "LEXSY, INC.".into(), 3),
        )
        .unwrap();

    let pending = stager.pending();
    assert_eq!(pending.len(), 1);
    assert_eq!(
        pending.get("[Company Name]").map(String::as_str),
        Some("LEXSY, INC.")
    );
}

#[test]
fn accept_returns_value_and_clears_the_stage() {
    let store = store();
    let mut stager = SuggestionStager::default();
    stager
        .stage(&store, Suggestion::new("[Company Name]".into(), "ACME".into(), 0))
        .unwrap();

    let value = stager.accept("[Company Name]").unwrap();
    assert_eq!(value, "ACME");
    assert!(!stager.has_pending("[Company Name]"));

    // No trace remains: a second accept must fail.
    let err = stager.accept("[Company Name]").unwrap_err();
    assert!(matches!(err, AppError::NoSuchSuggestion(_)));
}

#[test]
fn reject_discards_without_other_changes() {
    let store = store();
    let mut stager = SuggestionStager::default();
    stager
        .stage(&store, Suggestion::new("[Company Name]".into(), "ACME".into(), 0))
        .unwrap();
    stager
        .stage(
            &store,
            Suggestion::new("[Effective Date]".into(), "October 1, 2025".into(), 0),
        )
        .unwrap();

    stager.reject("[Company Name]").unwrap();
    assert!(!stager.has_pending("[Company Name]"));
    assert!(stager.has_pending("[Effective Date]"));

    let err = stager.reject("[Company Name]").unwrap_err();
    assert!(matches!(err, AppError::NoSuchSuggestion(_)));
}

#[test]
fn reject_never_staged_key_fails() {
    let mut stager = SuggestionStager::default();
    let err = stager.reject("[Company Name]").unwrap_err();
    assert!(matches!(err, AppError::NoSuchSuggestion(_)));
}

#[test]
fn invalidate_is_silent_for_absent_keys() {
    let store = store();
    let mut stager = SuggestionStager::default();
    stager.invalidate("[Company Name]");

    stager
        .stage(&store, Suggestion::new("[Company Name]".into(), "ACME".into(), 0))
        .unwrap();
    stager.invalidate("[Company Name]");
    assert!(stager.pending().is_empty());
}
