//! Serialize/deserialize tests for the domain models.

use docfill::models::{Message, Placeholder, PlaceholderKind, Role, Suggestion};

#[test]
fn placeholder_kind_serializes_uppercase() {
    let values = [
        (PlaceholderKind::Text, "\"TEXT\""),
        (PlaceholderKind::Date, "\"DATE\""),
        (PlaceholderKind::Money, "\"MONEY\""),
        (PlaceholderKind::Company, "\"COMPANY\""),
        (PlaceholderKind::Person, "\"PERSON\""),
    ];
    for (variant, expected) in values {
        let json = serde_json::to_string(&variant).expect("serialize");
        assert_eq!(json, expected, "PlaceholderKind::{variant:?}");
        let back: PlaceholderKind = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, variant);
    }
}

#[test]
fn placeholder_round_trip_exposes_kind_as_type() {
    let placeholder = Placeholder::new("[Company Name]".into(), PlaceholderKind::Company);
    let json = serde_json::to_value(&placeholder).expect("serialize");
    assert_eq!(json["type"], "COMPANY");
    assert_eq!(json["key"], "[Company Name]");

    let back: Placeholder = serde_json::from_value(json).expect("deserialize");
    assert_eq!(back, placeholder);
}

#[test]
fn is_filled_derives_from_value_presence() {
    let mut placeholder = Placeholder::new("[X]".into(), PlaceholderKind::Text);
    assert!(!placeholder.is_filled());

    placeholder.value = Some(String::new());
    assert!(!placeholder.is_filled());

    placeholder.value = Some("v".into());
    assert!(placeholder.is_filled());
}

#[test]
fn role_serializes_snake_case() {
    assert_eq!(serde_json::to_string(&Role::User).expect("serialize"), "\"user\"");
    assert_eq!(
        serde_json::to_string(&Role::Assistant).expect("serialize"),
        "\"assistant\""
    );
}

#[test]
fn message_round_trip() {
    let message = Message::assistant("Suggested values: {}");
    let json = serde_json::to_string(&message).expect("serialize");
    let back: Message = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, message);
}

#[test]
fn suggestion_round_trip() {
    let suggestion = Suggestion::new("[Company Name]".into(), "LEXSY, INC.".into(), 4);
    let json = serde_json::to_string(&suggestion).expect("serialize");
    let back: Suggestion = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, suggestion);
    assert_eq!(back.origin_message_index, 4);
}
