//! Display formatting tests for the application error enum.

use docfill::AppError;

#[test]
fn display_includes_variant_context() {
    let cases = [
        (
            AppError::Config("bad port".into()),
            "config: bad port",
        ),
        (
            AppError::UnknownKey("[X]".into()),
            "unknown placeholder key: [X]",
        ),
        (
            AppError::NoSuchSuggestion("[X]".into()),
            "no pending suggestion for key: [X]",
        ),
        (
            AppError::SessionNotFound("abc".into()),
            "session not found: abc",
        ),
        (
            AppError::AssistantUnavailable("timeout".into()),
            "assistant unavailable: timeout",
        ),
        (AppError::Capacity("full".into()), "capacity: full"),
        (AppError::Parse("empty".into()), "parse: empty"),
        (AppError::Http("bind".into()), "http: bind"),
    ];

    for (err, expected) in cases {
        assert_eq!(err.to_string(), expected);
    }
}

#[test]
fn invalid_toml_converts_to_config_error() {
    let err: AppError = toml::from_str::<toml::Value>("= nonsense")
        .map(|_| AppError::Http("unreachable".into()))
        .unwrap_err()
        .into();
    assert!(matches!(err, AppError::Config(_)));
}
