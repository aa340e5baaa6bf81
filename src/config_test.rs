use super::*;

#[test]
fn missing_block_yields_defaults() {
    let config = UiConfig::from_json(None).expect("defaults");
    assert_eq!(config, UiConfig::default());
    assert_eq!(config.toast_hide_ms, 3500);
    assert_eq!(config.redirect_delay_ms, 1200);
    assert_eq!(config.redirect_path, "/boards/");
    assert_eq!(config.carousel_interval_ms, 5000);
}

#[test]
fn blank_block_yields_defaults() {
    let config = UiConfig::from_json(Some("  \n ")).expect("defaults");
    assert_eq!(config, UiConfig::default());
}

#[test]
fn partial_block_overrides_only_given_fields() {
    let config = UiConfig::from_json(Some(r#"{"toast_limit": 2, "messages": {"access_revoked": "gone"}}"#))
        .expect("parsed");
    assert_eq!(config.toast_limit, 2);
    assert_eq!(config.messages.access_revoked, "gone");
    assert_eq!(config.messages.connection_lost, Messages::default().connection_lost);
    assert_eq!(config.toast_hide_ms, 3500);
    assert!(config.realtime);
}

#[test]
fn zero_values_are_normalized() {
    let config = UiConfig::from_json(Some(
        r#"{"toast_limit": 0, "carousel_interval_ms": 0, "socket_ping_ms": 0, "redirect_path": " "}"#,
    ))
    .expect("parsed");
    assert_eq!(config.toast_limit, 1);
    assert_eq!(config.carousel_interval_ms, 5000);
    assert_eq!(config.socket_ping_ms, 25_000);
    assert_eq!(config.redirect_path, "/boards/");
}

#[test]
fn malformed_block_is_an_error() {
    let err = UiConfig::from_json(Some("{not json")).expect_err("should fail");
    assert!(matches!(err, UiError::Config(_)));
}

#[test]
fn malformed_block_falls_back_to_defaults() {
    assert_eq!(UiConfig::from_json_or_default(Some("[1, 2")), UiConfig::default());
}
