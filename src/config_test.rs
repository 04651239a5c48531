use super::*;

#[test]
fn default_uses_token_key_and_standard_popup() {
    let config = ClientConfig::default();
    assert_eq!(config.token_key, "token");
    assert!(config.origin.is_empty());
    assert_eq!(config.handshake.popup_width, 400);
    assert_eq!(config.handshake.popup_height, 500);
    assert_eq!(config.handshake.timeout, None);
}

#[test]
fn detect_outside_browser_falls_back_to_relative_origin() {
    assert_eq!(ClientConfig::detect(), ClientConfig::default());
}
