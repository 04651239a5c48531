use super::*;

// =============================================================
// Token
// =============================================================

#[test]
fn token_debug_hides_value() {
    let token = Token::new("tok-secret");
    let rendered = format!("{token:?}");
    assert!(!rendered.contains("tok-secret"));
    assert_eq!(rendered, "Token(<10 bytes>)");
}

#[test]
fn token_serializes_as_bare_string() {
    let json = serde_json::to_value(Token::new("tok-123")).expect("serialize");
    assert_eq!(json, serde_json::json!("tok-123"));
}

// =============================================================
// Provider
// =============================================================

#[test]
fn provider_ids_parse_back() {
    for provider in [
        Provider::Google,
        Provider::Github,
        Provider::Okta,
        Provider::GenericOidc,
        Provider::Microsoft,
        Provider::Proxy,
    ] {
        assert_eq!(Provider::parse(provider.id()), Some(provider));
    }
}

#[test]
fn provider_parse_rejects_unknown_id() {
    assert_eq!(Provider::parse("gitlab"), None);
    assert_eq!(Provider::parse("Google"), None);
}

#[test]
fn provider_display_uses_wire_id() {
    assert_eq!(Provider::GenericOidc.to_string(), "generic_oidc");
    assert_eq!(Provider::GenericOidc.display_name(), "OpenID Connect");
}

// =============================================================
// AuthInfo
// =============================================================

#[test]
fn auth_info_keeps_build_metadata() {
    let info: AuthInfo = serde_json::from_value(serde_json::json!({
        "providers": ["google"],
        "go": "go1.21",
        "commit": "abc123"
    }))
    .expect("info");
    assert_eq!(info.providers, vec!["google".to_owned()]);
    assert_eq!(info.build.get("commit"), Some(&serde_json::json!("abc123")));
    assert_eq!(info.build.get("go"), Some(&serde_json::json!("go1.21")));
    assert!(!info.build.contains_key("providers"));
}

#[test]
fn auth_info_null_providers_is_empty() {
    let info: AuthInfo =
        serde_json::from_value(serde_json::json!({ "providers": null })).expect("info");
    assert!(info.providers.is_empty());
    assert!(info.login_providers().is_empty());
}

#[test]
fn auth_info_missing_providers_is_empty() {
    let info: AuthInfo = serde_json::from_value(serde_json::json!({})).expect("info");
    assert!(info.providers.is_empty());
}

#[test]
fn login_providers_follow_picker_order_and_skip_unknown() {
    let info = AuthInfo {
        providers: vec![
            "microsoft".to_owned(),
            "gitlab".to_owned(),
            "github".to_owned(),
            "google".to_owned(),
        ],
        ..AuthInfo::default()
    };
    assert_eq!(
        info.login_providers(),
        vec![Provider::Google, Provider::Github, Provider::Microsoft]
    );
}

#[test]
fn login_providers_never_include_proxy() {
    let info = AuthInfo {
        providers: vec!["proxy".to_owned()],
        ..AuthInfo::default()
    };
    assert!(info.uses_proxy());
    assert!(info.login_providers().is_empty());
}

// =============================================================
// UserProfile / AuthState
// =============================================================

#[test]
fn user_profile_reads_pascal_case_fields() {
    let profile: UserProfile = serde_json::from_value(serde_json::json!({
        "ID": "1234",
        "Name": "Alice",
        "Picture": "https://example.com/a.png",
        "Provider": "google"
    }))
    .expect("profile");
    assert_eq!(profile.id, "1234");
    assert_eq!(profile.name, "Alice");
    assert_eq!(profile.picture, "https://example.com/a.png");
    assert_eq!(profile.provider, "google");
}

#[test]
fn user_profile_defaults_missing_fields() {
    let profile: UserProfile =
        serde_json::from_value(serde_json::json!({ "Name": "Alice" })).expect("profile");
    assert_eq!(profile.name, "Alice");
    assert!(profile.picture.is_empty());
}

#[test]
fn auth_state_default_is_unauthenticated() {
    assert_eq!(AuthState::default(), AuthState::Unauthenticated);
    assert!(!AuthState::Validating.is_authenticated());
    assert!(AuthState::Validating.profile().is_none());
}

// =============================================================
// Link DTOs
// =============================================================

#[test]
fn check_request_uses_token_field() {
    let json = serde_json::to_value(CheckRequest { token: "tok-123" }).expect("serialize");
    assert_eq!(json, serde_json::json!({ "Token": "tok-123" }));
}

#[test]
fn create_request_omits_unset_optionals() {
    let req = CreateRequest {
        url: "https://example.com".to_owned(),
        ..CreateRequest::default()
    };
    let json = serde_json::to_value(&req).expect("serialize");
    assert_eq!(json, serde_json::json!({ "URL": "https://example.com" }));
}

#[test]
fn create_request_includes_custom_id_and_expiration() {
    let req = CreateRequest {
        url: "https://example.com".to_owned(),
        id: Some("docs".to_owned()),
        expiration: Some("2030-01-01T00:00:00Z".to_owned()),
        password: None,
    };
    let json = serde_json::to_value(&req).expect("serialize");
    assert_eq!(json["ID"], "docs");
    assert_eq!(json["Expiration"], "2030-01-01T00:00:00Z");
    assert!(json.get("Password").is_none());
}

#[test]
fn recent_entries_parse_keyed_map() {
    let recent: RecentEntries = serde_json::from_value(serde_json::json!({
        "abc": {
            "Public": { "URL": "https://example.com", "VisitCount": 3, "CreatedOn": "2024-01-01T00:00:00Z" },
            "DeletionURL": "http://localhost:8080/d/abc/xyz"
        }
    }))
    .expect("recent");
    let entry = recent.get("abc").expect("entry");
    assert_eq!(entry.public.visit_count, 3);
    assert_eq!(entry.deletion_url.as_deref(), Some("http://localhost:8080/d/abc/xyz"));
}

#[test]
fn visitor_reads_utm_fields() {
    let visitor: Visitor = serde_json::from_value(serde_json::json!({
        "IP": "127.0.0.1",
        "Referer": "",
        "UserAgent": "curl/8",
        "Timestamp": "2024-01-01T00:00:00Z",
        "UTMSource": "newsletter"
    }))
    .expect("visitor");
    assert_eq!(visitor.utm_source.as_deref(), Some("newsletter"));
    assert!(visitor.utm_term.is_none());
}
