use super::*;

#[test]
fn url_joins_origin_and_path() {
    assert_eq!(url("https://s.example.com", INFO), "https://s.example.com/api/v1/info");
}

#[test]
fn url_trims_trailing_slash_on_origin() {
    assert_eq!(
        url("https://s.example.com/", AUTH_CHECK),
        "https://s.example.com/api/v1/auth/check"
    );
}

#[test]
fn url_with_empty_origin_is_relative() {
    assert_eq!(url("", RECENT), "/api/v1/protected/recent");
}

#[test]
fn login_url_is_provider_scoped() {
    assert_eq!(
        login_url("http://localhost:8080", Provider::Google),
        "http://localhost:8080/api/v1/auth/google/login"
    );
    assert_eq!(login_path(Provider::GenericOidc), "/api/v1/auth/generic_oidc/login");
}

#[test]
fn short_id_strips_display_url_prefix() {
    assert_eq!(short_id_from_input("https://s.example.com", "https://s.example.com/abc"), "abc");
    assert_eq!(short_id_from_input("https://s.example.com/", " https://s.example.com/abc "), "abc");
}

#[test]
fn short_id_keeps_bare_id() {
    assert_eq!(short_id_from_input("https://s.example.com", "abc"), "abc");
}

#[test]
fn short_id_ignores_foreign_prefix() {
    assert_eq!(
        short_id_from_input("https://s.example.com", "https://other.example.com/abc"),
        "https://other.example.com/abc"
    );
}

#[test]
fn short_url_joins_display_url_and_id() {
    assert_eq!(short_url("https://s.example.com/", "abc"), "https://s.example.com/abc");
    assert_eq!(short_url("https://s.example.com", "abc"), "https://s.example.com/abc");
}
