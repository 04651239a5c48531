use super::*;

#[test]
fn http_backend_keeps_origin() {
    let backend = HttpBackend::new("https://s.example.com");
    assert_eq!(backend.origin(), "https://s.example.com");
}

#[tokio::test]
async fn native_build_reports_network_error_for_info() {
    let result = fetch_info("https://s.example.com").await;
    assert!(matches!(result, Err(ApiError::Network(_))));
}

#[tokio::test]
async fn native_backend_check_fails_as_network_error() {
    let backend = HttpBackend::new("");
    let result = backend.check_token(&Token::from("tok")).await;
    assert!(matches!(result, Err(AuthError::Network(_))));
}

#[tokio::test]
async fn native_lookup_is_error_not_missing() {
    let result = lookup_link("", &Token::from("tok"), "abc").await;
    assert!(matches!(result, Err(ApiError::Network(_))));
}
