use super::*;
use crate::types::{AuthInfo, CreateResponse};

// =============================================================
// decode_json
// =============================================================

#[test]
fn decode_json_reads_success_body() {
    let info: AuthInfo = decode_json(200, r#"{"providers":["google","github"]}"#).expect("info");
    assert_eq!(info.providers.len(), 2);
}

#[test]
fn decode_json_classifies_unauthorized() {
    let err = decode_json::<CreateResponse>(401, r#"{"error":"token is not valid"}"#)
        .expect_err("401");
    assert_eq!(err, ApiError::Unauthorized);
}

#[test]
fn decode_json_reports_garbage_body_as_decode_error() {
    let err = decode_json::<CreateResponse>(200, "<html>").expect_err("decode");
    assert!(matches!(err, ApiError::Decode(_)));
}

// =============================================================
// decode_lookup
// =============================================================

#[test]
fn decode_lookup_not_found_is_none() {
    let found = decode_lookup(404, r#"{"error":"no entry found with this ID"}"#).expect("lookup");
    assert!(found.is_none());
}

#[test]
fn decode_lookup_returns_entry() {
    let found = decode_lookup(200, r#"{"URL":"https://example.com","VisitCount":2}"#)
        .expect("lookup")
        .expect("entry");
    assert_eq!(found.url, "https://example.com");
    assert_eq!(found.visit_count, 2);
}

#[test]
fn decode_lookup_still_fails_on_server_error() {
    let err = decode_lookup(500, "").expect_err("500");
    assert_eq!(
        err,
        ApiError::Status {
            status: 500,
            message: "HTTP 500".to_owned()
        }
    );
}

// =============================================================
// expect_success / decode_check
// =============================================================

#[test]
fn expect_success_accepts_2xx() {
    assert!(expect_success(204, "").is_ok());
    assert!(expect_success(400, "").is_err());
}

#[test]
fn decode_check_returns_profile() {
    let profile = decode_check(200, r#"{"Name":"Alice","Picture":"https://example.com/a.png"}"#)
        .expect("profile");
    assert_eq!(profile.name, "Alice");
}

#[test]
fn decode_check_rejects_any_non_success() {
    let err = decode_check(500, "boom").expect_err("500");
    assert_eq!(
        err,
        AuthError::Rejected {
            status: 500,
            message: "boom".to_owned()
        }
    );
}
