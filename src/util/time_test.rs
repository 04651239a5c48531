use super::*;

#[test]
fn display_timestamp_trims_to_minutes() {
    assert_eq!(
        display_timestamp(Some("2026-10-16T12:30:45.123Z")),
        "2026-10-16 12:30"
    );
}

#[test]
fn display_timestamp_treats_zero_time_as_never() {
    assert_eq!(display_timestamp(Some("0001-01-01T00:00:00Z")), "never");
    assert_eq!(display_timestamp(None), "never");
    assert_eq!(display_timestamp(Some("  ")), "never");
}

#[test]
fn expiration_from_minutes_input() {
    assert_eq!(
        expiration_from_input("2026-12-24T18:00").as_deref(),
        Some("2026-12-24T18:00:00Z")
    );
}

#[test]
fn expiration_from_seconds_input() {
    assert_eq!(
        expiration_from_input("2026-12-24T18:00:30").as_deref(),
        Some("2026-12-24T18:00:30Z")
    );
}

#[test]
fn expiration_rejects_blank_and_malformed() {
    assert_eq!(expiration_from_input(""), None);
    assert_eq!(expiration_from_input("tomorrow"), None);
}
