//! Timestamp formatting for link tables and the expiration picker.

#[cfg(test)]
#[path = "time_test.rs"]
mod time_test;

/// Go's zero `time.Time`, which the backend emits for "never".
const ZERO_TIME_PREFIX: &str = "0001-01-01";

/// Render an RFC 3339 timestamp as `YYYY-MM-DD HH:MM`.
pub fn display_timestamp(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return "never".to_owned();
    };
    if raw.starts_with(ZERO_TIME_PREFIX) {
        return "never".to_owned();
    }
    let minutes: String = raw.chars().take(16).collect();
    minutes.replacen('T', " ", 1)
}

/// Convert a `datetime-local` input value into an RFC 3339 UTC timestamp.
///
/// The browser build interprets the value in the user's time zone; native
/// builds treat it as UTC.
pub fn expiration_from_input(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    #[cfg(feature = "csr")]
    {
        let date = js_sys::Date::new(&wasm_bindgen::JsValue::from_str(value));
        if date.get_time().is_nan() {
            return None;
        }
        Some(String::from(date.to_iso_string()))
    }
    #[cfg(not(feature = "csr"))]
    {
        match value.len() {
            16 => Some(format!("{value}:00Z")),
            19 => Some(format!("{value}Z")),
            _ => None,
        }
    }
}
