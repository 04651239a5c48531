//! Server build and auth configuration, as reported by `/api/v1/info`.

#[cfg(test)]
#[path = "about_test.rs"]
mod about_test;

use leptos::prelude::*;
use serde_json::Value;
use session::AuthInfo;

use crate::context::AppContext;

/// Label/value pairs for the about table: providers first, then build fields
/// in key order.
pub fn about_rows(info: &AuthInfo) -> Vec<(String, String)> {
    let providers = if info.providers.is_empty() {
        "none".to_owned()
    } else {
        info.providers.join(", ")
    };
    std::iter::once(("Providers".to_owned(), providers))
        .chain(
            info.build
                .iter()
                .map(|(key, value)| (key.clone(), value_text(value))),
        )
        .collect()
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => "-".to_owned(),
        other => other.to_string(),
    }
}

#[component]
pub fn AboutPage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let rows = move || ctx.auth.with(|session| session.info.as_ref().map(about_rows));

    view! {
        <section class="about">
            <h1>"About"</h1>
            {move || match rows() {
                Some(rows) => view! {
                    <table class="about__table">
                        <tbody>
                            {rows
                                .into_iter()
                                .map(|(label, value)| view! {
                                    <tr>
                                        <th>{label}</th>
                                        <td>{value}</td>
                                    </tr>
                                })
                                .collect_view()}
                        </tbody>
                    </table>
                }
                .into_any(),
                None => view! { <p>"Server information is unavailable."</p> }.into_any(),
            }}
        </section>
    }
}
