//! Recorded visits of one short link (`/visitors/:id`).

#[cfg(test)]
#[path = "visitors_test.rs"]
mod visitors_test;

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;
use session::Visitor;

use crate::context::AppContext;
use crate::util::time::display_timestamp;

/// `key=value` pairs of the UTM parameters a visit carried, or "-".
pub fn utm_summary(visitor: &Visitor) -> String {
    let pairs: Vec<String> = [
        ("source", &visitor.utm_source),
        ("medium", &visitor.utm_medium),
        ("campaign", &visitor.utm_campaign),
        ("content", &visitor.utm_content),
        ("term", &visitor.utm_term),
    ]
    .into_iter()
    .filter_map(|(name, value)| {
        value
            .as_deref()
            .filter(|value| !value.is_empty())
            .map(|value| format!("{name}={value}"))
    })
    .collect();
    if pairs.is_empty() {
        "-".to_owned()
    } else {
        pairs.join(", ")
    }
}

fn or_dash(value: &str) -> String {
    if value.trim().is_empty() {
        "-".to_owned()
    } else {
        value.to_owned()
    }
}

#[component]
pub fn VisitorsPage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let params = use_params_map();
    let id = move || params.with(|params| params.get("id").unwrap_or_default());

    let visitors = LocalResource::new(move || {
        let id = id();
        async move {
            ctx.with_session(|origin, token| async move {
                crate::net::api::link_visitors(&origin, &token, &id).await
            })
            .await
        }
    });

    view! {
        <section class="visitors">
            <h1>"Visitors of " <em>{id}</em></h1>
            <Suspense fallback=move || view! { <p class="visitors__loading">"Loading..."</p> }>
                {move || {
                    visitors
                        .get()
                        .map(|result| match result {
                            Ok(list) if list.is_empty() => {
                                view! { <p class="visitors__empty">"No visits recorded yet."</p> }.into_any()
                            }
                            Ok(list) => render_table(list).into_any(),
                            Err(_) => {
                                view! { <p class="visitors__empty">"Visitors are unavailable."</p> }.into_any()
                            }
                        })
                }}
            </Suspense>
        </section>
    }
}

fn render_table(list: Vec<Visitor>) -> impl IntoView {
    view! {
        <table class="visitors__table">
            <thead>
                <tr>
                    <th>"Time"</th>
                    <th>"IP"</th>
                    <th>"Referer"</th>
                    <th>"User agent"</th>
                    <th>"UTM"</th>
                </tr>
            </thead>
            <tbody>
                {list
                    .into_iter()
                    .map(|visitor| {
                        let utm = utm_summary(&visitor);
                        view! {
                            <tr>
                                <td>{display_timestamp(Some(&visitor.timestamp))}</td>
                                <td>{or_dash(&visitor.ip)}</td>
                                <td>{or_dash(&visitor.referer)}</td>
                                <td>{or_dash(&visitor.user_agent)}</td>
                                <td>{utm}</td>
                            </tr>
                        }
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
}
