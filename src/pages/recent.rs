//! Links recently created by the current user.

#[cfg(test)]
#[path = "recent_test.rs"]
mod recent_test;

use leptos::prelude::*;
use leptos_router::components::A;
use session::{RecentEntries, endpoints};

use crate::context::AppContext;
use crate::util::time::display_timestamp;

/// One table row, display-ready.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecentRow {
    pub id: String,
    pub original_url: String,
    pub short_url: String,
    pub created: String,
    pub last_visit: String,
    pub expires: String,
    pub visits: u64,
    pub deletion_url: Option<String>,
    created_on: Option<String>,
}

/// Flatten the id-keyed map into rows, newest first.
pub fn recent_rows(entries: RecentEntries, display_url: &str) -> Vec<RecentRow> {
    let mut rows: Vec<RecentRow> = entries
        .into_iter()
        .map(|(id, entry)| {
            let public = entry.public;
            RecentRow {
                short_url: endpoints::short_url(display_url, &id),
                created: display_timestamp(public.created_on.as_deref()),
                last_visit: display_timestamp(public.last_visit.as_deref()),
                expires: display_timestamp(public.expiration.as_deref()),
                visits: public.visit_count,
                deletion_url: entry.deletion_url.filter(|url| !url.is_empty()),
                original_url: public.url,
                created_on: public.created_on,
                id,
            }
        })
        .collect();
    // RFC 3339 strings in the same zone sort chronologically; undated rows go last.
    rows.sort_by(|a, b| b.created_on.cmp(&a.created_on).then_with(|| a.id.cmp(&b.id)));
    rows
}

#[component]
pub fn RecentPage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();

    let rows = LocalResource::new(move || async move {
        let display = ctx.display_origin().await;
        ctx.with_session(|origin, token| async move {
            crate::net::api::recent_links(&origin, &token).await
        })
        .await
        .map(|entries| recent_rows(entries, &display))
    });

    let on_delete = move |deletion_url: String| {
        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            let deleted = ctx
                .with_session(|_, token| async move {
                    crate::net::api::delete_link(&deletion_url, &token).await
                })
                .await;
            if deleted.is_ok() {
                ctx.notify(crate::state::notice::NoticeLevel::Info, "Link deleted.");
                rows.refetch();
            }
        });
        #[cfg(not(feature = "csr"))]
        let _ = (deletion_url, rows);
    };

    view! {
        <section class="recent">
            <h1>"Recent URLs"</h1>
            <Suspense fallback=move || view! { <p class="recent__loading">"Loading..."</p> }>
                {move || {
                    rows.get()
                        .map(|result| match result {
                            Ok(rows) if rows.is_empty() => {
                                view! { <p class="recent__empty">"You have not created any links yet."</p> }
                                    .into_any()
                            }
                            Ok(rows) => render_table(rows, on_delete).into_any(),
                            Err(_) => {
                                view! { <p class="recent__empty">"Recent links are unavailable."</p> }
                                    .into_any()
                            }
                        })
                }}
            </Suspense>
        </section>
    }
}

fn render_table(
    rows: Vec<RecentRow>,
    on_delete: impl Fn(String) + Copy + 'static,
) -> impl IntoView {
    view! {
        <table class="recent__table">
            <thead>
                <tr>
                    <th>"Original URL"</th>
                    <th>"Short URL"</th>
                    <th>"Created"</th>
                    <th>"Last visit"</th>
                    <th>"Expires"</th>
                    <th>"Visits"</th>
                    <th></th>
                </tr>
            </thead>
            <tbody>
                {rows
                    .into_iter()
                    .map(|row| {
                        let visitors = format!("/visitors/{}", row.id);
                        let delete = row.deletion_url.map(|url| {
                            view! {
                                <button class="btn btn--danger" on:click=move |_| on_delete(url.clone())>
                                    "Delete"
                                </button>
                            }
                        });
                        let short_href = row.short_url.clone();
                        view! {
                            <tr>
                                <td class="recent__original">{row.original_url}</td>
                                <td>
                                    <a href=short_href target="_blank">{row.short_url}</a>
                                </td>
                                <td>{row.created}</td>
                                <td>{row.last_visit}</td>
                                <td>{row.expires}</td>
                                <td>
                                    <A href=visitors>{row.visits.to_string()}</A>
                                </td>
                                <td>{delete}</td>
                            </tr>
                        }
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
}
