//! Lookup page: show metadata of a short link by id or full short URL.

#[cfg(test)]
#[path = "lookup_test.rs"]
mod lookup_test;

use leptos::prelude::*;
use leptos_router::components::A;
use session::{EntryPublic, endpoints};

use crate::context::AppContext;
use crate::util::time::display_timestamp;

/// Display-ready result of a successful lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LookupCard {
    pub id: String,
    pub short_url: String,
    pub original_url: String,
    pub created: String,
    pub last_visit: String,
    pub expires: String,
    pub visits: u64,
}

impl LookupCard {
    pub fn new(display_url: &str, id: &str, entry: EntryPublic) -> Self {
        Self {
            id: id.to_owned(),
            short_url: endpoints::short_url(display_url, id),
            created: display_timestamp(entry.created_on.as_deref()),
            last_visit: display_timestamp(entry.last_visit.as_deref()),
            expires: display_timestamp(entry.expiration.as_deref()),
            visits: entry.visit_count,
            original_url: entry.url,
        }
    }

    pub fn visitors_path(&self) -> String {
        format!("/visitors/{}", self.id)
    }
}

pub fn not_found_message(id: &str) -> String {
    format!("No link named \"{id}\" exists.")
}

#[component]
pub fn LookupPage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let input = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let card = RwSignal::new(None::<LookupCard>);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let raw = input.get();
        if busy.get() || raw.trim().is_empty() {
            return;
        }
        busy.set(true);
        card.set(None);

        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            let display = ctx.display_origin().await;
            let id = endpoints::short_id_from_input(&display, &raw);
            let lookup_id = id.clone();
            let result = ctx
                .with_session(|origin, token| async move {
                    crate::net::api::lookup_link(&origin, &token, &lookup_id).await
                })
                .await;
            match result {
                Ok(Some(entry)) => card.set(Some(LookupCard::new(&display, &id, entry))),
                Ok(None) => {
                    ctx.notify(crate::state::notice::NoticeLevel::Info, not_found_message(&id));
                }
                Err(_) => {}
            }
            busy.set(false);
        });
        #[cfg(not(feature = "csr"))]
        {
            let _ = (raw, ctx);
            busy.set(false);
        }
    };

    view! {
        <section class="lookup">
            <h1>"Lookup a short link"</h1>
            <form class="lookup__form" on:submit=on_submit autocomplete="off">
                <input
                    type="text"
                    placeholder="Short URL or id"
                    prop:value=move || input.get()
                    on:input=move |ev| input.set(event_target_value(&ev))
                />
                <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                    "Lookup"
                </button>
            </form>
            {move || card.get().map(render_card)}
        </section>
    }
}

fn render_card(card: LookupCard) -> impl IntoView {
    let visitors = card.visitors_path();
    let short_href = card.short_url.clone();
    view! {
        <article class="card">
            <h3 class="card__header">{card.id}</h3>
            <a class="card__short" href=short_href target="_blank">{card.short_url}</a>
            <dl class="card__facts">
                <dt>"Original URL"</dt>
                <dd>{card.original_url}</dd>
                <dt>"Created"</dt>
                <dd>{card.created}</dd>
                <dt>"Last visit"</dt>
                <dd>{card.last_visit}</dd>
                <dt>"Expires"</dt>
                <dd>{card.expires}</dd>
                <dt>"Visits"</dt>
                <dd><A href=visitors>{card.visits.to_string()}</A></dd>
            </dl>
        </article>
    }
}
