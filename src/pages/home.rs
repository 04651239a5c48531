//! Shorten page: create links with optional custom id, expiry and password.

#[cfg(test)]
#[path = "home_test.rs"]
mod home_test;

use leptos::prelude::*;
use leptos_router::hooks::use_query_map;
use session::{ApiError, CreateRequest, CreateResponse, EntryPublic};

use crate::context::AppContext;
use crate::util::time::{display_timestamp, expiration_from_input};

/// Raw form input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShortenForm {
    pub url: String,
    pub custom_id: String,
    /// RFC 3339, already converted from the picker value.
    pub expiration: Option<String>,
    pub password: String,
}

/// A link created during this visit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShortenedLink {
    pub host: String,
    pub original_url: String,
    pub short_url: String,
    pub deletion_url: String,
    pub expiration: Option<String>,
}

impl ShortenedLink {
    pub fn new(request: &CreateRequest, created: CreateResponse) -> Self {
        Self {
            host: link_host(&request.url).to_owned(),
            original_url: request.url.clone(),
            short_url: created.url,
            deletion_url: created.deletion_url,
            expiration: request.expiration.clone(),
        }
    }
}

/// Validate the form into a create request.
///
/// # Errors
///
/// Returns a user-facing message when the URL is missing.
pub fn build_create_request(form: &ShortenForm) -> Result<CreateRequest, &'static str> {
    let url = form.url.trim();
    if url.is_empty() {
        return Err("Paste a link to shorten it.");
    }
    let custom_id = form.custom_id.trim();
    Ok(CreateRequest {
        url: url.to_owned(),
        id: (!custom_id.is_empty()).then(|| custom_id.to_owned()),
        expiration: form.expiration.clone(),
        password: (!form.password.is_empty()).then(|| form.password.clone()),
    })
}

/// Host part of a URL, for card headers.
pub fn link_host(url: &str) -> &str {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    &rest[..end]
}

/// Outcome of the background lookup made while a custom id is typed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CustomIdStatus {
    Taken,
    Available,
    /// The backend refused the token; the session is over.
    SessionExpired,
    /// Any other failure. Says nothing about the id.
    Unknown,
}

pub fn custom_id_status(result: &Result<Option<EntryPublic>, ApiError>) -> CustomIdStatus {
    match result {
        Ok(Some(_)) => CustomIdStatus::Taken,
        Ok(None) => CustomIdStatus::Available,
        Err(err) if err.is_unauthorized() => CustomIdStatus::SessionExpired,
        Err(_) => CustomIdStatus::Unknown,
    }
}

#[component]
pub fn HomePage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let query = use_query_map();
    let requested = query
        .with_untracked(|params| params.get("customUrl"))
        .filter(|id| !id.is_empty());

    let url = RwSignal::new(String::new());
    let custom_id = RwSignal::new(requested.clone().unwrap_or_default());
    let expiration = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let id_taken = RwSignal::new(false);
    let busy = RwSignal::new(false);
    let form_error = RwSignal::new(None::<&'static str>);
    let links = RwSignal::new(Vec::<ShortenedLink>::new());

    let on_custom_id = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        custom_id.set(value.clone());
        id_taken.set(false);
        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            let id = value.trim().to_owned();
            let Some(token) = ctx.store().get_token() else {
                return;
            };
            if id.is_empty() {
                return;
            }
            // Runs on every keystroke, so failures stay out of the notice tray.
            let store = ctx.store();
            let lookup = crate::net::api::lookup_link(&ctx.origin(), &token, &id).await;
            let result = store.guard(lookup);
            match custom_id_status(&result) {
                CustomIdStatus::Taken => {
                    if custom_id.get_untracked().trim() == id {
                        id_taken.set(true);
                    }
                }
                CustomIdStatus::SessionExpired => {
                    ctx.auth.update(|session| session.observe_api_error(&ApiError::Unauthorized));
                }
                CustomIdStatus::Available | CustomIdStatus::Unknown => {}
            }
        });
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() || id_taken.get() {
            return;
        }
        let form = ShortenForm {
            url: url.get(),
            custom_id: custom_id.get(),
            expiration: expiration_from_input(&expiration.get()),
            password: password.get(),
        };
        let request = match build_create_request(&form) {
            Ok(request) => request,
            Err(message) => {
                form_error.set(Some(message));
                return;
            }
        };
        form_error.set(None);
        busy.set(true);

        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            let result = ctx
                .with_session(|origin, token| {
                    let request = request.clone();
                    async move { crate::net::api::create_link(&origin, &token, &request).await }
                })
                .await;
            if let Ok(created) = result {
                links.update(|links| links.push(ShortenedLink::new(&request, created)));
                url.set(String::new());
            }
            busy.set(false);
        });
        #[cfg(not(feature = "csr"))]
        {
            let _ = (request, links);
            busy.set(false);
        }
    };

    let heading = match requested {
        Some(id) => view! {
            <h1 class="shorten__title">
                "I don't have a link named " <em>{format!("\"{id}\"")}</em>
                " in my database, would you like to create one?"
            </h1>
        }
        .into_any(),
        None => view! { <h1 class="shorten__title">"Simplify your links"</h1> }.into_any(),
    };

    view! {
        <section class="shorten">
            {heading}
            <form class="shorten__form" on:submit=on_submit autocomplete="off">
                <div class="shorten__row">
                    <input
                        class="shorten__url"
                        type="url"
                        required
                        placeholder="Paste a link to shorten it"
                        prop:value=move || url.get()
                        on:input=move |ev| url.set(event_target_value(&ev))
                    />
                    <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                        "Shorten"
                    </button>
                </div>
                <details class="shorten__options" open={!custom_id.get_untracked().is_empty()}>
                    <summary>"Settings"</summary>
                    <label class=move || {
                        if id_taken.get() { "shorten__field shorten__field--error" } else { "shorten__field" }
                    }>
                        "Custom URL"
                        <input
                            type="text"
                            placeholder="my-shortened-url"
                            prop:value=move || custom_id.get()
                            on:input=on_custom_id
                        />
                    </label>
                    <Show when=move || id_taken.get()>
                        <p class="shorten__error">"That name is already taken."</p>
                    </Show>
                    <label class="shorten__field">
                        "Expiration"
                        <input
                            type="datetime-local"
                            prop:value=move || expiration.get()
                            on:input=move |ev| expiration.set(event_target_value(&ev))
                        />
                    </label>
                    <label class="shorten__field">
                        "Password"
                        <input
                            type="password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                    </label>
                </details>
                <Show when=move || form_error.get().is_some()>
                    <p class="shorten__error">{move || form_error.get().unwrap_or_default()}</p>
                </Show>
            </form>
        </section>
        <section class="cards">
            <For
                each=move || links.get()
                key=|link| link.short_url.clone()
                children=move |link: ShortenedLink| {
                    let expires = link
                        .expiration
                        .as_deref()
                        .map(|raw| format!("Expires {}", display_timestamp(Some(raw))));
                    view! {
                        <article class="card">
                            <h3 class="card__header">{link.host}</h3>
                            <p class="card__meta">{link.original_url}</p>
                            <a class="card__short" href=link.short_url.clone() target="_blank">
                                {link.short_url.clone()}
                            </a>
                            {expires.map(|text| view! { <p class="card__expiry">{text}</p> })}
                            <a class="card__delete" href=link.deletion_url target="_blank">
                                "Delete link"
                            </a>
                        </article>
                    }
                }
            />
        </section>
    }
}
