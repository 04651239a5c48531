//! Top menu of the authenticated shell.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::context::AppContext;
use crate::state::auth::AuthSession;

/// Avatar, navigation links, user name and (outside proxy mode) Logout.
#[component]
pub fn UserMenu() -> impl IntoView {
    let ctx = expect_context::<AppContext>();

    let name = move || {
        ctx.auth
            .with(|session| session.profile().map(|p| p.name.clone()).unwrap_or_default())
    };
    let picture = move || {
        ctx.auth
            .with(|session| session.profile().map(|p| p.picture.clone()).unwrap_or_default())
    };
    let can_logout = move || ctx.auth.with(AuthSession::can_logout);

    view! {
        <nav class="menu">
            <A href="/">
                <img class="menu__avatar" src=picture alt="user profile"/>
            </A>
            <A href="/">"Shorten"</A>
            <A href="/sharex">"ShareX"</A>
            <A href="/recent">"Recent URLs"</A>
            <A href="/lookup">"Lookup"</A>
            <A href="/about">"About"</A>
            <span class="menu__spacer"></span>
            <Show when=move || !name().is_empty()>
                <span class="menu__name">{name}</span>
            </Show>
            <Show when=can_logout>
                <button class="menu__logout" on:click=move |_| ctx.logout()>
                    "Logout"
                </button>
            </Show>
        </nav>
    }
}
