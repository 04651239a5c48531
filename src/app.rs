//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::{
    notice_tray::NoticeTray, provider_picker::ProviderPicker, user_menu::UserMenu,
};
use crate::config::ClientConfig;
use crate::context::AppContext;
use crate::pages::{
    about::AboutPage, home::HomePage, lookup::LookupPage, recent::RecentPage,
    sharex::ShareXPage, visitors::VisitorsPage,
};
use crate::state::auth::AuthSession;

/// Root application component.
///
/// Provides the [`AppContext`], starts the session bootstrap, and renders
/// either the provider picker or the authenticated shell.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let ctx = AppContext::new(ClientConfig::detect());
    provide_context(ctx);

    #[cfg(feature = "csr")]
    {
        install_login_driver(ctx);
        leptos::task::spawn_local(ctx.bootstrap());
    }

    let authenticated = move || ctx.auth.with(AuthSession::is_authenticated);

    view! {
        <Title text="URL Shortener"/>
        <NoticeTray/>
        <Show when=authenticated fallback=|| view! { <ProviderPicker/> }>
            <Router>
                <UserMenu/>
                <main class="app-main">
                    <Routes fallback=|| "Page not found.".into_view()>
                        <Route path=StaticSegment("") view=HomePage/>
                        <Route path=StaticSegment("sharex") view=ShareXPage/>
                        <Route path=StaticSegment("recent") view=RecentPage/>
                        <Route path=StaticSegment("lookup") view=LookupPage/>
                        <Route path=(StaticSegment("visitors"), ParamSegment("id")) view=VisitorsPage/>
                        <Route path=StaticSegment("about") view=AboutPage/>
                    </Routes>
                </main>
            </Router>
        </Show>
    }
}

/// Own the popup driver for the lifetime of the app and start a login
/// whenever the picker records a new intent.
#[cfg(feature = "csr")]
fn install_login_driver(ctx: AppContext) {
    use crate::util::popup::OAuthPopup;

    let driver = StoredValue::new_local(None::<OAuthPopup>);
    Effect::new(move || {
        let Some(intent) = ctx.login_intent.get() else {
            return;
        };
        driver.update_value(|slot| {
            if slot.is_none() {
                *slot = OAuthPopup::new(ctx.config().handshake, ctx.store(), move |event| {
                    on_popup_event(ctx, event);
                });
            }
            match slot {
                Some(popup) => popup.start(intent.provider),
                None => ctx.error("Login is unavailable outside a browser window."),
            }
        });
    });
}

#[cfg(feature = "csr")]
fn on_popup_event(ctx: AppContext, event: crate::util::popup::PopupEvent) {
    use crate::util::popup::PopupEvent;

    match event {
        PopupEvent::Blocked => {
            ctx.error("The login popup was blocked. Allow popups for this site and try again.");
        }
        PopupEvent::Delivered(provider) => {
            log::info!("token received via {provider}; validating");
            leptos::task::spawn_local(ctx.refresh_auth());
        }
        PopupEvent::StoreFailed(err) => ctx.error(format!("Could not store session: {err}")),
        PopupEvent::Abandoned(reason) => log::info!("login abandoned: {reason:?}"),
    }
}
