//! Login modal listing the providers the server has enabled.

#[cfg(test)]
#[path = "provider_picker_test.rs"]
mod provider_picker_test;

use leptos::prelude::*;
use session::Provider;

use crate::context::AppContext;
use crate::state::auth::{AuthSession, PickerView};

pub const AVAILABLE_HEADING: &str =
    "The following authentication services are currently available:";
pub const EMPTY_PROVIDERS: &str = "There are currently no correct oAuth credentials maintained.";
pub const PROXY_NOTICE: &str =
    "If you are seeing this, you have not successfully authenticated to the proxy.";

pub fn provider_button_label(provider: Provider) -> String {
    format!("Login with {}", provider.display_name())
}

pub fn provider_button_class(provider: Provider) -> String {
    format!("provider-button provider-button--{}", provider.id())
}

fn status_text(view: &PickerView) -> Option<&'static str> {
    match view {
        PickerView::Loading => Some("Loading..."),
        PickerView::Unavailable => Some("The server could not be reached. Reload to try again."),
        PickerView::Validating => Some("Checking your session..."),
        PickerView::Proxy => Some(PROXY_NOTICE),
        PickerView::Empty | PickerView::Providers(_) => None,
    }
}

#[component]
pub fn ProviderPicker() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let picker = Memo::new(move |_| ctx.auth.with(AuthSession::picker_view));

    let body = move || {
        let view = picker.get();
        if let Some(status) = status_text(&view) {
            return view! { <p class="auth-modal__status">{status}</p> }.into_any();
        }
        let providers = match view {
            PickerView::Providers(providers) => providers,
            _ => Vec::new(),
        };
        let empty_note = providers
            .is_empty()
            .then(|| view! { <p>{EMPTY_PROVIDERS}</p> });
        view! {
            <p>{AVAILABLE_HEADING}</p>
            <div class="auth-modal__providers">
                {empty_note}
                {providers
                    .into_iter()
                    .map(|provider| {
                        view! {
                            <button
                                class=provider_button_class(provider)
                                on:click=move |_| ctx.request_login(provider)
                            >
                                {provider_button_label(provider)}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        }
        .into_any()
    };

    view! {
        <div class="auth-modal">
            <div class="auth-modal__card">
                <h2>"Authentication"</h2>
                {body}
            </div>
        </div>
    }
}
