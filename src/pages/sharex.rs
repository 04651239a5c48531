//! ShareX uploader config for the current session.

#[cfg(test)]
#[path = "sharex_test.rs"]
mod sharex_test;

use leptos::prelude::*;
use session::{ShareXConfig, Token};

use crate::context::AppContext;

pub const NO_SESSION: &str = "Log in to generate a ShareX configuration.";

/// Text shown in the config block.
pub fn sharex_text(origin: &str, token: Option<&Token>) -> String {
    let Some(token) = token else {
        return NO_SESSION.to_owned();
    };
    match ShareXConfig::new(origin, token).to_json() {
        Ok(json) => json,
        Err(err) => {
            log::warn!("could not render ShareX config: {err}");
            NO_SESSION.to_owned()
        }
    }
}

#[component]
pub fn ShareXPage() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let config = sharex_text(&ctx.origin(), ctx.store().get_token().as_ref());

    view! {
        <section class="sharex">
            <h1>"ShareX"</h1>
            <p>"Import this as a custom uploader to shorten links straight from ShareX."</p>
            <pre class="sharex__config"><code class="language-json">{config}</code></pre>
        </section>
    }
}
