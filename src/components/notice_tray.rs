//! Transient error and info notices, newest at the bottom.

#[cfg(test)]
#[path = "notice_tray_test.rs"]
mod notice_tray_test;

use leptos::prelude::*;

use crate::context::AppContext;
use crate::state::notice::{Notice, NoticeLevel};

fn notice_class(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Info => "notice notice--info",
        NoticeLevel::Error => "notice notice--error",
    }
}

#[component]
pub fn NoticeTray() -> impl IntoView {
    let ctx = expect_context::<AppContext>();

    view! {
        <div class="notice-tray">
            <For
                each=move || ctx.notices.get().items
                key=|notice| notice.id
                children=move |notice: Notice| {
                    let id = notice.id;
                    view! {
                        <div class=notice_class(notice.level) role="alert">
                            <span class="notice__message">{notice.message}</span>
                            <button
                                class="notice__close"
                                title="Dismiss"
                                on:click=move |_| ctx.notices.update(|notices| notices.dismiss(id))
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
