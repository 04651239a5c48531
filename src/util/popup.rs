//! Browser host for the OAuth handshake.
//!
//! SYSTEM CONTEXT
//! ==============
//! [`session::HandshakeCoordinator`] decides what happens; this module only
//! translates those decisions into `window.open`, `addEventListener` and a
//! `setInterval` poll that notices a popup the user closed by hand.
//!
//! RESOURCES
//! =========
//! The `message` closure is created once per [`OAuthPopup`] and lives as long
//! as it does; the coordinator adds and removes the same JS function. The poll
//! interval is dropped from a spawned task when it stops itself, because a
//! `Closure` must not be freed while it is running.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::Arc;

use gloo_timers::callback::Interval;
use serde_json::Value;
use session::{
    AbandonReason, HandshakeConfig, HandshakeCoordinator, MessageDisposition, PopupGeometry,
    PopupHost, PopupWindow, Provider, ScreenSize, StartOutcome, StorageError, SubscriptionId,
    WindowMessage,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;
use web_sys::{MessageEvent, Window};

use crate::context::WebSessionStore;

/// Window name passed to `window.open`; reused windows keep this name.
const POPUP_NAME: &str = "Authenticate with OAuth 2.0";

type Coordinator = HandshakeCoordinator<BrowserHost>;
type PollSlot = Rc<RefCell<Option<Interval>>>;

// =============================================================================
// HOST
// =============================================================================

pub struct BrowserPopup {
    window: Window,
}

impl PopupWindow for BrowserPopup {
    fn is_closed(&self) -> bool {
        self.window.closed().unwrap_or(true)
    }

    fn navigate(&self, url: &str) {
        if let Err(e) = self.window.location().set_href(url) {
            log::warn!("could not redirect auth popup: {e:?}");
        }
    }

    fn close(&self) {
        if let Err(e) = self.window.close() {
            log::warn!("could not close auth popup: {e:?}");
        }
    }
}

pub struct BrowserHost {
    window: Window,
    listener: js_sys::Function,
    next_id: u64,
}

impl PopupHost for BrowserHost {
    type Popup = BrowserPopup;

    fn app_origin(&self) -> String {
        self.window.location().origin().unwrap_or_default()
    }

    fn screen_size(&self) -> ScreenSize {
        let Ok(screen) = self.window.screen() else {
            return ScreenSize::default();
        };
        ScreenSize {
            width: css_pixels(screen.width()),
            height: css_pixels(screen.height()),
        }
    }

    fn open_popup(&mut self, url: &str, geometry: &PopupGeometry) -> Option<BrowserPopup> {
        match self
            .window
            .open_with_url_and_target_and_features(url, POPUP_NAME, &geometry.features())
        {
            Ok(Some(window)) => Some(BrowserPopup { window }),
            Ok(None) => None,
            Err(e) => {
                log::warn!("window.open failed: {e:?}");
                None
            }
        }
    }

    fn subscribe(&mut self) -> SubscriptionId {
        if let Err(e) = self
            .window
            .add_event_listener_with_callback("message", &self.listener)
        {
            log::warn!("could not listen for auth messages: {e:?}");
        }
        self.next_id += 1;
        SubscriptionId(self.next_id)
    }

    fn unsubscribe(&mut self, _subscription: SubscriptionId) {
        if let Err(e) = self
            .window
            .remove_event_listener_with_callback("message", &self.listener)
        {
            log::warn!("could not remove auth message listener: {e:?}");
        }
    }
}

fn css_pixels(value: Result<i32, wasm_bindgen::JsValue>) -> u32 {
    value.map_or(0, |px| u32::try_from(px).unwrap_or(0))
}

fn window_message(event: &MessageEvent) -> WindowMessage {
    WindowMessage {
        is_trusted: event.is_trusted(),
        origin: event.origin(),
        data: event.data().as_string().map_or(Value::Null, Value::String),
    }
}

// =============================================================================
// DRIVER
// =============================================================================

/// Something the UI should react to.
#[derive(Debug)]
pub enum PopupEvent {
    Blocked,
    /// The token is stored; validate it next.
    Delivered(Provider),
    StoreFailed(StorageError),
    Abandoned(AbandonReason),
}

/// One coordinator bound to the current window.
pub struct OAuthPopup {
    coordinator: Rc<RefCell<Coordinator>>,
    poll: PollSlot,
    on_event: Rc<dyn Fn(PopupEvent)>,
    _on_message: Closure<dyn FnMut(MessageEvent)>,
}

impl OAuthPopup {
    /// Returns `None` outside a window context.
    pub fn new(
        config: HandshakeConfig,
        store: Arc<WebSessionStore>,
        on_event: impl Fn(PopupEvent) + 'static,
    ) -> Option<Self> {
        let window = web_sys::window()?;
        let on_event: Rc<dyn Fn(PopupEvent)> = Rc::new(on_event);
        let poll: PollSlot = Rc::new(RefCell::new(None));

        let mut on_message = None;
        let coordinator = Rc::new_cyclic(|weak: &Weak<RefCell<Coordinator>>| {
            let closure = message_handler(
                weak.clone(),
                store,
                Rc::clone(&on_event),
                Rc::downgrade(&poll),
            );
            let listener = closure.as_ref().unchecked_ref::<js_sys::Function>().clone();
            on_message = Some(closure);
            RefCell::new(HandshakeCoordinator::new(
                BrowserHost {
                    window,
                    listener,
                    next_id: 0,
                },
                config,
            ))
        });

        Some(Self {
            coordinator,
            poll,
            on_event,
            _on_message: on_message?,
        })
    }

    /// Open (or redirect) the auth popup for `provider`.
    pub fn start(&self, provider: Provider) {
        let outcome = match self.coordinator.try_borrow_mut() {
            Ok(mut coordinator) => coordinator.start(provider),
            Err(e) => {
                log::warn!("login start ignored while the coordinator is busy: {e}");
                return;
            }
        };
        match outcome {
            StartOutcome::Blocked => (self.on_event)(PopupEvent::Blocked),
            StartOutcome::Opened | StartOutcome::Navigated => self.ensure_poll(),
        }
    }

    fn ensure_poll(&self) {
        if self.poll.borrow().is_some() {
            return;
        }
        let interval = self.coordinator.borrow().config().closed_poll_interval;
        let millis = u32::try_from(interval.as_millis()).unwrap_or(u32::MAX);
        let coordinator = Rc::downgrade(&self.coordinator);
        let poll = Rc::downgrade(&self.poll);
        let on_event = Rc::clone(&self.on_event);

        let handle = Interval::new(millis, move || {
            let Some(coordinator) = coordinator.upgrade() else {
                return;
            };
            let (abandoned, awaiting) = match coordinator.try_borrow_mut() {
                Ok(mut coordinator) => (coordinator.tick(interval), coordinator.is_awaiting()),
                Err(_) => return,
            };
            if !awaiting {
                if let Some(poll) = poll.upgrade() {
                    stop_poll(&poll);
                }
            }
            if let Some(reason) = abandoned {
                on_event(PopupEvent::Abandoned(reason));
            }
        });
        *self.poll.borrow_mut() = Some(handle);
    }
}

impl Drop for OAuthPopup {
    fn drop(&mut self) {
        drop(self.poll.borrow_mut().take());
        match self.coordinator.try_borrow_mut() {
            Ok(mut coordinator) => coordinator.dispose(),
            Err(e) => log::warn!("auth coordinator busy during teardown: {e}"),
        }
    }
}

fn message_handler(
    coordinator: Weak<RefCell<Coordinator>>,
    store: Arc<WebSessionStore>,
    on_event: Rc<dyn Fn(PopupEvent)>,
    poll: Weak<RefCell<Option<Interval>>>,
) -> Closure<dyn FnMut(MessageEvent)> {
    Closure::new(move |event: MessageEvent| {
        let Some(coordinator) = coordinator.upgrade() else {
            return;
        };
        let message = window_message(&event);
        let disposition = match coordinator.try_borrow_mut() {
            Ok(mut coordinator) => coordinator.handle_message(&message, &*store),
            Err(e) => {
                log::warn!("auth message dropped while the coordinator is busy: {e}");
                return;
            }
        };
        let finished = match disposition {
            MessageDisposition::Ignored(reason) => {
                log::debug!("window message ignored: {reason:?}");
                return;
            }
            MessageDisposition::Delivered(provider) => PopupEvent::Delivered(provider),
            MessageDisposition::StoreFailed(err) => PopupEvent::StoreFailed(err),
        };
        if let Some(poll) = poll.upgrade() {
            stop_poll(&poll);
        }
        on_event(finished);
    })
}

/// Stop the poll without freeing its closure mid-call.
fn stop_poll(poll: &PollSlot) {
    let stale = poll.borrow_mut().take();
    if let Some(stale) = stale {
        leptos::task::spawn_local(async move {
            drop(stale);
        });
    }
}
