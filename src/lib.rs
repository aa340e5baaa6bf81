//! # boards-ui
//!
//! WASM enhancement layer for the server-rendered boards pages.
//!
//! The server owns all markup; this crate attaches behavior to it: toast
//! notifications, access-loss detection on every `fetch` and on the board
//! websocket, collapsible lists, the onboarding carousel, and tooltip hosts.
//!
//! Pure state and pipeline logic lives in `state` and `net` and is tested
//! natively. Everything that touches the browser is gated behind the
//! `hydrate` feature.

#[cfg(feature = "hydrate")]
pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod net;
pub mod state;
pub mod util;

#[cfg(feature = "hydrate")]
use wasm_bindgen::prelude::*;

/// Browser entry point, run once when the module is instantiated.
#[cfg(feature = "hydrate")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = util::dom::read_config();
    match app::BoardsUi::install(config) {
        Ok(ui) => app::register(ui),
        Err(e) => log::error!("boards-ui failed to start: {e}"),
    }
}

/// Push a toast from page scripts: `pushToast(message, variant)`.
///
/// The variant defaults to `success` when omitted.
#[cfg(feature = "hydrate")]
#[wasm_bindgen(js_name = pushToast)]
pub fn push_toast(message: String, variant: Option<String>) {
    let variant = state::toast::Variant::parse(variant.as_deref());
    if !app::with_notifier(|notifier| notifier.push(&message, variant)) {
        // Called before startup finished or after teardown.
        util::notify::alert(&message);
    }
}

/// Cancel timers, stop the board socket, and restore the page's `fetch`.
#[cfg(feature = "hydrate")]
#[wasm_bindgen]
pub fn teardown() {
    app::unregister();
}
