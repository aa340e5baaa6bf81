//! The page's `fetch`, wrapped by the interception pipeline.
//!
//! `install` captures the current `window.fetch` as the transport and puts a
//! pipeline-backed function in its place, so requests issued by any script on
//! the page pass through the interceptors. The returned [`FetchInstall`]
//! restores the captured function on `uninstall`.

#[cfg(test)]
#[path = "fetch_test.rs"]
mod fetch_test;

/// What `uninstall` does with the page's current `fetch`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RestoreAction {
    Restore,
    /// Another script wrapped our hook after install.
    LeaveWrapped,
}

/// Restore only while `current` is still the hook we installed.
pub fn restore_action<T: PartialEq + ?Sized>(current: &T, installed: &T) -> RestoreAction {
    if current == installed {
        RestoreAction::Restore
    } else {
        RestoreAction::LeaveWrapped
    }
}

#[cfg(feature = "hydrate")]
pub use self::browser::{FetchInstall, FetchResponse, WindowFetch, current_fetch_status, install};

#[cfg(feature = "hydrate")]
mod browser {
    use std::cell::Cell;
    use std::future::Future;
    use std::rc::Rc;

    use js_sys::{Function, Promise, Reflect};
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::{JsFuture, future_to_promise};

    use super::{RestoreAction, restore_action};
    use crate::error::UiError;
    use crate::net::intercept::{InterceptedClient, Interceptor, ResponseStatus, Transport};

    thread_local! {
        static INSTALLED: Cell<bool> = const { Cell::new(false) };
    }

    /// Whatever the captured `fetch` resolved with, normally a `Response`.
    pub struct FetchResponse(JsValue);

    impl FetchResponse {
        pub fn into_inner(self) -> JsValue {
            self.0
        }
    }

    impl ResponseStatus for FetchResponse {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        fn status(&self) -> Option<u16> {
            let status = Reflect::get(&self.0, &JsValue::from_str("status")).ok()?.as_f64()?;
            (0.0..=f64::from(u16::MAX))
                .contains(&status)
                .then_some(status as u16)
        }
    }

    /// `fetch` as it was before installation.
    pub struct WindowFetch {
        window: web_sys::Window,
        original: Function,
    }

    impl WindowFetch {
        /// Capture the page's current `fetch`.
        ///
        /// # Errors
        ///
        /// Returns `UiError::Install` when `window.fetch` is missing or not callable.
        pub fn capture(window: &web_sys::Window) -> Result<Self, UiError> {
            let value = Reflect::get(window, &JsValue::from_str("fetch")).map_err(|e| UiError::install(&e))?;
            let original = value
                .dyn_into::<Function>()
                .map_err(|_| UiError::Install("window.fetch is not a function".to_owned()))?;
            Ok(Self {
                window: window.clone(),
                original,
            })
        }
    }

    impl Transport for WindowFetch {
        type Request = (JsValue, JsValue);
        type Response = FetchResponse;
        type Error = JsValue;

        fn send(&self, (input, init): Self::Request) -> impl Future<Output = Result<FetchResponse, JsValue>> {
            // Synchronous throws are surfaced as a rejection, like native fetch.
            let called = self.original.call2(&self.window, &input, &init);
            async move {
                let value = JsFuture::from(Promise::resolve(&called?)).await?;
                Ok(FetchResponse(value))
            }
        }
    }

    type FetchHook = Closure<dyn FnMut(JsValue, JsValue) -> Promise>;

    /// Live installation; restores the original `fetch` on `uninstall`.
    pub struct FetchInstall {
        window: web_sys::Window,
        original: Function,
        hook: FetchHook,
    }

    impl FetchInstall {
        /// Put the captured `fetch` back, unless another script has since
        /// wrapped ours. The wrapper is then left in place and our hook stays
        /// alive behind it.
        pub fn uninstall(self) {
            let current = Reflect::get(&self.window, &JsValue::from_str("fetch")).unwrap_or(JsValue::UNDEFINED);
            match restore_action(&current, self.hook.as_ref()) {
                RestoreAction::Restore => {
                    if let Err(e) = Reflect::set(&self.window, &JsValue::from_str("fetch"), &self.original) {
                        log::warn!("could not restore window.fetch: {e:?}");
                    }
                }
                RestoreAction::LeaveWrapped => {
                    log::warn!("window.fetch was wrapped after install; leaving it in place");
                    // The wrapper still calls through to our hook.
                    self.hook.forget();
                }
            }
            INSTALLED.with(|flag| flag.set(false));
        }
    }

    /// Request `url` through whatever `window.fetch` currently is, so installed
    /// interceptors see the response too.
    ///
    /// # Errors
    ///
    /// Returns the rejection when `fetch` is missing, throws, or rejects.
    pub async fn current_fetch_status(window: &web_sys::Window, url: &str) -> Result<Option<u16>, JsValue> {
        let fetch = Reflect::get(window, &JsValue::from_str("fetch"))?.dyn_into::<Function>()?;
        let pending = fetch.call1(window, &JsValue::from_str(url))?;
        let value = JsFuture::from(Promise::resolve(&pending)).await?;
        Ok(FetchResponse(value).status())
    }

    /// Route the page's `fetch` through `interceptors`, in order.
    ///
    /// Returns `Ok(None)` if already installed, so interceptors never fire twice
    /// for one request.
    ///
    /// # Errors
    ///
    /// Returns `UiError::Install` when `fetch` cannot be captured or replaced.
    pub fn install(
        window: &web_sys::Window,
        interceptors: Vec<Rc<dyn Interceptor>>,
    ) -> Result<Option<FetchInstall>, UiError> {
        if INSTALLED.with(Cell::get) {
            log::warn!("fetch interceptor already installed; skipping");
            return Ok(None);
        }

        let transport = WindowFetch::capture(window)?;
        let original = transport.original.clone();
        let client = Rc::new(
            interceptors
                .into_iter()
                .fold(InterceptedClient::new(transport), InterceptedClient::with),
        );

        let hook: FetchHook = Closure::new(move |input: JsValue, init: JsValue| {
            let client = Rc::clone(&client);
            future_to_promise(async move { client.send((input, init)).await.map(FetchResponse::into_inner) })
        });
        Reflect::set(window, &JsValue::from_str("fetch"), hook.as_ref()).map_err(|e| UiError::install(&e))?;
        INSTALLED.with(|flag| flag.set(true));
        log::debug!("fetch interceptor installed");

        Ok(Some(FetchInstall {
            window: window.clone(),
            original,
            hook,
        }))
    }
}
