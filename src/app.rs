//! Composition root.
//!
//! ARCHITECTURE
//! ============
//! `BoardsUi::install` builds every service exactly once: the timer bag, the
//! toaster, the access guard, and the fetch pipeline, then binds the
//! declarative enhancements. The instance is registered in a thread-local
//! slot so the `pushToast` and `teardown` exports can reach it; nothing else
//! looks services up globally.

use std::cell::RefCell;
use std::rc::Rc;

use crate::components::carousel::OnboardingCarousel;
use crate::components::collapsible::CollapsibleLists;
use crate::components::tooltip;
use crate::config::UiConfig;
use crate::error::UiError;
use crate::net::access::{AccessGuard, AccessLossInterceptor};
use crate::net::board_socket::{self, SocketHandle};
use crate::net::fetch::{self, FetchInstall};
use crate::net::intercept::Interceptor;
use crate::util::navigate::LocationNavigator;
use crate::util::notify::{Notifier, Toaster};
use crate::util::timers::TimerBag;

thread_local! {
    static UI: RefCell<Option<BoardsUi>> = const { RefCell::new(None) };
}

pub struct BoardsUi {
    timers: TimerBag,
    toaster: Rc<Toaster>,
    fetch: Option<FetchInstall>,
    socket: Option<SocketHandle>,
    _lists: CollapsibleLists,
    _carousel: Option<OnboardingCarousel>,
}

impl BoardsUi {
    /// Wire every component to the current page.
    ///
    /// # Errors
    ///
    /// Returns `UiError::Dom` when there is no window or document. Failures of
    /// individual components are logged and that component is skipped.
    pub fn install(config: UiConfig) -> Result<Self, UiError> {
        let window = web_sys::window().ok_or_else(|| UiError::Dom("no window".to_owned()))?;
        let document = window.document().ok_or_else(|| UiError::Dom("no document".to_owned()))?;

        let timers = TimerBag::default();
        let toaster = Rc::new(Toaster::mount(&document, &config, Rc::new(timers.clone())));
        let guard = Rc::new(AccessGuard::new(
            &config,
            toaster.clone(),
            Rc::new(LocationNavigator),
            Rc::new(timers.clone()),
        ));

        let interceptors: Vec<Rc<dyn Interceptor>> = vec![Rc::new(AccessLossInterceptor::new(guard.clone()))];
        let fetch = fetch::install(&window, interceptors).unwrap_or_else(|e| {
            log::warn!("fetch interception disabled: {e}");
            None
        });

        let lists = CollapsibleLists::install(&document);
        let carousel = OnboardingCarousel::install(&document, &timers, config.carousel_interval_ms);
        let tooltips = tooltip::activate(&document);

        let socket = if config.realtime {
            board_socket::board_id(&window, &document)
                .map(|id| board_socket::spawn(&window, id, guard.clone(), config.socket_ping_ms, fetch.is_some()))
        } else {
            None
        };

        log::info!(
            "boards-ui ready: toasts={} fetch={} carousel={} tooltips={tooltips} socket={}",
            if toaster.is_mounted() { "stack" } else { "alert" },
            fetch.is_some(),
            carousel.is_some(),
            socket.is_some(),
        );

        Ok(Self {
            timers,
            toaster,
            fetch,
            socket,
            _lists: lists,
            _carousel: carousel,
        })
    }

    pub fn notifier(&self) -> &dyn Notifier {
        self.toaster.as_ref()
    }

    /// Cancel all timers, stop the socket, restore `fetch`, and drop listeners.
    pub fn teardown(self) {
        self.timers.cancel_all();
        if let Some(socket) = &self.socket {
            socket.cancel();
        }
        if let Some(fetch) = self.fetch {
            fetch.uninstall();
        }
        self.toaster.clear();
        log::info!("boards-ui torn down");
    }
}

/// Make `ui` the page's instance, tearing down any previous one.
pub fn register(ui: BoardsUi) {
    let previous = UI.with(|slot| slot.borrow_mut().replace(ui));
    if let Some(previous) = previous {
        previous.teardown();
    }
}

pub fn unregister() {
    if let Some(ui) = UI.with(|slot| slot.borrow_mut().take()) {
        ui.teardown();
    }
}

/// Run `f` against the registered notifier. Returns `false` if none.
pub fn with_notifier(f: impl FnOnce(&dyn Notifier)) -> bool {
    UI.with(|slot| match slot.borrow().as_ref() {
        Some(ui) => {
            f(ui.notifier());
            true
        }
        None => false,
    })
}
