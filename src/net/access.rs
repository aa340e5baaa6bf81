//! What the page does when access is lost mid-session.
//!
//! `AccessGuard` is shared by the fetch pipeline and the board socket so both
//! paths produce the same user-visible behavior: one error toast per event,
//! then a delayed redirect to the board list. Only one redirect is pending at
//! a time; a failed navigation is logged and dropped, and the next event may
//! schedule another attempt.

#[cfg(test)]
#[path = "access_test.rs"]
mod access_test;

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::config::{Messages, UiConfig};
use crate::net::intercept::{Exchange, Interceptor};
use crate::state::toast::Variant;
use crate::util::navigate::Navigator;
use crate::util::notify::Notifier;
use crate::util::timers::Scheduler;

/// Where the loss was observed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessLoss {
    Http(u16),
    Socket(u16),
}

impl fmt::Display for AccessLoss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(status) => write!(f, "http status {status}"),
            Self::Socket(code) => write!(f, "socket close code {code}"),
        }
    }
}

pub struct AccessGuard {
    notifier: Rc<dyn Notifier>,
    navigator: Rc<dyn Navigator>,
    scheduler: Rc<dyn Scheduler>,
    messages: Messages,
    redirect_path: String,
    redirect_delay_ms: u32,
    redirect_pending: Rc<Cell<bool>>,
}

impl AccessGuard {
    pub fn new(
        config: &UiConfig,
        notifier: Rc<dyn Notifier>,
        navigator: Rc<dyn Navigator>,
        scheduler: Rc<dyn Scheduler>,
    ) -> Self {
        Self {
            notifier,
            navigator,
            scheduler,
            messages: config.messages.clone(),
            redirect_path: config.redirect_path.clone(),
            redirect_delay_ms: config.redirect_delay_ms,
            redirect_pending: Rc::new(Cell::new(false)),
        }
    }

    /// Tell the user their access is gone and send them back to the list.
    pub fn access_lost(&self, cause: AccessLoss) {
        log::warn!("access lost ({cause}); redirecting to {}", self.redirect_path);
        self.notifier.push(&self.messages.access_revoked, Variant::Error);

        if self.redirect_pending.replace(true) {
            return;
        }
        let navigator = Rc::clone(&self.navigator);
        let pending = Rc::clone(&self.redirect_pending);
        let path = self.redirect_path.clone();
        self.scheduler.after(
            self.redirect_delay_ms,
            Box::new(move || {
                if let Err(e) = navigator.navigate(&path) {
                    log::debug!("redirect to {path} failed: {e}");
                    pending.set(false);
                }
            }),
        );
    }

    /// A request never reached the server.
    pub fn connection_lost(&self) {
        self.notifier.push(&self.messages.connection_lost, Variant::Error);
    }

    pub fn redirect_pending(&self) -> bool {
        self.redirect_pending.get()
    }
}

/// Pipeline stage feeding [`AccessGuard`].
pub struct AccessLossInterceptor {
    guard: Rc<AccessGuard>,
}

impl AccessLossInterceptor {
    pub fn new(guard: Rc<AccessGuard>) -> Self {
        Self { guard }
    }
}

impl Interceptor for AccessLossInterceptor {
    fn on_exchange(&self, exchange: Exchange) {
        match exchange {
            Exchange::AccessLost(status) => self.guard.access_lost(AccessLoss::Http(status)),
            Exchange::Failed => self.guard.connection_lost(),
            Exchange::Normal(_) => {}
        }
    }
}
