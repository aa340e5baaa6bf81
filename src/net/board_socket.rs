//! Board websocket watcher.
//!
//! The board page holds a websocket on `/ws/boards/<id>/`. The server closes
//! it with 4401 (not authenticated) or 4403 (no access to the board); both
//! mean the same thing as an HTTP 403 on the page, so they go through the
//! shared [`AccessGuard`](crate::net::access::AccessGuard). Other closes
//! reconnect with exponential backoff. Broadcast payloads are re-dispatched
//! on `document` as `boards:broadcast` events for page scripts.
//!
//! The server refuses the handshake of a user without access, so the browser
//! sees an abnormal close (1006) instead of 4401/4403. A session that ends
//! without a single frame therefore triggers one request to the board page
//! through the page's `fetch`; a 403/404 there is reported like any other
//! request. After `MAX_SILENT_SESSIONS` such sessions in a row the watcher
//! stops.
//!
//! ERROR HANDLING
//! ==============
//! Transport errors are logged and retried; only a confirmed denial or the
//! silent-session limit stops the watcher.

#[cfg(test)]
#[path = "board_socket_test.rs"]
mod board_socket_test;

pub const CLOSE_UNAUTHORIZED: u16 = 4401;
pub const CLOSE_FORBIDDEN: u16 = 4403;
pub const PING_MESSAGE: &str = r#"{"type":"ping"}"#;
pub const BROADCAST_EVENT: &str = "boards:broadcast";

/// Consecutive sessions without traffic after which the watcher stops.
pub const MAX_SILENT_SESSIONS: u32 = 5;

const INITIAL_BACKOFF_MS: u32 = 1000;
const MAX_BACKOFF_MS: u32 = 10_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CloseDisposition {
    AccessLost,
    Reconnect,
}

pub fn close_disposition(code: u16) -> CloseDisposition {
    match code {
        CLOSE_UNAUTHORIZED | CLOSE_FORBIDDEN => CloseDisposition::AccessLost,
        _ => CloseDisposition::Reconnect,
    }
}

/// What the watcher does once a session has ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The close frame named a denial.
    AccessLost(u16),
    /// No frame ever arrived; ask the board page whether access remains.
    ConfirmAccess,
    Reconnect,
    GiveUp,
}

/// Decide how to continue after a session.
///
/// `close_code` is `None` when the socket could not be opened or the stream
/// ended without a close event. `silent_sessions` counts consecutive sessions
/// without traffic, this one included.
pub fn session_outcome(close_code: Option<u16>, saw_traffic: bool, silent_sessions: u32) -> SessionOutcome {
    if let Some(code) = close_code
        && close_disposition(code) == CloseDisposition::AccessLost
    {
        return SessionOutcome::AccessLost(code);
    }
    if saw_traffic {
        SessionOutcome::Reconnect
    } else if silent_sessions >= MAX_SILENT_SESSIONS {
        SessionOutcome::GiveUp
    } else if silent_sessions == 1 {
        SessionOutcome::ConfirmAccess
    } else {
        SessionOutcome::Reconnect
    }
}

/// Board id from a board page path such as `/boards/board/12/` or
/// `/boards/board/12/cards/3/`.
pub fn board_id_from_path(path: &str) -> Option<u64> {
    let mut segments = path.split('/').filter(|s| !s.is_empty());
    while let Some(segment) = segments.next() {
        if segment == "boards" {
            return match (segments.next(), segments.next()) {
                (Some("board"), Some(id)) => id.parse().ok(),
                _ => None,
            };
        }
    }
    None
}

/// Server-rendered page of a board; answers 404 to users without access.
pub fn board_page_path(board_id: u64) -> String {
    format!("/boards/board/{board_id}/")
}

/// Socket URL matching the page's scheme (`https:` pages get `wss://`).
pub fn socket_url(page_protocol: &str, host: &str, board_id: u64) -> String {
    let scheme = if page_protocol.starts_with("https") { "wss" } else { "ws" };
    format!("{scheme}://{host}/ws/boards/{board_id}/")
}

#[derive(Clone, Debug, PartialEq)]
pub enum ServerMessage {
    Pong,
    Broadcast(serde_json::Value),
}

/// Parse a text frame. Returns `None` for anything that is not JSON.
pub fn parse_server_message(text: &str) -> Option<ServerMessage> {
    let value: serde_json::Value = serde_json::from_str(text).ok()?;
    if value.get("type").and_then(serde_json::Value::as_str) == Some("pong") {
        return Some(ServerMessage::Pong);
    }
    Some(ServerMessage::Broadcast(value))
}

/// Reconnect delay: doubles from 1 s up to 10 s, reset by traffic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Backoff {
    current_ms: u32,
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            current_ms: INITIAL_BACKOFF_MS,
        }
    }
}

impl Backoff {
    pub fn next_delay(&mut self) -> u32 {
        let delay = self.current_ms;
        self.current_ms = (self.current_ms * 2).min(MAX_BACKOFF_MS);
        delay
    }

    pub fn reset(&mut self) {
        self.current_ms = INITIAL_BACKOFF_MS;
    }
}

#[cfg(feature = "hydrate")]
pub use self::browser::{SocketHandle, board_id, spawn};

#[cfg(feature = "hydrate")]
mod browser {
    use std::rc::Rc;
    use std::time::Duration;

    use futures::future::{AbortHandle, Either, abortable, select};
    use futures::{SinkExt, StreamExt};
    use gloo_net::websocket::futures::WebSocket;
    use gloo_net::websocket::{Message, WebSocketError};
    use gloo_timers::future::sleep;

    use super::*;
    use crate::net::access::{AccessGuard, AccessLoss};
    use crate::net::fetch;
    use crate::net::intercept::{Exchange, classify_status};

    /// Stops the watcher when dropped or cancelled.
    pub struct SocketHandle {
        abort: AbortHandle,
    }

    impl SocketHandle {
        pub fn cancel(&self) {
            self.abort.abort();
        }
    }

    impl Drop for SocketHandle {
        fn drop(&mut self) {
            self.abort.abort();
        }
    }

    struct SessionEnd {
        close_code: Option<u16>,
        saw_traffic: bool,
        reason: String,
    }

    /// Board shown on this page: `<body data-board-id>` first, then the URL.
    pub fn board_id(window: &web_sys::Window, document: &web_sys::Document) -> Option<u64> {
        let from_body = document
            .body()
            .and_then(|body| body.get_attribute("data-board-id"))
            .and_then(|raw| raw.trim().parse().ok());
        from_body.or_else(|| {
            window
                .location()
                .pathname()
                .ok()
                .and_then(|path| board_id_from_path(&path))
        })
    }

    /// Start watching the board socket until access is lost or the handle drops.
    ///
    /// `fetch_intercepted` tells whether the page's `fetch` already reports
    /// access loss, so the board page check does not report it twice.
    pub fn spawn(
        window: &web_sys::Window,
        board_id: u64,
        guard: Rc<AccessGuard>,
        ping_ms: u32,
        fetch_intercepted: bool,
    ) -> SocketHandle {
        let location = window.location();
        let protocol = location.protocol().unwrap_or_default();
        let host = location.host().unwrap_or_else(|_| "localhost".to_owned());
        let watcher = Watcher {
            window: window.clone(),
            url: socket_url(&protocol, &host, board_id),
            page: board_page_path(board_id),
            guard,
            ping_ms,
            fetch_intercepted,
        };

        let (task, abort) = abortable(watcher.run());
        leptos::task::spawn_local(async move {
            let _ = task.await;
        });
        SocketHandle { abort }
    }

    struct Watcher {
        window: web_sys::Window,
        url: String,
        page: String,
        guard: Rc<AccessGuard>,
        ping_ms: u32,
        fetch_intercepted: bool,
    }

    impl Watcher {
        async fn run(self) {
            let mut backoff = Backoff::default();
            let mut silent_sessions = 0;
            loop {
                let end = run_session(&self.url, self.ping_ms, &mut backoff).await;
                silent_sessions = if end.saw_traffic { 0 } else { silent_sessions + 1 };
                match session_outcome(end.close_code, end.saw_traffic, silent_sessions) {
                    SessionOutcome::AccessLost(code) => {
                        self.guard.access_lost(AccessLoss::Socket(code));
                        return;
                    }
                    SessionOutcome::GiveUp => {
                        log::warn!("board socket refused {silent_sessions} times in a row; giving up");
                        return;
                    }
                    SessionOutcome::ConfirmAccess => {
                        log::info!("board socket closed before any traffic ({})", end.reason);
                        if self.page_denied().await {
                            return;
                        }
                    }
                    SessionOutcome::Reconnect => log::info!("board socket closed: {}", end.reason),
                }
                let delay = backoff.next_delay();
                sleep(Duration::from_millis(u64::from(delay))).await;
            }
        }

        /// Request the board page; `true` when it answers 403 or 404.
        async fn page_denied(&self) -> bool {
            let status = match fetch::current_fetch_status(&self.window, &self.page).await {
                Ok(status) => status,
                Err(e) => {
                    log::debug!("board access check failed: {e:?}");
                    return false;
                }
            };
            match classify_status(status) {
                Exchange::AccessLost(status) => {
                    if !self.fetch_intercepted {
                        self.guard.access_lost(AccessLoss::Http(status));
                    }
                    true
                }
                Exchange::Normal(_) | Exchange::Failed => false,
            }
        }
    }

    async fn run_session(url: &str, ping_ms: u32, backoff: &mut Backoff) -> SessionEnd {
        let ws = match WebSocket::open(url) {
            Ok(ws) => ws,
            Err(e) => {
                return SessionEnd {
                    close_code: None,
                    saw_traffic: false,
                    reason: e.to_string(),
                };
            }
        };
        let (mut write, mut read) = ws.split();

        let ping = async {
            loop {
                sleep(Duration::from_millis(u64::from(ping_ms))).await;
                if write.send(Message::Text(PING_MESSAGE.to_owned())).await.is_err() {
                    break;
                }
            }
        };

        let mut saw_traffic = false;
        let recv = async {
            while let Some(msg) = read.next().await {
                match msg {
                    Ok(Message::Text(text)) => {
                        saw_traffic = true;
                        backoff.reset();
                        handle_text(&text);
                    }
                    Ok(Message::Bytes(_)) => {
                        saw_traffic = true;
                        backoff.reset();
                    }
                    Err(WebSocketError::ConnectionClose(event)) => {
                        return (Some(event.code), format!("code {}", event.code));
                    }
                    Err(e) => return (None, e.to_string()),
                }
            }
            (None, "stream ended".to_owned())
        };

        let (close_code, reason) = match select(Box::pin(ping), Box::pin(recv)).await {
            Either::Left(((), _)) => (None, "ping send failed".to_owned()),
            Either::Right((end, _)) => end,
        };
        SessionEnd {
            close_code,
            saw_traffic,
            reason,
        }
    }

    fn handle_text(text: &str) {
        match parse_server_message(text) {
            Some(ServerMessage::Pong) => log::trace!("board socket pong"),
            Some(ServerMessage::Broadcast(payload)) => dispatch_broadcast(&payload),
            None => log::debug!("ignoring non-json socket frame"),
        }
    }

    fn dispatch_broadcast(payload: &serde_json::Value) {
        let Some(document) = crate::util::dom::document() else {
            return;
        };
        let Ok(detail) = js_sys::JSON::parse(&payload.to_string()) else {
            return;
        };
        let init = web_sys::CustomEventInit::new();
        init.set_detail(&detail);
        match web_sys::CustomEvent::new_with_event_init_dict(BROADCAST_EVENT, &init) {
            Ok(event) => {
                let _ = document.dispatch_event(&event);
            }
            Err(e) => log::warn!("could not build {BROADCAST_EVENT} event: {e:?}"),
        }
    }
}
