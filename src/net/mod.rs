//! Network observation for access loss.
//!
//! SYSTEM CONTEXT
//! ==============
//! `intercept` is the transport-agnostic middleware pipeline, `access` decides
//! what an access-loss signal does to the page, `fetch` installs the pipeline
//! over the page's `fetch`, and `board_socket` watches the board websocket
//! for the server's access-denial close codes.

pub mod access;
pub mod board_socket;
pub mod fetch;
pub mod intercept;
