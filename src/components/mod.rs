//! Behavior attached to server-rendered markup.
//!
//! SYSTEM CONTEXT
//! ==============
//! Only the toast stack renders its own nodes (through Leptos). The other
//! modules bind listeners to elements the server already emitted, located by
//! their `data-*` markers.

pub mod carousel;
pub mod collapsible;
#[cfg(feature = "hydrate")]
pub mod toast_stack;
pub mod tooltip;
