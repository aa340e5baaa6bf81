//! Service seams between the pure logic and the browser.
//!
//! SYSTEM CONTEXT
//! ==============
//! `Notifier`, `Navigator`, and `Scheduler` are the only ways the access-loss
//! logic reaches the page. Browser implementations live behind `hydrate`;
//! tests substitute recording doubles.

#[cfg(feature = "hydrate")]
pub mod dom;
pub mod navigate;
pub mod notify;
pub mod timers;
