//! Keyboard-reachable tooltip hosts.
//!
//! Every `[data-tooltip]` element gets the `tooltip` class and `tabindex="0"`
//! so hover tooltips also show on focus. Re-running is harmless.

pub const TOOLTIP_SELECTOR: &str = "[data-tooltip]";
pub const TOOLTIP_CLASS: &str = "tooltip";

#[cfg(feature = "hydrate")]
pub fn activate(document: &web_sys::Document) -> usize {
    let hosts = crate::util::dom::query_all(document, TOOLTIP_SELECTOR);
    for host in &hosts {
        let _ = host.class_list().add_1(TOOLTIP_CLASS);
        let _ = host.set_attribute("tabindex", "0");
    }
    hosts.len()
}
