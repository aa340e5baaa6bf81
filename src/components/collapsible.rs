//! Collapse toggles for board lists.
//!
//! A click on any `[data-collapse-toggle]` flips the nearest enclosing
//! `[data-list-id]` container. Triggers outside a list do nothing.

pub const TOGGLE_SELECTOR: &str = "[data-collapse-toggle]";
pub const LIST_SELECTOR: &str = "[data-list-id]";
pub const LIST_ID_ATTR: &str = "data-list-id";

#[cfg(feature = "hydrate")]
pub use self::browser::{CollapsibleLists, toggle};

#[cfg(feature = "hydrate")]
mod browser {
    use std::cell::RefCell;
    use std::rc::Rc;

    use web_sys::{Document, Element};

    use super::*;
    use crate::state::collapse::{COLLAPSED_CLASS, CollapseState};
    use crate::util::dom::{Listener, query_all};

    pub struct CollapsibleLists {
        _listeners: Vec<Listener>,
    }

    impl CollapsibleLists {
        /// Bind every toggle on the page.
        pub fn install(document: &Document) -> Self {
            let state = Rc::new(RefCell::new(CollapseState::default()));
            let listeners: Vec<Listener> = query_all(document, TOGGLE_SELECTOR)
                .into_iter()
                .filter_map(|trigger| {
                    let state = Rc::clone(&state);
                    let target = trigger.clone();
                    Listener::new(&trigger, "click", move |_| toggle(&state, &target))
                        .map_err(|e| log::warn!("collapse toggle not bound: {e}"))
                        .ok()
                })
                .collect();
            log::debug!("bound {} collapse toggles", listeners.len());
            Self {
                _listeners: listeners,
            }
        }
    }

    /// Flip the list enclosing `trigger`.
    pub fn toggle(state: &RefCell<CollapseState>, trigger: &Element) {
        let list = trigger.closest(LIST_SELECTOR).unwrap_or_default();
        let rendered = list.as_ref().map(|list| {
            (
                list.get_attribute(LIST_ID_ATTR).unwrap_or_default(),
                list.class_list().contains(COLLAPSED_CLASS),
            )
        });
        let collapsed = state
            .borrow_mut()
            .toggle_enclosing(rendered.as_ref().map(|(id, collapsed)| (id.as_str(), *collapsed)));
        let (Some(list), Some(collapsed)) = (list, collapsed) else {
            return;
        };
        if let Err(e) = list.class_list().toggle_with_force(COLLAPSED_CLASS, collapsed) {
            log::debug!("list class update failed: {e:?}");
        }
    }
}
