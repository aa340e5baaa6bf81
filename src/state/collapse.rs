//! Collapsed/expanded state per list.
//!
//! Lists are keyed by their `data-list-id`. The `list-collapsed` class on the
//! list container is rendered from this map and never read back after the
//! initial seed.

#[cfg(test)]
#[path = "collapse_test.rs"]
mod collapse_test;

use std::collections::HashMap;

pub const COLLAPSED_CLASS: &str = "list-collapsed";

#[derive(Clone, Debug, Default)]
pub struct CollapseState {
    lists: HashMap<String, bool>,
}

impl CollapseState {
    /// Record a list's server-rendered state unless it is already tracked.
    pub fn seed(&mut self, list_id: &str, collapsed: bool) {
        self.lists.entry(list_id.to_owned()).or_insert(collapsed);
    }

    /// Flip a list and return its new state. Unknown lists start expanded.
    pub fn toggle(&mut self, list_id: &str) -> bool {
        let collapsed = self.lists.entry(list_id.to_owned()).or_insert(false);
        *collapsed = !*collapsed;
        *collapsed
    }

    /// Flip the list enclosing a toggle. `list` is its id and server-rendered
    /// state, or `None` for a toggle outside any list, which changes nothing.
    pub fn toggle_enclosing(&mut self, list: Option<(&str, bool)>) -> Option<bool> {
        let (list_id, rendered_collapsed) = list?;
        self.seed(list_id, rendered_collapsed);
        Some(self.toggle(list_id))
    }

    pub fn is_collapsed(&self, list_id: &str) -> bool {
        self.lists.get(list_id).copied().unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }
}
