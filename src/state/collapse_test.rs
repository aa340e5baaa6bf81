use super::*;

#[test]
fn unknown_list_is_expanded() {
    let state = CollapseState::default();
    assert!(!state.is_collapsed("42"));
    assert!(state.is_empty());
}

#[test]
fn toggle_twice_restores_original_state() {
    let mut state = CollapseState::default();
    state.seed("a", false);
    state.seed("b", true);

    state.toggle("a");
    state.toggle("a");
    assert!(!state.is_collapsed("a"));

    state.toggle("b");
    state.toggle("b");
    assert!(state.is_collapsed("b"));
}

#[test]
fn toggle_returns_new_state() {
    let mut state = CollapseState::default();
    assert!(state.toggle("x"));
    assert!(!state.toggle("x"));
}

#[test]
fn seed_does_not_override_tracked_list() {
    let mut state = CollapseState::default();
    state.seed("a", false);
    state.toggle("a");
    state.seed("a", false);
    assert!(state.is_collapsed("a"));
    assert_eq!(state.len(), 1);
}

#[test]
fn lists_are_independent() {
    let mut state = CollapseState::default();
    state.toggle("a");
    assert!(state.is_collapsed("a"));
    assert!(!state.is_collapsed("b"));
}

#[test]
fn toggle_outside_any_list_changes_nothing() {
    let mut state = CollapseState::default();
    assert_eq!(state.toggle_enclosing(None), None);
    assert!(state.is_empty());
}

#[test]
fn enclosing_list_is_seeded_from_rendered_state() {
    let mut state = CollapseState::default();
    assert_eq!(state.toggle_enclosing(Some(("7", true))), Some(false));
    // Later toggles ignore the stale rendered class.
    assert_eq!(state.toggle_enclosing(Some(("7", true))), Some(true));
    assert_eq!(state.toggle_enclosing(Some(("7", true))), Some(false));
    assert!(!state.is_collapsed("7"));
}
