use super::*;

// =============================================================
// Variant
// =============================================================

#[test]
fn variant_defaults_to_success_when_missing() {
    assert_eq!(Variant::parse(None), Variant::Success);
    assert_eq!(Variant::default(), Variant::Success);
}

#[test]
fn variant_containing_error_is_error() {
    for raw in ["error", "fatal-error", "errors", "network_error_retry", "Error", "API-ERROR"] {
        assert_eq!(Variant::parse(Some(raw)), Variant::Error, "{raw}");
        assert_eq!(Variant::parse(Some(raw)).icon(), "⚠️");
    }
}

#[test]
fn known_variants_map_to_themselves() {
    assert_eq!(Variant::parse(Some("success")), Variant::Success);
    assert_eq!(Variant::parse(Some("info")), Variant::Info);
    assert_eq!(Variant::Success.icon(), "✅");
    assert_eq!(Variant::Info.icon(), "ℹ️");
}

#[test]
fn unknown_variant_falls_back_to_info_glyph() {
    for raw in ["warning", "", "danger", "succes"] {
        let variant = Variant::parse(Some(raw));
        assert_eq!(variant, Variant::Other(raw.to_owned()));
        assert_eq!(variant.icon(), "ℹ️");
        assert_eq!(variant.as_str(), raw);
    }
}

// =============================================================
// Lifecycle
// =============================================================

#[test]
fn push_appends_in_insertion_order() {
    let mut q = ToastQueue::new(5);
    let a = q.push("a", Variant::Success).id;
    let b = q.push("b", Variant::Error).id;
    assert_ne!(a, b);
    assert_eq!(q.ids(), vec![a, b]);
    assert_eq!(q.get(a).map(|t| t.phase), Some(Phase::Entering));
    assert!(!q.is_visible(a));
}

#[test]
fn duplicate_messages_are_not_merged() {
    let mut q = ToastQueue::new(5);
    q.push("same", Variant::Info);
    q.push("same", Variant::Info);
    assert_eq!(q.len(), 2);
}

#[test]
fn reveal_then_hide_then_finish_removes_once() {
    let mut q = ToastQueue::new(5);
    let id = q.push("saved", Variant::Success).id;

    assert!(q.reveal(id));
    assert!(q.is_visible(id));
    assert!(!q.reveal(id));

    assert!(q.begin_hide(id));
    assert!(q.is_hiding(id));
    assert!(!q.is_visible(id));

    assert!(q.finish_hide(id));
    assert!(q.is_empty());
    assert!(!q.finish_hide(id));
}

#[test]
fn transition_end_before_hide_does_not_remove() {
    let mut q = ToastQueue::new(5);
    let id = q.push("saved", Variant::Success).id;
    q.reveal(id);
    // The fade-in transition also ends with a transitionend event.
    assert!(!q.finish_hide(id));
    assert_eq!(q.len(), 1);
}

#[test]
fn hide_without_transition_end_keeps_toast() {
    let mut q = ToastQueue::new(5);
    let id = q.push("saved", Variant::Success).id;
    q.reveal(id);
    q.begin_hide(id);
    assert_eq!(q.len(), 1);
    assert!(!q.begin_hide(id));
}

#[test]
fn hide_before_reveal_still_hides() {
    let mut q = ToastQueue::new(5);
    let id = q.push("saved", Variant::Success).id;
    assert!(q.begin_hide(id));
    assert!(!q.reveal(id));
    assert!(q.finish_hide(id));
}

// =============================================================
// Bounds
// =============================================================

#[test]
fn push_over_limit_evicts_oldest() {
    let mut q = ToastQueue::new(2);
    let a = q.push("a", Variant::Info).id;
    let b = q.push("b", Variant::Info).id;
    let pushed = q.push("c", Variant::Info);
    assert_eq!(pushed.evicted, vec![a]);
    assert_eq!(q.ids(), vec![b, pushed.id]);
}

#[test]
fn signals_for_evicted_toast_are_ignored() {
    let mut q = ToastQueue::new(1);
    let a = q.push("a", Variant::Info).id;
    q.push("b", Variant::Info);
    assert!(!q.reveal(a));
    assert!(!q.begin_hide(a));
    assert!(!q.finish_hide(a));
    assert_eq!(q.len(), 1);
}

#[test]
fn zero_limit_is_clamped_to_one() {
    let q = ToastQueue::new(0);
    assert_eq!(q.limit(), 1);
}

#[test]
fn clear_drops_everything() {
    let mut q = ToastQueue::new(3);
    q.push("a", Variant::Info);
    q.push("b", Variant::Info);
    q.clear();
    assert!(q.is_empty());
}
