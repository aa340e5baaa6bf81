//! Toast cards rendered into the server's `#toast-stack` container.
//!
//! The container's own CSS decides stacking direction; cards are emitted in
//! queue order. A card leaves the DOM when the queue drops it, which happens
//! on the `transitionend` that follows the hide.

use leptos::prelude::*;

use crate::state::toast::{ToastId, ToastQueue, Variant};
use crate::util::notify::transition_ended;

pub const TOAST_STACK_ID: &str = "toast-stack";

#[component]
pub fn ToastStack(queue: RwSignal<ToastQueue>) -> impl IntoView {
    let entries = move || {
        queue.with(|q| {
            q.iter()
                .map(|t| (t.id, t.message.clone(), t.variant.clone()))
                .collect::<Vec<_>>()
        })
    };

    view! {
        <For
            each=entries
            key=|(id, _, _)| *id
            children=move |(id, message, variant): (ToastId, String, Variant)| {
                view! { <ToastCard queue=queue id=id message=message variant=variant/> }
            }
        />
    }
}

#[component]
fn ToastCard(queue: RwSignal<ToastQueue>, id: ToastId, message: String, variant: Variant) -> impl IntoView {
    let class = move || {
        if queue.with(|q| q.is_visible(id)) {
            "toast opacity-100"
        } else {
            "toast"
        }
    };
    let style = move || {
        if queue.with(|q| q.is_hiding(id)) {
            "opacity: 0"
        } else {
            ""
        }
    };
    let on_transition_end = move |_| {
        transition_ended(&queue, id);
    };

    view! {
        <div
            class=class
            style=style
            data-variant=variant.as_str().to_owned()
            on:transitionend=on_transition_end
        >
            <span class="toast-icon">{variant.icon()}</span>
            <span>{message}</span>
        </div>
    }
}
