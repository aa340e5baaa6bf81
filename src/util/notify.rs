//! Toast notification service.
//!
//! `ToastService` is built once at startup and handed to everything that
//! raises notifications. It owns the queue rendered by
//! [`crate::components::toast_stack`] and schedules each toast's reveal on
//! the next frame and its hide after `toast_hide_ms`. The queue store, the
//! frame hook, and the timer are injected, so the same push logic runs
//! against a Leptos signal in the browser and a plain `RefCell` in tests.
//!
//! ERROR HANDLING
//! ==============
//! A page without a `#toast-stack` container still gets every message, as a
//! blocking `alert`.

#[cfg(test)]
#[path = "notify_test.rs"]
mod notify_test;

use std::rc::Rc;

use crate::config::UiConfig;
use crate::state::toast::{ToastId, ToastQueue, Variant};
use crate::util::timers::Scheduler;

pub trait Notifier {
    fn push(&self, message: &str, variant: Variant);
}

/// Shared handle to the rendered queue.
pub trait ToastStore: Clone + 'static {
    /// Apply `f` to the queue. `None` when the queue can no longer be updated.
    fn update<R>(&self, f: impl FnOnce(&mut ToastQueue) -> R) -> Option<R>;
}

/// Runs work after the browser has painted the current frame.
pub trait FrameScheduler {
    fn next_frame(&self, task: Box<dyn FnOnce()>);
}

/// Blocking browser alert, the fallback when no stack is mounted.
pub fn alert(message: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        log::warn!("alert: {message}");
    }
}

pub struct ToastService<Q> {
    /// `None` when the page has no stack container.
    queue: Option<Q>,
    hide_ms: u32,
    scheduler: Rc<dyn Scheduler>,
    frames: Rc<dyn FrameScheduler>,
    fallback: Rc<dyn Fn(&str)>,
}

impl<Q: ToastStore> ToastService<Q> {
    pub fn new(
        queue: Option<Q>,
        config: &UiConfig,
        scheduler: Rc<dyn Scheduler>,
        frames: Rc<dyn FrameScheduler>,
        fallback: Rc<dyn Fn(&str)>,
    ) -> Self {
        Self {
            queue,
            hide_ms: config.toast_hide_ms,
            scheduler,
            frames,
            fallback,
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.queue.is_some()
    }

    pub fn clear(&self) {
        if let Some(queue) = &self.queue {
            queue.update(ToastQueue::clear);
        }
    }
}

impl<Q: ToastStore> Notifier for ToastService<Q> {
    fn push(&self, message: &str, variant: Variant) {
        let Some(queue) = &self.queue else {
            (self.fallback)(message);
            return;
        };
        let Some(pushed) = queue.update(|q| q.push(message, variant)) else {
            (self.fallback)(message);
            return;
        };
        if !pushed.evicted.is_empty() {
            log::debug!("toast limit reached; evicted {:?}", pushed.evicted);
        }

        let id = pushed.id;
        let shown = queue.clone();
        self.frames.next_frame(Box::new(move || {
            shown.update(|q| q.reveal(id));
        }));
        let hidden = queue.clone();
        self.scheduler.after(
            self.hide_ms,
            Box::new(move || {
                hidden.update(|q| q.begin_hide(id));
            }),
        );
    }
}

/// A toast's CSS transition ended. Detaches it if it was hiding; the
/// fade-in transition and repeated events leave the queue alone.
pub fn transition_ended<Q: ToastStore>(queue: &Q, id: ToastId) -> bool {
    queue.update(|q| q.finish_hide(id)).unwrap_or(false)
}

#[cfg(feature = "hydrate")]
pub use self::browser::{AnimationFrames, Toaster};

#[cfg(feature = "hydrate")]
mod browser {
    use std::cell::Cell;
    use std::rc::Rc;

    use leptos::prelude::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;

    use super::{FrameScheduler, ToastService, ToastStore, alert};
    use crate::components::toast_stack::{TOAST_STACK_ID, ToastStack};
    use crate::config::UiConfig;
    use crate::state::toast::ToastQueue;
    use crate::util::timers::Scheduler;

    pub type Toaster = ToastService<RwSignal<ToastQueue>>;

    impl ToastStore for RwSignal<ToastQueue> {
        fn update<R>(&self, f: impl FnOnce(&mut ToastQueue) -> R) -> Option<R> {
            self.try_update(f)
        }
    }

    /// `requestAnimationFrame`, or immediate execution where it is missing.
    pub struct AnimationFrames;

    impl FrameScheduler for AnimationFrames {
        fn next_frame(&self, task: Box<dyn FnOnce()>) {
            let Some(window) = web_sys::window() else {
                task();
                return;
            };
            // Taken by whichever side runs first: the frame callback or the fallback below.
            let task = Rc::new(Cell::new(Some(task)));
            let queued = Rc::clone(&task);
            let callback = Closure::once_into_js(move || {
                if let Some(task) = queued.take() {
                    task();
                }
            });
            if window.request_animation_frame(callback.unchecked_ref()).is_err() {
                log::debug!("requestAnimationFrame unavailable; running now");
                if let Some(task) = task.take() {
                    task();
                }
            }
        }
    }

    impl ToastService<RwSignal<ToastQueue>> {
        /// Mount the stack into `#toast-stack` if the page has one.
        pub fn mount(document: &web_sys::Document, config: &UiConfig, scheduler: Rc<dyn Scheduler>) -> Self {
            let container = document
                .get_element_by_id(TOAST_STACK_ID)
                .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok());

            let queue = match container {
                Some(container) => {
                    let queue = RwSignal::new(ToastQueue::new(config.toast_limit));
                    leptos::mount::mount_to(container, move || view! { <ToastStack queue=queue/> }).forget();
                    Some(queue)
                }
                None => {
                    log::info!("no #{TOAST_STACK_ID} on page; toasts fall back to alert()");
                    None
                }
            };

            Self::new(queue, config, scheduler, Rc::new(AnimationFrames), Rc::new(alert))
        }
    }
}
