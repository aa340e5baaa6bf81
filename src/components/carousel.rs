//! Onboarding carousel bound to `[data-onboarding]`.
//!
//! Slides are the container's `[data-slide]` children. Optional
//! `[data-prev]` / `[data-next]` controls step manually; an interval advances
//! regardless of manual steps. The first slide is rendered active during
//! install, before the page's first paint settles.

#[cfg(test)]
#[path = "carousel_test.rs"]
mod carousel_test;

use crate::state::carousel::SlideState;

pub const CONTAINER_SELECTOR: &str = "[data-onboarding]";
pub const SLIDE_SELECTOR: &str = "[data-slide]";
pub const PREV_SELECTOR: &str = "[data-prev]";
pub const NEXT_SELECTOR: &str = "[data-next]";

/// Classes, `aria-hidden`, and `inert` for one slide.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlidePresentation {
    pub classes: [(&'static str, bool); 3],
    pub hidden: bool,
}

pub fn slide_presentation(state: SlideState) -> SlidePresentation {
    let active = state == SlideState::Active;
    SlidePresentation {
        classes: [
            ("opacity-100", active),
            ("opacity-0", !active),
            ("pointer-events-none", !active),
        ],
        hidden: !active,
    }
}

#[cfg(feature = "hydrate")]
pub use self::browser::OnboardingCarousel;

#[cfg(feature = "hydrate")]
mod browser {
    use std::cell::RefCell;
    use std::rc::Rc;

    use web_sys::{Document, Element};

    use super::*;
    use crate::state::carousel::Carousel;
    use crate::util::dom::{Listener, query_all};
    use crate::util::timers::TimerBag;

    pub struct OnboardingCarousel {
        _listeners: Vec<Listener>,
    }

    impl OnboardingCarousel {
        /// Bind the page's carousel, if it has one with at least one slide.
        pub fn install(document: &Document, timers: &TimerBag, interval_ms: u32) -> Option<Self> {
            let container = document.query_selector(CONTAINER_SELECTOR).ok().flatten()?;
            let slides = Rc::new(query_all(&container, SLIDE_SELECTOR));
            let Some(carousel) = Carousel::new(slides.len()) else {
                log::warn!("onboarding container has no slides");
                return None;
            };
            let state = Rc::new(RefCell::new(carousel));
            render(&slides, &state.borrow());

            let controls: [(&str, fn(&mut Carousel) -> usize); 2] =
                [(PREV_SELECTOR, Carousel::prev), (NEXT_SELECTOR, Carousel::next)];
            let mut listeners = Vec::new();
            for (selector, step) in controls {
                let Some(control) = container.query_selector(selector).ok().flatten() else {
                    continue;
                };
                let state = Rc::clone(&state);
                let slides = Rc::clone(&slides);
                match Listener::new(&control, "click", move |_| {
                    step(&mut state.borrow_mut());
                    render(&slides, &state.borrow());
                }) {
                    Ok(listener) => listeners.push(listener),
                    Err(e) => log::warn!("carousel control {selector} not bound: {e}"),
                }
            }

            {
                let state = Rc::clone(&state);
                let slides = Rc::clone(&slides);
                timers.interval(interval_ms, move || {
                    state.borrow_mut().auto_advance();
                    render(&slides, &state.borrow());
                });
            }

            log::debug!("onboarding carousel with {} slides", slides.len());
            Some(Self {
                _listeners: listeners,
            })
        }
    }

    fn render(slides: &[Element], carousel: &Carousel) {
        for (slide, state) in slides.iter().zip(carousel.slide_states()) {
            let presentation = slide_presentation(state);
            let classes = slide.class_list();
            for (name, on) in presentation.classes {
                let _ = classes.toggle_with_force(name, on);
            }
            let _ = slide.toggle_attribute_with_force("inert", presentation.hidden);
            if presentation.hidden {
                let _ = slide.set_attribute("aria-hidden", "true");
            } else {
                let _ = slide.remove_attribute("aria-hidden");
            }
        }
    }
}
