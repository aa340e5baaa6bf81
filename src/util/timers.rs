//! Delayed work and the handles that cancel it.
//!
//! DESIGN
//! ======
//! Every timeout and interval the crate starts is held in one `TimerBag`, so
//! `teardown` can cancel all of them. One-shot timers mark themselves fired
//! and are dropped on the next registration rather than from inside their
//! own callback.

pub trait Scheduler {
    /// Run `task` once after `delay_ms`.
    fn after(&self, delay_ms: u32, task: Box<dyn FnOnce()>);
}

#[cfg(feature = "hydrate")]
pub use self::browser::TimerBag;

#[cfg(feature = "hydrate")]
mod browser {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::{Rc, Weak};

    use gloo_timers::callback::{Interval, Timeout};

    use super::Scheduler;

    #[derive(Default)]
    struct Slots {
        next_key: u64,
        timeouts: HashMap<u64, Timeout>,
        fired: Vec<u64>,
        intervals: Vec<Interval>,
        cancelled: bool,
    }

    impl Slots {
        fn prune(&mut self) {
            for key in self.fired.drain(..) {
                self.timeouts.remove(&key);
            }
        }
    }

    /// Shared owner of gloo timer handles.
    #[derive(Clone, Default)]
    pub struct TimerBag {
        slots: Rc<RefCell<Slots>>,
    }

    impl TimerBag {
        pub fn timeout<F>(&self, delay_ms: u32, task: F)
        where
            F: FnOnce() + 'static,
        {
            let mut slots = self.slots.borrow_mut();
            if slots.cancelled {
                return;
            }
            slots.prune();
            let key = slots.next_key;
            slots.next_key += 1;

            let weak: Weak<RefCell<Slots>> = Rc::downgrade(&self.slots);
            let handle = Timeout::new(delay_ms, move || {
                task();
                if let Some(slots) = weak.upgrade() {
                    if let Ok(mut slots) = slots.try_borrow_mut() {
                        slots.fired.push(key);
                    }
                }
            });
            slots.timeouts.insert(key, handle);
        }

        pub fn interval<F>(&self, period_ms: u32, tick: F)
        where
            F: FnMut() + 'static,
        {
            let mut slots = self.slots.borrow_mut();
            if slots.cancelled {
                return;
            }
            slots.intervals.push(Interval::new(period_ms, tick));
        }

        /// Cancel everything and refuse new registrations.
        pub fn cancel_all(&self) {
            let (timeouts, intervals) = {
                let mut slots = self.slots.borrow_mut();
                slots.cancelled = true;
                slots.fired.clear();
                (
                    std::mem::take(&mut slots.timeouts),
                    std::mem::take(&mut slots.intervals),
                )
            };
            log::debug!("cancelling {} timeouts and {} intervals", timeouts.len(), intervals.len());
            // Dropping a gloo handle clears the browser timer.
            drop(timeouts);
            drop(intervals);
        }
    }

    impl Scheduler for TimerBag {
        fn after(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
            self.timeout(delay_ms, task);
        }
    }
}
