use std::cell::RefCell;

use super::*;
use crate::state::toast::Phase;

#[derive(Clone)]
struct SharedQueue(Rc<RefCell<ToastQueue>>);

impl SharedQueue {
    fn new(limit: usize) -> Self {
        Self(Rc::new(RefCell::new(ToastQueue::new(limit))))
    }

    fn phase(&self, id: ToastId) -> Option<Phase> {
        self.0.borrow().get(id).map(|t| t.phase)
    }
}

impl ToastStore for SharedQueue {
    fn update<R>(&self, f: impl FnOnce(&mut ToastQueue) -> R) -> Option<R> {
        Some(f(&mut self.0.borrow_mut()))
    }
}

/// A store whose owner has been disposed.
#[derive(Clone)]
struct Disposed;

impl ToastStore for Disposed {
    fn update<R>(&self, _: impl FnOnce(&mut ToastQueue) -> R) -> Option<R> {
        None
    }
}

#[derive(Default)]
struct ManualScheduler {
    tasks: RefCell<Vec<(u32, Box<dyn FnOnce()>)>>,
}

impl ManualScheduler {
    fn delays(&self) -> Vec<u32> {
        self.tasks.borrow().iter().map(|(d, _)| *d).collect()
    }

    fn run_all(&self) {
        let tasks = std::mem::take(&mut *self.tasks.borrow_mut());
        for (_, task) in tasks {
            task();
        }
    }
}

impl Scheduler for ManualScheduler {
    fn after(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        self.tasks.borrow_mut().push((delay_ms, task));
    }
}

#[derive(Default)]
struct ManualFrames {
    tasks: RefCell<Vec<Box<dyn FnOnce()>>>,
}

impl ManualFrames {
    fn queued(&self) -> usize {
        self.tasks.borrow().len()
    }

    fn paint(&self) {
        let tasks = std::mem::take(&mut *self.tasks.borrow_mut());
        for task in tasks {
            task();
        }
    }
}

impl FrameScheduler for ManualFrames {
    fn next_frame(&self, task: Box<dyn FnOnce()>) {
        self.tasks.borrow_mut().push(task);
    }
}

struct Harness<Q> {
    service: ToastService<Q>,
    scheduler: Rc<ManualScheduler>,
    frames: Rc<ManualFrames>,
    alerts: Rc<RefCell<Vec<String>>>,
}

fn harness<Q: ToastStore>(queue: Option<Q>, config: &UiConfig) -> Harness<Q> {
    let scheduler = Rc::new(ManualScheduler::default());
    let frames = Rc::new(ManualFrames::default());
    let alerts = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&alerts);
    let service = ToastService::new(
        queue,
        config,
        scheduler.clone(),
        frames.clone(),
        Rc::new(move |message: &str| sink.borrow_mut().push(message.to_owned())),
    );
    Harness {
        service,
        scheduler,
        frames,
        alerts,
    }
}

// =============================================================
// Fallback
// =============================================================

#[test]
fn missing_stack_falls_back_to_alert() {
    let h = harness::<SharedQueue>(None, &UiConfig::default());
    assert!(!h.service.is_mounted());

    h.service.push("Carte créée", Variant::Success);

    assert_eq!(*h.alerts.borrow(), vec!["Carte créée".to_owned()]);
    assert!(h.scheduler.delays().is_empty());
    assert_eq!(h.frames.queued(), 0);
}

#[test]
fn disposed_stack_falls_back_to_alert() {
    let h = harness(Some(Disposed), &UiConfig::default());
    h.service.push("late", Variant::Error);
    assert_eq!(*h.alerts.borrow(), vec!["late".to_owned()]);
    assert!(h.scheduler.delays().is_empty());
}

// =============================================================
// Lifecycle
// =============================================================

#[test]
fn toast_is_revealed_on_the_next_frame() {
    let queue = SharedQueue::new(5);
    let h = harness(Some(queue.clone()), &UiConfig::default());

    h.service.push("saved", Variant::Success);
    let id = queue.0.borrow().ids()[0];
    assert_eq!(queue.phase(id), Some(Phase::Entering));
    assert_eq!(h.frames.queued(), 1);

    h.frames.paint();
    assert_eq!(queue.phase(id), Some(Phase::Shown));
    assert!(h.alerts.borrow().is_empty());
}

#[test]
fn hide_is_scheduled_after_exactly_3500_ms() {
    let queue = SharedQueue::new(5);
    let h = harness(Some(queue.clone()), &UiConfig::default());

    h.service.push("saved", Variant::Success);
    assert_eq!(h.scheduler.delays(), vec![3500]);

    let id = queue.0.borrow().ids()[0];
    h.frames.paint();
    h.scheduler.run_all();
    assert_eq!(queue.phase(id), Some(Phase::Hiding));
}

#[test]
fn hide_delay_follows_config() {
    let mut config = UiConfig::default();
    config.toast_hide_ms = 800;
    let h = harness(Some(SharedQueue::new(5)), &config);
    h.service.push("quick", Variant::Info);
    assert_eq!(h.scheduler.delays(), vec![800]);
}

#[test]
fn transition_end_detaches_a_hiding_toast_once() {
    let queue = SharedQueue::new(5);
    let h = harness(Some(queue.clone()), &UiConfig::default());
    h.service.push("saved", Variant::Success);
    let id = queue.0.borrow().ids()[0];

    h.frames.paint();
    // The fade-in transition ends while the toast is still shown.
    assert!(!transition_ended(&queue, id));
    assert_eq!(queue.phase(id), Some(Phase::Shown));

    h.scheduler.run_all();
    assert!(transition_ended(&queue, id));
    assert!(queue.0.borrow().is_empty());
    assert!(!transition_ended(&queue, id));
}

#[test]
fn timers_for_evicted_toasts_do_nothing() {
    let queue = SharedQueue::new(1);
    let h = harness(Some(queue.clone()), &UiConfig::default());
    h.service.push("first", Variant::Success);
    h.service.push("second", Variant::Success);
    assert_eq!(queue.0.borrow().len(), 1);

    h.frames.paint();
    h.scheduler.run_all();
    let remaining: Vec<String> = queue.0.borrow().iter().map(|t| t.message.clone()).collect();
    assert_eq!(remaining, vec!["second".to_owned()]);
    assert_eq!(queue.phase(queue.0.borrow().ids()[0]), Some(Phase::Hiding));
}

#[test]
fn clear_empties_the_stack() {
    let queue = SharedQueue::new(5);
    let h = harness(Some(queue.clone()), &UiConfig::default());
    h.service.push("a", Variant::Success);
    h.service.push("b", Variant::Error);
    h.service.clear();
    assert!(queue.0.borrow().is_empty());
}
