//! Toast queue model.
//!
//! A toast moves `Entering -> Shown -> Hiding` and is removed only from
//! `Hiding`, when its fade-out transition completes. The browser drives the
//! transitions (animation frame, hide timer, `transitionend`); this model
//! only decides what each signal means for a given id, so late or repeated
//! signals for evicted or removed toasts are harmless no-ops.

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;

use std::collections::VecDeque;

pub type ToastId = u64;

/// Visual flavor of a toast.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Variant {
    #[default]
    Success,
    Error,
    Info,
    /// Unrecognized name, kept for the `data-variant` attribute.
    Other(String),
}

impl Variant {
    /// Normalize a raw variant name. Anything mentioning "error" is an error.
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::Success;
        };
        if raw.to_ascii_lowercase().contains("error") {
            return Self::Error;
        }
        match raw {
            "success" => Self::Success,
            "info" => Self::Info,
            other => Self::Other(other.to_owned()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
            Self::Other(name) => name,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Success => "✅",
            Self::Error => "⚠️",
            Self::Info | Self::Other(_) => "ℹ️",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    /// Inserted but not yet visible; waits one frame so the fade-in runs.
    #[default]
    Entering,
    Shown,
    Hiding,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
    pub variant: Variant,
    pub phase: Phase,
}

/// Result of [`ToastQueue::push`].
#[derive(Debug, PartialEq, Eq)]
pub struct Pushed {
    pub id: ToastId,
    /// Oldest toasts dropped to stay within the limit.
    pub evicted: Vec<ToastId>,
}

/// Bounded, insertion-ordered toast stack.
#[derive(Clone, Debug)]
pub struct ToastQueue {
    entries: VecDeque<Toast>,
    limit: usize,
    next_id: ToastId,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(5)
    }
}

impl ToastQueue {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            limit: limit.max(1),
            next_id: 1,
        }
    }

    pub fn push(&mut self, message: &str, variant: Variant) -> Pushed {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push_back(Toast {
            id,
            message: message.to_owned(),
            variant,
            phase: Phase::Entering,
        });

        let mut evicted = Vec::new();
        while self.entries.len() > self.limit {
            if let Some(old) = self.entries.pop_front() {
                evicted.push(old.id);
            }
        }
        Pushed { id, evicted }
    }

    /// Animation frame fired: make the toast visible.
    pub fn reveal(&mut self, id: ToastId) -> bool {
        match self.find_mut(id) {
            Some(toast) if toast.phase == Phase::Entering => {
                toast.phase = Phase::Shown;
                true
            }
            _ => false,
        }
    }

    /// Hide delay elapsed: start the fade-out.
    pub fn begin_hide(&mut self, id: ToastId) -> bool {
        match self.find_mut(id) {
            Some(toast) if toast.phase != Phase::Hiding => {
                toast.phase = Phase::Hiding;
                true
            }
            _ => false,
        }
    }

    /// A transition finished on the toast. Removes it only while hiding.
    pub fn finish_hide(&mut self, id: ToastId) -> bool {
        let Some(pos) = self.entries.iter().position(|t| t.id == id) else {
            return false;
        };
        if self.entries[pos].phase != Phase::Hiding {
            return false;
        }
        self.entries.remove(pos);
        true
    }

    pub fn get(&self, id: ToastId) -> Option<&Toast> {
        self.entries.iter().find(|t| t.id == id)
    }

    pub fn is_visible(&self, id: ToastId) -> bool {
        self.get(id).is_some_and(|t| t.phase == Phase::Shown)
    }

    pub fn is_hiding(&self, id: ToastId) -> bool {
        self.get(id).is_some_and(|t| t.phase == Phase::Hiding)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.entries.iter()
    }

    pub fn ids(&self) -> Vec<ToastId> {
        self.entries.iter().map(|t| t.id).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn find_mut(&mut self, id: ToastId) -> Option<&mut Toast> {
        self.entries.iter_mut().find(|t| t.id == id)
    }
}
