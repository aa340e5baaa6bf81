//! Onboarding carousel state machine.

#[cfg(test)]
#[path = "carousel_test.rs"]
mod carousel_test;

/// Presentation of one slide for the current index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlideState {
    Active,
    Inert,
}

/// Current slide over a fixed, non-empty slide count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Carousel {
    index: usize,
    slide_count: usize,
}

impl Carousel {
    /// Start at slide 0. Returns `None` when there are no slides.
    pub fn new(slide_count: usize) -> Option<Self> {
        (slide_count > 0).then_some(Self { index: 0, slide_count })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    pub fn next(&mut self) -> usize {
        self.index = (self.index + 1) % self.slide_count;
        self.index
    }

    pub fn prev(&mut self) -> usize {
        self.index = (self.index + self.slide_count - 1) % self.slide_count;
        self.index
    }

    /// Timer tick; identical to `next` and unaware of manual navigation.
    pub fn auto_advance(&mut self) -> usize {
        self.next()
    }

    pub fn slide_state(&self, slide: usize) -> SlideState {
        if slide == self.index {
            SlideState::Active
        } else {
            SlideState::Inert
        }
    }

    pub fn slide_states(&self) -> impl Iterator<Item = SlideState> + '_ {
        (0..self.slide_count).map(|i| self.slide_state(i))
    }
}
