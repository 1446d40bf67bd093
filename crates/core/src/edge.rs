//! Edge detection for press-once controls.
//!
//! Rotation and pause act once per press-and-release cycle. Each such control
//! owns an [`EdgeDetector`] that turns the sampled held state into an [`Edge`].

/// Transition between two consecutive samples of a button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Up last sample, down now
    Pressed,
    /// Down in both samples
    Held,
    /// Down last sample, up now
    Released,
    /// Up in both samples
    Idle,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeDetector {
    held: bool,
}

impl EdgeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the current held state and classify the transition
    pub fn update(&mut self, held: bool) -> Edge {
        let edge = match (self.held, held) {
            (false, true) => Edge::Pressed,
            (true, true) => Edge::Held,
            (true, false) => Edge::Released,
            (false, false) => Edge::Idle,
        };
        self.held = held;
        edge
    }

    pub fn is_held(&self) -> bool {
        self.held
    }
}
