//! Turns raw keyboard, touch and timer input into carousel commands.

use crate::carousel::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Navigate(Command),
    /// Drop focus from whatever element holds it.
    Blur,
}

impl KeyAction {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(KeyAction::Navigate(Command::Previous)),
            "ArrowRight" => Some(KeyAction::Navigate(Command::Next)),
            "Home" => Some(KeyAction::Navigate(Command::First)),
            "End" => Some(KeyAction::Navigate(Command::Last)),
            "Escape" => Some(KeyAction::Blur),
            _ => None,
        }
    }

    /// Navigation keys swallow the browser's default scrolling.
    pub fn prevents_default(&self) -> bool {
        matches!(self, KeyAction::Navigate(_))
    }
}

/// Horizontal swipe detection on the carousel container.
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    threshold: f64,
    start_x: Option<f64>,
}

impl SwipeTracker {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            start_x: None,
        }
    }

    pub fn is_tracking(&self) -> bool {
        self.start_x.is_some()
    }

    pub fn begin(&mut self, x: f64) {
        self.start_x = Some(x);
    }

    /// Finishes the gesture. Travel strictly beyond the threshold is a swipe:
    /// leftwards goes forward, rightwards goes back.
    pub fn end(&mut self, x: f64) -> Option<Command> {
        let start = self.start_x.take()?;
        let delta = x - start;
        if delta.abs() <= self.threshold {
            return None;
        }
        Some(if delta < 0.0 {
            Command::Next
        } else {
            Command::Previous
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoAdvanceState {
    Unarmed,
    Armed,
    Cancelled,
    Fired,
}

/// One-shot advance off the hero slide for visitors who never touch anything.
#[derive(Debug, Clone)]
pub struct AutoAdvance {
    state: AutoAdvanceState,
}

impl Default for AutoAdvance {
    fn default() -> Self {
        Self {
            state: AutoAdvanceState::Unarmed,
        }
    }
}

impl AutoAdvance {
    pub fn state(&self) -> AutoAdvanceState {
        self.state
    }

    /// Arms the timer when the page starts on the first slide. Returns true
    /// if the caller should schedule the advance.
    pub fn arm(&mut self, current: usize) -> bool {
        if self.state != AutoAdvanceState::Unarmed || current != 0 {
            return false;
        }
        self.state = AutoAdvanceState::Armed;
        true
    }

    /// Any click, key press or touch cancels the advance for good. Returns
    /// true for the interaction that did the cancelling.
    pub fn interrupt(&mut self) -> bool {
        match self.state {
            AutoAdvanceState::Unarmed | AutoAdvanceState::Armed => {
                self.state = AutoAdvanceState::Cancelled;
                true
            }
            AutoAdvanceState::Cancelled | AutoAdvanceState::Fired => false,
        }
    }

    pub fn fire(&mut self, current: usize) -> Option<Command> {
        if self.state != AutoAdvanceState::Armed {
            return None;
        }
        self.state = AutoAdvanceState::Fired;
        (current == 0).then_some(Command::Next)
    }
}
