//! Slide carousel state machine.
//!
//! Owns the current index and the transition lock. Every accepted move gets
//! a fresh epoch; the delayed follow-ups (content reveal, lock release) carry
//! that epoch so a late delivery for an older transition is a no-op.

use crate::error::InitError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Next,
    Previous,
    GoTo(usize),
    First,
    Last,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Transitioning { epoch: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Busy,
    AlreadyCurrent,
    OutOfRange,
}

/// Presentation flags of one slide.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlideFlags {
    pub active: bool,
    /// Mirrors `aria-hidden`.
    pub hidden: bool,
    /// Set on the outgoing slide of a backwards move until the lock is released.
    pub prev: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub from: usize,
    pub to: usize,
    pub epoch: u64,
    pub backwards: bool,
    pub announcement: String,
}

#[derive(Debug, Clone)]
pub struct Carousel {
    slides: Vec<SlideFlags>,
    titles: Vec<Option<String>>,
    current: usize,
    phase: Phase,
    epoch: u64,
}

impl Carousel {
    /// One entry per slide, holding its heading if it has one.
    pub fn new(titles: Vec<Option<String>>) -> Result<Self, InitError> {
        if titles.is_empty() {
            return Err(InitError::NoSlides);
        }
        let slides = (0..titles.len())
            .map(|i| SlideFlags {
                active: i == 0,
                hidden: i != 0,
                prev: false,
            })
            .collect();
        Ok(Self {
            slides,
            titles,
            current: 0,
            phase: Phase::Idle,
            epoch: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.phase, Phase::Transitioning { .. })
    }

    /// Epoch of the most recent accepted transition.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn slide(&self, index: usize) -> Option<SlideFlags> {
        self.slides.get(index).copied()
    }

    pub fn slides(&self) -> &[SlideFlags] {
        &self.slides
    }

    /// Indicators and nav buttons are active when they point at the current slide.
    pub fn is_selected(&self, index: usize) -> bool {
        index == self.current
    }

    pub fn title(&self, index: usize) -> String {
        match self.titles.get(index).and_then(Option::as_deref) {
            Some(title) => title.to_string(),
            None => format!("Slide {}", index + 1),
        }
    }

    pub fn announcement(&self) -> String {
        format!("Now viewing: {}", self.title(self.current))
    }

    /// Index a command points at. `Next` and `Previous` wrap around.
    pub fn resolve(&self, command: Command) -> usize {
        let last = self.slides.len() - 1;
        match command {
            Command::Next => (self.current + 1) % self.slides.len(),
            Command::Previous if self.current == 0 => last,
            Command::Previous => self.current - 1,
            Command::GoTo(index) => index,
            Command::First => 0,
            Command::Last => last,
        }
    }

    pub fn dispatch(&mut self, command: Command) -> Result<Transition, Rejection> {
        self.go_to(self.resolve(command))
    }

    pub fn go_to(&mut self, target: usize) -> Result<Transition, Rejection> {
        if self.is_transitioning() {
            return Err(Rejection::Busy);
        }
        if target == self.current {
            return Err(Rejection::AlreadyCurrent);
        }
        if target >= self.slides.len() {
            return Err(Rejection::OutOfRange);
        }

        self.epoch += 1;
        self.phase = Phase::Transitioning { epoch: self.epoch };

        let from = self.current;
        let backwards = target < from;
        let outgoing = &mut self.slides[from];
        outgoing.hidden = true;
        outgoing.active = false;
        outgoing.prev = backwards;

        self.current = target;
        let incoming = &mut self.slides[target];
        incoming.active = true;
        incoming.hidden = false;

        Ok(Transition {
            from,
            to: target,
            epoch: self.epoch,
            backwards,
            announcement: self.announcement(),
        })
    }

    /// Releases the lock and clears `prev` markers if `epoch` is the
    /// transition in flight.
    pub fn settle(&mut self, epoch: u64) -> bool {
        if self.phase != (Phase::Transitioning { epoch }) {
            return false;
        }
        for slide in &mut self.slides {
            slide.prev = false;
        }
        self.phase = Phase::Idle;
        true
    }
}
