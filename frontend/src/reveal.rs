//! Reveal state for slide content, scroll-in sections and stat counters.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::counter::{CounterAnimation, CounterTarget};

/// Whether counters count up again when their slide is revisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CounterReplay {
    /// Each counter animates once per page load.
    #[default]
    OncePerPage,
    /// Counters restart from zero every time their slide becomes current.
    EverySlideEntry,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activation {
    pub slide: usize,
    pub epoch: u64,
    /// `(element, delay_ms)` for every animatable element of the slide.
    pub delays: Vec<(usize, u32)>,
}

/// Cascading reveal of the animatable elements of the current slide.
#[derive(Debug, Clone)]
pub struct StaggerReveal {
    slides: Vec<Vec<bool>>,
    stagger_ms: u32,
    epoch: u64,
}

impl StaggerReveal {
    /// `counts[i]` is the number of animatable elements on slide `i`.
    pub fn new(counts: impl IntoIterator<Item = usize>, stagger_ms: u32) -> Self {
        Self {
            slides: counts.into_iter().map(|n| vec![false; n]).collect(),
            stagger_ms,
            epoch: 0,
        }
    }

    /// Number of activations so far. Also the epoch of the latest one.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Hides every element of `slide` and plans its cascade. Any cascade
    /// still pending from an earlier activation is superseded.
    pub fn activate(&mut self, slide: usize) -> Activation {
        self.epoch += 1;
        let elements = self.slides.get_mut(slide).map(Vec::as_mut_slice).unwrap_or_default();
        elements.iter_mut().for_each(|revealed| *revealed = false);
        let delays = (0..elements.len())
            .map(|i| (i, i as u32 * self.stagger_ms))
            .collect();
        Activation {
            slide,
            epoch: self.epoch,
            delays,
        }
    }

    /// Drops any pending cascade without planning a new one. Elements
    /// already revealed stay as they are.
    pub fn cancel(&mut self) {
        self.epoch += 1;
    }

    pub fn reveal(&mut self, slide: usize, element: usize, epoch: u64) -> bool {
        if epoch != self.epoch {
            return false;
        }
        match self.slides.get_mut(slide).and_then(|s| s.get_mut(element)) {
            Some(revealed) if !*revealed => {
                *revealed = true;
                true
            }
            _ => false,
        }
    }

    pub fn is_revealed(&self, slide: usize, element: usize) -> bool {
        self.slides
            .get(slide)
            .and_then(|s| s.get(element))
            .copied()
            .unwrap_or(false)
    }
}

/// Elements that reveal the first time they scroll into view and then stay
/// revealed.
#[derive(Debug, Clone, Default)]
pub struct ScrollReveal {
    watched: BTreeSet<String>,
    revealed: BTreeSet<String>,
}

impl ScrollReveal {
    pub fn new(keys: impl IntoIterator<Item = String>) -> Self {
        Self {
            watched: keys.into_iter().collect(),
            revealed: BTreeSet::new(),
        }
    }

    /// Handles a visibility crossing. Returns true the first time a watched
    /// key crosses.
    pub fn cross(&mut self, key: &str) -> bool {
        self.watched.contains(key) && self.revealed.insert(key.to_string())
    }

    pub fn is_revealed(&self, key: &str) -> bool {
        self.revealed.contains(key)
    }
}

/// Token for the next frame of one counter's run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterTick {
    pub counter: usize,
    pub run: u64,
}

#[derive(Debug, Clone)]
struct CounterSlot {
    slide: usize,
    text: String,
    animated: bool,
    run: u64,
    animation: CounterAnimation,
}

/// Display text and animation runs of every stat counter on the page.
#[derive(Debug, Clone)]
pub struct CounterBoard {
    slots: Vec<CounterSlot>,
    replay: CounterReplay,
}

impl CounterBoard {
    /// `counters` lists `(slide, target)` in page order.
    pub fn new(
        counters: impl IntoIterator<Item = (usize, CounterTarget)>,
        replay: CounterReplay,
        duration_ms: u32,
        steps: u32,
    ) -> Self {
        let slots = counters
            .into_iter()
            .map(|(slide, target)| CounterSlot {
                slide,
                text: target.render(0.0),
                animated: false,
                run: 0,
                animation: CounterAnimation::with_timing(target, duration_ms, steps),
            })
            .collect();
        Self { slots, replay }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn replay(&self) -> CounterReplay {
        self.replay
    }

    pub fn text(&self, counter: usize) -> Option<&str> {
        self.slots.get(counter).map(|s| s.text.as_str())
    }

    /// Text of the `nth` counter on `slide`, in page order.
    pub fn text_on(&self, slide: usize, nth: usize) -> Option<&str> {
        self.slots
            .iter()
            .filter(|s| s.slide == slide)
            .nth(nth)
            .map(|s| s.text.as_str())
    }

    pub fn is_animated(&self, counter: usize) -> bool {
        self.slots.get(counter).map_or(false, |s| s.animated)
    }

    /// Startup pass: every counter on the page starts counting.
    pub fn start_all(&mut self) -> Vec<(CounterTick, u32)> {
        (0..self.slots.len())
            .filter_map(|counter| self.begin(counter))
            .collect()
    }

    /// Counters to (re)start because `slide` became current.
    pub fn activate_slide(&mut self, slide: usize) -> Vec<(CounterTick, u32)> {
        let replay = self.replay;
        let due: Vec<usize> = self
            .slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.slide == slide)
            .filter(|(_, s)| replay == CounterReplay::EverySlideEntry || !s.animated)
            .map(|(i, _)| i)
            .collect();
        due.into_iter()
            .filter_map(|counter| self.begin(counter))
            .collect()
    }

    /// Starts a fresh run, superseding any run in flight. The first frame is
    /// applied right away; the returned tick is the next frame to schedule.
    fn begin(&mut self, counter: usize) -> Option<(CounterTick, u32)> {
        let slot = self.slots.get_mut(counter)?;
        slot.run += 1;
        slot.animated = true;
        slot.animation.restart();
        let run = slot.run;
        self.step(CounterTick { counter, run })
    }

    /// Applies the next frame of `tick`'s run. Ticks of a superseded run are
    /// dropped.
    pub fn step(&mut self, tick: CounterTick) -> Option<(CounterTick, u32)> {
        let slot = self.slots.get_mut(tick.counter)?;
        if slot.run != tick.run {
            return None;
        }
        let frame = slot.animation.next()?;
        slot.text = frame.text;
        slot.animation.next_delay_ms().map(|delay| (tick, delay))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(replay: CounterReplay) -> CounterBoard {
        CounterBoard::new(
            [
                (1, CounterTarget::new(42.0)),
                (1, CounterTarget::new(3.7)),
                (2, CounterTarget::new(150.0)),
            ],
            replay,
            2_000,
            60,
        )
    }

    fn finish(board: &mut CounterBoard, mut pending: Vec<(CounterTick, u32)>) {
        while let Some((tick, _)) = pending.pop() {
            if let Some(next) = board.step(tick) {
                pending.push(next);
            }
        }
    }

    #[test]
    fn stagger_delays_cascade_by_position() {
        let mut stagger = StaggerReveal::new([3, 0], 100);
        let activation = stagger.activate(0);
        assert_eq!(activation.delays, vec![(0, 0), (1, 100), (2, 200)]);
        assert!(stagger.activate(1).delays.is_empty());
        assert!(stagger.activate(9).delays.is_empty());
    }

    #[test]
    fn reactivation_hides_and_supersedes() {
        let mut stagger = StaggerReveal::new([2], 100);
        let first = stagger.activate(0);
        assert!(stagger.reveal(0, 0, first.epoch));
        assert!(stagger.is_revealed(0, 0));

        let second = stagger.activate(0);
        assert!(!stagger.is_revealed(0, 0));
        assert!(!stagger.reveal(0, 1, first.epoch));
        assert!(!stagger.is_revealed(0, 1));
        assert!(stagger.reveal(0, 1, second.epoch));
        assert!(!stagger.reveal(0, 1, second.epoch));
    }

    #[test]
    fn cancel_drops_the_pending_cascade() {
        let mut stagger = StaggerReveal::new([3], 100);
        let run = stagger.activate(0);
        assert!(stagger.reveal(0, 0, run.epoch));
        stagger.cancel();
        assert!(!stagger.reveal(0, 1, run.epoch));
        assert!(stagger.is_revealed(0, 0));
        assert!(!stagger.is_revealed(0, 1));
    }

    #[test]
    fn scroll_reveal_latches() {
        let mut reveal = ScrollReveal::new(["intro".to_string(), "quote".to_string()]);
        assert!(!reveal.is_revealed("intro"));
        assert!(reveal.cross("intro"));
        assert!(!reveal.cross("intro"));
        assert!(reveal.is_revealed("intro"));
        assert!(!reveal.cross("unknown"));
        assert!(!reveal.is_revealed("quote"));
    }

    #[test]
    fn counters_start_at_zero_text() {
        let board = board(CounterReplay::OncePerPage);
        assert_eq!(board.text(0), Some("0"));
        assert_eq!(board.text(1), Some("0.0"));
        assert_eq!(board.text_on(2, 0), Some("0"));
        assert_eq!(board.text_on(2, 1), None);
    }

    #[test]
    fn startup_pass_runs_every_counter_to_target() {
        let mut board = board(CounterReplay::OncePerPage);
        let pending = board.start_all();
        assert_eq!(pending.len(), 3);
        finish(&mut board, pending);
        assert_eq!(board.text(0), Some("42"));
        assert_eq!(board.text(1), Some("3.7"));
        assert_eq!(board.text(2), Some("150"));
    }

    #[test]
    fn once_per_page_skips_animated_counters() {
        let mut board = board(CounterReplay::OncePerPage);
        let pending = board.start_all();
        finish(&mut board, pending);
        assert!(board.activate_slide(1).is_empty());
        assert_eq!(board.text(0), Some("42"));
    }

    #[test]
    fn once_per_page_animates_counters_missed_at_startup() {
        let mut board = board(CounterReplay::OncePerPage);
        let pending = board.activate_slide(2);
        assert_eq!(pending.len(), 1);
        assert!(board.is_animated(2));
        assert!(!board.is_animated(0));
        finish(&mut board, pending);
        assert!(board.activate_slide(2).is_empty());
    }

    #[test]
    fn every_slide_entry_restarts_and_drops_the_old_run() {
        let mut board = board(CounterReplay::EverySlideEntry);
        let old = board.start_all();
        let restarted = board.activate_slide(1);
        assert_eq!(restarted.len(), 2);
        // first frame of 42 is 0.7
        assert_eq!(board.text(0), Some("0"));
        for (tick, _) in old.iter().filter(|(t, _)| t.counter < 2) {
            assert_eq!(board.step(*tick), None);
        }
        finish(&mut board, restarted);
        assert_eq!(board.text(0), Some("42"));
        assert_eq!(board.text(1), Some("3.7"));
    }
}
