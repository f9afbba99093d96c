//! Delayed delivery and rate limiting.
//!
//! Nothing in here touches a real clock directly: the engine hands events to
//! a [`Scheduler`], and debounce/throttle are plain state machines fed with
//! tickets or timestamps. The browser scheduler spawns a `TimeoutFuture` per
//! event; tests use the virtual-time scheduler in [`manual`].

use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use yew::Callback;

/// Delivers an event back to its owner after a delay.
///
/// There is no cancel: owners tag events with an epoch and ignore the ones
/// that arrive for a superseded epoch.
pub trait Scheduler<E> {
    fn schedule(&mut self, delay_ms: u32, event: E);
}

/// Browser scheduler emitting into a Yew callback.
pub struct TimeoutScheduler<E: 'static> {
    deliver: Callback<E>,
}

impl<E: 'static> TimeoutScheduler<E> {
    pub fn new(deliver: Callback<E>) -> Self {
        Self { deliver }
    }
}

impl<E: 'static> Scheduler<E> for TimeoutScheduler<E> {
    fn schedule(&mut self, delay_ms: u32, event: E) {
        let deliver = self.deliver.clone();
        spawn_local(async move {
            TimeoutFuture::new(delay_ms).await;
            deliver.emit(event);
        });
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceTicket(u64);

/// Trailing-edge debounce: only the ticket from the latest trigger settles.
#[derive(Debug, Clone)]
pub struct Debounce {
    wait_ms: u32,
    generation: u64,
}

impl Debounce {
    pub fn new(wait_ms: u32) -> Self {
        Self {
            wait_ms,
            generation: 0,
        }
    }

    pub fn wait_ms(&self) -> u32 {
        self.wait_ms
    }

    /// Records a trigger. The returned ticket should come back after
    /// [`wait_ms`](Self::wait_ms).
    pub fn trigger(&mut self) -> DebounceTicket {
        self.generation += 1;
        DebounceTicket(self.generation)
    }

    /// True if no newer trigger happened since `ticket` was issued.
    pub fn settle(&self, ticket: DebounceTicket) -> bool {
        ticket.0 == self.generation
    }
}

/// Leading-edge throttle: admits an event, then drops everything until
/// `limit_ms` has passed.
#[derive(Debug, Clone)]
pub struct Throttle {
    limit_ms: f64,
    last_admitted: Option<f64>,
}

impl Throttle {
    pub fn new(limit_ms: u32) -> Self {
        Self {
            limit_ms: f64::from(limit_ms),
            last_admitted: None,
        }
    }

    pub fn admit(&mut self, now_ms: f64) -> bool {
        match self.last_admitted {
            Some(last) if now_ms - last < self.limit_ms => false,
            _ => {
                self.last_admitted = Some(now_ms);
                true
            }
        }
    }
}

#[cfg(test)]
pub mod manual {
    use super::Scheduler;

    /// Virtual-time scheduler. Events come out in due order, ties in the
    /// order they were scheduled.
    #[derive(Debug)]
    pub struct ManualScheduler<E> {
        now: u64,
        seq: u64,
        queue: Vec<(u64, u64, E)>,
    }

    impl<E> Default for ManualScheduler<E> {
        fn default() -> Self {
            Self {
                now: 0,
                seq: 0,
                queue: Vec::new(),
            }
        }
    }

    impl<E> ManualScheduler<E> {
        pub fn now(&self) -> u64 {
            self.now
        }

        pub fn pending(&self) -> usize {
            self.queue.len()
        }

        /// Pops the earliest event due at or before `until`, moving the clock
        /// to its due time.
        pub fn pop_due(&mut self, until: u64) -> Option<E> {
            let (pos, _) = self
                .queue
                .iter()
                .enumerate()
                .filter(|(_, (due, _, _))| *due <= until)
                .min_by_key(|(_, (due, seq, _))| (*due, *seq))?;
            let (due, _, event) = self.queue.remove(pos);
            self.now = due;
            Some(event)
        }

        pub fn set_now(&mut self, now: u64) {
            self.now = self.now.max(now);
        }
    }

    impl<E> Scheduler<E> for ManualScheduler<E> {
        fn schedule(&mut self, delay_ms: u32, event: E) {
            self.seq += 1;
            self.queue
                .push((self.now + u64::from(delay_ms), self.seq, event));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::manual::ManualScheduler;
    use super::*;

    #[test]
    fn debounce_settles_only_latest_trigger() {
        let mut debounce = Debounce::new(250);
        let first = debounce.trigger();
        let second = debounce.trigger();
        assert!(!debounce.settle(first));
        assert!(debounce.settle(second));
    }

    #[test]
    fn debounce_fires_once_per_burst() {
        let mut debounce = Debounce::new(250);
        let mut timers = ManualScheduler::default();
        for at in [0u64, 100, 200] {
            timers.set_now(at);
            let ticket = debounce.trigger();
            timers.schedule(debounce.wait_ms(), ticket);
        }
        let mut fired = 0;
        while let Some(ticket) = timers.pop_due(1_000) {
            if debounce.settle(ticket) {
                fired += 1;
                assert_eq!(timers.now(), 450);
            }
        }
        assert_eq!(fired, 1);
    }

    #[test]
    fn throttle_admits_one_event_per_window() {
        let mut throttle = Throttle::new(16);
        assert!(throttle.admit(0.0));
        assert!(!throttle.admit(5.0));
        assert!(!throttle.admit(15.9));
        assert!(throttle.admit(16.0));
        assert!(!throttle.admit(20.0));
        assert!(throttle.admit(40.0));
    }

    #[test]
    fn manual_scheduler_orders_by_due_then_insertion() {
        let mut timers = ManualScheduler::default();
        timers.schedule(100, "b");
        timers.schedule(50, "a");
        timers.schedule(100, "c");
        assert_eq!(timers.pop_due(49), None);
        assert_eq!(timers.pop_due(1_000), Some("a"));
        assert_eq!(timers.now(), 50);
        assert_eq!(timers.pop_due(1_000), Some("b"));
        assert_eq!(timers.pop_due(1_000), Some("c"));
        assert_eq!(timers.pending(), 0);
    }
}
