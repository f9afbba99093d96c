//! The site engine.
//!
//! [`Site`] is the application context created once at startup. It owns the
//! carousel, the reveal and counter state, the swipe tracker and the
//! auto-advance timer. Input comes in through [`Site::handle`], timers come
//! back through [`Site::on_timer`]; both report whether the view changed.

use log::{debug, info};

use crate::carousel::{Carousel, Command};
use crate::config::SiteConfig;
use crate::counter::CounterTarget;
use crate::error::InitError;
use crate::input::{AutoAdvance, KeyAction, SwipeTracker};
use crate::reveal::{CounterBoard, CounterTick, ScrollReveal, StaggerReveal};
use crate::timing::{Debounce, DebounceTicket, Scheduler};

/// What the engine needs to know about one slide.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlideOutline {
    pub heading: Option<String>,
    /// Number of elements taking part in the reveal cascade.
    pub animated: usize,
    /// Raw `data-target` values of the slide's counters, in page order.
    pub counters: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Command(Command),
    Key(KeyAction),
    TouchStart(f64),
    TouchEnd(f64),
    /// A click, key press or touch anywhere on the page.
    Interaction,
    /// A scroll-reveal element crossed into the viewport.
    Intersected(String),
    PageVisible,
    Resized,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SiteEvent {
    RevealSlide { epoch: u64 },
    Settle { epoch: u64 },
    RevealElement { slide: usize, element: usize, epoch: u64 },
    CounterStep(CounterTick),
    AutoAdvance,
    ResizeSettled(DebounceTicket),
}

pub struct Site<S> {
    config: SiteConfig,
    carousel: Carousel,
    stagger: StaggerReveal,
    counters: CounterBoard,
    scroll_reveal: ScrollReveal,
    swipe: SwipeTracker,
    auto_advance: AutoAdvance,
    resize: Debounce,
    announcement: String,
    scheduler: S,
}

impl<S: Scheduler<SiteEvent>> Site<S> {
    pub fn new(
        slides: &[SlideOutline],
        reveal_keys: impl IntoIterator<Item = String>,
        config: SiteConfig,
        scheduler: S,
    ) -> Result<Self, InitError> {
        let carousel = Carousel::new(slides.iter().map(|s| s.heading.clone()).collect())?;
        let stagger = StaggerReveal::new(slides.iter().map(|s| s.animated), config.stagger_ms);

        let mut targets = Vec::new();
        for (slide, outline) in slides.iter().enumerate() {
            for raw in &outline.counters {
                let target = CounterTarget::parse(raw).ok_or_else(|| {
                    InitError::InvalidCounterTarget {
                        slide,
                        raw: raw.clone(),
                    }
                })?;
                targets.push((slide, target));
            }
        }
        let counters = CounterBoard::new(
            targets,
            config.counter_replay,
            config.counter_duration_ms,
            config.counter_steps,
        );

        Ok(Self {
            carousel,
            stagger,
            counters,
            scroll_reveal: ScrollReveal::new(reveal_keys),
            swipe: SwipeTracker::new(config.swipe_threshold),
            auto_advance: AutoAdvance::default(),
            resize: Debounce::new(config.resize_debounce_ms),
            announcement: String::new(),
            scheduler,
            config,
        })
    }

    /// Runs the page-load pass: all counters, the first slide's cascade and
    /// the auto-advance timer.
    pub fn start(&mut self) {
        let ticks = self.counters.start_all();
        self.schedule_counters(ticks);
        self.activate_current();
        if self.auto_advance.arm(self.carousel.current()) {
            self.scheduler
                .schedule(self.config.auto_advance_ms, SiteEvent::AutoAdvance);
        }
        info!(
            "Site started with {} slides and {} counters",
            self.carousel.len(),
            self.counters.len()
        );
    }

    pub fn handle(&mut self, input: Input) -> bool {
        match input {
            Input::Command(command) | Input::Key(KeyAction::Navigate(command)) => {
                self.dispatch(command)
            }
            Input::Key(KeyAction::Blur) => false,
            Input::TouchStart(x) => {
                self.swipe.begin(x);
                false
            }
            Input::TouchEnd(x) => match self.swipe.end(x) {
                Some(command) => self.dispatch(command),
                None => false,
            },
            Input::Interaction => {
                if self.auto_advance.interrupt() {
                    debug!("Auto-advance cancelled by user interaction");
                }
                false
            }
            Input::Intersected(key) => self.scroll_reveal.cross(&key),
            Input::PageVisible => {
                self.retrigger();
                true
            }
            Input::Resized => {
                let ticket = self.resize.trigger();
                self.scheduler
                    .schedule(self.resize.wait_ms(), SiteEvent::ResizeSettled(ticket));
                false
            }
        }
    }

    /// Single entry point for every carousel move.
    pub fn dispatch(&mut self, command: Command) -> bool {
        match self.carousel.dispatch(command) {
            Ok(transition) => {
                debug!(
                    "Slide {} -> {} (epoch {})",
                    transition.from, transition.to, transition.epoch
                );
                self.stagger.cancel();
                let epoch = transition.epoch;
                self.scheduler
                    .schedule(self.config.reveal_delay_ms, SiteEvent::RevealSlide { epoch });
                self.scheduler
                    .schedule(self.config.settle_delay_ms, SiteEvent::Settle { epoch });
                self.announcement = transition.announcement;
                true
            }
            Err(rejection) => {
                debug!("Ignored {:?}: {:?}", command, rejection);
                false
            }
        }
    }

    pub fn on_timer(&mut self, event: SiteEvent) -> bool {
        match event {
            SiteEvent::RevealSlide { epoch } => {
                if epoch != self.carousel.epoch() {
                    return false;
                }
                self.activate_current();
                true
            }
            SiteEvent::Settle { epoch } => self.carousel.settle(epoch),
            SiteEvent::RevealElement {
                slide,
                element,
                epoch,
            } => self.stagger.reveal(slide, element, epoch),
            SiteEvent::CounterStep(tick) => {
                let before = self.counters.text(tick.counter).map(str::to_owned);
                let next = self.counters.step(tick);
                let changed = self.counters.text(tick.counter) != before.as_deref();
                if let Some(next) = next {
                    self.schedule_counters(vec![next]);
                }
                changed
            }
            SiteEvent::AutoAdvance => match self.auto_advance.fire(self.carousel.current()) {
                Some(command) => {
                    info!("Auto-advancing past the hero slide");
                    self.dispatch(command)
                }
                None => false,
            },
            SiteEvent::ResizeSettled(ticket) => {
                if !self.resize.settle(ticket) {
                    return false;
                }
                self.retrigger();
                true
            }
        }
    }

    /// Replays the current slide's reveal cascade and counters right away.
    pub fn retrigger(&mut self) {
        self.activate_current();
    }

    fn activate_current(&mut self) {
        let slide = self.carousel.current();
        let activation = self.stagger.activate(slide);
        for (element, delay) in activation.delays {
            self.scheduler.schedule(
                delay,
                SiteEvent::RevealElement {
                    slide,
                    element,
                    epoch: activation.epoch,
                },
            );
        }
        let ticks = self.counters.activate_slide(slide);
        self.schedule_counters(ticks);
    }

    fn schedule_counters(&mut self, ticks: Vec<(CounterTick, u32)>) {
        for (tick, delay) in ticks {
            self.scheduler.schedule(delay, SiteEvent::CounterStep(tick));
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn current_slide(&self) -> usize {
        self.carousel.current()
    }

    pub fn total_slides(&self) -> usize {
        self.carousel.len()
    }

    pub fn is_element_revealed(&self, slide: usize, element: usize) -> bool {
        self.stagger.is_revealed(slide, element)
    }

    pub fn counter_text(&self, slide: usize, nth: usize) -> &str {
        self.counters.text_on(slide, nth).unwrap_or_default()
    }

    pub fn is_scroll_revealed(&self, key: &str) -> bool {
        self.scroll_reveal.is_revealed(key)
    }

    /// Text of the polite live region.
    pub fn announcement(&self) -> &str {
        &self.announcement
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reveal::CounterReplay;
    use crate::timing::manual::ManualScheduler;

    type TestSite = Site<ManualScheduler<SiteEvent>>;

    fn outline() -> Vec<SlideOutline> {
        vec![
            SlideOutline {
                heading: Some("Hero".into()),
                animated: 3,
                counters: vec![],
            },
            SlideOutline {
                heading: Some("Numbers".into()),
                animated: 5,
                counters: vec!["42".into(), "3.7".into()],
            },
            SlideOutline {
                heading: None,
                animated: 2,
                counters: vec!["150".into()],
            },
        ]
    }

    fn site_with(config: SiteConfig) -> TestSite {
        let mut site = Site::new(
            &outline(),
            ["quote".to_string()],
            config,
            ManualScheduler::default(),
        )
        .unwrap();
        site.start();
        site
    }

    fn site() -> TestSite {
        site_with(SiteConfig::default())
    }

    /// Delivers every timer due up to `ms` from now.
    fn advance(site: &mut TestSite, ms: u64) {
        let until = site.scheduler.now() + ms;
        while let Some(event) = site.scheduler.pop_due(until) {
            site.on_timer(event);
        }
        site.scheduler.set_now(until);
    }

    fn go(site: &mut TestSite, command: Command) -> bool {
        let moved = site.handle(Input::Command(command));
        advance(site, 600);
        moved
    }

    #[test]
    fn invalid_counter_target_fails_init() {
        let mut slides = outline();
        slides[2].counters.push("lots".into());
        let err = Site::new(&slides, Vec::<String>::new(), SiteConfig::default(), ManualScheduler::default())
            .err()
            .unwrap();
        assert_eq!(
            err,
            InitError::InvalidCounterTarget {
                slide: 2,
                raw: "lots".into()
            }
        );
    }

    #[test]
    fn startup_reveals_first_slide_and_runs_counters() {
        let mut site = site();
        assert!(!site.is_element_revealed(0, 2));
        advance(&mut site, 200);
        assert!((0..3).all(|i| site.is_element_revealed(0, i)));
        assert_ne!(site.counter_text(1, 0), "42");
        advance(&mut site, 2_000);
        assert_eq!(site.counter_text(1, 0), "42");
        assert_eq!(site.counter_text(1, 1), "3.7");
        assert_eq!(site.counter_text(2, 0), "150");
    }

    #[test]
    fn navigation_reveals_after_delay_and_releases_lock() {
        let mut site = site();
        advance(&mut site, 3_000);
        site.handle(Input::Interaction);

        assert!(site.handle(Input::Command(Command::Next)));
        assert_eq!(site.current_slide(), 1);
        assert_eq!(site.announcement(), "Now viewing: Numbers");
        assert!(!site.handle(Input::Command(Command::Next)));

        advance(&mut site, 99);
        assert!(!site.is_element_revealed(1, 0));
        advance(&mut site, 1);
        assert!(site.is_element_revealed(1, 0));
        assert!(!site.is_element_revealed(1, 1));
        advance(&mut site, 400);
        assert!((0..5).all(|i| site.is_element_revealed(1, i)));
        assert!(site.carousel().is_transitioning());
        advance(&mut site, 100);
        assert!(!site.carousel().is_transitioning());

        assert!(site.handle(Input::Command(Command::Next)));
        assert_eq!(site.announcement(), "Now viewing: Slide 3");
    }

    #[test]
    fn commands_during_transition_are_dropped_not_queued() {
        let mut site = site();
        site.handle(Input::Interaction);
        site.handle(Input::Command(Command::GoTo(2)));
        site.handle(Input::Command(Command::GoTo(1)));
        advance(&mut site, 1_000);
        assert_eq!(site.current_slide(), 2);
    }

    #[test]
    fn rapid_moves_never_reveal_a_stale_slide() {
        let mut site = site_with(SiteConfig {
            settle_delay_ms: 150,
            ..SiteConfig::default()
        });
        site.handle(Input::Interaction);
        advance(&mut site, 3_000);

        site.handle(Input::Command(Command::GoTo(1)));
        advance(&mut site, 200);
        // slide 1 cascade is running: elements 0 and 1 are out
        assert!(site.is_element_revealed(1, 1));
        let slide1 = |site: &TestSite| (0..5).map(|i| site.is_element_revealed(1, i)).collect::<Vec<_>>();
        let left_behind = slide1(&site);
        assert_eq!(left_behind, vec![true, true, false, false, false]);

        assert!(site.handle(Input::Command(Command::GoTo(2))));
        advance(&mut site, 100);
        assert_eq!(slide1(&site), left_behind);
        advance(&mut site, 1_000);
        assert_eq!(slide1(&site), left_behind);
        assert!(site.is_element_revealed(2, 1));
    }

    #[test]
    fn leaving_before_reveal_skips_the_old_slide() {
        let mut site = site_with(SiteConfig {
            settle_delay_ms: 50,
            ..SiteConfig::default()
        });
        site.handle(Input::Interaction);
        advance(&mut site, 3_000);
        site.handle(Input::Command(Command::GoTo(1)));
        advance(&mut site, 60);
        site.handle(Input::Command(Command::GoTo(2)));
        advance(&mut site, 1_000);
        assert!((0..5).all(|i| !site.is_element_revealed(1, i)));
        assert!(site.is_element_revealed(2, 0));
    }

    #[test]
    fn swipe_distance_decides_navigation() {
        let mut site = site();
        site.handle(Input::TouchStart(300.0));
        assert!(!site.handle(Input::TouchEnd(260.0)));
        assert_eq!(site.current_slide(), 0);

        site.handle(Input::TouchStart(300.0));
        assert!(site.handle(Input::TouchEnd(240.0)));
        assert_eq!(site.current_slide(), 1);
        advance(&mut site, 600);

        site.handle(Input::TouchStart(100.0));
        assert!(site.handle(Input::TouchEnd(170.0)));
        assert_eq!(site.current_slide(), 0);
    }

    #[test]
    fn keys_drive_the_carousel() {
        let mut site = site();
        assert!(site.handle(Input::Key(KeyAction::Navigate(Command::Last))));
        advance(&mut site, 600);
        assert_eq!(site.current_slide(), 2);
        assert!(site.handle(Input::Key(KeyAction::Navigate(Command::First))));
        advance(&mut site, 600);
        assert_eq!(site.current_slide(), 0);
        assert!(!site.handle(Input::Key(KeyAction::Blur)));
        assert!(site.handle(Input::Key(KeyAction::Navigate(Command::Previous))));
        assert_eq!(site.current_slide(), 2);
    }

    #[test]
    fn auto_advance_moves_to_second_slide_once() {
        let mut site = site();
        advance(&mut site, 9_999);
        assert_eq!(site.current_slide(), 0);
        advance(&mut site, 1);
        assert_eq!(site.current_slide(), 1);
        advance(&mut site, 60_000);
        assert_eq!(site.current_slide(), 1);
    }

    #[test]
    fn any_interaction_before_timeout_suppresses_auto_advance() {
        let mut site = site();
        advance(&mut site, 9_000);
        site.handle(Input::Interaction);
        advance(&mut site, 60_000);
        assert_eq!(site.current_slide(), 0);
    }

    #[test]
    fn auto_advance_does_nothing_on_single_slide_sites() {
        let mut site = Site::new(
            &outline()[..1],
            Vec::<String>::new(),
            SiteConfig::default(),
            ManualScheduler::default(),
        )
        .unwrap();
        site.start();
        advance(&mut site, 20_000);
        assert_eq!(site.current_slide(), 0);
        assert!(!site.carousel().is_transitioning());
    }

    #[test]
    fn scroll_reveal_latches_watched_keys() {
        let mut site = site();
        assert!(site.handle(Input::Intersected("quote".into())));
        assert!(!site.handle(Input::Intersected("quote".into())));
        assert!(site.is_scroll_revealed("quote"));
        assert!(!site.handle(Input::Intersected("other".into())));
        go(&mut site, Command::Next);
        assert!(site.is_scroll_revealed("quote"));
    }

    #[test]
    fn page_visible_replays_current_cascade() {
        let mut site = site();
        advance(&mut site, 500);
        assert!(site.is_element_revealed(0, 2));
        assert!(site.handle(Input::PageVisible));
        assert!(!site.is_element_revealed(0, 2));
        advance(&mut site, 200);
        assert!(site.is_element_revealed(0, 2));
    }

    #[test]
    fn resize_bursts_replay_once() {
        let mut site = site();
        advance(&mut site, 500);
        let before = site.stagger.epoch();
        for _ in 0..3 {
            site.handle(Input::Resized);
            advance(&mut site, 100);
        }
        assert_eq!(site.stagger.epoch(), before);
        advance(&mut site, 150);
        assert_eq!(site.stagger.epoch(), before + 1);
        advance(&mut site, 1_000);
        assert_eq!(site.stagger.epoch(), before + 1);
    }

    #[test]
    fn once_per_page_counters_keep_their_value_on_return() {
        let mut site = site();
        site.handle(Input::Interaction);
        advance(&mut site, 3_000);
        go(&mut site, Command::GoTo(1));
        assert_eq!(site.counter_text(1, 0), "42");
        go(&mut site, Command::First);
        go(&mut site, Command::GoTo(1));
        assert_eq!(site.counter_text(1, 0), "42");
    }

    #[test]
    fn every_entry_counters_count_up_again() {
        let mut site = site_with(SiteConfig {
            counter_replay: CounterReplay::EverySlideEntry,
            ..SiteConfig::default()
        });
        site.handle(Input::Interaction);
        advance(&mut site, 3_000);
        site.handle(Input::Command(Command::GoTo(1)));
        advance(&mut site, 100);
        assert_eq!(site.counter_text(1, 0), "0");
        advance(&mut site, 1_000);
        let midway: f64 = site.counter_text(1, 0).parse().unwrap();
        assert!(midway > 0.0 && midway < 42.0);
        advance(&mut site, 1_000);
        assert_eq!(site.counter_text(1, 0), "42");
    }
}
