//! Count-up animation for the stat figures.
//!
//! [`CounterAnimation`] is a finite iterator of frames. The driver applies a
//! frame, asks [`CounterAnimation::next_delay_ms`] how long to wait, and
//! pulls the next one when the timer fires.

pub const COUNTER_DURATION_MS: u32 = 2_000;
pub const COUNTER_STEPS: u32 = 60;

/// The value a counter counts up to. Targets with a fractional part render
/// with one decimal, the rest render as whole numbers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CounterTarget {
    value: f64,
    is_float: bool,
}

impl CounterTarget {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            is_float: value % 1.0 != 0.0,
        }
    }

    /// Parses a `data-target` value. Non-numeric and non-finite input is
    /// rejected.
    pub fn parse(raw: &str) -> Option<Self> {
        raw.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(Self::new)
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn is_float(&self) -> bool {
        self.is_float
    }

    pub fn render(&self, value: f64) -> String {
        if self.is_float {
            format!("{:.1}", value)
        } else {
            format!("{}", value.floor() as i64)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CounterFrame {
    /// 1-based step number.
    pub step: u32,
    pub value: f64,
    pub text: String,
    pub is_final: bool,
}

#[derive(Debug, Clone)]
pub struct CounterAnimation {
    target: CounterTarget,
    duration_ms: u32,
    steps: u32,
    next_step: u32,
    done: bool,
}

impl CounterAnimation {
    pub fn new(target: CounterTarget) -> Self {
        Self::with_timing(target, COUNTER_DURATION_MS, COUNTER_STEPS)
    }

    pub fn with_timing(target: CounterTarget, duration_ms: u32, steps: u32) -> Self {
        Self {
            target,
            duration_ms,
            steps: steps.max(1),
            next_step: 1,
            done: false,
        }
    }

    pub fn target(&self) -> CounterTarget {
        self.target
    }

    pub fn restart(&mut self) {
        self.next_step = 1;
        self.done = false;
    }

    /// Collapses to one frame when there is nothing to count up to.
    fn is_instant(&self) -> bool {
        self.target.value <= 0.0
    }

    /// Offset of step `k` from the first frame, spreading the rounding so
    /// the steps add up to the full duration.
    fn offset_ms(&self, step: u32) -> u32 {
        let elapsed = u64::from(step - 1) * u64::from(self.duration_ms);
        ((elapsed + u64::from(self.steps) / 2) / u64::from(self.steps)) as u32
    }

    /// Wait before the next frame, `None` once the animation is finished.
    /// The first frame is due immediately.
    pub fn next_delay_ms(&self) -> Option<u32> {
        if self.done {
            return None;
        }
        if self.next_step == 1 {
            return Some(0);
        }
        Some(self.offset_ms(self.next_step) - self.offset_ms(self.next_step - 1))
    }
}

impl Iterator for CounterAnimation {
    type Item = CounterFrame;

    fn next(&mut self) -> Option<CounterFrame> {
        if self.done {
            return None;
        }
        let step = self.next_step;
        let is_final = self.is_instant() || step >= self.steps;
        let value = if is_final {
            self.target.value
        } else {
            (self.target.value * f64::from(step) / f64::from(self.steps)).min(self.target.value)
        };
        self.next_step += 1;
        self.done = is_final;
        Some(CounterFrame {
            step,
            value,
            text: self.target.render(value),
            is_final,
        })
    }
}
