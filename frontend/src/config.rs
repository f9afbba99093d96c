use log::Level;
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

use crate::error::InitError;
use crate::reveal::CounterReplay;

/// Id of the optional `<script type="application/json">` block carrying
/// page-level overrides.
pub const CONFIG_SCRIPT_ID: &str = "site-config";

/// Timings, thresholds and toggles for the whole site.
///
/// Every field has a default so hosts only need to pass the values they
/// want to change, either as an options object to `boot()` or as JSON in
/// the [`CONFIG_SCRIPT_ID`] script block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    /// Delay between a slide change and the start of its reveal cascade.
    pub reveal_delay_ms: u32,
    /// How long the transition lock is held after a slide change.
    pub settle_delay_ms: u32,
    /// Per-element delay inside a reveal cascade.
    pub stagger_ms: u32,
    pub counter_duration_ms: u32,
    pub counter_steps: u32,
    pub counter_replay: CounterReplay,
    /// Minimum horizontal travel for a touch gesture to count as a swipe.
    pub swipe_threshold: f64,
    pub auto_advance_ms: u32,
    pub banner_lifetime_ms: u32,
    /// Latency of the simulated contact form submission.
    pub submit_delay_ms: u32,
    pub scroll_throttle_ms: u32,
    pub resize_debounce_ms: u32,
    /// Fraction of an element that must be visible before it is revealed.
    pub reveal_threshold: f64,
    pub reveal_root_margin: String,
    /// Link used by the scheduling fallback when the widget script is absent.
    pub booking_url: String,
    pub log_level: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            reveal_delay_ms: 100,
            settle_delay_ms: 600,
            stagger_ms: 100,
            counter_duration_ms: 2_000,
            counter_steps: 60,
            counter_replay: CounterReplay::OncePerPage,
            swipe_threshold: 50.0,
            auto_advance_ms: 10_000,
            banner_lifetime_ms: 5_000,
            submit_delay_ms: 1_000,
            scroll_throttle_ms: 16,
            resize_debounce_ms: 250,
            reveal_threshold: 0.1,
            reveal_root_margin: "0px 0px -50px 0px".to_string(),
            booking_url: "https://calendly.com/sage-consulting/strategy-session".to_string(),
            log_level: None,
        }
    }
}

impl SiteConfig {
    /// Decodes the options object handed to `boot()`. `undefined` and `null`
    /// yield the defaults.
    pub fn from_js(value: JsValue) -> Result<Self, InitError> {
        if value.is_undefined() || value.is_null() {
            return Ok(Self::default());
        }
        let config: Self = serde_wasm_bindgen::from_value(value)
            .map_err(|e| InitError::Config(e.to_string()))?;
        config.validated()
    }

    pub fn from_json(raw: &str) -> Result<Self, InitError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|e| InitError::Config(e.to_string()))?;
        config.validated()
    }

    fn validated(self) -> Result<Self, InitError> {
        if self.counter_steps == 0 {
            return Err(InitError::Config("counterSteps must be at least 1".into()));
        }
        if !(0.0..=1.0).contains(&self.reveal_threshold) {
            return Err(InitError::Config(format!(
                "revealThreshold {} is outside 0..=1",
                self.reveal_threshold
            )));
        }
        if !self.swipe_threshold.is_finite() || self.swipe_threshold < 0.0 {
            return Err(InitError::Config("swipeThreshold must be a positive number".into()));
        }
        Ok(self)
    }

    /// Configured log level, falling back to `Debug` for debug builds and
    /// `Info` for release builds.
    pub fn log_level(&self) -> Level {
        self.log_level
            .as_deref()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_else(default_log_level)
    }
}

#[cfg(debug_assertions)]
fn default_log_level() -> Level {
    Level::Debug
}

#[cfg(not(debug_assertions))]
fn default_log_level() -> Level {
    Level::Info
}
