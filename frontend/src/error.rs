use std::fmt;

use log::error;
use thiserror::Error;

/// Failures while setting up the site. Any of these puts the carousel into
/// its static fallback.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InitError {
    #[error("there are no slides to display")]
    NoSlides,
    #[error("slide {slide} has an invalid counter target {raw:?}")]
    InvalidCounterTarget { slide: usize, raw: String },
    #[error("the browser document is unavailable")]
    MissingDocument,
    #[error("invalid configuration: {0}")]
    Config(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    #[error("{0}")]
    Rejected(String),
    #[error("the request timed out")]
    Timeout,
}

/// Where an error surfaced. Slider errors degrade the carousel, everything
/// else is only logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorContext {
    Slider,
    General,
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorContext::Slider => f.write_str("slider"),
            ErrorContext::General => f.write_str("general"),
        }
    }
}

pub fn report(context: ErrorContext, err: &dyn fmt::Display) {
    error!("Sage site error [{}]: {}", context, err);
}
