//! Scroll-position effects: parallax offsets and the reading progress bar.

pub const DEFAULT_PARALLAX_RATE: f64 = 0.5;

/// Rate from a `data-parallax` attribute. Missing, unparsable and zero
/// rates all fall back to the default.
pub fn parallax_rate(raw: Option<&str>) -> f64 {
    raw.and_then(|r| r.trim().parse::<f64>().ok())
        .filter(|rate| rate.is_finite() && *rate != 0.0)
        .unwrap_or(DEFAULT_PARALLAX_RATE)
}

/// Vertical translation in pixels for an element moving at `rate`.
pub fn parallax_offset(scroll_y: f64, rate: f64) -> f64 {
    -(scroll_y * rate)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollSample {
    pub scroll_y: f64,
    pub document_height: f64,
    pub viewport_height: f64,
}

impl ScrollSample {
    /// How far down the page the reader is, in `0..=100`. A page that does
    /// not scroll reports 0.
    pub fn progress_percent(&self) -> f64 {
        let scrollable = self.document_height - self.viewport_height;
        if scrollable <= 0.0 {
            return 0.0;
        }
        (self.scroll_y / scrollable * 100.0).clamp(0.0, 100.0)
    }
}

/// Which scroll effects get a listener.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollWiring {
    pub parallax: bool,
    pub progress: bool,
}

impl ScrollWiring {
    /// Reduced motion turns everything off. Otherwise the progress bar is
    /// always on and parallax needs at least one tagged element.
    pub fn for_page(reduced_motion: bool, parallax_elements: usize) -> Self {
        if reduced_motion {
            return Self::default();
        }
        Self {
            parallax: parallax_elements > 0,
            progress: true,
        }
    }

    pub fn needs_listener(&self) -> bool {
        self.parallax || self.progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_defaults() {
        assert_eq!(parallax_rate(None), 0.5);
        assert_eq!(parallax_rate(Some("")), 0.5);
        assert_eq!(parallax_rate(Some("fast")), 0.5);
        assert_eq!(parallax_rate(Some("0")), 0.5);
        assert_eq!(parallax_rate(Some("0.3")), 0.3);
        assert_eq!(parallax_rate(Some("-0.2")), -0.2);
    }

    #[test]
    fn offset_moves_against_scroll() {
        assert_eq!(parallax_offset(200.0, 0.5), -100.0);
        assert_eq!(parallax_offset(0.0, 0.3), 0.0);
    }

    #[test]
    fn progress_is_clamped() {
        let sample = |scroll_y| ScrollSample {
            scroll_y,
            document_height: 3_000.0,
            viewport_height: 1_000.0,
        };
        assert_eq!(sample(0.0).progress_percent(), 0.0);
        assert_eq!(sample(1_000.0).progress_percent(), 50.0);
        assert_eq!(sample(2_000.0).progress_percent(), 100.0);
        // overscroll on touch devices
        assert_eq!(sample(2_400.0).progress_percent(), 100.0);
        assert_eq!(sample(-40.0).progress_percent(), 0.0);
    }

    #[test]
    fn short_page_reports_zero() {
        let sample = ScrollSample {
            scroll_y: 0.0,
            document_height: 800.0,
            viewport_height: 900.0,
        };
        assert_eq!(sample.progress_percent(), 0.0);
    }

    #[test]
    fn reduced_motion_wires_nothing() {
        let wiring = ScrollWiring::for_page(true, 4);
        assert!(!wiring.needs_listener());
        assert_eq!(wiring, ScrollWiring::default());
    }

    #[test]
    fn progress_without_parallax_elements() {
        let wiring = ScrollWiring::for_page(false, 0);
        assert!(wiring.progress);
        assert!(!wiring.parallax);
        assert!(wiring.needs_listener());
        assert!(ScrollWiring::for_page(false, 2).parallax);
    }
}
