use web_sys::{
    Document, Element, HtmlElement, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
    Window,
};

use crate::scroll::ScrollSample;

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

pub fn prefers_reduced_motion(window: &Window) -> bool {
    window
        .match_media(REDUCED_MOTION_QUERY)
        .ok()
        .flatten()
        .map_or(false, |query| query.matches())
}

/// High resolution timestamp in milliseconds, falling back to the wall clock.
pub fn now_ms(window: &Window) -> f64 {
    window
        .performance()
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

pub fn scroll_sample(window: &Window, document: &Document) -> ScrollSample {
    let viewport_height = window
        .inner_height()
        .ok()
        .and_then(|h| h.as_f64())
        .unwrap_or(0.0);
    let document_height = document
        .document_element()
        .map_or(0.0, |root| f64::from(root.scroll_height()));
    ScrollSample {
        scroll_y: window.scroll_y().unwrap_or(0.0),
        document_height,
        viewport_height,
    }
}

pub fn translate_y(element: &HtmlElement, offset_px: f64) {
    let _ = element
        .style()
        .set_property("transform", &format!("translateY({}px)", offset_px));
}

pub fn set_width_percent(element: &HtmlElement, percent: f64) {
    let _ = element
        .style()
        .set_property("width", &format!("{}%", percent));
}

pub fn scroll_into_view(element: &Element) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Start);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}
