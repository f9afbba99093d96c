use js_sys::Array;
use log::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
};
use yew::Callback;

use crate::config::SiteConfig;
use crate::dom::nodes::{describe, query_all};
use crate::site::Input;

pub const REVEAL_ATTR: &str = "data-reveal";
pub const LAZY_SRC_ATTR: &str = "data-src";

type EntryHandler = dyn FnMut(Array, IntersectionObserver);

/// An `IntersectionObserver` that calls back once per element entering the
/// viewport. Disconnects on drop.
pub struct ViewportWatch {
    observer: IntersectionObserver,
    _callback: Closure<EntryHandler>,
}

impl ViewportWatch {
    pub fn new<F>(threshold: f64, root_margin: &str, mut on_visible: F) -> Result<Self, JsValue>
    where
        F: FnMut(&Element, &IntersectionObserver) + 'static,
    {
        let callback = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if entry.is_intersecting() {
                    on_visible(&entry.target(), &observer);
                }
            }
        }) as Box<EntryHandler>);

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(threshold));
        options.set_root_margin(root_margin);
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
        Ok(Self {
            observer,
            _callback: callback,
        })
    }

    pub fn observe_all(&self, elements: &[Element]) {
        for element in elements {
            self.observer.observe(element);
        }
    }
}

impl Drop for ViewportWatch {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Watches every `[data-reveal]` element and reports each one once.
pub fn reveal_watch(
    document: &Document,
    config: &SiteConfig,
    input: Callback<Input>,
) -> Result<ViewportWatch, JsValue> {
    let watch = ViewportWatch::new(
        config.reveal_threshold,
        &config.reveal_root_margin,
        move |element, observer| {
            if let Some(key) = element.get_attribute(REVEAL_ATTR) {
                input.emit(Input::Intersected(key));
            }
            observer.unobserve(element);
        },
    )?;
    let targets = query_all(document, &format!("[{}]", REVEAL_ATTR));
    debug!("Watching {} scroll-reveal elements", targets.len());
    watch.observe_all(&targets);
    Ok(watch)
}

fn load_image(element: &Element) {
    if let Some(src) = element.get_attribute(LAZY_SRC_ATTR) {
        let _ = element.set_attribute("src", &src);
        let _ = element.remove_attribute(LAZY_SRC_ATTR);
    }
}

/// Images carrying `data-src` get their real source once they come near the
/// viewport.
pub struct LazyImages {
    _watch: Option<ViewportWatch>,
}

impl LazyImages {
    /// Picks up every `img[data-src]` currently in the document. Without
    /// `IntersectionObserver` support the images load right away.
    pub fn attach(document: &Document) -> Self {
        let images = query_all(document, &format!("img[{}]", LAZY_SRC_ATTR));
        if images.is_empty() {
            return Self { _watch: None };
        }
        let watch = ViewportWatch::new(0.0, "0px", |element, observer| {
            load_image(element);
            observer.unobserve(element);
        });
        match watch {
            Ok(watch) => {
                debug!("Lazy loading {} images", images.len());
                watch.observe_all(&images);
                Self {
                    _watch: Some(watch),
                }
            }
            Err(err) => {
                warn!("Loading images eagerly: {}", describe(&err));
                images.iter().for_each(load_image);
                Self { _watch: None }
            }
        }
    }
}
