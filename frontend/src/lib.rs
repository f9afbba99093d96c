//! Sage Consulting site frontend.
//!
//! The page script calls [`boot`] once; everything else runs inside the Yew
//! app it mounts. Engine modules are platform-free and tested natively.

use std::rc::Rc;

use log::info;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};
use yew::Renderer;

pub mod carousel;
pub mod config;
pub mod content;
pub mod counter;
pub mod error;
pub mod form;
pub mod host;
pub mod input;
pub mod reveal;
pub mod scroll;
pub mod site;
pub mod timing;

mod components {
    pub mod app;
    pub mod contact_form;
    pub mod scheduling;
    pub mod scroll_effects;
    pub mod site_view;
}

mod dom {
    pub mod calendly;
    pub mod listeners;
    pub mod motion;
    pub mod nodes;
    pub mod viewport;
}

use components::app::{App, AppProps};
use config::{SiteConfig, CONFIG_SCRIPT_ID};
use error::{report, ErrorContext, InitError};
use host::{HostBridge, SiteApi};

/// Element the app mounts into. Falls back to `<body>`.
pub const ROOT_ID: &str = "sage-root";

/// Mounts the site and hands back its control handle.
///
/// `options` is an optional object of [`SiteConfig`] overrides. Without it
/// the `#site-config` JSON block is used if the page has one. A bad config
/// is logged and replaced by the defaults.
#[wasm_bindgen]
pub fn boot(options: JsValue) -> Result<SiteApi, JsValue> {
    console_error_panic_hook::set_once();

    let window = web_sys::window();
    let document = window.as_ref().and_then(|w| w.document());
    let (config, config_error) = match document.as_ref().map(|doc| load_config(options, doc)) {
        Some(Ok(config)) => (config, None),
        Some(Err(err)) => (SiteConfig::default(), Some(err)),
        None => (SiteConfig::default(), None),
    };
    let _ = console_log::init_with_level(config.log_level());
    if let Some(err) = config_error {
        report(ErrorContext::General, &err);
    }

    let (Some(window), Some(document)) = (window, document) else {
        return Err(init_failure(InitError::MissingDocument));
    };

    let error_hooks = dom::listeners::error_hooks(&window)?;
    let root = match document.get_element_by_id(ROOT_ID) {
        Some(root) => root,
        None => document
            .body()
            .map(Element::from)
            .ok_or_else(|| init_failure(InitError::MissingDocument))?,
    };

    let bridge = HostBridge::default();
    let props = AppProps {
        config: Rc::new(config),
        bridge: bridge.clone(),
    };
    let app = Renderer::<App>::with_root_and_props(root, props).render();
    info!("Sage site mounted");
    Ok(SiteApi::new(bridge, app, error_hooks))
}

fn init_failure(err: InitError) -> JsValue {
    report(ErrorContext::Slider, &err);
    JsValue::from_str(&err.to_string())
}

fn load_config(options: JsValue, document: &Document) -> Result<SiteConfig, InitError> {
    if !options.is_undefined() && !options.is_null() {
        return SiteConfig::from_js(options);
    }
    match document
        .get_element_by_id(CONFIG_SCRIPT_ID)
        .and_then(|script| script.text_content())
    {
        Some(raw) if !raw.trim().is_empty() => SiteConfig::from_json(&raw),
        _ => Ok(SiteConfig::default()),
    }
}
