//! Bootstrap for the Calendly inline scheduling widget.

use js_sys::{Function, Object, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, Window};

/// The global `Calendly` object, if its script has loaded.
pub fn library(window: &Window) -> Option<JsValue> {
    let calendly = Reflect::get(window, &JsValue::from_str("Calendly")).ok()?;
    (!calendly.is_undefined() && !calendly.is_null()).then_some(calendly)
}

pub fn init_inline_widget(calendly: &JsValue, parent: &Element, url: &str) -> Result<(), JsValue> {
    let init: Function = Reflect::get(calendly, &JsValue::from_str("initInlineWidget"))?.dyn_into()?;
    let options = Object::new();
    Reflect::set(&options, &JsValue::from_str("url"), &JsValue::from_str(url))?;
    Reflect::set(&options, &JsValue::from_str("parentElement"), parent)?;
    Reflect::set(&options, &JsValue::from_str("prefill"), &Object::new())?;
    Reflect::set(&options, &JsValue::from_str("utm"), &Object::new())?;
    init.call1(calendly, &options)?;
    Ok(())
}
