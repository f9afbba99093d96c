//! DOM event listeners owned by guards that detach on drop.

use log::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    AddEventListenerOptions, Document, ErrorEvent, Event, EventTarget, HtmlElement,
    KeyboardEvent, PromiseRejectionEvent, TouchEvent, Window,
};
use yew::Callback;

use crate::dom::nodes::describe;
use crate::error::{report, ErrorContext};
use crate::input::KeyAction;
use crate::site::Input;

pub struct EventListener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl EventListener {
    pub fn new<F>(target: &EventTarget, kind: &'static str, handler: F) -> Result<Self, JsValue>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            kind,
            callback,
        })
    }

    /// Same as [`new`](Self::new) with an explicit `passive` flag. Handlers
    /// that call `prevent_default` need `passive: false`.
    pub fn with_options<F>(
        target: &EventTarget,
        kind: &'static str,
        passive: bool,
        handler: F,
    ) -> Result<Self, JsValue>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        let options = AddEventListenerOptions::new();
        options.set_passive(passive);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            kind,
            callback.as_ref().unchecked_ref(),
            &options,
        )?;
        Ok(Self {
            target: target.clone(),
            kind,
            callback,
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
    }
}

fn is_editable(target: Option<EventTarget>) -> bool {
    target
        .and_then(|t| t.dyn_into::<HtmlElement>().ok())
        .map_or(false, |el| {
            matches!(el.tag_name().as_str(), "INPUT" | "TEXTAREA" | "SELECT")
                || el.is_content_editable()
        })
}

/// Arrow keys, Home and End drive the carousel; Escape drops focus. Keys
/// typed into form fields are left alone.
pub fn keyboard(document: &Document, input: Callback<Input>) -> Result<EventListener, JsValue> {
    let doc = document.clone();
    EventListener::new(document, "keydown", move |event: Event| {
        let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let Some(action) = KeyAction::from_key(&event.key()) else {
            return;
        };
        if action.prevents_default() && is_editable(event.target()) {
            return;
        }
        if action.prevents_default() {
            event.prevent_default();
        }
        if action == KeyAction::Blur {
            if let Some(focused) = doc
                .active_element()
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            {
                let _ = focused.blur();
            }
        }
        input.emit(Input::Key(action));
    })
}

/// The first click, key press or touch anywhere on the page. Callers drop
/// the returned guards once the interaction has been seen.
pub fn interactions(
    document: &Document,
    input: Callback<Input>,
) -> Result<Vec<EventListener>, JsValue> {
    ["click", "keydown", "touchstart"]
        .into_iter()
        .map(|kind| {
            let input = input.clone();
            EventListener::new(document, kind, move |_| input.emit(Input::Interaction))
        })
        .collect()
}

fn touch_x(event: &Event) -> Option<f64> {
    let touch = event.dyn_ref::<TouchEvent>()?.changed_touches().get(0)?;
    Some(f64::from(touch.client_x()))
}

/// Swipe tracking on the carousel container.
pub fn touch(container: &HtmlElement, input: Callback<Input>) -> Result<Vec<EventListener>, JsValue> {
    let start = {
        let input = input.clone();
        EventListener::with_options(container, "touchstart", true, move |event| {
            if let Some(x) = touch_x(&event) {
                input.emit(Input::TouchStart(x));
            }
        })?
    };
    let end = EventListener::with_options(container, "touchend", true, move |event| {
        if let Some(x) = touch_x(&event) {
            input.emit(Input::TouchEnd(x));
        }
    })?;
    let swallow_move = EventListener::with_options(container, "touchmove", false, |event| {
        event.prevent_default();
    })?;
    Ok(vec![start, end, swallow_move])
}

/// Page visibility and window resizes, both of which replay the current
/// slide's animations.
pub fn page_signals(
    window: &Window,
    document: &Document,
    input: Callback<Input>,
) -> Result<Vec<EventListener>, JsValue> {
    let visibility = {
        let input = input.clone();
        let doc = document.clone();
        EventListener::new(document, "visibilitychange", move |_| {
            if !doc.hidden() {
                input.emit(Input::PageVisible);
            }
        })?
    };
    let resize = EventListener::new(window, "resize", move |_| input.emit(Input::Resized))?;
    Ok(vec![visibility, resize])
}

/// Global `error` and `unhandledrejection` hooks. Both only log.
pub fn error_hooks(window: &Window) -> Result<Vec<EventListener>, JsValue> {
    let error = EventListener::new(window, "error", |event| {
        match event.dyn_ref::<ErrorEvent>() {
            Some(err) => report(
                ErrorContext::General,
                &format!("{} ({}:{})", err.message(), err.filename(), err.lineno()),
            ),
            None => debug!("Resource failed to load: {:?}", event.target()),
        }
    })?;
    let rejection = EventListener::new(window, "unhandledrejection", |event| {
        if let Some(rejection) = event.dyn_ref::<PromiseRejectionEvent>() {
            report(
                ErrorContext::General,
                &format!("unhandled rejection: {}", describe(&rejection.reason())),
            );
        }
        event.prevent_default();
    })?;
    Ok(vec![error, rejection])
}
