//! The handle page scripts get back from `boot()`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{info, warn};
use wasm_bindgen::prelude::*;
use yew::{AppHandle, Callback};

use crate::carousel::Command;
use crate::components::app::App;
use crate::dom::listeners::EventListener;

/// Requests a host script can make of the running site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostRequest {
    Navigate(Command),
    Retrigger,
    LoadLazyImages,
    ScrollIntoView,
    /// Stops the scroll-reveal watcher and detaches the keyboard listener.
    Teardown,
}

#[derive(Default)]
struct BridgeState {
    current: Cell<usize>,
    total: Cell<usize>,
    sink: RefCell<Option<Callback<HostRequest>>>,
}

/// Shared between [`SiteApi`] and the carousel component. The component
/// mirrors its position into it and listens for [`HostRequest`]s.
#[derive(Clone, Default)]
pub struct HostBridge {
    state: Rc<BridgeState>,
}

impl PartialEq for HostBridge {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

impl HostBridge {
    pub fn connect(&self, sink: Callback<HostRequest>) {
        *self.state.sink.borrow_mut() = Some(sink);
    }

    pub fn disconnect(&self) {
        self.state.sink.borrow_mut().take();
    }

    pub fn sync(&self, current: usize, total: usize) {
        self.state.current.set(current);
        self.state.total.set(total);
    }

    pub fn current(&self) -> usize {
        self.state.current.get()
    }

    pub fn total(&self) -> usize {
        self.state.total.get()
    }

    /// Forwards `request` to the component. False if nothing is listening.
    pub fn send(&self, request: HostRequest) -> bool {
        let sink = self.state.sink.borrow().clone();
        match sink {
            Some(sink) => {
                sink.emit(request);
                true
            }
            None => {
                warn!("Host request {:?} ignored: site is not running", request);
                false
            }
        }
    }
}

#[wasm_bindgen]
pub struct SiteApi {
    bridge: HostBridge,
    _app: AppHandle<App>,
    _error_hooks: Vec<EventListener>,
}

impl SiteApi {
    pub(crate) fn new(bridge: HostBridge, app: AppHandle<App>, error_hooks: Vec<EventListener>) -> Self {
        Self {
            bridge,
            _app: app,
            _error_hooks: error_hooks,
        }
    }
}

#[wasm_bindgen]
impl SiteApi {
    #[wasm_bindgen(js_name = currentSlide)]
    pub fn current_slide(&self) -> usize {
        self.bridge.current()
    }

    #[wasm_bindgen(js_name = totalSlides)]
    pub fn total_slides(&self) -> usize {
        self.bridge.total()
    }

    #[wasm_bindgen(js_name = goTo)]
    pub fn go_to(&self, index: usize) {
        self.bridge.send(HostRequest::Navigate(Command::GoTo(index)));
    }

    pub fn next(&self) {
        self.bridge.send(HostRequest::Navigate(Command::Next));
    }

    pub fn previous(&self) {
        self.bridge.send(HostRequest::Navigate(Command::Previous));
    }

    #[wasm_bindgen(js_name = loadLazyImages)]
    pub fn load_lazy_images(&self) {
        self.bridge.send(HostRequest::LoadLazyImages);
    }

    #[wasm_bindgen(js_name = retriggerAnimations)]
    pub fn retrigger_animations(&self) {
        self.bridge.send(HostRequest::Retrigger);
    }

    #[wasm_bindgen(js_name = scrollToSlides)]
    pub fn scroll_to_slides(&self) {
        self.bridge.send(HostRequest::ScrollIntoView);
    }

    pub fn destroy(&self) {
        if self.bridge.send(HostRequest::Teardown) {
            info!("Site torn down by host");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_reach_the_connected_component() {
        let bridge = HostBridge::default();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = {
            let seen = seen.clone();
            Callback::from(move |request: HostRequest| seen.borrow_mut().push(request))
        };
        assert!(!bridge.send(HostRequest::Retrigger));

        bridge.connect(sink);
        assert!(bridge.send(HostRequest::Navigate(Command::GoTo(3))));
        assert!(bridge.send(HostRequest::Teardown));
        assert_eq!(
            *seen.borrow(),
            vec![
                HostRequest::Navigate(Command::GoTo(3)),
                HostRequest::Teardown
            ]
        );

        bridge.disconnect();
        assert!(!bridge.send(HostRequest::Retrigger));
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn clones_share_position() {
        let bridge = HostBridge::default();
        let host_side = bridge.clone();
        bridge.sync(2, 5);
        assert_eq!(host_side.current(), 2);
        assert_eq!(host_side.total(), 5);
        assert!(bridge == host_side);
        assert!(bridge != HostBridge::default());
    }
}
