use log::{info, warn};
use yew::prelude::*;

use crate::dom::calendly;
use crate::dom::nodes::describe;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedMode {
    /// Not decided until the component is mounted.
    Pending,
    Inline,
    Fallback,
}

impl EmbedMode {
    pub fn resolve(library_loaded: bool, url: &str) -> Self {
        if library_loaded && !url.trim().is_empty() {
            EmbedMode::Inline
        } else {
            EmbedMode::Fallback
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct SchedulingProps {
    pub url: String,
}

pub enum SchedulingMsg {
    Fallback,
}

pub struct Scheduling {
    mode: EmbedMode,
    widget: NodeRef,
}

impl Scheduling {
    fn embed(&self, url: &str) -> Result<bool, String> {
        let Some(window) = web_sys::window() else {
            return Ok(false);
        };
        let Some(lib) = calendly::library(&window) else {
            return Ok(false);
        };
        let Some(parent) = self.widget.cast::<web_sys::Element>() else {
            return Ok(false);
        };
        calendly::init_inline_widget(&lib, &parent, url).map_err(|e| describe(&e))?;
        Ok(true)
    }
}

impl Component for Scheduling {
    type Message = SchedulingMsg;
    type Properties = SchedulingProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            mode: EmbedMode::Pending,
            widget: NodeRef::default(),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            SchedulingMsg::Fallback => {
                self.mode = EmbedMode::Fallback;
                true
            }
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if !first_render {
            return;
        }
        let url = &ctx.props().url;
        let loaded = web_sys::window()
            .and_then(|w| calendly::library(&w))
            .is_some();
        if EmbedMode::resolve(loaded, url) == EmbedMode::Fallback {
            info!("Scheduling widget unavailable, showing booking link");
            ctx.link().send_message(SchedulingMsg::Fallback);
            return;
        }
        match self.embed(url) {
            Ok(true) => self.mode = EmbedMode::Inline,
            Ok(false) => ctx.link().send_message(SchedulingMsg::Fallback),
            Err(err) => {
                warn!("Scheduling widget failed to start: {}", err);
                ctx.link().send_message(SchedulingMsg::Fallback);
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let url = ctx.props().url.clone();
        if self.mode == EmbedMode::Fallback {
            return booking_link(url);
        }
        html! {
            <div class="calendly-inline-widget" data-url={url} ref={self.widget.clone()}></div>
        }
    }
}

/// Shown in place of the widget. Visible on its own; the enclosing slide
/// block owns the reveal animation.
fn booking_link(url: String) -> Html {
    html! {
        <div class="calendly-fallback">
            <h3>{"Schedule Your Consultation"}</h3>
            <p>{"Click the button below to book your free 30-minute AI strategy session."}</p>
            <a href={url} target="_blank" rel="noopener noreferrer" class="btn-primary">
                {"Book Your Free Consultation"}
            </a>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yew::virtual_dom::VNode;

    #[test]
    fn booking_link_is_not_hidden_behind_a_reveal() {
        let VNode::VTag(tag) = booking_link("https://calendly.com/x".into()) else {
            panic!("booking link should render a single element");
        };
        let attrs: Vec<(String, String)> = tag
            .attributes
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        assert!(attrs.contains(&("class".to_string(), "calendly-fallback".to_string())));
        assert!(attrs.iter().all(|(k, _)| k != "data-animate"));
    }

    #[test]
    fn inline_only_with_library_and_url() {
        assert_eq!(EmbedMode::resolve(true, "https://calendly.com/x"), EmbedMode::Inline);
        assert_eq!(EmbedMode::resolve(false, "https://calendly.com/x"), EmbedMode::Fallback);
        assert_eq!(EmbedMode::resolve(true, "  "), EmbedMode::Fallback);
    }
}
