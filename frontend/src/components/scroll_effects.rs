use log::debug;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;
use yew::prelude::*;

use crate::dom::listeners::EventListener;
use crate::dom::motion;
use crate::dom::nodes::describe;
use crate::scroll::{parallax_offset, parallax_rate, ScrollWiring};
use crate::timing::Throttle;

pub const PARALLAX_ATTR: &str = "data-parallax";

/// Decorative layers drifting behind the hero slide, with their rates.
const LAYERS: &[(&str, &str)] = &[
    ("orb orb-1", "0.3"),
    ("orb orb-2", "0.5"),
    ("orb orb-3", "0.8"),
];

#[derive(Properties, PartialEq)]
pub struct ScrollEffectsProps {
    pub throttle_ms: u32,
}

/// Parallax decor plus the reading progress bar along the top edge.
pub struct ScrollEffects {
    wiring: ScrollWiring,
    decor: NodeRef,
    bar: NodeRef,
    _scroll: Option<EventListener>,
}

impl ScrollEffects {
    fn wire(&self, throttle_ms: u32) -> Option<EventListener> {
        let window = web_sys::window()?;
        let document = window.document()?;
        let layers: Vec<(HtmlElement, f64)> = self
            .decor
            .cast::<HtmlElement>()
            .map(|decor| {
                let children = decor.children();
                (0..children.length())
                    .filter_map(|i| children.item(i))
                    .filter_map(|el| {
                        let rate = parallax_rate(el.get_attribute(PARALLAX_ATTR).as_deref());
                        el.dyn_into::<HtmlElement>().ok().map(|el| (el, rate))
                    })
                    .collect()
            })
            .unwrap_or_default();

        let wiring = ScrollWiring {
            parallax: self.wiring.parallax && !layers.is_empty(),
            ..self.wiring
        };
        if !wiring.needs_listener() {
            debug!("Reduced motion requested, scroll effects disabled");
            return None;
        }
        let bar = self.bar.cast::<HtmlElement>().filter(|_| wiring.progress);
        let mut throttle = Throttle::new(throttle_ms);
        let target = window.clone();

        let listener = EventListener::new(&target, "scroll", move |_| {
            if !throttle.admit(motion::now_ms(&window)) {
                return;
            }
            let sample = motion::scroll_sample(&window, &document);
            if wiring.parallax {
                for (layer, rate) in &layers {
                    motion::translate_y(layer, parallax_offset(sample.scroll_y, *rate));
                }
            }
            if let Some(bar) = &bar {
                motion::set_width_percent(bar, sample.progress_percent());
            }
        });
        match listener {
            Ok(listener) => Some(listener),
            Err(err) => {
                debug!("Scroll listener unavailable: {}", describe(&err));
                None
            }
        }
    }
}

impl Component for ScrollEffects {
    type Message = ();
    type Properties = ScrollEffectsProps;

    fn create(_ctx: &Context<Self>) -> Self {
        let reduced_motion = web_sys::window()
            .map(|window| motion::prefers_reduced_motion(&window))
            .unwrap_or(false);
        Self {
            wiring: ScrollWiring::for_page(reduced_motion, LAYERS.len()),
            decor: NodeRef::default(),
            bar: NodeRef::default(),
            _scroll: None,
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render {
            self._scroll = self.wire(ctx.props().throttle_ms);
        }
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        html! {
            <>
                { progress_bar(self.wiring, &self.bar) }
                <div class="hero-decor" aria-hidden="true" ref={self.decor.clone()}>
                    { for LAYERS.iter().map(|(class, rate)| html! {
                        <div class={*class} data-parallax={*rate}></div>
                    }) }
                </div>
            </>
        }
    }
}

/// The bar only exists on pages that animate it.
fn progress_bar(wiring: ScrollWiring, bar: &NodeRef) -> Html {
    if !wiring.progress {
        return html! {};
    }
    html! { <div class="scroll-progress" ref={bar.clone()}></div> }
}
