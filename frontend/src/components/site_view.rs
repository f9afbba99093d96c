//! The slide carousel and everything hanging off it.
//!
//! `SiteView` owns the [`Site`] engine. Browser listeners are attached after
//! the first render and feed [`Input`]s back as messages; engine timers come
//! back as [`SiteEvent`]s. If the engine cannot be built the slides render
//! statically, first slide visible, with nothing wired.

use std::rc::Rc;

use log::{debug, info, warn};
use wasm_bindgen::JsValue;
use web_sys::{Element, HtmlElement};
use yew::prelude::*;

use crate::carousel::{Command, SlideFlags};
use crate::components::contact_form::ContactForm;
use crate::components::scheduling::Scheduling;
use crate::config::SiteConfig;
use crate::content::{self, Block, SlideContent, HIGHLIGHTS, SLIDES};
use crate::counter::CounterTarget;
use crate::dom::listeners::{self, EventListener};
use crate::dom::motion;
use crate::dom::nodes::describe;
use crate::dom::viewport::{self, LazyImages, ViewportWatch};
use crate::error::{report, ErrorContext, InitError};
use crate::host::{HostBridge, HostRequest};
use crate::site::{Input, Site, SiteEvent};
use crate::timing::TimeoutScheduler;

#[derive(Properties, PartialEq)]
pub struct SiteViewProps {
    pub config: Rc<SiteConfig>,
    pub bridge: HostBridge,
}

pub enum SiteMsg {
    Input(Input),
    Timer(SiteEvent),
    Host(HostRequest),
}

type LiveSite = Site<TimeoutScheduler<SiteEvent>>;

/// Listener guards. Dropping one detaches it.
#[derive(Default)]
struct Wiring {
    keyboard: Option<EventListener>,
    interactions: Vec<EventListener>,
    touch: Vec<EventListener>,
    page: Vec<EventListener>,
    reveal: Option<ViewportWatch>,
    lazy_images: Option<LazyImages>,
}

impl Wiring {
    fn listener_count(&self) -> usize {
        usize::from(self.keyboard.is_some())
            + self.interactions.len()
            + self.touch.len()
            + self.page.len()
            + usize::from(self.reveal.is_some())
            + usize::from(self.lazy_images.is_some())
    }
}

/// What one slide looks like right now.
struct SlideState {
    flags: SlideFlags,
    revealed: Vec<bool>,
    counters: Vec<String>,
}

impl SlideState {
    fn live(site: &LiveSite, index: usize, content: &SlideContent) -> Self {
        let outline = content.outline();
        Self {
            flags: site.carousel().slide(index).unwrap_or_default(),
            revealed: (0..outline.animated)
                .map(|el| site.is_element_revealed(index, el))
                .collect(),
            counters: (0..outline.counters.len())
                .map(|nth| site.counter_text(index, nth).to_string())
                .collect(),
        }
    }

    fn fallback(index: usize, content: &SlideContent) -> Self {
        let outline = content.outline();
        Self {
            flags: SlideFlags {
                active: index == 0,
                hidden: index != 0,
                prev: false,
            },
            revealed: vec![true; outline.animated],
            counters: outline
                .counters
                .iter()
                .map(|raw| {
                    CounterTarget::parse(raw)
                        .map(|target| target.render(target.value()))
                        .unwrap_or_else(|| raw.clone())
                })
                .collect(),
        }
    }

    fn is_revealed(&self, element: usize) -> bool {
        self.revealed.get(element).copied().unwrap_or(false)
    }
}

pub struct SiteView {
    site: Result<LiveSite, InitError>,
    container: NodeRef,
    wiring: Wiring,
}

fn missing_document() -> JsValue {
    JsValue::from_str(&InitError::MissingDocument.to_string())
}

impl SiteView {
    fn wire(&mut self, ctx: &Context<Self>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(missing_document)?;
        let document = window.document().ok_or_else(missing_document)?;
        let input = ctx.link().callback(SiteMsg::Input);

        self.wiring.keyboard = Some(listeners::keyboard(&document, input.clone())?);
        self.wiring.interactions = listeners::interactions(&document, input.clone())?;
        if let Some(container) = self.container.cast::<HtmlElement>() {
            self.wiring.touch = listeners::touch(&container, input.clone())?;
        }
        self.wiring.page = listeners::page_signals(&window, &document, input.clone())?;
        self.wiring.reveal = match viewport::reveal_watch(&document, &ctx.props().config, input.clone()) {
            Ok(watch) => Some(watch),
            Err(err) => {
                warn!("Scroll reveal unavailable, showing everything: {}", describe(&err));
                for key in content::reveal_keys() {
                    input.emit(Input::Intersected(key));
                }
                None
            }
        };
        self.wiring.lazy_images = Some(LazyImages::attach(&document));
        debug!("Attached {} listeners", self.wiring.listener_count());
        Ok(())
    }

    fn view_live(&self, ctx: &Context<Self>, site: &LiveSite) -> Html {
        let link = ctx.link();
        let config = &ctx.props().config;
        let carousel = site.carousel();
        let go = |i: usize| {
            link.callback(move |_: MouseEvent| SiteMsg::Input(Input::Command(Command::GoTo(i))))
        };
        let step = |command: Command| {
            link.callback(move |_: MouseEvent| SiteMsg::Input(Input::Command(command)))
        };
        let on_next = step(Command::Next);

        html! {
            <div class="slider-shell">
                <nav class="slide-nav" role="tablist" aria-label="Sections">
                    { for SLIDES.iter().enumerate().map(|(i, slide)| {
                        let selected = carousel.is_selected(i);
                        html! {
                            <button
                                id={format!("nav-btn-{}", i)}
                                class={classes!("nav-btn", selected.then_some("active"))}
                                role="tab"
                                aria-controls={format!("slide-{}", i)}
                                aria-selected={selected.to_string()}
                                onclick={go(i)}
                            >
                                { slide.nav_label }
                            </button>
                        }
                    }) }
                </nav>
                <div class="slider-container" ref={self.container.clone()}>
                    { for SLIDES.iter().enumerate().map(|(i, slide)| {
                        render_slide(i, slide, &SlideState::live(site, i, slide), &on_next, config)
                    }) }
                    <button class="slide-arrow slide-arrow-prev" aria-label="Previous slide" onclick={step(Command::Previous)}>
                        {"‹"}
                    </button>
                    <button class="slide-arrow slide-arrow-next" aria-label="Next slide" onclick={step(Command::Next)}>
                        {"›"}
                    </button>
                </div>
                <div class="slide-indicators">
                    { for (0..carousel.len()).map(|i| {
                        let selected = carousel.is_selected(i);
                        html! {
                            <button
                                class={classes!("indicator", selected.then_some("active"))}
                                aria-label={format!("Go to slide {}", i + 1)}
                                aria-selected={selected.to_string()}
                                onclick={go(i)}
                            ></button>
                        }
                    }) }
                </div>
                <div class="sr-only" aria-live="polite" aria-atomic="true">
                    { site.announcement().to_string() }
                </div>
                { render_highlights(|key| site.is_scroll_revealed(key)) }
            </div>
        }
    }

    fn view_static(&self, ctx: &Context<Self>) -> Html {
        let config = &ctx.props().config;
        let inert = Callback::from(|_: MouseEvent| ());
        html! {
            <div class="slider-shell static">
                <div class="slider-container" ref={self.container.clone()}>
                    { for SLIDES.iter().enumerate().map(|(i, slide)| {
                        render_slide(i, slide, &SlideState::fallback(i, slide), &inert, config)
                    }) }
                </div>
                { render_highlights(|_| true) }
            </div>
        }
    }
}

impl Component for SiteView {
    type Message = SiteMsg;
    type Properties = SiteViewProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let scheduler = TimeoutScheduler::new(ctx.link().callback(SiteMsg::Timer));
        let site = Site::new(
            &content::outlines(),
            content::reveal_keys(),
            SiteConfig::clone(&props.config),
            scheduler,
        )
        .map(|mut site| {
            site.start();
            site
        });
        match &site {
            Ok(site) => props.bridge.sync(site.current_slide(), site.total_slides()),
            Err(err) => {
                report(ErrorContext::Slider, err);
                props.bridge.sync(0, SLIDES.len());
            }
        }
        props.bridge.connect(ctx.link().callback(SiteMsg::Host));

        Self {
            site,
            container: NodeRef::default(),
            wiring: Wiring::default(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        let Ok(site) = &mut self.site else {
            return false;
        };
        let changed = match msg {
            SiteMsg::Input(input) => {
                if input == Input::Interaction {
                    self.wiring.interactions.clear();
                }
                site.handle(input)
            }
            SiteMsg::Timer(event) => site.on_timer(event),
            SiteMsg::Host(HostRequest::Navigate(command)) => site.dispatch(command),
            SiteMsg::Host(HostRequest::Retrigger) => {
                site.retrigger();
                true
            }
            SiteMsg::Host(HostRequest::LoadLazyImages) => {
                if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                    self.wiring.lazy_images = Some(LazyImages::attach(&document));
                }
                false
            }
            SiteMsg::Host(HostRequest::ScrollIntoView) => {
                if let Some(container) = self.container.cast::<Element>() {
                    motion::scroll_into_view(&container);
                }
                false
            }
            SiteMsg::Host(HostRequest::Teardown) => {
                self.wiring.reveal = None;
                self.wiring.keyboard = None;
                info!("Scroll reveal and keyboard navigation stopped");
                false
            }
        };
        ctx.props()
            .bridge
            .sync(site.current_slide(), site.total_slides());
        changed
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if !first_render || self.site.is_err() {
            return;
        }
        if let Err(err) = self.wire(ctx) {
            report(ErrorContext::Slider, &describe(&err));
        }
    }

    fn destroy(&mut self, ctx: &Context<Self>) {
        ctx.props().bridge.disconnect();
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        match &self.site {
            Ok(site) => self.view_live(ctx, site),
            Err(_) => self.view_static(ctx),
        }
    }
}

fn render_slide(
    index: usize,
    content: &SlideContent,
    state: &SlideState,
    on_next: &Callback<MouseEvent>,
    config: &SiteConfig,
) -> Html {
    let mut children = Vec::with_capacity(content.blocks.len() + 1);
    let mut element = 0;
    let mut counter = 0;

    if let Some(heading) = content.heading {
        children.push(html! {
            <h2 data-animate="" class={classes!(state.is_revealed(element).then_some("animate"))}>
                { heading }
            </h2>
        });
        element += 1;
    }

    for block in content.blocks {
        let body = match *block {
            Block::Lead(text) => html! { <p class="lead">{ text }</p> },
            Block::Paragraph(text) => html! { <p>{ text }</p> },
            Block::Bullets(items) => html! {
                <ul class="feature-list">
                    { for items.iter().map(|item| html! { <li>{ *item }</li> }) }
                </ul>
            },
            Block::Stats(stats) => {
                let cells: Html = stats
                    .iter()
                    .map(|stat| {
                        let text = state.counters.get(counter).cloned().unwrap_or_default();
                        counter += 1;
                        html! {
                            <div class="stat">
                                <span class="stat-number" data-target={stat.target}>{ text }</span>
                                <span class="stat-suffix">{ stat.suffix }</span>
                                <p class="stat-label">{ stat.label }</p>
                            </div>
                        }
                    })
                    .collect();
                html! { <div class="stats-grid">{ cells }</div> }
            }
            Block::NextButton(label) => html! {
                <button class="btn-primary next-slide" onclick={on_next.clone()}>{ label }</button>
            },
            Block::ContactForm => html! {
                <ContactForm
                    submit_delay_ms={config.submit_delay_ms}
                    banner_lifetime_ms={config.banner_lifetime_ms}
                />
            },
            Block::Scheduling => html! { <Scheduling url={config.booking_url.clone()} /> },
        };
        children.push(html! {
            <div data-animate="" class={classes!("slide-block", state.is_revealed(element).then_some("animate"))}>
                { body }
            </div>
        });
        element += 1;
    }

    html! {
        <section
            id={format!("slide-{}", index)}
            class={classes!(
                "slide",
                state.flags.active.then_some("active"),
                state.flags.prev.then_some("prev"),
            )}
            data-slide={content.id}
            role="tabpanel"
            aria-labelledby={format!("nav-btn-{}", index)}
            aria-hidden={state.flags.hidden.to_string()}
        >
            <div class="slide-content">
                { for children }
            </div>
        </section>
    }
}

fn render_highlights(revealed: impl Fn(&str) -> bool) -> Html {
    html! {
        <div class="highlights">
            { for HIGHLIGHTS.iter().map(|h| html! {
                <article
                    class={classes!("highlight", revealed(h.key).then_some("revealed"))}
                    data-reveal={h.key}
                >
                    <h3>{ h.title }</h3>
                    <p>{ h.body }</p>
                </article>
            }) }
        </div>
    }
}
