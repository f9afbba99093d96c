use std::rc::Rc;

use yew::prelude::*;

use crate::components::scroll_effects::ScrollEffects;
use crate::components::site_view::SiteView;
use crate::config::SiteConfig;
use crate::host::HostBridge;

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub config: Rc<SiteConfig>,
    pub bridge: HostBridge,
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    html! {
        <div class="sage-site">
            <style>{ STYLES }</style>
            <ScrollEffects throttle_ms={props.config.scroll_throttle_ms} />
            <SiteView config={props.config.clone()} bridge={props.bridge.clone()} />
        </div>
    }
}

const STYLES: &str = r#"
    .sage-site {
        --sage-green: #2f6f4f;
        --sage-light: #e8f1ec;
        font-family: system-ui, -apple-system, sans-serif;
        color: #1d2a24;
        position: relative;
        overflow-x: hidden;
    }
    .scroll-progress {
        position: fixed;
        top: 0;
        left: 0;
        height: 3px;
        width: 0;
        background: var(--sage-green);
        z-index: 1000;
    }
    .hero-decor {
        position: absolute;
        inset: 0;
        pointer-events: none;
        z-index: 0;
    }
    .orb {
        position: absolute;
        border-radius: 50%;
        filter: blur(40px);
        opacity: 0.35;
        background: var(--sage-green);
    }
    .orb-1 { width: 320px; height: 320px; top: 5%; left: -80px; }
    .orb-2 { width: 220px; height: 220px; top: 40%; right: -60px; }
    .orb-3 { width: 160px; height: 160px; top: 70%; left: 30%; }

    .slider-shell { position: relative; z-index: 1; min-height: 100vh; }
    .slide-nav {
        display: flex;
        justify-content: center;
        gap: 1rem;
        padding: 1rem;
    }
    .nav-btn {
        background: none;
        border: none;
        padding: 0.5rem 1rem;
        cursor: pointer;
        border-bottom: 2px solid transparent;
    }
    .nav-btn.active { border-bottom-color: var(--sage-green); font-weight: 600; }

    .slider-container { position: relative; min-height: 70vh; overflow: hidden; }
    .slide {
        position: absolute;
        inset: 0;
        opacity: 0;
        visibility: hidden;
        transform: translateX(40px);
        transition: opacity 0.6s ease, transform 0.6s ease, visibility 0.6s;
    }
    .slide.active { opacity: 1; visibility: visible; transform: none; position: relative; }
    .slide.prev { transform: translateX(-40px); }
    .slider-shell.static .slide { transition: none; }
    .slide-content { max-width: 880px; margin: 0 auto; padding: 2rem; }

    [data-animate] {
        opacity: 0;
        transform: translateY(20px);
        transition: opacity 0.5s ease, transform 0.5s ease;
    }
    [data-animate].animate { opacity: 1; transform: none; }

    .stats-grid {
        display: grid;
        grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
        gap: 1.5rem;
    }
    .stat-number { font-size: 2.5rem; font-weight: 700; color: var(--sage-green); }
    .stat-suffix { font-size: 1.5rem; color: var(--sage-green); }

    .btn-primary {
        display: inline-block;
        background: var(--sage-green);
        color: #fff;
        border: none;
        border-radius: 6px;
        padding: 0.75rem 1.5rem;
        cursor: pointer;
        text-decoration: none;
    }
    .btn-primary:disabled { opacity: 0.6; cursor: wait; }

    .slide-arrow {
        position: absolute;
        top: 50%;
        background: rgba(255, 255, 255, 0.8);
        border: none;
        font-size: 2rem;
        cursor: pointer;
    }
    .slide-arrow-prev { left: 0.5rem; }
    .slide-arrow-next { right: 0.5rem; }

    .slide-indicators { display: flex; justify-content: center; gap: 0.5rem; padding: 1rem; }
    .indicator {
        width: 10px;
        height: 10px;
        border-radius: 50%;
        border: none;
        background: #c4d4cb;
        cursor: pointer;
    }
    .indicator.active { background: var(--sage-green); }

    .contact-form { display: grid; gap: 0.75rem; }
    .contact-form input, .contact-form textarea {
        padding: 0.6rem;
        border: 1px solid #c4d4cb;
        border-radius: 4px;
    }
    .form-message {
        display: flex;
        justify-content: space-between;
        padding: 0.75rem 1rem;
        border-radius: 4px;
        margin-bottom: 0.75rem;
    }
    .form-message.success { background: var(--sage-light); color: var(--sage-green); }
    .form-message.error { background: #fdecea; color: #a12622; }
    .form-message-close { background: none; border: none; cursor: pointer; font-size: 1.2rem; }

    .calendly-inline-widget { min-width: 320px; height: 630px; }
    .calendly-fallback { text-align: center; padding: 2rem; background: var(--sage-light); border-radius: 8px; }

    .highlights { display: grid; gap: 2rem; max-width: 880px; margin: 4rem auto; padding: 0 2rem; }
    .highlight { opacity: 0; transform: translateY(30px); transition: opacity 0.6s ease, transform 0.6s ease; }
    .highlight.revealed { opacity: 1; transform: none; }

    .sr-only {
        position: absolute;
        width: 1px;
        height: 1px;
        overflow: hidden;
        clip: rect(0, 0, 0, 0);
        white-space: nowrap;
    }

    @media (prefers-reduced-motion: reduce) {
        .slide, [data-animate], .highlight { transition: none; }
    }
"#;
