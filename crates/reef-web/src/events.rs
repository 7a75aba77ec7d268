//! Input wiring: wheel, touch and header-nav clicks all funnel into the
//! shared `NavController`, which owns debouncing and index clamping.

use crate::dom;
use instant::Instant;
use reef_core::nav::NavController;
use reef_core::sections::SECTIONS;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

fn seconds_since(start: &Instant) -> f64 {
    (Instant::now() - *start).as_secs_f64()
}

pub fn wire_input(
    window: &web::Window,
    document: &web::Document,
    nav: Rc<RefCell<NavController>>,
    start: Instant,
) {
    // wheel steps
    {
        let nav = nav.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
            ev.prevent_default();
            let now = seconds_since(&start);
            if let Some(change) = nav.borrow_mut().on_wheel(ev.delta_y() as f32, now) {
                log::debug!("wheel nav {} -> {}", change.from, change.to);
            }
        }) as Box<dyn FnMut(web::WheelEvent)>);
        // must be non-passive or the browser ignores prevent_default
        let opts = web::AddEventListenerOptions::new();
        opts.set_passive(false);
        let _ = window.add_event_listener_with_callback_and_add_event_listener_options(
            "wheel",
            closure.as_ref().unchecked_ref(),
            &opts,
        );
        closure.forget();
    }

    // touch swipes
    {
        let nav = nav.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::TouchEvent| {
            if let Some(touch) = ev.touches().item(0) {
                nav.borrow_mut().on_touch_start(touch.client_y() as f32);
            }
        }) as Box<dyn FnMut(web::TouchEvent)>);
        let _ = window
            .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
        closure.forget();
    }
    {
        let nav = nav.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::TouchEvent| {
            if let Some(touch) = ev.changed_touches().item(0) {
                let now = seconds_since(&start);
                if let Some(change) = nav
                    .borrow_mut()
                    .on_touch_end(touch.client_y() as f32, now)
                {
                    log::debug!("touch nav {} -> {}", change.from, change.to);
                }
            }
        }) as Box<dyn FnMut(web::TouchEvent)>);
        let _ = window
            .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // header nav links jump directly
    for (index, section) in SECTIONS.iter().enumerate() {
        let nav = nav.clone();
        dom::add_click_listener(document, &format!("nav-{}", section.id), move || {
            let now = seconds_since(&start);
            nav.borrow_mut().request(index, now);
        });
    }
}
