#![cfg(target_arch = "wasm32")]
//! WASM entry point: builds the reef scene, brings up WebGPU, wires input
//! and the HTML overlay, and starts the frame loop.

mod dom;
mod events;
mod frame;
mod overlay;
mod render;
mod scene;

use instant::Instant;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use reef_core::activation::ActivationController;
use reef_core::ambient::{BubbleField, ParticleField};
use reef_core::content::{ContentStore, CONTENT_PATH};
use reef_core::lighting::SunRays;
use reef_core::nav::NavController;
use reef_core::readiness::ReadinessGate;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("reef-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id("reef-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #reef-canvas"))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    dom::sync_canvas_backing_size(&canvas);
    {
        let canvas_resize = canvas.clone();
        let resize_closure = Closure::wrap(Box::new(move || {
            dom::sync_canvas_backing_size(&canvas_resize);
        }) as Box<dyn FnMut()>);
        let _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
        resize_closure.forget();
    }

    // one clock for the frame loop, input debouncing and the loader gate
    let start = Instant::now();

    let overlay = Rc::new(overlay::Overlay::resolve(&document));
    let gate = Rc::new(RefCell::new(ReadinessGate::new(&["gpu", "content"], 0.0)));
    let nav = Rc::new(RefCell::new(NavController::new()));
    events::wire_input(&window, &document, nav.clone(), start);

    // deterministic scene geometry, then GPU bring-up
    let geometry = scene::build_scene_geometry();
    let gpu = init_gpu(&canvas, &geometry).await;
    if gpu.is_some() {
        gate.borrow_mut().mark_ready("gpu");
    }

    // content fetch runs alongside; failure degrades to empty boxes
    {
        let overlay = overlay.clone();
        let gate = gate.clone();
        let document = document.clone();
        let fetch_window = window.clone();
        spawn_local(async move {
            let store = fetch_content(&fetch_window).await;
            overlay.apply_content(&document, &store);
            gate.borrow_mut().mark_ready("content");
        });
    }

    // presentation jitter; not part of the deterministic layout
    let mut rng = SmallRng::from_entropy();
    let activation = ActivationController::new(&mut rng);
    let bubbles = BubbleField::new(&mut rng);
    let particles = ParticleField::new(&mut rng);
    let sun_rays = SunRays::new(&mut rng);

    let ctx = Rc::new(RefCell::new(frame::FrameContext::new(
        canvas, gpu, nav, activation, bubbles, particles, sun_rays, rng, overlay, gate, start,
    )));
    frame::start_loop(ctx);
    Ok(())
}

async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    geometry: &render::SceneGeometry,
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, geometry).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

/// Fetch and parse the section content. Every failure path returns the
/// empty store; the overlay then shows nothing for affected sections.
async fn fetch_content(window: &web::Window) -> ContentStore {
    let resp_value = match JsFuture::from(window.fetch_with_str(CONTENT_PATH)).await {
        Ok(v) => v,
        Err(e) => {
            log::warn!("content fetch failed: {:?}", e);
            return ContentStore::empty();
        }
    };
    let resp: web::Response = match resp_value.dyn_into() {
        Ok(r) => r,
        Err(_) => return ContentStore::empty(),
    };
    if !resp.ok() {
        log::warn!("content fetch status {}", resp.status());
        return ContentStore::empty();
    }
    let text_promise = match resp.text() {
        Ok(p) => p,
        Err(e) => {
            log::warn!("content body unreadable: {:?}", e);
            return ContentStore::empty();
        }
    };
    match JsFuture::from(text_promise).await {
        Ok(text) => ContentStore::from_json(&text.as_string().unwrap_or_default()),
        Err(e) => {
            log::warn!("content body unreadable: {:?}", e);
            ContentStore::empty()
        }
    }
}
