//! Per-frame driver: advances the camera rig, activation effects and
//! ambient fields, assembles sprite instances and hands everything to the
//! renderer.

use crate::overlay::Overlay;
use crate::render::{self, FrameInput, RayInstance, SpriteInstance};
use glam::Mat4;
use instant::Instant;
use rand::rngs::SmallRng;
use reef_core::activation::ActivationController;
use reef_core::ambient::{BubbleField, ParticleField};
use reef_core::camera::{self, SectionRig, RIG_LOOK_DROP};
use reef_core::constants::{
    AMBIENT_BUBBLE_COLOR, AMBIENT_BUBBLE_OPACITY, CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR,
    DRIFT_PARTICLE_COLOR, DRIFT_PARTICLE_OPACITY, GROUND_BUBBLE_COLOR, GROUND_DUST_COLOR,
    LOADER_FADE_SEC,
};
use reef_core::lighting::SunRays;
use reef_core::nav::NavController;
use reef_core::readiness::{GateState, ReadinessGate};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone, Copy, Debug)]
enum LoaderPhase {
    Waiting,
    Fading { since: f64 },
    Done,
}

pub struct FrameContext<'a> {
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState<'a>>,

    pub nav: Rc<RefCell<NavController>>,
    pub rig: SectionRig,
    pub activation: ActivationController,
    pub bubbles: BubbleField,
    pub particles: ParticleField,
    pub sun_rays: SunRays,
    pub rng: SmallRng,

    pub overlay: Rc<Overlay>,
    pub gate: Rc<RefCell<ReadinessGate>>,
    loader: LoaderPhase,

    pub start_instant: Instant,
    pub last_instant: Instant,

    alpha_sprites: Vec<SpriteInstance>,
    additive_sprites: Vec<SpriteInstance>,
    rays: Vec<RayInstance>,
}

impl<'a> FrameContext<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        canvas: web::HtmlCanvasElement,
        gpu: Option<render::GpuState<'a>>,
        nav: Rc<RefCell<NavController>>,
        activation: ActivationController,
        bubbles: BubbleField,
        particles: ParticleField,
        sun_rays: SunRays,
        rng: SmallRng,
        overlay: Rc<Overlay>,
        gate: Rc<RefCell<ReadinessGate>>,
        start: Instant,
    ) -> Self {
        Self {
            canvas,
            gpu,
            nav,
            rig: SectionRig::new(),
            activation,
            bubbles,
            particles,
            sun_rays,
            rng,
            overlay,
            gate,
            loader: LoaderPhase::Waiting,
            start_instant: start,
            last_instant: Instant::now(),
            alpha_sprites: Vec::new(),
            additive_sprites: Vec::new(),
            rays: Vec::new(),
        }
    }

    pub fn frame(&mut self) {
        let now_instant = Instant::now();
        let dt = (now_instant - self.last_instant).as_secs_f32().min(0.1);
        self.last_instant = now_instant;
        let elapsed = (now_instant - self.start_instant).as_secs_f64();
        let t = elapsed as f32;

        self.step_loader(elapsed);

        // follow the nav controller; a change starts one sweep
        let active = self.nav.borrow().active();
        if active != self.rig.active_section() {
            self.rig.request_section(active, t);
            self.overlay.set_active_section(active);
        }
        let base = self.rig.pose(t);
        let pose = camera::display_pose(base, t, RIG_LOOK_DROP);
        let view = camera::view_matrix(&pose);

        self.activation.enabled = matches!(self.loader, LoaderPhase::Done);
        self.activation.update(active, t, dt);
        self.bubbles.update(t, dt, &mut self.rng);
        self.particles.update(t, dt);

        self.alpha_sprites.clear();
        for effect in self.activation.effects() {
            for s in &effect.bubble_states {
                if s.visible && s.opacity > 0.0 {
                    self.alpha_sprites.push(SpriteInstance {
                        center: (effect.anchor + s.position).to_array(),
                        // sphere radius to billboard width
                        scale: s.scale * 2.0,
                        color: GROUND_BUBBLE_COLOR,
                        opacity: s.opacity,
                    });
                }
            }
            for s in &effect.dust_states {
                if s.visible && s.opacity > 0.0 {
                    self.alpha_sprites.push(SpriteInstance {
                        center: (effect.anchor + s.position).to_array(),
                        scale: s.scale * 2.0,
                        color: GROUND_DUST_COLOR,
                        opacity: s.opacity,
                    });
                }
            }
        }
        for b in &self.bubbles.bubbles {
            self.alpha_sprites.push(SpriteInstance {
                center: b.position.to_array(),
                scale: b.scale * 2.0,
                color: AMBIENT_BUBBLE_COLOR,
                opacity: AMBIENT_BUBBLE_OPACITY,
            });
        }

        self.additive_sprites.clear();
        for p in &self.particles.positions {
            self.additive_sprites.push(SpriteInstance {
                center: p.to_array(),
                scale: 0.08,
                color: DRIFT_PARTICLE_COLOR,
                opacity: DRIFT_PARTICLE_OPACITY,
            });
        }

        self.rays.clear();
        for i in 0..self.sun_rays.rays.len() {
            let center = self.sun_rays.ray_position(i, t, pose.eye.z);
            self.rays.push(RayInstance {
                center: center.to_array(),
                width: self.sun_rays.rays[i].width,
            });
        }

        if let Some(g) = &mut self.gpu {
            let w = self.canvas.width();
            let h = self.canvas.height();
            g.resize_if_needed(w, h);
            let proj = Mat4::perspective_rh(
                CAMERA_FOV_DEGREES.to_radians(),
                g.aspect(),
                CAMERA_NEAR,
                CAMERA_FAR,
            );
            let input = FrameInput {
                globals: render::build_globals(view, proj, pose.eye, t),
                alpha_sprites: &self.alpha_sprites,
                additive_sprites: &self.additive_sprites,
                rays: &self.rays,
            };
            if let Err(e) = g.render(&input) {
                log::error!("render error: {:?}", e);
            }
        }
    }

    fn step_loader(&mut self, now: f64) {
        match self.loader {
            LoaderPhase::Waiting => {
                if let GateState::Complete { timed_out } = self.gate.borrow_mut().poll(now) {
                    if timed_out {
                        log::info!("loader released by fallback deadline");
                    }
                    self.overlay.begin_loader_fade();
                    let mut nav = self.nav.borrow_mut();
                    nav.unlock();
                    self.overlay.set_active_section(nav.active());
                    self.loader = LoaderPhase::Fading { since: now };
                }
            }
            LoaderPhase::Fading { since } => {
                if now - since >= LOADER_FADE_SEC {
                    self.overlay.dismiss_loader();
                    self.loader = LoaderPhase::Done;
                }
            }
            LoaderPhase::Done => {}
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let Some(w) = web::window() {
            let _ = w.request_animation_frame(
                tick_clone
                    .borrow()
                    .as_ref()
                    .unwrap()
                    .as_ref()
                    .unchecked_ref(),
            );
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        let _ = w.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}
