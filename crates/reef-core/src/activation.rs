//! Section activation: each effect-bearing section owns a small ground
//! effect (two rising bubbles plus a puff of sand dust) that eases in when
//! the section becomes active and eases out when the camera leaves.

use crate::sections::{SectionDescriptor, SECTIONS};
use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

pub const GROUND_BUBBLE_COUNT: usize = 2;
pub const GROUND_DUST_COUNT: usize = 5;

/// Below this progress an inactive effect is fully dormant and skips its
/// per-sprite update.
pub const DORMANT_THRESHOLD: f32 = 0.005;

/// Static per-bubble parameters, randomized once at startup. This is
/// presentation jitter, not part of the deterministic layout contract.
#[derive(Clone, Copy, Debug)]
pub struct GroundBubble {
    pub x: f32,
    pub z: f32,
    pub speed: f32,
    pub wobble_phase: f32,
    pub size: f32,
    pub delay: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct GroundDust {
    pub x: f32,
    pub z: f32,
    pub speed: f32,
    pub size: f32,
}

/// Resolved per-frame sprite state handed to the renderer.
#[derive(Clone, Copy, Debug, Default)]
pub struct SpriteState {
    pub visible: bool,
    pub position: Vec3,
    pub scale: f32,
    pub opacity: f32,
}

/// One section's ground effect.
pub struct GroundEffect {
    /// World anchor: section position dropped to the seabed, pushed back
    /// toward the scene.
    pub anchor: Vec3,
    pub progress: f32,
    bubbles: [GroundBubble; GROUND_BUBBLE_COUNT],
    dust: [GroundDust; GROUND_DUST_COUNT],
    pub bubble_states: [SpriteState; GROUND_BUBBLE_COUNT],
    pub dust_states: [SpriteState; GROUND_DUST_COUNT],
}

impl GroundEffect {
    pub fn new<R: Rng>(section: &SectionDescriptor, rng: &mut R) -> GroundEffect {
        let bubbles = std::array::from_fn(|i| GroundBubble {
            x: (rng.gen::<f32>() - 0.5) * 2.0,
            z: (rng.gen::<f32>() - 0.5) * 2.0,
            speed: 0.25 + rng.gen::<f32>() * 0.3,
            wobble_phase: rng.gen::<f32>() * TAU,
            size: 0.15 + rng.gen::<f32>() * 0.1,
            delay: i as f32 * 0.2,
        });
        let dust = std::array::from_fn(|_| GroundDust {
            x: (rng.gen::<f32>() - 0.5) * 2.5,
            z: (rng.gen::<f32>() - 0.5) * 2.5,
            speed: 0.08 + rng.gen::<f32>() * 0.12,
            size: 0.04 + rng.gen::<f32>() * 0.03,
        });
        GroundEffect {
            anchor: Vec3::new(section.position.x, -2.0, section.position.z - 12.0),
            progress: 0.0,
            bubbles,
            dust,
            bubble_states: Default::default(),
            dust_states: Default::default(),
        }
    }

    /// Ease progress toward the active target and refresh sprite states.
    /// Positions are local to the anchor.
    pub fn update(&mut self, active: bool, time: f32, dt: f32) {
        let target = if active { 1.0 } else { 0.0 };
        self.progress += (target - self.progress) * dt * 3.0;

        let p = self.progress;
        if p < DORMANT_THRESHOLD && !active {
            for s in self.bubble_states.iter_mut().chain(self.dust_states.iter_mut()) {
                s.visible = false;
            }
            return;
        }

        for (i, d) in self.bubbles.iter().enumerate() {
            let local_p = ((p - d.delay * 0.3) / 0.7).clamp(0.0, 1.0);
            let state = &mut self.bubble_states[i];
            state.visible = local_p > 0.01;
            if !state.visible {
                continue;
            }
            // looping rise, wobble, fade near the top of the column
            let cycle = (time * d.speed + d.delay) % 4.0;
            let y = cycle * 1.2;
            state.position = Vec3::new(
                d.x + (time * 1.8 + d.wobble_phase).sin() * 0.08,
                y,
                d.z + (time * 1.4 + d.wobble_phase).cos() * 0.06,
            );
            let fade_up = if y > 3.0 {
                (1.0 - (y - 3.0) / 1.5).max(0.0)
            } else {
                1.0
            };
            state.opacity = local_p * fade_up * 0.7;
            state.scale = d.size * (0.8 + (time * 2.0 + i as f32).sin() * 0.15);
        }

        for (i, d) in self.dust.iter().enumerate() {
            let state = &mut self.dust_states[i];
            state.visible = p > 0.15;
            if !state.visible {
                continue;
            }
            let y = p * d.speed * 1.5 + (time * 0.8 + i as f32).sin() * 0.03;
            state.position = Vec3::new(d.x, y, d.z);
            state.opacity = (p * 0.8).min(0.35) * (1.0 - y / 1.2).max(0.0);
            state.scale = d.size;
        }
    }
}

/// Drives one ground effect per effect-bearing section.
pub struct ActivationController {
    effects: Vec<(usize, GroundEffect)>,
    pub enabled: bool,
}

impl ActivationController {
    pub fn new<R: Rng>(rng: &mut R) -> ActivationController {
        let effects = SECTIONS
            .iter()
            .enumerate()
            .filter(|(_, s)| crate::sections::is_effect_bearing(s.id))
            .map(|(i, s)| (i, GroundEffect::new(s, rng)))
            .collect();
        ActivationController {
            effects,
            enabled: true,
        }
    }

    pub fn update(&mut self, active_section: usize, time: f32, dt: f32) {
        for (index, effect) in self.effects.iter_mut() {
            let active = self.enabled && *index == active_section;
            effect.update(active, time, dt);
        }
    }

    pub fn effects(&self) -> impl Iterator<Item = &GroundEffect> {
        self.effects.iter().map(|(_, e)| e)
    }
}
