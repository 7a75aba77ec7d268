//! Ambient water life: slow-rising bubbles and drifting marine-snow
//! particles. Both fields use `rand` for their presentation jitter; their
//! exact positions are not part of the deterministic scene contract.
//!
//! Per-frame increments are tuned for 60 fps, so updates scale by
//! `dt * 60` to stay frame-rate independent.

use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

pub const AMBIENT_BUBBLE_COUNT: usize = 30;
pub const BUBBLE_SAND_Y: f32 = -1.5;
pub const BUBBLE_MAX_Y: f32 = 12.0;

pub const DRIFT_PARTICLE_COUNT: usize = 120;
pub const PARTICLE_SPREAD_X: f32 = 80.0;
pub const PARTICLE_SPREAD_Y: f32 = 16.0;
pub const PARTICLE_SPREAD_Z: f32 = 90.0;
pub const PARTICLE_BASE_Y: f32 = -2.0;

#[derive(Clone, Copy, Debug)]
pub struct Bubble {
    pub position: Vec3,
    pub speed: f32,
    pub drift_freq: f32,
    pub drift_amp: f32,
    pub phase: f32,
    pub scale: f32,
}

/// Rising bubble field over the whole reef.
pub struct BubbleField {
    pub bubbles: Vec<Bubble>,
}

impl BubbleField {
    pub fn new<R: Rng>(rng: &mut R) -> BubbleField {
        let bubbles = (0..AMBIENT_BUBBLE_COUNT)
            .map(|_| Bubble {
                position: Vec3::new(
                    (rng.gen::<f32>() - 0.5) * 60.0,
                    BUBBLE_SAND_Y + rng.gen::<f32>() * (BUBBLE_MAX_Y - BUBBLE_SAND_Y),
                    -rng.gen::<f32>() * 60.0,
                ),
                speed: 0.008 + rng.gen::<f32>() * 0.014,
                drift_freq: 0.3 + rng.gen::<f32>() * 0.8,
                drift_amp: 0.002 + rng.gen::<f32>() * 0.004,
                phase: rng.gen::<f32>() * TAU,
                scale: 0.03 + rng.gen::<f32>() * 0.06,
            })
            .collect();
        BubbleField { bubbles }
    }

    pub fn update<R: Rng>(&mut self, time: f32, dt: f32, rng: &mut R) {
        let step = dt * 60.0;
        for b in &mut self.bubbles {
            b.position.y += b.speed * step;
            b.position.x += (time * b.drift_freq + b.phase).sin() * b.drift_amp * step;
            if b.position.y > BUBBLE_MAX_Y {
                // respawn at the sand with a fresh lateral position
                b.position.y = BUBBLE_SAND_Y;
                b.position.x = (rng.gen::<f32>() - 0.5) * 60.0;
                b.position.z = -rng.gen::<f32>() * 60.0;
            }
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct ParticleSeed {
    drift: Vec3,
    freq_x: f32,
    freq_y: f32,
    phase: f32,
}

/// Marine-snow point field; particles wander on sine curves and wrap at the
/// bounds so the volume around the camera never empties.
pub struct ParticleField {
    pub positions: Vec<Vec3>,
    seeds: Vec<ParticleSeed>,
}

impl ParticleField {
    pub fn new<R: Rng>(rng: &mut R) -> ParticleField {
        let mut positions = Vec::with_capacity(DRIFT_PARTICLE_COUNT);
        let mut seeds = Vec::with_capacity(DRIFT_PARTICLE_COUNT);
        for _ in 0..DRIFT_PARTICLE_COUNT {
            positions.push(Vec3::new(
                (rng.gen::<f32>() - 0.5) * PARTICLE_SPREAD_X,
                PARTICLE_BASE_Y + rng.gen::<f32>() * PARTICLE_SPREAD_Y,
                -rng.gen::<f32>() * PARTICLE_SPREAD_Z,
            ));
            seeds.push(ParticleSeed {
                drift: Vec3::new(
                    (rng.gen::<f32>() - 0.5) * 0.003,
                    (rng.gen::<f32>() - 0.5) * 0.002,
                    (rng.gen::<f32>() - 0.5) * 0.002,
                ),
                freq_x: 0.1 + rng.gen::<f32>() * 0.3,
                freq_y: 0.08 + rng.gen::<f32>() * 0.2,
                phase: rng.gen::<f32>() * TAU,
            });
        }
        ParticleField { positions, seeds }
    }

    pub fn update(&mut self, time: f32, dt: f32) {
        let step = dt * 60.0;
        for (p, s) in self.positions.iter_mut().zip(&self.seeds) {
            p.x += (time * s.freq_x + s.phase).sin() * s.drift.x * step;
            p.y += (time * s.freq_y + s.phase).sin() * s.drift.y * step;
            p.z += s.drift.z * step;

            let half_x = PARTICLE_SPREAD_X / 2.0;
            if p.x > half_x {
                p.x = -half_x;
            } else if p.x < -half_x {
                p.x = half_x;
            }
            if p.y > PARTICLE_BASE_Y + PARTICLE_SPREAD_Y {
                p.y = PARTICLE_BASE_Y;
            } else if p.y < PARTICLE_BASE_Y {
                p.y = PARTICLE_BASE_Y + PARTICLE_SPREAD_Y;
            }
            if p.z > 0.0 {
                p.z = -PARTICLE_SPREAD_Z;
            } else if p.z < -PARTICLE_SPREAD_Z {
                p.z = 0.0;
            }
        }
    }
}
