//! Camera-following lighting rig and sun-ray shafts.
//!
//! The lights travel with the camera so the seabed stays lit along the
//! whole journey; only their positions and intensities live here, the
//! shading terms are in the shader.

use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

// Sun-ray shaft config
pub const RAY_COUNT: usize = 12;
pub const RAY_HEIGHT: f32 = 28.0;
pub const RAY_SPREAD_X: f32 = 30.0;
pub const RAY_DEPTH: f32 = 40.0;

pub const SUN_COLOR: [f32; 3] = [0.7, 0.85, 1.0];
pub const SUN_INTENSITY: f32 = 3.0;
pub const AMBIENT_COLOR: [f32; 3] = [0.15, 0.3, 0.5];
pub const AMBIENT_INTENSITY: f32 = 0.6;
/// Resting intensity of the overhead accent fill; `lighting_state` sways
/// around it.
pub const ACCENT_BASE_INTENSITY: f32 = 0.6;

/// Per-frame light placement relative to the camera.
#[derive(Clone, Copy, Debug)]
pub struct LightingState {
    pub sun_position: Vec3,
    pub sun_target: Vec3,
    pub accent_position: Vec3,
    pub accent_intensity: f32,
}

/// Evaluate the rig for a camera z. Sun sways slowly so the caustic shadows
/// feel alive.
pub fn lighting_state(time: f32, camera_z: f32) -> LightingState {
    LightingState {
        sun_position: Vec3::new(
            5.0 + (time * 0.15).sin() * 2.0,
            15.0,
            camera_z - 5.0 + (time * 0.1).cos() * 2.0,
        ),
        sun_target: Vec3::new(0.0, 0.0, camera_z - 10.0),
        accent_position: Vec3::new(0.0, 10.0, camera_z - 5.0),
        accent_intensity: ACCENT_BASE_INTENSITY + (time * 0.3).sin() * 0.1,
    }
}

impl LightingState {
    /// Direction toward the sun for the floor and coral shading terms.
    pub fn sun_direction(&self) -> Vec3 {
        (self.sun_position - self.sun_target).normalize()
    }
}

#[derive(Clone, Copy, Debug)]
pub struct SunRay {
    pub x_base: f32,
    pub z_off: f32,
    pub width: f32,
    pub phase: f32,
    pub speed: f32,
    pub y_off: f32,
}

/// Tall translucent shafts hanging from the surface, swaying slowly and
/// following the camera in z.
pub struct SunRays {
    pub rays: Vec<SunRay>,
}

impl SunRays {
    pub fn new<R: Rng>(rng: &mut R) -> SunRays {
        let rays = (0..RAY_COUNT)
            .map(|_| SunRay {
                x_base: (rng.gen::<f32>() - 0.5) * RAY_SPREAD_X,
                z_off: (rng.gen::<f32>() - 0.5) * RAY_DEPTH,
                width: 0.8 + rng.gen::<f32>() * 1.8,
                phase: rng.gen::<f32>() * TAU,
                speed: 0.08 + rng.gen::<f32>() * 0.12,
                y_off: rng.gen::<f32>() * 3.0,
            })
            .collect();
        SunRays { rays }
    }

    /// Center position of a ray plane this frame.
    pub fn ray_position(&self, index: usize, time: f32, camera_z: f32) -> Vec3 {
        let r = &self.rays[index];
        let sway = (time * r.speed + r.phase).sin() * 1.8;
        Vec3::new(
            r.x_base + sway,
            RAY_HEIGHT * 0.5 - 2.0 + r.y_off,
            camera_z + r.z_off,
        )
    }
}
