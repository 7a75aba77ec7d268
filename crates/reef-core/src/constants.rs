//! Shared visual tuning constants used by both the core scene model and the
//! web frontend.

use crate::palette::hex;

// Scene layout
pub const FLOOR_Y: f32 = -2.0; // seabed height, everything anchors to this
pub const FLOOR_PLANE_WIDTH: f32 = 300.0;
pub const FLOOR_PLANE_LENGTH: f32 = 200.0;
pub const FLOOR_PLANE_SEGMENTS: u32 = 200;
pub const FLOOR_PLANE_Z_CENTER: f32 = -(FLOOR_PLANE_LENGTH / 2.0) + 20.0;

// Underwater atmosphere
pub const BACKGROUND_COLOR: [f32; 3] = hex(0x062A3E);
pub const FOG_COLOR: [f32; 3] = hex(0x062A3E);
pub const FOG_NEAR: f32 = 10.0;
pub const FOG_FAR: f32 = 60.0;

// Render surface
pub const MAX_DEVICE_PIXEL_RATIO: f64 = 1.5; // bounds GPU cost on dense displays
pub const CAMERA_FOV_DEGREES: f32 = 60.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 200.0;

// Loader sequencing (seconds)
pub const LOADER_FALLBACK_SEC: f64 = 1.8; // force reveal even if readiness never arrives
pub const LOADER_FADE_SEC: f64 = 1.2;

// Effect sprite colors
pub const GROUND_BUBBLE_COLOR: [f32; 3] = hex(0xB8E4F0);
pub const GROUND_DUST_COLOR: [f32; 3] = hex(0x8A7555);
pub const AMBIENT_BUBBLE_COLOR: [f32; 3] = hex(0xB0D8F0);
pub const DRIFT_PARTICLE_COLOR: [f32; 3] = hex(0x8EC8D8);

pub const AMBIENT_BUBBLE_OPACITY: f32 = 0.45;
pub const DRIFT_PARTICLE_OPACITY: f32 = 0.35;

// Master seed for the static decoration layout
pub const LAYOUT_MASTER_SEED: u32 = 42;
