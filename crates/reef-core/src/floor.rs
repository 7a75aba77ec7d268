//! Ocean floor model: the analytic dune height field, the fog curve, the
//! caustic pattern (mirrored in the shader), the floor grid mesh and the
//! baked sand maps.
//!
//! The height field and caustics also run on the GPU; the CPU versions here
//! are the reference used for anchoring objects to the seabed and for tests.

use crate::constants::{
    FLOOR_PLANE_LENGTH, FLOOR_PLANE_SEGMENTS, FLOOR_PLANE_WIDTH, FLOOR_PLANE_Z_CENTER, FLOOR_Y,
    FOG_FAR, FOG_NEAR,
};
use crate::rng::TextureRng;
use glam::{Vec2, Vec3};

/// Seabed elevation above `FLOOR_Y` at a world XZ position. Four stacked
/// sine octaves: broad dunes, secondary dunes, ripples, fine grain.
pub fn elevation(x: f32, z: f32) -> f32 {
    let dune1 = (x * 0.15).sin() * (z * 0.12).cos() * 0.3;
    let dune2 = (x * 0.4 + 1.0).sin() * (z * 0.3 + 0.5).cos() * 0.15;
    let ripple = (x * 1.5 + z).sin() * 0.04;
    let fine = (x * 4.0).sin() * (z * 3.5).cos() * 0.015;
    dune1 + dune2 + ripple + fine
}

/// World-space seabed height at XZ.
pub fn floor_height(x: f32, z: f32) -> f32 {
    FLOOR_Y + elevation(x, z)
}

#[inline]
fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Fog blend factor at a camera distance; 0 is clear, 1 is fully fogged.
pub fn fog_factor(dist: f32) -> f32 {
    smoothstep(FOG_NEAR, FOG_FAR, dist)
}

/// Animated caustic intensity. Two copies of this pattern at different
/// scales and time rates are summed in the shader.
pub fn caustic_pattern(uv: Vec2, time: f32) -> f32 {
    let c1 = (uv.x * 3.5 + time * 0.4).sin() * (uv.y * 2.8 - time * 0.3).cos();
    let c2 = (uv.x * 2.2 - time * 0.5 + 1.5).sin() * (uv.y * 3.8 + time * 0.35).cos();
    let c3 = ((uv.x + uv.y) * 2.5 + time * 0.25).sin();
    let c4 = (uv.x * 1.8 - uv.y * 2.2 + time * 0.45).cos();
    (((c1 + c2 + c3 + c4).abs()) * 0.25).powf(1.8)
}

/// Combined two-layer caustic term as the fragment shader computes it.
pub fn caustics_total(world_xz: Vec2, time: f32) -> f32 {
    let c_uv = world_xz * 0.12;
    let a = caustic_pattern(c_uv, time);
    let b = caustic_pattern(c_uv * 1.3 + Vec2::splat(0.5), time * 0.8);
    (a + b * 0.5) * 0.4
}

/// Flat floor grid in world space; displacement happens in the vertex
/// shader so the same height field animates cheaply.
pub struct FloorGrid {
    pub positions: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub indices: Vec<u32>,
}

pub fn floor_grid() -> FloorGrid {
    let segs = FLOOR_PLANE_SEGMENTS;
    let verts_per_side = segs + 1;
    let mut positions = Vec::with_capacity((verts_per_side * verts_per_side) as usize);
    let mut uvs = Vec::with_capacity(positions.capacity());
    for iz in 0..verts_per_side {
        let fz = iz as f32 / segs as f32;
        let z = FLOOR_PLANE_Z_CENTER + (fz - 0.5) * FLOOR_PLANE_LENGTH;
        for ix in 0..verts_per_side {
            let fx = ix as f32 / segs as f32;
            let x = (fx - 0.5) * FLOOR_PLANE_WIDTH;
            positions.push(Vec3::new(x, FLOOR_Y, z));
            uvs.push(Vec2::new(fx, fz));
        }
    }
    let mut indices = Vec::with_capacity((segs * segs * 6) as usize);
    for iz in 0..segs {
        for ix in 0..segs {
            let a = iz * verts_per_side + ix;
            let b = a + 1;
            let c = a + verts_per_side;
            let d = c + 1;
            indices.extend_from_slice(&[a, c, b, b, c, d]);
        }
    }
    FloorGrid {
        positions,
        uvs,
        indices,
    }
}

// ---------------- baked sand maps ----------------

/// RGBA8 pixel buffer baked on the CPU and uploaded as a repeating texture.
pub struct PixelMap {
    pub size: u32,
    pub data: Vec<u8>,
}

impl PixelMap {
    fn filled(size: u32, rgb: [u8; 3]) -> PixelMap {
        let mut data = Vec::with_capacity((size * size * 4) as usize);
        for _ in 0..size * size {
            data.extend_from_slice(&[rgb[0], rgb[1], rgb[2], 255]);
        }
        PixelMap { size, data }
    }

    #[inline]
    fn idx(&self, x: u32, y: u32) -> usize {
        ((y * self.size + x) * 4) as usize
    }

    /// Alpha-blend a color over one pixel.
    fn blend(&mut self, x: i32, y: i32, rgb: [u8; 3], alpha: f32) {
        let s = self.size as i32;
        // wrap so the map tiles seamlessly
        let x = x.rem_euclid(s) as u32;
        let y = y.rem_euclid(s) as u32;
        let i = self.idx(x, y);
        for c in 0..3 {
            let src = rgb[c] as f32;
            let dst = self.data[i + c] as f32;
            self.data[i + c] = (dst + (src - dst) * alpha).clamp(0.0, 255.0) as u8;
        }
    }

    /// Soft-edged disc stamp.
    fn stamp_disc(&mut self, cx: f32, cy: f32, radius: f32, rgb: [u8; 3], alpha: f32) {
        let r = radius.max(0.5);
        let r2 = r * r;
        let lo_x = (cx - r).floor() as i32;
        let hi_x = (cx + r).ceil() as i32;
        let lo_y = (cy - r).floor() as i32;
        let hi_y = (cy + r).ceil() as i32;
        for py in lo_y..=hi_y {
            for px in lo_x..=hi_x {
                let dx = px as f32 + 0.5 - cx;
                let dy = py as f32 + 0.5 - cy;
                let d2 = dx * dx + dy * dy;
                if d2 <= r2 {
                    let falloff = 1.0 - (d2 / r2).sqrt();
                    self.blend(px, py, rgb, alpha * falloff.clamp(0.0, 1.0));
                }
            }
        }
    }

    /// Radial gradient fill across the whole map from a list of
    /// (stop, color) pairs; stops are fractions of the gradient radius.
    fn fill_radial(&mut self, stops: &[(f32, [u8; 3])]) {
        let size = self.size as f32;
        let cx = size / 2.0;
        let cy = size / 2.0;
        let max_r = size * 0.7;
        for y in 0..self.size {
            for x in 0..self.size {
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                let t = ((dx * dx + dy * dy).sqrt() / max_r).clamp(0.0, 1.0);
                let rgb = sample_stops(stops, t);
                let i = self.idx(x, y);
                self.data[i] = rgb[0];
                self.data[i + 1] = rgb[1];
                self.data[i + 2] = rgb[2];
            }
        }
    }
}

fn sample_stops(stops: &[(f32, [u8; 3])], t: f32) -> [u8; 3] {
    let mut prev = stops[0];
    for &stop in stops {
        if t <= stop.0 {
            let span = stop.0 - prev.0;
            let f = if span > 0.0 { (t - prev.0) / span } else { 0.0 };
            let mut rgb = [0u8; 3];
            for c in 0..3 {
                rgb[c] =
                    (prev.1[c] as f32 + (stop.1[c] as f32 - prev.1[c] as f32) * f) as u8;
            }
            return rgb;
        }
        prev = stop;
    }
    stops[stops.len() - 1].1
}

/// Warm golden sand color map with grain noise, dark pebble specks and
/// subtle highlight grains. Size 1024; seed 42.
pub fn bake_sand_color_map(size: u32) -> PixelMap {
    let mut map = PixelMap::filled(size, [0, 0, 0]);
    map.fill_radial(&[
        (0.0, [0xC4, 0xA0, 0x6A]),
        (0.4, [0xB8, 0x90, 0x58]),
        (0.8, [0xA8, 0x80, 0x50]),
        (1.0, [0x98, 0x70, 0x45]),
    ]);

    let mut rand = TextureRng::new(42);
    for p in 0..(size * size) as usize {
        let noise = (rand.next_f32() - 0.5) * 30.0;
        let i = p * 4;
        map.data[i] = (map.data[i] as f32 + noise).clamp(0.0, 220.0) as u8;
        map.data[i + 1] = (map.data[i + 1] as f32 + noise * 0.8).clamp(0.0, 190.0) as u8;
        map.data[i + 2] = (map.data[i + 2] as f32 + noise * 0.5).clamp(0.0, 150.0) as u8;
    }

    let w = size as f32;
    for _ in 0..3000 {
        let x = rand.next_f32() * w;
        let y = rand.next_f32() * w;
        let r = rand.next_f32() * 2.0 + 0.5;
        let alpha = rand.next_f32() * 0.35;
        map.stamp_disc(x, y, r, [60, 45, 25], alpha);
    }
    for _ in 0..1500 {
        let x = rand.next_f32() * w;
        let y = rand.next_f32() * w;
        let r = rand.next_f32() * 1.5 + 0.3;
        let alpha = rand.next_f32() * 0.2;
        map.stamp_disc(x, y, r, [210, 185, 140], alpha);
    }
    map
}

/// Tangent-space normal map: fine-grain bump noise plus horizontal current
/// ripples. Size 1024; seed 123.
pub fn bake_sand_normal_map(size: u32) -> PixelMap {
    let mut map = PixelMap::filled(size, [128, 128, 255]);

    let mut rand = TextureRng::new(123);
    for p in 0..(size * size) as usize {
        let nx = (rand.next_f32() - 0.5) * 30.0;
        let ny = (rand.next_f32() - 0.5) * 30.0;
        let i = p * 4;
        map.data[i] = (128.0 + nx).clamp(0.0, 255.0) as u8;
        map.data[i + 1] = (128.0 + ny).clamp(0.0, 255.0) as u8;
        map.data[i + 2] = (255.0 - nx.abs() - ny.abs()).clamp(200.0, 255.0) as u8;
    }

    // ripple strokes as runs of overlapping stamps along a sine wave
    let w = size as f32;
    for _ in 0..60 {
        let y = rand.next_f32() * w;
        let amplitude = rand.next_f32() * 3.0 + 1.0;
        let phase = rand.next_f32() * 2.0;
        let alpha = rand.next_f32() * 0.15 + 0.05;
        let width = rand.next_f32() * 3.0 + 1.0;
        let mut x = 0.0;
        while x < w {
            let wave = (x * 0.03 + phase).sin() * amplitude;
            map.stamp_disc(x, y + wave, width * 0.5, [140, 140, 255], alpha);
            x += 4.0;
        }
    }
    map
}

/// Greyscale roughness map: rough base with noise and smoother wet
/// patches. Size 512; seed 789.
pub fn bake_sand_roughness_map(size: u32) -> PixelMap {
    let mut map = PixelMap::filled(size, [0xCC, 0xCC, 0xCC]);

    let mut rand = TextureRng::new(789);
    for p in 0..(size * size) as usize {
        let noise = (rand.next_f32() - 0.5) * 60.0;
        let val = (200.0 + noise).clamp(120.0, 255.0) as u8;
        let i = p * 4;
        map.data[i] = val;
        map.data[i + 1] = val;
        map.data[i + 2] = val;
    }

    let w = size as f32;
    for _ in 0..20 {
        let x = rand.next_f32() * w;
        let y = rand.next_f32() * w;
        let r = rand.next_f32() * 40.0 + 20.0;
        map.stamp_disc(x, y, r, [80, 80, 80], 0.3);
    }
    map
}
