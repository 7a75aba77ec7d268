//! Indexed triangle-mesh substrate for the procedural coral builders.
//!
//! Primitives here are deliberately low-poly; the organic look comes from
//! per-vertex jitter (`MeshData::deform`) followed by a normal recompute,
//! not from dense tessellation.

use crate::rng::SeededRng;
use glam::{Mat3, Mat4, Vec3};

#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Jitter every vertex by `(r - 0.5) * amount` per axis, then recompute
    /// normals. Draw order is x, y, z per vertex; changing it would shift
    /// every later draw in the stream.
    pub fn deform(&mut self, rng: &mut SeededRng, amount: f32) {
        for p in &mut self.positions {
            p.x += (rng.next_f32() - 0.5) * amount;
            p.y += (rng.next_f32() - 0.5) * amount;
            p.z += (rng.next_f32() - 0.5) * amount;
        }
        self.compute_normals();
    }

    /// Area-weighted smooth vertex normals.
    pub fn compute_normals(&mut self) {
        self.normals.clear();
        self.normals.resize(self.positions.len(), Vec3::ZERO);
        for tri in self.indices.chunks_exact(3) {
            let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let face = (self.positions[b] - self.positions[a])
                .cross(self.positions[c] - self.positions[a]);
            self.normals[a] += face;
            self.normals[b] += face;
            self.normals[c] += face;
        }
        for n in &mut self.normals {
            *n = n.normalize_or_zero();
            if *n == Vec3::ZERO {
                *n = Vec3::Y;
            }
        }
    }

    pub fn transform(&mut self, mat: Mat4) {
        let normal_mat = Mat3::from_mat4(mat).inverse().transpose();
        for p in &mut self.positions {
            *p = mat.transform_point3(*p);
        }
        for n in &mut self.normals {
            *n = (normal_mat * *n).normalize_or_zero();
        }
    }

    pub fn merge(&mut self, other: &MeshData) {
        let base = self.positions.len() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.indices.extend(other.indices.iter().map(|i| i + base));
    }
}

/// Open-ended cylinder centered at the origin, y in `[-height/2, height/2]`.
pub fn cylinder(
    radius_top: f32,
    radius_bottom: f32,
    height: f32,
    radial_segments: u32,
    height_segments: u32,
) -> MeshData {
    let mut mesh = MeshData::default();
    let radial = radial_segments.max(3);
    let rings = height_segments.max(1);
    for ri in 0..=rings {
        let v = ri as f32 / rings as f32;
        let r = radius_bottom + (radius_top - radius_bottom) * v;
        let y = -height / 2.0 + v * height;
        for si in 0..radial {
            let a = si as f32 / radial as f32 * std::f32::consts::TAU;
            mesh.positions.push(Vec3::new(a.cos() * r, y, a.sin() * r));
        }
    }
    for ri in 0..rings {
        for si in 0..radial {
            let a = ri * radial + si;
            let b = ri * radial + (si + 1) % radial;
            let c = a + radial;
            let d = b + radial;
            mesh.indices.extend_from_slice(&[a, c, b, b, c, d]);
        }
    }
    mesh.compute_normals();
    mesh
}

/// Latitude/longitude sphere.
pub fn uv_sphere(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let mut mesh = MeshData::default();
    let w = width_segments.max(3);
    let h = height_segments.max(2);
    for ri in 0..=h {
        let phi = std::f32::consts::PI * ri as f32 / h as f32;
        for si in 0..w {
            let theta = std::f32::consts::TAU * si as f32 / w as f32;
            mesh.positions.push(Vec3::new(
                radius * phi.sin() * theta.cos(),
                radius * phi.cos(),
                radius * phi.sin() * theta.sin(),
            ));
        }
    }
    for ri in 0..h {
        for si in 0..w {
            let a = ri * w + si;
            let b = ri * w + (si + 1) % w;
            let c = a + w;
            let d = b + w;
            if ri > 0 {
                mesh.indices.extend_from_slice(&[a, c, b]);
            }
            if ri + 1 < h {
                mesh.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }
    mesh.compute_normals();
    mesh
}

/// Flat disc in the XY plane, facing +Z. Standing upright when unrotated,
/// which is what the fan coral wants.
pub fn disc(radius: f32, segments: u32) -> MeshData {
    let mut mesh = MeshData::default();
    let n = segments.max(3);
    mesh.positions.push(Vec3::ZERO);
    for si in 0..=n {
        let a = si as f32 / n as f32 * std::f32::consts::TAU;
        mesh.positions
            .push(Vec3::new(a.cos() * radius, a.sin() * radius, 0.0));
    }
    for si in 0..n {
        mesh.indices.extend_from_slice(&[0, si + 1, si + 2]);
    }
    mesh.compute_normals();
    mesh
}

const PHI: f32 = 1.618_034;
const INV_PHI: f32 = 1.0 / PHI;

#[rustfmt::skip]
const DODECA_VERTS: [[f32; 3]; 20] = [
    [-1.0, -1.0, -1.0], [-1.0, -1.0, 1.0], [-1.0, 1.0, -1.0], [-1.0, 1.0, 1.0],
    [1.0, -1.0, -1.0], [1.0, -1.0, 1.0], [1.0, 1.0, -1.0], [1.0, 1.0, 1.0],
    [0.0, -INV_PHI, -PHI], [0.0, -INV_PHI, PHI], [0.0, INV_PHI, -PHI], [0.0, INV_PHI, PHI],
    [-INV_PHI, -PHI, 0.0], [-INV_PHI, PHI, 0.0], [INV_PHI, -PHI, 0.0], [INV_PHI, PHI, 0.0],
    [-PHI, 0.0, -INV_PHI], [PHI, 0.0, -INV_PHI], [-PHI, 0.0, INV_PHI], [PHI, 0.0, INV_PHI],
];

#[rustfmt::skip]
const DODECA_INDICES: [u32; 108] = [
    3, 11, 7, 3, 7, 15, 3, 15, 13,
    7, 19, 17, 7, 17, 6, 7, 6, 15,
    17, 4, 8, 17, 8, 10, 17, 10, 6,
    8, 0, 16, 8, 16, 2, 8, 2, 10,
    0, 12, 1, 0, 1, 18, 0, 18, 16,
    6, 10, 2, 6, 2, 13, 6, 13, 15,
    2, 16, 18, 2, 18, 3, 2, 3, 13,
    18, 1, 9, 18, 9, 11, 18, 11, 3,
    4, 14, 12, 4, 12, 0, 4, 0, 8,
    11, 9, 5, 11, 5, 19, 11, 19, 7,
    19, 5, 14, 19, 14, 4, 19, 4, 17,
    1, 12, 14, 1, 14, 5, 1, 5, 9,
];

#[rustfmt::skip]
const ICOSA_VERTS: [[f32; 3]; 12] = [
    [-1.0, PHI, 0.0], [1.0, PHI, 0.0], [-1.0, -PHI, 0.0], [1.0, -PHI, 0.0],
    [0.0, -1.0, PHI], [0.0, 1.0, PHI], [0.0, -1.0, -PHI], [0.0, 1.0, -PHI],
    [PHI, 0.0, -1.0], [PHI, 0.0, 1.0], [-PHI, 0.0, -1.0], [-PHI, 0.0, 1.0],
];

#[rustfmt::skip]
const ICOSA_INDICES: [u32; 60] = [
    0, 11, 5, 0, 5, 1, 0, 1, 7, 0, 7, 10, 0, 10, 11,
    1, 5, 9, 5, 11, 4, 11, 10, 2, 10, 7, 6, 7, 1, 8,
    3, 9, 4, 3, 4, 2, 3, 2, 6, 3, 6, 8, 3, 8, 9,
    4, 9, 5, 2, 4, 11, 6, 2, 10, 8, 6, 7, 9, 8, 1,
];

/// Rock-like polyhedron: dodecahedron projected to `radius`, optionally
/// midpoint-subdivided `detail` times.
pub fn dodecahedron(radius: f32, detail: u32) -> MeshData {
    polyhedron(&DODECA_VERTS, &DODECA_INDICES, radius, detail)
}

/// Icosahedron-based sphere approximation; `detail` midpoint subdivisions.
pub fn icosphere(radius: f32, detail: u32) -> MeshData {
    polyhedron(&ICOSA_VERTS, &ICOSA_INDICES, radius, detail)
}

fn polyhedron(verts: &[[f32; 3]], indices: &[u32], radius: f32, detail: u32) -> MeshData {
    let mut mesh = MeshData {
        positions: verts.iter().map(|v| Vec3::from(*v)).collect(),
        normals: Vec::new(),
        indices: indices.to_vec(),
    };
    for _ in 0..detail {
        subdivide(&mut mesh);
    }
    for p in &mut mesh.positions {
        *p = p.normalize_or_zero() * radius;
    }
    mesh.compute_normals();
    mesh
}

/// Split every triangle into four, sharing midpoint vertices between
/// neighboring faces.
fn subdivide(mesh: &mut MeshData) {
    use fnv::FnvHashMap;
    let mut midpoints: FnvHashMap<(u32, u32), u32> = FnvHashMap::default();
    let mut new_indices = Vec::with_capacity(mesh.indices.len() * 4);
    let old_indices = std::mem::take(&mut mesh.indices);
    let mut midpoint = |a: u32, b: u32, positions: &mut Vec<Vec3>| -> u32 {
        let key = (a.min(b), a.max(b));
        *midpoints.entry(key).or_insert_with(|| {
            let m = (positions[a as usize] + positions[b as usize]) * 0.5;
            positions.push(m);
            positions.len() as u32 - 1
        })
    };
    for tri in old_indices.chunks_exact(3) {
        let (a, b, c) = (tri[0], tri[1], tri[2]);
        let ab = midpoint(a, b, &mut mesh.positions);
        let bc = midpoint(b, c, &mut mesh.positions);
        let ca = midpoint(c, a, &mut mesh.positions);
        new_indices.extend_from_slice(&[a, ab, ca, ab, b, bc, ca, bc, c, ab, bc, ca]);
    }
    mesh.indices = new_indices;
}

/// Scallop shell valve — fan-shaped cupped grid with radial ridges and a
/// wavy rim. The fan opens in the XZ plane with the hinge toward -z; y is
/// the cupping axis.
pub fn scallop_valve(rng: &mut SeededRng, radius: f32, segments: u32, rings: u32) -> MeshData {
    let mut mesh = MeshData::default();
    let fan_angle = std::f32::consts::PI * 1.15; // slightly wider than a semicircle
    let start_angle = -fan_angle / 2.0;
    let ridge_count = 13.0;

    for ri in 0..=rings {
        let r_frac = ri as f32 / rings as f32;
        let r = r_frac * radius;
        // lift edges, depress centre
        let cup = -r_frac.powf(1.6) * 0.12;
        for si in 0..=segments {
            let s_frac = si as f32 / segments as f32;
            let angle = start_angle + s_frac * fan_angle;
            let x = angle.cos() * r;
            let z = angle.sin() * r;
            let ridge = (angle * ridge_count).sin() * 0.008 * r_frac * r_frac;
            let edge_wave = if r_frac > 0.85 {
                (angle * ridge_count).sin() * 0.015 * ((r_frac - 0.85) / 0.15)
            } else {
                0.0
            };
            let wobble = (rng.next_f32() - 0.5) * 0.003 * r_frac;
            mesh.positions.push(Vec3::new(x, cup + ridge + edge_wave + wobble, z));
        }
    }

    let verts_per_ring = segments + 1;
    for ri in 0..rings {
        for si in 0..segments {
            let a = ri * verts_per_ring + si;
            let b = a + 1;
            let c = a + verts_per_ring;
            let d = c + 1;
            mesh.indices.extend_from_slice(&[a, c, b, b, c, d]);
        }
    }
    mesh.compute_normals();
    mesh
}
