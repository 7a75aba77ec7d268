//! Procedural coral builders.
//!
//! Each builder is a pure function of a seeded stream: the parameter set is
//! sampled in a fixed order, then the primitive meshes are jittered from the
//! same stream, so one seed always rebuilds the identical mesh. The draw
//! order inside each builder is part of that contract; reordering a sample
//! changes every value after it.

use crate::mesh::{self, MeshData};
use crate::palette::{self, hex};
use crate::rng::SeededRng;
use glam::{EulerRot, Mat4, Vec3};
use smallvec::SmallVec;
use std::f32::consts::TAU;

/// Closed set of builder kinds; placement indexes into this.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoralKind {
    Branching,
    Brain,
    Tube,
    Fan,
    Rock,
    Shell,
}

pub const CORAL_KIND_COUNT: usize = 6;

impl CoralKind {
    pub fn from_index(index: usize) -> CoralKind {
        match index % CORAL_KIND_COUNT {
            0 => CoralKind::Branching,
            1 => CoralKind::Brain,
            2 => CoralKind::Tube,
            3 => CoralKind::Fan,
            4 => CoralKind::Rock,
            _ => CoralKind::Shell,
        }
    }
}

/// Smallest dimension any sampled radius/height may take. Keeps degenerate
/// zero-size geometry out of the mesh even if ranges are retuned.
const MIN_DIMENSION: f32 = 1e-3;

#[inline]
fn sample_dim(rng: &mut SeededRng, lo: f32, hi: f32) -> f32 {
    rng.next_range(lo, hi).max(MIN_DIMENSION)
}

// ---------------- descriptors ----------------

#[derive(Clone, Debug)]
pub struct SubBranch {
    pub y_off: f32,
    pub lean: f32,
    pub angle: f32,
    pub height: f32,
    pub radius: f32,
}

#[derive(Clone, Debug)]
pub struct Branch {
    pub angle: f32,
    pub lean: f32,
    pub height: f32,
    pub radius_bottom: f32,
    pub radius_top: f32,
    pub twist: f32,
    pub subs: SmallVec<[SubBranch; 2]>,
}

#[derive(Clone, Debug)]
pub struct TubeParams {
    pub x: f32,
    pub z: f32,
    pub height: f32,
    pub radius_bottom: f32,
    pub lean: f32,
    pub use_accent: bool,
}

#[derive(Clone, Debug)]
pub struct PatchParams {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub size: f32,
}

/// Builder-specific randomized parameter set. Identical seed, identical
/// descriptor.
#[derive(Clone, Debug)]
pub enum GeometryDescriptor {
    Branching {
        rot_y: f32,
        branches: Vec<Branch>,
    },
    Brain {
        rot_y: f32,
        squash: f32,
    },
    Tube {
        rot_y: f32,
        tubes: Vec<TubeParams>,
    },
    Fan {
        rot_y: f32,
        tilt: f32,
    },
    Rock {
        rot_y: f32,
        patches: Vec<PatchParams>,
    },
    Shell {
        rot_y: f32,
        open_angle: f32,
        pearl_size: f32,
        pearl_off_y: f32,
        tilt: f32,
    },
}

// ---------------- mesh assembly ----------------

/// One placed coral, merged into a single colored mesh in instance-local
/// space (placement translation and scale are applied by the scene builder).
#[derive(Clone, Debug, Default)]
pub struct CoralMesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub colors: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl CoralMesh {
    fn push(&mut self, mut part: MeshData, color: [f32; 3], mat: Mat4) {
        part.transform(mat);
        let base = self.positions.len() as u32;
        self.colors
            .extend(std::iter::repeat(color).take(part.positions.len()));
        self.positions.extend_from_slice(&part.positions);
        self.normals.extend_from_slice(&part.normals);
        self.indices.extend(part.indices.iter().map(|i| i + base));
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }
}

#[inline]
fn euler(x: f32, y: f32, z: f32) -> Mat4 {
    Mat4::from_euler(EulerRot::XYZ, x, y, z)
}

#[inline]
fn at(x: f32, y: f32, z: f32) -> Mat4 {
    Mat4::from_translation(Vec3::new(x, y, z))
}

/// Build the complete instance-local mesh for one coral.
pub fn build(kind: CoralKind, seed: u32, color_index: usize) -> CoralMesh {
    let mut rng = SeededRng::new(seed);
    match kind {
        CoralKind::Branching => build_branching(&mut rng, color_index),
        CoralKind::Brain => build_brain(&mut rng, color_index),
        CoralKind::Tube => build_tube(&mut rng, color_index),
        CoralKind::Fan => build_fan(&mut rng, color_index),
        CoralKind::Rock => build_rock(&mut rng, color_index),
        CoralKind::Shell => build_shell(&mut rng),
    }
}

/// Irregular trunk plus asymmetric branches with occasional sub-branches;
/// staghorn-like silhouette.
fn build_branching(rng: &mut SeededRng, color_index: usize) -> CoralMesh {
    let pal = palette::palette(color_index);
    let rot_y = rng.next_f32() * TAU;

    let count = 4 + rng.next_index(4); // 4-7 branches
    let mut branches: Vec<Branch> = Vec::with_capacity(count);
    for i in 0..count {
        let angle = (i as f32 / count as f32) * TAU + (rng.next_f32() - 0.5) * 0.8;
        let lean = rng.next_range(0.2, 0.9);
        let height = sample_dim(rng, 0.4, 1.1);
        let radius_bottom = sample_dim(rng, 0.04, 0.08);
        let radius_top = (radius_bottom * rng.next_range(0.3, 0.7)).max(MIN_DIMENSION);
        let twist = (rng.next_f32() - 0.5) * 0.6;

        let mut subs = SmallVec::new();
        if rng.next_f32() > 0.3 {
            let sub_count = 1 + rng.next_index(2);
            for _ in 0..sub_count {
                subs.push(SubBranch {
                    y_off: rng.next_range(0.4, 0.8),
                    lean: rng.next_range(0.3, 0.8),
                    angle: rng.next_f32() * TAU,
                    height: sample_dim(rng, 0.2, 0.5),
                    radius: (radius_bottom * rng.next_range(0.3, 0.6)).max(MIN_DIMENSION),
                });
            }
        }
        branches.push(Branch {
            angle,
            lean,
            height,
            radius_bottom,
            radius_top,
            twist,
            subs,
        });
    }

    let mut trunk = mesh::cylinder(0.05, 0.1, 0.9, 7, 3);
    trunk.deform(rng, 0.03);

    let root = euler(0.0, rot_y, 0.0);
    let mut out = CoralMesh::default();
    // reef base rock
    out.push(mesh::dodecahedron(0.18, 0), pal.base, root * at(0.0, -0.1, 0.0));
    out.push(trunk, pal.base, root * at(0.0, 0.35, 0.0));

    for (i, br) in branches.iter().enumerate() {
        let group = root * at(0.0, 0.3 + i as f32 * 0.08, 0.0) * euler(br.lean, br.angle, br.twist);
        out.push(
            mesh::cylinder(br.radius_top, br.radius_bottom, br.height, 5, 2),
            pal.accent,
            group,
        );
        for s in &br.subs {
            let sub = group * at(0.0, br.height * s.y_off, 0.0) * euler(s.lean, s.angle, 0.0);
            out.push(
                mesh::cylinder(s.radius * 0.4, s.radius, s.height, 4, 1),
                pal.accent,
                sub,
            );
        }
    }
    out
}

/// Organic blob with an irregular surface; squashed vertically.
fn build_brain(rng: &mut SeededRng, color_index: usize) -> CoralMesh {
    let pal = palette::palette(color_index);
    let rot_y = rng.next_f32() * TAU;
    let squash = rng.next_range(0.45, 0.7);

    let mut blob = mesh::icosphere(0.45, 2);
    blob.deform(rng, 0.08);

    let root = euler(0.0, rot_y, 0.0);
    let mut out = CoralMesh::default();
    out.push(mesh::dodecahedron(0.22, 0), pal.base, root * at(0.0, -0.12, 0.0));
    out.push(
        blob,
        pal.base,
        root * at(0.0, 0.15, 0.0) * Mat4::from_scale(Vec3::new(1.0, squash, 1.0)),
    );
    out
}

/// Cluster of varying-height tubes rising from a rocky base.
fn build_tube(rng: &mut SeededRng, color_index: usize) -> CoralMesh {
    let pal = palette::palette(color_index);
    let rot_y = rng.next_f32() * TAU;

    let count = 5 + rng.next_index(5); // 5-9 tubes
    let mut tubes = Vec::with_capacity(count);
    for _ in 0..count {
        let angle = rng.next_f32() * TAU;
        let dist = rng.next_f32() * 0.18;
        tubes.push(TubeParams {
            x: angle.cos() * dist,
            z: angle.sin() * dist,
            height: sample_dim(rng, 0.25, 0.95),
            radius_bottom: sample_dim(rng, 0.025, 0.055),
            lean: (rng.next_f32() - 0.5) * 0.2,
            use_accent: rng.next_f32() > 0.5,
        });
    }

    let root = euler(0.0, rot_y, 0.0);
    let mut out = CoralMesh::default();
    out.push(mesh::dodecahedron(0.15, 0), pal.base, root * at(0.0, -0.05, 0.0));
    for tb in &tubes {
        let color = if tb.use_accent { pal.accent } else { pal.base };
        out.push(
            mesh::cylinder(tb.radius_bottom * 0.7, tb.radius_bottom, tb.height, 6, 1),
            color,
            root * at(tb.x, tb.height / 2.0, tb.z) * euler(tb.lean, 0.0, 0.0),
        );
    }
    out
}

/// Sea fan on a short stem; irregular disc edge from the deform pass.
fn build_fan(rng: &mut SeededRng, color_index: usize) -> CoralMesh {
    let pal = palette::palette(color_index);
    let rot_y = rng.next_f32() * TAU;
    let tilt = (rng.next_f32() - 0.5) * 0.15;

    let mut fan = mesh::disc(0.5, 12);
    fan.deform(rng, 0.08);

    let root = euler(0.0, rot_y, tilt);
    let mut out = CoralMesh::default();
    out.push(mesh::dodecahedron(0.12, 0), pal.base, root * at(0.0, -0.05, 0.0));
    out.push(
        mesh::cylinder(0.02, 0.04, 0.25, 5, 1),
        pal.base,
        root * at(0.0, 0.12, 0.0),
    );
    out.push(fan, pal.base, root * at(0.0, 0.5, 0.0));
    out
}

/// Irregular rock formation with encrusting coral patches.
fn build_rock(rng: &mut SeededRng, color_index: usize) -> CoralMesh {
    let pal = palette::palette(color_index);
    let rot_y = rng.next_f32() * TAU;

    let mut rock = mesh::dodecahedron(0.35, 1);
    rock.deform(rng, 0.1);

    let patch_count = 2 + rng.next_index(3);
    let mut patches = Vec::with_capacity(patch_count);
    for _ in 0..patch_count {
        patches.push(PatchParams {
            x: (rng.next_f32() - 0.5) * 0.3,
            y: rng.next_range(0.1, 0.35),
            z: (rng.next_f32() - 0.5) * 0.3,
            size: sample_dim(rng, 0.08, 0.18),
        });
    }

    let root = euler(0.0, rot_y, 0.0);
    let mut out = CoralMesh::default();
    out.push(
        rock,
        pal.base,
        root * at(0.0, 0.15, 0.0) * Mat4::from_scale(Vec3::new(1.0, 0.7, 1.0)),
    );
    for p in &patches {
        out.push(mesh::uv_sphere(p.size, 6, 4), pal.accent, root * at(p.x, p.y, p.z));
    }
    out
}

// Shell nacre tones; the shell keeps its warm colors regardless of the
// cluster palette.
const SHELL_COLOR: [f32; 3] = hex(0xF0D8C0);
const SHELL_OUTER_COLOR: [f32; 3] = hex(0xC9976A);
const PEARL_COLOR: [f32; 3] = hex(0xF5EDE4);
const SHELL_BASE_COLOR: [f32; 3] = hex(0x8B7355);

/// Open bivalve shell with a pearl: two scallop valves hinged at z = -0.3,
/// the top one gaping open.
fn build_shell(rng: &mut SeededRng) -> CoralMesh {
    let rot_y = rng.next_f32() * TAU;
    let open_angle = rng.next_range(0.5, 0.85);
    let pearl_size = sample_dim(rng, 0.055, 0.08);
    let pearl_off_y = rng.next_range(0.02, 0.035);
    let shell_tilt = (rng.next_f32() - 0.5) * 0.08;

    // one valve geometry shared by both halves
    let valve = mesh::scallop_valve(rng, 0.34, 24, 12);

    let hinge_z = -0.3;
    let root = euler(shell_tilt, rot_y, 0.0);
    let mut out = CoralMesh::default();

    out.push(mesh::dodecahedron(0.14, 1), SHELL_BASE_COLOR, root * at(0.0, -0.06, 0.0));

    // bottom valve, nacre up
    out.push(valve.clone(), SHELL_COLOR, root * at(0.0, 0.02, 0.0));

    // top valve hinged open about the hinge line
    let top = root
        * at(0.0, 0.02, hinge_z)
        * at(0.0, 0.0, -hinge_z)
        * euler(-open_angle, 0.0, 0.0)
        * at(0.0, 0.0, hinge_z);
    out.push(valve, SHELL_OUTER_COLOR, top);

    // pearl and its highlight catch
    out.push(
        mesh::uv_sphere(pearl_size, 32, 24),
        PEARL_COLOR,
        root * at(0.0, pearl_off_y, 0.0),
    );
    out.push(
        mesh::uv_sphere(pearl_size * 0.15, 8, 6),
        [1.0, 1.0, 1.0],
        root * at(pearl_size * 0.25, pearl_off_y + pearl_size * 0.35, pearl_size * 0.2),
    );

    // hinge nub
    out.push(
        mesh::uv_sphere(0.035, 8, 6),
        SHELL_OUTER_COLOR,
        root * at(0.0, 0.03, hinge_z),
    );
    out
}
