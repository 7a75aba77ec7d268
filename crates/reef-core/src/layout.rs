//! Deterministic reef layout: coral placements generated from one master
//! seed. Clusters alternate sides of the central sand channel the camera
//! travels down, each with a dominant coral kind and palette plus one
//! oversized hero piece. A handful of solo corals break up the gaps.

use crate::constants::{FLOOR_Y, LAYOUT_MASTER_SEED};
use crate::coral::{CoralKind, CORAL_KIND_COUNT};
use crate::palette::CORAL_PALETTES;
use crate::rng::SeededRng;
use glam::Vec3;
use std::f32::consts::TAU;

// Placement bounds
pub const CENTER_CLEAR: f32 = 12.0; // half-width of the open sand channel
pub const MAX_X: f32 = 45.0;
pub const Z_MIN: f32 = 20.0;
pub const Z_MAX: f32 = -110.0;

// Cluster layout
pub const NUM_CLUSTERS: usize = 10;
pub const CORALS_PER_CLUSTER_MIN: usize = 3;
pub const CORALS_PER_CLUSTER_MAX: usize = 7;
pub const CLUSTER_RADIUS: f32 = 5.0;
pub const SOLO_CORALS: usize = 5;

/// One placed coral: where it sits, which builder, and the per-instance
/// geometry seed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecorationInstance {
    pub position: Vec3,
    pub kind: CoralKind,
    pub color_index: usize,
    pub scale: f32,
    pub seed: u32,
}

/// Generate the full placement list from the master seed. Pure; the same
/// seed always yields the same list in the same order.
pub fn generate_layout() -> Vec<DecorationInstance> {
    generate_layout_seeded(LAYOUT_MASTER_SEED)
}

pub fn generate_layout_seeded(master_seed: u32) -> Vec<DecorationInstance> {
    let mut rng = SeededRng::new(master_seed);
    let mut corals = Vec::with_capacity(NUM_CLUSTERS * CORALS_PER_CLUSTER_MAX + SOLO_CORALS);
    let z_range = Z_MIN - Z_MAX;

    for c in 0..NUM_CLUSTERS {
        let base_frac = (c as f32 + 0.5) / NUM_CLUSTERS as f32;
        let jitter = (rng.next_f32() - 0.5) * 0.7 / NUM_CLUSTERS as f32;
        let cluster_z = Z_MIN - (base_frac + jitter) * z_range;

        let side = if c % 2 == 0 { 1.0 } else { -1.0 };
        let cluster_x =
            side * (CENTER_CLEAR + rng.next_f32() * (MAX_X - CENTER_CLEAR - CLUSTER_RADIUS));

        let count = CORALS_PER_CLUSTER_MIN
            + rng.next_index(CORALS_PER_CLUSTER_MAX - CORALS_PER_CLUSTER_MIN + 1);

        // Reefs group by type; most of a cluster shares one kind and palette.
        let dominant_kind = rng.next_index(CORAL_KIND_COUNT);
        let cluster_palette = rng.next_index(CORAL_PALETTES.len());
        let hero_idx = rng.next_index(count);

        for j in 0..count {
            let angle = rng.next_f32() * TAU;
            let dist = rng.next_f32() * CLUSTER_RADIUS * (0.3 + rng.next_f32() * 0.7);
            let x = cluster_x + angle.cos() * dist;
            let z = cluster_z + angle.sin() * dist;

            let kind_index = if rng.next_f32() < 0.7 {
                dominant_kind
            } else {
                rng.next_index(CORAL_KIND_COUNT)
            };

            let color_index = if rng.next_f32() < 0.6 {
                cluster_palette
            } else {
                rng.next_index(CORAL_PALETTES.len())
            };

            let scale = if j == hero_idx {
                2.5 + rng.next_f32() * 1.5
            } else {
                1.2 + rng.next_f32()
            };

            corals.push(DecorationInstance {
                position: Vec3::new(x, FLOOR_Y, z),
                kind: CoralKind::from_index(kind_index),
                color_index,
                scale,
                seed: rng.next_seed(),
            });
        }
    }

    for _ in 0..SOLO_CORALS {
        let side = if rng.next_f32() > 0.5 { 1.0 } else { -1.0 };
        let x = side * (CENTER_CLEAR + rng.next_f32() * (MAX_X - CENTER_CLEAR));
        let z = Z_MIN - rng.next_f32() * z_range;
        let kind = CoralKind::from_index(rng.next_index(CORAL_KIND_COUNT));
        let color_index = rng.next_index(CORAL_PALETTES.len());
        let scale = 0.8 + rng.next_f32() * 0.6;

        corals.push(DecorationInstance {
            position: Vec3::new(x, FLOOR_Y, z),
            kind,
            color_index,
            scale,
            seed: rng.next_seed(),
        });
    }

    corals
}
