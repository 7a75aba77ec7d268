//! Static scene assembly: runs the deterministic layout, builds every coral
//! mesh and flattens them into the GPU buffers, alongside the floor grid and
//! baked sand maps.

use crate::render::{SceneGeometry, SceneVertex};
use reef_core::{coral, floor, layout};

pub fn build_scene_geometry() -> SceneGeometry {
    let placements = layout::generate_layout();

    let mut vertices: Vec<SceneVertex> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();
    for inst in &placements {
        let mesh = coral::build(inst.kind, inst.seed, inst.color_index);
        let base = vertices.len() as u32;
        for ((p, n), c) in mesh
            .positions
            .iter()
            .zip(&mesh.normals)
            .zip(&mesh.colors)
        {
            // uniform scale + translation; normals are unaffected
            let world = *p * inst.scale + inst.position;
            vertices.push(SceneVertex {
                position: world.to_array(),
                normal: n.to_array(),
                color: *c,
            });
        }
        indices.extend(mesh.indices.iter().map(|i| i + base));
    }

    log::info!(
        "reef scene: {} corals, {} vertices, {} triangles",
        placements.len(),
        vertices.len(),
        indices.len() / 3
    );

    SceneGeometry {
        floor: floor::floor_grid(),
        coral_vertices: vertices,
        coral_indices: indices,
        sand_color: floor::bake_sand_color_map(1024),
        sand_normal: floor::bake_sand_normal_map(1024),
        sand_roughness: floor::bake_sand_roughness_map(512),
    }
}
