use glam::{EulerRot, Quat, Vec3};

use crate::core::chunk::{ChunkDescriptor, Decoration, DecorationKind};
use crate::core::vertex::TerrainVertex;
use crate::npc::kind::{CreatureKind, PartShape};
use crate::world::heightmap::hex_to_rgb;
use crate::world::water::WaterTile;

pub fn add_quad(vertices: &mut Vec<TerrainVertex>, indices: &mut Vec<u32>, corners: [Vec3; 4], color: [f32; 3]) {
    let base_idx = vertices.len() as u32;
    for corner in corners {
        vertices.push(TerrainVertex::new(corner.to_array(), color));
    }
    indices.extend_from_slice(&[
        base_idx,
        base_idx + 1,
        base_idx + 2,
        base_idx,
        base_idx + 2,
        base_idx + 3,
    ]);
}

/// Oriented box: `half` extents, rotated by `rotation` about `center`.
pub fn add_box(
    vertices: &mut Vec<TerrainVertex>,
    indices: &mut Vec<u32>,
    center: Vec3,
    half: Vec3,
    rotation: Quat,
    color: [f32; 3],
) {
    let corners = [
        Vec3::new(-half.x, -half.y, -half.z),
        Vec3::new(half.x, -half.y, -half.z),
        Vec3::new(half.x, half.y, -half.z),
        Vec3::new(-half.x, half.y, -half.z),
        Vec3::new(-half.x, -half.y, half.z),
        Vec3::new(half.x, -half.y, half.z),
        Vec3::new(half.x, half.y, half.z),
        Vec3::new(-half.x, half.y, half.z),
    ]
    .map(|corner| center + rotation * corner);

    let faces = [
        [4, 5, 6, 7], // +Z
        [1, 0, 3, 2], // -Z
        [5, 1, 2, 6], // +X
        [0, 4, 7, 3], // -X
        [7, 6, 2, 3], // +Y
        [0, 1, 5, 4], // -Y
    ];
    for face in faces {
        add_quad(vertices, indices, face.map(|i| corners[i]), color);
    }
}

/// Terrain grid in world space followed by one block per decoration.
pub fn build_chunk_mesh(chunk: &ChunkDescriptor) -> (Vec<TerrainVertex>, Vec<u32>) {
    let origin = Vec3::new(chunk.origin.0, 0.0, chunk.origin.1);
    let mut vertices: Vec<TerrainVertex> = chunk
        .vertices
        .iter()
        .map(|v| {
            let world = origin + Vec3::from_array(v.position);
            TerrainVertex::new(world.to_array(), v.color)
        })
        .collect();
    let mut indices = chunk.triangle_indices();

    for decoration in &chunk.decorations {
        add_decoration(&mut vertices, &mut indices, origin, decoration);
    }
    (vertices, indices)
}

fn add_decoration(vertices: &mut Vec<TerrainVertex>, indices: &mut Vec<u32>, origin: Vec3, decoration: &Decoration) {
    let base = origin + decoration.local_position;
    let rotation = Quat::from_euler(
        EulerRot::XYZ,
        decoration.rotation.x,
        decoration.rotation.y,
        decoration.rotation.z,
    );
    let scale = decoration.scale;
    match decoration.kind {
        DecorationKind::Tree => {
            let trunk = Vec3::new(0.2, 1.0, 0.2) * scale;
            add_box(vertices, indices, base + Vec3::Y * trunk.y, trunk, rotation, decoration.kind.accent_color());
            let crown = Vec3::new(1.0, 1.0, 1.0) * scale;
            add_box(
                vertices,
                indices,
                base + Vec3::Y * (trunk.y * 2.0 + crown.y),
                crown,
                rotation,
                decoration.kind.color(),
            );
        }
        DecorationKind::Rock | DecorationKind::Bush => {
            add_box(vertices, indices, base, scale * 0.5, rotation, decoration.kind.color());
        }
    }
}

/// Flat quad at water height covering the tile footprint.
pub fn build_water_quad(tile: &WaterTile) -> (Vec<TerrainVertex>, Vec<u32>) {
    let half = tile.size * 0.5;
    let c = tile.center;
    let mut vertices = Vec::with_capacity(4);
    let mut indices = Vec::with_capacity(6);
    add_quad(
        &mut vertices,
        &mut indices,
        [
            Vec3::new(c.x - half, c.y, c.z - half),
            Vec3::new(c.x - half, c.y, c.z + half),
            Vec3::new(c.x + half, c.y, c.z + half),
            Vec3::new(c.x + half, c.y, c.z - half),
        ],
        tile.color,
    );
    (vertices, indices)
}

/// Creature body built from its part table, every primitive as a box.
/// `position` is the ground point under the creature.
pub fn build_creature_model(kind: CreatureKind, position: Vec3, yaw: f32) -> (Vec<TerrainVertex>, Vec<u32>) {
    let parts = kind.body_parts();
    let mut vertices = Vec::with_capacity(parts.len() * 24);
    let mut indices = Vec::with_capacity(parts.len() * 36);

    let facing = Quat::from_rotation_y(yaw);
    let root = position + Vec3::Y * kind.stats().height_offset;

    for part in parts {
        let [a, b, c] = part.size;
        let half = match part.shape {
            PartShape::Box => Vec3::new(a, b, c) * 0.5,
            PartShape::Cylinder => Vec3::new(a, b * 0.5, c),
            PartShape::Sphere => Vec3::new(a, b, c),
        };
        let center = root + facing * Vec3::from_array(part.offset);
        let rotation = facing * Quat::from_rotation_z(part.tilt);
        add_box(&mut vertices, &mut indices, center, half, rotation, hex_to_rgb(part.color));
    }
    (vertices, indices)
}
