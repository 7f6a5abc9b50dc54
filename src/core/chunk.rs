use std::sync::Arc;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::core::vertex::TerrainVertex;
use crate::world::heightmap::hex_to_rgb;
use crate::constants::*;

/// Integer chunk address, `floor(world / chunk_size)` on each horizontal axis.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkKey {
    pub cx: i32,
    pub cz: i32,
}

impl ChunkKey {
    pub const fn new(cx: i32, cz: i32) -> Self {
        ChunkKey { cx, cz }
    }

    pub fn from_world(x: f32, z: f32, chunk_size: f32) -> Self {
        ChunkKey {
            cx: (x / chunk_size).floor() as i32,
            cz: (z / chunk_size).floor() as i32,
        }
    }

    /// World (x, z) of the chunk's minimum corner.
    pub fn world_origin(&self, chunk_size: f32) -> (f32, f32) {
        (self.cx as f32 * chunk_size, self.cz as f32 * chunk_size)
    }

    pub fn chebyshev_distance(&self, other: ChunkKey) -> i32 {
        (self.cx - other.cx).abs().max((self.cz - other.cz).abs())
    }
}

/// Square set of keys within `radius` (Chebyshev) of `center`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct VisibleWindow {
    pub center: ChunkKey,
    pub radius: i32,
}

impl VisibleWindow {
    pub fn new(center: ChunkKey, radius: i32) -> Self {
        VisibleWindow {
            center,
            radius: radius.max(0),
        }
    }

    pub fn around(viewer: Vec3, chunk_size: f32, radius: i32) -> Self {
        Self::new(ChunkKey::from_world(viewer.x, viewer.z, chunk_size), radius)
    }

    pub fn contains(&self, key: ChunkKey) -> bool {
        self.center.chebyshev_distance(key) <= self.radius
    }

    pub fn len(&self) -> usize {
        let side = (2 * self.radius + 1) as usize;
        side * side
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Keys ordered nearest-first so presentation can build the closest meshes first.
    pub fn keys(&self) -> Vec<ChunkKey> {
        let mut keys = Vec::with_capacity(self.len());
        for cx in (self.center.cx - self.radius)..=(self.center.cx + self.radius) {
            for cz in (self.center.cz - self.radius)..=(self.center.cz + self.radius) {
                keys.push(ChunkKey::new(cx, cz));
            }
        }
        let center = self.center;
        keys.sort_by_key(|k| {
            let dx = k.cx - center.cx;
            let dz = k.cz - center.cz;
            dx * dx + dz * dz
        });
        keys
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum DecorationKind {
    Tree,
    Rock,
    Bush,
}

impl DecorationKind {
    pub fn color(&self) -> [f32; 3] {
        match self {
            DecorationKind::Tree => hex_to_rgb(COLOR_TREE_LEAVES),
            DecorationKind::Rock => hex_to_rgb(COLOR_ROCK),
            DecorationKind::Bush => hex_to_rgb(COLOR_BUSH),
        }
    }

    /// Secondary color (tree trunk); same as `color` for single-part kinds.
    pub fn accent_color(&self) -> [f32; 3] {
        match self {
            DecorationKind::Tree => hex_to_rgb(COLOR_TREE_TRUNK),
            _ => self.color(),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Decoration {
    pub kind: DecorationKind,
    /// Relative to the chunk origin.
    pub local_position: Vec3,
    pub scale: Vec3,
    /// Euler angles (x, y, z) in radians.
    pub rotation: Vec3,
}

/// Everything the presentation surface needs to build a chunk's renderables.
#[derive(Clone, Debug)]
pub struct ChunkDescriptor {
    pub key: ChunkKey,
    /// World (x, z) of the chunk origin.
    pub origin: (f32, f32),
    pub size: f32,
    pub vertices_per_side: u32,
    /// Row-major (z rows, x columns) grid.
    pub vertices: Vec<TerrainVertex>,
    pub decorations: Vec<Decoration>,
}

impl ChunkDescriptor {
    pub fn vertex(&self, ix: u32, iz: u32) -> &TerrainVertex {
        &self.vertices[(iz * self.vertices_per_side + ix) as usize]
    }

    pub fn world_position(&self, ix: u32, iz: u32) -> Vec3 {
        let [x, y, z] = self.vertex(ix, iz).position;
        Vec3::new(x + self.origin.0, y, z + self.origin.1)
    }

    /// Two triangles per grid cell, counter-clockwise seen from above.
    pub fn triangle_indices(&self) -> Vec<u32> {
        let n = self.vertices_per_side;
        if n < 2 {
            return Vec::new();
        }
        let cells = (n - 1) as usize;
        let mut indices = Vec::with_capacity(cells * cells * 6);
        for iz in 0..n - 1 {
            for ix in 0..n - 1 {
                let a = iz * n + ix;
                let b = a + 1;
                let c = a + n;
                let d = c + 1;
                indices.extend_from_slice(&[a, c, b, b, c, d]);
            }
        }
        indices
    }
}

/// A resident chunk. Owned exclusively by the chunk store.
pub struct Chunk {
    pub key: ChunkKey,
    pub descriptor: Arc<ChunkDescriptor>,
}

impl Chunk {
    pub fn new(descriptor: ChunkDescriptor) -> Self {
        Chunk {
            key: descriptor.key,
            descriptor: Arc::new(descriptor),
        }
    }
}
