//! Chunk descriptor generation
//!
//! Builds the vertex grid and decoration list for one chunk. Everything is
//! sampled at global coordinates, so neighbouring chunks agree on their shared
//! edge without any stitching pass.

use std::f32::consts::PI;

use glam::Vec3;

use crate::constants::*;
use crate::core::chunk::{ChunkDescriptor, ChunkKey, Decoration, DecorationKind};
use crate::core::vertex::TerrainVertex;
use crate::utils::settings::WorldSettings;
use crate::world::heightmap::HeightMap;

pub struct ChunkGenerator {
    height_map: HeightMap,
    chunk_size: f32,
    vertices_per_side: u32,
    decoration_stride: f32,
}

impl ChunkGenerator {
    pub fn new(height_map: HeightMap, settings: &WorldSettings) -> Self {
        ChunkGenerator {
            height_map,
            chunk_size: settings.chunk_size,
            vertices_per_side: settings.vertices_per_side.max(2),
            decoration_stride: settings.decoration_stride,
        }
    }

    pub fn height_map(&self) -> &HeightMap {
        &self.height_map
    }

    pub fn chunk_size(&self) -> f32 {
        self.chunk_size
    }

    pub fn generate_chunk(&self, key: ChunkKey) -> ChunkDescriptor {
        let origin = key.world_origin(self.chunk_size);
        ChunkDescriptor {
            key,
            origin,
            size: self.chunk_size,
            vertices_per_side: self.vertices_per_side,
            vertices: self.generate_vertices(origin),
            decorations: self.generate_decorations(origin),
        }
    }

    /// Local grid coordinate of vertex `i`. Computed as `size * i / segments`
    /// so the last vertex lands exactly on `size`.
    fn grid_offset(&self, i: u32) -> f32 {
        let segments = (self.vertices_per_side - 1) as f32;
        self.chunk_size * i as f32 / segments
    }

    fn generate_vertices(&self, origin: (f32, f32)) -> Vec<TerrainVertex> {
        let n = self.vertices_per_side;
        let mut vertices = Vec::with_capacity((n * n) as usize);

        for iz in 0..n {
            let lz = self.grid_offset(iz);
            for ix in 0..n {
                let lx = self.grid_offset(ix);
                let height = self.height_map.get_height(origin.0 + lx, origin.1 + lz);
                let surface = self.height_map.classify(height);
                vertices.push(TerrainVertex::new([lx, height, lz], surface.color()));
            }
        }

        vertices
    }

    fn generate_decorations(&self, origin: (f32, f32)) -> Vec<Decoration> {
        let mut decorations = Vec::new();
        let water_height = self.height_map.water_height();
        let noise = self.height_map.noise();

        let steps = (self.chunk_size / self.decoration_stride).ceil() as u32;
        for sx in 0..steps {
            let lx = sx as f32 * self.decoration_stride;
            for sz in 0..steps {
                let lz = sz as f32 * self.decoration_stride;
                let world_x = origin.0 + lx;
                let world_z = origin.1 + lz;
                let height = self.height_map.get_height(world_x, world_z);

                if self.height_map.is_underwater(height) {
                    continue;
                }

                let value = noise.sample(
                    world_x * DECORATION_NOISE_SCALE,
                    world_z * DECORATION_NOISE_SCALE,
                );
                let kind = if value > 0.8 {
                    if height > water_height + 0.5 {
                        Some(DecorationKind::Tree)
                    } else {
                        None
                    }
                } else if value < -0.8 {
                    Some(DecorationKind::Rock)
                } else if value > 0.5 {
                    Some(DecorationKind::Bush)
                } else {
                    None
                };

                if let Some(kind) = kind {
                    decorations.push(self.place_decoration(kind, lx, height, lz, world_x, world_z));
                }
            }
        }

        decorations
    }

    fn place_decoration(
        &self,
        kind: DecorationKind,
        lx: f32,
        height: f32,
        lz: f32,
        world_x: f32,
        world_z: f32,
    ) -> Decoration {
        let hash = self.position_hash(world_x.floor() as i32, world_z.floor() as i32);
        let jitter = |salt: u32| -> f32 {
            let h = hash.wrapping_add(salt).wrapping_mul(2654435761);
            (h ^ (h >> 15)) as f32 / u32::MAX as f32
        };

        match kind {
            DecorationKind::Tree => {
                let scale = 1.5 + jitter(1) * 0.7;
                Decoration {
                    kind,
                    local_position: Vec3::new(lx, height, lz),
                    scale: Vec3::splat(scale),
                    rotation: Vec3::new(0.0, jitter(2) * PI * 2.0, 0.0),
                }
            }
            DecorationKind::Rock => {
                let scale = 1.0 + jitter(1) * 1.5;
                Decoration {
                    kind,
                    local_position: Vec3::new(lx, height + 0.4, lz),
                    scale: Vec3::new(scale, scale * 0.7, scale),
                    rotation: Vec3::new(jitter(2) * PI, jitter(3) * PI, jitter(4) * PI),
                }
            }
            DecorationKind::Bush => {
                let scale = 0.7 + jitter(1) * 0.5;
                Decoration {
                    kind,
                    local_position: Vec3::new(lx, height + 0.5, lz),
                    scale: Vec3::splat(scale),
                    rotation: Vec3::ZERO,
                }
            }
        }
    }

    fn position_hash(&self, x: i32, z: i32) -> u32 {
        let mut hash = self.height_map.noise().seed();
        hash = hash.wrapping_add(x as u32).wrapping_mul(73856093);
        hash = hash.wrapping_add(z as u32).wrapping_mul(19349663);
        hash ^ (hash >> 16)
    }
}
