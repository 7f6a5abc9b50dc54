//! Boundary between the simulation and whatever draws it
//!
//! The engine reports chunk and water residency changes through the
//! `PresentationSurface` callbacks and hands over a read-only `FrameView` once
//! per tick. The simulation never touches graphics objects.

use glam::Vec3;
use rustc_hash::FxHashMap;

use crate::core::chunk::{ChunkDescriptor, ChunkKey};
use crate::core::vertex::{TerrainVertex, vertex_bytes};
use crate::npc::directory::CreatureSnapshot;
use crate::player::player::SwordPose;
use crate::render::mesh::{build_chunk_mesh, build_creature_model, build_water_quad};
use crate::world::water::WaterTile;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HealthBand {
    Healthy,
    Wounded,
    Critical,
}

impl HealthBand {
    /// Above half is healthy, above a quarter wounded, anything less critical.
    pub fn from_fraction(fraction: f32) -> Self {
        if fraction > 0.5 {
            HealthBand::Healthy
        } else if fraction > 0.25 {
            HealthBand::Wounded
        } else {
            HealthBand::Critical
        }
    }

    pub fn color(&self) -> [f32; 3] {
        match self {
            HealthBand::Healthy => [0.0, 0.5, 0.0],
            HealthBand::Wounded => [1.0, 0.65, 0.0],
            HealthBand::Critical => [1.0, 0.0, 0.0],
        }
    }
}

/// Player state for the HUD and camera.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Hud {
    pub position: Vec3,
    pub yaw: f32,
    pub health: u32,
    pub max_health: u32,
    pub dead: bool,
    pub attacking: bool,
    pub swing_progress: f32,
    pub sword: SwordPose,
}

impl Hud {
    pub fn health_fraction(&self) -> f32 {
        if self.max_health == 0 {
            return 0.0;
        }
        self.health as f32 / self.max_health as f32
    }

    pub fn health_band(&self) -> HealthBand {
        HealthBand::from_fraction(self.health_fraction())
    }
}

pub struct FrameView<'a> {
    pub tick: u64,
    pub time: f32,
    pub hud: Hud,
    pub creatures: &'a [CreatureSnapshot],
}

pub trait PresentationSurface {
    fn chunk_added(&mut self, chunk: &ChunkDescriptor);
    fn chunk_removed(&mut self, key: ChunkKey);
    fn water_added(&mut self, tile: &WaterTile);
    fn water_removed(&mut self, key: ChunkKey);
    fn present(&mut self, frame: &FrameView<'_>);
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct MeshHandle {
    pub vertex_count: usize,
    pub index_count: usize,
    /// Size of the vertex buffer upload.
    pub vertex_bytes: usize,
}

impl MeshHandle {
    fn for_mesh(vertices: &[TerrainVertex], indices: &[u32]) -> Self {
        MeshHandle {
            vertex_count: vertices.len(),
            index_count: indices.len(),
            vertex_bytes: vertex_bytes(vertices).len(),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct SurfaceStats {
    pub chunks_created: u64,
    pub chunks_released: u64,
    pub water_created: u64,
    pub water_released: u64,
    pub frames: u64,
}

/// Surface that builds meshes but draws nothing. Tracks every live resource
/// and panics on a double create or release.
#[derive(Default)]
pub struct HeadlessSurface {
    chunks: FxHashMap<ChunkKey, MeshHandle>,
    water: FxHashMap<ChunkKey, MeshHandle>,
    stats: SurfaceStats,
    last_hud: Option<Hud>,
    last_creature_vertices: usize,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_chunks(&self) -> usize {
        self.chunks.len()
    }

    pub fn live_water(&self) -> usize {
        self.water.len()
    }

    pub fn has_chunk(&self, key: ChunkKey) -> bool {
        self.chunks.contains_key(&key)
    }

    pub fn has_water(&self, key: ChunkKey) -> bool {
        self.water.contains_key(&key)
    }

    pub fn chunk_keys(&self) -> impl Iterator<Item = ChunkKey> + '_ {
        self.chunks.keys().copied()
    }

    pub fn stats(&self) -> SurfaceStats {
        self.stats
    }

    pub fn last_hud(&self) -> Option<&Hud> {
        self.last_hud.as_ref()
    }

    pub fn last_creature_vertices(&self) -> usize {
        self.last_creature_vertices
    }

    pub fn live_vertices(&self) -> usize {
        self.chunks.values().chain(self.water.values()).map(|m| m.vertex_count).sum()
    }

    pub fn live_vertex_bytes(&self) -> usize {
        self.chunks.values().chain(self.water.values()).map(|m| m.vertex_bytes).sum()
    }
}

impl PresentationSurface for HeadlessSurface {
    fn chunk_added(&mut self, chunk: &ChunkDescriptor) {
        let (vertices, indices) = build_chunk_mesh(chunk);
        let handle = MeshHandle::for_mesh(&vertices, &indices);
        let previous = self.chunks.insert(chunk.key, handle);
        assert!(previous.is_none(), "chunk mesh {:?} built twice", chunk.key);
        self.stats.chunks_created += 1;
    }

    fn chunk_removed(&mut self, key: ChunkKey) {
        let released = self.chunks.remove(&key);
        assert!(released.is_some(), "chunk mesh {:?} released without being built", key);
        self.stats.chunks_released += 1;
    }

    fn water_added(&mut self, tile: &WaterTile) {
        let (vertices, indices) = build_water_quad(tile);
        let handle = MeshHandle::for_mesh(&vertices, &indices);
        let previous = self.water.insert(tile.key, handle);
        assert!(previous.is_none(), "water mesh {:?} built twice", tile.key);
        self.stats.water_created += 1;
    }

    fn water_removed(&mut self, key: ChunkKey) {
        let released = self.water.remove(&key);
        assert!(released.is_some(), "water mesh {:?} released without being built", key);
        self.stats.water_released += 1;
    }

    fn present(&mut self, frame: &FrameView<'_>) {
        self.last_creature_vertices = frame
            .creatures
            .iter()
            .map(|c| {
                let pose = c.kind.idle_pose(frame.time);
                build_creature_model(c.kind, c.position + Vec3::Y * pose.lift, pose.turn).0.len()
            })
            .sum();
        self.last_hud = Some(frame.hud);
        self.stats.frames += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::water::WaterPlaneSet;
    use test_case::test_case;

    #[test_case(1.0, HealthBand::Healthy)]
    #[test_case(0.51, HealthBand::Healthy)]
    #[test_case(0.5, HealthBand::Wounded)]
    #[test_case(0.3, HealthBand::Wounded)]
    #[test_case(0.25, HealthBand::Critical)]
    #[test_case(0.0, HealthBand::Critical)]
    fn test_health_band(fraction: f32, expected: HealthBand) {
        assert_eq!(HealthBand::from_fraction(fraction), expected);
    }

    #[test]
    fn test_water_lifecycle() {
        let mut water = WaterPlaneSet::new(40.0, 4.5);
        let mut surface = HeadlessSurface::new();
        for tile in water.reconcile([ChunkKey::new(0, 0), ChunkKey::new(1, 0)]).added {
            surface.water_added(&tile);
        }
        assert_eq!(surface.live_water(), 2);
        assert_eq!(surface.live_vertices(), 8);
        assert_eq!(surface.live_vertex_bytes(), 8 * std::mem::size_of::<TerrainVertex>());
        for key in water.reconcile([ChunkKey::new(1, 0)]).removed {
            surface.water_removed(key);
        }
        assert!(!surface.has_water(ChunkKey::new(0, 0)));
        assert_eq!(surface.stats().water_released, 1);
    }

    #[test]
    #[should_panic(expected = "released without being built")]
    fn test_double_release_panics() {
        let mut surface = HeadlessSurface::new();
        surface.water_removed(ChunkKey::new(0, 0));
    }
}
