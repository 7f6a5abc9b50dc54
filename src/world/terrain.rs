use glam::Vec3;

use crate::utils::settings::WorldSettings;
use crate::world::chunk_store::{ChunkDelta, ChunkStore};
use crate::world::generator::ChunkGenerator;
use crate::world::heightmap::HeightMap;
use crate::world::water::{WaterDelta, WaterPlaneSet};

#[derive(Default)]
pub struct WorldDelta {
    pub chunks: ChunkDelta,
    pub water: WaterDelta,
}

/// Terrain side of the simulation: height field, resident chunks and water.
pub struct World {
    height_map: HeightMap,
    store: ChunkStore,
    water: WaterPlaneSet,
    pub seed: u32,
}

impl World {
    pub fn new(settings: &WorldSettings) -> Self {
        let height_map = HeightMap::from_settings(settings);
        let generator = ChunkGenerator::new(height_map.clone(), settings);
        let water = WaterPlaneSet::new(settings.chunk_size, height_map.water_height());
        World {
            store: ChunkStore::new(generator, settings.visible_radius),
            water,
            height_map,
            seed: settings.seed,
        }
    }

    pub fn height_map(&self) -> &HeightMap {
        &self.height_map
    }

    pub fn get_height(&self, x: f32, z: f32) -> f32 {
        self.height_map.get_height(x, z)
    }

    pub fn chunks(&self) -> &ChunkStore {
        &self.store
    }

    pub fn water(&self) -> &WaterPlaneSet {
        &self.water
    }

    /// Chunk residency first, then water tiles over the same window.
    pub fn update(&mut self, viewer: Vec3) -> WorldDelta {
        let chunks = self.store.reconcile(viewer);
        let water = match self.store.window() {
            Some(window) => self.water.reconcile(window.keys()),
            None => WaterDelta::default(),
        };
        WorldDelta { chunks, water }
    }

    pub fn release_all(&mut self) -> WorldDelta {
        WorldDelta {
            chunks: self.store.release_all(),
            water: self.water.reconcile(std::iter::empty()),
        }
    }
}
