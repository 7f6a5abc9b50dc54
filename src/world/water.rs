use glam::Vec3;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::constants::{COLOR_WATER, WATER_OPACITY};
use crate::core::chunk::ChunkKey;
use crate::world::heightmap::hex_to_rgb;

/// Flat water quad covering one chunk footprint.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct WaterTile {
    pub key: ChunkKey,
    pub center: Vec3,
    pub size: f32,
    pub color: [f32; 3],
    pub opacity: f32,
}

#[derive(Default)]
pub struct WaterDelta {
    pub added: Vec<WaterTile>,
    pub removed: Vec<ChunkKey>,
}

impl WaterDelta {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Water tiles tracked over the same key space as the chunk store.
pub struct WaterPlaneSet {
    tiles: FxHashMap<ChunkKey, WaterTile>,
    chunk_size: f32,
    water_height: f32,
}

impl WaterPlaneSet {
    pub fn new(chunk_size: f32, water_height: f32) -> Self {
        WaterPlaneSet {
            tiles: FxHashMap::default(),
            chunk_size,
            water_height,
        }
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn contains(&self, key: ChunkKey) -> bool {
        self.tiles.contains_key(&key)
    }

    pub fn get(&self, key: ChunkKey) -> Option<&WaterTile> {
        self.tiles.get(&key)
    }

    pub fn keys(&self) -> impl Iterator<Item = ChunkKey> + '_ {
        self.tiles.keys().copied()
    }

    fn make_tile(&self, key: ChunkKey) -> WaterTile {
        let (x, z) = key.world_origin(self.chunk_size);
        let half = self.chunk_size * 0.5;
        WaterTile {
            key,
            center: Vec3::new(x + half, self.water_height, z + half),
            size: self.chunk_size,
            color: hex_to_rgb(COLOR_WATER),
            opacity: WATER_OPACITY,
        }
    }

    /// Brings the tile set in line with `visible`. Calling it again with the
    /// same keys yields an empty delta.
    pub fn reconcile<I>(&mut self, visible: I) -> WaterDelta
    where
        I: IntoIterator<Item = ChunkKey>,
    {
        let visible: FxHashSet<ChunkKey> = visible.into_iter().collect();
        let mut delta = WaterDelta::default();

        for key in &visible {
            if self.tiles.contains_key(key) {
                continue;
            }
            let tile = self.make_tile(*key);
            let previous = self.tiles.insert(*key, tile);
            assert!(previous.is_none(), "water tile {:?} created twice", key);
            delta.added.push(tile);
        }

        let stale: Vec<ChunkKey> = self
            .tiles
            .keys()
            .filter(|key| !visible.contains(*key))
            .copied()
            .collect();
        for key in stale {
            let released = self.tiles.remove(&key);
            assert!(released.is_some(), "water tile {:?} released twice", key);
            delta.removed.push(key);
        }

        if !delta.is_empty() {
            tracing::debug!(
                "Water tiles reconciled: +{} -{} (resident {})",
                delta.added.len(),
                delta.removed.len(),
                self.tiles.len()
            );
        }

        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::chunk::VisibleWindow;

    #[test]
    fn test_tile_geometry() {
        let mut water = WaterPlaneSet::new(40.0, 4.5);
        let delta = water.reconcile([ChunkKey::new(1, -1)]);
        assert_eq!(delta.added.len(), 1);
        let tile = delta.added[0];
        assert_eq!(tile.center, Vec3::new(60.0, 4.5, -20.0));
        assert_eq!(tile.size, 40.0);
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let mut water = WaterPlaneSet::new(40.0, 4.5);
        let window = VisibleWindow::new(ChunkKey::new(0, 0), 2);
        let first = water.reconcile(window.keys());
        assert_eq!(first.added.len(), 25);
        let second = water.reconcile(window.keys());
        assert!(second.is_empty());
        assert_eq!(water.len(), 25);
    }

    #[test]
    fn test_stale_tiles_released_once() {
        let mut water = WaterPlaneSet::new(40.0, 4.5);
        water.reconcile(VisibleWindow::new(ChunkKey::new(0, 0), 1).keys());
        let delta = water.reconcile(VisibleWindow::new(ChunkKey::new(5, 5), 1).keys());
        assert_eq!(delta.removed.len(), 9);
        assert_eq!(delta.added.len(), 9);
        for key in &delta.removed {
            assert!(!water.contains(*key));
        }
        let again = water.reconcile(VisibleWindow::new(ChunkKey::new(5, 5), 1).keys());
        assert!(again.removed.is_empty());
    }

    #[test]
    fn test_empty_visible_set_clears() {
        let mut water = WaterPlaneSet::new(40.0, 4.5);
        water.reconcile([ChunkKey::new(0, 0), ChunkKey::new(0, 1)]);
        let delta = water.reconcile(std::iter::empty());
        assert_eq!(delta.removed.len(), 2);
        assert!(water.is_empty());
    }
}
