//! Viewer-driven chunk residency
//!
//! The store keeps exactly the chunks inside the visible window. Each
//! reconcile reports what was materialized and what was evicted so the
//! presentation surface can build or release the matching renderables.

use std::sync::Arc;

use glam::Vec3;
use rustc_hash::FxHashMap;

use crate::core::chunk::{Chunk, ChunkDescriptor, ChunkKey, VisibleWindow};
use crate::world::generator::ChunkGenerator;

/// Result of one reconcile pass.
#[derive(Default)]
pub struct ChunkDelta {
    pub added: Vec<Arc<ChunkDescriptor>>,
    pub removed: Vec<ChunkKey>,
}

impl ChunkDelta {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

pub struct ChunkStore {
    chunks: FxHashMap<ChunkKey, Chunk>,
    generator: ChunkGenerator,
    radius: i32,
    window: Option<VisibleWindow>,
}

impl ChunkStore {
    pub fn new(generator: ChunkGenerator, radius: i32) -> Self {
        ChunkStore {
            chunks: FxHashMap::default(),
            generator,
            radius: radius.max(0),
            window: None,
        }
    }

    pub fn generator(&self) -> &ChunkGenerator {
        &self.generator
    }

    pub fn radius(&self) -> i32 {
        self.radius
    }

    /// Window used by the most recent reconcile.
    pub fn window(&self) -> Option<VisibleWindow> {
        self.window
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn contains(&self, key: ChunkKey) -> bool {
        self.chunks.contains_key(&key)
    }

    pub fn get(&self, key: ChunkKey) -> Option<&Chunk> {
        self.chunks.get(&key)
    }

    pub fn keys(&self) -> impl Iterator<Item = ChunkKey> + '_ {
        self.chunks.keys().copied()
    }

    pub fn reconcile(&mut self, viewer: Vec3) -> ChunkDelta {
        let window = VisibleWindow::around(viewer, self.generator.chunk_size(), self.radius);
        self.reconcile_window(window)
    }

    pub fn reconcile_window(&mut self, window: VisibleWindow) -> ChunkDelta {
        let mut delta = ChunkDelta::default();

        for key in window.keys() {
            if self.chunks.contains_key(&key) {
                continue;
            }
            let chunk = Chunk::new(self.generator.generate_chunk(key));
            delta.added.push(Arc::clone(&chunk.descriptor));
            let previous = self.chunks.insert(key, chunk);
            assert!(previous.is_none(), "chunk {:?} created twice", key);
        }

        let evicted: Vec<ChunkKey> = self
            .chunks
            .keys()
            .filter(|key| !window.contains(**key))
            .copied()
            .collect();

        for key in evicted {
            let released = self.chunks.remove(&key);
            assert!(released.is_some(), "chunk {:?} released twice", key);
            delta.removed.push(key);
        }

        if !delta.is_empty() {
            tracing::debug!(
                "Chunks reconciled around {:?}: +{} -{} (resident {})",
                window.center,
                delta.added.len(),
                delta.removed.len(),
                self.chunks.len()
            );
        }

        self.window = Some(window);
        delta
    }

    /// Evicts every resident chunk, e.g. on shutdown.
    pub fn release_all(&mut self) -> ChunkDelta {
        let mut removed: Vec<ChunkKey> = self.chunks.drain().map(|(key, _)| key).collect();
        removed.sort();
        self.window = None;
        ChunkDelta {
            added: Vec::new(),
            removed,
        }
    }
}
