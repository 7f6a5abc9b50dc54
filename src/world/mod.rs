//! World generation and management modules
//! Contains noise, height sampling, chunk residency and water tiles.

pub mod chunk_store;
pub mod generator;
pub mod heightmap;
pub mod noise;
pub mod terrain;
pub mod water;

// Re-export commonly used types
pub use chunk_store::{ChunkDelta, ChunkStore};
pub use generator::ChunkGenerator;
pub use heightmap::{HeightMap, SurfaceKind};
pub use noise::NoiseField;
pub use terrain::{World, WorldDelta};
pub use water::{WaterDelta, WaterPlaneSet, WaterTile};
