//! Core data structures for the simulation
//! Contains chunk addressing, terrain vertices, and the vitality tracker.

pub mod chunk;
pub mod vertex;
pub mod vitality;

// Re-export commonly used types
pub use chunk::{Chunk, ChunkDescriptor, ChunkKey, Decoration, DecorationKind, VisibleWindow};
pub use vertex::TerrainVertex;
pub use vitality::Vitality;
