// Core module with fundamental types
pub mod core;

// Player module with input, movement and combat
pub mod player;

// Hostile creatures
pub mod npc;

// Render module with mesh building and the presentation boundary
pub mod render;

// World module with generation and terrain
pub mod world;

// Other modules
pub mod constants;
pub mod engine;
pub mod utils;

// Re-exports
pub use constants::*;
pub use self::core::{Chunk, ChunkDescriptor, ChunkKey, TerrainVertex, VisibleWindow, Vitality};
pub use engine::{Engine, TickReport};
pub use npc::{CreatureDirectory, CreatureId, CreatureKind, CreatureSnapshot};
pub use player::{CombatResolver, InputState, Player, SwordPose};
pub use render::{FrameView, HeadlessSurface, Hud, PresentationSurface};
pub use utils::settings::{GameSettings, HitPolicy, SettingsError};
pub use world::{ChunkStore, HeightMap, NoiseField, WaterPlaneSet, World};
