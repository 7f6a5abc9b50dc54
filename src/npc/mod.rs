//! Hostile creature modules
//! Contains creature kinds, per-creature behavior and the population directory.

pub mod creature;
pub mod directory;
pub mod kind;

// Re-export commonly used types
pub use creature::{Creature, CreatureId, CreatureStep};
pub use directory::{CreatureDirectory, CreatureSnapshot, DirectoryReport};
pub use kind::{BodyPart, CreatureKind, CreatureStats, IdleMotion, IdlePose, PartShape};
