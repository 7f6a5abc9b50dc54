//! Player-related modules
//! Contains input, movement, the sword swing and melee hit resolution.

pub mod combat;
pub mod input;
#[allow(clippy::module_inception)]
pub mod player;

// Re-export commonly used types
pub use combat::{CombatReport, CombatResolver, HitPolicy};
pub use input::InputState;
pub use player::{Player, PlayerStep, SwordPose};
