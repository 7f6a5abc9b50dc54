//! Utility modules
//! Contains settings persistence.

pub mod settings;

// Re-export commonly used types
pub use settings::{
    CombatSettings, CreatureSettings, DebugSettings, GameSettings, HitPolicy, PlayerSettings,
    SettingsError, WorldSettings, default_settings_path, load_settings, save_settings,
};
