use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;

pub const SETTINGS_FILE: &str = "settings.bin";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings encoding failed: {0}")]
    Encoding(#[from] bincode::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct GameSettings {
    pub world: WorldSettings,
    pub player: PlayerSettings,
    pub creatures: CreatureSettings,
    pub combat: CombatSettings,
    pub debug: DebugSettings,
}

fn require_finite(name: &str, value: f32) -> Result<(), SettingsError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SettingsError::Invalid(format!("{} must be finite, got {}", name, value)))
    }
}

impl GameSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        let world = &self.world;
        let player = &self.player;
        let creatures = &self.creatures;
        let floats = [
            ("chunk_size", world.chunk_size),
            ("max_height", world.max_height),
            ("water_level", world.water_level),
            ("decoration_stride", world.decoration_stride),
            ("player speed", player.speed),
            ("eye_height", player.eye_height),
            ("invulnerable_duration", player.invulnerable_duration),
            ("player attack_range", player.attack_range),
            ("attack_duration", player.attack_duration),
            ("spawn_point.x", player.spawn_point[0]),
            ("spawn_point.y", player.spawn_point[1]),
            ("spawn_point.z", player.spawn_point[2]),
            ("min_spawn_radius", creatures.min_spawn_radius),
            ("spawn_radius", creatures.spawn_radius),
            ("despawn_radius", creatures.despawn_radius),
            ("spawn_chance", creatures.spawn_chance),
            ("aggro_range", creatures.aggro_range),
            ("creature attack_range", creatures.attack_range),
            ("attack_cooldown", creatures.attack_cooldown),
            ("direction_change_min", creatures.direction_change_min),
            ("direction_change_max", creatures.direction_change_max),
        ];
        for (name, value) in floats {
            require_finite(name, value)?;
        }

        if !(world.chunk_size > 0.0) {
            return Err(SettingsError::Invalid(format!(
                "chunk_size must be positive, got {}",
                world.chunk_size
            )));
        }
        if world.vertices_per_side < 2 {
            return Err(SettingsError::Invalid(format!(
                "vertices_per_side must be at least 2, got {}",
                world.vertices_per_side
            )));
        }
        if world.visible_radius < 0 {
            return Err(SettingsError::Invalid(format!(
                "visible_radius must not be negative, got {}",
                world.visible_radius
            )));
        }
        if !(world.decoration_stride > 0.0) {
            return Err(SettingsError::Invalid(format!(
                "decoration_stride must be positive, got {}",
                world.decoration_stride
            )));
        }

        if creatures.min_spawn_radius > creatures.spawn_radius {
            return Err(SettingsError::Invalid(format!(
                "min_spawn_radius {} exceeds spawn_radius {}",
                creatures.min_spawn_radius, creatures.spawn_radius
            )));
        }
        if creatures.direction_change_min > creatures.direction_change_max {
            return Err(SettingsError::Invalid(format!(
                "direction_change_min {} exceeds direction_change_max {}",
                creatures.direction_change_min, creatures.direction_change_max
            )));
        }
        if !(0.0..=1.0).contains(&creatures.spawn_chance) {
            return Err(SettingsError::Invalid(format!(
                "spawn_chance must be within [0, 1], got {}",
                creatures.spawn_chance
            )));
        }

        if !(self.player.attack_duration > 0.0) {
            return Err(SettingsError::Invalid(format!(
                "attack_duration must be positive, got {}",
                self.player.attack_duration
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WorldSettings {
    pub seed: u32,
    pub chunk_size: f32,
    pub vertices_per_side: u32,
    pub max_height: f32,
    pub water_level: f32,
    pub visible_radius: i32,
    pub decoration_stride: f32,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            chunk_size: CHUNK_SIZE,
            vertices_per_side: CHUNK_VERTICES_PER_SIDE,
            max_height: MAX_HEIGHT,
            water_level: WATER_LEVEL,
            visible_radius: VISIBLE_CHUNKS_RADIUS,
            decoration_stride: DECORATION_STRIDE,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PlayerSettings {
    /// World units per tick.
    pub speed: f32,
    pub eye_height: f32,
    pub max_health: u32,
    pub invulnerable_duration: f32,
    pub attack_range: f32,
    pub attack_damage: u32,
    pub attack_duration: f32,
    pub spawn_point: [f32; 3],
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            speed: PLAYER_SPEED,
            eye_height: PLAYER_HEIGHT,
            max_health: PLAYER_MAX_HEALTH,
            invulnerable_duration: PLAYER_INVULNERABLE_DURATION,
            attack_range: PLAYER_ATTACK_RANGE,
            attack_damage: PLAYER_ATTACK_DAMAGE,
            attack_duration: PLAYER_ATTACK_DURATION,
            spawn_point: [0.0, PLAYER_HEIGHT, 0.0],
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CreatureSettings {
    pub max_population: usize,
    pub min_spawn_radius: f32,
    pub spawn_radius: f32,
    pub despawn_radius: f32,
    /// Probability of a spawn attempt per tick.
    pub spawn_chance: f32,
    pub aggro_range: f32,
    pub attack_range: f32,
    pub attack_damage: u32,
    pub attack_cooldown: f32,
    pub direction_change_min: f32,
    pub direction_change_max: f32,
}

impl Default for CreatureSettings {
    fn default() -> Self {
        Self {
            max_population: MAX_CREATURES,
            min_spawn_radius: CREATURE_MIN_SPAWN_RADIUS,
            spawn_radius: CREATURE_SPAWN_RADIUS,
            despawn_radius: CREATURE_DESPAWN_RADIUS,
            spawn_chance: CREATURE_SPAWN_CHANCE,
            aggro_range: CREATURE_AGGRO_RANGE,
            attack_range: CREATURE_ATTACK_RANGE,
            attack_damage: CREATURE_ATTACK_DAMAGE,
            attack_cooldown: CREATURE_ATTACK_COOLDOWN,
            direction_change_min: DIRECTION_CHANGE_MIN,
            direction_change_max: DIRECTION_CHANGE_MAX,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum HitPolicy {
    /// Each creature takes at most one hit per swing.
    #[default]
    OncePerSwing,
    /// Re-test every tick the hit window is open.
    EveryTick,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct CombatSettings {
    pub hit_policy: HitPolicy,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DebugSettings {
    /// Headless status line period; 0 disables it.
    pub log_every_ticks: u64,
}

impl Default for DebugSettings {
    fn default() -> Self {
        Self {
            log_every_ticks: 300,
        }
    }
}

pub fn default_settings_path() -> PathBuf {
    ProjectDirs::from("", "", "wildreach")
        .map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
        .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE))
}

pub fn save_settings(path: &Path, settings: &GameSettings) -> Result<(), SettingsError> {
    settings.validate()?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    bincode::serialize_into(&mut writer, settings)?;
    writer.flush()?;
    Ok(())
}

pub fn load_settings(path: &Path) -> Result<GameSettings, SettingsError> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let settings: GameSettings = bincode::deserialize_from(&mut reader)?;
    settings.validate()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        GameSettings::default().validate().unwrap();
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(SETTINGS_FILE);

        let mut settings = GameSettings::default();
        settings.world.seed = 77;
        settings.world.visible_radius = 5;
        settings.combat.hit_policy = HitPolicy::EveryTick;
        settings.player.spawn_point = [10.0, 3.0, -4.0];

        save_settings(&path, &settings).unwrap();
        let loaded = load_settings(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_settings(&dir.path().join("nope.bin")).unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }

    #[test]
    fn test_load_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, [1u8, 2, 3]).unwrap();
        assert!(matches!(
            load_settings(&path).unwrap_err(),
            SettingsError::Encoding(_)
        ));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut settings = GameSettings::default();
        settings.world.chunk_size = 0.0;
        assert!(matches!(settings.validate(), Err(SettingsError::Invalid(_))));

        let mut settings = GameSettings::default();
        settings.world.vertices_per_side = 1;
        assert!(settings.validate().is_err());

        let mut settings = GameSettings::default();
        settings.creatures.min_spawn_radius = 60.0;
        assert!(settings.validate().is_err());

        let mut settings = GameSettings::default();
        settings.creatures.spawn_chance = 1.5;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_finite_values() {
        let mut settings = GameSettings::default();
        settings.creatures.min_spawn_radius = f32::NAN;
        assert!(matches!(settings.validate(), Err(SettingsError::Invalid(_))));

        let mut settings = GameSettings::default();
        settings.creatures.direction_change_max = f32::NAN;
        assert!(settings.validate().is_err());

        let mut settings = GameSettings::default();
        settings.creatures.spawn_radius = f32::INFINITY;
        assert!(settings.validate().is_err());

        let mut settings = GameSettings::default();
        settings.player.spawn_point[1] = f32::NAN;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_save_rejects_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        let mut settings = GameSettings::default();
        settings.player.attack_duration = 0.0;
        assert!(save_settings(&path, &settings).is_err());
        assert!(!path.exists());
    }
}
