//! Terrain elevation and per-vertex surface classification.
//!
//! Heights are a pure function of global (x, z) and the seed, which is what
//! keeps chunk seams continuous and creature ground-clamping stable.

use crate::constants::*;
use crate::utils::settings::WorldSettings;
use crate::world::noise::NoiseField;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum SurfaceKind {
    Dirt,
    Grass,
    Stone,
}

impl SurfaceKind {
    pub fn color_hex(&self) -> u32 {
        match self {
            SurfaceKind::Dirt => COLOR_DIRT,
            SurfaceKind::Grass => COLOR_GRASS,
            SurfaceKind::Stone => COLOR_STONE,
        }
    }

    pub fn color(&self) -> [f32; 3] {
        hex_to_rgb(self.color_hex())
    }
}

pub fn hex_to_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xFF) as f32 / 255.0,
        ((hex >> 8) & 0xFF) as f32 / 255.0,
        (hex & 0xFF) as f32 / 255.0,
    ]
}

#[derive(Clone)]
pub struct HeightMap {
    noise: NoiseField,
    max_height: f32,
    water_level: f32,
}

impl HeightMap {
    pub fn new(noise: NoiseField, max_height: f32, water_level: f32) -> Self {
        HeightMap {
            noise,
            max_height,
            water_level,
        }
    }

    pub fn from_settings(settings: &WorldSettings) -> Self {
        Self::new(
            NoiseField::new(settings.seed),
            settings.max_height,
            settings.water_level,
        )
    }

    pub fn noise(&self) -> &NoiseField {
        &self.noise
    }

    pub fn max_height(&self) -> f32 {
        self.max_height
    }

    /// Absolute elevation of the water surface.
    pub fn water_height(&self) -> f32 {
        self.water_level * self.max_height
    }

    /// Blend of three octaves, biased toward flat lowlands and sharp peaks.
    /// Result is in [0, 1].
    pub fn terrain_noise(&self, x: f32, z: f32) -> f32 {
        let mountain = self.noise.sample01(x, z, MOUNTAIN_SCALE);
        let hill = self.noise.sample01(x, z, HILL_SCALE);
        let detail = self.noise.sample01(x, z, DETAIL_SCALE);

        let blended = mountain * MOUNTAIN_WEIGHT + hill * HILL_WEIGHT + detail * DETAIL_WEIGHT;
        blended.clamp(0.0, 1.0).powf(TERRAIN_EXPONENT)
    }

    pub fn get_height(&self, x: f32, z: f32) -> f32 {
        self.terrain_noise(x, z) * self.max_height
    }

    pub fn is_underwater(&self, height: f32) -> bool {
        height <= self.water_height()
    }

    pub fn classify(&self, height: f32) -> SurfaceKind {
        if height < self.water_height() + 0.2 {
            SurfaceKind::Dirt
        } else if height > self.max_height * 0.7 {
            SurfaceKind::Stone
        } else {
            SurfaceKind::Grass
        }
    }
}
