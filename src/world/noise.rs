//! Seeded 2D coherent noise
//!
//! Thin wrapper over FastNoiseLite configured as raw OpenSimplex2 at unit
//! frequency, so callers control scale explicitly.

use fastnoise_lite::{FastNoiseLite, NoiseType};

/// Deterministic 2D noise sampler. Same seed, same field.
pub struct NoiseField {
    noise: FastNoiseLite,
    seed: u32,
}

impl NoiseField {
    pub fn new(seed: u32) -> Self {
        let mut noise = FastNoiseLite::with_seed(seed as i32);
        noise.set_noise_type(Some(NoiseType::OpenSimplex2));
        noise.set_frequency(Some(1.0));
        NoiseField { noise, seed }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Sample in [-1, 1].
    pub fn sample(&self, x: f32, z: f32) -> f32 {
        self.noise.get_noise_2d(x, z).clamp(-1.0, 1.0)
    }

    /// Sample at `(x * scale, z * scale)`, remapped to [0, 1].
    pub fn sample01(&self, x: f32, z: f32, scale: f32) -> f32 {
        (self.sample(x * scale, z * scale) + 1.0) * 0.5
    }
}

// FastNoiseLite state is fully derived from the seed
impl Clone for NoiseField {
    fn clone(&self) -> Self {
        NoiseField::new(self.seed)
    }
}
