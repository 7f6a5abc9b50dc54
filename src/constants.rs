// World constants
pub const DEFAULT_SEED: u32 = 2137;
pub const CHUNK_SIZE: f32 = 40.0;
pub const CHUNK_VERTICES_PER_SIDE: u32 = 40;
pub const MAX_HEIGHT: f32 = 15.0;
pub const WATER_LEVEL: f32 = 0.3;
pub const VISIBLE_CHUNKS_RADIUS: i32 = 3;
pub const DECORATION_STRIDE: f32 = 4.0;

// Terrain noise octaves (scale, weight)
pub const MOUNTAIN_SCALE: f32 = 0.005;
pub const MOUNTAIN_WEIGHT: f32 = 0.6;
pub const HILL_SCALE: f32 = 0.02;
pub const HILL_WEIGHT: f32 = 0.3;
pub const DETAIL_SCALE: f32 = 0.1;
pub const DETAIL_WEIGHT: f32 = 0.1;
pub const TERRAIN_EXPONENT: f32 = 1.5;
pub const DECORATION_NOISE_SCALE: f32 = 0.1;

// Surface colors
pub const COLOR_GRASS: u32 = 0x7CFC00;
pub const COLOR_DIRT: u32 = 0x8B4513;
pub const COLOR_STONE: u32 = 0x808080;
pub const COLOR_WATER: u32 = 0x1E90FF;
pub const COLOR_TREE_LEAVES: u32 = 0x228B22;
pub const COLOR_TREE_TRUNK: u32 = 0x8B4513;
pub const COLOR_BUSH: u32 = 0x006400;
pub const COLOR_ROCK: u32 = 0x696969;
pub const WATER_OPACITY: f32 = 0.7;

// Player constants
pub const PLAYER_SPEED: f32 = 0.1;
pub const PLAYER_HEIGHT: f32 = 1.2;
pub const PLAYER_MAX_HEALTH: u32 = 100;
pub const PLAYER_INVULNERABLE_DURATION: f32 = 1.0;
pub const PLAYER_ATTACK_RANGE: f32 = 2.5;
pub const PLAYER_ATTACK_DAMAGE: u32 = 20;
pub const PLAYER_ATTACK_DURATION: f32 = 1.0;
pub const HIT_WINDOW_START: f32 = 0.25;
pub const HIT_WINDOW_END: f32 = 0.5;
pub const HIT_CONE_DOT: f32 = 0.5;

// Creature constants
pub const MAX_CREATURES: usize = 20;
pub const CREATURE_MIN_SPAWN_RADIUS: f32 = 20.0;
pub const CREATURE_SPAWN_RADIUS: f32 = 50.0;
pub const CREATURE_DESPAWN_RADIUS: f32 = 80.0;
pub const CREATURE_SPAWN_CHANCE: f32 = 0.01;
pub const CREATURE_AGGRO_RANGE: f32 = 10.0;
pub const CREATURE_ATTACK_RANGE: f32 = 2.0;
pub const CREATURE_ATTACK_DAMAGE: u32 = 10;
pub const CREATURE_ATTACK_COOLDOWN: f32 = 2.0;
pub const DIRECTION_CHANGE_MIN: f32 = 3.0;
pub const DIRECTION_CHANGE_MAX: f32 = 8.0;

// Driver constants
pub const DEFAULT_TICK_RATE: u32 = 60;
pub const MAX_FRAME_DELTA: f32 = 0.1;
