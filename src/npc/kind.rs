//! Creature kinds and their data tables.
//!
//! Each kind maps to a stat block and a list of primitive body parts. The
//! presentation surface turns the parts into meshes; the simulation only reads
//! the stats.

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum CreatureKind {
    /// Fast, fragile melee creature.
    Goblin,
    /// Slow, sturdier melee creature.
    Skeleton,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct CreatureStats {
    pub name: &'static str,
    pub max_health: u32,
    /// World units per tick.
    pub speed: f32,
    /// Vertical offset between the ground sample and the mesh origin.
    pub height_offset: f32,
    pub idle: IdleMotion,
}

/// Looping motion applied only when drawing; it never moves the creature.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum IdleMotion {
    /// Vertical sway of `amplitude` at `frequency` radians per second.
    Bob { frequency: f32, amplitude: f32 },
    /// Turns by `angle` while the wave at `frequency` is above `threshold`.
    Twitch { frequency: f32, threshold: f32, angle: f32 },
}

#[derive(Clone, Copy, Default, PartialEq, Debug)]
pub struct IdlePose {
    pub lift: f32,
    /// Yaw in radians.
    pub turn: f32,
}

impl IdleMotion {
    pub fn pose(&self, time: f32) -> IdlePose {
        match *self {
            IdleMotion::Bob { frequency, amplitude } => IdlePose {
                lift: (time * frequency).sin() * amplitude,
                turn: 0.0,
            },
            IdleMotion::Twitch {
                frequency,
                threshold,
                angle,
            } => IdlePose {
                lift: 0.0,
                turn: if (time * frequency).sin() > threshold { angle } else { 0.0 },
            },
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PartShape {
    /// `size` is width, height, depth.
    Box,
    /// `size` is radius, height, radius.
    Cylinder,
    /// `size` is radius on every axis.
    Sphere,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct BodyPart {
    pub shape: PartShape,
    pub offset: [f32; 3],
    pub size: [f32; 3],
    /// Roll around the local z axis, radians.
    pub tilt: f32,
    pub color: u32,
}

const fn part(shape: PartShape, offset: [f32; 3], size: [f32; 3], tilt: f32, color: u32) -> BodyPart {
    BodyPart {
        shape,
        offset,
        size,
        tilt,
        color,
    }
}

const GOBLIN_SKIN: u32 = 0x2E8B57;
const BONE: u32 = 0xE0E0E0;
const SKULL: u32 = 0xF5F5F5;
const WHITE: u32 = 0xFFFFFF;
const BLACK: u32 = 0x000000;
const HILT: u32 = 0x8B4513;
const BLADE: u32 = 0xA9A9A9;
const QUARTER_TURN: f32 = std::f32::consts::FRAC_PI_4;

const GOBLIN_STATS: CreatureStats = CreatureStats {
    name: "Goblin",
    max_health: 50,
    speed: 0.07,
    height_offset: 0.4,
    idle: IdleMotion::Bob {
        frequency: 5.0,
        amplitude: 0.02,
    },
};

const SKELETON_STATS: CreatureStats = CreatureStats {
    name: "Skeleton",
    max_health: 80,
    speed: 0.04,
    height_offset: 0.5,
    idle: IdleMotion::Twitch {
        frequency: 10.0,
        threshold: 0.9,
        angle: 0.1,
    },
};

const GOBLIN_PARTS: [BodyPart; 10] = [
    part(PartShape::Cylinder, [0.0, 0.5, 0.0], [0.3, 0.8, 0.3], 0.0, GOBLIN_SKIN),
    part(PartShape::Sphere, [0.0, 1.1, 0.0], [0.25; 3], 0.0, GOBLIN_SKIN),
    part(PartShape::Sphere, [0.12, 1.15, 0.18], [0.07; 3], 0.0, WHITE),
    part(PartShape::Sphere, [-0.12, 1.15, 0.18], [0.07; 3], 0.0, WHITE),
    part(PartShape::Sphere, [0.12, 1.15, 0.24], [0.03; 3], 0.0, BLACK),
    part(PartShape::Sphere, [-0.12, 1.15, 0.24], [0.03; 3], 0.0, BLACK),
    part(PartShape::Cylinder, [0.4, 0.7, 0.0], [0.08, 0.5, 0.08], -QUARTER_TURN, GOBLIN_SKIN),
    part(PartShape::Cylinder, [-0.4, 0.7, 0.0], [0.08, 0.5, 0.08], QUARTER_TURN, GOBLIN_SKIN),
    part(PartShape::Cylinder, [0.15, 0.1, 0.0], [0.1, 0.5, 0.1], 0.0, GOBLIN_SKIN),
    part(PartShape::Cylinder, [-0.15, 0.1, 0.0], [0.1, 0.5, 0.1], 0.0, GOBLIN_SKIN),
];

const SKELETON_PARTS: [BodyPart; 10] = [
    part(PartShape::Box, [0.0, 0.5, 0.0], [0.4, 0.8, 0.2], 0.0, BONE),
    part(PartShape::Box, [0.0, 1.1, 0.0], [0.3, 0.3, 0.3], 0.0, SKULL),
    part(PartShape::Box, [0.08, 1.12, 0.18], [0.08, 0.08, 0.05], 0.0, BLACK),
    part(PartShape::Box, [-0.08, 1.12, 0.18], [0.08, 0.08, 0.05], 0.0, BLACK),
    part(PartShape::Box, [0.3, 0.6, 0.0], [0.1, 0.6, 0.1], 0.0, BONE),
    part(PartShape::Box, [-0.3, 0.6, 0.0], [0.1, 0.6, 0.1], 0.0, BONE),
    part(PartShape::Box, [0.15, 0.1, 0.0], [0.1, 0.6, 0.1], 0.0, BONE),
    part(PartShape::Box, [-0.15, 0.1, 0.0], [0.1, 0.6, 0.1], 0.0, BONE),
    part(PartShape::Box, [0.3, 0.3, 0.2], [0.05, 0.2, 0.05], 0.0, HILT),
    part(PartShape::Box, [0.3, 0.65, 0.2], [0.05, 0.5, 0.02], 0.0, BLADE),
];

impl CreatureKind {
    pub const ALL: [CreatureKind; 2] = [CreatureKind::Goblin, CreatureKind::Skeleton];

    pub fn stats(&self) -> &'static CreatureStats {
        match self {
            CreatureKind::Goblin => &GOBLIN_STATS,
            CreatureKind::Skeleton => &SKELETON_STATS,
        }
    }

    pub fn body_parts(&self) -> &'static [BodyPart] {
        match self {
            CreatureKind::Goblin => &GOBLIN_PARTS,
            CreatureKind::Skeleton => &SKELETON_PARTS,
        }
    }

    pub fn name(&self) -> &'static str {
        self.stats().name
    }

    pub fn idle_pose(&self, time: f32) -> IdlePose {
        self.stats().idle.pose(time)
    }
}
