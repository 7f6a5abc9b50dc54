use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;

use crate::core::vitality::Vitality;
use crate::npc::kind::CreatureKind;
use crate::utils::settings::CreatureSettings;
use crate::world::heightmap::HeightMap;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct CreatureId(pub u64);

/// What a creature did during one update.
#[derive(Clone, Copy, Default, PartialEq, Debug)]
pub struct CreatureStep {
    pub aggro: bool,
    pub attacked: bool,
    pub killed_target: bool,
}

pub struct Creature {
    pub id: CreatureId,
    pub kind: CreatureKind,
    pub position: Vec3,
    pub move_direction: Vec3,
    /// Simulation time at which the wander direction is re-rolled.
    pub next_direction_change: f32,
    pub vitality: Vitality,
    pub attack_cooldown: f32,
    pub aggro: bool,
}

/// Uniform unit vector in the xz plane.
pub fn random_direction<R: Rng>(rng: &mut R) -> Vec3 {
    let angle: f32 = rng.random_range(0.0..TAU);
    Vec3::new(angle.cos(), 0.0, angle.sin())
}

pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    let dx = b.x - a.x;
    let dz = b.z - a.z;
    (dx * dx + dz * dz).sqrt()
}

impl Creature {
    /// Ground-clamped at `(x, z)`, facing a random direction.
    pub fn new<R: Rng>(
        id: CreatureId,
        kind: CreatureKind,
        x: f32,
        z: f32,
        height_map: &HeightMap,
        rng: &mut R,
    ) -> Self {
        Creature {
            id,
            kind,
            position: Vec3::new(x, height_map.get_height(x, z), z),
            move_direction: random_direction(rng),
            next_direction_change: 0.0,
            vitality: Vitality::without_invulnerability(kind.stats().max_health),
            attack_cooldown: 0.0,
            aggro: false,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.vitality.is_dead()
    }

    pub fn distance_to(&self, point: Vec3) -> f32 {
        planar_distance(self.position, point)
    }

    /// One tick of wander / chase / attack / move, in that order.
    #[allow(clippy::too_many_arguments)]
    pub fn update<R: Rng>(
        &mut self,
        time: f32,
        dt: f32,
        viewer: Vec3,
        target: &mut Vitality,
        height_map: &HeightMap,
        settings: &CreatureSettings,
        rng: &mut R,
    ) -> CreatureStep {
        let mut step = CreatureStep::default();
        if self.is_dead() {
            return step;
        }

        if time > self.next_direction_change {
            self.move_direction = random_direction(rng);
            self.next_direction_change = time
                + rng.random_range(settings.direction_change_min..=settings.direction_change_max);
        }

        let distance = self.distance_to(viewer);
        self.aggro = distance <= settings.aggro_range;
        step.aggro = self.aggro;

        if self.aggro {
            let toward = Vec3::new(viewer.x - self.position.x, 0.0, viewer.z - self.position.z);
            if toward.length_squared() > 0.0 {
                self.move_direction = toward.normalize();
            }

            if distance <= settings.attack_range && self.attack_cooldown <= 0.0 {
                step.attacked = true;
                step.killed_target = target.take_damage(settings.attack_damage);
                self.attack_cooldown = settings.attack_cooldown;
            }
        }

        if self.attack_cooldown > 0.0 {
            self.attack_cooldown = (self.attack_cooldown - dt).max(0.0);
        }

        let speed = self.kind.stats().speed;
        self.position.x += self.move_direction.x * speed;
        self.position.z += self.move_direction.z * speed;
        self.position.y = height_map.get_height(self.position.x, self.position.z);

        step
    }
}
