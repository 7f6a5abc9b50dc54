//! Creature population around the viewer
//!
//! Spawns creatures in a ring around the viewer, runs their per-tick behavior
//! and drops those that wander past the despawn radius. All randomness comes
//! from one seeded generator so a run is reproducible from its seed.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::core::vitality::Vitality;
use crate::npc::creature::{Creature, CreatureId};
use crate::npc::kind::CreatureKind;
use crate::utils::settings::CreatureSettings;
use crate::world::heightmap::HeightMap;

/// Read-only view of one creature for the presentation surface.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct CreatureSnapshot {
    pub id: CreatureId,
    pub kind: CreatureKind,
    pub position: Vec3,
    pub health_fraction: f32,
    pub aggro: bool,
}

#[derive(Default, Debug)]
pub struct DirectoryReport {
    pub spawned: Option<CreatureId>,
    pub despawned: Vec<CreatureId>,
    /// Attacks launched at the target this tick, landed or not.
    pub attacks: u32,
    pub target_killed: bool,
}

pub struct CreatureDirectory {
    creatures: Vec<Creature>,
    settings: CreatureSettings,
    rng: ChaCha8Rng,
    next_id: u64,
}

impl CreatureDirectory {
    pub fn new(settings: CreatureSettings, seed: u64) -> Self {
        CreatureDirectory {
            creatures: Vec::with_capacity(settings.max_population),
            settings,
            rng: ChaCha8Rng::seed_from_u64(seed),
            next_id: 1,
        }
    }

    pub fn settings(&self) -> &CreatureSettings {
        &self.settings
    }

    pub fn len(&self) -> usize {
        self.creatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.creatures.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.creatures.len() >= self.settings.max_population
    }

    pub fn get(&self, id: CreatureId) -> Option<&Creature> {
        self.creatures.iter().find(|c| c.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Creature> {
        self.creatures.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Creature> {
        self.creatures.iter_mut()
    }

    fn allocate_id(&mut self) -> CreatureId {
        let id = CreatureId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Attempts one spawn in the ring `[min_spawn_radius, spawn_radius]`
    /// around `viewer`. Underwater points and a full population are skipped.
    pub fn spawn(&mut self, viewer: Vec3, height_map: &HeightMap) -> Option<CreatureId> {
        if self.is_full() {
            tracing::trace!("Spawn skipped: population cap {} reached", self.settings.max_population);
            return None;
        }

        let angle: f32 = self.rng.random_range(0.0..TAU);
        let distance: f32 = self
            .rng
            .random_range(self.settings.min_spawn_radius..=self.settings.spawn_radius);
        let x = viewer.x + angle.cos() * distance;
        let z = viewer.z + angle.sin() * distance;

        let height = height_map.get_height(x, z);
        if height_map.is_underwater(height) {
            tracing::trace!("Spawn skipped: ({:.1}, {:.1}) is underwater", x, z);
            return None;
        }

        let kind = CreatureKind::ALL[self.rng.random_range(0..CreatureKind::ALL.len())];
        self.insert(kind, x, z, height_map)
    }

    /// Places a creature of `kind` at `(x, z)` on the ground, honoring only
    /// the population cap.
    pub fn spawn_at(&mut self, kind: CreatureKind, x: f32, z: f32, height_map: &HeightMap) -> Option<CreatureId> {
        if self.is_full() {
            return None;
        }
        self.insert(kind, x, z, height_map)
    }

    fn insert(&mut self, kind: CreatureKind, x: f32, z: f32, height_map: &HeightMap) -> Option<CreatureId> {
        let id = self.allocate_id();
        let creature = Creature::new(id, kind, x, z, height_map, &mut self.rng);
        tracing::debug!(
            "Spawned {} #{} at ({:.1}, {:.1}, {:.1})",
            kind.name(),
            id.0,
            creature.position.x,
            creature.position.y,
            creature.position.z
        );
        self.creatures.push(creature);
        Some(id)
    }

    /// Spawn roll, per-creature behavior, then despawn by distance.
    pub fn update(
        &mut self,
        time: f32,
        dt: f32,
        viewer: Vec3,
        target: &mut Vitality,
        height_map: &HeightMap,
    ) -> DirectoryReport {
        let mut report = DirectoryReport::default();

        if self.rng.random::<f32>() < self.settings.spawn_chance {
            report.spawned = self.spawn(viewer, height_map);
        }

        for creature in &mut self.creatures {
            let step = creature.update(time, dt, viewer, target, height_map, &self.settings, &mut self.rng);
            if step.attacked {
                report.attacks += 1;
                tracing::debug!(
                    "{} #{} attacks, target health {}",
                    creature.kind.name(),
                    creature.id.0,
                    target.health()
                );
            }
            report.target_killed |= step.killed_target;
        }

        let despawn_radius = self.settings.despawn_radius;
        self.creatures.retain(|creature| {
            if creature.distance_to(viewer) > despawn_radius {
                tracing::debug!("Despawned {} #{}", creature.kind.name(), creature.id.0);
                report.despawned.push(creature.id);
                false
            } else {
                true
            }
        });

        report
    }

    /// Removes every dead creature and returns what was removed.
    pub fn reap_dead(&mut self) -> Vec<(CreatureId, CreatureKind)> {
        let mut reaped = Vec::new();
        self.creatures.retain(|creature| {
            if creature.is_dead() {
                reaped.push((creature.id, creature.kind));
                false
            } else {
                true
            }
        });
        reaped
    }

    /// Spawn order, which is also id order.
    pub fn snapshot(&self) -> Vec<CreatureSnapshot> {
        self.creatures
            .iter()
            .map(|creature| CreatureSnapshot {
                id: creature.id,
                kind: creature.kind,
                position: creature.position,
                health_fraction: creature.vitality.fraction(),
                aggro: creature.aggro,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.creatures.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::noise::NoiseField;

    fn height_map() -> HeightMap {
        HeightMap::new(NoiseField::new(2137), 15.0, 0.3)
    }

    fn eager_settings() -> CreatureSettings {
        CreatureSettings {
            spawn_chance: 1.0,
            ..CreatureSettings::default()
        }
    }

    #[test]
    fn test_population_never_exceeds_cap() {
        let height_map = height_map();
        let mut directory = CreatureDirectory::new(eager_settings(), 1);
        let mut player = Vitality::new(100, 1.0);
        for tick in 0..2000 {
            directory.update(tick as f32 / 60.0, 1.0 / 60.0, Vec3::ZERO, &mut player, &height_map);
            assert!(directory.len() <= directory.settings().max_population);
            if player.is_dead() {
                player.revive();
            }
        }
    }

    #[test]
    fn test_spawns_land_in_ring_on_ground() {
        let height_map = height_map();
        let mut directory = CreatureDirectory::new(eager_settings(), 9);
        let viewer = Vec3::new(100.0, 0.0, -40.0);
        for _ in 0..200 {
            directory.spawn(viewer, &height_map);
        }
        assert!(!directory.is_empty());
        for creature in directory.iter() {
            let distance = creature.distance_to(viewer);
            assert!(distance >= 20.0 - 1e-3 && distance <= 50.0 + 1e-3);
            assert!(!height_map.is_underwater(creature.position.y));
            assert_eq!(
                creature.position.y,
                height_map.get_height(creature.position.x, creature.position.z)
            );
        }
    }

    #[test]
    fn test_flooded_world_rejects_every_spawn() {
        let flooded = HeightMap::new(NoiseField::new(2137), 15.0, 1.0);
        let mut directory = CreatureDirectory::new(eager_settings(), 3);
        for _ in 0..100 {
            assert!(directory.spawn(Vec3::ZERO, &flooded).is_none());
        }
        assert!(directory.is_empty());
    }

    #[test]
    fn test_far_creatures_despawn() {
        let height_map = height_map();
        let settings = CreatureSettings {
            spawn_chance: 0.0,
            ..CreatureSettings::default()
        };
        let mut directory = CreatureDirectory::new(settings, 5);
        let near = directory.spawn_at(CreatureKind::Goblin, 30.0, 0.0, &height_map).unwrap();
        let far = directory.spawn_at(CreatureKind::Skeleton, 500.0, 0.0, &height_map).unwrap();

        let mut player = Vitality::new(100, 1.0);
        let report = directory.update(0.0, 1.0 / 60.0, Vec3::ZERO, &mut player, &height_map);
        assert_eq!(report.despawned, vec![far]);
        assert!(directory.get(near).is_some());
        assert!(directory.get(far).is_none());
    }

    #[test]
    fn test_reap_dead_and_snapshot() {
        let height_map = height_map();
        let mut directory = CreatureDirectory::new(CreatureSettings::default(), 5);
        let a = directory.spawn_at(CreatureKind::Goblin, 5.0, 5.0, &height_map).unwrap();
        let b = directory.spawn_at(CreatureKind::Skeleton, -5.0, 5.0, &height_map).unwrap();
        assert!(a < b);

        for creature in directory.iter_mut() {
            if creature.id == b {
                creature.vitality.take_damage(40);
            }
            if creature.id == a {
                creature.vitality.take_damage(50);
            }
        }

        let snapshot = directory.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].id, a);
        assert_eq!(snapshot[1].health_fraction, 0.5);

        let reaped = directory.reap_dead();
        assert_eq!(reaped, vec![(a, CreatureKind::Goblin)]);
        assert_eq!(directory.len(), 1);
    }

    #[test]
    fn test_same_seed_same_population() {
        let height_map = height_map();
        let run = |seed| {
            let mut directory = CreatureDirectory::new(eager_settings(), seed);
            let mut player = Vitality::new(100, 1.0);
            for tick in 0..300 {
                directory.update(tick as f32 / 60.0, 1.0 / 60.0, Vec3::ZERO, &mut player, &height_map);
            }
            directory.snapshot()
        };
        assert_eq!(run(42), run(42));
    }
}
