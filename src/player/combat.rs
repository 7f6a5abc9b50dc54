//! Melee hit resolution
//!
//! Advances the player's swing and, while the hit window is open, damages
//! every live creature inside the frontal cone and reach. Dead creatures are
//! reaped from the directory at the end of the pass.

use glam::Vec3;
use rustc_hash::FxHashSet;

use crate::constants::{HIT_CONE_DOT, HIT_WINDOW_END, HIT_WINDOW_START};
use crate::npc::creature::CreatureId;
use crate::npc::directory::CreatureDirectory;
use crate::npc::kind::CreatureKind;
use crate::player::player::Player;
pub use crate::utils::settings::HitPolicy;

#[derive(Default, Debug)]
pub struct CombatReport {
    pub hits: Vec<CreatureId>,
    pub kills: Vec<(CreatureId, CreatureKind)>,
    pub swing_progress: Option<f32>,
}

pub struct CombatResolver {
    policy: HitPolicy,
    swing: u64,
    /// Progress reached on the previous tick of the current swing.
    last_progress: f32,
    struck: FxHashSet<CreatureId>,
}

/// True when `target` lies within `range` of `origin` on the ground plane and
/// inside the cone around `forward`. A target at zero distance has no
/// direction and is never inside the cone.
pub fn in_strike_zone(origin: Vec3, forward: Vec3, target: Vec3, range: f32) -> bool {
    let to_target = Vec3::new(target.x - origin.x, 0.0, target.z - origin.z);
    let distance = to_target.length();
    if distance > range {
        return false;
    }
    let direction = to_target.normalize_or_zero();
    forward.dot(direction) > HIT_CONE_DOT
}

impl CombatResolver {
    pub fn new(policy: HitPolicy) -> Self {
        CombatResolver {
            policy,
            swing: 0,
            last_progress: 0.0,
            struck: FxHashSet::default(),
        }
    }

    pub fn policy(&self) -> HitPolicy {
        self.policy
    }

    pub fn update(&mut self, player: &mut Player, creatures: &mut CreatureDirectory, dt: f32) -> CombatReport {
        let mut report = CombatReport::default();

        if player.swing_count() != self.swing {
            self.swing = player.swing_count();
            self.last_progress = 0.0;
            self.struck.clear();
        }

        let Some(progress) = player.advance_attack(dt) else {
            return report;
        };
        report.swing_progress = Some(progress);

        // A long tick can step over the whole window, so a once-per-swing hit
        // is tested against the progress span covered since the last tick.
        let window_open = match self.policy {
            HitPolicy::OncePerSwing => {
                self.last_progress <= HIT_WINDOW_END && progress >= HIT_WINDOW_START
            }
            HitPolicy::EveryTick => (HIT_WINDOW_START..=HIT_WINDOW_END).contains(&progress),
        };
        self.last_progress = progress;
        if player.is_dead() || !window_open {
            return report;
        }

        let origin = player.position;
        let forward = player.forward();
        let range = player.settings().attack_range;
        let damage = player.settings().attack_damage;

        for creature in creatures.iter_mut() {
            if creature.is_dead() || !in_strike_zone(origin, forward, creature.position, range) {
                continue;
            }
            if self.policy == HitPolicy::OncePerSwing && !self.struck.insert(creature.id) {
                continue;
            }
            creature.vitality.take_damage(damage);
            report.hits.push(creature.id);
            tracing::debug!(
                "Hit {} #{} for {}, health {}",
                creature.kind.name(),
                creature.id.0,
                damage,
                creature.vitality.health()
            );
        }

        report.kills = creatures.reap_dead();
        for (id, kind) in &report.kills {
            tracing::info!("{} #{} killed", kind.name(), id.0);
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::settings::{CreatureSettings, PlayerSettings};
    use crate::world::heightmap::HeightMap;
    use crate::world::noise::NoiseField;
    use test_case::test_case;

    fn height_map() -> HeightMap {
        HeightMap::new(NoiseField::new(2137), 15.0, 0.3)
    }

    fn directory() -> CreatureDirectory {
        CreatureDirectory::new(
            CreatureSettings {
                spawn_chance: 0.0,
                ..CreatureSettings::default()
            },
            1,
        )
    }

    /// Ticks the resolver through one whole swing and collects every report.
    fn run_swing(resolver: &mut CombatResolver, player: &mut Player, creatures: &mut CreatureDirectory, dt: f32) -> Vec<CombatReport> {
        assert!(player.begin_attack());
        let mut reports = Vec::new();
        while player.is_attacking() {
            reports.push(resolver.update(player, creatures, dt));
        }
        reports
    }

    #[test_case(Vec3::new(0.0, 0.0, -2.0), true ; "straight ahead")]
    #[test_case(Vec3::new(0.0, 0.0, 2.0), false ; "directly behind")]
    #[test_case(Vec3::new(2.0, 0.0, 0.0), false ; "to the side")]
    #[test_case(Vec3::new(0.5, 0.0, -2.0), true ; "slightly off axis")]
    #[test_case(Vec3::new(0.0, 0.0, -3.0), false ; "out of reach")]
    #[test_case(Vec3::new(0.0, 5.0, -2.0), true ; "height ignored")]
    #[test_case(Vec3::ZERO, false ; "same spot")]
    fn test_strike_zone(target: Vec3, expected: bool) {
        let forward = Vec3::new(0.0, 0.0, -1.0);
        assert_eq!(in_strike_zone(Vec3::ZERO, forward, target, 2.5), expected);
    }

    #[test]
    fn test_once_per_swing_damages_exactly_once() {
        let height_map = height_map();
        let mut creatures = directory();
        let mut player = Player::new(PlayerSettings::default());
        let ahead = creatures.spawn_at(CreatureKind::Skeleton, 0.0, -2.0, &height_map).unwrap();
        let behind = creatures.spawn_at(CreatureKind::Skeleton, 0.0, 2.0, &height_map).unwrap();

        let mut resolver = CombatResolver::new(HitPolicy::OncePerSwing);
        let reports = run_swing(&mut resolver, &mut player, &mut creatures, 1.0 / 60.0);

        let hits: usize = reports.iter().map(|r| r.hits.len()).sum();
        assert_eq!(hits, 1);
        assert_eq!(creatures.get(ahead).map(|c| c.vitality.health()), Some(60));
        assert_eq!(creatures.get(behind).map(|c| c.vitality.health()), Some(80));
    }

    #[test]
    fn test_every_tick_hits_each_open_tick() {
        let height_map = height_map();
        let mut creatures = directory();
        let mut player = Player::new(PlayerSettings::default());
        creatures.spawn_at(CreatureKind::Skeleton, 0.0, -2.0, &height_map).unwrap();

        let mut resolver = CombatResolver::new(HitPolicy::EveryTick);
        let reports = run_swing(&mut resolver, &mut player, &mut creatures, 0.1);

        let hits: usize = reports.iter().map(|r| r.hits.len()).sum();
        assert_eq!(hits, 2);
    }

    #[test]
    fn test_short_swing_still_lands_when_ticks_skip_the_window() {
        let height_map = height_map();
        let mut creatures = directory();
        let mut player = Player::new(PlayerSettings {
            attack_duration: 0.15,
            ..PlayerSettings::default()
        });
        let goblin = creatures.spawn_at(CreatureKind::Goblin, 0.0, -1.0, &height_map).unwrap();

        let mut resolver = CombatResolver::new(HitPolicy::OncePerSwing);
        let reports = run_swing(&mut resolver, &mut player, &mut creatures, 0.1);

        // Samples land at 2/3 and 1, both past the window.
        assert_eq!(reports.len(), 2);
        for report in &reports {
            let progress = report.swing_progress.unwrap();
            assert!(!(HIT_WINDOW_START..=HIT_WINDOW_END).contains(&progress));
        }
        let hits: usize = reports.iter().map(|r| r.hits.len()).sum();
        assert_eq!(hits, 1);
        assert_eq!(creatures.get(goblin).map(|c| c.vitality.health()), Some(30));
    }

    #[test]
    fn test_swing_that_has_passed_the_window_stops_hitting() {
        let height_map = height_map();
        let mut creatures = directory();
        let mut player = Player::new(PlayerSettings::default());
        let mut resolver = CombatResolver::new(HitPolicy::OncePerSwing);

        assert!(player.begin_attack());
        for _ in 0..6 {
            resolver.update(&mut player, &mut creatures, 0.1);
        }
        // The creature shows up after the window has closed.
        creatures.spawn_at(CreatureKind::Goblin, 0.0, -1.0, &height_map).unwrap();
        let mut hits = 0;
        while player.is_attacking() {
            hits += resolver.update(&mut player, &mut creatures, 0.1).hits.len();
        }
        assert_eq!(hits, 0);
    }

    #[test]
    fn test_multiple_creatures_in_one_swing() {
        let height_map = height_map();
        let mut creatures = directory();
        let mut player = Player::new(PlayerSettings::default());
        creatures.spawn_at(CreatureKind::Goblin, 0.3, -1.5, &height_map).unwrap();
        creatures.spawn_at(CreatureKind::Goblin, -0.3, -1.5, &height_map).unwrap();

        let mut resolver = CombatResolver::new(HitPolicy::OncePerSwing);
        let reports = run_swing(&mut resolver, &mut player, &mut creatures, 1.0 / 60.0);
        let hits: usize = reports.iter().map(|r| r.hits.len()).sum();
        assert_eq!(hits, 2);
    }

    #[test]
    fn test_lethal_hit_reaps_creature() {
        let height_map = height_map();
        let mut creatures = directory();
        let mut player = Player::new(PlayerSettings::default());
        let goblin = creatures.spawn_at(CreatureKind::Goblin, 0.0, -1.0, &height_map).unwrap();

        let mut resolver = CombatResolver::new(HitPolicy::OncePerSwing);
        let mut kills = Vec::new();
        for _ in 0..3 {
            for report in run_swing(&mut resolver, &mut player, &mut creatures, 1.0 / 60.0) {
                kills.extend(report.kills);
            }
        }
        assert_eq!(kills, vec![(goblin, CreatureKind::Goblin)]);
        assert!(creatures.is_empty());
    }

    #[test]
    fn test_idle_player_deals_no_damage() {
        let height_map = height_map();
        let mut creatures = directory();
        let mut player = Player::new(PlayerSettings::default());
        creatures.spawn_at(CreatureKind::Goblin, 0.0, -1.0, &height_map).unwrap();

        let mut resolver = CombatResolver::new(HitPolicy::OncePerSwing);
        for _ in 0..120 {
            let report = resolver.update(&mut player, &mut creatures, 1.0 / 60.0);
            assert!(report.hits.is_empty());
            assert!(report.swing_progress.is_none());
        }
    }
}
