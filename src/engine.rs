//! Fixed-order tick driver
//!
//! One tick runs player input, terrain and water residency, creatures, combat
//! and presentation, always in that order, so movement and combat act on the
//! terrain of the current tick.

use crate::constants::MAX_FRAME_DELTA;
use crate::npc::directory::{CreatureDirectory, DirectoryReport};
use crate::player::combat::{CombatReport, CombatResolver};
use crate::player::input::InputState;
use crate::player::player::{Player, PlayerStep};
use crate::render::surface::{FrameView, Hud, PresentationSurface};
use crate::utils::settings::{GameSettings, SettingsError};
use crate::world::terrain::{World, WorldDelta};

#[derive(Default, Debug)]
pub struct TickReport {
    pub tick: u64,
    pub chunks_added: usize,
    pub chunks_removed: usize,
    pub water_added: usize,
    pub water_removed: usize,
    pub player: PlayerStep,
    pub creatures: DirectoryReport,
    pub combat: CombatReport,
    pub player_died: bool,
}

pub struct Engine {
    settings: GameSettings,
    world: World,
    player: Player,
    creatures: CreatureDirectory,
    combat: CombatResolver,
    ticks: u64,
    time: f32,
}

impl Engine {
    /// Validates `settings` before building the engine.
    pub fn try_new(settings: GameSettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self::new(settings))
    }

    pub fn new(settings: GameSettings) -> Self {
        let world = World::new(&settings.world);
        let player = Player::new(settings.player.clone());
        let creatures = CreatureDirectory::new(settings.creatures.clone(), u64::from(settings.world.seed));
        let combat = CombatResolver::new(settings.combat.hit_policy);
        tracing::info!(
            "Engine ready: seed {}, view radius {}, chunk size {}",
            settings.world.seed,
            settings.world.visible_radius,
            settings.world.chunk_size
        );
        Engine {
            settings,
            world,
            player,
            creatures,
            combat,
            ticks: 0,
            time: 0.0,
        }
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn creatures(&self) -> &CreatureDirectory {
        &self.creatures
    }

    pub fn creatures_mut(&mut self) -> &mut CreatureDirectory {
        &mut self.creatures
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Simulated seconds since start.
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn hud(&self) -> Hud {
        let player = &self.player;
        Hud {
            position: player.position,
            yaw: player.yaw,
            health: player.health(),
            max_health: player.max_health(),
            dead: player.is_dead(),
            attacking: player.is_attacking(),
            swing_progress: player.swing_progress(),
            sword: player.sword_pose(),
        }
    }

    /// Advances the simulation by `dt` seconds, clamped to a sane frame delta.
    pub fn tick<S: PresentationSurface>(&mut self, dt: f32, input: &InputState, surface: &mut S) -> TickReport {
        let dt = dt.clamp(0.0, MAX_FRAME_DELTA);
        self.ticks += 1;
        self.time += dt;

        let mut report = TickReport {
            tick: self.ticks,
            ..TickReport::default()
        };

        report.player = self.player.update(input, self.world.height_map(), dt);

        let delta = self.world.update(self.player.position);
        Self::forward_delta(&delta, surface, &mut report);

        let was_dead = self.player.is_dead();
        report.creatures = self.creatures.update(
            self.time,
            dt,
            self.player.position,
            self.player.vitality_mut(),
            self.world.height_map(),
        );
        if !was_dead && self.player.is_dead() {
            report.player_died = true;
            tracing::info!("Player died at tick {}", self.ticks);
        }

        report.combat = self.combat.update(&mut self.player, &mut self.creatures, dt);

        let snapshot = self.creatures.snapshot();
        surface.present(&FrameView {
            tick: self.ticks,
            time: self.time,
            hud: self.hud(),
            creatures: &snapshot,
        });

        report
    }

    /// Releases every live chunk and water tile on the surface.
    pub fn shutdown<S: PresentationSurface>(&mut self, surface: &mut S) {
        let delta = self.world.release_all();
        let mut report = TickReport::default();
        Self::forward_delta(&delta, surface, &mut report);
        self.creatures.clear();
        tracing::info!(
            "Engine stopped after {} ticks, released {} chunks",
            self.ticks,
            report.chunks_removed
        );
    }

    fn forward_delta<S: PresentationSurface>(delta: &WorldDelta, surface: &mut S, report: &mut TickReport) {
        for key in &delta.chunks.removed {
            surface.chunk_removed(*key);
        }
        for key in &delta.water.removed {
            surface.water_removed(*key);
        }
        for chunk in &delta.chunks.added {
            surface.chunk_added(chunk);
        }
        for tile in &delta.water.added {
            surface.water_added(tile);
        }
        report.chunks_added = delta.chunks.added.len();
        report.chunks_removed = delta.chunks.removed.len();
        report.water_added = delta.water.added.len();
        report.water_removed = delta.water.removed.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::surface::HeadlessSurface;

    fn small_settings() -> GameSettings {
        let mut settings = GameSettings::default();
        settings.world.vertices_per_side = 5;
        settings.world.visible_radius = 1;
        settings
    }

    #[test]
    fn test_first_tick_populates_surface() {
        let mut engine = Engine::new(small_settings());
        let mut surface = HeadlessSurface::new();
        let report = engine.tick(1.0 / 60.0, &InputState::default(), &mut surface);
        assert_eq!(report.tick, 1);
        assert_eq!(report.chunks_added, 9);
        assert_eq!(report.water_added, 9);
        assert_eq!(surface.live_chunks(), 9);
        assert_eq!(surface.stats().frames, 1);
        assert!(surface.last_hud().is_some());
    }

    #[test]
    fn test_try_new_rejects_invalid_settings() {
        let mut settings = small_settings();
        settings.creatures.direction_change_min = f32::NAN;
        assert!(matches!(Engine::try_new(settings), Err(SettingsError::Invalid(_))));
        assert!(Engine::try_new(small_settings()).is_ok());
    }

    #[test]
    fn test_dt_is_clamped() {
        let mut engine = Engine::new(small_settings());
        let mut surface = HeadlessSurface::new();
        engine.tick(5.0, &InputState::default(), &mut surface);
        approx::assert_relative_eq!(engine.time(), MAX_FRAME_DELTA);
        engine.tick(-1.0, &InputState::default(), &mut surface);
        approx::assert_relative_eq!(engine.time(), MAX_FRAME_DELTA);
    }

    #[test]
    fn test_shutdown_releases_everything() {
        let mut engine = Engine::new(small_settings());
        let mut surface = HeadlessSurface::new();
        engine.tick(1.0 / 60.0, &InputState::default(), &mut surface);
        engine.shutdown(&mut surface);
        assert_eq!(surface.live_chunks(), 0);
        assert_eq!(surface.live_water(), 0);
        let stats = surface.stats();
        assert_eq!(stats.chunks_created, stats.chunks_released);
        assert_eq!(stats.water_created, stats.water_released);
    }
}
