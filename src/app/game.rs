use std::path::PathBuf;

use clap::Parser;

use wildreach::utils::settings::{
    GameSettings, default_settings_path, load_settings, save_settings,
};
use wildreach::{DEFAULT_TICK_RATE, Engine, HeadlessSurface, InputState, PLAYER_ATTACK_RANGE};

/// Wildreach: endless terrain with hostile creatures, simulated headless
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// World seed (overrides the settings file)
    #[arg(long)]
    seed: Option<u32>,

    /// Number of ticks to simulate
    #[arg(long, default_value_t = 3600)]
    ticks: u64,

    /// Simulated ticks per second
    #[arg(long, default_value_t = DEFAULT_TICK_RATE)]
    tick_rate: u32,

    /// Visible chunk radius (overrides the settings file)
    #[arg(long)]
    radius: Option<i32>,

    /// Settings file (default: the per-user config directory)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Write the effective settings to the settings file and exit
    #[arg(long, default_value_t = false)]
    save_settings: bool,
}

/// Scripted stand-in for a person at the keyboard: walks, sweeps the view,
/// turns to fight anything close and respawns after dying.
struct Autopilot {
    heading: f32,
}

impl Autopilot {
    fn new() -> Self {
        Autopilot { heading: 0.0 }
    }

    fn next(&mut self, engine: &Engine, tick: u64, dt: f32) -> InputState {
        let player = engine.player();
        if player.is_dead() {
            return InputState {
                respawn: true,
                yaw: self.heading,
                ..InputState::default()
            };
        }

        self.heading += dt * 0.15;
        let mut input = InputState {
            move_forward: tick % 600 < 480,
            yaw: self.heading,
            ..InputState::default()
        };

        let nearest = engine
            .creatures()
            .iter()
            .map(|c| (c.distance_to(player.position), c.position))
            .min_by(|a, b| a.0.total_cmp(&b.0));
        if let Some((distance, position)) = nearest {
            if distance < PLAYER_ATTACK_RANGE * 2.0 {
                let dx = position.x - player.position.x;
                let dz = position.z - player.position.z;
                input.yaw = (-dx).atan2(-dz);
                input.move_forward = distance > PLAYER_ATTACK_RANGE * 0.8;
                input.attack = true;
            }
        }
        input
    }
}

fn resolve_settings(args: &Args) -> GameSettings {
    let path = args.settings.clone().unwrap_or_else(default_settings_path);
    let mut settings = if path.exists() {
        match load_settings(&path) {
            Ok(settings) => {
                tracing::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                tracing::warn!("Failed to load settings from {}: {}; using defaults", path.display(), e);
                GameSettings::default()
            }
        }
    } else {
        tracing::debug!("No settings at {}, using defaults", path.display());
        GameSettings::default()
    };

    if let Some(seed) = args.seed {
        settings.world.seed = seed;
    }
    if let Some(radius) = args.radius {
        settings.world.visible_radius = radius;
    }
    settings
}

pub fn run_game() {
    // Parse CLI arguments
    let args = Args::parse();
    let settings = resolve_settings(&args);

    if args.save_settings {
        let path = args.settings.clone().unwrap_or_else(default_settings_path);
        match save_settings(&path, &settings) {
            Ok(()) => tracing::info!("Settings saved to {}", path.display()),
            Err(e) => tracing::error!("Failed to save settings to {}: {}", path.display(), e),
        }
        return;
    }

    let tick_rate = args.tick_rate.max(1);
    let dt = 1.0 / tick_rate as f32;
    let log_every = settings.debug.log_every_ticks;

    tracing::info!("Generating world...");
    let mut engine = match Engine::try_new(settings) {
        Ok(engine) => engine,
        Err(e) => {
            tracing::error!("Refusing to start: {}", e);
            return;
        }
    };
    let mut surface = HeadlessSurface::new();
    let mut autopilot = Autopilot::new();

    let mut kills = 0usize;
    let mut deaths = 0usize;
    let mut damage_taken = 0u32;

    for tick in 0..args.ticks {
        let input = autopilot.next(&engine, tick, dt);
        let health_before = engine.player().health();
        let report = engine.tick(dt, &input, &mut surface);

        damage_taken += health_before.saturating_sub(engine.player().health());
        kills += report.combat.kills.len();
        if report.player_died {
            deaths += 1;
        }
        if tick == 0 {
            tracing::info!("World generated! {} chunks resident", surface.live_chunks());
        }

        if log_every > 0 && report.tick % log_every == 0 {
            let hud = engine.hud();
            tracing::info!(
                "t={:.1}s pos=({:.1}, {:.1}, {:.1}) hp {}/{} creatures {} chunks {} kills {} deaths {}",
                engine.time(),
                hud.position.x,
                hud.position.y,
                hud.position.z,
                hud.health,
                hud.max_health,
                engine.creatures().len(),
                surface.live_chunks(),
                kills,
                deaths
            );
        }
    }

    engine.shutdown(&mut surface);
    let stats = surface.stats();
    tracing::info!(
        "Finished {} ticks: {} kills, {} deaths, {} damage taken, chunks built/released {}/{}, water {}/{}",
        engine.ticks(),
        kills,
        deaths,
        damage_taken,
        stats.chunks_created,
        stats.chunks_released,
        stats.water_created,
        stats.water_released
    );
}
