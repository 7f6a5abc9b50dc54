use std::f32::consts::PI;

use glam::Vec3;

use crate::constants::{HIT_WINDOW_END, HIT_WINDOW_START};
use crate::core::vitality::Vitality;
use crate::player::input::InputState;
use crate::utils::settings::PlayerSettings;
use crate::world::heightmap::HeightMap;

const SWORD_REST_OFFSET: Vec3 = Vec3::new(0.5, -0.2, -0.7);
const SWORD_REACH_X: f32 = 0.5;
const SWORD_LIFT_Y: f32 = 0.3;

/// Sword transform relative to the camera, for the first-person view model.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct SwordPose {
    pub offset: Vec3,
    /// Euler angles in radians (x, y, z).
    pub rotation: Vec3,
}

impl SwordPose {
    pub const REST: SwordPose = SwordPose {
        offset: SWORD_REST_OFFSET,
        rotation: Vec3::ZERO,
    };

    /// Forward arc over the first half of the swing, mirrored on the way back.
    pub fn at(progress: f32) -> Self {
        let progress = progress.clamp(0.0, 1.0);
        let arc = if progress < 0.5 {
            progress * 2.0
        } else {
            1.0 - (progress - 0.5) * 2.0
        };
        SwordPose {
            offset: SWORD_REST_OFFSET + Vec3::new(-SWORD_REACH_X * arc, SWORD_LIFT_Y * arc, 0.0),
            rotation: Vec3::new(0.0, PI / 3.0 * arc, PI * arc),
        }
    }
}

#[derive(Clone, Copy, Default, PartialEq, Debug)]
pub struct PlayerStep {
    pub moved: bool,
    pub swing_started: bool,
    pub respawned: bool,
}

pub struct Player {
    pub position: Vec3,
    pub yaw: f32,
    vitality: Vitality,
    settings: PlayerSettings,
    attacking: bool,
    attack_cooldown: f32,
    swings: u64,
}

impl Player {
    pub fn new(settings: PlayerSettings) -> Self {
        Player {
            position: Vec3::from_array(settings.spawn_point),
            yaw: 0.0,
            vitality: Vitality::new(settings.max_health, settings.invulnerable_duration),
            settings,
            attacking: false,
            attack_cooldown: 0.0,
            swings: 0,
        }
    }

    pub fn settings(&self) -> &PlayerSettings {
        &self.settings
    }

    pub fn vitality(&self) -> &Vitality {
        &self.vitality
    }

    pub fn vitality_mut(&mut self) -> &mut Vitality {
        &mut self.vitality
    }

    pub fn health(&self) -> u32 {
        self.vitality.health()
    }

    pub fn max_health(&self) -> u32 {
        self.vitality.max_health()
    }

    pub fn is_dead(&self) -> bool {
        self.vitality.is_dead()
    }

    pub fn is_attacking(&self) -> bool {
        self.attacking
    }

    /// Number of swings started so far; identifies the current swing.
    pub fn swing_count(&self) -> u64 {
        self.swings
    }

    pub fn spawn_point(&self) -> Vec3 {
        Vec3::from_array(self.settings.spawn_point)
    }

    /// Horizontal facing; yaw 0 looks down -z.
    pub fn forward(&self) -> Vec3 {
        Vec3::new(-self.yaw.sin(), 0.0, -self.yaw.cos())
    }

    pub fn right(&self) -> Vec3 {
        Vec3::new(self.yaw.cos(), 0.0, -self.yaw.sin())
    }

    /// 0 at swing start, 1 at swing end; 0 while idle.
    pub fn swing_progress(&self) -> f32 {
        if !self.attacking {
            return 0.0;
        }
        (1.0 - self.attack_cooldown / self.settings.attack_duration).clamp(0.0, 1.0)
    }

    pub fn in_hit_window(&self) -> bool {
        let progress = self.swing_progress();
        self.attacking && (HIT_WINDOW_START..=HIT_WINDOW_END).contains(&progress)
    }

    pub fn sword_pose(&self) -> SwordPose {
        if self.attacking {
            SwordPose::at(self.swing_progress())
        } else {
            SwordPose::REST
        }
    }

    /// Applies one tick of input. A dead player only reacts to respawn.
    pub fn update(&mut self, input: &InputState, height_map: &HeightMap, dt: f32) -> PlayerStep {
        let mut step = PlayerStep::default();
        self.vitality.tick(dt);

        if self.is_dead() {
            if input.respawn {
                self.respawn();
                step.respawned = true;
            }
            return step;
        }

        self.yaw = input.yaw;

        if input.is_moving() {
            let mut move_dir = Vec3::ZERO;
            if input.move_forward {
                move_dir += self.forward();
            }
            if input.move_backward {
                move_dir -= self.forward();
            }
            if input.move_left {
                move_dir -= self.right();
            }
            if input.move_right {
                move_dir += self.right();
            }

            // Opposing keys cancel out.
            if move_dir.length_squared() > 0.0 {
                let delta = move_dir.normalize() * self.settings.speed;
                self.position.x += delta.x;
                self.position.z += delta.z;
                step.moved = true;
            }
        }
        self.position.y =
            height_map.get_height(self.position.x, self.position.z) + self.settings.eye_height;

        if input.attack {
            step.swing_started = self.begin_attack();
        }

        step
    }

    /// Starts a swing when idle and off cooldown.
    pub fn begin_attack(&mut self) -> bool {
        if self.is_dead() || self.attacking || self.attack_cooldown > 0.0 {
            return false;
        }
        self.attacking = true;
        self.attack_cooldown = self.settings.attack_duration;
        self.swings += 1;
        tracing::debug!("Swing {} started", self.swings);
        true
    }

    /// Runs the swing clock for `dt` and returns the progress reached, or
    /// `None` when idle. The swing ends once progress reaches 1.
    pub fn advance_attack(&mut self, dt: f32) -> Option<f32> {
        if self.attack_cooldown > 0.0 {
            self.attack_cooldown -= dt;
        }
        if !self.attacking {
            return None;
        }

        let progress = 1.0 - self.attack_cooldown / self.settings.attack_duration;
        if progress >= 1.0 {
            self.attacking = false;
            self.attack_cooldown = 0.0;
            tracing::debug!("Swing {} finished", self.swings);
        }
        Some(progress.clamp(0.0, 1.0))
    }

    /// Full health at the spawn point with any swing cancelled.
    pub fn respawn(&mut self) {
        self.vitality.revive();
        self.position = self.spawn_point();
        self.attacking = false;
        self.attack_cooldown = 0.0;
        tracing::info!(
            "Player respawned at ({:.1}, {:.1}, {:.1})",
            self.position.x,
            self.position.y,
            self.position.z
        );
    }
}
