//! Health, damage, invulnerability and death bookkeeping.
//!
//! Shared by the player and every creature. Creatures are built with a zero
//! invulnerability window, so every hit lands.

#[derive(Clone, Debug, PartialEq)]
pub struct Vitality {
    health: u32,
    max_health: u32,
    invulnerable_remaining: f32,
    invulnerable_duration: f32,
    dead: bool,
}

impl Vitality {
    pub fn new(max_health: u32, invulnerable_duration: f32) -> Self {
        Vitality {
            health: max_health,
            max_health,
            invulnerable_remaining: 0.0,
            invulnerable_duration: invulnerable_duration.max(0.0),
            dead: max_health == 0,
        }
    }

    /// Tracker with no post-hit immunity.
    pub fn without_invulnerability(max_health: u32) -> Self {
        Self::new(max_health, 0.0)
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn fraction(&self) -> f32 {
        if self.max_health == 0 {
            return 0.0;
        }
        self.health as f32 / self.max_health as f32
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn invulnerable_remaining(&self) -> f32 {
        self.invulnerable_remaining
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_remaining > 0.0
    }

    /// Applies `amount` unless dead or invulnerable. Returns true only for the
    /// hit that brings health to zero.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        if self.dead || self.is_invulnerable() {
            return false;
        }
        self.health = self.health.saturating_sub(amount);
        self.invulnerable_remaining = self.invulnerable_duration;
        if self.health == 0 {
            self.dead = true;
            return true;
        }
        false
    }

    /// No effect on a dead tracker; only `revive` brings it back.
    pub fn heal(&mut self, amount: u32) {
        if self.dead {
            return;
        }
        self.health = self.health.saturating_add(amount).min(self.max_health);
    }

    pub fn tick(&mut self, dt: f32) {
        self.invulnerable_remaining = (self.invulnerable_remaining - dt).max(0.0);
    }

    /// Full health, alive, no lingering invulnerability.
    pub fn revive(&mut self) {
        self.health = self.max_health;
        self.invulnerable_remaining = 0.0;
        self.dead = self.max_health == 0;
    }
}
