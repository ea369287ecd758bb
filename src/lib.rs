//! Kislinka - A side-scrolling stage/boss action simulation
//!
//! Core modules:
//! - `sim`: Simulation engine (physics, collisions, combat, stage progression)
//! - `tuning`: Data-driven game balance

pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Reference timestep; motion constants are per tick at this rate (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Playfield dimensions (y grows downward)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Downward acceleration per tick
    pub const GRAVITY: f32 = 0.5;
    /// Vertical velocity applied on jump (negative is up)
    pub const JUMP_FORCE: f32 = -13.5;
    /// Horizontal speed while a direction is held
    pub const MOVE_SPEED: f32 = 5.5;
    /// Horizontal velocity multiplier per tick with no direction held
    pub const MOVE_DAMPING: f32 = 0.8;
    /// Downward band below a platform top that still counts as landing
    pub const LAND_TOLERANCE: f32 = 10.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 45.0;
    pub const PLAYER_START: (f32, f32) = (50.0, 500.0);
    pub const PLAYER_SPAWN: (f32, f32) = (50.0, 400.0);
    pub const MAX_HEALTH: u8 = 3;
    pub const START_AMMO: u32 = 12;
    /// Offset from the player origin where projectiles spawn
    pub const MUZZLE_OFFSET: f32 = 20.0;

    /// Pickups
    pub const AMMO_PICKUP_AMOUNT: u32 = 15;
    /// Timed power-up window in seconds
    pub const POTION_DURATION: f32 = 5.0;

    /// Projectile speeds (units per tick)
    pub const SHOT_SPEED: f32 = 18.0;
    pub const HOOK_SPEED: f32 = 25.0;
    pub const TRIDENT_SPEED: f32 = 20.0;
    /// Projectile sizes
    pub const SHOT_SIZE: f32 = 12.0;
    pub const TRIDENT_SIZE: f32 = 30.0;

    /// Damage tiers (trident > boosted > plain)
    pub const SHOT_DAMAGE: i32 = 2;
    pub const BOOSTED_SHOT_DAMAGE: i32 = 10;
    pub const TRIDENT_DAMAGE: i32 = 15;
    pub const EMPOWERED_TRIDENT_DAMAGE: i32 = 30;

    /// Horizontal knockback when touching an enemy
    pub const KNOCKBACK: f32 = 15.0;
    /// Screen shake magnitude on hurt, and per-tick decay
    pub const SHAKE_ON_HURT: f32 = 10.0;
    pub const SHAKE_DECAY: f32 = 0.9;

    /// Boss/king vertical hover
    pub const HOVER_FREQUENCY: f32 = 0.05;
    pub const HOVER_AMPLITUDE: f32 = 1.5;

    /// Reward marker opacity gained per tick
    pub const REWARD_FADE_PER_TICK: f32 = 0.02;
    /// Distance from the reward anchor that claims it
    pub const REWARD_CLAIM_RADIUS: f32 = 50.0;

    /// Projectiles further than this outside the playfield are culled
    pub const CULL_MARGIN: f32 = 200.0;

    /// Number of stages in a run
    pub const STAGE_COUNT: usize = 10;
}

/// Unit direction for an aim angle (radians, y down)
#[inline]
pub fn aim_direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}
