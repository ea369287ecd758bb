//! Data-driven game balance
//!
//! Every number the simulation uses lives here so a host can load a balance
//! file instead of recompiling. Missing fields fall back to [`crate::consts`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Error loading or validating a [`Tuning`]
#[derive(Debug, Clone, PartialEq)]
pub enum TuningError {
    /// JSON could not be parsed
    Parse(String),
    /// A value is out of its allowed range
    Invalid { field: &'static str, reason: &'static str },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "failed to parse tuning: {msg}"),
            Self::Invalid { field, reason } => write!(f, "invalid tuning field `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for TuningError {}

/// Balance configuration for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield & movement ===
    pub field_width: f32,
    pub field_height: f32,
    pub gravity: f32,
    pub jump_force: f32,
    pub move_speed: f32,
    pub move_damping: f32,
    pub land_tolerance: f32,

    // === Player ===
    pub player_size: f32,
    pub spawn: (f32, f32),
    pub max_health: u8,
    pub start_ammo: u32,
    pub muzzle_offset: f32,

    // === Pickups ===
    pub ammo_pickup_amount: u32,
    pub potion_duration: f32,

    // === Projectiles ===
    pub shot_speed: f32,
    pub hook_speed: f32,
    pub trident_speed: f32,
    pub shot_size: f32,
    pub trident_size: f32,
    pub shot_damage: i32,
    pub boosted_shot_damage: i32,
    pub trident_damage: i32,
    pub empowered_trident_damage: i32,
    pub cull_margin: f32,

    // === Contact & effects ===
    pub knockback: f32,
    pub shake_on_hurt: f32,
    pub shake_decay: f32,
    pub hover_frequency: f32,
    pub hover_amplitude: f32,

    // === Reward sequence ===
    pub reward_fade_per_tick: f32,
    pub reward_claim_radius: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            gravity: GRAVITY,
            jump_force: JUMP_FORCE,
            move_speed: MOVE_SPEED,
            move_damping: MOVE_DAMPING,
            land_tolerance: LAND_TOLERANCE,

            player_size: PLAYER_SIZE,
            spawn: PLAYER_SPAWN,
            max_health: MAX_HEALTH,
            start_ammo: START_AMMO,
            muzzle_offset: MUZZLE_OFFSET,

            ammo_pickup_amount: AMMO_PICKUP_AMOUNT,
            potion_duration: POTION_DURATION,

            shot_speed: SHOT_SPEED,
            hook_speed: HOOK_SPEED,
            trident_speed: TRIDENT_SPEED,
            shot_size: SHOT_SIZE,
            trident_size: TRIDENT_SIZE,
            shot_damage: SHOT_DAMAGE,
            boosted_shot_damage: BOOSTED_SHOT_DAMAGE,
            trident_damage: TRIDENT_DAMAGE,
            empowered_trident_damage: EMPOWERED_TRIDENT_DAMAGE,
            cull_margin: CULL_MARGIN,

            knockback: KNOCKBACK,
            shake_on_hurt: SHAKE_ON_HURT,
            shake_decay: SHAKE_DECAY,
            hover_frequency: HOVER_FREQUENCY,
            hover_amplitude: HOVER_AMPLITUDE,

            reward_fade_per_tick: REWARD_FADE_PER_TICK,
            reward_claim_radius: REWARD_CLAIM_RADIUS,
        }
    }
}

impl Tuning {
    /// Parse and validate a tuning file. Absent fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning =
            serde_json::from_str(json).map_err(|e| TuningError::Parse(e.to_string()))?;
        tuning.validate()?;
        log::info!("Loaded tuning ({}x{} field)", tuning.field_width, tuning.field_height);
        Ok(tuning)
    }

    /// Check ranges the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.field_width <= 0.0 || self.field_height <= 0.0 {
            return Err(TuningError::Invalid {
                field: "field_width/field_height",
                reason: "playfield must have positive size",
            });
        }
        if self.gravity <= 0.0 {
            return Err(TuningError::Invalid {
                field: "gravity",
                reason: "must be positive (downward)",
            });
        }
        if self.max_health == 0 || self.max_health > MAX_HEALTH {
            return Err(TuningError::Invalid {
                field: "max_health",
                reason: "must be in 1..=3",
            });
        }
        let ordered = self.shot_damage > 0
            && self.boosted_shot_damage > self.shot_damage
            && self.trident_damage > self.boosted_shot_damage
            && self.empowered_trident_damage >= self.trident_damage;
        if !ordered {
            return Err(TuningError::Invalid {
                field: "damage",
                reason: "requires trident > boosted shot > plain shot > 0",
            });
        }
        Ok(())
    }
}
