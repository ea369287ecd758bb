//! Simulation engine
//!
//! All gameplay logic lives here. This module must be pure:
//! - Driven only through `load_stage`, `fire` and `tick`
//! - Seeded RNG only
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod combat;
pub mod rect;
pub mod stage;
pub mod state;
pub mod tick;

pub use combat::fire;
pub use rect::Rect;
pub use stage::{
    back_to_menu, load_stage, open_stage_select, resurrect, select_stage, spawn_ammo_drop,
    CUTSCENE_LENGTH, NARRATION,
};
pub use state::{
    Enemy, EnemyKind, GameEvent, GamePhase, GameState, Item, ItemKind, Platform, Player,
    Projectile, ProjectileKind, RunState, Vitals, Weapon,
};
pub use tick::{TickInput, tick};
