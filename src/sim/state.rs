//! Game state and core simulation types
//!
//! Everything a presentation layer reads after a step lives here.

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;
use crate::tuning::Tuning;

/// Overall phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen (initial, and after the finale)
    Menu,
    /// Stage picker
    StageSelect,
    /// Active gameplay
    Playing,
    /// Scripted narration before the king encounter
    Cutscene,
    /// King defeated, waiting for the player to claim the reward
    Reward,
    /// Player health reached 0
    GameOver,
    /// Reward claimed
    Win,
}

impl GamePhase {
    /// Phases in which physics and collisions run
    pub fn is_simulated(&self) -> bool {
        matches!(self, GamePhase::Playing | GamePhase::Reward)
    }
}

/// Active weapon mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Weapon {
    Gun,
    Rod,
    Trident,
}

impl Weapon {
    /// Weapon handed out on a given stage
    pub fn for_stage(index: usize) -> Self {
        if index + 1 >= STAGE_COUNT {
            Weapon::Trident
        } else if index >= 7 {
            Weapon::Rod
        } else {
            Weapon::Gun
        }
    }
}

/// The controllable actor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub facing_left: bool,
    pub grounded: bool,
    pub health: u8,
    pub ammo: u32,
    pub weapon: Weapon,
    /// Set once the finale reward is claimed; never cleared within a run
    pub empowered_trident: bool,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(PLAYER_START.0, PLAYER_START.1),
            vel: Vec2::ZERO,
            size: Vec2::splat(tuning.player_size),
            facing_left: false,
            grounded: true,
            health: tuning.max_health,
            ammo: tuning.start_ammo,
            weapon: Weapon::Gun,
            empowered_trident: false,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Place at a spawn point, at rest
    pub fn respawn_at(&mut self, spawn: Vec2) {
        self.pos = spawn;
        self.vel = Vec2::ZERO;
    }
}

/// Hit-point pool carried by boss-class enemies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vitals {
    pub hp: i32,
    pub max_hp: i32,
}

impl Vitals {
    pub fn full(max_hp: i32) -> Self {
        Self { hp: max_hp, max_hp }
    }
}

/// Enemy variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Patrolling grunt, dies to any hit
    Basic,
    /// Stage boss
    Boss(Vitals),
    /// Final boss; its death starts the reward sequence
    King(Vitals),
}

/// An adversary (tombstoned via `dead`, never removed mid-stage)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    /// Horizontal patrol direction (±1)
    pub direction: f32,
    pub kind: EnemyKind,
    pub dead: bool,
}

impl Enemy {
    pub fn new(rect: Rect, speed: f32, direction: f32, kind: EnemyKind) -> Self {
        Self {
            pos: rect.pos,
            vel: Vec2::new(speed, 0.0),
            size: rect.size,
            direction,
            kind,
            dead: false,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        !self.dead
    }

    pub fn vitals(&self) -> Option<&Vitals> {
        match &self.kind {
            EnemyKind::Basic => None,
            EnemyKind::Boss(v) | EnemyKind::King(v) => Some(v),
        }
    }

    pub fn vitals_mut(&mut self) -> Option<&mut Vitals> {
        match &mut self.kind {
            EnemyKind::Basic => None,
            EnemyKind::Boss(v) | EnemyKind::King(v) => Some(v),
        }
    }

    /// Boss-class enemies bob vertically while patrolling
    pub fn hovers(&self) -> bool {
        !matches!(self.kind, EnemyKind::Basic)
    }

    pub fn is_king(&self) -> bool {
        matches!(self.kind, EnemyKind::King(_))
    }
}

/// What a projectile is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileKind {
    /// Gun shot paid for with ammo
    Shot,
    /// Gun shot fired while the power-up is active
    BoostedShot,
    /// Grappling hook (at most one live)
    Hook,
    Trident { empowered: bool },
}

impl ProjectileKind {
    pub fn damage(&self, tuning: &Tuning) -> i32 {
        match self {
            ProjectileKind::Shot | ProjectileKind::Hook => tuning.shot_damage,
            ProjectileKind::BoostedShot => tuning.boosted_shot_damage,
            ProjectileKind::Trident { empowered: false } => tuning.trident_damage,
            ProjectileKind::Trident { empowered: true } => tuning.empowered_trident_damage,
        }
    }
}

/// A projectile in flight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub active: bool,
    /// Enemies never fire, but the owner is tracked for collision filtering
    pub player_owned: bool,
    pub kind: ProjectileKind,
}

impl Projectile {
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    pub fn is_live_hook(&self) -> bool {
        self.active && self.kind == ProjectileKind::Hook
    }
}

/// Pickup types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Ammo,
    Potion,
}

/// A pickup (consumed once, never reactivated)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub rect: Rect,
    pub active: bool,
    pub kind: ItemKind,
}

impl Item {
    pub fn new(rect: Rect, kind: ItemKind) -> Self {
        Self {
            rect,
            active: true,
            kind,
        }
    }
}

/// Static one-way platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Rect,
    /// Display color (0xRRGGBB)
    pub color: u32,
}

/// Sound/effect cues emitted during a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Jump,
    Shot,
    HookCast,
    TridentThrow,
    Pickup(ItemKind),
    Hurt,
    EnemyKilled,
    BossDefeated,
    RewardClaimed,
    StageCleared(usize),
}

/// Cutscene script progress
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CutsceneState {
    /// Seconds since the cutscene began
    pub elapsed: f32,
    /// Index into the narration script, if a line is showing
    pub line: Option<usize>,
}

/// Post-king reward marker
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RewardState {
    pub anchor: Vec2,
    /// Marker opacity, 0..=1
    pub alpha: f32,
}

/// Run-wide bookkeeping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    /// Current stage (0-based, < STAGE_COUNT)
    pub stage_index: usize,
    pub phase: GamePhase,
    /// Seconds left on the timed power-up
    pub power_up: f32,
    /// Ticks simulated in the current run (drives boss hover)
    pub frame_count: u64,
    /// Decaying shake magnitude for the renderer
    pub screen_shake: f32,
    pub cutscene: CutsceneState,
    pub reward: RewardState,
}

impl Default for RunState {
    fn default() -> Self {
        Self {
            stage_index: 0,
            phase: GamePhase::Menu,
            power_up: 0.0,
            frame_count: 0,
            screen_shake: 0.0,
            cutscene: CutsceneState::default(),
            reward: RewardState::default(),
        }
    }
}

impl RunState {
    #[inline]
    pub fn power_up_active(&self) -> bool {
        self.power_up > 0.0
    }

    /// Narration line currently on screen
    pub fn narration(&self) -> Option<&'static str> {
        self.cutscene
            .line
            .and_then(|i| super::stage::NARRATION.get(i))
            .map(|cue| cue.text)
    }
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    /// Fresh RNG for the next draw; advances the stream
    pub fn next_rng(&mut self) -> Pcg32 {
        let rng = Pcg32::new(self.seed, self.stream);
        self.stream += 1;
        rng
    }
}

/// Complete engine state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// RNG state (re-derived on every stage load)
    pub rng_state: RngState,
    pub tuning: Tuning,
    pub run: RunState,
    pub player: Player,
    /// Current stage's enemies, dead ones included
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub items: Vec<Item>,
    pub platforms: Vec<Platform>,
    pub goal: Rect,
    /// Cues produced since the host last drained them
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new run with default balance, sitting at the menu
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng_state: RngState::new(seed),
            player: Player::new(&tuning),
            tuning,
            run: RunState::default(),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            items: Vec::new(),
            platforms: Vec::new(),
            goal: Rect::new(0.0, 0.0, 0.0, 0.0),
            events: Vec::new(),
        }
    }

    #[inline]
    pub fn spawn_point(&self) -> Vec2 {
        Vec2::new(self.tuning.spawn.0, self.tuning.spawn.1)
    }

    pub fn alive_enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter().filter(|e| e.is_alive())
    }

    pub fn has_live_hook(&self) -> bool {
        self.projectiles.iter().any(Projectile::is_live_hook)
    }

    /// Whether gun fire is currently free and boosted
    pub fn infinite_ammo(&self) -> bool {
        self.run.power_up_active()
    }

    /// Take all pending cues for audio/effects
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
