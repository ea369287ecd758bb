//! Stage layouts and run progression
//!
//! Phase transitions:
//! - `Menu -> StageSelect -> Playing` via [`open_stage_select`] / [`select_stage`]
//! - `Playing -> Playing` when the goal is reached ([`advance_stage`])
//! - final stage load enters `Cutscene`, which returns to `Playing` on its own
//! - `Playing -> Reward` when the king dies, `Reward -> Win` on claim
//! - `Playing/Reward -> GameOver` at 0 health, recovered by [`resurrect`]
//! - `Win -> Menu` via [`back_to_menu`]
//!
//! Anything else is ignored.

use glam::Vec2;
use rand::Rng;

use super::rect::Rect;
use super::state::{
    CutsceneState, Enemy, EnemyKind, GameEvent, GamePhase, GameState, Item, ItemKind, Platform,
    RewardState, RngState, Vitals, Weapon,
};
use crate::consts::STAGE_COUNT;

/// Platform palette for regular stages
const STAGE_COLORS: [u32; 6] = [0x4ade80, 0xfbbf24, 0xf87171, 0x60a5fa, 0xa78bfa, 0xf472b6];
const BOSS_FLOOR_COLOR: u32 = 0xfef3c7;
const THRONE_FLOOR_COLOR: u32 = 0x111111;

/// Stages with a winged boss instead of a grunt
const BOSS_STAGES: [usize; 2] = [1, 6];

/// A line of cutscene narration and when it appears
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NarrationCue {
    /// Seconds into the cutscene
    pub at: f32,
    pub text: &'static str,
}

pub const NARRATION: [NarrationCue; 2] = [
    NarrationCue {
        at: 1.0,
        text: "YOU CAME FOR THE POWER...",
    },
    NarrationCue {
        at: 3.0,
        text: "THE HIGH KISLINKA: SHOW ME WHAT YOU'VE GOT!",
    },
];

/// Cutscene length in seconds; the fight starts afterwards
pub const CUTSCENE_LENGTH: f32 = 5.0;

/// Everything a stage populates on load
#[derive(Debug, Clone, PartialEq)]
pub struct StageLayout {
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    pub items: Vec<Item>,
    pub goal: Rect,
}

#[inline]
pub fn is_final_stage(index: usize) -> bool {
    index + 1 == STAGE_COUNT
}

/// Fixed layout for a stage index
pub fn layout(index: usize) -> StageLayout {
    if BOSS_STAGES.contains(&index) {
        let hp = if index == 1 { 40 } else { 70 };
        StageLayout {
            platforms: vec![Platform {
                rect: Rect::new(0.0, 580.0, 800.0, 20.0),
                color: BOSS_FLOOR_COLOR,
            }],
            enemies: vec![Enemy::new(
                Rect::new(400.0, 200.0, 140.0, 140.0),
                3.0,
                1.0,
                EnemyKind::Boss(Vitals::full(hp)),
            )],
            items: Vec::new(),
            goal: Rect::new(720.0, 500.0, 60.0, 60.0),
        }
    } else if is_final_stage(index) {
        StageLayout {
            platforms: vec![Platform {
                rect: Rect::new(0.0, 550.0, 800.0, 50.0),
                color: THRONE_FLOOR_COLOR,
            }],
            enemies: vec![Enemy::new(
                Rect::new(600.0, 350.0, 180.0, 180.0),
                0.0,
                -1.0,
                EnemyKind::King(Vitals::full(150)),
            )],
            items: Vec::new(),
            // Off-field and zero-sized: the king stage only ends via the reward
            goal: Rect::new(-200.0, -200.0, 0.0, 0.0),
        }
    } else {
        let color = STAGE_COLORS[index % STAGE_COLORS.len()];
        let platforms = [
            Rect::new(0.0, 580.0, 250.0, 20.0),
            Rect::new(300.0, 450.0, 200.0, 20.0),
            Rect::new(550.0, 320.0, 250.0, 20.0),
        ]
        .into_iter()
        .map(|rect| Platform { rect, color })
        .collect();

        let mut items = Vec::new();
        if index > 0 && index % 2 == 0 {
            items.push(Item::new(Rect::new(350.0, 400.0, 35.0, 35.0), ItemKind::Potion));
        }

        StageLayout {
            platforms,
            enemies: vec![Enemy::new(
                Rect::new(400.0, 405.0, 45.0, 45.0),
                2.0,
                1.0,
                EnemyKind::Basic,
            )],
            items,
            goal: Rect::new(720.0, 260.0, 60.0, 60.0),
        }
    }
}

/// Per-stage RNG seed, so reloading a stage replays the same drops
fn stage_seed(seed: u64, index: usize) -> u64 {
    (index as u64)
        .wrapping_mul(2654435761)
        .wrapping_add(seed)
}

/// Reset the run for a stage and populate it. Out-of-range indices are ignored.
pub fn load_stage(state: &mut GameState, index: usize) {
    if index >= STAGE_COUNT {
        log::warn!("Ignoring load of stage {} (only {} stages)", index + 1, STAGE_COUNT);
        return;
    }

    let StageLayout {
        platforms,
        enemies,
        items,
        goal,
    } = layout(index);

    let spawn = state.spawn_point();
    let run = &mut state.run;
    run.stage_index = index;
    run.power_up = 0.0;
    run.frame_count = 0;
    run.screen_shake = 0.0;
    run.cutscene = CutsceneState::default();
    run.reward = RewardState::default();
    run.phase = if is_final_stage(index) {
        GamePhase::Cutscene
    } else {
        GamePhase::Playing
    };

    let player = &mut state.player;
    player.health = state.tuning.max_health;
    player.ammo = state.tuning.start_ammo;
    player.respawn_at(spawn);
    player.grounded = true;
    player.weapon = Weapon::for_stage(index);

    state.projectiles.clear();
    state.platforms = platforms;
    state.enemies = enemies;
    state.items = items;
    state.goal = goal;
    state.rng_state = RngState::new(stage_seed(state.seed, index));

    log::info!(
        "Stage {} loaded ({:?}, weapon {:?})",
        index + 1,
        state.run.phase,
        state.player.weapon
    );
}

/// Goal reached: load the next stage if there is one
pub fn advance_stage(state: &mut GameState) {
    if state.run.phase != GamePhase::Playing {
        return;
    }
    let cleared = state.run.stage_index;
    let next = cleared + 1;
    if next >= STAGE_COUNT {
        log::debug!("No stage after {}, goal ignored", cleared + 1);
        return;
    }
    state.events.push(GameEvent::StageCleared(cleared));
    load_stage(state, next);
}

/// Advance the cutscene clock and swap narration lines
pub fn update_cutscene(state: &mut GameState, dt: f32) {
    if state.run.phase != GamePhase::Cutscene {
        return;
    }
    let cutscene = &mut state.run.cutscene;
    cutscene.elapsed += dt;

    if cutscene.elapsed >= CUTSCENE_LENGTH {
        cutscene.line = None;
        state.run.phase = GamePhase::Playing;
        log::info!("Cutscene over, king fight begins");
        return;
    }

    cutscene.line = NARRATION.iter().rposition(|cue| cutscene.elapsed >= cue.at);
}

/// King is down: park the reward at its last position
pub fn begin_reward(state: &mut GameState, anchor: Vec2) {
    if state.run.phase != GamePhase::Playing {
        return;
    }
    state.run.phase = GamePhase::Reward;
    state.run.reward = RewardState { anchor, alpha: 0.0 };
    state.events.push(GameEvent::BossDefeated);
    log::info!("King defeated, reward at ({:.0}, {:.0})", anchor.x, anchor.y);
}

/// Fade the reward marker in and grant it once the player is close enough
pub fn update_reward(state: &mut GameState) {
    if state.run.phase != GamePhase::Reward {
        return;
    }
    let reward = &mut state.run.reward;
    reward.alpha = (reward.alpha + state.tuning.reward_fade_per_tick).min(1.0);

    let dist = state.player.rect().center().distance(reward.anchor);
    if dist < state.tuning.reward_claim_radius {
        state.player.empowered_trident = true;
        state.run.phase = GamePhase::Win;
        state.events.push(GameEvent::RewardClaimed);
        log::info!("Reward claimed, trident empowered");
    }
}

/// Drop an ammo pickup on a random wide platform
pub fn spawn_ammo_drop(state: &mut GameState) {
    if state.run.phase != GamePhase::Playing {
        return;
    }
    let wide: Vec<Rect> = state
        .platforms
        .iter()
        .map(|p| p.rect)
        .filter(|r| r.size.x > 50.0)
        .collect();
    if wide.is_empty() {
        return;
    }

    let mut rng = state.rng_state.next_rng();
    let plat = wide[rng.random_range(0..wide.len())];
    let x = plat.left() + rng.random::<f32>() * (plat.size.x - 30.0);
    state
        .items
        .push(Item::new(Rect::new(x, plat.top() - 35.0, 30.0, 30.0), ItemKind::Ammo));
}

// === Externally triggered transitions ===

pub fn open_stage_select(state: &mut GameState) {
    if state.run.phase == GamePhase::Menu {
        state.run.phase = GamePhase::StageSelect;
    }
}

pub fn select_stage(state: &mut GameState, index: usize) {
    if state.run.phase == GamePhase::StageSelect {
        load_stage(state, index);
    }
}

pub fn back_to_menu(state: &mut GameState) {
    if matches!(state.run.phase, GamePhase::StageSelect | GamePhase::Win) {
        state.run.phase = GamePhase::Menu;
    }
}

/// Retry the current stage after a defeat
pub fn resurrect(state: &mut GameState) {
    if state.run.phase == GamePhase::GameOver {
        let index = state.run.stage_index;
        load_stage(state, index);
    }
}
