//! Per-tick simulation step
//!
//! Order within a tick:
//! 1. timers (power-up, shake, reward marker)
//! 2. player movement and gravity
//! 3. platforms, then falling off the field
//! 4. items, projectiles, enemies
//! 5. goal

use super::collision::{below_field, collect_items, resolve_platforms};
use super::combat::{apply_pickup, damage_player, decay_power_up, hit_by_enemy, resolve_projectiles};
use super::rect::{apply_gravity, integrate};
use super::stage::{advance_stage, update_cutscene, update_reward};
use super::state::{Enemy, GameEvent, GamePhase, GameState};
use crate::tuning::Tuning;

/// Normalized movement intent for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

/// Advance the game by one step.
///
/// `dt` is real elapsed seconds and only drives the timed power-up and the
/// cutscene clock; motion is integrated per tick.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.run.phase == GamePhase::Cutscene {
        update_cutscene(state, dt);
        return;
    }
    if !state.run.phase.is_simulated() {
        return;
    }

    state.run.frame_count += 1;
    decay_power_up(&mut state.run, dt);
    state.run.screen_shake *= state.tuning.shake_decay;
    if state.run.screen_shake < 0.01 {
        state.run.screen_shake = 0.0;
    }

    update_reward(state);
    if state.run.phase == GamePhase::Win {
        return;
    }

    move_player(state, input);

    resolve_platforms(&mut state.player, &state.platforms, state.tuning.land_tolerance);

    if below_field(&state.player, state.tuning.field_height) {
        if damage_player(state) {
            return;
        }
        let spawn = state.spawn_point();
        state.player.respawn_at(spawn);
    }

    for kind in collect_items(&state.player.rect(), &mut state.items) {
        apply_pickup(state, kind);
    }

    resolve_projectiles(state);

    let frame = state.run.frame_count;
    for idx in 0..state.enemies.len() {
        if state.enemies[idx].dead {
            continue;
        }
        patrol(&mut state.enemies[idx], frame, &state.tuning);
        if state.player.rect().overlaps(&state.enemies[idx].rect()) {
            hit_by_enemy(state, idx);
        }
    }

    if state.player.rect().overlaps(&state.goal) {
        advance_stage(state);
    }

    state.projectiles.retain(|p| p.active);
}

/// Apply intent, gravity and velocity to the player
fn move_player(state: &mut GameState, input: &TickInput) {
    let tuning = &state.tuning;
    let player = &mut state.player;

    if input.left {
        player.vel.x = -tuning.move_speed;
        player.facing_left = true;
    } else if input.right {
        player.vel.x = tuning.move_speed;
        player.facing_left = false;
    } else {
        player.vel.x *= tuning.move_damping;
    }

    if input.jump && player.grounded {
        player.vel.y = tuning.jump_force;
        player.grounded = false;
        state.events.push(GameEvent::Jump);
    }

    apply_gravity(&mut player.vel, tuning.gravity);
    integrate(&mut player.pos, player.vel);
}

/// Horizontal patrol bouncing off the field edges; boss-class enemies also hover
pub fn patrol(enemy: &mut Enemy, frame: u64, tuning: &Tuning) {
    if enemy.hovers() {
        enemy.pos.y += (frame as f32 * tuning.hover_frequency).sin() * tuning.hover_amplitude;
    }
    enemy.pos.x += enemy.vel.x * enemy.direction;
    if enemy.pos.x < 0.0 || enemy.pos.x + enemy.size.x > tuning.field_width {
        enemy.direction = -enemy.direction;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::fire;
    use crate::sim::rect::Rect;
    use crate::sim::stage::load_stage;
    use crate::sim::state::{EnemyKind, ItemKind, Weapon};
    use glam::Vec2;

    fn stage(index: usize) -> GameState {
        let mut state = GameState::new(12345);
        load_stage(&mut state, index);
        state
    }

    /// Stage 0 with the grunt parked out of the way
    fn quiet_stage() -> GameState {
        let mut state = stage(0);
        state.enemies.clear();
        state
    }

    #[test]
    fn test_menu_does_not_simulate() {
        let mut state = GameState::new(1);
        let before = state.player.clone();
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.player, before);
        assert_eq!(state.run.frame_count, 0);
    }

    #[test]
    fn test_player_settles_on_floor() {
        let mut state = quiet_stage();
        for _ in 0..120 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.player.pos.y, 580.0 - 45.0);
        assert_eq!(state.player.vel.y, 0.0);
        assert!(state.player.grounded);
    }

    #[test]
    fn test_jump_needs_ground() {
        let mut state = quiet_stage();
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut state, &jump, SIM_DT);
        assert!(!state.player.grounded);
        assert_eq!(state.events, vec![GameEvent::Jump]);
        let vy = state.player.vel.y;
        tick(&mut state, &jump, SIM_DT);
        assert_eq!(state.player.vel.y, vy + state.tuning.gravity);
    }

    #[test]
    fn test_move_and_damp() {
        let mut state = quiet_stage();
        tick(&mut state, &TickInput { left: true, ..Default::default() }, SIM_DT);
        assert!(state.player.facing_left);
        assert_eq!(state.player.vel.x, -state.tuning.move_speed);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.player.vel.x, -state.tuning.move_speed * state.tuning.move_damping);
    }

    #[test]
    fn test_fall_off_field_costs_health() {
        let mut state = quiet_stage();
        state.platforms.clear();
        state.player.pos.y = state.tuning.field_height;
        state.player.vel.x = 3.0;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.player.health, 2);
        assert_eq!(state.player.pos, state.spawn_point());
        assert_eq!(state.player.vel, Vec2::ZERO);
        assert_eq!(state.run.phase, GamePhase::Playing);
    }

    #[test]
    fn test_enemy_contact_knocks_back() {
        let mut state = stage(0);
        state.enemies[0].pos = Vec2::new(state.player.pos.x + 20.0, state.player.pos.y);
        state.enemies[0].vel = Vec2::ZERO;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.player.health, 2);
        assert_eq!(state.player.vel.x, -state.tuning.knockback);
        assert_eq!(state.run.screen_shake, state.tuning.shake_on_hurt);

        state.enemies.clear();
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.run.screen_shake < state.tuning.shake_on_hurt);
    }

    #[test]
    fn test_patrol_bounces() {
        let tuning = Tuning::default();
        let mut grunt = Enemy::new(Rect::new(754.0, 405.0, 45.0, 45.0), 2.0, 1.0, EnemyKind::Basic);
        patrol(&mut grunt, 1, &tuning);
        assert_eq!(grunt.pos.x, 756.0);
        assert_eq!(grunt.direction, -1.0);
        assert_eq!(grunt.pos.y, 405.0);
        patrol(&mut grunt, 2, &tuning);
        assert_eq!(grunt.pos.x, 754.0);
    }

    #[test]
    fn test_boss_hovers() {
        let mut state = stage(1);
        let y0 = state.enemies[0].pos.y;
        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert!(state.enemies[0].pos.y > y0);
    }

    #[test]
    fn test_potion_pickup() {
        let mut state = stage(2);
        state.enemies.clear();
        state.player.pos = Vec2::new(340.0, 395.0);
        state.player.vel = Vec2::ZERO;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(!state.items[0].active);
        assert!(state.events.contains(&GameEvent::Pickup(ItemKind::Potion)));
        assert!((state.run.power_up - state.tuning.potion_duration).abs() < 1e-6);

        tick(&mut state, &TickInput::default(), 0.5);
        assert!((state.run.power_up - (state.tuning.potion_duration - 0.5)).abs() < 1e-5);
    }

    #[test]
    fn test_goal_advances_stage() {
        let mut state = quiet_stage();
        state.player.pos = Vec2::new(720.0, 270.0);
        state.player.vel = Vec2::ZERO;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.run.stage_index, 1);
        assert_eq!(state.player.pos, state.spawn_point());
        assert!(state.events.contains(&GameEvent::StageCleared(0)));
    }

    #[test]
    fn test_shot_kills_grunt() {
        let mut state = stage(0);
        state.enemies[0].pos = Vec2::new(200.0, state.player.pos.y);
        state.enemies[0].vel = Vec2::ZERO;
        fire(&mut state, 0.0);
        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert!(state.enemies[0].dead);
        assert_eq!(state.enemies.len(), 1);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_hook_recast_after_cull() {
        let mut state = stage(7);
        assert_eq!(state.player.weapon, Weapon::Rod);
        state.enemies.clear();
        fire(&mut state, std::f32::consts::PI);
        for _ in 0..20 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert!(state.projectiles.is_empty());
        fire(&mut state, 0.0);
        assert!(state.has_live_hook());
    }

    #[test]
    fn test_determinism() {
        let mut a = stage(1);
        let mut b = stage(1);
        let inputs = [
            TickInput { right: true, ..Default::default() },
            TickInput { jump: true, ..Default::default() },
            TickInput::default(),
            TickInput { left: true, ..Default::default() },
        ];
        for (i, input) in inputs.iter().cycle().take(200).enumerate() {
            if i % 17 == 0 {
                fire(&mut a, 0.25);
                fire(&mut b, 0.25);
            }
            tick(&mut a, input, SIM_DT);
            tick(&mut b, input, SIM_DT);
        }
        assert_eq!(a.player, b.player);
        assert_eq!(a.enemies, b.enemies);
        assert_eq!(a.run, b.run);
    }
}
