//! Weapons, damage and the timed power-up
//!
//! Failed fire attempts (no ammo, hook already out, wrong phase) are silent
//! no-ops.

use glam::Vec2;

use super::collision::{first_enemy_hit, knockback_sign};
use super::rect::{Rect, integrate};
use super::stage::begin_reward;
use super::state::{
    Enemy, GameEvent, GamePhase, GameState, ItemKind, Projectile, ProjectileKind, RunState,
    Weapon,
};
use crate::aim_direction;

/// Attempt a weapon discharge toward `aim_angle` (radians, y down)
pub fn fire(state: &mut GameState, aim_angle: f32) {
    if state.run.phase != GamePhase::Playing {
        return;
    }

    let tuning = &state.tuning;
    let player = &state.player;

    let kind = match player.weapon {
        Weapon::Gun => {
            if state.run.power_up_active() {
                ProjectileKind::BoostedShot
            } else if player.ammo > 0 {
                ProjectileKind::Shot
            } else {
                log::debug!("Gun dry, shot ignored");
                return;
            }
        }
        Weapon::Rod => {
            if state.has_live_hook() {
                return;
            }
            ProjectileKind::Hook
        }
        Weapon::Trident => ProjectileKind::Trident {
            empowered: player.empowered_trident,
        },
    };

    let (speed, size, event) = match kind {
        ProjectileKind::Shot | ProjectileKind::BoostedShot => {
            (tuning.shot_speed, tuning.shot_size, GameEvent::Shot)
        }
        ProjectileKind::Hook => (tuning.hook_speed, tuning.shot_size, GameEvent::HookCast),
        ProjectileKind::Trident { .. } => {
            (tuning.trident_speed, tuning.trident_size, GameEvent::TridentThrow)
        }
    };

    let projectile = Projectile {
        pos: player.pos + Vec2::splat(tuning.muzzle_offset),
        vel: aim_direction(aim_angle) * speed,
        size: Vec2::splat(size),
        active: true,
        player_owned: true,
        kind,
    };
    state.projectiles.push(projectile);

    if kind == ProjectileKind::Shot {
        state.player.ammo = state.player.ammo.saturating_sub(1);
    }
    state.events.push(event);
}

/// Count the power-up down by real elapsed seconds
pub fn decay_power_up(run: &mut RunState, dt: f32) {
    if run.power_up > 0.0 {
        run.power_up = (run.power_up - dt).max(0.0);
    }
}

/// Apply a collected pickup
pub fn apply_pickup(state: &mut GameState, kind: ItemKind) {
    match kind {
        ItemKind::Ammo => state.player.ammo += state.tuning.ammo_pickup_amount,
        // Overwrites whatever was left; not additive
        ItemKind::Potion => state.run.power_up = state.tuning.potion_duration,
    }
    state.events.push(GameEvent::Pickup(kind));
}

/// Take one point of health. Returns true if this defeated the player.
///
/// At 0 health the run enters `GameOver` and further calls do nothing.
pub fn damage_player(state: &mut GameState) -> bool {
    if state.player.health == 0 {
        return false;
    }
    state.player.health -= 1;
    state.events.push(GameEvent::Hurt);
    if state.player.health == 0 {
        log::info!("Player defeated on stage {}", state.run.stage_index + 1);
        state.run.phase = GamePhase::GameOver;
        return true;
    }
    false
}

/// Contact damage from an enemy: hurt, then knock away and shake
pub fn hit_by_enemy(state: &mut GameState, enemy_idx: usize) {
    if damage_player(state) || state.player.health == 0 {
        return;
    }
    let sign = knockback_sign(&state.player, &state.enemies[enemy_idx]);
    state.player.vel.x = sign * state.tuning.knockback;
    state.run.screen_shake = state.tuning.shake_on_hurt;
}

/// Outcome of a projectile striking an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strike {
    Wounded,
    Killed,
}

/// Apply `amount` damage. Enemies without a hit-point pool die outright.
///
/// Dead enemies are untouched, so death is reported exactly once.
pub fn damage_enemy(enemy: &mut Enemy, amount: i32) -> Strike {
    if enemy.dead {
        return Strike::Wounded;
    }
    let killed = match enemy.vitals_mut() {
        Some(vitals) => {
            vitals.hp -= amount;
            vitals.hp <= 0
        }
        None => true,
    };
    if killed {
        enemy.dead = true;
        Strike::Killed
    } else {
        Strike::Wounded
    }
}

/// Move projectiles and resolve their hits against living enemies.
///
/// A projectile deactivates on its first hit, so it damages at most one
/// enemy per tick. Projectiles leaving the field by more than the cull
/// margin are deactivated.
pub fn resolve_projectiles(state: &mut GameState) {
    let tuning = state.tuning.clone();
    let bounds = Rect::new(
        -tuning.cull_margin,
        -tuning.cull_margin,
        tuning.field_width + tuning.cull_margin * 2.0,
        tuning.field_height + tuning.cull_margin * 2.0,
    );

    let mut reward_anchor: Option<Vec2> = None;

    for proj in state.projectiles.iter_mut().filter(|p| p.active) {
        integrate(&mut proj.pos, proj.vel);

        if !proj.rect().overlaps(&bounds) {
            proj.active = false;
            continue;
        }
        if !proj.player_owned {
            continue;
        }

        let Some(idx) = first_enemy_hit(&proj.rect(), &state.enemies) else {
            continue;
        };
        proj.active = false;

        let enemy = &mut state.enemies[idx];
        if damage_enemy(enemy, proj.kind.damage(&tuning)) == Strike::Killed {
            state.events.push(GameEvent::EnemyKilled);
            if enemy.is_king() {
                reward_anchor = Some(enemy.rect().center());
            } else if enemy.hovers() {
                log::info!("Boss down on stage {}", state.run.stage_index + 1);
            }
        }
    }

    if let Some(anchor) = reward_anchor {
        begin_reward(state, anchor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{EnemyKind, Vitals};

    fn playing(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.run.phase = GamePhase::Playing;
        state
    }

    #[test]
    fn test_gun_consumes_ammo() {
        let mut state = playing(1);
        state.player.ammo = 2;
        fire(&mut state, 0.0);
        fire(&mut state, 0.0);
        fire(&mut state, 0.0);
        assert_eq!(state.player.ammo, 0);
        assert_eq!(state.projectiles.len(), 2);
        assert!(state.projectiles.iter().all(|p| p.kind == ProjectileKind::Shot));
    }

    #[test]
    fn test_power_up_gun_is_free_and_boosted() {
        let mut state = playing(1);
        state.player.ammo = 0;
        state.run.power_up = 1.0;
        fire(&mut state, 0.0);
        assert_eq!(state.player.ammo, 0);
        assert_eq!(state.projectiles[0].kind, ProjectileKind::BoostedShot);
    }

    #[test]
    fn test_single_hook() {
        let mut state = playing(1);
        state.player.weapon = Weapon::Rod;
        fire(&mut state, 0.3);
        fire(&mut state, 1.2);
        assert_eq!(state.projectiles.len(), 1);
        assert!(state.has_live_hook());

        state.projectiles[0].active = false;
        fire(&mut state, 1.2);
        assert_eq!(state.projectiles.iter().filter(|p| p.is_live_hook()).count(), 1);
    }

    #[test]
    fn test_trident_follows_empowerment() {
        let mut state = playing(1);
        state.player.weapon = Weapon::Trident;
        state.player.ammo = 0;
        fire(&mut state, 0.0);
        state.player.empowered_trident = true;
        fire(&mut state, 0.0);
        assert_eq!(state.projectiles[0].kind, ProjectileKind::Trident { empowered: false });
        assert_eq!(state.projectiles[1].kind, ProjectileKind::Trident { empowered: true });
        assert_eq!(state.projectiles[1].size, Vec2::splat(state.tuning.trident_size));
    }

    #[test]
    fn test_fire_direction_and_origin() {
        let mut state = playing(1);
        state.player.pos = Vec2::new(100.0, 200.0);
        fire(&mut state, std::f32::consts::FRAC_PI_2);
        let p = &state.projectiles[0];
        assert_eq!(p.pos, Vec2::new(120.0, 220.0));
        assert!(p.vel.x.abs() < 1e-4);
        assert!((p.vel.y - state.tuning.shot_speed).abs() < 1e-4);
    }

    #[test]
    fn test_fire_ignored_outside_playing() {
        let mut state = GameState::new(1);
        fire(&mut state, 0.0);
        state.run.phase = GamePhase::Reward;
        fire(&mut state, 0.0);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_potion_overwrites_duration() {
        let mut state = playing(1);
        state.run.power_up = 4.5;
        apply_pickup(&mut state, ItemKind::Potion);
        assert_eq!(state.run.power_up, state.tuning.potion_duration);
        decay_power_up(&mut state.run, 10.0);
        assert_eq!(state.run.power_up, 0.0);
    }

    #[test]
    fn test_damage_enemy_kills_once() {
        let rect = Rect::new(0.0, 0.0, 140.0, 140.0);
        let mut boss = Enemy::new(rect, 3.0, 1.0, EnemyKind::Boss(Vitals::full(20)));
        assert_eq!(damage_enemy(&mut boss, 15), Strike::Wounded);
        assert_eq!(damage_enemy(&mut boss, 15), Strike::Killed);
        assert_eq!(damage_enemy(&mut boss, 15), Strike::Wounded);
        assert_eq!(boss.vitals().map(|v| v.hp), Some(-10));

        let mut grunt = Enemy::new(rect, 2.0, 1.0, EnemyKind::Basic);
        assert_eq!(damage_enemy(&mut grunt, 2), Strike::Killed);
    }

    #[test]
    fn test_damage_player_floors_at_zero() {
        let mut state = playing(1);
        assert!(!damage_player(&mut state));
        assert!(!damage_player(&mut state));
        assert!(damage_player(&mut state));
        assert_eq!(state.run.phase, GamePhase::GameOver);
        assert!(!damage_player(&mut state));
        assert_eq!(state.player.health, 0);
    }

    #[test]
    fn test_projectile_hits_only_one_enemy() {
        let mut state = playing(1);
        let rect = Rect::new(100.0, 100.0, 50.0, 50.0);
        state.enemies = vec![
            Enemy::new(rect, 0.0, 1.0, EnemyKind::Basic),
            Enemy::new(rect, 0.0, 1.0, EnemyKind::Basic),
        ];
        state.player.pos = Vec2::new(100.0, 100.0);
        fire(&mut state, 0.0);
        resolve_projectiles(&mut state);
        assert_eq!(state.enemies.iter().filter(|e| e.dead).count(), 1);
        assert!(!state.projectiles[0].active);
    }

    #[test]
    fn test_offscreen_projectiles_are_culled() {
        let mut state = playing(1);
        state.player.weapon = Weapon::Rod;
        state.player.pos = Vec2::new(780.0, 100.0);
        fire(&mut state, 0.0);
        for _ in 0..20 {
            resolve_projectiles(&mut state);
        }
        assert!(!state.has_live_hook());
    }
}
