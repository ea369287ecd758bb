//! Collision detection between entity classes
//!
//! These are the pairwise tests; the consequences (damage, stage changes)
//! are applied by `combat`, `stage` and `tick`.

use super::rect::Rect;
use super::state::{Enemy, Item, ItemKind, Platform, Player};

/// Whether a platform catches a player this tick.
///
/// One-sided and velocity-gated: the player's bottom edge must have crossed
/// the platform top, but by no more than `tolerance + vel_y`, while moving
/// down. Jumping up through a platform never lands. The band scales with
/// fall speed, so the check only misses a platform when the previous
/// bottom edge was already more than `tolerance` below its top.
pub fn platform_supports(player: &Rect, vel_y: f32, platform: &Rect, tolerance: f32) -> bool {
    let bottom = player.bottom();
    player.overlaps_x(platform)
        && vel_y >= 0.0
        && bottom > platform.top()
        && bottom < platform.top() + tolerance + vel_y
}

/// Snap the player onto any supporting platform. Returns true if landed.
pub fn resolve_platforms(player: &mut Player, platforms: &[Platform], tolerance: f32) -> bool {
    let mut landed = false;
    for platform in platforms {
        if platform_supports(&player.rect(), player.vel.y, &platform.rect, tolerance) {
            player.pos.y = platform.rect.top() - player.size.y;
            player.vel.y = 0.0;
            player.grounded = true;
            landed = true;
        }
    }
    landed
}

/// Player has dropped below the bottom of the playfield
#[inline]
pub fn below_field(player: &Player, field_height: f32) -> bool {
    player.pos.y > field_height
}

/// Deactivate every active item the player touches, returning their kinds
pub fn collect_items(player: &Rect, items: &mut [Item]) -> Vec<ItemKind> {
    let mut collected = Vec::new();
    for item in items.iter_mut().filter(|it| it.active) {
        if player.overlaps(&item.rect) {
            item.active = false;
            collected.push(item.kind);
        }
    }
    collected
}

/// Index of the first living enemy overlapping `rect`
pub fn first_enemy_hit(rect: &Rect, enemies: &[Enemy]) -> Option<usize> {
    enemies
        .iter()
        .position(|en| en.is_alive() && rect.overlaps(&en.rect()))
}

/// Horizontal knockback sign pushing the player away from an enemy
#[inline]
pub fn knockback_sign(player: &Player, enemy: &Enemy) -> f32 {
    if player.pos.x < enemy.pos.x { -1.0 } else { 1.0 }
}
