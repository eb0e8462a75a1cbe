//! Per-tick collision and pickup resolution.

use super::entities::{
    Collectible, CollectibleKind, Obstacle, PowerUp, PowerUpKind, WorldEntity,
};
use super::player::Player;
use crate::core::constants::{MAGNET_PULL_SPEED, MAGNET_RANGE};

/// What the resolver did this tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    /// The player hit an obstacle without a shield and started dying.
    pub fatal: bool,
    /// A shield absorbed a hit.
    pub shield_broken: bool,
    /// Points from collectibles picked up this tick.
    pub points: u64,
    pub collected: Vec<CollectibleKind>,
    pub power_ups: Vec<PowerUpKind>,
}

/// Intersect the player's hit-box with every live entity and apply the
/// outcomes. Collected pickups and shield-destroyed obstacles are only
/// marked; the caller prunes them before the tick ends.
pub fn resolve(
    player: &mut Player,
    obstacles: &mut [Obstacle],
    collectibles: &mut [Collectible],
    power_ups: &mut [PowerUp],
) -> CollisionReport {
    let mut report = CollisionReport::default();
    if player.is_dying {
        return report;
    }

    let hitbox = player.hitbox();

    for obstacle in obstacles.iter_mut().filter(|o| !o.destroyed) {
        if !hitbox.intersects(&obstacle.bounds()) {
            continue;
        }
        if player.consume_shield() {
            obstacle.destroyed = true;
            report.shield_broken = true;
        } else {
            player.start_dying();
            report.fatal = true;
            return report;
        }
    }

    for item in collectibles.iter_mut().filter(|c| !c.collected) {
        if hitbox.intersects(&item.bounds()) {
            item.collected = true;
            report.points += item.value();
            report.collected.push(item.kind);
        }
    }

    for power_up in power_ups.iter_mut().filter(|p| !p.collected) {
        if hitbox.intersects(&power_up.bounds()) {
            power_up.collected = true;
            player.activate(power_up.kind);
            report.power_ups.push(power_up.kind);
        }
    }

    report
}

/// Pull every live collectible toward the player while the magnet is on.
pub fn apply_magnet(player: &Player, collectibles: &mut [Collectible]) {
    if !player.magnet_active || player.is_dying {
        return;
    }
    let target = player.center();
    for item in collectibles.iter_mut().filter(|c| !c.collected) {
        item.pull_toward(target, MAGNET_RANGE, MAGNET_PULL_SPEED);
    }
}
