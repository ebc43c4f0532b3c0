//! Collision detection and scoring
//!
//! Runs once per tick, after physics has moved the bike and before the world
//! windows advance. Hits are marked on the streams and swept out afterwards,
//! so no neighbour is skipped or visited twice.

use glam::Vec3;

use super::physics::knockback;
use super::state::{GameEvent, RunStats, VehicleState};
use super::streaming::World;
use crate::tuning::CollisionTuning;

/// What happened during one collision pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionOutcome {
    pub hits: u32,
    pub pickups: u32,
    /// Health ran out; the run must end
    pub fatal: bool,
}

/// Invulnerability bookkeeping between obstacle hits
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HitClock {
    last_hit_ms: Option<f64>,
}

impl HitClock {
    pub fn is_vulnerable(&self, now_ms: f64, invuln_ms: f64) -> bool {
        self.last_hit_ms.is_none_or(|last| now_ms - last > invuln_ms)
    }

    fn record(&mut self, now_ms: f64) {
        self.last_hit_ms = Some(now_ms);
    }
}

/// Resolve obstacle hits and powerup pickups against the bike's current position
pub fn resolve(
    vehicle: &mut VehicleState,
    world: &mut World,
    stats: &mut RunStats,
    clock: &mut HitClock,
    now_ms: f64,
    tuning: &CollisionTuning,
    events: &mut Vec<GameEvent>,
) -> CollisionOutcome {
    let mut outcome = CollisionOutcome::default();

    for index in 0..world.obstacles.len() {
        let live = &world.obstacles.entries()[index];
        if live.is_consumed() || !within(vehicle.position, live.entity.position, tuning.obstacle_radius) {
            continue;
        }
        if !clock.is_vulnerable(now_ms, tuning.hit_invuln_ms) {
            continue;
        }

        clock.record(now_ms);
        stats.health = (stats.health - tuning.hit_damage).max(0);
        knockback(vehicle, tuning.knockback_impulse, tuning.knockback_cap);
        world.obstacles.mark_consumed(index);
        events.push(GameEvent::Crash);
        outcome.hits += 1;
        log::debug!("Obstacle hit, health now {}", stats.health);

        if stats.health <= 0 {
            outcome.fatal = true;
            return outcome;
        }
    }

    // Pickups ignore the hit window, so several can land in one tick
    for index in 0..world.powerups.len() {
        let live = &world.powerups.entries()[index];
        if live.is_consumed() || !within(vehicle.position, live.entity.position, tuning.powerup_radius) {
            continue;
        }
        stats.add_bonus(tuning.powerup_points);
        world.powerups.mark_consumed(index);
        events.push(GameEvent::Powerup);
        outcome.pickups += 1;
    }

    outcome
}

#[inline]
fn within(a: Vec3, b: Vec3, radius: f32) -> bool {
    a.distance(b) < radius
}
