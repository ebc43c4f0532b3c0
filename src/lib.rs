//! Neon Bike - endless-runner simulation core
//!
//! Core modules:
//! - `sim`: Simulation (vehicle physics, world streaming, collisions, lifecycle)
//! - `audio`: Engine tone and one-shot sound mapping
//! - `platform`: Browser host binding
//! - `tuning`: Data-driven game balance
//! - `settings`: Player audio preferences

pub mod audio;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Vehicle ride height; at or below this the bike is on the road
    pub const GROUND_HEIGHT: f32 = 1.0;
    /// Jumps are allowed up to this height (slack over `GROUND_HEIGHT`)
    pub const JUMP_GROUND_TOLERANCE: f32 = 1.05;
    /// Lateral position limit (road half-width minus bike clearance)
    pub const LATERAL_LIMIT: f32 = 8.0;

    /// Health at the start of a run
    pub const MAX_HEALTH: i32 = 100;
    /// Points per successful jump
    pub const STUNT_POINTS: u64 = 100;

    /// Obstacle placement
    pub const OBSTACLE_HALF_SPREAD: f32 = 7.5;
    pub const OBSTACLE_HEIGHT: f32 = 1.0;

    /// Ramp placement
    pub const RAMP_HALF_SPREAD: f32 = 5.0;

    /// Powerups sit closer to the travel path so they are reachable
    pub const POWERUP_HALF_SPREAD: f32 = 4.0;
    pub const POWERUP_MIN_HEIGHT: f32 = 1.5;
    pub const POWERUP_MAX_HEIGHT: f32 = 2.5;

    /// Road markings run down the centre line
    pub const MARKING_HEIGHT: f32 = 0.02;

    /// Terrain features
    pub const HILL_HALF_SPREAD: f32 = 20.0;
    pub const HILL_HEIGHT: f32 = -5.0;
    pub const VALLEY_HALF_SPREAD: f32 = 15.0;
    pub const VALLEY_HEIGHT: f32 = -2.5;

    /// Scenery props stand beyond the road edge (~10)
    pub const SCENERY_INNER_OFFSET: f32 = 14.0;
    pub const SCENERY_JITTER: f32 = 5.0;

    /// Placeholder frontier for an empty stream: far behind the vehicle
    pub const EMPTY_STREAM_SENTINEL: f32 = 1000.0;
    /// Upper bound on refill batches a single stream may spawn in one tick
    pub const MAX_REFILL_BATCHES: usize = 64;

    /// Day/night cycle speed (radians per second)
    pub const DAY_NIGHT_RATE: f32 = 0.06;
    /// Mean scene light intensity and its swing over the cycle
    pub const AMBIENT_BASE: f32 = 0.5;
    pub const AMBIENT_SWING: f32 = 0.3;
}

/// Distance along the travel direction. The track runs toward -z.
#[inline]
pub fn forward_of(z: f32) -> f32 {
    -z
}

/// Move `value` toward zero by `amount` without crossing it
#[inline]
pub fn approach_zero(value: f32, amount: f32) -> f32 {
    value - value.abs().min(amount) * value.signum()
}

/// Frame-rate independent blend factor: fraction of the remaining gap closed
/// in `dt` seconds when `retain` of the gap survives each second.
#[inline]
pub fn blend_factor(retain: f32, dt: f32) -> f32 {
    1.0 - retain.powf(dt)
}

/// Blend factor for a first-order lag with time constant `tau` seconds
#[inline]
pub fn lag_factor(tau: f32, dt: f32) -> f32 {
    if tau <= 0.0 {
        1.0
    } else {
        1.0 - (-dt / tau).exp()
    }
}
