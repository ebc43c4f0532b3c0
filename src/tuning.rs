//! Data-driven game balance
//!
//! Every number that shapes how the run feels lives here. Defaults match the
//! shipped game; a JSON document can override any subset of fields.

use std::path::Path;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Rejected tuning document
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be positive (got {value})")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f32 },
    #[error("{field}: spawn offsets must satisfy 0 < min <= max (got {min}..{max})")]
    BadOffsets {
        field: &'static str,
        min: f32,
        max: f32,
    },
    #[error("{field}: batch size must be at least 1")]
    EmptyBatch { field: &'static str },
}

/// Vehicle physics constants (units, seconds)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleTuning {
    /// Vertical acceleration while airborne (negative = down)
    pub gravity: f32,
    pub max_forward_speed: f32,
    pub max_reverse_speed: f32,
    pub forward_acceleration: f32,
    pub brake_acceleration: f32,
    pub lateral_acceleration: f32,
    pub lateral_max_speed: f32,
    /// Speed shed per second with no throttle or brake
    pub longitudinal_damping: f32,
    /// Speed shed per second with no steering
    pub lateral_damping: f32,
    pub jump_speed: f32,
    pub jump_cooldown_ms: f64,
}

impl Default for VehicleTuning {
    fn default() -> Self {
        Self {
            gravity: -30.0,
            max_forward_speed: 80.0,
            max_reverse_speed: 15.0,
            forward_acceleration: 120.0,
            brake_acceleration: 140.0,
            lateral_acceleration: 60.0,
            lateral_max_speed: 20.0,
            longitudinal_damping: 1.5,
            lateral_damping: 3.0,
            jump_speed: 13.0,
            jump_cooldown_ms: 400.0,
        }
    }
}

/// Hit and pickup rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionTuning {
    /// Obstacle hit distance (strict)
    pub obstacle_radius: f32,
    /// Powerup pickup distance (strict), looser than obstacles
    pub powerup_radius: f32,
    pub hit_damage: i32,
    /// Window after a hit during which further obstacle overlaps are ignored
    pub hit_invuln_ms: f64,
    /// Added to z-velocity on a hit
    pub knockback_impulse: f32,
    /// Ceiling on z-velocity after knockback
    pub knockback_cap: f32,
    pub powerup_points: u64,
}

impl Default for CollisionTuning {
    fn default() -> Self {
        Self {
            obstacle_radius: 2.0,
            powerup_radius: 3.0,
            hit_damage: 20,
            hit_invuln_ms: 800.0,
            knockback_impulse: 15.0,
            knockback_cap: 10.0,
            powerup_points: 500,
        }
    }
}

/// How a refill batch is laid out ahead of its anchor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum SpacingRule {
    /// Each entity lands uniformly in `anchor + [min_offset, max_offset]`
    Scatter { min_offset: f32, max_offset: f32 },
    /// Entity `i` lands at `anchor + (i + 1) * step`
    Step { step: f32 },
}

/// Initial layout on (re)start: entity `i` at `start + i * spacing + [0, jitter]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Seeding {
    pub count: usize,
    pub start: f32,
    pub spacing: f32,
    pub jitter: f32,
}

/// Per-kind streaming window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StreamingWindow {
    /// The farthest entity must sit at least this far ahead of the vehicle
    pub generation_distance_ahead: f32,
    /// Entities this far behind the vehicle are retired
    pub retirement_margin_behind: f32,
    pub batch_size: usize,
    pub spacing: SpacingRule,
    pub seed: Seeding,
}

impl StreamingWindow {
    const fn scatter(
        ahead: f32,
        behind: f32,
        batch_size: usize,
        offsets: (f32, f32),
        seed: Seeding,
    ) -> Self {
        Self {
            generation_distance_ahead: ahead,
            retirement_margin_behind: behind,
            batch_size,
            spacing: SpacingRule::Scatter {
                min_offset: offsets.0,
                max_offset: offsets.1,
            },
            seed,
        }
    }
}

/// Roadside scenery rows, spawned by a catch-up cursor rather than batches
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneryWindow {
    /// Forward distance between consecutive rows
    pub spacing: f32,
    /// Rows are kept spawned up to this far ahead of the vehicle
    pub lookahead: f32,
    pub retirement_margin_behind: f32,
    pub initial_rows: usize,
    /// Forward position of the first seeded row
    pub start: f32,
}

impl Default for SceneryWindow {
    fn default() -> Self {
        Self {
            spacing: 12.0,
            lookahead: 360.0,
            retirement_margin_behind: 60.0,
            initial_rows: 30,
            start: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamingTuning {
    #[serde(deserialize_with = "obstacles_over_default")]
    pub obstacles: StreamingWindow,
    #[serde(deserialize_with = "ramps_over_default")]
    pub ramps: StreamingWindow,
    #[serde(deserialize_with = "powerups_over_default")]
    pub powerups: StreamingWindow,
    #[serde(deserialize_with = "markings_over_default")]
    pub markings: StreamingWindow,
    #[serde(deserialize_with = "terrain_over_default")]
    pub terrain: StreamingWindow,
    pub scenery: SceneryWindow,
}

/// Windows differ per kind, so a partial window is laid over that kind's
/// own defaults rather than a shared `Default`.
fn window_over<'de, D: Deserializer<'de>>(
    deserializer: D,
    base: StreamingWindow,
) -> Result<StreamingWindow, D::Error> {
    let overrides = Value::deserialize(deserializer)?;
    let mut merged = serde_json::to_value(base).map_err(D::Error::custom)?;
    merge_json(&mut merged, overrides);
    serde_json::from_value(merged).map_err(D::Error::custom)
}

/// Recursively overwrite `base` with whatever `overrides` sets
fn merge_json(base: &mut Value, overrides: Value) {
    match (base, overrides) {
        (Value::Object(base), Value::Object(overrides)) => {
            for (key, value) in overrides {
                match base.get_mut(&key) {
                    Some(slot) => merge_json(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

macro_rules! window_over_default {
    ($($name:ident => $field:ident),* $(,)?) => {
        $(
            fn $name<'de, D: Deserializer<'de>>(deserializer: D) -> Result<StreamingWindow, D::Error> {
                window_over(deserializer, StreamingTuning::default().$field)
            }
        )*
    };
}

window_over_default! {
    obstacles_over_default => obstacles,
    ramps_over_default => ramps,
    powerups_over_default => powerups,
    markings_over_default => markings,
    terrain_over_default => terrain,
}

impl Default for StreamingTuning {
    fn default() -> Self {
        Self {
            obstacles: StreamingWindow::scatter(
                200.0,
                50.0,
                5,
                (50.0, 150.0),
                Seeding {
                    count: 20,
                    start: 50.0,
                    spacing: 50.0,
                    jitter: 30.0,
                },
            ),
            ramps: StreamingWindow::scatter(
                200.0,
                50.0,
                3,
                (100.0, 250.0),
                Seeding {
                    count: 10,
                    start: 80.0,
                    spacing: 80.0,
                    jitter: 40.0,
                },
            ),
            powerups: StreamingWindow::scatter(
                150.0,
                50.0,
                4,
                (50.0, 150.0),
                Seeding {
                    count: 8,
                    start: 50.0,
                    spacing: 25.0,
                    jitter: 0.0,
                },
            ),
            markings: StreamingWindow {
                generation_distance_ahead: 200.0,
                retirement_margin_behind: 50.0,
                batch_size: 10,
                spacing: SpacingRule::Step { step: 20.0 },
                seed: Seeding {
                    count: 50,
                    start: 0.0,
                    spacing: 20.0,
                    jitter: 0.0,
                },
            },
            terrain: StreamingWindow::scatter(
                200.0,
                100.0,
                3,
                (100.0, 300.0),
                Seeding {
                    count: 0,
                    start: 0.0,
                    spacing: 0.0,
                    jitter: 0.0,
                },
            ),
            scenery: SceneryWindow::default(),
        }
    }
}

/// Complete balance sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub vehicle: VehicleTuning,
    pub collision: CollisionTuning,
    pub streaming: StreamingTuning,
    /// Longest step a single tick may integrate (absorbs host stalls)
    pub max_tick_seconds: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            vehicle: VehicleTuning::default(),
            collision: CollisionTuning::default(),
            streaming: StreamingTuning::default(),
            max_tick_seconds: 0.1,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document. Missing fields keep defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load a tuning document from disk
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check the invariants the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        let v = &self.vehicle;
        positive("vehicle.max_forward_speed", v.max_forward_speed)?;
        positive("vehicle.max_reverse_speed", v.max_reverse_speed)?;
        positive("vehicle.forward_acceleration", v.forward_acceleration)?;
        positive("vehicle.brake_acceleration", v.brake_acceleration)?;
        positive("vehicle.lateral_acceleration", v.lateral_acceleration)?;
        positive("vehicle.lateral_max_speed", v.lateral_max_speed)?;
        positive("vehicle.jump_speed", v.jump_speed)?;
        positive("vehicle.gravity (downward)", -v.gravity)?;
        non_negative("vehicle.longitudinal_damping", v.longitudinal_damping)?;
        non_negative("vehicle.lateral_damping", v.lateral_damping)?;
        non_negative("vehicle.jump_cooldown_ms", v.jump_cooldown_ms as f32)?;

        let c = &self.collision;
        positive("collision.obstacle_radius", c.obstacle_radius)?;
        positive("collision.powerup_radius", c.powerup_radius)?;
        non_negative("collision.hit_invuln_ms", c.hit_invuln_ms as f32)?;

        let s = &self.streaming;
        window("streaming.obstacles", &s.obstacles)?;
        window("streaming.ramps", &s.ramps)?;
        window("streaming.powerups", &s.powerups)?;
        window("streaming.markings", &s.markings)?;
        window("streaming.terrain", &s.terrain)?;
        positive("streaming.scenery.spacing", s.scenery.spacing)?;
        non_negative("streaming.scenery.lookahead", s.scenery.lookahead)?;
        non_negative(
            "streaming.scenery.retirement_margin_behind",
            s.scenery.retirement_margin_behind,
        )?;

        positive("max_tick_seconds", self.max_tick_seconds)?;
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
    // NaN fails this comparison too
    if value > 0.0 {
        Ok(())
    } else {
        Err(TuningError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(TuningError::Negative { field, value })
    }
}

fn window(field: &'static str, w: &StreamingWindow) -> Result<(), TuningError> {
    if w.batch_size == 0 {
        return Err(TuningError::EmptyBatch { field });
    }
    non_negative(field, w.generation_distance_ahead)?;
    non_negative(field, w.retirement_margin_behind)?;
    match w.spacing {
        SpacingRule::Scatter {
            min_offset,
            max_offset,
        } => {
            if !(min_offset > 0.0 && min_offset <= max_offset) {
                return Err(TuningError::BadOffsets {
                    field,
                    min: min_offset,
                    max: max_offset,
                });
            }
        }
        SpacingRule::Step { step } => positive(field, step)?,
    }
    Ok(())
}
