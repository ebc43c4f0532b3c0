//! Game state and core simulation types

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::forward_of;

/// Top-level mode of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Lifecycle {
    /// Title screen, nothing simulated
    #[default]
    Menu,
    /// Active run
    Playing,
    /// Run suspended by the player
    Paused,
    /// Run ended, final stats on display
    GameOver,
}

/// Held directional controls plus jump bookkeeping
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    /// Simulation time (ms) of the last successful jump
    #[serde(skip)]
    pub last_jump_ms: Option<f64>,
}

/// Bike kinematics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleState {
    pub position: Vec3,
    /// Lateral velocity (+x = right)
    pub velocity_x: f32,
    /// Longitudinal velocity (-z = forward)
    pub velocity_z: f32,
    pub vertical_velocity: f32,
    /// Roll angle, leaning into turns
    pub bank: f32,
    /// Nose-up angle, grows with speed
    pub pitch: f32,
    pub grounded: bool,
}

impl Default for VehicleState {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, GROUND_HEIGHT, 0.0),
            velocity_x: 0.0,
            velocity_z: 0.0,
            vertical_velocity: 0.0,
            bank: 0.0,
            pitch: 0.0,
            grounded: true,
        }
    }
}

impl VehicleState {
    /// Speed in the travel direction (negative when reversing)
    pub fn forward_speed(&self) -> f32 {
        -self.velocity_z
    }

    /// Distance along the track
    pub fn forward_position(&self) -> f32 {
        forward_of(self.position.z)
    }
}

/// Something the host may want to react to (sound, particles, screen flash)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Jump,
    Crash,
    Powerup,
    MenuInteraction,
    GameOver,
}

/// Per-run counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    pub score: u64,
    pub distance: f32,
    pub stunts: u32,
    pub health: i32,
    /// Forward speed, never negative
    pub speed: f32,
    /// Points from pickups, kept apart so the distance formula can't erase them
    pub bonus: u64,
}

impl Default for RunStats {
    fn default() -> Self {
        Self {
            score: 0,
            distance: 0.0,
            stunts: 0,
            health: MAX_HEALTH,
            speed: 0.0,
            bonus: 0,
        }
    }
}

impl RunStats {
    /// Refresh speed, distance and score from the vehicle
    pub fn track(&mut self, vehicle: &VehicleState) {
        self.speed = vehicle.forward_speed().max(0.0);
        self.distance = vehicle.position.z.abs();
        self.recompute_score();
    }

    pub fn add_bonus(&mut self, points: u64) {
        self.bonus += points;
        self.score += points;
    }

    fn recompute_score(&mut self) {
        self.score = self.distance.floor() as u64 + self.stunts as u64 * STUNT_POINTS + self.bonus;
    }

    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot {
            score: self.score,
            distance: self.distance.floor() as u32,
            speed: self.speed.floor() as u32,
            stunts: self.stunts,
            health: self.health,
        }
    }
}

/// What the HUD shows, refreshed every Playing tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub score: u64,
    pub distance: u32,
    pub speed: u32,
    pub stunts: u32,
    pub health: i32,
}
