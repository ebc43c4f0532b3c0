//! Vehicle physics
//!
//! Integrates held controls into bike kinematics. Every rate is scaled by the
//! measured frame time, so a run plays the same at 30 or 144 fps.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::state::{ControlState, VehicleState};
use crate::consts::*;
use crate::tuning::VehicleTuning;
use crate::{approach_zero, blend_factor};

/// Fraction of the camera's distance to its target that survives one second
const CAMERA_RETAIN_PER_SECOND: f32 = 0.001;
/// Bank angle at full lateral speed (radians)
const MAX_BANK: f32 = 0.25;
/// Pitch angle at full forward speed (radians)
const MAX_PITCH: f32 = 0.05;

/// Advance the vehicle by `dt` seconds
pub fn integrate(vehicle: &mut VehicleState, controls: &ControlState, tuning: &VehicleTuning, dt: f32) {
    // Longitudinal: throttle and brake stack when both are held
    let mut accel_z = 0.0;
    if controls.forward {
        accel_z -= tuning.forward_acceleration;
    }
    if controls.backward {
        accel_z += tuning.brake_acceleration;
    }
    vehicle.velocity_z += accel_z * dt;
    vehicle.velocity_z = vehicle
        .velocity_z
        .clamp(-tuning.max_forward_speed, tuning.max_reverse_speed);
    if !controls.forward && !controls.backward {
        vehicle.velocity_z = approach_zero(vehicle.velocity_z, tuning.longitudinal_damping * dt);
    }

    // Lateral
    let mut accel_x = 0.0;
    if controls.left {
        accel_x -= tuning.lateral_acceleration;
    }
    if controls.right {
        accel_x += tuning.lateral_acceleration;
    }
    vehicle.velocity_x += accel_x * dt;
    vehicle.velocity_x = vehicle
        .velocity_x
        .clamp(-tuning.lateral_max_speed, tuning.lateral_max_speed);
    if !controls.left && !controls.right {
        vehicle.velocity_x = approach_zero(vehicle.velocity_x, tuning.lateral_damping * dt);
    }

    // Vertical
    if vehicle.position.y <= GROUND_HEIGHT {
        vehicle.position.y = GROUND_HEIGHT;
        if vehicle.vertical_velocity < 0.0 {
            vehicle.vertical_velocity = 0.0;
        }
    } else {
        vehicle.vertical_velocity += tuning.gravity * dt;
    }
    vehicle.position.y += vehicle.vertical_velocity * dt;
    vehicle.grounded = vehicle.position.y <= GROUND_HEIGHT;

    // Position clamp, not velocity clamp: sliding along the edge keeps vx
    vehicle.position.x =
        (vehicle.position.x + vehicle.velocity_x * dt).clamp(-LATERAL_LIMIT, LATERAL_LIMIT);
    vehicle.position.z += vehicle.velocity_z * dt;

    orient(vehicle, tuning);
}

/// Bank into turns and lift the nose with speed
pub fn orient(vehicle: &mut VehicleState, tuning: &VehicleTuning) {
    let lean = (vehicle.velocity_x / tuning.lateral_max_speed).clamp(-1.0, 1.0);
    vehicle.bank = -lean * MAX_BANK;
    vehicle.pitch = (vehicle.forward_speed() / tuning.max_forward_speed).clamp(0.0, 1.0) * MAX_PITCH;
}

/// Attempt a jump at simulation time `now_ms`. Returns whether it fired.
///
/// Only succeeds near the ground and once the cooldown since the previous
/// successful jump has elapsed; otherwise nothing changes.
pub fn try_jump(
    vehicle: &mut VehicleState,
    controls: &mut ControlState,
    tuning: &VehicleTuning,
    now_ms: f64,
) -> bool {
    if let Some(last) = controls.last_jump_ms {
        if now_ms - last < tuning.jump_cooldown_ms {
            return false;
        }
    }
    if vehicle.position.y > JUMP_GROUND_TOLERANCE {
        return false;
    }
    vehicle.vertical_velocity = tuning.jump_speed;
    controls.last_jump_ms = Some(now_ms);
    true
}

/// Push the bike back after hitting something
pub fn knockback(vehicle: &mut VehicleState, impulse: f32, cap: f32) {
    vehicle.velocity_z = (vehicle.velocity_z + impulse).min(cap);
}

/// Chase camera trailing the bike
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraRig {
    pub position: Vec3,
    pub look_at: Vec3,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 10.0, 20.0),
            look_at: Vec3::ZERO,
        }
    }
}

impl CameraRig {
    /// Where the camera wants to sit for the given bike pose
    pub fn target_for(vehicle: &VehicleState) -> Vec3 {
        let p = vehicle.position;
        Vec3::new(p.x * 0.3, 8.0 + p.y * 0.2, p.z + 22.0)
    }

    /// Ease toward the bike with exponential smoothing
    pub fn follow(&mut self, vehicle: &VehicleState, dt: f32) {
        let target = Self::target_for(vehicle);
        self.position = self
            .position
            .lerp(target, blend_factor(CAMERA_RETAIN_PER_SECOND, dt));
        let p = vehicle.position;
        self.look_at = Vec3::new(p.x, p.y + 1.0, p.z - 5.0);
    }
}
