//! Simulation module
//!
//! All gameplay logic lives here. Nothing in this module touches a renderer
//! or audio device directly:
//! - Measured frame time, clamped per tick
//! - Seeded RNG only
//! - Scene and audio changes go out through sink traits

pub mod collision;
pub mod entity;
pub mod lifecycle;
pub mod physics;
pub mod scene;
pub mod state;
pub mod streaming;
pub mod tick;

pub use collision::{CollisionOutcome, HitClock, resolve};
pub use entity::{
    EntityKind, Obstacle, ObstacleShape, Powerup, PropKind, Ramp, RoadMarking, SceneEntity,
    SceneryProp, Side, TerrainFeature, TerrainForm,
};
pub use lifecycle::{Command, Transition, UnknownCommand};
pub use physics::CameraRig;
pub use scene::{EntityHandle, SceneArena, SceneSink};
pub use state::{ControlState, GameEvent, HudSnapshot, Lifecycle, RunStats, VehicleState};
pub use streaming::World;
pub use tick::{Game, TickInput};
