//! Streamed track entities
//!
//! One plain type per kind; the streaming manager keeps each kind in its own
//! container.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::forward_of;

/// Entity kinds the world streams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Obstacle,
    Ramp,
    Powerup,
    SceneryLeft,
    SceneryRight,
    RoadMarking,
    TerrainFeature,
}

impl EntityKind {
    pub const ALL: [EntityKind; 7] = [
        EntityKind::Obstacle,
        EntityKind::Ramp,
        EntityKind::Powerup,
        EntityKind::SceneryLeft,
        EntityKind::SceneryRight,
        EntityKind::RoadMarking,
        EntityKind::TerrainFeature,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleShape {
    Box,
    Sphere,
    Cylinder,
    Cone,
}

impl ObstacleShape {
    pub const ALL: [ObstacleShape; 4] = [
        ObstacleShape::Box,
        ObstacleShape::Sphere,
        ObstacleShape::Cylinder,
        ObstacleShape::Cone,
    ];
}

/// Damages the bike on contact
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub position: Vec3,
    pub shape: ObstacleShape,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ramp {
    pub position: Vec3,
}

/// Worth bonus points when driven through
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Powerup {
    pub position: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropKind {
    Tree,
    Rock,
    NeonPost,
}

impl PropKind {
    pub const ALL: [PropKind; 3] = [PropKind::Tree, PropKind::Rock, PropKind::NeonPost];
}

/// Roadside decoration, one per side per scenery row
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneryProp {
    pub position: Vec3,
    pub side: Side,
    pub prop: PropKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoadMarking {
    pub position: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerrainForm {
    Hill,
    Valley,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerrainFeature {
    pub position: Vec3,
    pub form: TerrainForm,
}

/// Any streamed entity, as handed to the render sink
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SceneEntity {
    Obstacle(Obstacle),
    Ramp(Ramp),
    Powerup(Powerup),
    Scenery(SceneryProp),
    RoadMarking(RoadMarking),
    Terrain(TerrainFeature),
}

impl SceneEntity {
    pub fn kind(&self) -> EntityKind {
        match self {
            SceneEntity::Obstacle(_) => EntityKind::Obstacle,
            SceneEntity::Ramp(_) => EntityKind::Ramp,
            SceneEntity::Powerup(_) => EntityKind::Powerup,
            SceneEntity::Scenery(p) => match p.side {
                Side::Left => EntityKind::SceneryLeft,
                Side::Right => EntityKind::SceneryRight,
            },
            SceneEntity::RoadMarking(_) => EntityKind::RoadMarking,
            SceneEntity::Terrain(_) => EntityKind::TerrainFeature,
        }
    }

    pub fn position(&self) -> Vec3 {
        match self {
            SceneEntity::Obstacle(e) => e.position,
            SceneEntity::Ramp(e) => e.position,
            SceneEntity::Powerup(e) => e.position,
            SceneEntity::Scenery(e) => e.position,
            SceneEntity::RoadMarking(e) => e.position,
            SceneEntity::Terrain(e) => e.position,
        }
    }
}

/// A kind that can live in a [`Stream`](super::streaming::Stream)
pub trait Streamed: Copy {
    fn position(&self) -> Vec3;
    fn to_scene(&self) -> SceneEntity;

    fn forward(&self) -> f32 {
        forward_of(self.position().z)
    }
}

macro_rules! streamed {
    ($ty:ty, $variant:ident) => {
        impl Streamed for $ty {
            fn position(&self) -> Vec3 {
                self.position
            }

            fn to_scene(&self) -> SceneEntity {
                SceneEntity::$variant(*self)
            }
        }
    };
}

streamed!(Obstacle, Obstacle);
streamed!(Ramp, Ramp);
streamed!(Powerup, Powerup);
streamed!(SceneryProp, Scenery);
streamed!(RoadMarking, RoadMarking);
streamed!(TerrainFeature, Terrain);
