//! Render-side view of the world
//!
//! The simulation never builds meshes. It tells a [`SceneSink`] what exists,
//! keeps the handle it got back, and hands that handle back on retirement.

use super::entity::{EntityKind, SceneEntity};
use super::physics::CameraRig;
use super::state::VehicleState;
use crate::consts::{AMBIENT_BASE, AMBIENT_SWING, DAY_NIGHT_RATE};

/// Stable reference to something spawned in the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityHandle {
    index: u32,
    generation: u32,
}

/// Receives scene mutations from the simulation
pub trait SceneSink {
    /// Add an entity, returning the handle used to retire it later
    fn spawn(&mut self, entity: SceneEntity) -> EntityHandle;
    /// Remove a previously spawned entity. Stale handles are ignored.
    fn retire(&mut self, handle: EntityHandle);
    fn update_vehicle(&mut self, vehicle: &VehicleState);
    fn update_camera(&mut self, camera: &CameraRig);
    /// Scene light intensity from the day/night cycle
    fn update_ambient(&mut self, intensity: f32);
}

/// Slow day/night swing of the scene lighting
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AmbientCycle {
    /// Radians into the cycle
    phase: f32,
}

impl AmbientCycle {
    pub fn advance(&mut self, dt: f32) {
        self.phase = (self.phase + DAY_NIGHT_RATE * dt) % std::f32::consts::TAU;
    }

    /// Light intensity, between 0.2 at midnight and 0.8 at noon
    pub fn intensity(&self) -> f32 {
        AMBIENT_BASE + AMBIENT_SWING * self.phase.sin()
    }
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    entity: Option<SceneEntity>,
}

/// Generational arena with stable indices; retiring frees the slot for reuse
/// without disturbing anyone else's handle.
#[derive(Debug, Clone, Default)]
pub struct SceneArena {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
    pub vehicle: VehicleState,
    pub camera: CameraRig,
    pub ambient: f32,
}

impl SceneArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, handle: EntityHandle) -> Option<&SceneEntity> {
        self.slots
            .get(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.entity.as_ref())
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.iter().filter(|e| e.kind() == kind).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SceneEntity> {
        self.slots.iter().filter_map(|slot| slot.entity.as_ref())
    }
}

impl SceneSink for SceneArena {
    fn spawn(&mut self, entity: SceneEntity) -> EntityHandle {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.entity = Some(entity);
            return EntityHandle {
                index,
                generation: slot.generation,
            };
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            entity: Some(entity),
        });
        EntityHandle {
            index,
            generation: 0,
        }
    }

    fn retire(&mut self, handle: EntityHandle) {
        let Some(slot) = self.slots.get_mut(handle.index as usize) else {
            return;
        };
        if slot.generation != handle.generation || slot.entity.is_none() {
            return;
        }
        slot.entity = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.live -= 1;
    }

    fn update_vehicle(&mut self, vehicle: &VehicleState) {
        self.vehicle = *vehicle;
    }

    fn update_camera(&mut self, camera: &CameraRig) {
        self.camera = *camera;
    }

    fn update_ambient(&mut self, intensity: f32) {
        self.ambient = intensity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{Ramp, RoadMarking};
    use glam::Vec3;

    fn ramp(z: f32) -> SceneEntity {
        SceneEntity::Ramp(Ramp {
            position: Vec3::new(0.0, 0.0, z),
        })
    }

    #[test]
    fn handles_stay_valid_across_unrelated_retires() {
        let mut arena = SceneArena::new();
        let a = arena.spawn(ramp(-1.0));
        let b = arena.spawn(ramp(-2.0));
        let c = arena.spawn(ramp(-3.0));
        arena.retire(b);

        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(a).map(|e| e.position().z), Some(-1.0));
        assert_eq!(arena.get(c).map(|e| e.position().z), Some(-3.0));
        assert!(arena.get(b).is_none());
    }

    #[test]
    fn stale_handle_cannot_touch_reused_slot() {
        let mut arena = SceneArena::new();
        let old = arena.spawn(ramp(-1.0));
        arena.retire(old);
        let new = arena.spawn(SceneEntity::RoadMarking(RoadMarking {
            position: Vec3::new(0.0, 0.02, -5.0),
        }));

        // Same slot, new generation
        assert!(arena.get(old).is_none());
        arena.retire(old);
        assert_eq!(arena.len(), 1);
        assert_eq!(arena.count(EntityKind::RoadMarking), 1);
        assert!(arena.get(new).is_some());
    }

    #[test]
    fn ambient_cycle_swings_with_time_not_frames() {
        let mut coarse = AmbientCycle::default();
        assert!((coarse.intensity() - AMBIENT_BASE).abs() < 1e-6);

        // A quarter cycle reaches full daylight
        let quarter = std::f32::consts::FRAC_PI_2 / DAY_NIGHT_RATE;
        let mut fine = AmbientCycle::default();
        for _ in 0..100 {
            coarse.advance(quarter / 100.0);
        }
        for _ in 0..1_000 {
            fine.advance(quarter / 1_000.0);
        }
        assert!((coarse.intensity() - 0.8).abs() < 1e-3);
        assert!((coarse.intensity() - fine.intensity()).abs() < 1e-3);
    }

    #[test]
    fn double_retire_is_harmless() {
        let mut arena = SceneArena::new();
        let h = arena.spawn(ramp(0.0));
        arena.retire(h);
        arena.retire(h);
        assert!(arena.is_empty());
    }
}
