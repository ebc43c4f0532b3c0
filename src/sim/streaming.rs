//! World streaming
//!
//! The track is endless, so nothing is laid out up front. Each entity kind
//! keeps its own window around the bike: batches are spawned ahead whenever
//! the farthest live entity falls inside the generation distance, and
//! anything left far enough behind is retired. Scenery rows use a catch-up
//! cursor instead of threshold batches.
//!
//! Positions are reasoned about in forward distance (`-z`).

use glam::Vec3;
use rand::Rng;
use rand_pcg::Pcg32;

use super::entity::*;
use super::scene::{EntityHandle, SceneSink};
use crate::consts::*;
use crate::tuning::{SceneryWindow, Seeding, SpacingRule, StreamingTuning, StreamingWindow};

/// A live entity and the scene handle it was spawned under
#[derive(Debug, Clone)]
pub struct Live<T> {
    pub handle: EntityHandle,
    pub entity: T,
    consumed: bool,
}

impl<T> Live<T> {
    pub fn is_consumed(&self) -> bool {
        self.consumed
    }
}

/// Live set of a single entity kind
#[derive(Debug, Clone)]
pub struct Stream<T> {
    live: Vec<Live<T>>,
}

impl<T> Default for Stream<T> {
    fn default() -> Self {
        Self { live: Vec::new() }
    }
}

impl<T: Streamed> Stream<T> {
    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn entries(&self) -> &[Live<T>] {
        &self.live
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.live.iter().map(|l| &l.entity)
    }

    pub fn spawn<S: SceneSink + ?Sized>(&mut self, entity: T, scene: &mut S) {
        let handle = scene.spawn(entity.to_scene());
        self.live.push(Live {
            handle,
            entity,
            consumed: false,
        });
    }

    /// Flag an entity for removal at the next sweep. Indices stay stable until then.
    pub fn mark_consumed(&mut self, index: usize) {
        if let Some(live) = self.live.get_mut(index) {
            live.consumed = true;
        }
    }

    /// Farthest forward position in the set, or a point far behind the
    /// vehicle when the set is empty so a refill is forced.
    pub fn frontier(&self, vehicle_forward: f32) -> f32 {
        self.live
            .iter()
            .map(|l| l.entity.forward())
            .reduce(f32::max)
            .unwrap_or(vehicle_forward - EMPTY_STREAM_SENTINEL)
    }

    /// Single compaction pass: drops consumed entities and, when `margin` is
    /// given, those more than `margin` behind the vehicle.
    pub fn sweep<S: SceneSink + ?Sized>(
        &mut self,
        vehicle_forward: f32,
        margin: Option<f32>,
        scene: &mut S,
    ) -> usize {
        let before = self.live.len();
        self.live.retain(|l| {
            let behind = margin.is_some_and(|m| l.entity.forward() < vehicle_forward - m);
            if l.consumed || behind {
                scene.retire(l.handle);
                false
            } else {
                true
            }
        });
        before - self.live.len()
    }

    pub fn clear<S: SceneSink + ?Sized>(&mut self, scene: &mut S) {
        for l in self.live.drain(..) {
            scene.retire(l.handle);
        }
    }
}

/// Kinds produced by threshold batches
trait Generate: Streamed + Sized {
    fn generate(rng: &mut Pcg32, forward: f32) -> Self;

    /// Fill one batch; `slots` holds the forward position picked for each entity
    fn generate_batch(rng: &mut Pcg32, slots: &[f32], out: &mut Vec<Self>) {
        out.extend(slots.iter().map(|&forward| Self::generate(rng, forward)));
    }
}

fn spread(rng: &mut Pcg32, half: f32) -> f32 {
    rng.random_range(-half..=half)
}

impl Generate for Obstacle {
    fn generate(rng: &mut Pcg32, forward: f32) -> Self {
        let shape = ObstacleShape::ALL[rng.random_range(0..ObstacleShape::ALL.len())];
        Obstacle {
            position: Vec3::new(spread(rng, OBSTACLE_HALF_SPREAD), OBSTACLE_HEIGHT, -forward),
            shape,
        }
    }
}

impl Generate for Ramp {
    fn generate(rng: &mut Pcg32, forward: f32) -> Self {
        Ramp {
            position: Vec3::new(spread(rng, RAMP_HALF_SPREAD), 0.0, -forward),
        }
    }
}

impl Generate for Powerup {
    fn generate(rng: &mut Pcg32, forward: f32) -> Self {
        let x = spread(rng, POWERUP_HALF_SPREAD);
        let y = rng.random_range(POWERUP_MIN_HEIGHT..=POWERUP_MAX_HEIGHT);
        Powerup {
            position: Vec3::new(x, y, -forward),
        }
    }
}

impl Generate for RoadMarking {
    fn generate(_rng: &mut Pcg32, forward: f32) -> Self {
        RoadMarking {
            position: Vec3::new(0.0, MARKING_HEIGHT, -forward),
        }
    }
}

impl TerrainFeature {
    fn shaped(rng: &mut Pcg32, form: TerrainForm, forward: f32) -> Self {
        let (half, height) = match form {
            TerrainForm::Hill => (HILL_HALF_SPREAD, HILL_HEIGHT),
            TerrainForm::Valley => (VALLEY_HALF_SPREAD, VALLEY_HEIGHT),
        };
        TerrainFeature {
            position: Vec3::new(spread(rng, half), height, -forward),
            form,
        }
    }
}

impl Generate for TerrainFeature {
    fn generate(rng: &mut Pcg32, forward: f32) -> Self {
        let form = if rng.random_bool(0.5) {
            TerrainForm::Hill
        } else {
            TerrainForm::Valley
        };
        Self::shaped(rng, form, forward)
    }

    /// Slots are sparse: 30% hill, 30% valley, the rest stay open ground.
    /// A batch always yields at least one feature.
    fn generate_batch(rng: &mut Pcg32, slots: &[f32], out: &mut Vec<Self>) {
        let start = out.len();
        for &forward in slots {
            let roll: f32 = rng.random();
            if roll < 0.3 {
                out.push(Self::shaped(rng, TerrainForm::Hill, forward));
            } else if roll < 0.6 {
                out.push(Self::shaped(rng, TerrainForm::Valley, forward));
            }
        }
        if out.len() == start {
            if let Some(&forward) = slots.last() {
                out.push(Self::shaped(rng, TerrainForm::Hill, forward));
            }
        }
    }
}

fn scenery_prop(rng: &mut Pcg32, side: Side, forward: f32) -> SceneryProp {
    let offset = SCENERY_INNER_OFFSET + rng.random::<f32>() * SCENERY_JITTER;
    let x = match side {
        Side::Left => -offset,
        Side::Right => offset,
    };
    SceneryProp {
        position: Vec3::new(x, 0.0, -forward),
        side,
        prop: PropKind::ALL[rng.random_range(0..PropKind::ALL.len())],
    }
}

/// Forward positions for one batch laid out past `anchor`
fn layout(rule: SpacingRule, count: usize, anchor: f32, rng: &mut Pcg32, out: &mut Vec<f32>) {
    match rule {
        SpacingRule::Scatter {
            min_offset,
            max_offset,
        } => out.extend((0..count).map(|_| anchor + rng.random_range(min_offset..=max_offset))),
        SpacingRule::Step { step } => out.extend((1..=count).map(|i| anchor + i as f32 * step)),
    }
}

/// Result of one refill pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Refill {
    batches: usize,
    /// The batch cap stopped the loop before the frontier covered the window
    short: bool,
}

/// Spawn batches until the frontier covers the generation distance
fn refill<T: Generate, S: SceneSink + ?Sized>(
    stream: &mut Stream<T>,
    window: &StreamingWindow,
    vehicle_forward: f32,
    rng: &mut Pcg32,
    scene: &mut S,
) -> Refill {
    let goal = vehicle_forward + window.generation_distance_ahead;
    let mut frontier = stream.frontier(vehicle_forward);
    let mut slots = Vec::with_capacity(window.batch_size);
    let mut fresh = Vec::with_capacity(window.batch_size);
    let mut batches = 0;

    while frontier < goal && batches < MAX_REFILL_BATCHES {
        let anchor = frontier.max(vehicle_forward);
        slots.clear();
        layout(window.spacing, window.batch_size, anchor, rng, &mut slots);
        T::generate_batch(rng, &slots, &mut fresh);
        for entity in fresh.drain(..) {
            frontier = frontier.max(entity.forward());
            stream.spawn(entity, scene);
        }
        batches += 1;
    }

    let short = frontier < goal;
    if short {
        log::warn!(
            "Refill hit the batch cap at forward {:.1}; frontier {:.1} short of {:.1}",
            vehicle_forward,
            frontier,
            goal
        );
    }
    Refill { batches, short }
}

/// Lay out the opening stretch of a stream
fn seed<T: Generate, S: SceneSink + ?Sized>(
    stream: &mut Stream<T>,
    seeding: &Seeding,
    vehicle_forward: f32,
    rng: &mut Pcg32,
    scene: &mut S,
) {
    for i in 0..seeding.count {
        let jitter = rng.random::<f32>() * seeding.jitter;
        let forward = vehicle_forward + seeding.start + i as f32 * seeding.spacing + jitter;
        stream.spawn(T::generate(rng, forward), scene);
    }
}

/// Every streamed entity in the world, one container per kind
#[derive(Debug, Clone, Default)]
pub struct World {
    pub obstacles: Stream<Obstacle>,
    pub ramps: Stream<Ramp>,
    pub powerups: Stream<Powerup>,
    pub scenery_left: Stream<SceneryProp>,
    pub scenery_right: Stream<SceneryProp>,
    pub markings: Stream<RoadMarking>,
    pub terrain: Stream<TerrainFeature>,
    /// Forward position of the most recent scenery row
    scenery_cursor: f32,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Obstacle => self.obstacles.len(),
            EntityKind::Ramp => self.ramps.len(),
            EntityKind::Powerup => self.powerups.len(),
            EntityKind::SceneryLeft => self.scenery_left.len(),
            EntityKind::SceneryRight => self.scenery_right.len(),
            EntityKind::RoadMarking => self.markings.len(),
            EntityKind::TerrainFeature => self.terrain.len(),
        }
    }

    /// Live entities across all kinds
    pub fn total(&self) -> usize {
        EntityKind::ALL.iter().map(|&k| self.count(k)).sum()
    }

    /// Retire everything
    pub fn clear<S: SceneSink + ?Sized>(&mut self, scene: &mut S) {
        self.obstacles.clear(scene);
        self.ramps.clear(scene);
        self.powerups.clear(scene);
        self.scenery_left.clear(scene);
        self.scenery_right.clear(scene);
        self.markings.clear(scene);
        self.terrain.clear(scene);
    }

    /// Clear and lay out the opening stretch of a new run. Seeds are denser
    /// than steady-state refills so the first frame has a full horizon.
    pub fn reset<S: SceneSink + ?Sized>(
        &mut self,
        tuning: &StreamingTuning,
        vehicle_forward: f32,
        rng: &mut Pcg32,
        scene: &mut S,
    ) {
        self.clear(scene);
        seed(&mut self.obstacles, &tuning.obstacles.seed, vehicle_forward, rng, scene);
        seed(&mut self.ramps, &tuning.ramps.seed, vehicle_forward, rng, scene);
        seed(&mut self.powerups, &tuning.powerups.seed, vehicle_forward, rng, scene);
        seed(&mut self.markings, &tuning.markings.seed, vehicle_forward, rng, scene);
        seed(&mut self.terrain, &tuning.terrain.seed, vehicle_forward, rng, scene);

        let sc = &tuning.scenery;
        self.scenery_cursor = vehicle_forward + sc.start - sc.spacing;
        for _ in 0..sc.initial_rows {
            self.scenery_cursor += sc.spacing;
            self.spawn_scenery_row(rng, scene);
        }

        log::debug!(
            "World reset at forward {:.1}: {} entities seeded",
            vehicle_forward,
            self.total()
        );
    }

    /// Move every window to the vehicle's new position
    pub fn advance<S: SceneSink + ?Sized>(
        &mut self,
        tuning: &StreamingTuning,
        vehicle_forward: f32,
        rng: &mut Pcg32,
        scene: &mut S,
    ) {
        let vf = vehicle_forward;

        self.obstacles.sweep(vf, Some(tuning.obstacles.retirement_margin_behind), scene);
        let obstacles = refill(&mut self.obstacles, &tuning.obstacles, vf, rng, scene).batches;

        self.ramps.sweep(vf, Some(tuning.ramps.retirement_margin_behind), scene);
        let ramps = refill(&mut self.ramps, &tuning.ramps, vf, rng, scene).batches;

        self.powerups.sweep(vf, Some(tuning.powerups.retirement_margin_behind), scene);
        let powerups = refill(&mut self.powerups, &tuning.powerups, vf, rng, scene).batches;

        self.markings.sweep(vf, Some(tuning.markings.retirement_margin_behind), scene);
        let markings = refill(&mut self.markings, &tuning.markings, vf, rng, scene).batches;

        self.terrain.sweep(vf, Some(tuning.terrain.retirement_margin_behind), scene);
        let terrain = refill(&mut self.terrain, &tuning.terrain, vf, rng, scene).batches;

        let rows = self.advance_scenery(&tuning.scenery, vf, rng, scene);

        if obstacles + ramps + powerups + markings + terrain + rows > 0 {
            log::debug!(
                "Refill at forward {:.1}: obstacles {} ramps {} powerups {} markings {} terrain {} (batches), scenery {} rows",
                vf,
                obstacles,
                ramps,
                powerups,
                markings,
                terrain,
                rows
            );
        }
    }

    /// Drop entities consumed this tick without moving any window
    pub fn sweep_consumed<S: SceneSink + ?Sized>(&mut self, scene: &mut S) {
        self.obstacles.sweep(0.0, None, scene);
        self.powerups.sweep(0.0, None, scene);
    }

    /// Catch the scenery cursor up with the lookahead line, one row per
    /// spacing step, then retire rows left behind.
    fn advance_scenery<S: SceneSink + ?Sized>(
        &mut self,
        window: &SceneryWindow,
        vehicle_forward: f32,
        rng: &mut Pcg32,
        scene: &mut S,
    ) -> usize {
        let line = vehicle_forward + window.lookahead;
        let mut rows = 0;
        while line - self.scenery_cursor > window.spacing {
            self.scenery_cursor += window.spacing;
            self.spawn_scenery_row(rng, scene);
            rows += 1;
        }

        let margin = Some(window.retirement_margin_behind);
        self.scenery_left.sweep(vehicle_forward, margin, scene);
        self.scenery_right.sweep(vehicle_forward, margin, scene);
        rows
    }

    fn spawn_scenery_row<S: SceneSink + ?Sized>(&mut self, rng: &mut Pcg32, scene: &mut S) {
        let forward = self.scenery_cursor;
        let left = scenery_prop(rng, Side::Left, forward);
        let right = scenery_prop(rng, Side::Right, forward);
        self.scenery_left.spawn(left, scene);
        self.scenery_right.spawn(right, scene);
    }

    #[cfg(test)]
    pub(crate) fn scenery_cursor(&self) -> f32 {
        self.scenery_cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::scene::SceneArena;
    use proptest::prelude::*;
    use rand::SeedableRng;

    fn fresh(seed: u64) -> (World, SceneArena, Pcg32, StreamingTuning) {
        let tuning = StreamingTuning::default();
        let mut scene = SceneArena::new();
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut world = World::new();
        world.reset(&tuning, 0.0, &mut rng, &mut scene);
        (world, scene, rng, tuning)
    }

    fn assert_window<T: Streamed>(stream: &Stream<T>, window: &StreamingWindow, vf: f32) {
        assert!(
            stream.frontier(vf) >= vf + window.generation_distance_ahead,
            "frontier {} short of {}",
            stream.frontier(vf),
            vf + window.generation_distance_ahead
        );
        for e in stream.iter() {
            assert!(e.forward() >= vf - window.retirement_margin_behind);
        }
    }

    #[test]
    fn reset_seeds_initial_counts() {
        let (world, scene, _, _) = fresh(1);
        assert_eq!(world.obstacles.len(), 20);
        assert_eq!(world.ramps.len(), 10);
        assert_eq!(world.powerups.len(), 8);
        assert_eq!(world.markings.len(), 50);
        assert_eq!(world.scenery_left.len(), 30);
        assert_eq!(world.scenery_right.len(), 30);
        assert_eq!(world.terrain.len(), 0);
        assert_eq!(scene.len(), world.total());
    }

    #[test]
    fn reset_releases_previous_run() {
        let (mut world, mut scene, mut rng, tuning) = fresh(2);
        for step in 1..=100 {
            world.advance(&tuning, step as f32 * 20.0, &mut rng, &mut scene);
        }
        world.reset(&tuning, 0.0, &mut rng, &mut scene);
        assert_eq!(world.obstacles.len(), 20);
        assert_eq!(scene.len(), world.total());
    }

    #[test]
    fn empty_stream_frontier_falls_back_to_sentinel() {
        let stream: Stream<Obstacle> = Stream::default();
        assert_eq!(stream.frontier(300.0), 300.0 - EMPTY_STREAM_SENTINEL);
    }

    #[test]
    fn empty_streams_refill_in_one_advance() {
        let tuning = StreamingTuning::default();
        let mut scene = SceneArena::new();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut world = World::new();
        world.advance(&tuning, 500.0, &mut rng, &mut scene);

        assert_window(&world.obstacles, &tuning.obstacles, 500.0);
        assert_window(&world.ramps, &tuning.ramps, 500.0);
        assert_window(&world.powerups, &tuning.powerups, 500.0);
        assert_window(&world.markings, &tuning.markings, 500.0);
        assert_window(&world.terrain, &tuning.terrain, 500.0);
        // Batches are whole
        assert_eq!(world.obstacles.len() % tuning.obstacles.batch_size, 0);
        assert_eq!(world.powerups.len() % tuning.powerups.batch_size, 0);
    }

    #[test]
    fn windows_hold_while_driving() {
        let (mut world, mut scene, mut rng, tuning) = fresh(4);
        let mut vf = 0.0;
        for _ in 0..2_000 {
            vf += 80.0 / 60.0;
            world.advance(&tuning, vf, &mut rng, &mut scene);
            assert_window(&world.obstacles, &tuning.obstacles, vf);
            assert_window(&world.ramps, &tuning.ramps, vf);
            assert_window(&world.powerups, &tuning.powerups, vf);
            assert_window(&world.markings, &tuning.markings, vf);
            assert_window(&world.terrain, &tuning.terrain, vf);
        }
        assert_eq!(scene.len(), world.total());
    }

    #[test]
    fn live_sets_stay_bounded() {
        let (mut world, mut scene, mut rng, tuning) = fresh(5);
        let mut peak = 0;
        for step in 0..20_000 {
            world.advance(&tuning, step as f32, &mut rng, &mut scene);
            peak = peak.max(world.total());
        }
        assert!(peak < 400, "live set grew to {peak}");
    }

    #[test]
    fn scenery_rows_keep_pace() {
        let (mut world, mut scene, mut rng, tuning) = fresh(6);
        let sc = tuning.scenery;
        let seeded_cursor = world.scenery_cursor();
        assert!((seeded_cursor - (sc.start + (sc.initial_rows - 1) as f32 * sc.spacing)).abs() < 1e-3);

        // Standing still spawns nothing new
        world.advance(&tuning, 0.0, &mut rng, &mut scene);
        assert_eq!(world.scenery_left.len(), sc.initial_rows);

        // Five spacings of travel adds five rows per side
        world.advance(&tuning, 5.0 * sc.spacing, &mut rng, &mut scene);
        assert_eq!(world.scenery_left.len(), sc.initial_rows + 5);
        assert_eq!(world.scenery_right.len(), world.scenery_left.len());

        let mut vf = 5.0 * sc.spacing;
        for _ in 0..3_000 {
            vf += 1.3;
            world.advance(&tuning, vf, &mut rng, &mut scene);
            assert!(vf + sc.lookahead - world.scenery_cursor() <= sc.spacing);
            for prop in world.scenery_left.iter().chain(world.scenery_right.iter()) {
                assert!(prop.forward() >= vf - sc.retirement_margin_behind);
            }
        }
    }

    #[test]
    fn consumed_entities_leave_on_sweep_without_shifting_neighbours() {
        let (mut world, mut scene, _, _) = fresh(7);
        let before: Vec<_> = world.obstacles.entries().iter().map(|l| l.handle).collect();
        world.obstacles.mark_consumed(3);
        world.obstacles.mark_consumed(4);
        assert_eq!(world.obstacles.len(), 20);
        assert!(world.obstacles.entries()[4].is_consumed());

        world.sweep_consumed(&mut scene);
        assert_eq!(world.obstacles.len(), 18);
        assert!(scene.get(before[3]).is_none());
        assert!(scene.get(before[4]).is_none());
        assert!(scene.get(before[5]).is_some());
        assert_eq!(world.obstacles.entries()[3].handle, before[5]);
    }

    #[test]
    fn clear_retires_every_handle() {
        let (mut world, mut scene, _, _) = fresh(8);
        assert!(!scene.is_empty());
        world.clear(&mut scene);
        assert_eq!(world.total(), 0);
        assert!(scene.is_empty());
    }

    fn stepped(step: f32) -> StreamingWindow {
        StreamingWindow {
            generation_distance_ahead: 200.0,
            retirement_margin_behind: 50.0,
            batch_size: 1,
            spacing: SpacingRule::Step { step },
            seed: Seeding {
                count: 0,
                start: 0.0,
                spacing: 0.0,
                jitter: 0.0,
            },
        }
    }

    #[test]
    fn refill_reaching_goal_on_last_allowed_batch_is_not_short() {
        let mut scene = SceneArena::new();
        let mut rng = Pcg32::seed_from_u64(10);
        let mut stream: Stream<RoadMarking> = Stream::default();
        // 64 batches of one marking, 3.125 apart, land exactly on 200
        let window = stepped(200.0 / MAX_REFILL_BATCHES as f32);
        let report = refill(&mut stream, &window, 0.0, &mut rng, &mut scene);
        assert_eq!(report.batches, MAX_REFILL_BATCHES);
        assert!(!report.short);
        assert_eq!(stream.frontier(0.0), 200.0);
    }

    #[test]
    fn refill_stopped_by_cap_is_short() {
        let mut scene = SceneArena::new();
        let mut rng = Pcg32::seed_from_u64(11);
        let mut stream: Stream<RoadMarking> = Stream::default();
        let report = refill(&mut stream, &stepped(1.0), 0.0, &mut rng, &mut scene);
        assert_eq!(report.batches, MAX_REFILL_BATCHES);
        assert!(report.short);
        assert_eq!(stream.len(), MAX_REFILL_BATCHES);
    }

    #[test]
    fn terrain_batch_never_comes_back_empty() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut out = Vec::new();
        for _ in 0..500 {
            out.clear();
            TerrainFeature::generate_batch(&mut rng, &[100.0, 150.0, 200.0], &mut out);
            assert!(!out.is_empty() && out.len() <= 3);
        }
    }

    proptest! {
        #[test]
        fn placement_stays_in_range(seed in any::<u64>(), vf in 0.0f32..50_000.0) {
            let tuning = StreamingTuning::default();
            let mut scene = SceneArena::new();
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut world = World::new();
            world.reset(&tuning, vf, &mut rng, &mut scene);
            world.advance(&tuning, vf + 1.0, &mut rng, &mut scene);

            for o in world.obstacles.iter() {
                prop_assert!(o.position.x.abs() <= OBSTACLE_HALF_SPREAD);
                prop_assert_eq!(o.position.y, OBSTACLE_HEIGHT);
            }
            for r in world.ramps.iter() {
                prop_assert!(r.position.x.abs() <= RAMP_HALF_SPREAD);
            }
            for p in world.powerups.iter() {
                prop_assert!(p.position.x.abs() <= POWERUP_HALF_SPREAD);
                prop_assert!(p.position.y >= POWERUP_MIN_HEIGHT && p.position.y <= POWERUP_MAX_HEIGHT);
            }
            for m in world.markings.iter() {
                prop_assert_eq!(m.position.x, 0.0);
            }
            for t in world.terrain.iter() {
                let half = match t.form {
                    TerrainForm::Hill => HILL_HALF_SPREAD,
                    TerrainForm::Valley => VALLEY_HALF_SPREAD,
                };
                prop_assert!(t.position.x.abs() <= half);
            }
            let outer = SCENERY_INNER_OFFSET + SCENERY_JITTER;
            for s in world.scenery_left.iter() {
                prop_assert!(s.position.x <= -SCENERY_INNER_OFFSET && s.position.x >= -outer);
                prop_assert_eq!(s.side, Side::Left);
            }
            for s in world.scenery_right.iter() {
                prop_assert!(s.position.x >= SCENERY_INNER_OFFSET && s.position.x <= outer);
                prop_assert_eq!(s.side, Side::Right);
            }
        }
    }
}
