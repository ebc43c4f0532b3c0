//! Per-frame simulation tick
//!
//! The host owns the frame loop and calls [`Game::tick`] once per frame with
//! the measured frame time. Within a Playing tick the order is fixed:
//! jump, physics, collision, streaming, audio, scene sync.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::{self, HitClock};
use super::lifecycle::{Command, Lifecycle, Transition};
use super::physics::{self, CameraRig};
use super::scene::{AmbientCycle, SceneSink};
use super::state::{ControlState, GameEvent, HudSnapshot, RunStats, VehicleState};
use super::streaming::World;
use crate::audio::{AudioMapper, AudioSink};
use crate::settings::Settings;
use crate::tuning::Tuning;

/// Input sampled by the host for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    /// Jump pressed this frame
    pub jump: bool,
    /// Pause key pressed this frame
    pub pause_toggle: bool,
}

/// One game session: lifecycle, the current run, and its output sinks
pub struct Game<S: SceneSink, A: AudioSink> {
    tuning: Tuning,
    lifecycle: Lifecycle,
    stats: RunStats,
    vehicle: VehicleState,
    controls: ControlState,
    camera: CameraRig,
    world: World,
    hit_clock: HitClock,
    /// Keeps turning across runs; advances only while Playing
    ambient: AmbientCycle,
    /// Simulation time of the current run (ms); frozen while not Playing
    clock_ms: f64,
    rng: Pcg32,
    scene: S,
    audio: AudioMapper<A>,
    events: Vec<GameEvent>,
    hud: HudSnapshot,
    instructions_open: bool,
}

impl<S: SceneSink, A: AudioSink> Game<S, A> {
    /// New session sitting in the menu. `seed` drives every random placement.
    pub fn new(tuning: Tuning, settings: Settings, mut scene: S, audio: A, seed: u64) -> Self {
        let stats = RunStats::default();
        let hud = stats.hud();
        let ambient = AmbientCycle::default();
        scene.update_ambient(ambient.intensity());
        Self {
            tuning,
            lifecycle: Lifecycle::Menu,
            stats,
            vehicle: VehicleState::default(),
            controls: ControlState::default(),
            camera: CameraRig::default(),
            world: World::new(),
            hit_clock: HitClock::default(),
            ambient,
            clock_ms: 0.0,
            rng: Pcg32::seed_from_u64(seed),
            scene,
            audio: AudioMapper::new(audio, settings),
            events: Vec::new(),
            hud,
            instructions_open: false,
        }
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn hud(&self) -> HudSnapshot {
        self.hud
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    pub fn vehicle(&self) -> &VehicleState {
        &self.vehicle
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn audio(&self) -> &AudioMapper<A> {
        &self.audio
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn instructions_open(&self) -> bool {
        self.instructions_open
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.audio.set_settings(settings);
    }

    /// Unlock audio output; call from a user gesture handler
    pub fn resume_audio(&mut self) {
        self.audio.resume();
    }

    /// Events raised since the last drain, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Apply a lifecycle command. Returns whether it did anything.
    pub fn command(&mut self, command: Command) -> bool {
        let Some(transition) = self.lifecycle.on_command(command) else {
            log::trace!("Ignoring {:?} in {:?}", command, self.lifecycle);
            return false;
        };

        match transition {
            Transition::BeginRun => self.begin_run(),
            Transition::Suspend => {
                self.audio.stop_tone();
                log::info!("Paused at distance {:.0}", self.stats.distance);
            }
            Transition::Unsuspend => {
                self.audio.start_tone();
                log::info!("Resumed");
            }
            Transition::EndRun => self.end_run(),
            Transition::Instructions(open) => {
                self.instructions_open = open;
                self.emit(GameEvent::MenuInteraction);
            }
        }
        self.lifecycle = self.lifecycle.after(transition);
        true
    }

    /// Fresh run: everything from the previous one is released first
    fn begin_run(&mut self) {
        self.audio.stop_tone();
        self.stats = RunStats::default();
        self.vehicle = VehicleState::default();
        self.controls = ControlState::default();
        self.camera = CameraRig::default();
        self.hit_clock = HitClock::default();
        self.clock_ms = 0.0;
        self.instructions_open = false;
        self.world.reset(
            &self.tuning.streaming,
            self.vehicle.forward_position(),
            &mut self.rng,
            &mut self.scene,
        );
        self.hud = self.stats.hud();
        self.scene.update_vehicle(&self.vehicle);
        self.scene.update_camera(&self.camera);
        self.audio.start_tone();
        self.emit(GameEvent::MenuInteraction);
        log::info!("Run started with {} entities", self.world.total());
    }

    fn end_run(&mut self) {
        self.audio.stop_tone();
        self.world.clear(&mut self.scene);
        self.emit(GameEvent::MenuInteraction);
        log::info!(
            "Back to menu; last run scored {} over {:.0}",
            self.stats.score,
            self.stats.distance
        );
    }

    fn emit(&mut self, event: GameEvent) {
        self.audio.fire(event);
        self.events.push(event);
    }

    /// Advance by `dt` seconds of wall time
    pub fn tick(&mut self, input: &TickInput, dt: f32) {
        if input.pause_toggle {
            self.command(Command::TogglePause);
        }
        if !self.lifecycle.is_simulating() {
            return;
        }

        let dt = if dt.is_finite() {
            dt.clamp(0.0, self.tuning.max_tick_seconds)
        } else {
            0.0
        };
        self.clock_ms += f64::from(dt) * 1000.0;

        self.controls.forward = input.forward;
        self.controls.backward = input.backward;
        self.controls.left = input.left;
        self.controls.right = input.right;

        if input.jump
            && physics::try_jump(
                &mut self.vehicle,
                &mut self.controls,
                &self.tuning.vehicle,
                self.clock_ms,
            )
        {
            self.stats.stunts += 1;
            self.emit(GameEvent::Jump);
        }

        physics::integrate(&mut self.vehicle, &self.controls, &self.tuning.vehicle, dt);
        self.stats.track(&self.vehicle);

        let first_new = self.events.len();
        let outcome = collision::resolve(
            &mut self.vehicle,
            &mut self.world,
            &mut self.stats,
            &mut self.hit_clock,
            self.clock_ms,
            &self.tuning.collision,
            &mut self.events,
        );
        for &event in &self.events[first_new..] {
            self.audio.fire(event);
        }

        if outcome.fatal {
            self.world.sweep_consumed(&mut self.scene);
            self.game_over();
            return;
        }

        let forward = self.vehicle.forward_position();
        self.world
            .advance(&self.tuning.streaming, forward, &mut self.rng, &mut self.scene);

        self.audio.update(
            self.vehicle.forward_speed(),
            self.tuning.vehicle.max_forward_speed,
            dt,
        );

        self.camera.follow(&self.vehicle, dt);
        self.scene.update_vehicle(&self.vehicle);
        self.scene.update_camera(&self.camera);
        self.ambient.advance(dt);
        self.scene.update_ambient(self.ambient.intensity());
        self.hud = self.stats.hud();
    }

    fn game_over(&mut self) {
        self.lifecycle = Lifecycle::GameOver;
        self.audio.stop_tone();
        self.hud = self.stats.hud();
        self.scene.update_vehicle(&self.vehicle);
        self.emit(GameEvent::GameOver);
        log::info!(
            "Game over: score {} distance {:.0} stunts {}",
            self.stats.score,
            self.stats.distance,
            self.stats.stunts
        );
    }
}
