//! Audio feedback
//!
//! Procedural sound only, no sample files. The simulation talks to an
//! [`AudioMapper`], which smooths the engine tone and picks one-shot
//! parameters; the platform supplies an [`AudioSink`] that actually makes
//! noise (or doesn't).

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::WebAudioSink;

use crate::lag_factor;
use crate::settings::Settings;
use crate::sim::GameEvent;

/// Engine pitch at rest (Hz)
pub const TONE_BASE_FREQUENCY: f32 = 80.0;
/// Extra pitch at full speed (Hz)
pub const TONE_FREQUENCY_RANGE: f32 = 420.0;
pub const TONE_BASE_GAIN: f32 = 0.05;
pub const TONE_GAIN_RANGE: f32 = 0.2;
/// Smoothing time constants (seconds)
pub const TONE_FREQUENCY_LAG: f32 = 0.08;
pub const TONE_GAIN_LAG: f32 = 0.1;

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// Instantaneous engine tone parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneParams {
    pub frequency: f32,
    pub gain: f32,
}

impl ToneParams {
    /// Where the tone starts: idle pitch, silent
    pub const IDLE: ToneParams = ToneParams {
        frequency: TONE_BASE_FREQUENCY,
        gain: 0.0,
    };
}

/// How the engine tone dies away when stopped
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fade {
    /// Exponential decay time constant (seconds)
    pub time_constant: f32,
    /// The generator is released after this long (seconds)
    pub release_after: f32,
}

impl Default for Fade {
    fn default() -> Self {
        Self {
            time_constant: 0.1,
            release_after: 0.2,
        }
    }
}

/// A short pitch sweep with a decaying envelope
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OneShot {
    pub freq_start: f32,
    pub freq_end: f32,
    /// Seconds
    pub duration: f32,
    pub gain: f32,
    pub waveform: Waveform,
}

impl OneShot {
    pub const JUMP: OneShot = OneShot {
        freq_start: 500.0,
        freq_end: 200.0,
        duration: 0.2,
        gain: 0.25,
        waveform: Waveform::Triangle,
    };
    pub const CRASH: OneShot = OneShot {
        freq_start: 200.0,
        freq_end: 60.0,
        duration: 0.35,
        gain: 0.35,
        waveform: Waveform::Square,
    };
    pub const POWERUP: OneShot = OneShot {
        freq_start: 900.0,
        freq_end: 600.0,
        duration: 0.15,
        gain: 0.3,
        waveform: Waveform::Sine,
    };
    pub const MENU: OneShot = OneShot {
        freq_start: 300.0,
        freq_end: 450.0,
        duration: 0.1,
        gain: 0.15,
        waveform: Waveform::Sine,
    };

    /// The sound for a game event. Game over reuses the crash.
    pub fn for_event(event: GameEvent) -> OneShot {
        match event {
            GameEvent::Jump => Self::JUMP,
            GameEvent::Crash | GameEvent::GameOver => Self::CRASH,
            GameEvent::Powerup => Self::POWERUP,
            GameEvent::MenuInteraction => Self::MENU,
        }
    }

    fn scaled(self, volume: f32) -> OneShot {
        OneShot {
            gain: self.gain * volume,
            ..self
        }
    }
}

/// Output device for procedural sound
///
/// Implementations must tolerate any call order; a sink that lost its device
/// simply ignores requests.
pub trait AudioSink {
    /// Unlock output after a user gesture (browsers start suspended)
    fn resume(&mut self);
    /// Create the continuous tone generator. Returns false when no device is
    /// available.
    fn start_tone(&mut self, waveform: Waveform, initial: ToneParams) -> bool;
    fn set_tone(&mut self, tone: ToneParams);
    /// Fade out and release the tone generator
    fn stop_tone(&mut self, fade: Fade);
    fn fire(&mut self, shot: &OneShot);
}

/// Sink for headless runs and tests
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn resume(&mut self) {}

    fn start_tone(&mut self, _waveform: Waveform, _initial: ToneParams) -> bool {
        true
    }

    fn set_tone(&mut self, _tone: ToneParams) {}

    fn stop_tone(&mut self, _fade: Fade) {}

    fn fire(&mut self, _shot: &OneShot) {}
}

/// Turns vehicle speed and game events into sink calls
pub struct AudioMapper<A: AudioSink> {
    sink: A,
    settings: Settings,
    /// Smoothed tone, `None` while no generator exists
    tone: Option<ToneParams>,
    /// The tone should be running; an unavailable device is retried
    wanted: bool,
    warned_unavailable: bool,
}

impl<A: AudioSink> AudioMapper<A> {
    pub fn new(sink: A, settings: Settings) -> Self {
        Self {
            sink,
            settings,
            tone: None,
            wanted: false,
            warned_unavailable: false,
        }
    }

    pub fn sink(&self) -> &A {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut A {
        &mut self.sink
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    /// Whether a tone generator currently exists
    pub fn is_tone_active(&self) -> bool {
        self.tone.is_some()
    }

    pub fn resume(&mut self) {
        self.sink.resume();
    }

    /// Start the engine tone. Calling again while it runs does nothing.
    pub fn start_tone(&mut self) {
        self.wanted = true;
        if self.tone.is_none() {
            self.try_start();
        }
    }

    fn try_start(&mut self) {
        if self.sink.start_tone(Waveform::Sawtooth, ToneParams::IDLE) {
            self.tone = Some(ToneParams::IDLE);
            self.warned_unavailable = false;
        } else if !self.warned_unavailable {
            log::warn!("Audio device unavailable; engine tone disabled until it returns");
            self.warned_unavailable = true;
        }
    }

    /// Ease the tone toward the pitch and loudness for `forward_speed`
    pub fn update(&mut self, forward_speed: f32, max_forward_speed: f32, dt: f32) {
        if !self.wanted {
            return;
        }
        if self.tone.is_none() {
            self.try_start();
        }
        let Some(tone) = self.tone.as_mut() else {
            return;
        };

        let s = if max_forward_speed > 0.0 {
            (forward_speed / max_forward_speed).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let target_frequency = TONE_BASE_FREQUENCY + TONE_FREQUENCY_RANGE * s;
        let target_gain =
            (TONE_BASE_GAIN + TONE_GAIN_RANGE * s) * self.settings.effective_engine_volume();

        tone.frequency += (target_frequency - tone.frequency) * lag_factor(TONE_FREQUENCY_LAG, dt);
        tone.gain += (target_gain - tone.gain) * lag_factor(TONE_GAIN_LAG, dt);
        let tone = *tone;
        self.sink.set_tone(tone);
    }

    /// Fade the tone out and forget it immediately
    pub fn stop_tone(&mut self) {
        self.wanted = false;
        if self.tone.take().is_some() {
            self.sink.stop_tone(Fade::default());
        }
    }

    /// Play the one-shot for `event`, scaled by the effects volume
    pub fn fire(&mut self, event: GameEvent) {
        let volume = self.settings.effective_sfx_volume();
        if volume <= 0.0 {
            return;
        }
        self.sink.fire(&OneShot::for_event(event).scaled(volume));
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum Call {
        Resume,
        Start(Waveform, ToneParams),
        Set(ToneParams),
        Stop(Fade),
        Fire(OneShot),
    }

    /// Records every call; `unavailable` simulates a missing device
    #[derive(Debug, Default)]
    pub(crate) struct RecordingAudio {
        pub calls: Vec<Call>,
        pub unavailable: bool,
    }

    impl RecordingAudio {
        pub fn starts(&self) -> usize {
            self.calls.iter().filter(|c| matches!(c, Call::Start(..))).count()
        }

        pub fn stops(&self) -> usize {
            self.calls.iter().filter(|c| matches!(c, Call::Stop(_))).count()
        }

        pub fn fired(&self) -> Vec<OneShot> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    Call::Fire(shot) => Some(*shot),
                    _ => None,
                })
                .collect()
        }

        pub fn last_tone(&self) -> Option<ToneParams> {
            self.calls.iter().rev().find_map(|c| match c {
                Call::Set(tone) => Some(*tone),
                _ => None,
            })
        }
    }

    impl AudioSink for RecordingAudio {
        fn resume(&mut self) {
            self.calls.push(Call::Resume);
        }

        fn start_tone(&mut self, waveform: Waveform, initial: ToneParams) -> bool {
            if self.unavailable {
                return false;
            }
            self.calls.push(Call::Start(waveform, initial));
            true
        }

        fn set_tone(&mut self, tone: ToneParams) {
            self.calls.push(Call::Set(tone));
        }

        fn stop_tone(&mut self, fade: Fade) {
            self.calls.push(Call::Stop(fade));
        }

        fn fire(&mut self, shot: &OneShot) {
            self.calls.push(Call::Fire(*shot));
        }
    }

    fn full_volume() -> Settings {
        Settings {
            master_volume: 1.0,
            ..Default::default()
        }
    }

    fn mapper() -> AudioMapper<RecordingAudio> {
        AudioMapper::new(RecordingAudio::default(), full_volume())
    }

    #[test]
    fn start_is_idempotent_and_begins_silent() {
        let mut audio = mapper();
        audio.start_tone();
        audio.start_tone();
        assert_eq!(audio.sink().starts(), 1);
        assert_eq!(
            audio.sink().calls[0],
            Call::Start(Waveform::Sawtooth, ToneParams { frequency: 80.0, gain: 0.0 })
        );
    }

    #[test]
    fn tone_settles_on_speed_targets() {
        let mut audio = mapper();
        audio.start_tone();
        for _ in 0..600 {
            audio.update(80.0, 80.0, 1.0 / 60.0);
        }
        let tone = audio.sink().last_tone().unwrap();
        assert!((tone.frequency - 500.0).abs() < 0.01);
        assert!((tone.gain - 0.25).abs() < 1e-4);

        for _ in 0..600 {
            audio.update(40.0, 80.0, 1.0 / 60.0);
        }
        let tone = audio.sink().last_tone().unwrap();
        assert!((tone.frequency - 290.0).abs() < 0.01);
        assert!((tone.gain - 0.15).abs() < 1e-4);
    }

    #[test]
    fn one_step_uses_exponential_lag() {
        let mut audio = mapper();
        audio.start_tone();
        audio.update(80.0, 80.0, 0.08);
        let tone = audio.sink().last_tone().unwrap();
        let expected = 80.0 + 420.0 * (1.0 - (-1.0f32).exp());
        assert!((tone.frequency - expected).abs() < 1e-3);
    }

    #[test]
    fn reversing_counts_as_idle() {
        let mut audio = mapper();
        audio.start_tone();
        for _ in 0..600 {
            audio.update(-15.0, 80.0, 1.0 / 60.0);
        }
        let tone = audio.sink().last_tone().unwrap();
        assert!((tone.frequency - 80.0).abs() < 0.01);
        assert!((tone.gain - 0.05).abs() < 1e-4);
    }

    #[test]
    fn stop_fades_once_and_forgets() {
        let mut audio = mapper();
        audio.start_tone();
        audio.stop_tone();
        audio.stop_tone();
        assert_eq!(audio.sink().stops(), 1);
        assert!(!audio.is_tone_active());
        assert_eq!(audio.sink().calls.last(), Some(&Call::Stop(Fade::default())));

        // Updates after stop are silent
        let before = audio.sink().calls.len();
        audio.update(50.0, 80.0, 0.016);
        assert_eq!(audio.sink().calls.len(), before);
    }

    #[test]
    fn unavailable_device_is_retried_on_update() {
        let mut audio = AudioMapper::new(
            RecordingAudio {
                unavailable: true,
                ..Default::default()
            },
            full_volume(),
        );
        audio.start_tone();
        audio.update(10.0, 80.0, 0.016);
        assert!(!audio.is_tone_active());
        assert!(audio.sink().calls.is_empty());

        audio.sink_mut().unavailable = false;
        audio.update(10.0, 80.0, 0.016);
        assert!(audio.is_tone_active());
        assert_eq!(audio.sink().starts(), 1);
        assert!(audio.sink().last_tone().is_some());
    }

    #[test]
    fn events_map_to_shots() {
        let mut audio = mapper();
        for event in [
            GameEvent::Jump,
            GameEvent::Crash,
            GameEvent::Powerup,
            GameEvent::MenuInteraction,
            GameEvent::GameOver,
        ] {
            audio.fire(event);
        }
        assert_eq!(
            audio.sink().fired(),
            vec![
                OneShot::JUMP,
                OneShot::CRASH,
                OneShot::POWERUP,
                OneShot::MENU,
                OneShot::CRASH
            ]
        );
    }

    #[test]
    fn effects_follow_volume_settings() {
        let mut audio = AudioMapper::new(RecordingAudio::default(), Settings::default());
        audio.fire(GameEvent::Jump);
        let shot = audio.sink().fired()[0];
        assert!((shot.gain - 0.25 * 0.8).abs() < 1e-6);
        assert_eq!(shot.freq_start, 500.0);

        audio.set_settings(Settings {
            muted: true,
            ..Default::default()
        });
        audio.fire(GameEvent::Crash);
        assert_eq!(audio.sink().fired().len(), 1);
    }
}
