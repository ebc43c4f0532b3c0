//! Web Audio backend

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use super::{AudioSink, Fade, OneShot, ToneParams, Waveform};

/// Envelope floor; exponential ramps cannot reach zero
const SILENCE: f32 = 0.0001;
/// Oscillators outlive their envelope by this much (seconds)
const TAIL: f64 = 0.02;

fn oscillator_type(waveform: Waveform) -> OscillatorType {
    match waveform {
        Waveform::Sine => OscillatorType::Sine,
        Waveform::Square => OscillatorType::Square,
        Waveform::Sawtooth => OscillatorType::Sawtooth,
        Waveform::Triangle => OscillatorType::Triangle,
    }
}

/// Sound through the browser's `AudioContext`
pub struct WebAudioSink {
    ctx: Option<AudioContext>,
    tone: Option<(OscillatorNode, GainNode)>,
}

impl Default for WebAudioSink {
    fn default() -> Self {
        Self::new()
    }
}

impl WebAudioSink {
    pub fn new() -> Self {
        // Fails outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self { ctx, tone: None }
    }

    /// Oscillator wired through its own gain node to the output
    fn create_osc(
        ctx: &AudioContext,
        freq: f32,
        waveform: Waveform,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(oscillator_type(waveform));
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    fn wake(ctx: &AudioContext) {
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }
    }
}

impl AudioSink for WebAudioSink {
    fn resume(&mut self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    fn start_tone(&mut self, waveform: Waveform, initial: ToneParams) -> bool {
        if self.tone.is_some() {
            return true;
        }
        let Some(ctx) = &self.ctx else {
            return false;
        };
        Self::wake(ctx);

        let Some((osc, gain)) = Self::create_osc(ctx, initial.frequency, waveform) else {
            return false;
        };
        gain.gain().set_value(initial.gain);
        if osc.start().is_err() {
            return false;
        }
        self.tone = Some((osc, gain));
        true
    }

    fn set_tone(&mut self, tone: ToneParams) {
        if let Some((osc, gain)) = &self.tone {
            osc.frequency().set_value(tone.frequency);
            gain.gain().set_value(tone.gain);
        }
    }

    fn stop_tone(&mut self, fade: Fade) {
        let Some((osc, gain)) = self.tone.take() else {
            return;
        };
        let Some(ctx) = &self.ctx else {
            return;
        };
        let t = ctx.current_time();
        gain.gain()
            .set_target_at_time(SILENCE, t, fade.time_constant as f64)
            .ok();
        osc.stop_with_when(t + fade.release_after as f64).ok();
    }

    fn fire(&mut self, shot: &OneShot) {
        let Some(ctx) = &self.ctx else { return };
        Self::wake(ctx);

        let Some((osc, gain)) = Self::create_osc(ctx, shot.freq_start, shot.waveform) else {
            return;
        };
        let t = ctx.current_time();
        let end = t + shot.duration as f64;

        osc.frequency().set_value_at_time(shot.freq_start, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(shot.freq_end.max(1.0), end)
            .ok();
        gain.gain().set_value_at_time(shot.gain.max(SILENCE), t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(SILENCE, end)
            .ok();

        osc.start().ok();
        osc.stop_with_when(end + TAIL).ok();
    }
}
