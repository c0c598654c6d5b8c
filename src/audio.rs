//! Audio using Web Audio API
//!
//! Procedurally generated sounds - no external files needed:
//! - a low sine drone for ambience
//! - a rising/falling sawtooth screech for scares
//!
//! When no AudioContext can be created both fall back to `SilentSound`.

use std::rc::Rc;

use web_sys::{AudioContext, AudioContextState, GainNode, OscillatorNode, OscillatorType};

use crate::platform::{SilentSound, SoundEffect};

/// Build the ambient and scare sounds, silent if audio is unavailable
pub fn web_sounds() -> (Box<dyn SoundEffect>, Box<dyn SoundEffect>) {
    match AudioContext::new() {
        Ok(ctx) => {
            let ctx = Rc::new(ctx);
            (
                Box::new(AmbientDrone::new(ctx.clone())),
                Box::new(ScareSting::new(ctx)),
            )
        }
        Err(_) => {
            log::warn!("Failed to create AudioContext - audio disabled");
            (Box::new(SilentSound), Box::new(SilentSound))
        }
    }
}

/// Create an oscillator with gain envelope
fn create_osc(
    ctx: &AudioContext,
    freq: f32,
    osc_type: OscillatorType,
) -> Option<(OscillatorNode, GainNode)> {
    let osc = ctx.create_oscillator().ok()?;
    let gain = ctx.create_gain().ok()?;

    osc.set_type(osc_type);
    osc.frequency().set_value(freq);
    osc.connect_with_audio_node(&gain).ok()?;
    gain.connect_with_audio_node(&ctx.destination()).ok()?;

    Some((osc, gain))
}

/// Browsers keep the context suspended until a user gesture
fn ensure_running(ctx: &AudioContext) -> bool {
    match ctx.state() {
        AudioContextState::Closed => false,
        AudioContextState::Suspended => {
            let _ = ctx.resume();
            true
        }
        _ => true,
    }
}

/// Continuous 50 Hz hum
pub struct AmbientDrone {
    ctx: Rc<AudioContext>,
    volume: f32,
    voice: Option<(OscillatorNode, GainNode)>,
}

impl AmbientDrone {
    pub fn new(ctx: Rc<AudioContext>) -> Self {
        Self {
            ctx,
            volume: 0.05,
            voice: None,
        }
    }
}

impl SoundEffect for AmbientDrone {
    fn play(&mut self) {
        if self.voice.is_some() || !ensure_running(&self.ctx) {
            return;
        }
        let Some((osc, gain)) = create_osc(&self.ctx, 50.0, OscillatorType::Sine) else {
            return;
        };
        gain.gain()
            .set_value_at_time(self.volume, self.ctx.current_time())
            .ok();
        osc.start().ok();
        self.voice = Some((osc, gain));
    }

    fn stop(&mut self) {
        if let Some((osc, gain)) = self.voice.take() {
            osc.stop().ok();
            osc.disconnect().ok();
            gain.disconnect().ok();
        }
    }

    fn set_volume(&mut self, level: f32) {
        self.volume = level;
        if let Some((_, gain)) = &self.voice {
            gain.gain()
                .set_value_at_time(level, self.ctx.current_time())
                .ok();
        }
    }
}

/// Short screech played on every scare
pub struct ScareSting {
    ctx: Rc<AudioContext>,
    volume: f32,
}

impl ScareSting {
    pub fn new(ctx: Rc<AudioContext>) -> Self {
        Self { ctx, volume: 0.4 }
    }
}

impl SoundEffect for ScareSting {
    fn play(&mut self) {
        if self.volume <= 0.0 || !ensure_running(&self.ctx) {
            return;
        }
        let Some((osc, gain)) = create_osc(&self.ctx, 200.0, OscillatorType::Sawtooth) else {
            return;
        };
        let t = self.ctx.current_time();

        // Pitch shrieks up, then drops
        osc.frequency().set_value_at_time(200.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(800.0, t + 0.08)
            .ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(100.0, t + 0.4)
            .ok();

        gain.gain().set_value_at_time(0.0, t).ok();
        gain.gain()
            .linear_ramp_to_value_at_time(self.volume, t + 0.01)
            .ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.4)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.4).ok();
    }

    // One-shot; nothing to stop
    fn stop(&mut self) {}

    fn set_volume(&mut self, level: f32) {
        self.volume = level;
    }
}
