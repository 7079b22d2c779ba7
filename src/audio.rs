//! Audio system using Web Audio API
//!
//! Procedurally generated - no external files needed! A sawtooth bass
//! arpeggio loops in the background and short beeps mark game over and
//! restart.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player hit an obstacle
    Crash,
    /// Play Again pressed
    Click,
}

/// One bar of the background loop (Hz), A minor
const LOOP_PATTERN: [f32; 16] = [
    110.0, 220.0, 164.81, 220.0, 110.0, 220.0, 196.0, 220.0, 87.31, 174.61, 130.81, 174.61,
    98.0, 196.0, 146.83, 196.0,
];
/// Seconds per loop step
const LOOP_STEP: f64 = 0.15;
/// How far ahead of the audio clock notes are scheduled
const SCHEDULE_AHEAD: f64 = 0.3;

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    music_gain: f32,
    sfx_gain: f32,
    loop_playing: bool,
    loop_step: usize,
    next_note_time: f64,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            music_gain: settings.music_gain(),
            sfx_gain: settings.sfx_gain(),
            loop_playing: false,
            loop_step: 0,
            next_note_time: 0.0,
        }
    }

    /// Resume audio context (required after user gesture)
    fn resume(ctx: &AudioContext) {
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }
    }

    pub fn is_loop_playing(&self) -> bool {
        self.loop_playing
    }

    /// Start the background loop. Call from a user gesture handler.
    pub fn play_loop(&mut self) {
        if self.loop_playing {
            return;
        }
        let Some(ctx) = &self.ctx else { return };
        Self::resume(ctx);
        self.loop_playing = true;
        self.loop_step = 0;
        self.next_note_time = ctx.current_time() + 0.05;
        log::info!("Background music started");
    }

    /// Keep the loop fed; call once per frame
    pub fn update(&mut self) {
        if !self.loop_playing || self.music_gain <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };

        let horizon = ctx.current_time() + SCHEDULE_AHEAD;
        // After a long stall, skip ahead instead of bursting every missed note
        if self.next_note_time < ctx.current_time() {
            self.next_note_time = ctx.current_time() + 0.05;
        }
        while self.next_note_time < horizon {
            let freq = LOOP_PATTERN[self.loop_step];
            self.play_loop_note(ctx, freq, self.next_note_time);
            self.loop_step = (self.loop_step + 1) % LOOP_PATTERN.len();
            self.next_note_time += LOOP_STEP;
        }
    }

    /// Trigger one-shots for simulation events
    pub fn handle_events(&self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::GameOver { .. } => self.play(SoundEffect::Crash),
                GameEvent::Restarted => self.play(SoundEffect::Click),
                _ => {}
            }
        }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.sfx_gain;
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };
        Self::resume(ctx);

        match effect {
            SoundEffect::Crash => self.play_crash(ctx, vol),
            SoundEffect::Click => self.play_click(ctx, vol),
        }
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
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

    /// Plucked sawtooth bass note
    fn play_loop_note(&self, ctx: &AudioContext, freq: f32, t: f64) {
        let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Sawtooth) else {
            return;
        };
        gain.gain().set_value_at_time(self.music_gain * 0.12, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.001, t + LOOP_STEP * 0.9)
            .ok();
        osc.start_with_when(t).ok();
        osc.stop_with_when(t + LOOP_STEP).ok();
    }

    /// Crash - harsh falling beep
    fn play_crash(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        if let Some((osc, gain)) = self.create_osc(ctx, 880.0, OscillatorType::Square) {
            gain.gain().set_value_at_time(vol * 0.4, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.35)
                .ok();
            osc.frequency().set_value_at_time(880.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(110.0, t + 0.35)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.4).ok();
        }

        // Low thump underneath
        if let Some((osc, gain)) = self.create_osc(ctx, 60.0, OscillatorType::Sine) {
            gain.gain().set_value_at_time(vol * 0.5, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.2)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.25).ok();
        }
    }

    /// Click - short bright beep
    fn play_click(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 1200.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.3, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.08)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.1).ok();
    }
}
