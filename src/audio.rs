//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!
//! Each effect is a short list of oscillator notes; playback is wasm only.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Snake ate the reward
    Eat,
    /// Snake hit a wall or itself
    Crash,
    /// Word typed in time
    WordCaught,
    /// Word hit the bottom
    WordMissed,
    /// Difficulty went up
    LevelUp,
    /// Run over
    GameOver,
    /// New high score
    HighScore,
}

/// Oscillator waveform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wave {
    Sine,
    Triangle,
    Square,
    Sawtooth,
}

/// One enveloped oscillator note
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    pub wave: Wave,
    /// Start frequency (Hz)
    pub freq: f32,
    /// Frequency at the end of the note (exponential sweep)
    pub end_freq: f32,
    /// Offset from the trigger time (s)
    pub delay: f64,
    /// Length including release (s)
    pub duration: f64,
    /// Peak gain before master volume
    pub gain: f32,
}

const fn note(wave: Wave, freq: f32, end_freq: f32, delay: f64, duration: f64, gain: f32) -> Note {
    Note {
        wave,
        freq,
        end_freq,
        delay,
        duration,
        gain,
    }
}

impl SoundEffect {
    /// Effect for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::RewardEaten { .. } => Some(SoundEffect::Eat),
            GameEvent::Crashed { .. } => Some(SoundEffect::Crash),
            GameEvent::WordCaught { .. } => Some(SoundEffect::WordCaught),
            GameEvent::WordsMissed { .. } => Some(SoundEffect::WordMissed),
            GameEvent::LevelUp { .. } => Some(SoundEffect::LevelUp),
            GameEvent::NewHighScore { .. } => Some(SoundEffect::HighScore),
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
        }
    }

    /// Notes making up the effect
    pub fn notes(self) -> &'static [Note] {
        match self {
            SoundEffect::Eat => EAT,
            SoundEffect::Crash => CRASH,
            SoundEffect::WordCaught => WORD_CAUGHT,
            SoundEffect::WordMissed => WORD_MISSED,
            SoundEffect::LevelUp => LEVEL_UP,
            SoundEffect::GameOver => GAME_OVER,
            SoundEffect::HighScore => HIGH_SCORE,
        }
    }
}

// Quick upward blip
const EAT: &[Note] = &[note(Wave::Square, 440.0, 880.0, 0.0, 0.08, 0.2)];

// Thump plus a falling buzz
const CRASH: &[Note] = &[
    note(Wave::Sine, 150.0, 50.0, 0.0, 0.2, 0.6),
    note(Wave::Sawtooth, 300.0, 80.0, 0.0, 0.25, 0.2),
];

const WORD_CAUGHT: &[Note] = &[
    note(Wave::Triangle, 660.0, 660.0, 0.0, 0.08, 0.3),
    note(Wave::Triangle, 990.0, 990.0, 0.06, 0.1, 0.25),
];

const WORD_MISSED: &[Note] = &[note(Wave::Sawtooth, 200.0, 90.0, 0.0, 0.3, 0.25)];

const LEVEL_UP: &[Note] = &[
    note(Wave::Triangle, 400.0, 400.0, 0.0, 0.4, 0.3),
    note(Wave::Triangle, 500.0, 500.0, 0.1, 0.4, 0.3),
    note(Wave::Triangle, 600.0, 600.0, 0.2, 0.4, 0.3),
    note(Wave::Triangle, 800.0, 800.0, 0.3, 0.5, 0.3),
];

// Sad descending
const GAME_OVER: &[Note] = &[
    note(Wave::Sine, 400.0, 400.0, 0.0, 0.4, 0.3),
    note(Wave::Sine, 350.0, 350.0, 0.2, 0.4, 0.3),
    note(Wave::Sine, 300.0, 300.0, 0.4, 0.4, 0.3),
    note(Wave::Sine, 200.0, 200.0, 0.6, 0.4, 0.3),
];

const HIGH_SCORE: &[Note] = &[
    note(Wave::Triangle, 500.0, 500.0, 0.0, 0.3, 0.25),
    note(Wave::Triangle, 600.0, 600.0, 0.08, 0.3, 0.25),
    note(Wave::Triangle, 700.0, 700.0, 0.16, 0.3, 0.25),
    note(Wave::Triangle, 800.0, 800.0, 0.24, 0.3, 0.25),
    note(Wave::Triangle, 1000.0, 1000.0, 0.32, 0.3, 0.25),
];

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{Note, SoundEffect, Wave};

    /// Audio manager for the arcade
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
    }

    impl AudioManager {
        pub fn new(volume: f32) -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: volume.clamp(0.0, 1.0),
            }
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            if self.volume <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            for note in effect.notes() {
                self.play_note(ctx, note);
            }
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            wave: Wave,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(match wave {
                Wave::Sine => OscillatorType::Sine,
                Wave::Triangle => OscillatorType::Triangle,
                Wave::Square => OscillatorType::Square,
                Wave::Sawtooth => OscillatorType::Sawtooth,
            });
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        fn play_note(&self, ctx: &AudioContext, note: &Note) {
            let Some((osc, gain)) = self.create_osc(ctx, note.freq, note.wave) else {
                return;
            };
            let t = ctx.current_time() + note.delay;
            let release = note.duration * 0.8;

            gain.gain().set_value_at_time(self.volume * note.gain, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + release)
                .ok();
            if note.end_freq != note.freq {
                osc.frequency().set_value_at_time(note.freq, t).ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(note.end_freq, t + release)
                    .ok();
            }

            osc.start_with_when(t).ok();
            osc.stop_with_when(t + note.duration).ok();
        }
    }
}
