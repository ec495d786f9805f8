//! Top-level module for the engines.

// Based on CC-BY-NC-4.0-licensed code (c) 2024 by J.S. Bouten (Zaphod B)

pub mod clock_multiplier_engine;
pub mod random_pattern_engine;

pub trait Engine {
    fn init(&mut self);

    fn tick(&mut self, inputs: &EngineInputs, outputs: &mut EngineOutputs);
}

/// Panel state sampled once per tick of the control loop.
///
/// The analog channels are shared between the engines and interpreted per
/// mode: `pot_a` sets the quantity (clock multiplier) or the pattern length
/// (random pattern), `pot_b` the distribution or the pattern density.
/// `cv_in` adds to the quantity and is ignored by the random pattern engine,
/// as is `mute`.
#[derive(Debug, Default, Clone)]
pub struct EngineInputs {
    /// Monotonic millisecond clock, wrapping at the u32 range.
    pub now: u32,

    /// Level of the digital trigger/clock input.
    pub trigger_in: bool,

    /// First analog channel, `0..1024`.
    pub pot_a: u16,

    /// Second analog channel, `0..1024`.
    pub pot_b: u16,

    /// CV input, `0..1024`.
    pub cv_in: u16,

    /// Externally requested mute state.
    pub mute: bool,
}

/// Output state of a tick.
///
/// The frontend keeps one instance alive across ticks, so a field an engine
/// leaves untouched holds its previous level. The trigger line is logical
/// here; the panel drives the physical pin inverted.
#[derive(Debug, Default, Clone)]
pub struct EngineOutputs {
    /// Brightness of the trigger input LED.
    pub trigger_in_led: u8,

    /// Brightness of the trigger output LED.
    pub trigger_out_led: u8,

    /// Logical trigger output level.
    pub trigger_out: bool,
}

/// Clock signal strategy, selected at construction.
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub enum ClockSource {
    /// Edge-detected external clock on the trigger input.
    #[default]
    External,

    /// Synthetic square wave at a fixed tempo, replacing the input signal.
    /// Meant for developing and self-test.
    Internal { bpm: u32 },
}

impl ClockSource {
    /// Clock level for this tick. `pulse_ms` is the high time of the
    /// synthetic wave per period.
    #[inline]
    pub fn level(&self, trigger_in: bool, now: u32, pulse_ms: u32) -> bool {
        match self {
            ClockSource::External => trigger_in,
            ClockSource::Internal { bpm } => {
                let period = (60_000 / (*bpm).max(1)).max(1);
                now % period < pulse_ms
            }
        }
    }
}
