//! Random trigger pattern engine.
//!
//! Generates a random binary pattern and replays it step by step, advancing
//! one position per detected input clock edge.
//!
//! Panel usage:
//! - *POT A:* pattern length, 4 to 128 steps in six bands.
//! - *POT B:* pattern density, 0 to 100 %.

// Based on CC-BY-NC-4.0-licensed code (c) 2024 by J.S. Bouten (Zaphod B)

use core::fmt;

use log::{debug, trace};

use super::{ClockSource, Engine, EngineInputs, EngineOutputs};
use crate::utils::random::Random;
use crate::TRIGGER_LENGTH_MS;

/// Maximum amount of steps in a pattern.
pub const MAX_PATTERN_LENGTH: usize = 128;

/// Pattern length for each band of the length poti.
const LENGTH_BANDS: [usize; 6] = [4, 8, 16, 32, 64, 128];

#[derive(Debug, Clone)]
pub struct RandomPatternConfig {
    /// Clock signal strategy. Default is `ClockSource::External`;
    /// `Internal { bpm: 480 }` matches the original self-test clock.
    pub clock_source: ClockSource,

    /// Length of an output trigger in milliseconds. Default is `25`.
    pub trigger_length_ms: u32,

    /// Time in milliseconds both LEDs are lit to indicate a recent pattern
    /// calculation. Default is `200`.
    pub calc_indication_ms: u32,

    /// Input LED brightness on a high input level. Default is `255`.
    pub trigger_in_led_brightness: u8,

    /// Output LED brightness while a trigger is out. Default is `50`.
    pub trigger_out_led_brightness: u8,
}

impl Default for RandomPatternConfig {
    fn default() -> Self {
        Self {
            clock_source: ClockSource::External,
            trigger_length_ms: TRIGGER_LENGTH_MS,
            calc_indication_ms: 200,
            trigger_in_led_brightness: 255,
            trigger_out_led_brightness: 50,
        }
    }
}

/// Fixed-capacity bit sequence holding the trigger pattern.
#[derive(Debug, Clone)]
pub struct Pattern {
    steps: [bool; MAX_PATTERN_LENGTH],
    length: usize,
}

impl Default for Pattern {
    fn default() -> Self {
        Self {
            steps: [false; MAX_PATTERN_LENGTH],
            length: 0,
        }
    }
}

impl Pattern {
    /// Discard the previous pattern and draw a fresh one: every step is set
    /// with a probability of `density` percent.
    pub fn regenerate(&mut self, length: usize, density: i32, rng: &mut Random) {
        self.length = length.min(MAX_PATTERN_LENGTH);

        for step in self.steps[..self.length].iter_mut() {
            *step = (rng.uniform(100) as i32) < density;
        }
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Whether there is a trigger at the zero-based step index.
    pub fn is_set(&self, index: usize) -> bool {
        index < self.length && self.steps[index]
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.steps[..self.length] {
            f.write_str(if *step { "1" } else { "0" })?;
        }

        Ok(())
    }
}

#[derive(Debug)]
pub struct RandomPatternEngine {
    config: RandomPatternConfig,
    rng: Random,

    length: usize,
    density: i32,
    pattern: Pattern,

    // Playback position, 1 to the pattern length.
    position: usize,
    last_calculation_at: u32,

    trigger_in_latched: bool,
    trigger_out_high: u32,
}

impl Default for RandomPatternEngine {
    fn default() -> Self {
        Self {
            config: RandomPatternConfig::default(),
            rng: Random::new(),
            length: 0,
            density: 0,
            pattern: Pattern::default(),
            position: 1,
            last_calculation_at: 0,
            trigger_in_latched: false,
            trigger_out_high: 0,
        }
    }
}

impl RandomPatternEngine {
    pub fn new(config: RandomPatternConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Seed the random generator, once at startup.
    pub fn seed(&mut self, seed: u32) {
        self.rng.seed(seed);
    }

    /// Amount of steps in the pattern.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Fill density of the pattern in percent.
    pub fn density(&self) -> i32 {
        self.density
    }

    /// Playback position, 1 to the pattern length.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }
}

impl Engine for RandomPatternEngine {
    fn init(&mut self) {
        self.length = 0;
        self.density = 0;
        self.pattern = Pattern::default();
        self.position = 1;
        self.last_calculation_at = 0;
        self.trigger_in_latched = false;
        self.trigger_out_high = 0;
    }

    #[inline]
    fn tick(&mut self, inputs: &EngineInputs, outputs: &mut EngineOutputs) {
        let now = inputs.now;

        // Pattern configuration from the potis.
        let band = (inputs.pot_a as usize * LENGTH_BANDS.len() / 1024).min(LENGTH_BANDS.len() - 1);
        let length = LENGTH_BANDS[band];
        let density = (inputs.pot_b as u32 * 100 / 1023) as i32;

        let mut changed = false;

        if length != self.length {
            self.length = length;
            changed = true;
            debug!("pattern length: {}", self.length);
        }

        if density != self.density {
            self.density = density;
            changed = true;
            debug!("pattern density: {}%", self.density);
        }

        // A fresh pattern on any config change, restarting playback.
        if changed {
            self.pattern.regenerate(self.length, self.density, &mut self.rng);
            self.position = 1;
            self.last_calculation_at = now;
            debug!("pattern: {}", self.pattern);
        }

        // Light both LEDs while indicating the recent calculation.
        let indicating =
            now.wrapping_sub(self.last_calculation_at) <= self.config.calc_indication_ms;

        if indicating {
            outputs.trigger_in_led = self.config.trigger_in_led_brightness;
            outputs.trigger_out_led = self.config.trigger_out_led_brightness;
        }

        // Edge-latched pattern playback.
        if self
            .config
            .clock_source
            .level(inputs.trigger_in, now, self.config.trigger_length_ms)
        {
            outputs.trigger_in_led = self.config.trigger_in_led_brightness;

            // Act only on the beginning of this trigger high.
            if !self.trigger_in_latched {
                self.trigger_in_latched = true;
                trace!("trigger in, position: {}", self.position);

                if self.pattern.is_set(self.position - 1) {
                    self.trigger_out_high = now;
                    trace!("trigger out, position: {}", self.position);
                }

                if self.position < self.length {
                    self.position += 1;
                } else {
                    self.position = 1;
                }
            }
        } else {
            if !indicating {
                outputs.trigger_in_led = 0;
            }
            self.trigger_in_latched = false;
        }

        // Send the trigger out and light the LED as long as it's time.
        if now.wrapping_sub(self.trigger_out_high) <= self.config.trigger_length_ms {
            outputs.trigger_out_led = self.config.trigger_out_led_brightness;
            outputs.trigger_out = true;
        } else if !indicating {
            outputs.trigger_out_led = 0;
            outputs.trigger_out = false;
        }
    }
}
