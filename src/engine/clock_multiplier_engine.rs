//! Clock multiplier engine.
//!
//! Measures the period of the incoming clock and re-emits a configurable
//! number of sub-triggers per cycle, spaced by a selectable easing curve.
//!
//! Panel usage:
//! - *POT A* + *CV IN:* quantity, 1 to 8 triggers per cycle.
//! - *POT B:* distribution, selecting one of 11 easing curves.
//! - Single click on the mode button requests mute.

// Based on CC-BY-NC-4.0-licensed code (c) 2024 by J.S. Bouten (Zaphod B)

use log::debug;

use super::{ClockSource, Engine, EngineInputs, EngineOutputs};
use crate::utils::easing::Easing;
use crate::utils::map_range;
use crate::TRIGGER_LENGTH_MS;

/// Maximum amount of triggers out per cycle.
pub const MAX_QUANTITY: i32 = 8;

/// Amount of selectable distribution curves.
pub const MAX_DISTRIBUTION: i32 = 11;

#[derive(Debug, Clone)]
pub struct ClockMultiplierConfig {
    /// Clock signal strategy. Default is `ClockSource::External`;
    /// `Internal { bpm: 70 }` matches the original self-test clock.
    pub clock_source: ClockSource,

    /// Length of an output trigger in milliseconds. Default is `25`.
    pub trigger_length_ms: u32,

    /// Time in milliseconds the mute state is insensitive after a change.
    /// Default is `50`.
    pub push_button_delay_ms: u32,

    /// Input LED brightness on a high input level. Default is `200`.
    pub trigger_in_led_brightness: u8,

    /// Output LED brightness while firing unmuted. Default is `50`.
    pub trigger_out_led_brightness: u8,

    /// Output LED brightness while firing muted. Default is `1`.
    pub trigger_out_led_muted_brightness: u8,
}

impl Default for ClockMultiplierConfig {
    fn default() -> Self {
        Self {
            clock_source: ClockSource::External,
            trigger_length_ms: TRIGGER_LENGTH_MS,
            push_button_delay_ms: 50,
            trigger_in_led_brightness: 200,
            trigger_out_led_brightness: 50,
            trigger_out_led_muted_brightness: 1,
        }
    }
}

#[derive(Debug, Default)]
pub struct ClockMultiplierEngine {
    config: ClockMultiplierConfig,

    // Timestamps of the latest observed input levels.
    trigger_in_high: u32,
    trigger_in_low: u32,

    // Cycle measurement, valid after one full observed cycle.
    cycle_start: u32,
    cycle_time: u32,

    quantity: i32,
    distribution: i32,

    muted: bool,
    mute_changed_at: u32,
}

impl ClockMultiplierEngine {
    pub fn new(config: ClockMultiplierConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Triggers emitted per cycle.
    pub fn quantity(&self) -> i32 {
        self.quantity
    }

    /// Selected distribution curve, 1 to 11.
    pub fn distribution(&self) -> i32 {
        self.distribution
    }

    /// Length of the last measured cycle in milliseconds.
    pub fn cycle_time(&self) -> u32 {
        self.cycle_time
    }

    /// Committed mute state.
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    fn read_quantity(&self, inputs: &EngineInputs) -> i32 {
        let sum = inputs.pot_a as u32 + inputs.cv_in as u32;
        let q = map_range(sum, 1024, 1, MAX_QUANTITY as u32 + 1) as i32;
        q.min(MAX_QUANTITY)
    }

    fn read_distribution(&self, inputs: &EngineInputs) -> i32 {
        map_range(inputs.pot_b as u32, 1024, 1, MAX_DISTRIBUTION as u32 + 1) as i32
    }
}

impl Engine for ClockMultiplierEngine {
    fn init(&mut self) {
        self.trigger_in_high = 0;
        self.trigger_in_low = 0;
        self.cycle_start = 0;
        self.cycle_time = 0;
        self.quantity = 0;
        self.distribution = 0;
        self.muted = false;
        self.mute_changed_at = 0;
    }

    #[inline]
    fn tick(&mut self, inputs: &EngineInputs, outputs: &mut EngineOutputs) {
        let now = inputs.now;

        // Trigger input and cycle measurement.
        if self
            .config
            .clock_source
            .level(inputs.trigger_in, now, self.config.trigger_length_ms)
        {
            outputs.trigger_in_led = self.config.trigger_in_led_brightness;

            // A high after a completed low phase begins a new cycle.
            if self.trigger_in_low > self.trigger_in_high {
                self.cycle_time = now.wrapping_sub(self.cycle_start);
                self.cycle_start = now;
                debug!(
                    "cycle_start: {}, cycle_time: {}",
                    self.cycle_start, self.cycle_time
                );
            }
            self.trigger_in_high = now;
        } else {
            outputs.trigger_in_led = 0;
            self.trigger_in_low = now;
        }

        // Quantity from poti and CV summed up.
        let q = self.read_quantity(inputs);
        if self.quantity != q {
            self.quantity = q;
            // A little flash to indicate the change.
            outputs.trigger_in_led = self.config.trigger_in_led_brightness;
            debug!("quantity: {}", self.quantity);
        }

        // Distribution.
        let d = self.read_distribution(inputs);
        if self.distribution != d {
            self.distribution = d;
            outputs.trigger_in_led = self.config.trigger_in_led_brightness;
            debug!("distribution: {}", self.distribution);
        }

        // Mute, committed with a debounce guard.
        if inputs.mute != self.muted
            && now.wrapping_sub(self.mute_changed_at) > self.config.push_button_delay_ms
        {
            self.muted = inputs.mute;
            self.mute_changed_at = now;
            outputs.trigger_in_led = self.config.trigger_in_led_brightness;
            debug!("muted: {}", self.muted);
        }

        // Fire schedule, evaluated every tick because the settings can
        // change anytime. The earliest matching slice wins so its trigger
        // stays high for the full length.
        let mut firing = false;
        let easing = Easing::from(self.distribution);

        for i in 0..self.quantity {
            let d = i as f32 / self.quantity as f32;
            let f = easing.apply(d);
            let timestamp = self.cycle_start.wrapping_add((self.cycle_time as f32 * f) as u32);

            if now.wrapping_sub(timestamp) < self.config.trigger_length_ms {
                firing = true;
                break;
            }
        }

        if firing {
            if !self.muted {
                outputs.trigger_out_led = self.config.trigger_out_led_brightness;
                outputs.trigger_out = true;
            } else {
                outputs.trigger_out_led = self.config.trigger_out_led_muted_brightness;
                outputs.trigger_out = false;
            }
        } else {
            outputs.trigger_out_led = 0;
            outputs.trigger_out = false;
        }
    }
}
