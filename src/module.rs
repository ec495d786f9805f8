//! Module frontend with mode dispatch and panel actuation.
//!
//! Owns both engines and the shared hardware. Only the active engine is
//! ticked; the other one keeps its state frozen until the mode is switched
//! back. Button gestures are detected externally and reach the frontend
//! through the `on_*` entry points.

// Based on CC-BY-NC-4.0-licensed code (c) 2024 by J.S. Bouten (Zaphod B)

use log::debug;

use crate::engine::clock_multiplier_engine::{ClockMultiplierConfig, ClockMultiplierEngine};
use crate::engine::random_pattern_engine::{RandomPatternConfig, RandomPatternEngine};
use crate::engine::{Engine, EngineInputs, EngineOutputs};
use crate::io::Panel;

/// Brightness of the active mode LED.
const MODE_LED_HIGH_BRIGHTNESS: u8 = 150;

/// The two applications sharing the hardware.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum Mode {
    #[default]
    ClockMultiplier,

    RandomPattern,
}

impl Mode {
    fn toggled(self) -> Self {
        match self {
            Mode::ClockMultiplier => Mode::RandomPattern,
            Mode::RandomPattern => Mode::ClockMultiplier,
        }
    }
}

#[derive(Debug, Default)]
pub struct TriggerOMatic {
    mode: Mode,
    mute_requested: bool,

    clock_multiplier: ClockMultiplierEngine,
    random_pattern: RandomPatternEngine,

    // Kept across ticks so untouched levels hold, like latched pins do.
    outputs: EngineOutputs,
}

impl TriggerOMatic {
    pub fn new(
        clock_multiplier: ClockMultiplierConfig,
        random_pattern: RandomPatternConfig,
    ) -> Self {
        Self {
            clock_multiplier: ClockMultiplierEngine::new(clock_multiplier),
            random_pattern: RandomPatternEngine::new(random_pattern),
            ..Default::default()
        }
    }

    /// Seed the random generator from the panel's noise source, bring both
    /// engines to their initial state and light the mode LEDs.
    pub fn init(&mut self, panel: &mut impl Panel) {
        self.random_pattern.seed(panel.noise_seed());
        self.clock_multiplier.init();
        self.random_pattern.init();
        self.update_mode_leds(panel);
    }

    /// Active mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Requested mute state. Committing it is up to the clock multiplier's
    /// debounce guard.
    pub fn is_mute_requested(&self) -> bool {
        self.mute_requested
    }

    pub fn clock_multiplier(&self) -> &ClockMultiplierEngine {
        &self.clock_multiplier
    }

    pub fn random_pattern(&self) -> &RandomPatternEngine {
        &self.random_pattern
    }

    /// Single click: toggle the mute request, in clock multiplier mode only.
    pub fn on_click(&mut self) {
        if self.mode == Mode::ClockMultiplier {
            self.mute_requested = !self.mute_requested;
            debug!("mute requested: {}", self.mute_requested);
        }
    }

    /// Double click: switch the application.
    pub fn on_double_click(&mut self, panel: &mut impl Panel) {
        self.toggle_mode(panel);
    }

    /// Long press release: switch the application.
    pub fn on_long_press(&mut self, panel: &mut impl Panel) {
        self.toggle_mode(panel);
    }

    /// One iteration of the control loop: sample the panel, tick the active
    /// engine, actuate the outputs.
    pub fn poll(&mut self, panel: &mut impl Panel) {
        let inputs = EngineInputs {
            now: panel.now_ms(),
            trigger_in: panel.trigger_in(),
            pot_a: panel.pot_a(),
            pot_b: panel.pot_b(),
            cv_in: panel.cv_in(),
            mute: self.mute_requested,
        };

        match self.mode {
            Mode::ClockMultiplier => self.clock_multiplier.tick(&inputs, &mut self.outputs),
            Mode::RandomPattern => self.random_pattern.tick(&inputs, &mut self.outputs),
        }

        panel.set_trigger_in_led(self.outputs.trigger_in_led);
        panel.set_trigger_out_led(self.outputs.trigger_out_led);
        panel.set_trigger_out(self.outputs.trigger_out);
    }

    fn toggle_mode(&mut self, panel: &mut impl Panel) {
        self.mode = self.mode.toggled();
        debug!("mode: {:?}", self.mode);
        self.update_mode_leds(panel);
    }

    fn update_mode_leds(&self, panel: &mut impl Panel) {
        match self.mode {
            Mode::ClockMultiplier => panel.set_mode_leds(MODE_LED_HIGH_BRIGHTNESS, 0),
            Mode::RandomPattern => panel.set_mode_leds(0, MODE_LED_HIGH_BRIGHTNESS),
        }
    }
}
