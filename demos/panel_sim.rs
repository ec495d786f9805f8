//! Hardware-free simulation of the module loop.
//!
//! Drives the frontend against a virtual panel with a synthetic external
//! clock, switches the mode halfway through and prints the trigger timeline.

use log::info;
use simple_logger::SimpleLogger;

use bbg_trigger_omatic::engine::clock_multiplier_engine::ClockMultiplierConfig;
use bbg_trigger_omatic::engine::random_pattern_engine::RandomPatternConfig;
use bbg_trigger_omatic::io::Panel;
use bbg_trigger_omatic::module::TriggerOMatic;

const CLOCK_PERIOD_MS: u32 = 500;
const CLOCK_PULSE_MS: u32 = 25;
const RUN_TIME_MS: u32 = 8000;

/// Panel with scripted inputs, advanced one millisecond per loop pass.
#[derive(Debug, Default)]
struct SimPanel {
    now: u32,

    // Latest actuated state; the trigger line is the physical level.
    trigger_out_line: bool,
    trigger_in_led: u8,
    trigger_out_led: u8,
    mode_leds: (u8, u8),
}

impl Panel for SimPanel {
    fn trigger_in(&mut self) -> bool {
        self.now % CLOCK_PERIOD_MS < CLOCK_PULSE_MS
    }

    fn pot_a(&mut self) -> u16 {
        // Quantity 4 / pattern length 16.
        400
    }

    fn pot_b(&mut self) -> u16 {
        // Linear distribution / 50 % density.
        512
    }

    fn cv_in(&mut self) -> u16 {
        0
    }

    fn set_trigger_out(&mut self, active: bool) {
        self.trigger_out_line = !active;
    }

    fn set_trigger_in_led(&mut self, brightness: u8) {
        self.trigger_in_led = brightness;
    }

    fn set_trigger_out_led(&mut self, brightness: u8) {
        self.trigger_out_led = brightness;
    }

    fn set_mode_leds(&mut self, clock_multiplier: u8, random_pattern: u8) {
        self.mode_leds = (clock_multiplier, random_pattern);
    }

    fn now_ms(&mut self) -> u32 {
        self.now
    }

    fn noise_seed(&mut self) -> u32 {
        0x5EED
    }
}

fn main() {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Debug)
        .init()
        .unwrap();

    let mut panel = SimPanel::default();
    let mut module = TriggerOMatic::new(
        ClockMultiplierConfig::default(),
        RandomPatternConfig::default(),
    );
    module.init(&mut panel);

    info!("starting in mode {:?}", module.mode());

    let mut line_was_low = false;

    for now in 0..RUN_TIME_MS {
        panel.now = now;

        if now == RUN_TIME_MS / 2 {
            module.on_double_click(&mut panel);
            info!(
                "switched to mode {:?}, mode leds {:?}",
                module.mode(),
                panel.mode_leds
            );
        }

        module.poll(&mut panel);

        let line_low = !panel.trigger_out_line;
        if line_low != line_was_low {
            info!(
                "t={:5} trigger out {}",
                now,
                if line_low { "on" } else { "off" }
            );
            line_was_low = line_low;
        }
    }

    info!(
        "done after {} ms of simulated time, leds: in {} out {}",
        RUN_TIME_MS, panel.trigger_in_led, panel.trigger_out_led
    );
}
