//! Hardware abstraction for the module panel.

/// Capabilities of the panel hardware consumed by the frontend.
///
/// One implementation drives the real pins of the module; tests and demos
/// substitute virtual panels. Analog reads are 10-bit, `0..1024`.
pub trait Panel {
    /// Level of the digital trigger/clock input.
    fn trigger_in(&mut self) -> bool;

    /// Quantity poti (clock multiplier) / length poti (random pattern).
    fn pot_a(&mut self) -> u16;

    /// Distribution poti (clock multiplier) / density poti (random pattern).
    fn pot_b(&mut self) -> u16;

    /// Quantity CV input, used by the clock multiplier only.
    fn cv_in(&mut self) -> u16;

    /// Drive the trigger output. The physical line is inverted: an active
    /// trigger pulls the pin low.
    fn set_trigger_out(&mut self, active: bool);

    /// Brightness of the trigger input LED.
    fn set_trigger_in_led(&mut self, brightness: u8);

    /// Brightness of the trigger output LED.
    fn set_trigger_out_led(&mut self, brightness: u8);

    /// Brightness of the two mode indicator LEDs.
    fn set_mode_leds(&mut self, clock_multiplier: u8, random_pattern: u8);

    /// Monotonic millisecond clock, wrapping at the u32 range.
    fn now_ms(&mut self) -> u32;

    /// Entropy from an unconnected analog input, read once for seeding.
    fn noise_seed(&mut self) -> u32;
}
