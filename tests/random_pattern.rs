//! Tests for the random pattern engine

use bbg_trigger_omatic::engine::random_pattern_engine::{
    RandomPatternConfig, RandomPatternEngine,
};
use bbg_trigger_omatic::engine::{Engine, EngineInputs, EngineOutputs};

// Poti values for the six length bands.
const LENGTH_POTS: [(u16, usize); 6] = [
    (0, 4),
    (171, 8),
    (342, 16),
    (512, 32),
    (683, 64),
    (1023, 128),
];

fn tick(
    engine: &mut RandomPatternEngine,
    outputs: &mut EngineOutputs,
    now: u32,
    trigger_in: bool,
    pot_a: u16,
    pot_b: u16,
) {
    let inputs = EngineInputs {
        now,
        trigger_in,
        pot_a,
        pot_b,
        cv_in: 0,
        mute: false,
    };
    engine.tick(&inputs, outputs);
}

#[test]
fn length_bands() {
    for (pot, expected) in LENGTH_POTS {
        let mut engine = RandomPatternEngine::new(RandomPatternConfig::default());
        let mut outputs = EngineOutputs::default();
        engine.init();

        tick(&mut engine, &mut outputs, 0, false, pot, 512);
        assert_eq!(engine.length(), expected, "poti value {pot}");
        assert_eq!(engine.pattern().len(), expected);
    }
}

#[test]
fn density_bounds_are_deterministic() {
    let mut engine = RandomPatternEngine::new(RandomPatternConfig::default());
    let mut outputs = EngineOutputs::default();
    engine.init();

    // Full density sets every step, whatever the random draws are.
    tick(&mut engine, &mut outputs, 0, false, 1023, 1023);
    assert_eq!(engine.density(), 100);
    assert_eq!(engine.length(), 128);
    for index in 0..engine.length() {
        assert!(engine.pattern().is_set(index));
    }

    // Zero density clears every step.
    tick(&mut engine, &mut outputs, 1, false, 1023, 0);
    assert_eq!(engine.density(), 0);
    for index in 0..engine.length() {
        assert!(!engine.pattern().is_set(index));
    }
}

#[test]
fn density_approximates_fill_ratio() {
    let mut engine = RandomPatternEngine::new(RandomPatternConfig::default());
    let mut outputs = EngineOutputs::default();
    engine.init();
    engine.seed(7);

    // 50 % density over 128 steps.
    tick(&mut engine, &mut outputs, 0, false, 1023, 512);
    assert_eq!(engine.density(), 50);

    let ones = (0..engine.length())
        .filter(|index| engine.pattern().is_set(*index))
        .count();
    assert!((40..=88).contains(&ones), "fill count {ones}");
}

#[test]
fn position_advances_once_per_held_pulse_and_wraps() {
    let mut engine = RandomPatternEngine::new(RandomPatternConfig::default());
    let mut outputs = EngineOutputs::default();
    engine.init();

    // Length 4, full density.
    tick(&mut engine, &mut outputs, 0, false, 0, 1023);
    assert_eq!(engine.length(), 4);
    assert_eq!(engine.position(), 1);

    let mut now = 1000;
    for edge in 0..4usize {
        // A pulse held high over several ticks advances only once.
        for _ in 0..3 {
            tick(&mut engine, &mut outputs, now, true, 0, 1023);
            now += 1;
        }
        let expected = if edge < 3 { edge + 2 } else { 1 };
        assert_eq!(engine.position(), expected);

        for _ in 0..97 {
            tick(&mut engine, &mut outputs, now, false, 0, 1023);
            now += 1;
        }
    }

    // Back at the start after one full round.
    assert_eq!(engine.position(), 1);
}

#[test]
fn playback_follows_the_pattern() {
    let mut engine = RandomPatternEngine::new(RandomPatternConfig::default());
    let mut outputs = EngineOutputs::default();
    engine.init();
    engine.seed(42);

    // Length 8 at 50 % density.
    tick(&mut engine, &mut outputs, 0, false, 171, 512);
    assert_eq!(engine.length(), 8);

    let steps: Vec<bool> = (0..8).map(|index| engine.pattern().is_set(index)).collect();

    // One edge per 100 ms, checked right at the edge tick.
    for now in 1..2000u32 {
        let trigger_in = now >= 1000 && (now - 1000) % 100 < 3;
        tick(&mut engine, &mut outputs, now, trigger_in, 171, 512);

        if now >= 1000 && (now - 1000) % 100 == 0 {
            let step = ((now - 1000) / 100) as usize;
            if step < 8 {
                assert_eq!(
                    outputs.trigger_out, steps[step],
                    "output mismatch at step {step}"
                );
            }
        }
    }
}

#[test]
fn output_pulse_lasts_trigger_length() {
    let mut engine = RandomPatternEngine::new(RandomPatternConfig::default());
    let mut outputs = EngineOutputs::default();
    engine.init();

    // Full density, so every edge produces a pulse.
    tick(&mut engine, &mut outputs, 0, false, 0, 1023);

    for now in 1..1000 {
        tick(&mut engine, &mut outputs, now, false, 0, 1023);
    }

    // Edge at 1000.
    for now in 1000..1080u32 {
        tick(&mut engine, &mut outputs, now, now == 1000, 0, 1023);
        assert_eq!(outputs.trigger_out, now <= 1025, "unexpected output at {now}");
    }
}

#[test]
fn recalculation_resets_playback_and_lights_leds() {
    let config = RandomPatternConfig::default();
    let in_led = config.trigger_in_led_brightness;
    let out_led = config.trigger_out_led_brightness;

    let mut engine = RandomPatternEngine::new(config);
    let mut outputs = EngineOutputs::default();
    engine.init();

    tick(&mut engine, &mut outputs, 0, false, 171, 512);

    // Advance a few positions.
    let mut now = 1000;
    for _ in 0..3 {
        tick(&mut engine, &mut outputs, now, true, 171, 512);
        now += 50;
        tick(&mut engine, &mut outputs, now, false, 171, 512);
        now += 50;
    }
    assert_eq!(engine.position(), 4);

    // A density change regenerates the pattern and restarts playback.
    tick(&mut engine, &mut outputs, 2000, false, 171, 1023);
    assert_eq!(engine.density(), 100);
    assert_eq!(engine.length(), 8);
    assert_eq!(engine.position(), 1);

    // Both LEDs indicate the recalculation, input low or not.
    assert_eq!(outputs.trigger_in_led, in_led);
    assert_eq!(outputs.trigger_out_led, out_led);

    // The indication holds for its window, then the LEDs go dark.
    tick(&mut engine, &mut outputs, 2200, false, 171, 1023);
    assert_eq!(outputs.trigger_in_led, in_led);

    tick(&mut engine, &mut outputs, 2201, false, 171, 1023);
    assert_eq!(outputs.trigger_in_led, 0);
    assert_eq!(outputs.trigger_out_led, 0);
}
