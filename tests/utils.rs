//! Tests for the utility functions

use bbg_trigger_omatic::utils::easing::Easing;
use bbg_trigger_omatic::utils::map_range;
use bbg_trigger_omatic::utils::random::Random;

const EPSILON: f32 = 1e-6;

#[test]
fn easing_endpoints() {
    for id in 1..=11 {
        let easing = Easing::from(id);
        assert!(
            easing.apply(0.0).abs() < EPSILON,
            "{easing:?} does not start at 0"
        );
        assert!(
            (easing.apply(1.0) - 1.0).abs() < EPSILON,
            "{easing:?} does not end at 1"
        );
    }
}

#[test]
fn easing_curve_values() {
    let half_values = [
        (1, 0.03125),
        (2, 0.0625),
        (3, 0.125),
        (4, 0.25),
        (5, 1.0 - core::f32::consts::FRAC_PI_4.cos()),
        (6, 0.5),
        (7, core::f32::consts::FRAC_PI_4.sin()),
        (8, 0.75),
        (9, 0.875),
        (10, 0.9375),
        (11, 0.96875),
    ];

    for (id, expected) in half_values {
        let value = Easing::from(id).apply(0.5);
        assert!(
            (value - expected).abs() < EPSILON,
            "curve {id} at 0.5: {value} != {expected}"
        );
    }
}

#[test]
fn easing_selection() {
    assert_eq!(Easing::from(1), Easing::InQuint);
    assert_eq!(Easing::from(6), Easing::Linear);
    assert_eq!(Easing::from(11), Easing::OutQuint);

    // Out-of-range ids fall back to linear.
    assert_eq!(Easing::from(0), Easing::Linear);
    assert_eq!(Easing::from(12), Easing::Linear);
}

#[test]
fn map_range_scaling() {
    // Quantity mapping: summed analog value to 1..=9.
    assert_eq!(map_range(0, 1024, 1, 9), 1);
    assert_eq!(map_range(400, 1024, 1, 9), 4);
    assert_eq!(map_range(1023, 1024, 1, 9), 8);

    // Values beyond the input range extrapolate.
    assert_eq!(map_range(2046, 1024, 1, 9), 16);

    // Distribution mapping: 10-bit value to 1..=11.
    assert_eq!(map_range(0, 1024, 1, 12), 1);
    assert_eq!(map_range(1023, 1024, 1, 12), 11);
}

#[test]
fn random_uniform_bounds() {
    let mut rng = Random::new();

    for _ in 0..1000 {
        assert!(rng.uniform(100) < 100);
    }

    for _ in 0..100 {
        assert_eq!(rng.uniform(1), 0);
    }
}

#[test]
fn random_deterministic_per_seed() {
    let mut a = Random::new();
    let mut b = Random::new();
    a.seed(12345);
    b.seed(12345);

    for _ in 0..100 {
        assert_eq!(a.get_word(), b.get_word());
    }

    let mut c = Random::new();
    c.seed(54321);
    let different = (0..100).any(|_| a.uniform(1000) != c.uniform(1000));
    assert!(different);
}
