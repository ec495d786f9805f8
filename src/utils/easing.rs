//! Easing curves shaping the trigger distribution within a cycle.
//!
//! Based on: <https://easings.net/>

// Based on CC-BY-NC-4.0-licensed code (c) 2024 by J.S. Bouten (Zaphod B)

#[allow(unused_imports)]
use num_traits::float::Float;

#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum Easing {
    InQuint,
    InQuart,
    InCubic,
    InQuad,
    InSine,

    #[default]
    Linear,

    OutSine,
    OutQuad,
    OutCubic,
    OutQuart,
    OutQuint,
}

impl<T> From<T> for Easing
where
    T: Into<i32>,
{
    fn from(value: T) -> Self {
        match value.into() {
            1 => Easing::InQuint,
            2 => Easing::InQuart,
            3 => Easing::InCubic,
            4 => Easing::InQuad,
            5 => Easing::InSine,
            7 => Easing::OutSine,
            8 => Easing::OutQuad,
            9 => Easing::OutCubic,
            10 => Easing::OutQuart,
            11 => Easing::OutQuint,
            _ => Easing::Linear,
        }
    }
}

impl Easing {
    /// Apply the curve to a phase in `[0, 1]`.
    #[inline]
    pub fn apply(self, d: f32) -> f32 {
        match self {
            Easing::InQuint => d * d * d * d * d,
            Easing::InQuart => d * d * d * d,
            Easing::InCubic => d * d * d,
            Easing::InQuad => d * d,
            Easing::InSine => 1.0 - (d * core::f32::consts::FRAC_PI_2).cos(),
            Easing::Linear => d,
            Easing::OutSine => (d * core::f32::consts::FRAC_PI_2).sin(),
            Easing::OutQuad => 1.0 - (1.0 - d) * (1.0 - d),
            Easing::OutCubic => 1.0 - (1.0 - d).powi(3),
            Easing::OutQuart => 1.0 - (1.0 - d).powi(4),
            Easing::OutQuint => 1.0 - (1.0 - d).powi(5),
        }
    }
}
