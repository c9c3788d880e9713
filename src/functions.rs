//! Basic wave functions evaluated in closed form.

use std::f64::consts::PI;

use crate::types::*;

/// The phase angle in radians of a wave of a given frequency at a given time, shifted by
/// `phase_offset` radians.
pub fn phase_angle(time: Time, frequency: Frequency, phase_offset: f64) -> f64 {
    2.0 * PI * frequency * time + phase_offset
}

/// Generate a sine wave of a given frequency and phase at a given time.
pub fn sine_wave(time: Time, frequency: Frequency, phase_offset: f64) -> Sample {
    f64::sin(phase_angle(time, frequency, phase_offset))
}

/// Generate a cosine wave of a given frequency and phase at a given time.
pub fn cosine_wave(time: Time, frequency: Frequency, phase_offset: f64) -> Sample {
    f64::cos(phase_angle(time, frequency, phase_offset))
}

/// The trigonometric function used to turn a phase angle into a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Wave {
    #[default]
    Sine,
    Cosine,
}

impl Wave {
    /// Evaluate the wave at the given angle in radians.
    pub fn at(self, angle: f64) -> Sample {
        match self {
            Wave::Sine => f64::sin(angle),
            Wave::Cosine => f64::cos(angle),
        }
    }
}
